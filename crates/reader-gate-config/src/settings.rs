// crates/reader-gate-config/src/settings.rs
// ============================================================================
// Module: Reader Gate Settings Presentation
// Description: Labeled choices for the subscriber-policy select control.
// Purpose: Supply presentation metadata for the admin settings screen.
// Dependencies: reader-gate-core, serde
// ============================================================================

//! ## Overview
//! The subscriber policy is rendered as a single-select control with seven
//! fixed, labeled choices. Labels are presentation-only; the behavioral
//! semantics live entirely in [`SubscriberPolicy`]. The host platform (or a
//! thin adapter) renders the control and persists the selected raw value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use reader_gate_core::SubscriberPolicy;
use serde::Serialize;

// ============================================================================
// SECTION: Policy Choices
// ============================================================================

/// One labeled choice of the subscriber-policy select control.
///
/// # Invariants
/// - `raw` values cover exactly the closed 0-6 policy set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PolicyChoice {
    /// Raw option value persisted when this choice is selected.
    pub raw: u64,
    /// Human-readable label; carries no behavioral semantics.
    pub label: &'static str,
}

impl PolicyChoice {
    /// Returns true when this choice matches the persisted raw value.
    #[must_use]
    pub const fn is_selected(&self, selected_raw: u64) -> bool {
        self.raw == selected_raw
    }
}

/// Returns the seven select-control choices in option-value order.
#[must_use]
pub const fn policy_choices() -> [PolicyChoice; 7] {
    [
        PolicyChoice {
            raw: SubscriberPolicy::Never.raw(),
            label: "Nobody",
        },
        PolicyChoice {
            raw: SubscriberPolicy::Hfh.raw(),
            label: "HfH members",
        },
        PolicyChoice {
            raw: SubscriberPolicy::HfhOrPhzh.raw(),
            label: "HfH and PHZH members",
        },
        PolicyChoice {
            raw: SubscriberPolicy::AnyFederated.raw(),
            label: "SWITCHaai",
        },
        PolicyChoice {
            raw: SubscriberPolicy::Uzh.raw(),
            label: "UZH members",
        },
        PolicyChoice {
            raw: SubscriberPolicy::Fhnw.raw(),
            label: "FHNW members",
        },
        PolicyChoice {
            raw: SubscriberPolicy::Zhaw.raw(),
            label: "ZHAW members",
        },
    ]
}
