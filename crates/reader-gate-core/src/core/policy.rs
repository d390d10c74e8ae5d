// crates/reader-gate-core/src/core/policy.rs
// ============================================================================
// Module: Reader Gate Subscriber Policy
// Description: The seven-mode subscriber policy table over home organizations.
// Purpose: Convert recorded affiliations into a deterministic grant decision.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! The subscriber policy is a closed set of seven administrator-selectable
//! modes, persisted as a raw integer 0-6. Evaluation is a pure membership
//! check over the user's recorded home organizations; mode 3 ignores
//! affiliations entirely and keys on the federated-account marker. Raw values
//! outside the closed set map to no policy at all, which the runtime treats
//! as never matching.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ORG_FHNW;
use crate::core::identifiers::ORG_HFH;
use crate::core::identifiers::ORG_PHZH;
use crate::core::identifiers::ORG_UZH;
use crate::core::identifiers::ORG_ZHAW;
use crate::core::identifiers::OrgDomain;

// ============================================================================
// SECTION: Policy Table
// ============================================================================

/// Administrator-selected subscriber policy.
///
/// # Invariants
/// - Raw representation is stable: the variants serialize as 0-6.
/// - `grants` is pure and deterministic over its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u64", try_from = "u64")]
pub enum SubscriberPolicy {
    /// Mode 0: nobody is granted automatically.
    Never,
    /// Mode 1: members of `hfh.ch`.
    Hfh,
    /// Mode 2: members of `hfh.ch` or `phzh.ch`.
    HfhOrPhzh,
    /// Mode 3: any federated account, affiliation-independent.
    AnyFederated,
    /// Mode 4: members of `uzh.ch`.
    Uzh,
    /// Mode 5: members of `fhnw.ch`.
    Fhnw,
    /// Mode 6: members of `zhaw.ch`.
    Zhaw,
}

impl SubscriberPolicy {
    /// Maps a raw option value into the closed policy set.
    ///
    /// Returns `None` for values outside 0-6; callers treat that as a policy
    /// that never matches.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Option<Self> {
        match raw {
            0 => Some(Self::Never),
            1 => Some(Self::Hfh),
            2 => Some(Self::HfhOrPhzh),
            3 => Some(Self::AnyFederated),
            4 => Some(Self::Uzh),
            5 => Some(Self::Fhnw),
            6 => Some(Self::Zhaw),
            _ => None,
        }
    }

    /// Returns the stable raw option value for this policy.
    #[must_use]
    pub const fn raw(self) -> u64 {
        match self {
            Self::Never => 0,
            Self::Hfh => 1,
            Self::HfhOrPhzh => 2,
            Self::AnyFederated => 3,
            Self::Uzh => 4,
            Self::Fhnw => 5,
            Self::Zhaw => 6,
        }
    }

    /// Evaluates the policy table over recorded affiliations.
    ///
    /// `federated` is the presence of the federated-account marker; only mode
    /// 3 consults it. An empty affiliation list never matches modes 1, 2, 4,
    /// 5, or 6.
    #[must_use]
    pub fn grants(self, affiliations: &[OrgDomain], federated: bool) -> bool {
        match self {
            Self::Never => false,
            Self::Hfh => contains(affiliations, ORG_HFH),
            Self::HfhOrPhzh => contains(affiliations, ORG_HFH) || contains(affiliations, ORG_PHZH),
            Self::AnyFederated => federated,
            Self::Uzh => contains(affiliations, ORG_UZH),
            Self::Fhnw => contains(affiliations, ORG_FHNW),
            Self::Zhaw => contains(affiliations, ORG_ZHAW),
        }
    }
}

impl fmt::Display for SubscriberPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.raw().fmt(f)
    }
}

impl From<SubscriberPolicy> for u64 {
    fn from(policy: SubscriberPolicy) -> Self {
        policy.raw()
    }
}

impl TryFrom<u64> for SubscriberPolicy {
    type Error = String;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::from_raw(raw).ok_or_else(|| format!("subscriber policy out of range: {raw}"))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Exact membership check over an affiliation list.
fn contains(affiliations: &[OrgDomain], domain: &str) -> bool {
    affiliations.iter().any(|org| org.as_str() == domain)
}
