// crates/reader-gate-core/src/runtime/evaluator.rs
// ============================================================================
// Module: Reader Gate Capability Evaluator
// Description: Grant decision and role application for read-capability checks.
// Purpose: Decide subscriber grants deterministically and apply them idempotently.
// Dependencies: crate::core, crate::interfaces, serde, thiserror
// ============================================================================

//! ## Overview
//! The evaluator acts only on capability checks that include `read`. Two
//! independent conditions are OR-ed: a public site grants any user who does
//! not yet hold the subscriber role, and a private-site policy match grants a
//! user whose recorded affiliations satisfy the administrator's
//! [`SubscriberPolicy`]. The decision itself never fails; missing upstream
//! data degrades to "no grant". Only role-store writes can surface an error.
//!
//! Grants are one-way. A user who already reads keeps reading; the
//! affiliation branch short-circuits once `read` is present, and the public
//! branch may re-grant redundantly, which the role store absorbs as a no-op.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::capability::CapabilityRequest;
use crate::core::capability::CapabilitySet;
use crate::core::capability::READ_CAPABILITY;
use crate::core::identifiers::RoleName;
use crate::core::identifiers::UserId;
use crate::core::policy::SubscriberPolicy;
use crate::core::user::UserSnapshot;
use crate::interfaces::RoleStore;
use crate::interfaces::RoleStoreError;

// ============================================================================
// SECTION: Decision Records
// ============================================================================

/// Outcome of a grant decision.
///
/// # Invariants
/// - Variants are stable for audit-record consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrantOutcome {
    /// The check did not include the read capability; nothing was evaluated.
    NotReadCheck,
    /// Neither branch matched; capabilities pass through unchanged.
    Denied,
    /// The subscriber role is granted.
    Granted {
        /// The public-site branch matched.
        public_site: bool,
        /// The affiliation-policy branch matched.
        policy_match: bool,
    },
}

impl GrantOutcome {
    /// Returns true when the outcome grants the subscriber role.
    #[must_use]
    pub const fn granted(self) -> bool {
        matches!(self, Self::Granted { .. })
    }
}

/// Audit record for a single capability-check decision.
///
/// # Invariants
/// - `policy` is `None` when the stored raw option value fell outside the
///   closed policy set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantDecision {
    /// User the check was evaluated for.
    pub user: UserId,
    /// Policy in effect, if the raw option value was in range.
    pub policy: Option<SubscriberPolicy>,
    /// Site visibility at decision time.
    pub site_is_public: bool,
    /// Decision outcome.
    pub outcome: GrantOutcome,
}

/// Result of applying a grant decision to a capability set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Capability map returned to the host's authorization pipeline.
    pub capabilities: CapabilitySet,
    /// Audit record for the decision.
    pub decision: GrantDecision,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Evaluator errors.
///
/// # Invariants
/// - Only role-store writes fail; the grant decision itself is infallible.
#[derive(Debug, Error)]
pub enum EvaluateError {
    /// The role store rejected the grant or capability lookup.
    #[error("role store failure during grant: {0}")]
    RoleStore(#[from] RoleStoreError),
}

// ============================================================================
// SECTION: Grant Decision
// ============================================================================

/// Decides whether a capability check grants the subscriber role.
///
/// Pure over its inputs. `policy` is `None` for out-of-range raw option
/// values, which never match. The public-site and affiliation branches are
/// independent OR-ed conditions; both are evaluated.
#[must_use]
pub fn decide(
    request: &CapabilityRequest,
    current: &CapabilitySet,
    user: &UserSnapshot,
    policy: Option<SubscriberPolicy>,
    site_is_public: bool,
) -> GrantDecision {
    if !request.wants_read() {
        return GrantDecision {
            user: user.id,
            policy,
            site_is_public,
            outcome: GrantOutcome::NotReadCheck,
        };
    }

    let public_site = site_is_public && !user.holds_role(&RoleName::subscriber());

    let policy_match = !current.grants(READ_CAPABILITY)
        && policy.is_some_and(|policy| policy.grants(&user.home_orgs, user.federated));

    let outcome = if public_site || policy_match {
        GrantOutcome::Granted {
            public_site,
            policy_match,
        }
    } else {
        GrantOutcome::Denied
    };

    GrantDecision {
        user: user.id,
        policy,
        site_is_public,
        outcome,
    }
}

// ============================================================================
// SECTION: Evaluator
// ============================================================================

/// Applies grant decisions through an injected role store.
///
/// # Invariants
/// - Non-grant outcomes touch no state and return the input map unchanged.
/// - Grant application is idempotent with respect to repeated checks.
pub struct CapabilityEvaluator<'a> {
    /// Host platform role and capability registry.
    roles: &'a dyn RoleStore,
}

impl<'a> CapabilityEvaluator<'a> {
    /// Creates an evaluator over the given role store.
    #[must_use]
    pub const fn new(roles: &'a dyn RoleStore) -> Self {
        Self {
            roles,
        }
    }

    /// Evaluates a capability check and applies any resulting grant.
    ///
    /// On grant: assigns the subscriber role (a no-op when already held),
    /// then merges the role's capabilities into the returned map with
    /// right-biased overwrite semantics. Otherwise returns the input map
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError`] when the role store rejects the assignment
    /// or the capability lookup.
    pub fn evaluate(
        &self,
        request: &CapabilityRequest,
        current: &CapabilitySet,
        user: &UserSnapshot,
        policy: Option<SubscriberPolicy>,
        site_is_public: bool,
    ) -> Result<Evaluation, EvaluateError> {
        let decision = decide(request, current, user, policy, site_is_public);

        if !decision.outcome.granted() {
            return Ok(Evaluation {
                capabilities: current.clone(),
                decision,
            });
        }

        let role = RoleName::subscriber();
        self.roles.assign_role(user.id, &role)?;
        let role_capabilities = self.roles.role_capabilities(&role)?;

        let mut capabilities = current.clone();
        capabilities.merge_from(&role_capabilities);

        Ok(Evaluation {
            capabilities,
            decision,
        })
    }
}
