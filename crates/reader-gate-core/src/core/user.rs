// crates/reader-gate-core/src/core/user.rs
// ============================================================================
// Module: Reader Gate User Snapshot
// Description: Read-only view of a user at capability-check time.
// Purpose: Decouple the evaluator from the host platform's user object.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! The evaluator never touches the host platform's user object directly; it
//! consumes a snapshot assembled at the request boundary. Values are
//! snapshots of the stores at read time; the evaluator must not mutate them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::OrgDomain;
use crate::core::identifiers::RoleName;
use crate::core::identifiers::UserId;

// ============================================================================
// SECTION: User Snapshot
// ============================================================================

/// Read-only user view consumed by the capability evaluator.
///
/// # Invariants
/// - `home_orgs` preserves the recorded order and duplicates.
/// - `federated` reflects the `shibboleth_account` marker, not affiliation
///   content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    /// User identifier.
    pub id: UserId,
    /// Role names currently assigned to the user.
    pub roles: BTreeSet<RoleName>,
    /// Whether the account originated from a federated login.
    pub federated: bool,
    /// Home organizations recorded at the last federated login.
    pub home_orgs: Vec<OrgDomain>,
}

impl UserSnapshot {
    /// Creates a snapshot with no roles and no recorded affiliations.
    #[must_use]
    pub const fn new(id: UserId) -> Self {
        Self {
            id,
            roles: BTreeSet::new(),
            federated: false,
            home_orgs: Vec::new(),
        }
    }

    /// Returns true when the user currently holds the role.
    #[must_use]
    pub fn holds_role(&self, role: &RoleName) -> bool {
        self.roles.contains(role)
    }
}
