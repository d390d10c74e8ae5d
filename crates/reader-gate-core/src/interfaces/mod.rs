// crates/reader-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Reader Gate Interfaces
// Description: Backend-agnostic interfaces for role and user-attribute storage.
// Purpose: Define the contract surfaces between the runtime and the host platform.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how Reader Gate integrates with the host platform's role
//! registry and user-attribute store without embedding backend-specific
//! details. Implementations must be deterministic and fail closed on missing
//! or invalid data; an absent attribute is an empty value, not an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use thiserror::Error;

use crate::core::capability::CapabilitySet;
use crate::core::identifiers::OrgDomain;
use crate::core::identifiers::RoleName;
use crate::core::identifiers::UserId;

// ============================================================================
// SECTION: Role Store
// ============================================================================

/// Role store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum RoleStoreError {
    /// The role is not registered in the host platform.
    #[error("unknown role: {0}")]
    UnknownRole(RoleName),
    /// Role store backend reported an error.
    #[error("role store error: {0}")]
    Backend(String),
}

/// Backend-agnostic role and capability registry.
pub trait RoleStore {
    /// Assigns a role to a user; assigning an already-held role is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`RoleStoreError`] when the role is unknown or the backend
    /// fails.
    fn assign_role(&self, user: UserId, role: &RoleName) -> Result<(), RoleStoreError>;

    /// Returns the capability set attached to a role.
    ///
    /// # Errors
    ///
    /// Returns [`RoleStoreError`] when the role is unknown or the backend
    /// fails.
    fn role_capabilities(&self, role: &RoleName) -> Result<CapabilitySet, RoleStoreError>;

    /// Returns the roles currently assigned to a user.
    ///
    /// # Errors
    ///
    /// Returns [`RoleStoreError`] when the backend fails. An unknown user has
    /// no roles.
    fn user_roles(&self, user: UserId) -> Result<BTreeSet<RoleName>, RoleStoreError>;
}

// ============================================================================
// SECTION: Attribute Store
// ============================================================================

/// User-attribute store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum AttributeStoreError {
    /// Attribute store backend reported an error.
    #[error("attribute store error: {0}")]
    Backend(String),
}

/// Backend-agnostic per-user attribute store.
///
/// Holds the two federated-login attributes: the `shibboleth_account` marker
/// written by the external registration flow and the `shibboleth_home_orgs`
/// list written by the affiliation recorder.
pub trait AttributeStore {
    /// Returns the recorded home organizations; absent attribute is empty.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeStoreError`] when the backend fails.
    fn home_orgs(&self, user: UserId) -> Result<Vec<OrgDomain>, AttributeStoreError>;

    /// Overwrites the recorded home organizations; never merges.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeStoreError`] when the backend fails.
    fn record_home_orgs(
        &self,
        user: UserId,
        orgs: Vec<OrgDomain>,
    ) -> Result<(), AttributeStoreError>;

    /// Returns whether the user carries the federated-account marker.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeStoreError`] when the backend fails.
    fn is_federated(&self, user: UserId) -> Result<bool, AttributeStoreError>;
}
