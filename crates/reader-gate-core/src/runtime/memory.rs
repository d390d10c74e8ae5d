// crates/reader-gate-core/src/runtime/memory.rs
// ============================================================================
// Module: Reader Gate In-Memory Stores
// Description: Reference role and attribute stores backed by in-process maps.
// Purpose: Provide deterministic backends for tests and embedded deployments.
// Dependencies: crate::core, crate::interfaces, std
// ============================================================================

//! ## Overview
//! The in-memory stores implement the backend-agnostic interfaces over
//! mutex-guarded maps. They are reference implementations: role assignment
//! is idempotent, unknown users have empty attributes, and unknown roles
//! fail closed. Lock poisoning surfaces as a backend error rather than a
//! panic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::core::capability::CapabilitySet;
use crate::core::identifiers::OrgDomain;
use crate::core::identifiers::RoleName;
use crate::core::identifiers::UserId;
use crate::interfaces::AttributeStore;
use crate::interfaces::AttributeStoreError;
use crate::interfaces::RoleStore;
use crate::interfaces::RoleStoreError;

// ============================================================================
// SECTION: Role Store
// ============================================================================

/// Mutable state behind the in-memory role store.
#[derive(Debug, Default)]
struct RoleState {
    /// Registered roles and their capability sets.
    roles: BTreeMap<RoleName, CapabilitySet>,
    /// Role assignments per user.
    assignments: BTreeMap<UserId, BTreeSet<RoleName>>,
}

/// In-memory role and capability registry.
///
/// # Invariants
/// - `assign_role` on a held role is a no-op.
/// - Capability lookups for unregistered roles fail closed.
#[derive(Debug, Default)]
pub struct InMemoryRoleStore {
    /// Guarded store state.
    state: Mutex<RoleState>,
}

impl InMemoryRoleStore {
    /// Creates an empty role store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a role with its capability set, replacing any previous set.
    ///
    /// # Errors
    ///
    /// Returns [`RoleStoreError::Backend`] when the store lock is poisoned.
    pub fn register_role(
        &self,
        role: RoleName,
        capabilities: CapabilitySet,
    ) -> Result<(), RoleStoreError> {
        self.lock()?.roles.insert(role, capabilities);
        Ok(())
    }

    /// Acquires the state lock, mapping poisoning to a backend error.
    fn lock(&self) -> Result<MutexGuard<'_, RoleState>, RoleStoreError> {
        self.state
            .lock()
            .map_err(|_| RoleStoreError::Backend("role store lock poisoned".to_string()))
    }
}

impl RoleStore for InMemoryRoleStore {
    fn assign_role(&self, user: UserId, role: &RoleName) -> Result<(), RoleStoreError> {
        let mut state = self.lock()?;
        if !state.roles.contains_key(role) {
            return Err(RoleStoreError::UnknownRole(role.clone()));
        }
        state.assignments.entry(user).or_default().insert(role.clone());
        Ok(())
    }

    fn role_capabilities(&self, role: &RoleName) -> Result<CapabilitySet, RoleStoreError> {
        let state = self.lock()?;
        state
            .roles
            .get(role)
            .cloned()
            .ok_or_else(|| RoleStoreError::UnknownRole(role.clone()))
    }

    fn user_roles(&self, user: UserId) -> Result<BTreeSet<RoleName>, RoleStoreError> {
        let state = self.lock()?;
        Ok(state.assignments.get(&user).cloned().unwrap_or_default())
    }
}

// ============================================================================
// SECTION: Attribute Store
// ============================================================================

/// Mutable state behind the in-memory attribute store.
#[derive(Debug, Default)]
struct AttributeState {
    /// Recorded home organizations per user.
    home_orgs: BTreeMap<UserId, Vec<OrgDomain>>,
    /// Federated-account markers per user.
    federated: BTreeSet<UserId>,
}

/// In-memory per-user attribute store.
///
/// # Invariants
/// - Unknown users have empty affiliations and no federated marker.
/// - Recording overwrites; previous affiliations are discarded.
#[derive(Debug, Default)]
pub struct InMemoryAttributeStore {
    /// Guarded store state.
    state: Mutex<AttributeState>,
}

impl InMemoryAttributeStore {
    /// Creates an empty attribute store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or clears the federated-account marker for a user.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeStoreError::Backend`] when the store lock is
    /// poisoned.
    pub fn set_federated(&self, user: UserId, federated: bool) -> Result<(), AttributeStoreError> {
        let mut state = self.lock()?;
        if federated {
            state.federated.insert(user);
        } else {
            state.federated.remove(&user);
        }
        Ok(())
    }

    /// Acquires the state lock, mapping poisoning to a backend error.
    fn lock(&self) -> Result<MutexGuard<'_, AttributeState>, AttributeStoreError> {
        self.state
            .lock()
            .map_err(|_| AttributeStoreError::Backend("attribute store lock poisoned".to_string()))
    }
}

impl AttributeStore for InMemoryAttributeStore {
    fn home_orgs(&self, user: UserId) -> Result<Vec<OrgDomain>, AttributeStoreError> {
        let state = self.lock()?;
        Ok(state.home_orgs.get(&user).cloned().unwrap_or_default())
    }

    fn record_home_orgs(
        &self,
        user: UserId,
        orgs: Vec<OrgDomain>,
    ) -> Result<(), AttributeStoreError> {
        self.lock()?.home_orgs.insert(user, orgs);
        Ok(())
    }

    fn is_federated(&self, user: UserId) -> Result<bool, AttributeStoreError> {
        Ok(self.lock()?.federated.contains(&user))
    }
}
