// crates/reader-gate-core/src/core/identifiers.rs
// ============================================================================
// Module: Reader Gate Identifiers
// Description: Canonical opaque identifiers for users, sites, organizations, and roles.
// Purpose: Provide strongly typed, serializable identifiers with stable wire forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the canonical identifiers used throughout Reader Gate.
//! Numeric identifiers enforce non-zero, 1-based invariants at construction
//! boundaries. String identifiers are opaque; no normalization is applied, so
//! `HFH.CH` and `hfh.ch` are distinct organization domains.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::num::NonZeroU64;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Well-Known Values
// ============================================================================

/// Role granted automatically to matching federated users.
pub const SUBSCRIBER_ROLE: &str = "subscriber";

/// Home organization of the HfH.
pub const ORG_HFH: &str = "hfh.ch";

/// Home organization of the PHZH.
pub const ORG_PHZH: &str = "phzh.ch";

/// Home organization of the UZH.
pub const ORG_UZH: &str = "uzh.ch";

/// Home organization of the FHNW.
pub const ORG_FHNW: &str = "fhnw.ch";

/// Home organization of the ZHAW.
pub const ORG_ZHAW: &str = "zhaw.ch";

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// User identifier in the host platform's user registry.
///
/// # Invariants
/// - Always >= 1 (non-zero, 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(NonZeroU64);

impl UserId {
    /// Creates a new user identifier from a non-zero value.
    #[must_use]
    pub const fn new(id: NonZeroU64) -> Self {
        Self(id)
    }

    /// Creates a user identifier from a raw value (returns `None` if zero).
    #[must_use]
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    /// Returns the raw identifier value (always >= 1).
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.get().fmt(f)
    }
}

/// Site identifier within a multi-site install.
///
/// # Invariants
/// - Always >= 1 (non-zero, 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(NonZeroU64);

impl SiteId {
    /// Creates a new site identifier from a non-zero value.
    #[must_use]
    pub const fn new(id: NonZeroU64) -> Self {
        Self(id)
    }

    /// Creates a site identifier from a raw value (returns `None` if zero).
    #[must_use]
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    /// Returns the raw identifier value (always >= 1).
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.get().fmt(f)
    }
}

/// Organization domain asserted by the identity provider (e.g. `hfh.ch`).
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgDomain(String);

impl OrgDomain {
    /// Creates a new organization domain.
    #[must_use]
    pub fn new(domain: impl Into<String>) -> Self {
        Self(domain.into())
    }

    /// Returns the domain as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrgDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role name in the host platform's role registry.
///
/// # Invariants
/// - Opaque UTF-8 string; equality is exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleName(String);

impl RoleName {
    /// Creates a new role name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the `subscriber` role name.
    #[must_use]
    pub fn subscriber() -> Self {
        Self(SUBSCRIBER_ROLE.to_string())
    }

    /// Returns the role name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
