// crates/reader-gate-core/src/core/capability.rs
// ============================================================================
// Module: Reader Gate Capabilities
// Description: Capability maps and capability-check requests.
// Purpose: Model the host platform's capability checks with explicit merge rules.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A capability set maps capability names to booleans, mirroring the host
//! platform's per-user capability map. Merging a role's capabilities into a
//! user's set is shallow and right-biased: incoming values overwrite existing
//! keys rather than OR-ing with them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Capability gating read access to a site's content.
pub const READ_CAPABILITY: &str = "read";

// ============================================================================
// SECTION: Capability Set
// ============================================================================

/// Mapping from capability name to granted flag.
///
/// # Invariants
/// - An absent key is equivalent to `false`.
/// - Merges are shallow and right-biased; incoming values overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet {
    /// Capability name to granted flag.
    entries: BTreeMap<String, bool>,
}

impl CapabilitySet {
    /// Creates an empty capability set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Sets a capability flag, overwriting any existing value.
    pub fn set(&mut self, name: impl Into<String>, granted: bool) {
        self.entries.insert(name.into(), granted);
    }

    /// Returns true when the capability is present and true.
    #[must_use]
    pub fn grants(&self, name: &str) -> bool {
        self.entries.get(name).copied().unwrap_or(false)
    }

    /// Returns true when the set holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Merges another set into this one; incoming values overwrite existing keys.
    pub fn merge_from(&mut self, other: &Self) {
        for (name, granted) in &other.entries {
            self.entries.insert(name.clone(), *granted);
        }
    }

    /// Iterates over entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(name, granted)| (name.as_str(), *granted))
    }
}

impl FromIterator<(String, bool)> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// SECTION: Capability Request
// ============================================================================

/// Set of capability names being checked for a user.
///
/// # Invariants
/// - Names are exact; no normalization is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityRequest {
    /// Requested capability names.
    names: BTreeSet<String>,
}

impl CapabilityRequest {
    /// Creates a request for a single capability.
    #[must_use]
    pub fn single(name: impl Into<String>) -> Self {
        let mut names = BTreeSet::new();
        names.insert(name.into());
        Self {
            names,
        }
    }

    /// Returns true when the request includes the given capability.
    #[must_use]
    pub fn includes(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns true when the request includes the read capability.
    #[must_use]
    pub fn wants_read(&self) -> bool {
        self.includes(READ_CAPABILITY)
    }
}

impl FromIterator<String> for CapabilityRequest {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}
