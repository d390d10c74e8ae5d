// crates/reader-gate-core/src/runtime/recorder.rs
// ============================================================================
// Module: Reader Gate Affiliation Recorder
// Description: Records home organizations from the trusted request attribute.
// Purpose: Persist per-login affiliations for later policy evaluation.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The identity layer delivers a semicolon-delimited `homeOrganization`
//! attribute in the server environment of each authenticated request. The
//! recorder parses it literally (no trimming, no deduplication, order
//! preserved) and overwrites the user's recorded affiliations on every
//! federated login. Recording runs only for accounts that already carry the
//! federated marker; callers signal attribute absence with `None` rather
//! than an empty string.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::identifiers::OrgDomain;
use crate::core::identifiers::UserId;
use crate::interfaces::AttributeStore;
use crate::interfaces::AttributeStoreError;

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses the raw `homeOrganization` attribute into an ordered sequence.
///
/// Literal split on `;`: segments are not trimmed and duplicates are kept,
/// so `"hfh.ch;phzh.ch"` yields exactly those two domains and an empty raw
/// string yields a single empty segment.
#[must_use]
pub fn parse_home_organizations(raw: &str) -> Vec<OrgDomain> {
    raw.split(';').map(OrgDomain::new).collect()
}

// ============================================================================
// SECTION: Recording
// ============================================================================

/// Outcome of an affiliation recording attempt.
///
/// # Invariants
/// - Variants are stable for audit-record consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    /// The user does not carry the federated-account marker.
    SkippedNotFederated,
    /// The request carried no `homeOrganization` attribute.
    SkippedNoAttribute,
    /// Affiliations were overwritten with the given number of entries.
    Stored {
        /// Number of recorded organization domains.
        count: usize,
    },
}

/// Records per-login affiliations into the attribute store.
pub struct AffiliationRecorder<'a> {
    /// Per-user attribute store.
    attributes: &'a dyn AttributeStore,
}

impl<'a> AffiliationRecorder<'a> {
    /// Creates a recorder over the given attribute store.
    #[must_use]
    pub const fn new(attributes: &'a dyn AttributeStore) -> Self {
        Self {
            attributes,
        }
    }

    /// Records the user's home organizations for this login.
    ///
    /// Skips users without the federated marker and requests without the
    /// attribute; otherwise overwrites the stored sequence, never merging
    /// with previous logins.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeStoreError`] when the attribute store fails.
    pub fn record(
        &self,
        user: UserId,
        raw_home_organization: Option<&str>,
    ) -> Result<Recorded, AttributeStoreError> {
        if !self.attributes.is_federated(user)? {
            return Ok(Recorded::SkippedNotFederated);
        }
        let Some(raw) = raw_home_organization else {
            return Ok(Recorded::SkippedNoAttribute);
        };

        let orgs = parse_home_organizations(raw);
        let count = orgs.len();
        self.attributes.record_home_orgs(user, orgs)?;
        Ok(Recorded::Stored {
            count,
        })
    }
}
