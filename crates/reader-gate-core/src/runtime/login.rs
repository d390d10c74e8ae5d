// crates/reader-gate-core/src/runtime/login.rs
// ============================================================================
// Module: Reader Gate Login Gate
// Description: Login URL rewriting and subsite federated-login rejection.
// Purpose: Funnel all federated logins through the designated primary site.
// Dependencies: thiserror, url
// ============================================================================

//! ## Overview
//! In a multi-site install only the primary site may perform federated
//! logins. The gate rewrites login URLs on every other site to the primary
//! login endpoint, carrying the optional redirect target and
//! re-authentication flag as query parameters, and rejects direct federated
//! login attempts on non-primary sites with the `subsite` error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Login gate errors.
///
/// # Invariants
/// - Error codes and messages are stable; the message is shown to end users
///   as a blocking condition and is never retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoginError {
    /// Federated login attempted on a non-primary site.
    #[error("Shibboleth login from subsite is not allowed.")]
    Subsite,
}

impl LoginError {
    /// Returns the stable error code for host-platform error surfaces.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Subsite => "subsite",
        }
    }
}

// ============================================================================
// SECTION: Login Gate
// ============================================================================

/// Rewrites login URLs and gates federated login to the primary site.
///
/// # Invariants
/// - Primary-site requests pass through unmodified.
/// - Rewritten URLs always point at the configured primary login endpoint.
#[derive(Debug, Clone)]
pub struct LoginGate {
    /// Login endpoint of the primary site.
    primary_login_url: Url,
}

impl LoginGate {
    /// Creates a gate targeting the primary site's login endpoint.
    #[must_use]
    pub const fn new(primary_login_url: Url) -> Self {
        Self {
            primary_login_url,
        }
    }

    /// Returns the login URL for a site.
    ///
    /// On the primary site the requested URL passes through unchanged. On
    /// any other site the primary login endpoint is returned, with
    /// `redirect_to` appended when a redirect target is present and
    /// `reauth=1` appended when re-authentication is forced.
    #[must_use]
    pub fn login_url(
        &self,
        site_is_primary: bool,
        requested: &Url,
        redirect: Option<&str>,
        force_reauth: bool,
    ) -> Url {
        if site_is_primary {
            return requested.clone();
        }

        let mut login_url = self.primary_login_url.clone();
        let redirect = redirect.filter(|target| !target.is_empty());
        if redirect.is_some() || force_reauth {
            let mut query = login_url.query_pairs_mut();
            if let Some(target) = redirect {
                query.append_pair("redirect_to", target);
            }
            if force_reauth {
                query.append_pair("reauth", "1");
            }
        }
        login_url
    }

    /// Authorizes a federated login attempt for a site.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::Subsite`] for any non-primary site; primary-site
    /// attempts pass through.
    pub const fn authorize_federated_login(&self, site_is_primary: bool) -> Result<(), LoginError> {
        if site_is_primary {
            Ok(())
        } else {
            Err(LoginError::Subsite)
        }
    }
}
