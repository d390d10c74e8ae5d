// crates/reader-gate-config/src/model.rs
// ============================================================================
// Module: Reader Gate Config Model
// Description: Configuration types, load guards, and semantic validation.
// Purpose: Keep configuration input handling strict and fail-closed.
// Dependencies: reader-gate-core, serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! The model mirrors the persisted site options: a raw subscriber-policy
//! integer, the primary login endpoint, and per-site primary/visibility
//! flags. `load` enforces hard input guards (path length, component length,
//! file size, UTF-8) before TOML parsing, then validates semantics: policy
//! in the closed 0-6 set, an absolute http(s) login URL, and exactly one
//! primary site with unique identifiers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use reader_gate_core::LoginGate;
use reader_gate_core::SiteId;
use reader_gate_core::SubscriberPolicy;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration path when none is provided.
pub const DEFAULT_CONFIG_PATH: &str = "reader-gate.toml";

/// Maximum accepted configuration path length in bytes.
const MAX_PATH_BYTES: usize = 4_096;

/// Maximum accepted path component length in bytes.
const MAX_PATH_COMPONENT_BYTES: usize = 255;

/// Maximum accepted configuration file size in bytes (1 MiB).
const MAX_FILE_BYTES: u64 = 1_048_576;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
///
/// # Invariants
/// - Messages are stable; tests match on them.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration path exceeded the length guard.
    #[error("config path exceeds max length")]
    PathTooLong,
    /// A configuration path component exceeded the length guard.
    #[error("config path component too long")]
    PathComponentTooLong,
    /// Configuration file exceeded the size guard.
    #[error("config file exceeds size limit")]
    FileTooLarge,
    /// Configuration file was not valid UTF-8.
    #[error("config file must be utf-8")]
    NotUtf8,
    /// Configuration file could not be read.
    #[error("config read failed: {0}")]
    Read(String),
    /// Configuration file failed to parse as TOML.
    #[error("config parse failed: {0}")]
    Parse(String),
    /// Configuration parsed but failed semantic validation.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Configuration Model
// ============================================================================

/// Per-site record in a multi-site install.
///
/// # Invariants
/// - `id` values are unique within a configuration.
/// - Exactly one site carries `primary = true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site identifier.
    pub id: SiteId,
    /// Whether this is the designated primary site.
    #[serde(default)]
    pub primary: bool,
    /// Whether the site's content is publicly visible.
    #[serde(default)]
    pub public: bool,
}

/// Administrator-controlled Reader Gate configuration.
///
/// # Invariants
/// - `subscriber_policy` is in the closed 0-6 set after validation.
/// - `primary_login_url` is an absolute http or https URL after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderGateConfig {
    /// Raw subscriber-policy option value.
    #[serde(default)]
    pub subscriber_policy: u64,
    /// Login endpoint of the primary site.
    pub primary_login_url: String,
    /// Site table.
    pub sites: Vec<SiteConfig>,
}

impl ReaderGateConfig {
    /// Loads and validates configuration from the given path.
    ///
    /// Falls back to [`DEFAULT_CONFIG_PATH`] when no path is provided.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an input guard, the TOML parser, or
    /// semantic validation rejects the file.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        check_path(path)?;

        let metadata = fs::metadata(path).map_err(|err| ConfigError::Read(err.to_string()))?;
        if metadata.len() > MAX_FILE_BYTES {
            return Err(ConfigError::FileTooLarge);
        }

        let bytes = fs::read(path).map_err(|err| ConfigError::Read(err.to_string()))?;
        if u64::try_from(bytes.len()).unwrap_or(u64::MAX) > MAX_FILE_BYTES {
            return Err(ConfigError::FileTooLarge);
        }
        let text = String::from_utf8(bytes).map_err(|_| ConfigError::NotUtf8)?;

        let config: Self =
            toml::from_str(&text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates semantic constraints after parsing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] on out-of-range policy values,
    /// malformed login URLs, or an inconsistent site table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if SubscriberPolicy::from_raw(self.subscriber_policy).is_none() {
            return Err(ConfigError::Invalid(format!(
                "subscriber policy out of range: {}",
                self.subscriber_policy
            )));
        }

        let login_url = Url::parse(&self.primary_login_url)
            .map_err(|err| ConfigError::Invalid(format!("primary login url: {err}")))?;
        if login_url.scheme() != "http" && login_url.scheme() != "https" {
            return Err(ConfigError::Invalid(format!(
                "primary login url must be http or https, got {}",
                login_url.scheme()
            )));
        }

        if self.sites.is_empty() {
            return Err(ConfigError::Invalid("site table must not be empty".to_string()));
        }
        let primary_count = self.sites.iter().filter(|site| site.primary).count();
        if primary_count != 1 {
            return Err(ConfigError::Invalid(format!(
                "expected exactly one primary site, found {primary_count}"
            )));
        }
        for (index, site) in self.sites.iter().enumerate() {
            if self.sites[..index].iter().any(|earlier| earlier.id == site.id) {
                return Err(ConfigError::Invalid(format!("duplicate site id: {}", site.id)));
            }
        }

        Ok(())
    }

    /// Returns the policy in effect; validation guarantees `Some`.
    #[must_use]
    pub const fn policy(&self) -> Option<SubscriberPolicy> {
        SubscriberPolicy::from_raw(self.subscriber_policy)
    }

    /// Returns the designated primary site, if the table holds one.
    #[must_use]
    pub fn primary_site(&self) -> Option<&SiteConfig> {
        self.sites.iter().find(|site| site.primary)
    }

    /// Returns the site record for an identifier.
    #[must_use]
    pub fn site(&self, id: SiteId) -> Option<&SiteConfig> {
        self.sites.iter().find(|site| site.id == id)
    }

    /// Builds the login gate for the configured primary endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the URL does not parse; `load`
    /// has already rejected such configurations.
    pub fn login_gate(&self) -> Result<LoginGate, ConfigError> {
        let url = Url::parse(&self.primary_login_url)
            .map_err(|err| ConfigError::Invalid(format!("primary login url: {err}")))?;
        Ok(LoginGate::new(url))
    }
}

// ============================================================================
// SECTION: Path Guards
// ============================================================================

/// Enforces path length guards before any filesystem access.
fn check_path(path: &Path) -> Result<(), ConfigError> {
    let raw = path.as_os_str();
    if raw.len() > MAX_PATH_BYTES {
        return Err(ConfigError::PathTooLong);
    }
    for component in path.components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_BYTES {
            return Err(ConfigError::PathComponentTooLong);
        }
    }
    Ok(())
}
