// crates/reader-gate-config/src/lib.rs
// ============================================================================
// Module: Reader Gate Config Library
// Description: Canonical configuration model, strict loading, and settings UI data.
// Purpose: Validate the administrator-facing configuration at the boundary.
// Dependencies: reader-gate-core, serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! Reader Gate Config defines the site-scoped configuration an administrator
//! controls: the subscriber policy option (raw 0-6), the primary site's
//! login endpoint, and the site table with primary and visibility flags.
//! Loading is strict and fail-closed: path, size, and encoding guards run
//! before parsing, and semantic validation runs after. The runtime degrades
//! gracefully on out-of-range policy values, but the loader rejects them at
//! the boundary so misconfiguration surfaces early.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod model;
pub mod settings;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use model::ConfigError;
pub use model::DEFAULT_CONFIG_PATH;
pub use model::ReaderGateConfig;
pub use model::SiteConfig;
pub use settings::PolicyChoice;
pub use settings::policy_choices;
