// crates/reader-gate-core/src/lib.rs
// ============================================================================
// Module: Reader Gate Core Library
// Description: Data model, interfaces, and runtime for affiliation-gated reading.
// Purpose: Decide and apply subscriber-role grants from federated affiliations.
// Dependencies: serde, thiserror, url
// ============================================================================

//! ## Overview
//! Reader Gate Core decides whether a visitor of a multi-site publishing
//! install may read a site. A federated identity layer asserts the visitor's
//! home organizations, a site administrator selects a
//! [`SubscriberPolicy`], and the [`CapabilityEvaluator`] grants the
//! `subscriber` role when the policy matches.
//! Invariants:
//! - Grants are one-way; the evaluator never removes a role it granted.
//! - Missing or malformed upstream data degrades to "no grant", never to an
//!   error.
//! - Affiliation recording is ordered strictly before capability evaluation
//!   for the same login.
//!
//! Security posture: affiliation strings originate from a trusted identity
//! provider but are treated as opaque, unvalidated input everywhere.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use self::core::capability::CapabilityRequest;
pub use self::core::capability::CapabilitySet;
pub use self::core::capability::READ_CAPABILITY;
pub use self::core::identifiers::OrgDomain;
pub use self::core::identifiers::RoleName;
pub use self::core::identifiers::SUBSCRIBER_ROLE;
pub use self::core::identifiers::SiteId;
pub use self::core::identifiers::UserId;
pub use self::core::policy::SubscriberPolicy;
pub use self::core::user::UserSnapshot;
pub use interfaces::AttributeStore;
pub use interfaces::AttributeStoreError;
pub use interfaces::RoleStore;
pub use interfaces::RoleStoreError;
pub use runtime::evaluator::CapabilityEvaluator;
pub use runtime::evaluator::EvaluateError;
pub use runtime::evaluator::Evaluation;
pub use runtime::evaluator::GrantDecision;
pub use runtime::evaluator::GrantOutcome;
pub use runtime::evaluator::decide;
pub use runtime::login::LoginError;
pub use runtime::login::LoginGate;
pub use runtime::memory::InMemoryAttributeStore;
pub use runtime::memory::InMemoryRoleStore;
pub use runtime::pipeline::AuthPipeline;
pub use runtime::pipeline::PipelineError;
pub use runtime::recorder::AffiliationRecorder;
pub use runtime::recorder::Recorded;
pub use runtime::recorder::parse_home_organizations;
