// crates/reader-gate-core/src/core/mod.rs
// ============================================================================
// Module: Reader Gate Core Types
// Description: Identifiers, capability sets, policy table, and user snapshots.
// Purpose: Provide the strongly typed data model shared by all runtime parts.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The core module holds the data model: opaque identifiers, the capability
//! map, the subscriber policy table, and the read-only user snapshot the
//! evaluator consumes. All types are serializable for audit records.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod capability;
pub mod identifiers;
pub mod policy;
pub mod user;
