// crates/reader-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Reader Gate Runtime
// Description: Evaluator, recorder, login gate, pipeline, and reference stores.
// Purpose: Execute the authentication and capability flow in a fixed order.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The runtime wires the pure policy table to the host platform's stores. The
//! [`pipeline::AuthPipeline`] replaces string-keyed hook dispatch with named
//! methods called synchronously in a fixed order: subsite gating, then
//! affiliation recording, then capability evaluation.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod evaluator;
pub mod login;
pub mod memory;
pub mod pipeline;
pub mod recorder;
