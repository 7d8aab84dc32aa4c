// sflkit-core/src/weight/mod.rs
// ============================================================================
// Module: Dependency / Weight Models
// Description: Slice-based re-weighting of analysis objects by proximity to
//              failure-witnessing test checkpoints.
// Purpose: Top-level module wiring for the weight layer.
// Dependencies: none
// ============================================================================

//! ## Overview
//! See [`model`] for the six-level `DependencyModelKind` hierarchy and the
//! [`model::DependencyWeightModel`] wrapper that drives it over any
//! [`crate::trace::serial::TraceModel`].

pub mod model;

pub use model::DependencyModelKind;
pub use model::DependencyWeightModel;
