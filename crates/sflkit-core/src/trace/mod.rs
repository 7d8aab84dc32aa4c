// sflkit-core/src/trace/mod.rs
// ============================================================================
// Module: Trace Models
// Description: Serial and parallel event-stream replay against the factories.
// Purpose: Top-level module wiring for the trace-model layer.
// Dependencies: none
// ============================================================================

//! ## Overview
//! [`serial::SerialTraceModel`] and [`parallel::ParallelTraceModel`] both
//! implement [`serial::TraceModel`] so the analyzer can drive either
//! uniformly; see each module for its scope-threading rules.

pub mod parallel;
pub mod serial;

pub use parallel::ParallelTraceModel;
pub use serial::SerialTraceModel;
pub use serial::TraceModel;
