// sflkit-core/src/analyzer/observer.rs
// ============================================================================
// Module: Analyzer Observer
// Description: Optional progress hook an embedder may supply to an analysis run.
// Purpose: Expose progress signals without this crate depending on a logging framework.
// Dependencies: crate::errors, crate::event::model
// ============================================================================

//! ## Overview
//! `sflkit-core` carries no logging dependency of its own (see `DESIGN.md`);
//! an embedder that wants visibility into a long-running [`crate::analyzer::Analyzer::analyze`]
//! call supplies an [`AnalyzerObserver`] instead. Every method defaults to a
//! no-op so callers only implement the hooks they care about.

use crate::errors::CoreResult;
use crate::event::model::RunId;

/// Progress hook for one [`crate::analyzer::Analyzer::analyze`] call.
///
/// Methods take `&self` rather than `&mut self` because traces drain
/// concurrently across the worker pool; implementers needing mutable state
/// should use interior mutability (an atomic counter, a channel sender).
pub trait AnalyzerObserver: Send + Sync {
    /// Called just before a trace starts draining.
    fn on_trace_started(&self, _run: RunId, _failing: bool) {}

    /// Called once a trace has drained (or aborted), with its outcome.
    fn on_trace_finished(&self, _run: RunId, _failing: bool, _outcome: &CoreResult<()>) {}

    /// Called once every drained trace has been finalized against pass/fail
    /// tallies, with the total number of canonical objects produced.
    fn on_finalized(&self, _object_count: usize) {}
}
