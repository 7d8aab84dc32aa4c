// sflkit-core/src/lib.rs
// ============================================================================
// Module: SFLKit Core Library
// Description: Trace-analysis pipeline for a statistical fault-localization engine.
// Purpose: Consume labelled execution traces and emit ranked suspicious locations.
// Dependencies: dashmap, parking_lot, rayon, serde, serde_json, md5, thiserror
// ============================================================================

//! ## Overview
//! `sflkit-core` replays per-trace event streams against a stateful model
//! (scopes + canonical analysis objects), tallies observed/not-observed
//! outcomes across passing and failing runs, and scores the result with a
//! library of suspiciousness metrics. [`analyzer::Analyzer`] is the
//! top-level entry point: it owns the shared [`factory::CombinationFactory`]
//! and drains [`event::EventFile`]s serially or across a bounded worker
//! pool, then exposes ranked suggestions or per-run feature vectors.
//!
//! Source instrumentation, the event binary codec, the test-harness driver,
//! and CLI/config-file parsing are out of scope: this crate only consumes
//! already-decoded [`event::Event`] values through the [`event::EventSource`]
//! trait and an immutable [`event::EventMapping`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod analyzer;
pub mod errors;
pub mod event;
pub mod factory;
pub mod features;
pub mod metrics;
pub mod object;
pub mod rank;
pub mod scope;
pub mod trace;
pub mod weight;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use analyzer::Analyzer;
pub use analyzer::AnalyzerConfig;
pub use analyzer::AnalyzerObserver;
pub use errors::CoreError;
pub use errors::CoreResult;
