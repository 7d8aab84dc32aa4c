// sflkit-core/src/errors.rs
// ============================================================================
// Module: Core Error Taxonomy
// Description: Crate-wide error kinds for configuration, I/O, and stream decoding.
// Purpose: Provide a single Result error type propagated with `?` across the crate.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every fallible operation in `sflkit-core` returns `Result<_, CoreError>`.
//! Per-trace decode failures (`Io`, `CorruptStream`, `UnknownEventId`) abort
//! only the trace that produced them; `Config`, `Instrumentation`, and
//! `AssertionFailure` abort the calling operation entirely. Numeric metric
//! anomalies are never surfaced as errors — they are clamped at the single
//! `get_metric` callsite instead.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::event::model::EventId;

// ============================================================================
// SECTION: Error Enum
// ============================================================================

/// Crate-wide error type for `sflkit-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Missing required configuration, or an unknown enum value was supplied.
    #[error("configuration error: {0}")]
    Config(String),
    /// Event mapping was not available when a trace attempted to load it.
    #[error("missing event mapping: {0}")]
    Instrumentation(String),
    /// Event file could not be opened or read.
    #[error("event file io error: {0}")]
    Io(#[from] std::io::Error),
    /// Event stream contained a malformed payload.
    #[error("corrupt event stream: {0}")]
    CorruptStream(String),
    /// An event id was not present in the event mapping.
    #[error("event id {0:?} not present in mapping")]
    UnknownEventId(EventId),
    /// Deserialization of a persisted analysis object failed a schema assertion.
    #[error("analysis object deserialization assertion failed: {0}")]
    AssertionFailure(String),
}

/// Convenience alias for results returned by this crate.
pub type CoreResult<T> = Result<T, CoreError>;
