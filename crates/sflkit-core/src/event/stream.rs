// sflkit-core/src/event/stream.rs
// ============================================================================
// Module: Event Stream
// Description: Lazy, non-restartable event iteration and scoped file handles.
// Purpose: Decouple the analyzer from the out-of-scope binary event codec.
// Dependencies: crate::errors, crate::event::model
// ============================================================================

//! ## Overview
//! `sflkit-core` never parses the binary event log itself — that codec is an
//! external collaborator. Instead, anything that can yield a finite sequence
//! of already-decoded [`Event`](crate::event::model::Event) values implements
//! [`EventSource`]. [`EventFile`] is the handle the analyzer actually drives:
//! it pairs a source with per-trace identity (`run_id`, `failing`) and
//! guarantees the source is released on every exit path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::errors::CoreResult;
use crate::event::mapping::EventMapping;
use crate::event::model::Event;
use crate::event::model::RunId;

// ============================================================================
// SECTION: Event Source
// ============================================================================

/// A finite, non-restartable source of decoded events.
///
/// Implementations own whatever I/O or in-memory buffer backs the trace.
/// `sflkit-core` draws events strictly in order and never seeks backward.
pub trait EventSource: Send {
    /// Draws the next event, or `None` once the stream is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::CoreError::Io`] or
    /// [`crate::errors::CoreError::CorruptStream`] on decode failure. A
    /// failure here aborts only the trace that produced it.
    fn next_event(&mut self) -> CoreResult<Option<Event>>;
}

/// In-memory event source backed by a pre-built vector, used by tests and by
/// embedders that already have decoded events in hand.
pub struct VecEventSource {
    events: std::vec::IntoIter<Event>,
}

impl VecEventSource {
    /// Builds a source that replays `events` in order.
    #[must_use]
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into_iter(),
        }
    }
}

impl EventSource for VecEventSource {
    fn next_event(&mut self) -> CoreResult<Option<Event>> {
        Ok(self.events.next())
    }
}

// ============================================================================
// SECTION: Event File
// ============================================================================

/// Handle to one trace: a source plus its run identity.
pub struct EventFile {
    /// Unique small integer identifying this trace within an analysis run.
    pub run_id: RunId,
    /// Whether this trace is a failing run.
    pub failing: bool,
    /// Shared event mapping used to resolve static metadata.
    pub mapping: Arc<EventMapping>,
    source: Box<dyn EventSource>,
    closed: bool,
}

impl EventFile {
    /// Creates a new event file handle over `source`.
    pub fn new(run_id: RunId, failing: bool, mapping: Arc<EventMapping>, source: Box<dyn EventSource>) -> Self {
        Self {
            run_id,
            failing,
            mapping,
            source,
            closed: false,
        }
    }

    /// Draws the next event from the underlying source.
    ///
    /// Returns `Ok(None)` once the stream is exhausted and marks the handle
    /// closed; subsequent calls after exhaustion also return `Ok(None)`
    /// without touching the source again.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::errors::CoreError`] from the underlying source.
    pub fn next_event(&mut self) -> CoreResult<Option<Event>> {
        if self.closed {
            return Ok(None);
        }
        let next = self.source.next_event()?;
        if next.is_none() {
            self.closed = true;
        }
        Ok(next)
    }
}

impl Drop for EventFile {
    fn drop(&mut self) {
        self.closed = true;
    }
}
