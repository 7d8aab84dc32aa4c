// sflkit-core/src/event/mapping.rs
// ============================================================================
// Module: Event Mapping
// Description: Immutable event id to metadata mapping, with JSON persistence.
// Purpose: Recover static file/line/variable metadata for dynamic event payloads.
// Dependencies: serde, serde_json, md5
// ============================================================================

//! ## Overview
//! The event mapping is built during instrumentation and persisted once; the
//! in-memory event stream carries only event ids and dynamic payloads. Every
//! id that appears in a valid stream must be present in the mapping — a miss
//! is a [`CoreError::UnknownEventId`] that aborts the trace that hit it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::errors::CoreError;
use crate::errors::CoreResult;
use crate::event::model::EventId;
use crate::event::model::EventMeta;

// ============================================================================
// SECTION: Event Mapping
// ============================================================================

/// Immutable mapping from event id to static event-site metadata.
///
/// # Invariants
/// - Every id in a valid event stream is present in the map; a lookup miss
///   is reported as [`CoreError::UnknownEventId`] and aborts the trace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventMapping {
    entries: HashMap<EventId, EventMeta>,
}

impl EventMapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites metadata for an event id.
    pub fn insert(&mut self, id: EventId, meta: EventMeta) {
        self.entries.insert(id, meta);
    }

    /// Looks up metadata for an event id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownEventId`] when `id` is not present.
    pub fn lookup(&self, id: EventId) -> CoreResult<&EventMeta> {
        self.entries.get(&id).ok_or(CoreError::UnknownEventId(id))
    }

    /// Returns the number of mapped event ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the mapping has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the mapping as JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CorruptStream`] when serialization fails (this is
    /// not expected for well-formed mappings but is surfaced rather than
    /// panicking).
    pub fn to_json(&self) -> CoreResult<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|err| CoreError::CorruptStream(err.to_string()))
    }

    /// Deserializes a mapping from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CorruptStream`] when the bytes are not a valid
    /// mapping document.
    pub fn from_json(bytes: &[u8]) -> CoreResult<Self> {
        serde_json::from_slice(bytes).map_err(|err| CoreError::CorruptStream(err.to_string()))
    }

    /// Persists the mapping to `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Io`] on filesystem failure.
    pub fn persist(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = self.to_json()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Loads a mapping from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Instrumentation`] when the file does not exist,
    /// or [`CoreError::Io`]/[`CoreError::CorruptStream`] for other failures.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::Instrumentation(format!(
                "event mapping not found at {}",
                path.display()
            )));
        }
        let bytes = std::fs::read(path)?;
        Self::from_json(&bytes)
    }

    /// Computes the default persisted-mapping path for a target source root:
    /// `<home>/.sflkit/<md5(target)>.json`, matching the original tool's
    /// identifier exactly so an external instrumentation step writing to
    /// that path is found without reconfiguration.
    #[must_use]
    pub fn default_path(home: &Path, target: &Path) -> PathBuf {
        let absolute = target.to_string_lossy();
        let digest = md5::compute(absolute.as_bytes());
        home.join(".sflkit").join(format!("{digest:x}.json"))
    }
}
