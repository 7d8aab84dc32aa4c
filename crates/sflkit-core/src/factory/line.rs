// sflkit-core/src/factory/line.rs
// ============================================================================
// Module: Line Factory
// Description: Emits one canonical Line object per executed source line.
// Purpose: Back the simplest spectrum family member.
// Dependencies: crate::factory::registry, crate::object
// ============================================================================

use crate::event::model::Event;
use crate::event::model::EventKind;
use crate::factory::registry::ObjectHandle;
use crate::factory::registry::ObjectRegistry;
use crate::object::AnalysisObject;
use crate::object::Identity;
use crate::object::SourceSite;
use crate::object::SpectrumKind;
use crate::object::SpectrumObject;

/// Builds a `Line` object for every distinct `(file, line)` executed.
#[derive(Debug, Default)]
pub struct LineFactory {
    registry: ObjectRegistry,
}

impl LineFactory {
    /// Creates an empty line factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the canonical `Line` objects notified by `event`, creating
    /// one on first observation of its `(file, line)`.
    #[must_use]
    pub fn get_analysis(&self, event: &Event) -> Vec<ObjectHandle> {
        if !matches!(event.kind, EventKind::Line) {
            return Vec::new();
        }
        let identity = Identity::Line(SourceSite::new(event.file.clone(), event.line));
        vec![self
            .registry
            .get_or_create(identity.clone(), || AnalysisObject::Spectrum(SpectrumObject::new(identity, SpectrumKind::Line)))]
    }

    /// Returns every canonical object built so far.
    #[must_use]
    pub fn all(&self) -> Vec<ObjectHandle> {
        self.registry.all()
    }
}
