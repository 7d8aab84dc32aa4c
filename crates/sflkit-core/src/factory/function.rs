// sflkit-core/src/factory/function.rs
// ============================================================================
// Module: Function Factory
// Description: Emits one canonical Function object per entered function.
// Purpose: Back the Function spectrum family member.
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

/// Builds a `Function` object for every distinct function entered.
#[derive(Debug, Default)]
pub struct FunctionFactory {
    registry: ObjectRegistry,
}

impl FunctionFactory {
    /// Creates an empty function factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the canonical `Function` object notified by `event`.
    #[must_use]
    pub fn get_analysis(&self, event: &Event) -> Vec<ObjectHandle> {
        let EventKind::FunctionEnter { function_id, .. } = &event.kind else {
            return Vec::new();
        };
        let identity = Identity::Function(SourceSite::new(event.file.clone(), event.line), *function_id);
        vec![self
            .registry
            .get_or_create(identity.clone(), || AnalysisObject::Spectrum(SpectrumObject::new(identity, SpectrumKind::Function)))]
    }

    /// Returns every canonical object built so far.
    #[must_use]
    pub fn all(&self) -> Vec<ObjectHandle> {
        self.registry.all()
    }
}
