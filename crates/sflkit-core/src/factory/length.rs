// sflkit-core/src/factory/length.rs
// ============================================================================
// Module: Length Factory
// Description: Classifies observed collection lengths into =0/=1/>1.
// Purpose: Build the three Length spectrum variants.
// Dependencies: crate::factory::registry, crate::object
// ============================================================================

use crate::event::model::Event;
use crate::event::model::EventKind;
use crate::factory::registry::ObjectHandle;
use crate::factory::registry::ObjectRegistry;
use crate::object::AnalysisObject;
use crate::object::CountClass;
use crate::object::Identity;
use crate::object::SourceSite;
use crate::object::SpectrumKind;
use crate::object::SpectrumObject;

const VARIANTS: [CountClass; 3] = [CountClass::Zero, CountClass::One, CountClass::Many];

/// Builds the three `Length` objects for every distinct `(file, line, var)`.
///
/// Unlike `Loop`, `Len` carries its count directly, so `hit` classifies it
/// through the generic event-shaped path rather than a side-channel call.
#[derive(Debug, Default)]
pub struct LengthFactory {
    registry: ObjectRegistry,
}

impl LengthFactory {
    /// Creates an empty length factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the canonical `Length` objects notified by `event`.
    #[must_use]
    pub fn get_analysis(&self, event: &Event) -> Vec<ObjectHandle> {
        let EventKind::Len { var, .. } = &event.kind else {
            return Vec::new();
        };
        let site = SourceSite::new(event.file.clone(), event.line);

        VARIANTS
            .iter()
            .map(|class| {
                let identity = Identity::Length(site.clone(), var.clone(), *class);
                self.registry.get_or_create(identity.clone(), || {
                    AnalysisObject::Spectrum(SpectrumObject::new(identity, SpectrumKind::Length(*class)))
                })
            })
            .collect()
    }

    /// Returns every canonical object built so far.
    #[must_use]
    pub fn all(&self) -> Vec<ObjectHandle> {
        self.registry.all()
    }
}
