// sflkit-core/src/factory/function_error.rs
// ============================================================================
// Module: Function Error Factory
// Description: Builds FunctionErrorPredicate objects from normal/error exits.
// Purpose: True exactly when a function's exit came via an unhandled error.
// Dependencies: crate::factory::registry, crate::object
// ============================================================================

use crate::event::model::Event;
use crate::event::model::EventKind;
use crate::factory::registry::ObjectHandle;
use crate::factory::registry::ObjectRegistry;
use crate::object::AnalysisObject;
use crate::object::Identity;
use crate::object::PredicateObject;
use crate::object::SourceSite;

/// Builds a `FunctionErrorPredicate` object per function id, fed by both
/// its normal (`FunctionExit`) and erroring (`FunctionError`) exits.
#[derive(Debug, Default)]
pub struct FunctionErrorFactory {
    registry: ObjectRegistry,
}

impl FunctionErrorFactory {
    /// Creates an empty function-error factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the canonical `FunctionErrorPredicate` object notified by `event`.
    #[must_use]
    pub fn get_analysis(&self, event: &Event) -> Vec<ObjectHandle> {
        let function_id = match &event.kind {
            EventKind::FunctionExit { function_id, .. } | EventKind::FunctionError { function_id, .. } => *function_id,
            _ => return Vec::new(),
        };
        let identity = Identity::FunctionErrorPredicate(SourceSite::new(event.file.clone(), event.line), function_id);
        vec![self
            .registry
            .get_or_create(identity.clone(), || AnalysisObject::Predicate(PredicateObject::new(identity)))]
    }

    /// Returns every canonical object built so far.
    #[must_use]
    pub fn all(&self) -> Vec<ObjectHandle> {
        self.registry.all()
    }
}
