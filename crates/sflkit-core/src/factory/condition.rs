// sflkit-core/src/factory/condition.rs
// ============================================================================
// Module: Condition Factory
// Description: Emits negated and non-negated Condition predicate objects.
// Purpose: Cover both polarities of every evaluated boolean expression.
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

/// Builds both the negated and non-negated `Condition` object for every
/// distinct evaluated expression.
#[derive(Debug, Default)]
pub struct ConditionFactory {
    registry: ObjectRegistry,
}

impl ConditionFactory {
    /// Creates an empty condition factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the canonical `Condition` objects notified by `event`.
    #[must_use]
    pub fn get_analysis(&self, event: &Event) -> Vec<ObjectHandle> {
        let EventKind::Condition { expression, .. } = &event.kind else {
            return Vec::new();
        };
        let site = SourceSite::new(event.file.clone(), event.line);

        [false, true]
            .into_iter()
            .map(|negate| {
                let identity = Identity::Condition(site.clone(), expression.clone(), negate);
                self.registry
                    .get_or_create(identity.clone(), || AnalysisObject::Predicate(PredicateObject::new(identity)))
            })
            .collect()
    }

    /// Returns every canonical object built so far.
    #[must_use]
    pub fn all(&self) -> Vec<ObjectHandle> {
        self.registry.all()
    }
}
