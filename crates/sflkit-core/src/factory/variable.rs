// sflkit-core/src/factory/variable.rs
// ============================================================================
// Module: Variable & None Predicate Factories
// Description: Builds VariablePredicate (op(var, 0)) and NonePredicate
//              (var op None) objects from Def events.
// Purpose: Cover zero-comparison and nullness predicates.
// Dependencies: crate::factory::registry, crate::object
// ============================================================================

use crate::event::model::Event;
use crate::event::model::EventKind;
use crate::factory::registry::ObjectHandle;
use crate::factory::registry::ObjectRegistry;
use crate::object::AnalysisObject;
use crate::object::ComparisonOp;
use crate::object::Identity;
use crate::object::PredicateObject;
use crate::object::SourceSite;

const COMPARATORS: [ComparisonOp; 6] = [
    ComparisonOp::Eq,
    ComparisonOp::Ne,
    ComparisonOp::Gt,
    ComparisonOp::Ge,
    ComparisonOp::Lt,
    ComparisonOp::Le,
];
const EXISTENCE_OPS: [ComparisonOp; 2] = [ComparisonOp::Eq, ComparisonOp::Ne];

/// Builds `VariablePredicate` objects (`op(value(var), 0)`) for every
/// comparator, on each `Def` of a numeric variable.
#[derive(Debug, Default)]
pub struct VariablePredicateFactory {
    registry: ObjectRegistry,
}

impl VariablePredicateFactory {
    /// Creates an empty variable-predicate factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the canonical `VariablePredicate` objects notified by `event`.
    #[must_use]
    pub fn get_analysis(&self, event: &Event) -> Vec<ObjectHandle> {
        let EventKind::Def { var, value, .. } = &event.kind else {
            return Vec::new();
        };
        if value.as_f64().is_none() {
            return Vec::new();
        }
        let site = SourceSite::new(event.file.clone(), event.line);
        COMPARATORS
            .iter()
            .map(|op| {
                let identity = Identity::VariablePredicate(site.clone(), var.clone(), *op);
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

/// Builds `NonePredicate` objects (`value(var) op None`) on each `Def`.
#[derive(Debug, Default)]
pub struct NonePredicateFactory {
    registry: ObjectRegistry,
}

impl NonePredicateFactory {
    /// Creates an empty none-predicate factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the canonical `NonePredicate` objects notified by `event`.
    #[must_use]
    pub fn get_analysis(&self, event: &Event) -> Vec<ObjectHandle> {
        let EventKind::Def { var, .. } = &event.kind else {
            return Vec::new();
        };
        let site = SourceSite::new(event.file.clone(), event.line);
        EXISTENCE_OPS
            .iter()
            .map(|op| {
                let identity = Identity::NonePredicate(site.clone(), var.clone(), *op);
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
