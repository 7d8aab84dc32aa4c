// sflkit-core/src/factory/return_.rs
// ============================================================================
// Module: Return Factory
// Description: Builds ReturnPredicate objects from FunctionExit events.
// Purpose: Cover op(return, zero-of-type) across the returned value's type.
// Dependencies: crate::factory::registry, crate::object
// ============================================================================

//! ## Overview
//! Open Question (a): dispatch on the returned value's type tag is
//! canonical `if/else if/else` form — exactly one branch fires per exit, so
//! a `Some("x")`-typed return never also emits a spurious `NonePredicate`.

use crate::event::model::Event;
use crate::event::model::EventKind;
use crate::event::model::TypeTag;
use crate::factory::registry::ObjectHandle;
use crate::factory::registry::ObjectRegistry;
use crate::object::AnalysisObject;
use crate::object::ComparisonOp;
use crate::object::Identity;
use crate::object::PredicateObject;
use crate::object::SourceSite;

const NUMERIC_COMPARATORS: [ComparisonOp; 6] = [
    ComparisonOp::Eq,
    ComparisonOp::Ne,
    ComparisonOp::Gt,
    ComparisonOp::Ge,
    ComparisonOp::Lt,
    ComparisonOp::Le,
];
const EXISTENCE_OPS: [ComparisonOp; 2] = [ComparisonOp::Eq, ComparisonOp::Ne];

/// Builds `ReturnPredicate` objects for every distinct `(function, op, type)`.
#[derive(Debug, Default)]
pub struct ReturnFactory {
    registry: ObjectRegistry,
}

impl ReturnFactory {
    /// Creates an empty return factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the canonical `ReturnPredicate` objects notified by `event`.
    #[must_use]
    pub fn get_analysis(&self, event: &Event) -> Vec<ObjectHandle> {
        let EventKind::FunctionExit { function, type_tag, .. } = &event.kind else {
            return Vec::new();
        };
        let site = SourceSite::new(event.file.clone(), event.line);

        let ops: &[ComparisonOp] = if matches!(type_tag, TypeTag::Int | TypeTag::Float | TypeTag::Bool) {
            &NUMERIC_COMPARATORS
        } else {
            &EXISTENCE_OPS
        };

        ops.iter()
            .map(|op| {
                let identity = Identity::ReturnPredicate(site.clone(), function.clone(), *op, *type_tag);
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
