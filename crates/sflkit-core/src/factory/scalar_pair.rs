// sflkit-core/src/factory/scalar_pair.rs
// ============================================================================
// Module: Scalar Pair Factory
// Description: Builds ScalarPair predicate objects comparing two in-scope
//              numeric variables whenever either is defined.
// Purpose: Cover relational comparisons between variable pairs.
// Dependencies: crate::factory::registry, crate::object, crate::scope
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
use crate::scope::ScopeView;

const OPS: [ComparisonOp; 6] = [
    ComparisonOp::Eq,
    ComparisonOp::Ne,
    ComparisonOp::Gt,
    ComparisonOp::Ge,
    ComparisonOp::Lt,
    ComparisonOp::Le,
];

/// Builds a `ScalarPair` object for every other in-scope numeric variable
/// paired with the one just defined, across every comparator, excluding
/// self-pairings (Open Question (b)).
#[derive(Debug, Default)]
pub struct ScalarPairFactory {
    registry: ObjectRegistry,
}

impl ScalarPairFactory {
    /// Creates an empty scalar-pair factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the canonical `ScalarPair` objects notified by `event`.
    #[must_use]
    pub fn get_analysis(&self, event: &Event, scope: Option<ScopeView<'_>>) -> Vec<ObjectHandle> {
        let EventKind::Def { var, value, .. } = &event.kind else {
            return Vec::new();
        };
        if value.as_f64().is_none() {
            return Vec::new();
        }
        let Some(scope) = scope else {
            return Vec::new();
        };
        let site = SourceSite::new(event.file.clone(), event.line);

        let mut handles = Vec::new();
        let mut group = 0u32;
        for other in scope.all_vars() {
            if &other.name == var || other.value.as_f64().is_none() {
                continue;
            }
            for op in OPS {
                let identity = Identity::ScalarPair(site.clone(), var.clone(), other.name.clone(), op, group);
                handles.push(
                    self.registry
                        .get_or_create(identity.clone(), || AnalysisObject::Predicate(PredicateObject::new(identity))),
                );
            }
            group += 1;
        }
        handles
    }

    /// Returns every canonical object built so far.
    #[must_use]
    pub fn all(&self) -> Vec<ObjectHandle> {
        self.registry.all()
    }
}
