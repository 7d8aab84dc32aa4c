// sflkit-core/src/factory/branch.rs
// ============================================================================
// Module: Branch Factory
// Description: Emits one or two Branch predicate objects per branch decision.
// Purpose: Cover the taken side and, optionally, its unseen sibling.
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

/// Builds `Branch` objects for the taken side of every branch decision, and
/// optionally for its unseen sibling so both sides accumulate tallies even
/// when one side is never taken in a given trace.
#[derive(Debug)]
pub struct BranchFactory {
    registry: ObjectRegistry,
    build_unseen_sibling: bool,
}

impl BranchFactory {
    /// Creates a branch factory. `build_unseen_sibling` mirrors
    /// `AnalyzerConfig::build_unseen_branch_sibling`.
    #[must_use]
    pub fn new(build_unseen_sibling: bool) -> Self {
        Self {
            registry: ObjectRegistry::new(),
            build_unseen_sibling,
        }
    }

    /// Resolves the canonical `Branch` object(s) notified by `event`.
    #[must_use]
    pub fn get_analysis(&self, event: &Event) -> Vec<ObjectHandle> {
        let EventKind::Branch { then_id, else_id, .. } = &event.kind else {
            return Vec::new();
        };
        let site = SourceSite::new(event.file.clone(), event.line);

        let then_identity = Identity::Branch(site.clone(), *then_id);
        let mut handles = vec![self
            .registry
            .get_or_create(then_identity.clone(), || AnalysisObject::Predicate(PredicateObject::new(then_identity)))];

        if self.build_unseen_sibling {
            let else_identity = Identity::Branch(site, *else_id);
            handles.push(
                self.registry
                    .get_or_create(else_identity.clone(), || AnalysisObject::Predicate(PredicateObject::new(else_identity))),
            );
        }
        handles
    }

    /// Returns every canonical object built so far.
    #[must_use]
    pub fn all(&self) -> Vec<ObjectHandle> {
        self.registry.all()
    }
}
