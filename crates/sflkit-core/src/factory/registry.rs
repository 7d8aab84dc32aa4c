// sflkit-core/src/factory/registry.rs
// ============================================================================
// Module: Object Registry
// Description: Concurrent identity-key → canonical analysis object map.
// Purpose: Back every factory's "get or create" semantics under concurrent
//          trace ingestion.
// Dependencies: dashmap, parking_lot, crate::object
// ============================================================================

//! ## Overview
//! Every factory owns one `ObjectRegistry`. Creation is rare relative to
//! hits (most events resolve to an already-canonicalized object), so a
//! sharded concurrent map is the right shape: lookups and hits almost never
//! contend, and only the first observer of a new identity pays for
//! insertion.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::object::AnalysisObject;
use crate::object::Identity;

// ============================================================================
// SECTION: Object Registry
// ============================================================================

/// A canonical handle to one analysis object, shared across every worker
/// that observes it.
pub type ObjectHandle = Arc<Mutex<AnalysisObject>>;

/// Concurrent identity-key → canonical object map owned by one factory.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    objects: DashMap<Identity, ObjectHandle>,
}

impl ObjectRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the canonical handle for `identity`, constructing it via
    /// `build` on first observation.
    pub fn get_or_create(&self, identity: Identity, build: impl FnOnce() -> AnalysisObject) -> ObjectHandle {
        self.objects
            .entry(identity)
            .or_insert_with(|| Arc::new(Mutex::new(build())))
            .clone()
    }

    /// Returns every canonical handle currently registered.
    #[must_use]
    pub fn all(&self) -> Vec<ObjectHandle> {
        self.objects.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Number of canonical objects registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the registry has no canonical objects yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Identity;
    use crate::object::SourceSite;
    use crate::object::SpectrumKind;
    use crate::object::SpectrumObject;

    fn line_identity(line: u32) -> Identity {
        Identity::Line(SourceSite::new("a.py", line))
    }

    #[test]
    fn repeated_identity_returns_the_same_handle() {
        let registry = ObjectRegistry::new();
        let identity = line_identity(10);
        let first = registry.get_or_create(identity.clone(), || {
            AnalysisObject::Spectrum(SpectrumObject::new(identity.clone(), SpectrumKind::Line))
        });
        let second = registry.get_or_create(identity.clone(), || {
            AnalysisObject::Spectrum(SpectrumObject::new(identity.clone(), SpectrumKind::Line))
        });

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_identities_create_distinct_handles() {
        let registry = ObjectRegistry::new();
        let a = line_identity(10);
        let b = line_identity(11);
        registry.get_or_create(a.clone(), || AnalysisObject::Spectrum(SpectrumObject::new(a.clone(), SpectrumKind::Line)));
        registry.get_or_create(b.clone(), || AnalysisObject::Spectrum(SpectrumObject::new(b.clone(), SpectrumKind::Line)));

        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
    }
}
