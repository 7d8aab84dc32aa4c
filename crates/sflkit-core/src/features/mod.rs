// sflkit-core/src/features/mod.rs
// ============================================================================
// Module: Feature Vector Builder
// Description: Alternate sink mapping notified objects to per-run ternary
//              feature values, instead of the spectrum/predicate metrics.
// Purpose: Map notified objects to per-run ternary feature rows.
// Dependencies: serde, crate::event, crate::factory, crate::object
// ============================================================================

//! ## Overview
//! [`FeatureVectorBuilder`] wraps a [`CombinationFactory`] the same way the
//! trace models do, but instead of computing suspiciousness metrics it maps
//! each notified object's last evaluation on a `(run, thread)` to a ternary
//! [`FeatureValue`] and folds it into that run's [`FeatureVector`] with
//! `or`-monotone join semantics: once a feature reads `True` for a run,
//! nothing later downgrades it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::HashMap;

use parking_lot::Mutex;
use serde::Serialize;

use crate::event::model::RunId;
use crate::event::model::ThreadId;
use crate::factory::CombinationFactory;
use crate::factory::ObjectHandle;
use crate::object::AnalysisObject;
use crate::object::Identity;
use crate::object::evaluation::Evaluation;

// ============================================================================
// SECTION: Feature Value
// ============================================================================

/// Ternary feature value a notified object contributes to one run's vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum FeatureValue {
    /// Never observed true on this run — the floor of the join order.
    Undefined,
    /// Observed false at least once, never observed true.
    False,
    /// Observed true at least once — sticky; nothing downgrades it.
    True,
}

impl FeatureValue {
    /// `or`-monotone join: `True > False > Undefined`, and the result never
    /// moves below whichever of `self`/`other` already ranks higher.
    #[must_use]
    pub fn join(self, other: Self) -> Self {
        self.max(other)
    }

    /// Maps a spectrum object's last evaluation to its binary feature value;
    /// `Unobserved` collapses into `False`.
    fn from_spectrum(outcome: Evaluation) -> Self {
        if outcome.is_true() { Self::True } else { Self::False }
    }

    /// Maps a predicate object's last evaluation to its tertiary feature value.
    fn from_predicate(outcome: Evaluation) -> Self {
        match outcome {
            Evaluation::True => Self::True,
            Evaluation::False => Self::False,
            Evaluation::Unobserved => Self::Undefined,
        }
    }
}

// ============================================================================
// SECTION: Feature Vector
// ============================================================================

/// One run's feature → value dictionary, plus the test result label.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureVector {
    /// Identifies which run this vector summarizes.
    pub run: RunId,
    /// Whether `run` was a failing execution.
    pub failing: bool,
    /// Feature name (the object's canonical identity, rendered for display)
    /// to its joined value across every thread that touched it this run.
    pub values: BTreeMap<String, FeatureValue>,
}

fn feature_name(identity: &Identity) -> String {
    format!("{identity:?}")
}

// ============================================================================
// SECTION: Feature Vector Builder
// ============================================================================

/// Wraps a [`CombinationFactory`], accumulating one [`FeatureVector`] per run.
pub struct FeatureVectorBuilder {
    factory: std::sync::Arc<CombinationFactory>,
    vectors: Mutex<HashMap<RunId, FeatureVector>>,
}

impl FeatureVectorBuilder {
    /// Creates a builder over `factory`, producing no vectors until
    /// `record` is called.
    #[must_use]
    pub fn new(factory: std::sync::Arc<CombinationFactory>) -> Self {
        Self {
            factory,
            vectors: Mutex::new(HashMap::new()),
        }
    }

    /// Folds the objects notified by one event into `run`'s feature vector.
    ///
    /// Callers drive this the same way [`crate::weight::DependencyWeightModel`]
    /// drives its own bookkeeping: once per dispatched event, passing
    /// whatever [`crate::trace::serial::TraceModel::last_notified`] returned.
    pub fn record(&self, run: RunId, failing: bool, thread: ThreadId, notified: &[ObjectHandle]) {
        if notified.is_empty() {
            return;
        }
        let mut vectors = self.vectors.lock();
        let vector = vectors.entry(run).or_insert_with(|| FeatureVector {
            run,
            failing,
            values: BTreeMap::new(),
        });
        for handle in notified {
            let guard = handle.lock();
            let name = feature_name(guard.identity());
            let outcome = guard.last_evaluation(run, thread);
            let value = match &*guard {
                AnalysisObject::Spectrum(_) => FeatureValue::from_spectrum(outcome),
                AnalysisObject::Predicate(_) => FeatureValue::from_predicate(outcome),
            };
            vector
                .values
                .entry(name)
                .and_modify(|existing| *existing = existing.join(value))
                .or_insert(value);
        }
    }

    /// Returns every feature vector accumulated so far, one per run,
    /// ordered by run id. Runs that never notified any object are absent
    /// rather than emitted as an all-`Undefined` row.
    #[must_use]
    pub fn vectors(&self) -> Vec<FeatureVector> {
        let mut out: Vec<FeatureVector> = self.vectors.lock().values().cloned().collect();
        out.sort_by_key(|v| v.run);
        out
    }

    /// Returns the wrapped factory, for callers that also want ranked
    /// suggestions from the same object registry.
    #[must_use]
    pub fn factory(&self) -> &CombinationFactory {
        &self.factory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::model::VarId;
    use crate::object::ComparisonOp;
    use crate::object::PredicateObject;
    use crate::object::SourceSite;
    use crate::object::SpectrumKind;
    use crate::object::SpectrumObject;

    #[test]
    fn join_never_downgrades_from_true() {
        assert_eq!(FeatureValue::True.join(FeatureValue::False), FeatureValue::True);
        assert_eq!(FeatureValue::True.join(FeatureValue::Undefined), FeatureValue::True);
        assert_eq!(FeatureValue::False.join(FeatureValue::Undefined), FeatureValue::False);
        assert_eq!(FeatureValue::Undefined.join(FeatureValue::Undefined), FeatureValue::Undefined);
    }

    #[test]
    fn spectrum_collapses_unobserved_to_false() {
        assert_eq!(FeatureValue::from_spectrum(Evaluation::Unobserved), FeatureValue::False);
        assert_eq!(FeatureValue::from_spectrum(Evaluation::True), FeatureValue::True);
    }

    #[test]
    fn predicate_keeps_unobserved_distinct() {
        assert_eq!(FeatureValue::from_predicate(Evaluation::Unobserved), FeatureValue::Undefined);
        assert_eq!(FeatureValue::from_predicate(Evaluation::False), FeatureValue::False);
    }

    #[test]
    fn record_folds_repeated_hits_on_one_run_with_sticky_true() {
        let factory = std::sync::Arc::new(CombinationFactory::default());
        let builder = FeatureVectorBuilder::new(factory);
        let run = RunId(0);
        let thread = ThreadId::default();

        let identity = Identity::Line(SourceSite::new("a.py", 3));
        let object = std::sync::Arc::new(parking_lot::Mutex::new(AnalysisObject::Spectrum(SpectrumObject::new(
            identity,
            SpectrumKind::Line,
        ))));
        object.lock().hit(
            run,
            thread,
            &crate::event::model::Event {
                file: "a.py".to_owned(),
                line: 3,
                event_id: crate::event::model::EventId(0),
                thread_id: None,
                kind: crate::event::model::EventKind::Line,
            },
            None,
        );
        builder.record(run, false, thread, &[object.clone()]);
        builder.record(run, false, thread, &[object]);

        let vectors = builder.vectors();
        assert_eq!(vectors.len(), 1);
        assert_eq!(vectors[0].values.len(), 1);
        assert_eq!(*vectors[0].values.values().next().expect("one feature"), FeatureValue::True);
    }

    #[test]
    fn predicate_identity_maps_to_tertiary_value() {
        let identity = Identity::VariablePredicate(SourceSite::new("a.py", 5), "x".to_owned(), ComparisonOp::Gt);
        let predicate = PredicateObject::new(identity);
        let _ = VarId(0);
        assert_eq!(FeatureValue::from_predicate(predicate.observation().last_evaluation(RunId(0), ThreadId::default())), FeatureValue::Undefined);
    }
}
