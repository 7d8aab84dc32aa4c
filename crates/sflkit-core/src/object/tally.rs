// sflkit-core/src/object/tally.rs
// ============================================================================
// Module: Observation Tallies
// Description: Shared hit table, last-evaluation table, pass/fail tallies, and weight.
// Purpose: Common bookkeeping embedded by every spectrum and predicate object variant.
// Dependencies: parking_lot, crate::event::model, crate::object::evaluation
// ============================================================================

//! ## Overview
//! `Observation` is the per-object counter state shared by every analysis
//! object variant: a hit table, a last-evaluation table, pass/fail tallies,
//! and per-run/aggregated weight. It is embedded by every concrete
//! spectrum and predicate type so their `hit`/`finalize`/`get_metric` bodies
//! only have to add variant-specific classification on top.
//!
//! Concurrency: different workers touch disjoint `(run_id, thread_id)`
//! entries for the same object, so a single `parking_lot::Mutex` guarding
//! each table is adequate — contention only arises on insertion, which is
//! rare relative to hits within one run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::Deserialize;
use serde::Serialize;

use crate::event::model::RunId;
use crate::event::model::ThreadId;
use crate::object::evaluation::Evaluation;

// ============================================================================
// SECTION: Tallies
// ============================================================================

/// Pass/fail observation tallies computed by [`Observation::finalize`].
///
/// # Invariants
/// - `passed == passed_observed + passed_not_observed`.
/// - `failed == failed_observed + failed_not_observed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tallies {
    /// Total passing runs considered at finalize time.
    pub passed: u64,
    /// Total failing runs considered at finalize time.
    pub failed: u64,
    /// Passing runs where the object was observed true.
    pub passed_observed: u64,
    /// Passing runs where the object was not observed true.
    pub passed_not_observed: u64,
    /// Failing runs where the object was observed true.
    pub failed_observed: u64,
    /// Failing runs where the object was not observed true.
    pub failed_not_observed: u64,
}

// ============================================================================
// SECTION: Observation State
// ============================================================================

/// Shared counter state embedded by every analysis object variant.
#[derive(Debug)]
pub struct Observation {
    hits: Mutex<HashMap<(RunId, ThreadId), u64>>,
    last_evaluation: Mutex<HashMap<(RunId, ThreadId), Evaluation>>,
    weights: Mutex<HashMap<RunId, f64>>,
    /// Finalized pass/fail tallies; `Tallies::default()` until `finalize` runs.
    pub tallies: Tallies,
    /// Mean of recorded per-run weights, or `1.0` (a neutral multiplier) if
    /// none were ever recorded. `0.0` until `finalize` runs.
    pub aggregated_weight: f64,
}

impl Observation {
    /// Reconstructs an already-finalized observation from persisted summary
    /// fields, with empty hit/last-evaluation tables — the persisted JSON
    /// format carries only the finalized tallies and weight, never the raw
    /// per-`(run, thread)` hit history.
    #[must_use]
    pub fn from_parts(tallies: Tallies, aggregated_weight: f64) -> Self {
        Self {
            tallies,
            aggregated_weight,
            ..Self::new()
        }
    }

    /// Creates an empty observation state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hits: Mutex::new(HashMap::new()),
            last_evaluation: Mutex::new(HashMap::new()),
            weights: Mutex::new(HashMap::new()),
            tallies: Tallies::default(),
            aggregated_weight: 0.0,
        }
    }

    /// Records one evaluation for `(run, thread)`, incrementing the hit
    /// counter and overwriting the last-evaluation outcome.
    ///
    /// `hits[run][thread] > 0 ⇔ last_evaluation[run][thread] ≠ Unobserved`
    /// holds by construction: both tables are only ever written together.
    pub fn record(&self, run: RunId, thread: ThreadId, outcome: Evaluation) {
        *self.hits.lock().entry((run, thread)).or_insert(0) += 1;
        self.last_evaluation.lock().insert((run, thread), outcome);
    }

    /// Returns whether any thread of `run` observed a `True` outcome — the
    /// "target sense" used by tally finalization.
    #[must_use]
    pub fn check_hits(&self, run: RunId) -> bool {
        self.last_evaluation
            .lock()
            .iter()
            .any(|((r, _thread), eval)| *r == run && eval.is_true())
    }

    /// Returns the total hit count recorded for `(run, thread)`.
    #[must_use]
    pub fn hit_count(&self, run: RunId, thread: ThreadId) -> u64 {
        self.hits.lock().get(&(run, thread)).copied().unwrap_or(0)
    }

    /// Returns the last recorded evaluation for `(run, thread)`.
    #[must_use]
    pub fn last_evaluation(&self, run: RunId, thread: ThreadId) -> Evaluation {
        self.last_evaluation.lock().get(&(run, thread)).copied().unwrap_or(Evaluation::Unobserved)
    }

    /// Returns every `(run, thread)` pair with at least one recorded hit.
    #[must_use]
    pub fn observed_keys(&self) -> Vec<(RunId, ThreadId)> {
        self.hits.lock().keys().copied().collect()
    }

    /// Returns whether `run` was observed at all (any thread, either outcome).
    #[must_use]
    pub fn any_observed(&self, run: RunId) -> bool {
        self.last_evaluation.lock().keys().any(|(r, _)| *r == run)
    }

    /// Returns whether any thread of `run` last-evaluated to `False`.
    #[must_use]
    pub fn check_false(&self, run: RunId) -> bool {
        self.last_evaluation
            .lock()
            .iter()
            .any(|((r, _thread), eval)| *r == run && matches!(eval, Evaluation::False))
    }

    /// Records (via max) a per-run weight contributed by a dependency model.
    ///
    /// Dependency models call this with `adjust_weight(event_file, w) =
    /// max(previous, w)`; the max is taken here so repeated calls from the
    /// same trace never lower an already-recorded weight.
    pub fn adjust_weight(&self, run: RunId, weight: f64) {
        let clamped = weight.clamp(0.0, 1.0);
        let mut weights = self.weights.lock();
        let entry = weights.entry(run).or_insert(0.0);
        if clamped > *entry {
            *entry = clamped;
        }
    }

    /// Finalizes pass/fail tallies and the aggregated weight for this object.
    pub fn finalize(&mut self, passed: &[RunId], failed: &[RunId]) {
        let mut tallies = Tallies {
            passed: u64::try_from(passed.len()).unwrap_or(u64::MAX),
            failed: u64::try_from(failed.len()).unwrap_or(u64::MAX),
            ..Tallies::default()
        };
        for run in passed {
            if self.check_hits(*run) {
                tallies.passed_observed += 1;
            } else {
                tallies.passed_not_observed += 1;
            }
        }
        for run in failed {
            if self.check_hits(*run) {
                tallies.failed_observed += 1;
            } else {
                tallies.failed_not_observed += 1;
            }
        }
        self.tallies = tallies;

        // No dependency model ever touched this object: treat the weight
        // multiplier as neutral (1.0) rather than zeroing every score out.
        // See DESIGN.md's Open Question on weight defaults.
        let weights = self.weights.lock();
        self.aggregated_weight = if weights.is_empty() {
            1.0
        } else {
            weights.values().sum::<f64>() / weights.len() as f64
        };
    }
}

impl Default for Observation {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Observation {
    fn clone(&self) -> Self {
        Self {
            hits: Mutex::new(self.hits.lock().clone()),
            last_evaluation: Mutex::new(self.last_evaluation.lock().clone()),
            weights: Mutex::new(self.weights.lock().clone()),
            tallies: self.tallies,
            aggregated_weight: self.aggregated_weight,
        }
    }
}
