// sflkit-core/src/object/predicate.rs
// ============================================================================
// Module: Predicate Analysis Objects
// Description: Tri-valued (TRUE/FALSE/UNOBSERVED) objects plus Liblit stats.
// Purpose: Implement the predicate half of the analysis object taxonomy.
// Dependencies: crate::object::{evaluation, identity, tally}, crate::event::model
// ============================================================================

//! ## Overview
//! Predicate objects evaluate a boolean expression against an event (and,
//! for the `Def`-driven families, a scope snapshot) and record whichever of
//! `True`/`False` it produced. On top of the shared [`Observation`] tallies,
//! predicates additionally track Liblit-style importance statistics used by
//! `IncreaseTrue`/`IncreaseFalse` scoring.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::event::model::Event;
use crate::event::model::EventKind;
use crate::event::model::EventKindTag;
use crate::event::model::RunId;
use crate::event::model::ThreadId;
use crate::event::model::TypeTag;
use crate::object::evaluation::Evaluation;
use crate::object::identity::ComparisonOp;
use crate::object::identity::Identity;
use crate::object::tally::Observation;
use crate::scope::ScopeView;

// ============================================================================
// SECTION: Importance Statistics
// ============================================================================

/// Liblit-style predicate importance statistics, derived at `finalize` time
/// from the runs the predicate was (or wasn't) observed on.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Importance {
    /// Failing runs where the predicate was observed `True`.
    pub true_relevant: u64,
    /// Failing runs where the predicate was observed `False`.
    pub false_relevant: u64,
    /// Passing runs where the predicate was observed `True`.
    pub true_irrelevant: u64,
    /// Passing runs where the predicate was observed `False`.
    pub false_irrelevant: u64,
    /// `True_relevant` restated as Liblit's `F(p)`.
    pub fail_true: u64,
    /// Failing runs observed `False` — Liblit's complement statistic.
    pub fail_false: u64,
    /// Fraction of failing runs the predicate was observed on at all.
    pub context: f64,
    /// Increase in failure likelihood given `True`, vs. given any observation.
    pub increase_true: f64,
    /// Increase in failure likelihood given `False`, vs. given any observation.
    pub increase_false: f64,
}

fn safe_div(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        let result = num / den;
        if result.is_finite() { result } else { 0.0 }
    }
}

impl Importance {
    fn compute(observation: &Observation, passed: &[RunId], failed: &[RunId]) -> Self {
        let mut stats = Self::default();
        for &run in failed {
            if observation.check_hits(run) {
                stats.true_relevant += 1;
            } else if observation.check_false(run) {
                stats.false_relevant += 1;
            }
        }
        for &run in passed {
            if observation.check_hits(run) {
                stats.true_irrelevant += 1;
            } else if observation.check_false(run) {
                stats.false_irrelevant += 1;
            }
        }
        stats.fail_true = stats.true_relevant;
        stats.fail_false = stats.false_relevant;

        let failed_total = failed.len() as f64;
        let passed_total = passed.len() as f64;
        let observed_failed = (stats.true_relevant + stats.false_relevant) as f64;
        stats.context = safe_div(observed_failed, failed_total);

        let p_fail_given_true = safe_div(
            stats.true_relevant as f64,
            (stats.true_relevant + stats.true_irrelevant) as f64,
        );
        let p_fail_given_observed = safe_div(failed_total, failed_total + passed_total);
        stats.increase_true = p_fail_given_true - p_fail_given_observed;

        let p_fail_given_false = safe_div(
            stats.false_relevant as f64,
            (stats.false_relevant + stats.false_irrelevant) as f64,
        );
        stats.increase_false = p_fail_given_false - p_fail_given_observed;

        stats
    }
}

// ============================================================================
// SECTION: Predicate Kind Dispatch
// ============================================================================

fn is_numeric(value: &Value) -> Option<f64> {
    value.as_f64()
}

fn is_none(value: &Value) -> bool {
    value.is_null()
}

fn zero_of_type(type_tag: TypeTag) -> f64 {
    match type_tag {
        TypeTag::Int | TypeTag::Float | TypeTag::Bool | TypeTag::Str | TypeTag::Bytes | TypeTag::None | TypeTag::Other => 0.0,
    }
}

fn string_of(value: &Value) -> Option<&str> {
    value.as_str()
}

// ============================================================================
// SECTION: Predicate Object
// ============================================================================

/// A predicate-family analysis object.
#[derive(Debug)]
pub struct PredicateObject {
    identity: Identity,
    observation: Observation,
    importance: Importance,
}

impl PredicateObject {
    /// Creates a new predicate object for `identity`.
    #[must_use]
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            observation: Observation::new(),
            importance: Importance::default(),
        }
    }

    /// Reconstructs a predicate object from persisted summary fields (see
    /// [`crate::object::analysis_object::PersistedObject`]), restoring
    /// finalized tallies, weight, and importance statistics without any raw
    /// hit history.
    #[must_use]
    pub fn from_parts(identity: Identity, tallies: crate::object::tally::Tallies, aggregated_weight: f64, importance: Importance) -> Self {
        Self {
            identity,
            observation: Observation::from_parts(tallies, aggregated_weight),
            importance,
        }
    }

    /// Returns the object's canonical identity.
    #[must_use]
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Returns the event kinds this predicate's `hit` inspects.
    #[must_use]
    pub const fn events_of_interest(&self) -> &'static [EventKindTag] {
        match &self.identity {
            Identity::Branch(_, _) => &[EventKindTag::Branch],
            Identity::Condition(_, _, _) => &[EventKindTag::Condition],
            Identity::ScalarPair(_, _, _, _, _)
            | Identity::VariablePredicate(_, _, _)
            | Identity::NonePredicate(_, _, _)
            | Identity::EmptyStringPredicate(_, _, _)
            | Identity::EmptyBytesPredicate(_, _, _)
            | Identity::IsAsciiPredicate(_, _)
            | Identity::ContainsDigitPredicate(_, _)
            | Identity::ContainsSpecialPredicate(_, _) => &[EventKindTag::Def],
            Identity::ReturnPredicate(_, _, _, _) => &[EventKindTag::FunctionExit],
            Identity::FunctionErrorPredicate(_, _) => {
                &[EventKindTag::FunctionExit, EventKindTag::FunctionError]
            }
            Identity::Line(_) | Identity::Function(_, _) | Identity::DefUse(_, _, _) | Identity::Loop(_, _, _) | Identity::Length(_, _, _) => &[],
        }
    }

    /// Evaluates this predicate against `event` (and, for `Def`-driven
    /// families, the current variable `scope`) and records the outcome.
    ///
    /// Returns `false` without recording anything if `event` does not carry
    /// the data this predicate needs (e.g. a branch object asked to look at
    /// a `Def` event), which should not happen when factories dispatch
    /// correctly but is handled defensively rather than panicking.
    pub fn hit(&mut self, run: RunId, thread: ThreadId, event: &Event, scope: Option<ScopeView<'_>>) -> bool {
        let Some(outcome) = self.evaluate(event, scope) else {
            return false;
        };
        self.observation.record(run, thread, outcome);
        true
    }

    #[allow(clippy::too_many_lines, reason = "one evaluation arm per predicate variant, not meaningfully splittable")]
    fn evaluate(&self, event: &Event, scope: Option<ScopeView<'_>>) -> Option<Evaluation> {
        match (&self.identity, &event.kind) {
            (Identity::Branch(_, then_id), EventKind::Branch { taken, .. }) => {
                Some(Evaluation::from(taken == then_id))
            }
            (Identity::Condition(_, expr, negate), EventKind::Condition { expression, value }) => {
                if expression != expr {
                    return None;
                }
                Some(Evaluation::from_bool_xor_negate(*value, *negate))
            }
            (Identity::ScalarPair(_, v1, v2, op, _group), EventKind::Def { var, .. }) => {
                if var != v1 && var != v2 {
                    return None;
                }
                let scope = scope?;
                let a = is_numeric(scope.value(v1)?)?;
                let b = is_numeric(scope.value(v2)?)?;
                Some(Evaluation::from(op.apply_f64(a, b)))
            }
            (Identity::VariablePredicate(_, target, op), EventKind::Def { var, value, .. }) => {
                if var != target {
                    return None;
                }
                let v = is_numeric(value)?;
                Some(Evaluation::from(op.apply_f64(v, 0.0)))
            }
            (Identity::NonePredicate(_, target, op), EventKind::Def { var, value, .. }) => {
                if var != target {
                    return None;
                }
                Some(Evaluation::from(op.apply_bool(is_none(value))))
            }
            (Identity::ReturnPredicate(_, func, op, type_tag), EventKind::FunctionExit { function, return_value, .. }) => {
                if function != func {
                    return None;
                }
                let v = is_numeric(return_value).unwrap_or(0.0);
                Some(Evaluation::from(op.apply_f64(v, zero_of_type(*type_tag))))
            }
            (Identity::EmptyStringPredicate(_, target, op), EventKind::Def { var, value, .. }) => {
                if var != target {
                    return None;
                }
                let is_empty = string_of(value).is_some_and(str::is_empty);
                Some(Evaluation::from(op.apply_bool(is_empty)))
            }
            (Identity::EmptyBytesPredicate(_, target, op), EventKind::Def { var, value, .. }) => {
                if var != target {
                    return None;
                }
                let is_empty = value.as_str().is_some_and(str::is_empty)
                    || value.as_array().is_some_and(Vec::is_empty);
                Some(Evaluation::from(op.apply_bool(is_empty)))
            }
            (Identity::IsAsciiPredicate(_, target), EventKind::Def { var, value, .. }) => {
                if var != target {
                    return None;
                }
                let ascii = string_of(value).is_some_and(|s| s.is_ascii());
                Some(Evaluation::from(ascii))
            }
            (Identity::ContainsDigitPredicate(_, target), EventKind::Def { var, value, .. }) => {
                if var != target {
                    return None;
                }
                let has_digit = string_of(value).is_some_and(|s| s.chars().any(|c| c.is_ascii_digit()));
                Some(Evaluation::from(has_digit))
            }
            (Identity::ContainsSpecialPredicate(_, target), EventKind::Def { var, value, .. }) => {
                if var != target {
                    return None;
                }
                let has_special =
                    string_of(value).is_some_and(|s| s.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace()));
                Some(Evaluation::from(has_special))
            }
            (Identity::FunctionErrorPredicate(_, target_id), EventKind::FunctionExit { function_id, .. }) => {
                if function_id != target_id {
                    return None;
                }
                Some(Evaluation::False)
            }
            (Identity::FunctionErrorPredicate(_, target_id), EventKind::FunctionError { function_id, .. }) => {
                if function_id != target_id {
                    return None;
                }
                Some(Evaluation::True)
            }
            _ => None,
        }
    }

    /// Returns whether any thread of `run` observed a `True` outcome.
    #[must_use]
    pub fn check_hits(&self, run: RunId) -> bool {
        self.observation.check_hits(run)
    }

    /// Finalizes pass/fail tallies, aggregated weight, and importance stats.
    pub fn finalize(&mut self, passed: &[RunId], failed: &[RunId]) {
        self.observation.finalize(passed, failed);
        self.importance = Importance::compute(&self.observation, passed, failed);
    }

    /// Read-only access to the finalized importance statistics.
    #[must_use]
    pub const fn importance(&self) -> Importance {
        self.importance
    }

    /// Read-only access to the embedded observation state.
    #[must_use]
    pub const fn observation(&self) -> &Observation {
        &self.observation
    }

    /// Mutable access, used by weight models to call `adjust_weight`.
    pub fn observation_mut(&mut self) -> &mut Observation {
        &mut self.observation
    }
}
