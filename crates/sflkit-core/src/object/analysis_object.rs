// sflkit-core/src/object/analysis_object.rs
// ============================================================================
// Module: Analysis Object
// Description: Top-level tagged union over every spectrum/predicate variant.
// Purpose: Single serializable, identity-comparable unit stored in registries.
// Dependencies: crate::object::{spectrum, predicate, identity, suggestion}
// ============================================================================

//! ## Overview
//! `AnalysisObject` is the unit every factory registry stores and every
//! trace model notifies. Internally it dispatches to whichever of
//! [`SpectrumObject`]/[`PredicateObject`] backs the variant; externally it
//! presents one persisted-JSON shape matching the field list every object
//! kind shares plus its own variant-specific fields.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::event::model::BranchTargetId;
use crate::event::model::Event;
use crate::event::model::EventKindTag;
use crate::event::model::FunctionId;
use crate::event::model::LoopId;
use crate::event::model::RunId;
use crate::event::model::ThreadId;
use crate::event::model::TypeTag;
use crate::metrics::MetricCounts;
use crate::metrics::MetricName;
use crate::object::identity::ComparisonOp;
use crate::object::identity::CountClass;
use crate::object::identity::Identity;
use crate::object::identity::SourceSite;
use crate::object::predicate::Importance;
use crate::object::predicate::PredicateObject;
use crate::object::spectrum::SpectrumKind;
use crate::object::spectrum::SpectrumObject;
use crate::object::suggestion::BranchSide;
use crate::object::suggestion::SourceLine;
use crate::object::suggestion::Suggestion;
use crate::object::tally::Tallies;
use crate::scope::ScopeView;

// ============================================================================
// SECTION: Analysis Object
// ============================================================================

/// A canonical analysis object: either a spectrum or a predicate variant.
#[derive(Debug)]
pub enum AnalysisObject {
    /// A pure hit/no-hit object.
    Spectrum(SpectrumObject),
    /// A tri-valued object with Liblit importance statistics.
    Predicate(PredicateObject),
}

impl AnalysisObject {
    /// Returns the object's canonical identity.
    #[must_use]
    pub const fn identity(&self) -> &Identity {
        match self {
            Self::Spectrum(s) => s.identity(),
            Self::Predicate(p) => p.identity(),
        }
    }

    /// Returns the static event kinds this object's `hit` inspects.
    #[must_use]
    pub const fn events_of_interest(&self) -> &'static [EventKindTag] {
        match self {
            Self::Spectrum(s) => s.events_of_interest(),
            Self::Predicate(p) => p.events_of_interest(),
        }
    }

    /// Records an observation for `event` on `(run, thread)`.
    ///
    /// Returns `false` if `event` did not carry data relevant to this
    /// object; callers only invoke this for events a factory has already
    /// matched, so this should only return `false` defensively.
    pub fn hit(&mut self, run: RunId, thread: ThreadId, event: &Event, scope: Option<ScopeView<'_>>) -> bool {
        match self {
            Self::Spectrum(s) => {
                let interested = s.events_of_interest().contains(&event.kind.discriminant());
                if interested {
                    s.hit(run, thread, event);
                }
                interested
            }
            Self::Predicate(p) => p.hit(run, thread, event, scope),
        }
    }

    /// Records a count-classified hit (`Loop`/`Length`), bypassing the
    /// generic event-shaped path since `LoopEnd` carries no count itself.
    pub fn hit_count(&mut self, run: RunId, thread: ThreadId, count: u64) {
        if let Self::Spectrum(s) = self {
            if let Identity::Loop(_, _, class) | Identity::Length(_, _, class) = s.identity() {
                s.hit_count(run, thread, count, *class);
            }
        }
    }

    /// Returns whether any thread of `run` observed a `True` outcome.
    #[must_use]
    pub fn check_hits(&self, run: RunId) -> bool {
        match self {
            Self::Spectrum(s) => s.check_hits(run),
            Self::Predicate(p) => p.check_hits(run),
        }
    }

    /// Finalizes pass/fail tallies, aggregated weight, and (for predicates)
    /// importance statistics.
    pub fn finalize(&mut self, passed: &[RunId], failed: &[RunId]) {
        match self {
            Self::Spectrum(s) => s.finalize(passed, failed),
            Self::Predicate(p) => p.finalize(passed, failed),
        }
    }

    /// Records (via max) a per-run weight contributed by a dependency
    /// model, delegating to the embedded [`crate::object::tally::Observation`].
    pub fn adjust_weight(&mut self, run: RunId, weight: f64) {
        match self {
            Self::Spectrum(s) => s.observation_mut().adjust_weight(run, weight),
            Self::Predicate(p) => p.observation_mut().adjust_weight(run, weight),
        }
    }

    /// Returns the last recorded outcome for `(run, thread)`, used by
    /// [`crate::features`] to derive per-run feature values.
    #[must_use]
    pub fn last_evaluation(&self, run: RunId, thread: ThreadId) -> crate::object::evaluation::Evaluation {
        match self {
            Self::Spectrum(s) => s.observation().last_evaluation(run, thread),
            Self::Predicate(p) => p.observation().last_evaluation(run, thread),
        }
    }

    fn tallies(&self) -> Tallies {
        match self {
            Self::Spectrum(s) => s.observation().tallies,
            Self::Predicate(p) => p.observation().tallies,
        }
    }

    fn aggregated_weight(&self) -> f64 {
        match self {
            Self::Spectrum(s) => s.observation().aggregated_weight,
            Self::Predicate(p) => p.observation().aggregated_weight,
        }
    }

    fn default_metric(&self) -> MetricName {
        match self {
            Self::Spectrum(_) => MetricName::default_spectrum(),
            Self::Predicate(_) => MetricName::default_predicate(),
        }
    }

    /// Computes the requested metric (defaulting to Ochiai for spectra and
    /// `IncreaseTrue` for predicates), optionally scaled by aggregated
    /// weight. NaN and division-by-zero results are coerced to `0.0`.
    #[must_use]
    pub fn get_metric(&self, metric: Option<&MetricName>, use_weight: bool) -> f64 {
        let metric = metric.cloned().unwrap_or_else(|| self.default_metric());
        let tallies = self.tallies();
        let counts = MetricCounts {
            ef: tallies.failed_observed,
            ep: tallies.passed_observed,
            nf: tallies.failed_not_observed,
            np: tallies.passed_not_observed,
        };

        let raw = if let Self::Predicate(p) = self {
            match metric.as_str() {
                "increase_true" => p.importance().increase_true,
                "increase_false" => p.importance().increase_false,
                "context" => p.importance().context,
                name => crate::metrics::lookup(name).map_or(0.0, |f| f(counts)),
            }
        } else {
            crate::metrics::lookup(metric.as_str()).map_or(0.0, |f| f(counts))
        };

        let raw = if raw.is_finite() { raw } else { 0.0 };
        if use_weight { raw * self.aggregated_weight() } else { raw }
    }

    /// Produces a suggestion for this object, resolving its source lines
    /// through `locator`. `Function`/`Loop`/`FunctionError` objects expand
    /// to their enclosing block; `Branch` objects score the sibling side
    /// when `metric` is `increase_false`.
    #[must_use]
    pub fn get_suggestion(&self, metric: Option<&MetricName>, locator: &dyn crate::object::suggestion::SourceLocator) -> Suggestion {
        let score = self.get_metric(metric, true);
        let identity = self.identity();
        let file = identity.file().to_owned();
        let line = identity.line();

        let locations = match identity {
            Identity::Function(_, _) | Identity::FunctionErrorPredicate(_, _) => locator
                .block_lines(&file, line)
                .into_iter()
                .map(|l| SourceLine::new(file.clone(), l))
                .collect(),
            Identity::Loop(_, _, _) => locator
                .block_lines(&file, line)
                .into_iter()
                .map(|l| SourceLine::new(file.clone(), l))
                .collect(),
            Identity::Branch(_, _) => {
                let metric_name = metric.cloned().unwrap_or_else(|| self.default_metric());
                let side = if metric_name.as_str() == "increase_false" {
                    BranchSide::Other
                } else {
                    BranchSide::Own
                };
                locator
                    .branch_lines(&file, line, side)
                    .into_iter()
                    .map(|l| SourceLine::new(file.clone(), l))
                    .collect()
            }
            _ => vec![SourceLine::new(file, line)],
        };

        Suggestion { locations, score }
    }
}

// ============================================================================
// SECTION: Persisted JSON
// ============================================================================

/// Flat, serde-friendly mirror of every field the persisted analysis JSON
/// may carry, tagged by `type`. Round-tripping goes through this shape
/// rather than `#[serde(flatten)]` on the behavior-bearing enum so the
/// `AnalysisObject` internals (locks, cached importance) never leak into
/// the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedObject {
    /// Discriminant naming the analysis object kind.
    #[serde(rename = "type")]
    pub kind: String,
    /// Source file.
    pub file: String,
    /// Source line.
    pub line: u32,
    /// Total passing runs considered.
    pub passed: u64,
    /// Passing runs where the object was observed true.
    pub passed_observed: u64,
    /// Passing runs where the object was not observed true.
    pub passed_not_observed: u64,
    /// Total failing runs considered.
    pub failed: u64,
    /// Failing runs where the object was observed true.
    pub failed_observed: u64,
    /// Failing runs where the object was not observed true.
    pub failed_not_observed: u64,
    /// Aggregated weight, when any dependency model contributed one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Branch then-target id, for `Branch` objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub then_id: Option<u64>,
    /// Whether this `Branch` object represents the then-side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub then: Option<bool>,
    /// Variable name, for single-variable objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub var: Option<String>,
    /// First variable name, for `ScalarPair`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub var1: Option<String>,
    /// Second variable name, for `ScalarPair`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub var2: Option<String>,
    /// Comparator, for comparator-shaped predicates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<String>,
    /// Source text of the evaluated expression, for `Condition`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Negation flag, for `Condition`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negate: Option<bool>,
    /// Function name, for function-scoped objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    /// Literal comparison value, for zero/empty predicates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Whether `value` is a byte-literal rather than a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<bool>,
    /// Use-site file, for `DefUse`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_file: Option<String>,
    /// Use-site line, for `DefUse`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_line: Option<u32>,
    /// Loop/length classification this object targets (`"zero"`/`"one"`/`"many"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluate_hit: Option<String>,
    /// Alias of `evaluate_hit` used by the length family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluate_length: Option<String>,
    /// Liblit true-relevant count, for predicates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub true_relevant: Option<u64>,
    /// Liblit false-relevant count, for predicates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub false_relevant: Option<u64>,
    /// Liblit true-irrelevant count, for predicates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub true_irrelevant: Option<u64>,
    /// Liblit false-irrelevant count, for predicates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub false_irrelevant: Option<u64>,
    /// Liblit `fail_true`, for predicates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_true: Option<u64>,
    /// Liblit `fail_false`, for predicates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_false: Option<u64>,
    /// Liblit context statistic, for predicates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<f64>,
    /// Liblit `IncreaseTrue`, for predicates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub increase_true: Option<f64>,
    /// Liblit `IncreaseFalse`, for predicates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub increase_false: Option<f64>,
}

fn class_tag(class: CountClass) -> &'static str {
    match class {
        CountClass::Zero => "zero",
        CountClass::One => "one",
        CountClass::Many => "many",
    }
}

impl From<&AnalysisObject> for PersistedObject {
    fn from(object: &AnalysisObject) -> Self {
        let identity = object.identity();
        let tallies = object.tallies();
        let weight = object.aggregated_weight();
        let mut out = Self {
            kind: identity.type_tag().to_owned(),
            file: identity.file().to_owned(),
            line: identity.line(),
            passed: tallies.passed,
            passed_observed: tallies.passed_observed,
            passed_not_observed: tallies.passed_not_observed,
            failed: tallies.failed,
            failed_observed: tallies.failed_observed,
            failed_not_observed: tallies.failed_not_observed,
            weight: Some(weight),
            then_id: None,
            then: None,
            var: None,
            var1: None,
            var2: None,
            op: None,
            condition: None,
            negate: None,
            function: None,
            value: None,
            bytes: None,
            use_file: None,
            use_line: None,
            evaluate_hit: None,
            evaluate_length: None,
            true_relevant: None,
            false_relevant: None,
            true_irrelevant: None,
            false_irrelevant: None,
            fail_true: None,
            fail_false: None,
            context: None,
            increase_true: None,
            increase_false: None,
        };

        match identity {
            Identity::Branch(_, then_id) => out.then_id = Some(then_id.0),
            Identity::DefUse(_, use_site, var) => {
                out.use_file = Some(use_site.file.clone());
                out.use_line = Some(use_site.line);
                out.var = Some(var.clone());
            }
            Identity::Loop(_, _, class) => out.evaluate_hit = Some(class_tag(*class).to_owned()),
            Identity::Length(_, var, class) => {
                out.var = Some(var.clone());
                out.evaluate_length = Some(class_tag(*class).to_owned());
            }
            Identity::Condition(_, expr, negate) => {
                out.condition = Some(expr.clone());
                out.negate = Some(*negate);
            }
            Identity::ScalarPair(_, v1, v2, op, _group) => {
                out.var1 = Some(v1.clone());
                out.var2 = Some(v2.clone());
                out.op = Some(format!("{op:?}"));
            }
            Identity::VariablePredicate(_, var, op)
            | Identity::NonePredicate(_, var, op)
            | Identity::EmptyStringPredicate(_, var, op)
            | Identity::EmptyBytesPredicate(_, var, op) => {
                out.var = Some(var.clone());
                out.op = Some(format!("{op:?}"));
            }
            Identity::ReturnPredicate(_, func, op, _type_tag) => {
                out.function = Some(func.clone());
                out.op = Some(format!("{op:?}"));
            }
            Identity::IsAsciiPredicate(_, var)
            | Identity::ContainsDigitPredicate(_, var)
            | Identity::ContainsSpecialPredicate(_, var) => {
                out.var = Some(var.clone());
            }
            Identity::Function(_, function_id) | Identity::FunctionErrorPredicate(_, function_id) => {
                out.function = Some(function_id.0.to_string());
            }
            Identity::Line(_) => {}
        }

        if let AnalysisObject::Predicate(p) = object {
            let stats = p.importance();
            out.true_relevant = Some(stats.true_relevant);
            out.false_relevant = Some(stats.false_relevant);
            out.true_irrelevant = Some(stats.true_irrelevant);
            out.false_irrelevant = Some(stats.false_irrelevant);
            out.fail_true = Some(stats.fail_true);
            out.fail_false = Some(stats.fail_false);
            out.context = Some(stats.context);
            out.increase_true = Some(stats.increase_true);
            out.increase_false = Some(stats.increase_false);
        }

        out
    }
}

fn require<T>(value: Option<T>, field: &str) -> crate::errors::CoreResult<T> {
    value.ok_or_else(|| crate::errors::CoreError::AssertionFailure(format!("missing field `{field}`")))
}

fn parse_op(raw: &str) -> crate::errors::CoreResult<ComparisonOp> {
    ComparisonOp::parse(raw).ok_or_else(|| crate::errors::CoreError::AssertionFailure(format!("unknown comparator `{raw}`")))
}

fn parse_class(raw: &str) -> crate::errors::CoreResult<CountClass> {
    CountClass::parse(raw).ok_or_else(|| crate::errors::CoreError::AssertionFailure(format!("unknown count class `{raw}`")))
}

impl TryFrom<PersistedObject> for AnalysisObject {
    type Error = crate::errors::CoreError;

    /// Reconstructs a canonical object from its persisted JSON shape.
    ///
    /// Two identity sub-keys are absent from the persisted field list and so
    /// cannot be round-tripped exactly: a `Loop`
    /// object's `loop_id` (reconstructed as `LoopId(0)`, collapsing
    /// multiple loops sharing one `(file, line)` into a single identity),
    /// and a `ReturnPredicate`'s originating type tag (reconstructed as
    /// `TypeTag::Other`, which is behaviorally equivalent to every other tag
    /// today since `zero_of_type` returns `0.0` uniformly). See `DESIGN.md`.
    ///
    /// # Errors
    /// Returns `CoreError::AssertionFailure` if a variant-specific field the
    /// `kind` requires is missing, or if `op`/`evaluate_hit`/`evaluate_length`
    /// hold an unrecognized value.
    fn try_from(persisted: PersistedObject) -> Result<Self, Self::Error> {
        let site = SourceSite::new(persisted.file.clone(), persisted.line);
        let tallies = Tallies {
            passed: persisted.passed,
            passed_observed: persisted.passed_observed,
            passed_not_observed: persisted.passed_not_observed,
            failed: persisted.failed,
            failed_observed: persisted.failed_observed,
            failed_not_observed: persisted.failed_not_observed,
        };
        let weight = persisted.weight.unwrap_or(0.0);

        let spectrum_kind = |identity: &Identity| -> Option<SpectrumKind> {
            match identity {
                Identity::Line(_) => Some(SpectrumKind::Line),
                Identity::Function(_, _) => Some(SpectrumKind::Function),
                Identity::DefUse(_, _, _) => Some(SpectrumKind::DefUse),
                Identity::Loop(_, _, class) => Some(SpectrumKind::Loop(*class)),
                Identity::Length(_, _, class) => Some(SpectrumKind::Length(*class)),
                _ => None,
            }
        };

        let identity = match persisted.kind.as_str() {
            "line" => Identity::Line(site),
            "function" => {
                let raw = require(persisted.function.clone(), "function")?;
                let id = raw.parse::<u64>().map_err(|e| crate::errors::CoreError::AssertionFailure(e.to_string()))?;
                Identity::Function(site, FunctionId(id))
            }
            "def_use" => {
                let var = require(persisted.var.clone(), "var")?;
                let use_file = require(persisted.use_file.clone(), "use_file")?;
                let use_line = require(persisted.use_line, "use_line")?;
                Identity::DefUse(site, SourceSite::new(use_file, use_line), var)
            }
            "loop" => {
                let class = parse_class(&require(persisted.evaluate_hit.clone(), "evaluate_hit")?)?;
                Identity::Loop(site, LoopId(0), class)
            }
            "length" => {
                let var = require(persisted.var.clone(), "var")?;
                let class = parse_class(&require(persisted.evaluate_length.clone(), "evaluate_length")?)?;
                Identity::Length(site, var, class)
            }
            "branch" => {
                let then_id = require(persisted.then_id, "then_id")?;
                Identity::Branch(site, BranchTargetId(then_id))
            }
            "condition" => {
                let expr = require(persisted.condition.clone(), "condition")?;
                let negate = require(persisted.negate, "negate")?;
                Identity::Condition(site, expr, negate)
            }
            "scalar_pair" => {
                let v1 = require(persisted.var1.clone(), "var1")?;
                let v2 = require(persisted.var2.clone(), "var2")?;
                let op = parse_op(&require(persisted.op.clone(), "op")?)?;
                Identity::ScalarPair(site, v1, v2, op, 0)
            }
            "variable_predicate" => {
                let var = require(persisted.var.clone(), "var")?;
                let op = parse_op(&require(persisted.op.clone(), "op")?)?;
                Identity::VariablePredicate(site, var, op)
            }
            "none_predicate" => {
                let var = require(persisted.var.clone(), "var")?;
                let op = parse_op(&require(persisted.op.clone(), "op")?)?;
                Identity::NonePredicate(site, var, op)
            }
            "return_predicate" => {
                let func = require(persisted.function.clone(), "function")?;
                let op = parse_op(&require(persisted.op.clone(), "op")?)?;
                Identity::ReturnPredicate(site, func, op, TypeTag::Other)
            }
            "empty_string_predicate" => {
                let var = require(persisted.var.clone(), "var")?;
                let op = parse_op(&require(persisted.op.clone(), "op")?)?;
                Identity::EmptyStringPredicate(site, var, op)
            }
            "empty_bytes_predicate" => {
                let var = require(persisted.var.clone(), "var")?;
                let op = parse_op(&require(persisted.op.clone(), "op")?)?;
                Identity::EmptyBytesPredicate(site, var, op)
            }
            "is_ascii_predicate" => Identity::IsAsciiPredicate(site, require(persisted.var.clone(), "var")?),
            "contains_digit_predicate" => Identity::ContainsDigitPredicate(site, require(persisted.var.clone(), "var")?),
            "contains_special_predicate" => Identity::ContainsSpecialPredicate(site, require(persisted.var.clone(), "var")?),
            "function_error_predicate" => {
                let raw = require(persisted.function.clone(), "function")?;
                let id = raw.parse::<u64>().map_err(|e| crate::errors::CoreError::AssertionFailure(e.to_string()))?;
                Identity::FunctionErrorPredicate(site, FunctionId(id))
            }
            other => return Err(crate::errors::CoreError::AssertionFailure(format!("unknown object type `{other}`"))),
        };

        if let Some(kind) = spectrum_kind(&identity) {
            return Ok(Self::Spectrum(SpectrumObject::from_parts(identity, kind, tallies, weight)));
        }

        let importance = Importance {
            true_relevant: persisted.true_relevant.unwrap_or(0),
            false_relevant: persisted.false_relevant.unwrap_or(0),
            true_irrelevant: persisted.true_irrelevant.unwrap_or(0),
            false_irrelevant: persisted.false_irrelevant.unwrap_or(0),
            fail_true: persisted.fail_true.unwrap_or(0),
            fail_false: persisted.fail_false.unwrap_or(0),
            context: persisted.context.unwrap_or(0.0),
            increase_true: persisted.increase_true.unwrap_or(0.0),
            increase_false: persisted.increase_false.unwrap_or(0.0),
        };
        Ok(Self::Predicate(PredicateObject::from_parts(identity, tallies, weight, importance)))
    }
}

/// Serializes a full registry snapshot as the persisted analysis JSON array.
///
/// # Errors
/// Propagates any `serde_json` serialization failure.
pub fn to_json_array(objects: &[&AnalysisObject]) -> crate::errors::CoreResult<String> {
    let persisted: Vec<PersistedObject> = objects.iter().map(|o| PersistedObject::from(*o)).collect();
    serde_json::to_string_pretty(&persisted).map_err(|e| crate::errors::CoreError::CorruptStream(e.to_string()))
}

/// Deserializes a persisted analysis JSON array back into canonical objects.
///
/// # Errors
/// Returns `CoreError::CorruptStream` if `json` is not a valid
/// `PersistedObject` array, or `CoreError::AssertionFailure` if an entry is
/// missing a field its `type` requires.
pub fn from_json_array(json: &str) -> crate::errors::CoreResult<Vec<AnalysisObject>> {
    let persisted: Vec<PersistedObject> = serde_json::from_str(json).map_err(|e| crate::errors::CoreError::CorruptStream(e.to_string()))?;
    persisted.into_iter().map(AnalysisObject::try_from).collect()
}

#[cfg(test)]
mod tests {
    //! Test-only lint relaxation for `.expect()`-based assertions.
    #![allow(clippy::expect_used, reason = "Test-only panic-based assertions are permitted.")]

    use super::*;

    fn finalized_line(file: &str, line: u32, passed: &[RunId], failed: &[RunId]) -> AnalysisObject {
        let identity = Identity::Line(SourceSite::new(file, line));
        let mut object = AnalysisObject::Spectrum(SpectrumObject::new(identity, SpectrumKind::Line));
        let event = Event {
            file: file.to_owned(),
            line,
            event_id: crate::event::model::EventId(0),
            thread_id: None,
            kind: crate::event::model::EventKind::Line,
        };
        object.hit(passed[0], ThreadId::default(), &event, None);
        object.finalize(passed, failed);
        object
    }

    fn finalized_variable_predicate(file: &str, line: u32, passed: &[RunId], failed: &[RunId]) -> AnalysisObject {
        let identity = Identity::VariablePredicate(SourceSite::new(file, line), "x".to_owned(), ComparisonOp::Gt);
        let mut object = AnalysisObject::Predicate(PredicateObject::new(identity));
        let event = Event {
            file: file.to_owned(),
            line,
            event_id: crate::event::model::EventId(0),
            thread_id: None,
            kind: crate::event::model::EventKind::Def {
                var: "x".to_owned(),
                var_id: crate::event::model::VarId(1),
                value: serde_json::json!(5),
                type_tag: TypeTag::Int,
            },
        };
        object.hit(passed[0], ThreadId::default(), &event, None);
        object.finalize(passed, failed);
        object
    }

    #[test]
    fn round_trips_a_spectrum_object_through_persisted_json() {
        let passed = [RunId(0)];
        let failed = [RunId(1)];
        let object = finalized_line("a.py", 10, &passed, &failed);
        let before = PersistedObject::from(&object);

        let json = to_json_array(&[&object]).expect("serializes");
        let restored = from_json_array(&json).expect("deserializes");
        assert_eq!(restored.len(), 1);
        let after = PersistedObject::from(&restored[0]);
        assert_eq!(before, after);
    }

    #[test]
    fn round_trips_a_predicate_object_through_persisted_json() {
        let passed = [RunId(0)];
        let failed = [RunId(1)];
        let object = finalized_variable_predicate("a.py", 12, &passed, &failed);
        let before = PersistedObject::from(&object);

        let json = to_json_array(&[&object]).expect("serializes");
        let restored = from_json_array(&json).expect("deserializes");
        assert_eq!(restored.len(), 1);
        let after = PersistedObject::from(&restored[0]);
        assert_eq!(before, after);
    }

    #[test]
    fn rejects_an_unknown_object_type() {
        let json = r#"[{"type":"not_a_real_kind","file":"a.py","line":1,"passed":0,"passed_observed":0,"passed_not_observed":0,"failed":0,"failed_observed":0,"failed_not_observed":0}]"#;
        assert!(from_json_array(json).is_err());
    }
}
