// sflkit-core/src/object/identity.rs
// ============================================================================
// Module: Analysis Object Identity
// Description: Canonical identity keys distinguishing analysis objects within a kind.
// Purpose: Back the factory registries' dedup key and the persisted-JSON "type" tag.
// Dependencies: crate::event::model
// ============================================================================

//! ## Overview
//! Every analysis object is uniquely identified within its kind by an
//! [`Identity`] value. Factories use `Identity` as the registry key so two
//! events that describe "the same" object (same file/line/variant-specific
//! key) always resolve to the identical canonical [`crate::object::analysis_object::AnalysisObject`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::event::model::BranchTargetId;
use crate::event::model::FunctionId;
use crate::event::model::LoopId;

// ============================================================================
// SECTION: Shared Sub-Keys
// ============================================================================

/// A source location, used as (part of) several identity keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceSite {
    /// Source file.
    pub file: String,
    /// Source line.
    pub line: u32,
}

impl SourceSite {
    /// Creates a new source site.
    #[must_use]
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

/// Classifier bucket shared by the Loop and Length variant families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CountClass {
    /// Count equals zero.
    Zero,
    /// Count equals one.
    One,
    /// Count is greater than one.
    Many,
}

impl CountClass {
    /// Parses the `"zero"`/`"one"`/`"many"` tag used by persisted analysis
    /// JSON's `evaluate_hit`/`evaluate_length` fields.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "zero" => Some(Self::Zero),
            "one" => Some(Self::One),
            "many" => Some(Self::Many),
            _ => None,
        }
    }
}

/// Comparator used by the scalar/variable/return/empty predicate families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComparisonOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
}

impl ComparisonOp {
    /// Parses the `Debug`-format rendering used by persisted analysis JSON's
    /// `op` field (`"Eq"`, `"Ne"`, `"Gt"`, `"Ge"`, `"Lt"`, `"Le"`).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Eq" => Some(Self::Eq),
            "Ne" => Some(Self::Ne),
            "Gt" => Some(Self::Gt),
            "Ge" => Some(Self::Ge),
            "Lt" => Some(Self::Lt),
            "Le" => Some(Self::Le),
            _ => None,
        }
    }

    /// Applies the comparator to two `f64` operands.
    #[must_use]
    pub fn apply_f64(self, left: f64, right: f64) -> bool {
        match self {
            Self::Eq => (left - right).abs() <= f64::EPSILON,
            Self::Ne => (left - right).abs() > f64::EPSILON,
            Self::Gt => left > right,
            Self::Ge => left >= right,
            Self::Lt => left < right,
            Self::Le => left <= right,
        }
    }

    /// Applies the comparator to a boolean "is equal" style relation, used
    /// by the `Exists`-shaped predicates (none-ness, emptiness).
    #[must_use]
    pub fn apply_bool(self, matches: bool) -> bool {
        match self {
            Self::Eq => matches,
            Self::Ne => !matches,
            // Ordering comparators are not meaningful for these predicates;
            // callers never construct them with anything but Eq/Ne.
            Self::Gt | Self::Ge | Self::Lt | Self::Le => matches,
        }
    }
}

// ============================================================================
// SECTION: Identity
// ============================================================================

/// Canonical identity key for every analysis object variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identity {
    /// `(file, line)`
    Line(SourceSite),
    /// `(file, line, function_id)`
    Function(SourceSite, FunctionId),
    /// `(def-site, use-site, var)`
    DefUse(SourceSite, SourceSite, String),
    /// `(file, line, loop_id, variant)`
    Loop(SourceSite, LoopId, CountClass),
    /// `(file, line, var, variant)`
    Length(SourceSite, String, CountClass),
    /// `(file, line, then_id)` — one object per branch side.
    Branch(SourceSite, BranchTargetId),
    /// `(file, line, expr, negate)`
    Condition(SourceSite, String, bool),
    /// `(file, line, v1, v2, op, group)`
    ScalarPair(SourceSite, String, String, ComparisonOp, u32),
    /// `(file, line, var, op)`
    VariablePredicate(SourceSite, String, ComparisonOp),
    /// `(file, line, var, op)`
    NonePredicate(SourceSite, String, ComparisonOp),
    /// `(file, line, func, op, type)`
    ReturnPredicate(SourceSite, String, ComparisonOp, crate::event::model::TypeTag),
    /// `(file, line, var, op)`
    EmptyStringPredicate(SourceSite, String, ComparisonOp),
    /// `(file, line, var, op)`
    EmptyBytesPredicate(SourceSite, String, ComparisonOp),
    /// `(file, line, var)`
    IsAsciiPredicate(SourceSite, String),
    /// `(file, line, var)`
    ContainsDigitPredicate(SourceSite, String),
    /// `(file, line, var)`
    ContainsSpecialPredicate(SourceSite, String),
    /// `(file, line, function_id)`
    FunctionErrorPredicate(SourceSite, FunctionId),
}

impl Identity {
    /// Returns the source file this identity is rooted at.
    #[must_use]
    pub fn file(&self) -> &str {
        self.site().file.as_str()
    }

    /// Returns the source line this identity is rooted at.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.site().line
    }

    fn site(&self) -> &SourceSite {
        match self {
            Self::Line(site)
            | Self::Function(site, _)
            | Self::Loop(site, _, _)
            | Self::Length(site, _, _)
            | Self::Branch(site, _)
            | Self::Condition(site, _, _)
            | Self::ScalarPair(site, _, _, _, _)
            | Self::VariablePredicate(site, _, _)
            | Self::NonePredicate(site, _, _)
            | Self::ReturnPredicate(site, _, _, _)
            | Self::EmptyStringPredicate(site, _, _)
            | Self::EmptyBytesPredicate(site, _, _)
            | Self::IsAsciiPredicate(site, _)
            | Self::ContainsDigitPredicate(site, _)
            | Self::ContainsSpecialPredicate(site, _)
            | Self::FunctionErrorPredicate(site, _) => site,
            Self::DefUse(def_site, _, _) => def_site,
        }
    }

    /// Returns the canonical `type` tag used in persisted analysis JSON.
    #[must_use]
    pub const fn type_tag(&self) -> &'static str {
        match self {
            Self::Line(_) => "line",
            Self::Function(_, _) => "function",
            Self::DefUse(_, _, _) => "def_use",
            Self::Loop(_, _, _) => "loop",
            Self::Length(_, _, _) => "length",
            Self::Branch(_, _) => "branch",
            Self::Condition(_, _, _) => "condition",
            Self::ScalarPair(_, _, _, _, _) => "scalar_pair",
            Self::VariablePredicate(_, _, _) => "variable_predicate",
            Self::NonePredicate(_, _, _) => "none_predicate",
            Self::ReturnPredicate(_, _, _, _) => "return_predicate",
            Self::EmptyStringPredicate(_, _, _) => "empty_string_predicate",
            Self::EmptyBytesPredicate(_, _, _) => "empty_bytes_predicate",
            Self::IsAsciiPredicate(_, _) => "is_ascii_predicate",
            Self::ContainsDigitPredicate(_, _) => "contains_digit_predicate",
            Self::ContainsSpecialPredicate(_, _) => "contains_special_predicate",
            Self::FunctionErrorPredicate(_, _) => "function_error_predicate",
        }
    }
}
