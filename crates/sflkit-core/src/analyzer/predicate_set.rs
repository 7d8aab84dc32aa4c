// sflkit-core/src/analyzer/predicate_set.rs
// ============================================================================
// Module: Predicate Set
// Description: Post-hoc filter over which analysis variants an analyzer
//              admits into ranking and feature-vector output.
// Purpose: Let configuration narrow the fixed set of variants the
//          combination factory always builds.
// Dependencies: crate::object
// ============================================================================

//! ## Overview
//! `CombinationFactory` unconditionally builds every variant family for
//! every event it sees — there is no cheaper way to know in advance which
//! variants a caller wants without first seeing the trace. [`PredicateSet`]
//! instead filters canonical objects by variant after the fact, at
//! ranking/export time, leaving registry population untouched.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashSet;

use crate::errors::CoreError;
use crate::errors::CoreResult;
use crate::object::Identity;

// ============================================================================
// SECTION: Analysis Variant
// ============================================================================

/// One of the analysis object kinds a [`PredicateSet`] may admit, mirroring
/// [`Identity::type_tag`]'s discriminants one-to-one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisVariant {
    /// `Identity::Line`
    Line,
    /// `Identity::Function`
    Function,
    /// `Identity::DefUse`
    DefUse,
    /// `Identity::Loop`
    Loop,
    /// `Identity::Length`
    Length,
    /// `Identity::Branch`
    Branch,
    /// `Identity::Condition`
    Condition,
    /// `Identity::ScalarPair`
    ScalarPair,
    /// `Identity::VariablePredicate`
    VariablePredicate,
    /// `Identity::NonePredicate`
    NonePredicate,
    /// `Identity::ReturnPredicate`
    ReturnPredicate,
    /// `Identity::EmptyStringPredicate`
    EmptyStringPredicate,
    /// `Identity::EmptyBytesPredicate`
    EmptyBytesPredicate,
    /// `Identity::IsAsciiPredicate`
    IsAsciiPredicate,
    /// `Identity::ContainsDigitPredicate`
    ContainsDigitPredicate,
    /// `Identity::ContainsSpecialPredicate`
    ContainsSpecialPredicate,
    /// `Identity::FunctionErrorPredicate`
    FunctionErrorPredicate,
}

/// Every variant, in the same order as [`Identity::type_tag`]'s match arms.
const ALL_VARIANTS: [AnalysisVariant; 17] = [
    AnalysisVariant::Line,
    AnalysisVariant::Function,
    AnalysisVariant::DefUse,
    AnalysisVariant::Loop,
    AnalysisVariant::Length,
    AnalysisVariant::Branch,
    AnalysisVariant::Condition,
    AnalysisVariant::ScalarPair,
    AnalysisVariant::VariablePredicate,
    AnalysisVariant::NonePredicate,
    AnalysisVariant::ReturnPredicate,
    AnalysisVariant::EmptyStringPredicate,
    AnalysisVariant::EmptyBytesPredicate,
    AnalysisVariant::IsAsciiPredicate,
    AnalysisVariant::ContainsDigitPredicate,
    AnalysisVariant::ContainsSpecialPredicate,
    AnalysisVariant::FunctionErrorPredicate,
];

impl AnalysisVariant {
    /// Returns the variant an [`Identity`] belongs to.
    #[must_use]
    pub const fn of(identity: &Identity) -> Self {
        match identity {
            Identity::Line(_) => Self::Line,
            Identity::Function(_, _) => Self::Function,
            Identity::DefUse(_, _, _) => Self::DefUse,
            Identity::Loop(_, _, _) => Self::Loop,
            Identity::Length(_, _, _) => Self::Length,
            Identity::Branch(_, _) => Self::Branch,
            Identity::Condition(_, _, _) => Self::Condition,
            Identity::ScalarPair(_, _, _, _, _) => Self::ScalarPair,
            Identity::VariablePredicate(_, _, _) => Self::VariablePredicate,
            Identity::NonePredicate(_, _, _) => Self::NonePredicate,
            Identity::ReturnPredicate(_, _, _, _) => Self::ReturnPredicate,
            Identity::EmptyStringPredicate(_, _, _) => Self::EmptyStringPredicate,
            Identity::EmptyBytesPredicate(_, _, _) => Self::EmptyBytesPredicate,
            Identity::IsAsciiPredicate(_, _) => Self::IsAsciiPredicate,
            Identity::ContainsDigitPredicate(_, _) => Self::ContainsDigitPredicate,
            Identity::ContainsSpecialPredicate(_, _) => Self::ContainsSpecialPredicate,
            Identity::FunctionErrorPredicate(_, _) => Self::FunctionErrorPredicate,
        }
    }

    /// Parses the snake_case config name, matching [`Identity::type_tag`]'s
    /// string form exactly.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "line" => Some(Self::Line),
            "function" => Some(Self::Function),
            "def_use" => Some(Self::DefUse),
            "loop" => Some(Self::Loop),
            "length" => Some(Self::Length),
            "branch" => Some(Self::Branch),
            "condition" => Some(Self::Condition),
            "scalar_pair" => Some(Self::ScalarPair),
            "variable_predicate" => Some(Self::VariablePredicate),
            "none_predicate" => Some(Self::NonePredicate),
            "return_predicate" => Some(Self::ReturnPredicate),
            "empty_string_predicate" => Some(Self::EmptyStringPredicate),
            "empty_bytes_predicate" => Some(Self::EmptyBytesPredicate),
            "is_ascii_predicate" => Some(Self::IsAsciiPredicate),
            "contains_digit_predicate" => Some(Self::ContainsDigitPredicate),
            "contains_special_predicate" => Some(Self::ContainsSpecialPredicate),
            "function_error_predicate" => Some(Self::FunctionErrorPredicate),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Predicate Set
// ============================================================================

/// Which analysis variants an [`crate::analyzer::AnalyzerConfig`] admits
/// into ranking and feature-vector output.
#[derive(Debug, Clone)]
pub struct PredicateSet(HashSet<AnalysisVariant>);

impl PredicateSet {
    /// Admits every known variant.
    #[must_use]
    pub fn all() -> Self {
        Self(ALL_VARIANTS.into_iter().collect())
    }

    /// Admits exactly the given variants.
    #[must_use]
    pub fn only(variants: impl IntoIterator<Item = AnalysisVariant>) -> Self {
        Self(variants.into_iter().collect())
    }

    /// Parses a comma-separated list of variant names (`events.predicates`'s
    /// wire form), ignoring blank entries.
    ///
    /// # Errors
    /// Returns `CoreError::Config` if any entry is not a recognized variant name.
    pub fn parse(csv: &str) -> CoreResult<Self> {
        let mut set = HashSet::new();
        for part in csv.split(',') {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                continue;
            }
            let variant = AnalysisVariant::parse(trimmed)
                .ok_or_else(|| CoreError::Config(format!("unknown analysis variant `{trimmed}`")))?;
            set.insert(variant);
        }
        Ok(Self(set))
    }

    /// Whether `identity`'s variant is admitted by this set.
    #[must_use]
    pub fn contains(&self, identity: &Identity) -> bool {
        self.0.contains(&AnalysisVariant::of(identity))
    }
}

impl Default for PredicateSet {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::SourceSite;

    #[test]
    fn all_admits_every_variant_including_spectra() {
        let set = PredicateSet::all();
        assert!(set.contains(&Identity::Line(SourceSite::new("a.py", 1))));
        assert!(set.contains(&Identity::FunctionErrorPredicate(SourceSite::new("a.py", 1), crate::event::model::FunctionId(0))));
    }

    #[test]
    fn only_excludes_unlisted_variants() {
        let set = PredicateSet::only([AnalysisVariant::Line]);
        assert!(set.contains(&Identity::Line(SourceSite::new("a.py", 1))));
        assert!(!set.contains(&Identity::Branch(SourceSite::new("a.py", 1), crate::event::model::BranchTargetId(0))));
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert!(PredicateSet::parse("line, nonsense").is_err());
        assert!(PredicateSet::parse("line, branch").is_ok());
    }

    #[test]
    fn parse_ignores_blank_entries() {
        let set = PredicateSet::parse("line,, branch ,").expect("valid csv");
        assert!(set.contains(&Identity::Line(SourceSite::new("a.py", 1))));
    }
}
