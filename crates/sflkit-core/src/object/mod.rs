// sflkit-core/src/object/mod.rs
// ============================================================================
// Module: Analysis Object Taxonomy
// Description: Spectrum/predicate objects, identity keys, and suggestions.
// Purpose: Top-level module wiring for the analysis object taxonomy.
// Dependencies: none
// ============================================================================

//! ## Overview
//! See [`identity`] for canonical identity keys, [`evaluation`] for the
//! tri-valued outcome type, [`tally`] for the shared counter state,
//! [`spectrum`]/[`predicate`] for the two object families, [`suggestion`]
//! for the ranked output unit, and [`analysis_object`] for the top-level
//! tagged union and its persisted JSON shape.

pub mod analysis_object;
pub mod evaluation;
pub mod identity;
pub mod predicate;
pub mod spectrum;
pub mod suggestion;
pub mod tally;

pub use analysis_object::AnalysisObject;
pub use analysis_object::PersistedObject;
pub use analysis_object::from_json_array;
pub use analysis_object::to_json_array;
pub use evaluation::Evaluation;
pub use identity::ComparisonOp;
pub use identity::CountClass;
pub use identity::Identity;
pub use identity::SourceSite;
pub use predicate::Importance;
pub use predicate::PredicateObject;
pub use spectrum::SpectrumKind;
pub use spectrum::SpectrumObject;
pub use suggestion::BranchSide;
pub use suggestion::SingleLineLocator;
pub use suggestion::SourceLine;
pub use suggestion::SourceLocator;
pub use suggestion::Suggestion;
pub use tally::Observation;
pub use tally::Tallies;
