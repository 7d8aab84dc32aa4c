// sflkit-core/src/rank/mod.rs
// ============================================================================
// Module: Ranking & Evaluation
// Description: Turns finalized analysis objects into ranked suggestions, and
//              evaluates a ranking against a known-faulty location set.
// Purpose: Top-level module wiring for the rank layer.
// Dependencies: none
// ============================================================================

//! ## Overview
//! [`ranker::SuggestionRanker`] is the online half (objects → suggestions);
//! [`rank::Rank`] is the offline half (suggestions + ground truth → scores).
//! Splitting them keeps the ranker ignorant of any notion of "faulty" —
//! something an analyzer run cannot know about its own subject.

#[allow(clippy::module_inception, reason = "mirrors the public Rank type the module exists to hold")]
pub mod rank;
pub mod ranker;

pub use rank::Rank;
pub use rank::RankScenario;
pub use ranker::ScoreSummary;
pub use ranker::SuggestionRanker;
