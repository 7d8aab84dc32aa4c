// sflkit-core/src/rank/rank.rs
// ============================================================================
// Module: Fault Rank Evaluation
// Description: Locates known-faulty lines within a ranked suggestion list and
//              scores the localization (rank, exam score, wasted effort).
// Purpose: Offline evaluation of a ranking against a ground-truth faulty set.
// Dependencies: crate::object
// ============================================================================

//! ## Overview
//! A [`crate::rank::SuggestionRanker`] produces groups of tied locations; a
//! faulty line landing in a group with several siblings does not have one
//! unambiguous rank. [`RankScenario`] picks which end of the tie group (or
//! its midpoint) counts as "the" rank, matching the best-case/worst-case/
//! average-case convention used to report localization effectiveness.

use crate::object::SourceLine;
use crate::object::Suggestion;

/// Which position within a tie group stands for a location's rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankScenario {
    /// The faulty line is assumed to sort first within its tie group.
    Best,
    /// The faulty line is assumed to sort last within its tie group.
    Worst,
    /// Mid-rank: the mean of the tie group's first and last rank.
    Average,
}

/// Locates faulty locations within a ranked suggestion list and reports
/// standard SFL evaluation metrics against them.
#[derive(Debug, Default)]
pub struct Rank;

impl Rank {
    /// Creates a new evaluator. Stateless: all inputs are passed per call.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns each group's 1-indexed start position and size, in ranked order.
    fn group_bounds(ranked: &[Suggestion]) -> Vec<(usize, usize)> {
        let mut bounds = Vec::with_capacity(ranked.len());
        let mut pos = 1usize;
        for group in ranked {
            let size = group.locations.len();
            bounds.push((pos, size));
            pos += size;
        }
        bounds
    }

    /// Returns `location`'s rank under `scenario`, or `None` if it does not
    /// appear in `ranked` at all.
    #[must_use]
    pub fn rank_of(&self, ranked: &[Suggestion], location: &SourceLine, scenario: RankScenario) -> Option<f64> {
        let bounds = Self::group_bounds(ranked);
        for (group, (start, size)) in ranked.iter().zip(bounds) {
            if group.locations.iter().any(|candidate| candidate == location) {
                let rank = match scenario {
                    RankScenario::Best => start as f64,
                    RankScenario::Worst => (start + size - 1) as f64,
                    RankScenario::Average => start as f64 + (size as f64 - 1.0) / 2.0,
                };
                return Some(rank);
            }
        }
        None
    }

    /// Returns the best (lowest) rank among `faulty` locations under
    /// `scenario` — the rank at which the first fault would be found.
    #[must_use]
    pub fn first_fault_rank(&self, ranked: &[Suggestion], faulty: &[SourceLine], scenario: RankScenario) -> Option<f64> {
        faulty
            .iter()
            .filter_map(|location| self.rank_of(ranked, location, scenario))
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// Exam score: the fraction of `total_locations` that would need
    /// examining before the first fault is reached, under `scenario`.
    #[must_use]
    pub fn exam_score(&self, ranked: &[Suggestion], faulty: &[SourceLine], total_locations: usize, scenario: RankScenario) -> Option<f64> {
        if total_locations == 0 {
            return None;
        }
        self.first_fault_rank(ranked, faulty, scenario)
            .map(|rank| rank / total_locations as f64)
    }

    /// Wasted effort: the integer count of non-faulty locations examined
    /// before reaching the first fault, under `scenario`.
    #[must_use]
    pub fn wasted_effort(&self, ranked: &[Suggestion], faulty: &[SourceLine], scenario: RankScenario) -> Option<u64> {
        self.first_fault_rank(ranked, faulty, scenario)
            .map(|rank| rank.floor().max(1.0) as u64 - 1)
    }

    /// Whether a fault from `faulty` lands within the top `n` ranked
    /// positions under `scenario`.
    #[must_use]
    pub fn top_n_hit(&self, ranked: &[Suggestion], faulty: &[SourceLine], n: usize, scenario: RankScenario) -> bool {
        self.first_fault_rank(ranked, faulty, scenario)
            .is_some_and(|rank| rank <= n as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(file: &str, line: u32) -> SourceLine {
        SourceLine { file: file.to_string(), line }
    }

    fn suggestion(score: f64, lines: &[(&str, u32)]) -> Suggestion {
        Suggestion {
            locations: lines.iter().map(|(f, l)| line(f, *l)).collect(),
            score,
        }
    }

    #[test]
    fn best_and_worst_diverge_within_a_tie_group() {
        let ranked = vec![suggestion(0.9, &[("a.rs", 1), ("a.rs", 2), ("a.rs", 3)]), suggestion(0.1, &[("a.rs", 4)])];
        let faulty = vec![line("a.rs", 3)];
        let rank = Rank::new();
        assert_eq!(rank.rank_of(&ranked, &faulty[0], RankScenario::Best), Some(1.0));
        assert_eq!(rank.rank_of(&ranked, &faulty[0], RankScenario::Worst), Some(3.0));
        assert_eq!(rank.rank_of(&ranked, &faulty[0], RankScenario::Average), Some(2.0));
    }

    #[test]
    fn missing_fault_yields_none() {
        let ranked = vec![suggestion(0.9, &[("a.rs", 1)])];
        let faulty = vec![line("a.rs", 99)];
        let rank = Rank::new();
        assert_eq!(rank.first_fault_rank(&ranked, &faulty, RankScenario::Average), None);
        assert_eq!(rank.exam_score(&ranked, &faulty, 10, RankScenario::Average), None);
    }

    #[test]
    fn exam_score_and_wasted_effort_agree_with_rank() {
        let ranked = vec![suggestion(0.9, &[("a.rs", 1)]), suggestion(0.5, &[("a.rs", 2)])];
        let faulty = vec![line("a.rs", 2)];
        let rank = Rank::new();
        assert_eq!(rank.exam_score(&ranked, &faulty, 4, RankScenario::Best), Some(0.5));
        assert_eq!(rank.wasted_effort(&ranked, &faulty, RankScenario::Best), Some(1));
        assert!(rank.top_n_hit(&ranked, &faulty, 2, RankScenario::Best));
        assert!(!rank.top_n_hit(&ranked, &faulty, 1, RankScenario::Best));
    }
}
