// crates/sflkit-core/tests/suggestion_ranking_ties.rs
// ============================================================================
// Module: Suggestion Ranking Ties Tests
// Description: Mid-rank tie-breaking and top-N hit evaluation.
// ============================================================================
//! ## Overview
//! Covers the fifth literal end-to-end scenario: three lines scored
//! `{0.9, 0.9, 0.5}`. Under `RankScenario::Average`, both `0.9`-scored lines
//! share mid-rank `1.5` and the `0.5`-scored line gets rank `3`. With
//! `faulty = {line_A}` (one of the `0.9` lines) and `n = 2`, top-2 best-case
//! localization is a hit (100% — "yields 1.0" in the literal wording).

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Test-only assertions are permitted.")]

use sflkit_core::object::SourceLine;
use sflkit_core::object::Suggestion;
use sflkit_core::rank::Rank;
use sflkit_core::rank::RankScenario;

fn line(file: &str, line: u32) -> SourceLine {
    SourceLine { file: file.to_owned(), line }
}

fn ranked_scenario() -> Vec<Suggestion> {
    vec![
        Suggestion { locations: vec![line("a.py", 10), line("a.py", 11)], score: 0.9 },
        Suggestion { locations: vec![line("a.py", 20)], score: 0.5 },
    ]
}

#[test]
fn tied_lines_share_mid_rank_one_point_five() {
    let ranked = ranked_scenario();
    let rank = Rank::new();

    let line_a = line("a.py", 10);
    let line_b = line("a.py", 11);
    let line_c = line("a.py", 20);

    assert_eq!(rank.rank_of(&ranked, &line_a, RankScenario::Average), Some(1.5));
    assert_eq!(rank.rank_of(&ranked, &line_b, RankScenario::Average), Some(1.5));
    assert_eq!(rank.rank_of(&ranked, &line_c, RankScenario::Average), Some(3.0));
}

#[test]
fn top_two_best_case_hits_when_faulty_in_tied_group() {
    let ranked = ranked_scenario();
    let rank = Rank::new();
    let faulty = vec![line("a.py", 10)];

    assert!(rank.top_n_hit(&ranked, &faulty, 2, RankScenario::Best));
    assert_eq!(rank.first_fault_rank(&ranked, &faulty, RankScenario::Best), Some(1.0));
}
