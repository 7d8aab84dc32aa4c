// sflkit-core/src/rank/ranker.rs
// ============================================================================
// Module: Suggestion Ranker
// Description: Groups analysis objects' suggestions by score and reports
//              aggregate suspiciousness statistics.
// Purpose: Produce the ranked suggestion list an analyzer hands callers.
// Dependencies: crate::object
// ============================================================================

//! ## Overview
//! Many distinct objects (e.g. sibling predicate variants at the same line)
//! can land on the same suspiciousness score; grouping by score and unioning
//! their lines avoids reporting the same location multiple times at
//! different list positions.

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;

use crate::metrics::MetricName;
use crate::object::AnalysisObject;
use crate::object::SourceLine;
use crate::object::SourceLocator;
use crate::object::Suggestion;

/// Aggregate suspiciousness statistics over a ranked suggestion set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSummary {
    /// Highest suspiciousness score.
    pub max: f64,
    /// Lowest suspiciousness score.
    pub min: f64,
    /// Mean suspiciousness score.
    pub mean: f64,
    /// Median suspiciousness score.
    pub median: f64,
}

/// Groups objects' suggestions by score and ranks them descending.
#[derive(Debug, Default)]
pub struct SuggestionRanker;

impl SuggestionRanker {
    /// Creates a new ranker. Stateless: all inputs are passed to `rank`.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Computes one suggestion per object, groups by score, unions lines
    /// within each group, and returns the groups sorted by descending score.
    #[must_use]
    pub fn rank(&self, objects: &[&AnalysisObject], metric: Option<&MetricName>, locator: &dyn SourceLocator) -> Vec<Suggestion> {
        let mut groups: BTreeMap<OrderedFloat<f64>, Vec<SourceLine>> = BTreeMap::new();
        for object in objects {
            let suggestion = object.get_suggestion(metric, locator);
            groups.entry(OrderedFloat(suggestion.score)).or_default().extend(suggestion.locations);
        }

        let mut ranked: Vec<Suggestion> = groups
            .into_iter()
            .map(|(score, mut locations)| {
                locations.sort();
                locations.dedup();
                Suggestion { locations, score: score.0 }
            })
            .collect();
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }

    /// Computes max/min/mean/median suspiciousness over a ranked suggestion
    /// set. Returns all-zero summary for an empty set.
    #[must_use]
    pub fn summarize(ranked: &[Suggestion]) -> ScoreSummary {
        if ranked.is_empty() {
            return ScoreSummary { max: 0.0, min: 0.0, mean: 0.0, median: 0.0 };
        }
        let mut scores: Vec<f64> = ranked.iter().map(|s| s.score).collect();
        scores.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let len = scores.len();
        let mean = scores.iter().sum::<f64>() / len as f64;
        let median = if len % 2 == 0 {
            (scores[len / 2 - 1] + scores[len / 2]) / 2.0
        } else {
            scores[len / 2]
        };
        ScoreSummary {
            max: *scores.last().unwrap_or(&0.0),
            min: *scores.first().unwrap_or(&0.0),
            mean,
            median,
        }
    }
}
