// crates/sflkit-core/tests/basic_line_suspicion.rs
// ============================================================================
// Module: Basic Line Suspicion Tests
// Description: One failing trace and two passing traces, scored by Tarantula.
// ============================================================================
//! ## Overview
//! Covers the first literal end-to-end scenario: a failing trace hitting
//! lines `{1, 5, 6, 7, 9, 10}` and two passing traces hitting
//! `{1, 5, 6, 12, 13}` must score `Line(10)` at suspiciousness `1.0` and
//! `Line(1)` at `0.5` under Tarantula.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Test-only assertions are permitted.")]

use std::sync::Arc;

use sflkit_core::analyzer::Analyzer;
use sflkit_core::analyzer::AnalyzerConfig;
use sflkit_core::event::EventId;
use sflkit_core::event::EventKind;
use sflkit_core::event::EventMapping;
use sflkit_core::event::EventFile;
use sflkit_core::event::RunId;
use sflkit_core::event::VecEventSource;
use sflkit_core::event::Event;
use sflkit_core::metrics::MetricName;
use sflkit_core::object::SingleLineLocator;

fn line_events(lines: &[u32]) -> Vec<Event> {
    lines
        .iter()
        .enumerate()
        .map(|(i, &line)| Event {
            file: "program.py".to_owned(),
            line,
            event_id: EventId(i as u64),
            thread_id: None,
            kind: EventKind::Line,
        })
        .collect()
}

fn trace(run: u32, failing: bool, lines: &[u32]) -> EventFile {
    EventFile::new(RunId(run), failing, Arc::new(EventMapping::new()), Box::new(VecEventSource::new(line_events(lines))))
}

#[test]
fn tarantula_scores_match_the_literal_scenario() {
    let mut analyzer = Analyzer::new(AnalyzerConfig::default());
    let traces = vec![
        trace(0, true, &[1, 5, 6, 7, 9, 10]),
        trace(1, false, &[1, 5, 6, 12, 13]),
        trace(2, false, &[1, 5, 6, 12, 13]),
    ];
    analyzer.analyze(traces, None).expect("analysis succeeds");

    let locator = SingleLineLocator;
    let metric = MetricName::new("tarantula");
    let ranked = analyzer.rank(Some(&metric), &locator);

    let score_of = |line: u32| -> Option<f64> {
        ranked
            .iter()
            .find(|suggestion| suggestion.locations.iter().any(|loc| loc.file == "program.py" && loc.line == line))
            .map(|suggestion| suggestion.score)
    };

    assert_eq!(score_of(10), Some(1.0));
    assert_eq!(score_of(1), Some(0.5));
}
