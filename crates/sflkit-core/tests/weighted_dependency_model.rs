// crates/sflkit-core/tests/weighted_dependency_model.rs
// ============================================================================
// Module: Weighted Dependency Model Tests
// Description: TestFunctionModel/TestLineModel re-weighting by proximity to
//              a failing test's checkpoints.
// ============================================================================
//! ## Overview
//! Covers the sixth literal end-to-end scenario: a failing test with a
//! test-start, five intervening analysis parts, and a test-end whose
//! checkpoint lands inside the fourth part (1-indexed). `TestFunctionModel`
//! must assign weight `1.0` to parts 1-4 ("actual") and `0.5` to the part
//! after the end. `TestLineModel` further scales each weight by
//! `1 - distance / (max_distance + 1)`, measuring distance from the part
//! closest to the test-end; that closest part must end up with the highest
//! weight among all parts of the trace.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Test-only assertions are permitted.")]

use std::sync::Arc;

use sflkit_core::event::Event;
use sflkit_core::event::EventFile;
use sflkit_core::event::EventId;
use sflkit_core::event::EventKind;
use sflkit_core::event::EventMapping;
use sflkit_core::event::FunctionId;
use sflkit_core::event::RunId;
use sflkit_core::event::VecEventSource;
use sflkit_core::factory::CombinationFactory;
use sflkit_core::object::Identity;
use sflkit_core::object::PersistedObject;
use sflkit_core::trace::SerialTraceModel;
use sflkit_core::trace::TraceModel;
use sflkit_core::weight::DependencyModelKind;
use sflkit_core::weight::DependencyWeightModel;

/// Builds a `Line` event at `line` tagging the part it lands in via the
/// object it triggers: one distinct line per part so each part's weight can
/// be read back off its own `Line(n)` object.
fn line(line: u32, id: u64) -> Event {
    Event { file: "test_harness.py".to_owned(), line, event_id: EventId(id), thread_id: None, kind: EventKind::Line }
}

fn test_start(id: u64) -> Event {
    Event {
        file: "test_harness.py".to_owned(),
        line: 0,
        event_id: EventId(id),
        thread_id: None,
        kind: EventKind::TestStart { function: "test_it".to_owned(), function_id: FunctionId(0) },
    }
}

fn test_line(id: u64) -> Event {
    Event { file: "test_harness.py".to_owned(), line: 0, event_id: EventId(id), thread_id: None, kind: EventKind::TestLine }
}

fn test_end(id: u64) -> Event {
    Event {
        file: "test_harness.py".to_owned(),
        line: 0,
        event_id: EventId(id),
        thread_id: None,
        kind: EventKind::TestEnd { function: "test_it".to_owned(), function_id: FunctionId(0) },
    }
}

/// Five parts, each notifying a distinct `Line` object, with the test-end
/// checkpoint landing right at the start of the fourth part (0-indexed: 3).
fn scenario_events() -> Vec<Event> {
    vec![
        test_start(0),
        line(1, 1), // part 0
        test_line(2),
        line(2, 3), // part 1
        test_line(4),
        line(3, 5), // part 2
        test_line(6),
        line(4, 7), // part 3
        test_end(8),
        test_line(9),
        line(5, 10), // part 4
    ]
}

fn weight_of_line(factory: &Arc<CombinationFactory>, line: u32) -> f64 {
    let handle = factory
        .all()
        .into_iter()
        .find(|handle| matches!(handle.lock().identity(), Identity::Line(site) if site.line == line))
        .expect("line object exists");
    let guard = handle.lock();
    PersistedObject::from(&*guard).weight.unwrap_or(0.0)
}

#[test]
fn test_function_model_weights_the_actual_band_and_the_tail() {
    let factory = Arc::new(CombinationFactory::default());
    let run = RunId(0);
    let inner = SerialTraceModel::new(Arc::clone(&factory), run);
    let mut model = DependencyWeightModel::new(inner, DependencyModelKind::TestFunction, run);

    model
        .run(&mut EventFile::new(run, true, Arc::new(EventMapping::new()), Box::new(VecEventSource::new(scenario_events()))))
        .expect("trace drains");

    for handle in factory.all() {
        handle.lock().finalize(&[], &[run]);
    }

    assert_eq!(weight_of_line(&factory, 1), 1.0);
    assert_eq!(weight_of_line(&factory, 2), 1.0);
    assert_eq!(weight_of_line(&factory, 3), 1.0);
    assert_eq!(weight_of_line(&factory, 4), 1.0);
    assert_eq!(weight_of_line(&factory, 5), 0.5);
}

#[test]
fn test_line_model_favors_the_part_closest_to_test_end() {
    let factory = Arc::new(CombinationFactory::default());
    let run = RunId(0);
    let inner = SerialTraceModel::new(Arc::clone(&factory), run);
    let mut model = DependencyWeightModel::new(inner, DependencyModelKind::TestLine, run);

    model
        .run(&mut EventFile::new(run, true, Arc::new(EventMapping::new()), Box::new(VecEventSource::new(scenario_events()))))
        .expect("trace drains");

    for handle in factory.all() {
        handle.lock().finalize(&[], &[run]);
    }

    let weights = [
        weight_of_line(&factory, 1),
        weight_of_line(&factory, 2),
        weight_of_line(&factory, 3),
        weight_of_line(&factory, 4),
        weight_of_line(&factory, 5),
    ];

    for w in weights {
        assert!((0.0..=1.0).contains(&w), "weight {w} out of [0, 1]");
    }

    let (closest_index, closest_weight) =
        weights.iter().copied().enumerate().max_by(|(_, a), (_, b)| a.partial_cmp(b).expect("weights are finite")).expect("non-empty");
    assert_eq!(closest_index, 3, "part 4 (1-indexed), nearest the test-end checkpoint, should be heaviest");
    assert!((closest_weight - 1.0).abs() < 1e-9);
}
