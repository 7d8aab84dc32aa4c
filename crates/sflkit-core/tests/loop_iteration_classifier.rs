// crates/sflkit-core/tests/loop_iteration_classifier.rs
// ============================================================================
// Module: Loop Iteration Classifier Tests
// Description: A loop executing 5 times in a failing run and 0 times in a
//              passing run must classify into disjoint `Loop` variants.
// ============================================================================
//! ## Overview
//! Covers the second literal end-to-end scenario. `Loop(>1)` must evaluate
//! `TRUE` on the failing run (5 iterations) and `FALSE` on the passing run
//! (0 iterations); `Loop(=0)` is the exact inverse; `Loop(=1)` evaluates
//! `FALSE` on both since neither run iterates exactly once.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Test-only assertions are permitted.")]

use std::sync::Arc;

use sflkit_core::event::Event;
use sflkit_core::event::EventFile;
use sflkit_core::event::EventId;
use sflkit_core::event::EventKind;
use sflkit_core::event::EventMapping;
use sflkit_core::event::LoopId;
use sflkit_core::event::RunId;
use sflkit_core::event::VecEventSource;
use sflkit_core::factory::CombinationFactory;
use sflkit_core::object::CountClass;
use sflkit_core::object::Identity;
use sflkit_core::trace::SerialTraceModel;
use sflkit_core::trace::TraceModel;

fn loop_events(hits: u32) -> Vec<Event> {
    let mut id = 0u64;
    let mut events = vec![Event {
        file: "program.py".to_owned(),
        line: 20,
        event_id: EventId(id),
        thread_id: None,
        kind: EventKind::LoopBegin { loop_id: LoopId(0) },
    }];
    for _ in 0..hits {
        id += 1;
        events.push(Event {
            file: "program.py".to_owned(),
            line: 20,
            event_id: EventId(id),
            thread_id: None,
            kind: EventKind::LoopHit { loop_id: LoopId(0) },
        });
    }
    id += 1;
    events.push(Event {
        file: "program.py".to_owned(),
        line: 20,
        event_id: EventId(id),
        thread_id: None,
        kind: EventKind::LoopEnd { loop_id: LoopId(0) },
    });
    events
}

fn event_file(run: RunId, failing: bool, events: Vec<Event>) -> EventFile {
    EventFile::new(run, failing, Arc::new(EventMapping::new()), Box::new(VecEventSource::new(events)))
}

#[test]
fn loop_classes_are_mutually_exclusive_across_runs() {
    let factory = Arc::new(CombinationFactory::default());
    let failing_run = RunId(0);
    let passing_run = RunId(1);

    let mut failing_model = SerialTraceModel::new(Arc::clone(&factory), failing_run);
    failing_model.run(&mut event_file(failing_run, true, loop_events(5))).expect("failing trace drains");

    let mut passing_model = SerialTraceModel::new(Arc::clone(&factory), passing_run);
    passing_model.run(&mut event_file(passing_run, false, loop_events(0))).expect("passing trace drains");

    for handle in factory.all() {
        handle.lock().finalize(&[passing_run], &[failing_run]);
    }

    let check = |class: CountClass, run: RunId| -> bool {
        factory
            .all()
            .into_iter()
            .find(|handle| matches!(handle.lock().identity(), Identity::Loop(_, _, c) if *c == class))
            .expect("loop object for class exists")
            .lock()
            .check_hits(run)
    };

    assert!(check(CountClass::Many, failing_run));
    assert!(!check(CountClass::Many, passing_run));

    assert!(!check(CountClass::Zero, failing_run));
    assert!(check(CountClass::Zero, passing_run));

    assert!(!check(CountClass::One, failing_run));
    assert!(!check(CountClass::One, passing_run));
}
