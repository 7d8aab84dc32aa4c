// crates/sflkit-core/tests/parallel_def_use.rs
// ============================================================================
// Module: Parallel Def-Use Tests
// Description: Cross-thread def-use fallback when a thread observes a use
//              with no matching def of its own.
// ============================================================================
//! ## Overview
//! Covers the fourth literal end-to-end scenario: two worker threads each
//! compute `factorial(n)`. A `Def`/`Use` of `result` entirely local to one
//! thread always resolves locally. A thread with no local def of its own
//! falls back to another thread's def as a last resort.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Test-only assertions are permitted.")]

use std::sync::Arc;

use sflkit_core::event::Event;
use sflkit_core::event::EventFile;
use sflkit_core::event::EventId;
use sflkit_core::event::EventKind;
use sflkit_core::event::EventMapping;
use sflkit_core::event::RunId;
use sflkit_core::event::ThreadId;
use sflkit_core::event::TypeTag;
use sflkit_core::event::VarId;
use sflkit_core::event::VecEventSource;
use sflkit_core::factory::CombinationFactory;
use sflkit_core::object::Identity;
use sflkit_core::object::SourceSite;
use sflkit_core::trace::ParallelTraceModel;
use sflkit_core::trace::TraceModel;

const RESULT: VarId = VarId(42);

fn def(thread: u64, line: u32, id: u64) -> Event {
    Event {
        file: "factorial.py".to_owned(),
        line,
        event_id: EventId(id),
        thread_id: Some(ThreadId(thread)),
        kind: EventKind::Def {
            var: "result".to_owned(),
            var_id: RESULT,
            value: serde_json::json!(120),
            type_tag: TypeTag::Int,
        },
    }
}

fn use_(thread: u64, line: u32, id: u64) -> Event {
    Event {
        file: "factorial.py".to_owned(),
        line,
        event_id: EventId(id),
        thread_id: Some(ThreadId(thread)),
        kind: EventKind::Use { var: "result".to_owned(), var_id: RESULT },
    }
}

#[test]
fn thread_local_def_use_never_crosses_threads_when_available() {
    let factory = Arc::new(CombinationFactory::default());
    let run = RunId(0);

    let events = vec![
        def(1, 5, 0),  // thread 1 defines result
        use_(1, 6, 1), // thread 1 uses its own def
        def(2, 15, 2), // thread 2 also defines result locally
        use_(2, 16, 3), // thread 2 must resolve to its own def, not thread 1's
    ];

    let mut model = ParallelTraceModel::new(Arc::clone(&factory), run);
    model
        .run(&mut EventFile::new(run, false, Arc::new(EventMapping::new()), Box::new(VecEventSource::new(events))))
        .expect("trace drains");

    let pairs: Vec<(SourceSite, SourceSite)> = factory
        .all()
        .iter()
        .filter_map(|handle| match handle.lock().identity() {
            Identity::DefUse(def_site, use_site, _) => Some((def_site.clone(), use_site.clone())),
            _ => None,
        })
        .collect();

    assert!(pairs.contains(&(SourceSite::new("factorial.py", 5), SourceSite::new("factorial.py", 6))));
    assert!(pairs.contains(&(SourceSite::new("factorial.py", 15), SourceSite::new("factorial.py", 16))));
    assert_eq!(pairs.len(), 2);
}

#[test]
fn thread_with_no_local_def_falls_back_to_another_thread() {
    let factory = Arc::new(CombinationFactory::default());
    let run = RunId(0);

    let events = vec![
        def(1, 5, 0),   // only thread 1 ever defines result
        use_(2, 26, 1), // thread 2 has no local def, falls back to thread 1's
    ];

    let mut model = ParallelTraceModel::new(Arc::clone(&factory), run);
    model
        .run(&mut EventFile::new(run, false, Arc::new(EventMapping::new()), Box::new(VecEventSource::new(events))))
        .expect("trace drains");

    let pairs: Vec<(SourceSite, SourceSite)> = factory
        .all()
        .iter()
        .filter_map(|handle| match handle.lock().identity() {
            Identity::DefUse(def_site, use_site, _) => Some((def_site.clone(), use_site.clone())),
            _ => None,
        })
        .collect();

    assert_eq!(pairs, vec![(SourceSite::new("factorial.py", 5), SourceSite::new("factorial.py", 26))]);
}
