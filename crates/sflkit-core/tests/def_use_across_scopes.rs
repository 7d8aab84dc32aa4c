// crates/sflkit-core/tests/def_use_across_scopes.rs
// ============================================================================
// Module: Def-Use Across Scopes Tests
// Description: A use inside a nested function scope must resolve to the
//              innermost reaching def, not an outer shadowed one.
// ============================================================================
//! ## Overview
//! Covers the third literal end-to-end scenario: `Def(x, scope0)`,
//! `FunctionEnter`, `Def(x, scope1)`, `Use(x)`, `FunctionExit`, `Use(x)`.
//! The first `Use` must resolve to the inner `Def`; the second, after the
//! function has exited and its frame popped, must resolve to the outer one.
//! The two resulting `DefUse` pairs are distinct objects keyed by their
//! different def-sites.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Test-only assertions are permitted.")]

use std::sync::Arc;

use sflkit_core::event::Event;
use sflkit_core::event::EventFile;
use sflkit_core::event::EventId;
use sflkit_core::event::EventKind;
use sflkit_core::event::EventMapping;
use sflkit_core::event::FunctionId;
use sflkit_core::event::RunId;
use sflkit_core::event::VarId;
use sflkit_core::event::VecEventSource;
use sflkit_core::factory::CombinationFactory;
use sflkit_core::object::Identity;
use sflkit_core::object::SourceSite;
use sflkit_core::trace::SerialTraceModel;
use sflkit_core::trace::TraceModel;

const VAR_X: VarId = VarId(1);

fn def(line: u32, id: u64) -> Event {
    Event {
        file: "program.py".to_owned(),
        line,
        event_id: EventId(id),
        thread_id: None,
        kind: EventKind::Def {
            var: "x".to_owned(),
            var_id: VAR_X,
            value: serde_json::json!(1),
            type_tag: sflkit_core::event::TypeTag::Int,
        },
    }
}

fn use_(line: u32, id: u64) -> Event {
    Event {
        file: "program.py".to_owned(),
        line,
        event_id: EventId(id),
        thread_id: None,
        kind: EventKind::Use { var: "x".to_owned(), var_id: VAR_X },
    }
}

fn enter(line: u32, id: u64) -> Event {
    Event {
        file: "program.py".to_owned(),
        line,
        event_id: EventId(id),
        thread_id: None,
        kind: EventKind::FunctionEnter { function: "inner".to_owned(), function_id: FunctionId(0) },
    }
}

fn exit(line: u32, id: u64) -> Event {
    Event {
        file: "program.py".to_owned(),
        line,
        event_id: EventId(id),
        thread_id: None,
        kind: EventKind::FunctionExit {
            function: "inner".to_owned(),
            function_id: FunctionId(0),
            return_value: serde_json::Value::Null,
            type_tag: sflkit_core::event::TypeTag::None,
        },
    }
}

#[test]
fn nested_use_resolves_innermost_then_outer_def() {
    let factory = Arc::new(CombinationFactory::default());
    let run = RunId(0);
    let events = vec![
        def(1, 0),   // Def(x, scope0)
        enter(2, 1), // FunctionEnter
        def(3, 2),   // Def(x, scope1)
        use_(4, 3),  // Use(x) -> resolves to scope1's def (line 3)
        exit(5, 4),  // FunctionExit
        use_(6, 5),  // Use(x) -> resolves to scope0's def (line 1)
    ];

    let mut model = SerialTraceModel::new(Arc::clone(&factory), run);
    model
        .run(&mut EventFile::new(run, false, Arc::new(EventMapping::new()), Box::new(VecEventSource::new(events))))
        .expect("trace drains");

    let handles = factory.all();
    let mut pairs: Vec<(SourceSite, SourceSite)> = handles
        .iter()
        .filter_map(|handle| match handle.lock().identity() {
            Identity::DefUse(def_site, use_site, _) => Some((def_site.clone(), use_site.clone())),
            _ => None,
        })
        .collect();
    pairs.sort_by_key(|(def_site, _)| def_site.line);

    assert_eq!(pairs.len(), 2, "expected two distinct DefUse pairs, got {pairs:?}");
    assert_eq!(pairs[0], (SourceSite::new("program.py", 3), SourceSite::new("program.py", 4)));
    assert_eq!(pairs[1], (SourceSite::new("program.py", 1), SourceSite::new("program.py", 6)));
}
