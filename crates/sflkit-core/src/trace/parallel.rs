// sflkit-core/src/trace/parallel.rs
// ============================================================================
// Module: Parallel Trace Model
// Description: Per-thread variable scopes layered over one shared arena.
// Purpose: Extend the serial model with thread-aware function enter/exit.
// Dependencies: crate::event, crate::factory, crate::object, crate::scope
// ============================================================================

//! ## Overview
//! A single [`ScopeArena`] is shared across all threads of one trace; each
//! thread tracks only its own current position (`ScopeId`) within it. A
//! thread observed for the first time starts positioned at the main
//! thread's current scope — "enter pushes a child of the thread's current
//! scope, or the main scope if new" — so a freshly spawned worker inherits
//! whatever was in scope on the main thread at spawn time, rather than
//! starting from an unrelated empty root.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::event::model::Event;
use crate::event::model::EventKind;
use crate::event::model::RunId;
use crate::event::model::ThreadId;
use crate::event::stream::EventFile;
use crate::factory::CombinationFactory;
use crate::scope::ScopeArena;
use crate::scope::ScopeId;
use crate::scope::ScopeView;
use crate::trace::serial::TraceModel;

/// Drives one trace's event stream against the factory layer, threading
/// `thread_id` through scope resolution.
pub struct ParallelTraceModel {
    factory: Arc<CombinationFactory>,
    variables: ScopeArena,
    positions: HashMap<ThreadId, ScopeId>,
    return_values: HashMap<String, Value>,
    run: RunId,
    last_notified: Vec<crate::factory::ObjectHandle>,
}

impl ParallelTraceModel {
    /// Creates a trace model over a shared factory, for run `run`.
    #[must_use]
    pub fn new(factory: Arc<CombinationFactory>, run: RunId) -> Self {
        let variables = ScopeArena::new();
        let root = variables.root();
        let mut positions = HashMap::new();
        positions.insert(ThreadId::default(), root);
        Self {
            factory,
            variables,
            positions,
            return_values: HashMap::new(),
            run,
            last_notified: Vec::new(),
        }
    }

    fn position(&mut self, thread: ThreadId) -> ScopeId {
        if let Some(&pos) = self.positions.get(&thread) {
            return pos;
        }
        let main = *self.positions.get(&ThreadId::default()).unwrap_or(&self.variables.root());
        self.positions.insert(thread, main);
        main
    }

    fn dispatch(&mut self, event: &Event) {
        let thread = event.thread();
        match &event.kind {
            EventKind::FunctionEnter { .. } => {
                let current = self.position(thread);
                let child = self.variables.enter(current);
                self.positions.insert(thread, child);
                self.handle_event(event, thread, Some(ScopeView::new(&self.variables, child)));
            }
            EventKind::FunctionExit { function, return_value, .. } => {
                self.return_values.insert(function.clone(), return_value.clone());
                let current = self.position(thread);
                self.handle_event(event, thread, Some(ScopeView::new(&self.variables, current)));
                let parent = self.variables.exit(current);
                self.positions.insert(thread, parent);
            }
            EventKind::FunctionError { .. } => {
                self.handle_event(event, thread, None);
                let current = self.position(thread);
                let parent = self.variables.exit(current);
                self.positions.insert(thread, parent);
            }
            EventKind::Def { var, value, type_tag, var_id } => {
                let current = self.position(thread);
                self.variables.add(current, var.clone(), value.clone(), *type_tag, *var_id);
                self.handle_event(event, thread, Some(ScopeView::new(&self.variables, current)));
            }
            _ => self.handle_event(event, thread, None),
        }
    }

    fn handle_event(&mut self, event: &Event, thread: ThreadId, scope: Option<ScopeView<'_>>) {
        self.last_notified.clear();
        let notification = self.factory.get_analysis(event, self.run, thread, scope);
        for handle in notification.hits {
            handle.lock().hit(self.run, thread, event, scope);
            self.last_notified.push(handle);
        }
        if let Some((handles, count)) = notification.count_hit {
            for handle in handles {
                handle.lock().hit_count(self.run, thread, count);
                self.last_notified.push(handle);
            }
        }
    }
}

impl TraceModel for ParallelTraceModel {
    fn prepare(&mut self, _event_file: &EventFile) {
        let threads: Vec<ThreadId> = self.positions.keys().copied().collect();
        for thread in threads {
            self.factory.reset(self.run, thread);
        }
        self.variables = ScopeArena::new();
        self.positions = HashMap::new();
        self.positions.insert(ThreadId::default(), self.variables.root());
        self.return_values.clear();
    }

    fn dispatch_event(&mut self, event: &Event) {
        self.dispatch(event);
    }

    fn follow_up(&mut self, _event_file: &EventFile) {}

    fn last_notified(&self) -> &[crate::factory::ObjectHandle] {
        &self.last_notified
    }
}
