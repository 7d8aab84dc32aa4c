// sflkit-core/src/trace/serial.rs
// ============================================================================
// Module: Serial Trace Model
// Description: Single-threaded event-stream replay driving the factory layer.
// Purpose: Implement prepare/handle_event/dispatch/follow_up/finalize.
// Dependencies: crate::event, crate::factory, crate::object, crate::scope
// ============================================================================

//! ## Overview
//! `SerialTraceModel` drains one [`EventFile`] to completion, mutating a
//! single variable-scope chain as it goes and asking the
//! [`CombinationFactory`] for the canonical objects to notify on each event.
//! `TestAssert`/`TestStart`/etc. are no-ops at this layer; the weight models
//! in [`crate::weight`] wrap this trait to add dependency-model behavior on
//! the same event stream without duplicating the dispatch logic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::errors::CoreResult;
use crate::event::model::Event;
use crate::event::model::EventKind;
use crate::event::model::RunId;
use crate::event::model::ThreadId;
use crate::event::stream::EventFile;
use crate::factory::CombinationFactory;
use crate::scope::ScopeArena;
use crate::scope::ScopeId;
use crate::scope::ScopeView;

// ============================================================================
// SECTION: Trace Model Trait
// ============================================================================

/// Shared contract between the serial and parallel trace models, letting
/// the analyzer drive either uniformly.
pub trait TraceModel: Send {
    /// Resets per-trace factory scratch state and allocates fresh scopes.
    fn prepare(&mut self, event_file: &EventFile);

    /// Dispatches one already-read event. Exposed (rather than folded into
    /// `run`) so the dependency/weight models in [`crate::weight`] can
    /// interleave test-checkpoint bookkeeping around the same per-event
    /// replay without duplicating scope-threading logic.
    fn dispatch_event(&mut self, event: &Event);

    /// Per-trace finalization hook (overridden by dependency models).
    fn follow_up(&mut self, event_file: &EventFile);

    /// Returns the canonical object handles notified by the most recently
    /// dispatched event (both plain hits and, for a `LoopEnd`, the
    /// count-classified triple). Empty if the event notified nothing.
    ///
    /// Exists so [`crate::weight`]'s dependency models can attribute each
    /// event's canonical objects to the "part" they occurred in without the
    /// trace model exposing its internal factory.
    fn last_notified(&self) -> &[crate::factory::ObjectHandle];

    /// Drains `event_file` to completion, dispatching every event.
    ///
    /// # Errors
    /// Propagates any `CoreError` surfaced by the underlying event source;
    /// this aborts only the trace being drained.
    fn run(&mut self, event_file: &mut EventFile) -> CoreResult<()> {
        self.prepare(event_file);
        while let Some(event) = event_file.next_event()? {
            self.dispatch_event(&event);
        }
        self.follow_up(event_file);
        Ok(())
    }
}

// ============================================================================
// SECTION: Serial Trace Model
// ============================================================================

/// Drives one trace's event stream against the factory layer, single-threaded.
pub struct SerialTraceModel {
    factory: Arc<CombinationFactory>,
    variables: ScopeArena,
    current_scope: ScopeId,
    return_values: HashMap<String, Value>,
    thread: ThreadId,
    run: RunId,
    last_notified: Vec<crate::factory::ObjectHandle>,
}

impl SerialTraceModel {
    /// Creates a trace model over a shared factory, for run `run`.
    #[must_use]
    pub fn new(factory: Arc<CombinationFactory>, run: RunId) -> Self {
        let variables = ScopeArena::new();
        let current_scope = variables.root();
        Self {
            factory,
            variables,
            current_scope,
            return_values: HashMap::new(),
            thread: ThreadId::default(),
            run,
            last_notified: Vec::new(),
        }
    }

    /// Dispatches `event`, mutating scopes on function entry/exit/def and then
    /// asking the factory for the objects to notify.
    fn dispatch(&mut self, event: &Event) {
        match &event.kind {
            EventKind::FunctionEnter { .. } => {
                self.current_scope = self.variables.enter(self.current_scope);
                self.handle_event(event, Some(ScopeView::new(&self.variables, self.current_scope)));
            }
            EventKind::FunctionExit { function, return_value, .. } => {
                self.return_values.insert(function.clone(), return_value.clone());
                self.handle_event(event, Some(ScopeView::new(&self.variables, self.current_scope)));
                self.current_scope = self.variables.exit(self.current_scope);
            }
            EventKind::FunctionError { .. } => {
                self.handle_event(event, None);
                self.current_scope = self.variables.exit(self.current_scope);
            }
            EventKind::Def { var, value, type_tag, var_id } => {
                self.variables.add(self.current_scope, var.clone(), value.clone(), *type_tag, *var_id);
                self.handle_event(event, Some(ScopeView::new(&self.variables, self.current_scope)));
            }
            _ => self.handle_event(event, None),
        }
    }

    fn handle_event(&mut self, event: &Event, scope: Option<ScopeView<'_>>) {
        self.last_notified.clear();
        let notification = self.factory.get_analysis(event, self.run, self.thread, scope);
        for handle in notification.hits {
            handle.lock().hit(self.run, self.thread, event, scope);
            self.last_notified.push(handle);
        }
        if let Some((handles, count)) = notification.count_hit {
            for handle in handles {
                handle.lock().hit_count(self.run, self.thread, count);
                self.last_notified.push(handle);
            }
        }
    }
}

impl TraceModel for SerialTraceModel {
    fn prepare(&mut self, _event_file: &EventFile) {
        self.factory.reset(self.run, self.thread);
        self.variables = ScopeArena::new();
        self.current_scope = self.variables.root();
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
