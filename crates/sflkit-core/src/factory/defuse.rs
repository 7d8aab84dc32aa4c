// sflkit-core/src/factory/defuse.rs
// ============================================================================
// Module: Def-Use Factory
// Description: Lexically scoped per-(trace, thread) def table with cross-
//              thread fallback.
// Purpose: Build DefUse spectrum objects linking a use back to its def.
// Dependencies: dashmap, parking_lot, crate::factory::registry, crate::object
// ============================================================================

//! ## Overview
//! `FunctionEnter` pushes a child def-table frame on the current thread's
//! stack; `FunctionExit`/`FunctionError` pops it. A `Def` records
//! `(var, var_id) → def-site` in the current frame. A `Use` searches the
//! current thread's frames innermost-to-outermost first; only when nothing
//! matches there does it fall back to another thread's frames (see Open
//! Question (c): cross-thread fallback is a last resort, never preferred
//! over a current-thread binding, even an outer one).

use std::collections::HashMap;

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::event::model::Event;
use crate::event::model::EventKind;
use crate::event::model::RunId;
use crate::event::model::ThreadId;
use crate::event::model::VarId;
use crate::factory::registry::ObjectHandle;
use crate::factory::registry::ObjectRegistry;
use crate::object::AnalysisObject;
use crate::object::Identity;
use crate::object::SourceSite;
use crate::object::SpectrumKind;
use crate::object::SpectrumObject;

type DefTable = HashMap<VarId, SourceSite>;

/// Builds `DefUse` objects linking a `Use` back to the `Def` it reads.
#[derive(Debug, Default)]
pub struct DefUseFactory {
    registry: ObjectRegistry,
    stacks: DashMap<(RunId, ThreadId), Mutex<Vec<DefTable>>>,
}

impl DefUseFactory {
    /// Creates an empty def-use factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn stack_for(&self, run: RunId, thread: ThreadId) -> dashmap::mapref::one::RefMut<'_, (RunId, ThreadId), Mutex<Vec<DefTable>>> {
        self.stacks
            .entry((run, thread))
            .or_insert_with(|| Mutex::new(vec![DefTable::new()]))
    }

    /// Pushes a child def-table frame on function entry.
    pub fn on_function_enter(&self, run: RunId, thread: ThreadId) {
        self.stack_for(run, thread).lock().push(DefTable::new());
    }

    /// Pops the current def-table frame on function exit/error.
    pub fn on_function_exit(&self, run: RunId, thread: ThreadId) {
        let stack = self.stack_for(run, thread);
        let mut guard = stack.lock();
        if guard.len() > 1 {
            guard.pop();
        }
    }

    /// Records a `Def` in the current frame, or resolves a matching `DefUse`
    /// object for a `Use`.
    #[must_use]
    pub fn get_analysis(&self, event: &Event, run: RunId, thread: ThreadId) -> Vec<ObjectHandle> {
        match &event.kind {
            EventKind::Def { var_id, .. } => {
                let site = SourceSite::new(event.file.clone(), event.line);
                let stack = self.stack_for(run, thread);
                if let Some(frame) = stack.lock().last_mut() {
                    frame.insert(*var_id, site);
                }
                Vec::new()
            }
            EventKind::Use { var, var_id } => {
                let use_site = SourceSite::new(event.file.clone(), event.line);
                let def_site = self
                    .find_in_thread(run, thread, *var_id)
                    .or_else(|| self.find_in_other_threads(run, thread, *var_id));
                let Some(def_site) = def_site else {
                    return Vec::new();
                };
                let identity = Identity::DefUse(def_site, use_site, var.clone());
                vec![self
                    .registry
                    .get_or_create(identity.clone(), || AnalysisObject::Spectrum(SpectrumObject::new(identity, SpectrumKind::DefUse)))]
            }
            _ => Vec::new(),
        }
    }

    fn find_in_thread(&self, run: RunId, thread: ThreadId, var_id: VarId) -> Option<SourceSite> {
        let stack = self.stack_for(run, thread);
        let guard = stack.lock();
        guard.iter().rev().find_map(|frame| frame.get(&var_id).cloned())
    }

    fn find_in_other_threads(&self, run: RunId, thread: ThreadId, var_id: VarId) -> Option<SourceSite> {
        self.stacks.iter().find_map(|entry| {
            let (&(r, t), stack) = (entry.key(), entry.value());
            if r != run || t == thread {
                return None;
            }
            stack.lock().iter().rev().find_map(|frame| frame.get(&var_id).cloned())
        })
    }

    /// Clears per-trace def-table state for `(run, thread)`.
    pub fn reset(&self, run: RunId, thread: ThreadId) {
        self.stacks.remove(&(run, thread));
    }

    /// Returns every canonical object built so far.
    #[must_use]
    pub fn all(&self) -> Vec<ObjectHandle> {
        self.registry.all()
    }
}
