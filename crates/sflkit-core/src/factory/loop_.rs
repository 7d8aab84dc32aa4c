// sflkit-core/src/factory/loop_.rs
// ============================================================================
// Module: Loop Factory
// Description: Tracks per-thread loop iteration counts and classifies them.
// Purpose: Build the three Loop spectrum variants (=0, =1, >1).
// Dependencies: dashmap, parking_lot, crate::factory::registry, crate::object
// ============================================================================

//! ## Overview
//! Nested loops of the same `loop_id` (recursion, or a loop entered from
//! more than one call site) need a stack, not a single counter: `LoopBegin`
//! pushes `0`, `LoopHit` increments the top, `LoopEnd` pops and reports the
//! popped count to all three sibling objects.

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::event::model::Event;
use crate::event::model::EventKind;
use crate::event::model::RunId;
use crate::event::model::ThreadId;
use crate::factory::registry::ObjectHandle;
use crate::factory::registry::ObjectRegistry;
use crate::object::AnalysisObject;
use crate::object::CountClass;
use crate::object::Identity;
use crate::object::SourceSite;
use crate::object::SpectrumKind;
use crate::object::SpectrumObject;

const VARIANTS: [CountClass; 3] = [CountClass::Zero, CountClass::One, CountClass::Many];

/// Builds the three `Loop` objects for every distinct loop id, classifying
/// each popped iteration count into exactly one of them.
#[derive(Debug, Default)]
pub struct LoopFactory {
    registry: ObjectRegistry,
    stacks: DashMap<(RunId, ThreadId, u64), Mutex<Vec<u64>>>,
}

impl LoopFactory {
    /// Creates an empty loop factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes a `LoopBegin`/`LoopHit`/`LoopEnd` event.
    ///
    /// Returns the three canonical objects plus the classified count when
    /// `event` is a `LoopEnd` that completed a popped iteration; otherwise
    /// returns `None` (no notification due yet).
    #[must_use]
    pub fn get_analysis(&self, event: &Event, run: RunId, thread: ThreadId) -> Option<(Vec<ObjectHandle>, u64)> {
        match &event.kind {
            EventKind::LoopBegin { loop_id } => {
                self.stacks
                    .entry((run, thread, loop_id.0))
                    .or_insert_with(|| Mutex::new(Vec::new()))
                    .lock()
                    .push(0);
                None
            }
            EventKind::LoopHit { loop_id } => {
                if let Some(stack) = self.stacks.get(&(run, thread, loop_id.0)) {
                    if let Some(top) = stack.lock().last_mut() {
                        *top += 1;
                    }
                }
                None
            }
            EventKind::LoopEnd { loop_id } => {
                let count = self
                    .stacks
                    .get(&(run, thread, loop_id.0))
                    .and_then(|stack| stack.lock().pop())?;
                let site = SourceSite::new(event.file.clone(), event.line);
                let handles: Vec<ObjectHandle> = VARIANTS
                    .iter()
                    .map(|class| {
                        let identity = Identity::Loop(site.clone(), *loop_id, *class);
                        self.registry.get_or_create(identity.clone(), || {
                            AnalysisObject::Spectrum(SpectrumObject::new(identity, SpectrumKind::Loop(*class)))
                        })
                    })
                    .collect();
                Some((handles, count))
            }
            _ => None,
        }
    }

    /// Clears per-trace counter stacks for `(run, thread)`.
    pub fn reset(&self, run: RunId, thread: ThreadId) {
        self.stacks.retain(|(r, t, _), _| !(*r == run && *t == thread));
    }

    /// Returns every canonical object built so far.
    #[must_use]
    pub fn all(&self) -> Vec<ObjectHandle> {
        self.registry.all()
    }
}
