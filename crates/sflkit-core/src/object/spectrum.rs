// sflkit-core/src/object/spectrum.rs
// ============================================================================
// Module: Spectrum Analysis Objects
// Description: Pure hit/no-hit objects — Line, Function, DefUse, Loop, Length.
// Purpose: Implement the spectrum half of the analysis object taxonomy.
// Dependencies: crate::object::{evaluation, identity, tally}, crate::event::model
// ============================================================================

//! ## Overview
//! Spectrum objects only ever ask "was I exercised, in my target sense, on
//! this (run, thread)?" — they never classify a false outcome the way a
//! predicate does, with one exception: the `Loop` and `Length` variants are
//! bucketed into mutually exclusive count classes (`=0`, `=1`, `>1`), and a
//! given hit call is a `True` for exactly one of the three sibling objects
//! and a `False` for the other two. Recording the `False` outcome (rather
//! than leaving it `Unobserved`) is required for the loop-classifier scenario
//! in the acceptance tests, where a failing run with zero iterations must
//! show `failed_observed` on the zero-variant and `failed_not_observed` (not
//! "unobserved") on the one/many variants.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::event::model::Event;
use crate::event::model::EventKind;
use crate::event::model::EventKindTag;
use crate::event::model::RunId;
use crate::event::model::ThreadId;
use crate::object::evaluation::Evaluation;
use crate::object::identity::CountClass;
use crate::object::identity::Identity;
use crate::object::tally::Observation;

// ============================================================================
// SECTION: Spectrum Kind
// ============================================================================

/// Distinguishes the five spectrum sub-families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectrumKind {
    /// Fires on `EventKind::Line`.
    Line,
    /// Fires on `EventKind::FunctionEnter`.
    Function,
    /// Fires when the def-use factory resolves a matching def for a use.
    DefUse,
    /// Fires on a classified loop iteration count.
    Loop(CountClass),
    /// Fires on a classified collection length.
    Length(CountClass),
}

impl SpectrumKind {
    /// Static list of event kinds this spectrum kind's `hit` inspects.
    #[must_use]
    pub const fn events_of_interest(self) -> &'static [EventKindTag] {
        match self {
            Self::Line => &[EventKindTag::Line],
            Self::Function => &[EventKindTag::FunctionEnter],
            Self::DefUse => &[EventKindTag::Use],
            Self::Loop(_) => &[EventKindTag::LoopEnd],
            Self::Length(_) => &[EventKindTag::Len],
        }
    }
}

// ============================================================================
// SECTION: Spectrum Object
// ============================================================================

/// A spectrum-family analysis object.
#[derive(Debug)]
pub struct SpectrumObject {
    identity: Identity,
    kind: SpectrumKind,
    observation: Observation,
}

impl SpectrumObject {
    /// Creates a new spectrum object for `identity`/`kind`.
    #[must_use]
    pub fn new(identity: Identity, kind: SpectrumKind) -> Self {
        Self {
            identity,
            kind,
            observation: Observation::new(),
        }
    }

    /// Reconstructs a spectrum object from persisted summary fields (see
    /// [`crate::object::analysis_object::PersistedObject`]), restoring
    /// finalized tallies and weight without any raw hit history.
    #[must_use]
    pub fn from_parts(identity: Identity, kind: SpectrumKind, tallies: crate::object::tally::Tallies, aggregated_weight: f64) -> Self {
        Self {
            identity,
            kind,
            observation: Observation::from_parts(tallies, aggregated_weight),
        }
    }

    /// Returns the object's canonical identity.
    #[must_use]
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Returns the event kinds this object's generic `hit` path inspects.
    #[must_use]
    pub const fn events_of_interest(&self) -> &'static [EventKindTag] {
        self.kind.events_of_interest()
    }

    /// Records an observation driven by a plain (non count-carrying) event.
    ///
    /// Used for `Line`, `Function`, and `DefUse`: reaching `hit` at all
    /// (the factory only invokes it on a genuine match) is itself the
    /// `True` outcome.
    pub fn hit(&mut self, run: RunId, thread: ThreadId, event: &Event) {
        let matches = match (self.kind, &event.kind) {
            (SpectrumKind::Line, EventKind::Line)
            | (SpectrumKind::Function, EventKind::FunctionEnter { .. })
            | (SpectrumKind::DefUse, EventKind::Use { .. }) => true,
            (SpectrumKind::Length(class), EventKind::Len { length, .. }) => {
                return self.hit_count(run, thread, *length, class);
            }
            _ => false,
        };
        if matches {
            self.observation.record(run, thread, Evaluation::True);
        }
    }

    /// Records a count-classified observation for the `Loop`/`Length`
    /// families: `True` for the sibling whose class matches `count`,
    /// `False` for the other classes of the same triple.
    ///
    /// The loop factory calls this directly (rather than through the
    /// generic event-shaped `hit`) once it has popped the final iteration
    /// count for a `LoopEnd`, since `EventKind::LoopEnd` carries no count
    /// of its own.
    pub fn hit_count(&mut self, run: RunId, thread: ThreadId, count: u64, target: CountClass) {
        let actual = classify(count);
        self.observation.record(run, thread, Evaluation::from(actual == target));
        let _ = target;
    }

    /// Returns whether any thread of `run` observed a `True` outcome.
    #[must_use]
    pub fn check_hits(&self, run: RunId) -> bool {
        self.observation.check_hits(run)
    }

    /// Finalizes pass/fail tallies and aggregated weight.
    pub fn finalize(&mut self, passed: &[RunId], failed: &[RunId]) {
        self.observation.finalize(passed, failed);
    }

    /// Read-only access to the embedded observation state.
    #[must_use]
    pub const fn observation(&self) -> &Observation {
        &self.observation
    }

    /// Mutable access, used by weight models to call `adjust_weight`.
    pub fn observation_mut(&mut self) -> &mut Observation {
        &mut self.observation
    }
}

/// Classifies a non-negative count into its `CountClass` bucket.
#[must_use]
pub const fn classify(count: u64) -> CountClass {
    match count {
        0 => CountClass::Zero,
        1 => CountClass::One,
        _ => CountClass::Many,
    }
}
