// sflkit-core/src/object/evaluation.rs
// ============================================================================
// Module: Observation Outcome
// Description: Tri-valued per-(run, thread) observation outcome.
// Purpose: Distinguish observed-true, observed-false, and never-observed.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Spectrum objects only ever record [`Evaluation::True`] (a "hit"); predicate
//! objects record whichever of [`Evaluation::True`]/[`Evaluation::False`]
//! their boolean expression evaluated to. Absence from the last-evaluation
//! table is [`Evaluation::Unobserved`] and is never stored explicitly.

use serde::Deserialize;
use serde::Serialize;

/// Tri-valued outcome of evaluating an analysis object against one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Evaluation {
    /// The object's target condition held.
    True,
    /// The object's target condition did not hold.
    False,
    /// The object was never evaluated for this (run, thread).
    Unobserved,
}

impl Evaluation {
    /// Returns the XOR of a boolean value with a negation flag, as used by
    /// `ConditionFactory`'s negated/non-negated variant pair.
    #[must_use]
    pub fn from_bool_xor_negate(value: bool, negate: bool) -> Self {
        Self::from(value ^ negate)
    }

    /// Returns whether this outcome counts as "observed" for spectrum/predicate
    /// tally purposes (i.e. the target condition was seen to hold).
    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::True)
    }
}

impl From<bool> for Evaluation {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}
