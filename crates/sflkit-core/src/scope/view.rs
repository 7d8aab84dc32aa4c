// sflkit-core/src/scope/view.rs
// ============================================================================
// Module: Scope View
// Description: Read-only borrowed view over one position in a scope chain.
// Purpose: Let analysis objects read variable bindings without owning the arena.
// Dependencies: crate::scope::chain
// ============================================================================

//! ## Overview
//! Factories and analysis objects never need to mutate scope state directly;
//! they only read it when classifying a `Def`/`FunctionExit` event. A
//! [`ScopeView`] pairs the arena with the caller's current position so that
//! borrow lifetimes stay local to one `hit`/`get_analysis` call.

use serde_json::Value;

use crate::scope::chain::ScopeArena;
use crate::scope::chain::ScopeId;
use crate::scope::var::Var;

/// Borrowed, read-only view of a scope chain at one position.
#[derive(Debug, Clone, Copy)]
pub struct ScopeView<'a> {
    arena: &'a ScopeArena,
    current: ScopeId,
}

impl<'a> ScopeView<'a> {
    /// Builds a view rooted at `current` within `arena`.
    #[must_use]
    pub const fn new(arena: &'a ScopeArena, current: ScopeId) -> Self {
        Self { arena, current }
    }

    /// Returns the stored value for `name`, if bound anywhere on the chain.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&'a Value> {
        self.arena.value(self.current, name)
    }

    /// Returns the full binding for `name`, if any.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&'a Var> {
        self.arena.lookup(self.current, name)
    }

    /// Returns every variable visible from the current position.
    #[must_use]
    pub fn all_vars(&self) -> Vec<&'a Var> {
        self.arena.all_vars(self.current)
    }
}
