// sflkit-core/src/scope/var.rs
// ============================================================================
// Module: Variable Binding
// Description: A single name binding stored in a scope node.
// Purpose: Carry the last-known value/type/identity for a variable name.
// Dependencies: crate::event::model
// ============================================================================

//! ## Overview
//! A [`Var`] is the unit stored by [`super::chain::ScopeArena`] lookups. It
//! carries the value and type tag so predicate factories can build
//! `ScalarPair`/`VariablePredicate`/string-predicate objects without
//! re-reading the event that produced the binding.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::event::model::TypeTag;
use crate::event::model::VarId;

// ============================================================================
// SECTION: Variable Binding
// ============================================================================

/// A variable binding held in one scope node.
#[derive(Debug, Clone, PartialEq)]
pub struct Var {
    /// Variable name.
    pub name: String,
    /// Last-known value.
    pub value: Value,
    /// Runtime type tag of the value.
    pub type_tag: TypeTag,
    /// Stable identity of the bound runtime object.
    pub id: VarId,
}

impl Var {
    /// Creates a new variable binding.
    #[must_use]
    pub fn new(name: impl Into<String>, value: Value, type_tag: TypeTag, id: VarId) -> Self {
        Self {
            name: name.into(),
            value,
            type_tag,
            id,
        }
    }
}
