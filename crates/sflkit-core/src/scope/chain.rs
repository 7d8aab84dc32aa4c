// sflkit-core/src/scope/chain.rs
// ============================================================================
// Module: Scope Chain
// Description: Arena-allocated lexical scope chain with parent-by-index links.
// Purpose: Provide enter/exit/add/lookup over a singly-linked scope chain.
// Dependencies: crate::scope::var
// ============================================================================

//! ## Overview
//! Scopes form a chain from innermost to outermost. Rather than modeling the
//! parent edge as a shared pointer (which would require reference counting
//! and complicate the "child holds weak back-edge" relationship described by
//! the data model), nodes live in a flat arena and are addressed by
//! [`ScopeId`]; the parent edge is just another `ScopeId`. `enter`/`exit`
//! move indices, never copy node contents, and scope ids are monotonically
//! increasing by construction (the arena only ever grows).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use serde_json::Value;

use crate::event::model::TypeTag;
use crate::event::model::VarId;
use crate::scope::var::Var;

// ============================================================================
// SECTION: Scope Identifier
// ============================================================================

/// Globally unique, monotonically increasing scope identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

// ============================================================================
// SECTION: Scope Node
// ============================================================================

struct ScopeNode {
    parent: Option<ScopeId>,
    vars: HashMap<String, Var>,
}

// ============================================================================
// SECTION: Scope Arena
// ============================================================================

/// Arena owning every scope node created for one trace (or one thread's
/// share of a trace, in the parallel model).
pub struct ScopeArena {
    nodes: Vec<ScopeNode>,
}

impl ScopeArena {
    /// Creates a new arena with a single root scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![ScopeNode {
                parent: None,
                vars: HashMap::new(),
            }],
        }
    }

    /// Returns the root scope id.
    #[must_use]
    pub const fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Allocates a child scope of `current` and returns its id.
    #[must_use]
    pub fn enter(&mut self, current: ScopeId) -> ScopeId {
        let id = ScopeId(
            u32::try_from(self.nodes.len()).unwrap_or(u32::MAX),
        );
        self.nodes.push(ScopeNode {
            parent: Some(current),
            vars: HashMap::new(),
        });
        id
    }

    /// Returns the parent of `current`, or `current` itself at the root.
    ///
    /// This never errors: an unmatched function exit at the root simply
    /// collapses to the root scope rather than panicking.
    #[must_use]
    pub fn exit(&self, current: ScopeId) -> ScopeId {
        self.node(current).parent.unwrap_or(current)
    }

    /// Stores or overwrites a binding in the current node only.
    pub fn add(&mut self, current: ScopeId, name: impl Into<String>, value: Value, type_tag: TypeTag, id: VarId) {
        let name = name.into();
        let var = Var::new(name.clone(), value, type_tag, id);
        self.node_mut(current).vars.insert(name, var);
    }

    /// Walks the parent chain and returns the innermost binding for `name`.
    #[must_use]
    pub fn lookup(&self, current: ScopeId, name: &str) -> Option<&Var> {
        let mut cursor = Some(current);
        while let Some(id) = cursor {
            let node = self.node(id);
            if let Some(var) = node.vars.get(name) {
                return Some(var);
            }
            cursor = node.parent;
        }
        None
    }

    /// Convenience wrapper returning only the stored value.
    #[must_use]
    pub fn value(&self, current: ScopeId, name: &str) -> Option<&Value> {
        self.lookup(current, name).map(|var| &var.value)
    }

    /// Iterates every binding visible from `current`, innermost first, with
    /// shadowed outer bindings excluded (first occurrence of a name wins).
    #[must_use]
    pub fn all_vars(&self, current: ScopeId) -> Vec<&Var> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        let mut cursor = Some(current);
        while let Some(id) = cursor {
            let node = self.node(id);
            for var in node.vars.values() {
                if seen.insert(var.name.clone()) {
                    out.push(var);
                }
            }
            cursor = node.parent;
        }
        out
    }

    fn node(&self, id: ScopeId) -> &ScopeNode {
        &self.nodes[id.0 as usize]
    }

    fn node_mut(&mut self, id: ScopeId) -> &mut ScopeNode {
        &mut self.nodes[id.0 as usize]
    }
}

impl Default for ScopeArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_innermost_shadowing_binding() {
        let mut arena = ScopeArena::new();
        let root = arena.root();
        arena.add(root, "x", Value::from(1), TypeTag::Int, VarId(1));
        let inner = arena.enter(root);
        arena.add(inner, "x", Value::from(2), TypeTag::Int, VarId(2));

        assert_eq!(arena.value(inner, "x"), Some(&Value::from(2)));
        assert_eq!(arena.value(root, "x"), Some(&Value::from(1)));
    }

    #[test]
    fn exit_at_root_collapses_to_root() {
        let arena = ScopeArena::new();
        let root = arena.root();
        assert_eq!(arena.exit(root), root);
    }

    #[test]
    fn all_vars_excludes_shadowed_outer_bindings() {
        let mut arena = ScopeArena::new();
        let root = arena.root();
        arena.add(root, "x", Value::from(1), TypeTag::Int, VarId(1));
        arena.add(root, "y", Value::from(9), TypeTag::Int, VarId(3));
        let inner = arena.enter(root);
        arena.add(inner, "x", Value::from(2), TypeTag::Int, VarId(2));

        let names: std::collections::HashSet<&str> = arena.all_vars(inner).iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, std::collections::HashSet::from(["x", "y"]));
        assert_eq!(arena.value(inner, "x"), Some(&Value::from(2)));
    }
}
