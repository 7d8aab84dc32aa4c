// sflkit-core/src/scope/mod.rs
// ============================================================================
// Module: Scope & Variable Table
// Description: Lexical scope chain holding last-known value/type per name.
// Purpose: Provide the variable context factories consult when building objects.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Scopes follow function entry/exit. Identity is by `scope_id`; equality
//! and hashing rely on it so scopes may participate in lookup tables without
//! deep comparison of their bindings.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod chain;
pub mod var;
pub mod view;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use chain::ScopeArena;
pub use chain::ScopeId;
pub use var::Var;
pub use view::ScopeView;
