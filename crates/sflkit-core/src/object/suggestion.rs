// sflkit-core/src/object/suggestion.rs
// ============================================================================
// Module: Suggestions & Source Location
// Description: Ranked output unit plus the syntactic source-finder seam.
// Purpose: Let analysis objects produce line-level suggestions without this
//          crate owning a source parser.
// Dependencies: none
// ============================================================================

//! ## Overview
//! `get_suggestion` needs more than a single line for `Function`, `Loop`, and
//! `FunctionError` objects (the whole enclosing block is the suggestion) and
//! needs the *other* side's lines for a `Branch` object scored by
//! `IncreaseFalse`. Resolving source text into line ranges is a syntactic
//! concern this crate does not own; callers supply a [`SourceLocator`].

use std::collections::BTreeSet;

// ============================================================================
// SECTION: Source Location
// ============================================================================

/// One concrete line in one file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLine {
    /// Source file.
    pub file: String,
    /// Source line.
    pub line: u32,
}

impl SourceLine {
    /// Creates a new source line reference.
    #[must_use]
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

// ============================================================================
// SECTION: Suggestion
// ============================================================================

/// A ranked suggestion: the lines implicated and their suspiciousness score.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    /// Implicated source lines.
    pub locations: Vec<SourceLine>,
    /// Suspiciousness score backing this suggestion.
    pub score: f64,
}

impl Suggestion {
    /// Builds a single-location suggestion.
    #[must_use]
    pub fn single(location: SourceLine, score: f64) -> Self {
        Self {
            locations: vec![location],
            score,
        }
    }

    /// Builds a multi-location suggestion, deduping and sorting lines.
    #[must_use]
    pub fn multi(locations: Vec<SourceLine>, score: f64) -> Self {
        let set: BTreeSet<SourceLine> = locations.into_iter().collect();
        Self {
            locations: set.into_iter().collect(),
            score,
        }
    }
}

// ============================================================================
// SECTION: Source Locator
// ============================================================================

/// Which side of a branch decision a locator is asked to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchSide {
    /// The side actually identified by the object's own `then_id`.
    Own,
    /// The sibling side — used when scoring by `IncreaseFalse`.
    Other,
}

/// Syntactic source-finder seam: resolves a block or branch side into the
/// concrete lines it spans. Implemented outside this crate by whatever
/// understands the instrumented language's grammar.
pub trait SourceLocator: Send + Sync {
    /// Returns every line in the block (function or loop body) that starts
    /// at `file:line`, inclusive of the header line itself.
    fn block_lines(&self, file: &str, line: u32) -> Vec<u32>;

    /// Returns the lines belonging to one side of a branch at `file:line`.
    fn branch_lines(&self, file: &str, line: u32, side: BranchSide) -> Vec<u32>;
}

/// A locator that never resolves anything beyond the triggering line,
/// suitable for callers that have not wired in a real source parser (e.g.
/// unit tests exercising scoring logic in isolation).
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleLineLocator;

impl SourceLocator for SingleLineLocator {
    fn block_lines(&self, _file: &str, line: u32) -> Vec<u32> {
        vec![line]
    }

    fn branch_lines(&self, _file: &str, line: u32, _side: BranchSide) -> Vec<u32> {
        vec![line]
    }
}
