// sflkit-core/src/event/model.rs
// ============================================================================
// Module: Event Model
// Description: Typed event variants replayed into the trace models.
// Purpose: Provide the common event envelope and kind-specific payloads.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An `Event` is a tagged record with a common envelope (`file`, `line`,
//! `event_id`, optional `thread_id`) and a kind-specific payload. The event
//! stream decoder (out of scope for this crate) is responsible for producing
//! these values; `sflkit-core` only consumes them through [`crate::event::stream::EventSource`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Stable identifier for a single instrumentation-time event site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub u64);

/// Stable identity token for the runtime object bound to a variable name.
///
/// Aliases of the same underlying object share a `VarId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VarId(pub u64);

/// Stable identifier for an instrumented function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FunctionId(pub u64);

/// Stable identifier for an instrumented loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LoopId(pub u64);

/// Stable identifier for a branch's then/else target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BranchTargetId(pub u64);

/// Execution thread identifier, when the runtime records one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct ThreadId(pub u64);

/// Identifier of one trace (event file) within an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunId(pub u32);

// ============================================================================
// SECTION: Type Tags
// ============================================================================

/// Runtime type tag recorded alongside definitions, lengths, and return values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    /// Integer-valued.
    Int,
    /// Floating point-valued.
    Float,
    /// Boolean-valued.
    Bool,
    /// String-valued.
    Str,
    /// Bytes-valued.
    Bytes,
    /// The `None`/null sentinel.
    None,
    /// Any other runtime type not distinguished above.
    Other,
}

// ============================================================================
// SECTION: Event Kinds
// ============================================================================

/// Kind-specific payload for an [`Event`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// A source line was executed.
    Line,
    /// A branch decision point was reached.
    Branch {
        /// Identifier of the branch's "then" target.
        then_id: BranchTargetId,
        /// Identifier of the branch's "else" target.
        else_id: BranchTargetId,
        /// The branch actually taken.
        taken: BranchTargetId,
    },
    /// A variable was defined (assigned).
    Def {
        /// Variable name.
        var: String,
        /// Stable identity of the bound runtime object.
        var_id: VarId,
        /// The assigned value, as JSON.
        value: serde_json::Value,
        /// Runtime type tag of the assigned value.
        type_tag: TypeTag,
    },
    /// A variable was read.
    Use {
        /// Variable name.
        var: String,
        /// Stable identity of the bound runtime object.
        var_id: VarId,
    },
    /// A function was entered.
    FunctionEnter {
        /// Function name.
        function: String,
        /// Function identifier.
        function_id: FunctionId,
    },
    /// A function returned normally.
    FunctionExit {
        /// Function name.
        function: String,
        /// Function identifier.
        function_id: FunctionId,
        /// The returned value, as JSON.
        return_value: serde_json::Value,
        /// Runtime type tag of the returned value.
        type_tag: TypeTag,
    },
    /// A function exited via an unhandled error/exception.
    FunctionError {
        /// Function name.
        function: String,
        /// Function identifier.
        function_id: FunctionId,
    },
    /// A boolean condition expression was evaluated.
    Condition {
        /// Source text of the evaluated expression.
        expression: String,
        /// The boolean value the expression evaluated to.
        value: bool,
    },
    /// A loop was entered (iteration count starts accumulating).
    LoopBegin {
        /// Loop identifier.
        loop_id: LoopId,
    },
    /// One loop iteration completed.
    LoopHit {
        /// Loop identifier.
        loop_id: LoopId,
    },
    /// A loop was exited; the accumulated iteration count is final.
    LoopEnd {
        /// Loop identifier.
        loop_id: LoopId,
    },
    /// The length of a collection-valued variable was observed.
    Len {
        /// Variable name.
        var: String,
        /// Stable identity of the bound runtime object.
        var_id: VarId,
        /// Observed length.
        length: u64,
    },
    /// A test function started.
    TestStart {
        /// Test function name.
        function: String,
        /// Test function identifier.
        function_id: FunctionId,
    },
    /// A test function ended.
    TestEnd {
        /// Test function name.
        function: String,
        /// Test function identifier.
        function_id: FunctionId,
    },
    /// A test-harness line checkpoint (distinct from `Line` for ignorable inner calls).
    TestLine,
    /// A test-harness variable definition.
    TestDef {
        /// Variable name.
        var: String,
        /// Stable identity of the bound runtime object.
        var_id: VarId,
    },
    /// A test-harness variable use.
    TestUse {
        /// Variable name.
        var: String,
        /// Stable identity of the bound runtime object.
        var_id: VarId,
    },
    /// A test-harness assertion checkpoint.
    TestAssert,
}

impl EventKind {
    /// Returns the static discriminant used for factory event-interest matching.
    #[must_use]
    pub const fn discriminant(&self) -> EventKindTag {
        match self {
            Self::Line => EventKindTag::Line,
            Self::Branch { .. } => EventKindTag::Branch,
            Self::Def { .. } => EventKindTag::Def,
            Self::Use { .. } => EventKindTag::Use,
            Self::FunctionEnter { .. } => EventKindTag::FunctionEnter,
            Self::FunctionExit { .. } => EventKindTag::FunctionExit,
            Self::FunctionError { .. } => EventKindTag::FunctionError,
            Self::Condition { .. } => EventKindTag::Condition,
            Self::LoopBegin { .. } => EventKindTag::LoopBegin,
            Self::LoopHit { .. } => EventKindTag::LoopHit,
            Self::LoopEnd { .. } => EventKindTag::LoopEnd,
            Self::Len { .. } => EventKindTag::Len,
            Self::TestStart { .. } => EventKindTag::TestStart,
            Self::TestEnd { .. } => EventKindTag::TestEnd,
            Self::TestLine => EventKindTag::TestLine,
            Self::TestDef { .. } => EventKindTag::TestDef,
            Self::TestUse { .. } => EventKindTag::TestUse,
            Self::TestAssert => EventKindTag::TestAssert,
        }
    }
}

/// Unit discriminant for [`EventKind`], used by factories to declare interest
/// without matching on payload fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKindTag {
    /// See [`EventKind::Line`].
    Line,
    /// See [`EventKind::Branch`].
    Branch,
    /// See [`EventKind::Def`].
    Def,
    /// See [`EventKind::Use`].
    Use,
    /// See [`EventKind::FunctionEnter`].
    FunctionEnter,
    /// See [`EventKind::FunctionExit`].
    FunctionExit,
    /// See [`EventKind::FunctionError`].
    FunctionError,
    /// See [`EventKind::Condition`].
    Condition,
    /// See [`EventKind::LoopBegin`].
    LoopBegin,
    /// See [`EventKind::LoopHit`].
    LoopHit,
    /// See [`EventKind::LoopEnd`].
    LoopEnd,
    /// See [`EventKind::Len`].
    Len,
    /// See [`EventKind::TestStart`].
    TestStart,
    /// See [`EventKind::TestEnd`].
    TestEnd,
    /// See [`EventKind::TestLine`].
    TestLine,
    /// See [`EventKind::TestDef`].
    TestDef,
    /// See [`EventKind::TestUse`].
    TestUse,
    /// See [`EventKind::TestAssert`].
    TestAssert,
}

// ============================================================================
// SECTION: Event Envelope
// ============================================================================

/// A single decoded runtime event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Source file the event originated from.
    pub file: String,
    /// Source line the event originated from.
    pub line: u32,
    /// Stable event-site identifier.
    pub event_id: EventId,
    /// Thread that produced the event, when the runtime records one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<ThreadId>,
    /// Kind-specific payload.
    pub kind: EventKind,
}

impl Event {
    /// Returns the thread this event belongs to, defaulting to the main thread.
    #[must_use]
    pub fn thread(&self) -> ThreadId {
        self.thread_id.unwrap_or_default()
    }
}

// ============================================================================
// SECTION: Event Metadata
// ============================================================================

/// Static metadata recovered through [`crate::event::mapping::EventMapping`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMeta {
    /// Source file.
    pub file: String,
    /// Source line.
    pub line: u32,
    /// Variable name, when the event site concerns a variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub var: Option<String>,
    /// Function name, when the event site concerns a function.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
}
