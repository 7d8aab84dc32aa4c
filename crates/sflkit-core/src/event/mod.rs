// sflkit-core/src/event/mod.rs
// ============================================================================
// Module: Event Model
// Description: Typed event variants, the event-id mapping, and the stream loader.
// Purpose: Provide the single point of contact with the out-of-scope event codec.
// Dependencies: serde, serde_json, md5
// ============================================================================

//! ## Overview
//! Events reach `sflkit-core` already decoded; this module owns their typed
//! representation, the immutable id→metadata mapping, and the scoped,
//! non-restartable iteration contract the trace models consume.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod mapping;
pub mod model;
pub mod stream;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use mapping::EventMapping;
pub use model::BranchTargetId;
pub use model::Event;
pub use model::EventId;
pub use model::EventKind;
pub use model::EventKindTag;
pub use model::EventMeta;
pub use model::FunctionId;
pub use model::LoopId;
pub use model::RunId;
pub use model::ThreadId;
pub use model::TypeTag;
pub use model::VarId;
pub use stream::EventFile;
pub use stream::EventSource;
pub use stream::VecEventSource;
