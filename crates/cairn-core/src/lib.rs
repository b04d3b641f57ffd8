//! Core types and traits for the Cairn symbolic RL adapter.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the rest of the workspace: opaque symbolic
//! descriptors, dense index types, the error taxonomy, and the two
//! collaborator traits ([`SymbolicEngine`] and [`RenderAdapter`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod symbol;
pub mod traits;

pub use error::{EngineError, EnumerationError, RenderError, UnknownStateError};
pub use id::{ActionIndex, StateIndex};
pub use symbol::{ActionArgs, ActionSpec, Invocation, SymbolicState};
pub use traits::{RenderAdapter, SymbolicEngine};
