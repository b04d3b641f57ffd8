//! Reference collaborators for the Cairn symbolic RL adapter.
//!
//! - [`BlocksWorld`]: an in-process [`SymbolicEngine`](cairn_core::SymbolicEngine)
//!   implementing classic blocks-world stacking rules, optionally with a
//!   goal channel that enumerates `agent ++ goal` composite states.
//! - [`TextRenderer`]: a [`RenderAdapter`](cairn_core::RenderAdapter) that
//!   draws stacks as text to any [`Write`](std::io::Write) sink.
//!
//! Neither is required by the environment core; they stand in for an
//! external reasoner and a graphical display.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod render;
pub mod world;

pub use render::TextRenderer;
pub use world::{stacks, BlocksWorld, WorldError, MAX_BLOCKS};
