//! State/action enumeration and index codecs for Cairn environments.
//!
//! [`build()`] queries a [`SymbolicEngine`](cairn_core::SymbolicEngine)
//! once for its complete state and action sets and returns an immutable
//! [`Enumeration`]: a [`StateCodec`] (`SymbolicState ⇄ StateIndex`) and an
//! [`ActionCodec`] (`ActionIndex → Invocation`). Indices follow the
//! engine's enumeration order exactly, so the same engine always yields
//! the same codecs and the same [`fingerprint`](Enumeration::fingerprint).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod enumerate;
pub mod hash;

pub use codec::{ActionCodec, StateCodec};
pub use enumerate::{build, Enumeration};
pub use hash::enumeration_fingerprint;
