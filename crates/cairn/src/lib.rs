//! Cairn: symbolic blocks-world puzzles as discrete RL environments.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Cairn sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use cairn::prelude::*;
//!
//! let world = BlocksWorld::new(3).unwrap();
//! let mut env = BlocksEnv::new(Box::new(world), EnvConfig::default()).unwrap();
//! assert_eq!(env.observation_space().n(), 13);
//! assert_eq!(env.action_space().n(), 18);
//!
//! let (obs, info) = env.reset(Some(42)).unwrap();
//! assert_eq!(obs, StateIndex(0));
//! assert!(env.observation_space().contains(info.target.0));
//!
//! // move(a,b,c) is illegal from the all-on-table start.
//! let result = env.step(ActionIndex(0)).unwrap();
//! assert_eq!(result.info.outcome, Some(Outcome::Illegal));
//! assert_eq!(result.observation, obs);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `cairn-core` | Indices, symbolic states, actions, engine and render traits |
//! | [`codec`] | `cairn-codec` | Enumeration builder and state/action codecs |
//! | [`env`] | `cairn-env` | The reset/step environment and its configuration |
//! | [`blocks`] | `cairn-blocks` | Reference blocks-world engine and text renderer |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`cairn-core`).
///
/// Implement [`types::SymbolicEngine`] to connect an engine, and
/// [`types::RenderAdapter`] to draw episodes.
pub use cairn_core as types;

/// Enumeration and index codecs (`cairn-codec`).
pub use cairn_codec as codec;

/// The environment (`cairn-env`).
///
/// [`env::BlocksEnv`] is configured by [`env::EnvConfig`]; choose the
/// observation layout with [`env::Composition`].
pub use cairn_env as env;

/// Reference engine and renderer (`cairn-blocks`).
pub use cairn_blocks as blocks;

/// Common imports for typical Cairn usage.
///
/// ```rust
/// use cairn::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use cairn_core::{
        ActionIndex, ActionSpec, Invocation, RenderAdapter, StateIndex, SymbolicEngine,
        SymbolicState,
    };

    // Errors
    pub use cairn_core::{EngineError, EnumerationError, RenderError, UnknownStateError};

    // Codec
    pub use cairn_codec::{build, ActionCodec, Enumeration, StateCodec};

    // Environment
    pub use cairn_env::{
        BlocksEnv, Composition, ConfigError, Discrete, EnvConfig, EnvError, EnvMetrics, Info,
        Outcome, RewardConfig, StepResult,
    };

    // Reference engine
    pub use cairn_blocks::{BlocksWorld, TextRenderer};
}
