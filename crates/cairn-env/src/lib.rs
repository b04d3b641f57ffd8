//! Discrete reset/step environment over a symbolic engine.
//!
//! [`BlocksEnv`] drives a [`SymbolicEngine`](cairn_core::SymbolicEngine)
//! through the usual RL protocol: `reset()` returns an observation and an
//! [`Info`], `step(action)` returns a [`StepResult`]. Observations and
//! actions are dense integers from the [`Enumeration`](cairn_codec::Enumeration)
//! built once at construction.
//!
//! Two variants share one control flow, selected by [`Composition`]:
//!
//! - [`Composition::Plain`]: the observation is the engine's state; each
//!   episode's target is a state index sampled uniformly.
//! - [`Composition::AgentGoal`]: the observation is the composite
//!   `agent ++ goal` state; the goal is sampled per episode from the
//!   distinct agent sub-states and stays fixed until the next reset.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod compose;
pub mod config;
pub mod env;
pub mod episode;
pub mod error;
pub mod metrics;
pub mod space;

pub use config::{Composition, ConfigError, EnvConfig, RewardConfig};
pub use env::BlocksEnv;
pub use episode::{Episode, Info, Outcome, StepResult};
pub use error::EnvError;
pub use metrics::EnvMetrics;
pub use space::Discrete;
