//! Runtime errors of the environment.

use std::error::Error;
use std::fmt;

use cairn_core::{EngineError, UnknownStateError};

/// Errors from `reset()`, `step()` and `render()` on a live environment.
///
/// An illegal action is not an error: it is reported as
/// [`Outcome::Illegal`](crate::Outcome::Illegal) in the step result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnvError {
    /// `step()` or `render()` was called before the first `reset()`.
    ResetNeeded,
    /// The environment has been closed.
    Closed,
    /// The action index is outside the action space.
    ActionOutOfRange {
        /// The rejected index.
        action: u32,
        /// Size of the action space.
        action_count: u32,
    },
    /// The engine reported a state that was never enumerated.
    UnknownState(UnknownStateError),
    /// Resetting the world or reading its state failed.
    Engine(EngineError),
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResetNeeded => write!(f, "environment must be reset before stepping"),
            Self::Closed => write!(f, "environment is closed"),
            Self::ActionOutOfRange {
                action,
                action_count,
            } => write!(
                f,
                "action {action} out of range (action space has {action_count} actions)"
            ),
            Self::UnknownState(e) => write!(f, "{e}"),
            Self::Engine(e) => write!(f, "engine failure: {e}"),
        }
    }
}

impl Error for EnvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnknownState(e) => Some(e),
            Self::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<UnknownStateError> for EnvError {
    fn from(e: UnknownStateError) -> Self {
        Self::UnknownState(e)
    }
}

impl From<EngineError> for EnvError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}
