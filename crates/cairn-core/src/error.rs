//! Error types shared across the Cairn workspace.
//!
//! Split by failure class: [`EngineError`] for round-trips to the
//! symbolic engine, [`EnumerationError`] for the one-shot construction
//! queries, [`UnknownStateError`] for states outside the enumeration, and
//! [`RenderError`] for the render adapter. An illegal action is not an
//! error; the environment reports it as a step outcome.

use std::error::Error;
use std::fmt;

use crate::symbol::SymbolicState;

/// Failures of a single request/response exchange with the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// The engine connection could not be established or was lost.
    Unavailable {
        /// Description of the connection failure.
        reason: String,
    },
    /// The engine answered, but the query failed.
    QueryFailed {
        /// The query that failed, in the engine's syntax.
        query: String,
        /// Human-readable description of the failure.
        reason: String,
    },
    /// The engine's answer (or the request) could not be interpreted.
    Malformed {
        /// Description of what could not be parsed.
        detail: String,
    },
    /// The engine connection has already been shut down.
    ShutDown,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { reason } => write!(f, "engine unavailable: {reason}"),
            Self::QueryFailed { query, reason } => {
                write!(f, "engine query '{query}' failed: {reason}")
            }
            Self::Malformed { detail } => write!(f, "malformed engine exchange: {detail}"),
            Self::ShutDown => write!(f, "engine connection is shut down"),
        }
    }
}

impl Error for EngineError {}

/// Fatal errors while enumerating states and actions at construction.
///
/// Never retried. The caller should abandon construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnumerationError {
    /// The engine could not answer an enumeration query.
    Engine(EngineError),
    /// The state enumeration was empty.
    NoStates,
    /// The action enumeration was empty.
    NoActions,
    /// The engine listed the same state twice.
    DuplicateState {
        /// The repeated state.
        state: SymbolicState,
        /// Position of the first occurrence.
        first: usize,
        /// Position of the repeat.
        repeat: usize,
    },
    /// Two enumerated actions render to the same invocation.
    DuplicateAction {
        /// The repeated invocation text.
        invocation: String,
        /// Position of the first occurrence.
        first: usize,
        /// Position of the repeat.
        repeat: usize,
    },
    /// More entries than a `u32` index can address.
    TooLarge {
        /// `"states"` or `"actions"`.
        what: &'static str,
        /// The number of entries returned.
        count: usize,
    },
}

impl fmt::Display for EnumerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Engine(e) => write!(f, "enumeration query failed: {e}"),
            Self::NoStates => write!(f, "engine enumerated no states"),
            Self::NoActions => write!(f, "engine enumerated no actions"),
            Self::DuplicateState {
                state,
                first,
                repeat,
            } => write!(
                f,
                "state '{state}' enumerated twice (positions {first} and {repeat})"
            ),
            Self::DuplicateAction {
                invocation,
                first,
                repeat,
            } => write!(
                f,
                "action '{invocation}' enumerated twice (positions {first} and {repeat})"
            ),
            Self::TooLarge { what, count } => {
                write!(f, "{count} {what} exceed the u32 index range")
            }
        }
    }
}

impl Error for EnumerationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EngineError> for EnumerationError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}

/// The engine reported a configuration that was never enumerated.
///
/// Signals that the engine's transition rules reach states outside the
/// enumerated set. Never coerced to an arbitrary index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownStateError {
    /// The unrecognised state.
    pub state: SymbolicState,
}

impl fmt::Display for UnknownStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "state '{}' is not in the enumeration", self.state)
    }
}

impl Error for UnknownStateError {}

/// Failures reported by a render adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderError {
    /// The adapter's surface is closed and was not reopened.
    Closed,
    /// The drawing backend failed.
    Backend {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "render surface is closed"),
            Self::Backend { reason } => write!(f, "render backend failed: {reason}"),
        }
    }
}

impl Error for RenderError {}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        Self::Backend {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumeration_error_chains_engine_source() {
        let err = EnumerationError::from(EngineError::Unavailable {
            reason: "refused".into(),
        });
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "enumeration query failed: engine unavailable: refused"
        );
    }

    #[test]
    fn duplicate_state_names_both_positions() {
        let err = EnumerationError::DuplicateState {
            state: SymbolicState::new("000"),
            first: 0,
            repeat: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("'000'"));
        assert!(msg.contains("0 and 4"));
    }

    #[test]
    fn io_error_becomes_backend_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        assert!(matches!(
            RenderError::from(io),
            RenderError::Backend { .. }
        ));
    }
}
