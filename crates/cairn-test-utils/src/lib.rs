//! Test utilities and mock collaborators for Cairn development.
//!
//! Provides a [`ScriptedEngine`] implementing [`SymbolicEngine`] from an
//! explicit transition table, and a [`RecordingRenderer`] implementing
//! [`RenderAdapter`] that records every call. Both expose a shared log
//! handle so tests can inspect them after moving them into an environment.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use cairn_core::{
    ActionSpec, EngineError, Invocation, RenderAdapter, RenderError, SymbolicEngine,
    SymbolicState,
};

pub use fixtures::{composite_scenario, three_state_scenario, COMPOSITE_AGENT_WIDTH};

/// One request received by a [`ScriptedEngine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineCall {
    EnumerateStates,
    EnumerateActions,
    ResetWorld,
    CurrentState,
    ApplyAction(String),
    Shutdown,
}

/// Shared, cloneable record of calls made against a mock.
#[derive(Clone, Debug)]
pub struct CallLog<T> {
    inner: Arc<Mutex<Vec<T>>>,
}

impl<T: Clone> CallLog<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        // A panicking test poisons the lock; the data is still usable.
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn push(&self, call: T) {
        self.lock().push(call);
    }

    /// Snapshot of all recorded calls, oldest first.
    pub fn calls(&self) -> Vec<T> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

/// A [`SymbolicEngine`] driven by an explicit transition table.
///
/// Transitions are keyed by `(current state, invocation)`. A wildcard
/// transition applies from any state. An invocation with no matching
/// transition is rejected as illegal. The enumerated states need not
/// contain the states the engine reports, which is how tests provoke
/// unknown-state and composite scenarios.
pub struct ScriptedEngine {
    states: Vec<SymbolicState>,
    actions: Vec<ActionSpec>,
    start: SymbolicState,
    current: SymbolicState,
    transitions: HashMap<(Option<SymbolicState>, String), SymbolicState>,
    unavailable: bool,
    fail_apply: bool,
    fail_current: bool,
    fail_shutdown: bool,
    shut_down: bool,
    log: CallLog<EngineCall>,
}

impl ScriptedEngine {
    pub fn new(states: &[&str], actions: Vec<ActionSpec>, start: &str) -> Self {
        Self {
            states: states.iter().map(|s| SymbolicState::new(*s)).collect(),
            actions,
            start: SymbolicState::new(start),
            current: SymbolicState::new(start),
            transitions: HashMap::new(),
            unavailable: false,
            fail_apply: false,
            fail_current: false,
            fail_shutdown: false,
            shut_down: false,
            log: CallLog::new(),
        }
    }

    /// Accept `invocation` in state `from`, moving to `to`.
    pub fn transition(mut self, from: &str, invocation: &str, to: &str) -> Self {
        self.transitions.insert(
            (Some(SymbolicState::new(from)), invocation.to_string()),
            SymbolicState::new(to),
        );
        self
    }

    /// Accept `invocation` from any state, moving to `to`.
    pub fn transition_any(mut self, invocation: &str, to: &str) -> Self {
        self.transitions
            .insert((None, invocation.to_string()), SymbolicState::new(to));
        self
    }

    /// Every query fails as if the engine could not be reached.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// `apply_action` fails with a query error instead of answering.
    pub fn failing_apply(mut self) -> Self {
        self.fail_apply = true;
        self
    }

    /// `current_state` fails with a query error.
    pub fn failing_current_state(mut self) -> Self {
        self.fail_current = true;
        self
    }

    /// `shutdown` fails.
    pub fn failing_shutdown(mut self) -> Self {
        self.fail_shutdown = true;
        self
    }

    /// Handle to this engine's call log.
    pub fn call_log(&self) -> CallLog<EngineCall> {
        self.log.clone()
    }

    fn check(&self) -> Result<(), EngineError> {
        if self.unavailable {
            return Err(EngineError::Unavailable {
                reason: "scripted engine is unavailable".into(),
            });
        }
        if self.shut_down {
            return Err(EngineError::ShutDown);
        }
        Ok(())
    }
}

impl SymbolicEngine for ScriptedEngine {
    fn enumerate_states(&mut self) -> Result<Vec<SymbolicState>, EngineError> {
        self.log.push(EngineCall::EnumerateStates);
        self.check()?;
        Ok(self.states.clone())
    }

    fn enumerate_actions(&mut self) -> Result<Vec<ActionSpec>, EngineError> {
        self.log.push(EngineCall::EnumerateActions);
        self.check()?;
        Ok(self.actions.clone())
    }

    fn reset_world(&mut self) -> Result<SymbolicState, EngineError> {
        self.log.push(EngineCall::ResetWorld);
        self.check()?;
        self.current = self.start.clone();
        Ok(self.current.clone())
    }

    fn current_state(&mut self) -> Result<SymbolicState, EngineError> {
        self.log.push(EngineCall::CurrentState);
        self.check()?;
        if self.fail_current {
            return Err(EngineError::QueryFailed {
                query: "current_state(State)".into(),
                reason: "scripted failure".into(),
            });
        }
        Ok(self.current.clone())
    }

    fn apply_action(&mut self, invocation: &Invocation) -> Result<bool, EngineError> {
        self.log
            .push(EngineCall::ApplyAction(invocation.as_str().to_string()));
        self.check()?;
        if self.fail_apply {
            return Err(EngineError::QueryFailed {
                query: format!("step({invocation})"),
                reason: "scripted failure".into(),
            });
        }
        let key = invocation.as_str().to_string();
        let next = self
            .transitions
            .get(&(Some(self.current.clone()), key.clone()))
            .or_else(|| self.transitions.get(&(None, key)));
        match next {
            Some(state) => {
                self.current = state.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn shutdown(&mut self) -> Result<(), EngineError> {
        self.log.push(EngineCall::Shutdown);
        if self.fail_shutdown {
            return Err(EngineError::Unavailable {
                reason: "scripted shutdown failure".into(),
            });
        }
        self.shut_down = true;
        Ok(())
    }
}

/// One request received by a [`RecordingRenderer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderCall {
    Draw(String),
    SetTarget(String),
    Reopen,
    Close,
}

/// A [`RenderAdapter`] that records calls instead of drawing.
pub struct RecordingRenderer {
    closed: bool,
    fail_close: bool,
    log: CallLog<RenderCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self {
            closed: false,
            fail_close: false,
            log: CallLog::new(),
        }
    }

    /// Start in the closed state, as if a previous session closed it.
    pub fn starting_closed(mut self) -> Self {
        self.closed = true;
        self
    }

    /// `close` fails (after marking the surface closed).
    pub fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    pub fn call_log(&self) -> CallLog<RenderCall> {
        self.log.clone()
    }
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderAdapter for RecordingRenderer {
    fn draw(&mut self, state: &SymbolicState) -> Result<(), RenderError> {
        if self.closed {
            return Err(RenderError::Closed);
        }
        self.log.push(RenderCall::Draw(state.as_str().to_string()));
        Ok(())
    }

    fn set_target(&mut self, target: &SymbolicState) -> Result<(), RenderError> {
        if self.closed {
            return Err(RenderError::Closed);
        }
        self.log
            .push(RenderCall::SetTarget(target.as_str().to_string()));
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn reopen(&mut self) -> Result<(), RenderError> {
        self.log.push(RenderCall::Reopen);
        self.closed = false;
        Ok(())
    }

    fn close(&mut self) -> Result<(), RenderError> {
        self.log.push(RenderCall::Close);
        self.closed = true;
        if self.fail_close {
            return Err(RenderError::Backend {
                reason: "scripted close failure".into(),
            });
        }
        Ok(())
    }
}
