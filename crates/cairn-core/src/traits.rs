//! Collaborator traits: the symbolic engine client and the render adapter.

use crate::error::{EngineError, RenderError};
use crate::symbol::{ActionSpec, Invocation, SymbolicState};

/// A client for the symbolic reasoning engine.
///
/// The engine owns legality rules and world-state transitions. Every
/// method is one synchronous request/response round-trip. Implementors
/// hold a single connection; an environment takes ownership of its
/// client, so one connection is never shared between environments.
///
/// `Send` lets an environment be moved to a worker thread. Nothing
/// requires `Sync`: all access goes through `&mut self`.
pub trait SymbolicEngine: Send {
    /// Every state the engine can enumerate, in the engine's order.
    fn enumerate_states(&mut self) -> Result<Vec<SymbolicState>, EngineError>;

    /// Every parameterized action, in the engine's order.
    fn enumerate_actions(&mut self) -> Result<Vec<ActionSpec>, EngineError>;

    /// Reset the world to its canonical start and return that state.
    fn reset_world(&mut self) -> Result<SymbolicState, EngineError>;

    /// The world's current state.
    fn current_state(&mut self) -> Result<SymbolicState, EngineError>;

    /// Attempt an action. `Ok(false)` means the engine rejected it as
    /// illegal in the current configuration and the world is unchanged.
    fn apply_action(&mut self, invocation: &Invocation) -> Result<bool, EngineError>;

    /// Release the connection. Later calls may fail with
    /// [`EngineError::ShutDown`].
    fn shutdown(&mut self) -> Result<(), EngineError>;
}

/// A drawing surface for the current state and the goal.
///
/// Must stay callable after [`close()`](RenderAdapter::close); the
/// environment checks [`is_closed()`](RenderAdapter::is_closed) and
/// calls [`reopen()`](RenderAdapter::reopen) before drawing.
pub trait RenderAdapter: Send {
    /// Draw a frame for the given state.
    fn draw(&mut self, state: &SymbolicState) -> Result<(), RenderError>;

    /// Set the goal shown alongside subsequent frames.
    fn set_target(&mut self, target: &SymbolicState) -> Result<(), RenderError>;

    /// Whether the surface has been closed.
    fn is_closed(&self) -> bool;

    /// Re-initialize a closed surface.
    fn reopen(&mut self) -> Result<(), RenderError>;

    /// Close the surface.
    fn close(&mut self) -> Result<(), RenderError>;
}
