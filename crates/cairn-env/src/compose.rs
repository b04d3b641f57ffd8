//! Observation composition: plain states or `agent ++ goal` composites.
//!
//! The two environment variants differ only in how an engine-reported
//! state becomes an observation and when the episode counts as solved.
//! [`Composer`] captures that difference so the reset/step flow in
//! `env.rs` is written once.

use cairn_codec::StateCodec;
use cairn_core::{StateIndex, SymbolicState, UnknownStateError};
use indexmap::IndexSet;
use rand::Rng;

use crate::config::{Composition, ConfigError};

/// Observation, target and goal chosen by `reset()`.
#[derive(Debug)]
pub(crate) struct Start {
    pub(crate) observation: StateIndex,
    pub(crate) target: StateIndex,
    pub(crate) goal: Option<SymbolicState>,
}

#[derive(Debug)]
pub(crate) enum Composer {
    Plain,
    AgentGoal {
        agent_width: usize,
        /// Distinct goal sub-states in first-appearance order.
        goals: IndexSet<SymbolicState>,
    },
}

impl Composer {
    /// Check `composition` against the enumerated states.
    pub(crate) fn new(composition: Composition, states: &StateCodec) -> Result<Self, ConfigError> {
        let agent_width = match composition {
            Composition::Plain => return Ok(Self::Plain),
            Composition::AgentGoal { agent_width: 0 } => return Err(ConfigError::AgentWidthZero),
            Composition::AgentGoal { agent_width } => agent_width,
        };

        let mut goals = IndexSet::new();
        for (_, state) in states.iter() {
            let Some((agent, _)) = state.split_composite(agent_width) else {
                return Err(ConfigError::CompositeSplit {
                    state: state.clone(),
                    agent_width,
                });
            };
            goals.insert(SymbolicState::new(agent));
        }
        for goal in &goals {
            let reached = SymbolicState::compose(goal.as_str(), goal.as_str());
            if !states.contains(&reached) {
                return Err(ConfigError::GoalNotEnumerated { goal: goal.clone() });
            }
        }
        Ok(Self::AgentGoal { agent_width, goals })
    }

    /// Sample the episode's target (and goal) and encode the start state.
    pub(crate) fn begin<R: Rng + ?Sized>(
        &self,
        start: &SymbolicState,
        rng: &mut R,
        states: &StateCodec,
    ) -> Result<Start, UnknownStateError> {
        match self {
            Self::Plain => {
                let observation = states.encode(start)?;
                // Enumerations are non-empty and fit in u32.
                let target = StateIndex(rng.random_range(0..states.len() as u32));
                Ok(Start {
                    observation,
                    target,
                    goal: None,
                })
            }
            Self::AgentGoal { agent_width, goals } => {
                let agent = agent_part(start, *agent_width)?;
                let goal = goals[rng.random_range(0..goals.len())].clone();
                let observation = states.encode(&SymbolicState::compose(agent, goal.as_str()))?;
                let target =
                    states.encode(&SymbolicState::compose(goal.as_str(), goal.as_str()))?;
                Ok(Start {
                    observation,
                    target,
                    goal: Some(goal),
                })
            }
        }
    }

    /// Encode a state read back after an accepted action and decide
    /// whether it reaches the goal.
    pub(crate) fn advance(
        &self,
        reported: &SymbolicState,
        goal: Option<&SymbolicState>,
        target: StateIndex,
        states: &StateCodec,
    ) -> Result<(StateIndex, bool), UnknownStateError> {
        match (self, goal) {
            (Self::AgentGoal { agent_width, .. }, Some(goal)) => {
                let agent = agent_part(reported, *agent_width)?;
                let observation = states.encode(&SymbolicState::compose(agent, goal.as_str()))?;
                Ok((observation, agent == goal.as_str()))
            }
            _ => {
                let observation = states.encode(reported)?;
                Ok((observation, observation == target))
            }
        }
    }

    /// The `(current, target)` pair handed to a render adapter.
    pub(crate) fn frame(
        &self,
        current: &SymbolicState,
        target: &SymbolicState,
    ) -> (SymbolicState, SymbolicState) {
        if let Self::AgentGoal { agent_width, .. } = self {
            if let Some((agent, goal)) = current.split_composite(*agent_width) {
                return (SymbolicState::new(agent), SymbolicState::new(goal));
            }
        }
        (current.clone(), target.clone())
    }
}

/// The agent sub-state reported by the engine, which must be exactly
/// `agent_width` characters.
fn agent_part(reported: &SymbolicState, agent_width: usize) -> Result<&str, UnknownStateError> {
    if reported.char_len() != agent_width {
        return Err(UnknownStateError {
            state: reported.clone(),
        });
    }
    Ok(reported.as_str())
}
