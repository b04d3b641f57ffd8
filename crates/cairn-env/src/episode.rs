//! Per-episode state and the values returned by `reset()` and `step()`.

use cairn_core::{StateIndex, SymbolicState};

/// What happened to a submitted action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The engine rejected the action (or could not answer); the world
    /// is unchanged.
    Illegal,
    /// The action was applied and the goal was not reached.
    Moved,
    /// The action was applied and the resulting state is the goal.
    GoalReached,
}

/// Auxiliary information returned alongside each observation.
#[derive(Clone, Debug, PartialEq)]
pub struct Info {
    /// Index of the state the episode is trying to reach.
    pub target: StateIndex,
    /// The goal sub-state, in the agent/goal composition only.
    pub goal: Option<SymbolicState>,
    /// Outcome of the step; `None` for the info returned by `reset()`.
    pub outcome: Option<Outcome>,
    /// Steps taken in the current episode, including this one.
    pub steps: u64,
}

/// The result of one `step()`.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult {
    /// Index of the state after the step.
    pub observation: StateIndex,
    /// Reward for this transition.
    pub reward: f64,
    /// Whether the goal was reached on this step.
    pub terminated: bool,
    /// Always `false`: the environment imposes no step limit.
    pub truncated: bool,
    /// Auxiliary information.
    pub info: Info,
}

/// Bookkeeping for the episode in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct Episode {
    /// Current observation.
    pub state: StateIndex,
    /// Target index sampled at reset.
    pub target: StateIndex,
    /// Goal sub-state sampled at reset (agent/goal composition only).
    pub goal: Option<SymbolicState>,
    /// Steps taken since reset.
    pub steps: u64,
    /// Sum of rewards since reset.
    pub total_reward: f64,
    /// Whether the goal has been reached at least once.
    pub reached: bool,
}

impl Episode {
    pub(crate) fn start(
        state: StateIndex,
        target: StateIndex,
        goal: Option<SymbolicState>,
    ) -> Self {
        Self {
            state,
            target,
            goal,
            steps: 0,
            total_reward: 0.0,
            reached: false,
        }
    }

    pub(crate) fn info(&self, outcome: Option<Outcome>) -> Info {
        Info {
            target: self.target,
            goal: self.goal.clone(),
            outcome,
            steps: self.steps,
        }
    }
}
