//! Environment configuration, validation, and construction errors.
//!
//! [`EnvConfig`] is the builder-input for [`BlocksEnv`](crate::BlocksEnv).
//! [`validate()`](EnvConfig::validate) checks the scalar invariants;
//! checks that need the enumeration (composite split, fingerprint) run
//! during construction and report through the same [`ConfigError`].

use std::error::Error;
use std::fmt;

use cairn_core::{EnumerationError, SymbolicState};

// ── RewardConfig ───────────────────────────────────────────────────

/// Reward per step outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct RewardConfig {
    /// Reward for the transition that reaches the goal. Default: 100.
    pub goal: f64,
    /// Reward for any other accepted transition. Default: -1.
    pub step: f64,
    /// Reward for an action the engine rejects. Default: -10.
    pub illegal: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            goal: 100.0,
            step: -1.0,
            illegal: -10.0,
        }
    }
}

// ── Composition ────────────────────────────────────────────────────

/// How the engine's reported state becomes an observation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Composition {
    /// The engine's state is the observation. Targets are sampled from
    /// the full state index range.
    #[default]
    Plain,
    /// The observation is `agent ++ goal`, where the engine reports the
    /// agent part and the environment holds the goal part. Every
    /// enumerated state splits after `agent_width` characters.
    AgentGoal {
        /// Width in characters of the agent sub-state.
        agent_width: usize,
    },
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a config or constructing an
/// environment.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The enumeration could not be built.
    Enumeration(EnumerationError),
    /// A reward is NaN or infinite.
    InvalidReward {
        /// Which reward, and its value.
        reason: String,
    },
    /// `Composition::AgentGoal` with `agent_width == 0`.
    AgentWidthZero,
    /// An enumerated state cannot be split into non-empty agent and goal
    /// parts at the configured width.
    CompositeSplit {
        /// The offending state.
        state: SymbolicState,
        /// The configured agent width.
        agent_width: usize,
    },
    /// The composite in which the agent has reached goal `goal`
    /// (`goal ++ goal`) is not enumerated, so that goal could never be
    /// observed as reached.
    GoalNotEnumerated {
        /// The goal sub-state.
        goal: SymbolicState,
    },
    /// The live enumeration differs from the one the caller expected.
    FingerprintMismatch {
        /// The fingerprint from the config.
        expected: u64,
        /// The fingerprint of the live enumeration.
        actual: u64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enumeration(e) => write!(f, "enumeration: {e}"),
            Self::InvalidReward { reason } => write!(f, "invalid reward: {reason}"),
            Self::AgentWidthZero => write!(f, "agent_width must be at least 1"),
            Self::CompositeSplit { state, agent_width } => write!(
                f,
                "state '{state}' cannot be split after {agent_width} characters"
            ),
            Self::GoalNotEnumerated { goal } => write!(
                f,
                "goal '{goal}' has no enumerated composite in which it is reached"
            ),
            Self::FingerprintMismatch { expected, actual } => write!(
                f,
                "enumeration fingerprint mismatch: expected={expected:#018x}, actual={actual:#018x}"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Enumeration(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EnumerationError> for ConfigError {
    fn from(e: EnumerationError) -> Self {
        Self::Enumeration(e)
    }
}

// ── EnvConfig ──────────────────────────────────────────────────────

/// Construction parameters for [`BlocksEnv`](crate::BlocksEnv).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnvConfig {
    /// Seed for the target/goal sampler. Default: 0.
    pub seed: u64,
    /// Rewards per outcome.
    pub rewards: RewardConfig,
    /// Observation composition. Default: [`Composition::Plain`].
    pub composition: Composition,
    /// If set, construction fails unless the live enumeration has this
    /// fingerprint. Pins a trained policy to the indices it learned.
    pub expected_fingerprint: Option<u64>,
}

impl EnvConfig {
    /// Check invariants that do not depend on the engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("goal", self.rewards.goal),
            ("step", self.rewards.step),
            ("illegal", self.rewards.illegal),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidReward {
                    reason: format!("{name} reward must be finite, got {value}"),
                });
            }
        }
        if let Composition::AgentGoal { agent_width: 0 } = self.composition {
            return Err(ConfigError::AgentWidthZero);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EnvConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rewards.goal, 100.0);
        assert_eq!(config.rewards.step, -1.0);
        assert_eq!(config.rewards.illegal, -10.0);
        assert_eq!(config.composition, Composition::Plain);
    }

    #[test]
    fn non_finite_reward_rejected() {
        let config = EnvConfig {
            rewards: RewardConfig {
                step: f64::NAN,
                ..RewardConfig::default()
            },
            ..EnvConfig::default()
        };
        match config.validate() {
            Err(ConfigError::InvalidReward { reason }) => assert!(reason.contains("step")),
            other => panic!("expected InvalidReward, got {other:?}"),
        }
    }

    #[test]
    fn zero_agent_width_rejected() {
        let config = EnvConfig {
            composition: Composition::AgentGoal { agent_width: 0 },
            ..EnvConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::AgentWidthZero));
    }

    #[test]
    fn fingerprint_mismatch_formats_hex() {
        let err = ConfigError::FingerprintMismatch {
            expected: 1,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "enumeration fingerprint mismatch: expected=0x0000000000000001, actual=0x0000000000000002"
        );
    }
}
