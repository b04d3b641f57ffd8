//! The reset/step environment.
//!
//! [`BlocksEnv`] owns one engine client, an optional render adapter, and
//! the immutable [`Enumeration`] built from that engine. Each call to
//! [`step()`](BlocksEnv::step) is one synchronous engine round-trip (two
//! when the action is accepted: apply, then read back).
//!
//! # Ownership model
//!
//! `BlocksEnv` is [`Send`] but not [`Sync`]. All mutating methods take
//! `&mut self`. The engine is held by value, so two environments can
//! never share a connection.
//!
//! # Shutdown
//!
//! [`close()`](BlocksEnv::close) releases the engine and the adapter and
//! is idempotent. Dropping an environment closes it, so release is
//! attempted on every exit path including unwinding.

use std::fmt;
use std::time::Instant;

use cairn_codec::{build, Enumeration};
use cairn_core::{
    ActionIndex, RenderAdapter, RenderError, StateIndex, SymbolicEngine, SymbolicState,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::compose::Composer;
use crate::config::{ConfigError, EnvConfig, RewardConfig};
use crate::episode::{Episode, Info, Outcome, StepResult};
use crate::error::EnvError;
use crate::metrics::EnvMetrics;
use crate::space::Discrete;

// Compile-time assertion: BlocksEnv is Send.
// Fails to compile if any field is !Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<BlocksEnv>();
    }
};

/// Discrete RL environment over a [`SymbolicEngine`].
///
/// # Example
///
/// ```
/// use cairn_blocks::BlocksWorld;
/// use cairn_core::ActionIndex;
/// use cairn_env::{BlocksEnv, EnvConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let world = BlocksWorld::new(3)?;
/// let mut env = BlocksEnv::new(Box::new(world), EnvConfig::default())?;
/// let (obs, info) = env.reset(Some(7))?;
/// assert!(env.observation_space().contains(info.target.0));
///
/// // move(a,b,c): a starts on the table, not on b.
/// let result = env.step(ActionIndex(0))?;
/// assert_eq!(result.observation, obs);
/// env.close();
/// # Ok(())
/// # }
/// ```
pub struct BlocksEnv {
    engine: Box<dyn SymbolicEngine>,
    renderer: Option<Box<dyn RenderAdapter>>,
    enumeration: Enumeration,
    composer: Composer,
    rewards: RewardConfig,
    rng: ChaCha8Rng,
    seed: u64,
    episode: Option<Episode>,
    metrics: EnvMetrics,
    closed: bool,
}

impl BlocksEnv {
    /// Enumerate `engine` and construct an environment over it.
    ///
    /// On any failure the engine is shut down before the error is
    /// returned.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Enumeration`] if the engine cannot be enumerated,
    /// plus every error of [`from_enumeration()`](Self::from_enumeration).
    pub fn new(mut engine: Box<dyn SymbolicEngine>, config: EnvConfig) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            shutdown_quietly(engine.as_mut());
            return Err(e);
        }
        let enumeration = match build(engine.as_mut()) {
            Ok(enumeration) => enumeration,
            Err(e) => {
                shutdown_quietly(engine.as_mut());
                return Err(e.into());
            }
        };
        Self::from_enumeration(engine, enumeration, config)
    }

    /// Construct over an enumeration that was already built from `engine`.
    ///
    /// # Errors
    ///
    /// Invalid rewards or agent width, a state that cannot be split in
    /// the agent/goal composition, or a fingerprint that differs from
    /// [`EnvConfig::expected_fingerprint`].
    pub fn from_enumeration(
        mut engine: Box<dyn SymbolicEngine>,
        enumeration: Enumeration,
        config: EnvConfig,
    ) -> Result<Self, ConfigError> {
        let composer = match check(&config, &enumeration) {
            Ok(composer) => composer,
            Err(e) => {
                shutdown_quietly(engine.as_mut());
                return Err(e);
            }
        };
        info!(
            states = enumeration.states().len(),
            actions = enumeration.actions().len(),
            composition = ?config.composition,
            seed = config.seed,
            "environment constructed"
        );
        Ok(Self {
            engine,
            renderer: None,
            enumeration,
            composer,
            rewards: config.rewards,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            seed: config.seed,
            episode: None,
            metrics: EnvMetrics::default(),
            closed: false,
        })
    }

    /// Attach a render adapter.
    pub fn with_renderer(mut self, renderer: Box<dyn RenderAdapter>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Start a new episode.
    ///
    /// If `seed` is given, the target sampler is reseeded first, which
    /// makes the sequence of targets from this point reproducible. The
    /// engine's world is reset to its canonical start regardless of how
    /// the previous episode ended.
    ///
    /// # Errors
    ///
    /// [`EnvError::Closed`] after [`close()`](Self::close),
    /// [`EnvError::Engine`] if the world cannot be reset, and
    /// [`EnvError::UnknownState`] if the start state was never enumerated.
    /// On error no episode is in progress.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<(StateIndex, Info), EnvError> {
        if self.closed {
            return Err(EnvError::Closed);
        }
        if let Some(seed) = seed {
            self.rng = ChaCha8Rng::seed_from_u64(seed);
            self.seed = seed;
        }
        self.episode = None;

        let started = Instant::now();
        let reported = self.engine.reset_world();
        self.metrics.last_engine_us = started.elapsed().as_micros() as u64;
        let reported = reported.inspect_err(|_| self.metrics.engine_failures += 1)?;

        let start = self
            .composer
            .begin(&reported, &mut self.rng, self.enumeration.states())?;
        let episode = Episode::start(start.observation, start.target, start.goal);
        let info = episode.info(None);
        self.metrics.episodes += 1;
        debug!(
            episode = self.metrics.episodes,
            observation = %start.observation,
            target = %start.target,
            "episode reset"
        );
        self.episode = Some(episode);
        Ok((start.observation, info))
    }

    /// Submit one action.
    ///
    /// A rejected action, or one the engine fails to answer, leaves the
    /// observation unchanged and earns the illegal-action reward. An
    /// accepted action earns the goal reward if it reaches the target and
    /// the step reward otherwise. Stepping after the goal was reached is
    /// allowed; the caller decides when to reset.
    ///
    /// # Errors
    ///
    /// [`EnvError::Closed`], [`EnvError::ResetNeeded`],
    /// [`EnvError::ActionOutOfRange`], [`EnvError::Engine`] if the state
    /// cannot be read back after an accepted action, and
    /// [`EnvError::UnknownState`] if the new state was never enumerated.
    /// After either of the last two the engine's world no longer matches
    /// the observation, so the episode is ended and the next `step`
    /// returns [`EnvError::ResetNeeded`].
    pub fn step(&mut self, action: ActionIndex) -> Result<StepResult, EnvError> {
        if self.closed {
            return Err(EnvError::Closed);
        }
        let Some(episode) = self.episode.as_mut() else {
            return Err(EnvError::ResetNeeded);
        };
        let actions = self.enumeration.actions();
        let Some(invocation) = actions.encode(action) else {
            return Err(EnvError::ActionOutOfRange {
                action: action.0,
                action_count: actions.len() as u32,
            });
        };

        let started = Instant::now();
        let accepted = match self.engine.apply_action(invocation) {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(action = %invocation, error = %e, "action query failed, treating as illegal");
                self.metrics.engine_failures += 1;
                false
            }
        };
        let outcome = if accepted {
            let reported = self.engine.current_state();
            self.metrics.last_engine_us = started.elapsed().as_micros() as u64;
            let reported = match reported {
                Ok(reported) => reported,
                Err(e) => {
                    warn!(action = %invocation, error = %e, "state read-back failed, episode ended");
                    self.metrics.engine_failures += 1;
                    self.episode = None;
                    return Err(e.into());
                }
            };
            let advanced = self.composer.advance(
                &reported,
                episode.goal.as_ref(),
                episode.target,
                self.enumeration.states(),
            );
            let (observation, reached) = match advanced {
                Ok(advanced) => advanced,
                Err(e) => {
                    warn!(action = %invocation, state = %reported, "engine moved to an unenumerated state, episode ended");
                    self.episode = None;
                    return Err(e.into());
                }
            };
            episode.state = observation;
            if reached {
                Outcome::GoalReached
            } else {
                Outcome::Moved
            }
        } else {
            self.metrics.last_engine_us = started.elapsed().as_micros() as u64;
            Outcome::Illegal
        };

        let reward = match outcome {
            Outcome::Illegal => self.rewards.illegal,
            Outcome::Moved => self.rewards.step,
            Outcome::GoalReached => self.rewards.goal,
        };
        let terminated = outcome == Outcome::GoalReached;
        episode.steps += 1;
        episode.total_reward += reward;
        episode.reached |= terminated;

        self.metrics.steps += 1;
        match outcome {
            Outcome::Illegal => self.metrics.illegal_actions += 1,
            Outcome::GoalReached => self.metrics.goals_reached += 1,
            Outcome::Moved => {}
        }
        debug!(
            action = %invocation,
            ?outcome,
            observation = %episode.state,
            reward,
            "step"
        );

        Ok(StepResult {
            observation: episode.state,
            reward,
            terminated,
            truncated: false,
            info: episode.info(Some(outcome)),
        })
    }

    /// Draw the current state and target on the attached adapter.
    ///
    /// No-op without an adapter or before the first reset. A closed
    /// adapter is reopened first. In the agent/goal composition the
    /// adapter is shown the agent part and the goal part separately.
    ///
    /// # Errors
    ///
    /// [`RenderError::Closed`] after [`close()`](Self::close), and any
    /// error the adapter reports.
    pub fn render(&mut self) -> Result<(), RenderError> {
        if self.closed {
            return Err(RenderError::Closed);
        }
        let (Some(renderer), Some(episode)) = (self.renderer.as_mut(), self.episode.as_ref())
        else {
            return Ok(());
        };
        let states = self.enumeration.states();
        let (Some(current), Some(target)) =
            (states.decode(episode.state), states.decode(episode.target))
        else {
            return Ok(());
        };
        let (shown, goal) = self.composer.frame(current, target);
        if renderer.is_closed() {
            debug!("reopening closed render adapter");
            renderer.reopen()?;
        }
        renderer.set_target(&goal)?;
        renderer.draw(&shown)
    }

    /// Release the engine connection and the render adapter.
    ///
    /// Failures are logged and swallowed; each release is attempted
    /// regardless of the other. Calling `close()` again does nothing.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.episode = None;
        if let Err(e) = self.engine.shutdown() {
            warn!(error = %e, "engine shutdown failed");
        }
        if let Some(renderer) = self.renderer.as_mut() {
            if let Err(e) = renderer.close() {
                warn!(error = %e, "render adapter close failed");
            }
        }
        info!(
            episodes = self.metrics.episodes,
            steps = self.metrics.steps,
            "environment closed"
        );
    }

    // ── Accessors ──────────────────────────────────────────────────

    /// Observations are integers in `[0, |states|)`.
    pub fn observation_space(&self) -> Discrete {
        Discrete::new(self.enumeration.states().len() as u32)
    }

    /// Actions are integers in `[0, |actions|)`.
    pub fn action_space(&self) -> Discrete {
        Discrete::new(self.enumeration.actions().len() as u32)
    }

    /// The enumeration this environment indexes against.
    pub fn enumeration(&self) -> &Enumeration {
        &self.enumeration
    }

    /// The episode in progress, if any.
    pub fn episode(&self) -> Option<&Episode> {
        self.episode.as_ref()
    }

    /// The decoded current observation.
    pub fn current_state(&self) -> Option<&SymbolicState> {
        let episode = self.episode.as_ref()?;
        self.enumeration.states().decode(episode.state)
    }

    /// The decoded target state.
    pub fn target_state(&self) -> Option<&SymbolicState> {
        let episode = self.episode.as_ref()?;
        self.enumeration.states().decode(episode.target)
    }

    /// The goal sub-state (agent/goal composition only).
    pub fn goal(&self) -> Option<&SymbolicState> {
        self.episode.as_ref()?.goal.as_ref()
    }

    /// Cumulative counters.
    pub fn metrics(&self) -> &EnvMetrics {
        &self.metrics
    }

    /// The seed most recently used for the target sampler.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether [`close()`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for BlocksEnv {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for BlocksEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlocksEnv")
            .field("states", &self.enumeration.states().len())
            .field("actions", &self.enumeration.actions().len())
            .field(
                "fingerprint",
                &format_args!("{:#018x}", self.enumeration.fingerprint()),
            )
            .field("seed", &self.seed)
            .field("episode", &self.episode)
            .field("renderer", &self.renderer.is_some())
            .field("closed", &self.closed)
            .finish()
    }
}

fn check(config: &EnvConfig, enumeration: &Enumeration) -> Result<Composer, ConfigError> {
    config.validate()?;
    if let Some(expected) = config.expected_fingerprint {
        let actual = enumeration.fingerprint();
        if expected != actual {
            return Err(ConfigError::FingerprintMismatch { expected, actual });
        }
    }
    Composer::new(config.composition, enumeration.states())
}

fn shutdown_quietly(engine: &mut dyn SymbolicEngine) {
    if let Err(e) = engine.shutdown() {
        warn!(error = %e, "engine shutdown failed after construction error");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Composition;
    use cairn_test_utils::{three_state_scenario, EngineCall, RecordingRenderer, RenderCall};

    fn env() -> BlocksEnv {
        BlocksEnv::new(Box::new(three_state_scenario()), EnvConfig::default()).unwrap()
    }

    #[test]
    fn spaces_match_enumeration() {
        let env = env();
        assert_eq!(env.observation_space(), Discrete::new(3));
        assert_eq!(env.action_space(), Discrete::new(1));
    }

    #[test]
    fn step_before_reset_is_an_error() {
        let mut env = env();
        assert_eq!(env.step(ActionIndex(0)), Err(EnvError::ResetNeeded));
    }

    #[test]
    fn out_of_range_action_is_an_error() {
        let mut env = env();
        env.reset(None).unwrap();
        assert_eq!(
            env.step(ActionIndex(1)),
            Err(EnvError::ActionOutOfRange {
                action: 1,
                action_count: 1,
            })
        );
        assert_eq!(env.metrics().steps, 0);
    }

    #[test]
    fn operations_after_close_fail() {
        let mut env = env();
        env.reset(None).unwrap();
        env.close();
        assert!(env.is_closed());
        assert_eq!(env.reset(None), Err(EnvError::Closed));
        assert_eq!(env.step(ActionIndex(0)), Err(EnvError::Closed));
        assert_eq!(env.render(), Err(RenderError::Closed));
        assert!(env.episode().is_none());
    }

    #[test]
    fn reseeding_reproduces_targets() {
        let mut env = env();
        let first: Vec<StateIndex> = (0..8)
            .map(|i| env.reset(if i == 0 { Some(11) } else { None }).unwrap().1.target)
            .collect();
        let second: Vec<StateIndex> = (0..8)
            .map(|i| env.reset(if i == 0 { Some(11) } else { None }).unwrap().1.target)
            .collect();
        assert_eq!(first, second);
        assert_eq!(env.seed(), 11);
    }

    #[test]
    fn failed_construction_shuts_the_engine_down() {
        let engine = three_state_scenario();
        let log = engine.call_log();
        let config = EnvConfig {
            expected_fingerprint: Some(0),
            ..EnvConfig::default()
        };
        let err = BlocksEnv::new(Box::new(engine), config).unwrap_err();
        assert!(matches!(err, ConfigError::FingerprintMismatch { expected: 0, .. }));
        assert_eq!(log.calls().last(), Some(&EngineCall::Shutdown));
    }

    #[test]
    fn plain_states_cannot_be_split() {
        let config = EnvConfig {
            composition: Composition::AgentGoal { agent_width: 1 },
            ..EnvConfig::default()
        };
        let err = BlocksEnv::new(Box::new(three_state_scenario()), config).unwrap_err();
        assert!(matches!(err, ConfigError::CompositeSplit { agent_width: 1, .. }));
    }

    #[test]
    fn render_without_episode_is_a_noop() {
        let renderer = RecordingRenderer::new();
        let log = renderer.call_log();
        let mut env = env().with_renderer(Box::new(renderer));
        env.render().unwrap();
        assert!(log.is_empty());
        env.reset(None).unwrap();
        env.render().unwrap();
        let calls = log.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[0], RenderCall::SetTarget(_)));
        assert_eq!(calls[1], RenderCall::Draw("A".into()));
    }

    #[test]
    fn debug_shows_fingerprint_and_sizes() {
        let env = env();
        let text = format!("{env:?}");
        assert!(text.contains("states: 3"));
        assert!(text.contains("actions: 1"));
        assert!(text.contains(&format!("{:#018x}", env.enumeration().fingerprint())));
    }
}
