//! Integration test: the agent/goal composite environment.
//!
//! The goal sub-state is sampled at reset and must stay fixed for the
//! whole episode; an episode terminates when the agent sub-state equals
//! the goal, wherever the agent started.

use cairn_blocks::BlocksWorld;
use cairn_core::{ActionIndex, StateIndex, SymbolicState};
use cairn_env::{BlocksEnv, Composition, EnvConfig, Outcome};
use cairn_test_utils::{composite_scenario, RecordingRenderer, RenderCall, COMPOSITE_AGENT_WIDTH};
use proptest::prelude::*;

fn scenario_env() -> BlocksEnv {
    let config = EnvConfig {
        composition: Composition::AgentGoal {
            agent_width: COMPOSITE_AGENT_WIDTH,
        },
        ..EnvConfig::default()
    };
    BlocksEnv::new(Box::new(composite_scenario()), config).unwrap()
}

fn reset_until_goal(env: &mut BlocksEnv, goal: &str) -> StateIndex {
    for seed in 0..256 {
        let (observation, info) = env.reset(Some(seed)).unwrap();
        if info.goal.as_ref().map(SymbolicState::as_str) == Some(goal) {
            return observation;
        }
    }
    panic!("no seed in 0..256 samples goal {goal}");
}

#[test]
fn reset_composes_agent_and_goal() {
    let mut env = scenario_env();
    // Index order is aa, ab, ac, ba, bb, bc, ca, cb, cc.
    let observation = reset_until_goal(&mut env, "b");
    assert_eq!(observation, StateIndex(1));
    assert_eq!(env.current_state(), Some(&SymbolicState::new("ab")));
    assert_eq!(env.goal(), Some(&SymbolicState::new("b")));
    assert_eq!(env.target_state(), Some(&SymbolicState::new("bb")));
}

#[test]
fn reaching_the_goal_terminates_from_any_start() {
    let mut env = scenario_env();
    reset_until_goal(&mut env, "c");

    let result = env.step(ActionIndex(1)).unwrap();
    assert_eq!(env.current_state(), Some(&SymbolicState::new("bc")));
    assert_eq!(result.info.outcome, Some(Outcome::Moved));
    assert_eq!(result.reward, -1.0);

    let result = env.step(ActionIndex(2)).unwrap();
    assert_eq!(env.current_state(), Some(&SymbolicState::new("cc")));
    assert_eq!(result.observation, StateIndex(8));
    assert_eq!(result.info.target, StateIndex(8));
    assert_eq!(result.reward, 100.0);
    assert!(result.terminated);
}

#[test]
fn rejected_move_keeps_the_composite() {
    let mut env = scenario_env();
    let before = reset_until_goal(&mut env, "b");
    // go(a) from a has no transition.
    let result = env.step(ActionIndex(0)).unwrap();
    assert_eq!(result.observation, before);
    assert_eq!(result.reward, -10.0);
    assert_eq!(result.info.outcome, Some(Outcome::Illegal));
}

#[test]
fn render_splits_the_composite() {
    let renderer = RecordingRenderer::new();
    let log = renderer.call_log();
    let mut env = scenario_env().with_renderer(Box::new(renderer));
    reset_until_goal(&mut env, "c");
    env.render().unwrap();
    assert_eq!(
        log.calls(),
        [
            RenderCall::SetTarget("c".into()),
            RenderCall::Draw("a".into()),
        ]
    );
}

#[test]
fn blocks_world_composite_construction() {
    let config = EnvConfig {
        composition: Composition::AgentGoal { agent_width: 2 },
        ..EnvConfig::default()
    };
    let env = BlocksEnv::new(Box::new(BlocksWorld::new(2).unwrap().with_goal_channel()), config)
        .unwrap();
    assert_eq!(env.observation_space().n(), 9);
    assert_eq!(env.action_space().n(), 4);
}

proptest! {
    #[test]
    fn goal_is_fixed_for_the_episode(
        seed: u64,
        actions in prop::collection::vec(0u32..18, 1..48),
    ) {
        let config = EnvConfig {
            seed,
            composition: Composition::AgentGoal { agent_width: 3 },
            ..EnvConfig::default()
        };
        let world = BlocksWorld::new(3).unwrap().with_goal_channel();
        let mut env = BlocksEnv::new(Box::new(world), config).unwrap();
        let (_, info) = env.reset(None).unwrap();
        let goal = info.goal.unwrap();

        for action in actions {
            let result = env.step(ActionIndex(action)).unwrap();
            prop_assert_eq!(result.info.goal.as_ref(), Some(&goal));
            let shown = env.current_state().unwrap();
            let (agent, shown_goal) = shown.split_composite(3).unwrap();
            prop_assert_eq!(shown_goal, goal.as_str());
            if result.info.outcome != Some(Outcome::Illegal) {
                prop_assert_eq!(result.terminated, agent == goal.as_str());
            }
            if result.terminated {
                prop_assert_eq!(result.reward, 100.0);
            }
        }
    }
}
