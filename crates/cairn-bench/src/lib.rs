//! Benchmark profiles and utilities for the Cairn environment.
//!
//! - [`blocks_profile`]: a plain blocks-world environment of `n` blocks
//! - [`goal_channel_profile`]: the agent/goal composite over the same world
//! - [`random_actions`]: a deterministic action stream via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use cairn_blocks::BlocksWorld;
use cairn_core::ActionIndex;
use cairn_env::{BlocksEnv, Composition, EnvConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A fixed-target environment over `blocks` blocks (1 to 6).
///
/// Panics if `blocks` is out of range or enumerates no actions.
pub fn blocks_profile(blocks: usize, seed: u64) -> BlocksEnv {
    let world = BlocksWorld::new(blocks).unwrap();
    let config = EnvConfig {
        seed,
        ..EnvConfig::default()
    };
    BlocksEnv::new(Box::new(world), config).unwrap()
}

/// An agent/goal environment over `blocks` blocks.
///
/// The state space is the square of [`blocks_profile`]'s.
pub fn goal_channel_profile(blocks: usize, seed: u64) -> BlocksEnv {
    let world = BlocksWorld::new(blocks).unwrap().with_goal_channel();
    let config = EnvConfig {
        seed,
        composition: Composition::AgentGoal {
            agent_width: blocks,
        },
        ..EnvConfig::default()
    };
    BlocksEnv::new(Box::new(world), config).unwrap()
}

/// `len` actions sampled uniformly from `env`'s action space.
pub fn random_actions(env: &BlocksEnv, len: usize, seed: u64) -> Vec<ActionIndex> {
    let space = env.action_space();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .filter_map(|_| space.sample(&mut rng))
        .map(ActionIndex)
        .collect()
}
