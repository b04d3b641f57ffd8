//! Random-policy rollouts in the three-block world.
//!
//! Demonstrates: build BlocksWorld → BlocksEnv with a text renderer →
//! reset → step random actions → render → close. Set `RUST_LOG=debug` to
//! see every step.

use cairn_bench::random_actions;
use cairn_blocks::{BlocksWorld, TextRenderer};
use cairn_env::{BlocksEnv, EnvConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Reads RUST_LOG, defaults to info.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let world = BlocksWorld::new(3)?;
    let config = EnvConfig {
        seed: 42,
        ..EnvConfig::default()
    };
    let mut env = BlocksEnv::new(Box::new(world), config)?
        .with_renderer(Box::new(TextRenderer::stdout()));
    info!(
        states = env.observation_space().n(),
        actions = env.action_space().n(),
        fingerprint = %format!("{:#018x}", env.enumeration().fingerprint()),
        "environment ready"
    );

    for episode in 0..3u64 {
        env.reset(None)?;
        env.render()?;
        let mut steps = 0;
        for action in random_actions(&env, 200, episode) {
            let result = env.step(action)?;
            steps += 1;
            if result.terminated {
                env.render()?;
                break;
            }
        }
        let total = env.episode().map_or(0.0, |e| e.total_reward);
        let reached = env.episode().is_some_and(|e| e.reached);
        println!("episode {episode}: steps={steps:>3}, return={total:>7.1}, reached={reached}");
    }

    let metrics = env.metrics();
    println!(
        "totals: episodes={}, steps={}, illegal rate={:.2}, goals={}",
        metrics.episodes,
        metrics.steps,
        metrics.illegal_rate(),
        metrics.goals_reached
    );
    env.close();
    Ok(())
}
