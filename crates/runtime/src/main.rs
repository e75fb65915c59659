#![deny(clippy::all, clippy::pedantic)]

use anyhow::Result;
use clap::Parser;
use envs::{AntRandParamEnv, Env, EnvConfig, Path, TabularSink};
use sim::{MockQuadruped, SimBackend};

/// Random-action driver for the quadruped random-parameter environment.
#[derive(Parser)]
struct Args {
    /// Number of episodes to roll out.
    #[arg(long, default_value_t = 5)]
    episodes: u32,

    /// Hard cap on steps per episode.
    #[arg(long, default_value_t = 200)]
    max_steps: u32,

    /// Seed for parameter sampling and action noise.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = EnvConfig {
        random_seed: Some(args.seed),
        max_path_length: Some(args.max_steps),
        ..EnvConfig::default()
    };
    let mut env = AntRandParamEnv::new(MockQuadruped::new(), &config);
    let rng = fastrand::Rng::with_seed(args.seed.wrapping_add(1));

    let (lower, upper) = env.backend().action_bounds();
    let lower = lower.to_vec();
    let upper = upper.to_vec();

    tracing::info!(
        episodes = args.episodes,
        max_steps = args.max_steps,
        "starting random-action rollouts"
    );

    let mut paths = Vec::new();
    for episode in 0..args.episodes {
        let mut obs = env.reset();
        let mass = env.backend().params().body_mass.clone();
        tracing::info!(episode, ?mass, "episode start with randomized body masses");

        let mut path = Path::default();
        let mut episode_return = 0.0_f32;
        loop {
            path.observations.push(obs.clone());
            let action: Vec<f32> = lower
                .iter()
                .zip(&upper)
                .map(|(lb, ub)| lb + (ub - lb) * rng.f32())
                .collect();
            let outcome = env.step(&action)?;
            episode_return += outcome.reward;
            path.actions.push(action);
            path.rewards.push(outcome.reward);
            obs = outcome.observation;
            if outcome.done {
                path.observations.push(obs.clone());
                break;
            }
        }

        tracing::info!(
            episode,
            steps = path.rewards.len(),
            episode_return,
            "episode finished"
        );
        paths.push(path);
    }

    let mut sink = TabularSink::default();
    env.log_diagnostics(&paths, "Eval", &mut sink);
    for (key, value) in &sink.rows {
        tracing::info!("{key}: {value}");
    }

    Ok(())
}
