#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a headless arena match with a scripted bot.

mod autopilot;
mod session;
mod summary;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use arena_core::GameState;
use arena_simulation::{derive_labeled_seed, FrameInput, Simulation};
use arena_world::query;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::{
    autopilot::Autopilot,
    session::SessionConfig,
    summary::{MatchSummary, Tally},
};

const AUTOPILOT_STREAM: &str = "autopilot";

/// Runs a scripted arena match without rendering.
#[derive(Debug, Parser)]
#[command(name = "arena", version, about)]
struct Args {
    /// TOML session file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Master seed, overriding the session file.
    #[arg(long)]
    seed: Option<u64>,
    /// Frame limit, overriding the session file.
    #[arg(long)]
    frames: Option<u64>,
    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

/// Entry point for the arena command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut session = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    session.override_with(args.seed, args.frames);

    let summary = play(&session)?;
    if args.json {
        let json =
            serde_json::to_string_pretty(&summary).context("failed to encode match summary")?;
        println!("{json}");
    } else {
        println!("{summary}");
    }
    Ok(())
}

fn play(session: &SessionConfig) -> Result<MatchSummary> {
    let mut simulation = Simulation::new(session.world_config()?);
    let mut autopilot = Autopilot::new(
        derive_labeled_seed(session.seed, AUTOPILOT_STREAM),
        session.upgrades.clone(),
    );
    let dt = Duration::from_millis(session.frame_ms);
    let mut tally = Tally::default();

    info!(seed = session.seed, frames = session.frames, "starting headless match");
    tally.record(&simulation.start_match());

    for _ in 0..session.frames {
        let (intent, camera) = autopilot.steer(
            query::player(simulation.world()),
            &query::enemy_view(simulation.world()),
        );
        tally.record(&simulation.step(FrameInput {
            intent,
            camera,
            dt,
        }));

        match query::phase(simulation.world()) {
            GameState::UpgradeMenu => {
                let upgrade = autopilot.choose_upgrade();
                info!(?upgrade, "autopilot selected upgrade");
                tally.record(&simulation.select_upgrade(upgrade));
            }
            phase if phase.is_terminal() => break,
            _ => {}
        }
    }

    Ok(MatchSummary::capture(
        simulation.world(),
        simulation.frame(),
        tally,
    ))
}
