//! Block Bounce entry point
//!
//! Runs a headless session driven by the tracking autopilot. Pass a JSON
//! config path as the first argument to override the default layout.

use anyhow::{Context, Result};

use block_bounce::Config;
use block_bounce::runner::{TrackingController, run_with};
use block_bounce::sim::{GameEvent, GameState};

/// Upper bound so an endless rally still terminates (about ten minutes at 60 Hz)
const MAX_TICKS: u64 = 60 * 60 * 10;

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Block Bounce (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path).with_context(|| format!("loading config {path}"))?,
        None => Config::default(),
    };

    let mut state = GameState::from_config(&config).context("building session")?;
    let mut autopilot = TrackingController::default();

    let summary = run_with(&mut state, &mut autopilot, MAX_TICKS, |view, events| {
        for event in events {
            match event {
                GameEvent::BlockHit { index } => {
                    log::debug!("tick {}: block {} ({} left)", view.time_ticks, index, view.blocks.len())
                }
                other => log::trace!("tick {}: {:?}", view.time_ticks, other),
            }
        }
    })
    .context("driving session")?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    log::debug!("final frame: {}", serde_json::to_string(&state.snapshot())?);
    Ok(())
}
