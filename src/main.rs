//! Space Game entry point
//!
//! Runs a headless game: the demo autopilot flies the ship, frames are
//! presented to the log renderer and sounds to the log audio device.
//!
//! Usage:
//!   RUST_LOG=info space-game --seed 7 --max-frames 3600
//!   space-game --assets ./Assets --config tuning.json --virtual-time

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use space_game::assets::{self, BuiltinAssets, DirectoryAssets, LoadedAssets};
use space_game::audio::LogAudio;
use space_game::platform::{Autopilot, Clock, ManualClock, SystemClock};
use space_game::renderer::LogRenderer;
use space_game::runner::Game;
use space_game::sim::World;

#[derive(Parser)]
#[command(name = "space-game")]
#[command(about = "Shoot the drifting enemies, dodge them, and keep your lives")]
struct Args {
    /// Run seed; random if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with `settings` and `tuning` sections
    #[arg(long)]
    config: Option<PathBuf>,

    /// Asset directory; builtin defaults if omitted
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// Do not sleep between frames; time advances by the frame budget
    #[arg(long)]
    virtual_time: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let loaded = match &args.assets {
        Some(dir) => assets::resolve(&DirectoryAssets::new(dir), args.config.as_deref())
            .inspect_err(|e| log::error!("Startup failed: {e}"))
            .with_context(|| format!("loading assets from {}", dir.display()))?,
        None => assets::resolve(&BuiltinAssets, args.config.as_deref())
            .inspect_err(|e| log::error!("Startup failed: {e}"))
            .context("loading builtin assets")?,
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!(
        "Space Game starting: seed {}, {} enemies, {} lives",
        seed,
        loaded.tuning.enemy.count,
        loaded.tuning.ship.lives
    );

    let frames = if args.virtual_time {
        play(loaded, seed, ManualClock::new(), args.max_frames)
    } else {
        play(loaded, seed, SystemClock::new(), args.max_frames)
    };
    log::info!("Stopped after {} frames", frames);
    Ok(())
}

fn play(loaded: LoadedAssets, seed: u64, clock: impl Clock, max_frames: Option<u64>) -> u64 {
    let world = World::new(seed, loaded.tuning);
    let mut game = Game::new(
        world,
        loaded.settings,
        Autopilot::new(seed),
        LogRenderer::new(),
        LogAudio::default(),
        clock,
    );
    game.run(max_frames)
}
