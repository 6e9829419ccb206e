//! Lane Dash headless runner
//!
//! Drives the simulation at a fixed step, with the built-in pilot at the
//! controls by default, and records the final score in the score book.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use lane_dash::sim::{GameState, TickInput, tick};
use lane_dash::{Preset, ScoreBook, SimulationConfig};

/// Run a Lane Dash simulation without a display
#[derive(Debug, Parser)]
#[command(name = "lane-dash", version, about)]
struct Args {
    /// Run seed (random if not set)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Game variant: classic or campus
    #[arg(short, long, default_value = "classic")]
    preset: Preset,

    /// JSON config file; overrides the preset
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Stop after this many ticks even if the run is still going
    #[arg(long, default_value_t = 60 * 60 * 5)]
    max_ticks: u64,

    /// Disable the built-in pilot (the run only ends on a crash or the tick cap)
    #[arg(long)]
    manual: bool,

    /// Score book location
    #[arg(long, value_name = "FILE", default_value = "lane-dash-scores.json")]
    scores: PathBuf,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (config, source) = match &args.config {
        Some(path) => (
            SimulationConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            path.display().to_string(),
        ),
        None => (
            SimulationConfig::from_preset(args.preset),
            format!("{} preset", args.preset.as_str()),
        ),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Lane Dash ({}) starting, seed {}", source, seed);

    let mut state = GameState::new(config, seed)?;
    let frame_ms = state.config.frame_ms();
    let input = TickInput {
        autopilot: !args.manual,
        ..Default::default()
    };

    let mut snapshot = state.snapshot(Vec::new());
    while snapshot.alive && state.tick_count < args.max_ticks {
        snapshot = tick(&mut state, &input, frame_ms);
    }
    log::info!(
        "Run finished after {} ticks: score {}, alive {}",
        state.tick_count,
        state.current_score(),
        state.is_alive()
    );

    let mut book = ScoreBook::load(&args.scores)?;
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let rank = book.record(state.current_score(), state.tick_count, timestamp);
    book.save(&args.scores)
        .with_context(|| format!("saving scores to {}", args.scores.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!(
            "Game over! Score: {}   Highscore: {}",
            book.last_score, book.high_score
        );
        if let Some(rank) = rank {
            println!("New leaderboard entry at #{rank}");
        }
    }
    Ok(())
}
