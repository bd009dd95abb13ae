#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a headless Merge Defence match.

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{ensure, Context, Result};
use clap::{ArgAction, Parser};
use merge_defence_core::{GameState, Side};
use merge_defence_headless::{Settings, Simulation};
use merge_defence_world::{query, SimulationConfig};
use serde::Serialize;
use tracing::{info, warn, Level};

/// Runs a match between the opponent loop and an optional autoplayed player.
#[derive(Debug, Parser)]
#[command(name = "merge-defence", version)]
struct Cli {
    /// Seed every random stream derives from.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Simulated seconds to run; the run stops earlier on game over.
    #[arg(long, default_value_t = 120)]
    seconds: u64,
    /// Length of one simulated frame in milliseconds.
    #[arg(long, default_value_t = 20)]
    frame_ms: u64,
    /// TOML file overriding the default world tuning.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Let the opponent loop play the player's board as well.
    #[arg(long)]
    autoplay: bool,
    /// Print every notification as a JSON line while running.
    #[arg(long)]
    notifications: bool,
    /// Print the final summary as JSON.
    #[arg(long)]
    json: bool,
    /// Raise log verbosity; repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    simulated_seconds: f64,
    state: GameState,
    wave_level: u32,
    monsters: u32,
    player_units: u32,
    opponent_units: u32,
    player_gold: u32,
    opponent_gold: u32,
    gem: u32,
}

/// Entry point for the Merge Defence command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    install_logging(cli.verbose);

    let world = load_config(cli.config.as_ref())?;
    ensure!(cli.frame_ms > 0, "--frame-ms must be positive");

    let mut simulation = Simulation::new(Settings {
        seed: cli.seed,
        world,
        autoplay: cli.autoplay,
        ..Settings::default()
    });
    if cli.notifications {
        let _ = simulation.subscribe(|notification| match serde_json::to_string(notification) {
            Ok(line) => println!("{line}"),
            Err(error) => warn!(%error, "notification could not be encoded"),
        });
    }

    let frame = Duration::from_millis(cli.frame_ms);
    let budget = Duration::from_secs(cli.seconds);
    let mut elapsed = Duration::ZERO;
    while elapsed < budget && !simulation.is_over() {
        let _ = simulation.step(frame);
        elapsed += frame;
    }
    info!(elapsed = ?elapsed, "run finished");

    let summary = summarize(&simulation, cli.seed, elapsed);
    if cli.json {
        let text =
            serde_json::to_string_pretty(&summary).context("failed to encode the run summary")?;
        println!("{text}");
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn install_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<SimulationConfig> {
    let Some(path) = path else {
        return Ok(SimulationConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
}

fn summarize(simulation: &Simulation, seed: u64, elapsed: Duration) -> Summary {
    let world = simulation.world();
    let status = query::wave_status(world);
    let economy = query::economy(world);
    Summary {
        seed,
        simulated_seconds: elapsed.as_secs_f64(),
        state: status.state,
        wave_level: status.wave_level,
        monsters: status.monster_count,
        player_units: query::unit_count(world, Side::Player),
        opponent_units: query::unit_count(world, Side::Opponent),
        player_gold: economy.player_gold,
        opponent_gold: economy.opponent_gold,
        gem: economy.gem,
    }
}

fn print_summary(summary: &Summary) {
    println!(
        "{:?} at wave {} after {:.1}s (seed {})",
        summary.state, summary.wave_level, summary.simulated_seconds, summary.seed
    );
    println!("monsters alive: {}", summary.monsters);
    println!(
        "player: {} units, {} gold, {} gems",
        summary.player_units, summary.player_gold, summary.gem
    );
    println!(
        "opponent: {} units, {} gold",
        summary.opponent_units, summary.opponent_gold
    );
}
