//! Parlor simulation CLI
//!
//! Runs seeded batches against the game engines and prints aggregate
//! house-edge statistics.

use clap::{Parser, Subcommand};
use parlor::simulate::{render_batch, render_sweep, SimulationHarness};
use parlor::{GameKind, ParlorConfig, ParlorError, RandomSource, SeededRandom, ThreadRandom};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "parlor", about = "Simulated casino engine", version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a batch of rounds for one game, or sweep every game
    Simulate {
        /// Game to simulate (sweeps all games when omitted)
        #[arg(long)]
        game: Option<String>,

        /// Rounds per game
        #[arg(long, default_value_t = 1000)]
        rounds: usize,

        /// Stake per round (config default when omitted)
        #[arg(long)]
        stake: Option<f64>,

        /// RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the active configuration as TOML
    Config,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ParlorConfig::load(path)?,
        None => ParlorConfig::default(),
    };
    config.validate()?;

    match cli.command {
        Command::Simulate {
            game,
            rounds,
            stake,
            seed,
        } => {
            let stake = stake.unwrap_or(config.games.default_stake);
            let mut rng: Box<dyn RandomSource> = match seed {
                Some(seed) => Box::new(SeededRandom::from_seed(seed)),
                None => Box::new(ThreadRandom::new()),
            };
            let harness = SimulationHarness::new(config);

            match game {
                Some(name) => {
                    let game: GameKind =
                        name.parse().map_err(ParlorError::InvalidSelection)?;
                    println!("🎰 {} x{} rounds at stake {}", game, rounds, stake);
                    let report = harness.run_batch(rng.as_mut(), game, rounds, stake)?;
                    println!("{}", render_batch(&report));
                }
                None => {
                    println!("🎰 sweeping all games, {} rounds each at stake {}", rounds, stake);
                    let sweep = harness.run_sweep(rng.as_mut(), rounds, stake)?;
                    print!("{}", render_sweep(&sweep));
                }
            }
        }
        Command::Config => {
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| ParlorError::Config(e.to_string()))?;
            print!("{}", rendered);
        }
    }

    Ok(())
}
