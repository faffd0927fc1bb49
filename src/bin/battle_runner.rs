//! Headless Battle Runner
//!
//! Musters two random forces, resolves one battle and prints the result.

use std::path::PathBuf;

use battle_sim::battle::Terrain;
use battle_sim::battle::terrain::SeaTerrain;
use battle_sim::dice::SeededSource;
use battle_sim::events::BattleEventLog;
use battle_sim::muster::{muster_armada, muster_army};
use battle_sim::{resolve_land_battle_with, resolve_naval_battle_with, EngineConfig};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Headless Battle Runner - random quick battles
#[derive(Parser, Debug)]
#[command(name = "battle_runner")]
#[command(about = "Resolve a random land or naval battle")]
struct Args {
    #[command(subcommand)]
    battle: BattleKind,

    /// Random seed for deterministic runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// TOML rules file overriding the published rules
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Print the battle narration
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum BattleKind {
    /// Two random armies
    Land {
        /// Terrain name, e.g. plains or jungle (random if omitted)
        #[arg(long)]
        terrain: Option<Terrain>,
    },
    /// Two random armadas
    Naval {
        /// Sea terrain name, e.g. open_seas or canal (random if omitted)
        #[arg(long)]
        terrain: Option<SeaTerrain>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// JSON output structure
#[derive(Serialize)]
struct RunOutput<T: Serialize> {
    seed: u64,
    result: T,
    narration: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("battle_sim=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> battle_sim::Result<()> {
    let config = match &args.rules {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    // Determine seed
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut source = SeededSource::seed_from_u64(seed.wrapping_add(1));
    let mut log = BattleEventLog::new();

    tracing::info!(seed, "Starting quick battle");

    match args.battle {
        BattleKind::Land { terrain } => {
            let terrain = terrain.unwrap_or_else(|| {
                Terrain::ALL[rand::Rng::gen_range(&mut rng, 0..Terrain::ALL.len())]
            });
            let mut red = muster_army("Red", &mut rng);
            let mut blue = muster_army("Blue", &mut rng);
            let result = resolve_land_battle_with(
                &config,
                &mut red,
                &mut blue,
                terrain,
                &mut source,
                &mut log,
            )?;

            match args.format {
                OutputFormat::Json => print_json(seed, &result, &log, args.verbose)?,
                OutputFormat::Text => {
                    print_narration(&log, args.verbose);
                    println!("Land Battle Result");
                    println!("==================");
                    println!("Terrain: {}", result.terrain);
                    println!("Winner: {}", result.outcome.winner_label());
                    println!("Loser: {}", result.outcome.loser_label());
                    println!("Rounds: {}", result.rounds);
                    for (force, lost) in &result.casualties {
                        println!("Casualties {force}: {}", join(lost));
                    }
                    println!("Destroyed in overrun: {}", join(&result.destroyed_in_overrun));
                    println!("Promoted: {}", join(&result.promoted_generals));
                    println!("Captured: {}", join(&result.captured_generals));
                    println!("Seed: {seed}");
                }
            }
        }
        BattleKind::Naval { terrain } => {
            let terrain = terrain.unwrap_or_else(|| {
                SeaTerrain::ALL[rand::Rng::gen_range(&mut rng, 0..SeaTerrain::ALL.len())]
            });
            let mut red = muster_armada("Red", &mut rng);
            let mut blue = muster_armada("Blue", &mut rng);
            let result = resolve_naval_battle_with(
                &config,
                &mut red,
                &mut blue,
                terrain,
                &mut source,
                &mut log,
            )?;

            match args.format {
                OutputFormat::Json => print_json(seed, &result, &log, args.verbose)?,
                OutputFormat::Text => {
                    print_narration(&log, args.verbose);
                    println!("Naval Battle Result");
                    println!("===================");
                    println!("Sea terrain: {}", result.sea_terrain);
                    println!("Outcome: {}", result.outcome);
                    println!("Rounds: {}", result.rounds);
                    for (force, wins) in &result.victories {
                        println!("Victories {force}: {wins}");
                    }
                    for (force, lost) in &result.sunk_ships {
                        println!("Ships lost {force}: {}", join(lost));
                    }
                    for ship in red.ships.iter().chain(&blue.ships) {
                        if !ship.damage_effects.is_empty() {
                            let effects: Vec<_> =
                                ship.damage_effects.iter().map(ToString::to_string).collect();
                            println!("Damage {}: {}", ship.id, effects.join(", "));
                        }
                    }
                    println!("Seed: {seed}");
                }
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(
    seed: u64,
    result: &T,
    log: &BattleEventLog,
    verbose: bool,
) -> battle_sim::Result<()> {
    let output = RunOutput {
        seed,
        result,
        narration: if verbose {
            log.lines().map(str::to_string).collect()
        } else {
            Vec::new()
        },
    };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| battle_sim::EngineError::InvalidInput(format!("cannot encode result: {e}")))?;
    println!("{json}");
    Ok(())
}

fn print_narration(log: &BattleEventLog, verbose: bool) {
    if !verbose {
        return;
    }
    for event in &log.events {
        println!("[{:>2}] {}", event.round, event.description);
    }
    println!();
}

fn join<T: ToString>(items: &[T]) -> String {
    if items.is_empty() {
        return "-".to_string();
    }
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
