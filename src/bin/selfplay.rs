//! Self-play game generation CLI.
//!
//! Plays games with the engine against a random or engine opponent and
//! outputs the game records as JSONL.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N         Number of games to play (default: 100)
//!   --engine-mark M   Mark the engine plays, x or o (default: o)
//!   --opponent KIND   random or engine (default: random)
//!   --random-plies N  Opening plies played at random (default: 0)
//!   --no-pruning      Search without alpha-beta cutoffs
//!   --threads N       Number of parallel threads (default: 4)
//!   --seed N          Random seed, 0 for entropy (default: 0)
//!   --output FILE     Output file path (default: stdout)
//!   --quiet           Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use oxo::board::Mark;
use oxo::selfplay::{self, Opponent, SelfPlayConfig, Summary};

/// Parses the value following a flag, exiting with usage on failure.
fn value_of<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).and_then(|v| v.parse().ok()) {
        Some(v) => v,
        None => {
            eprintln!("invalid {} value", flag);
            print_usage();
            process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = value_of(&args, i, "--games");
            }
            "--engine-mark" => {
                i += 1;
                let raw: String = value_of(&args, i, "--engine-mark");
                config.engine_mark = match Mark::from_name(&raw) {
                    Some(m) => m,
                    None => {
                        eprintln!("invalid --engine-mark value: '{}'", raw);
                        process::exit(1);
                    }
                };
            }
            "--opponent" => {
                i += 1;
                let raw: String = value_of(&args, i, "--opponent");
                config.opponent = match Opponent::from_name(&raw) {
                    Some(o) => o,
                    None => {
                        eprintln!("invalid --opponent value: '{}'", raw);
                        process::exit(1);
                    }
                };
            }
            "--random-plies" => {
                i += 1;
                config.random_plies = value_of(&args, i, "--random-plies");
            }
            "--no-pruning" => {
                config.pruning = false;
            }
            "--threads" => {
                i += 1;
                config.threads = value_of(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = value_of(&args, i, "--seed");
            }
            "--output" => {
                i += 1;
                output_path = Some(value_of(&args, i, "--output"));
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if !config.quiet {
        eprintln!(
            "Self-play: {} games, engine {} vs {:?}, {} random plies, pruning {}, {} threads",
            config.num_games,
            config.engine_mark.name(),
            config.opponent,
            config.random_plies,
            config.pruning,
            config.threads
        );
    }

    let start = Instant::now();
    let games = selfplay::run_self_play(&config);
    let elapsed = start.elapsed();

    if !config.quiet {
        eprintln!(
            "Completed {} games in {:.2}s",
            games.len(),
            elapsed.as_secs_f64()
        );
        selfplay::print_summary(&games);
    }

    let written = match &output_path {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&games, &mut writer)
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)
        }
    };

    match (written, output_path) {
        (Err(e), _) => {
            eprintln!("failed to write output: {}", e);
            process::exit(1);
        }
        (Ok(()), Some(path)) if !config.quiet => {
            eprintln!("Wrote {} games to {}", games.len(), path);
        }
        _ => {}
    }

    if Summary::from_games(&games).engine_losses > 0 {
        process::exit(2);
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N         Number of games to play (default: 100)");
    eprintln!("  --engine-mark M   Mark the engine plays, x or o (default: o)");
    eprintln!("  --opponent KIND   random or engine (default: random)");
    eprintln!("  --random-plies N  Opening plies played at random (default: 0)");
    eprintln!("  --no-pruning      Search without alpha-beta cutoffs");
    eprintln!("  --threads N       Number of parallel threads (default: 4)");
    eprintln!("  --seed N          Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE     Output file path (default: stdout)");
    eprintln!("  --quiet           Suppress progress and summary output");
    eprintln!("  --help            Show this help");
}
