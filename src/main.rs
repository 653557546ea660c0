//! Draughts-Rust: a draughts rules engine.
//!
//! ## Usage
//!
//! - `draughts-rust` - Start the command loop
//! - `draughts-rust play` - Start the command loop
//! - `draughts-rust demo` - Play one random game and print it
//!
//! Set `RUST_LOG=debug` to trace moves and undos on stderr.

use anyhow::Context;
use clap::{Parser, Subcommand};
use fastrand::Rng;
use tracing_subscriber::EnvFilter;

use draughts_rust::console::Console;
use draughts_rust::constants::{DEFAULT_COLS, DEFAULT_ROWS, MAX_EDGE, MAX_PLAYOUT_PLIES, MIN_EDGE};
use draughts_rust::game::Game;
use draughts_rust::playout::random_game;

/// Draughts-Rust: a draughts rules engine
#[derive(Parser)]
#[command(name = "draughts-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of board rows
    #[arg(long, default_value_t = DEFAULT_ROWS, value_parser = parse_edge)]
    rows: usize,

    /// Number of board columns
    #[arg(long, default_value_t = DEFAULT_COLS, value_parser = parse_edge)]
    cols: usize,

    /// Seed for random move selection
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the text command loop on stdin/stdout
    Play,
    /// Play one random game and print the result
    Demo {
        /// Stop after this many moves
        #[arg(long, default_value_t = MAX_PLAYOUT_PLIES)]
        max_plies: usize,
    },
}

fn parse_edge(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if (MIN_EDGE..=MAX_EDGE).contains(&n) {
        Ok(n)
    } else {
        Err(format!("must be between {MIN_EDGE} and {MAX_EDGE}"))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let rng = match cli.seed {
        Some(seed) => Rng::with_seed(seed),
        None => Rng::new(),
    };

    match cli.command {
        Some(Commands::Demo { max_plies }) => run_demo(cli.rows, cli.cols, rng, max_plies),
        Some(Commands::Play) | None => Console::new(cli.rows, cli.cols, rng)
            .run()
            .context("command loop failed"),
    }
}

fn run_demo(rows: usize, cols: usize, mut rng: Rng, max_plies: usize) -> anyhow::Result<()> {
    println!("Draughts-Rust: random game on {rows}x{cols}\n");

    let mut game = Game::with_size(rows, cols);
    println!("{game}");

    let result = random_game(&mut game, &mut rng, max_plies);

    println!("{game}");
    let journal: Vec<String> = game
        .journal()
        .moves()
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("Moves: {}", journal.join(" "));
    println!("Plies: {}, captures: {}", result.plies, result.captures);
    match result.winner {
        Some(color) => println!("Winner: {}", game.player_of(color)),
        None => println!("No winner after {max_plies} plies"),
    }
    Ok(())
}
