//! Line-oriented command protocol for playing from a terminal or a script.
//!
//! Every command gets one response: `= <text>` on success, `? <text>` on
//! failure, followed by a blank line. An optional numeric id before the
//! command is echoed back after the status character.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the loop
//! - `new` - Start a new game on the same board size
//! - `board` - Show the board
//! - `moves` - List legal moves, numbered from 1
//! - `play <n>` - Apply the n-th move of the `moves` listing
//! - `random` - Apply a random legal move
//! - `undo` - Take back the last move (a whole capture chain at once)
//! - `journal` - Show all applied moves
//! - `status` - Side to move, or the winner
//!
//! ## Example
//!
//! ```ignore
//! use draughts_rust::console::Console;
//! let mut console = Console::new(8, 8, fastrand::Rng::new());
//! console.run()?;
//! ```

use std::io::{self, BufRead, Write};

use fastrand::Rng;
use tracing::debug;

use crate::calculator::{legal_moves, outcome};
use crate::game::Game;
use crate::playout::choose_random_move;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "board",
    "journal",
    "known_command",
    "list_commands",
    "moves",
    "name",
    "new",
    "play",
    "quit",
    "random",
    "status",
    "undo",
    "version",
];

/// Console session state.
pub struct Console {
    game: Game,
    rng: Rng,
}

impl Console {
    pub fn new(rows: usize, cols: usize, rng: Rng) -> Self {
        Self {
            game: Game::with_size(rows, cols),
            rng,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(stdout, "{prefix}{id_str} {message}\n")?;
            stdout.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Split an optional numeric command id off the front of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        debug!(command, ?args, "console command");
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "new" => {
                self.game.restart();
                (true, String::new())
            }

            "board" => (true, format!("\n{}", self.game)),

            "moves" => {
                let listing = legal_moves(&self.game);
                if listing.is_empty() {
                    return (true, "no legal moves".to_string());
                }
                let lines: Vec<String> = listing
                    .iter()
                    .enumerate()
                    .map(|(i, mv)| format!("{}. {mv}", i + 1))
                    .collect();
                (true, lines.join("\n"))
            }

            "play" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let Ok(n) = arg.parse::<usize>() else {
                    return (false, "invalid move number".to_string());
                };
                let listing = legal_moves(&self.game);
                let Some(mv) = n.checked_sub(1).and_then(|i| listing.get(i)).copied() else {
                    return (false, format!("no move {n}, {} available", listing.len()));
                };
                match self.game.play_move(mv) {
                    Ok(()) => (true, mv.to_string()),
                    Err(err) => (false, err.to_string()),
                }
            }

            "random" => {
                let Some(mv) = choose_random_move(&self.game, &mut self.rng) else {
                    return (false, "no legal moves".to_string());
                };
                match self.game.play_move(mv) {
                    Ok(()) => (true, mv.to_string()),
                    Err(err) => (false, err.to_string()),
                }
            }

            "undo" => {
                if self.game.journal().is_empty() {
                    return (false, "nothing to undo".to_string());
                }
                self.game.undo();
                (true, String::new())
            }

            "journal" => {
                let moves: Vec<String> = self
                    .game
                    .journal()
                    .moves()
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                (true, moves.join(" "))
            }

            "status" => match outcome(&self.game) {
                Some(winner) => (true, format!("{} wins", self.game.player_of(winner))),
                None => (true, format!("{} to move", self.game.player())),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
