//! Engine command parser.
//!
//! Parses incoming protocol commands from raw text into structured
//! `Command` variants that the engine main loop can dispatch on.

use super::notation::parse_move;

/// A parsed command sent to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize the protocol handshake.
    Oxo,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Reset to an empty board with no history.
    NewGame,

    /// Start a game from the given board notation.
    Position { board: String },

    /// Play a move for the side to move.
    Play { cell: usize },

    /// Move to an earlier (or later) entry in the game history.
    JumpTo { index: usize },

    /// Search the current position and report the best move.
    Go,

    /// Report the game status line.
    Status,

    /// Print the current board.
    Display,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    match tokens[0] {
        "oxo" => Some(Command::Oxo),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "go" => Some(Command::Go),
        "status" => Some(Command::Status),
        "d" => Some(Command::Display),

        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(&tokens),
        "play" => parse_play(&tokens),
        "jumpto" => parse_jumpto(&tokens),

        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        eprintln!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                eprintln!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `position <board>`.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        eprintln!("malformed position: expected 'position <board>'");
        return None;
    }
    Some(Command::Position {
        board: tokens[1].to_string(),
    })
}

/// Parses `play <cell>` or `play <row>,<col>`.
fn parse_play(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        eprintln!("malformed play: expected 'play <move>'");
        return None;
    }
    // Allow "play 1, 2" as well as "play 1,2".
    let raw = tokens[1..].join("");
    match parse_move(&raw) {
        Ok(cell) => Some(Command::Play { cell }),
        Err(e) => {
            eprintln!("{}", e);
            None
        }
    }
}

/// Parses `jumpto <n>`.
fn parse_jumpto(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        eprintln!("malformed jumpto: expected 'jumpto <n>'");
        return None;
    }
    match tokens[1].parse::<usize>() {
        Ok(index) => Some(Command::JumpTo { index }),
        Err(_) => {
            eprintln!("invalid history index: '{}'", tokens[1]);
            None
        }
    }
}
