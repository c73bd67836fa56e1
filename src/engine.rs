//! Engine state management.
//!
//! Holds the current game, engine options, and runs the search for the
//! `go` command. With `AutoReply` enabled the engine answers every `play`
//! by searching and playing its own move, the way a human-vs-computer
//! front end drives it.

use std::collections::HashMap;
use std::io::{self, Write};

use crate::board::Mark;
use crate::game::Game;
use crate::protocol::notation::{encode_board, format_move, parse_board};
use crate::search::{search_with_info, SearchOptions, SearchResult};

/// Side the engine plays when answering moves automatically.
const DEFAULT_ENGINE_MARK: Mark = Mark::O;

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub game: Game,
    pub options: HashMap<String, String>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates a new engine on the empty board.
    pub fn new() -> Self {
        Engine {
            game: Game::new(),
            options: HashMap::new(),
        }
    }

    /// Resets the game to the empty board.
    pub fn new_game(&mut self) {
        self.game = Game::new();
    }

    /// Starts a new game from board notation.
    /// Returns an error message on failure and leaves the game untouched.
    pub fn set_position(&mut self, notation: &str) -> Result<(), String> {
        let board = parse_board(notation).map_err(|e| format!("failed to parse board: {}", e))?;
        self.game = Game::from_board(board);
        Ok(())
    }

    /// Sets an engine option.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Reads a boolean option. A bare `setoption name X` counts as true.
    fn flag(&self, name: &str, default: bool) -> bool {
        match self.options.get(name).map(|v| v.to_ascii_lowercase()) {
            Some(v) if v.is_empty() || v == "true" || v == "on" || v == "1" => true,
            Some(v) if v == "false" || v == "off" || v == "0" => false,
            _ => default,
        }
    }

    /// Returns the search options derived from engine options.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            pruning: self.flag("Pruning", true),
        }
    }

    fn auto_reply(&self) -> bool {
        self.flag("AutoReply", true)
    }

    /// The explicitly configured engine side, if any.
    fn engine_mark(&self) -> Option<Mark> {
        self.options
            .get("EngineMark")
            .and_then(|v| Mark::from_name(v))
    }

    /// Handles the protocol handshake: writes id, options, protocol_version, and oxook.
    pub fn handle_oxo<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name oxo")?;
        writeln!(out, "id author oxo")?;
        writeln!(out, "option name Pruning type check default true")?;
        writeln!(out, "option name AutoReply type check default true")?;
        writeln!(out, "option name EngineMark type combo default o var x var o")?;
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "oxook")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Searches the current board for `mark` and writes `info` and
    /// `bestmove` lines.
    fn run_search<W: Write>(&self, mark: Mark, out: &mut W) -> io::Result<SearchResult> {
        let (result, _) = search_with_info(self.game.board(), mark, &self.search_options(), out)?;
        writeln!(
            out,
            "bestmove {} score {}",
            format_move(result.best_move),
            result.score
        )?;
        out.flush()?;
        Ok(result)
    }

    /// Handles the `go` command for the side to move. Prints nothing when
    /// `EngineMark` names the other side. Does not change the game.
    pub fn handle_go<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mark = self.game.next_mark();
        if let Some(engine_mark) = self.engine_mark() {
            if engine_mark != mark {
                eprintln!(
                    "go: engine plays {} but {} is to move",
                    engine_mark.name(),
                    mark.name()
                );
                return Ok(());
            }
        }
        self.run_search(mark, out).map(|_| ())
    }

    /// Handles `play`: applies the move and, with `AutoReply`, the
    /// engine's answer.
    pub fn handle_play<W: Write>(&mut self, cell: usize, out: &mut W) -> io::Result<()> {
        if let Err(e) = self.game.play(cell) {
            eprintln!("play: {}", e);
            return Ok(());
        }

        let engine_mark = self.engine_mark().unwrap_or(DEFAULT_ENGINE_MARK);
        if !self.auto_reply() || self.game.is_over() || self.game.next_mark() != engine_mark {
            return Ok(());
        }

        let result = self.run_search(engine_mark, out)?;
        if let Some(reply) = result.best_move {
            if let Err(e) = self.game.play(reply) {
                eprintln!("auto reply: {}", e);
            }
        }
        Ok(())
    }

    /// Handles `jumpto`.
    pub fn handle_jumpto(&mut self, index: usize) {
        if let Err(e) = self.game.jump_to(index) {
            eprintln!("jumpto: {}", e);
        }
    }

    /// Handles `status`.
    pub fn handle_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "status {}", self.game.status())?;
        out.flush()
    }

    /// Handles `d`.
    pub fn handle_display<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "board {}", encode_board(self.game.board()))?;
        out.flush()
    }
}
