//! oxo -- a noughts-and-crosses engine speaking a line-oriented text protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr.

use std::io::{self, BufRead};

use oxo::engine::Engine;
use oxo::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        let written = match cmd {
            Command::Oxo => engine.handle_oxo(&mut out),
            Command::IsReady => engine.handle_isready(&mut out),
            Command::SetOption { name, value } => {
                engine.set_option(name, value);
                Ok(())
            }
            Command::NewGame => {
                engine.new_game();
                Ok(())
            }
            Command::Position { board } => {
                if let Err(e) = engine.set_position(&board) {
                    eprintln!("{}", e);
                }
                Ok(())
            }
            Command::Play { cell } => engine.handle_play(cell, &mut out),
            Command::JumpTo { index } => {
                engine.handle_jumpto(index);
                Ok(())
            }
            Command::Go => engine.handle_go(&mut out),
            Command::Status => engine.handle_status(&mut out),
            Command::Display => engine.handle_display(&mut out),
            Command::Quit => break,
        };

        if let Err(e) = written {
            eprintln!("output error: {}", e);
            break;
        }
    }
}
