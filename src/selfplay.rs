//! Self-play game generation.
//!
//! Plays complete games with the engine on one side and either a uniformly
//! random player or the engine itself on the other. Records every move and
//! the result so a batch run doubles as a regression check: a correct
//! engine never loses.

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::board::Mark;
use crate::eval::Outcome;
use crate::game::Game;
use crate::protocol::notation::encode_board;
use crate::search::{search, SearchOptions};

/// Who plays against the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Opponent {
    Random,
    Engine,
}

impl Opponent {
    pub fn from_name(s: &str) -> Option<Opponent> {
        match s {
            "random" => Some(Opponent::Random),
            "engine" => Some(Opponent::Engine),
            _ => None,
        }
    }
}

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Mark the engine plays. X always moves first.
    pub engine_mark: Mark,
    pub opponent: Opponent,
    /// Opening plies chosen at random for both sides, so engine-vs-engine
    /// games are not all identical.
    pub random_plies: usize,
    /// Whether the engine searches with alpha-beta cutoffs.
    pub pruning: bool,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 100,
            engine_mark: Mark::O,
            opponent: Opponent::Random,
            random_plies: 0,
            pruning: true,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// A complete self-play game record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    pub engine: Mark,
    pub opponent: Opponent,
    /// Cells played, in order, starting with X.
    pub moves: Vec<usize>,
    /// Winning mark, or `None` for a draw.
    pub winner: Option<Mark>,
    /// Final position in board notation.
    pub final_board: String,
    /// Total nodes searched by the engine over the game.
    pub nodes: u64,
}

impl GameRecord {
    /// True if the engine's opponent won.
    pub fn engine_lost(&self) -> bool {
        matches!(self.winner, Some(w) if w != self.engine)
    }

    fn outcome_text(&self) -> String {
        match self.winner {
            Some(w) => Outcome::Win(w).to_string(),
            None => Outcome::Draw.to_string(),
        }
    }
}

/// Aggregate results over a batch of games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub engine_losses: usize,
}

impl Summary {
    pub fn from_games(games: &[GameRecord]) -> Self {
        let mut s = Summary {
            games: games.len(),
            ..Summary::default()
        };
        for g in games {
            match g.winner {
                Some(Mark::X) => s.x_wins += 1,
                Some(Mark::O) => s.o_wins += 1,
                _ => s.draws += 1,
            }
            if g.engine_lost() {
                s.engine_losses += 1;
            }
        }
        s
    }
}

/// Plays a single game and returns its record.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let options = SearchOptions {
        pruning: config.pruning,
    };
    let mut game = Game::new();
    let mut nodes = 0u64;

    while !game.is_over() {
        let to_move = game.next_mark();
        let engine_turn = to_move == config.engine_mark || config.opponent == Opponent::Engine;
        let opening = game.current_move() < config.random_plies;

        let cell = if engine_turn && !opening {
            let (result, info) = search(game.board(), to_move, &options);
            nodes += info.nodes;
            result.best_move
        } else {
            game.board().empty_cells().choose(rng)
        };

        let Some(cell) = cell else {
            break;
        };
        if let Err(e) = game.play(cell) {
            eprintln!("game {}: {}", game_id, e);
            break;
        }
    }

    let winner = match game.outcome() {
        Some(Outcome::Win(mark)) => Some(mark),
        _ => None,
    };

    GameRecord {
        game_id,
        engine: config.engine_mark,
        opponent: config.opponent,
        moves: game.moves(),
        winner,
        final_board: encode_board(game.board()),
        nodes,
    }
}

fn game_rng(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn report(game: &GameRecord, n: usize, total: usize, started: Instant) {
    eprintln!(
        "Game {}/{}: {} in {} moves ({:.1}ms)",
        n,
        total,
        game.outcome_text(),
        game.moves.len(),
        started.elapsed().as_secs_f64() * 1000.0,
    );
}

/// Runs self-play generation, producing multiple game records in game-ID
/// order.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Vec<GameRecord> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    });
    games.sort_by_key(|g| g.game_id);
    games
}

/// Runs self-play generation, calling `on_game` with each completed game
/// record as soon as it finishes.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_self_play_parallel(config, on_game);
    } else {
        run_self_play_sequential(config, on_game);
    }
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let mut rng = game_rng(config.seed, i);
        let started = Instant::now();
        let game = play_game(config, i, &mut rng);
        if !config.quiet {
            report(&game, i + 1, config.num_games, started);
        }
        on_game(game);
    }
}

/// Parallel self-play: plays games concurrently using rayon.
/// Uses a channel to deliver completed games to the callback from worker threads.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("failed to build thread pool ({}), running sequentially", e);
            run_self_play_sequential(config, on_game);
            return;
        }
    };

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    std::thread::scope(|scope| {
        scope.spawn(|| {
            pool.install(|| {
                (0..config.num_games)
                    .into_par_iter()
                    .for_each_with(tx, |tx, i| {
                        let mut rng = game_rng(config.seed, i);
                        let started = Instant::now();
                        let game = play_game(config, i, &mut rng);
                        if !config.quiet {
                            let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                            report(&game, n, config.num_games, started);
                        }
                        let _ = tx.send(game);
                    });
            });
        });

        // Receive completed games on this thread and pass to callback.
        for game in rx {
            on_game(game);
        }
    });
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Prints an aggregate summary to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let s = Summary::from_games(games);
    eprintln!("--- Summary ---");
    eprintln!("Games:         {}", s.games);
    eprintln!("X wins:        {}", s.x_wins);
    eprintln!("O wins:        {}", s.o_wins);
    eprintln!("Draws:         {}", s.draws);
    eprintln!("Engine losses: {}", s.engine_losses);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> SelfPlayConfig {
        SelfPlayConfig {
            num_games: 20,
            threads: 1,
            seed: 7,
            quiet: true,
            ..SelfPlayConfig::default()
        }
    }

    #[test]
    fn engine_never_loses_to_random_as_o() {
        let games = run_self_play(&quiet_config());
        assert_eq!(games.len(), 20);
        assert!(games.iter().all(|g| !g.engine_lost()), "engine lost a game");
    }

    #[test]
    fn engine_never_loses_to_random_as_x() {
        let config = SelfPlayConfig {
            engine_mark: Mark::X,
            ..quiet_config()
        };
        let games = run_self_play(&config);
        assert!(games.iter().all(|g| !g.engine_lost()));
    }

    #[test]
    fn engine_vs_engine_always_draws() {
        let config = SelfPlayConfig {
            opponent: Opponent::Engine,
            num_games: 1,
            ..quiet_config()
        };
        let games = run_self_play(&config);
        assert_eq!(games[0].winner, None);
        assert_eq!(games[0].moves.len(), 9);
        assert_eq!(games[0].moves[0], 0);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let a = run_self_play(&quiet_config());
        let b = run_self_play(&quiet_config());
        assert_eq!(a, b);
    }

    #[test]
    fn parallel_matches_sequential() {
        let sequential = run_self_play(&quiet_config());
        let parallel = run_self_play(&SelfPlayConfig {
            threads: 4,
            ..quiet_config()
        });
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn moves_replay_to_final_board() {
        let games = run_self_play(&quiet_config());
        for g in &games {
            let mut game = Game::new();
            for &cell in &g.moves {
                game.play(cell).unwrap();
            }
            assert_eq!(encode_board(game.board()), g.final_board);
        }
    }

    #[test]
    fn summary_counts_results() {
        let games = run_self_play(&quiet_config());
        let s = Summary::from_games(&games);
        assert_eq!(s.games, 20);
        assert_eq!(s.x_wins + s.o_wins + s.draws, 20);
        assert_eq!(s.engine_losses, 0);
    }

    #[test]
    fn jsonl_has_one_line_per_game() {
        let games = run_self_play(&SelfPlayConfig {
            num_games: 3,
            ..quiet_config()
        });
        let mut out = Vec::new();
        write_jsonl(&games, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);

        let first: GameRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, games[0]);
        assert!(lines[0].contains("\"opponent\":\"random\""));
    }
}
