//! Line-oriented console game against a chess engine.
//!
//! Stdin is read on its own thread so the main loop can keep polling the
//! background search; `undo` and `reset` cancel a search in flight.

use std::io::{self, BufRead};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::{error, info};

use bramble_chess::engines::engine_negamax::{NegamaxEngine, SearchConfig, DEFAULT_SEARCH_DEPTH};
use bramble_chess::engines::engine_random::RandomEngine;
use bramble_chess::engines::engine_thread::{start_search, SearchHandle};
use bramble_chess::errors::ChessResult;
use bramble_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use bramble_chess::game_state::chess_types::Color;
use bramble_chess::game_state::game_state::GameState;
use bramble_chess::move_generation::legal_move_generator::LegalMoveGenerator;
use bramble_chess::move_generation::move_generator::MoveGenerator;
use bramble_chess::moves::move_descriptions::Move;
use bramble_chess::search::board_scoring::{evaluate, score_to_pawns};
use bramble_chess::search::threading::{default_worker_count, ThreadingConfig, ThreadingModel};
use bramble_chess::utils::long_algebraic::long_algebraic_to_move;
use bramble_chess::utils::render_game_state::render_game_state;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EnginePlays {
    White,
    Black,
    Both,
    None,
}

impl EnginePlays {
    fn controls(self, color: Color) -> bool {
        match self {
            EnginePlays::White => color == Color::Light,
            EnginePlays::Black => color == Color::Dark,
            EnginePlays::Both => true,
            EnginePlays::None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Opponent {
    /// Fixed-depth alpha-beta search.
    Negamax,
    /// Uniformly random legal moves.
    Random,
}

#[derive(Debug, Parser)]
#[command(version, about = "Play chess against a negamax or random engine")]
struct Cli {
    /// Search depth in plies.
    #[arg(short, long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    depth: u8,

    /// Worker threads for the root split (defaults to available cores - 1).
    #[arg(short, long)]
    threads: Option<usize>,

    /// Seed for the root move shuffle.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Which side the engine plays.
    #[arg(short, long, value_enum, default_value_t = EnginePlays::Black)]
    engine_plays: EnginePlays,

    /// Which engine answers the moves.
    #[arg(short, long, value_enum, default_value_t = Opponent::Negamax)]
    opponent: Opponent,

    /// Starting position.
    #[arg(short, long, default_value = STARTING_POSITION_FEN)]
    fen: String,
}

impl Cli {
    fn search_config(&self) -> SearchConfig {
        let threads = self.threads.unwrap_or_else(default_worker_count).max(1);
        let model = if threads == 1 {
            ThreadingModel::SingleThreaded
        } else {
            ThreadingModel::RootSplit
        };
        SearchConfig {
            depth: self.depth.max(1),
            threading: ThreadingConfig {
                model,
                requested_threads: threads,
            },
            seed: self.seed,
            ..SearchConfig::default()
        }
    }
}

struct Session {
    game: GameState,
    move_generator: LegalMoveGenerator,
    legal_moves: Vec<Move>,
    start_fen: String,
    config: SearchConfig,
    opponent: Opponent,
    engine_plays: EnginePlays,
    search: Option<SearchHandle>,
    /// Set by undo/reset so the engine waits for the next human move or `go`.
    engine_paused: bool,
}

impl Session {
    fn new(cli: &Cli) -> ChessResult<Self> {
        let mut game = GameState::from_fen(&cli.fen)?;
        let move_generator = LegalMoveGenerator;
        let legal_moves = move_generator.generate_legal_moves(&mut game);
        Ok(Self {
            game,
            move_generator,
            legal_moves,
            start_fen: cli.fen.clone(),
            config: cli.search_config(),
            opponent: cli.opponent,
            engine_plays: cli.engine_plays,
            search: None,
            engine_paused: false,
        })
    }

    fn game_over(&self) -> bool {
        self.game.checkmate || self.game.stalemate
    }

    fn engine_to_move(&self) -> bool {
        self.engine_plays.controls(self.game.side_to_move)
    }

    fn refresh_legal_moves(&mut self) {
        self.legal_moves = self.move_generator.generate_legal_moves(&mut self.game);
    }

    fn apply(&mut self, mv: Move) {
        self.game.make_move(mv);
        self.refresh_legal_moves();
        self.show();
    }

    fn cancel_search(&mut self) {
        if let Some(mut handle) = self.search.take() {
            handle.cancel();
            println!("search cancelled");
        }
    }

    fn show(&self) {
        println!("{}", render_game_state(&self.game));
        if let Some(last) = self.game.move_log().last() {
            println!("last move: {last}");
        }
        if self.game.checkmate {
            let winner = match self.game.side_to_move {
                Color::Light => "Black",
                Color::Dark => "White",
            };
            println!("{winner} wins by checkmate");
        } else if self.game.stalemate {
            println!("Stalemate");
        } else {
            let side = match self.game.side_to_move {
                Color::Light => "White",
                Color::Dark => "Black",
            };
            println!("{side} to move{}", if self.game.in_check { " (check)" } else { "" });
        }
    }

    fn maybe_start_search(&mut self) {
        if self.search.is_some() || self.engine_paused || self.game_over() || !self.engine_to_move() {
            return;
        }
        println!("engine is thinking...");
        let handle = match self.opponent {
            Opponent::Negamax => start_search(NegamaxEngine::new(self.config), &self.game),
            Opponent::Random => {
                let engine = self.config.seed.map_or_else(RandomEngine::new, RandomEngine::with_seed);
                start_search(engine, &self.game)
            }
        };
        self.search = Some(handle);
    }

    fn poll_search(&mut self) {
        let Some(handle) = self.search.as_mut() else {
            return;
        };
        let Some(result) = handle.try_result() else {
            return;
        };
        self.search = None;

        match result {
            Ok(output) => match output.best_move {
                Some(mv) => self.apply(mv),
                None => info!("engine has no move to play"),
            },
            Err(err) => error!("search failed: {err}"),
        }
    }

    /// Returns `false` once the user asks to quit.
    fn handle_command(&mut self, line: &str) -> bool {
        match line {
            "" => {}
            "quit" | "exit" => return false,
            "undo" => {
                self.cancel_search();
                if self.game.undo_move().is_some() {
                    self.refresh_legal_moves();
                    self.engine_paused = true;
                    self.show();
                } else {
                    println!("nothing to undo");
                }
            }
            "reset" => {
                self.cancel_search();
                match GameState::from_fen(&self.start_fen) {
                    Ok(game) => {
                        self.game = game;
                        self.refresh_legal_moves();
                        self.engine_paused = true;
                        self.show();
                    }
                    Err(err) => error!("{err}"),
                }
            }
            "go" => self.engine_paused = false,
            "moves" => {
                let listed: Vec<String> = self.legal_moves.iter().map(Move::to_long_algebraic).collect();
                println!("{}", listed.join(" "));
            }
            "eval" => {
                let score = evaluate(&mut self.game.clone());
                println!("evaluation: {:+.3}", score_to_pawns(score));
            }
            "fen" => println!("{}", self.game.get_fen()),
            "board" => self.show(),
            text => {
                if self.search.is_some() || self.engine_to_move() {
                    println!("it is the engine's turn; type `go` to let it move");
                    return true;
                }
                match long_algebraic_to_move(text, &self.legal_moves) {
                    Ok(mv) => {
                        self.engine_paused = false;
                        self.apply(mv);
                    }
                    Err(err) => println!("{err}"),
                }
            }
        }
        true
    }
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line.trim().to_owned()).is_err() {
                break;
            }
        }
    });
    rx
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut session = match Session::new(&cli) {
        Ok(session) => session,
        Err(err) => {
            error!("{err}");
            std::process::exit(2);
        }
    };

    println!("commands: <move> (e.g. e2e4), moves, undo, reset, go, eval, fen, board, quit");
    session.show();

    let input = spawn_stdin_reader();

    loop {
        session.maybe_start_search();
        session.poll_search();

        match input.recv_timeout(POLL_INTERVAL) {
            Ok(line) => {
                if !session.handle_command(&line) {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                // Stdin closed: let a pending engine move land, then stop.
                if let Some(handle) = session.search.take() {
                    if let Ok(output) = handle.wait() {
                        if let Some(mv) = output.best_move {
                            session.apply(mv);
                        }
                    }
                }
                break;
            }
        }
    }

    session.cancel_search();
}
