//! Renju engine command line
//!
//! Boards are read in the rendering format printed by the engine: 15 rows
//! of `.`, `X` (black) and `O` (white), with optional row and column
//! numbers. Set `RUST_LOG=debug` to follow the search.

use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use serde::Serialize;

use renju::eval::{evaluate_with, is_endgame, is_opening, PatternCounts};
use renju::rules::forbidden_points;
use renju::{AIEngine, BestMove, Board, Difficulty, EvalMode, ForbiddenKind, Pos, Stone};

#[derive(Debug, Parser)]
#[command(name = "renju", version, about = "15x15 renju engine")]
struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recommend a move for a position
    Best {
        /// Board file, stdin when omitted
        #[arg(long)]
        board: Option<PathBuf>,
        /// Side to move: black or white
        #[arg(long, default_value = "black")]
        color: Stone,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// List the forbidden points of a position
    Forbidden {
        #[arg(long)]
        board: Option<PathBuf>,
        #[arg(long, default_value = "black")]
        color: Stone,
    },
    /// Static evaluation of both sides
    Eval {
        #[arg(long)]
        board: Option<PathBuf>,
        #[arg(long)]
        adaptive: bool,
    },
    /// Let the engine play both sides from the empty board
    Selfplay {
        /// Stop after this many moves
        #[arg(long, default_value_t = 225)]
        max_moves: usize,
        #[command(flatten)]
        search: SearchArgs,
    },
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// easy, medium, hard or master
    #[arg(long, default_value = "hard")]
    difficulty: Difficulty,
    /// Override the preset depth
    #[arg(long)]
    depth: Option<i8>,
    /// Override the preset time budget
    #[arg(long)]
    time_ms: Option<u64>,
    /// Use the phase-aware evaluator
    #[arg(long)]
    adaptive: bool,
}

impl SearchArgs {
    fn engine(&self) -> AIEngine {
        let mut engine = AIEngine::new(self.difficulty);
        let config = engine.config_mut();
        if let Some(depth) = self.depth {
            config.max_depth = depth.max(1);
        }
        if let Some(ms) = self.time_ms {
            config.time_limit = Duration::from_millis(ms);
        }
        if self.adaptive {
            config.evaluation = EvalMode::Adaptive;
        }
        engine
    }
}

#[derive(Debug, Serialize)]
struct ForbiddenPoint {
    pos: Pos,
    kind: ForbiddenKind,
}

#[derive(Debug, Serialize)]
struct EvalReport {
    phase: &'static str,
    black: i32,
    white: i32,
    black_threatening: bool,
    white_threatening: bool,
}

fn read_board(path: Option<&PathBuf>) -> Result<Board, Box<dyn Error>> {
    let text = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    Ok(text.parse()?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_best(board: &Board, color: Stone, search: &SearchArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let mut engine = search.engine();
    engine.sync_from_grid(&board.snapshot());
    let result = engine.best_move(color);
    if json {
        return print_json(&result);
    }
    match result.pos {
        Some(pos) => println!("{pos}"),
        None => println!("no move"),
    }
    println!("{} ({:?}, score {}, {}ms)", result.rationale, result.kind, result.score, result.time_ms);
    Ok(())
}

fn run_forbidden(board: &Board, color: Stone, json: bool) -> Result<(), Box<dyn Error>> {
    let points: Vec<ForbiddenPoint> = forbidden_points(board, color)
        .into_iter()
        .map(|(pos, kind)| ForbiddenPoint { pos, kind })
        .collect();
    if json {
        return print_json(&points);
    }
    if points.is_empty() {
        println!("no forbidden points for {color:?}");
    }
    for point in &points {
        println!("{} {}", point.pos, point.kind);
    }
    Ok(())
}

fn run_eval(board: &Board, adaptive: bool, json: bool) -> Result<(), Box<dyn Error>> {
    let mode = if adaptive { EvalMode::Adaptive } else { EvalMode::Standard };
    let phase = if is_opening(board) {
        "opening"
    } else if is_endgame(board) {
        "endgame"
    } else {
        "middlegame"
    };
    let report = EvalReport {
        phase,
        black: evaluate_with(board, Stone::Black, mode),
        white: evaluate_with(board, Stone::White, mode),
        black_threatening: PatternCounts::scan(board, Stone::Black).is_threatening(),
        white_threatening: PatternCounts::scan(board, Stone::White).is_threatening(),
    };
    if json {
        return print_json(&report);
    }
    println!("phase {:>12}", report.phase);
    println!("black {:>12}{}", report.black, if report.black_threatening { "  (threat)" } else { "" });
    println!("white {:>12}{}", report.white, if report.white_threatening { "  (threat)" } else { "" });
    Ok(())
}

/// Alternate moves from the current position until the game ends. Every
/// returned move has been applied to the board.
fn play_out(engine: &mut AIEngine, max_moves: usize, verbose: bool) -> Vec<BestMove> {
    let mut history = Vec::new();
    let mut color = if engine.board().move_count() % 2 == 0 {
        Stone::Black
    } else {
        Stone::White
    };

    while history.len() < max_moves && !engine.is_game_over() {
        let result = engine.best_move(color);
        let Some(pos) = result.pos else {
            break;
        };
        if let Some(kind) = engine.forbidden_kind(pos.row as i32, pos.col as i32, color) {
            info!("{color:?} has only the forbidden point {pos} ({kind}) left");
            break;
        }
        if !engine.apply_move(pos.row as i32, pos.col as i32, color) {
            warn!("{color:?} move {pos} was rejected by the board");
            break;
        }
        if verbose {
            println!("{}. {color:?} {pos}: {}", history.len() + 1, result.rationale);
            println!("{}", engine.render());
        }
        history.push(result);
        color = color.opponent();
    }
    history
}

fn run_selfplay(max_moves: usize, search: &SearchArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let mut engine = search.engine();
    let history = play_out(&mut engine, max_moves, !json);

    if json {
        return print_json(&history);
    }
    match engine.winner() {
        Some(winner) => println!("{winner:?} wins after {} moves", history.len()),
        None => println!("no winner after {} moves", history.len()),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Command::Best { board, color, search } => {
            let board = read_board(board.as_ref())?;
            run_best(&board, *color, search, cli.json)
        }
        Command::Forbidden { board, color } => {
            let board = read_board(board.as_ref())?;
            run_forbidden(&board, *color, cli.json)
        }
        Command::Eval { board, adaptive } => {
            let board = read_board(board.as_ref())?;
            run_eval(&board, *adaptive, cli.json)
        }
        Command::Selfplay { max_moves, search } => run_selfplay(*max_moves, search, cli.json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_args() -> SearchArgs {
        SearchArgs {
            difficulty: Difficulty::Easy,
            depth: Some(1),
            time_ms: Some(500),
            adaptive: false,
        }
    }

    #[test]
    fn test_play_out_applies_every_move() {
        let mut engine = quick_args().engine();
        let history = play_out(&mut engine, 6, false);
        assert_eq!(history.len(), 6);
        assert_eq!(engine.board().move_count(), history.len());
        assert_eq!(history[0].pos, Some(Pos::new(7, 7)));
    }

    #[test]
    fn test_play_out_stops_on_finished_game() {
        let mut engine = quick_args().engine();
        for col in 3..8 {
            assert!(engine.apply_move(7, col, Stone::White));
        }
        assert!(play_out(&mut engine, 10, false).is_empty());
        assert_eq!(engine.board().move_count(), 5);
    }

    #[test]
    fn test_search_args_override_preset() {
        let engine = quick_args().engine();
        assert_eq!(engine.config().max_depth, 1);
        assert_eq!(engine.config().time_limit, Duration::from_millis(500));
        assert_eq!(engine.config().evaluation, EvalMode::Standard);
    }
}
