use std::process;

use clap::Parser;

use oxo::game::{Board, ClassicState, ExtremeState, ParseBoardError};
use oxo::logging;
use oxo::search::Minimax;

#[derive(Parser)]
#[clap(
    name = "oxo solve",
    about = "Find the best move for a board position given as text."
)]
struct Opts {
    /// Board as 9 or 16 cells ('X', 'O' and ' ', with '.' or '_' for
    /// empty), row-major from the top-left.
    board: String,
    /// Enable alpha-beta pruning.
    #[clap(short, long)]
    alpha_beta: bool,
    /// Depth limit for the search, -1 for no limit.
    #[clap(short, long, default_value_t = -1, allow_hyphen_values = true)]
    depth: i32,
    /// Levels of the search tree to print.
    #[clap(short = 'l', long, default_value_t = 0)]
    trace: i32,
}

fn main() {
    logging();

    let Opts {
        board,
        alpha_beta,
        depth,
        trace,
    } = Opts::parse();

    let result = match board.chars().count() {
        9 => solve::<ClassicState>(&board, alpha_beta, depth, trace),
        16 => solve::<ExtremeState>(&board, alpha_beta, depth, trace),
        n => Err(ParseBoardError::Length(n)),
    };

    if let Err(err) = result {
        eprintln!("invalid board: {err}");
        process::exit(1);
    }
}

fn solve<B: Board>(
    board: &str,
    alpha_beta: bool,
    depth: i32,
    trace: i32,
) -> Result<(), ParseBoardError> {
    let state: B = board.parse()?;
    println!("{state}");

    if state.is_terminal() {
        println!("Game over. Utility: {}", state.utility());
        return Ok(());
    }

    let mut minimax = Minimax::new(alpha_beta);
    let choice = minimax.search(&state, depth, trace);

    println!("{} to move", if state.is_max() { "X" } else { "O" });
    println!("Best move: {}", choice.cell);
    println!("Expected value: {}", choice.value);
    println!("States expanded: {}", minimax.visited());
    Ok(())
}
