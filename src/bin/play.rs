use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;

use oxo::agents::{Agent, Profile};
use oxo::game::{Board, ClassicState, ExtremeState, Mark};
use oxo::logging;
use oxo::savegame::{self, GameRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Variant {
    Classic,
    Extreme,
}

#[derive(Parser)]
#[clap(name = "oxo play", about = "Play tic-tac-toe against the computer.")]
struct Opts {
    /// Board variant.
    #[clap(short, long, value_enum, default_value = "classic")]
    game: Variant,
    /// Enable alpha-beta pruning.
    #[clap(short, long)]
    alpha_beta: bool,
    /// Depth limit for the search, -1 for no limit.
    #[clap(short, long, default_value_t = -1, allow_hyphen_values = true)]
    depth: i32,
    /// Levels of the search tree to print.
    #[clap(short = 'l', long, default_value_t = 0)]
    trace: i32,
    /// Difficulty preset, overrides --depth and --alpha-beta.
    #[clap(short, long, value_enum)]
    profile: Option<Profile>,
    /// Directory for saving finished game records.
    #[clap(long)]
    log_dir: Option<PathBuf>,
}

fn main() {
    logging();

    let Opts {
        game,
        alpha_beta,
        depth,
        trace,
        profile,
        log_dir,
    } = Opts::parse();

    let agent = match profile {
        Some(profile) => Agent::from_profile(profile),
        None => Agent::new(depth, alpha_beta),
    };

    match game {
        Variant::Classic => run::<ClassicState>(agent, trace, log_dir),
        Variant::Extreme => run::<ExtremeState>(agent, trace, log_dir),
    }
}

fn run<B: Board>(mut agent: Agent, trace: i32, log_dir: Option<PathBuf>) {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let mut state = B::empty();
    let mut moves = Vec::new();

    println!("Key:");
    println!("{}", B::key());
    println!("{state}");

    loop {
        // The human plays X.
        let cell = prompt_cell(&mut lines, &state);
        state.play(Mark::X, cell);
        moves.push((Mark::X, cell));
        println!("{state}");
        if state.is_terminal() {
            break;
        }

        println!("Computer's turn:");
        let (cell, value) = agent.step(&state, trace);
        if let Some(value) = value {
            println!("Expected value: {value}");
            println!("States expanded: {}", agent.visited());
        }
        state.play(Mark::O, cell);
        moves.push((Mark::O, cell));
        println!("{state}");
        if state.is_terminal() {
            break;
        }
    }

    let utility = state.utility();
    println!("Game over. Utility: {utility}");
    if utility > 0.0 {
        println!("{}", "You win!".bright_green());
    } else if utility < 0.0 {
        println!("{}", "The computer wins.".bright_red());
    } else {
        println!("Draw.");
    }

    if let Some(log_dir) = log_dir {
        let record = GameRecord {
            game: B::name().into(),
            moves,
            utility,
        };
        savegame::save(&record, &log_dir);
    }
}

/// Prompts until the human enters an open cell. Malformed input is never
/// fatal, only re-prompted.
fn prompt_cell<B: Board>(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    state: &B,
) -> usize {
    print!("Your turn; enter the space # where you'd like to put your X: ");
    loop {
        io::stdout().flush().expect("Could not flush stdout");
        let Some(Ok(line)) = lines.next() else {
            println!();
            process::exit(0);
        };
        match B::parse_cell(&line) {
            Some(cell) if state.open(cell) => return cell,
            Some(_) => print!("That spot is taken; try again: "),
            None => print!("Invalid move; try again: "),
        }
    }
}
