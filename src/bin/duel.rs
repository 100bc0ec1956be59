use std::path::PathBuf;

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
#[clap(name = "oxo duel", about = "Let two computer players fight it out.")]
struct Opts {
    /// Board variant.
    #[clap(short, long, value_enum, default_value = "extreme")]
    game: Variant,
    /// Difficulty of player one (X).
    #[clap(short = '1', long, value_enum)]
    one: Profile,
    /// Difficulty of player two (O).
    #[clap(short = '2', long, value_enum)]
    two: Profile,
    /// Levels of the search tree to print.
    #[clap(short = 'l', long, default_value_t = 0)]
    trace: i32,
    /// Directory for saving finished game records.
    #[clap(long)]
    log_dir: Option<PathBuf>,
}

fn main() {
    logging();

    let Opts {
        game,
        one,
        two,
        trace,
        log_dir,
    } = Opts::parse();

    println!("Player one: {one:?}, player two: {two:?}");

    let players = [Agent::from_profile(one), Agent::from_profile(two)];
    match game {
        Variant::Classic => run::<ClassicState>(players, trace, log_dir),
        Variant::Extreme => run::<ExtremeState>(players, trace, log_dir),
    }
}

fn run<B: Board>(mut players: [Agent; 2], trace: i32, log_dir: Option<PathBuf>) {
    let mut state = B::empty();
    let mut moves = Vec::new();

    println!("Key:");
    println!("{}", B::key());
    println!("{state}");

    let names = ["one", "two"];
    let marks = [Mark::X, Mark::O];
    'game: loop {
        for i in 0..2 {
            println!("Player {}'s turn:", names[i]);
            let (cell, value) = players[i].step(&state, trace);
            if let Some(value) = value {
                println!("Expected value: {value}");
                println!("States expanded: {}", players[i].visited());
            }
            state.play(marks[i], cell);
            moves.push((marks[i], cell));
            println!("{state}");
            if state.is_terminal() {
                break 'game;
            }
        }
    }

    let utility = state.utility();
    println!("Game over. Utility: {utility}");
    if utility > 0.0 {
        println!("{}", "Player one wins.".bright_green());
    } else if utility < 0.0 {
        println!("{}", "Player two wins.".bright_green());
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
