use std::fmt;
use std::str::FromStr;

use super::{parse_marks, Board, GameState, Mark, ParseBoardError};

/// All winning patterns of the 3x3 board: rows, columns, diagonals.
const PATTERNS: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// One position of the classic 3x3 game.
///
/// Cells are row-major, index 0 top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassicState {
    cells: [Option<Mark>; 9],
    last_player: Option<Mark>,
    last_cell: usize,
}

impl ClassicState {
    fn winner(&self) -> Option<Mark> {
        PATTERNS.iter().find_map(|p| match self.cells[p[0]] {
            Some(m) if p.iter().all(|&i| self.cells[i] == Some(m)) => Some(m),
            _ => None,
        })
    }
}

impl GameState for ClassicState {
    fn is_terminal(&self) -> bool {
        self.cells.iter().all(|c| c.is_some()) || self.winner().is_some()
    }

    fn utility(&self) -> f64 {
        match self.winner() {
            Some(Mark::X) => 1.0,
            Some(Mark::O) => -1.0,
            None => 0.0,
        }
    }

    fn eval(&self) -> f64 {
        let mut total = 0.0;
        for p in &PATTERNS {
            let x = p.iter().filter(|&&i| self.cells[i] == Some(Mark::X)).count();
            let o = p.iter().filter(|&&i| self.cells[i] == Some(Mark::O)).count();
            if x == 2 && o == 0 {
                total += 1.0;
            } else if o == 2 && x == 0 {
                total -= 1.0;
            }
        }
        total
    }

    fn successors(&self) -> Vec<Self> {
        let next = self.last_player.map_or(Mark::X, Mark::opponent);
        let mut states = Vec::with_capacity(9);
        for i in 0..self.cells.len() {
            if self.cells[i].is_none() {
                let mut state = self.clone();
                state.play(next, i + 1);
                states.push(state);
            }
        }
        states
    }

    fn is_max(&self) -> bool {
        self.last_player != Some(Mark::X)
    }

    fn last_cell(&self) -> usize {
        self.last_cell
    }
}

impl Board for ClassicState {
    const CELLS: usize = 9;

    fn empty() -> Self {
        ClassicState {
            cells: [None; 9],
            last_player: None,
            last_cell: 0,
        }
    }

    fn open(&self, cell: usize) -> bool {
        (1..=9).contains(&cell) && self.cells[cell - 1].is_none()
    }

    fn play(&mut self, mark: Mark, cell: usize) {
        self.cells[cell - 1] = Some(mark);
        self.last_player = Some(mark);
        self.last_cell = cell;
    }

    fn parse_cell(input: &str) -> Option<usize> {
        input.trim().parse().ok().filter(|c| (1..=9).contains(c))
    }

    fn key() -> String {
        let mut key = String::new();
        for row in 0..3 {
            if row > 0 {
                key.push_str("---+---+---\n");
            }
            for col in 0..3 {
                if col > 0 {
                    key.push('|');
                }
                key.push_str(&format!(" {} ", row * 3 + col + 1));
            }
            key.push('\n');
        }
        key
    }

    fn name() -> &'static str {
        "classic"
    }
}

impl fmt::Display for ClassicState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f, "---+---+---")?;
            }
            for col in 0..3 {
                if col > 0 {
                    write!(f, "|")?;
                }
                let c = self.cells[row * 3 + col].map_or(' ', Mark::as_char);
                write!(f, " {c} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for ClassicState {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (cells, last_player) = parse_marks::<9>(s)?;
        Ok(ClassicState {
            cells,
            last_player,
            last_cell: 0,
        })
    }
}
