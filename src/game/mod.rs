use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

mod classic;
pub use classic::*;
mod extreme;
pub use extreme::*;

/// A player's mark on the board. X always moves first.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A candidate move paired with its backed-up value.
///
/// `cell` is the 1-based index of the move that leads into the subtree the
/// value was computed for. A fresh board that has no move yet carries the
/// sentinel 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionValue {
    pub cell: usize,
    pub value: f64,
}

impl ActionValue {
    pub fn new(cell: usize, value: f64) -> ActionValue {
        ActionValue { cell, value }
    }
}

impl fmt::Display for ActionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[move: {}, value: {}]", self.cell, self.value)
    }
}

/// The contract the search engine requires of a game position.
///
/// Implementors are plain values: every successor owns an independent copy
/// of the board, so the search tree never aliases cell storage.
pub trait GameState: Clone + fmt::Display {
    /// True if the board is won or completely filled.
    fn is_terminal(&self) -> bool;

    /// Exact outcome: +1 if X has a winning pattern, -1 if O has, 0 otherwise.
    fn utility(&self) -> f64;

    /// Heuristic score for non-terminal states, used on depth cutoff.
    ///
    /// Sums +1/-1 over every winning pattern in which exactly two cells
    /// carry the same mark and the rest are empty. Not consistent with the
    /// minimax backup of [`GameState::utility`].
    fn eval(&self) -> f64;

    /// One successor per empty cell in ascending cell order, each with the
    /// opponent of the last player moved into that cell.
    fn successors(&self) -> Vec<Self>;

    /// True if X moves next (the empty board is a max node).
    fn is_max(&self) -> bool;

    /// 1-based cell of the most recent move, 0 on a fresh board.
    fn last_cell(&self) -> usize;

    fn action_utility(&self) -> ActionValue {
        ActionValue::new(self.last_cell(), self.utility())
    }

    fn action_eval(&self) -> ActionValue {
        ActionValue::new(self.last_cell(), self.eval())
    }

    /// Reattaches an externally computed value to this state's own move.
    fn action_value(&self, value: f64) -> ActionValue {
        ActionValue::new(self.last_cell(), value)
    }
}

/// Board manipulation needed by the console game loops, kept out of the
/// search contract.
pub trait Board: GameState + FromStr<Err = ParseBoardError> {
    const CELLS: usize;

    fn empty() -> Self;

    /// True if `cell` is on the board and not yet played.
    fn open(&self, cell: usize) -> bool;

    /// Places `mark` on the 1-based `cell`, which must be open.
    fn play(&mut self, mark: Mark, cell: usize);

    /// Parses a cell label typed by a human.
    fn parse_cell(input: &str) -> Option<usize>;

    /// The cell-label board shown at the start of a game.
    fn key() -> String;

    fn name() -> &'static str;
}

/// Error parsing a board from its text encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseBoardError {
    /// Wrong number of cells.
    Length(usize),
    /// Invalid cell character.
    Cell(char),
    /// Mark counts not reachable by alternating play.
    Counts { x: usize, o: usize },
}

impl fmt::Display for ParseBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseBoardError::Length(n) => write!(f, "wrong number of cells: {n}"),
            ParseBoardError::Cell(c) => write!(f, "invalid cell character {c:?}"),
            ParseBoardError::Counts { x, o } => {
                write!(f, "unreachable position: {x} X marks vs {o} O marks")
            }
        }
    }
}

impl std::error::Error for ParseBoardError {}

/// Parses `N` cells ('X', 'O' and ' ', with '.' and '_' accepted for empty)
/// and derives the player who moved last from the mark counts.
pub(crate) fn parse_marks<const N: usize>(
    s: &str,
) -> Result<([Option<Mark>; N], Option<Mark>), ParseBoardError> {
    let mut cells = [None; N];
    let mut len = 0;
    for (i, c) in s.chars().enumerate() {
        if i >= N {
            return Err(ParseBoardError::Length(s.chars().count()));
        }
        cells[i] = match c {
            'X' | 'x' => Some(Mark::X),
            'O' | 'o' => Some(Mark::O),
            ' ' | '.' | '_' => None,
            c => return Err(ParseBoardError::Cell(c)),
        };
        len = i + 1;
    }
    if len != N {
        return Err(ParseBoardError::Length(len));
    }

    let x = cells.iter().filter(|&&c| c == Some(Mark::X)).count();
    let o = cells.iter().filter(|&&c| c == Some(Mark::O)).count();
    // X moves first, so marks alternate X, O, X, ...
    let last_player = if x == o + 1 {
        Some(Mark::X)
    } else if x == o {
        (o > 0).then_some(Mark::O)
    } else {
        return Err(ParseBoardError::Counts { x, o });
    };
    Ok((cells, last_player))
}
