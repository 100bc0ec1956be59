use std::fmt;
use std::str::FromStr;

use super::{parse_marks, Board, GameState, Mark, ParseBoardError};

/// All winning patterns of the 4x4 board: rows, columns, diagonals, the
/// nine axis-aligned 2x2 squares, and the four corners.
const PATTERNS: [[usize; 4]; 20] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [8, 9, 10, 11],
    [12, 13, 14, 15],
    [0, 4, 8, 12],
    [1, 5, 9, 13],
    [2, 6, 10, 14],
    [3, 7, 11, 15],
    [0, 5, 10, 15],
    [3, 6, 9, 12],
    [0, 1, 4, 5],
    [1, 2, 5, 6],
    [2, 3, 6, 7],
    [4, 5, 8, 9],
    [5, 6, 9, 10],
    [6, 7, 10, 11],
    [8, 9, 12, 13],
    [9, 10, 13, 14],
    [10, 11, 14, 15],
    [0, 3, 12, 15],
];

/// Cell labels 1-9 and A-G, as shown in the key and typed by humans.
const LABELS: [char; 16] = [
    '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G',
];

/// One position of the "extreme" 4x4 game.
///
/// Cells are row-major, index 0 top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtremeState {
    cells: [Option<Mark>; 16],
    last_player: Option<Mark>,
    last_cell: usize,
}

impl ExtremeState {
    fn winner(&self) -> Option<Mark> {
        PATTERNS.iter().find_map(|p| match self.cells[p[0]] {
            Some(m) if p.iter().all(|&i| self.cells[i] == Some(m)) => Some(m),
            _ => None,
        })
    }
}

impl GameState for ExtremeState {
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
        let mut states = Vec::with_capacity(16);
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

impl Board for ExtremeState {
    const CELLS: usize = 16;

    fn empty() -> Self {
        ExtremeState {
            cells: [None; 16],
            last_player: None,
            last_cell: 0,
        }
    }

    fn open(&self, cell: usize) -> bool {
        (1..=16).contains(&cell) && self.cells[cell - 1].is_none()
    }

    fn play(&mut self, mark: Mark, cell: usize) {
        self.cells[cell - 1] = Some(mark);
        self.last_player = Some(mark);
        self.last_cell = cell;
    }

    fn parse_cell(input: &str) -> Option<usize> {
        let input = input.trim();
        let mut chars = input.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            let c = c.to_ascii_uppercase();
            if ('A'..='G').contains(&c) {
                return Some(c as usize - 'A' as usize + 10);
            }
        }
        input.parse().ok().filter(|c| (1..=16).contains(c))
    }

    fn key() -> String {
        let mut key = String::new();
        for row in 0..4 {
            if row > 0 {
                key.push_str("---+---+---+---\n");
            }
            for col in 0..4 {
                if col > 0 {
                    key.push('|');
                }
                key.push_str(&format!(" {} ", LABELS[row * 4 + col]));
            }
            key.push('\n');
        }
        key
    }

    fn name() -> &'static str {
        "extreme"
    }
}

impl fmt::Display for ExtremeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..4 {
            if row > 0 {
                writeln!(f, "---+---+---+---")?;
            }
            for col in 0..4 {
                if col > 0 {
                    write!(f, "|")?;
                }
                let c = self.cells[row * 4 + col].map_or(' ', Mark::as_char);
                write!(f, " {c} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for ExtremeState {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (cells, last_player) = parse_marks::<16>(s)?;
        Ok(ExtremeState {
            cells,
            last_player,
            last_cell: 0,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn square_win_for_x() {
        let state: ExtremeState = "XXOOXXO         ".parse().unwrap();
        assert!(state.is_terminal());
        assert_eq!(state.utility(), 1.0);
    }

    #[test]
    fn corner_win_for_o() {
        let state: ExtremeState = "OXXOXX      O  O".parse().unwrap();
        assert!(state.is_terminal());
        assert_eq!(state.utility(), -1.0);
    }

    #[test]
    fn diagonal_win_for_x() {
        let state: ExtremeState = "XOO  XO   X    X".parse().unwrap();
        assert!(state.is_terminal());
        assert_eq!(state.utility(), 1.0);
    }

    #[test]
    fn empty_board_evals_to_zero() {
        let state = ExtremeState::empty();
        assert!(!state.is_terminal());
        assert!(state.is_max());
        assert_eq!(state.eval(), 0.0);
    }

    #[test]
    fn eval_counts_rows_and_squares() {
        // X pair opening row 0 and square [0, 1, 4, 5]; the lone O adds nothing.
        let state: ExtremeState = "XX        O     ".parse().unwrap();
        assert_eq!(state.eval(), 2.0);
    }

    #[test]
    fn successors_cover_every_empty_cell() {
        let state: ExtremeState = "XO X            ".parse().unwrap();
        let successors = state.successors();
        assert_eq!(successors.len(), 13);

        let mut changed = Vec::new();
        for s in &successors {
            let cell = s.last_cell();
            assert!(state.open(cell));
            assert!(!s.open(cell));
            changed.push(cell);
        }
        let open: Vec<usize> = (1..=16).filter(|&c| state.open(c)).collect();
        assert_eq!(changed, open);
    }

    #[test]
    fn cell_labels() {
        assert_eq!(ExtremeState::parse_cell("1"), Some(1));
        assert_eq!(ExtremeState::parse_cell("16"), Some(16));
        assert_eq!(ExtremeState::parse_cell("A"), Some(10));
        assert_eq!(ExtremeState::parse_cell("g"), Some(16));
        assert_eq!(ExtremeState::parse_cell("17"), None);
        assert_eq!(ExtremeState::parse_cell("H"), None);
        assert_eq!(ExtremeState::parse_cell(""), None);
    }
}
