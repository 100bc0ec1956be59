use log::info;

use crate::game::{ActionValue, GameState};

/// Minimax tree search over a [`GameState`], optionally with alpha-beta
/// pruning and a depth limit.
///
/// @see https://en.wikipedia.org/wiki/Alpha%E2%80%93beta_pruning
///
/// The engine owns the visited-node counter: it is reset by every
/// top-level [`Minimax::search`] call and read back through
/// [`Minimax::visited`], so concurrent engines never share state.
#[derive(Debug, Clone, Default)]
pub struct Minimax {
    alpha_beta: bool,
    visited: u64,
}

impl Minimax {
    pub fn new(alpha_beta: bool) -> Minimax {
        Minimax {
            alpha_beta,
            visited: 0,
        }
    }

    /// Number of states visited by the most recent search.
    pub fn visited(&self) -> u64 {
        self.visited
    }

    /// Finds the move the player on turn should make, with the value the
    /// search backs up for it.
    ///
    /// `depth` is the remaining recursion budget; -1 never reaches the
    /// cutoff and searches to terminal states only. `trace` levels of the
    /// tree are printed while searching (0 disables tracing).
    pub fn search<S: GameState>(&mut self, state: &S, depth: i32, trace: i32) -> ActionValue {
        self.visited = 0;
        self.value(state, depth, trace, "", f64::NEG_INFINITY, f64::INFINITY)
    }

    fn value<S: GameState>(
        &mut self,
        state: &S,
        depth: i32,
        trace: i32,
        prefix: &str,
        alpha: f64,
        beta: f64,
    ) -> ActionValue {
        self.visited += 1;
        if self.visited % 10_000_000 == 0 {
            info!("{} states expanded", self.visited);
        }

        if state.is_terminal() {
            state.action_utility()
        } else if depth == 0 {
            state.action_eval()
        } else if state.is_max() {
            if self.alpha_beta {
                self.max_value_pruned(state, depth, trace, prefix, alpha, beta)
            } else {
                self.max_value(state, depth, trace, prefix)
            }
        } else if self.alpha_beta {
            self.min_value_pruned(state, depth, trace, prefix, alpha, beta)
        } else {
            self.min_value(state, depth, trace, prefix)
        }
    }

    /// Maximizes over the successors. Ties keep the earliest successor.
    fn max_value<S: GameState>(
        &mut self,
        state: &S,
        depth: i32,
        trace: i32,
        prefix: &str,
    ) -> ActionValue {
        let deeper = format!("{prefix} ");
        let mut best: Option<ActionValue> = None;

        for successor in state.successors() {
            let child = self.value(
                &successor,
                depth - 1,
                trace - 1,
                &deeper,
                f64::NEG_INFINITY,
                f64::INFINITY,
            );
            if trace > 0 {
                print_trace(prefix, "max", &successor, child);
            }
            if best.map_or(true, |b| child.value > b.value) {
                best = Some(successor.action_value(child.value));
            }
        }

        let best = best.expect("non-terminal state without successors");
        if trace > 0 {
            println!("{prefix}max: returning {best}");
        }
        best
    }

    /// Minimizes over the successors. Ties keep the earliest successor.
    fn min_value<S: GameState>(
        &mut self,
        state: &S,
        depth: i32,
        trace: i32,
        prefix: &str,
    ) -> ActionValue {
        let deeper = format!("{prefix} ");
        let mut best: Option<ActionValue> = None;

        for successor in state.successors() {
            let child = self.value(
                &successor,
                depth - 1,
                trace - 1,
                &deeper,
                f64::NEG_INFINITY,
                f64::INFINITY,
            );
            if trace > 0 {
                print_trace(prefix, "min", &successor, child);
            }
            if best.map_or(true, |b| child.value < b.value) {
                best = Some(successor.action_value(child.value));
            }
        }

        let best = best.expect("non-terminal state without successors");
        if trace > 0 {
            println!("{prefix}min: returning {best}");
        }
        best
    }

    /// [`Minimax::max_value`] with alpha-beta pruning. The bounds are
    /// threaded by value into every recursive call.
    fn max_value_pruned<S: GameState>(
        &mut self,
        state: &S,
        depth: i32,
        trace: i32,
        prefix: &str,
        mut alpha: f64,
        beta: f64,
    ) -> ActionValue {
        let deeper = format!("{prefix} ");
        let mut best: Option<ActionValue> = None;

        for successor in state.successors() {
            let child = self.value(&successor, depth - 1, trace - 1, &deeper, alpha, beta);
            if trace > 0 {
                print_trace(prefix, "max", &successor, child);
            }
            let current = match best {
                Some(b) if child.value <= b.value => b,
                _ => {
                    let b = successor.action_value(child.value);
                    best = Some(b);
                    b
                }
            };
            // The minimizing parent already has a better option.
            if current.value >= beta {
                return current;
            }
            alpha = alpha.max(current.value);
        }

        let best = best.expect("non-terminal state without successors");
        if trace > 0 {
            println!("{prefix}max: returning {best}");
        }
        best
    }

    /// [`Minimax::min_value`] with alpha-beta pruning.
    fn min_value_pruned<S: GameState>(
        &mut self,
        state: &S,
        depth: i32,
        trace: i32,
        prefix: &str,
        alpha: f64,
        mut beta: f64,
    ) -> ActionValue {
        let deeper = format!("{prefix} ");
        let mut best: Option<ActionValue> = None;

        for successor in state.successors() {
            let child = self.value(&successor, depth - 1, trace - 1, &deeper, alpha, beta);
            if trace > 0 {
                print_trace(prefix, "min", &successor, child);
            }
            let current = match best {
                Some(b) if child.value >= b.value => b,
                _ => {
                    let b = successor.action_value(child.value);
                    best = Some(b);
                    b
                }
            };
            // The maximizing parent already has a better option.
            if current.value <= alpha {
                return current;
            }
            beta = beta.min(current.value);
        }

        let best = best.expect("non-terminal state without successors");
        if trace > 0 {
            println!("{prefix}min: returning {best}");
        }
        best
    }
}

/// Prints a successor board and its backed-up value, indented for the
/// current tree level.
fn print_trace(prefix: &str, label: &str, state: &impl std::fmt::Display, value: ActionValue) {
    let board = state.to_string();
    let board = board.trim_end().replace('\n', &format!("\n{prefix}"));
    println!("{prefix}{label}:");
    println!("{prefix}{board}");
    println!("{prefix}{value}");
}

#[cfg(test)]
mod test {
    use rand::rngs::SmallRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::game::{Board, ClassicState, ExtremeState, Mark};

    /// Plays up to `moves` random moves from the empty board.
    fn random_position<B: Board>(rng: &mut SmallRng, moves: usize) -> B {
        let mut state = B::empty();
        let mut mark = Mark::X;
        for _ in 0..moves {
            if state.is_terminal() {
                break;
            }
            let open: Vec<usize> = (1..=B::CELLS).filter(|&c| state.open(c)).collect();
            let cell = *open.choose(rng).expect("non-terminal board has open cells");
            state.play(mark, cell);
            mark = mark.opponent();
        }
        state
    }

    #[test]
    fn terminal_states_return_their_utility() {
        let state: ClassicState = "XXXOO    ".parse().unwrap();
        let mut minimax = Minimax::new(false);
        let result = minimax.search(&state, -1, 0);
        assert_eq!(result, state.action_utility());
        assert_eq!(result.value, 1.0);
        assert_eq!(minimax.visited(), 1);
    }

    #[test]
    fn depth_cutoff_returns_the_eval() {
        let mut state = ClassicState::empty();
        state.play(Mark::X, 1);
        let mut minimax = Minimax::new(true);
        let result = minimax.search(&state, 0, 0);
        assert_eq!(result, state.action_eval());
        assert_eq!(result.cell, 1);
        assert_eq!(minimax.visited(), 1);
    }

    #[test]
    fn ties_keep_the_earliest_move() {
        // Every opening move of classic tic-tac-toe is a draw under optimal
        // play, so the root keeps its first successor.
        let state = ClassicState::empty();
        let mut minimax = Minimax::new(true);
        let choice = minimax.search(&state, -1, 0);
        assert_eq!(choice.cell, 1);
        assert_eq!(choice.value, 0.0);
    }

    #[test]
    fn perfect_play_is_a_draw() {
        let mut state = ClassicState::empty();
        let mut minimax = Minimax::new(true);
        while !state.is_terminal() {
            let mark = if state.is_max() { Mark::X } else { Mark::O };
            let choice = minimax.search(&state, -1, 0);
            state.play(mark, choice.cell);
        }
        assert_eq!(state.utility(), 0.0);
    }

    #[test]
    fn pruning_preserves_move_and_value_classic() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut plain = Minimax::new(false);
        let mut pruned = Minimax::new(true);

        for _ in 0..20 {
            let moves = rng.gen_range(2..7);
            let state: ClassicState = random_position(&mut rng, moves);
            for depth in [-1, 1, 2, 3] {
                let a = plain.search(&state, depth, 0);
                let b = pruned.search(&state, depth, 0);
                assert_eq!(a, b, "depth {depth} on\n{state}");
                assert!(pruned.visited() <= plain.visited());
            }
        }
    }

    #[test]
    fn pruning_preserves_move_and_value_extreme() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut plain = Minimax::new(false);
        let mut pruned = Minimax::new(true);

        for _ in 0..10 {
            let moves = rng.gen_range(4..11);
            let state: ExtremeState = random_position(&mut rng, moves);
            for depth in [1, 2, 3] {
                let a = plain.search(&state, depth, 0);
                let b = pruned.search(&state, depth, 0);
                assert_eq!(a, b, "depth {depth} on\n{state}");
                assert!(pruned.visited() <= plain.visited());
            }
        }
    }

    #[test]
    fn counters_are_scoped_to_the_engine() {
        let state: ClassicState = "XOXO     ".parse().unwrap();
        let mut one = Minimax::new(false);
        let mut two = Minimax::new(false);
        one.search(&state, -1, 0);
        let count = one.visited();
        two.search(&state, 2, 0);
        // A second engine's search must not disturb the first count.
        assert_eq!(one.visited(), count);
        assert!(two.visited() < count);
    }

    #[test]
    fn unlimited_depth_matches_a_deep_budget() {
        // 5 empty cells: any budget >= 5 behaves like no limit at all.
        let state: ClassicState = "XOXO     ".parse().unwrap();
        let mut minimax = Minimax::new(false);
        let unlimited = minimax.search(&state, -1, 0);
        let deep = minimax.search(&state, 9, 0);
        assert_eq!(unlimited, deep);
    }
}
