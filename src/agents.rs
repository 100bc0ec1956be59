use clap::ValueEnum;
use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;

use crate::game::Board;
use crate::search::Minimax;

/// Named difficulty presets for the console front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// Depth 5 with pruning.
    Beginner,
    /// Depth 8 with pruning.
    Intermediate,
    /// Depth 13 with pruning.
    Advanced,
    /// Full search with pruning.
    Perfect,
    /// Plays a uniformly random open cell.
    Random,
}

/// A computer player owning its search configuration and node counter.
#[derive(Debug)]
pub struct Agent {
    minimax: Minimax,
    depth: i32,
    random: Option<SmallRng>,
}

impl Agent {
    pub fn new(depth: i32, alpha_beta: bool) -> Agent {
        Agent {
            minimax: Minimax::new(alpha_beta),
            depth,
            random: None,
        }
    }

    pub fn from_profile(profile: Profile) -> Agent {
        match profile {
            Profile::Beginner => Agent::new(5, true),
            Profile::Intermediate => Agent::new(8, true),
            Profile::Advanced => Agent::new(13, true),
            Profile::Perfect => Agent::new(-1, true),
            Profile::Random => Agent {
                minimax: Minimax::new(false),
                depth: 0,
                random: Some(SmallRng::from_entropy()),
            },
        }
    }

    /// Chooses the next move for the player on turn. The value is the
    /// searched expectation, or `None` for random play.
    pub fn step<B: Board>(&mut self, state: &B, trace: i32) -> (usize, Option<f64>) {
        if let Some(rng) = &mut self.random {
            let cell = (1..=B::CELLS)
                .filter(|&c| state.open(c))
                .choose(rng)
                .expect("no open cells");
            (cell, None)
        } else {
            let choice = self.minimax.search(state, self.depth, trace);
            (choice.cell, Some(choice.value))
        }
    }

    /// States expanded by the last step, 0 for random play.
    pub fn visited(&self) -> u64 {
        self.minimax.visited()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::{Board, ClassicState, GameState, Mark};

    #[test]
    fn agents_finish_a_game() {
        let mut one = Agent::from_profile(Profile::Beginner);
        let mut two = Agent::from_profile(Profile::Random);

        let mut state = ClassicState::empty();
        let marks = [Mark::X, Mark::O];
        'game: loop {
            for (agent, mark) in [&mut one, &mut two].into_iter().zip(marks) {
                let (cell, _) = agent.step(&state, 0);
                assert!(state.open(cell));
                state.play(mark, cell);
                if state.is_terminal() {
                    break 'game;
                }
            }
        }
        assert!(state.is_terminal());
    }
}
