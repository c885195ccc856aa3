// Copyright (C) 2020-2026 Andy Kurnia.

use super::game::GameState;
use super::moves::{ExchangeMove, Move};
use rand::prelude::*;

// move selection for the robot players. both fall back to exchanging the
// whole rack when no tile move exists, or to passing when the bag is low.
pub enum Strategy {
    // always the highest-scoring move; ties go to the first one generated
    HighScore,
    // one of the n highest-scoring moves, uniformly at random
    OneOfNBest(usize),
}

impl Strategy {
    pub fn generate_move(&self, rng: &mut dyn RngCore, state: &GameState<'_>) -> Move {
        let moves = state.generate_moves();
        self.pick_move(rng, state, moves)
    }

    pub fn pick_move(
        &self,
        rng: &mut dyn RngCore,
        state: &GameState<'_>,
        moves: Vec<Move>,
    ) -> Move {
        if moves.is_empty() {
            return if state.exchange_allowed {
                Move::Exchange(ExchangeMove {
                    letters: state.rack.as_string(),
                })
            } else {
                Move::Pass
            };
        }
        let mut scored: Vec<(i32, Move)> = moves
            .into_iter()
            .map(|mut mv| {
                let score = mv.score(state);
                (score, mv)
            })
            .collect();
        // stable sort keeps ties in arrival order
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        match *self {
            Strategy::HighScore => scored.swap_remove(0).1,
            Strategy::OneOfNBest(n) => {
                scored.truncate(n.max(1));
                let pick = rng.gen_range(0..scored.len());
                scored.swap_remove(pick).1
            }
        }
    }
}
