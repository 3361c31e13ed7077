use rand::seq::SliceRandom;

use crate::ai::MoveSelector;
use crate::board::Board;
use crate::types::Move;

/// Easy tier: a uniformly random legal move.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSelector;

impl MoveSelector for RandomSelector {
    fn select_move(&self, board: &Board) -> Option<Move> {
        let legal = board.legal_moves(board.current_player());
        legal.choose(&mut rand::thread_rng()).copied()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn random_choice_covers_all_opening_moves() {
        let board = Board::new();
        let legal = board.legal_moves(board.current_player());

        let seen: HashSet<Move> = (0..200)
            .filter_map(|_| RandomSelector.select_move(&board))
            .collect();

        assert!(seen.iter().all(|mv| legal.contains(mv)));
        assert_eq!(seen.len(), legal.len());
    }
}
