use crate::ai::MoveSelector;
use crate::board::{BOARD_SIZE, Board};
use crate::types::{Move, Player};

const CORNER_WEIGHT: usize = 4;
const EDGE_WEIGHT: usize = 2;
const INTERIOR_WEIGHT: usize = 1;

/// Medium tier: maximizes `flips * positional_weight` in one step.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicSelector;

impl MoveSelector for HeuristicSelector {
    fn select_move(&self, board: &Board) -> Option<Move> {
        let player = board.current_player();
        let mut best: Option<(Move, usize)> = None;

        for mv in board.legal_moves(player) {
            let score = heuristic_score(board, mv, player);
            // Strict comparison keeps the earliest move on ties.
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }

        best.map(|(mv, _)| mv)
    }
}

pub fn heuristic_score(board: &Board, mv: Move, player: Player) -> usize {
    board.pieces_to_flip(mv.row, mv.col, player).len() * positional_weight(mv)
}

/// 4 for corners, 2 for other edge squares, 1 elsewhere.
pub fn positional_weight(mv: Move) -> usize {
    let last = BOARD_SIZE - 1;
    let row_edge = mv.row == 0 || mv.row == last;
    let col_edge = mv.col == 0 || mv.col == last;
    match (row_edge, col_edge) {
        (true, true) => CORNER_WEIGHT,
        (true, false) | (false, true) => EDGE_WEIGHT,
        (false, false) => INTERIOR_WEIGHT,
    }
}
