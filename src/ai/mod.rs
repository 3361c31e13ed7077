//! Computer move selection at three strength tiers.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::Move;

pub mod heuristic;
pub mod random;
pub mod search;

pub use heuristic::HeuristicSelector;
pub use random::RandomSelector;
pub use search::SearchSelector;

/// A move-selection policy. Every tier picks for `board.current_player()`
/// and returns `None` only when that player has no legal move.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board) -> Option<Move>;
}

/// AI strength tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn selector(self) -> Arc<dyn MoveSelector> {
        match self {
            Self::Easy => Arc::new(RandomSelector),
            Self::Medium => Arc::new(HeuristicSelector),
            Self::Hard => Arc::new(SearchSelector::new()),
        }
    }
}

pub fn select_move(board: &Board, tier: Difficulty) -> Option<Move> {
    tier.selector().select_move(board)
}
