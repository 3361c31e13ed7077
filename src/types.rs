use serde::{Deserialize, Serialize};

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Dark,
    Light,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Wire code shared with `Cell::code`: 1=dark, 2=light.
    pub fn code(self) -> u8 {
        Cell::from(self).code()
    }
}

/// Occupancy of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Dark,
    Light,
}

impl Cell {
    /// 0=empty, 1=dark, 2=light.
    pub fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Dark => 1,
            Self::Light => 2,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Dark => Self::Dark,
            Player::Light => Self::Light,
        }
    }
}

/// A board coordinate, 0-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major square index (0..=63).
    pub fn index(self) -> usize {
        self.row * 8 + self.col
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub board: Vec<u8>,
    pub current_player: u8,
    pub dark_count: usize,
    pub light_count: usize,
    pub is_game_over: bool,
    /// `true` while the mover has no legal move and must pass.
    pub is_pass: bool,
    /// Empty unless `Settings::show_legal_moves` is set.
    pub legal_moves: Vec<Move>,
    /// Squares flipped by the last move; empty after a pass or reset.
    pub flipped: Vec<Move>,
    pub is_ai_thinking: bool,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// `None` on a draw.
    pub winner: Option<Player>,
    pub dark_count: usize,
    pub light_count: usize,
}
