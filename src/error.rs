//! Errors surfaced by the game session.
//!
//! The board engine and move selectors never fail; abnormal conditions there
//! are expressed as `Option`/`bool`. Only session commands are rejected.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,

    #[error("AI is thinking")]
    AiThinking,

    #[error("it is not the player's turn")]
    NotYourTurn,

    #[error("row/col out of range: ({row}, {col})")]
    OutOfRange { row: usize, col: usize },

    #[error("illegal move at ({row}, {col})")]
    IllegalMove { row: usize, col: usize },

    #[error("no pass is pending")]
    NoPassPending,

    #[error("AI result belongs to an earlier turn")]
    StaleAiTurn,

    #[error("AI could not select a move")]
    NoMoveSelected,

    #[error("invalid board layout: {0}")]
    InvalidLayout(String),

    #[error("no game in progress")]
    NoGame,

    #[error("game is not over yet")]
    NotOver,
}

pub type Result<T> = std::result::Result<T, GameError>;
