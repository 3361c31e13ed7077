use serde::{Deserialize, Serialize};

use crate::ai::Difficulty;

/// Who controls the light side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    PlayerVsPlayer,
    /// The AI plays light.
    PlayerVsAi,
}

/// Session configuration, delivered from the UI as a plain object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// When set, a mover without legal moves gets an explicit pass action.
    /// Otherwise such a position ends the game.
    pub enable_pass_turns: bool,
    pub game_mode: GameMode,
    pub ai_difficulty: Difficulty,
    pub show_legal_moves: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_pass_turns: false,
            game_mode: GameMode::PlayerVsPlayer,
            ai_difficulty: Difficulty::Easy,
            show_legal_moves: true,
        }
    }
}
