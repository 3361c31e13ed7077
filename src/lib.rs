use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod error;
pub mod game;
pub mod settings;
pub mod types;
pub mod wasm;

pub use ai::{Difficulty, MoveSelector, select_move};
pub use board::Board;
pub use error::{GameError, Result};
pub use game::{GameInstance, Phase};
pub use settings::{GameMode, Settings};
pub use types::{Cell, Move, Player};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
