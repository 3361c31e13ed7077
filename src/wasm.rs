//! Browser entry points over a single process-global session.

use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::GameError;
use crate::game::GameInstance;
use crate::settings::Settings;

static GAME: Lazy<Mutex<Option<GameInstance>>> = Lazy::new(|| Mutex::new(None));

fn lock() -> Result<MutexGuard<'static, Option<GameInstance>>, JsValue> {
    GAME.lock()
        .map_err(|_| JsValue::from_str("game state lock poisoned"))
}

fn with_game<T>(f: impl FnOnce(&mut GameInstance) -> Result<T, GameError>) -> Result<T, JsValue> {
    let mut guard = lock()?;
    let game = guard.as_mut().ok_or_else(|| to_js_error(GameError::NoGame))?;
    f(game).map_err(to_js_error)
}

fn to_js_error(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

/// Starts a new game. `settings` may be `undefined` for the defaults.
#[wasm_bindgen]
pub fn new_game(settings: JsValue) -> Result<JsValue, JsValue> {
    let settings: Settings = if settings.is_undefined() || settings.is_null() {
        Settings::default()
    } else {
        serde_wasm_bindgen::from_value(settings)?
    };

    let game = GameInstance::with_settings(settings);
    let state = game.to_game_state();
    *lock()? = Some(game);
    to_js(&state)
}

#[wasm_bindgen]
pub fn place(row: usize, col: usize) -> Result<JsValue, JsValue> {
    let state = with_game(|game| {
        game.place(row, col)?;
        Ok(game.to_game_state())
    })?;
    to_js(&state)
}

#[wasm_bindgen]
pub fn pass_turn() -> Result<JsValue, JsValue> {
    let state = with_game(|game| {
        game.pass()?;
        Ok(game.to_game_state())
    })?;
    to_js(&state)
}

/// Plays the AI side synchronously while holding the session lock.
///
/// The Hard tier can search for several seconds, so host this module in a
/// Web Worker to keep the page's input handling responsive.
#[wasm_bindgen]
pub fn ai_move() -> Result<JsValue, JsValue> {
    let state = with_game(|game| {
        game.play_ai_turn()?;
        Ok(game.to_game_state())
    })?;
    to_js(&state)
}

#[wasm_bindgen]
pub fn get_state() -> Result<JsValue, JsValue> {
    let state = with_game(|game| Ok(game.to_game_state()))?;
    to_js(&state)
}

#[wasm_bindgen]
pub fn get_result() -> Result<JsValue, JsValue> {
    let result = with_game(|game| {
        if !game.is_game_over() {
            return Err(GameError::NotOver);
        }
        Ok(game.to_game_result())
    })?;
    to_js(&result)
}

#[wasm_bindgen]
pub fn reset_game() -> Result<JsValue, JsValue> {
    let state = with_game(|game| {
        game.reset();
        Ok(game.to_game_state())
    })?;
    to_js(&state)
}
