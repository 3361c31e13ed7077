#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn field(value: &JsValue, name: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(name)).unwrap()
}

#[wasm_bindgen_test]
fn new_game_returns_opening_state() {
    let state = othello::wasm::new_game(JsValue::UNDEFINED).unwrap();

    assert_eq!(field(&state, "current_player").as_f64(), Some(1.0));
    assert_eq!(field(&state, "dark_count").as_f64(), Some(2.0));
    assert_eq!(Array::from(&field(&state, "board")).length(), 64);
    assert_eq!(Array::from(&field(&state, "legal_moves")).length(), 4);
}

#[wasm_bindgen_test]
fn settings_object_is_honoured() {
    let settings = Object::new();
    Reflect::set(&settings, &"show_legal_moves".into(), &JsValue::FALSE).unwrap();
    Reflect::set(&settings, &"game_mode".into(), &"PlayerVsAi".into()).unwrap();

    let state = othello::wasm::new_game(settings.into()).unwrap();
    assert_eq!(Array::from(&field(&state, "legal_moves")).length(), 0);

    othello::wasm::place(2, 3).unwrap();
    let state = othello::wasm::ai_move().unwrap();
    assert_eq!(field(&state, "current_player").as_f64(), Some(1.0));
}

#[wasm_bindgen_test]
fn illegal_move_is_reported_as_error() {
    othello::wasm::new_game(JsValue::UNDEFINED).unwrap();

    let err = othello::wasm::place(0, 0).unwrap_err();

    assert!(err.as_string().unwrap().contains("illegal move"));
    assert!(othello::wasm::get_result().is_err());
}
