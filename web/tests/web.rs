#![cfg(target_arch = "wasm32")]

use minesweep_web::Game;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn new_game_is_pending() {
    let game = Game::new(Some("medium".into())).ok().unwrap();

    assert_eq!(game.status(), "playing");
    assert_eq!(game.mines_left(), 40);
}

#[wasm_bindgen_test]
fn unknown_difficulty_is_rejected() {
    assert!(Game::new(Some("expert".into())).is_err());
}

#[wasm_bindgen_test]
fn first_click_opens_cells() {
    let mut game = Game::new(None).ok().unwrap();

    assert!(game.primary(4, 4).is_ok());

    let json = game.snapshot().ok().unwrap();
    assert!(json.contains("\"isFirstClick\":false"));
}

#[wasm_bindgen_test]
fn out_of_bounds_click_is_an_error() {
    let mut game = Game::new(Some("easy".into())).ok().unwrap();

    assert!(game.primary(9, 9).is_err());
}
