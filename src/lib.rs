use wasm_bindgen::prelude::*;

pub mod core;

use crate::core::{display_order::DisplayOrder, game_state::GameState};

/// Holder of the one live [`GameState`], driven by the web front end.
///
/// Each call replaces the held state with the transition's result; the front
/// end then re-renders from [`GameHandle::view`].
#[wasm_bindgen]
pub struct GameHandle {
    state: GameState,
}

#[wasm_bindgen]
impl GameHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            state: GameState::at_start(),
        }
    }

    #[wasm_bindgen(js_name = "withDescendingOrder")]
    pub fn with_descending_order() -> Self {
        Self {
            state: GameState::with_display_order(DisplayOrder::Descending),
        }
    }

    pub fn summary(&self, indentation_level: usize) -> String {
        self.state.summary(indentation_level)
    }

    /// Returns whether the move was accepted.
    #[wasm_bindgen(js_name = "applyMove")]
    pub fn apply_move(&mut self, cell_index: usize, row: usize, col: usize) -> bool {
        let next_state = self.state.apply_move(cell_index, row, col);
        let changed = next_state != self.state;
        self.state = next_state;
        changed
    }

    /// Empty string when the move would be accepted, otherwise the reason it would be ignored.
    #[wasm_bindgen(js_name = "moveRejection")]
    pub fn move_rejection(&self, cell_index: usize, row: usize, col: usize) -> String {
        match self.state.check_move(cell_index, row, col) {
            Ok(_) => String::new(),
            Err(rejection) => rejection.to_string(),
        }
    }

    /// Returns false and keeps the current state when `step` is not in the history.
    #[wasm_bindgen(js_name = "jumpTo")]
    pub fn jump_to(&mut self, step: usize) -> bool {
        match self.state.try_jump_to(step) {
            Ok(next_state) => {
                self.state = next_state;
                true
            }
            Err(_) => false,
        }
    }

    #[wasm_bindgen(js_name = "toggleDisplayOrder")]
    pub fn toggle_display_order(&mut self) {
        self.state = self.state.toggle_display_order();
    }

    pub fn view(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.state.view()).map_err(JsValue::from)
    }

    #[wasm_bindgen(js_name = "viewJson")]
    pub fn view_json(&self) -> String {
        self.state.view().to_json().unwrap_or_else(|_| "{}".to_string())
    }

    pub fn cells(&self) -> Vec<String> {
        self.state.current_board().labels()
    }

    pub fn status(&self) -> String {
        self.state.status_text()
    }

    #[wasm_bindgen(js_name = "nextMark")]
    pub fn next_mark(&self) -> String {
        self.state.next_mark().as_str().to_string()
    }

    #[wasm_bindgen(js_name = "winningTriple")]
    pub fn winning_triple(&self) -> Vec<u32> {
        self.state
            .outcome()
            .winning_triple()
            .map(|triple| triple.iter().map(|&cell_index| cell_index as u32).collect())
            .unwrap_or_default()
    }

    #[wasm_bindgen(js_name = "isDraw")]
    pub fn is_draw(&self) -> bool {
        self.state.is_draw()
    }

    #[wasm_bindgen(js_name = "currentStep")]
    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    #[wasm_bindgen(js_name = "historyLength")]
    pub fn history_length(&self) -> usize {
        self.state.history_len()
    }

    #[wasm_bindgen(js_name = "isDescending")]
    pub fn is_descending(&self) -> bool {
        self.state.display_order.is_descending()
    }
}

impl Default for GameHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(js_name = "newGame")]
pub fn new_game() -> GameHandle {
    GameHandle::new()
}
