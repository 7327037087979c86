//! WASM bindings for tictactoe-core
//!
//! Provides a JavaScript-friendly API for the game. The page renders
//! `renderHtml()` and routes clicks on `[data-square]` / `[data-move]`
//! elements to `handleClick` / `jumpTo`.

use wasm_bindgen::prelude::*;

use crate::{App, GameConfig, Mark, Pos};

/// WASM-friendly wrapper around App
#[wasm_bindgen]
pub struct WasmGame {
    inner: App,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a new game. `config` may be undefined or a partial config object,
    /// e.g. `{ variant: "classic" }`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmGame, JsValue> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(WasmGame {
            inner: App::new(&config),
        })
    }

    /// Create a game from a JSON config string
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<WasmGame, JsValue> {
        let config = GameConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmGame {
            inner: App::new(&config),
        })
    }

    /// Click a square (0-8). Returns true if the move was accepted.
    ///
    /// Takes `u32` so values above 255 are refused instead of wrapping.
    #[wasm_bindgen(js_name = handleClick)]
    pub fn handle_click(&mut self, square: u32) -> bool {
        match Pos::from_index(square) {
            Some(pos) => self.inner.click_square(pos),
            None => false,
        }
    }

    /// Show history entry `index`. Returns false if there is no such entry.
    #[wasm_bindgen(js_name = jumpTo)]
    pub fn jump_to(&mut self, index: usize) -> bool {
        self.inner.click_move(index)
    }

    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.inner.redo()
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Square contents as an array of "X", "O" or ""
    pub fn squares(&self) -> Result<JsValue, JsValue> {
        let labels: Vec<&str> = self
            .inner
            .board()
            .cells()
            .iter()
            .map(|cell| cell.map_or("", Mark::as_str))
            .collect();
        Ok(serde_wasm_bindgen::to_value(&labels)?)
    }

    /// Status line text
    pub fn status(&self) -> String {
        self.inner.status().to_string()
    }

    /// "X", "O", or undefined
    pub fn winner(&self) -> Option<String> {
        self.inner.winner().map(|mark| mark.to_string())
    }

    /// Winning squares, or an empty array
    #[wasm_bindgen(js_name = winningLine)]
    pub fn winning_line(&self) -> Vec<u8> {
        self.inner
            .board()
            .winning_line()
            .map(|line| line.iter().map(|pos| pos.0).collect())
            .unwrap_or_default()
    }

    #[wasm_bindgen(js_name = currentMove)]
    pub fn current_move(&self) -> usize {
        self.inner.current_move()
    }

    /// History entries as `{ move, label, current, square }` objects
    pub fn moves(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.moves())?)
    }

    #[wasm_bindgen(js_name = renderHtml)]
    pub fn render_html(&self) -> String {
        self.inner.to_html()
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        WasmGame {
            inner: App::default(),
        }
    }
}
