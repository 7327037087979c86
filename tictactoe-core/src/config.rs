//! Game configuration.
//!
//! Read from a JSON string on the Rust side or from a plain JS object by the
//! WASM bindings. Every field is optional:
//!
//! ```json
//! { "variant": "timeTravel", "firstPlayer": "X", "tieStatus": true }
//! ```

use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};

use crate::Mark;

/// Which orchestrator drives the game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Variant {
    /// One board and a turn flag.
    Classic,
    /// Full snapshot history with "Go to move" controls.
    #[default]
    TimeTravel,
}

#[derive(Debug, Display, Error, From)]
pub enum ConfigError {
    #[display("invalid game config: {_0}")]
    Json(serde_json::Error),
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GameConfig {
    pub variant: Variant,
    /// Mark that moves on an empty board.
    pub first_player: Mark,
    /// Show the tie message on a full board without a winner.
    pub tie_status: bool,
}

impl GameConfig {
    pub fn classic() -> GameConfig {
        GameConfig {
            variant: Variant::Classic,
            ..GameConfig::default()
        }
    }

    pub fn time_travel() -> GameConfig {
        GameConfig {
            variant: Variant::TimeTravel,
            ..GameConfig::default()
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<GameConfig, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            variant: Variant::default(),
            first_player: Mark::X,
            tie_status: true,
        }
    }
}
