//! Game with full move history.
//!
//! ```text
//! history[0]          empty board
//! history[k]          board after the k-th move
//! current_move        index of the board on screen
//! ```
//!
//! Whose turn it is follows from the parity of `current_move`. Playing while
//! rewound drops every snapshot after `current_move` before appending.

use derive_more::{Display, Error};
use serde::Serialize;
use tracing::{debug, info};

use crate::{Board, GameConfig, Mark, MoveError, Pos, Status};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, Error)]
pub enum HistoryError {
    #[display("move {index} is not in a history of {len} entries")]
    OutOfRange { index: usize, len: usize },
}

/// One row of the "Go to move" list.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(rename = "move")]
    pub index: usize,
    pub label: String,
    /// Whether this entry is the board currently shown.
    pub current: bool,
    /// Square played to reach this entry (None for the game start).
    pub square: Option<Pos>,
}

impl HistoryEntry {
    pub fn label_for(index: usize) -> String {
        if index > 0 {
            format!("Go to move #{}", index)
        } else {
            "Go to game start".to_string()
        }
    }
}

#[derive(Clone, Debug)]
pub struct TimeTravelGame {
    history: Vec<Board>,
    current_move: usize,
    first_player: Mark,
    tie_status: bool,
}

impl TimeTravelGame {
    pub fn new(config: &GameConfig) -> TimeTravelGame {
        TimeTravelGame {
            history: vec![Board::new()],
            current_move: 0,
            first_player: config.first_player,
            tie_status: config.tie_status,
        }
    }

    /// Every snapshot, oldest first. Never empty.
    #[inline]
    pub fn history(&self) -> &[Board] {
        &self.history
    }

    #[inline]
    pub fn current_move(&self) -> usize {
        self.current_move
    }

    #[inline]
    pub fn current_board(&self) -> &Board {
        &self.history[self.current_move]
    }

    #[inline]
    pub fn next_player(&self) -> Mark {
        if self.current_move % 2 == 0 {
            self.first_player
        } else {
            self.first_player.opponent()
        }
    }

    pub fn winner(&self) -> Option<Mark> {
        self.current_board().winner()
    }

    pub fn status(&self) -> Status {
        self.current_board().status(self.next_player(), self.tie_status)
    }

    /// Apply a move to the current board, discarding any later snapshots.
    pub fn play(&mut self, pos: Pos) -> Result<&Board, MoveError> {
        let next = self.current_board().play(pos, self.next_player())?;

        let discarded = self.history.len() - (self.current_move + 1);
        if discarded > 0 {
            debug!(discarded, from = self.current_move, "history truncated");
        }
        self.history.truncate(self.current_move + 1);
        self.history.push(next);
        self.current_move = self.history.len() - 1;

        if let Some(winner) = next.winner() {
            info!(%winner, moves = self.current_move, "game won");
        }
        Ok(self.current_board())
    }

    /// Click handler: refused moves are ignored. Returns whether a snapshot was added.
    pub fn handle_click(&mut self, pos: Pos) -> bool {
        match self.play(pos) {
            Ok(_) => true,
            Err(err) => {
                debug!(square = pos.0, %err, "click ignored");
                false
            }
        }
    }

    /// Show snapshot `index` without touching the history.
    pub fn jump_to(&mut self, index: usize) -> Result<(), HistoryError> {
        if index >= self.history.len() {
            return Err(HistoryError::OutOfRange {
                index,
                len: self.history.len(),
            });
        }
        self.current_move = index;
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.current_move > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current_move < self.history.len() - 1
    }

    /// Step back one move. Returns false at the game start.
    pub fn undo(&mut self) -> bool {
        self.can_undo() && self.jump_to(self.current_move - 1).is_ok()
    }

    /// Step forward one move. Returns false at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        self.can_redo() && self.jump_to(self.current_move + 1).is_ok()
    }

    pub fn reset(&mut self) {
        self.history = vec![Board::new()];
        self.current_move = 0;
    }

    /// Square that changed between snapshot `index - 1` and `index`.
    pub fn played_at(&self, index: usize) -> Option<Pos> {
        let before = self.history.get(index.checked_sub(1)?)?;
        let after = self.history.get(index)?;
        Pos::all().find(|&pos| before.cell(pos) != after.cell(pos))
    }

    /// The "Go to move" list, one entry per snapshot.
    pub fn moves(&self) -> Vec<HistoryEntry> {
        (0..self.history.len())
            .map(|index| HistoryEntry {
                index,
                label: HistoryEntry::label_for(index),
                current: index == self.current_move,
                square: self.played_at(index),
            })
            .collect()
    }
}

impl Default for TimeTravelGame {
    fn default() -> Self {
        Self::new(&GameConfig::time_travel())
    }
}
