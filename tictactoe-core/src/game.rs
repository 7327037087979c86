//! Single-board game: one board plus a turn flag.
//!
//! The flag is its own piece of state and is flipped by [`ClassicGame::play`]
//! alone; it is never recomputed from the number of marks on the board.

use tracing::{debug, info};

use crate::{Board, GameConfig, Mark, MoveError, Pos, Status};

#[derive(Clone, Debug)]
pub struct ClassicGame {
    squares: Board,
    first_is_next: bool,
    first_player: Mark,
    tie_status: bool,
}

impl ClassicGame {
    /// Empty board, first player to move.
    pub fn new(config: &GameConfig) -> ClassicGame {
        ClassicGame {
            squares: Board::new(),
            first_is_next: true,
            first_player: config.first_player,
            tie_status: config.tie_status,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.squares
    }

    /// Mark that the next accepted move will place.
    #[inline]
    pub fn next_player(&self) -> Mark {
        if self.first_is_next {
            self.first_player
        } else {
            self.first_player.opponent()
        }
    }

    pub fn winner(&self) -> Option<Mark> {
        self.squares.winner()
    }

    pub fn status(&self) -> Status {
        self.squares.status(self.next_player(), self.tie_status)
    }

    /// Apply a move for the player to move and flip the turn.
    pub fn play(&mut self, pos: Pos) -> Result<&Board, MoveError> {
        let mark = self.next_player();
        let next = self.squares.play(pos, mark)?;
        self.squares = next;
        self.first_is_next = !self.first_is_next;

        if let Some(winner) = next.winner() {
            info!(%winner, "game won");
        }
        Ok(&self.squares)
    }

    /// Click handler: refused moves are ignored. Returns whether the board changed.
    pub fn handle_click(&mut self, pos: Pos) -> bool {
        match self.play(pos) {
            Ok(_) => true,
            Err(err) => {
                debug!(square = pos.0, %err, "click ignored");
                false
            }
        }
    }

    /// Back to an empty board with the first player to move.
    pub fn reset(&mut self) {
        self.squares = Board::new();
        self.first_is_next = true;
    }
}

impl Default for ClassicGame {
    fn default() -> Self {
        Self::new(&GameConfig::classic())
    }
}
