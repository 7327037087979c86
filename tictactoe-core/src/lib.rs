//! Tic-tac-toe game logic for a browser frontend.
//!
//! # Board Layout
//!
//! ```text
//! Cell indices (row-major order):
//!   (0,0)=0  (0,1)=1  (0,2)=2
//!   (1,0)=3  (1,1)=4  (1,2)=5
//!   (2,0)=6  (2,1)=7  (2,2)=8
//! ```
//!
//! A [`Board`] is a plain `Copy` value. [`Board::play`] never touches the
//! board it is called on; it hands back a new one. Move history keeps every
//! snapshot it was given, so rewinding is just picking an older board.
//!
//! # Crate Layout
//!
//! - [`game`]: the single-board orchestrator with an explicit turn flag
//! - [`history`]: the orchestrator that keeps every snapshot and can rewind
//! - [`ui`]: stateless view components and the [`App`] that dispatches their events
//! - `wasm` (feature `wasm`): JavaScript bindings

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::trace;

pub mod config;
pub mod game;
pub mod history;
pub mod ui;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{ConfigError, GameConfig, Variant};
pub use game::ClassicGame;
pub use history::{HistoryEntry, HistoryError, TimeTravelGame};
pub use ui::{App, Event, MoveButton, Square, View};

/// Player mark.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Display, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Get the opponent mark.
    #[inline]
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Text shown inside a square.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

/// Position on the 3x3 board (0-8).
///
/// Layout:
/// ```text
///   0 1 2
///   3 4 5
///   6 7 8
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Display, Serialize)]
pub struct Pos(pub u8);

impl Pos {
    /// Create a position from row and column (0-2 each).
    #[inline]
    pub fn from_row_col(row: u8, col: u8) -> Pos {
        debug_assert!(row < 3 && col < 3);
        Pos(row * 3 + col)
    }

    /// Get the row (0-2).
    #[inline]
    pub fn row(self) -> u8 {
        self.0 / 3
    }

    /// Get the column (0-2).
    #[inline]
    pub fn col(self) -> u8 {
        self.0 % 3
    }

    /// Check if this is a valid position (0-8).
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 < 9
    }

    /// Position for a raw index from the page, or None outside 0-8.
    #[inline]
    pub fn from_index(index: u32) -> Option<Pos> {
        u8::try_from(index).ok().map(Pos).filter(|pos| pos.is_valid())
    }

    /// Iterate over all 9 positions.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..9).map(Pos)
    }
}

/// Why a move was refused.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, Error)]
pub enum MoveError {
    #[display("square {index} is not on the board")]
    OutOfRange { index: u8 },
    #[display("square {pos} is already taken")]
    Occupied { pos: Pos },
    #[display("{winner} has already won")]
    GameOver { winner: Mark },
}

/// What the status line shows.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
pub enum Status {
    #[display("Winner: {_0}")]
    Winner(Mark),
    #[display("No Winner: It's a tie!")]
    Tie,
    #[display("Next player: {_0}")]
    Next(Mark),
}

/// A 9-cell snapshot of the game.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize)]
pub struct Board([Option<Mark>; 9]);

impl Board {
    /// The 8 winning lines, in evaluation order: rows, columns, diagonals.
    pub const WIN_LINES: [[Pos; 3]; 8] = [
        [Pos(0), Pos(1), Pos(2)], // Row 0
        [Pos(3), Pos(4), Pos(5)], // Row 1
        [Pos(6), Pos(7), Pos(8)], // Row 2
        [Pos(0), Pos(3), Pos(6)], // Col 0
        [Pos(1), Pos(4), Pos(7)], // Col 1
        [Pos(2), Pos(5), Pos(8)], // Col 2
        [Pos(0), Pos(4), Pos(8)], // Main diagonal
        [Pos(2), Pos(4), Pos(6)], // Anti-diagonal
    ];

    /// Create an empty board.
    #[inline]
    pub fn new() -> Board {
        Board([None; 9])
    }

    /// Create a board from explicit cell contents.
    #[inline]
    pub fn from_cells(cells: [Option<Mark>; 9]) -> Board {
        Board(cells)
    }

    /// All 9 cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Option<Mark>; 9] {
        &self.0
    }

    /// Mark at a position. Out-of-range positions read as empty.
    #[inline]
    pub fn cell(&self, pos: Pos) -> Option<Mark> {
        self.0.get(pos.0 as usize).copied().flatten()
    }

    /// Check if a cell is empty.
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.cell(pos).is_none()
    }

    /// Number of occupied cells.
    pub fn filled(&self) -> usize {
        self.0.iter().filter(|cell| cell.is_some()).count()
    }

    /// Check if every cell is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    /// Get the first complete line, if any.
    pub fn winning_line(&self) -> Option<[Pos; 3]> {
        Self::WIN_LINES.iter().copied().find(|&[a, b, c]| {
            let mark = self.cell(a);
            mark.is_some() && mark == self.cell(b) && mark == self.cell(c)
        })
    }

    /// Get the winning mark, or None if no line is complete.
    ///
    /// When several lines are complete the first one in [`Board::WIN_LINES`]
    /// order decides.
    pub fn winner(&self) -> Option<Mark> {
        self.winning_line().and_then(|[a, _, _]| self.cell(a))
    }

    /// Status line for this board with `next` to move.
    ///
    /// With `tie_status` off a full board without a winner still reports
    /// the next player.
    pub fn status(&self, next: Mark, tie_status: bool) -> Status {
        if let Some(winner) = self.winner() {
            Status::Winner(winner)
        } else if tie_status && self.is_full() {
            Status::Tie
        } else {
            Status::Next(next)
        }
    }

    /// Copy of this board with `pos` set to `mark`, without any checks.
    #[inline]
    pub fn with_mark(&self, pos: Pos, mark: Mark) -> Board {
        let mut next = *self;
        next.0[pos.0 as usize] = Some(mark);
        next
    }

    /// Validate and apply a move, returning the resulting board.
    ///
    /// The receiver is left untouched either way.
    pub fn play(&self, pos: Pos, mark: Mark) -> Result<Board, MoveError> {
        if !pos.is_valid() {
            return Err(MoveError::OutOfRange { index: pos.0 });
        }
        if let Some(winner) = self.winner() {
            return Err(MoveError::GameOver { winner });
        }
        if !self.is_empty(pos) {
            return Err(MoveError::Occupied { pos });
        }
        trace!(square = pos.0, %mark, "move applied");
        Ok(self.with_mark(pos, mark))
    }
}
