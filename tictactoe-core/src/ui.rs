//! View components and the app that owns the game.
//!
//! Components hold no game state. A [`Square`] or [`MoveButton`] only calls
//! the handler it was built with; the [`App`] builds those handlers so that
//! they queue an [`Event`], then applies queued events to the game in
//! [`App::dispatch`].
//!
//! # Markup
//!
//! ```text
//! div.game
//!   div.game-board
//!     div.status
//!     div.board-row x3
//!       button.square[data-square=i] x3
//!   div.game-info                      (time-travel only)
//!     ol > li > button[data-move=k]
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::debug;

use crate::{
    Board, ClassicGame, GameConfig, HistoryEntry, Mark, Pos, Status, TimeTravelGame, Variant,
};

/// Something a control asks the app to do.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Event {
    Square(Pos),
    JumpTo(usize),
}

/// Boxed click handler used by [`View`].
pub type Handler = Box<dyn FnMut()>;

/// One grid cell: shows a mark and forwards clicks.
pub struct Square<F> {
    value: Option<Mark>,
    on_square_click: F,
}

impl<F: FnMut()> Square<F> {
    pub fn new(value: Option<Mark>, on_square_click: F) -> Square<F> {
        Square {
            value,
            on_square_click,
        }
    }

    #[inline]
    pub fn value(&self) -> Option<Mark> {
        self.value
    }

    /// Text inside the button ("" when empty).
    #[inline]
    pub fn label(&self) -> &'static str {
        self.value.map_or("", Mark::as_str)
    }

    /// Call the handler once.
    pub fn click(&mut self) {
        (self.on_square_click)()
    }
}

/// One "Go to move" control.
pub struct MoveButton<F> {
    entry: HistoryEntry,
    on_click: F,
}

impl<F: FnMut()> MoveButton<F> {
    pub fn new(entry: HistoryEntry, on_click: F) -> MoveButton<F> {
        MoveButton { entry, on_click }
    }

    #[inline]
    pub fn entry(&self) -> &HistoryEntry {
        &self.entry
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.entry.label
    }

    pub fn click(&mut self) {
        (self.on_click)()
    }
}

/// Everything on screen for one render.
pub struct View {
    pub status: Status,
    /// 9 squares in row-major order.
    pub squares: Vec<Square<Handler>>,
    /// Empty for the classic variant.
    pub moves: Vec<MoveButton<Handler>>,
    pub winning_line: Option<[Pos; 3]>,
}

impl View {
    pub fn square_mut(&mut self, pos: Pos) -> Option<&mut Square<Handler>> {
        self.squares.get_mut(pos.0 as usize)
    }

    pub fn move_mut(&mut self, index: usize) -> Option<&mut MoveButton<Handler>> {
        self.moves.get_mut(index)
    }

    /// Serialize to HTML. Controls carry `data-square` / `data-move` so the
    /// page can route a DOM click back to the app.
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(1024);
        html.push_str(r#"<div class="game"><div class="game-board">"#);
        html.push_str(&format!(r#"<div class="status">{}</div>"#, self.status));

        for (row, squares) in self.squares.chunks(3).enumerate() {
            html.push_str(r#"<div class="board-row">"#);
            for (col, square) in squares.iter().enumerate() {
                let pos = Pos::from_row_col(row as u8, col as u8);
                let winning = self
                    .winning_line
                    .is_some_and(|line| line.contains(&pos));
                let class = if winning { "square winning" } else { "square" };
                html.push_str(&format!(
                    r#"<button class="{}" data-square="{}">{}</button>"#,
                    class,
                    pos.0,
                    square.label()
                ));
            }
            html.push_str("</div>");
        }
        html.push_str("</div>");

        if !self.moves.is_empty() {
            html.push_str(r#"<div class="game-info"><ol>"#);
            for button in &self.moves {
                let entry = button.entry();
                let current = if entry.current {
                    r#" aria-current="step""#
                } else {
                    ""
                };
                html.push_str(&format!(
                    r#"<li><button data-move="{}"{}>{}</button></li>"#,
                    entry.index, current, entry.label
                ));
            }
            html.push_str("</ol></div>");
        }
        html.push_str("</div>");
        html
    }
}

#[derive(Clone, Debug)]
enum Orchestrator {
    Classic(ClassicGame),
    TimeTravel(TimeTravelGame),
}

/// Owns the game and turns control clicks into moves.
pub struct App {
    game: Orchestrator,
    events: Rc<RefCell<VecDeque<Event>>>,
}

impl App {
    pub fn new(config: &GameConfig) -> App {
        let game = match config.variant {
            Variant::Classic => Orchestrator::Classic(ClassicGame::new(config)),
            Variant::TimeTravel => Orchestrator::TimeTravel(TimeTravelGame::new(config)),
        };
        App {
            game,
            events: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    pub fn variant(&self) -> Variant {
        match self.game {
            Orchestrator::Classic(_) => Variant::Classic,
            Orchestrator::TimeTravel(_) => Variant::TimeTravel,
        }
    }

    /// Board on screen.
    pub fn board(&self) -> &Board {
        match &self.game {
            Orchestrator::Classic(game) => game.board(),
            Orchestrator::TimeTravel(game) => game.current_board(),
        }
    }

    pub fn next_player(&self) -> Mark {
        match &self.game {
            Orchestrator::Classic(game) => game.next_player(),
            Orchestrator::TimeTravel(game) => game.next_player(),
        }
    }

    pub fn status(&self) -> Status {
        match &self.game {
            Orchestrator::Classic(game) => game.status(),
            Orchestrator::TimeTravel(game) => game.status(),
        }
    }

    pub fn winner(&self) -> Option<Mark> {
        self.board().winner()
    }

    /// Index of the board on screen. The classic variant counts marks.
    pub fn current_move(&self) -> usize {
        match &self.game {
            Orchestrator::Classic(game) => game.board().filled(),
            Orchestrator::TimeTravel(game) => game.current_move(),
        }
    }

    /// History entries (empty for the classic variant).
    pub fn moves(&self) -> Vec<HistoryEntry> {
        match &self.game {
            Orchestrator::Classic(_) => Vec::new(),
            Orchestrator::TimeTravel(game) => game.moves(),
        }
    }

    fn queue(&self, event: Event) -> Handler {
        let events = Rc::clone(&self.events);
        Box::new(move || events.borrow_mut().push_back(event))
    }

    /// Build the components for the current state.
    pub fn view(&self) -> View {
        let board = self.board();
        let squares = Pos::all()
            .map(|pos| Square::new(board.cell(pos), self.queue(Event::Square(pos))))
            .collect();
        let moves = self
            .moves()
            .into_iter()
            .map(|entry| {
                let handler = self.queue(Event::JumpTo(entry.index));
                MoveButton::new(entry, handler)
            })
            .collect();

        View {
            status: self.status(),
            squares,
            moves,
            winning_line: board.winning_line(),
        }
    }

    /// Apply one event. Returns whether the state changed.
    pub fn handle(&mut self, event: Event) -> bool {
        match (&mut self.game, event) {
            (Orchestrator::Classic(game), Event::Square(pos)) => game.handle_click(pos),
            (Orchestrator::TimeTravel(game), Event::Square(pos)) => game.handle_click(pos),
            (Orchestrator::TimeTravel(game), Event::JumpTo(index)) => match game.jump_to(index) {
                Ok(()) => true,
                Err(err) => {
                    debug!(%err, "jump ignored");
                    false
                }
            },
            (Orchestrator::Classic(_), Event::JumpTo(index)) => {
                debug!(index, "classic game has no history");
                false
            }
        }
    }

    fn next_event(&self) -> Option<Event> {
        self.events.borrow_mut().pop_front()
    }

    /// Apply every queued event in order. Returns how many changed the state.
    pub fn dispatch(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.next_event() {
            if self.handle(event) {
                applied += 1;
            }
        }
        applied
    }

    /// Click square `pos` on a fresh view and dispatch.
    pub fn click_square(&mut self, pos: Pos) -> bool {
        let mut view = self.view();
        match view.square_mut(pos) {
            Some(square) => square.click(),
            None => debug!(square = pos.0, "no such square"),
        }
        self.dispatch() > 0
    }

    /// Click history button `index` on a fresh view and dispatch.
    pub fn click_move(&mut self, index: usize) -> bool {
        let mut view = self.view();
        match view.move_mut(index) {
            Some(button) => button.click(),
            None => debug!(index, "no such history entry"),
        }
        self.dispatch() > 0
    }

    pub fn undo(&mut self) -> bool {
        match &mut self.game {
            Orchestrator::Classic(_) => false,
            Orchestrator::TimeTravel(game) => game.undo(),
        }
    }

    pub fn redo(&mut self) -> bool {
        match &mut self.game {
            Orchestrator::Classic(_) => false,
            Orchestrator::TimeTravel(game) => game.redo(),
        }
    }

    pub fn reset(&mut self) {
        self.events.borrow_mut().clear();
        match &mut self.game {
            Orchestrator::Classic(game) => game.reset(),
            Orchestrator::TimeTravel(game) => game.reset(),
        }
    }

    pub fn to_html(&self) -> String {
        self.view().to_html()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
