//! End-to-end scenarios
//!
//! Scripted games are described as JSON and replayed through the App the
//! same way the page drives it: square clicks and history jumps. Random
//! playouts then check the history and turn-order invariants.

use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Deserialize;

use tictactoe_core::{App, Board, GameConfig, Mark, Pos, Status, TimeTravelGame};

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    #[serde(default)]
    config: Option<serde_json::Value>,
    steps: Vec<Step>,
    expect: Expect,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
enum Step {
    Play(Vec<u8>),
    JumpTo(usize),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Expect {
    /// Row-major, "X" / "O" / "" per square.
    board: Vec<String>,
    winner: Option<String>,
    status: String,
    #[serde(default)]
    history_len: Option<usize>,
    #[serde(default)]
    current_move: Option<usize>,
}

const SCENARIOS: &str = r#"[
  {
    "name": "top row win",
    "steps": [{ "play": [0, 4, 1, 3, 2] }],
    "expect": {
      "board": ["X", "X", "X", "O", "O", "", "", "", ""],
      "winner": "X",
      "status": "Winner: X",
      "historyLen": 6,
      "currentMove": 5
    }
  },
  {
    "name": "full board tie",
    "config": { "variant": "classic" },
    "steps": [{ "play": [0, 1, 2, 3, 5, 4, 6, 8, 7] }],
    "expect": {
      "board": ["X", "O", "X", "O", "O", "X", "X", "X", "O"],
      "winner": null,
      "status": "No Winner: It's a tie!"
    }
  },
  {
    "name": "tie with time travel",
    "steps": [{ "play": [0, 1, 2, 3, 5, 4, 6, 8, 7] }],
    "expect": {
      "board": ["X", "O", "X", "O", "O", "X", "X", "X", "O"],
      "winner": null,
      "status": "No Winner: It's a tie!",
      "historyLen": 10
    }
  },
  {
    "name": "rewind then branch",
    "steps": [{ "play": [0, 4] }, { "jumpTo": 0 }, { "play": [1] }],
    "expect": {
      "board": ["", "X", "", "", "", "", "", "", ""],
      "winner": null,
      "status": "Next player: O",
      "historyLen": 2,
      "currentMove": 1
    }
  },
  {
    "name": "clicks after a win are ignored",
    "config": { "variant": "classic" },
    "steps": [{ "play": [0, 4, 1, 3, 2, 5, 8] }],
    "expect": {
      "board": ["X", "X", "X", "O", "O", "", "", "", ""],
      "winner": "X",
      "status": "Winner: X"
    }
  },
  {
    "name": "occupied square keeps the turn",
    "steps": [{ "play": [4, 4, 4, 0] }],
    "expect": {
      "board": ["O", "", "", "", "X", "", "", "", ""],
      "winner": null,
      "status": "Next player: X",
      "historyLen": 3
    }
  },
  {
    "name": "diagonal win for O",
    "steps": [{ "play": [1, 2, 3, 4, 8, 6] }],
    "expect": {
      "board": ["", "X", "O", "X", "O", "", "O", "", "X"],
      "winner": "O",
      "status": "Winner: O"
    }
  },
  {
    "name": "jump forward again after rewinding",
    "steps": [{ "play": [0, 4, 8] }, { "jumpTo": 1 }, { "jumpTo": 3 }],
    "expect": {
      "board": ["X", "", "", "", "O", "", "", "", "X"],
      "winner": null,
      "status": "Next player: O",
      "historyLen": 4,
      "currentMove": 3
    }
  }
]"#;

fn labels(board: &Board) -> Vec<String> {
    board
        .cells()
        .iter()
        .map(|cell| cell.map_or("", Mark::as_str).to_string())
        .collect()
}

#[test]
fn test_scripted_scenarios() {
    let scenarios: Vec<Scenario> = serde_json::from_str(SCENARIOS).expect("Failed to parse scenarios");
    let mut failures: Vec<String> = Vec::new();

    for scenario in &scenarios {
        let config = match &scenario.config {
            Some(value) => serde_json::from_value(value.clone()).expect("Invalid scenario config"),
            None => GameConfig::default(),
        };
        let mut app = App::new(&config);

        for step in &scenario.steps {
            match step {
                Step::Play(squares) => {
                    for &square in squares {
                        app.click_square(Pos(square));
                    }
                }
                Step::JumpTo(index) => {
                    app.click_move(*index);
                }
            }
        }

        let mut errors: Vec<String> = Vec::new();
        let expect = &scenario.expect;

        let board = labels(app.board());
        if board != expect.board {
            errors.push(format!("board: expected {:?}, got {:?}", expect.board, board));
        }
        let winner = app.winner().map(|mark| mark.to_string());
        if winner != expect.winner {
            errors.push(format!("winner: expected {:?}, got {:?}", expect.winner, winner));
        }
        let status = app.status().to_string();
        if status != expect.status {
            errors.push(format!("status: expected {:?}, got {:?}", expect.status, status));
        }
        if let Some(len) = expect.history_len {
            if app.moves().len() != len {
                errors.push(format!("history: expected {}, got {}", len, app.moves().len()));
            }
        }
        if let Some(current) = expect.current_move {
            if app.current_move() != current {
                errors.push(format!("current move: expected {}, got {}", current, app.current_move()));
            }
        }

        if !errors.is_empty() {
            failures.push(format!("{}:\n  {}", scenario.name, errors.join("\n  ")));
        }
    }

    assert!(failures.is_empty(), "Scenario failures:\n{}", failures.join("\n"));
}

/// Play random clicks (including refused ones) and random jumps, checking
/// the history invariants after every step.
#[test]
fn test_random_playouts_keep_history_consistent() {
    let mut rng = StdRng::seed_from_u64(0x7ac7_0e);

    for _ in 0..500 {
        let mut game = TimeTravelGame::default();

        for _ in 0..30 {
            if rng.random_bool(0.2) {
                let target = rng.random_range(0..game.history().len());
                let len = game.history().len();
                game.jump_to(target).unwrap();
                assert_eq!(game.history().len(), len);
                assert_eq!(game.current_move(), target);
                continue;
            }

            let square = Pos(rng.random_range(0..9));
            let before = *game.current_board();
            let from = game.current_move();
            let mark = game.next_player();

            if game.handle_click(square) {
                assert_eq!(game.history().len(), from + 2);
                assert_eq!(game.current_move(), from + 1);
                assert_eq!(game.history()[from], before);
                assert_eq!(game.current_board().cell(square), Some(mark));
                assert_eq!(game.played_at(from + 1), Some(square));
            } else {
                assert_eq!(*game.current_board(), before);
                assert_eq!(game.current_move(), from);
                assert!(before.winner().is_some() || !before.is_empty(square));
            }

            // Every snapshot k holds exactly k marks, alternating from X.
            for (k, board) in game.history().iter().enumerate() {
                assert_eq!(board.filled(), k);
                let xs = board.cells().iter().filter(|c| **c == Some(Mark::X)).count();
                assert_eq!(xs, (k + 1) / 2);
            }
        }
    }
}

/// The n-th accepted move (1-indexed) is X's iff n is odd.
#[test]
fn test_random_games_alternate_turns() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        let mut app = App::new(&GameConfig::classic());
        let mut accepted = 0;

        while app.winner().is_none() && !app.board().is_full() {
            let square = Pos(rng.random_range(0..9));
            let expected = if accepted % 2 == 0 { Mark::X } else { Mark::O };
            if app.click_square(square) {
                accepted += 1;
                assert_eq!(app.board().cell(square), Some(expected));
            }
        }

        match app.status() {
            Status::Winner(mark) => assert_eq!(Some(mark), app.winner()),
            Status::Tie => assert!(app.board().is_full()),
            Status::Next(_) => panic!("finished game reports a next player"),
        }
        assert!(!app.click_square(Pos(rng.random_range(0..9))));
    }
}
