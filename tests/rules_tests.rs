//! Rules engine integration tests.
//!
//! These tests drive `GoRules` through whole sequences of moves and check
//! captures, suicide, passing and scoring from the outside.

use go_clash::core::{Board, Game, Piece, Position, RulesConfig};
use go_clash::rules::{GameResult, GoRules, RulesEngine, RulesError};
use proptest::prelude::*;

fn pos(text: &str) -> Position {
    text.parse().unwrap()
}

/// Play a sequence of moves; `"pass"` passes.
fn play_all(rules: &GoRules, moves: &[&str]) -> Game {
    moves.iter().fold(rules.new_game(), |game, m| {
        if *m == "pass" {
            rules.pass(&game)
        } else {
            rules.play(&game, pos(m)).unwrap()
        }
    })
}

// =============================================================================
// Capture Tests
// =============================================================================

/// Surrounding a single stone removes it and credits the capturer.
#[test]
fn test_capture_single_stone() {
    let rules = GoRules::default();
    // White E5 surrounded by black on all four sides.
    let game = play_all(&rules, &["E4", "E5", "D5", "A1", "F5", "A2", "E6"]);

    assert_eq!(game.board().get(pos("E5")), None);
    assert_eq!(game.black_score(), 1);
    assert_eq!(game.white_score(), 0);
    assert_eq!(game.turn(), Piece::White);
}

/// A whole group is removed at once and counted by size.
#[test]
fn test_capture_group_counts_every_stone() {
    let board: Board = "\
        .........
        .........
        .........
        .........
        .........
        .........
        .........
        ##.......
        OO......."
        .parse()
        .unwrap();
    let game = Game::with_board(board, Piece::Black);
    let rules = GoRules::default();

    let next = rules.play(&game, pos("C1")).unwrap();
    assert_eq!(next.board().get(pos("A1")), None);
    assert_eq!(next.board().get(pos("B1")), None);
    assert_eq!(next.board().count(Piece::White), 0);
    assert_eq!(next.black_score(), 2);
    assert_eq!(next.white_score(), 0);
}

/// Capturing a vertical group along the edge.
#[test]
fn test_capture_edge_group() {
    let board: Board = "\
        .....
        .....
        #....
        O#...
        O...."
        .parse()
        .unwrap();
    let game = Game::with_board(board, Piece::Black);
    let rules = GoRules::default();

    let next = rules.play(&game, pos("B1")).unwrap();
    assert_eq!(next.board().count(Piece::White), 0);
    assert_eq!(next.board().get(pos("B1")), Some(Piece::Black));
    assert_eq!(next.black_score(), 2);
}

/// A stone with no liberties of its own is legal when it captures, and
/// every enemy group it kills is removed in the same sweep.
#[test]
fn test_capture_multiple_groups_at_once() {
    let board: Board = "\
        .....
        .....
        .O...
        O#O..
        #.#.."
        .parse()
        .unwrap();
    let game = Game::with_board(board, Piece::White);
    let rules = GoRules::default();

    let next = rules.play(&game, pos("B1")).unwrap();
    assert_eq!(next.board().get(pos("B1")), Some(Piece::White));
    assert_eq!(next.board().get(pos("A1")), None);
    assert_eq!(next.board().get(pos("B2")), None);
    assert_eq!(next.board().get(pos("C1")), Some(Piece::Black));
    assert_eq!(next.white_score(), 2);
}

// =============================================================================
// Rejected Move Tests
// =============================================================================

/// Suicide is rejected and changes nothing.
#[test]
fn test_suicide_rejected() {
    let board: Board = "\
        .....
        .....
        .....
        #....
        .#..."
        .parse()
        .unwrap();
    let game = Game::with_board(board, Piece::White);
    let rules = GoRules::default();

    let next = rules.play(&game, pos("A1")).unwrap();
    assert_eq!(next, game);
    assert_eq!(next.turn(), Piece::White);
    assert_eq!(next.last_move(), None);
}

/// Filling your own group's last liberty without capturing is suicide.
#[test]
fn test_group_suicide_rejected() {
    let board: Board = "\
        .....
        .....
        #....
        O#...
        .O#.."
        .parse()
        .unwrap();
    let game = Game::with_board(board, Piece::White);
    let rules = GoRules::default();

    let next = rules.play(&game, pos("A1")).unwrap();
    assert_eq!(next, game);
}

/// Out-of-range positions are errors, not silent no-ops.
#[test]
fn test_out_of_range_is_error() {
    let rules = GoRules::default();
    let game = rules.new_game();

    for bad in [Position::new(0, 'A'), Position::new(1, 'J'), Position::new(10, 'E')] {
        assert!(matches!(
            rules.play(&game, bad),
            Err(RulesError::InvalidPosition { size: 9, .. })
        ));
    }
}

/// An occupied play leaves last_move pointing at the previous stone.
#[test]
fn test_occupied_play_distinguishable_by_last_move() {
    let rules = GoRules::default();
    let game = play_all(&rules, &["C3", "D4"]);
    let again = rules.play(&game, pos("C3")).unwrap();

    assert_eq!(again.last_move(), Some(pos("D4")));
    assert_eq!(again.turn(), Piece::Black);
}

// =============================================================================
// Passing and Resignation Tests
// =============================================================================

#[test]
fn test_double_pass_ends_game() {
    let rules = GoRules::default();
    let game = play_all(&rules, &["C3", "pass", "pass"]);

    assert!(game.is_finished());
    assert_eq!(game.board().get(pos("C3")), Some(Piece::Black));
}

#[test]
fn test_pass_play_pass_does_not_end_game() {
    let rules = GoRules::default();
    let game = play_all(&rules, &["pass", "C3", "pass"]);

    assert!(!game.is_finished());
    assert!(game.last_was_pass());
}

#[test]
fn test_finished_game_ignores_moves() {
    let rules = GoRules::default();
    let game = play_all(&rules, &["pass", "pass"]);

    assert_eq!(rules.play(&game, pos("E5")).unwrap(), game);
    assert_eq!(rules.pass(&game), game);
    assert_eq!(rules.resign(&game), game);
}

#[test]
fn test_resign_preserves_board_and_captures() {
    let rules = GoRules::default();
    let game = play_all(&rules, &["E4", "E5", "D5", "A1", "F5", "A2", "E6"]);
    let resigned = rules.resign(&game);

    assert!(resigned.is_finished());
    assert_eq!(resigned.board(), game.board());
    assert_eq!(resigned.black_score(), game.black_score());
    assert_eq!(resigned.turn(), game.turn().other());
}

// =============================================================================
// Scoring Tests
// =============================================================================

#[test]
fn test_empty_board_score() {
    let rules = GoRules::default();
    let score = rules.score(&rules.new_game());

    assert_eq!(score.white, 0);
    assert_eq!(score.black, -3.5);
    assert_eq!(rules.winner(&rules.new_game()), GameResult::Winner(Piece::White));
}

#[test]
fn test_territory_and_captures_scored() {
    let board: Board = "\
        ..#O.
        ..#O.
        ..#O.
        ..#O.
        ..#O."
        .parse()
        .unwrap();
    let rules = GoRules::new(RulesConfig::default().with_board_size(5));
    let game = Game::with_board(board, Piece::Black);
    let score = rules.score(&game);

    // No komi entry for 5x5.
    assert_eq!(score.black, 10.0);
    assert_eq!(score.white, 5);
    assert_eq!(rules.winner(&game), GameResult::Winner(Piece::Black));
}

#[test]
fn test_draw_without_komi() {
    let board: Board = "\
        .#O.
        .#O.
        .#O.
        .#O."
        .parse()
        .unwrap();
    let rules = GoRules::new(RulesConfig::default().with_board_size(4));
    let game = Game::with_board(board, Piece::Black);

    assert_eq!(rules.winner(&game), GameResult::Draw);
}

// =============================================================================
// Property Tests
// =============================================================================

fn arb_moves() -> impl Strategy<Value = Vec<(u8, u8)>> {
    prop::collection::vec((1u8..=9, 0u8..9), 0..60)
}

fn to_pos(row: u8, col: u8) -> Position {
    Position::from_indices(row as usize - 1, col as usize).unwrap()
}

proptest! {
    /// Accepted plays flip the turn; rejected plays change nothing.
    #[test]
    fn prop_turn_alternation(moves in arb_moves()) {
        let rules = GoRules::default();
        let mut game = rules.new_game();
        for (row, col) in moves {
            let p = to_pos(row, col);
            let next = rules.play(&game, p).unwrap();
            if next != game {
                prop_assert_eq!(next.last_move(), Some(p));
                prop_assert_eq!(next.turn(), game.turn().other());
                prop_assert_eq!(next.board().get(p), Some(game.turn()));
            } else {
                prop_assert_eq!(&next, &game);
            }
            game = next;
        }
    }

    /// Replaying a rejected move is idempotent.
    #[test]
    fn prop_rejected_replay_is_idempotent(moves in arb_moves()) {
        let rules = GoRules::default();
        let mut game = rules.new_game();
        for (row, col) in moves {
            game = rules.play(&game, to_pos(row, col)).unwrap();
        }
        if let Some(last) = game.last_move() {
            let replay = rules.play(&game, last).unwrap();
            prop_assert_eq!(&replay, &game);
            prop_assert_eq!(rules.play(&replay, last).unwrap(), replay);
        }
    }

    /// No group on the board is ever left without liberties, and stones
    /// on the board plus stones captured account for every accepted play.
    #[test]
    fn prop_board_is_always_alive(moves in arb_moves()) {
        let rules = GoRules::default();
        let mut game = rules.new_game();
        let mut placed = [0u32; 2];
        for (row, col) in moves {
            let p = to_pos(row, col);
            let mover = game.turn();
            let next = rules.play(&game, p).unwrap();
            if next != game {
                placed[(mover == Piece::White) as usize] += 1;
            }
            game = next;
        }
        for (stone, _) in game.board().stones() {
            prop_assert!(go_clash::rules::count_liberties(game.board(), stone) > 0);
        }
        let black_on_board = game.board().count(Piece::Black) as u32;
        let white_on_board = game.board().count(Piece::White) as u32;
        prop_assert_eq!(black_on_board + game.white_score(), placed[0]);
        prop_assert_eq!(white_on_board + game.black_score(), placed[1]);
    }

    /// Territory plus stones never exceeds the board.
    #[test]
    fn prop_territory_bounded(moves in arb_moves()) {
        let rules = GoRules::default();
        let mut game = rules.new_game();
        for (row, col) in moves {
            game = rules.play(&game, to_pos(row, col)).unwrap();
        }
        let t = go_clash::rules::territory(game.board());
        let total = t.black + t.white + t.neutral + game.board().stone_count() as u32;
        prop_assert_eq!(total, 81);
    }
}
