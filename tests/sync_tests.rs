//! Synchronization tests: refresh, background waiting and cancellation.
//!
//! All tests run on a paused Tokio clock, so poll intervals and slow reads
//! elapse instantly while keeping their relative order.

use std::sync::Arc;
use std::time::Duration;

use go_clash::core::{Game, Piece, Position, SessionConfig};
use go_clash::rules::GoRules;
use go_clash::storage::{MemoryStorage, SharedStorage, Storage};
use go_clash::{Clash, ClashContext, ClashError, Session};

fn pos(text: &str) -> Position {
    text.parse().unwrap()
}

fn setup() -> (Arc<ClashContext>, MemoryStorage<String, Game>) {
    let storage = MemoryStorage::new();
    let shared: SharedStorage = Arc::new(storage.clone());
    let context = ClashContext::new(shared, GoRules::default(), SessionConfig::default());
    (Arc::new(context), storage)
}

async fn advance(secs: u64) {
    tokio::time::sleep(Duration::from_secs(secs)).await;
}

// =============================================================================
// Refresh Tests
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_refresh_unchanged_record() {
    let (ctx, _) = setup();
    let black = Clash::new(ctx).start("g1").unwrap();

    let err = black.refresh().await.unwrap_err();
    assert!(matches!(err, ClashError::NoChange));
}

#[tokio::test(start_paused = true)]
async fn test_refresh_waits_for_slow_read() {
    let (ctx, _) = setup();
    let black = Clash::new(ctx).start("g1").unwrap();

    let before = tokio::time::Instant::now();
    let _ = black.refresh().await;
    assert!(before.elapsed() >= Duration::from_millis(1500));
}

#[tokio::test(start_paused = true)]
async fn test_refresh_picks_up_opponent_move() {
    let (ctx, _) = setup();
    let black = Clash::new(Arc::clone(&ctx)).start("g1").unwrap();
    let white = Clash::new(ctx).join("g1").unwrap();
    black.play(pos("E5")).unwrap();

    let white = white.refresh().await.unwrap();
    let game = white.game().unwrap();
    assert_eq!(game.board().get(pos("E5")), Some(Piece::Black));
    assert_eq!(game.last_move(), Some(pos("E5")));
    assert!(white.is_my_turn());
}

#[tokio::test(start_paused = true)]
async fn test_refresh_sees_pass() {
    let (ctx, _) = setup();
    let black = Clash::new(Arc::clone(&ctx)).start("g1").unwrap();
    let white = Clash::new(ctx).join("g1").unwrap();
    black.pass().unwrap();

    let white = white.refresh().await.unwrap();
    assert!(white.game().unwrap().last_was_pass());
    assert!(white.is_my_turn());
}

#[tokio::test(start_paused = true)]
async fn test_refresh_deleted_record() {
    let (ctx, _) = setup();
    let black = Clash::new(Arc::clone(&ctx)).start("g1").unwrap();
    let white = Clash::new(ctx).join("g1").unwrap();
    black.delete_if_owner().unwrap();

    let err = white.refresh().await.unwrap_err();
    assert!(matches!(err, ClashError::RecordDeleted(ref id) if id == "g1"));
}

// =============================================================================
// Session Waiting Tests
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_join_waits_until_black_moves() {
    let (ctx, _) = setup();
    let black = Session::new(Arc::clone(&ctx));
    let white = Session::new(ctx);

    black.start("g1").unwrap();
    assert!(!black.is_waiting());
    white.join("g1").unwrap();
    assert!(white.is_waiting());

    black.play(pos("E5")).unwrap();
    assert!(black.is_waiting());
    advance(5).await;

    assert!(!white.is_waiting());
    assert_eq!(white.turn(), Some(Piece::White));
    assert_eq!(white.last_move(), Some(pos("E5")));
    assert!(black.is_waiting());
}

#[tokio::test(start_paused = true)]
async fn test_full_exchange_between_sessions() {
    let (ctx, _) = setup();
    let black = Session::new(Arc::clone(&ctx));
    let white = Session::new(ctx);

    black.start("g1").unwrap();
    white.join("g1").unwrap();
    black.play(pos("E5")).unwrap();
    advance(5).await;

    white.play(pos("E6")).unwrap();
    assert!(white.is_waiting());
    advance(10).await;

    assert!(!black.is_waiting());
    assert_eq!(black.board(), white.board());
    assert_eq!(black.last_move(), Some(pos("E6")));
    assert_eq!(black.turn(), Some(Piece::Black));
}

#[tokio::test(start_paused = true)]
async fn test_waiting_stops_when_game_finishes() {
    let (ctx, _) = setup();
    let black = Session::new(Arc::clone(&ctx));
    let white = Session::new(ctx);

    black.start("g1").unwrap();
    white.join("g1").unwrap();
    black.pass().unwrap();
    advance(5).await;

    white.pass().unwrap();
    assert!(white.is_finished());
    assert!(!white.is_waiting());
    advance(10).await;

    assert!(!black.is_waiting());
    assert!(black.is_finished());
    assert!(black.can_new_board());
    assert!(black.winner().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_out_of_turn_play_reports_error() {
    let (ctx, _) = setup();
    let black = Session::new(Arc::clone(&ctx));
    let white = Session::new(ctx);

    black.start("g1").unwrap();
    white.join("g1").unwrap();

    let err = white.play(pos("E5")).unwrap_err();
    assert!(matches!(err, ClashError::NotYourTurn));
    assert!(white.is_waiting());
    assert_eq!(white.last_move(), None);
}

#[tokio::test(start_paused = true)]
async fn test_record_deleted_while_waiting() {
    let (ctx, _) = setup();
    let black = Session::new(Arc::clone(&ctx));
    let white = Session::new(ctx);

    black.start("g1").unwrap();
    white.join("g1").unwrap();
    black.exit().unwrap();
    advance(5).await;

    assert!(!white.is_waiting());
    assert!(!white.has_clash());
    assert!(matches!(white.take_error(), Some(ClashError::RecordDeleted(_))));
    assert!(white.take_error().is_none());
}

// =============================================================================
// Cancellation Tests
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_cancel_stops_polling() {
    let (ctx, storage) = setup();
    let black = Session::new(Arc::clone(&ctx));
    let white = Session::new(ctx);

    black.start("g1").unwrap();
    white.join("g1").unwrap();
    advance(10).await;
    assert!(white.is_waiting());

    white.cancel_waiting();
    assert!(!white.is_waiting());
    let reads = storage.read_count();
    advance(60).await;
    assert_eq!(storage.read_count(), reads);
}

#[tokio::test(start_paused = true)]
async fn test_drop_stops_polling() {
    let (ctx, storage) = setup();
    let black = Session::new(Arc::clone(&ctx));
    black.start("g1").unwrap();
    {
        let white = Session::new(ctx);
        white.join("g1").unwrap();
    }

    let reads = storage.read_count();
    advance(60).await;
    assert_eq!(storage.read_count(), reads);
}

#[tokio::test(start_paused = true)]
async fn test_exit_by_owner_deletes_record() {
    let (ctx, storage) = setup();
    let black = Session::new(ctx);

    black.start("g1").unwrap();
    black.play(pos("E5")).unwrap();
    black.exit().unwrap();

    assert!(!black.has_clash());
    assert!(!black.is_waiting());
    assert!(storage.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_exit_by_guest_keeps_record() {
    let (ctx, storage) = setup();
    let black = Session::new(Arc::clone(&ctx));
    let white = Session::new(ctx);

    black.start("g1").unwrap();
    white.join("g1").unwrap();
    white.exit().unwrap();

    assert!(!white.has_clash());
    assert!(storage.read(&"g1".to_string()).unwrap().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_session_refresh_ignores_no_change() {
    let (ctx, _) = setup();
    let black = Session::new(ctx);
    black.start("g1").unwrap();

    black.refresh().await.unwrap();
    assert_eq!(black.game(), Some(Game::new(9)));
}
