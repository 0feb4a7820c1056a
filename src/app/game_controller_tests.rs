// src/app/game_controller_tests.rs
// GameController のユニットテスト！
// 描画と HUD は記録するだけの偽物、タイマーは ManualScheduler (仮想時計) を使うよ。

use crate::app::game_controller::GameController;
use crate::app::manual_scheduler::ManualScheduler;
use crate::app::ports::{GameObserver, Renderer};
use crate::components::{Board, CardState, GameStatus};
use crate::config::GameConfig;
use crate::logic::deck::{IdentityShuffler, RandomShuffler};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;

// --- テスト用の偽物たち ---

#[derive(Debug, Clone, PartialEq)]
enum RenderCall {
    Clear,
    Render(usize),
    Face(usize, CardState),
}

#[derive(Debug, Default)]
struct RecordingRenderer {
    calls: Vec<RenderCall>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, board: &Board) {
        assert!(
            board.cards().iter().all(|c| c.state == CardState::Hidden),
            "render に渡される盤面は全部裏向きのはず"
        );
        self.calls.push(RenderCall::Render(board.len()));
    }

    fn set_card_face(&mut self, position: usize, state: CardState) {
        self.calls.push(RenderCall::Face(position, state));
    }

    fn clear(&mut self) {
        self.calls.push(RenderCall::Clear);
    }
}

#[derive(Debug, Clone, PartialEq)]
enum HudEvent {
    Moves(u32),
    Pairs(u32),
    Time(String),
    Won(u32, String),
    Reset,
}

#[derive(Debug, Default)]
struct RecordingObserver {
    events: Vec<HudEvent>,
}

impl RecordingObserver {
    fn wins(&self) -> Vec<&HudEvent> {
        self.events.iter().filter(|e| matches!(e, HudEvent::Won(..))).collect()
    }
}

impl GameObserver for RecordingObserver {
    fn on_move_count_changed(&mut self, count: u32) {
        self.events.push(HudEvent::Moves(count));
    }
    fn on_pair_count_changed(&mut self, count: u32) {
        self.events.push(HudEvent::Pairs(count));
    }
    fn on_time_changed(&mut self, formatted: &str) {
        self.events.push(HudEvent::Time(formatted.to_string()));
    }
    fn on_game_won(&mut self, final_move_count: u32, final_time: &str) {
        self.events.push(HudEvent::Won(final_move_count, final_time.to_string()));
    }
    fn on_game_reset(&mut self) {
        self.events.push(HudEvent::Reset);
    }
}

type TestController = GameController<RecordingRenderer, ManualScheduler, RecordingObserver>;

/// 並び替えなしの盤面 ([A..H, A..H]) で初期化済みのコントローラー。
/// ペアは position i と i+K。
fn identity_game(symbol_count: usize) -> TestController {
    let config = GameConfig { symbol_count, ..GameConfig::default() };
    let mut game = GameController::new(
        &config,
        Box::new(IdentityShuffler),
        RecordingRenderer::default(),
        ManualScheduler::new(),
        RecordingObserver::default(),
    );
    game.initialize();
    game
}

fn state_of(game: &TestController, position: usize) -> CardState {
    game.board().card(position).map(|c| c.state).expect("盤面内のはず")
}

fn states(game: &TestController) -> Vec<CardState> {
    game.board().cards().iter().map(|c| c.state).collect()
}

// --- initialize ---

#[test]
fn initialize_builds_hidden_pairs() {
    for k in [1, 2, 8, 16] {
        let config = GameConfig { symbol_count: k, ..GameConfig::default() };
        let mut game = GameController::new(
            &config,
            Box::new(RandomShuffler::new(StdRng::seed_from_u64(k as u64))),
            RecordingRenderer::default(),
            ManualScheduler::new(),
            RecordingObserver::default(),
        );
        game.initialize();

        let board = game.board();
        assert_eq!(board.len(), 2 * k);
        assert!(board.cards().iter().all(|c| c.state == CardState::Hidden));
        let counts = board.cards().iter().map(|c| &c.symbol).counts();
        assert_eq!(counts.len(), k);
        assert!(counts.values().all(|&n| n == 2), "K={k}: どの絵柄もちょうど2枚");
        for (i, card) in board.cards().iter().enumerate() {
            assert_eq!(card.position, i);
        }
    }
}

#[test]
fn initialize_resets_session_and_redraws() {
    let game = identity_game(8);
    let session = game.session();
    assert_eq!(session.move_count, 0);
    assert_eq!(session.matched_pair_count, 0);
    assert_eq!(session.elapsed_seconds, 0);
    assert!(!session.is_input_locked);
    assert!(!session.is_timer_running);
    assert_eq!(session.generation, 1);
    assert!(game.reveal_buffer().is_empty());
    assert_eq!(game.renderer().calls, vec![RenderCall::Clear, RenderCall::Render(16)]);
    assert_eq!(game.observer().events, vec![HudEvent::Reset]);
    assert_eq!(game.scheduler().pending_count(), 0);
}

#[test]
fn seeded_shuffle_is_reproducible() {
    let build = || {
        let mut game = GameController::new(
            &GameConfig::default(),
            Box::new(RandomShuffler::new(StdRng::seed_from_u64(99))),
            RecordingRenderer::default(),
            ManualScheduler::new(),
            RecordingObserver::default(),
        );
        game.initialize();
        game.board().cards().iter().map(|c| c.symbol.clone()).collect::<Vec<_>>()
    };
    assert_eq!(build(), build());
}

// --- タップ ---

#[test]
fn first_tap_starts_timer_and_reveals() {
    let mut game = identity_game(8);
    game.on_card_tapped(3);

    assert_eq!(state_of(&game, 3), CardState::Revealed);
    assert!(game.session().is_timer_running);
    assert!(game.scheduler().has_repeating());
    assert_eq!(game.reveal_buffer().len(), 1);
    assert_eq!(game.session().move_count, 0, "1枚目では手数は増えない");
    assert!(!game.session().is_input_locked);
    assert_eq!(game.renderer().calls.last(), Some(&RenderCall::Face(3, CardState::Revealed)));
}

#[test]
fn second_tap_locks_and_counts_move_at_tap_time() {
    let mut game = identity_game(8);
    game.on_card_tapped(0);
    game.on_card_tapped(5);

    assert!(game.session().is_input_locked);
    assert_eq!(game.session().move_count, 1);
    assert!(game.reveal_buffer().is_full());
    assert_eq!(game.observer().events.last(), Some(&HudEvent::Moves(1)));
    assert_eq!(game.reveal_buffer().first().map(|e| e.position), Some(0));
    assert_eq!(game.reveal_buffer().second().map(|e| e.position), Some(5));
}

#[test]
fn tapping_same_card_twice_is_ignored() {
    let mut game = identity_game(8);
    game.on_card_tapped(2);
    game.on_card_tapped(2);

    assert_eq!(game.reveal_buffer().len(), 1);
    assert_eq!(game.session().move_count, 0);
    assert!(!game.session().is_input_locked);
}

#[test]
fn taps_while_locked_change_nothing() {
    let mut game = identity_game(8);
    game.on_card_tapped(1);
    game.on_card_tapped(2);
    let before = states(&game);
    let renders_before = game.renderer().calls.len();

    game.on_card_tapped(3);
    game.on_card_tapped(11);

    assert_eq!(states(&game), before);
    assert_eq!(game.session().move_count, 1);
    assert_eq!(game.session().matched_pair_count, 0);
    assert_eq!(game.renderer().calls.len(), renders_before);
}

#[test]
fn taps_on_matched_cards_change_nothing() {
    let mut game = identity_game(8);
    game.on_card_tapped(0);
    game.on_card_tapped(8);
    game.advance_time(1000);
    let before = states(&game);

    game.on_card_tapped(0);
    game.on_card_tapped(8);

    assert_eq!(states(&game), before);
    assert_eq!(game.session().move_count, 1);
    assert_eq!(game.session().matched_pair_count, 1);
    assert!(game.reveal_buffer().is_empty());
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "outside the board")]
fn out_of_range_tap_fails_fast_in_debug() {
    let mut game = identity_game(8);
    game.on_card_tapped(16);
}

// --- 判定 ---

#[test]
fn matching_pair_is_kept_after_resolution() {
    let mut game = identity_game(8);
    game.on_card_tapped(0);
    game.on_card_tapped(8);

    game.advance_time(999);
    assert_eq!(state_of(&game, 0), CardState::Revealed, "1秒経つまでは判定しない");

    game.advance_time(1);
    assert_eq!(state_of(&game, 0), CardState::Matched);
    assert_eq!(state_of(&game, 8), CardState::Matched);
    assert_eq!(game.session().matched_pair_count, 1);
    assert_eq!(game.session().move_count, 1);
    assert!(!game.session().is_input_locked);
    assert!(game.reveal_buffer().is_empty());
    assert!(game.observer().events.contains(&HudEvent::Pairs(1)));
}

#[test]
fn mismatch_flips_back_after_resolution() {
    let mut game = identity_game(8);
    game.on_card_tapped(1);
    game.on_card_tapped(2);
    game.advance_time(1000);

    assert_eq!(state_of(&game, 1), CardState::Hidden);
    assert_eq!(state_of(&game, 2), CardState::Hidden);
    assert_eq!(game.session().matched_pair_count, 0);
    assert_eq!(game.session().move_count, 1);
    assert!(!game.session().is_input_locked);
    let tail: Vec<_> = game.renderer().calls.iter().rev().take(2).cloned().collect();
    assert_eq!(tail, vec![RenderCall::Face(2, CardState::Hidden), RenderCall::Face(1, CardState::Hidden)]);
}

#[test]
fn match_check_is_symmetric() {
    let mut game = identity_game(8);
    game.on_card_tapped(12);
    game.on_card_tapped(4);
    game.advance_time(1000);
    assert_eq!(state_of(&game, 4), CardState::Matched);
    assert_eq!(state_of(&game, 12), CardState::Matched);
}

#[test]
fn identity_scenario_match_then_mismatch() {
    let mut game = identity_game(8);

    game.on_card_tapped(0);
    game.on_card_tapped(8);
    game.advance_time(1000);
    assert_eq!(state_of(&game, 0), CardState::Matched);
    assert_eq!(state_of(&game, 8), CardState::Matched);
    assert_eq!(game.session().matched_pair_count, 1);
    assert_eq!(game.session().move_count, 1);

    game.on_card_tapped(1);
    game.on_card_tapped(2);
    game.advance_time(1000);
    assert_eq!(state_of(&game, 1), CardState::Hidden);
    assert_eq!(state_of(&game, 2), CardState::Hidden);
    assert_eq!(game.session().matched_pair_count, 1);
    assert_eq!(game.session().move_count, 2);
}

// --- タイマー ---

#[test]
fn timer_ticks_once_per_second() {
    let mut game = identity_game(8);
    game.on_card_tapped(0);
    game.advance_time(65_000);

    assert_eq!(game.session().elapsed_seconds, 65);
    assert_eq!(game.elapsed_time(), "01:05");
    assert_eq!(game.observer().events.last(), Some(&HudEvent::Time("01:05".to_string())));
    let ticks = game.observer().events.iter().filter(|e| matches!(e, HudEvent::Time(_))).count();
    assert_eq!(ticks, 65);
}

#[test]
fn timer_does_not_run_before_first_tap() {
    let mut game = identity_game(8);
    game.advance_time(10_000);
    assert_eq!(game.session().elapsed_seconds, 0);
    assert_eq!(game.elapsed_time(), "00:00");
}

#[test]
fn stop_timer_is_a_no_op_when_idle() {
    let mut game = identity_game(8);
    game.stop_timer();
    game.stop_timer();
    assert!(!game.session().is_timer_running);

    game.start_timer();
    game.start_timer();
    game.advance_time(2000);
    assert_eq!(game.session().elapsed_seconds, 2, "二重に start してもタイマーは1本だけ");
}

// --- クリア ---

#[test]
fn finding_every_pair_wins_exactly_once() {
    let mut game = identity_game(8);
    for i in 0..8 {
        game.on_card_tapped(i);
        game.on_card_tapped(i + 8);
        game.advance_time(1000);
    }

    // 最後の判定の直後: タイマーは止まってるけど、通知はまだ
    assert_eq!(game.status(), GameStatus::Won);
    assert!(!game.session().is_timer_running);
    assert!(!game.scheduler().has_repeating());
    assert!(game.observer().wins().is_empty(), "0.5秒待つまで通知しない");

    game.advance_time(500);
    assert_eq!(game.observer().wins(), vec![&HudEvent::Won(8, "00:08".to_string())]);
    assert_eq!(game.observer().events.last(), Some(&HudEvent::Won(8, "00:08".to_string())));

    // その後いくら時間が経っても、タップしても、何も起きない
    game.advance_time(10_000);
    game.on_card_tapped(0);
    game.on_card_tapped(15);
    assert_eq!(game.observer().wins().len(), 1);
    assert_eq!(game.session().elapsed_seconds, 8);
    assert_eq!(game.session().move_count, 8);
    assert!(game.board().is_cleared());
}

#[test]
fn no_ticks_between_last_match_and_win() {
    let mut game = identity_game(1);
    game.on_card_tapped(0);
    game.on_card_tapped(1);
    game.advance_time(5000);

    let events = &game.observer().events;
    let win_index = events.iter().position(|e| matches!(e, HudEvent::Won(..))).expect("勝ってるはず");
    let pairs_index = events.iter().position(|e| *e == HudEvent::Pairs(1)).expect("ペア通知があるはず");
    assert!(pairs_index < win_index);
    assert!(
        events[pairs_index..].iter().all(|e| !matches!(e, HudEvent::Time(_))),
        "タイマーは通知より前に止まってるはず"
    );
}

// --- リスタート ---

#[test]
fn restart_before_resolution_ignores_stale_callback() {
    let mut game = identity_game(8);
    game.on_card_tapped(0);
    game.on_card_tapped(8);
    assert!(game.session().is_input_locked);

    game.initialize();
    let fresh = states(&game);
    assert!(!game.session().is_input_locked);
    assert_eq!(game.session().generation, 2);
    assert_eq!(game.scheduler().pending_count(), 0, "古い予約はキャンセル済み");

    game.advance_time(5000);
    assert_eq!(states(&game), fresh);
    assert_eq!(game.session().matched_pair_count, 0);
    assert_eq!(game.session().move_count, 0);
    assert_eq!(game.session().elapsed_seconds, 0);
}

#[test]
fn stale_task_delivered_late_is_a_no_op() {
    let mut game = identity_game(8);
    game.on_card_tapped(0);
    game.on_card_tapped(8);
    let old_generation = game.session().generation;

    game.initialize();
    game.on_card_tapped(1);
    game.on_card_tapped(9);

    // キャンセルが間に合わなかった体で、古い世代のタスクが直接届く
    game.run_task(crate::app::ports::ScheduledTask::Resolve { generation: old_generation });
    game.run_task(crate::app::ports::ScheduledTask::EndGame { generation: old_generation });
    game.run_task(crate::app::ports::ScheduledTask::Tick { generation: old_generation });

    assert!(game.session().is_input_locked, "今のセッションの判定待ちはそのまま");
    assert_eq!(state_of(&game, 1), CardState::Revealed);
    assert_eq!(game.session().elapsed_seconds, 0);
    assert!(game.observer().wins().is_empty());
}

#[test]
fn restart_after_win_starts_clean() {
    let mut game = identity_game(2);
    for i in 0..2 {
        game.on_card_tapped(i);
        game.on_card_tapped(i + 2);
        game.advance_time(1000);
    }
    game.advance_time(500);
    assert_eq!(game.observer().wins().len(), 1);

    game.initialize();
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.observer().events.last(), Some(&HudEvent::Reset));
    game.on_card_tapped(0);
    assert!(game.session().is_timer_running, "新しいセッションでは最初のタップでまたタイマーが動く");
}
