// src/app/game_controller.rs
//! 神経衰弱の本体！シャッフル・めくる・判定・タイマー・クリアを全部ここで回すよ。
//!
//! 状態はぜんぶこの構造体が持ってる (グローバル変数なし)。
//! 描画・タイマー・HUD は trait 越しに呼ぶだけなので、テストでは偽物に差し替えられる。

use log::{debug, info, warn};

use crate::app::ports::{GameObserver, Renderer, ScheduledTask, Scheduler, TimerHandle};
use crate::components::{Board, CardState, GameSession, GameStatus, RevealBuffer, RevealedCard, Symbol};
use crate::config::GameConfig;
use crate::logic::deck::{create_pair_deck, Shuffler};
use crate::logic::timer_format::format_elapsed;

/// テンポに関する設定 (GameConfig から必要な分だけ抜き出したもの)。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub resolution_delay_ms: u32,
    pub end_delay_ms: u32,
    pub tick_ms: u32,
}

impl From<&GameConfig> for Pacing {
    fn from(config: &GameConfig) -> Self {
        Pacing {
            resolution_delay_ms: config.resolution_delay_ms,
            end_delay_ms: config.end_delay_ms,
            tick_ms: config.tick_ms,
        }
    }
}

pub struct GameController<R: Renderer, S: Scheduler, O: GameObserver> {
    alphabet: Vec<Symbol>,
    pacing: Pacing,
    shuffler: Box<dyn Shuffler>,
    renderer: R,
    scheduler: S,
    observer: O,
    board: Board,
    reveal_buffer: RevealBuffer,
    session: GameSession,
    // 予約中のハンドル。initialize() でまとめてキャンセルする。
    tick_handle: Option<TimerHandle>,
    resolution_handle: Option<TimerHandle>,
    end_handle: Option<TimerHandle>,
}

impl<R: Renderer, S: Scheduler, O: GameObserver> GameController<R, S, O> {
    /// コントローラーを作る。盤面はまだ空なので、使う前に `initialize()` を呼んでね。
    pub fn new(
        config: &GameConfig,
        shuffler: Box<dyn Shuffler>,
        renderer: R,
        scheduler: S,
        observer: O,
    ) -> Self {
        let alphabet = config.alphabet();
        let pair_total = alphabet.len() as u32;
        GameController {
            alphabet,
            pacing: Pacing::from(config),
            shuffler,
            renderer,
            scheduler,
            observer,
            board: Board::default(),
            reveal_buffer: RevealBuffer::new(),
            session: GameSession::new(pair_total, 0),
            tick_handle: None,
            resolution_handle: None,
            end_handle: None,
        }
    }

    /// 新しいゲームを始める。いつ呼んでもよくて、前の状態は全部捨てる。
    pub fn initialize(&mut self) {
        self.stop_timer();
        self.cancel_pending();

        let generation = self.session.generation.wrapping_add(1);
        let mut symbols = create_pair_deck(&self.alphabet);
        self.shuffler.shuffle(&mut symbols);
        self.board = Board::from_symbols(symbols);
        debug_assert!(self.board.has_exact_pairs(), "every symbol must appear exactly twice");
        self.reveal_buffer.clear();
        self.session = GameSession::new(self.alphabet.len() as u32, generation);

        self.renderer.clear();
        self.renderer.render(&self.board);
        self.observer.on_game_reset();
        info!(
            "GameController: new game #{} ({} cards, {} pairs)",
            generation,
            self.board.len(),
            self.session.pair_total
        );
    }

    /// カードがタップされた。受け付けない場合は黙って無視するよ。
    pub fn on_card_tapped(&mut self, position: usize) {
        // 判定待ちの間は何も受け付けない
        if self.session.is_input_locked || self.reveal_buffer.is_full() {
            debug!("GameController: tap on {} ignored (input locked)", position);
            return;
        }

        let symbol = match self.board.card(position) {
            Some(card) if card.is_selectable() => card.symbol.clone(),
            Some(card) => {
                debug!("GameController: tap on {} ignored (card is {:?})", position, card.state);
                return;
            }
            None => {
                debug_assert!(
                    position < self.board.len(),
                    "position {} is outside the board (len {})",
                    position,
                    self.board.len()
                );
                warn!("GameController: tap on {} is outside the board (len {})", position, self.board.len());
                return;
            }
        };

        if self.session.is_first_tap() {
            self.start_timer();
        }

        self.board.set_state(position, CardState::Revealed);
        self.renderer.set_card_face(position, CardState::Revealed);
        if self.reveal_buffer.push(RevealedCard { position, symbol }).is_err() {
            warn!("GameController: reveal buffer unexpectedly full on tap {}", position);
            return;
        }

        if self.reveal_buffer.is_full() {
            self.session.is_input_locked = true;
            self.session.move_count += 1;
            self.observer.on_move_count_changed(self.session.move_count);
            let task = ScheduledTask::Resolve { generation: self.session.generation };
            self.resolution_handle = Some(self.scheduler.after(self.pacing.resolution_delay_ms, task));
            debug!("GameController: move {} waiting for resolution", self.session.move_count);
        }
    }

    /// 予約しておいた処理の時間が来た。古いセッションのものなら何もしない。
    pub fn run_task(&mut self, task: ScheduledTask) {
        if task.generation() != self.session.generation {
            debug!(
                "GameController: stale {:?} dropped (current generation {})",
                task, self.session.generation
            );
            return;
        }
        match task {
            ScheduledTask::Resolve { .. } => self.resolve_flip(),
            ScheduledTask::EndGame { .. } => self.announce_win(),
            ScheduledTask::Tick { .. } => self.tick(),
        }
    }

    /// めくった2枚を判定する。バッファと入力ロックを触るのはここだけ。
    fn resolve_flip(&mut self) {
        self.resolution_handle = None;
        let Some((first, second)) = self.reveal_buffer.take_pair() else {
            warn!("GameController: resolution fired without two revealed cards");
            self.session.is_input_locked = false;
            return;
        };

        if first.symbol == second.symbol {
            for position in [first.position, second.position] {
                self.board.set_state(position, CardState::Matched);
                self.renderer.set_card_face(position, CardState::Matched);
            }
            self.session.matched_pair_count += 1;
            self.observer.on_pair_count_changed(self.session.matched_pair_count);
            debug!(
                "GameController: pair {} found ({} / {})",
                first.symbol.glyph(),
                self.session.matched_pair_count,
                self.session.pair_total
            );
            if self.session.status() == GameStatus::Won {
                self.end_game();
            }
        } else {
            for position in [first.position, second.position] {
                self.board.set_state(position, CardState::Hidden);
                self.renderer.set_card_face(position, CardState::Hidden);
            }
        }

        self.reveal_buffer.clear();
        self.session.is_input_locked = false;
    }

    pub fn start_timer(&mut self) {
        if self.session.is_timer_running {
            return;
        }
        self.session.is_timer_running = true;
        let task = ScheduledTask::Tick { generation: self.session.generation };
        self.tick_handle = Some(self.scheduler.every(self.pacing.tick_ms, task));
    }

    /// タイマーを止める。動いてなくても呼んで大丈夫。
    pub fn stop_timer(&mut self) {
        if let Some(handle) = self.tick_handle.take() {
            self.scheduler.cancel(handle);
        }
        self.session.is_timer_running = false;
    }

    fn tick(&mut self) {
        if !self.session.is_timer_running {
            return;
        }
        self.session.elapsed_seconds += 1;
        self.observer.on_time_changed(&format_elapsed(self.session.elapsed_seconds));
    }

    fn end_game(&mut self) {
        self.stop_timer();
        let task = ScheduledTask::EndGame { generation: self.session.generation };
        self.end_handle = Some(self.scheduler.after(self.pacing.end_delay_ms, task));
        info!(
            "GameController: all pairs found in {} moves, {}",
            self.session.move_count,
            self.elapsed_time()
        );
    }

    fn announce_win(&mut self) {
        // 同じセッションの EndGame は一度しか予約されないので、これで一回きり
        if self.end_handle.take().is_none() {
            return;
        }
        let time = self.elapsed_time();
        self.observer.on_game_won(self.session.move_count, &time);
    }

    fn cancel_pending(&mut self) {
        for handle in [self.resolution_handle.take(), self.end_handle.take()].into_iter().flatten() {
            self.scheduler.cancel(handle);
        }
    }

    // --- 読み取り用 ---

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn reveal_buffer(&self) -> &RevealBuffer {
        &self.reveal_buffer
    }

    pub fn status(&self) -> GameStatus {
        self.session.status()
    }

    /// `MM:SS` 形式の経過時間。
    pub fn elapsed_time(&self) -> String {
        format_elapsed(self.session.elapsed_seconds)
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
