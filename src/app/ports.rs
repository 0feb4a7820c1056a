// src/app/ports.rs
//! GameController が外の世界 (描画・タイマー・HUD) とやり取りするための trait たち。
//! ブラウザ用の実装は dom_renderer / dom_hud / browser_scheduler にあるよ。

use crate::components::{Board, CardState};

/// 予約した処理の中身。クロージャの代わりに「何をするか」と「どのセッションのものか」を持つ。
///
/// 時間が来たらホストが `GameController::run_task` に渡してくれる。
/// `generation` が今のセッションと違えば何もしない (リスタート前の古い予約)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduledTask {
    /// 2枚めくった後の判定
    Resolve { generation: u64 },
    /// クリア通知
    EndGame { generation: u64 },
    /// タイマーの1刻み
    Tick { generation: u64 },
}

impl ScheduledTask {
    pub fn generation(&self) -> u64 {
        match *self {
            ScheduledTask::Resolve { generation }
            | ScheduledTask::EndGame { generation }
            | ScheduledTask::Tick { generation } => generation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Once,
    Repeating,
}

/// `Scheduler` が返すキャンセル用のハンドル。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    pub id: i32,
    pub kind: TimerKind,
}

/// カードの描画先。
pub trait Renderer {
    /// 盤面を全部裏向きで描く。
    fn render(&mut self, board: &Board);
    /// 1枚の見た目を変える。
    fn set_card_face(&mut self, position: usize, state: CardState);
    /// 描画済みのカードを全部消す。
    fn clear(&mut self);
}

/// 遅延実行と繰り返し実行。
pub trait Scheduler {
    fn after(&mut self, delay_ms: u32, task: ScheduledTask) -> TimerHandle;
    fn every(&mut self, interval_ms: u32, task: ScheduledTask) -> TimerHandle;
    /// 終わったハンドルや知らないハンドルを渡されても何もしないこと。
    fn cancel(&mut self, handle: TimerHandle);
}

/// 手数・ペア数・時間・クリアを受け取る側 (HUD)。
pub trait GameObserver {
    fn on_move_count_changed(&mut self, count: u32);
    fn on_pair_count_changed(&mut self, count: u32);
    fn on_time_changed(&mut self, formatted: &str);
    fn on_game_won(&mut self, final_move_count: u32, final_time: &str);
    /// 新しいゲームが始まったとき。表示を 0 / 0 / 00:00 に戻す用。
    fn on_game_reset(&mut self) {}
}
