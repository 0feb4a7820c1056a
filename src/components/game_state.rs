// src/components/game_state.rs

// serde を使う宣言！セッションの中身をデバッグ用に JSON で見たいときに使うよ。
use serde::{Deserialize, Serialize};

/// ゲーム全体の今の状態を表す列挙型だよ！🏆🏁
///
/// 勝利は `matched_pairs == K` になったときだけ。それ以外は全部 Playing。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// ゲームが進行中の状態
    Playing,
    /// 全ペア揃った！🏆
    Won,
}

/// 1回分のゲーム (セッション) の数値をまとめた構造体。
///
/// `initialize()` のたびにまるごと作り直されるよ。
/// `generation` だけは前のセッションから +1 して引き継ぐ。遅れて届いた
/// 古いコールバックを見分けるための番号なんだ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub move_count: u32,
    pub matched_pair_count: u32,
    pub elapsed_seconds: u64,
    pub is_input_locked: bool,
    pub is_timer_running: bool,
    pub generation: u64,
    /// 揃えるべきペア数 (K)。
    pub pair_total: u32,
}

impl GameSession {
    pub fn new(pair_total: u32, generation: u64) -> Self {
        GameSession {
            move_count: 0,
            matched_pair_count: 0,
            elapsed_seconds: 0,
            is_input_locked: false,
            is_timer_running: false,
            generation,
            pair_total,
        }
    }

    pub fn status(&self) -> GameStatus {
        if self.pair_total > 0 && self.matched_pair_count == self.pair_total {
            GameStatus::Won
        } else {
            GameStatus::Playing
        }
    }

    /// セッション最初のタップかどうか (タイマー開始の判定に使う)。
    pub fn is_first_tap(&self) -> bool {
        self.move_count == 0 && !self.is_timer_running
    }
}
