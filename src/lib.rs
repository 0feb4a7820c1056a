// src/lib.rs

// WASM と JavaScript を繋ぐための基本！
use wasm_bindgen::prelude::*;

// 自分で作ったモジュールたち！
pub mod app; // コントローラーとブラウザ用の部品
pub mod components; // カード・盤面・セッションなどのデータ
pub mod config; // 設定と定数
pub mod logic; // シャッフルや時間表示の純粋関数
pub mod logging; // log クレート → console のロガー

pub use app::{GameApp, GameController, GameObserver, ManualScheduler, Renderer, ScheduledTask, Scheduler};
pub use components::{Board, Card, CardState, GameSession, GameStatus, RevealBuffer, Symbol};
pub use config::{ConfigError, GameConfig};

// main 関数の代わりに、Wasm がロードされた時に最初に実行される関数だよ。
#[wasm_bindgen(start)]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
    log::info!("Panic hook and console logger set!");
}
