// src/config/defaults.rs
//! ゲームのテンポや盤面サイズ、DOM の要素 ID のデフォルト値を定義するよ！

/// 絵柄の種類数 (K)。盤面は 2K 枚。
pub const SYMBOL_COUNT: usize = 8;
/// 2枚めくってから判定するまでの待ち時間。両方の絵柄を見せるため。
pub const RESOLUTION_DELAY_MS: u32 = 1000;
/// 最後のペアが揃ってからクリア通知を出すまでの待ち時間。
pub const END_DELAY_MS: u32 = 500;
/// タイマーの1刻み。
pub const TICK_MS: u32 = 1000;

/// 絵柄のアルファベット。先頭 8 個が標準セットで、残りは大きい盤面用の予備。
pub const DEFAULT_SYMBOLS: [&str; 16] = [
    "🎮", "🎯", "🎲", "🎪", "🎨", "🎭", "🎸", "🎹", // 標準
    "🎺", "🎻", "🎳", "🎰", "🎬", "🎤", "🎧", "🎷", // 予備
];

// --- DOM の要素 ID ---
pub const BOARD_ID: &str = "game-board";
pub const MOVES_ID: &str = "moves";
pub const PAIRS_ID: &str = "pairs";
pub const TIMER_ID: &str = "timer";
pub const RESTART_BUTTON_ID: &str = "restart-btn";
pub const MODAL_ID: &str = "game-over";
pub const PLAY_AGAIN_BUTTON_ID: &str = "play-again-btn";
pub const FINAL_MOVES_ID: &str = "final-moves";
pub const FINAL_TIME_ID: &str = "final-time";
