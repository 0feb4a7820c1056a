// src/config/game_config.rs
//! ゲームの設定。JS 側から JSON で渡せるようにしてあるよ！

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::components::card::Symbol;
use crate::config::defaults;

/// 設定の読み込み・検証で起きるエラー。
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("設定 JSON を読めませんでした: {0}")]
    Json(#[from] serde_json::Error),
    #[error("symbolCount は 1 以上にしてください")]
    NoSymbols,
    #[error("symbolCount ({requested}) が絵柄の数 ({available}) より多いです")]
    TooManySymbols { requested: usize, available: usize },
    #[error("絵柄 {0:?} が重複しています")]
    DuplicateSymbol(String),
    #[error("tickMs は 0 にできません")]
    ZeroTick,
}

/// DOM の要素 ID たち。index.html の構成を変えたいときに上書きする。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DomIds {
    pub board_id: String,
    pub moves_id: String,
    pub pairs_id: String,
    pub timer_id: String,
    pub restart_button_id: String,
    pub modal_id: String,
    pub play_again_button_id: String,
    pub final_moves_id: String,
    pub final_time_id: String,
}

impl Default for DomIds {
    fn default() -> Self {
        DomIds {
            board_id: defaults::BOARD_ID.to_string(),
            moves_id: defaults::MOVES_ID.to_string(),
            pairs_id: defaults::PAIRS_ID.to_string(),
            timer_id: defaults::TIMER_ID.to_string(),
            restart_button_id: defaults::RESTART_BUTTON_ID.to_string(),
            modal_id: defaults::MODAL_ID.to_string(),
            play_again_button_id: defaults::PLAY_AGAIN_BUTTON_ID.to_string(),
            final_moves_id: defaults::FINAL_MOVES_ID.to_string(),
            final_time_id: defaults::FINAL_TIME_ID.to_string(),
        }
    }
}

/// ゲームの設定。キーが無ければデフォルト値になるよ。
///
/// ```json
/// { "symbolCount": 6, "resolutionDelayMs": 800 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub symbol_count: usize,
    pub resolution_delay_ms: u32,
    pub end_delay_ms: u32,
    pub tick_ms: u32,
    pub symbols: Vec<String>,
    #[serde(flatten)]
    pub dom: DomIds,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            symbol_count: defaults::SYMBOL_COUNT,
            resolution_delay_ms: defaults::RESOLUTION_DELAY_MS,
            end_delay_ms: defaults::END_DELAY_MS,
            tick_ms: defaults::TICK_MS,
            symbols: defaults::DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            dom: DomIds::default(),
        }
    }
}

impl GameConfig {
    /// JSON 文字列から読み込んで、ついでに検証もする。
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol_count == 0 {
            return Err(ConfigError::NoSymbols);
        }
        if self.symbol_count > self.symbols.len() {
            return Err(ConfigError::TooManySymbols {
                requested: self.symbol_count,
                available: self.symbols.len(),
            });
        }
        let mut seen = HashSet::with_capacity(self.symbols.len());
        for glyph in &self.symbols {
            if !seen.insert(glyph.as_str()) {
                return Err(ConfigError::DuplicateSymbol(glyph.clone()));
            }
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        Ok(())
    }

    /// 実際に使う K 個の絵柄。
    pub fn alphabet(&self) -> Vec<Symbol> {
        self.symbols
            .iter()
            .take(self.symbol_count)
            .map(|glyph| Symbol::new(glyph.as_str()))
            .collect()
    }

    /// 揃えるべきペア数 (K)。
    pub fn pair_total(&self) -> u32 {
        self.symbol_count as u32
    }
}
