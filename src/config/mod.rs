// src/config/mod.rs
//! 設定まわり。定数は defaults、JSON で上書きできる構造体は game_config。

pub mod defaults;
pub mod game_config;

pub use game_config::{ConfigError, DomIds, GameConfig};
