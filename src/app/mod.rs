// src/app/mod.rs
//! ゲームの進行役 (GameController) と、それをブラウザにつなぐ部品たち。

pub mod ports;
pub mod game_controller;
pub mod manual_scheduler;
pub mod dom_renderer;
pub mod dom_hud;
pub mod browser_scheduler;
pub mod game_app;

#[cfg(test)]
mod game_controller_tests;

pub use game_app::GameApp;
pub use game_controller::{GameController, Pacing};
pub use manual_scheduler::ManualScheduler;
pub use ports::{GameObserver, Renderer, ScheduledTask, Scheduler, TimerHandle, TimerKind};
