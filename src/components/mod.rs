// src/components/mod.rs

// components モジュールに属するサブモジュールを宣言するよ！
pub mod board;
pub mod card;
pub mod game_state;
pub mod reveal_buffer;

pub use board::Board;
pub use card::{Card, CardState, Symbol};
pub use game_state::{GameSession, GameStatus};
pub use reveal_buffer::{RevealBuffer, RevealedCard};
