// src/logic/mod.rs
//! 状態を持たない純粋なロジック (デッキ作成・シャッフル・時間表示) をまとめるよ！

pub mod deck;
pub mod timer_format;

pub use deck::{create_pair_deck, fisher_yates, IdentityShuffler, RandomShuffler, Shuffler};
pub use timer_format::format_elapsed;
