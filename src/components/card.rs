// src/components/card.rs

// serde を使う宣言！盤面の状態を JSON でデバッグ出力したりするのに使うよ。
use serde::{Deserialize, Serialize};

/// カードの絵柄（シンボル）を表す型だよ！🎴
///
/// 中身は表示用の文字列 (絵文字とか) だけど、ゲームロジックでは
/// 「同じかどうか」(`==`) しか使わないよ。順序には意味がないから Ord は付けない！
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(glyph: impl Into<String>) -> Self {
        Symbol(glyph.into())
    }

    /// 画面に出す文字列。
    pub fn glyph(&self) -> &str {
        &self.0
    }
}

/// カード1枚の見た目の状態だよ。
///
/// 遷移は Hidden → Revealed → (Matched | Hidden) だけ。
/// Matched は終端で、二度と戻らない！
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    /// 裏向き
    Hidden,
    /// めくられてるけど、まだ判定待ち
    Revealed,
    /// ペアが揃った！✨
    Matched,
}

/// 盤面上のカード1枚。
///
/// - `position`: 盤面上のインデックス (0..2K-1、重複なし)
/// - `symbol`: 絵柄。同じ絵柄のカードはちょうど2枚
/// - `state`: 今の状態
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub position: usize,
    pub symbol: Symbol,
    pub state: CardState,
}

impl Card {
    /// 裏向きのカードを作るよ。ゲーム開始時は全部これ。
    pub fn hidden(position: usize, symbol: Symbol) -> Self {
        Card {
            position,
            symbol,
            state: CardState::Hidden,
        }
    }

    /// タップを受け付けられる状態か (= 裏向きか)。
    pub fn is_selectable(&self) -> bool {
        self.state == CardState::Hidden
    }

    pub fn is_matched(&self) -> bool {
        self.state == CardState::Matched
    }
}
