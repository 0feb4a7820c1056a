// src/components/board.rs
//! 2K 枚のカードが並んだ盤面だよ！
//! 並び順はシャッフル後に固定。あとから変わるのは各カードの state だけ。

use itertools::Itertools;
use serde::Serialize;

use crate::components::card::{Card, CardState, Symbol};

/// 盤面。`cards[i].position == i` が常に成り立つよ。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// シャッフル済みの絵柄の並びから盤面を作る。全部裏向き！
    pub fn from_symbols(symbols: Vec<Symbol>) -> Self {
        let cards = symbols
            .into_iter()
            .enumerate()
            .map(|(position, symbol)| Card::hidden(position, symbol))
            .collect();
        Board { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    /// 1枚の状態を変える。Matched から戻す遷移は無視するよ (Matched は終端)。
    /// 変更できたら true。
    pub(crate) fn set_state(&mut self, position: usize, state: CardState) -> bool {
        match self.cards.get_mut(position) {
            Some(card) if card.state == CardState::Matched && state != CardState::Matched => false,
            Some(card) => {
                card.state = state;
                true
            }
            None => false,
        }
    }

    /// どの絵柄もちょうど2枚ずつあるか。
    pub fn has_exact_pairs(&self) -> bool {
        self.cards.iter().map(|c| &c.symbol).counts().values().all(|&n| n == 2)
    }

    /// 全カードが Matched か。
    pub fn is_cleared(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(Card::is_matched)
    }
}
