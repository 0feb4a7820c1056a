// src/components/reveal_buffer.rs
//! めくったけどまだ判定してないカードを溜めておくバッファ (最大2枚)。

use crate::components::card::Symbol;

/// バッファに入る1枚分の情報。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealedCard {
    pub position: usize,
    pub symbol: Symbol,
}

/// 容量2の固定バッファだよ！
///
/// 配列の長さで「何枚目か」を判断するんじゃなくて、`first` / `second` の
/// 2スロットを型で表しておく。3枚目は型の上で入らない！
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealBuffer {
    first: Option<RevealedCard>,
    second: Option<RevealedCard>,
}

/// 満杯のバッファに push しようとしたときに返ってくるよ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferFull(pub RevealedCard);

impl RevealBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.first.is_some() as usize + self.second.is_some() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    pub fn is_full(&self) -> bool {
        self.second.is_some()
    }

    /// めくった順に詰める。満杯ならそのまま突き返す。
    pub fn push(&mut self, entry: RevealedCard) -> Result<(), BufferFull> {
        if self.first.is_none() {
            self.first = Some(entry);
        } else if self.second.is_none() {
            self.second = Some(entry);
        } else {
            return Err(BufferFull(entry));
        }
        Ok(())
    }

    pub fn first(&self) -> Option<&RevealedCard> {
        self.first.as_ref()
    }

    pub fn second(&self) -> Option<&RevealedCard> {
        self.second.as_ref()
    }

    /// 2枚揃っていれば取り出して空にする。揃ってなければ何もしない。
    pub fn take_pair(&mut self) -> Option<(RevealedCard, RevealedCard)> {
        if !self.is_full() {
            return None;
        }
        match (self.first.take(), self.second.take()) {
            (Some(first), Some(second)) => Some((first, second)),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.first = None;
        self.second = None;
    }
}
