// src/logic/deck.rs

use rand::{thread_rng, Rng};

use crate::components::card::Symbol;

/// K 種類の絵柄を2枚ずつに増やしたデッキ (2K 枚) を作る関数だよ！🃏
///
/// 並びは `[A, B, ..., A, B, ...]` で、シャッフル前はアルファベットを2回並べただけ。
pub fn create_pair_deck(alphabet: &[Symbol]) -> Vec<Symbol> {
    let mut deck = Vec::with_capacity(alphabet.len() * 2);
    deck.extend_from_slice(alphabet);
    deck.extend_from_slice(alphabet);
    deck
}

/// フィッシャー–イェーツのシャッフル。
///
/// 最後の添字 i から 1 まで下りながら、[0, i] から一様に j を引いて i と j を入れ替える。
/// 乱数生成器は外から渡すので、テストではシード固定の `StdRng` が使えるよ。
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// 盤面の並びを決める役。本番はランダム、テストでは固定の並びにしたいので trait にしてある。
pub trait Shuffler {
    fn shuffle(&mut self, symbols: &mut [Symbol]);
}

/// 任意の `Rng` でフィッシャー–イェーツするシャッフラー。
#[derive(Debug, Clone)]
pub struct RandomShuffler<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomShuffler<R> {
    pub fn new(rng: R) -> Self {
        RandomShuffler { rng }
    }
}

impl RandomShuffler<rand::rngs::ThreadRng> {
    /// スレッドローカルの乱数 (wasm では getrandom 経由で crypto.getRandomValues) を使う。
    pub fn from_thread_rng() -> Self {
        RandomShuffler::new(thread_rng())
    }
}

impl<R: Rng> Shuffler for RandomShuffler<R> {
    fn shuffle(&mut self, symbols: &mut [Symbol]) {
        fisher_yates(symbols, &mut self.rng);
    }
}

/// 何もしないシャッフラー。デッキの並び (`[A..K, A..K]`) のまま盤面になる。
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityShuffler;

impl Shuffler for IdentityShuffler {
    fn shuffle(&mut self, _symbols: &mut [Symbol]) {}
}
