// src/app/dom_renderer.rs
//! Renderer の DOM 実装。`#game-board` の中に `div.card` を並べるよ。
//!
//! 見た目は CSS クラスで切り替える:
//! - 裏向き: クラスなし
//! - めくった: `flipped`
//! - 揃った: `flipped` + `matched`

use log::error;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::app::ports::Renderer;
use crate::components::{Board, CardState};

pub const CARD_CLASS: &str = "card";
pub const FLIPPED_CLASS: &str = "flipped";
pub const MATCHED_CLASS: &str = "matched";
pub const INDEX_ATTR: &str = "data-index";

pub struct DomRenderer {
    document: Document,
    board_el: Element,
    // position 順のカード要素
    card_els: Vec<Element>,
}

impl DomRenderer {
    pub fn new(document: Document, board_id: &str) -> Result<Self, JsValue> {
        let board_el = document
            .get_element_by_id(board_id)
            .ok_or_else(|| JsValue::from_str(&format!("Element #{} not found", board_id)))?;
        Ok(DomRenderer {
            document,
            board_el,
            card_els: Vec::new(),
        })
    }

    /// 1枚分の要素を作る。表に "?"、裏に絵柄。
    fn create_card_element(&self, position: usize, glyph: &str) -> Result<Element, JsValue> {
        let card_el = self.document.create_element("div")?;
        card_el.class_list().add_1(CARD_CLASS)?;
        card_el.set_attribute(INDEX_ATTR, &position.to_string())?;

        let front = self.document.create_element("div")?;
        front.class_list().add_1("card-front")?;
        front.set_text_content(Some("?"));

        // 絵柄は設定から来る文字列なので innerHTML には入れない
        let back = self.document.create_element("div")?;
        back.class_list().add_1("card-back")?;
        back.set_text_content(Some(glyph));

        card_el.append_child(&front)?;
        card_el.append_child(&back)?;
        Ok(card_el)
    }

    fn try_render(&mut self, board: &Board) -> Result<(), JsValue> {
        for card in board.cards() {
            let card_el = self.create_card_element(card.position, card.symbol.glyph())?;
            self.board_el.append_child(&card_el)?;
            self.card_els.push(card_el);
        }
        Ok(())
    }

    fn try_set_face(&self, position: usize, state: CardState) -> Result<(), JsValue> {
        let card_el = self
            .card_els
            .get(position)
            .ok_or_else(|| JsValue::from_str(&format!("No card element at {}", position)))?;
        let classes = card_el.class_list();
        match state {
            CardState::Hidden => classes.remove_2(FLIPPED_CLASS, MATCHED_CLASS),
            CardState::Revealed => classes.add_1(FLIPPED_CLASS),
            CardState::Matched => classes.add_2(FLIPPED_CLASS, MATCHED_CLASS),
        }
    }
}

impl Renderer for DomRenderer {
    fn render(&mut self, board: &Board) {
        if let Err(e) = self.try_render(board) {
            error!("App::DomRenderer: Failed to render board: {:?}", e);
        }
    }

    fn set_card_face(&mut self, position: usize, state: CardState) {
        if let Err(e) = self.try_set_face(position, state) {
            error!("App::DomRenderer: Failed to set card {} to {:?}: {:?}", position, state, e);
        }
    }

    fn clear(&mut self) {
        self.board_el.set_inner_html("");
        self.card_els.clear();
    }
}

/// クリックされた要素から、いちばん近い `.card` の `data-index` を読む。
/// カード以外 (盤面の隙間とか) をクリックしたら None。
pub fn card_index_from_target(target: &Element) -> Option<usize> {
    let card_el = target.closest(&format!(".{}", CARD_CLASS)).ok().flatten()?;
    card_el.get_attribute(INDEX_ATTR)?.parse().ok()
}
