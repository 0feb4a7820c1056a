// src/app/dom_hud.rs
//! GameObserver の DOM 実装。手数・ペア数・タイマーの表示と、クリア時のモーダル。

use log::error;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::app::ports::GameObserver;
use crate::config::DomIds;

/// モーダルを隠すためのクラス
const HIDDEN_CLASS: &str = "hidden";

pub struct DomHud {
    moves_el: Element,
    pairs_el: Element,
    timer_el: Element,
    modal_el: Element,
    final_moves_el: Element,
    final_time_el: Element,
}

fn find(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Element #{} not found", id)))
}

impl DomHud {
    pub fn new(document: &Document, ids: &DomIds) -> Result<Self, JsValue> {
        Ok(DomHud {
            moves_el: find(document, &ids.moves_id)?,
            pairs_el: find(document, &ids.pairs_id)?,
            timer_el: find(document, &ids.timer_id)?,
            modal_el: find(document, &ids.modal_id)?,
            final_moves_el: find(document, &ids.final_moves_id)?,
            final_time_el: find(document, &ids.final_time_id)?,
        })
    }
}

impl GameObserver for DomHud {
    fn on_move_count_changed(&mut self, count: u32) {
        self.moves_el.set_text_content(Some(&count.to_string()));
    }

    fn on_pair_count_changed(&mut self, count: u32) {
        self.pairs_el.set_text_content(Some(&count.to_string()));
    }

    fn on_time_changed(&mut self, formatted: &str) {
        self.timer_el.set_text_content(Some(formatted));
    }

    fn on_game_won(&mut self, final_move_count: u32, final_time: &str) {
        self.final_moves_el.set_text_content(Some(&final_move_count.to_string()));
        self.final_time_el.set_text_content(Some(final_time));
        if let Err(e) = self.modal_el.class_list().remove_1(HIDDEN_CLASS) {
            error!("App::DomHud: Failed to show game-over modal: {:?}", e);
        }
    }

    fn on_game_reset(&mut self) {
        self.moves_el.set_text_content(Some("0"));
        self.pairs_el.set_text_content(Some("0"));
        self.timer_el.set_text_content(Some("00:00"));
        if let Err(e) = self.modal_el.class_list().add_1(HIDDEN_CLASS) {
            error!("App::DomHud: Failed to hide game-over modal: {:?}", e);
        }
    }
}
