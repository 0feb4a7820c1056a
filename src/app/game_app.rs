// src/app/game_app.rs

// --- 必要なものをインポート ---
use std::sync::{Arc, Mutex, MutexGuard};

use log::{error, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget};

use crate::app::browser_scheduler::BrowserScheduler;
use crate::app::dom_hud::DomHud;
use crate::app::dom_renderer::{card_index_from_target, DomRenderer};
use crate::app::game_controller::GameController;
use crate::components::GameStatus;
use crate::config::GameConfig;
use crate::logic::deck::RandomShuffler;

/// ブラウザで動かすときのコントローラーの型。
pub type BrowserController = GameController<DomRenderer, BrowserScheduler, DomHud>;

/// 登録したイベントリスナー。Drop のときに外すために、対象とイベント名も覚えておく。
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// JS から使うゲーム本体！
///
/// ```js
/// const app = new GameApp();   // または GameApp.with_config('{"symbolCount": 6}')
/// app.start();
/// ```
#[wasm_bindgen]
pub struct GameApp {
    controller: Arc<Mutex<BrowserController>>,
    config: GameConfig,
    // イベントリスナーのクロージャ。ここで持っておかないと JS 側から呼ばれたときに解放済みになる
    listeners: Vec<Listener>,
}

/// コントローラーをロックする。poison してても中身は使えるので取り出して続行。
fn lock_controller(controller: &Arc<Mutex<BrowserController>>) -> MutexGuard<'_, BrowserController> {
    match controller.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            error!("App::GameApp: controller mutex poisoned. Recovering...");
            poisoned.into_inner()
        }
    }
}

#[wasm_bindgen]
impl GameApp {
    /// デフォルト設定で作る。
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<GameApp, JsValue> {
        Self::build(GameConfig::default())
    }

    /// JSON の設定で作る。キーが無いところはデフォルト値。
    pub fn with_config(json: &str) -> Result<GameApp, JsValue> {
        let config = GameConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::build(config)
    }

    /// クリックのリスナーを付けて、最初のゲームを始める。
    pub fn start(&mut self) -> Result<(), JsValue> {
        info!("GameApp: start() called.");
        if self.listeners.is_empty() {
            self.attach_listeners()?;
        }
        lock_controller(&self.controller).initialize();
        Ok(())
    }

    /// 新しいゲームにする (リスタートボタンと同じ)。
    pub fn restart(&self) {
        lock_controller(&self.controller).initialize();
    }

    /// position のカードをタップしたことにする。リスナーを使わずに JS から直接呼びたいとき用。
    pub fn tap(&self, position: usize) {
        let mut controller = lock_controller(&self.controller);
        if position >= controller.board().len() {
            warn!("GameApp: tap({}) ignored, board has {} cards", position, controller.board().len());
            return;
        }
        controller.on_card_tapped(position);
    }

    pub fn moves(&self) -> u32 {
        lock_controller(&self.controller).session().move_count
    }

    pub fn pairs(&self) -> u32 {
        lock_controller(&self.controller).session().matched_pair_count
    }

    pub fn elapsed_time(&self) -> String {
        lock_controller(&self.controller).elapsed_time()
    }

    pub fn is_won(&self) -> bool {
        lock_controller(&self.controller).status() == GameStatus::Won
    }

    /// デバッグ用: 盤面を JSON で返す。
    pub fn board_json_debug(&self) -> String {
        let controller = lock_controller(&self.controller);
        serde_json::to_string(controller.board()).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
    }
}

impl GameApp {
    fn build(config: GameConfig) -> Result<GameApp, JsValue> {
        info!("GameApp: Initializing...");
        let window = web_sys::window().ok_or("Failed to get window")?;
        let document = window.document().ok_or("Failed to get document")?;

        let renderer = DomRenderer::new(document.clone(), &config.dom.board_id)?;
        let hud = DomHud::new(&document, &config.dom)?;

        // スケジューラーはコントローラーへの弱参照を持つので new_cyclic で組み立てる
        let controller = Arc::new_cyclic(|weak| {
            Mutex::new(GameController::new(
                &config,
                Box::new(RandomShuffler::from_thread_rng()),
                renderer,
                BrowserScheduler::new(window, weak.clone()),
                hud,
            ))
        });

        info!("GameApp: Initialization complete.");
        Ok(GameApp {
            controller,
            config,
            listeners: Vec::new(),
        })
    }

    fn element(&self, id: &str) -> Result<Element, JsValue> {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .ok_or_else(|| JsValue::from_str(&format!("Element #{} not found", id)))
    }

    fn listen(&mut self, target: EventTarget, event: &'static str, closure: Closure<dyn FnMut(Event)>) -> Result<(), JsValue> {
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        self.listeners.push(Listener { target, event, closure });
        Ok(())
    }

    /// 盤面のクリック (イベント委譲) と、リスタート / もう一回ボタン。
    fn attach_listeners(&mut self) -> Result<(), JsValue> {
        // --- 盤面: クリックされた .card の data-index を読んでタップ扱い ---
        {
            let controller = Arc::clone(&self.controller);
            let closure = Closure::wrap(Box::new(move |event: Event| {
                let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                    return;
                };
                if let Some(position) = card_index_from_target(&target) {
                    lock_controller(&controller).on_card_tapped(position);
                }
            }) as Box<dyn FnMut(Event)>);
            let board = self.element(&self.config.dom.board_id)?;
            self.listen(board.into(), "click", closure)?;
        }

        // --- リスタート系のボタン ---
        let button_ids = [
            self.config.dom.restart_button_id.clone(),
            self.config.dom.play_again_button_id.clone(),
        ];
        for id in button_ids {
            let controller = Arc::clone(&self.controller);
            let closure = Closure::wrap(Box::new(move |_event: Event| {
                lock_controller(&controller).initialize();
            }) as Box<dyn FnMut(Event)>);
            let button = self.element(&id)?;
            self.listen(button.into(), "click", closure)?;
        }

        info!("GameApp: Attached {} listeners.", self.listeners.len());
        Ok(())
    }
}

impl Drop for GameApp {
    fn drop(&mut self) {
        for listener in self.listeners.drain(..) {
            if let Err(e) = listener
                .target
                .remove_event_listener_with_callback(listener.event, listener.closure.as_ref().unchecked_ref())
            {
                error!("GameApp: Failed to detach {} listener: {:?}", listener.event, e);
            }
        }
    }
}
