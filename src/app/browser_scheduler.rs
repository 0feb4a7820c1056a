// src/app/browser_scheduler.rs
//! Scheduler のブラウザ実装。window.setTimeout / setInterval を使うよ。
//!
//! 時間が来たら、弱参照で持ってるコントローラーをロックして `run_task` を呼ぶ。
//! コントローラーがこのスケジューラーを所有してるので、強参照だと循環しちゃう。

use std::collections::HashMap;
use std::sync::{Mutex, Weak};

use log::{error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::app::game_app::BrowserController;
use crate::app::ports::{ScheduledTask, Scheduler, TimerHandle, TimerKind};

/// setTimeout が失敗したときに返す、何も指さないハンドル
const INERT_ID: i32 = -1;

pub struct BrowserScheduler {
    window: Window,
    controller: Weak<Mutex<BrowserController>>,
    // setInterval のクロージャは cancel まで生かしておく必要がある
    interval_closures: HashMap<i32, Closure<dyn FnMut()>>,
}

/// タスクをコントローラーに届ける。コントローラーが既に無ければ何もしない。
fn dispatch(controller: &Weak<Mutex<BrowserController>>, task: ScheduledTask) {
    let Some(controller_arc) = controller.upgrade() else {
        warn!("App::BrowserScheduler: controller dropped, {:?} discarded", task);
        return;
    };
    let mut controller = match controller_arc.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            error!("App::BrowserScheduler: controller mutex poisoned. Recovering...");
            poisoned.into_inner()
        }
    };
    controller.run_task(task);
}

impl BrowserScheduler {
    pub fn new(window: Window, controller: Weak<Mutex<BrowserController>>) -> Self {
        BrowserScheduler {
            window,
            controller,
            interval_closures: HashMap::new(),
        }
    }
}

impl Scheduler for BrowserScheduler {
    fn after(&mut self, delay_ms: u32, task: ScheduledTask) -> TimerHandle {
        let controller = self.controller.clone();
        // 一回きりなので、呼ばれたら自分で解放される once_into_js を使う
        let callback = Closure::once_into_js(move || dispatch(&controller, task));
        let id = match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref::<js_sys::Function>(), delay_ms as i32)
        {
            Ok(id) => id,
            Err(e) => {
                error!("App::BrowserScheduler: setTimeout failed for {:?}: {:?}", task, e);
                INERT_ID
            }
        };
        TimerHandle { id, kind: TimerKind::Once }
    }

    fn every(&mut self, interval_ms: u32, task: ScheduledTask) -> TimerHandle {
        let controller = self.controller.clone();
        let closure = Closure::<dyn FnMut()>::new(move || dispatch(&controller, task));
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(closure.as_ref().unchecked_ref::<js_sys::Function>(), interval_ms as i32)
        {
            Ok(id) => {
                self.interval_closures.insert(id, closure);
                TimerHandle { id, kind: TimerKind::Repeating }
            }
            Err(e) => {
                error!("App::BrowserScheduler: setInterval failed for {:?}: {:?}", task, e);
                TimerHandle { id: INERT_ID, kind: TimerKind::Repeating }
            }
        }
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if handle.id == INERT_ID {
            return;
        }
        match handle.kind {
            TimerKind::Once => self.window.clear_timeout_with_handle(handle.id),
            TimerKind::Repeating => {
                self.window.clear_interval_with_handle(handle.id);
                // clearInterval した後なら drop しても呼ばれない
                self.interval_closures.remove(&handle.id);
            }
        }
    }
}

impl Drop for BrowserScheduler {
    fn drop(&mut self) {
        for id in self.interval_closures.keys() {
            self.window.clear_interval_with_handle(*id);
        }
    }
}
