//! Bridge to the optional `window.__RW_BOOT` overlay in `index.html`.
//! Every call is a no-op when the overlay is missing or not a wasm build.

#[cfg(target_arch = "wasm32")]
use std::cell::Cell;

#[cfg(target_arch = "wasm32")]
use js_sys::{Array, Function, Object, Reflect};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};

use crate::loader::LoadError;

#[cfg(target_arch = "wasm32")]
const BOOT_GLOBAL: &str = "__RW_BOOT";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BootPhase {
    Starting,
    FetchingData,
    Rendering,
}

impl BootPhase {
    fn label(self) -> &'static str {
        match self {
            BootPhase::Starting => "Starting",
            BootPhase::FetchingData => "Loading data",
            BootPhase::Rendering => "Rendering",
        }
    }
}

#[cfg(target_arch = "wasm32")]
thread_local! {
    static READY_SENT: Cell<bool> = const { Cell::new(false) };
}

#[cfg(target_arch = "wasm32")]
fn overlay() -> Option<Object> {
    let window = web_sys::window()?;
    let value = Reflect::get(&window, &JsValue::from_str(BOOT_GLOBAL)).ok()?;
    if value.is_null() || value.is_undefined() {
        return None;
    }
    value.dyn_into::<Object>().ok()
}

#[cfg(target_arch = "wasm32")]
fn invoke(method: &str, args: &[&str]) {
    let Some(overlay) = overlay() else {
        return;
    };
    let Ok(func) = Reflect::get(&overlay, &JsValue::from_str(method))
        .and_then(|value| value.dyn_into::<Function>())
    else {
        return;
    };
    let array: Array = args.iter().map(|arg| JsValue::from_str(arg)).collect();
    let _ = func.apply(&overlay, &array);
}

pub(crate) fn set_phase(phase: BootPhase, detail: &str) {
    #[cfg(target_arch = "wasm32")]
    invoke("setPhase", &[phase.label(), detail]);
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (phase.label(), detail);
}

pub(crate) fn fail(err: &LoadError, hint: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let message = err.to_string();
        invoke("fail", &[err.code(), message.as_str(), hint]);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (err, hint);
}

/// Hides the overlay. Only the first call reaches the page.
pub(crate) fn ready() {
    #[cfg(target_arch = "wasm32")]
    {
        if READY_SENT.with(|sent| sent.replace(true)) {
            return;
        }
        invoke("ready", &[]);
    }
}
