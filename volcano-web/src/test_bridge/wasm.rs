use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::shared::{BridgeState, stress_request};
use crate::app::{PageEngine, SharedApp, run_cycle};
use crate::dom;

fn snapshot<E: PageEngine>(app: &SharedApp<E>) -> JsValue {
    let Ok(app) = app.try_borrow() else {
        return JsValue::NULL;
    };
    let state = BridgeState {
        mode: app.display().mode(),
        selection: app.display().last_selection(),
        generation: app.bindings().generation(),
        bound_choices: app.bindings().len(),
        bound_listeners: app.surface().bound_listeners(),
        counters: app.counters(),
    };
    serde_wasm_bindgen::to_value(&state).unwrap_or(JsValue::NULL)
}

fn set_member(target: &JsValue, key: &str, value: &JsValue) {
    if js_sys::Reflect::set(target, &JsValue::from_str(key), value).is_err() {
        log::warn!("test bridge: could not set {key}");
    }
}

/// Publish the bridge when the page runs in test mode.
/// `stress_iterations` is the page's configured stress count.
pub fn install<E: PageEngine>(app: &SharedApp<E>, stress_iterations: usize) {
    if !dom::test_mode_enabled() {
        return;
    }
    let Ok(window) = dom::window() else {
        return;
    };

    let state_app = app.clone();
    let state = Closure::<dyn FnMut() -> JsValue>::new(move || snapshot(&state_app));

    let stress_app = app.clone();
    let stress = Closure::<dyn FnMut(JsValue)>::new(move |count: JsValue| {
        let iterations = stress_request(count.as_f64(), stress_iterations);
        run_cycle(&stress_app, "bridge stress", |app| app.stress(iterations));
    });

    let bridge = js_sys::Object::new();
    set_member(&bridge, "state", state.as_ref().unchecked_ref());
    set_member(&bridge, "stress", stress.as_ref().unchecked_ref());
    set_member(&window, "__volcanoTest", &bridge);
    state.forget();
    stress.forget();
    log::info!("test bridge installed");
}
