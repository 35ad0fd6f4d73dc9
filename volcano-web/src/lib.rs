#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod app;
pub mod config;
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod engine;
pub mod error;
pub mod form;
pub mod logger;
pub mod paths;
pub mod surface;
pub mod test_bridge;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
    wasm_bindgen_futures::spawn_local(async {
        match app::boot().await {
            Ok(app) => test_bridge::install(&app, config::page_config().stress_iterations),
            Err(err) => log::error!("volcano viewer failed to start: {err}"),
        }
    });
}
