//! `window.__volcanoTest`, exposed for browser automation when the page
//! URL carries `test=1`.

pub mod shared;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::install;
