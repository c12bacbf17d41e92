//! WASM bindings for wasm-iota
//!
//! This module contains thin wrappers with #[wasm_bindgen] that delegate
//! to the core Rust implementations.

pub mod builder;
pub mod transaction;
pub mod try_into_js_value;
pub mod workflow;

use wasm_bindgen::prelude::*;

// Re-export WASM types
pub use builder::BuilderNamespace;
pub use transaction::WasmTransaction;
pub use workflow::{JsWallet, JsWalletSession, WasmPurchaseWorkflow};

/// Route Rust panics to `console.error`
#[wasm_bindgen(js_name = initPanicHook)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}
