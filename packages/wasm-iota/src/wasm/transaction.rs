//! WASM bindings for Transaction
//!
//! Thin wrapper around core Transaction with #[wasm_bindgen]

use crate::transaction::Transaction;
use wasm_bindgen::prelude::*;

/// WASM-exposed transaction wrapper
#[wasm_bindgen]
pub struct WasmTransaction {
    inner: Transaction,
}

#[wasm_bindgen]
impl WasmTransaction {
    /// Parse a serialized (version 2) transaction
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<WasmTransaction, JsValue> {
        let inner = Transaction::from_json(json)?;
        Ok(WasmTransaction { inner })
    }

    /// Serialize for `Transaction.from(json)` / `signAndExecuteTransaction`
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        self.inner.to_json().map_err(|e| e.into())
    }

    /// Sender address (normalized hex)
    #[wasm_bindgen(getter)]
    pub fn sender(&self) -> String {
        self.inner.sender().to_hex()
    }

    /// Number of commands
    #[wasm_bindgen(getter, js_name = commandCount)]
    pub fn command_count(&self) -> usize {
        self.inner.commands().len()
    }

    /// Fully qualified targets of all move calls, in order
    #[wasm_bindgen(js_name = moveCallTargets)]
    pub fn move_call_targets(&self) -> Vec<String> {
        self.inner.move_calls().map(|call| call.target()).collect()
    }
}

// Non-WASM methods for internal use
impl WasmTransaction {
    /// Create from core Transaction (for builder)
    pub fn from_inner(inner: Transaction) -> Self {
        WasmTransaction { inner }
    }
}
