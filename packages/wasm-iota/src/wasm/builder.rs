//! WASM bindings for transaction building
//!
//! BuilderNamespace provides the entry points for building store transactions
//! one at a time. Use `WasmPurchaseWorkflow` to run a whole purchase.

use crate::config::StoreConfig;
use crate::intent::{
    build_iota_purchase, build_loyalty_purchase, build_token_merge, catalog, parse_token_ids,
};
use crate::types::Product;
use crate::wasm::transaction::WasmTransaction;
use crate::wasm::try_into_js_value::TryIntoJsValue;
use crate::js_obj;
use wasm_bindgen::prelude::*;

/// Namespace for building operations
#[wasm_bindgen]
pub struct BuilderNamespace;

#[wasm_bindgen]
impl BuilderNamespace {
    /// Product catalog: `[{ name, price }]` with price as BigInt
    #[wasm_bindgen]
    pub fn products() -> Result<JsValue, JsValue> {
        let arr = js_sys::Array::new();
        for entry in catalog() {
            arr.push(&js_obj!("name" => entry.name, "price" => entry.price)?);
        }
        Ok(arr.into())
    }

    /// Split comma-separated loyalty token IDs (trimmed, empties dropped)
    #[wasm_bindgen(js_name = parseTokenIds)]
    pub fn parse_token_ids_wasm(input: &str) -> Result<JsValue, JsValue> {
        parse_token_ids(input)
            .try_to_js_value()
            .map_err(JsValue::from)
    }

    /// Build an IOTA purchase
    ///
    /// # Arguments
    /// * `product` - Catalog name ("Laptop", "Phone", "Tablet")
    /// * `config` - Store config
    /// * `sender` - Connected account address
    ///
    /// # Example Config
    /// ```json
    /// {
    ///   "network": "testnet",
    ///   "packageId": "0x...",
    ///   "managerCapId": "0x...",
    ///   "treasuryCapId": "0x..."
    /// }
    /// ```
    #[wasm_bindgen(js_name = buildIotaPurchase)]
    pub fn build_iota_purchase_wasm(
        product: &str,
        config: JsValue,
        sender: &str,
    ) -> Result<WasmTransaction, JsValue> {
        let product: Product = product.parse()?;
        let config = parse_config(config)?;
        let tx = build_iota_purchase(product, &config, sender)?;
        Ok(WasmTransaction::from_inner(tx))
    }

    /// Build a purchase paid with one loyalty token object
    #[wasm_bindgen(js_name = buildLoyaltyPurchase)]
    pub fn build_loyalty_purchase_wasm(
        product: &str,
        token: &str,
        config: JsValue,
        sender: &str,
    ) -> Result<WasmTransaction, JsValue> {
        let product: Product = product.parse()?;
        let config = parse_config(config)?;
        let tx = build_loyalty_purchase(product, token, &config, sender)?;
        Ok(WasmTransaction::from_inner(tx))
    }

    /// Build a transaction joining all tokens into the first one
    #[wasm_bindgen(js_name = buildTokenMerge)]
    pub fn build_token_merge_wasm(
        tokens: Vec<String>,
        config: JsValue,
        sender: &str,
    ) -> Result<WasmTransaction, JsValue> {
        let config = parse_config(config)?;
        let tx = build_token_merge(&tokens, &config, sender)?;
        Ok(WasmTransaction::from_inner(tx))
    }
}

/// Deserialize and validate a StoreConfig from JS
pub(crate) fn parse_config(config: JsValue) -> Result<StoreConfig, JsValue> {
    let config: StoreConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
    config.validate()?;
    Ok(config)
}
