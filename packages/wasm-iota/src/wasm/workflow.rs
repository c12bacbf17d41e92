//! WASM bindings for the purchase workflow
//!
//! Adapts the dApp kit wallet to [`WalletSession`] and runs purchases as JS
//! promises.
//!
//! ```javascript
//! const workflow = new WasmPurchaseWorkflow(config, {
//!   currentAccount: () => account?.address,
//!   signAndExecuteTransaction: (json) =>
//!     signAndExecute({ transaction: Transaction.from(json) }),
//! });
//! const status = await workflow.purchase(
//!   { product: "Laptop", paymentMethod: "LOYALTY", tokenInput: "0xabc, 0xdef" },
//!   (status) => setStatus(status.message),
//! );
//! ```

use std::rc::Rc;

use async_trait::async_trait;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, JsFuture};

use crate::error::WalletError;
use crate::intent::PurchaseIntent;
use crate::transaction::Transaction;
use crate::wasm::builder::parse_config;
use crate::workflow::{ExecutionResult, PurchaseStatus, PurchaseWorkflow, WalletSession};

#[wasm_bindgen]
extern "C" {
    /// Wallet object supplied by the front-end
    #[wasm_bindgen(typescript_type = "StoreWallet")]
    pub type JsWallet;

    #[wasm_bindgen(method, js_name = currentAccount)]
    fn current_account(this: &JsWallet) -> Option<String>;

    #[wasm_bindgen(method, catch, js_name = signAndExecuteTransaction)]
    fn sign_and_execute_transaction(
        this: &JsWallet,
        transaction: &str,
    ) -> Result<js_sys::Promise, JsValue>;
}

#[wasm_bindgen(typescript_custom_section)]
const STORE_WALLET_TS: &str = r#"
export interface StoreWallet {
  currentAccount(): string | undefined | null;
  signAndExecuteTransaction(transactionJson: string): Promise<{ digest: string }>;
}
"#;

/// [`WalletSession`] backed by a JS wallet object
pub struct JsWalletSession {
    wallet: JsWallet,
}

#[async_trait(?Send)]
impl WalletSession for JsWalletSession {
    fn current_account(&self) -> Option<String> {
        self.wallet.current_account()
    }

    async fn sign_and_execute(
        &self,
        transaction: &Transaction,
    ) -> Result<ExecutionResult, WalletError> {
        let json = transaction
            .to_json()
            .map_err(|e| WalletError::new(e.to_string()))?;
        let promise = self
            .wallet
            .sign_and_execute_transaction(&json)
            .map_err(|e| WalletError::new(js_error_message(&e)))?;
        let value = JsFuture::from(promise)
            .await
            .map_err(|e| WalletError::new(js_error_message(&e)))?;
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| WalletError::new(format!("Unexpected wallet response: {}", e)))
    }
}

/// Purchase workflow bound to a JS wallet
#[wasm_bindgen]
pub struct WasmPurchaseWorkflow {
    inner: Rc<PurchaseWorkflow<JsWalletSession>>,
}

#[wasm_bindgen]
impl WasmPurchaseWorkflow {
    /// # Arguments
    /// * `config` - Store config (network, packageId, managerCapId, treasuryCapId)
    /// * `wallet` - Object with `currentAccount()` and `signAndExecuteTransaction(json)`
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, wallet: JsWallet) -> Result<WasmPurchaseWorkflow, JsValue> {
        let config = parse_config(config)?;
        Ok(WasmPurchaseWorkflow {
            inner: Rc::new(PurchaseWorkflow::new(config, JsWalletSession { wallet })),
        })
    }

    /// Run a purchase
    ///
    /// `onStatus` receives `{ state, message, digest?, mergeDigest? }` on every
    /// transition. The returned promise resolves with the terminal status and
    /// never rejects for purchase failures.
    pub fn purchase(
        &self,
        intent: JsValue,
        on_status: Option<js_sys::Function>,
    ) -> Result<js_sys::Promise, JsValue> {
        let intent: PurchaseIntent = serde_wasm_bindgen::from_value(intent)
            .map_err(|e| JsValue::from_str(&format!("Invalid intent: {}", e)))?;
        let workflow = Rc::clone(&self.inner);

        Ok(future_to_promise(async move {
            let status = workflow
                .purchase(&intent, |status| notify(on_status.as_ref(), status))
                .await;
            status_to_js(&status)
        }))
    }

    /// Fullnode URL of the configured network
    #[wasm_bindgen(getter, js_name = fullnodeUrl)]
    pub fn fullnode_url(&self) -> String {
        self.inner.config().fullnode_url().to_string()
    }
}

fn notify(callback: Option<&js_sys::Function>, status: &PurchaseStatus) {
    let Some(callback) = callback else {
        return;
    };
    let result = status_to_js(status).and_then(|value| callback.call1(&JsValue::NULL, &value));
    if let Err(e) = result {
        tracing::warn!("Status callback failed: {}", js_error_message(&e));
    }
}

fn status_to_js(status: &PurchaseStatus) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&status.report())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

// WASM tests - only run in wasm32 target
#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::intent::build_iota_purchase;
    use crate::test_utils::{test_config, SENDER};
    use crate::types::{PaymentMethod, Product};
    use std::cell::RefCell;
    use wasm_bindgen_test::*;

    /// Plain JS wallet object. Every `signAndExecuteTransaction` call bumps
    /// `calls` and then runs `sign_body`.
    fn js_wallet(sign_body: &str) -> js_sys::Object {
        let wallet = js_sys::Object::new();
        let account = js_sys::Function::new_no_args(&format!("return '{}';", SENDER));
        let sign = js_sys::Function::new_with_args(
            "json",
            &format!("this.calls = (this.calls || 0) + 1; {}", sign_body),
        );
        js_sys::Reflect::set(&wallet, &"currentAccount".into(), &account).unwrap();
        js_sys::Reflect::set(&wallet, &"signAndExecuteTransaction".into(), &sign).unwrap();
        wallet
    }

    fn calls(wallet: &js_sys::Object) -> f64 {
        js_sys::Reflect::get(wallet, &"calls".into())
            .unwrap()
            .as_f64()
            .unwrap_or(0.0)
    }

    fn session(sign_body: &str) -> JsWalletSession {
        JsWalletSession {
            wallet: js_wallet(sign_body).unchecked_into(),
        }
    }

    fn workflow(wallet: &js_sys::Object) -> WasmPurchaseWorkflow {
        let config = serde_wasm_bindgen::to_value(&test_config()).unwrap();
        WasmPurchaseWorkflow::new(config, wallet.clone().unchecked_into()).unwrap()
    }

    fn loyalty_intent(tokens: &str) -> JsValue {
        let intent = PurchaseIntent::new(Product::Laptop, PaymentMethod::Loyalty, tokens);
        serde_wasm_bindgen::to_value(&intent).unwrap()
    }

    fn field(value: &JsValue, key: &str) -> Option<String> {
        js_sys::Reflect::get(value, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_string())
    }

    fn purchase_tx() -> Transaction {
        build_iota_purchase(Product::Phone, &test_config(), SENDER).unwrap()
    }

    #[wasm_bindgen_test]
    async fn test_session_reads_digest() {
        let session = session("return Promise.resolve({ digest: 'DgJs', effects: {} });");

        assert_eq!(session.current_account().as_deref(), Some(SENDER));
        assert_eq!(
            session.sign_and_execute(&purchase_tx()).await,
            Ok(ExecutionResult::new("DgJs"))
        );
    }

    #[wasm_bindgen_test]
    async fn test_session_maps_wallet_failures() {
        let thrown = session("throw new Error('wallet locked');");
        assert_eq!(
            thrown.sign_and_execute(&purchase_tx()).await,
            Err(WalletError::new("wallet locked"))
        );

        let rejected = session("return Promise.reject(new Error('user rejected'));");
        assert_eq!(
            rejected.sign_and_execute(&purchase_tx()).await,
            Err(WalletError::new("user rejected"))
        );

        let plain = session("return Promise.reject('timeout');");
        assert_eq!(
            plain.sign_and_execute(&purchase_tx()).await,
            Err(WalletError::new("timeout"))
        );
    }

    #[wasm_bindgen_test]
    async fn test_session_rejects_response_without_digest() {
        let session = session("return Promise.resolve({ ok: true });");

        let err = session.sign_and_execute(&purchase_tx()).await.unwrap_err();
        assert!(err.message.starts_with("Unexpected wallet response"));
    }

    #[wasm_bindgen_test]
    async fn test_rejected_merge_stops_workflow() {
        let wallet = js_wallet("return Promise.reject(new Error('user rejected'));");
        let promise = workflow(&wallet)
            .purchase(loyalty_intent("0x1, 0x2"), None)
            .unwrap();
        let status = JsFuture::from(promise).await.unwrap();

        assert_eq!(field(&status, "state").as_deref(), Some("failed"));
        assert_eq!(
            field(&status, "message").as_deref(),
            Some("Token merge failed.")
        );
        assert_eq!(calls(&wallet), 1.0);
    }

    #[wasm_bindgen_test]
    async fn test_status_callback_receives_merge_digest() {
        let wallet = js_wallet(
            "return this.calls === 1 \
               ? Promise.resolve({ digest: 'DgMerge' }) \
               : Promise.reject(new Error('insufficient gas'));",
        );
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let callback = Closure::<dyn FnMut(JsValue)>::new(move |status: JsValue| {
            sink.borrow_mut().push(status);
        });
        let on_status: js_sys::Function = callback
            .as_ref()
            .unchecked_ref::<js_sys::Function>()
            .clone();

        let promise = workflow(&wallet)
            .purchase(loyalty_intent("0x1,0x2"), Some(on_status))
            .unwrap();
        let status = JsFuture::from(promise).await.unwrap();

        let seen = seen.borrow();
        let states: Vec<String> = seen.iter().filter_map(|s| field(s, "state")).collect();
        assert_eq!(states, ["preparing", "merging", "purchasing", "failed"]);
        assert_eq!(field(&seen[2], "mergeDigest").as_deref(), Some("DgMerge"));
        assert_eq!(field(&status, "mergeDigest").as_deref(), Some("DgMerge"));
        assert_eq!(field(&status, "digest"), None);
        assert_eq!(calls(&wallet), 2.0);
    }
}
