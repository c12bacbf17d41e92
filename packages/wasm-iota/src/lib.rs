//! wasm-iota: WASM module for IOTA retail store transactions
//!
//! This crate provides:
//! - Programmable transaction building (split coins, objects, move calls)
//! - Purchase transactions for the store package (IOTA or loyalty tokens)
//! - The purchase workflow: merge loyalty tokens, then buy, through a wallet
//!
//! # Architecture
//!
//! The crate follows a two-layer architecture:
//! - **Core layer** (`src/*.rs`): Pure Rust logic, no WASM dependencies
//! - **WASM layer** (`src/wasm/*.rs`): Thin wrappers with `#[wasm_bindgen]`

pub mod builder;
pub mod config;
pub mod error;
pub mod intent;
pub mod transaction;
pub mod types;
pub mod wasm;
pub mod workflow;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export main types for convenience
pub use builder::TransactionBuilder;
pub use config::StoreConfig;
pub use error::{PurchaseError, SubmissionPhase, WalletError, WasmIotaError};
pub use intent::{parse_token_ids, plan_purchase, PurchaseIntent, PurchasePlan};
pub use transaction::{Argument, CallArg, Command, Transaction};
pub use types::{Network, ObjectId, PaymentMethod, Product};
pub use workflow::{ExecutionResult, PurchaseStatus, PurchaseWorkflow, WalletSession};
