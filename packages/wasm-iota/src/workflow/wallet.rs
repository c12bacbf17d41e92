//! Wallet session seam
//!
//! The connected wallet owns the account and does the signing. In the browser
//! it is the dApp kit behind a JS object; in tests it is a scripted mock.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::WalletError;
use crate::transaction::Transaction;

/// Result of a successfully executed transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// Transaction digest (base58)
    pub digest: String,
}

impl ExecutionResult {
    pub fn new(digest: impl Into<String>) -> Self {
        Self {
            digest: digest.into(),
        }
    }
}

/// Connected wallet: current account plus sign-and-execute
///
/// Futures are not `Send` because browser wallets resolve JS promises on the
/// main thread.
#[async_trait(?Send)]
pub trait WalletSession {
    /// Address of the connected account, if any
    fn current_account(&self) -> Option<String>;

    /// Sign `transaction` with the connected account and execute it
    async fn sign_and_execute(
        &self,
        transaction: &Transaction,
    ) -> Result<ExecutionResult, WalletError>;
}
