//! Shared fixtures for unit tests

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;

use crate::config::StoreConfig;
use crate::error::WalletError;
use crate::transaction::Transaction;
use crate::types::Network;
use crate::workflow::{ExecutionResult, WalletSession};

pub const SENDER: &str = "0x00000000000000000000000000000000000000000000000000000000000000f1";

pub fn test_config() -> StoreConfig {
    StoreConfig::new(
        Network::Testnet,
        "0xa1".parse().unwrap(),
        "0xb2".parse().unwrap(),
        "0xc3".parse().unwrap(),
    )
}

/// Wallet that records submissions and answers from a script
#[derive(Default)]
pub struct MockWallet {
    account: Option<String>,
    responses: RefCell<VecDeque<Result<ExecutionResult, WalletError>>>,
    submitted: RefCell<Vec<Transaction>>,
}

impl MockWallet {
    pub fn connected(account: &str) -> Self {
        Self {
            account: Some(account.to_string()),
            ..Default::default()
        }
    }

    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn respond_ok(self, digest: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Ok(ExecutionResult::new(digest)));
        self
    }

    pub fn respond_err(self, message: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Err(WalletError::new(message)));
        self
    }

    pub fn submitted(&self) -> Vec<Transaction> {
        self.submitted.borrow().clone()
    }
}

#[async_trait(?Send)]
impl WalletSession for MockWallet {
    fn current_account(&self) -> Option<String> {
        self.account.clone()
    }

    async fn sign_and_execute(
        &self,
        transaction: &Transaction,
    ) -> Result<ExecutionResult, WalletError> {
        self.submitted.borrow_mut().push(transaction.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(WalletError::new("no scripted response")))
    }
}
