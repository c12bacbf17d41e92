//! Error types for wasm-iota

use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Main error type for building store transactions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WasmIotaError {
    /// Object or package ID is not a valid hex address
    #[error("Invalid object ID: {0}")]
    InvalidObjectId(String),
    /// Move call target is not `package::module::function`
    #[error("Invalid move call target: {0}")]
    InvalidTarget(String),
    /// Product name is not in the catalog
    #[error("Unknown product: {0}")]
    UnknownProduct(String),
    /// Payment method is neither IOTA nor LOYALTY
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),
    /// Network name is not devnet, testnet or mainnet
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
    /// Transaction argument refers to a command or input that does not exist
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// JSON (de)serialization failure
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for WasmIotaError {
    fn from(err: serde_json::Error) -> Self {
        WasmIotaError::Serialization(err.to_string())
    }
}

// REQUIRED: Converts to JS Error with stack trace
impl From<WasmIotaError> for JsValue {
    fn from(err: WasmIotaError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Failure reported by the wallet when signing or executing a transaction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct WalletError {
    pub message: String,
}

impl WalletError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Which submission of a purchase failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    /// The only transaction of an IOTA or single-token purchase
    Single,
    /// Joining loyalty tokens
    Merge,
    /// Paying with the merged token
    Purchase,
}

/// Terminal failure of a purchase workflow
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("Wallet not connected")]
    NoWalletConnected,
    #[error("You must provide at least one token object ID")]
    EmptyTokenList,
    #[error("Error preparing transaction: {0}")]
    TransactionBuild(#[from] WasmIotaError),
    #[error("{}", submission_failure(.phase, .merge_digest))]
    SubmissionFailed {
        phase: SubmissionPhase,
        /// Digest of the merge that already landed, for purchase-phase failures
        merge_digest: Option<String>,
        /// Wallet message, kept for logs
        reason: String,
    },
}

impl PurchaseError {
    pub(crate) fn submission(
        phase: SubmissionPhase,
        merge_digest: Option<String>,
        err: WalletError,
    ) -> Self {
        PurchaseError::SubmissionFailed {
            phase,
            merge_digest,
            reason: err.message,
        }
    }

    /// True when loyalty tokens were merged but the purchase did not go through
    pub fn left_tokens_merged(&self) -> bool {
        matches!(
            self,
            PurchaseError::SubmissionFailed {
                phase: SubmissionPhase::Purchase,
                ..
            }
        )
    }
}

fn submission_failure(phase: &SubmissionPhase, merge_digest: &Option<String>) -> String {
    match (phase, merge_digest) {
        (SubmissionPhase::Single, _) => "Transaction failed.".to_string(),
        (SubmissionPhase::Merge, _) => "Token merge failed.".to_string(),
        (SubmissionPhase::Purchase, Some(digest)) => format!(
            "Purchase transaction failed. Tokens were merged (digest: {}) but not spent.",
            digest
        ),
        (SubmissionPhase::Purchase, None) => {
            "Purchase transaction failed. Tokens were merged but not spent.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WasmIotaError::InvalidObjectId("0xzz".to_string());
        assert_eq!(err.to_string(), "Invalid object ID: 0xzz");
    }

    #[test]
    fn test_from_serde_json() {
        let err = serde_json::from_str::<u64>("not json").unwrap_err();
        let err: WasmIotaError = err.into();
        assert!(matches!(err, WasmIotaError::Serialization(_)));
    }

    #[test]
    fn test_purchase_error_messages() {
        assert_eq!(
            PurchaseError::NoWalletConnected.to_string(),
            "Wallet not connected"
        );

        let build: PurchaseError = WasmIotaError::InvalidObjectId("0xq".to_string()).into();
        assert_eq!(
            build.to_string(),
            "Error preparing transaction: Invalid object ID: 0xq"
        );

        let merge = PurchaseError::submission(
            SubmissionPhase::Merge,
            None,
            WalletError::new("rejected by user"),
        );
        assert_eq!(merge.to_string(), "Token merge failed.");
        assert!(!merge.left_tokens_merged());
    }

    #[test]
    fn test_purchase_failure_mentions_merge() {
        let err = PurchaseError::submission(
            SubmissionPhase::Purchase,
            Some("9mK".to_string()),
            WalletError::new("insufficient gas"),
        );
        assert!(err.left_tokens_merged());
        assert!(err.to_string().contains("merged (digest: 9mK)"));
        match err {
            PurchaseError::SubmissionFailed { reason, .. } => {
                assert_eq!(reason, "insufficient gas")
            }
            _ => panic!("Expected SubmissionFailed"),
        }
    }
}
