//! Purchase status reported to the front-end.
//!
//! ```text
//! Idle -> Preparing -> Submitting ----------------> Success | Failed
//!                   \-> Merging -> Purchasing ----> Success | Failed
//! ```
//!
//! Every submission restarts from `Idle`; the latest status replaces the
//! previous one.

use core::fmt;
use serde::Serialize;

use crate::error::PurchaseError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PurchaseStatus {
    #[default]
    Idle,
    /// Account checked, building the first transaction
    Preparing,
    /// Single transaction sent to the wallet
    Submitting,
    /// Merge transaction sent to the wallet
    Merging { count: usize },
    /// Merge landed, purchase transaction sent to the wallet
    Purchasing { merge_digest: String },
    Success {
        digest: String,
        merge_digest: Option<String>,
    },
    Failed(PurchaseError),
}

impl PurchaseStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PurchaseStatus::Success { .. } | PurchaseStatus::Failed(_))
    }

    /// Short machine-readable state name
    pub fn state(&self) -> &'static str {
        match self {
            PurchaseStatus::Idle => "idle",
            PurchaseStatus::Preparing => "preparing",
            PurchaseStatus::Submitting => "submitting",
            PurchaseStatus::Merging { .. } => "merging",
            PurchaseStatus::Purchasing { .. } => "purchasing",
            PurchaseStatus::Success { .. } => "success",
            PurchaseStatus::Failed(_) => "failed",
        }
    }

    /// Digest of the purchase, once it succeeded
    pub fn digest(&self) -> Option<&str> {
        match self {
            PurchaseStatus::Success { digest, .. } => Some(digest),
            _ => None,
        }
    }

    pub fn report(&self) -> StatusReport {
        let merge_digest = match self {
            PurchaseStatus::Purchasing { merge_digest } => Some(merge_digest.clone()),
            PurchaseStatus::Success { merge_digest, .. } => merge_digest.clone(),
            PurchaseStatus::Failed(PurchaseError::SubmissionFailed { merge_digest, .. }) => {
                merge_digest.clone()
            }
            _ => None,
        };
        StatusReport {
            state: self.state(),
            message: self.to_string(),
            digest: self.digest().map(str::to_string),
            merge_digest,
        }
    }
}

impl fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurchaseStatus::Idle => Ok(()),
            PurchaseStatus::Preparing => write!(f, "Preparing transaction..."),
            PurchaseStatus::Submitting => write!(f, "Submitting purchase..."),
            PurchaseStatus::Merging { count } => write!(f, "Merging {} tokens...", count),
            PurchaseStatus::Purchasing { merge_digest } => write!(
                f,
                "Tokens merged. Digest: {}. Proceeding to purchase...",
                merge_digest
            ),
            PurchaseStatus::Success {
                digest,
                merge_digest: None,
            } => write!(f, "Purchase complete. Digest: {}", digest),
            PurchaseStatus::Success {
                digest,
                merge_digest: Some(_),
            } => write!(f, "Product purchased. Digest: {}", digest),
            PurchaseStatus::Failed(err) => write!(f, "{}", err),
        }
    }
}

/// Serializable snapshot of a status for JS callbacks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub state: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_digest: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SubmissionPhase, WalletError};
    use serde_json::json;

    #[test]
    fn test_messages() {
        assert_eq!(PurchaseStatus::Idle.to_string(), "");
        assert_eq!(
            PurchaseStatus::Merging { count: 3 }.to_string(),
            "Merging 3 tokens..."
        );
        assert_eq!(
            PurchaseStatus::Success {
                digest: "Dg1".into(),
                merge_digest: None
            }
            .to_string(),
            "Purchase complete. Digest: Dg1"
        );
        assert_eq!(
            PurchaseStatus::Failed(PurchaseError::EmptyTokenList).to_string(),
            "You must provide at least one token object ID"
        );
    }

    #[test]
    fn test_terminal_states() {
        assert!(!PurchaseStatus::Preparing.is_terminal());
        assert!(!PurchaseStatus::Purchasing {
            merge_digest: "m".into()
        }
        .is_terminal());
        assert!(PurchaseStatus::Failed(PurchaseError::NoWalletConnected).is_terminal());
    }

    #[test]
    fn test_report_serialization() {
        let status = PurchaseStatus::Success {
            digest: "Dg2".into(),
            merge_digest: Some("Mg1".into()),
        };
        assert_eq!(
            serde_json::to_value(status.report()).unwrap(),
            json!({
                "state": "success",
                "message": "Product purchased. Digest: Dg2",
                "digest": "Dg2",
                "mergeDigest": "Mg1"
            })
        );

        let failed = PurchaseStatus::Failed(PurchaseError::submission(
            SubmissionPhase::Purchase,
            Some("Mg1".into()),
            WalletError::new("boom"),
        ));
        let report = failed.report();
        assert_eq!(report.state, "failed");
        assert_eq!(report.digest, None);
        assert_eq!(report.merge_digest.as_deref(), Some("Mg1"));
    }
}
