//! Purchase workflow
//!
//! Drives a purchase from form input to a terminal [`PurchaseStatus`]:
//!
//! - IOTA payment, or a single loyalty token: one transaction.
//! - Several loyalty tokens: a merge transaction, then, only once the wallet
//!   reports the merge executed, a purchase spending the first token.
//!
//! No error escapes [`PurchaseWorkflow::purchase`]; failures become
//! [`PurchaseStatus::Failed`]. There is no retry, and a failed purchase after
//! a successful merge leaves the tokens merged.

pub mod status;
pub mod wallet;

use tracing::instrument;

use crate::config::StoreConfig;
use crate::error::{PurchaseError, SubmissionPhase, WalletError};
use crate::intent::{build_purchase, build_token_merge, plan_purchase, PurchaseIntent, PurchasePlan};
use crate::transaction::Transaction;

pub use status::{PurchaseStatus, StatusReport};
pub use wallet::{ExecutionResult, WalletSession};

/// Purchase controller bound to one wallet and one store deployment
pub struct PurchaseWorkflow<W> {
    wallet: W,
    config: StoreConfig,
}

impl<W: WalletSession> PurchaseWorkflow<W> {
    pub fn new(config: StoreConfig, wallet: W) -> Self {
        Self { wallet, config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    /// Run one purchase, reporting every status transition to `on_status`.
    ///
    /// Returns the terminal status, which is also the last one reported.
    #[instrument(skip_all, fields(product = %intent.product, payment = ?intent.payment_method))]
    pub async fn purchase<F>(&self, intent: &PurchaseIntent, mut on_status: F) -> PurchaseStatus
    where
        F: FnMut(&PurchaseStatus),
    {
        let status = match self.run(intent, &mut on_status).await {
            Ok(status) => status,
            Err(err) => {
                match &err {
                    PurchaseError::NoWalletConnected | PurchaseError::EmptyTokenList => {
                        tracing::warn!("Purchase rejected: {}", err)
                    }
                    PurchaseError::TransactionBuild(e) => {
                        tracing::error!("Error preparing transaction: {}", e)
                    }
                    PurchaseError::SubmissionFailed { phase, reason, .. } => {
                        tracing::error!("{:?} submission failed: {}", phase, reason)
                    }
                }
                PurchaseStatus::Failed(err)
            }
        };
        on_status(&status);
        status
    }

    async fn run<F>(
        &self,
        intent: &PurchaseIntent,
        on_status: &mut F,
    ) -> Result<PurchaseStatus, PurchaseError>
    where
        F: FnMut(&PurchaseStatus),
    {
        let sender = self
            .wallet
            .current_account()
            .filter(|account| !account.trim().is_empty())
            .ok_or(PurchaseError::NoWalletConnected)?;

        on_status(&PurchaseStatus::Preparing);
        let plan = plan_purchase(intent)?;
        tracing::debug!(
            "Purchasing {} ({}) with {} transaction(s)",
            plan.product(),
            plan.product().price(),
            plan.transaction_count()
        );

        if let PurchasePlan::MergeThenBuy { tokens, .. } = &plan {
            return self.merge_then_buy(&plan, tokens, &sender, on_status).await;
        }

        let tx = build_purchase(&plan, &self.config, &sender)?;
        on_status(&PurchaseStatus::Submitting);
        let result = self
            .submit(&tx)
            .await
            .map_err(|e| PurchaseError::submission(SubmissionPhase::Single, None, e))?;

        tracing::info!("Purchase complete: {}", result.digest);
        Ok(PurchaseStatus::Success {
            digest: result.digest,
            merge_digest: None,
        })
    }

    async fn merge_then_buy<F>(
        &self,
        plan: &PurchasePlan,
        tokens: &[String],
        sender: &str,
        on_status: &mut F,
    ) -> Result<PurchaseStatus, PurchaseError>
    where
        F: FnMut(&PurchaseStatus),
    {
        // Both transactions are built before anything is submitted.
        let merge_tx = build_token_merge(tokens, &self.config, sender)?;
        let purchase_tx = build_purchase(plan, &self.config, sender)?;
        on_status(&PurchaseStatus::Merging {
            count: tokens.len(),
        });
        let merged = self
            .submit(&merge_tx)
            .await
            .map_err(|e| PurchaseError::submission(SubmissionPhase::Merge, None, e))?;
        tracing::info!("Merged {} tokens: {}", tokens.len(), merged.digest);

        on_status(&PurchaseStatus::Purchasing {
            merge_digest: merged.digest.clone(),
        });
        let result = self.submit(&purchase_tx).await.map_err(|e| {
            PurchaseError::submission(SubmissionPhase::Purchase, Some(merged.digest.clone()), e)
        })?;

        tracing::info!("Product purchased: {}", result.digest);
        Ok(PurchaseStatus::Success {
            digest: result.digest,
            merge_digest: Some(merged.digest),
        })
    }

    async fn submit(&self, tx: &Transaction) -> Result<ExecutionResult, WalletError> {
        tracing::debug!("Submitting transaction with {} command(s)", tx.commands().len());
        self.wallet.sign_and_execute(tx).await
    }
}
