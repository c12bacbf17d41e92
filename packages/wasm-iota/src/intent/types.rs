//! Types for intent-based purchase building.
//!
//! These types mirror the store front-end's form state and are deserialized
//! from JavaScript.

use crate::types::{PaymentMethod, Product};
use serde::{Deserialize, Serialize};

/// What the buyer asked for
///
/// ```json
/// { "product": "Laptop", "paymentMethod": "LOYALTY", "tokenInput": "0xabc, 0xdef" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseIntent {
    pub product: Product,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Raw comma-separated loyalty token object IDs (ignored for IOTA payment)
    #[serde(default)]
    pub token_input: String,
}

impl PurchaseIntent {
    pub fn new(product: Product, payment_method: PaymentMethod, token_input: &str) -> Self {
        Self {
            product,
            payment_method,
            token_input: token_input.to_string(),
        }
    }
}

/// Transactions needed to carry out a purchase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchasePlan {
    /// Pay with IOTA split from the gas coin
    Iota { product: Product },
    /// Pay with a single loyalty token
    Loyalty { product: Product, token: String },
    /// Join all tokens into the first one, then pay with it
    MergeThenBuy {
        product: Product,
        tokens: Vec<String>,
    },
}

impl PurchasePlan {
    pub fn product(&self) -> Product {
        match self {
            PurchasePlan::Iota { product }
            | PurchasePlan::Loyalty { product, .. }
            | PurchasePlan::MergeThenBuy { product, .. } => *product,
        }
    }

    /// Number of transactions the plan submits
    pub fn transaction_count(&self) -> usize {
        match self {
            PurchasePlan::MergeThenBuy { .. } => 2,
            _ => 1,
        }
    }
}

/// Catalog entry exposed to the front-end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub price: u64,
}
