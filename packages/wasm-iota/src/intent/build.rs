//! Intent-based transaction building implementation.
//!
//! Each function builds exactly one transaction; sequencing the merge and the
//! purchase is the workflow's job.

use crate::builder::TransactionBuilder;
use crate::config::StoreConfig;
use crate::error::{PurchaseError, WasmIotaError};
use crate::transaction::Transaction;
use crate::types::{PaymentMethod, Product};

use super::types::*;

/// `store::buy_product_with_iota(product_name, payment, manager_cap, treasury_cap)`
pub const BUY_WITH_IOTA: &str = "buy_product_with_iota";
/// `store::buy_product_with_loyalty(product_name, token, treasury_cap)`
pub const BUY_WITH_LOYALTY: &str = "buy_product_with_loyalty";
/// `token::join<T>(self: &mut Token<T>, token: Token<T>)`
pub const TOKEN_JOIN_TARGET: &str = "0x2::token::join";

/// Split comma-separated token IDs, trimming whitespace and dropping empties.
///
/// Order is preserved and nothing is validated; malformed IDs surface when
/// the transaction is built.
pub fn parse_token_ids(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Decide which transactions a purchase needs
pub fn plan_purchase(intent: &PurchaseIntent) -> Result<PurchasePlan, PurchaseError> {
    let product = intent.product;
    match intent.payment_method {
        PaymentMethod::Iota => Ok(PurchasePlan::Iota { product }),
        PaymentMethod::Loyalty => {
            let mut tokens = parse_token_ids(&intent.token_input);
            match tokens.len() {
                0 => Err(PurchaseError::EmptyTokenList),
                1 => Ok(PurchasePlan::Loyalty {
                    product,
                    token: tokens.remove(0),
                }),
                _ => Ok(PurchasePlan::MergeThenBuy { product, tokens }),
            }
        }
    }
}

/// Pay the catalog price in IOTA, split from the gas coin
pub fn build_iota_purchase(
    product: Product,
    config: &StoreConfig,
    sender: &str,
) -> Result<Transaction, WasmIotaError> {
    let mut tx = TransactionBuilder::new();
    let payment = tx.split_coins(tx.gas(), &[product.price()])?;

    let arguments = vec![
        tx.pure_string(product.name())?,
        payment[0],
        tx.object_id(config.manager_cap_id)?,
        tx.object_id(config.treasury_cap_id)?,
    ];
    tx.move_call(&config.store_target(BUY_WITH_IOTA), &[], arguments)?;

    tx.build(sender)
}

/// Pay with one loyalty token object
pub fn build_loyalty_purchase(
    product: Product,
    token: &str,
    config: &StoreConfig,
    sender: &str,
) -> Result<Transaction, WasmIotaError> {
    let mut tx = TransactionBuilder::new();

    let arguments = vec![
        tx.pure_string(product.name())?,
        tx.object(token)?,
        tx.object_id(config.treasury_cap_id)?,
    ];
    tx.move_call(&config.store_target(BUY_WITH_LOYALTY), &[], arguments)?;

    tx.build(sender)
}

/// Join every token into the first, left to right
///
/// `token::join` mutates its first argument in place, so the first token
/// keeps its object ID and every join reuses the same base input.
pub fn build_token_merge(
    tokens: &[String],
    config: &StoreConfig,
    sender: &str,
) -> Result<Transaction, WasmIotaError> {
    let (first, rest) = tokens
        .split_first()
        .filter(|(_, rest)| !rest.is_empty())
        .ok_or_else(|| {
            WasmIotaError::InvalidInput(format!(
                "Merging needs at least two tokens, got {}",
                tokens.len()
            ))
        })?;

    let mut tx = TransactionBuilder::new();
    let base = tx.object(first)?;
    let type_arguments = [config.loyalty_type()];

    for token in rest {
        let next = tx.object(token)?;
        tx.move_call(TOKEN_JOIN_TARGET, &type_arguments, vec![base, next])?;
    }

    tx.build(sender)
}

/// Build the transaction that pays for the product
///
/// For [`PurchasePlan::MergeThenBuy`] this is the second step, spending the
/// first token once the merge has landed.
pub fn build_purchase(
    plan: &PurchasePlan,
    config: &StoreConfig,
    sender: &str,
) -> Result<Transaction, WasmIotaError> {
    match plan {
        PurchasePlan::Iota { product } => build_iota_purchase(*product, config, sender),
        PurchasePlan::Loyalty { product, token } => {
            build_loyalty_purchase(*product, token, config, sender)
        }
        PurchasePlan::MergeThenBuy { product, tokens } => {
            let first = tokens.first().ok_or_else(|| {
                WasmIotaError::InvalidInput("No tokens to purchase with".to_string())
            })?;
            build_loyalty_purchase(*product, first, config, sender)
        }
    }
}

/// Catalog in display order
pub fn catalog() -> Vec<CatalogEntry> {
    Product::ALL
        .into_iter()
        .map(|p| CatalogEntry {
            name: p.name(),
            price: p.price(),
        })
        .collect()
}
