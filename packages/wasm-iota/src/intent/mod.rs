//! Intent-based purchase building.
//!
//! Turns the store form (product, payment method, token IDs) into a
//! [`PurchasePlan`] and builds the individual transactions of that plan.
//!
//! # Usage from TypeScript
//!
//! ```typescript
//! const tx = BuilderNamespace.buildIotaPurchase("Laptop", config, sender);
//! await signAndExecuteTransaction({ transaction: Transaction.from(tx) });
//! ```

mod build;
mod types;

pub use build::{
    build_iota_purchase, build_loyalty_purchase, build_purchase, build_token_merge, catalog,
    parse_token_ids, plan_purchase, BUY_WITH_IOTA, BUY_WITH_LOYALTY, TOKEN_JOIN_TARGET,
};
pub use types::*;
