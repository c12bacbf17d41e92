//! Shared types for IOTA store transactions

use crate::error::WasmIotaError;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Length of an IOTA object ID / address in bytes
pub const OBJECT_ID_LENGTH: usize = 32;

/// 32-byte IOTA object ID (also used for package IDs and account addresses)
///
/// Parsed from hex with an optional `0x` prefix. Short forms such as `0x2`
/// are left-padded, so `0x2` and `0x000...002` are the same object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId([u8; OBJECT_ID_LENGTH]);

impl ObjectId {
    /// The IOTA framework package (`0x2`)
    pub const FRAMEWORK: ObjectId = {
        let mut bytes = [0u8; OBJECT_ID_LENGTH];
        bytes[OBJECT_ID_LENGTH - 1] = 2;
        ObjectId(bytes)
    };

    /// Normalized `0x` + 64 lowercase hex digits
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for ObjectId {
    type Err = WasmIotaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if digits.is_empty() || digits.len() > OBJECT_ID_LENGTH * 2 {
            return Err(WasmIotaError::InvalidObjectId(s.to_string()));
        }

        let padded = format!("{:0>width$}", digits, width = OBJECT_ID_LENGTH * 2);
        let mut bytes = [0u8; OBJECT_ID_LENGTH];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|_| WasmIotaError::InvalidObjectId(s.to_string()))?;
        Ok(ObjectId(bytes))
    }
}

impl TryFrom<String> for ObjectId {
    type Error = WasmIotaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.to_hex()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Products sold by the store, with prices in the smallest IOTA unit
///
/// Names are matched case-insensitively and trimmed, both from JSON and
/// through `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Product {
    Laptop,
    Phone,
    Tablet,
}

impl Product {
    /// Full catalog in display order
    pub const ALL: [Product; 3] = [Product::Laptop, Product::Phone, Product::Tablet];

    /// Name passed on-chain as the `product_name` argument
    pub fn name(self) -> &'static str {
        match self {
            Product::Laptop => "Laptop",
            Product::Phone => "Phone",
            Product::Tablet => "Tablet",
        }
    }

    pub fn price(self) -> u64 {
        match self {
            Product::Laptop => 1000,
            Product::Phone => 500,
            Product::Tablet => 300,
        }
    }
}

impl FromStr for Product {
    type Err = WasmIotaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Product::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| WasmIotaError::UnknownProduct(s.to_string()))
    }
}

impl TryFrom<String> for Product {
    type Error = WasmIotaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Product> for String {
    fn from(product: Product) -> Self {
        product.name().to_string()
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the buyer pays for a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    /// Native IOTA split from the gas coin
    #[default]
    Iota,
    /// One or more loyalty token objects
    Loyalty,
}

impl FromStr for PaymentMethod {
    type Err = WasmIotaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "iota" | "native" => Ok(PaymentMethod::Iota),
            "loyalty" => Ok(PaymentMethod::Loyalty),
            _ => Err(WasmIotaError::UnknownPaymentMethod(s.to_string())),
        }
    }
}

/// IOTA network environments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Devnet,
    Testnet,
    Mainnet,
}

impl Network {
    pub fn name(self) -> &'static str {
        match self {
            Network::Devnet => "devnet",
            Network::Testnet => "testnet",
            Network::Mainnet => "mainnet",
        }
    }

    /// Public fullnode RPC endpoint for this network
    pub fn fullnode_url(self) -> &'static str {
        match self {
            Network::Devnet => "https://api.devnet.iota.cafe",
            Network::Testnet => "https://api.testnet.iota.cafe",
            Network::Mainnet => "https://api.mainnet.iota.cafe",
        }
    }
}

impl FromStr for Network {
    type Err = WasmIotaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "devnet" => Ok(Network::Devnet),
            "testnet" => Ok(Network::Testnet),
            "mainnet" => Ok(Network::Mainnet),
            _ => Err(WasmIotaError::UnknownNetwork(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_pads_short_form() {
        let id: ObjectId = "0x2".parse().unwrap();
        assert_eq!(id, ObjectId::FRAMEWORK);
        assert_eq!(
            id.to_hex(),
            "0x0000000000000000000000000000000000000000000000000000000000000002"
        );
    }

    #[test]
    fn test_object_id_accepts_missing_prefix_and_uppercase() {
        let a: ObjectId = "ABCDEF".parse().unwrap();
        let b: ObjectId = "0xabcdef".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_object_id_rejects_garbage() {
        assert!("0x".parse::<ObjectId>().is_err());
        assert!("0xnothex".parse::<ObjectId>().is_err());
        assert!(format!("0x{}", "1".repeat(65)).parse::<ObjectId>().is_err());
    }

    #[test]
    fn test_object_id_serde_as_string() {
        let id: ObjectId = serde_json::from_str("\"0x5\"").unwrap();
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"0x0000000000000000000000000000000000000000000000000000000000000005\""
        );
        assert!(serde_json::from_str::<ObjectId>("\"xyz\"").is_err());
    }

    #[test]
    fn test_catalog_prices() {
        assert_eq!(Product::Laptop.price(), 1000);
        assert_eq!(Product::Phone.price(), 500);
        assert_eq!(Product::Tablet.price(), 300);
    }

    #[test]
    fn test_product_from_str() {
        assert_eq!("Phone".parse::<Product>().unwrap(), Product::Phone);
        assert_eq!(" tablet ".parse::<Product>().unwrap(), Product::Tablet);
        assert_eq!(
            "Toaster".parse::<Product>(),
            Err(WasmIotaError::UnknownProduct("Toaster".to_string()))
        );
    }

    #[test]
    fn test_product_serde_matches_from_str() {
        let product: Product = serde_json::from_str("\" laptop \"").unwrap();
        assert_eq!(product, Product::Laptop);
        assert_eq!(serde_json::to_string(&Product::Phone).unwrap(), "\"Phone\"");
        assert!(serde_json::from_str::<Product>("\"Toaster\"").is_err());
    }

    #[test]
    fn test_payment_method_serde() {
        let m: PaymentMethod = serde_json::from_str("\"LOYALTY\"").unwrap();
        assert_eq!(m, PaymentMethod::Loyalty);
        assert_eq!(serde_json::to_string(&PaymentMethod::Iota).unwrap(), "\"IOTA\"");
        assert_eq!("native".parse::<PaymentMethod>().unwrap(), PaymentMethod::Iota);
    }

    #[test]
    fn test_network_urls() {
        assert_eq!(
            "Testnet".parse::<Network>().unwrap().fullnode_url(),
            "https://api.testnet.iota.cafe"
        );
        assert!("localnet".parse::<Network>().is_err());
    }
}
