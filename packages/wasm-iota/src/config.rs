//! Store network configuration
//!
//! The store package and its capability objects differ per network. The
//! front-end selects a network once at startup and passes the resulting
//! config to every build call.

use crate::error::WasmIotaError;
use crate::types::{Network, ObjectId};
use serde::{Deserialize, Serialize};

/// Network endpoint plus the on-chain identifiers of the store deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Network this deployment lives on
    pub network: Network,
    /// Fullnode RPC URL (defaults to the public endpoint of `network`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Published store package (`store`, `loyalty` modules)
    pub package_id: ObjectId,
    /// Store manager capability, required for IOTA purchases
    pub manager_cap_id: ObjectId,
    /// Loyalty token treasury capability
    pub treasury_cap_id: ObjectId,
}

impl StoreConfig {
    pub fn new(
        network: Network,
        package_id: ObjectId,
        manager_cap_id: ObjectId,
        treasury_cap_id: ObjectId,
    ) -> Self {
        Self {
            network,
            url: None,
            package_id,
            manager_cap_id,
            treasury_cap_id,
        }
    }

    /// Parse from a JSON document such as
    ///
    /// ```json
    /// { "network": "testnet", "packageId": "0x..", "managerCapId": "0x..", "treasuryCapId": "0x.." }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, WasmIotaError> {
        let config: StoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check fields serde cannot check
    pub fn validate(&self) -> Result<(), WasmIotaError> {
        if let Some(url) = &self.url {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(WasmIotaError::InvalidInput(format!(
                    "Fullnode URL must be http(s): {}",
                    url
                )));
            }
        }
        Ok(())
    }

    /// Effective fullnode URL
    pub fn fullnode_url(&self) -> &str {
        self.url
            .as_deref()
            .unwrap_or(self.network.fullnode_url())
    }

    /// `<package>::store::<function>`
    pub fn store_target(&self, function: &str) -> String {
        format!("{}::store::{}", self.package_id, function)
    }

    /// Type tag of the loyalty coin, `<package>::loyalty::LOYALTY`
    pub fn loyalty_type(&self) -> String {
        format!("{}::loyalty::LOYALTY", self.package_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_config;

    #[test]
    fn test_from_json_defaults_url() {
        let json = r#"{
            "network": "testnet",
            "packageId": "0xa1",
            "managerCapId": "0xb2",
            "treasuryCapId": "0xc3"
        }"#;

        let config = StoreConfig::from_json(json).unwrap();
        assert_eq!(config, test_config());
        assert_eq!(config.fullnode_url(), "https://api.testnet.iota.cafe");
    }

    #[test]
    fn test_from_json_custom_url() {
        let json = r#"{
            "network": "devnet",
            "url": "http://127.0.0.1:9000",
            "packageId": "0x1",
            "managerCapId": "0x2",
            "treasuryCapId": "0x3"
        }"#;

        let config = StoreConfig::from_json(json).unwrap();
        assert_eq!(config.fullnode_url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_from_json_rejects_bad_ids_and_urls() {
        let bad_id = r#"{
            "network": "mainnet",
            "packageId": "0xTODO",
            "managerCapId": "0x2",
            "treasuryCapId": "0x3"
        }"#;
        assert!(matches!(
            StoreConfig::from_json(bad_id),
            Err(WasmIotaError::Serialization(_))
        ));

        let bad_url = r#"{
            "network": "mainnet",
            "url": "ftp://node",
            "packageId": "0x1",
            "managerCapId": "0x2",
            "treasuryCapId": "0x3"
        }"#;
        assert!(matches!(
            StoreConfig::from_json(bad_url),
            Err(WasmIotaError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_targets() {
        let config = test_config();
        assert_eq!(
            config.store_target("buy_product_with_iota"),
            "0x00000000000000000000000000000000000000000000000000000000000000a1::store::buy_product_with_iota"
        );
        assert!(config.loyalty_type().ends_with("a1::loyalty::LOYALTY"));
    }
}
