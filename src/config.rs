//! Endpoint configuration for the status tracker

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::chains::Chain;

/// Placeholder substituted with the transaction hash in REST endpoints
pub const HASH_PLACEHOLDER: &str = "{hash}";

fn blockchair(name: &str) -> String {
    format!("https://api.vultisig.com/blockchair/{}/dashboards/transaction/{{hash}}", name)
}

/// Built-in public endpoints, used for any chain the config does not override
pub static DEFAULT_ENDPOINTS: Lazy<HashMap<Chain, String>> = Lazy::new(|| {
    let table = [
        (Chain::ThorChain, "https://thornode.ninerealms.com".to_string()),
        (Chain::MayaChain, "https://mayanode.mayachain.info".to_string()),
        (Chain::Arbitrum, "https://arbitrum-one-rpc.publicnode.com".to_string()),
        (Chain::Avalanche, "https://avalanche-c-chain-rpc.publicnode.com".to_string()),
        (Chain::Base, "https://base-rpc.publicnode.com".to_string()),
        (Chain::CronosChain, "https://cronos-evm-rpc.publicnode.com".to_string()),
        (Chain::BscChain, "https://bsc-rpc.publicnode.com".to_string()),
        (Chain::Blast, "https://rpc.ankr.com/blast".to_string()),
        (Chain::Ethereum, "https://ethereum-rpc.publicnode.com".to_string()),
        (Chain::Optimism, "https://optimism-rpc.publicnode.com".to_string()),
        (Chain::Polygon, "https://polygon-bor-rpc.publicnode.com".to_string()),
        (Chain::ZkSync, "https://mainnet.era.zksync.io".to_string()),
        (Chain::Mantle, "https://rpc.mantle.xyz".to_string()),
        (Chain::Bitcoin, "https://mempool.space/api".to_string()),
        (Chain::Litecoin, "https://litecoinspace.org/api".to_string()),
        (Chain::BitcoinCash, blockchair("bitcoin-cash")),
        (Chain::Dogecoin, blockchair("dogecoin")),
        (Chain::Dash, blockchair("dash")),
        (Chain::Zcash, blockchair("zcash")),
        (Chain::Cardano, "https://cardano-mainnet.blockfrost.io/api/v0".to_string()),
        (Chain::GaiaChain, "https://cosmos-rest.publicnode.com".to_string()),
        (Chain::Kujira, "https://kujira-rest.publicnode.com".to_string()),
        (Chain::Dydx, "https://dydx-rest.publicnode.com".to_string()),
        (Chain::Osmosis, "https://osmosis-rest.publicnode.com".to_string()),
        (Chain::Terra, "https://terra-lcd.publicnode.com".to_string()),
        (Chain::TerraClassic, "https://terra-classic-lcd.publicnode.com".to_string()),
        (Chain::Noble, "https://noble-api.polkachu.com".to_string()),
        (Chain::Akash, "https://akash-rest.publicnode.com".to_string()),
        (Chain::Solana, "https://api.mainnet-beta.solana.com".to_string()),
        (Chain::Polkadot, "https://polkadot.api.subscan.io".to_string()),
        (Chain::Sui, "https://sui-rpc.publicnode.com".to_string()),
        (Chain::Ton, "https://toncenter.com".to_string()),
        (Chain::Ripple, "https://xrplcluster.com".to_string()),
        (Chain::Tron, "https://api.trongrid.io".to_string()),
    ];
    table.into_iter().collect()
});

/// Tracker settings. Every field has a default so a partial JSON document
/// is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerConfig {
    /// Per-chain overrides of [`DEFAULT_ENDPOINTS`]. REST endpoints may
    /// embed `{hash}` to replace the family's default path.
    pub endpoints: HashMap<Chain, String>,
    pub api_key: Option<String>,
    pub api_key_header: String,
    pub request_timeout_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            endpoints: HashMap::new(),
            api_key: None,
            api_key_header: "x-api-key".to_string(),
            request_timeout_ms: 15_000,
        }
    }
}

impl TrackerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: TrackerConfig =
            serde_json::from_str(json).context("Failed to parse tracker config")?;
        if config.request_timeout_ms == 0 {
            return Err(anyhow!("requestTimeoutMs must be positive"));
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tracker config {}", path.display()))?;
        let config = Self::from_json_str(&raw)?;
        log::info!(
            "Loaded tracker config from {} ({} endpoint overrides)",
            path.display(),
            config.endpoints.len()
        );
        Ok(config)
    }

    /// Endpoint for `chain`, override first
    pub fn endpoint(&self, chain: Chain) -> Option<&str> {
        self.endpoints
            .get(&chain)
            .or_else(|| DEFAULT_ENDPOINTS.get(&chain))
            .map(String::as_str)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
