//! Post-broadcast confirmation tracking
//!
//! [`TransactionStatusTracker::check_status`] makes a single call to the
//! chain's API and classifies the reply. It keeps no state between calls;
//! repeated polling is left to the caller, see [`poll_transaction_status`].

pub mod classifiers;
pub mod polling;
pub mod transport;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::chains::{Chain, TokenStandard};
use crate::config::{TrackerConfig, HASH_PLACEHOLDER};
use crate::errors::StatusError;

pub use polling::{poll_transaction_status, PollOutcome, TxStatusConfiguration};
pub use transport::{HttpResponse, HttpTransport, StatusTransport};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum TransactionResult {
    Confirmed,
    Pending,
    /// Unknown to the node, or the check itself failed
    NotFound,
    /// Rejected or reverted by the chain
    Failed { reason: String },
}

impl TransactionResult {
    pub fn failed(reason: impl Into<String>) -> Self {
        TransactionResult::Failed {
            reason: reason.into(),
        }
    }

    /// Confirmed and failed transactions will not change state again
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionResult::Confirmed | TransactionResult::Failed { .. })
    }
}

pub struct TransactionStatusTracker<T = HttpTransport> {
    transport: T,
    config: TrackerConfig,
}

impl TransactionStatusTracker<HttpTransport> {
    pub fn from_config(config: TrackerConfig) -> Result<Self, StatusError> {
        Ok(Self::new(HttpTransport::new(&config)?, config))
    }
}

impl<T: StatusTransport> TransactionStatusTracker<T> {
    pub fn new(transport: T, config: TrackerConfig) -> Self {
        TransactionStatusTracker { transport, config }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Classify the current state of `tx_hash` on `chain`.
    ///
    /// Never fails: transport errors and malformed replies are reported as
    /// [`TransactionResult::NotFound`] so they are not mistaken for a
    /// chain-reported failure.
    pub async fn check_status(&self, tx_hash: &str, chain: Chain) -> TransactionResult {
        match self.query(tx_hash, chain).await {
            Ok(result) => {
                debug!("{} on {}: {:?}", tx_hash, chain, result);
                result
            }
            Err(e) => {
                warn!("Status check for {} on {} failed: {}", tx_hash, chain, e);
                TransactionResult::NotFound
            }
        }
    }

    async fn query(&self, tx_hash: &str, chain: Chain) -> Result<TransactionResult, StatusError> {
        let base = self
            .config
            .endpoint(chain)
            .ok_or_else(|| StatusError::MissingEndpoint(chain.to_string()))?;

        match chain.standard() {
            TokenStandard::Evm => {
                let reply = self.rpc(base, "eth_getTransactionReceipt", json!([tx_hash])).await?;
                classifiers::evm_receipt(&reply)
            }
            TokenStandard::Utxo => {
                let path = if chain == Chain::Cardano { "/txs/{hash}" } else { "/tx/{hash}" };
                let reply = self.get_json(&rest_url(base, path, tx_hash)).await?;
                classifiers::utxo_transaction(&reply, tx_hash)
            }
            TokenStandard::Thorchain | TokenStandard::Cosmos => {
                let url = rest_url(base, "/cosmos/tx/v1beta1/txs/{hash}", tx_hash);
                let response = self.transport.get(&url).await?;
                classifiers::cosmos_tx(response.status, &response.body)
            }
            TokenStandard::Sol => {
                let params = json!([[tx_hash], {"searchTransactionHistory": true}]);
                let reply = self.rpc(base, "getSignatureStatuses", params).await?;
                classifiers::solana_signature(&reply)
            }
            TokenStandard::Sui => {
                let params = json!([tx_hash, {"showEffects": true}]);
                let reply = self.rpc(base, "sui_getTransactionBlock", params).await?;
                classifiers::sui_transaction(&reply)
            }
            TokenStandard::Ton => {
                let url = rest_url(base, "/api/v3/transactionsByMessage?msg_hash={hash}", tx_hash);
                let reply = self.get_json(&url).await?;
                classifiers::ton_transactions(&reply)
            }
            TokenStandard::Substrate => {
                let url = format!("{}/api/scan/extrinsic", base.trim_end_matches('/'));
                let reply = self.post_json(&url, json!({ "hash": tx_hash })).await?;
                classifiers::polkadot_extrinsic(&reply)
            }
            TokenStandard::Ripple => {
                let reply = self.rpc(base, "tx", json!([{ "transaction": tx_hash }])).await?;
                classifiers::ripple_tx(&reply)
            }
            TokenStandard::Trc20 => {
                let url = format!("{}/wallet/gettransactionbyid", base.trim_end_matches('/'));
                let reply = self.post_json(&url, json!({ "value": tx_hash })).await?;
                classifiers::tron_transaction(&reply)
            }
        }
    }

    async fn rpc(&self, url: &str, method: &str, params: Value) -> Result<Value, StatusError> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        self.post_json(url, request).await
    }

    async fn post_json(&self, url: &str, body: Value) -> Result<Value, StatusError> {
        parse_reply(self.transport.post_json(url, body).await?)
    }

    async fn get_json(&self, url: &str) -> Result<Value, StatusError> {
        parse_reply(self.transport.get(url).await?)
    }
}

fn parse_reply(response: HttpResponse) -> Result<Value, StatusError> {
    if !response.is_success() {
        return Err(StatusError::UnexpectedResponse(format!("HTTP {}", response.status)));
    }
    Ok(serde_json::from_str(&response.body)?)
}

/// Endpoints carrying `{hash}` are used as is, others get the family's
/// default path appended
fn rest_url(base: &str, default_path: &str, tx_hash: &str) -> String {
    if base.contains(HASH_PLACEHOLDER) {
        base.replace(HASH_PLACEHOLDER, tx_hash)
    } else {
        format!(
            "{}{}",
            base.trim_end_matches('/'),
            default_path.replace(HASH_PLACEHOLDER, tx_hash)
        )
    }
}
