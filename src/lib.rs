pub mod chains;
pub mod codec;
pub mod config;
pub mod cosmos;
pub mod errors;
pub mod payload;
pub mod proto;
pub mod status;

// Re-export the main entry points
pub use chains::{Chain, TokenStandard};
pub use codec::{decode_payload, encode_payload, from_wire, to_wire};
pub use config::TrackerConfig;
pub use cosmos::{parse_cosmos_message, CosmosMessage, SignDirect};
pub use errors::{DecodeError, MappingError, StatusError, ValidationError};
pub use payload::{validate, BlockChainSpecific, Coin, KeysignPayload, LibType, SwapPayload, UtxoInfo};
pub use status::{
    poll_transaction_status, PollOutcome, TransactionResult, TransactionStatusTracker,
    TxStatusConfiguration,
};

/// Build a tracker talking to the configured endpoints over HTTP
pub fn init_tracker(config: TrackerConfig) -> anyhow::Result<TransactionStatusTracker> {
    TransactionStatusTracker::from_config(config).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tracker_initialization() {
        let _ = env_logger::try_init();
        let tracker = init_tracker(TrackerConfig::default()).unwrap();
        assert_eq!(tracker.config().api_key_header, "x-api-key");
    }
}
