//! Polling cadence per chain and the caller-side polling loop

use log::{debug, info};
use std::time::Duration;
use tokio::time::{sleep, Instant};

use super::transport::StatusTransport;
use super::{TransactionResult, TransactionStatusTracker};
use crate::chains::{Chain, TokenStandard};

/// How often to poll a chain and for how long before giving up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxStatusConfiguration {
    pub poll_interval_ms: u64,
    pub max_wait_ms: u64,
}

const fn secs(seconds: u64) -> u64 {
    seconds * 1_000
}

const fn mins(minutes: u64) -> u64 {
    minutes * 60_000
}

impl TxStatusConfiguration {
    pub fn get_config(chain: Chain) -> Self {
        let (poll_interval_ms, max_wait_ms) = match chain.standard() {
            TokenStandard::Evm => (secs(5), mins(10)),
            TokenStandard::Utxo => (secs(30), mins(60)),
            TokenStandard::Thorchain | TokenStandard::Cosmos => (secs(3), mins(5)),
            TokenStandard::Sol => (secs(2), mins(2)),
            TokenStandard::Sui => (secs(2), mins(3)),
            TokenStandard::Ton => (secs(5), mins(5)),
            TokenStandard::Substrate => (secs(6), mins(5)),
            TokenStandard::Ripple => (secs(4), mins(5)),
            TokenStandard::Trc20 => (secs(3), mins(5)),
        };
        TxStatusConfiguration {
            poll_interval_ms,
            max_wait_ms,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn max_wait(&self) -> Duration {
        Duration::from_millis(self.max_wait_ms)
    }
}

/// How a polling run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The chain reported `Confirmed` or `Failed`
    Completed(TransactionResult),
    /// `max_wait` elapsed, carrying the last non-terminal result
    TimedOut(TransactionResult),
}

/// Poll until the transaction reaches a terminal state or `config.max_wait`
/// elapses. `NotFound` keeps polling since nodes may lag behind the
/// broadcast. Dropping the future stops the loop.
pub async fn poll_transaction_status<T: StatusTransport>(
    tracker: &TransactionStatusTracker<T>,
    tx_hash: &str,
    chain: Chain,
    config: TxStatusConfiguration,
) -> PollOutcome {
    let deadline = Instant::now() + config.max_wait();
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        let result = tracker.check_status(tx_hash, chain).await;
        if result.is_terminal() {
            info!("{} on {} finished after {} checks: {:?}", tx_hash, chain, attempts, result);
            return PollOutcome::Completed(result);
        }

        let now = Instant::now();
        if now >= deadline {
            info!("Gave up on {} on {} after {} checks", tx_hash, chain, attempts);
            return PollOutcome::TimedOut(result);
        }

        debug!("{} on {} is {:?}, next check in {:?}", tx_hash, chain, result, config.poll_interval());
        sleep(config.poll_interval().min(deadline - now)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackerConfig;
    use crate::errors::StatusError;
    use crate::status::transport::{HttpResponse, MockStatusTransport};
    use mockall::Sequence;

    fn reply(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: body.to_string(),
        }
    }

    fn fast() -> TxStatusConfiguration {
        TxStatusConfiguration {
            poll_interval_ms: 1_000,
            max_wait_ms: 3_500,
        }
    }

    #[test]
    fn test_config_table() {
        let cases = [
            (Chain::Ethereum, 5_000, 600_000),
            (Chain::Base, 5_000, 600_000),
            (Chain::Bitcoin, 30_000, 3_600_000),
            (Chain::Cardano, 30_000, 3_600_000),
            (Chain::GaiaChain, 3_000, 300_000),
            (Chain::ThorChain, 3_000, 300_000),
            (Chain::MayaChain, 3_000, 300_000),
            (Chain::Solana, 2_000, 120_000),
            (Chain::Sui, 2_000, 180_000),
            (Chain::Ton, 5_000, 300_000),
            (Chain::Polkadot, 6_000, 300_000),
            (Chain::Ripple, 4_000, 300_000),
            (Chain::Tron, 3_000, 300_000),
        ];
        for (chain, interval, max_wait) in cases {
            let config = TxStatusConfiguration::get_config(chain);
            assert_eq!(config.poll_interval_ms, interval, "{}", chain);
            assert_eq!(config.max_wait_ms, max_wait, "{}", chain);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_until_confirmed() {
        let _ = env_logger::try_init();

        let mut seq = Sequence::new();
        let mut mock = MockStatusTransport::new();
        mock.expect_post_json()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(reply(r#"{"result":null}"#)));
        mock.expect_post_json()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(reply(r#"{"result":{"status":"0x1"}}"#)));

        let tracker = TransactionStatusTracker::new(mock, TrackerConfig::default());
        let started = Instant::now();
        let outcome = poll_transaction_status(
            &tracker,
            "0xfeed",
            Chain::Ethereum,
            TxStatusConfiguration::get_config(Chain::Ethereum),
        )
        .await;

        assert_eq!(outcome, PollOutcome::Completed(TransactionResult::Confirmed));
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(10) && elapsed < Duration::from_secs(11));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_stops_polling() {
        let mut mock = MockStatusTransport::new();
        mock.expect_post_json()
            .times(1)
            .returning(|_, _| Ok(reply(r#"{"result":{"status":"0x0"}}"#)));

        let tracker = TransactionStatusTracker::new(mock, TrackerConfig::default());
        let outcome = poll_transaction_status(&tracker, "0xfeed", Chain::Base, fast()).await;
        assert_eq!(
            outcome,
            PollOutcome::Completed(TransactionResult::failed("Transaction reverted"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_with_last_result() {
        // checks at 0s, 1s, 2s, 3s and the 3.5s deadline
        let mut mock = MockStatusTransport::new();
        mock.expect_post_json()
            .times(5)
            .returning(|_, _| Ok(reply(r#"{"result":{"validated":false}}"#)));

        let tracker = TransactionStatusTracker::new(mock, TrackerConfig::default());
        let outcome = poll_transaction_status(&tracker, "XRPHASH", Chain::Ripple, fast()).await;
        assert_eq!(outcome, PollOutcome::TimedOut(TransactionResult::Pending));
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_found_keeps_polling() {
        let mut seq = Sequence::new();
        let mut mock = MockStatusTransport::new();
        mock.expect_get()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(StatusError::UnexpectedResponse("timeout".to_string())));
        mock.expect_get()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(reply(r#"{"status":{"confirmed":true}}"#)));

        let tracker = TransactionStatusTracker::new(mock, TrackerConfig::default());
        let outcome = poll_transaction_status(&tracker, "btc", Chain::Bitcoin, fast()).await;
        assert_eq!(outcome, PollOutcome::Completed(TransactionResult::Confirmed));
    }
}
