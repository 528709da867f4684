//! Map chain API replies to a [`TransactionResult`]
//!
//! Each function classifies one already-parsed reply. Replies that do not
//! have the expected shape are errors, which the tracker reports as
//! `NotFound`.

use serde_json::Value;

use super::TransactionResult;
use crate::errors::StatusError;

type Classified = Result<TransactionResult, StatusError>;

fn rpc_error(reply: &Value) -> Option<StatusError> {
    reply
        .get("error")
        .filter(|error| !error.is_null())
        .map(|error| StatusError::UnexpectedResponse(format!("RPC error: {}", error)))
}

/// `eth_getTransactionReceipt`.
///
/// A missing receipt and a receipt without `status` both read as pending,
/// so an unknown hash is indistinguishable from one still in the mempool.
pub fn evm_receipt(reply: &Value) -> Classified {
    if let Some(error) = rpc_error(reply) {
        return Err(error);
    }
    let receipt = match reply.get("result") {
        None | Some(Value::Null) => return Ok(TransactionResult::Pending),
        Some(receipt) => receipt,
    };
    Ok(match receipt.get("status").and_then(Value::as_str) {
        Some("0x1") => TransactionResult::Confirmed,
        Some("0x0") => TransactionResult::failed("Transaction reverted"),
        _ => TransactionResult::Pending,
    })
}

/// Esplora (`status.confirmed`), Blockchair (`data.{hash}.transaction`),
/// confirmation counters and Blockfrost (`block`) replies
pub fn utxo_transaction(reply: &Value, tx_hash: &str) -> Classified {
    if let Some(confirmed) = reply.pointer("/status/confirmed").and_then(Value::as_bool) {
        return Ok(pending_unless(confirmed));
    }

    if let Some(data) = reply.get("data") {
        let tx = data
            .get(tx_hash)
            .and_then(|entry| entry.get("transaction"))
            .filter(|tx| !tx.is_null());
        return Ok(match tx {
            // Blockchair uses -1 for mempool transactions
            Some(tx) => pending_unless(tx.get("block_id").and_then(Value::as_i64).unwrap_or(-1) > 0),
            None => TransactionResult::NotFound,
        });
    }

    if let Some(confirmations) = reply.get("confirmations").and_then(Value::as_u64) {
        return Ok(pending_unless(confirmations > 0));
    }

    for key in ["block", "block_height", "block_id"] {
        if let Some(value) = reply.get(key) {
            return Ok(pending_unless(!value.is_null()));
        }
    }

    Err(StatusError::UnexpectedResponse(format!(
        "no confirmation field in UTXO reply for {}",
        tx_hash
    )))
}

/// `/cosmos/tx/v1beta1/txs/{hash}`: found means included in a block,
/// a non-zero code means the chain rejected it
pub fn cosmos_tx(status: u16, body: &str) -> Classified {
    if status != 200 {
        return Ok(TransactionResult::Pending);
    }
    let reply: Value = match serde_json::from_str(body) {
        Ok(reply) => reply,
        Err(_) => return Ok(TransactionResult::Confirmed),
    };
    let code = reply.pointer("/tx_response/code").and_then(Value::as_u64).unwrap_or(0);
    if code != 0 {
        let raw_log = reply
            .pointer("/tx_response/raw_log")
            .and_then(Value::as_str)
            .unwrap_or_default();
        return Ok(TransactionResult::failed(format!("code {}: {}", code, raw_log)));
    }
    Ok(TransactionResult::Confirmed)
}

/// `getSignatureStatuses`
pub fn solana_signature(reply: &Value) -> Classified {
    if let Some(error) = rpc_error(reply) {
        return Err(error);
    }
    let status = match reply.pointer("/result/value/0") {
        None | Some(Value::Null) => return Ok(TransactionResult::NotFound),
        Some(status) => status,
    };
    Ok(match status.get("confirmationStatus").and_then(Value::as_str) {
        Some("finalized") => match status.get("err") {
            None | Some(Value::Null) => TransactionResult::Confirmed,
            Some(err) => TransactionResult::failed(err.to_string()),
        },
        Some(_) => TransactionResult::Pending,
        None => TransactionResult::NotFound,
    })
}

/// `sui_getTransactionBlock`
pub fn sui_transaction(reply: &Value) -> Classified {
    Ok(match reply.get("result") {
        Some(result) if !result.is_null() => TransactionResult::Confirmed,
        _ => TransactionResult::NotFound,
    })
}

/// `wallet/gettransactionbyid` answers `{}` for unknown ids
pub fn tron_transaction(reply: &Value) -> Classified {
    let found = ["txID", "id"]
        .iter()
        .any(|key| reply.get(key).map_or(false, |value| !value.is_null()));
    Ok(if found {
        TransactionResult::Confirmed
    } else {
        TransactionResult::NotFound
    })
}

/// toncenter `transactionsByMessage`
pub fn ton_transactions(reply: &Value) -> Classified {
    Ok(match reply.get("transactions").and_then(Value::as_array) {
        Some(transactions) if !transactions.is_empty() => TransactionResult::Confirmed,
        Some(_) => TransactionResult::Pending,
        None => TransactionResult::NotFound,
    })
}

/// Subscan `scan/extrinsic`
pub fn polkadot_extrinsic(reply: &Value) -> Classified {
    Ok(match reply.get("data") {
        None | Some(Value::Null) => TransactionResult::NotFound,
        Some(data) => pending_unless(data.get("finalized").and_then(Value::as_bool).unwrap_or(false)),
    })
}

/// rippled `tx`
pub fn ripple_tx(reply: &Value) -> Classified {
    let result = match reply.get("result") {
        None | Some(Value::Null) => return Ok(TransactionResult::NotFound),
        Some(result) => result,
    };
    if result.get("error").and_then(Value::as_str) == Some("txnNotFound") {
        return Ok(TransactionResult::NotFound);
    }
    Ok(pending_unless(
        result.get("validated").and_then(Value::as_bool).unwrap_or(false),
    ))
}

fn pending_unless(confirmed: bool) -> TransactionResult {
    if confirmed {
        TransactionResult::Confirmed
    } else {
        TransactionResult::Pending
    }
}
