//! Human-readable view of Cosmos `SignDirect` bytes
//!
//! The signing screen gets opaque base64 `bodyBytes` and `authInfoBytes`.
//! [`parse_cosmos_message`] walks them with a small wire-format reader so the
//! user can check messages, memo and fee before approving, without pulling
//! the Cosmos SDK schema into the wallet.

pub mod reader;
pub mod tx;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::{DecodeError, DecodeResult, ValidationError};

pub use reader::BinaryReader;
pub use tx::{decode_auth_info, decode_tx_body, AuthInfo, TxBody};

/// Sign request in `SIGN_MODE_DIRECT`, with bytes base64 encoded
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignDirect {
    pub body_bytes: String,
    pub auth_info_bytes: String,
    pub chain_id: String,
    pub account_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub type_url: String,
    /// Base64 of the packed message
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub denom: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fee {
    pub amount: Vec<Amount>,
}

/// Display projection of a sign request. Never fed back into signing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CosmosMessage {
    pub chain_id: String,
    pub account_number: String,
    pub sequence: String,
    pub memo: String,
    pub messages: Vec<Message>,
    #[serde(rename = "fee")]
    pub auth_info_fee: Fee,
}

/// Decode a `SignDirect` request for display.
///
/// Blank inputs are rejected before any byte is decoded. The sequence is
/// taken from the first signer and is `"0"` when there is none.
pub fn parse_cosmos_message(sign_direct: &SignDirect) -> DecodeResult<CosmosMessage> {
    let required = [
        ("chainId", &sign_direct.chain_id),
        ("accountNumber", &sign_direct.account_number),
        ("bodyBytes", &sign_direct.body_bytes),
        ("authInfoBytes", &sign_direct.auth_info_bytes),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(field).into());
        }
    }

    let body = decode_tx_body(&decode_base64("bodyBytes", &sign_direct.body_bytes)?)?;
    let auth_info = decode_auth_info(&decode_base64("authInfoBytes", &sign_direct.auth_info_bytes)?)?;

    log::debug!(
        "Decoded {} sign request: {} messages, {} signers",
        sign_direct.chain_id,
        body.messages.len(),
        auth_info.signer_infos.len()
    );

    let sequence = auth_info
        .signer_infos
        .first()
        .map(|signer| signer.sequence.to_string())
        .unwrap_or_else(|| "0".to_string());

    let auth_info_fee = auth_info
        .fee
        .map(|fee| Fee {
            amount: fee
                .amount
                .into_iter()
                .map(|coin| Amount {
                    denom: coin.denom,
                    amount: coin.amount,
                })
                .collect(),
        })
        .unwrap_or_default();

    Ok(CosmosMessage {
        chain_id: sign_direct.chain_id.clone(),
        account_number: sign_direct.account_number.clone(),
        sequence,
        memo: body.memo,
        messages: body
            .messages
            .into_iter()
            .map(|any| Message {
                type_url: any.type_url,
                value: STANDARD.encode(any.value),
            })
            .collect(),
        auth_info_fee,
    })
}

fn decode_base64(field: &'static str, value: &str) -> DecodeResult<Vec<u8>> {
    STANDARD
        .decode(value.trim())
        .map_err(|_| DecodeError::InvalidBase64 { field })
}
