//! Relay wire codec
//!
//! [`to_wire`] and [`from_wire`] map between the payload model and the
//! generated wire message and are inverses of each other. [`encode_payload`]
//! and [`decode_payload`] add the protobuf byte encoding on top, which is
//! what actually travels between devices.

pub mod numeric;
mod specific;
mod swap;

use log::debug;
use prost::Message;

use crate::chains::Chain;
use crate::errors::{MappingError, MappingResult};
use crate::payload::{self, Coin, Erc20ApprovePayload, KeysignPayload, UtxoInfo};
use crate::proto;

pub use numeric::{parse_big_uint, plain_string};
pub use specific::{specific_from_wire, specific_to_wire};
pub use swap::{swap_from_wire, swap_to_wire};

/// Build the wire message for `payload`.
///
/// Fails only when a value does not fit its fixed-width wire field.
pub fn to_wire(payload: &KeysignPayload) -> MappingResult<proto::KeysignPayload> {
    let mut msg = proto::KeysignPayload {
        coin: Some(coin_to_wire(&payload.coin)?),
        to_address: payload.to_address.clone(),
        to_amount: payload.to_amount.to_string(),
        utxo_info: payload
            .utxos
            .iter()
            .map(|utxo| proto::UtxoInfo {
                hash: utxo.hash.clone(),
                amount: utxo.amount,
                index: utxo.index,
            })
            .collect(),
        memo: payload.memo.clone(),
        erc20_approve_payload: payload
            .approve_payload
            .as_ref()
            .map(|approve| proto::Erc20ApprovePayload {
                amount: approve.amount.to_string(),
                spender: approve.spender.clone(),
            }),
        vault_public_key_ecdsa: payload.vault_public_key_ecdsa.clone(),
        vault_local_party_id: payload.vault_local_party_id.clone(),
        lib_type: payload.lib_type.to_string(),
        skip_broadcast: payload.skip_broadcast,
        ..Default::default()
    };

    specific_to_wire(&payload.block_chain_specific, &mut msg);
    if let Some(swap) = &payload.swap_payload {
        swap_to_wire(swap, &mut msg)?;
    }

    debug!(
        "Encoded {} payload with {} data",
        payload.coin.chain,
        payload.block_chain_specific.kind()
    );
    Ok(msg)
}

/// Rebuild a payload from its wire message.
///
/// This is a pure mapping: invariants across fields are left to
/// [`payload::validate`].
pub fn from_wire(msg: &proto::KeysignPayload) -> MappingResult<KeysignPayload> {
    let coin = msg
        .coin
        .as_ref()
        .ok_or(MappingError::MissingField("coin"))
        .and_then(coin_from_wire)?;

    let approve_payload = msg
        .erc20_approve_payload
        .as_ref()
        .map(|approve| {
            Ok::<_, MappingError>(Erc20ApprovePayload {
                amount: parse_big_uint("erc20ApprovePayload.amount", &approve.amount)?,
                spender: approve.spender.clone(),
            })
        })
        .transpose()?;

    Ok(KeysignPayload {
        coin,
        to_address: msg.to_address.clone(),
        to_amount: parse_big_uint("toAmount", &msg.to_amount)?,
        block_chain_specific: specific_from_wire(msg)?,
        utxos: msg
            .utxo_info
            .iter()
            .map(|utxo| UtxoInfo {
                hash: utxo.hash.clone(),
                amount: utxo.amount,
                index: utxo.index,
            })
            .collect(),
        memo: msg.memo.clone(),
        swap_payload: swap_from_wire(msg)?,
        approve_payload,
        vault_public_key_ecdsa: msg.vault_public_key_ecdsa.clone(),
        vault_local_party_id: msg.vault_local_party_id.clone(),
        lib_type: msg.lib_type.parse()?,
        skip_broadcast: msg.skip_broadcast,
    })
}

/// Serialize a payload into relay bytes
pub fn encode_payload(payload: &KeysignPayload) -> MappingResult<Vec<u8>> {
    Ok(to_wire(payload)?.encode_to_vec())
}

/// Parse relay bytes into a payload that passed [`payload::validate`]
pub fn decode_payload(bytes: &[u8]) -> MappingResult<KeysignPayload> {
    let msg = proto::KeysignPayload::decode(bytes)?;
    let payload = from_wire(&msg)?;
    payload::validate(&payload)?;
    Ok(payload)
}

pub(crate) fn coin_to_wire(coin: &Coin) -> MappingResult<proto::Coin> {
    Ok(proto::Coin {
        chain: coin.chain.raw().to_string(),
        ticker: coin.ticker.clone(),
        address: coin.address.clone(),
        contract_address: coin.contract_address.clone(),
        decimals: numeric::decimals_to_wire(coin.decimals)?,
        price_provider_id: coin.price_provider_id.clone(),
        is_native_token: coin.is_native_token(),
        hex_public_key: coin.hex_public_key.clone(),
        logo: coin.logo.clone(),
    })
}

/// `is_native_token` on the wire is informational, the contract address
/// decides.
pub(crate) fn coin_from_wire(coin: &proto::Coin) -> MappingResult<Coin> {
    Ok(Coin {
        chain: Chain::from_raw(&coin.chain)?,
        ticker: coin.ticker.clone(),
        address: coin.address.clone(),
        contract_address: coin.contract_address.clone(),
        decimals: numeric::decimals_from_wire(coin.decimals)?,
        hex_public_key: coin.hex_public_key.clone(),
        price_provider_id: coin.price_provider_id.clone(),
        logo: coin.logo.clone(),
    })
}
