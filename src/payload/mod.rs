//! Chain-agnostic description of what a vault is asked to sign
//!
//! A [`KeysignPayload`] is built once by the caller, relayed to the other
//! signing devices through [`crate::codec`], and never mutated afterwards.
//! [`validate`] checks the cross-field invariants and is safe to run on both
//! sides of a relay round-trip.

pub mod specific;
pub mod swap;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::fmt;
use std::str::FromStr;

use crate::chains::Chain;
use crate::errors::{MappingError, ValidationError};

pub use specific::{BlockChainSpecific, CosmosIbcDenomTrace, SuiCoin, TransactionType};
pub use swap::{
    EvmSwapPayload, EvmSwapQuote, EvmSwapTransaction, KyberSwapPayload, KyberSwapQuote,
    SwapPayload, ThorChainSwapPayload, TokenValue, ONE_INCH_PROVIDER,
};

/// A token on a specific chain
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub chain: Chain,
    pub ticker: String,
    /// Vault address holding the token
    pub address: String,
    /// Empty for the chain's native token
    pub contract_address: String,
    pub decimals: u32,
    pub hex_public_key: String,
    pub price_provider_id: String,
    pub logo: String,
}

impl Coin {
    pub fn is_native_token(&self) -> bool {
        self.contract_address.is_empty()
    }

    /// Stable identity of the coin, `TICKER-Chain`
    pub fn id(&self) -> String {
        format!("{}-{}", self.ticker, self.chain)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UtxoInfo {
    pub hash: String,
    /// Chain-native units
    pub amount: i64,
    pub index: u32,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Erc20ApprovePayload {
    #[serde_as(as = "DisplayFromStr")]
    pub amount: BigUint,
    pub spender: String,
}

/// Threshold-signature library the vault was created with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LibType {
    #[default]
    GG20,
    DKLS,
    KeyImport,
}

impl LibType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LibType::GG20 => "GG20",
            LibType::DKLS => "DKLS",
            LibType::KeyImport => "KEYIMPORT",
        }
    }
}

impl fmt::Display for LibType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LibType {
    type Err = MappingError;

    /// Vaults created before the tag existed send an empty string
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "GG20" => Ok(LibType::GG20),
            "DKLS" => Ok(LibType::DKLS),
            "KEYIMPORT" => Ok(LibType::KeyImport),
            other => Err(MappingError::UnknownLibType(other.to_string())),
        }
    }
}

impl Serialize for LibType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LibType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeysignPayload {
    pub coin: Coin,
    pub to_address: String,
    #[serde_as(as = "DisplayFromStr")]
    pub to_amount: BigUint,
    pub block_chain_specific: BlockChainSpecific,
    pub utxos: Vec<UtxoInfo>,
    pub memo: Option<String>,
    pub swap_payload: Option<SwapPayload>,
    pub approve_payload: Option<Erc20ApprovePayload>,
    #[serde(rename = "vaultPublicKeyECDSA")]
    pub vault_public_key_ecdsa: String,
    #[serde(rename = "vaultLocalPartyID")]
    pub vault_local_party_id: String,
    pub lib_type: LibType,
    pub skip_broadcast: bool,
}

/// Check the cross-field invariants of a payload.
///
/// Amounts are arbitrary precision by construction, so only the structural
/// invariants are checked here.
pub fn validate(payload: &KeysignPayload) -> Result<(), ValidationError> {
    let chain = payload.coin.chain;

    if payload.coin.ticker.trim().is_empty() {
        return Err(ValidationError::MissingField("coin.ticker"));
    }
    if payload.coin.address.trim().is_empty() {
        return Err(ValidationError::MissingField("coin.address"));
    }
    if payload.vault_public_key_ecdsa.trim().is_empty() {
        return Err(ValidationError::MissingField("vaultPublicKeyECDSA"));
    }
    if payload.vault_local_party_id.trim().is_empty() {
        return Err(ValidationError::MissingField("vaultLocalPartyID"));
    }
    check_hex_key(&payload.vault_public_key_ecdsa)?;
    if !payload.coin.hex_public_key.is_empty() {
        check_hex_key(&payload.coin.hex_public_key)?;
    }

    if !payload.block_chain_specific.matches_chain(chain) {
        return Err(ValidationError::SpecificMismatch {
            chain: chain.to_string(),
            expected: BlockChainSpecific::expected_kind(chain),
            actual: payload.block_chain_specific.kind(),
        });
    }

    if !payload.utxos.is_empty() && !chain.is_utxo() {
        return Err(ValidationError::UnexpectedUtxos {
            chain: chain.to_string(),
            count: payload.utxos.len(),
        });
    }

    if let Some(swap) = &payload.swap_payload {
        validate_swap(swap, &payload.coin)?;
    }

    if let Some(approve) = &payload.approve_payload {
        if !chain.is_evm() {
            return Err(ValidationError::InvalidApprove(format!(
                "approve is only valid on EVM chains, got {}",
                chain
            )));
        }
        if approve.spender.trim().is_empty() {
            return Err(ValidationError::MissingField("approvePayload.spender"));
        }
    }

    Ok(())
}

fn check_hex_key(key: &str) -> Result<(), ValidationError> {
    hex::decode(key)
        .map(|_| ())
        .map_err(|e| ValidationError::InvalidPublicKey(format!("{}: {}", key, e)))
}

fn validate_swap(swap: &SwapPayload, coin: &Coin) -> Result<(), ValidationError> {
    let from_chain = swap.from_coin().chain;
    if from_chain != coin.chain {
        return Err(ValidationError::InvalidSwap(format!(
            "swap source {} does not match payload coin {}",
            from_chain, coin.chain
        )));
    }

    match swap {
        SwapPayload::OneInch(data) => {
            if !data.provider.is_empty() && data.provider != ONE_INCH_PROVIDER {
                return Err(ValidationError::InvalidSwap(format!(
                    "1inch payload tagged with provider {:?}",
                    data.provider
                )));
            }
        }
        SwapPayload::Evm(data) => {
            if data.provider.is_empty() || data.provider == ONE_INCH_PROVIDER {
                return Err(ValidationError::InvalidSwap(format!(
                    "EVM aggregator payload needs a non-1inch provider, got {:?}",
                    data.provider
                )));
            }
        }
        SwapPayload::ThorChain(_) | SwapPayload::MayaChain(_) | SwapPayload::Kyber(_) => {}
    }

    match swap {
        SwapPayload::OneInch(_) | SwapPayload::Evm(_) | SwapPayload::Kyber(_) if !from_chain.is_evm() => {
            Err(ValidationError::InvalidSwap(format!(
                "aggregator swaps run on EVM chains, got {}",
                from_chain
            )))
        }
        _ => Ok(()),
    }
}
