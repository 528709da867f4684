//! Chain-specific signing data, one variant per token-standard family

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::chains::{Chain, TokenStandard};
use crate::errors::MappingError;

/// Cosmos-family transaction kinds carried next to the account data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransactionType {
    #[default]
    Unspecified,
    Vote,
    Proposal,
    IbcTransfer,
    ThorMerge,
    ThorUnmerge,
    TonDeposit,
    TonWithdraw,
    GenericContract,
}

impl TransactionType {
    pub fn to_wire(self) -> i32 {
        match self {
            TransactionType::Unspecified => 0,
            TransactionType::Vote => 1,
            TransactionType::Proposal => 2,
            TransactionType::IbcTransfer => 3,
            TransactionType::ThorMerge => 4,
            TransactionType::ThorUnmerge => 5,
            TransactionType::TonDeposit => 6,
            TransactionType::TonWithdraw => 7,
            TransactionType::GenericContract => 8,
        }
    }
}

impl TryFrom<i32> for TransactionType {
    type Error = MappingError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => TransactionType::Unspecified,
            1 => TransactionType::Vote,
            2 => TransactionType::Proposal,
            3 => TransactionType::IbcTransfer,
            4 => TransactionType::ThorMerge,
            5 => TransactionType::ThorUnmerge,
            6 => TransactionType::TonDeposit,
            7 => TransactionType::TonWithdraw,
            8 => TransactionType::GenericContract,
            other => return Err(MappingError::UnknownTransactionType(other)),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CosmosIbcDenomTrace {
    pub path: String,
    pub base_denom: String,
    pub latest_block: String,
}

/// A gas coin object owned by the sender on Sui
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiCoin {
    pub coin_type: String,
    pub coin_object_id: String,
    pub version: String,
    pub digest: String,
    pub balance: String,
    pub previous_transaction: String,
}

/// Chain-specific signing data. Exactly one variant accompanies a payload and
/// it must match the family of the payload's coin.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all_fields = "camelCase")]
pub enum BlockChainSpecific {
    #[serde(rename = "UTXO")]
    Utxo {
        #[serde_as(as = "DisplayFromStr")]
        byte_fee: BigUint,
        send_max_amount: bool,
    },
    Ethereum {
        #[serde_as(as = "DisplayFromStr")]
        max_fee_per_gas_wei: BigUint,
        #[serde_as(as = "DisplayFromStr")]
        priority_fee_wei: BigUint,
        #[serde_as(as = "DisplayFromStr")]
        nonce: BigUint,
        #[serde_as(as = "DisplayFromStr")]
        gas_limit: BigUint,
    },
    #[serde(rename = "THORChain")]
    ThorChain {
        #[serde_as(as = "DisplayFromStr")]
        account_number: BigUint,
        #[serde_as(as = "DisplayFromStr")]
        sequence: BigUint,
        #[serde_as(as = "DisplayFromStr")]
        fee: BigUint,
        is_deposit: bool,
        transaction_type: TransactionType,
    },
    MayaChain {
        #[serde_as(as = "DisplayFromStr")]
        account_number: BigUint,
        #[serde_as(as = "DisplayFromStr")]
        sequence: BigUint,
        is_deposit: bool,
    },
    Cosmos {
        #[serde_as(as = "DisplayFromStr")]
        account_number: BigUint,
        #[serde_as(as = "DisplayFromStr")]
        sequence: BigUint,
        #[serde_as(as = "DisplayFromStr")]
        gas: BigUint,
        ibc_denom_traces: Option<CosmosIbcDenomTrace>,
        transaction_type: TransactionType,
    },
    Solana {
        recent_block_hash: String,
        #[serde_as(as = "DisplayFromStr")]
        priority_fee: BigUint,
        #[serde_as(as = "DisplayFromStr")]
        compute_limit: BigUint,
        from_address_pub_key: Option<String>,
        to_address_pub_key: Option<String>,
        program_id: bool,
    },
    Sui {
        #[serde_as(as = "DisplayFromStr")]
        reference_gas_price: BigUint,
        #[serde_as(as = "DisplayFromStr")]
        gas_budget: BigUint,
        coins: Vec<SuiCoin>,
    },
    Polkadot {
        recent_block_hash: String,
        #[serde_as(as = "DisplayFromStr")]
        nonce: BigUint,
        #[serde_as(as = "DisplayFromStr")]
        current_block_number: BigUint,
        #[serde_as(as = "DisplayFromStr")]
        spec_version: BigUint,
        #[serde_as(as = "DisplayFromStr")]
        transaction_version: BigUint,
        genesis_hash: String,
    },
    Ton {
        #[serde_as(as = "DisplayFromStr")]
        sequence_number: BigUint,
        #[serde_as(as = "DisplayFromStr")]
        expire_at: BigUint,
        bounceable: bool,
        send_max_amount: bool,
        jetton_address: Option<String>,
        is_active_destination: bool,
    },
    Ripple {
        #[serde_as(as = "DisplayFromStr")]
        sequence: BigUint,
        #[serde_as(as = "DisplayFromStr")]
        last_ledger_sequence: BigUint,
        #[serde_as(as = "DisplayFromStr")]
        gas: BigUint,
    },
    Tron {
        #[serde_as(as = "DisplayFromStr")]
        timestamp: BigUint,
        #[serde_as(as = "DisplayFromStr")]
        expiration: BigUint,
        #[serde_as(as = "DisplayFromStr")]
        block_header_timestamp: BigUint,
        #[serde_as(as = "DisplayFromStr")]
        block_header_number: BigUint,
        #[serde_as(as = "DisplayFromStr")]
        block_header_version: BigUint,
        block_header_tx_trie_root: String,
        block_header_parent_hash: String,
        block_header_witness_address: String,
        #[serde_as(as = "DisplayFromStr")]
        gas_fee_estimation: BigUint,
    },
    Cardano {
        #[serde_as(as = "DisplayFromStr")]
        byte_fee: BigUint,
        send_max_amount: bool,
        #[serde_as(as = "DisplayFromStr")]
        ttl: BigUint,
    },
}

impl BlockChainSpecific {
    /// Variant name, as used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            BlockChainSpecific::Utxo { .. } => "UTXO",
            BlockChainSpecific::Ethereum { .. } => "Ethereum",
            BlockChainSpecific::ThorChain { .. } => "THORChain",
            BlockChainSpecific::MayaChain { .. } => "MayaChain",
            BlockChainSpecific::Cosmos { .. } => "Cosmos",
            BlockChainSpecific::Solana { .. } => "Solana",
            BlockChainSpecific::Sui { .. } => "Sui",
            BlockChainSpecific::Polkadot { .. } => "Polkadot",
            BlockChainSpecific::Ton { .. } => "Ton",
            BlockChainSpecific::Ripple { .. } => "Ripple",
            BlockChainSpecific::Tron { .. } => "Tron",
            BlockChainSpecific::Cardano { .. } => "Cardano",
        }
    }

    /// The variant a payload for `chain` is required to carry.
    ///
    /// THORChain and Maya share a token standard but have their own variants,
    /// and Cardano is UTXO based with a dedicated variant.
    pub fn expected_kind(chain: Chain) -> &'static str {
        match (chain, chain.standard()) {
            (Chain::MayaChain, _) => "MayaChain",
            (Chain::Cardano, _) => "Cardano",
            (_, TokenStandard::Thorchain) => "THORChain",
            (_, TokenStandard::Evm) => "Ethereum",
            (_, TokenStandard::Utxo) => "UTXO",
            (_, TokenStandard::Cosmos) => "Cosmos",
            (_, TokenStandard::Sol) => "Solana",
            (_, TokenStandard::Substrate) => "Polkadot",
            (_, TokenStandard::Sui) => "Sui",
            (_, TokenStandard::Ton) => "Ton",
            (_, TokenStandard::Ripple) => "Ripple",
            (_, TokenStandard::Trc20) => "Tron",
        }
    }

    pub fn matches_chain(&self, chain: Chain) -> bool {
        self.kind() == Self::expected_kind(chain)
    }
}
