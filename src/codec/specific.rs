//! Chain-specific data to and from its wire field

use log::debug;

use super::numeric::parse_big_uint;
use crate::errors::{MappingError, MappingResult};
use crate::payload::{BlockChainSpecific, CosmosIbcDenomTrace, SuiCoin, TransactionType};
use crate::proto;

/// Populate exactly the wire field matching `specific`, leaving every other
/// chain-specific field absent.
pub fn specific_to_wire(specific: &BlockChainSpecific, msg: &mut proto::KeysignPayload) {
    match specific {
        BlockChainSpecific::Utxo {
            byte_fee,
            send_max_amount,
        } => {
            msg.utxo_specific = Some(proto::UtxoSpecific {
                byte_fee: byte_fee.to_string(),
                send_max_amount: *send_max_amount,
            });
        }
        BlockChainSpecific::Ethereum {
            max_fee_per_gas_wei,
            priority_fee_wei,
            nonce,
            gas_limit,
        } => {
            msg.ethereum_specific = Some(proto::EthereumSpecific {
                max_fee_per_gas_wei: max_fee_per_gas_wei.to_string(),
                priority_fee: priority_fee_wei.to_string(),
                nonce: nonce.to_string(),
                gas_limit: gas_limit.to_string(),
            });
        }
        BlockChainSpecific::ThorChain {
            account_number,
            sequence,
            fee,
            is_deposit,
            transaction_type,
        } => {
            msg.thorchain_specific = Some(proto::ThorChainSpecific {
                account_number: account_number.to_string(),
                sequence: sequence.to_string(),
                fee: fee.to_string(),
                is_deposit: *is_deposit,
                transaction_type: transaction_type.to_wire(),
            });
        }
        BlockChainSpecific::MayaChain {
            account_number,
            sequence,
            is_deposit,
        } => {
            msg.maya_specific = Some(proto::MayaChainSpecific {
                account_number: account_number.to_string(),
                sequence: sequence.to_string(),
                is_deposit: *is_deposit,
            });
        }
        BlockChainSpecific::Cosmos {
            account_number,
            sequence,
            gas,
            ibc_denom_traces,
            transaction_type,
        } => {
            msg.cosmos_specific = Some(proto::CosmosSpecific {
                account_number: account_number.to_string(),
                sequence: sequence.to_string(),
                gas: gas.to_string(),
                ibc_denom_traces: ibc_denom_traces.as_ref().map(|trace| proto::CosmosIbcDenomTrace {
                    path: trace.path.clone(),
                    base_denom: trace.base_denom.clone(),
                    latest_block: trace.latest_block.clone(),
                }),
                transaction_type: transaction_type.to_wire(),
            });
        }
        BlockChainSpecific::Solana {
            recent_block_hash,
            priority_fee,
            compute_limit,
            from_address_pub_key,
            to_address_pub_key,
            program_id,
        } => {
            msg.solana_specific = Some(proto::SolanaSpecific {
                recent_block_hash: recent_block_hash.clone(),
                priority_fee: priority_fee.to_string(),
                compute_limit: compute_limit.to_string(),
                from_token_associated_address: from_address_pub_key.clone(),
                to_token_associated_address: to_address_pub_key.clone(),
                program_id: *program_id,
            });
        }
        BlockChainSpecific::Sui {
            reference_gas_price,
            gas_budget,
            coins,
        } => {
            msg.sui_specific = Some(proto::SuiSpecific {
                reference_gas_price: reference_gas_price.to_string(),
                gas_budget: gas_budget.to_string(),
                coins: coins
                    .iter()
                    .map(|coin| proto::SuiCoin {
                        coin_type: coin.coin_type.clone(),
                        coin_object_id: coin.coin_object_id.clone(),
                        version: coin.version.clone(),
                        digest: coin.digest.clone(),
                        balance: coin.balance.clone(),
                        previous_transaction: coin.previous_transaction.clone(),
                    })
                    .collect(),
            });
        }
        BlockChainSpecific::Polkadot {
            recent_block_hash,
            nonce,
            current_block_number,
            spec_version,
            transaction_version,
            genesis_hash,
        } => {
            msg.polkadot_specific = Some(proto::PolkadotSpecific {
                recent_block_hash: recent_block_hash.clone(),
                nonce: nonce.to_string(),
                current_block_number: current_block_number.to_string(),
                spec_version: spec_version.to_string(),
                transaction_version: transaction_version.to_string(),
                genesis_hash: genesis_hash.clone(),
            });
        }
        BlockChainSpecific::Ton {
            sequence_number,
            expire_at,
            bounceable,
            send_max_amount,
            jetton_address,
            is_active_destination,
        } => {
            msg.ton_specific = Some(proto::TonSpecific {
                sequence_number: sequence_number.to_string(),
                expire_at: expire_at.to_string(),
                bounceable: *bounceable,
                send_max_amount: *send_max_amount,
                jetton_address: jetton_address.clone(),
                is_active_destination: *is_active_destination,
            });
        }
        BlockChainSpecific::Ripple {
            sequence,
            last_ledger_sequence,
            gas,
        } => {
            msg.ripple_specific = Some(proto::RippleSpecific {
                sequence: sequence.to_string(),
                last_ledger_sequence: last_ledger_sequence.to_string(),
                gas: gas.to_string(),
            });
        }
        BlockChainSpecific::Tron {
            timestamp,
            expiration,
            block_header_timestamp,
            block_header_number,
            block_header_version,
            block_header_tx_trie_root,
            block_header_parent_hash,
            block_header_witness_address,
            gas_fee_estimation,
        } => {
            msg.tron_specific = Some(proto::TronSpecific {
                timestamp: timestamp.to_string(),
                expiration: expiration.to_string(),
                block_header_timestamp: block_header_timestamp.to_string(),
                block_header_number: block_header_number.to_string(),
                block_header_version: block_header_version.to_string(),
                block_header_tx_trie_root: block_header_tx_trie_root.clone(),
                block_header_parent_hash: block_header_parent_hash.clone(),
                block_header_witness_address: block_header_witness_address.clone(),
                gas_estimation: gas_fee_estimation.to_string(),
            });
        }
        BlockChainSpecific::Cardano {
            byte_fee,
            send_max_amount,
            ttl,
        } => {
            msg.cardano = Some(proto::CardanoChainSpecific {
                byte_fee: byte_fee.to_string(),
                send_max_amount: *send_max_amount,
                ttl: ttl.to_string(),
            });
        }
    }
}

/// Rebuild the chain-specific data from whichever wire field is populated.
///
/// Exactly one field must be present. Zero or several fail with
/// [`MappingError::AmbiguousOrMissingSpecific`] naming the populated fields.
pub fn specific_from_wire(msg: &proto::KeysignPayload) -> MappingResult<BlockChainSpecific> {
    let mut populated: Vec<(&'static str, MappingResult<BlockChainSpecific>)> = Vec::new();

    if let Some(s) = &msg.utxo_specific {
        populated.push(("utxoSpecific", utxo(s)));
    }
    if let Some(s) = &msg.ethereum_specific {
        populated.push(("ethereumSpecific", ethereum(s)));
    }
    if let Some(s) = &msg.thorchain_specific {
        populated.push(("thorchainSpecific", thorchain(s)));
    }
    if let Some(s) = &msg.maya_specific {
        populated.push(("mayaSpecific", maya(s)));
    }
    if let Some(s) = &msg.cosmos_specific {
        populated.push(("cosmosSpecific", cosmos(s)));
    }
    if let Some(s) = &msg.solana_specific {
        populated.push(("solanaSpecific", solana(s)));
    }
    if let Some(s) = &msg.polkadot_specific {
        populated.push(("polkadotSpecific", polkadot(s)));
    }
    if let Some(s) = &msg.sui_specific {
        populated.push(("suiSpecific", sui(s)));
    }
    if let Some(s) = &msg.ton_specific {
        populated.push(("tonSpecific", ton(s)));
    }
    if let Some(s) = &msg.ripple_specific {
        populated.push(("rippleSpecific", ripple(s)));
    }
    if let Some(s) = &msg.tron_specific {
        populated.push(("tronSpecific", tron(s)));
    }
    if let Some(s) = &msg.cardano {
        populated.push(("cardano", cardano(s)));
    }

    if populated.len() != 1 {
        return Err(MappingError::AmbiguousOrMissingSpecific {
            populated: populated.iter().map(|(name, _)| *name).collect(),
        });
    }

    let (name, specific) = populated.remove(0);
    debug!("Chain-specific data taken from {}", name);
    specific
}

fn utxo(s: &proto::UtxoSpecific) -> MappingResult<BlockChainSpecific> {
    Ok(BlockChainSpecific::Utxo {
        byte_fee: parse_big_uint("utxoSpecific.byteFee", &s.byte_fee)?,
        send_max_amount: s.send_max_amount,
    })
}

fn ethereum(s: &proto::EthereumSpecific) -> MappingResult<BlockChainSpecific> {
    Ok(BlockChainSpecific::Ethereum {
        max_fee_per_gas_wei: parse_big_uint("ethereumSpecific.maxFeePerGasWei", &s.max_fee_per_gas_wei)?,
        priority_fee_wei: parse_big_uint("ethereumSpecific.priorityFee", &s.priority_fee)?,
        nonce: parse_big_uint("ethereumSpecific.nonce", &s.nonce)?,
        gas_limit: parse_big_uint("ethereumSpecific.gasLimit", &s.gas_limit)?,
    })
}

fn thorchain(s: &proto::ThorChainSpecific) -> MappingResult<BlockChainSpecific> {
    Ok(BlockChainSpecific::ThorChain {
        account_number: parse_big_uint("thorchainSpecific.accountNumber", &s.account_number)?,
        sequence: parse_big_uint("thorchainSpecific.sequence", &s.sequence)?,
        fee: parse_big_uint("thorchainSpecific.fee", &s.fee)?,
        is_deposit: s.is_deposit,
        transaction_type: TransactionType::try_from(s.transaction_type)?,
    })
}

fn maya(s: &proto::MayaChainSpecific) -> MappingResult<BlockChainSpecific> {
    Ok(BlockChainSpecific::MayaChain {
        account_number: parse_big_uint("mayaSpecific.accountNumber", &s.account_number)?,
        sequence: parse_big_uint("mayaSpecific.sequence", &s.sequence)?,
        is_deposit: s.is_deposit,
    })
}

fn cosmos(s: &proto::CosmosSpecific) -> MappingResult<BlockChainSpecific> {
    Ok(BlockChainSpecific::Cosmos {
        account_number: parse_big_uint("cosmosSpecific.accountNumber", &s.account_number)?,
        sequence: parse_big_uint("cosmosSpecific.sequence", &s.sequence)?,
        gas: parse_big_uint("cosmosSpecific.gas", &s.gas)?,
        ibc_denom_traces: s.ibc_denom_traces.as_ref().map(|trace| CosmosIbcDenomTrace {
            path: trace.path.clone(),
            base_denom: trace.base_denom.clone(),
            latest_block: trace.latest_block.clone(),
        }),
        transaction_type: TransactionType::try_from(s.transaction_type)?,
    })
}

fn solana(s: &proto::SolanaSpecific) -> MappingResult<BlockChainSpecific> {
    Ok(BlockChainSpecific::Solana {
        recent_block_hash: s.recent_block_hash.clone(),
        priority_fee: parse_big_uint("solanaSpecific.priorityFee", &s.priority_fee)?,
        compute_limit: parse_big_uint("solanaSpecific.computeLimit", &s.compute_limit)?,
        from_address_pub_key: s.from_token_associated_address.clone(),
        to_address_pub_key: s.to_token_associated_address.clone(),
        program_id: s.program_id,
    })
}

fn polkadot(s: &proto::PolkadotSpecific) -> MappingResult<BlockChainSpecific> {
    Ok(BlockChainSpecific::Polkadot {
        recent_block_hash: s.recent_block_hash.clone(),
        nonce: parse_big_uint("polkadotSpecific.nonce", &s.nonce)?,
        current_block_number: parse_big_uint("polkadotSpecific.currentBlockNumber", &s.current_block_number)?,
        spec_version: parse_big_uint("polkadotSpecific.specVersion", &s.spec_version)?,
        transaction_version: parse_big_uint("polkadotSpecific.transactionVersion", &s.transaction_version)?,
        genesis_hash: s.genesis_hash.clone(),
    })
}

fn sui(s: &proto::SuiSpecific) -> MappingResult<BlockChainSpecific> {
    Ok(BlockChainSpecific::Sui {
        reference_gas_price: parse_big_uint("suiSpecific.referenceGasPrice", &s.reference_gas_price)?,
        gas_budget: parse_big_uint("suiSpecific.gasBudget", &s.gas_budget)?,
        coins: s
            .coins
            .iter()
            .map(|coin| SuiCoin {
                coin_type: coin.coin_type.clone(),
                coin_object_id: coin.coin_object_id.clone(),
                version: coin.version.clone(),
                digest: coin.digest.clone(),
                balance: coin.balance.clone(),
                previous_transaction: coin.previous_transaction.clone(),
            })
            .collect(),
    })
}

fn ton(s: &proto::TonSpecific) -> MappingResult<BlockChainSpecific> {
    Ok(BlockChainSpecific::Ton {
        sequence_number: parse_big_uint("tonSpecific.sequenceNumber", &s.sequence_number)?,
        expire_at: parse_big_uint("tonSpecific.expireAt", &s.expire_at)?,
        bounceable: s.bounceable,
        send_max_amount: s.send_max_amount,
        jetton_address: s.jetton_address.clone(),
        is_active_destination: s.is_active_destination,
    })
}

fn ripple(s: &proto::RippleSpecific) -> MappingResult<BlockChainSpecific> {
    Ok(BlockChainSpecific::Ripple {
        sequence: parse_big_uint("rippleSpecific.sequence", &s.sequence)?,
        last_ledger_sequence: parse_big_uint("rippleSpecific.lastLedgerSequence", &s.last_ledger_sequence)?,
        gas: parse_big_uint("rippleSpecific.gas", &s.gas)?,
    })
}

fn tron(s: &proto::TronSpecific) -> MappingResult<BlockChainSpecific> {
    Ok(BlockChainSpecific::Tron {
        timestamp: parse_big_uint("tronSpecific.timestamp", &s.timestamp)?,
        expiration: parse_big_uint("tronSpecific.expiration", &s.expiration)?,
        block_header_timestamp: parse_big_uint("tronSpecific.blockHeaderTimestamp", &s.block_header_timestamp)?,
        block_header_number: parse_big_uint("tronSpecific.blockHeaderNumber", &s.block_header_number)?,
        block_header_version: parse_big_uint("tronSpecific.blockHeaderVersion", &s.block_header_version)?,
        block_header_tx_trie_root: s.block_header_tx_trie_root.clone(),
        block_header_parent_hash: s.block_header_parent_hash.clone(),
        block_header_witness_address: s.block_header_witness_address.clone(),
        gas_fee_estimation: parse_big_uint("tronSpecific.gasEstimation", &s.gas_estimation)?,
    })
}

fn cardano(s: &proto::CardanoChainSpecific) -> MappingResult<BlockChainSpecific> {
    Ok(BlockChainSpecific::Cardano {
        byte_fee: parse_big_uint("cardano.byteFee", &s.byte_fee)?,
        send_max_amount: s.send_max_amount,
        ttl: parse_big_uint("cardano.ttl", &s.ttl)?,
    })
}
