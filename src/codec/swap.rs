//! Swap payloads to and from their provider wire fields

use log::{debug, warn};

use super::numeric::{decimal_to_wire, parse_big_uint, parse_decimal};
use super::{coin_from_wire, coin_to_wire};
use crate::errors::{MappingError, MappingResult};
use crate::payload::{
    EvmSwapPayload, EvmSwapQuote, EvmSwapTransaction, KyberSwapPayload, KyberSwapQuote,
    SwapPayload, ThorChainSwapPayload, ONE_INCH_PROVIDER,
};
use crate::proto;

pub fn swap_to_wire(swap: &SwapPayload, msg: &mut proto::KeysignPayload) -> MappingResult<()> {
    match swap {
        SwapPayload::ThorChain(data) => msg.thorchain_swap_payload = Some(thorchain_to_wire(data)?),
        SwapPayload::MayaChain(data) => msg.mayachain_swap_payload = Some(thorchain_to_wire(data)?),
        // 1inch and the other EVM aggregators share a field, told apart by provider
        SwapPayload::OneInch(data) | SwapPayload::Evm(data) => {
            msg.oneinch_swap_payload = Some(evm_to_wire(data)?)
        }
        SwapPayload::Kyber(data) => msg.kyberswap_swap_payload = Some(kyber_to_wire(data)?),
    }
    Ok(())
}

/// Pick the swap payload by provider precedence: THORChain, Maya,
/// 1inch/EVM, Kyber. No provider field at all means no swap.
pub fn swap_from_wire(msg: &proto::KeysignPayload) -> MappingResult<Option<SwapPayload>> {
    let present: Vec<&str> = [
        ("thorchainSwapPayload", msg.thorchain_swap_payload.is_some()),
        ("mayachainSwapPayload", msg.mayachain_swap_payload.is_some()),
        ("oneinchSwapPayload", msg.oneinch_swap_payload.is_some()),
        ("kyberswapSwapPayload", msg.kyberswap_swap_payload.is_some()),
    ]
    .iter()
    .filter(|(_, set)| *set)
    .map(|(name, _)| *name)
    .collect();

    if present.len() > 1 {
        warn!("Several swap payloads on the wire ({}), using {}", present.join(", "), present[0]);
    }

    let swap = if let Some(data) = &msg.thorchain_swap_payload {
        SwapPayload::ThorChain(thorchain_from_wire(data)?)
    } else if let Some(data) = &msg.mayachain_swap_payload {
        SwapPayload::MayaChain(thorchain_from_wire(data)?)
    } else if let Some(data) = &msg.oneinch_swap_payload {
        let payload = evm_from_wire(data)?;
        if payload.provider.is_empty() || payload.provider == ONE_INCH_PROVIDER {
            SwapPayload::OneInch(payload)
        } else {
            SwapPayload::Evm(payload)
        }
    } else if let Some(data) = &msg.kyberswap_swap_payload {
        SwapPayload::Kyber(kyber_from_wire(data)?)
    } else {
        return Ok(None);
    };

    debug!("Swap payload decoded from {}", present[0]);
    Ok(Some(swap))
}

fn thorchain_to_wire(data: &ThorChainSwapPayload) -> MappingResult<proto::ThorChainSwapPayload> {
    Ok(proto::ThorChainSwapPayload {
        from_address: data.from_address.clone(),
        from_coin: Some(coin_to_wire(&data.from_coin)?),
        to_coin: Some(coin_to_wire(&data.to_coin)?),
        vault_address: data.vault_address.clone(),
        router_address: data.router_address.clone(),
        from_amount: data.from_amount.to_string(),
        to_amount_decimal: decimal_to_wire("thorchainSwapPayload.toAmountDecimal", &data.to_amount_decimal)?,
        to_amount_limit: data.to_amount_limit.clone(),
        streaming_interval: data.streaming_interval.clone(),
        streaming_quantity: data.streaming_quantity.clone(),
        expiration_time: data.expiration_time,
        is_affiliate: data.is_affiliate,
    })
}

fn thorchain_from_wire(data: &proto::ThorChainSwapPayload) -> MappingResult<ThorChainSwapPayload> {
    Ok(ThorChainSwapPayload {
        from_address: data.from_address.clone(),
        from_coin: required_coin(&data.from_coin, "thorchainSwapPayload.fromCoin")?,
        to_coin: required_coin(&data.to_coin, "thorchainSwapPayload.toCoin")?,
        vault_address: data.vault_address.clone(),
        router_address: data.router_address.clone(),
        from_amount: parse_big_uint("thorchainSwapPayload.fromAmount", &data.from_amount)?,
        to_amount_decimal: parse_decimal("thorchainSwapPayload.toAmountDecimal", &data.to_amount_decimal)?,
        to_amount_limit: data.to_amount_limit.clone(),
        streaming_interval: data.streaming_interval.clone(),
        streaming_quantity: data.streaming_quantity.clone(),
        expiration_time: data.expiration_time,
        is_affiliate: data.is_affiliate,
    })
}

fn evm_to_wire(data: &EvmSwapPayload) -> MappingResult<proto::OneInchSwapPayload> {
    let tx = &data.quote.tx;
    Ok(proto::OneInchSwapPayload {
        from_coin: Some(coin_to_wire(&data.from_coin)?),
        to_coin: Some(coin_to_wire(&data.to_coin)?),
        from_amount: data.from_amount.to_string(),
        to_amount_decimal: decimal_to_wire("oneinchSwapPayload.toAmountDecimal", &data.to_amount_decimal)?,
        quote: Some(proto::OneInchQuote {
            dst_amount: data.quote.dst_amount.clone(),
            tx: Some(proto::OneInchTransaction {
                from: tx.from.clone(),
                to: tx.to.clone(),
                data: tx.data.clone(),
                value: tx.value.clone(),
                gas_price: tx.gas_price.clone(),
                gas: tx.gas,
                swap_fee: tx.swap_fee.clone(),
            }),
        }),
        provider: data.provider.clone(),
    })
}

fn evm_from_wire(data: &proto::OneInchSwapPayload) -> MappingResult<EvmSwapPayload> {
    let quote = data
        .quote
        .as_ref()
        .ok_or(MappingError::MissingField("oneinchSwapPayload.quote"))?;
    let tx = quote
        .tx
        .as_ref()
        .ok_or(MappingError::MissingField("oneinchSwapPayload.quote.tx"))?;

    Ok(EvmSwapPayload {
        from_coin: required_coin(&data.from_coin, "oneinchSwapPayload.fromCoin")?,
        to_coin: required_coin(&data.to_coin, "oneinchSwapPayload.toCoin")?,
        from_amount: parse_big_uint("oneinchSwapPayload.fromAmount", &data.from_amount)?,
        to_amount_decimal: parse_decimal("oneinchSwapPayload.toAmountDecimal", &data.to_amount_decimal)?,
        quote: EvmSwapQuote {
            dst_amount: quote.dst_amount.clone(),
            tx: EvmSwapTransaction {
                from: tx.from.clone(),
                to: tx.to.clone(),
                data: tx.data.clone(),
                value: tx.value.clone(),
                gas_price: tx.gas_price.clone(),
                gas: tx.gas,
                swap_fee: tx.swap_fee.clone(),
            },
        },
        provider: data.provider.clone(),
    })
}

fn kyber_to_wire(data: &KyberSwapPayload) -> MappingResult<proto::KyberSwapPayload> {
    let quote = &data.quote;
    Ok(proto::KyberSwapPayload {
        from_coin: Some(coin_to_wire(&data.from_coin)?),
        to_coin: Some(coin_to_wire(&data.to_coin)?),
        from_amount: data.from_amount.to_string(),
        to_amount_decimal: decimal_to_wire("kyberswapSwapPayload.toAmountDecimal", &data.to_amount_decimal)?,
        quote: Some(proto::KyberSwapQuote {
            amount_in: quote.amount_in.clone(),
            amount_out: quote.amount_out.clone(),
            gas: quote.gas,
            gas_price: quote.gas_price.clone(),
            data: quote.data.clone(),
            router_address: quote.router_address.clone(),
            transaction_value: quote.transaction_value.clone(),
        }),
    })
}

fn kyber_from_wire(data: &proto::KyberSwapPayload) -> MappingResult<KyberSwapPayload> {
    let quote = data
        .quote
        .as_ref()
        .ok_or(MappingError::MissingField("kyberswapSwapPayload.quote"))?;

    Ok(KyberSwapPayload {
        from_coin: required_coin(&data.from_coin, "kyberswapSwapPayload.fromCoin")?,
        to_coin: required_coin(&data.to_coin, "kyberswapSwapPayload.toCoin")?,
        from_amount: parse_big_uint("kyberswapSwapPayload.fromAmount", &data.from_amount)?,
        to_amount_decimal: parse_decimal("kyberswapSwapPayload.toAmountDecimal", &data.to_amount_decimal)?,
        quote: KyberSwapQuote {
            amount_in: quote.amount_in.clone(),
            amount_out: quote.amount_out.clone(),
            gas: quote.gas,
            gas_price: quote.gas_price.clone(),
            data: quote.data.clone(),
            router_address: quote.router_address.clone(),
            transaction_value: quote.transaction_value.clone(),
        },
    })
}

fn required_coin(coin: &Option<proto::Coin>, field: &'static str) -> MappingResult<crate::payload::Coin> {
    coin.as_ref()
        .ok_or(MappingError::MissingField(field))
        .and_then(coin_from_wire)
}
