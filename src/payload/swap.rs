//! Swap provider payloads

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint, Sign};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use super::Coin;

/// Provider tag carried by 1inch payloads on the wire
pub const ONE_INCH_PROVIDER: &str = "1inch";

/// An on-chain amount together with the precision needed to display it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenValue {
    /// Amount in the smallest unit of the token
    pub value: BigUint,
    pub decimals: u32,
    pub unit: String,
}

impl TokenValue {
    /// Human readable amount, `value / 10^decimals`
    pub fn decimal(&self) -> BigDecimal {
        BigDecimal::new(BigInt::from_biguint(Sign::Plus, self.value.clone()), self.decimals as i64)
    }
}

/// Most decimal digits [`scale_to_base_units`] will append to an amount
pub const MAX_UPSCALE_DIGITS: u32 = 4_096;

/// Scale a decimal amount into base units, truncating any precision finer
/// than `decimals`. Negative amounts clamp to zero. `None` when the result
/// would need more than [`MAX_UPSCALE_DIGITS`] appended zeros.
pub fn scale_to_base_units(amount: &BigDecimal, decimals: u32) -> Option<BigUint> {
    let (digits, scale) = amount.as_bigint_and_exponent();
    let shift = i128::from(scale) - i128::from(decimals);
    let scaled = if shift <= 0 {
        let zeros = u32::try_from(shift.unsigned_abs())
            .ok()
            .filter(|zeros| *zeros <= MAX_UPSCALE_DIGITS)?;
        digits * BigInt::from(10u32).pow(zeros)
    } else {
        // 10^shift exceeds any value of `bits` binary digits once shift > bits
        match u32::try_from(shift) {
            Ok(shift) if u64::from(shift) <= digits.bits() => {
                digits / BigInt::from(10u32).pow(shift)
            }
            _ => BigInt::default(),
        }
    };
    Some(scaled.to_biguint().unwrap_or_default())
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThorChainSwapPayload {
    pub from_address: String,
    pub from_coin: Coin,
    pub to_coin: Coin,
    pub vault_address: String,
    pub router_address: Option<String>,
    #[serde_as(as = "DisplayFromStr")]
    pub from_amount: BigUint,
    #[serde_as(as = "DisplayFromStr")]
    pub to_amount_decimal: BigDecimal,
    pub to_amount_limit: String,
    pub streaming_interval: String,
    pub streaming_quantity: String,
    pub expiration_time: u64,
    pub is_affiliate: bool,
}

impl ThorChainSwapPayload {
    /// Destination address of the swapped funds
    pub fn to_address(&self) -> &str {
        &self.to_coin.address
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvmSwapTransaction {
    pub from: String,
    pub to: String,
    pub data: String,
    pub value: String,
    pub gas_price: String,
    pub gas: i64,
    pub swap_fee: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvmSwapQuote {
    pub dst_amount: String,
    pub tx: EvmSwapTransaction,
}

/// Aggregator swap executed as a plain EVM transaction (1inch and friends)
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvmSwapPayload {
    pub from_coin: Coin,
    pub to_coin: Coin,
    #[serde_as(as = "DisplayFromStr")]
    pub from_amount: BigUint,
    #[serde_as(as = "DisplayFromStr")]
    pub to_amount_decimal: BigDecimal,
    pub quote: EvmSwapQuote,
    /// Aggregator that produced the quote
    pub provider: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KyberSwapQuote {
    pub amount_in: String,
    pub amount_out: String,
    pub gas: i64,
    pub gas_price: String,
    pub data: String,
    pub router_address: String,
    pub transaction_value: String,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KyberSwapPayload {
    pub from_coin: Coin,
    pub to_coin: Coin,
    #[serde_as(as = "DisplayFromStr")]
    pub from_amount: BigUint,
    #[serde_as(as = "DisplayFromStr")]
    pub to_amount_decimal: BigDecimal,
    pub quote: KyberSwapQuote,
}

/// Swap attached to a keysign payload, one variant per provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapPayload {
    ThorChain(ThorChainSwapPayload),
    MayaChain(ThorChainSwapPayload),
    OneInch(EvmSwapPayload),
    #[serde(rename = "EVM")]
    Evm(EvmSwapPayload),
    Kyber(KyberSwapPayload),
}

impl SwapPayload {
    pub fn from_coin(&self) -> &Coin {
        match self {
            SwapPayload::ThorChain(data) | SwapPayload::MayaChain(data) => &data.from_coin,
            SwapPayload::OneInch(data) | SwapPayload::Evm(data) => &data.from_coin,
            SwapPayload::Kyber(data) => &data.from_coin,
        }
    }

    pub fn to_coin(&self) -> &Coin {
        match self {
            SwapPayload::ThorChain(data) | SwapPayload::MayaChain(data) => &data.to_coin,
            SwapPayload::OneInch(data) | SwapPayload::Evm(data) => &data.to_coin,
            SwapPayload::Kyber(data) => &data.to_coin,
        }
    }

    pub fn from_amount(&self) -> &BigUint {
        match self {
            SwapPayload::ThorChain(data) | SwapPayload::MayaChain(data) => &data.from_amount,
            SwapPayload::OneInch(data) | SwapPayload::Evm(data) => &data.from_amount,
            SwapPayload::Kyber(data) => &data.from_amount,
        }
    }

    pub fn to_amount_decimal(&self) -> &BigDecimal {
        match self {
            SwapPayload::ThorChain(data) | SwapPayload::MayaChain(data) => &data.to_amount_decimal,
            SwapPayload::OneInch(data) | SwapPayload::Evm(data) => &data.to_amount_decimal,
            SwapPayload::Kyber(data) => &data.to_amount_decimal,
        }
    }

    /// Amount leaving the vault
    pub fn src_token_value(&self) -> TokenValue {
        let coin = self.from_coin();
        TokenValue {
            value: self.from_amount().clone(),
            decimals: coin.decimals,
            unit: coin.ticker.clone(),
        }
    }

    /// Expected amount received, `toAmountDecimal` scaled by the destination
    /// coin's precision. `None` when that precision is out of reach, see
    /// [`scale_to_base_units`].
    pub fn dst_token_value(&self) -> Option<TokenValue> {
        let coin = self.to_coin();
        Some(TokenValue {
            value: scale_to_base_units(self.to_amount_decimal(), coin.decimals)?,
            decimals: coin.decimals,
            unit: coin.ticker.clone(),
        })
    }
}
