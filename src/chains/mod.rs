//! Chain identifiers and their token-standard families
//!
//! Every chain the wallet signs for belongs to exactly one token-standard
//! family. The family decides which chain-specific signing data a payload
//! must carry and which classifier tracks its confirmation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::MappingError;

/// Token-standard family of a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenStandard {
    Evm,
    Utxo,
    Thorchain,
    Cosmos,
    Sol,
    Substrate,
    Sui,
    Ton,
    Ripple,
    Trc20,
}

macro_rules! chains {
    ($($variant:ident => ($raw:literal, $standard:ident, $fee_unit:literal)),+ $(,)?) => {
        /// Supported chains
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Chain {
            $($variant),+
        }

        impl Chain {
            /// All chains in declaration order
            pub const ALL: &'static [Chain] = &[$(Chain::$variant),+];

            /// Identifier used on the wire
            pub fn raw(&self) -> &'static str {
                match self {
                    $(Chain::$variant => $raw),+
                }
            }

            pub fn standard(&self) -> TokenStandard {
                match self {
                    $(Chain::$variant => TokenStandard::$standard),+
                }
            }

            /// Unit fees are quoted in
            pub fn fee_unit(&self) -> &'static str {
                match self {
                    $(Chain::$variant => $fee_unit),+
                }
            }
        }
    };
}

chains! {
    ThorChain => ("THORChain", Thorchain, "Rune"),
    MayaChain => ("MayaChain", Thorchain, "cacao"),

    // EVM
    Arbitrum => ("Arbitrum", Evm, "Gwei"),
    Avalanche => ("Avalanche", Evm, "Gwei"),
    Base => ("Base", Evm, "Gwei"),
    CronosChain => ("CronosChain", Evm, "Gwei"),
    BscChain => ("BSC", Evm, "Gwei"),
    Blast => ("Blast", Evm, "Gwei"),
    Ethereum => ("Ethereum", Evm, "Gwei"),
    Optimism => ("Optimism", Evm, "Gwei"),
    Polygon => ("Polygon", Evm, "Gwei"),
    ZkSync => ("Zksync", Evm, "Gwei"),
    Mantle => ("Mantle", Evm, "Gwei"),

    // UTXO
    Bitcoin => ("Bitcoin", Utxo, "BTC/vbyte"),
    BitcoinCash => ("Bitcoin-Cash", Utxo, "BCH/vbyte"),
    Litecoin => ("Litecoin", Utxo, "LTC/vbyte"),
    Dogecoin => ("Dogecoin", Utxo, "Doge/vbyte"),
    Dash => ("Dash", Utxo, "DASH/vbyte"),
    Zcash => ("Zcash", Utxo, "ZEC/vbyte"),
    Cardano => ("Cardano", Utxo, "ADA/vbyte"),

    // Cosmos SDK
    GaiaChain => ("Cosmos", Cosmos, "uatom"),
    Kujira => ("Kujira", Cosmos, "ukuji"),
    Dydx => ("Dydx", Cosmos, "adydx"),
    Osmosis => ("Osmosis", Cosmos, "uosmo"),
    Terra => ("Terra", Cosmos, "uluna"),
    TerraClassic => ("TerraClassic", Cosmos, "uluna"),
    Noble => ("Noble", Cosmos, "uusdc"),
    Akash => ("Akash", Cosmos, "uakt"),

    Solana => ("Solana", Sol, "SOL"),
    Polkadot => ("Polkadot", Substrate, "DOT"),
    Sui => ("Sui", Sui, "SUI"),
    Ton => ("Ton", Ton, "TON"),
    Ripple => ("Ripple", Ripple, "XRP"),
    Tron => ("Tron", Trc20, "TRX"),
}

impl Chain {
    /// Look up a chain by its wire identifier
    pub fn from_raw(raw: &str) -> Result<Chain, MappingError> {
        Chain::ALL
            .iter()
            .copied()
            .find(|chain| chain.raw() == raw)
            .ok_or_else(|| MappingError::UnknownChain(raw.to_string()))
    }

    pub fn is_utxo(&self) -> bool {
        self.standard() == TokenStandard::Utxo
    }

    pub fn is_evm(&self) -> bool {
        self.standard() == TokenStandard::Evm
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw())
    }
}

impl FromStr for Chain {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Chain::from_raw(s)
    }
}

impl Serialize for Chain {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.raw())
    }
}

impl<'de> Deserialize<'de> for Chain {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Chain::from_raw(&raw).map_err(serde::de::Error::custom)
    }
}
