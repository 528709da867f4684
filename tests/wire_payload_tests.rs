use bigdecimal::BigDecimal;
use keysign_payload::codec::{decode_payload, encode_payload, from_wire, to_wire};
use keysign_payload::errors::MappingError;
use keysign_payload::payload::{
    validate, BlockChainSpecific, Coin, KeysignPayload, LibType, SwapPayload,
    ThorChainSwapPayload, TransactionType, UtxoInfo,
};
use keysign_payload::proto;
use keysign_payload::Chain;
use num_bigint::BigUint;
use prost::Message;
use std::str::FromStr;

const VAULT_KEY: &str = "02a1633cafcc01ebfb6d78e39f687a1f0995c62fc95f51ead10a02ee0be551b5dc";

fn btc_coin() -> Coin {
    Coin {
        chain: Chain::Bitcoin,
        ticker: "BTC".to_string(),
        address: "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh".to_string(),
        contract_address: String::new(),
        decimals: 8,
        hex_public_key: VAULT_KEY.to_string(),
        price_provider_id: "bitcoin".to_string(),
        logo: "btc".to_string(),
    }
}

fn rune_coin() -> Coin {
    Coin {
        chain: Chain::ThorChain,
        ticker: "RUNE".to_string(),
        address: "thor1dheycdevq39qlkxs2a6wuuzyn4aqxhve4qxtxt".to_string(),
        contract_address: String::new(),
        decimals: 8,
        hex_public_key: VAULT_KEY.to_string(),
        price_provider_id: "thorchain".to_string(),
        logo: "rune".to_string(),
    }
}

fn bitcoin_send() -> KeysignPayload {
    KeysignPayload {
        coin: btc_coin(),
        to_address: "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq".to_string(),
        to_amount: BigUint::from(250_000u64),
        block_chain_specific: BlockChainSpecific::Utxo {
            byte_fee: BigUint::from(18u8),
            send_max_amount: false,
        },
        utxos: vec![
            UtxoInfo {
                hash: "6d4c9a4b1b6e8a01a5e0d7b2b6f1dd9b3c1e1e2d6c1f5c1f3e2d1c0b9a8f7e6d".to_string(),
                amount: 200_000,
                index: 0,
            },
            UtxoInfo {
                hash: "0e3e2357e806b6cdb1f70b54c3a3a17b6714ee1f0e68bebb44a74b1efd512098".to_string(),
                amount: 100_000,
                index: 3,
            },
        ],
        memo: Some("rent".to_string()),
        swap_payload: None,
        approve_payload: None,
        vault_public_key_ecdsa: VAULT_KEY.to_string(),
        vault_local_party_id: "MacBook-Pro-1B2".to_string(),
        lib_type: LibType::DKLS,
        skip_broadcast: false,
    }
}

fn rune_swap() -> KeysignPayload {
    KeysignPayload {
        coin: rune_coin(),
        to_address: String::new(),
        to_amount: BigUint::from(1_000_000_000u64),
        block_chain_specific: BlockChainSpecific::ThorChain {
            account_number: BigUint::from(81_275u32),
            sequence: BigUint::from(12u8),
            fee: BigUint::from(2_000_000u32),
            is_deposit: true,
            transaction_type: TransactionType::Unspecified,
        },
        utxos: vec![],
        memo: Some("=:BTC.BTC:bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh:0/1/0".to_string()),
        swap_payload: Some(SwapPayload::ThorChain(ThorChainSwapPayload {
            from_address: rune_coin().address,
            from_coin: rune_coin(),
            to_coin: btc_coin(),
            vault_address: String::new(),
            router_address: None,
            from_amount: BigUint::from(1_000_000_000u64),
            to_amount_decimal: BigDecimal::from_str("0.00153").unwrap(),
            to_amount_limit: "0".to_string(),
            streaming_interval: "1".to_string(),
            streaming_quantity: "0".to_string(),
            expiration_time: 1_718_000_900,
            is_affiliate: false,
        })),
        approve_payload: None,
        vault_public_key_ecdsa: VAULT_KEY.to_string(),
        vault_local_party_id: "iPad-44F".to_string(),
        lib_type: LibType::GG20,
        skip_broadcast: false,
    }
}

#[test]
fn test_bitcoin_send_survives_relay() {
    let _ = env_logger::try_init();

    let original = bitcoin_send();
    validate(&original).expect("Fixture should be valid");

    let bytes = encode_payload(&original).expect("Failed to encode payload");
    let received = decode_payload(&bytes).expect("Failed to decode payload");

    assert_eq!(received, original);
    assert_eq!(received.utxos[1].index, 3);
}

#[test]
fn test_thorchain_swap_survives_relay() {
    let original = rune_swap();
    let received = decode_payload(&encode_payload(&original).unwrap()).unwrap();
    assert_eq!(received, original);

    let swap = received.swap_payload.unwrap();
    assert_eq!(swap.dst_token_value().unwrap().value, BigUint::from(153_000u32));
    assert_eq!(swap.src_token_value().unit, "RUNE");
}

#[test]
fn test_wire_strings_are_exact() {
    let wire = to_wire(&rune_swap()).unwrap();

    assert_eq!(wire.lib_type, "GG20");
    assert_eq!(wire.to_amount, "1000000000");
    let swap = wire.thorchain_swap_payload.as_ref().unwrap();
    assert_eq!(swap.to_amount_decimal, "0.00153");
    assert_eq!(swap.from_coin.as_ref().unwrap().chain, "THORChain");
    assert!(swap.from_coin.as_ref().unwrap().is_native_token);
    assert!(wire.mayachain_swap_payload.is_none());
    assert!(wire.oneinch_swap_payload.is_none());
}

#[test]
fn test_peer_sending_two_specifics_is_rejected() {
    let mut wire = to_wire(&bitcoin_send()).unwrap();
    wire.cardano = Some(proto::CardanoChainSpecific {
        byte_fee: "44".to_string(),
        send_max_amount: false,
        ttl: "130000000".to_string(),
    });
    let bytes = wire.encode_to_vec();

    match decode_payload(&bytes) {
        Err(MappingError::AmbiguousOrMissingSpecific { populated }) => {
            assert_eq!(populated, vec!["utxoSpecific", "cardano"]);
        }
        other => panic!("Expected ambiguity error, got {:?}", other),
    }
}

#[test]
fn test_legacy_lib_type_defaults_to_gg20() {
    let mut wire = to_wire(&bitcoin_send()).unwrap();
    wire.lib_type = String::new();

    let payload = from_wire(&wire).unwrap();
    assert_eq!(payload.lib_type, LibType::GG20);
}

#[test]
fn test_invalid_numeric_from_peer() {
    let mut wire = to_wire(&bitcoin_send()).unwrap();
    wire.to_amount = "2.5e5".to_string();

    assert!(matches!(
        from_wire(&wire),
        Err(MappingError::InvalidNumeric { field: "toAmount", .. })
    ));
}

#[test]
fn test_payload_json_keeps_precision() {
    let mut payload = bitcoin_send();
    payload.to_amount = BigUint::from(u128::MAX) * BigUint::from(1000u32);

    let json = serde_json::to_string(&payload).unwrap();
    assert!(json.contains("\"toAmount\":\"340282366920938463463374607431768211455000\""));
    assert!(json.contains("\"vaultPublicKeyECDSA\""));

    let back: KeysignPayload = serde_json::from_str(&json).unwrap();
    assert_eq!(back, payload);
}
