use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use keysign_payload::cosmos::tx::SignMode;
use keysign_payload::cosmos::{decode_auth_info, decode_tx_body, parse_cosmos_message, SignDirect};
use keysign_payload::errors::{DecodeError, ValidationError};
use prost::Message;

// Encoder-side mirrors of the Cosmos SDK messages

#[derive(Clone, PartialEq, ::prost::Message)]
struct Any {
    #[prost(string, tag = "1")]
    type_url: String,
    #[prost(bytes = "vec", tag = "2")]
    value: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
struct Coin {
    #[prost(string, tag = "1")]
    denom: String,
    #[prost(string, tag = "2")]
    amount: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
struct Timestamp {
    #[prost(int64, tag = "1")]
    seconds: i64,
    #[prost(int32, tag = "2")]
    nanos: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
struct TxBody {
    #[prost(message, repeated, tag = "1")]
    messages: Vec<Any>,
    #[prost(string, tag = "2")]
    memo: String,
    #[prost(uint64, tag = "3")]
    timeout_height: u64,
    #[prost(bool, tag = "4")]
    unordered: bool,
    #[prost(message, optional, tag = "5")]
    timeout_timestamp: Option<Timestamp>,
    /// Not part of the decoder's field set
    #[prost(string, tag = "99")]
    future_field: String,
    #[prost(message, repeated, tag = "1023")]
    extension_options: Vec<Any>,
    #[prost(message, repeated, tag = "2047")]
    non_critical_extension_options: Vec<Any>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
struct ModeSingle {
    #[prost(int32, tag = "1")]
    mode: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
struct CompactBitArray {
    #[prost(uint32, tag = "1")]
    extra_bits_stored: u32,
    #[prost(bytes = "vec", tag = "2")]
    elems: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
struct ModeMulti {
    #[prost(message, optional, tag = "1")]
    bitarray: Option<CompactBitArray>,
    #[prost(message, repeated, tag = "2")]
    mode_infos: Vec<ModeInfo>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
struct ModeInfo {
    #[prost(message, optional, tag = "1")]
    single: Option<ModeSingle>,
    #[prost(message, optional, tag = "2")]
    multi: Option<ModeMulti>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
struct SignerInfo {
    #[prost(message, optional, tag = "1")]
    public_key: Option<Any>,
    #[prost(message, optional, tag = "2")]
    mode_info: Option<ModeInfo>,
    #[prost(uint64, tag = "3")]
    sequence: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
struct Fee {
    #[prost(message, repeated, tag = "1")]
    amount: Vec<Coin>,
    #[prost(uint64, tag = "2")]
    gas_limit: u64,
    #[prost(string, tag = "3")]
    payer: String,
    #[prost(string, tag = "4")]
    granter: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
struct Tip {
    #[prost(message, repeated, tag = "1")]
    amount: Vec<Coin>,
    #[prost(string, tag = "2")]
    tipper: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
struct AuthInfo {
    #[prost(message, repeated, tag = "1")]
    signer_infos: Vec<SignerInfo>,
    #[prost(message, optional, tag = "2")]
    fee: Option<Fee>,
    #[prost(message, optional, tag = "3")]
    tip: Option<Tip>,
}

fn msg_send() -> Any {
    Any {
        type_url: "/cosmos.bank.v1beta1.MsgSend".to_string(),
        value: vec![0x0a, 0x2d, 0x63, 0x6f, 0x73, 0x6d, 0x6f, 0x73, 0x31],
    }
}

fn signer(sequence: u64) -> SignerInfo {
    SignerInfo {
        public_key: Some(Any {
            type_url: "/cosmos.crypto.secp256k1.PubKey".to_string(),
            value: vec![0x0a, 0x21, 0x02, 0xab, 0xcd],
        }),
        mode_info: Some(ModeInfo {
            single: Some(ModeSingle { mode: 1 }),
            multi: None,
        }),
        sequence,
    }
}

fn uatom_fee() -> Fee {
    Fee {
        amount: vec![Coin {
            denom: "uatom".to_string(),
            amount: "7500".to_string(),
        }],
        gas_limit: 300_000,
        payer: String::new(),
        granter: String::new(),
    }
}

fn sign_direct(body: &TxBody, auth: &AuthInfo) -> SignDirect {
    SignDirect {
        body_bytes: STANDARD.encode(body.encode_to_vec()),
        auth_info_bytes: STANDARD.encode(auth.encode_to_vec()),
        chain_id: "cosmoshub-4".to_string(),
        account_number: "722419".to_string(),
    }
}

fn simple_body() -> TxBody {
    TxBody {
        messages: vec![msg_send()],
        memo: "vultisig".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_parse_cosmos_message() {
    let _ = env_logger::try_init();

    let auth = AuthInfo {
        signer_infos: vec![signer(14)],
        fee: Some(uatom_fee()),
        tip: None,
    };
    let parsed = parse_cosmos_message(&sign_direct(&simple_body(), &auth))
        .expect("Failed to parse sign request");

    assert_eq!(parsed.chain_id, "cosmoshub-4");
    assert_eq!(parsed.account_number, "722419");
    assert_eq!(parsed.sequence, "14");
    assert_eq!(parsed.memo, "vultisig");
    assert_eq!(parsed.messages.len(), 1);
    assert_eq!(parsed.messages[0].type_url, "/cosmos.bank.v1beta1.MsgSend");
    assert_eq!(parsed.messages[0].value, STANDARD.encode(msg_send().value));
    assert_eq!(parsed.auth_info_fee.amount.len(), 1);
    assert_eq!(parsed.auth_info_fee.amount[0].denom, "uatom");
    assert_eq!(parsed.auth_info_fee.amount[0].amount, "7500");
}

#[test]
fn test_sequence_defaults_to_zero_without_signers() {
    let auth = AuthInfo {
        signer_infos: vec![],
        fee: Some(uatom_fee()),
        tip: None,
    };
    let parsed = parse_cosmos_message(&sign_direct(&simple_body(), &auth)).unwrap();
    assert_eq!(parsed.sequence, "0");
}

#[test]
fn test_fee_defaults_to_empty() {
    let auth = AuthInfo {
        signer_infos: vec![signer(1)],
        fee: None,
        tip: None,
    };
    let parsed = parse_cosmos_message(&sign_direct(&simple_body(), &auth)).unwrap();
    assert!(parsed.auth_info_fee.amount.is_empty());
}

#[test]
fn test_large_sequence_is_exact() {
    let auth = AuthInfo {
        signer_infos: vec![signer(u64::MAX)],
        fee: None,
        tip: None,
    };
    let parsed = parse_cosmos_message(&sign_direct(&simple_body(), &auth)).unwrap();
    assert_eq!(parsed.sequence, "18446744073709551615");
}

#[test]
fn test_blank_fields_rejected_before_decoding() {
    let valid = sign_direct(
        &simple_body(),
        &AuthInfo {
            signer_infos: vec![signer(1)],
            fee: None,
            tip: None,
        },
    );

    let cases: Vec<(&str, SignDirect)> = vec![
        (
            "chainId",
            SignDirect {
                chain_id: String::new(),
                ..valid.clone()
            },
        ),
        (
            "accountNumber",
            SignDirect {
                account_number: "  ".to_string(),
                ..valid.clone()
            },
        ),
        (
            "bodyBytes",
            SignDirect {
                body_bytes: String::new(),
                // would fail base64 if it were decoded first
                auth_info_bytes: "%%%".to_string(),
                ..valid.clone()
            },
        ),
        (
            "authInfoBytes",
            SignDirect {
                auth_info_bytes: "\n".to_string(),
                ..valid.clone()
            },
        ),
    ];

    for (field, request) in cases {
        match parse_cosmos_message(&request) {
            Err(DecodeError::Validation(ValidationError::MissingField(name))) => {
                assert_eq!(name, field)
            }
            other => panic!("{} should be rejected as missing, got {:?}", field, other),
        }
    }
}

#[test]
fn test_invalid_base64() {
    let mut request = sign_direct(&simple_body(), &AuthInfo::default());
    request.body_bytes = "not base64!".to_string();
    assert_eq!(
        parse_cosmos_message(&request),
        Err(DecodeError::InvalidBase64 { field: "bodyBytes" })
    );
}

#[test]
fn test_truncated_body_reports_offset() {
    let mut bytes = simple_body().encode_to_vec();
    bytes.truncate(bytes.len() - 3);

    let mut request = sign_direct(&simple_body(), &AuthInfo::default());
    request.body_bytes = STANDARD.encode(&bytes);

    assert!(matches!(
        parse_cosmos_message(&request),
        Err(DecodeError::UnexpectedEof { .. })
    ));
}

#[test]
fn test_unknown_field_does_not_corrupt_later_fields() {
    let body = TxBody {
        messages: vec![msg_send()],
        memo: "before".to_string(),
        timeout_height: 1 << 40,
        unordered: true,
        timeout_timestamp: Some(Timestamp {
            seconds: 1_718_000_000,
            nanos: 500,
        }),
        future_field: "ignored by older decoders".to_string(),
        extension_options: vec![Any {
            type_url: "/ext.Option".to_string(),
            value: vec![1, 2, 3],
        }],
        non_critical_extension_options: vec![Any {
            type_url: "/ext.NonCritical".to_string(),
            value: vec![],
        }],
    };

    let decoded = decode_tx_body(&body.encode_to_vec()).expect("Failed to decode body");
    assert_eq!(decoded.memo, "before");
    assert_eq!(decoded.timeout_height, 1 << 40);
    assert!(decoded.unordered);
    let ts = decoded.timeout_timestamp.unwrap();
    assert_eq!((ts.seconds, ts.nanos), (1_718_000_000, 500));
    assert_eq!(decoded.extension_options.len(), 1);
    assert_eq!(decoded.extension_options[0].value, vec![1, 2, 3]);
    assert_eq!(
        decoded.non_critical_extension_options[0].type_url,
        "/ext.NonCritical"
    );
}

#[test]
fn test_legacy_group_is_skipped() {
    // field 10 as a group holding a varint, then memo "hi"
    let bytes = [0x53, 0x08, 0x01, 0x54, 0x12, 0x02, b'h', b'i'];
    let decoded = decode_tx_body(&bytes).unwrap();
    assert_eq!(decoded.memo, "hi");
    assert!(decoded.messages.is_empty());
}

#[test]
fn test_nested_group_flood_is_an_error() {
    let _ = env_logger::try_init();

    // field 15 start group, over and over
    let bytes = vec![0x7b; 1_000_000];
    assert_eq!(
        decode_tx_body(&bytes),
        Err(DecodeError::RecursionLimit { offset: 100 })
    );
}

#[test]
fn test_mismatched_end_group_is_an_error() {
    // field 10 group closed by an end tag for field 11
    let bytes = [0x53, 0x08, 0x01, 0x5c];
    assert_eq!(
        decode_tx_body(&bytes),
        Err(DecodeError::UnmatchedEndGroup {
            offset: 3,
            expected: 10,
            found: 11
        })
    );
}

#[test]
fn test_known_field_with_wrong_wire_type_is_skipped() {
    // memo (field 2) as a varint, then memo as a string
    let bytes = [0x10, 0x05, 0x12, 0x02, b'o', b'k'];
    let decoded = decode_tx_body(&bytes).expect("Failed to decode body");
    assert_eq!(decoded.memo, "ok");
}

#[test]
fn test_deep_multisig_mode_info_is_an_error() {
    let mut mode_info = ModeInfo {
        single: Some(ModeSingle { mode: 1 }),
        multi: None,
    };
    for _ in 0..150 {
        mode_info = ModeInfo {
            single: None,
            multi: Some(ModeMulti {
                bitarray: None,
                mode_infos: vec![mode_info],
            }),
        };
    }
    let auth = AuthInfo {
        signer_infos: vec![SignerInfo {
            public_key: None,
            mode_info: Some(mode_info),
            sequence: 1,
        }],
        fee: Some(uatom_fee()),
        tip: None,
    };

    assert!(matches!(
        decode_auth_info(&auth.encode_to_vec()),
        Err(DecodeError::RecursionLimit { .. })
    ));
}

#[test]
fn test_auth_info_full_coverage() {
    let auth = AuthInfo {
        signer_infos: vec![
            signer(3),
            SignerInfo {
                public_key: None,
                mode_info: Some(ModeInfo {
                    single: None,
                    multi: Some(ModeMulti {
                        bitarray: Some(CompactBitArray {
                            extra_bits_stored: 2,
                            elems: vec![0b1100_0000],
                        }),
                        mode_infos: vec![
                            ModeInfo {
                                single: Some(ModeSingle { mode: 127 }),
                                multi: None,
                            },
                            ModeInfo {
                                single: Some(ModeSingle { mode: 42 }),
                                multi: None,
                            },
                        ],
                    }),
                }),
                sequence: 9,
            },
        ],
        fee: Some(Fee {
            payer: "cosmos1payer".to_string(),
            granter: "cosmos1granter".to_string(),
            ..uatom_fee()
        }),
        tip: Some(Tip {
            amount: vec![Coin {
                denom: "uatom".to_string(),
                amount: "1".to_string(),
            }],
            tipper: "cosmos1tipper".to_string(),
        }),
    };

    let decoded = decode_auth_info(&auth.encode_to_vec()).expect("Failed to decode auth info");
    assert_eq!(decoded.signer_infos.len(), 2);

    let first = &decoded.signer_infos[0];
    assert_eq!(first.sequence, 3);
    assert_eq!(
        first.public_key.as_ref().unwrap().type_url,
        "/cosmos.crypto.secp256k1.PubKey"
    );
    assert_eq!(
        first.mode_info.as_ref().unwrap().single,
        Some(SignMode::Direct)
    );

    let multi = decoded.signer_infos[1]
        .mode_info
        .as_ref()
        .and_then(|info| info.multi.as_ref())
        .unwrap();
    let bitarray = multi.bitarray.as_ref().unwrap();
    assert_eq!(bitarray.extra_bits_stored, 2);
    assert_eq!(bitarray.elems, vec![0b1100_0000]);
    assert_eq!(multi.mode_infos[0].single, Some(SignMode::LegacyAminoJson));
    assert_eq!(multi.mode_infos[1].single, Some(SignMode::Unspecified));

    let fee = decoded.fee.unwrap();
    assert_eq!(fee.gas_limit, 300_000);
    assert_eq!(fee.payer, "cosmos1payer");
    assert_eq!(fee.granter, "cosmos1granter");
    assert_eq!(decoded.tip.unwrap().tipper, "cosmos1tipper");
}

#[test]
fn test_json_uses_fee_key() {
    let auth = AuthInfo {
        signer_infos: vec![signer(2)],
        fee: Some(uatom_fee()),
        tip: None,
    };
    let parsed = parse_cosmos_message(&sign_direct(&simple_body(), &auth)).unwrap();
    let json = serde_json::to_value(&parsed).unwrap();

    assert_eq!(json["chainId"], "cosmoshub-4");
    assert_eq!(json["fee"]["amount"][0]["denom"], "uatom");
    assert_eq!(json["messages"][0]["typeUrl"], "/cosmos.bank.v1beta1.MsgSend");
}
