//! Cosmos SDK `TxBody` and `AuthInfo` messages, decoded field by field

use log::debug;

use super::reader::{BinaryReader, MAX_NESTING_DEPTH, WIRE_BYTES, WIRE_VARINT};
use crate::errors::{DecodeError, DecodeResult};

/// `google.protobuf.Any`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProtoAny {
    pub type_url: String,
    pub value: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TxBody {
    pub messages: Vec<ProtoAny>,
    pub memo: String,
    pub timeout_height: u64,
    pub unordered: bool,
    pub timeout_timestamp: Option<Timestamp>,
    pub extension_options: Vec<ProtoAny>,
    pub non_critical_extension_options: Vec<ProtoAny>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoinAmount {
    pub denom: String,
    pub amount: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignMode {
    #[default]
    Unspecified,
    Direct,
    Textual,
    DirectAux,
    LegacyAminoJson,
    Eip191,
}

impl SignMode {
    /// Unknown modes read as `Unspecified`
    pub fn from_wire(value: i32) -> Self {
        match value {
            1 => SignMode::Direct,
            2 => SignMode::Textual,
            3 => SignMode::DirectAux,
            127 => SignMode::LegacyAminoJson,
            191 => SignMode::Eip191,
            _ => SignMode::Unspecified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompactBitArray {
    pub extra_bits_stored: u32,
    pub elems: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModeInfoMulti {
    pub bitarray: Option<CompactBitArray>,
    pub mode_infos: Vec<ModeInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModeInfo {
    pub single: Option<SignMode>,
    pub multi: Option<ModeInfoMulti>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignerInfo {
    pub public_key: Option<ProtoAny>,
    pub mode_info: Option<ModeInfo>,
    pub sequence: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthInfoFee {
    pub amount: Vec<CoinAmount>,
    pub gas_limit: u64,
    pub payer: String,
    pub granter: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tip {
    pub amount: Vec<CoinAmount>,
    pub tipper: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthInfo {
    pub signer_infos: Vec<SignerInfo>,
    pub fee: Option<AuthInfoFee>,
    pub tip: Option<Tip>,
}

/// Read fields until the reader is exhausted, handing each `(field, wire
/// type)` to `on_field`. Fields it does not consume, including known fields
/// sent with an unexpected wire type, are skipped.
fn decode_fields<'a, F>(reader: &mut BinaryReader<'a>, mut on_field: F) -> DecodeResult<()>
where
    F: FnMut(&mut BinaryReader<'a>, (u32, u32)) -> DecodeResult<bool>,
{
    while !reader.is_at_end() {
        let tag = reader.uint32()?;
        let (field, wire_type) = (tag >> 3, tag & 7);
        if !on_field(reader, (field, wire_type))? {
            debug!("Skipping field {} (wire type {})", field, wire_type);
            reader.skip_field(tag)?;
        }
    }
    Ok(())
}

pub fn decode_tx_body(bytes: &[u8]) -> DecodeResult<TxBody> {
    let mut reader = BinaryReader::new(bytes);
    let mut body = TxBody::default();
    decode_fields(&mut reader, |r, key| {
        match key {
            (1, WIRE_BYTES) => body.messages.push(decode_any(&mut r.message()?)?),
            (2, WIRE_BYTES) => body.memo = r.string()?,
            (3, WIRE_VARINT) => body.timeout_height = r.uint64()?,
            (4, WIRE_VARINT) => body.unordered = r.bool()?,
            (5, WIRE_BYTES) => {
                body.timeout_timestamp = Some(decode_timestamp(&mut r.message()?)?)
            }
            (1023, WIRE_BYTES) => body.extension_options.push(decode_any(&mut r.message()?)?),
            (2047, WIRE_BYTES) => body
                .non_critical_extension_options
                .push(decode_any(&mut r.message()?)?),
            _ => return Ok(false),
        }
        Ok(true)
    })?;
    Ok(body)
}

pub fn decode_auth_info(bytes: &[u8]) -> DecodeResult<AuthInfo> {
    let mut reader = BinaryReader::new(bytes);
    let mut auth = AuthInfo::default();
    decode_fields(&mut reader, |r, key| {
        match key {
            (1, WIRE_BYTES) => auth.signer_infos.push(decode_signer_info(&mut r.message()?)?),
            (2, WIRE_BYTES) => auth.fee = Some(decode_fee(&mut r.message()?)?),
            (3, WIRE_BYTES) => auth.tip = Some(decode_tip(&mut r.message()?)?),
            _ => return Ok(false),
        }
        Ok(true)
    })?;
    Ok(auth)
}

fn decode_any(reader: &mut BinaryReader<'_>) -> DecodeResult<ProtoAny> {
    let mut any = ProtoAny::default();
    decode_fields(reader, |r, key| {
        match key {
            (1, WIRE_BYTES) => any.type_url = r.string()?,
            (2, WIRE_BYTES) => any.value = r.bytes()?.to_vec(),
            _ => return Ok(false),
        }
        Ok(true)
    })?;
    Ok(any)
}

fn decode_timestamp(reader: &mut BinaryReader<'_>) -> DecodeResult<Timestamp> {
    let mut ts = Timestamp::default();
    decode_fields(reader, |r, key| {
        match key {
            (1, WIRE_VARINT) => ts.seconds = r.int64()?,
            (2, WIRE_VARINT) => ts.nanos = r.int32()?,
            _ => return Ok(false),
        }
        Ok(true)
    })?;
    Ok(ts)
}

fn decode_coin(reader: &mut BinaryReader<'_>) -> DecodeResult<CoinAmount> {
    let mut coin = CoinAmount::default();
    decode_fields(reader, |r, key| {
        match key {
            (1, WIRE_BYTES) => coin.denom = r.string()?,
            (2, WIRE_BYTES) => coin.amount = r.string()?,
            _ => return Ok(false),
        }
        Ok(true)
    })?;
    Ok(coin)
}

fn decode_signer_info(reader: &mut BinaryReader<'_>) -> DecodeResult<SignerInfo> {
    let mut info = SignerInfo::default();
    decode_fields(reader, |r, key| {
        match key {
            (1, WIRE_BYTES) => info.public_key = Some(decode_any(&mut r.message()?)?),
            (2, WIRE_BYTES) => info.mode_info = Some(decode_mode_info(&mut r.message()?, 0)?),
            (3, WIRE_VARINT) => info.sequence = r.uint64()?,
            _ => return Ok(false),
        }
        Ok(true)
    })?;
    Ok(info)
}

/// `depth` counts the multisig levels above this one
fn decode_mode_info(reader: &mut BinaryReader<'_>, depth: usize) -> DecodeResult<ModeInfo> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(DecodeError::RecursionLimit {
            offset: reader.offset(),
        });
    }
    let mut info = ModeInfo::default();
    decode_fields(reader, |r, key| {
        match key {
            (1, WIRE_BYTES) => info.single = Some(decode_mode_single(&mut r.message()?)?),
            (2, WIRE_BYTES) => info.multi = Some(decode_mode_multi(&mut r.message()?, depth)?),
            _ => return Ok(false),
        }
        Ok(true)
    })?;
    Ok(info)
}

fn decode_mode_single(reader: &mut BinaryReader<'_>) -> DecodeResult<SignMode> {
    let mut mode = SignMode::Unspecified;
    decode_fields(reader, |r, key| {
        match key {
            (1, WIRE_VARINT) => mode = SignMode::from_wire(r.int32()?),
            _ => return Ok(false),
        }
        Ok(true)
    })?;
    Ok(mode)
}

fn decode_mode_multi(
    reader: &mut BinaryReader<'_>,
    depth: usize,
) -> DecodeResult<ModeInfoMulti> {
    let mut multi = ModeInfoMulti::default();
    decode_fields(reader, |r, key| {
        match key {
            (1, WIRE_BYTES) => multi.bitarray = Some(decode_bit_array(&mut r.message()?)?),
            (2, WIRE_BYTES) => multi
                .mode_infos
                .push(decode_mode_info(&mut r.message()?, depth + 1)?),
            _ => return Ok(false),
        }
        Ok(true)
    })?;
    Ok(multi)
}

fn decode_bit_array(reader: &mut BinaryReader<'_>) -> DecodeResult<CompactBitArray> {
    let mut bits = CompactBitArray::default();
    decode_fields(reader, |r, key| {
        match key {
            (1, WIRE_VARINT) => bits.extra_bits_stored = r.uint32()?,
            (2, WIRE_BYTES) => bits.elems = r.bytes()?.to_vec(),
            _ => return Ok(false),
        }
        Ok(true)
    })?;
    Ok(bits)
}

fn decode_fee(reader: &mut BinaryReader<'_>) -> DecodeResult<AuthInfoFee> {
    let mut fee = AuthInfoFee::default();
    decode_fields(reader, |r, key| {
        match key {
            (1, WIRE_BYTES) => fee.amount.push(decode_coin(&mut r.message()?)?),
            (2, WIRE_VARINT) => fee.gas_limit = r.uint64()?,
            (3, WIRE_BYTES) => fee.payer = r.string()?,
            (4, WIRE_BYTES) => fee.granter = r.string()?,
            _ => return Ok(false),
        }
        Ok(true)
    })?;
    Ok(fee)
}

fn decode_tip(reader: &mut BinaryReader<'_>) -> DecodeResult<Tip> {
    let mut tip = Tip::default();
    decode_fields(reader, |r, key| {
        match key {
            (1, WIRE_BYTES) => tip.amount.push(decode_coin(&mut r.message()?)?),
            (2, WIRE_BYTES) => tip.tipper = r.string()?,
            _ => return Ok(false),
        }
        Ok(true)
    })?;
    Ok(tip)
}
