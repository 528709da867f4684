use thiserror::Error;

/// Payload invariant violations and missing required input fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Chain {chain} expects {expected} chain-specific data, got {actual}")]
    SpecificMismatch {
        chain: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Chain {chain} is not UTXO based but carries {count} utxos")]
    UnexpectedUtxos { chain: String, count: usize },

    #[error("Invalid public key hex: {0}")]
    InvalidPublicKey(String),

    #[error("Invalid swap payload: {0}")]
    InvalidSwap(String),

    #[error("Invalid approve payload: {0}")]
    InvalidApprove(String),
}

/// Failures while mapping a wire message back into the payload model.
#[derive(Error, Debug)]
pub enum MappingError {
    #[error("Expected exactly one chain-specific field, found [{}]", populated.join(", "))]
    AmbiguousOrMissingSpecific { populated: Vec<&'static str> },

    #[error("Field {field} is not a valid decimal number: {value:?}")]
    InvalidNumeric { field: &'static str, value: String },

    #[error("Field {field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: String },

    #[error("Missing required wire field: {0}")]
    MissingField(&'static str),

    #[error("Unknown chain: {0}")]
    UnknownChain(String),

    #[error("Unknown signing library: {0}")]
    UnknownLibType(String),

    #[error("Unknown transaction type: {0}")]
    UnknownTransactionType(i32),

    #[error("Payload failed validation: {0}")]
    Validation(#[from] ValidationError),

    #[error("Protobuf decode error: {0}")]
    Decode(#[from] prost::DecodeError),
}

/// Failures of the minimal protobuf reader. Offsets are byte positions in
/// the buffer being decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed varint at offset {offset}")]
    MalformedVarint { offset: usize },

    #[error("Unexpected end of buffer at offset {offset}: needed {needed} bytes, {available} available")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Unsupported wire type {wire_type} at offset {offset}")]
    UnsupportedWireType { wire_type: u32, offset: usize },

    #[error("Nesting too deep at offset {offset}")]
    RecursionLimit { offset: usize },

    #[error("End group for field {found} at offset {offset} closes group {expected}")]
    UnmatchedEndGroup {
        offset: usize,
        expected: u32,
        found: u32,
    },

    #[error("Invalid UTF-8 string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("Invalid base64 in {field}")]
    InvalidBase64 { field: &'static str },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Transport level failures inside the status tracker. These never cross
/// `check_status`; they are downgraded to `TransactionResult::NotFound`.
#[derive(Error, Debug)]
pub enum StatusError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("No endpoint configured for {0}")]
    MissingEndpoint(String),
}

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
pub type MappingResult<T> = std::result::Result<T, MappingError>;
