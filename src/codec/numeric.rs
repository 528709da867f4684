//! Decimal-string forms of arbitrary precision numbers

use bigdecimal::BigDecimal;
use num_bigint::BigUint;
use std::str::FromStr;

use crate::errors::{MappingError, MappingResult};

/// Parse an unsigned integer carried as a base-10 string.
///
/// Only plain ASCII digits are accepted: no sign, separators or whitespace.
pub fn parse_big_uint(field: &'static str, value: &str) -> MappingResult<BigUint> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(field, value));
    }
    BigUint::from_str(value).map_err(|_| invalid(field, value))
}

/// Largest decimal scale, in either direction, carried on the wire
pub const MAX_DECIMAL_SCALE: i64 = 1_000;

/// Parse a decimal amount. Exponents pushing the scale past
/// [`MAX_DECIMAL_SCALE`] are rejected.
pub fn parse_decimal(field: &'static str, value: &str) -> MappingResult<BigDecimal> {
    if value.trim().is_empty() {
        return Err(invalid(field, value));
    }
    let decimal = BigDecimal::from_str(value).map_err(|_| invalid(field, value))?;
    if !within_scale(&decimal) {
        return Err(invalid(field, value));
    }
    Ok(decimal)
}

/// Wire form of a decimal amount
pub fn decimal_to_wire(field: &'static str, value: &BigDecimal) -> MappingResult<String> {
    if !within_scale(value) {
        return Err(MappingError::OutOfRange {
            field,
            value: value.to_string(),
        });
    }
    Ok(plain_string(value))
}

fn within_scale(value: &BigDecimal) -> bool {
    let (_, scale) = value.as_bigint_and_exponent();
    scale.unsigned_abs() <= MAX_DECIMAL_SCALE as u64
}

/// Render a decimal without exponent notation, keeping its scale
/// (`1.50` stays `1.50`, `1E+3` becomes `1000`). Values with a scale past
/// [`MAX_DECIMAL_SCALE`] keep their exponent form.
pub fn plain_string(value: &BigDecimal) -> String {
    if !within_scale(value) {
        return value.to_string();
    }
    let (digits, scale) = value.as_bigint_and_exponent();
    if scale <= 0 {
        let mut out = digits.to_string();
        if digits.bits() != 0 {
            out.push_str(&"0".repeat(scale.unsigned_abs() as usize));
        }
        return out;
    }

    let negative = digits.sign() == num_bigint::Sign::Minus;
    let mut magnitude = digits.magnitude().to_string();
    let scale = scale as usize;
    if magnitude.len() <= scale {
        magnitude = format!("{}{}", "0".repeat(scale - magnitude.len() + 1), magnitude);
    }
    let (whole, fraction) = magnitude.split_at(magnitude.len() - scale);
    format!("{}{}.{}", if negative { "-" } else { "" }, whole, fraction)
}

/// Token precision travels as a signed 32-bit field
pub fn decimals_to_wire(decimals: u32) -> MappingResult<i32> {
    i32::try_from(decimals).map_err(|_| MappingError::OutOfRange {
        field: "decimals",
        value: decimals.to_string(),
    })
}

pub fn decimals_from_wire(decimals: i32) -> MappingResult<u32> {
    u32::try_from(decimals).map_err(|_| MappingError::OutOfRange {
        field: "decimals",
        value: decimals.to_string(),
    })
}

fn invalid(field: &'static str, value: &str) -> MappingError {
    MappingError::InvalidNumeric {
        field,
        value: value.to_string(),
    }
}
