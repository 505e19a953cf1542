//! Dotted-quad ⇄ 32-bit integer.

use crate::error::{NetError, NetResult};
use crate::types::Family;
use crate::validators::validate_octet;

const OCTETS: usize = 4;

/// Parse a dotted-quad address into its big-endian integer value.
pub fn address_to_int(s: &str) -> NetResult<u32> {
    let mut parts = s.split('.');
    let mut value = 0u32;

    for _ in 0..OCTETS {
        let part = parts.next().ok_or_else(|| NetError::InvalidAddress {
            family: Family::V4,
            input: s.to_string(),
            reason: "expected four octets",
        })?;
        value = (value << 8) | u32::from(validate_octet(part)?);
    }

    if parts.next().is_some() {
        return Err(NetError::InvalidAddress {
            family: Family::V4,
            input: s.to_string(),
            reason: "expected four octets",
        });
    }

    Ok(value)
}

/// Render a 32-bit integer as a dotted quad.
pub fn int_to_address(value: u32) -> String {
    let [a, b, c, d] = value.to_be_bytes();
    format!("{a}.{b}.{c}.{d}")
}
