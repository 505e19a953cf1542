//! Validation primitives.
//!
//! Each function checks a single textual or numeric component against its
//! closed range and returns the parsed value, or a typed [`NetError`].

use crate::error::{NetError, NetResult};
use crate::types::Family;

/// Validate a decimal IPv4 octet (`0`-`255`, no redundant leading zeros).
pub fn validate_octet(s: &str) -> NetResult<u8> {
    let invalid = || NetError::InvalidComponent {
        component: "IPv4 octet",
        input: s.to_string(),
    };

    if s.is_empty() || s.len() > 3 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if s.len() > 1 && s.starts_with('0') {
        return Err(invalid());
    }

    s.parse::<u8>().map_err(|_| invalid())
}

/// Validate an IPv6 group: 1-4 hex digits, case-insensitive.
pub fn validate_group(s: &str) -> NetResult<u16> {
    if s.is_empty() || s.len() > 4 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(NetError::InvalidComponent {
            component: "IPv6 group",
            input: s.to_string(),
        });
    }

    u16::from_str_radix(s, 16).map_err(|_| NetError::InvalidComponent {
        component: "IPv6 group",
        input: s.to_string(),
    })
}

/// Validate a numeric prefix length against an inclusive range.
pub fn validate_prefix_len(prefix: u32, min: u8, max: u8) -> NetResult<u8> {
    if prefix < u32::from(min) || prefix > u32::from(max) {
        return Err(NetError::PrefixOutOfRange {
            prefix,
            min: u32::from(min),
            max: u32::from(max),
        });
    }
    // in range implies it fits
    Ok(prefix as u8)
}

/// Validate a textual prefix length for the given family.
pub fn validate_prefix_str(s: &str, family: Family) -> NetResult<u8> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NetError::InvalidPrefix(s.to_string()));
    }

    let prefix: u32 = s
        .parse()
        .map_err(|_| NetError::InvalidPrefix(s.to_string()))?;
    validate_prefix_len(prefix, 0, family.width())
}

/// Validate that an integer fits the family's address space.
pub fn validate_address_bits(family: Family, bits: u128) -> NetResult<u128> {
    if bits > family.max() {
        return Err(NetError::OutOfRange {
            what: family.address_label(),
            value: bits,
            min: 0,
            max: family.max(),
        });
    }
    Ok(bits)
}

/// Validate that `bits` has no host bits set under `prefix`.
pub fn validate_network_bits(family: Family, bits: u128, prefix: u8) -> NetResult<()> {
    validate_address_bits(family, bits)?;
    validate_prefix_len(u32::from(prefix), 0, family.width())?;

    if bits & netmask_bits(family, prefix) != bits {
        return Err(NetError::HostBitsSet(format!(
            "{}/{}",
            family.render(bits),
            prefix
        )));
    }
    Ok(())
}

/// Split `addr/prefix` text into its two halves.
pub fn split_cidr(s: &str) -> NetResult<(&str, &str)> {
    s.split_once('/')
        .ok_or_else(|| NetError::MissingPrefix(s.to_string()))
}

/// Netmask for `prefix` within the family's width.
///
/// `prefix` must already be validated against the family width.
pub fn netmask_bits(family: Family, prefix: u8) -> u128 {
    family.max() ^ hostmask_bits(family, prefix)
}

/// Hostmask for `prefix` within the family's width.
pub fn hostmask_bits(family: Family, prefix: u8) -> u128 {
    family.max().checked_shr(u32::from(prefix)).unwrap_or(0)
}
