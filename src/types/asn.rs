//! BGP autonomous system number in asplain form.

use crate::error::NetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 32-bit BGP AS number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Asn(u32);

impl Asn {
    /// Largest two-byte AS number.
    pub const TWO_BYTE_MAX: u32 = 65535;

    /// Create an AS number.
    #[inline]
    pub const fn new(asn: u32) -> Self {
        Self(asn)
    }

    /// Get the asplain value.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Check if this number fits the original two-byte space.
    pub const fn is_two_byte(self) -> bool {
        self.0 <= Self::TWO_BYTE_MAX
    }

    /// Check if this is a private-use AS number (RFC 6996).
    pub const fn is_private(self) -> bool {
        matches!(self.0, 64_512..=65_534 | 4_200_000_000..=4_294_967_294)
    }
}

impl fmt::Display for Asn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Asn {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Asn> for u32 {
    fn from(asn: Asn) -> Self {
        asn.0
    }
}

impl TryFrom<u64> for Asn {
    type Error = NetError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        u32::try_from(value).map(Self).map_err(|_| NetError::OutOfRange {
            what: "AS number",
            value: u128::from(value),
            min: 0,
            max: u128::from(u32::MAX),
        })
    }
}

impl FromStr for Asn {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NetError::InvalidNumber {
                what: "AS number",
                input: s.to_string(),
            });
        }
        // digits only, so a failed parse can only be overflow
        let value: u128 = s.parse().unwrap_or(u128::MAX);
        u32::try_from(value).map(Self).map_err(|_| NetError::OutOfRange {
            what: "AS number",
            value,
            min: 0,
            max: u128::from(u32::MAX),
        })
    }
}
