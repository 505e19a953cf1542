//! Address family descriptor shared by both address widths.

use crate::converters::{ipv4, ipv6};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An IP address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    /// 32-bit IPv4.
    V4,
    /// 128-bit IPv6.
    V6,
}

impl Family {
    /// Number of bits in an address, also the maximum prefix length.
    #[inline]
    pub const fn width(self) -> u8 {
        match self {
            Self::V4 => 32,
            Self::V6 => 128,
        }
    }

    /// Largest address value.
    #[inline]
    pub const fn max(self) -> u128 {
        match self {
            Self::V4 => u32::MAX as u128,
            Self::V6 => u128::MAX,
        }
    }

    pub(crate) const fn address_label(self) -> &'static str {
        match self {
            Self::V4 => "IPv4 address",
            Self::V6 => "IPv6 address",
        }
    }

    /// Canonical text of an in-range value.
    pub(crate) fn render(self, bits: u128) -> String {
        match self {
            Self::V4 => ipv4::int_to_address(bits as u32),
            Self::V6 => ipv6::int_to_address(bits),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}
