//! IPv4 and IPv6 address value types.
//!
//! Both wrap a validated integer. Ordering, equality and hashing follow the
//! integer value; the canonical string is rendered on demand.

use super::family::Family;
use super::sealed::Sealed;
use crate::converters::{ipv4, ipv6};
use crate::error::{NetError, NetResult};
use crate::validators::{split_cidr, validate_address_bits, validate_prefix_str};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::Hash;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Behaviour shared by [`Ipv4Address`] and [`Ipv6Address`].
///
/// The trait is sealed; it exists so that networks, interfaces and pools can
/// be written once for both families.
pub trait IpAddress:
    Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + FromStr<Err = NetError> + Sealed
{
    /// The family this address belongs to.
    const FAMILY: Family;

    /// Whether the last address of a block is a broadcast address.
    const HAS_BROADCAST: bool;

    /// The address as an unsigned integer.
    fn to_bits(self) -> u128;

    /// Build an address from an integer, checking the family range.
    fn from_bits(bits: u128) -> NetResult<Self> {
        validate_address_bits(Self::FAMILY, bits).map(Self::from_bits_unchecked)
    }

    /// The address in CIDR notation with the maximal prefix length.
    fn cidr(self) -> String {
        format!("{}/{}", self, Self::FAMILY.width())
    }
}

/// Parse `addr/prefix` text where the prefix must denote a single host.
fn host_from_cidr<A: IpAddress>(s: &str) -> NetResult<A> {
    let (addr, prefix) = split_cidr(s)?;
    let width = A::FAMILY.width();

    let prefix = validate_prefix_str(prefix, A::FAMILY).map_err(|_| NetError::NotHostPrefix {
        input: s.to_string(),
        expected: width,
    })?;
    if prefix != width {
        return Err(NetError::NotHostPrefix {
            input: s.to_string(),
            expected: width,
        });
    }

    addr.parse()
}

/// A validated IPv4 address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ipv4Address(u32);

impl Ipv4Address {
    /// Create an address from its integer value.
    #[inline]
    pub const fn from_u32(value: u32) -> Self {
        Self(value)
    }

    /// Parse an address arriving in CIDR notation; the prefix must be `/32`.
    pub fn from_cidr(s: &str) -> NetResult<Self> {
        host_from_cidr(s)
    }

    /// Get the raw integer value.
    #[inline]
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// Check if this is the unspecified address (0.0.0.0).
    pub const fn is_unspecified(self) -> bool {
        self.0 == 0
    }

    /// Check if this is a loopback address (127.0.0.0/8).
    pub const fn is_loopback(self) -> bool {
        self.0 >> 24 == 127
    }

    /// Check if this is an RFC 1918 private address.
    pub const fn is_private(self) -> bool {
        self.0 >> 24 == 10 || self.0 >> 20 == 0xAC1 || self.0 >> 16 == 0xC0A8
    }

    /// Check if this is a multicast address (224.0.0.0/4).
    pub const fn is_multicast(self) -> bool {
        self.0 >> 28 == 0xE
    }
}

impl Sealed for Ipv4Address {
    fn from_bits_unchecked(bits: u128) -> Self {
        Self(bits as u32)
    }
}

impl IpAddress for Ipv4Address {
    const FAMILY: Family = Family::V4;
    const HAS_BROADCAST: bool = true;

    fn to_bits(self) -> u128 {
        u128::from(self.0)
    }
}

impl FromStr for Ipv4Address {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ipv4::address_to_int(s).map(Self)
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ipv4::int_to_address(self.0))
    }
}

impl From<u32> for Ipv4Address {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Ipv4Address> for u32 {
    fn from(addr: Ipv4Address) -> Self {
        addr.0
    }
}

impl From<Ipv4Addr> for Ipv4Address {
    fn from(addr: Ipv4Addr) -> Self {
        Self(u32::from(addr))
    }
}

impl From<Ipv4Address> for Ipv4Addr {
    fn from(addr: Ipv4Address) -> Self {
        Ipv4Addr::from(addr.0)
    }
}

/// A validated IPv6 address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ipv6Address(u128);

impl Ipv6Address {
    /// Create an address from its integer value.
    #[inline]
    pub const fn from_u128(value: u128) -> Self {
        Self(value)
    }

    /// Parse an address arriving in CIDR notation; the prefix must be `/128`.
    pub fn from_cidr(s: &str) -> NetResult<Self> {
        host_from_cidr(s)
    }

    /// Get the raw integer value.
    #[inline]
    pub const fn to_u128(self) -> u128 {
        self.0
    }

    /// Canonical compressed text, same as `Display`.
    pub fn compressed(self) -> String {
        ipv6::int_to_address(self.0)
    }

    /// Full eight-group text without compression.
    pub fn expanded(self) -> String {
        ipv6::int_to_expanded(self.0)
    }

    /// Check if this is a multicast address (ff00::/8).
    pub const fn is_multicast(self) -> bool {
        self.0 >> 120 == 0xFF
    }

    /// Check if this is a link-local address (fe80::/10).
    pub const fn is_link_local(self) -> bool {
        self.0 >> 118 == 0x3FA
    }

    /// Check if this is the loopback address (::1).
    pub const fn is_loopback(self) -> bool {
        self.0 == 1
    }

    /// Check if this is the unspecified address (::).
    pub const fn is_unspecified(self) -> bool {
        self.0 == 0
    }

    /// Check if this is a unique local address (fc00::/7).
    pub const fn is_private(self) -> bool {
        self.0 >> 121 == 0x7E
    }

    /// Check if this is none of the special-purpose ranges above.
    pub const fn is_global(self) -> bool {
        !(self.is_multicast()
            || self.is_link_local()
            || self.is_loopback()
            || self.is_unspecified()
            || self.is_private())
    }
}

impl Sealed for Ipv6Address {
    fn from_bits_unchecked(bits: u128) -> Self {
        Self(bits)
    }
}

impl IpAddress for Ipv6Address {
    const FAMILY: Family = Family::V6;
    const HAS_BROADCAST: bool = false;

    fn to_bits(self) -> u128 {
        self.0
    }
}

impl FromStr for Ipv6Address {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ipv6::address_to_int(s).map(Self)
    }
}

impl fmt::Display for Ipv6Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ipv6::int_to_address(self.0))
    }
}

impl From<u128> for Ipv6Address {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<Ipv6Address> for u128 {
    fn from(addr: Ipv6Address) -> Self {
        addr.0
    }
}

impl From<Ipv6Addr> for Ipv6Address {
    fn from(addr: Ipv6Addr) -> Self {
        Self(u128::from(addr))
    }
}

impl From<Ipv6Address> for Ipv6Addr {
    fn from(addr: Ipv6Address) -> Self {
        Ipv6Addr::from(addr.0)
    }
}

macro_rules! string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(de::Error::custom)
            }
        }
    };
}

string_serde!(Ipv4Address);
string_serde!(Ipv6Address);
