//! Network value type with subnetting, containment and sparse host indexing.
//!
//! A [`Network`] is an address plus a prefix length with no host bits set.
//! All arithmetic is done on `u128`, which holds either family; values that
//! leave the family range are never produced.

use super::address::{IpAddress, Ipv4Address, Ipv6Address};
use crate::error::{NetError, NetResult};
use crate::validators::{
    hostmask_bits, netmask_bits, split_cidr, validate_network_bits, validate_prefix_len,
    validate_prefix_str,
};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::str::FromStr;

/// An IPv4 network.
pub type Ipv4Network = Network<Ipv4Address>;
/// An IPv6 network.
pub type Ipv6Network = Network<Ipv6Address>;

/// A validated network: address and prefix length, host bits clear.
///
/// Ordering is by network address, then prefix length, so a shorter prefix
/// (larger network) sorts before a longer one at the same address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Network<A: IpAddress> {
    address: A,
    prefix_len: u8,
}

impl<A: IpAddress> Network<A> {
    /// Create a network, rejecting prefixes beyond the family width and set host bits.
    pub fn new(address: A, prefix_len: u8) -> NetResult<Self> {
        validate_network_bits(A::FAMILY, address.to_bits(), prefix_len)?;
        Ok(Self {
            address,
            prefix_len,
        })
    }

    /// Create a network from an integer network address.
    pub fn from_bits(bits: u128, prefix_len: u8) -> NetResult<Self> {
        validate_network_bits(A::FAMILY, bits, prefix_len)?;
        Ok(Self {
            address: A::from_bits_unchecked(bits),
            prefix_len,
        })
    }

    /// The single-host network containing only `address`.
    pub fn from_address(address: A) -> Self {
        Self {
            address,
            prefix_len: A::FAMILY.width(),
        }
    }

    /// Parse either CIDR text or a bare address (as a host network).
    ///
    /// Parsers are tried in order; if none succeeds the last failure is kept
    /// as the error source.
    pub fn parse(s: &str) -> NetResult<Self> {
        let parsers: [fn(&str) -> NetResult<Self>; 2] = [
            |s| s.parse(),
            |s| s.parse::<A>().map(Self::from_address),
        ];

        let mut last = None;
        for parser in parsers {
            match parser(s) {
                Ok(network) => return Ok(network),
                Err(e) => last = Some(e),
            }
        }

        Err(NetError::Unparseable {
            input: s.to_string(),
            last: Box::new(last.unwrap_or_else(|| NetError::MissingPrefix(s.to_string()))),
        })
    }

    /// The network address.
    #[inline]
    pub fn network_address(&self) -> A {
        self.address
    }

    /// The prefix length.
    #[inline]
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// `(network address as integer, prefix length)`.
    pub fn as_tuple(&self) -> (u128, u8) {
        (self.address.to_bits(), self.prefix_len)
    }

    /// The netmask as an address.
    pub fn netmask(&self) -> A {
        A::from_bits_unchecked(netmask_bits(A::FAMILY, self.prefix_len))
    }

    /// The hostmask (inverted netmask) as an address.
    pub fn hostmask(&self) -> A {
        A::from_bits_unchecked(self.hostmask_bits())
    }

    /// The highest address in the block.
    pub fn last_address(&self) -> A {
        A::from_bits_unchecked(self.last_bits())
    }

    /// The broadcast address; for IPv6 this is the last address of the block.
    pub fn broadcast(&self) -> A {
        self.last_address()
    }

    /// Number of addresses in the block.
    ///
    /// `None` only for the IPv6 `/0` block, whose 2^128 addresses do not fit.
    pub fn num_addresses(&self) -> Option<u128> {
        self.hostmask_bits().checked_add(1)
    }

    /// Iterate over subnets of `new_prefix` (default: one bit longer).
    ///
    /// Fails if the new prefix is not longer than this one or exceeds the
    /// family width. The returned iterator is lazy.
    pub fn subnets(&self, new_prefix: Option<u8>) -> NetResult<Subnets<A>> {
        let width = A::FAMILY.width();
        let new_prefix = match new_prefix {
            Some(prefix) => u32::from(prefix),
            None => u32::from(self.prefix_len) + 1,
        };
        let new_prefix = validate_prefix_len(new_prefix, self.prefix_len + 1, width)?;

        // new_prefix > 0, so the shift is at most width - 1
        let step = 1u128 << (width - new_prefix);
        Ok(Subnets {
            next: Some(self.address.to_bits()),
            last: self.last_bits() - (step - 1),
            step,
            prefix_len: new_prefix,
            _family: PhantomData,
        })
    }

    /// The enclosing network of `new_prefix` (default: one bit shorter).
    pub fn supernet(&self, new_prefix: Option<u8>) -> NetResult<Self> {
        if self.prefix_len == 0 {
            return Err(NetError::NoSupernet(self.to_string()));
        }

        let new_prefix = new_prefix.unwrap_or(self.prefix_len - 1);
        let new_prefix = validate_prefix_len(u32::from(new_prefix), 0, self.prefix_len - 1)?;

        let bits = self.address.to_bits() & netmask_bits(A::FAMILY, new_prefix);
        Ok(Self {
            address: A::from_bits_unchecked(bits),
            prefix_len: new_prefix,
        })
    }

    /// Check whether `address` lies within this block.
    pub fn contains_address(&self, address: A) -> bool {
        let bits = address.to_bits();
        self.address.to_bits() <= bits && bits <= self.last_bits()
    }

    /// Check whether `other` is a strictly smaller network inside this one.
    pub fn contains_subnet(&self, other: &Self) -> bool {
        other.prefix_len > self.prefix_len && self.contains_address(other.address)
    }

    /// Iterate over usable host addresses.
    ///
    /// For IPv4 prefixes up to /30 the network and broadcast addresses are
    /// skipped; /31 yields both addresses and /32 the single one. IPv6
    /// yields every address in the block.
    pub fn hosts(&self) -> Hosts<A> {
        Hosts {
            next: Some(self.first_host_bits()),
            last: self.last_host_bits(),
            _family: PhantomData,
        }
    }

    /// The first address [`hosts`](Self::hosts) yields.
    pub fn first_host(&self) -> A {
        A::from_bits_unchecked(self.first_host_bits())
    }

    /// The last address [`hosts`](Self::hosts) yields.
    pub fn last_host(&self) -> A {
        A::from_bits_unchecked(self.last_host_bits())
    }

    /// The address at position `index` in the block, without enumeration.
    ///
    /// Non-negative indices count from the network address; negative ones
    /// from the end, so `-1` is the last address. Every position of an IPv6
    /// `/0` is reachable: those above `i128::MAX` through negative indices.
    pub fn host_at(&self, index: i128) -> NetResult<A> {
        let hostmask = self.hostmask_bits();
        let out_of_range = || NetError::IndexOutOfRange {
            index,
            network: self.to_string(),
        };

        let offset = if index >= 0 {
            let offset = index.unsigned_abs();
            if offset > hostmask {
                return Err(out_of_range());
            }
            offset
        } else {
            // -1 maps to hostmask, -(count) maps to 0
            let back = index.unsigned_abs() - 1;
            if back > hostmask {
                return Err(out_of_range());
            }
            hostmask - back
        };

        Ok(A::from_bits_unchecked(self.address.to_bits() + offset))
    }

    fn hostmask_bits(&self) -> u128 {
        hostmask_bits(A::FAMILY, self.prefix_len)
    }

    fn last_bits(&self) -> u128 {
        self.address.to_bits() | self.hostmask_bits()
    }

    fn has_broadcast(&self) -> bool {
        A::HAS_BROADCAST && A::FAMILY.width() - self.prefix_len >= 2
    }

    fn first_host_bits(&self) -> u128 {
        let first = self.address.to_bits();
        if self.has_broadcast() {
            first + 1
        } else {
            first
        }
    }

    fn last_host_bits(&self) -> u128 {
        let last = self.last_bits();
        if self.has_broadcast() {
            last - 1
        } else {
            last
        }
    }
}

impl<A: IpAddress> FromStr for Network<A> {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, prefix) = split_cidr(s)?;
        let address: A = addr.parse()?;
        let prefix_len = validate_prefix_str(prefix, A::FAMILY)?;
        Self::new(address, prefix_len)
    }
}

impl<A: IpAddress> fmt::Display for Network<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

impl<A: IpAddress> Serialize for Network<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, A: IpAddress> Deserialize<'de> for Network<A> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Lazy iterator over equally sized subnets, in increasing address order.
///
/// Created by [`Network::subnets`].
#[derive(Debug, Clone)]
pub struct Subnets<A: IpAddress> {
    next: Option<u128>,
    last: u128,
    step: u128,
    prefix_len: u8,
    _family: PhantomData<A>,
}

impl<A: IpAddress> Iterator for Subnets<A> {
    type Item = Network<A>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current >= self.last {
            None
        } else {
            Some(current + self.step)
        };

        Some(Network {
            address: A::from_bits_unchecked(current),
            prefix_len: self.prefix_len,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        remaining_hint(self.next.map(|next| (self.last - next) / self.step))
    }
}

impl<A: IpAddress> FusedIterator for Subnets<A> {}

/// Lazy iterator over host addresses of a network.
///
/// Created by [`Network::hosts`].
#[derive(Debug, Clone)]
pub struct Hosts<A: IpAddress> {
    next: Option<u128>,
    last: u128,
    _family: PhantomData<A>,
}

impl<A: IpAddress> Iterator for Hosts<A> {
    type Item = A;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current >= self.last {
            None
        } else {
            Some(current + 1)
        };
        Some(A::from_bits_unchecked(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        remaining_hint(self.next.map(|next| self.last - next))
    }
}

impl<A: IpAddress> FusedIterator for Hosts<A> {}

/// Size hint from the number of items left after the next one.
fn remaining_hint(after_next: Option<u128>) -> (usize, Option<usize>) {
    match after_next {
        None => (0, Some(0)),
        Some(after) => match after.checked_add(1).map(usize::try_from) {
            Some(Ok(n)) => (n, Some(n)),
            _ => (usize::MAX, None),
        },
    }
}
