//! Interface value type: a host address on a particular network.

use super::address::{IpAddress, Ipv4Address, Ipv6Address};
use super::network::Network;
use crate::error::{NetError, NetResult};
use crate::validators::{netmask_bits, split_cidr, validate_prefix_len, validate_prefix_str};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An IPv4 interface.
pub type Ipv4Interface = Interface<Ipv4Address>;
/// An IPv6 interface.
pub type Ipv6Interface = Interface<Ipv6Address>;

/// An address paired with the network it lives on.
///
/// Text such as `10.1.2.3/24` keeps the host bits in the address and masks
/// them off for the network, so `10.1.2.3/24` belongs to `10.1.2.0/24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interface<A: IpAddress> {
    address: A,
    network: Network<A>,
}

impl<A: IpAddress> Interface<A> {
    /// Create an interface, deriving the network by masking `address`.
    pub fn new(address: A, prefix_len: u8) -> NetResult<Self> {
        let prefix_len = validate_prefix_len(u32::from(prefix_len), 0, A::FAMILY.width())?;
        let bits = address.to_bits() & netmask_bits(A::FAMILY, prefix_len);
        Ok(Self {
            address,
            network: Network::from_bits(bits, prefix_len)?,
        })
    }

    /// Create an interface from address text and a prefix length.
    pub fn from_simple(address: &str, prefix_len: u8) -> NetResult<Self> {
        Self::new(address.parse()?, prefix_len)
    }

    /// Create an interface from an address and an explicit network.
    ///
    /// Fails if the network does not contain the address.
    pub fn from_objects(address: A, network: Network<A>) -> NetResult<Self> {
        if !network.contains_address(address) {
            return Err(NetError::NotContained {
                address: address.to_string(),
                network: network.to_string(),
            });
        }
        Ok(Self { address, network })
    }

    /// The host address.
    pub fn address(&self) -> A {
        self.address
    }

    /// The network the address belongs to.
    pub fn network(&self) -> Network<A> {
        self.network
    }

    /// The prefix length of the network.
    pub fn prefix_len(&self) -> u8 {
        self.network.prefix_len()
    }

    /// `(address, network)`.
    pub fn as_tuple(&self) -> (A, Network<A>) {
        (self.address, self.network)
    }
}

impl<A: IpAddress> FromStr for Interface<A> {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, prefix) = split_cidr(s)?;
        let address: A = addr.parse()?;
        Self::new(address, validate_prefix_str(prefix, A::FAMILY)?)
    }
}

impl<A: IpAddress> fmt::Display for Interface<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.network.prefix_len())
    }
}

impl<A: IpAddress> Serialize for Interface<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, A: IpAddress> Deserialize<'de> for Interface<A> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
