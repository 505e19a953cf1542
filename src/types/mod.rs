//! Core value types.
//!
//! Every type here is immutable once constructed and validates its input,
//! so holding a value is proof that it is well-formed.

mod address;
mod asn;
mod family;
mod interface;
mod network;
mod vlan;

pub use address::{IpAddress, Ipv4Address, Ipv6Address};
pub use asn::Asn;
pub use family::Family;
pub use interface::{Interface, Ipv4Interface, Ipv6Interface};
pub use network::{Hosts, Ipv4Network, Ipv6Network, Network, Subnets};
pub use vlan::Vid;

mod sealed {
    /// Crate-internal constructor shared by the address types.
    pub trait Sealed {
        /// Build from bits already known to fit the family.
        fn from_bits_unchecked(bits: u128) -> Self;
    }
}
