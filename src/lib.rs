//! # netsome - Network Value Types and Resource Pools
//!
//! netsome models IPv4/IPv6 addresses, networks and interfaces as validated,
//! immutable value types, and hands out ordered resources (VLAN IDs, AS
//! numbers, addresses) from bounded pools.
//!
//! ## Features
//!
//! - **Strict Parsing**: Dotted-quad and RFC 5952 text forms, CIDR notation
//! - **Canonical Output**: Compressed IPv6 text that round-trips exactly
//! - **Network Arithmetic**: Subnets, supernets, containment and hosts
//! - **Lazy Enumeration**: Subnet and host iterators that never materialise
//! - **Sparse Indexing**: `O(1)` access to any host in a block
//! - **Resource Pools**: Lowest-free allocation with gap scanning
//!
//! ## Example Usage
//!
//! ```rust
//! use netsome::pool::Ipv4Pool;
//! use netsome::types::Ipv4Network;
//!
//! let network: Ipv4Network = "192.168.0.0/24".parse().unwrap();
//! assert_eq!(network.subnets(Some(26)).unwrap().count(), 4);
//! assert_eq!(network.host_at(-1).unwrap().to_string(), "192.168.0.255");
//!
//! let mut pool = Ipv4Pool::for_network(&network).unwrap();
//! let first = pool.allocate(None).unwrap();
//! assert_eq!(first.to_string(), "192.168.0.1");
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`validators`] - Component validation (octets, groups, prefix lengths)
//! - [`converters`] - Text and integer conversions per address family
//! - [`types`] - Address, network, interface, VLAN and ASN value types
//! - [`pool`] - Ordered-range resource pools
//! - [`config`] - Pool snapshot persistence
//! - [`error`] - Error types and result aliases

pub mod config;
pub mod converters;
pub mod error;
pub mod pool;
pub mod types;
pub mod validators;

// Re-export commonly used types
pub use error::{ConfigError, ErrorKind, NetError, PoolError};
pub use pool::{PoolItem, RangePool, SharedPool};
pub use types::{
    Asn, Interface, IpAddress, Ipv4Address, Ipv4Interface, Ipv4Network, Ipv6Address,
    Ipv6Interface, Ipv6Network, Network, Vid,
};
