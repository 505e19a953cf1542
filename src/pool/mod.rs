//! Ordered-range resource pools.
//!
//! A [`RangePool`] hands out items from a bounded, totally ordered range and
//! tracks which are reserved. Free items are never stored; the lowest free
//! item is found by scanning the reserved set for its first gap.

mod range;
mod shared;

pub use range::{PoolSnapshot, RangePool};
pub use shared::SharedPool;

use crate::types::{Asn, IpAddress, Ipv4Address, Ipv6Address, Vid};
use std::fmt;

/// An item that can be allocated from a [`RangePool`].
///
/// Items map onto integer positions. The mapping must preserve order:
/// `a < b` exactly when `a.to_index() < b.to_index()`.
pub trait PoolItem: Copy + Ord + fmt::Debug + fmt::Display {
    /// The integer position of this item.
    fn to_index(self) -> u128;

    /// The item at `index`, or `None` if no such item exists.
    fn from_index(index: u128) -> Option<Self>;

    /// The next item in order.
    fn successor(self) -> Option<Self> {
        self.to_index().checked_add(1).and_then(Self::from_index)
    }
}

macro_rules! int_pool_item {
    ($($ty:ty),*) => {
        $(
            impl PoolItem for $ty {
                fn to_index(self) -> u128 {
                    u128::from(self)
                }

                fn from_index(index: u128) -> Option<Self> {
                    <$ty>::try_from(index).ok()
                }
            }
        )*
    };
}

int_pool_item!(u16, u32, u64);

impl PoolItem for Vid {
    fn to_index(self) -> u128 {
        u128::from(self.as_u16())
    }

    fn from_index(index: u128) -> Option<Self> {
        u16::try_from(index).ok().and_then(Vid::new)
    }
}

impl PoolItem for Asn {
    fn to_index(self) -> u128 {
        u128::from(self.as_u32())
    }

    fn from_index(index: u128) -> Option<Self> {
        u32::try_from(index).ok().map(Asn::new)
    }
}

impl PoolItem for Ipv4Address {
    fn to_index(self) -> u128 {
        self.to_bits()
    }

    fn from_index(index: u128) -> Option<Self> {
        Self::from_bits(index).ok()
    }
}

impl PoolItem for Ipv6Address {
    fn to_index(self) -> u128 {
        self.to_bits()
    }

    fn from_index(index: u128) -> Option<Self> {
        Some(Self::from_u128(index))
    }
}

/// Pool of VLAN IDs.
pub type VlanPool = RangePool<Vid>;
/// Pool of AS numbers.
pub type AsnPool = RangePool<Asn>;
/// Pool of IPv4 addresses.
pub type Ipv4Pool = RangePool<Ipv4Address>;
/// Pool of IPv6 addresses.
pub type Ipv6Pool = RangePool<Ipv6Address>;
