//! Single-owner range pool with gap-scan allocation.

use super::PoolItem;
use crate::error::{PoolError, PoolResult};
use crate::types::{IpAddress, Network};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, trace};

/// A pool of items over the half-open index range `[start, end)`.
///
/// An `end` of `None` means the range runs through `u128::MAX`, so a pool
/// can cover the top of the IPv6 space. Only the reserved set is stored.
/// Mutation takes `&mut self`; wrap the pool in a
/// [`SharedPool`](super::SharedPool) to share it between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangePool<T: PoolItem> {
    start: u128,
    end: Option<u128>,
    reserved: BTreeSet<T>,
}

impl<T: PoolItem> RangePool<T> {
    /// Create an empty pool over `[start, end)`.
    ///
    /// Both ends of a non-empty range must map to valid items.
    pub fn new(start: u128, end: u128) -> PoolResult<Self> {
        Self::with_bounds(start, Some(end))
    }

    /// Create an empty pool over the closed range `[first, last]`.
    pub fn inclusive(first: u128, last: u128) -> PoolResult<Self> {
        if first > last {
            return Err(PoolError::InvalidBounds(format!("[{first}, {last}]")));
        }
        Self::with_bounds(first, last.checked_add(1))
    }

    fn with_bounds(start: u128, end: Option<u128>) -> PoolResult<Self> {
        let last = match end {
            Some(end) if end < start => {
                return Err(PoolError::InvalidBounds(format!("[{start}, {end})")));
            }
            Some(end) if end == start => None,
            Some(end) => Some(end - 1),
            None => Some(u128::MAX),
        };

        let valid = last.map_or(true, |last| {
            T::from_index(start).is_some() && T::from_index(last).is_some()
        });
        if !valid {
            return Err(PoolError::InvalidBounds(render_bounds(start, end)));
        }

        Ok(Self {
            start,
            end,
            reserved: BTreeSet::new(),
        })
    }

    /// Create a pool with known reservations, e.g. restored after a restart.
    pub fn with_reserved<I>(start: u128, end: u128, reserved: I) -> PoolResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Self::new(start, end)?.seeded(reserved)
    }

    fn seeded<I>(mut self, reserved: I) -> PoolResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        for item in reserved {
            if !self.in_bounds(item) {
                return Err(PoolError::OutOfBounds(item.to_string()));
            }
            self.reserved.insert(item);
        }

        debug!(
            start = self.start,
            end = ?self.end,
            reserved = self.reserved.len(),
            "restored pool"
        );
        Ok(self)
    }

    /// Reserve `item`, or the lowest free item when `None`.
    pub fn allocate(&mut self, item: Option<T>) -> PoolResult<T> {
        let item = match item {
            Some(item) => {
                if !self.in_bounds(item) {
                    return Err(PoolError::OutOfBounds(item.to_string()));
                }
                if self.reserved.contains(&item) {
                    return Err(PoolError::AlreadyReserved(item.to_string()));
                }
                item
            }
            None => self.first_free().ok_or(PoolError::Exhausted)?,
        };

        self.reserved.insert(item);
        debug!(%item, "allocated");
        Ok(item)
    }

    /// Return a reserved item to the pool.
    pub fn release(&mut self, item: T) -> PoolResult<()> {
        if !self.reserved.remove(&item) {
            return Err(PoolError::NotReserved(item.to_string()));
        }
        debug!(%item, "released");
        Ok(())
    }

    /// The lowest free item, found by scanning for the first gap.
    pub fn first_free(&self) -> Option<T> {
        // None once the scan has run past u128::MAX
        let mut expected = Some(self.start);
        for item in &self.reserved {
            let index = item.to_index();
            if Some(index) != expected {
                break;
            }
            expected = index.checked_add(1);
        }

        trace!(index = ?expected, "gap scan finished");
        expected
            .filter(|index| self.contains_index(*index))
            .and_then(T::from_index)
    }

    /// Check whether `item` is currently reserved.
    pub fn is_reserved(&self, item: T) -> bool {
        self.reserved.contains(&item)
    }

    /// Check whether `item` lies within the pool range.
    pub fn in_bounds(&self, item: T) -> bool {
        self.contains_index(item.to_index())
    }

    fn contains_index(&self, index: u128) -> bool {
        index >= self.start && self.end.map_or(true, |end| index < end)
    }

    /// The highest index in the range, `None` for an empty pool.
    fn last_index(&self) -> Option<u128> {
        match self.end {
            Some(end) if end == self.start => None,
            Some(end) => Some(end - 1),
            None => Some(u128::MAX),
        }
    }

    /// Reserved items in ascending order.
    pub fn reserved(&self) -> impl Iterator<Item = T> + '_ {
        self.reserved.iter().copied()
    }

    /// Free items in ascending order, computed lazily.
    pub fn free(&self) -> impl Iterator<Item = T> + '_ {
        self.last_index()
            .into_iter()
            .flat_map(move |last| self.start..=last)
            .filter_map(T::from_index)
            .filter(move |item| !self.reserved.contains(item))
    }

    /// Total number of positions in the pool.
    ///
    /// `None` only when the pool spans all 2^128 indices.
    pub fn capacity(&self) -> Option<u128> {
        match self.end {
            Some(end) => Some(end - self.start),
            None => (u128::MAX - self.start).checked_add(1),
        }
    }

    /// Number of reserved items.
    pub fn reserved_count(&self) -> usize {
        self.reserved.len()
    }

    /// Number of free items; `None` only for an untouched 2^128-item pool.
    pub fn available(&self) -> Option<u128> {
        let reserved = self.reserved.len() as u128;
        match self.capacity() {
            Some(capacity) => Some(capacity - reserved),
            None => (u128::MAX - reserved).checked_add(1),
        }
    }

    /// Check whether every item is reserved.
    pub fn is_full(&self) -> bool {
        self.available() == Some(0)
    }

    /// The pool bounds as `(start, end)`, `end` exclusive.
    pub fn bounds(&self) -> (u128, Option<u128>) {
        (self.start, self.end)
    }

    /// Capture the pool state for external persistence.
    pub fn snapshot(&self) -> PoolSnapshot<T> {
        PoolSnapshot {
            start: self.start,
            end: self.end,
            reserved: self.reserved().collect(),
        }
    }
}

impl<A: IpAddress + PoolItem> RangePool<A> {
    /// A pool over the usable hosts of `network`.
    pub fn for_network(network: &Network<A>) -> PoolResult<Self> {
        Self::inclusive(
            network.first_host().to_index(),
            network.last_host().to_index(),
        )
    }
}

fn render_bounds(start: u128, end: Option<u128>) -> String {
    match end {
        Some(end) => format!("[{start}, {end})"),
        None => format!("[{start}, {}]", u128::MAX),
    }
}

impl<T: PoolItem> fmt::Display for RangePool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RangePool{} [{} reserved]",
            render_bounds(self.start, self.end),
            self.reserved.len()
        )
    }
}

/// Serializable pool state: bounds plus reserved items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot<T> {
    /// First index of the range.
    pub start: u128,
    /// One past the last index; `None` when the range runs through `u128::MAX`.
    pub end: Option<u128>,
    /// Reserved items.
    pub reserved: Vec<T>,
}

impl<T: PoolItem> PoolSnapshot<T> {
    /// Rebuild the pool this snapshot describes.
    pub fn restore(self) -> PoolResult<RangePool<T>> {
        RangePool::with_bounds(self.start, self.end)?.seeded(self.reserved)
    }
}
