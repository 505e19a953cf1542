//! VLAN ID type with validation.

use crate::error::NetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated 802.1Q VLAN ID (0-4095).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Vid(u16);

impl Vid {
    /// Minimum VLAN ID.
    pub const MIN: u16 = 0;
    /// Maximum VLAN ID.
    pub const MAX: u16 = 4095;
    /// The default VLAN.
    pub const DEFAULT: u16 = 1;

    /// Create a new Vid from a u16, returning None if invalid.
    #[inline]
    pub const fn new(vid: u16) -> Option<Self> {
        if vid <= Self::MAX {
            Some(Self(vid))
        } else {
            None
        }
    }

    /// Get the raw VLAN number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Check if this ID is reserved (0, 1 or 4095).
    pub const fn is_reserved(self) -> bool {
        matches!(self.0, 0 | Self::DEFAULT | Self::MAX)
    }

    /// Check if this is the default VLAN.
    pub const fn is_default(self) -> bool {
        self.0 == Self::DEFAULT
    }
}

impl Default for Vid {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for Vid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Vid {
    type Error = NetError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(NetError::OutOfRange {
            what: "VLAN ID",
            value: u128::from(value),
            min: u128::from(Self::MIN),
            max: u128::from(Self::MAX),
        })
    }
}

impl From<Vid> for u16 {
    fn from(vid: Vid) -> Self {
        vid.0
    }
}

impl FromStr for Vid {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u16 = s.parse().map_err(|_| NetError::InvalidNumber {
            what: "VLAN ID",
            input: s.to_string(),
        })?;
        Self::try_from(value)
    }
}
