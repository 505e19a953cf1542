//! Error types for netsome.
//!
//! Uses `thiserror` for ergonomic error definitions.

use crate::types::Family;
use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of a [`NetError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input does not match the grammar of the target type.
    Format,
    /// Input is well-formed but numerically out of bounds or inconsistent.
    Value,
    /// A positional lookup fell outside the block.
    Index,
}

/// Main error type for value construction and network arithmetic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetError {
    #[error("invalid {family} address \"{input}\": {reason}")]
    InvalidAddress {
        family: Family,
        input: String,
        reason: &'static str,
    },

    #[error("invalid {component} \"{input}\"")]
    InvalidComponent {
        component: &'static str,
        input: String,
    },

    #[error("invalid prefix length \"{0}\"")]
    InvalidPrefix(String),

    #[error("CIDR notation required, got \"{0}\"")]
    MissingPrefix(String),

    #[error("\"{input}\" is not a single host, expected prefix length {expected}")]
    NotHostPrefix { input: String, expected: u8 },

    #[error("invalid {what} \"{input}\"")]
    InvalidNumber { what: &'static str, input: String },

    #[error("unable to parse \"{input}\"")]
    Unparseable {
        input: String,
        #[source]
        last: Box<NetError>,
    },

    #[error("{what} {value} is out of range {min}-{max}")]
    OutOfRange {
        what: &'static str,
        value: u128,
        min: u128,
        max: u128,
    },

    #[error("prefix length {prefix} is out of range {min}-{max}")]
    PrefixOutOfRange { prefix: u32, min: u32, max: u32 },

    #[error("host bits set in {0}")]
    HostBitsSet(String),

    #[error("network {network} does not contain {address}")]
    NotContained { address: String, network: String },

    #[error("network {0} has no supernet")]
    NoSupernet(String),

    #[error("host index {index} is out of range for {network}")]
    IndexOutOfRange { index: i128, network: String },
}

impl NetError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAddress { .. }
            | Self::InvalidComponent { .. }
            | Self::InvalidPrefix(_)
            | Self::MissingPrefix(_)
            | Self::NotHostPrefix { .. }
            | Self::InvalidNumber { .. }
            | Self::Unparseable { .. } => ErrorKind::Format,
            Self::OutOfRange { .. }
            | Self::PrefixOutOfRange { .. }
            | Self::HostBitsSet(_)
            | Self::NotContained { .. }
            | Self::NoSupernet(_) => ErrorKind::Value,
            Self::IndexOutOfRange { .. } => ErrorKind::Index,
        }
    }
}

/// Result type alias for value construction and arithmetic.
pub type NetResult<T> = Result<T, NetError>;

/// Errors raised by resource pools.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("invalid pool bounds {0}")]
    InvalidBounds(String),

    #[error("{0} is outside the pool range")]
    OutOfBounds(String),

    #[error("{0} is already reserved")]
    AlreadyReserved(String),

    #[error("{0} is not reserved")]
    NotReserved(String),

    #[error("no free item left in pool")]
    Exhausted,
}

/// Result type alias for pool operations.
pub type PoolResult<T> = Result<T, PoolError>;

/// Errors raised while loading or saving pool snapshots.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("invalid snapshot format: {0}")]
    InvalidFormat(String),

    #[error(transparent)]
    Pool(#[from] PoolError),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidFormat(e.to_string())
    }
}

/// Result type alias for snapshot persistence.
pub type ConfigResult<T> = Result<T, ConfigError>;
