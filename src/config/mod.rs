//! Pool snapshot persistence.
//!
//! The library keeps no global settings. A pool definition can be written
//! to and read back from a JSON file with [`save_snapshot`] and
//! [`load_snapshot`].

mod snapshot;

pub use snapshot::{load_or_new, load_snapshot, save_snapshot};
