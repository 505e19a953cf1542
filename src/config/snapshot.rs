//! JSON files holding a [`PoolSnapshot`].

use crate::error::{ConfigError, ConfigResult};
use crate::pool::{PoolItem, PoolSnapshot, RangePool};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// Load a snapshot from a specific file.
pub fn load_snapshot<T, P>(path: P) -> ConfigResult<PoolSnapshot<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let snapshot: PoolSnapshot<T> = serde_json::from_str(&content)?;
    info!(
        path = %path.display(),
        reserved = snapshot.reserved.len(),
        "loaded pool snapshot"
    );
    Ok(snapshot)
}

/// Save a snapshot as pretty-printed JSON.
pub fn save_snapshot<T, P>(snapshot: &PoolSnapshot<T>, path: P) -> ConfigResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, content).map_err(|e| ConfigError::WriteFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    info!(
        path = %path.display(),
        reserved = snapshot.reserved.len(),
        "saved pool snapshot"
    );
    Ok(())
}

/// Restore the pool stored at `path`, or create an empty one over
/// `[start, end)` if the file does not exist yet.
///
/// Bounds stored in an existing file take precedence.
pub fn load_or_new<T, P>(path: P, start: u128, end: u128) -> ConfigResult<RangePool<T>>
where
    T: PoolItem + DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(RangePool::new(start, end)?);
    }
    Ok(load_snapshot(path)?.restore()?)
}
