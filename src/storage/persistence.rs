//! Storage area snapshots.
//!
//! Outside a browser nothing keeps `localStorage` across restarts; these
//! helpers write a [`MemoryStorage`] to a JSON object and read it back.

use crate::storage::memory::MemoryStorage;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

/// Save every entry of `storage` to `path`.
///
/// # Example
/// ```ignore
/// persistence::save_storage(platform.local_storage(), Path::new("local.json"))?;
/// ```
pub fn save_storage(storage: &MemoryStorage, path: &Path) -> io::Result<()> {
    let entries = storage.snapshot();
    let json = serde_json::to_string_pretty(&entries)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    tracing::debug!(path = %path.display(), count = entries.len(), "storage saved");
    Ok(())
}

/// Load a storage area written by [`save_storage`], applying `quota` to
/// later writes.
pub fn load_storage(path: &Path, quota: Option<usize>) -> io::Result<MemoryStorage> {
    let json = fs::read_to_string(path)?;
    let entries: BTreeMap<String, String> =
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    tracing::debug!(path = %path.display(), count = entries.len(), "storage loaded");
    Ok(MemoryStorage::from_entries(entries, quota))
}
