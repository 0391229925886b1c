use crate::base::storeerror::StoreError;
use crate::platform::StorageBackend;
use dashmap::DashMap;
use std::collections::BTreeMap;

/// Per-area quota browsers commonly grant (5 MiB).
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// An in-memory storage area.
///
/// Usage is counted as key bytes plus value bytes. A write that would push
/// usage over the quota fails with [`StoreError::QuotaExceeded`] and leaves
/// the area unchanged.
#[derive(Debug)]
pub struct MemoryStorage {
    entries: DashMap<String, String>,
    quota: Option<usize>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::with_quota(DEFAULT_QUOTA_BYTES)
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: DashMap::new(),
            quota: Some(quota_bytes),
        }
    }

    pub fn unlimited() -> Self {
        Self {
            entries: DashMap::new(),
            quota: None,
        }
    }

    /// Populate from existing entries. The quota is not checked.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>, quota: Option<usize>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            quota,
        }
    }

    pub fn quota(&self) -> Option<usize> {
        self.quota
    }

    pub fn usage_bytes(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.key().len() + e.value().len())
            .sum()
    }

    /// Sorted copy of every entry.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect()
    }

    pub fn clear_all(&self) {
        self.entries.clear();
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(quota) = self.quota {
            let replaced = self
                .entries
                .get(key)
                .map(|v| key.len() + v.value().len())
                .unwrap_or(0);
            let needed = self.usage_bytes().saturating_sub(replaced) + key.len() + value.len();
            if needed > quota {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.clear_all();
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        Ok(keys)
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.entries.len())
    }
}
