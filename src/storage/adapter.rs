//! JSON-valued access to a storage area.

use crate::base::context::StoreResultExt;
use crate::base::storeerror::StoreError;
use crate::platform::{Platform, StorageBackend, StorageKind};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// A storage area holding JSON text under caller-chosen keys.
///
/// Bound to either the persistent ([`StorageKind::Local`]) or the
/// session-scoped ([`StorageKind::Session`]) area. As with
/// [`CookieAdapter`](crate::cookies::adapter::CookieAdapter), each operation
/// has a strict `try_*` form and a lenient form that logs and returns a
/// neutral default.
///
/// Unlike cookies there is no raw-text fallback: every value here was written
/// as JSON, so text that fails to decode is reported as
/// [`StoreError::Deserialize`] (and read as absent by [`get`](Self::get)).
///
/// # Example
/// ```
/// use clientstore::platform::memory::MemoryPlatform;
/// use clientstore::storage::adapter::KeyValueStore;
///
/// let platform = MemoryPlatform::new();
/// let local = KeyValueStore::local(&platform);
///
/// local.set("recent", &vec!["a", "b"]);
/// assert_eq!(local.get::<Vec<String>>("recent"), Some(vec!["a".into(), "b".into()]));
/// assert_eq!(local.count(), 1);
/// ```
pub struct KeyValueStore {
    kind: StorageKind,
    backend: Option<Arc<dyn StorageBackend>>,
}

impl KeyValueStore {
    pub fn new(platform: &dyn Platform, kind: StorageKind) -> Self {
        let backend = platform.storage(kind);
        if backend.is_none() {
            tracing::debug!(store = %kind, "storage area unavailable, adapter degrades to no-ops");
        }
        Self { kind, backend }
    }

    /// The persistent area (`localStorage`).
    pub fn local(platform: &dyn Platform) -> Self {
        Self::new(platform, StorageKind::Local)
    }

    /// The session-scoped area (`sessionStorage`).
    pub fn session(platform: &dyn Platform) -> Self {
        Self::new(platform, StorageKind::Session)
    }

    pub fn kind(&self) -> StorageKind {
        self.kind
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    fn backend(&self) -> Result<&dyn StorageBackend, StoreError> {
        self.backend
            .as_deref()
            .ok_or_else(|| StoreError::no_context(self.kind.as_str()))
    }

    pub fn try_set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let backend = self.backend()?;
        let json = serde_json::to_string(value).map_err(|e| StoreError::serialize(key, e))?;
        backend.set_item(key, &json)
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        self.try_set(key, value).or_log("storage.set", ())
    }

    /// `Ok(None)` when the key is absent.
    pub fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.backend()?.get_item(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::deserialize(key, e))
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.try_get(key).or_log("storage.get", None)
    }

    pub fn try_remove(&self, key: &str) -> Result<(), StoreError> {
        self.backend()?.remove_item(key)
    }

    pub fn remove(&self, key: &str) {
        self.try_remove(key).or_log("storage.remove", ())
    }

    pub fn try_clear(&self) -> Result<(), StoreError> {
        self.backend()?.clear()?;
        tracing::debug!(store = %self.kind, "storage cleared");
        Ok(())
    }

    pub fn clear(&self) {
        self.try_clear().or_log("storage.clear", ())
    }

    pub fn try_list_keys(&self) -> Result<Vec<String>, StoreError> {
        self.backend()?.keys()
    }

    pub fn list_keys(&self) -> Vec<String> {
        self.try_list_keys().or_log_default("storage.list_keys")
    }

    /// Presence only; the stored text is not decoded.
    pub fn try_has(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.backend()?.get_item(key)?.is_some())
    }

    pub fn has(&self, key: &str) -> bool {
        self.try_has(key).or_log("storage.has", false)
    }

    pub fn try_count(&self) -> Result<usize, StoreError> {
        self.backend()?.len()
    }

    pub fn count(&self) -> usize {
        self.try_count().or_log("storage.count", 0)
    }
}

impl std::fmt::Debug for KeyValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyValueStore")
            .field("kind", &self.kind)
            .field("available", &self.is_available())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::storeerror::ErrorKind;
    use crate::platform::memory::MemoryPlatform;
    use crate::platform::Headless;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Draft {
        title: String,
        tags: Vec<String>,
    }

    #[test]
    fn test_values_are_stored_as_json() {
        let platform = MemoryPlatform::new();
        let local = KeyValueStore::local(&platform);

        local.set("name", "alice");
        local.set("n", &3);
        assert_eq!(
            platform.local_storage().get_item("name").unwrap().as_deref(),
            Some("\"alice\"")
        );
        assert_eq!(
            platform.local_storage().get_item("n").unwrap().as_deref(),
            Some("3")
        );
    }

    #[test]
    fn test_struct_roundtrip() {
        let platform = MemoryPlatform::new();
        let session = KeyValueStore::session(&platform);
        let draft = Draft {
            title: "hello".into(),
            tags: vec!["a".into()],
        };

        session.try_set("draft", &draft).unwrap();
        assert_eq!(session.try_get::<Draft>("draft").unwrap(), Some(draft));
    }

    #[test]
    fn test_corrupt_value_reads_as_absent() {
        let platform = MemoryPlatform::new();
        platform.local_storage().set_item("bad", "{oops").unwrap();
        let local = KeyValueStore::local(&platform);

        let err = local.try_get::<serde_json::Value>("bad").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Deserialization);
        assert_eq!(local.get::<serde_json::Value>("bad"), None);
        // Presence does not decode.
        assert!(local.has("bad"));
    }

    #[test]
    fn test_quota_failure_is_swallowed() {
        let platform = MemoryPlatform::new().with_quota(16);
        let local = KeyValueStore::local(&platform);

        local.set("big", &"x".repeat(64));
        assert!(!local.has("big"));

        let err = local.try_set("big", &"x".repeat(64)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Store);
    }

    #[test]
    fn test_headless_defaults() {
        let local = KeyValueStore::local(&Headless);
        assert!(!local.is_available());

        local.set("k", &1);
        assert_eq!(local.get::<i32>("k"), None);
        assert!(!local.has("k"));
        assert_eq!(local.count(), 0);
        assert!(local.list_keys().is_empty());
        local.remove("k");
        local.clear();

        assert_eq!(local.try_count().unwrap_err().kind(), ErrorKind::NoContext);
    }
}
