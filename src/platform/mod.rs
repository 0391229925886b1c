//! Browser-capability seam.
//!
//! Adapters never probe the environment themselves. They ask a [`Platform`]
//! once, at construction, for the two capabilities they need:
//!
//! | Capability | Browser API | Trait |
//! |------------|-------------|-------|
//! | Cookie document | `document.cookie` getter/setter | [`CookieDocument`] |
//! | Storage area | `localStorage` / `sessionStorage` | [`StorageBackend`] |
//!
//! A capability that is `None` means "no browser context": the adapter then
//! reports [`StoreError::NoContext`] from its strict methods and neutral
//! defaults from its lenient ones.
//!
//! Implementations:
//!
//! - [`Headless`]: nothing available (servers, CLIs, unit tests of the
//!   degraded path)
//! - [`MemoryPlatform`](memory::MemoryPlatform): in-process browser emulation
//! - `WebPlatform` (`wasm32` only): the real `web-sys` bindings

use crate::base::storeerror::StoreError;
use std::sync::Arc;

pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

/// The `document.cookie` accessor pair.
pub trait CookieDocument: Send + Sync {
    /// Current cookie string: visible `name=value` pairs joined by `"; "`.
    fn cookie_string(&self) -> Result<String, StoreError>;

    /// Write one `name=value; directive; ...` line, as assigning to
    /// `document.cookie` does. The host decides whether to accept it.
    fn write_cookie(&self, line: &str) -> Result<(), StoreError>;
}

/// A flat string-keyed storage area (the Web Storage interface).
pub trait StorageBackend: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;

    fn clear(&self) -> Result<(), StoreError>;

    fn keys(&self) -> Result<Vec<String>, StoreError>;

    fn len(&self) -> Result<usize, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

/// Which storage area a [`KeyValueStore`](crate::storage::adapter::KeyValueStore) binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// Survives restarts (`localStorage`).
    Local,
    /// Cleared when the browsing session ends (`sessionStorage`).
    Session,
}

impl StorageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Local => "localStorage",
            StorageKind::Session => "sessionStorage",
        }
    }
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of browser capabilities.
pub trait Platform {
    fn cookie_document(&self) -> Option<Arc<dyn CookieDocument>>;

    fn storage(&self, kind: StorageKind) -> Option<Arc<dyn StorageBackend>>;
}

/// A host with no browser context at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl Platform for Headless {
    fn cookie_document(&self) -> Option<Arc<dyn CookieDocument>> {
        None
    }

    fn storage(&self, _kind: StorageKind) -> Option<Arc<dyn StorageBackend>> {
        None
    }
}

/// The platform of the current build target: the browser on `wasm32`,
/// [`Headless`] everywhere else.
pub fn default_platform() -> Box<dyn Platform> {
    #[cfg(target_arch = "wasm32")]
    {
        Box::new(web::WebPlatform)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Box::new(Headless)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_has_no_capabilities() {
        let platform = Headless;
        assert!(platform.cookie_document().is_none());
        assert!(platform.storage(StorageKind::Local).is_none());
        assert!(platform.storage(StorageKind::Session).is_none());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_default_platform_is_headless_off_wasm() {
        let platform = default_platform();
        assert!(platform.cookie_document().is_none());
    }

    #[test]
    fn test_storage_kind_names() {
        assert_eq!(StorageKind::Local.to_string(), "localStorage");
        assert_eq!(StorageKind::Session.as_str(), "sessionStorage");
    }
}
