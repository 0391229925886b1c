//! In-process browser emulation.
//!
//! [`MemoryPlatform`] behaves like one browser tab at a fixed URL: a cookie
//! jar with browser acceptance rules behind `document.cookie`, plus separate
//! local and session storage areas with a byte quota. Clones share state.

use crate::base::storeerror::StoreError;
use crate::cookies::canonical_cookie::CookieSource;
use crate::cookies::jar::{CookieJar, SetOutcome};
use crate::platform::{CookieDocument, Platform, StorageBackend, StorageKind};
use crate::storage::memory::{MemoryStorage, DEFAULT_QUOTA_BYTES};
use std::sync::Arc;
use url::Url;

const DEFAULT_LOCATION: &str = "https://localhost/";

#[derive(Clone)]
pub struct MemoryPlatform {
    location: Url,
    jar: CookieJar,
    local: Arc<MemoryStorage>,
    session: Arc<MemoryStorage>,
}

impl Default for MemoryPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPlatform {
    /// A tab at `https://localhost/` with the default quota.
    pub fn new() -> Self {
        let location = Url::parse(DEFAULT_LOCATION).expect("default location should parse");
        Self::with_location(location)
    }

    /// A tab at `location`.
    pub fn at(location: &str) -> Result<Self, url::ParseError> {
        Ok(Self::with_location(Url::parse(location)?))
    }

    pub fn with_location(location: Url) -> Self {
        Self {
            location,
            jar: CookieJar::new(),
            local: Arc::new(MemoryStorage::with_quota(DEFAULT_QUOTA_BYTES)),
            session: Arc::new(MemoryStorage::with_quota(DEFAULT_QUOTA_BYTES)),
        }
    }

    /// Replace both storage areas with empty ones limited to `quota_bytes`.
    pub fn with_quota(mut self, quota_bytes: usize) -> Self {
        self.local = Arc::new(MemoryStorage::with_quota(quota_bytes));
        self.session = Arc::new(MemoryStorage::with_quota(quota_bytes));
        self
    }

    /// Use an existing local storage area, e.g. one restored from disk.
    pub fn with_local_storage(mut self, local: MemoryStorage) -> Self {
        self.local = Arc::new(local);
        self
    }

    /// Use an existing cookie jar, e.g. one restored from disk.
    pub fn with_cookie_jar(mut self, jar: CookieJar) -> Self {
        self.jar = jar;
        self
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    pub fn cookie_jar(&self) -> &CookieJar {
        &self.jar
    }

    pub fn local_storage(&self) -> &MemoryStorage {
        &self.local
    }

    pub fn session_storage(&self) -> &MemoryStorage {
        &self.session
    }

    /// Simulate a `Set-Cookie` response header for the current page.
    /// Unlike script writes this may set `HttpOnly` cookies.
    pub fn receive_set_cookie(&self, header_value: &str) -> SetOutcome {
        self.jar
            .set_from_line(&self.location, header_value, CookieSource::Http)
    }

    /// End the browsing session: session storage is emptied, local storage
    /// and cookies are kept.
    pub fn end_session(&self) {
        self.session.clear_all();
        tracing::debug!(location = %self.location, "session ended");
    }
}

impl Platform for MemoryPlatform {
    fn cookie_document(&self) -> Option<Arc<dyn CookieDocument>> {
        Some(Arc::new(MemoryDocument {
            location: self.location.clone(),
            jar: self.jar.clone(),
        }))
    }

    fn storage(&self, kind: StorageKind) -> Option<Arc<dyn StorageBackend>> {
        let area: Arc<dyn StorageBackend> = match kind {
            StorageKind::Local => self.local.clone(),
            StorageKind::Session => self.session.clone(),
        };
        Some(area)
    }
}

/// `document.cookie` for a page at a fixed location.
struct MemoryDocument {
    location: Url,
    jar: CookieJar,
}

impl CookieDocument for MemoryDocument {
    fn cookie_string(&self) -> Result<String, StoreError> {
        Ok(self.jar.script_cookie_string(&self.location))
    }

    fn write_cookie(&self, line: &str) -> Result<(), StoreError> {
        // Browsers ignore rejected assignments silently.
        self.jar
            .set_from_line(&self.location, line, CookieSource::Script);
        Ok(())
    }
}
