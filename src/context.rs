//! Client storage context - one explicitly constructed home for the cookie
//! adapter and both storage areas.
//!
//! Build it once per application (or per test) from a
//! [`Platform`](crate::platform::Platform) and hand references to the code
//! that needs them. Call [`ClientStorage::close`] when the application
//! shuts down.

use crate::cookies::adapter::CookieAdapter;
use crate::cookies::options::{CookieDefaults, SameSite};
use crate::platform::Platform;
use crate::storage::adapter::KeyValueStore;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Configuration for a [`ClientStorage`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientStorageConfig {
    /// Path applied to cookie writes that do not set one.
    pub cookie_path: String,

    /// Domain applied to cookie writes that do not set one.
    pub cookie_domain: Option<String>,

    /// Mark cookies `secure` unless a write says otherwise.
    pub cookie_secure: bool,

    /// SameSite mode applied unless a write says otherwise.
    pub cookie_same_site: Option<SameSite>,

    /// Empty the session area in [`ClientStorage::close`].
    pub clear_session_on_close: bool,
}

impl Default for ClientStorageConfig {
    fn default() -> Self {
        Self {
            cookie_path: "/".to_string(),
            cookie_domain: None,
            cookie_secure: false,
            cookie_same_site: None,
            clear_session_on_close: false,
        }
    }
}

impl ClientStorageConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.cookie_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "cookie_path",
                reason: format!("{:?} must start with '/'", self.cookie_path),
            });
        }
        if self.cookie_domain.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::InvalidValue {
                field: "cookie_domain",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn cookie_defaults(&self) -> CookieDefaults {
        CookieDefaults {
            path: self.cookie_path.clone(),
            domain: self.cookie_domain.clone(),
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
        }
    }
}

/// Which capabilities the platform offered at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    pub cookies: bool,
    pub local: bool,
    pub session: bool,
}

/// Cookie adapter plus persistent and session storage, bound to one platform.
///
/// # Example
/// ```
/// use clientstore::context::{ClientStorage, ClientStorageConfig};
/// use clientstore::platform::memory::MemoryPlatform;
///
/// let platform = MemoryPlatform::new();
/// let storage = ClientStorage::builder()
///     .config(ClientStorageConfig {
///         clear_session_on_close: true,
///         ..Default::default()
///     })
///     .build(&platform);
///
/// storage.session().set("step", &2);
/// storage.local().set("onboarded", &true);
/// storage.close();
///
/// assert_eq!(platform.session_storage().snapshot().len(), 0);
/// assert_eq!(platform.local_storage().snapshot().len(), 1);
/// ```
#[derive(Debug)]
pub struct ClientStorage {
    cookies: CookieAdapter,
    local: KeyValueStore,
    session: KeyValueStore,
    config: ClientStorageConfig,
}

impl ClientStorage {
    /// Build with the default configuration.
    pub fn new(platform: &dyn Platform) -> Self {
        Self::builder().build(platform)
    }

    pub fn builder() -> ClientStorageBuilder {
        ClientStorageBuilder::default()
    }

    pub fn cookies(&self) -> &CookieAdapter {
        &self.cookies
    }

    /// The persistent area.
    pub fn local(&self) -> &KeyValueStore {
        &self.local
    }

    /// The session-scoped area.
    pub fn session(&self) -> &KeyValueStore {
        &self.session
    }

    pub fn config(&self) -> &ClientStorageConfig {
        &self.config
    }

    pub fn available(&self) -> Availability {
        Availability {
            cookies: self.cookies.is_available(),
            local: self.local.is_available(),
            session: self.session.is_available(),
        }
    }

    /// Tear down the context.
    pub fn close(self) {
        if self.config.clear_session_on_close {
            self.session.clear();
        }
        tracing::debug!(
            cleared_session = self.config.clear_session_on_close,
            "client storage closed"
        );
    }
}

/// Builder for [`ClientStorage`].
#[derive(Debug, Default)]
pub struct ClientStorageBuilder {
    config: ClientStorageConfig,
}

impl ClientStorageBuilder {
    pub fn config(mut self, config: ClientStorageConfig) -> Self {
        self.config = config;
        self
    }

    pub fn cookie_path(mut self, path: impl Into<String>) -> Self {
        self.config.cookie_path = path.into();
        self
    }

    pub fn cookie_domain(mut self, domain: impl Into<String>) -> Self {
        self.config.cookie_domain = Some(domain.into());
        self
    }

    pub fn cookie_secure(mut self, secure: bool) -> Self {
        self.config.cookie_secure = secure;
        self
    }

    pub fn cookie_same_site(mut self, same_site: SameSite) -> Self {
        self.config.cookie_same_site = Some(same_site);
        self
    }

    pub fn clear_session_on_close(mut self, clear: bool) -> Self {
        self.config.clear_session_on_close = clear;
        self
    }

    pub fn build(self, platform: &dyn Platform) -> ClientStorage {
        let storage = ClientStorage {
            cookies: CookieAdapter::with_defaults(platform, self.config.cookie_defaults()),
            local: KeyValueStore::local(platform),
            session: KeyValueStore::session(platform),
            config: self.config,
        };
        tracing::debug!(available = ?storage.available(), "client storage initialized");
        storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::options::CookieOptions;
    use crate::platform::memory::MemoryPlatform;
    use crate::platform::Headless;
    use tempfile::tempdir;

    #[test]
    fn test_config_defaults_from_empty_json() {
        let config = ClientStorageConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ClientStorageConfig::default());
        assert_eq!(config.cookie_defaults(), CookieDefaults::default());
    }

    #[test]
    fn test_config_from_json() {
        let config = ClientStorageConfig::from_json_str(
            r#"{"cookie_path": "/app", "cookie_same_site": "strict", "cookie_secure": true}"#,
        )
        .unwrap();
        assert_eq!(config.cookie_path, "/app");
        assert_eq!(config.cookie_same_site, Some(SameSite::Strict));
        assert!(config.cookie_secure);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        assert!(matches!(
            ClientStorageConfig::from_json_str(r#"{"cookie_path": "app"}"#),
            Err(ConfigError::InvalidValue { field: "cookie_path", .. })
        ));
        assert!(matches!(
            ClientStorageConfig::from_json_str(r#"{"cookie_samesite": "lax"}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_config_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, r#"{"clear_session_on_close": true}"#).unwrap();
        assert!(ClientStorageConfig::from_file(&path).unwrap().clear_session_on_close);

        let missing = ClientStorageConfig::from_file(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(ConfigError::ReadFile(_))));
    }

    #[test]
    fn test_builder_applies_cookie_defaults() {
        let platform = MemoryPlatform::at("https://example.com/app/").unwrap();
        let storage = ClientStorage::builder()
            .cookie_path("/app")
            .cookie_same_site(SameSite::Lax)
            .build(&platform);

        storage.cookies().set("k", "v", &CookieOptions::new());
        let stored = platform.cookie_jar().iter_all_cookies().next().unwrap();
        assert_eq!(stored.path, "/app");
        assert_eq!(stored.same_site, Some(SameSite::Lax));
    }

    #[test]
    fn test_availability() {
        let headless = ClientStorage::new(&Headless);
        assert_eq!(
            headless.available(),
            Availability {
                cookies: false,
                local: false,
                session: false
            }
        );

        let platform = MemoryPlatform::new();
        let storage = ClientStorage::new(&platform);
        assert!(storage.available().cookies && storage.available().local);
    }

    #[test]
    fn test_close_keeps_session_by_default() {
        let platform = MemoryPlatform::new();
        let storage = ClientStorage::new(&platform);
        storage.session().set("k", &1);
        storage.close();
        assert_eq!(platform.session_storage().snapshot().len(), 1);
    }
}
