//! Typed cookie access over a [`CookieDocument`].

use crate::base::context::StoreResultExt;
use crate::base::storeerror::StoreError;
use crate::cookies::header::{self, DirectiveStyle};
use crate::cookies::options::{CookieDefaults, CookieOptions, Expiry};
use crate::platform::{CookieDocument, Platform};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use time::OffsetDateTime;

const STORE: &str = "document.cookie";

/// Reads and writes cookies through the page's cookie document.
///
/// Every operation comes in two forms. `try_*` methods return the full
/// [`StoreError`] so callers can tell an absent cookie (`Ok(None)`) from an
/// unavailable document or a bad value. The plain methods log failures and
/// return a neutral default instead.
///
/// # Example
/// ```
/// use clientstore::cookies::adapter::CookieAdapter;
/// use clientstore::cookies::options::CookieOptions;
/// use clientstore::platform::memory::MemoryPlatform;
///
/// let platform = MemoryPlatform::new();
/// let cookies = CookieAdapter::new(&platform);
///
/// cookies.set("token", "Bearer abc", &CookieOptions::new().expires(7.0));
/// assert_eq!(cookies.get_as::<String>("token").as_deref(), Some("Bearer abc"));
/// ```
pub struct CookieAdapter {
    document: Option<Arc<dyn CookieDocument>>,
    defaults: CookieDefaults,
}

impl CookieAdapter {
    pub fn new(platform: &dyn Platform) -> Self {
        Self::with_defaults(platform, CookieDefaults::default())
    }

    pub fn with_defaults(platform: &dyn Platform, defaults: CookieDefaults) -> Self {
        let document = platform.cookie_document();
        if document.is_none() {
            tracing::debug!("no cookie document, cookie adapter degrades to no-ops");
        }
        Self { document, defaults }
    }

    /// True if a cookie document was found at construction.
    pub fn is_available(&self) -> bool {
        self.document.is_some()
    }

    pub fn defaults(&self) -> &CookieDefaults {
        &self.defaults
    }

    fn document(&self) -> Result<&dyn CookieDocument, StoreError> {
        self.document
            .as_deref()
            .ok_or_else(|| StoreError::no_context(STORE))
    }

    /// Write `value` under `key`. Strings are stored verbatim, other values
    /// as JSON.
    pub fn try_set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        options: &CookieOptions,
    ) -> Result<(), StoreError> {
        let document = self.document()?;
        let text = header::serialize_value(key, value)?;
        let directives = options.resolve(&self.defaults, OffsetDateTime::now_utc())?;
        let line = header::compose(key, &text, &directives, DirectiveStyle::Script)?;
        document.write_cookie(&line)
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T, options: &CookieOptions) {
        self.try_set(key, value, options).or_log("cookie.set", ())
    }

    /// Decoded text of the first cookie named `key`.
    pub fn try_get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let cookies = self.document()?.cookie_string()?;
        Ok(header::find_value(&cookies, key))
    }

    /// The cookie value as JSON, or as a JSON string when the text is not
    /// valid JSON.
    pub fn try_get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self
            .try_get_raw(key)?
            .map(|raw| header::decode_value(&raw)))
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.try_get(key).or_log("cookie.get", None)
    }

    /// Deserialize the cookie into `T`: first from the raw text as a string,
    /// then from its JSON form. `String` targets always receive the text as
    /// written; use [`get`](Self::get) for the decoded JSON value.
    pub fn try_get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.try_get_raw(key)? else {
            return Ok(None);
        };
        if let Ok(value) = serde_json::from_value::<T>(Value::String(raw.clone())) {
            return Ok(Some(value));
        }
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::deserialize(key, e))
    }

    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.try_get_as(key).or_log("cookie.get", None)
    }

    /// Expire `key`. Only `path` and `domain` of `scope` matter, and they must
    /// match the ones the cookie was written with.
    pub fn try_remove(&self, key: &str, scope: &CookieOptions) -> Result<(), StoreError> {
        let expired = CookieOptions {
            expires: Some(Expiry::Days(-1.0)),
            ..scope.clone()
        };
        self.try_set(key, "", &expired)
    }

    pub fn remove(&self, key: &str, scope: &CookieOptions) {
        self.try_remove(key, scope).or_log("cookie.remove", ())
    }

    pub fn try_has(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.try_get_raw(key)?.is_some())
    }

    pub fn has(&self, key: &str) -> bool {
        self.try_has(key).or_log("cookie.has", false)
    }

    /// Every visible cookie, decoded but not JSON-parsed.
    pub fn try_get_all(&self) -> Result<HashMap<String, String>, StoreError> {
        let cookies = self.document()?.cookie_string()?;
        Ok(header::parse_from_header(&cookies))
    }

    pub fn get_all(&self) -> HashMap<String, String> {
        self.try_get_all().or_log_default("cookie.get_all")
    }

    /// Remove every visible cookie with the default scope. Returns how many
    /// removals were issued; cookies written under another path or domain
    /// survive.
    pub fn try_clear_all(&self) -> Result<usize, StoreError> {
        let all = self.try_get_all()?;
        let scope = CookieOptions::new();
        for key in all.keys() {
            self.try_remove(key, &scope)?;
        }
        tracing::debug!(count = all.len(), "cleared cookies");
        Ok(all.len())
    }

    pub fn clear_all(&self) {
        self.try_clear_all().or_log("cookie.clear_all", 0);
    }

    /// Parse a `Cookie` header. Works without a cookie document.
    pub fn parse_from_header(header_text: &str) -> HashMap<String, String> {
        header::parse_from_header(header_text)
    }

    /// Compose a `Set-Cookie` value using this adapter's defaults. Works
    /// without a cookie document.
    pub fn build_header_value<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        options: &CookieOptions,
    ) -> Result<String, StoreError> {
        header::build_header_value_with(key, value, options, &self.defaults)
    }
}

impl std::fmt::Debug for CookieAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieAdapter")
            .field("available", &self.is_available())
            .field("defaults", &self.defaults)
            .finish()
    }
}
