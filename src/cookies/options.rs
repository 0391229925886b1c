//! Per-call cookie options and crate-wide defaults.

use crate::base::storeerror::StoreError;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// Relative expiries are clamped to this many days either side of now,
/// matching the cap browsers apply to `Expires`.
pub const MAX_EXPIRY_DAYS: f64 = 400.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    /// Lowercase form used on the `document.cookie` path.
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "strict",
            SameSite::Lax => "lax",
            SameSite::None => "none",
        }
    }

    /// Canonical form used in `Set-Cookie` headers.
    pub fn canonical(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

impl From<cookie::SameSite> for SameSite {
    fn from(value: cookie::SameSite) -> Self {
        match value {
            cookie::SameSite::Strict => SameSite::Strict,
            cookie::SameSite::Lax => SameSite::Lax,
            cookie::SameSite::None => SameSite::None,
        }
    }
}

/// When a cookie expires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expiry {
    /// Days from now. Fractions allowed; negative values lie in the past.
    Days(f64),
    /// An absolute instant.
    At(OffsetDateTime),
}

impl Expiry {
    /// Resolve to an absolute instant relative to `now`.
    pub fn resolve(&self, now: OffsetDateTime) -> Result<OffsetDateTime, StoreError> {
        match *self {
            Expiry::At(at) => Ok(at),
            Expiry::Days(days) => {
                if !days.is_finite() {
                    return Err(StoreError::invalid_option(
                        "expires",
                        format!("{} is not a finite number of days", days),
                    ));
                }
                let days = days.clamp(-MAX_EXPIRY_DAYS, MAX_EXPIRY_DAYS);
                Ok(now + Duration::seconds_f64(days * SECONDS_PER_DAY))
            }
        }
    }
}

impl From<f64> for Expiry {
    fn from(days: f64) -> Self {
        Expiry::Days(days)
    }
}

impl From<i32> for Expiry {
    fn from(days: i32) -> Self {
        Expiry::Days(f64::from(days))
    }
}

impl From<OffsetDateTime> for Expiry {
    fn from(at: OffsetDateTime) -> Self {
        Expiry::At(at)
    }
}

/// Options for a single cookie write. Unset fields fall back to
/// [`CookieDefaults`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CookieOptions {
    pub expires: Option<Expiry>,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub secure: Option<bool>,
    pub same_site: Option<SameSite>,
    /// Only honored by [`build_header_value`](crate::cookies::header::build_header_value);
    /// scripts cannot set `HttpOnly` cookies.
    pub http_only: bool,
}

impl CookieOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expires(mut self, expiry: impl Into<Expiry>) -> Self {
        self.expires = Some(expiry.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Merge with `defaults` and resolve the expiry against `now`.
    pub(crate) fn resolve(
        &self,
        defaults: &CookieDefaults,
        now: OffsetDateTime,
    ) -> Result<ResolvedOptions, StoreError> {
        let expires = self.expires.map(|e| e.resolve(now)).transpose()?;

        let path = self.path.clone().unwrap_or_else(|| defaults.path.clone());
        check_attribute("path", &path)?;

        let domain = self.domain.clone().or_else(|| defaults.domain.clone());
        if let Some(domain) = &domain {
            check_attribute("domain", domain)?;
        }

        Ok(ResolvedOptions {
            expires,
            path,
            domain,
            secure: self.secure.unwrap_or(defaults.secure),
            same_site: self.same_site.or(defaults.same_site),
            http_only: self.http_only,
        })
    }
}

/// Attribute values are written verbatim, so a `;` would start a new directive.
fn check_attribute(directive: &'static str, value: &str) -> Result<(), StoreError> {
    if value.chars().any(|c| c == ';' || c.is_control()) {
        return Err(StoreError::invalid_option(
            directive,
            format!("{:?} contains ';' or a control character", value),
        ));
    }
    Ok(())
}

/// Scoping applied to every cookie write that does not override it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieDefaults {
    pub path: String,
    pub domain: Option<String>,
    pub secure: bool,
    pub same_site: Option<SameSite>,
}

impl Default for CookieDefaults {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            domain: None,
            secure: false,
            same_site: None,
        }
    }
}

/// Fully resolved directives for one write.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedOptions {
    pub expires: Option<OffsetDateTime>,
    pub path: String,
    pub domain: Option<String>,
    pub secure: bool,
    pub same_site: Option<SameSite>,
    pub http_only: bool,
}
