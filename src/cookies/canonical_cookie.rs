use crate::cookies::domain;
use crate::cookies::options::SameSite;
use cookie::Cookie;
use time::OffsetDateTime;
use url::Url;

/// A cookie as the emulated browser stores it.
/// Name and value are kept exactly as written (still percent-encoded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    pub creation_time: OffsetDateTime,
    pub expiration_time: Option<OffsetDateTime>,
    pub secure: bool,
    pub http_only: bool,
    pub host_only: bool,
    pub same_site: Option<SameSite>,
}

/// Where a cookie line came from. Scripts cannot set `HttpOnly` cookies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieSource {
    Script,
    Http,
}

/// Why the jar ignored a cookie line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Malformed,
    HttpOnlyFromScript,
    SecureOnInsecureOrigin,
    DomainMismatch,
    InvalidPrefix,
}

impl CanonicalCookie {
    pub fn new(
        name: String,
        value: String,
        domain: String,
        path: String,
        creation_time: OffsetDateTime,
        expiration_time: Option<OffsetDateTime>,
    ) -> Self {
        Self {
            name,
            value,
            domain,
            path,
            creation_time,
            expiration_time,
            secure: false,
            http_only: false,
            host_only: true,
            same_site: None,
        }
    }

    /// Parse one cookie line written by a page at `url`, applying the checks
    /// a browser makes before storing it.
    pub fn from_line(
        url: &Url,
        line: &str,
        source: CookieSource,
        now: OffsetDateTime,
    ) -> Result<Self, Rejection> {
        let parsed = Cookie::parse(line).map_err(|_| Rejection::Malformed)?;
        let host = url.host_str().unwrap_or("").to_ascii_lowercase();
        let secure_origin = url.scheme() == "https";

        let http_only = parsed.http_only().unwrap_or(false);
        if http_only && source == CookieSource::Script {
            return Err(Rejection::HttpOnlyFromScript);
        }

        let secure = parsed.secure().unwrap_or(false);
        if secure && !secure_origin {
            return Err(Rejection::SecureOnInsecureOrigin);
        }

        let (domain, host_only) = match parsed.domain() {
            Some(d) if !d.is_empty() => {
                let d = d.trim_start_matches('.').to_ascii_lowercase();
                if !domain::is_valid_cookie_domain(&d, &host) {
                    return Err(Rejection::DomainMismatch);
                }
                // A public suffix equal to the host degrades to host-only.
                let host_only = domain::is_public_suffix(&d);
                (d, host_only)
            }
            _ => (host, true),
        };

        let path = match parsed.path() {
            Some(p) if p.starts_with('/') => p.to_string(),
            _ => "/".to_string(),
        };

        // Max-Age takes precedence over Expires.
        let expiration_time = match parsed.max_age() {
            Some(max_age) => Some(now + max_age),
            None => parsed.expires().and_then(|e| e.datetime()),
        };

        let cookie = CanonicalCookie {
            name: parsed.name().to_string(),
            value: parsed.value().to_string(),
            domain,
            path,
            creation_time: now,
            expiration_time,
            secure,
            http_only,
            host_only,
            same_site: parsed.same_site().map(SameSite::from),
        };
        cookie.validate_prefix(secure_origin)?;
        Ok(cookie)
    }

    pub fn is_expired(&self, current_time: OffsetDateTime) -> bool {
        self.expiration_time
            .is_some_and(|expiry| expiry <= current_time)
    }

    /// True if this cookie is visible to a document at `url`.
    pub fn is_visible_at(&self, url: &Url) -> bool {
        let host = url.host_str().unwrap_or("");
        let domain_ok = if self.host_only {
            self.domain.eq_ignore_ascii_case(host)
        } else {
            domain::domain_matches(host, &self.domain)
        };
        domain_ok
            && domain::path_matches(&self.path, url.path())
            && (!self.secure || url.scheme() == "https")
    }

    /// Same name, domain and path: a write of one replaces the other.
    pub fn same_slot(&self, other: &CanonicalCookie) -> bool {
        self.name == other.name && self.domain == other.domain && self.path == other.path
    }

    /// Validate __Secure- and __Host- cookie prefixes per RFC 6265bis.
    /// - __Secure- cookies MUST have the Secure attribute
    /// - __Host- cookies MUST have Secure, Path="/", and no Domain attribute
    fn validate_prefix(&self, secure_origin: bool) -> Result<(), Rejection> {
        if self.name.starts_with("__Secure-") && (!self.secure || !secure_origin) {
            return Err(Rejection::InvalidPrefix);
        }
        if self.name.starts_with("__Host-")
            && (!self.secure || self.path != "/" || !self.host_only || !secure_origin)
        {
            return Err(Rejection::InvalidPrefix);
        }
        Ok(())
    }
}
