//! Cookie wire format: directive composition and header parsing.
//!
//! Two composition styles share one code path:
//!
//! | Style | Used by | Directive names | `HttpOnly` |
//! |-------|---------|-----------------|------------|
//! | Script | [`CookieAdapter::set`](crate::cookies::adapter::CookieAdapter::set) | `expires`, `path`, `domain`, `secure`, `samesite` | never |
//! | Header | [`build_header_value`] | `Expires`, `Path`, `Domain`, `Secure`, `SameSite` | when requested |
//!
//! Names and values are percent-encoded on write and decoded on parse.

use crate::base::storeerror::StoreError;
use crate::cookies::options::{CookieDefaults, CookieOptions, ResolvedOptions};
use cookie::Cookie;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DirectiveStyle {
    /// `document.cookie` assignment.
    Script,
    /// `Set-Cookie` header value.
    Header,
}

impl DirectiveStyle {
    fn names(self) -> [&'static str; 5] {
        match self {
            DirectiveStyle::Script => ["expires", "path", "domain", "secure", "samesite"],
            DirectiveStyle::Header => ["Expires", "Path", "Domain", "Secure", "SameSite"],
        }
    }
}

/// Render an instant as an IMF-fixdate (`Wed, 21 Oct 2026 07:28:00 GMT`).
pub(crate) fn format_expires(at: OffsetDateTime) -> Result<String, StoreError> {
    let format = format_description!(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
    );
    at.to_offset(UtcOffset::UTC)
        .format(&format)
        .map_err(|e| StoreError::invalid_option("expires", e.to_string()))
}

/// Compose `name=value` followed by the resolved directives.
pub(crate) fn compose(
    name: &str,
    value: &str,
    directives: &ResolvedOptions,
    style: DirectiveStyle,
) -> Result<String, StoreError> {
    if name.is_empty() {
        return Err(StoreError::invalid_option("name", "cookie name is empty"));
    }

    let [expires, path, domain, secure, same_site] = style.names();
    let mut line = Cookie::new(name, value).encoded().to_string();

    if let Some(at) = directives.expires {
        line.push_str(&format!("; {}={}", expires, format_expires(at)?));
    }
    line.push_str(&format!("; {}={}", path, directives.path));
    if let Some(d) = &directives.domain {
        line.push_str(&format!("; {}={}", domain, d));
    }
    if directives.secure {
        line.push_str("; ");
        line.push_str(secure);
    }
    if let Some(mode) = directives.same_site {
        let mode = match style {
            DirectiveStyle::Script => mode.as_str(),
            DirectiveStyle::Header => mode.canonical(),
        };
        line.push_str(&format!("; {}={}", same_site, mode));
    }
    if directives.http_only && style == DirectiveStyle::Header {
        line.push_str("; HttpOnly");
    }

    Ok(line)
}

/// Turn a value into cookie text: strings pass through, everything else is
/// compact JSON.
pub(crate) fn serialize_value<T: Serialize + ?Sized>(
    key: &str,
    value: &T,
) -> Result<String, StoreError> {
    match serde_json::to_value(value) {
        Ok(Value::String(s)) => Ok(s),
        Ok(other) => Ok(other.to_string()),
        Err(e) => Err(StoreError::serialize(key, e)),
    }
}

/// Decode cookie text as JSON, falling back to the text itself.
pub(crate) fn decode_value(raw: &str) -> Value {
    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(_) => {
            tracing::trace!(raw, "cookie value is not JSON, using raw string");
            Value::String(raw.to_string())
        }
    }
}

/// Parse a `Cookie` header (or `document.cookie` string) into decoded
/// name/value pairs. Unparseable pairs are skipped, pairs that do not
/// percent-decode to UTF-8 keep their raw text, and the first occurrence of a
/// name wins.
///
/// # Example
/// ```
/// use clientstore::cookies::header::parse_from_header;
///
/// let cookies = parse_from_header("theme=dark; lang=en%20US; theme=light");
/// assert_eq!(cookies["theme"], "dark");
/// assert_eq!(cookies["lang"], "en US");
/// ```
pub fn parse_from_header(header: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    for (name, value) in split_pairs(header) {
        cookies.entry(name).or_insert(value);
    }
    cookies
}

/// First decoded value for `name` in a cookie string.
pub(crate) fn find_value(header: &str, name: &str) -> Option<String> {
    split_pairs(header)
        .find(|(n, _)| n == name)
        .map(|(_, value)| value)
}

/// Name/value pairs of a cookie string in order. A pair whose
/// percent-decoding is not UTF-8 is kept with its text as written.
fn split_pairs(header: &str) -> impl Iterator<Item = (String, String)> + '_ {
    header
        .split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let parsed = Cookie::parse_encoded(pair).or_else(|e| {
                tracing::trace!(error = %e, pair, "cookie pair does not decode, keeping raw text");
                Cookie::parse(pair)
            });
            match parsed {
                Ok(c) => Some((c.name().to_string(), c.value().to_string())),
                Err(e) => {
                    tracing::trace!(error = %e, "skipping malformed cookie pair");
                    None
                }
            }
        })
}

/// Build a `Set-Cookie` header value with default scoping.
///
/// Mirrors the script write path but uses canonical directive names and can
/// emit `HttpOnly`.
///
/// # Example
/// ```
/// use clientstore::cookies::header::build_header_value;
/// use clientstore::cookies::options::{CookieOptions, SameSite};
///
/// let header = build_header_value(
///     "session",
///     "abc123",
///     &CookieOptions::new().secure(true).same_site(SameSite::Lax).http_only(true),
/// )?;
/// assert_eq!(header, "session=abc123; Path=/; Secure; SameSite=Lax; HttpOnly");
/// # Ok::<(), clientstore::base::storeerror::StoreError>(())
/// ```
pub fn build_header_value<T: Serialize + ?Sized>(
    key: &str,
    value: &T,
    options: &CookieOptions,
) -> Result<String, StoreError> {
    build_header_value_with(key, value, options, &CookieDefaults::default())
}

/// [`build_header_value`] with explicit defaults.
pub fn build_header_value_with<T: Serialize + ?Sized>(
    key: &str,
    value: &T,
    options: &CookieOptions,
    defaults: &CookieDefaults,
) -> Result<String, StoreError> {
    let text = serialize_value(key, value)?;
    let directives = options.resolve(defaults, OffsetDateTime::now_utc())?;
    compose(key, &text, &directives, DirectiveStyle::Header)
}
