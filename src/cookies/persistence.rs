//! Cookie jar snapshots.
//!
//! Lets a non-browser host keep the emulated jar across restarts. Session
//! cookies (no expiry) are saved too; the caller decides whether a restart
//! ends the session.

use crate::cookies::canonical_cookie::CanonicalCookie;
use crate::cookies::jar::CookieJar;
use crate::cookies::options::SameSite;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use time::OffsetDateTime;

#[derive(Serialize, Deserialize, Debug, Clone)]
struct PersistentCookie {
    name: String,
    value: String,
    domain: String,
    path: String,
    secure: bool,
    http_only: bool,
    host_only: bool,
    #[serde(default)]
    same_site: Option<SameSite>,
    created_unix_secs: i64,
    expires_unix_secs: Option<i64>,
}

impl From<CanonicalCookie> for PersistentCookie {
    fn from(cookie: CanonicalCookie) -> Self {
        Self {
            name: cookie.name,
            value: cookie.value,
            domain: cookie.domain,
            path: cookie.path,
            secure: cookie.secure,
            http_only: cookie.http_only,
            host_only: cookie.host_only,
            same_site: cookie.same_site,
            created_unix_secs: cookie.creation_time.unix_timestamp(),
            expires_unix_secs: cookie.expiration_time.map(|t| t.unix_timestamp()),
        }
    }
}

/// Write every cookie in `jar` to `path` as JSON.
pub fn save_cookies(jar: &CookieJar, path: &Path) -> io::Result<()> {
    let cookies: Vec<PersistentCookie> = jar.iter_all_cookies().map(Into::into).collect();
    let json = serde_json::to_string_pretty(&cookies)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    tracing::debug!(path = %path.display(), count = cookies.len(), "cookie jar saved");
    Ok(())
}

/// Load a jar written by [`save_cookies`]. Expired cookies are dropped.
pub fn load_cookies(path: &Path) -> io::Result<CookieJar> {
    let json = fs::read_to_string(path)?;
    let saved: Vec<PersistentCookie> =
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let jar = CookieJar::new();
    let now = OffsetDateTime::now_utc();

    for pc in saved {
        let expiration_time = pc
            .expires_unix_secs
            .and_then(|s| OffsetDateTime::from_unix_timestamp(s).ok());
        if expiration_time.is_some_and(|t| t <= now) {
            continue;
        }
        let creation_time = OffsetDateTime::from_unix_timestamp(pc.created_unix_secs).unwrap_or(now);

        jar.set_canonical_cookie(CanonicalCookie {
            name: pc.name,
            value: pc.value,
            domain: pc.domain,
            path: pc.path,
            creation_time,
            expiration_time,
            secure: pc.secure,
            http_only: pc.http_only,
            host_only: pc.host_only,
            same_site: pc.same_site,
        });
    }

    tracing::debug!(path = %path.display(), count = jar.total_cookie_count(), "cookie jar loaded");
    Ok(jar)
}
