use crate::cookies::canonical_cookie::{CanonicalCookie, CookieSource, Rejection};
use crate::cookies::domain;
use dashmap::DashMap;
use std::sync::Arc;
use time::OffsetDateTime;
use url::Url;

/// Maximum cookies per domain (Chromium default).
const MAX_COOKIES_PER_DOMAIN: usize = 50;

/// Maximum total cookies across all domains.
const MAX_COOKIES_TOTAL: usize = 3000;

/// What happened to a cookie line handed to the jar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    Stored,
    /// The line carried a past expiry; any matching cookie was removed.
    Deleted,
    Rejected(Rejection),
}

/// The browser-side cookie store behind an emulated `document.cookie`.
///
/// Cookies are indexed by domain. Clones share the same store.
#[derive(Clone, Default)]
pub struct CookieJar {
    store: Arc<DashMap<String, Vec<CanonicalCookie>>>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one cookie line from a page (or response) at `url`.
    pub fn set_from_line(&self, url: &Url, line: &str, source: CookieSource) -> SetOutcome {
        let now = OffsetDateTime::now_utc();
        let cookie = match CanonicalCookie::from_line(url, line, source, now) {
            Ok(cookie) => cookie,
            Err(reason) => {
                tracing::warn!(url = %url, ?reason, "cookie rejected");
                return SetOutcome::Rejected(reason);
            }
        };

        if cookie.is_expired(now) {
            self.delete_matching(&cookie);
            return SetOutcome::Deleted;
        }

        self.set_canonical_cookie(cookie);
        SetOutcome::Stored
    }

    pub fn set_canonical_cookie(&self, cookie: CanonicalCookie) {
        let mut entry = self.store.entry(cookie.domain.clone()).or_default();

        entry.retain(|c| !c.same_slot(&cookie));

        // Per-domain limit, oldest first.
        while entry.len() >= MAX_COOKIES_PER_DOMAIN {
            let Some(oldest_idx) = entry
                .iter()
                .enumerate()
                .min_by_key(|(_, c)| c.creation_time)
                .map(|(i, _)| i)
            else {
                break;
            };
            entry.remove(oldest_idx);
        }

        entry.push(cookie);
        drop(entry); // Release the shard lock before scanning every domain.

        self.enforce_global_limit();
    }

    fn delete_matching(&self, cookie: &CanonicalCookie) {
        if let Some(mut entry) = self.store.get_mut(&cookie.domain) {
            let before = entry.len();
            entry.retain(|c| !c.same_slot(cookie));
            if entry.len() != before {
                tracing::debug!(name = %cookie.name, domain = %cookie.domain, "cookie deleted");
            }
        }
    }

    fn enforce_global_limit(&self) {
        while self.total_cookie_count() > MAX_COOKIES_TOTAL {
            let mut oldest: Option<(String, usize, OffsetDateTime)> = None;

            for entry in self.store.iter() {
                for (idx, cookie) in entry.value().iter().enumerate() {
                    let older = oldest
                        .as_ref()
                        .map_or(true, |(_, _, t)| cookie.creation_time < *t);
                    if older {
                        oldest = Some((entry.key().clone(), idx, cookie.creation_time));
                    }
                }
            }

            let Some((domain, idx, _)) = oldest else {
                break;
            };
            if let Some(mut entry) = self.store.get_mut(&domain) {
                if idx < entry.len() {
                    entry.remove(idx);
                }
            }
        }
    }

    /// Unexpired cookies visible at `url`, longest path first, then oldest
    /// first.
    pub fn get_cookies_for_url(&self, url: &Url) -> Vec<CanonicalCookie> {
        let host = url.host_str().unwrap_or("");
        let now = OffsetDateTime::now_utc();
        let mut result = Vec::new();

        for candidate in domain::candidate_domains(host) {
            if let Some(entry) = self.store.get(&candidate) {
                result.extend(
                    entry
                        .iter()
                        .filter(|c| !c.is_expired(now) && c.is_visible_at(url))
                        .cloned(),
                );
            }
        }

        result.sort_by(|a, b| {
            b.path
                .len()
                .cmp(&a.path.len())
                .then_with(|| a.creation_time.cmp(&b.creation_time))
        });
        result
    }

    /// The `document.cookie` string for a page at `url`. `HttpOnly` cookies
    /// are not exposed to scripts.
    pub fn script_cookie_string(&self, url: &Url) -> String {
        self.get_cookies_for_url(url)
            .iter()
            .filter(|c| !c.http_only)
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn total_cookie_count(&self) -> usize {
        self.store.iter().map(|e| e.value().len()).sum()
    }

    pub fn clear(&self) {
        self.store.clear();
    }

    /// Every stored cookie, for persistence.
    pub fn iter_all_cookies(&self) -> impl Iterator<Item = CanonicalCookie> + '_ {
        self.store.iter().flat_map(|entry| entry.value().clone())
    }
}
