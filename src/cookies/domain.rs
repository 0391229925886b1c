//! Domain and path scoping rules for the emulated cookie jar.
//!
//! Domain checks consult Mozilla's Public Suffix List (via the `psl` crate)
//! so a page cannot scope a cookie to `.com` or `.co.uk`.

use psl::{List, Psl};

/// True if `domain` is itself a listed public suffix ("com", "co.uk",
/// "github.io"). Unlisted TLDs such as `localhost` are not.
pub fn is_public_suffix(domain: &str) -> bool {
    let domain = domain.trim_start_matches('.').to_ascii_lowercase();
    match List.suffix(domain.as_bytes()) {
        Some(suffix) => suffix.is_known() && suffix.as_bytes() == domain.as_bytes(),
        None => false,
    }
}

/// RFC 6265 domain-match: `host` equals `domain` or is a subdomain of it.
pub fn domain_matches(host: &str, domain: &str) -> bool {
    let domain = domain.trim_start_matches('.');
    if host.eq_ignore_ascii_case(domain) {
        return true;
    }
    if host.len() <= domain.len() {
        return false;
    }
    let split = host.len() - domain.len();
    host.is_char_boundary(split)
        && host[split..].eq_ignore_ascii_case(domain)
        && host.as_bytes()[split - 1] == b'.'
}

/// Whether a page on `host` may scope a cookie to `cookie_domain`.
///
/// The domain must cover the host and must not be a public suffix, unless
/// it is exactly the host (browsers then store the cookie host-only).
pub fn is_valid_cookie_domain(cookie_domain: &str, host: &str) -> bool {
    let cookie_domain = cookie_domain.trim_start_matches('.');
    if cookie_domain.is_empty() || !domain_matches(host, cookie_domain) {
        return false;
    }
    !is_public_suffix(cookie_domain) || host.eq_ignore_ascii_case(cookie_domain)
}

/// RFC 6265 path-match.
pub fn path_matches(cookie_path: &str, request_path: &str) -> bool {
    if request_path == cookie_path {
        return true;
    }
    if !request_path.starts_with(cookie_path) {
        return false;
    }
    cookie_path.ends_with('/') || request_path.as_bytes().get(cookie_path.len()) == Some(&b'/')
}

/// The host and each parent domain, most specific first.
/// `a.b.example.com` yields `a.b.example.com`, `b.example.com`, `example.com`.
pub(crate) fn candidate_domains(host: &str) -> Vec<String> {
    let mut domains = vec![host.to_ascii_lowercase()];
    let parts: Vec<&str> = host.split('.').collect();
    for i in 1..parts.len().saturating_sub(1) {
        domains.push(parts[i..].join(".").to_ascii_lowercase());
    }
    domains
}
