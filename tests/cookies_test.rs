use clientstore::base::storeerror::ErrorKind;
use clientstore::cookies::adapter::CookieAdapter;
use clientstore::cookies::header::{build_header_value, parse_from_header};
use clientstore::cookies::options::{CookieOptions, Expiry, SameSite};
use clientstore::platform::memory::MemoryPlatform;
use clientstore::platform::Headless;
use serde_json::json;
use time::{Duration, OffsetDateTime};

#[test]
fn test_roundtrip_values() {
    let platform = MemoryPlatform::new();
    let cookies = CookieAdapter::new(&platform);

    let values = [
        json!("plain text"),
        json!(12.5),
        json!(true),
        json!([1, "two", null]),
        json!({"user": {"id": 7, "tags": ["a; b", "c=d"]}}),
    ];
    for (i, value) in values.iter().enumerate() {
        let key = format!("key{}", i);
        cookies.set(&key, value, &CookieOptions::new());
        assert_eq!(cookies.get(&key).as_ref(), Some(value), "key {}", key);
    }
}

#[test]
fn test_absent_key() {
    let platform = MemoryPlatform::new();
    let cookies = CookieAdapter::new(&platform);
    assert_eq!(cookies.get("never-written"), None);
    assert_eq!(cookies.try_get("never-written").unwrap(), None);
    assert!(!cookies.has("never-written"));
}

#[test]
fn test_overwrite() {
    let platform = MemoryPlatform::new();
    let cookies = CookieAdapter::new(&platform);
    cookies.set("k", &1, &CookieOptions::new());
    cookies.set("k", &2, &CookieOptions::new());
    assert_eq!(cookies.get("k"), Some(json!(2)));
    assert_eq!(cookies.get_all().len(), 1);
}

#[test]
fn test_remove() {
    let platform = MemoryPlatform::new();
    let cookies = CookieAdapter::new(&platform);
    cookies.set("k", "v", &CookieOptions::new());
    cookies.remove("k", &CookieOptions::new());
    assert_eq!(cookies.get("k"), None);
    assert!(!cookies.has("k"));
}

#[test]
fn test_past_expiry_acts_as_removal() {
    let platform = MemoryPlatform::new();
    let cookies = CookieAdapter::new(&platform);

    cookies.set("a", "b", &CookieOptions::new().expires(-1_i32));
    assert_eq!(cookies.get("a"), None);

    cookies.set("a", "b", &CookieOptions::new());
    cookies.set("a", "b", &CookieOptions::new().expires(Expiry::Days(-1.0)));
    assert_eq!(cookies.get("a"), None);
}

#[test]
fn test_absolute_expiry() {
    let platform = MemoryPlatform::new();
    let cookies = CookieAdapter::new(&platform);
    let tomorrow = OffsetDateTime::now_utc() + Duration::days(1);

    cookies.set("a", "b", &CookieOptions::new().expires(tomorrow));
    assert!(cookies.has("a"));

    let stored = platform.cookie_jar().iter_all_cookies().next().unwrap();
    let expiry = stored.expiration_time.unwrap();
    // Second precision on the wire.
    assert!((expiry - tomorrow).abs() < Duration::seconds(1));
}

#[test]
fn test_token_scenario() {
    let platform = MemoryPlatform::new();
    let cookies = CookieAdapter::new(&platform);

    cookies.set("token", "Bearer abc", &CookieOptions::new());
    assert_eq!(cookies.get("token"), Some(json!("Bearer abc")));

    cookies.set("other", &json!({"x": 1}), &CookieOptions::new());
    cookies.clear_all();
    assert!(cookies.get_all().is_empty());
}

#[test]
fn test_get_all_is_not_json_decoded() {
    let platform = MemoryPlatform::new();
    let cookies = CookieAdapter::new(&platform);
    cookies.set("obj", &json!({"a": 1}), &CookieOptions::new());
    cookies.set("txt", "hello world", &CookieOptions::new());

    let all = cookies.get_all();
    assert_eq!(all["obj"], r#"{"a":1}"#);
    assert_eq!(all["txt"], "hello world");
}

#[test]
fn test_secure_cookie_on_insecure_page_is_dropped() {
    let platform = MemoryPlatform::at("http://example.com/").unwrap();
    let cookies = CookieAdapter::new(&platform);
    cookies.set("s", "v", &CookieOptions::new().secure(true));
    assert!(!cookies.has("s"));
    cookies.set("p", "v", &CookieOptions::new());
    assert!(cookies.has("p"));
}

#[test]
fn test_domain_scoping() {
    let platform = MemoryPlatform::at("https://app.example.com/").unwrap();
    let cookies = CookieAdapter::new(&platform);

    cookies.set("shared", "1", &CookieOptions::new().domain("example.com"));
    cookies.set("bad", "1", &CookieOptions::new().domain("com"));
    assert!(cookies.has("shared"));
    assert!(!cookies.has("bad"));

    let scope = CookieOptions::new().domain("example.com");
    cookies.remove("shared", &scope);
    assert!(!cookies.has("shared"));
}

#[test]
fn test_http_only_cookie_invisible_to_adapter() {
    let platform = MemoryPlatform::new();
    let cookies = CookieAdapter::new(&platform);
    let header = build_header_value("sid", "secret", &CookieOptions::new().http_only(true)).unwrap();
    platform.receive_set_cookie(&header);

    assert!(!cookies.has("sid"));
    assert_eq!(platform.cookie_jar().total_cookie_count(), 1);
}

#[test]
fn test_script_writes_never_carry_http_only() {
    let platform = MemoryPlatform::new();
    let cookies = CookieAdapter::new(&platform);
    cookies.set("k", "v", &CookieOptions::new().http_only(true));
    // The flag is dropped, so the browser accepts the write.
    assert!(cookies.has("k"));
}

#[test]
fn test_header_roundtrip() {
    let header = build_header_value("k", "v", &CookieOptions::new()).unwrap();
    let parsed = parse_from_header(&header);
    assert_eq!(parsed.get("k").map(String::as_str), Some("v"));
}

#[test]
fn test_header_canonical_directives() {
    let header = build_header_value(
        "id",
        &99,
        &CookieOptions::new()
            .path("/api")
            .domain("example.com")
            .secure(true)
            .same_site(SameSite::Strict)
            .http_only(true),
    )
    .unwrap();
    assert_eq!(
        header,
        "id=99; Path=/api; Domain=example.com; Secure; SameSite=Strict; HttpOnly"
    );
}

#[test]
fn test_header_duplicates_first_wins() {
    let parsed = parse_from_header("a=first; b=2; a=second");
    assert_eq!(parsed["a"], "first");
    assert_eq!(parsed.len(), 2);
}

#[test]
fn test_no_context_is_safe() {
    let cookies = CookieAdapter::new(&Headless);

    cookies.set("k", "v", &CookieOptions::new());
    assert_eq!(cookies.get("k"), None);
    assert_eq!(cookies.get_as::<String>("k"), None);
    assert!(!cookies.has("k"));
    assert!(cookies.get_all().is_empty());
    cookies.remove("k", &CookieOptions::new());
    cookies.clear_all();

    assert_eq!(
        cookies
            .try_set("k", "v", &CookieOptions::new())
            .unwrap_err()
            .kind(),
        ErrorKind::NoContext
    );
    assert_eq!(cookies.try_get_all().unwrap_err().kind(), ErrorKind::NoContext);
}

#[test]
fn test_invalid_options_are_serialization_errors() {
    let platform = MemoryPlatform::new();
    let cookies = CookieAdapter::new(&platform);

    let err = cookies
        .try_set("k", "v", &CookieOptions::new().expires(f64::NAN))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Serialization);

    let err = cookies.try_set("", "v", &CookieOptions::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Serialization);
    assert!(cookies.get_all().is_empty());
}
