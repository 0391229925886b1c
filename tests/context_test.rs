use clientstore::context::{ClientStorage, ClientStorageConfig};
use clientstore::cookies::options::{CookieOptions, SameSite};
use clientstore::cookies::persistence::{load_cookies, save_cookies};
use clientstore::platform::memory::MemoryPlatform;
use clientstore::platform::Headless;
use clientstore::storage::memory::DEFAULT_QUOTA_BYTES;
use clientstore::storage::persistence::{load_storage, save_storage};
use tempfile::tempdir;

#[test]
fn test_context_wires_all_adapters() {
    let platform = MemoryPlatform::new();
    let storage = ClientStorage::new(&platform);

    storage
        .cookies()
        .set("token", "Bearer abc", &CookieOptions::new().expires(7.0));
    storage.local().set("theme", "dark");
    storage.session().set("wizard_step", &3);

    assert_eq!(
        storage.cookies().get_as::<String>("token").as_deref(),
        Some("Bearer abc")
    );
    assert_eq!(storage.local().get::<String>("theme").as_deref(), Some("dark"));
    assert_eq!(storage.session().get::<u32>("wizard_step"), Some(3));
}

#[test]
fn test_two_contexts_share_the_platform() {
    let platform = MemoryPlatform::new();
    let a = ClientStorage::new(&platform);
    let b = ClientStorage::new(&platform);

    a.local().set("k", &1);
    assert_eq!(b.local().get::<i32>("k"), Some(1));
}

#[test]
fn test_headless_context_never_fails() {
    let storage = ClientStorage::new(&Headless);
    storage.cookies().set("k", "v", &CookieOptions::new());
    storage.local().set("k", &1);
    assert_eq!(storage.cookies().get("k"), None);
    assert_eq!(storage.local().get::<i32>("k"), None);
    assert_eq!(storage.session().count(), 0);
    storage.close();
}

#[test]
fn test_config_file_drives_cookie_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("clientstore.json");
    std::fs::write(
        &path,
        r#"{"cookie_secure": true, "cookie_same_site": "lax", "clear_session_on_close": true}"#,
    )
    .unwrap();

    let config = ClientStorageConfig::from_file(&path).unwrap();
    let platform = MemoryPlatform::new();
    let storage = ClientStorage::builder().config(config).build(&platform);

    storage.cookies().set("k", "v", &CookieOptions::new());
    let stored = platform.cookie_jar().iter_all_cookies().next().unwrap();
    assert!(stored.secure);
    assert_eq!(stored.same_site, Some(SameSite::Lax));

    storage.session().set("s", &1);
    storage.close();
    assert!(platform.session_storage().snapshot().is_empty());
}

#[test]
fn test_restart_keeps_local_storage_and_cookies() {
    let dir = tempdir().unwrap();
    let local_path = dir.path().join("local.json");
    let cookie_path = dir.path().join("cookies.json");

    {
        let platform = MemoryPlatform::new();
        let storage = ClientStorage::new(&platform);
        storage.local().set("draft", &vec!["line one", "line two"]);
        storage.session().set("scratch", &true);
        storage
            .cookies()
            .set("lang", "en", &CookieOptions::new().expires(30.0));
        storage.close();

        save_storage(platform.local_storage(), &local_path).unwrap();
        save_cookies(platform.cookie_jar(), &cookie_path).unwrap();
    }

    let platform = MemoryPlatform::new()
        .with_local_storage(load_storage(&local_path, Some(DEFAULT_QUOTA_BYTES)).unwrap())
        .with_cookie_jar(load_cookies(&cookie_path).unwrap());
    let storage = ClientStorage::new(&platform);

    assert_eq!(
        storage.local().get::<Vec<String>>("draft"),
        Some(vec!["line one".to_string(), "line two".to_string()])
    );
    assert!(!storage.session().has("scratch"));
    assert_eq!(storage.cookies().get_as::<String>("lang").as_deref(), Some("en"));
}
