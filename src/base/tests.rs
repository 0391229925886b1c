use crate::base::storeerror::{ErrorKind, StoreError};

fn json_error() -> serde_json::Error {
    serde_json::from_str::<serde_json::Value>("{not json").unwrap_err()
}

#[test]
fn test_error_kind_mapping() {
    assert_eq!(
        StoreError::no_context("localStorage").kind(),
        ErrorKind::NoContext
    );
    assert_eq!(
        StoreError::serialize("k", json_error()).kind(),
        ErrorKind::Serialization
    );
    assert_eq!(
        StoreError::invalid_option("expires", "not finite").kind(),
        ErrorKind::Serialization
    );
    assert_eq!(
        StoreError::deserialize("k", json_error()).kind(),
        ErrorKind::Deserialization
    );
    assert_eq!(StoreError::backend("boom").kind(), ErrorKind::Store);

    let quota = StoreError::QuotaExceeded {
        key: "k".to_string(),
        needed: 10,
        quota: 5,
    };
    assert_eq!(quota.kind(), ErrorKind::Store);
}

#[test]
fn test_error_messages_name_the_key() {
    let err = StoreError::deserialize("profile", json_error());
    assert!(err.to_string().contains("'profile'"));

    let err = StoreError::no_context("document.cookie");
    assert_eq!(
        err.to_string(),
        "No browser context: document.cookie is unavailable"
    );
    assert!(err.is_no_context());
}

#[test]
fn test_error_kind_display() {
    assert_eq!(ErrorKind::NoContext.to_string(), "no_context");
    assert_eq!(ErrorKind::Store.as_str(), "store");
}
