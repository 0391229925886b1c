//! Lenient-API helpers.
//!
//! The strict adapter methods return `Result<_, StoreError>`. The lenient
//! methods are thin wrappers that log the failure and hand back a neutral
//! default, so nothing crosses the adapter boundary as an error.

use crate::base::storeerror::{ErrorKind, StoreError};

/// Extension trait for collapsing a store `Result` into a logged default.
pub trait StoreResultExt<T> {
    /// Log a failed `operation` and substitute `default`.
    ///
    /// # Example
    /// ```ignore
    /// use clientstore::base::context::StoreResultExt;
    ///
    /// let theme: Option<String> = store.try_get("theme").or_log("get", None);
    /// ```
    fn or_log(self, operation: &'static str, default: T) -> T;

    /// Like [`or_log`](StoreResultExt::or_log) with `T::default()`.
    fn or_log_default(self, operation: &'static str) -> T
    where
        T: Default;
}

impl<T> StoreResultExt<T> for Result<T, StoreError> {
    fn or_log(self, operation: &'static str, default: T) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                log_failure(operation, &err);
                default
            }
        }
    }

    fn or_log_default(self, operation: &'static str) -> T
    where
        T: Default,
    {
        self.or_log(operation, T::default())
    }
}

fn log_failure(operation: &'static str, err: &StoreError) {
    let kind = err.kind();
    match kind {
        ErrorKind::NoContext | ErrorKind::Deserialization => {
            tracing::warn!(operation, kind = %kind, error = %err, "storage operation degraded");
        }
        ErrorKind::Serialization | ErrorKind::Store => {
            tracing::error!(operation, kind = %kind, error = %err, "storage operation failed");
        }
    }
}
