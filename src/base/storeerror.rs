use thiserror::Error;

/// Coarse classification of a [`StoreError`].
///
/// Every adapter failure falls into exactly one of these buckets:
///
/// | Kind | Cause |
/// |------|-------|
/// | `NoContext` | document or storage area unavailable (non-browser host) |
/// | `Serialization` | value could not be turned into cookie/JSON text |
/// | `Deserialization` | stored text is not valid JSON for the requested type |
/// | `Store` | the underlying store refused the operation (quota, host error) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NoContext,
    Serialization,
    Deserialization,
    Store,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NoContext => "no_context",
            ErrorKind::Serialization => "serialization",
            ErrorKind::Deserialization => "deserialization",
            ErrorKind::Store => "store",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No browser context: {store} is unavailable")]
    NoContext { store: &'static str },

    #[error("Failed to serialize value for '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to deserialize value for '{key}': {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage quota exceeded writing '{key}' ({needed} bytes needed, quota {quota})")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    #[error("Invalid cookie option {directive}: {reason}")]
    InvalidOption {
        directive: &'static str,
        reason: String,
    },

    #[error("Underlying store error: {message}")]
    Backend { message: String },
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NoContext { .. } => ErrorKind::NoContext,
            StoreError::Serialize { .. } | StoreError::InvalidOption { .. } => {
                ErrorKind::Serialization
            }
            StoreError::Deserialize { .. } => ErrorKind::Deserialization,
            StoreError::QuotaExceeded { .. } | StoreError::Backend { .. } => ErrorKind::Store,
        }
    }

    pub fn no_context(store: &'static str) -> Self {
        StoreError::NoContext { store }
    }

    pub fn serialize(key: impl Into<String>, source: serde_json::Error) -> Self {
        StoreError::Serialize {
            key: key.into(),
            source,
        }
    }

    pub fn deserialize(key: impl Into<String>, source: serde_json::Error) -> Self {
        StoreError::Deserialize {
            key: key.into(),
            source,
        }
    }

    pub fn invalid_option(directive: &'static str, reason: impl Into<String>) -> Self {
        StoreError::InvalidOption {
            directive,
            reason: reason.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend {
            message: message.into(),
        }
    }

    /// True when the failure only means the host has no browser context.
    pub fn is_no_context(&self) -> bool {
        matches!(self, StoreError::NoContext { .. })
    }
}
