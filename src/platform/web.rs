//! Browser bindings over `web-sys`.
//!
//! The handles are stateless: every call re-resolves `window` so the types
//! stay `Send + Sync` and never outlive the page objects they touch.

use crate::base::storeerror::StoreError;
use crate::platform::{CookieDocument, Platform, StorageBackend, StorageKind};
use std::sync::Arc;
use web_sys::wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlDocument, Storage};

/// The live browser page.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebPlatform;

impl Platform for WebPlatform {
    fn cookie_document(&self) -> Option<Arc<dyn CookieDocument>> {
        html_document()?;
        tracing::debug!("document.cookie available");
        Some(Arc::new(WebDocument))
    }

    fn storage(&self, kind: StorageKind) -> Option<Arc<dyn StorageBackend>> {
        match web_storage(kind) {
            Ok(_) => {
                tracing::debug!(store = %kind, "storage area available");
                Some(Arc::new(WebStorage { kind }))
            }
            Err(e) => {
                // Sandboxed iframes and disabled storage throw on access.
                tracing::debug!(store = %kind, error = %e, "storage area unavailable");
                None
            }
        }
    }
}

fn html_document() -> Option<HtmlDocument> {
    web_sys::window()?
        .document()?
        .dyn_into::<HtmlDocument>()
        .ok()
}

fn web_storage(kind: StorageKind) -> Result<Storage, StoreError> {
    let window = web_sys::window().ok_or_else(|| StoreError::no_context(kind.as_str()))?;
    let storage = match kind {
        StorageKind::Local => window.local_storage(),
        StorageKind::Session => window.session_storage(),
    }
    .map_err(js_error)?;
    storage.ok_or_else(|| StoreError::no_context(kind.as_str()))
}

fn js_error(err: JsValue) -> StoreError {
    if let Some(exception) = err.dyn_ref::<web_sys::DomException>() {
        return StoreError::backend(format!("{}: {}", exception.name(), exception.message()));
    }
    StoreError::backend(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

struct WebDocument;

impl CookieDocument for WebDocument {
    fn cookie_string(&self) -> Result<String, StoreError> {
        let document = html_document().ok_or_else(|| StoreError::no_context("document.cookie"))?;
        document.cookie().map_err(js_error)
    }

    fn write_cookie(&self, line: &str) -> Result<(), StoreError> {
        let document = html_document().ok_or_else(|| StoreError::no_context("document.cookie"))?;
        document.set_cookie(line).map_err(js_error)
    }
}

struct WebStorage {
    kind: StorageKind,
}

impl StorageBackend for WebStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        web_storage(self.kind)?.get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        web_storage(self.kind)?
            .set_item(key, value)
            .map_err(js_error)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        web_storage(self.kind)?.remove_item(key).map_err(js_error)
    }

    fn clear(&self) -> Result<(), StoreError> {
        web_storage(self.kind)?.clear().map_err(js_error)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let storage = web_storage(self.kind)?;
        let len = storage.length().map_err(js_error)?;
        let mut keys = Vec::with_capacity(len as usize);
        for index in 0..len {
            if let Some(key) = storage.key(index).map_err(js_error)? {
                keys.push(key);
            }
        }
        Ok(keys)
    }

    fn len(&self) -> Result<usize, StoreError> {
        let len = web_storage(self.kind)?.length().map_err(js_error)?;
        Ok(len as usize)
    }
}
