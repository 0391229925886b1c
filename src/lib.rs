//! # clientstore
//!
//! Client-side key/value persistence for Rust web front ends: cookies,
//! `localStorage` and `sessionStorage` behind small typed adapters.
//!
//! Values go in as anything `serde` can serialize and come back typed. The
//! same adapters run in the browser (`wasm32`, via `web-sys`), against an
//! in-process browser emulation, or on a host with no browser at all, where
//! every operation quietly degrades to a neutral default.
//!
//! ## Features
//!
//! - **Cookies**: typed get/set/remove over `document.cookie`, expiry in days
//!   or as an instant, path/domain/secure/SameSite scoping
//! - **Cookie headers**: build `Set-Cookie` values (including `HttpOnly`) and
//!   parse `Cookie` headers without a browser
//! - **Storage areas**: JSON-valued persistent and session stores
//! - **Explicit failures**: every operation has a `try_*` form returning
//!   [`StoreError`](base::storeerror::StoreError) with a four-way
//!   [`ErrorKind`](base::storeerror::ErrorKind)
//! - **Browser emulation**: [`MemoryPlatform`](platform::memory::MemoryPlatform)
//!   applies browser cookie rules and storage quotas in-process
//!
//! ## Quick Start
//!
//! ```rust
//! use clientstore::context::ClientStorage;
//! use clientstore::cookies::options::CookieOptions;
//! use clientstore::platform::memory::MemoryPlatform;
//!
//! let platform = MemoryPlatform::new();
//! let storage = ClientStorage::new(&platform);
//!
//! storage.cookies().set("token", "Bearer abc", &CookieOptions::new().expires(7.0));
//! storage.local().set("theme", "dark");
//!
//! assert_eq!(storage.cookies().get_as::<String>("token").as_deref(), Some("Bearer abc"));
//! assert_eq!(storage.local().get::<String>("theme").as_deref(), Some("dark"));
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error types and lenient-API helpers
//! - [`platform`] - Browser capability seam and its implementations
//! - [`cookies`] - Cookie adapter, header codec and emulated jar
//! - [`storage`] - Key/value storage adapter and in-memory areas
//! - [`context`] - Application-level container and configuration

pub mod base;
pub mod context;
pub mod cookies;
pub mod platform;
pub mod storage;
