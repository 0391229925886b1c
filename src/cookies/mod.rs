//! Cookie access for browser code and cookie headers for everything else.
//!
//! - **Adapter**: [`CookieAdapter`](adapter::CookieAdapter) reads and writes
//!   `document.cookie` with typed values
//! - **Wire format**: [`header`] composes `Set-Cookie` values and parses
//!   `Cookie` headers without a browser
//! - **Options**: [`CookieOptions`](options::CookieOptions) per write,
//!   [`CookieDefaults`](options::CookieDefaults) per adapter
//! - **Emulated jar**: [`CookieJar`](jar::CookieJar) stores cookies the way a
//!   browser does, for [`MemoryPlatform`](crate::platform::memory::MemoryPlatform)
//! - **Persistence**: save/load a jar to disk
//!
//! # Writing and reading
//!
//! ```
//! use clientstore::cookies::adapter::CookieAdapter;
//! use clientstore::cookies::options::{CookieOptions, SameSite};
//! use clientstore::platform::memory::MemoryPlatform;
//!
//! let platform = MemoryPlatform::new();
//! let cookies = CookieAdapter::new(&platform);
//!
//! cookies.set("cart", &vec![1, 2, 3], &CookieOptions::new().expires(1.0).same_site(SameSite::Lax));
//! assert_eq!(cookies.get_as::<Vec<u32>>("cart"), Some(vec![1, 2, 3]));
//!
//! cookies.clear_all();
//! assert!(cookies.get_all().is_empty());
//! ```
//!
//! # Server side
//!
//! ```
//! use clientstore::cookies::header::{build_header_value, parse_from_header};
//! use clientstore::cookies::options::CookieOptions;
//!
//! let set_cookie = build_header_value("sid", "s3cr3t", &CookieOptions::new().http_only(true))?;
//! assert_eq!(set_cookie, "sid=s3cr3t; Path=/; HttpOnly");
//!
//! let jar = parse_from_header("sid=s3cr3t; theme=dark");
//! assert_eq!(jar["theme"], "dark");
//! # Ok::<(), clientstore::base::storeerror::StoreError>(())
//! ```

pub mod adapter;
pub mod canonical_cookie;
pub mod domain;
pub mod header;
pub mod jar;
pub mod options;
pub mod persistence;
