//! Key/value storage areas.
//!
//! - [`KeyValueStore`](adapter::KeyValueStore): JSON-valued adapter over a
//!   storage area, in persistent (`localStorage`) and session
//!   (`sessionStorage`) variants
//! - [`MemoryStorage`](memory::MemoryStorage): quota-limited in-memory area
//! - [`persistence`]: save/load a [`MemoryStorage`](memory::MemoryStorage) as JSON
//!
//! Keys are opaque; namespacing is up to the caller. The two areas never
//! share entries.

pub mod adapter;
pub mod memory;
pub mod persistence;
