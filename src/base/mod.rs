//! Base types and error handling.
//!
//! - [`StoreError`](storeerror::StoreError): every failure an adapter can report
//! - [`ErrorKind`](storeerror::ErrorKind): the four-way classification callers branch on
//! - [`StoreResultExt`](context::StoreResultExt): log-and-default helpers for the lenient API

pub mod context;
pub mod storeerror;

#[cfg(test)]
mod tests;
