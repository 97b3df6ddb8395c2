//! SQLite backend for the local card mirror.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod mirror;
mod schema;

pub mod error;

pub use error::{Error, Result};
pub use mirror::SqliteMirror;

#[cfg(test)]
mod tests;
