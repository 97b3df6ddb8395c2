//! Firestore REST backend for the remote card collection.
//!
//! Talks to the `documents` endpoints of the Firestore v1 REST API with
//! [`reqwest`]. Cards are stored one document per card, keyed by card id, with
//! the record's JSON encoded as Firestore typed `fields`.

mod client;
mod config;

pub mod error;
pub mod value;

pub use client::FirestoreCollection;
pub use config::FirestoreConfig;
pub use error::{Error, Result};
