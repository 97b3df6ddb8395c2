//! Core types and trait definitions for the bizcard service.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! remote document collection and the local mirror are reached through the
//! traits in [`store`]; concrete backends live in their own crates.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod card;
pub mod defaults;
pub mod error;
pub mod memory;
pub mod portfolio;
pub mod store;

pub use card::{CardRecord, ContactInfo, Lang, Localized, SocialLinks};
pub use error::{Error, Result};
pub use portfolio::{ProjectRecord, ServiceRecord};
pub use store::{CardStore, Listing, SlugPolicy, Source, StoreOptions};
