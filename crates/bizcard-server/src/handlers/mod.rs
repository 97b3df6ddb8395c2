//! Route handlers, one module per area of the service.

pub mod admin;
pub mod cards;
pub mod public;
pub mod vcard;
