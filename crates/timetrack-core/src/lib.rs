//! Core types, traits and services for the time-tracking record service.
//!
//! This crate is deliberately free of HTTP and database dependencies. Storage
//! backends implement [`store::TrackerStore`]; the external passport registry
//! is reached through [`resolver::IdentityResolver`]. The services in
//! [`services`] orchestrate both and are what the HTTP layer calls into.

pub mod error;
pub mod memory;
pub mod passport;
pub mod people;
pub mod resolver;
pub mod services;
pub mod store;
pub mod task;
pub mod user;

pub use error::{Error, Result};
