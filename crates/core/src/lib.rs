//! Profile Service Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the profile service.
//! It is database- and broker-agnostic and defines traits that are implemented
//! by the `storage-sqlite` and `messaging` crates.

pub mod errors;
pub mod events;
pub mod profiles;
pub mod registrations;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
