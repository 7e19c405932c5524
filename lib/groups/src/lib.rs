//! Group membership API client for amber-turnstile.
//!
//! The identity provider's companion groups API answers "which groups does
//! the bearer of this token belong to". This crate wraps that single call;
//! interpretation of the payload is left to consumers.

pub mod client;
pub mod error;

// Re-export main types at crate root
pub use client::GroupsClient;
pub use error::GroupsError;
