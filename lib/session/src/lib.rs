//! Per-browser session token cache for amber-turnstile.
//!
//! This crate provides:
//! - `Session` and `SessionId` types holding the tokens obtained from the
//!   identity provider and their absolute expiry
//! - An in-memory `SessionStore` keyed by opaque session identifiers
//!
//! A session is "authenticated" iff it holds an access token and the current
//! instant is strictly before its expiry. The store never mutates sessions on
//! read: an expired session simply answers as anonymous until it is replaced
//! by a fresh login or removed by logout.
//!
//! # Example
//!
//! ```
//! use amber_turnstile_session::{Session, SessionStore, generate_session_id};
//! use chrono::{Duration, Utc};
//!
//! let store = SessionStore::new();
//! let id = generate_session_id();
//! let now = Utc::now();
//!
//! store.put(
//!     id.clone(),
//!     Session::new("tok_abc".to_string(), None, now + Duration::seconds(60)),
//! );
//!
//! assert!(store.is_authenticated(&id, now));
//! store.clear(&id);
//! assert!(!store.is_authenticated(&id, now));
//! ```

pub mod session;
pub mod store;

// Re-export main types at crate root
pub use session::{Session, SessionId};
pub use store::{SessionStore, generate_session_id};
