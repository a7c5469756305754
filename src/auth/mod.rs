//! Authentication subsystem.
//!
//! # Data Flow
//! ```text
//! POST /register (form)
//!     → users.rs (duplicate check)
//!     → password.rs (salt + hash, store)
//!
//! POST /login (form)
//!     → users.rs → password.rs (verify)
//!     → token.rs (issue signed JWT)
//!     → JSON response with bearer token
//!
//! WebSocket join (?token=...)
//!     → token.rs (verify signature + expiry)
//!     → username flows into the chat session
//! ```
//!
//! # Design Decisions
//! - Accounts are in-memory and process-lifetime; no external store
//! - Stored hashes only, never plaintext
//! - Unknown user and wrong password are indistinguishable to callers

pub mod handlers;
pub mod password;
pub mod token;
pub mod users;

pub use token::TokenError;
pub use users::{RegisterError, UserStore};
