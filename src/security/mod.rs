//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! POST /register, POST /login:
//!     → rate_limit.rs (check per-IP token bucket)
//!     → Pass to the auth handlers
//! ```
//!
//! # Design Decisions
//! - Only the credential endpoints are limited; probes and established
//!   chat sessions are not
//! - Fail closed: a depleted bucket rejects with 429
//! - Body size is capped globally by the server middleware stack

pub mod rate_limit;

pub use rate_limit::RateLimiterState;
