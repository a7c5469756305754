//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, request ID)
//!     → diagnostics.rs (/test, /chatting probes)
//!     → auth handlers (/register, /login)
//!     → websocket.rs (/ws chat sessions)
//! ```

pub mod diagnostics;
pub mod server;
pub mod websocket;

pub use server::{AppState, HttpServer};
