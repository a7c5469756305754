//! Chat subsystem.
//!
//! # Data Flow
//! ```text
//! WebSocket join (authenticated)
//!     → rooms.rs (subscribe to room channel)
//!     → history.rs (replay recent lines to joiner)
//!     → join notice broadcast
//!
//! Inbound text frame
//!     → format "<user>: <text>"
//!     → history.rs (append, trim to capacity)
//!     → rooms.rs (broadcast to members)
//!
//! Disconnect
//!     → leave notice broadcast
//!     → rooms.rs (drop room when last member leaves)
//! ```
//!
//! # Design Decisions
//! - Rooms and history are independent: history survives empty rooms
//! - Broadcast channels bound memory; slow members lag, never block
//! - All state is in-memory and process-lifetime

pub mod history;
pub mod rooms;

pub use history::MessageHistory;
pub use rooms::RoomRegistry;
