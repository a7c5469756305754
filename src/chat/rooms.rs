//! Room registry and fan-out.
//!
//! # Responsibilities
//! - Create rooms on first join
//! - Hand each member a broadcast receiver and the room's sender
//! - Drop rooms when the last member leaves
//!
//! # Design Decisions
//! - One bounded broadcast channel per room; publishing never blocks
//! - Slow members lag (and miss frames) instead of stalling the room
//! - Registry is lock-free at the map level (sharded DashMap)

use dashmap::DashMap;
use tokio::sync::broadcast;

/// Frames buffered per room before slow members start lagging.
const ROOM_CHANNEL_CAPACITY: usize = 256;

/// Concurrent room name → broadcast channel map.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: DashMap<String, broadcast::Sender<String>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join a room, creating it if needed.
    ///
    /// The receiver sees every line published after this call. The sender
    /// may be used to publish to the whole room, including ourselves.
    pub fn join(&self, room: &str) -> (broadcast::Sender<String>, broadcast::Receiver<String>) {
        let sender = self
            .rooms
            .entry(room.to_string())
            .or_insert_with(|| broadcast::channel(ROOM_CHANNEL_CAPACITY).0)
            .clone();
        let receiver = sender.subscribe();
        (sender, receiver)
    }

    /// Remove the room if nobody is subscribed anymore.
    ///
    /// Call after dropping the receiver obtained from [`join`](Self::join).
    pub fn leave(&self, room: &str) {
        self.rooms
            .remove_if(room, |_, sender| sender.receiver_count() == 0);
    }

    /// Current member count of a room (0 if the room does not exist).
    pub fn member_count(&self, room: &str) -> usize {
        self.rooms
            .get(room)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    /// Number of live rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
