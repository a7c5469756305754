//! Per-room message history.
//!
//! # Responsibilities
//! - Append chat lines per room, trimming to a bounded capacity
//! - Replay the most recent lines to a joining client
//!
//! # Design Decisions
//! - Only chat lines are recorded; join/leave notices are transient
//! - History outlives empty rooms; a re-created room sees its old lines
//! - Capacity is passed per call so config reloads apply immediately

use std::collections::VecDeque;

use dashmap::DashMap;

/// Concurrent room name → bounded line log.
#[derive(Debug, Default)]
pub struct MessageHistory {
    rooms: DashMap<String, VecDeque<String>>,
}

impl MessageHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line to a room's log, trimming the oldest past `capacity`.
    pub fn append(&self, room: &str, line: &str, capacity: usize) {
        let mut log = self.rooms.entry(room.to_string()).or_default();
        log.push_back(line.to_string());
        while log.len() > capacity {
            log.pop_front();
        }
    }

    /// Up to the last `count` lines of a room, oldest first.
    pub fn recent(&self, room: &str, count: usize) -> Vec<String> {
        match self.rooms.get(room) {
            Some(log) => {
                let skip = log.len().saturating_sub(count);
                log.iter().skip(skip).cloned().collect()
            }
            None => Vec::new(),
        }
    }

    /// Total lines currently retained for a room.
    pub fn len(&self, room: &str) -> usize {
        self.rooms.get(room).map(|log| log.len()).unwrap_or(0)
    }

    pub fn is_empty(&self, room: &str) -> bool {
        self.len(room) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_recent_preserve_order() {
        let history = MessageHistory::new();
        history.append("lobby", "a: 1", 10);
        history.append("lobby", "a: 2", 10);
        history.append("lobby", "b: 3", 10);

        assert_eq!(history.recent("lobby", 10), vec!["a: 1", "a: 2", "b: 3"]);
        assert_eq!(history.recent("lobby", 2), vec!["a: 2", "b: 3"]);
    }

    #[test]
    fn capacity_trims_oldest() {
        let history = MessageHistory::new();
        for i in 0..8 {
            history.append("lobby", &format!("line {i}"), 5);
        }
        assert_eq!(history.len("lobby"), 5);
        assert_eq!(history.recent("lobby", 1), vec!["line 7"]);
        assert_eq!(history.recent("lobby", 100).first().unwrap(), "line 3");
    }

    #[test]
    fn unknown_room_replays_nothing() {
        let history = MessageHistory::new();
        assert!(history.recent("nowhere", 100).is_empty());
        assert!(history.is_empty("nowhere"));
    }

    #[test]
    fn shrinking_capacity_applies_on_next_append() {
        let history = MessageHistory::new();
        for i in 0..10 {
            history.append("lobby", &format!("line {i}"), 10);
        }
        history.append("lobby", "line 10", 4);
        assert_eq!(history.len("lobby"), 4);
        assert_eq!(history.recent("lobby", 1), vec!["line 10"]);
    }

    #[test]
    fn rooms_do_not_share_history() {
        let history = MessageHistory::new();
        history.append("red", "r", 10);
        history.append("blue", "b", 10);
        assert_eq!(history.recent("red", 10), vec!["r"]);
        assert_eq!(history.recent("blue", 10), vec!["b"]);
    }
}
