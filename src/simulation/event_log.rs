//! Bounded log of recent events for HUD feeds.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A logged event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Session time in seconds when the event occurred
    pub time: f32,
    /// Human-readable description of the event
    pub description: String,
    /// Category hint for the HUD
    pub category: EventCategory,
}

/// Event categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    /// Kills
    Combat,
    /// Applied evolutions
    Evolution,
    /// Biome changes
    Biome,
    /// Hits taken or dodged
    Damage,
    /// Player death
    Death,
}

/// Event log that tracks recent events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLog {
    /// Recent events, newest first
    events: VecDeque<LoggedEvent>,
    /// Maximum number of events to keep
    max_events: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(20)
    }
}

impl EventLog {
    /// Creates a new event log with specified capacity
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events),
            max_events,
        }
    }

    /// Adds a new event to the log
    pub fn log(&mut self, time: f32, description: String, category: EventCategory) {
        self.events.push_front(LoggedEvent {
            time,
            description,
            category,
        });

        while self.events.len() > self.max_events {
            self.events.pop_back();
        }
    }

    /// Returns all events, newest first
    pub fn events(&self) -> &VecDeque<LoggedEvent> {
        &self.events
    }
}
