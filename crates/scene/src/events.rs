use std::collections::VecDeque;

use serde::Serialize;
use stations::{StationKind, StationStatus};

/// Interaction trace for one view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InteractionEvent {
    Loaded {
        count: usize,
    },
    HoverEntered {
        id: String,
    },
    HoverLeft {
        id: String,
    },
    Selected {
        id: String,
    },
    Deselected {
        id: String,
    },
    FilterApplied {
        kind: Option<StationKind>,
        status: Option<StationStatus>,
        visible: usize,
    },
    Focused {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
    FocusSkipped {
        id: String,
    },
    Cleared,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedEvent {
    /// Handler dispatch sequence number, starting at 0.
    pub seq: u64,
    #[serde(flatten)]
    pub event: InteractionEvent,
}

/// Events kept by default before the oldest are dropped.
pub const DEFAULT_LOG_CAPACITY: usize = 1024;

/// Bounded event buffer. Once full, each new event evicts the oldest.
/// Sequence numbers are never reused, so gaps show what was dropped.
#[derive(Debug)]
pub struct InteractionLog {
    capacity: usize,
    next_seq: u64,
    events: VecDeque<LoggedEvent>,
}

impl Default for InteractionLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

impl InteractionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A zero capacity is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            next_seq: 0,
            events: VecDeque::with_capacity(capacity.min(DEFAULT_LOG_CAPACITY)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn emit(&mut self, event: InteractionEvent) {
        tracing::trace!(seq = self.next_seq, ?event, "interaction event");
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(LoggedEvent {
            seq: self.next_seq,
            event,
        });
        self.next_seq += 1;
    }

    /// Buffered events, oldest first.
    pub fn events(&self) -> &VecDeque<LoggedEvent> {
        &self.events
    }

    /// Takes the buffered events; sequence numbers keep counting.
    pub fn drain(&mut self) -> Vec<LoggedEvent> {
        self.events.drain(..).collect()
    }
}
