//! Bounded append-only ring of notable detections for the on-screen log.

use std::collections::VecDeque;
use std::time::Instant;

use crate::config::THREAT_LOG_CAPACITY;
use crate::types::{SmoothedState, ThreatEvent, ThreatTier};

pub struct ThreatLog {
    events: VecDeque<ThreatEvent>,
    capacity: usize,
    total_recorded: u64,
}

impl Default for ThreatLog {
    fn default() -> Self {
        Self::new(THREAT_LOG_CAPACITY)
    }
}

impl ThreatLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            total_recorded: 0,
        }
    }

    /// Append an event when the tier is WARNING or CRITICAL. Every
    /// qualifying sample is logged; the ring capacity is the only bound.
    pub fn record_if_notable(&mut self, state: &SmoothedState, now: Instant) {
        if state.tier == ThreatTier::Normal {
            return;
        }
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(ThreatEvent {
            angle: state.angle,
            distance: state.smoothed_distance,
            tier: state.tier,
            at: now,
        });
        self.total_recorded += 1;
    }

    /// Events ever recorded, unaffected by ring eviction. A stable cursor
    /// for consumers that must not miss events sharing a timestamp (a
    /// burst drained in one tick is stamped with the same instant).
    pub fn total_recorded(&self) -> u64 {
        self.total_recorded
    }

    /// The most recent `n` events in insertion order (oldest of the n
    /// first), stable across calls.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &ThreatEvent> {
        let skip = self.events.len().saturating_sub(n);
        self.events.iter().skip(skip)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
