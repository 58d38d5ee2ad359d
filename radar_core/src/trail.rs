//! Fixed-capacity, time-decaying ring of recent detections.
//!
//! Recency is the only retention criterion: a FIFO ring, not a priority
//! structure. Faded points stay in their slot (bounded no-op memory) until
//! new insertions evict them.

use std::collections::VecDeque;

use crate::config::TrailCfg;
use crate::types::{SmoothedState, TrailPoint};
use crate::util::polar_to_screen;

pub struct TrailBuffer {
    points: VecDeque<TrailPoint>,
    capacity: usize,
    fade_speed: u8,
    radar_radius: f32,
    max_distance: f32,
}

impl TrailBuffer {
    pub fn new(cfg: TrailCfg, max_distance: f32) -> Self {
        Self {
            points: VecDeque::with_capacity(cfg.capacity),
            capacity: cfg.capacity.max(1),
            fade_speed: cfg.fade_speed.max(1),
            radar_radius: cfg.radar_radius,
            max_distance,
        }
    }

    /// Push a fresh fully-visible point for this detection, evicting the
    /// oldest slot when at capacity.
    pub fn record(&mut self, state: &SmoothedState) {
        let (x, y) = polar_to_screen(
            state.display_angle,
            state.smoothed_distance,
            self.max_distance,
            self.radar_radius,
        );
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(TrailPoint {
            x,
            y,
            visibility: u8::MAX,
            tier: state.tier,
        });
    }

    /// Fade every point by one tick. Invoked once per render cycle.
    pub fn decay_tick(&mut self) {
        for p in &mut self.points {
            p.visibility = p.visibility.saturating_sub(self.fade_speed);
        }
    }

    /// Insertion order, oldest first. Re-iterable within a frame.
    pub fn snapshot(&self) -> impl Iterator<Item = &TrailPoint> + Clone {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
