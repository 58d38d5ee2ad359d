//! Core data types flowing through the pipeline.

use std::time::Instant;

/// One decoded measurement from the sensor. Immutable once created;
/// discarded after being folded into the smoothed state.
#[derive(Debug, Clone, Copy)]
pub struct RawSample {
    /// Bearing in degrees, `[0, 360)` by convention of the sensor firmware.
    pub angle: f32,
    /// Distance in the sensor's native unit.
    pub distance: f32,
    /// Wall-clock arrival time, stamped by the ingestion worker.
    pub arrival: Instant,
}

/// Proximity urgency derived from smoothed distance against the zone
/// thresholds. Boundary values belong to the stricter tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ThreatTier {
    Normal,
    Warning,
    Critical,
}

/// Current filtered view of the sensor. Single writer: `SmoothingEngine`.
/// Downstream consumers receive copies, never references into the engine.
#[derive(Debug, Clone, Copy)]
pub struct SmoothedState {
    /// Raw bearing as reported by the sensor (degrees).
    pub angle: f32,
    /// Bearing in the display convention: 0 deg at the LEFT of the disc,
    /// i.e. `(angle + 180) mod 360`.
    pub display_angle: f32,
    /// Last raw distance folded in.
    pub raw_distance: f32,
    /// EMA-smoothed distance, clamped to `[0, max_distance]`.
    pub smoothed_distance: f32,
    pub tier: ThreatTier,
}

/// One point of the fading detection trail, in display space relative to
/// the disc center.
#[derive(Debug, Clone, Copy)]
pub struct TrailPoint {
    pub x: f32,
    pub y: f32,
    /// 255 on insertion, decremented per render tick; 0 means invisible.
    pub visibility: u8,
    /// Tier at insertion time; selects the point color.
    pub tier: ThreatTier,
}

/// A WARNING or CRITICAL detection retained for the on-screen threat log.
#[derive(Debug, Clone, Copy)]
pub struct ThreatEvent {
    pub angle: f32,
    pub distance: f32,
    pub tier: ThreatTier,
    pub at: Instant,
}

/// Tone parameters handed to the audio collaborator on a fired alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Beep {
    pub frequency_hz: u32,
    pub duration_ms: u32,
}
