//! Runtime configuration structs for the pipeline core.
//!
//! These are the validated in-memory configs used by the engine, trail,
//! and pipeline. They are separate from the TOML-deserialized schema in
//! `radar_config`; see `conversions` for the bridge.

/// Threat zone thresholds in the sensor's native distance unit.
///
/// Invariant (checked at build time): `0 < red < yellow <= max_distance`.
#[derive(Debug, Clone, Copy)]
pub struct ZoneCfg {
    /// At or below this distance a detection is CRITICAL.
    pub red: f32,
    /// At or below this distance (and above `red`) a detection is WARNING.
    pub yellow: f32,
    /// Sensor range ceiling; smoothed readings saturate here.
    pub max_distance: f32,
}

impl Default for ZoneCfg {
    fn default() -> Self {
        Self {
            red: 25.0,
            yellow: 35.0,
            max_distance: 100.0,
        }
    }
}

/// Smoothing filter configuration.
#[derive(Debug, Clone, Copy)]
pub struct FilterCfg {
    /// EMA smoothing factor, range (0.0, 1.0]. Single-pole EMA is used for
    /// O(1) memory and low latency on a continuous stream.
    pub ema_alpha: f32,
}

impl Default for FilterCfg {
    fn default() -> Self {
        Self { ema_alpha: 0.2 }
    }
}

/// Detection trail configuration.
#[derive(Debug, Clone, Copy)]
pub struct TrailCfg {
    /// Ring capacity; recency is the only retention criterion.
    pub capacity: usize,
    /// Visibility decrement per render tick.
    pub fade_speed: u8,
    /// Radius of the radar disc in display units.
    pub radar_radius: f32,
}

impl Default for TrailCfg {
    fn default() -> Self {
        Self {
            capacity: 180,
            fade_speed: 3,
            radar_radius: 450.0,
        }
    }
}

/// Tick pacing and source read timeout.
#[derive(Debug, Clone, Copy)]
pub struct TickCfg {
    /// Pipeline/render tick period in milliseconds (16 targets ~60 Hz).
    pub period_ms: u64,
    /// Max wait per source read (ms); bounds how long `stop` can take.
    pub read_timeout_ms: u64,
}

impl Default for TickCfg {
    fn default() -> Self {
        Self {
            period_ms: 16,
            read_timeout_ms: 100,
        }
    }
}

/// Threat log ring capacity.
pub const THREAT_LOG_CAPACITY: usize = 20;
