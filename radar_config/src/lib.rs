#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and validation for the radar display stack.
//!
//! `Config` and sub-structs are deserialized from TOML and validated before
//! the pipeline is assembled. Every section has defaults matching the sensor
//! firmware the display was built against, so an empty file is a valid
//! config.
use serde::Deserialize;

/// Serial link settings.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SerialCfg {
    /// Device path; when absent a per-OS default is used.
    pub device: Option<String>,
    /// Baud rate for the sensor link.
    pub baud: u32,
}

impl Default for SerialCfg {
    fn default() -> Self {
        Self {
            device: None,
            baud: 115_200,
        }
    }
}

impl SerialCfg {
    /// Configured device, falling back to the conventional USB-serial path
    /// for the current OS. Port enumeration heuristics are deliberately not
    /// implemented here.
    pub fn device_or_default(&self) -> String {
        if let Some(d) = &self.device {
            return d.clone();
        }
        if cfg!(target_os = "macos") {
            "/dev/cu.usbserial-0001".to_string()
        } else if cfg!(windows) {
            "COM3".to_string()
        } else {
            "/dev/ttyUSB0".to_string()
        }
    }
}

/// Threat zone thresholds in the sensor's native distance unit.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct ZonesCfg {
    /// Distances at or below this are CRITICAL.
    pub red: f32,
    /// Distances at or below this (and above red) are WARNING.
    pub yellow: f32,
    /// Sensor range ceiling; smoothed readings saturate here.
    pub max_distance: f32,
}

impl Default for ZonesCfg {
    fn default() -> Self {
        Self {
            red: 25.0,
            yellow: 35.0,
            max_distance: 100.0,
        }
    }
}

/// Smoothing filter settings.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct FilterCfg {
    /// EMA smoothing factor, range (0.0, 1.0].
    pub ema_alpha: f32,
}

impl Default for FilterCfg {
    fn default() -> Self {
        Self { ema_alpha: 0.2 }
    }
}

/// Detection trail settings.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct TrailCfg {
    /// Ring capacity; oldest point evicted on overflow.
    pub capacity: usize,
    /// Visibility decrement applied per render tick.
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

/// Pipeline tick pacing and the ingest read timeout.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct TickCfg {
    /// Render/pipeline tick period (ms). 16 targets ~60 Hz.
    pub period_ms: u64,
    /// Max wait per source read (ms); keeps stop() responsive.
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

/// Audible alert settings.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct AudioCfg {
    pub enabled: bool,
}

impl Default for AudioCfg {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Config {
    pub serial: SerialCfg,
    pub zones: ZonesCfg,
    pub filter: FilterCfg,
    pub trail: TrailCfg,
    pub tick: TickCfg,
    pub audio: AudioCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    /// Validate cross-field constraints that serde cannot express.
    pub fn validate(&self) -> eyre::Result<()> {
        let z = &self.zones;
        for (name, v) in [
            ("zones.red", z.red),
            ("zones.yellow", z.yellow),
            ("zones.max_distance", z.max_distance),
        ] {
            if !v.is_finite() {
                eyre::bail!("{name} must be finite");
            }
        }
        if z.red <= 0.0 {
            eyre::bail!("zones.red must be > 0");
        }
        if z.yellow <= z.red {
            eyre::bail!("zones.yellow must be > zones.red");
        }
        if z.max_distance < z.yellow {
            eyre::bail!("zones.max_distance must be >= zones.yellow");
        }
        let alpha = self.filter.ema_alpha;
        if !alpha.is_finite() || alpha <= 0.0 || alpha > 1.0 {
            eyre::bail!("filter.ema_alpha must be in (0.0, 1.0]");
        }
        if self.trail.capacity == 0 {
            eyre::bail!("trail.capacity must be > 0");
        }
        if self.trail.fade_speed == 0 {
            eyre::bail!("trail.fade_speed must be > 0");
        }
        if !self.trail.radar_radius.is_finite() || self.trail.radar_radius <= 0.0 {
            eyre::bail!("trail.radar_radius must be > 0");
        }
        if self.tick.period_ms == 0 {
            eyre::bail!("tick.period_ms must be >= 1");
        }
        if self.tick.read_timeout_ms == 0 {
            eyre::bail!("tick.read_timeout_ms must be >= 1");
        }
        if self.serial.baud == 0 {
            eyre::bail!("serial.baud must be > 0");
        }
        Ok(())
    }
}
