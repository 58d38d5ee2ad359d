//! `From` implementations bridging `radar_config` types to `radar_core` types.
//!
//! These eliminate manual field-by-field mapping in the CLI.

use crate::config::{FilterCfg, TickCfg, TrailCfg, ZoneCfg};

// ── ZoneCfg ──────────────────────────────────────────────────────────────────

impl From<&radar_config::ZonesCfg> for ZoneCfg {
    fn from(c: &radar_config::ZonesCfg) -> Self {
        Self {
            red: c.red,
            yellow: c.yellow,
            max_distance: c.max_distance,
        }
    }
}

// ── FilterCfg ────────────────────────────────────────────────────────────────

impl From<&radar_config::FilterCfg> for FilterCfg {
    fn from(c: &radar_config::FilterCfg) -> Self {
        Self {
            ema_alpha: c.ema_alpha,
        }
    }
}

// ── TrailCfg ─────────────────────────────────────────────────────────────────

impl From<&radar_config::TrailCfg> for TrailCfg {
    fn from(c: &radar_config::TrailCfg) -> Self {
        Self {
            capacity: c.capacity,
            fade_speed: c.fade_speed,
            radar_radius: c.radar_radius,
        }
    }
}

// ── TickCfg ──────────────────────────────────────────────────────────────────

impl From<&radar_config::TickCfg> for TickCfg {
    fn from(c: &radar_config::TickCfg) -> Self {
        Self {
            period_ms: c.period_ms,
            read_timeout_ms: c.read_timeout_ms,
        }
    }
}
