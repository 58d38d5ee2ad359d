//! Smoothing and threat classification.
//!
//! Single-pole EMA over raw distance, clamp to the sensor range, and tier
//! classification against the zone thresholds. The engine is the only
//! writer of `SmoothedState`; consumers get copies.

use crate::config::{FilterCfg, ZoneCfg};
use crate::error::{BuildError, Result};
use crate::types::{RawSample, SmoothedState, ThreatTier};
use crate::util::flip_angle;

pub struct SmoothingEngine {
    alpha: f32,
    zones: ZoneCfg,
    state: SmoothedState,
}

impl SmoothingEngine {
    pub fn new(filter: FilterCfg, zones: ZoneCfg) -> Result<Self> {
        let alpha = filter.ema_alpha;
        if !alpha.is_finite() || alpha <= 0.0 || alpha > 1.0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "ema_alpha must be in (0.0, 1.0]",
            )));
        }
        if !(zones.red.is_finite() && zones.yellow.is_finite() && zones.max_distance.is_finite()) {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "zone thresholds must be finite",
            )));
        }
        if !(0.0 < zones.red && zones.red < zones.yellow && zones.yellow <= zones.max_distance) {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "zones must satisfy 0 < red < yellow <= max_distance",
            )));
        }
        // Cold start: full range, i.e. "nothing detected".
        let state = SmoothedState {
            angle: 0.0,
            display_angle: flip_angle(0.0),
            raw_distance: zones.max_distance,
            smoothed_distance: zones.max_distance,
            tier: classify(zones.max_distance, &zones),
        };
        Ok(Self {
            alpha,
            zones,
            state,
        })
    }

    /// Fold one raw sample into the smoothed state and return the new
    /// snapshot. Infallible: every accepted sample produces a state.
    pub fn ingest(&mut self, sample: &RawSample) -> SmoothedState {
        if !sample.distance.is_finite() || !sample.angle.is_finite() {
            // The parser already rejects these; keep the last state if one
            // slips through another path.
            return self.state;
        }
        let smoothed = sample.distance * self.alpha + self.state.smoothed_distance * (1.0 - self.alpha);
        let smoothed = smoothed.clamp(0.0, self.zones.max_distance);
        self.state = SmoothedState {
            angle: sample.angle,
            display_angle: flip_angle(sample.angle),
            raw_distance: sample.distance,
            smoothed_distance: smoothed,
            tier: classify(smoothed, &self.zones),
        };
        self.state
    }

    /// Current snapshot without folding anything in.
    pub fn state(&self) -> SmoothedState {
        self.state
    }

    pub fn zones(&self) -> ZoneCfg {
        self.zones
    }
}

/// Boundary values belong to the stricter tier (`<=`, not `<`).
fn classify(smoothed: f32, zones: &ZoneCfg) -> ThreatTier {
    if smoothed <= zones.red {
        ThreatTier::Critical
    } else if smoothed <= zones.yellow {
        ThreatTier::Warning
    } else {
        ThreatTier::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn sample(angle: f32, distance: f32) -> RawSample {
        RawSample {
            angle,
            distance,
            arrival: Instant::now(),
        }
    }

    #[test]
    fn cold_start_is_full_range_normal() {
        let e = SmoothingEngine::new(FilterCfg::default(), ZoneCfg::default()).unwrap();
        assert_eq!(e.state().smoothed_distance, 100.0);
        assert_eq!(e.state().tier, ThreatTier::Normal);
    }

    #[test]
    fn ema_is_convex_combination() {
        let mut e = SmoothingEngine::new(FilterCfg::default(), ZoneCfg::default()).unwrap();
        let s = e.ingest(&sample(0.0, 50.0));
        // 50 * 0.2 + 100 * 0.8
        assert!((s.smoothed_distance - 90.0).abs() < 1e-4);
        let s = e.ingest(&sample(0.0, 50.0));
        assert!((s.smoothed_distance - 82.0).abs() < 1e-4);
    }

    #[test]
    fn saturates_at_max_distance() {
        let mut e = SmoothingEngine::new(FilterCfg::default(), ZoneCfg::default()).unwrap();
        let s = e.ingest(&sample(0.0, 100_000.0));
        assert_eq!(s.smoothed_distance, 100.0);
    }

    #[test]
    fn boundary_values_take_the_stricter_tier() {
        let zones = ZoneCfg::default();
        assert_eq!(classify(25.0, &zones), ThreatTier::Critical);
        assert_eq!(classify(25.001, &zones), ThreatTier::Warning);
        assert_eq!(classify(35.0, &zones), ThreatTier::Warning);
        assert_eq!(classify(35.001, &zones), ThreatTier::Normal);
    }

    #[test]
    fn display_angle_is_flipped() {
        let mut e = SmoothingEngine::new(FilterCfg::default(), ZoneCfg::default()).unwrap();
        let s = e.ingest(&sample(0.0, 10.0));
        assert_eq!(s.display_angle, 180.0);
        let s = e.ingest(&sample(270.0, 10.0));
        assert_eq!(s.display_angle, 90.0);
    }

    #[test]
    fn rejects_bad_alpha_and_zone_order() {
        assert!(SmoothingEngine::new(FilterCfg { ema_alpha: 0.0 }, ZoneCfg::default()).is_err());
        assert!(SmoothingEngine::new(FilterCfg { ema_alpha: 1.5 }, ZoneCfg::default()).is_err());
        let bad = ZoneCfg {
            red: 40.0,
            yellow: 35.0,
            max_distance: 100.0,
        };
        assert!(SmoothingEngine::new(FilterCfg::default(), bad).is_err());
    }
}
