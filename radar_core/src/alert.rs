//! Cooldown-gated beep scheduling.
//!
//! A rate-limiter, not a queue: suppressed alerts are dropped, never
//! deferred. Cooldown and tone scale with proximity so a closing object
//! beeps faster and higher.

use std::time::{Duration, Instant};

use crate::config::ZoneCfg;
use crate::types::{Beep, SmoothedState, ThreatTier};

pub struct AlertScheduler {
    zones: ZoneCfg,
    last_fire: Option<Instant>,
}

impl AlertScheduler {
    pub fn new(zones: ZoneCfg) -> Self {
        Self {
            zones,
            last_fire: None,
        }
    }

    /// Decide whether to fire for this state. Fires only for WARNING and
    /// CRITICAL tiers and only when the proximity-scaled cooldown has
    /// elapsed since the previous fire; the first qualifying call always
    /// fires.
    pub fn maybe_fire(&mut self, state: &SmoothedState, now: Instant) -> Option<Beep> {
        let d = state.smoothed_distance;
        let (cooldown_s, freq_hz) = match state.tier {
            ThreatTier::Critical => (
                0.05 + (d / self.zones.red) * 0.1,
                1500.0 + (1.0 - d / self.zones.red) * 500.0,
            ),
            ThreatTier::Warning => (
                0.2 + (d / self.zones.yellow) * 0.3,
                1000.0 + (1.0 - d / self.zones.yellow) * 400.0,
            ),
            ThreatTier::Normal => return None,
        };

        if let Some(last) = self.last_fire
            && now.saturating_duration_since(last) <= Duration::from_secs_f32(cooldown_s)
        {
            return None;
        }

        self.last_fire = Some(now);
        let duration_ms = (50.0 + (self.zones.yellow - d) * 10.0).clamp(30.0, 200.0);
        Some(Beep {
            frequency_hz: freq_hz.round() as u32,
            duration_ms: duration_ms.round() as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(tier: ThreatTier, distance: f32) -> SmoothedState {
        SmoothedState {
            angle: 0.0,
            display_angle: 180.0,
            raw_distance: distance,
            smoothed_distance: distance,
            tier,
        }
    }

    #[test]
    fn normal_tier_never_fires() {
        let mut a = AlertScheduler::new(ZoneCfg::default());
        assert!(a.maybe_fire(&state(ThreatTier::Normal, 50.0), Instant::now()).is_none());
    }

    #[test]
    fn critical_tone_scales_with_proximity() {
        let mut a = AlertScheduler::new(ZoneCfg::default());
        let t0 = Instant::now();
        // d=10, red=25: freq = 1500 + 0.6*500, duration clamped to 200.
        let beep = a.maybe_fire(&state(ThreatTier::Critical, 10.0), t0).unwrap();
        assert_eq!(beep.frequency_hz, 1800);
        assert_eq!(beep.duration_ms, 200);
    }

    #[test]
    fn warning_tone_uses_yellow_zone_scaling() {
        let mut a = AlertScheduler::new(ZoneCfg::default());
        // d=35, yellow=35: freq = 1000 + 0*400 = 1000, duration = 50.
        let beep = a
            .maybe_fire(&state(ThreatTier::Warning, 35.0), Instant::now())
            .unwrap();
        assert_eq!(beep.frequency_hz, 1000);
        assert_eq!(beep.duration_ms, 50);
    }

    #[test]
    fn second_call_inside_cooldown_is_suppressed() {
        let mut a = AlertScheduler::new(ZoneCfg::default());
        let t0 = Instant::now();
        let s = state(ThreatTier::Critical, 10.0);
        assert!(a.maybe_fire(&s, t0).is_some());
        // cooldown = 0.05 + 0.4*0.1 = 0.09 s; 10 ms later must suppress.
        assert!(a.maybe_fire(&s, t0 + Duration::from_millis(10)).is_none());
        // And past the cooldown it fires again.
        assert!(a.maybe_fire(&s, t0 + Duration::from_millis(100)).is_some());
    }

    #[test]
    fn duration_clamps_to_floor_for_far_warnings() {
        let mut a = AlertScheduler::new(ZoneCfg {
            red: 25.0,
            yellow: 35.0,
            max_distance: 100.0,
        });
        // d just under yellow: 50 + (35-34)*10 = 60; d above yellow would not fire.
        let beep = a
            .maybe_fire(&state(ThreatTier::Warning, 34.0), Instant::now())
            .unwrap();
        assert_eq!(beep.duration_ms, 60);
    }
}
