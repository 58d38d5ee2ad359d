//! Tone/cooldown formula cases for the alert scheduler.

use radar_core::alert::AlertScheduler;
use radar_core::config::ZoneCfg;
use radar_core::types::{SmoothedState, ThreatTier};
use rstest::rstest;
use std::time::Instant;

fn state(tier: ThreatTier, distance: f32) -> SmoothedState {
    SmoothedState {
        angle: 0.0,
        display_angle: 180.0,
        raw_distance: distance,
        smoothed_distance: distance,
        tier,
    }
}

// freq: critical = 1500 + (1 - d/red)*500, warning = 1000 + (1 - d/yellow)*400
// duration = clamp(50 + (yellow - d)*10, 30, 200)
#[rstest]
#[case::critical_point_blank(ThreatTier::Critical, 0.0, 2000, 200)]
#[case::critical_mid(ThreatTier::Critical, 10.0, 1800, 200)]
#[case::critical_at_red(ThreatTier::Critical, 25.0, 1500, 150)]
#[case::warning_just_inside(ThreatTier::Warning, 26.0, 1103, 140)]
#[case::warning_at_yellow(ThreatTier::Warning, 35.0, 1000, 50)]
fn tone_matches_proximity(
    #[case] tier: ThreatTier,
    #[case] distance: f32,
    #[case] frequency_hz: u32,
    #[case] duration_ms: u32,
) {
    let mut scheduler = AlertScheduler::new(ZoneCfg::default());
    let beep = scheduler
        .maybe_fire(&state(tier, distance), Instant::now())
        .expect("first qualifying call always fires");
    assert_eq!(beep.frequency_hz, frequency_hz);
    assert_eq!(beep.duration_ms, duration_ms);
}

#[rstest]
fn normal_never_fires_even_repeatedly() {
    let mut scheduler = AlertScheduler::new(ZoneCfg::default());
    for _ in 0..10 {
        assert!(
            scheduler
                .maybe_fire(&state(ThreatTier::Normal, 90.0), Instant::now())
                .is_none()
        );
    }
}
