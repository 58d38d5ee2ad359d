use proptest::prelude::*;
use radar_core::config::{FilterCfg, TrailCfg, ZoneCfg};
use radar_core::engine::SmoothingEngine;
use radar_core::trail::TrailBuffer;
use radar_core::types::{RawSample, SmoothedState, ThreatTier};
use std::time::Instant;

fn sample(angle: f32, distance: f32) -> RawSample {
    RawSample {
        angle,
        distance,
        arrival: Instant::now(),
    }
}

proptest! {
    // The smoothed distance is a convex combination clamped to the sensor
    // range, so it can never leave [0, max_distance] regardless of input.
    #[test]
    fn smoothed_distance_stays_in_sensor_range(
        distances in proptest::collection::vec(-1_000.0f32..10_000.0, 1..200),
        alpha in 0.01f32..=1.0,
    ) {
        let zones = ZoneCfg::default();
        let mut engine = SmoothingEngine::new(FilterCfg { ema_alpha: alpha }, zones).unwrap();
        for d in distances {
            let s = engine.ingest(&sample(0.0, d));
            prop_assert!(s.smoothed_distance >= 0.0);
            prop_assert!(s.smoothed_distance <= zones.max_distance);
        }
    }

    // Tier ordering must agree with distance ordering: closer is never a
    // milder tier.
    #[test]
    fn closer_distance_never_yields_milder_tier(
        d1 in 0.0f32..100.0,
        d2 in 0.0f32..100.0,
    ) {
        let zones = ZoneCfg::default();
        // alpha = 1.0 makes the smoothed value track the raw input exactly.
        let mut engine = SmoothingEngine::new(FilterCfg { ema_alpha: 1.0 }, zones).unwrap();
        let t1 = engine.ingest(&sample(0.0, d1)).tier;
        let t2 = engine.ingest(&sample(0.0, d2)).tier;
        if d1 <= d2 {
            // ThreatTier orders Normal < Warning < Critical.
            prop_assert!(t1 >= t2, "d1={d1} tier {t1:?} vs d2={d2} tier {t2:?}");
        }
    }

    // Display angle always lands in [0, 360) and is the 180-degree flip.
    #[test]
    fn display_angle_is_flipped_into_range(angle in -720.0f32..720.0) {
        let mut engine =
            SmoothingEngine::new(FilterCfg::default(), ZoneCfg::default()).unwrap();
        let s = engine.ingest(&sample(angle, 50.0));
        prop_assert!((0.0..360.0).contains(&s.display_angle));
        let expected = (angle + 180.0).rem_euclid(360.0);
        prop_assert!((s.display_angle - expected).abs() < 1e-3);
    }

    // The trail never exceeds its capacity and always evicts oldest-first.
    #[test]
    fn trail_is_bounded_and_fifo(n in 1usize..500, capacity in 1usize..200) {
        let cfg = TrailCfg { capacity, ..TrailCfg::default() };
        let mut trail = TrailBuffer::new(cfg, 100.0);
        for i in 0..n {
            let state = SmoothedState {
                angle: 0.0,
                display_angle: 180.0,
                raw_distance: i as f32 % 100.0,
                smoothed_distance: i as f32 % 100.0,
                tier: ThreatTier::Normal,
            };
            trail.record(&state);
            prop_assert!(trail.len() <= capacity);
        }
        prop_assert_eq!(trail.len(), n.min(capacity));
    }
}
