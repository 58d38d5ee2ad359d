use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use radar_core::config::{FilterCfg, TrailCfg, ZoneCfg};
use radar_core::engine::SmoothingEngine;
use radar_core::pipeline::RadarPipeline;
use radar_core::trail::TrailBuffer;
use radar_core::types::RawSample;
use std::time::Instant;

// Synthetic sweep: rotating angle, distance as noisy sine over the range.
fn synth_sweep(n: usize, seed: u32) -> Vec<(f32, f32)> {
    // tiny PRNG
    let mut state = seed.max(1);
    let mut next_f32 = || {
        let mut x = state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        state = x;
        (x as f32) / (u32::MAX as f32 + 1.0)
    };
    let mut v = Vec::with_capacity(n);
    for i in 0..n {
        let angle = (i % 360) as f32;
        let t = i as f32 / 90.0;
        let base = 50.0 + t.sin() * 45.0;
        let noise = (next_f32() * 2.0 - 1.0) * 5.0;
        v.push((angle, (base + noise).max(0.0)));
    }
    v
}

pub fn bench_sample_path(c: &mut Criterion) {
    let mut g = c.benchmark_group("sample_path");
    if let Ok(ss) = std::env::var("BENCH_SAMPLE_SIZE") {
        if let Ok(n) = ss.parse::<usize>() {
            g.sample_size(n.max(1));
        }
    } else {
        g.sample_size(50);
    }
    if let Ok(ms) = std::env::var("BENCH_MEAS_MS")
        && let Ok(ms_u64) = ms.parse::<u64>()
    {
        g.measurement_time(std::time::Duration::from_millis(ms_u64));
    }

    let sweep = synth_sweep(10_000, 0xC0FFEE);
    let now = Instant::now();

    g.bench_function("apply_sample_10k", |b| {
        b.iter_batched(
            || {
                RadarPipeline::new(ZoneCfg::default(), FilterCfg::default(), TrailCfg::default())
                    .expect("default configs are valid")
            },
            |mut p| {
                for &(angle, distance) in &sweep {
                    let beep = p.apply_sample(
                        black_box(&RawSample {
                            angle,
                            distance,
                            arrival: now,
                        }),
                        now,
                    );
                    black_box(beep);
                }
            },
            BatchSize::SmallInput,
        )
    });

    g.bench_function("decay_tick_full_trail", |b| {
        b.iter_batched(
            || {
                let mut trail = TrailBuffer::new(TrailCfg::default(), 100.0);
                let mut engine =
                    SmoothingEngine::new(FilterCfg::default(), ZoneCfg::default())
                        .expect("default configs are valid");
                for &(angle, distance) in sweep.iter().take(200) {
                    let state = engine.ingest(&RawSample {
                        angle,
                        distance,
                        arrival: now,
                    });
                    trail.record(&state);
                }
                trail
            },
            |mut trail| {
                for _ in 0..1_000 {
                    trail.decay_tick();
                }
                black_box(trail.len());
            },
            BatchSize::SmallInput,
        )
    });
    g.finish();
}

criterion_group!(pipeline, bench_sample_path);
criterion_main!(pipeline);
