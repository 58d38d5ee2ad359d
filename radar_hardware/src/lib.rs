//! Sensor and audio collaborators for the radar pipeline.
//!
//! `SimulatedSource` and `ConsoleAudio` are always available and are the
//! defaults, so the whole stack runs on a dev machine with no sensor
//! attached. The real serial-port source is compiled in with the
//! `hardware` feature.

pub mod error;

#[cfg(feature = "hardware")]
mod serial;
#[cfg(feature = "hardware")]
pub use serial::SerialSource;

use radar_traits::{AudioSink, ByteSource};
use std::time::{Duration, Instant};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Synthetic sweeping sensor emitting `"<angle>,<distance>\n"` lines at a
/// steady rate. The distance random-walks across the range with an
/// occasional close approach so every threat tier shows up in a demo run.
pub struct SimulatedSource {
    angle: f32,
    distance: f32,
    rng: u32,
    started: Instant,
    lines_emitted: u64,
    lines_per_sec: u64,
}

impl SimulatedSource {
    pub fn new() -> Self {
        Self::with_rate(120)
    }

    pub fn with_rate(lines_per_sec: u64) -> Self {
        Self {
            angle: 0.0,
            distance: 80.0,
            rng: 0x1234_5678,
            started: Instant::now(),
            lines_emitted: 0,
            lines_per_sec: lines_per_sec.max(1),
        }
    }

    fn next_f32(&mut self) -> f32 {
        let mut x = self.rng;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng = x;
        (x as f32) / (u32::MAX as f32 + 1.0)
    }

    fn next_line(&mut self) -> String {
        self.angle = (self.angle + 2.0) % 360.0;
        // Random walk, biased back toward mid-range, with a rare lunge
        // toward the sensor so CRITICAL shows up without waiting long.
        let step = (self.next_f32() - 0.5) * 6.0;
        let pull = (55.0 - self.distance) * 0.02;
        self.distance = (self.distance + step + pull).clamp(5.0, 100.0);
        if self.next_f32() < 0.005 {
            self.distance = 5.0 + self.next_f32() * 15.0;
        }
        format!("{:.1},{:.1}\n", self.angle, self.distance)
    }
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteSource for SimulatedSource {
    fn read_available(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize, BoxError> {
        // Pace emission against wall time so the stream rate is independent
        // of how often the worker polls.
        let due = self.started.elapsed().as_millis() as u64 * self.lines_per_sec / 1_000;
        if self.lines_emitted >= due {
            std::thread::sleep(timeout.min(Duration::from_millis(2)));
            return Ok(0);
        }
        let mut written = 0;
        while self.lines_emitted < due {
            let line = self.next_line();
            if written + line.len() > buf.len() {
                break;
            }
            buf[written..written + line.len()].copy_from_slice(line.as_bytes());
            written += line.len();
            self.lines_emitted += 1;
        }
        Ok(written)
    }

    fn close(&mut self) -> Result<(), BoxError> {
        tracing::debug!("simulated source closed");
        Ok(())
    }
}

/// Audio sink that logs each beep instead of synthesizing one. The default
/// when no audio backend is compiled in; the run loop's cooldown behavior
/// stays observable through the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleAudio;

impl AudioSink for ConsoleAudio {
    fn beep(&mut self, frequency_hz: u32, duration_ms: u32) {
        tracing::info!(frequency_hz, duration_ms, "beep");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_lines_are_parseable_pairs() {
        let mut src = SimulatedSource::with_rate(10_000);
        std::thread::sleep(Duration::from_millis(5));
        let mut buf = [0u8; 4096];
        let n = src
            .read_available(&mut buf, Duration::from_millis(10))
            .unwrap();
        assert!(n > 0);
        let text = std::str::from_utf8(&buf[..n]).unwrap();
        for line in text.lines() {
            let mut it = line.split(',');
            let angle: f32 = it.next().unwrap().parse().unwrap();
            let distance: f32 = it.next().unwrap().parse().unwrap();
            assert!((0.0..360.0).contains(&angle));
            assert!((5.0..=100.0).contains(&distance));
        }
    }

    #[test]
    fn emission_is_paced_by_wall_time() {
        let mut src = SimulatedSource::with_rate(100);
        let mut buf = [0u8; 4096];
        // Immediately after construction nothing is due yet.
        let n = src
            .read_available(&mut buf, Duration::from_millis(1))
            .unwrap();
        assert_eq!(n, 0);
    }

    #[test]
    fn console_audio_does_not_panic() {
        let mut audio = ConsoleAudio;
        audio.beep(1500, 100);
    }
}
