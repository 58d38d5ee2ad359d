//! Background sample ingestion.
//!
//! Spawns a thread that owns the `ByteSource`, reassembles lines, decodes
//! `(angle, distance)` pairs, and publishes them via a bounded channel.
//! Malformed lines are expected telemetry noise and are dropped silently
//! (counted, not propagated); a failed read is reported as an event and
//! ends the loop without touching the host process.
//!
//! Safety: each `SampleIngestor` spawns exactly one thread that is shut
//! down when `stop` is called or the ingestor is dropped, and the thread
//! closes the source before exiting, so `stop` returning implies the
//! device has been released.
use crossbeam_channel as xch;
use radar_traits::ByteSource;
use radar_traits::clock::Clock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::error::{FramingError, ParseError};
use crate::framer::LineFramer;
use crate::types::RawSample;

/// Channel depth between the worker and the pipeline. At sensor line rates
/// a 16 ms drain empties this comfortably; if the consumer stalls longer
/// than the read timeout, the sample being published is dropped instead of
/// wedging the worker.
const CHANNEL_CAPACITY: usize = 512;

const READ_BUF_BYTES: usize = 1024;

/// What the worker publishes to the pipeline, in arrival order.
#[derive(Debug, Clone)]
pub enum IngestEvent {
    Sample(RawSample),
    /// The source became unusable; no further samples will follow.
    SourceError(FramingError),
}

/// Observability counters, snapshotted from the worker's atomics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestMetrics {
    /// Lines successfully decoded into samples.
    pub packets: u64,
    /// Lines dropped as malformed.
    pub parse_errors: u64,
}

pub struct SampleIngestor {
    rx: xch::Receiver<IngestEvent>,
    packets: Arc<AtomicU64>,
    parse_errors: Arc<AtomicU64>,
    last_ok: Arc<AtomicU64>,
    epoch: Instant,
    /// Shutdown flag for immediate response (atomic for lock-free check)
    shutdown: Arc<AtomicBool>,
    /// Join handle for graceful thread cleanup
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl SampleIngestor {
    /// Spawn the worker thread. `read_timeout` bounds every source read so
    /// the loop re-checks the shutdown flag promptly.
    pub fn spawn<S, C>(mut source: S, read_timeout: Duration, clock: C) -> Self
    where
        S: ByteSource + Send + 'static,
        C: Clock + Send + Sync + 'static,
    {
        let (tx, rx) = xch::bounded(CHANNEL_CAPACITY);
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();
        let packets = Arc::new(AtomicU64::new(0));
        let packets_clone = packets.clone();
        let parse_errors = Arc::new(AtomicU64::new(0));
        let parse_errors_clone = parse_errors.clone();
        let last_ok = Arc::new(AtomicU64::new(0));
        let last_ok_clone = last_ok.clone();
        let epoch = clock.now();

        let join_handle = std::thread::spawn(move || {
            let mut framer = LineFramer::new();
            let mut buf = [0u8; READ_BUF_BYTES];
            loop {
                // Immediate shutdown check (lock-free atomic)
                if shutdown_clone.load(Ordering::Relaxed) {
                    tracing::debug!("ingest thread received shutdown signal");
                    break;
                }

                let n = match source.read_available(&mut buf, read_timeout) {
                    Ok(n) => n,
                    Err(e) => {
                        let err = FramingError::Read(e.to_string());
                        tracing::error!(error = %err, "source read failed, stopping ingest");
                        // Best-effort: the consumer may already be gone.
                        let _ = tx.try_send(IngestEvent::SourceError(err));
                        break;
                    }
                };
                if n == 0 {
                    // Read timeout with nothing available; loop to re-check
                    // the shutdown flag.
                    continue;
                }

                framer.feed(&buf[..n]);
                let mut disconnected = false;
                while let Some(line) = framer.next_line() {
                    if line.is_empty() {
                        continue;
                    }
                    match parse_line(&line) {
                        Ok((angle, distance)) => {
                            let sample = RawSample {
                                angle,
                                distance,
                                arrival: clock.now(),
                            };
                            match tx.send_timeout(IngestEvent::Sample(sample), read_timeout) {
                                Ok(()) => {
                                    packets_clone.fetch_add(1, Ordering::Relaxed);
                                    last_ok_clone.store(clock.ms_since(epoch), Ordering::Relaxed);
                                }
                                Err(xch::SendTimeoutError::Timeout(_)) => {
                                    tracing::warn!("pipeline stalled, dropping sample");
                                }
                                Err(xch::SendTimeoutError::Disconnected(_)) => {
                                    tracing::debug!("ingest consumer disconnected, exiting thread");
                                    disconnected = true;
                                    break;
                                }
                            }
                        }
                        Err(e) => {
                            parse_errors_clone.fetch_add(1, Ordering::Relaxed);
                            tracing::trace!(error = %e, line = %line, "dropping malformed line");
                        }
                    }
                }
                if disconnected {
                    break;
                }
            }
            if let Err(e) = source.close() {
                tracing::warn!(error = %e, "source close failed");
            }
            tracing::trace!("ingest thread exiting cleanly");
        });

        Self {
            rx,
            packets,
            parse_errors,
            last_ok,
            epoch,
            shutdown,
            join_handle: Some(join_handle),
        }
    }

    /// Non-blocking FIFO drain of everything currently available. The
    /// pipeline calls this once per tick and never waits for a sample.
    pub fn drain(&self) -> xch::TryIter<'_, IngestEvent> {
        self.rx.try_iter()
    }

    pub fn metrics(&self) -> IngestMetrics {
        IngestMetrics {
            packets: self.packets.load(Ordering::Relaxed),
            parse_errors: self.parse_errors.load(Ordering::Relaxed),
        }
    }

    /// Milliseconds since the last successfully published sample, or `None`
    /// before the first one. Drives the stale/disconnected HUD indication.
    pub fn last_sample_age_ms(&self) -> Option<u64> {
        if self.packets.load(Ordering::Relaxed) == 0 {
            return None;
        }
        let now_ms = {
            let dur = Instant::now().saturating_duration_since(self.epoch);
            (dur.as_millis().min(u128::from(u64::MAX))) as u64
        };
        Some(now_ms.saturating_sub(self.last_ok.load(Ordering::Relaxed)))
    }

    /// Signal the worker and wait for it to release the source. Idempotent;
    /// after return no further events are published.
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.join_handle.take() {
            match handle.join() {
                Ok(()) => {
                    tracing::trace!("ingest thread joined successfully");
                }
                Err(e) => {
                    // Thread panicked; log but don't propagate (callers may be in Drop).
                    tracing::warn!(?e, "ingest thread panicked during shutdown");
                }
            }
        }
    }
}

impl Drop for SampleIngestor {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Decode one framed line into `(angle, distance)`.
///
/// At least two comma-separated fields are required; extra fields are
/// ignored (newer firmware appends a quality flag). Both fields must parse
/// as finite floats.
pub fn parse_line(line: &str) -> Result<(f32, f32), ParseError> {
    let mut fields = line.split(',');
    let angle_field = fields.next().ok_or(ParseError::MissingField)?;
    let distance_field = fields.next().ok_or(ParseError::MissingField)?;
    let angle: f32 = angle_field
        .trim()
        .parse()
        .map_err(|_| ParseError::BadNumber)?;
    let distance: f32 = distance_field
        .trim()
        .parse()
        .map_err(|_| ParseError::BadNumber)?;
    if !angle.is_finite() || !distance.is_finite() {
        return Err(ParseError::NonFinite);
    }
    Ok((angle, distance))
}

#[cfg(test)]
mod parse_tests {
    use super::parse_line;
    use crate::error::ParseError;

    #[test]
    fn accepts_plain_pairs_and_extra_fields() {
        assert_eq!(parse_line("90,42.5"), Ok((90.0, 42.5)));
        assert_eq!(parse_line(" 180 , 10 "), Ok((180.0, 10.0)));
        assert_eq!(parse_line("45,30,quality=9"), Ok((45.0, 30.0)));
    }

    #[test]
    fn out_of_range_angles_pass_through_for_normalization() {
        // The display flip wraps bearings into [0, 360); the parser only
        // rejects values that cannot be normalized at all.
        assert_eq!(parse_line("720,50"), Ok((720.0, 50.0)));
        assert_eq!(parse_line("-90,50"), Ok((-90.0, 50.0)));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!(parse_line("abc,def"), Err(ParseError::BadNumber));
        assert_eq!(parse_line("12"), Err(ParseError::MissingField));
        assert_eq!(parse_line(""), Err(ParseError::MissingField));
        assert_eq!(parse_line(","), Err(ParseError::BadNumber));
        assert_eq!(parse_line("nan,10"), Err(ParseError::NonFinite));
        assert_eq!(parse_line("10,inf"), Err(ParseError::NonFinite));
    }
}
