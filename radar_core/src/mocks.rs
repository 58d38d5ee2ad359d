//! Test doubles shared by unit, integration, and property tests.

use radar_traits::{AudioSink, ByteSource};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A source that never produces bytes. Useful where a `ByteSource` is
/// required but ingestion is not under test.
pub struct NoopSource;

impl ByteSource for NoopSource {
    fn read_available(&mut self, _buf: &mut [u8], timeout: Duration) -> Result<usize, BoxError> {
        std::thread::sleep(timeout.min(Duration::from_millis(1)));
        Ok(0)
    }

    fn close(&mut self) -> Result<(), BoxError> {
        Ok(())
    }
}

/// Replays a fixed sequence of byte chunks, one chunk per read, then either
/// idles or fails, depending on `fail_when_exhausted`.
pub struct ScriptedSource {
    chunks: VecDeque<Vec<u8>>,
    fail_when_exhausted: bool,
    closed: Arc<AtomicBool>,
}

impl ScriptedSource {
    pub fn new<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Vec<u8>>,
    {
        Self {
            chunks: chunks.into_iter().map(Into::into).collect(),
            fail_when_exhausted: false,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// After the last chunk, return a read error instead of idling.
    pub fn failing_when_exhausted(mut self) -> Self {
        self.fail_when_exhausted = true;
        self
    }

    /// Observer flag set by `close`, for asserting device release.
    pub fn closed_flag(&self) -> Arc<AtomicBool> {
        self.closed.clone()
    }
}

impl ByteSource for ScriptedSource {
    fn read_available(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize, BoxError> {
        match self.chunks.pop_front() {
            Some(chunk) => {
                let n = chunk.len().min(buf.len());
                buf[..n].copy_from_slice(&chunk[..n]);
                Ok(n)
            }
            None if self.fail_when_exhausted => Err("device unplugged".into()),
            None => {
                std::thread::sleep(timeout.min(Duration::from_millis(1)));
                Ok(0)
            }
        }
    }

    fn close(&mut self) -> Result<(), BoxError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Records every beep for later assertion. Clone-friendly handle.
#[derive(Clone, Default)]
pub struct CapturingAudio {
    beeps: Arc<Mutex<Vec<(u32, u32)>>>,
}

impl CapturingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn beeps(&self) -> Vec<(u32, u32)> {
        self.beeps.lock().map(|b| b.clone()).unwrap_or_default()
    }
}

impl AudioSink for CapturingAudio {
    fn beep(&mut self, frequency_hz: u32, duration_ms: u32) {
        if let Ok(mut b) = self.beeps.lock() {
            b.push((frequency_hz, duration_ms));
        }
    }
}
