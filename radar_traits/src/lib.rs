pub mod clock;

pub use clock::{Clock, MonotonicClock};

/// Byte-oriented sensor link (serial-equivalent). Opening the link
/// (device path, baud rate) is the implementation's constructor concern;
/// the core only needs bounded-timeout reads and an explicit close.
pub trait ByteSource {
    /// Read whatever bytes are currently available into `buf`, waiting at
    /// most `timeout`. Returns the number of bytes written; 0 means the
    /// timeout elapsed with nothing to read (not an error).
    fn read_available(
        &mut self,
        buf: &mut [u8],
        timeout: std::time::Duration,
    ) -> Result<usize, Box<dyn std::error::Error + Send + Sync>>;

    /// Release the underlying device. Must be safe to call more than once.
    fn close(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

impl<T: ByteSource + ?Sized> ByteSource for Box<T> {
    fn read_available(
        &mut self,
        buf: &mut [u8],
        timeout: std::time::Duration,
    ) -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
        (**self).read_available(buf, timeout)
    }

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        (**self).close()
    }
}

/// Audible alert output. Best-effort and fire-and-forget: implementations
/// must never block the caller and must swallow playback failures.
pub trait AudioSink {
    fn beep(&mut self, frequency_hz: u32, duration_ms: u32);
}

impl<T: AudioSink + ?Sized> AudioSink for Box<T> {
    fn beep(&mut self, frequency_hz: u32, duration_ms: u32) {
        (**self).beep(frequency_hz, duration_ms)
    }
}
