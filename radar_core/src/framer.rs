//! Line reassembly over a raw byte stream.
//!
//! The framer is pure buffering: it splits on `\n`, strips a trailing `\r`,
//! keeps incomplete tails across feeds, and decodes permissively (invalid
//! UTF-8 is replaced, never fatal). Whether a completed line parses into a
//! sample is the caller's concern.

/// Partial lines longer than this are garbage (a healthy sensor line is
/// under 32 bytes); the buffer is reset rather than grown without bound.
const MAX_LINE_BYTES: usize = 512;

#[derive(Debug, Default)]
pub struct LineFramer {
    buf: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append freshly read bytes. Call `next_line` until it returns `None`
    /// to drain every line completed by this feed.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Pop the next completed line, lossily decoded, without its terminator.
    pub fn next_line(&mut self) -> Option<String> {
        match self.buf.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                let mut line: Vec<u8> = self.buf.drain(..=pos).collect();
                line.pop(); // the \n itself
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                Some(String::from_utf8_lossy(&line).into_owned())
            }
            None => {
                if self.buf.len() > MAX_LINE_BYTES {
                    tracing::debug!(len = self.buf.len(), "dropping oversized partial line");
                    self.buf.clear();
                }
                None
            }
        }
    }

    /// Bytes buffered for the line currently in flight.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}
