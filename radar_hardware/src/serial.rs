//! Real serial-port sensor link, compiled with the `hardware` feature.

use crate::error::HwError;
use radar_traits::ByteSource;
use serialport::SerialPort;
use std::io::Read;
use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub struct SerialSource {
    port: Box<dyn SerialPort>,
    device: String,
}

impl SerialSource {
    /// Open the device at 8N1 with the given baud rate. `timeout` is the
    /// initial read timeout; `read_available` adjusts it per call.
    pub fn open(device: &str, baud: u32, timeout: Duration) -> Result<Self, HwError> {
        let port = serialport::new(device, baud)
            .timeout(timeout)
            .open()
            .map_err(|e| HwError::Open {
                device: device.to_string(),
                reason: e.to_string(),
            })?;
        tracing::info!(device, baud, "serial source opened");
        Ok(Self {
            port,
            device: device.to_string(),
        })
    }
}

impl ByteSource for SerialSource {
    fn read_available(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize, BoxError> {
        if self.port.timeout() != timeout {
            self.port
                .set_timeout(timeout)
                .map_err(|e| -> BoxError { Box::new(HwError::Io(e.into())) })?;
        }
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            // A quiet link is not an error; let the worker re-check shutdown.
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(Box::new(HwError::Io(e))),
        }
    }

    fn close(&mut self) -> Result<(), BoxError> {
        tracing::info!(device = %self.device, "serial source closed");
        Ok(())
    }
}
