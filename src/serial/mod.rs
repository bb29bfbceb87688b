//! # Serial Communication Module
//!
//! Handles the serial link carrying telemetry from the host PC.
//!
//! This module handles:
//! - Opening the serial port at 115200 baud, 8N1
//! - Framing the byte stream into lines
//! - Handing lines to the render loop without ever blocking it
//! - Reopening the port after the host disconnects
//!
//! Reading happens in its own tokio task. The task is the only writer into a
//! bounded line channel and the render loop is the only reader, polling it
//! with [`LineSource::poll_line`].

pub mod line_buffer;
pub mod line_source;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

use crate::config::SerialConfig;
use crate::error::{Result, SysinfoDisplayError};

pub use line_buffer::LineBuffer;
pub use line_source::{LineReceiver, LineSource};

/// Fallback device paths tried after the configured one (in order of preference)
const DEFAULT_DEVICE_PATHS: &[&str] = &[
    "/dev/ttyACM0", // USB CDC devices (most common for microcontroller boards)
    "/dev/ttyUSB0", // USB-to-serial adapters
];

/// Lines buffered between the reader task and the render loop
pub const LINE_CHANNEL_CAPACITY: usize = 16;

/// Read chunk size
const READ_CHUNK_SIZE: usize = 256;

/// Telemetry serial port handle
pub struct TelemetrySerial {
    /// Serial port handle
    port: tokio_serial::SerialStream,
    /// Device path (e.g., /dev/ttyACM0)
    device_path: String,
}

impl std::fmt::Debug for TelemetrySerial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetrySerial")
            .field("device_path", &self.device_path)
            .finish_non_exhaustive()
    }
}

/// How a read session ended without an I/O error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpEnd {
    /// The port reported end of stream
    Eof,
    /// The render loop dropped its receiver
    ReceiverClosed,
}

impl TelemetrySerial {
    /// Open the configured port, falling back to the default device paths.
    ///
    /// # Errors
    ///
    /// Returns `SerialPortNotFound` if no candidate path can be opened
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sysinfo_display::config::SerialConfig;
    /// use sysinfo_display::serial::TelemetrySerial;
    ///
    /// fn main() -> anyhow::Result<()> {
    ///     let serial = TelemetrySerial::open(&SerialConfig::default())?;
    ///     println!("Connected to: {}", serial.device_path());
    ///     Ok(())
    /// }
    /// ```
    pub fn open(config: &SerialConfig) -> Result<Self> {
        let mut paths = vec![config.port.as_str()];
        paths.extend(
            DEFAULT_DEVICE_PATHS
                .iter()
                .copied()
                .filter(|path| *path != config.port),
        );
        Self::open_with_paths(&paths, config.baud_rate)
    }

    /// Open the first path in `paths` that succeeds.
    pub fn open_with_paths(paths: &[&str], baud_rate: u32) -> Result<Self> {
        for path in paths {
            debug!("Trying to open serial port: {}", path);

            match Self::open_port(path, baud_rate) {
                Ok(port) => {
                    info!("Successfully opened telemetry port at {}", path);
                    return Ok(Self {
                        port,
                        device_path: path.to_string(),
                    });
                }
                Err(e) => {
                    debug!("Failed to open {}: {}", path, e);
                    continue;
                }
            }
        }

        Err(SysinfoDisplayError::SerialPortNotFound(paths.join(", ")))
    }

    /// Open a specific serial port, 8N1 without flow control
    fn open_port(path: &str, baud_rate: u32) -> Result<tokio_serial::SerialStream> {
        use tokio_serial::SerialPortBuilderExt;

        let port = tokio_serial::new(path, baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One)
            .flow_control(tokio_serial::FlowControl::None)
            .open_native_async()
            .map_err(|e| SysinfoDisplayError::Serial(format!("Failed to open {}: {}", path, e)))?;

        Ok(port)
    }

    /// Get the device path of the opened serial port
    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    /// Read lines from the port into `lines` until the port closes.
    ///
    /// # Errors
    ///
    /// Returns the I/O error that ended the session
    pub async fn pump(self, lines: &mpsc::Sender<String>, max_line_length: usize) -> Result<PumpEnd> {
        pump_lines(self.port, lines, max_line_length).await
    }
}

/// Frame bytes from `reader` into lines and forward them to `lines`.
///
/// Waits for channel capacity when the render loop falls behind, so lines are
/// never dropped between the port and the loop.
///
/// # Errors
///
/// Returns `Io` if a read fails
pub async fn pump_lines<R>(mut reader: R, lines: &mpsc::Sender<String>, max_line_length: usize) -> Result<PumpEnd>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = LineBuffer::new(max_line_length);
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    loop {
        let read = reader.read(&mut chunk).await?;
        if read == 0 {
            if buffer.pending() > 0 {
                debug!("Discarding {} bytes of unterminated input", buffer.pending());
            }
            return Ok(PumpEnd::Eof);
        }

        buffer.extend(&chunk[..read]);
        while let Some(line) = buffer.next_line() {
            debug!("Received line ({} bytes)", line.len());
            if lines.send(line).await.is_err() {
                return Ok(PumpEnd::ReceiverClosed);
            }
        }
    }
}

/// Spawn the serial reader task.
///
/// The task (re)opens the port, pumps lines until the port fails, then waits
/// `reconnect_interval_ms` and tries again. It exits once the returned
/// [`LineReceiver`] is dropped.
pub fn spawn_reader(config: SerialConfig) -> (LineReceiver, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(LINE_CHANNEL_CAPACITY);
    let handle = tokio::spawn(reader_task(config, tx));
    (LineReceiver::new(rx), handle)
}

async fn reader_task(config: SerialConfig, tx: mpsc::Sender<String>) {
    let retry = Duration::from_millis(config.reconnect_interval_ms);

    loop {
        match TelemetrySerial::open(&config) {
            Ok(serial) => {
                let path = serial.device_path().to_string();
                match serial.pump(&tx, config.max_line_length).await {
                    Ok(PumpEnd::ReceiverClosed) => return,
                    Ok(PumpEnd::Eof) => warn!("Serial port {} closed", path),
                    Err(e) => warn!("Serial read failed on {}: {}", path, e),
                }
            }
            Err(e) => warn!("{}; retrying in {}s", e, retry.as_secs_f32()),
        }

        if tx.is_closed() {
            return;
        }
        sleep(retry).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::io::Builder;

    #[test]
    fn test_constants() {
        assert_eq!(DEFAULT_DEVICE_PATHS.len(), 2);
        assert_eq!(DEFAULT_DEVICE_PATHS[0], "/dev/ttyACM0");
        assert_eq!(DEFAULT_DEVICE_PATHS[1], "/dev/ttyUSB0");
        assert!(LINE_CHANNEL_CAPACITY > 0);
    }

    #[test]
    fn test_open_with_invalid_paths_returns_error() {
        let invalid_paths = &["/dev/nonexistent0", "/dev/nonexistent1"];
        let result = TelemetrySerial::open_with_paths(invalid_paths, 115200);

        match result.unwrap_err() {
            SysinfoDisplayError::SerialPortNotFound(msg) => {
                assert!(msg.contains("/dev/nonexistent0"));
                assert!(msg.contains("/dev/nonexistent1"));
            }
            other => panic!("Expected SerialPortNotFound error, got: {:?}", other),
        }
    }

    #[test]
    fn test_open_with_empty_paths_returns_error() {
        let empty_paths: &[&str] = &[];
        match TelemetrySerial::open_with_paths(empty_paths, 115200).unwrap_err() {
            SysinfoDisplayError::SerialPortNotFound(_) => {}
            other => panic!("Expected SerialPortNotFound, got: {:?}", other),
        }
    }

    #[test]
    fn test_open_port_with_invalid_path_returns_error() {
        let result = TelemetrySerial::open_port("/dev/nonexistent_serial_device_12345", 115200);

        match result.unwrap_err() {
            SysinfoDisplayError::Serial(msg) => {
                assert!(msg.contains("/dev/nonexistent_serial_device_12345"));
                assert!(msg.contains("Failed to open"));
            }
            other => panic!("Expected Serial error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_pump_lines_splits_chunks_into_lines() {
        let reader = Builder::new()
            .read(b"{\"GpuCoreTempC\":")
            .read(b"26}\r{\"Cpu")
            .read(b"CoreTempC\":50}\r")
            .build();
        let (tx, mut rx) = mpsc::channel(8);

        let end = pump_lines(reader, &tx, 512).await.unwrap();
        assert_eq!(end, PumpEnd::Eof);

        assert_eq!(rx.recv().await.as_deref(), Some("{\"GpuCoreTempC\":26}"));
        assert_eq!(rx.recv().await.as_deref(), Some("{\"CpuCoreTempC\":50}"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_pump_lines_drops_unterminated_tail_at_eof() {
        let reader = Builder::new().read(b"complete\r{\"Gpu").build();
        let (tx, mut rx) = mpsc::channel(8);

        assert_eq!(pump_lines(reader, &tx, 512).await.unwrap(), PumpEnd::Eof);
        assert_eq!(rx.recv().await.as_deref(), Some("complete"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_pump_lines_stops_when_receiver_dropped() {
        let reader = Builder::new().read(b"line one\n").build();
        let (tx, rx) = mpsc::channel(8);
        drop(rx);

        let end = pump_lines(reader, &tx, 512).await.unwrap();
        assert_eq!(end, PumpEnd::ReceiverClosed);
    }

    #[tokio::test]
    async fn test_pump_lines_propagates_read_error() {
        let reader = Builder::new()
            .read(b"partial")
            .read_error(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "unplugged"))
            .build();
        let (tx, _rx) = mpsc::channel(8);

        match pump_lines(reader, &tx, 512).await {
            Err(SysinfoDisplayError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe),
            other => panic!("Expected Io error, got: {:?}", other),
        }
    }

    // Integration test - only runs if the display board is connected
    #[tokio::test]
    #[ignore] // Run with: cargo test -- --ignored
    async fn test_open_with_real_hardware() {
        match TelemetrySerial::open(&SerialConfig::default()) {
            Ok(serial) => println!("Opened telemetry port at: {}", serial.device_path()),
            Err(_) => println!("No serial hardware detected (this is OK for CI/CD)"),
        }
    }
}
