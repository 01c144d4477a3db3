//! # Serial Communication Module
//!
//! Handles serial communication with an EnOcean ESP3 gateway module.
//!
//! This module handles:
//! - Listing candidate serial devices
//! - Opening the port at 57,600 baud (8N1, no flow control)
//! - Transmitting serialized ESP3 frames
//! - The receive loop that feeds the stream parser and forwards
//!   completed frames over a channel

pub mod port_trait;

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};
use tokio::time::timeout;
use tokio_serial::SerialPortBuilderExt;
use tracing::{debug, info, trace, warn};

use crate::error::{Esp3BridgeError, Result};
use crate::esp3::frame::Frame;
use crate::esp3::parser::StreamParser;
use self::port_trait::SerialPortIO;

/// ESP3 baud rate (57,600 baud)
pub const ESP3_BAUD_RATE: u32 = 57_600;

/// Upper bound on a single blocking read, so the shutdown signal is
/// observed promptly even on a silent line
pub const READ_TIMEOUT: Duration = Duration::from_secs(2);

/// Per-read buffer size
const READ_BUFFER_SIZE: usize = 64;

/// Default gateway device paths to try (in order of preference)
const DEFAULT_DEVICE_PATHS: &[&str] = &[
    "/dev/ttyUSB0", // USB-to-serial gateways (USB 300 stick)
    "/dev/ttyACM0", // USB CDC devices
];

/// List serial devices present on the system
pub fn available_ports() -> Result<Vec<String>> {
    let ports = tokio_serial::available_ports()
        .map_err(|e| Esp3BridgeError::Serial(format!("Failed to list serial ports: {e}")))?;

    Ok(ports.into_iter().map(|p| p.port_name).collect())
}

/// ESP3 Serial Port Handler
///
/// Manages the connection to the EnOcean gateway module.
pub struct Esp3Serial {
    /// Serial port handle
    port: tokio_serial::SerialStream,
    /// Device path (e.g., /dev/ttyUSB0)
    device_path: String,
}

impl std::fmt::Debug for Esp3Serial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Esp3Serial")
            .field("device_path", &self.device_path)
            .finish_non_exhaustive()
    }
}

impl Esp3Serial {
    /// Open a connection to the gateway, trying common device paths
    ///
    /// # Errors
    ///
    /// Returns [`Esp3BridgeError::SerialPortNotFound`] if no candidate
    /// path opens.
    pub fn open() -> Result<Self> {
        Self::open_with_paths(DEFAULT_DEVICE_PATHS)
    }

    /// Open a connection trying the given device paths in order
    pub fn open_with_paths(paths: &[&str]) -> Result<Self> {
        for path in paths {
            debug!("Trying to open serial port: {}", path);

            match Self::open_port(path) {
                Ok(port) => {
                    info!("Successfully opened ESP3 gateway at {}", path);
                    return Ok(Self {
                        port,
                        device_path: path.to_string(),
                    });
                }
                Err(e) => {
                    warn!("Failed to open {}: {}", path, e);
                    continue;
                }
            }
        }

        Err(Esp3BridgeError::SerialPortNotFound(paths.join(", ")))
    }

    /// Open a specific serial port with ESP3 settings
    fn open_port(path: &str) -> Result<tokio_serial::SerialStream> {
        let port = tokio_serial::new(path, ESP3_BAUD_RATE)
            .data_bits(tokio_serial::DataBits::Eight)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One)
            .flow_control(tokio_serial::FlowControl::None)
            .open_native_async()
            .map_err(|e| Esp3BridgeError::Serial(format!("Failed to open {path}: {e}")))?;

        Ok(port)
    }

    /// Serialize a frame and write it to the gateway
    pub async fn send_frame(&mut self, frame: &Frame) -> Result<()> {
        let wire = frame.serialize();

        SerialPortIO::write_all(self, &wire)
            .await
            .map_err(|e| Esp3BridgeError::Serial(format!("Failed to write frame: {e}")))?;

        SerialPortIO::flush(self)
            .await
            .map_err(|e| Esp3BridgeError::Serial(format!("Failed to flush serial port: {e}")))?;

        debug!("Sent {} frame ({} bytes)", frame.packet_type(), wire.len());
        Ok(())
    }

    /// Get the device path of the opened serial port
    pub fn device_path(&self) -> &str {
        &self.device_path
    }
}

#[async_trait]
impl SerialPortIO for Esp3Serial {
    async fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        use tokio::io::AsyncReadExt;
        self.port.read(buf).await
    }

    async fn write_all(&mut self, data: &[u8]) -> std::io::Result<()> {
        use tokio::io::AsyncWriteExt;
        self.port.write_all(data).await
    }

    async fn flush(&mut self) -> std::io::Result<()> {
        use tokio::io::AsyncWriteExt;
        self.port.flush().await
    }
}

/// Run the receive loop until the shutdown signal fires
///
/// Owns the stream parser (single-task ownership, no locking) and forwards
/// every completed frame over `frames` in arrival order. Read errors are
/// logged and the loop continues; only shutdown (or a dropped consumer)
/// ends it. A partially assembled frame is discarded on shutdown.
pub async fn run_reader<P: SerialPortIO>(
    mut port: P,
    frames: mpsc::Sender<Frame>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let mut parser = StreamParser::new();
    let mut buf = [0u8; READ_BUFFER_SIZE];

    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                info!("Serial reader shutting down");
                return Ok(());
            }

            read = timeout(READ_TIMEOUT, port.read(&mut buf)) => {
                let received = match read {
                    // Timed out: nothing arrived, go around and check shutdown
                    Err(_) => continue,
                    Ok(Err(e)) => {
                        warn!("Error reading from serial port: {}", e);
                        continue;
                    }
                    Ok(Ok(0)) => {
                        trace!("no bytes received");
                        continue;
                    }
                    Ok(Ok(n)) => n,
                };

                for frame in parser.push_bytes(&buf[..received]) {
                    debug!("Received {} frame", frame.packet_type());

                    if frames.send(frame).await.is_err() {
                        info!("Frame consumer dropped, stopping serial reader");
                        return Ok(());
                    }
                }
            }
        }
    }
}
