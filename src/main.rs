//! # ESP3 Bridge
//!
//! Monitor for EnOcean ESP3 gateways: opens the serial port, reassembles
//! telegrams from the byte stream, and logs decoded RADIO_ERP1 and
//! RESPONSE packets until Ctrl+C.

use anyhow::Result;
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

mod config;
mod error;
mod esp3;
mod serial;

use config::Config;
use esp3::erp1::Erp1Packet;
use esp3::frame::Frame;
use esp3::protocol::PacketType;
use esp3::response::ResponsePacket;
use serial::Esp3Serial;

/// Main entry point for the ESP3 Bridge monitor
///
/// # Control Flow
///
/// 1. Load configuration (optional TOML path as first argument) and set up
///    the tracing subscriber.
/// 2. Open the gateway serial port (configured path, or the default
///    candidates) and spawn the reader task that owns the stream parser.
/// 3. Receive completed frames over the channel, decode the packet kinds
///    with structured mappings, and log them.
/// 4. On Ctrl+C, signal shutdown, drain the reader task, and exit.
#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args().nth(1);
    let config = Config::load_or_default(config_path.as_deref())?;

    // Initialize logging; RUST_LOG overrides the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.level)),
        )
        .init();

    info!("ESP3 Bridge v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Ok(ports) = serial::available_ports() {
        info!("Serial devices present: {}", ports.join(", "));
    }

    let serial = if config.serial.port.is_empty() {
        Esp3Serial::open()?
    } else {
        Esp3Serial::open_with_paths(&[config.serial.port.as_str()])?
    };
    info!("ESP3 gateway opened at: {}", serial.device_path());

    let (frame_tx, mut frame_rx) = mpsc::channel(config.parser.channel_capacity);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let reader = tokio::spawn(serial::run_reader(serial, frame_tx, shutdown_rx));

    info!("Listening for ESP3 telegrams, press Ctrl+C to exit");

    let mut telegram_count: u64 = 0;

    loop {
        tokio::select! {
            frame = frame_rx.recv() => {
                let Some(frame) = frame else {
                    warn!("Reader task closed the frame channel");
                    break;
                };

                telegram_count += 1;
                log_frame(&frame);
            }

            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                info!("Total telegrams received: {}", telegram_count);
                break;
            }
        }
    }

    // Stop the reader; ignore the error if it already returned
    let _ = shutdown_tx.send(true);
    reader.await??;

    Ok(())
}

/// Decode and log one received frame according to its packet type
fn log_frame(frame: &Frame) {
    match frame.packet_type() {
        PacketType::RadioErp1 => match Erp1Packet::from_frame(frame) {
            Ok(packet) => info!(
                rorg = %packet.rorg,
                sender = %packet.sender_id,
                destination = %packet.destination_id,
                rssi = packet.rssi,
                status = packet.status,
                user_data = %hex::encode_upper(&packet.user_data),
                "ERP1 telegram"
            ),
            Err(e) => warn!("Undecodable ERP1 telegram: {}", e),
        },

        PacketType::Response => match ResponsePacket::from_frame(frame) {
            Ok(response) => info!(
                return_code = %response.return_code,
                optional_data = %hex::encode_upper(&response.optional_data),
                "RESPONSE telegram"
            ),
            Err(e) => warn!("Undecodable RESPONSE telegram: {}", e),
        },

        other => info!(packet_type = %other, "Telegram without structured mapping:\n{}", frame),
    }
}
