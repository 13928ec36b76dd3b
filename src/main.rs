//! # Wing Link
//!
//! Ground-station bridge for a radio-controlled flying wing.
//!
//! Reads 7-byte control frames from the pilot input device over USB serial,
//! validates them, and relays the 5-byte payloads to the radio modem for
//! over-the-air transmission to the wing.

use anyhow::Result;
use bytes::BytesMut;
use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};

use wing_link::config::Config;
use wing_link::frame::decoder::FrameDecoder;
use wing_link::serial::{SerialEndpoint, DEFAULT_DEVICE_PATHS};

/// Configuration file path used when none is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Seconds between status log messages
const STATUS_LOG_INTERVAL_SECS: u64 = 5;

/// Read buffer capacity for the pilot uplink
const READ_BUF_CAPACITY: usize = 512;

/// Main entry point for the Wing Link ground station
///
/// Runs the relay loop that continuously moves control data from the pilot
/// uplink to the radio modem.
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load configuration (command-line path, default path, or built-in defaults)
///    - Open the pilot uplink, then the radio modem (skipping the uplink's
///      device when probing)
///
/// 2. **Main Loop**
///    - Read uplink bytes as they arrive and run them through the frame decoder
///    - Relay each validated frame's payload to the modem immediately
///    - Log counters every few seconds
///    - Handle Ctrl+C for graceful shutdown
///
/// 3. **Graceful Shutdown**
///    - Stop relaying
///    - Log totals
///    - Clean exit
///
/// # Errors
///
/// Returns error if:
/// - The configuration file exists but is invalid
/// - Either serial endpoint cannot be opened
/// - The pilot uplink read fails
///
/// # Examples
///
/// Run the application:
/// ```bash
/// cargo run --release
/// ```
///
/// Expected output:
/// ```text
/// INFO wing_link: Wing Link v0.1.0 starting...
/// INFO wing_link::serial: Successfully opened serial device at /dev/ttyUSB0
/// INFO wing_link::serial: Successfully opened serial device at /dev/ttyUSB1
/// INFO wing_link: Relaying control frames (pilot: /dev/ttyUSB0, radio: /dev/ttyUSB1)
/// INFO wing_link: Relayed 1520 payloads (0 frames rejected, 0 send failures)
/// ```
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .init();

    info!("Wing Link v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load_or_default(&config_path)?;

    // Open the pilot uplink first so modem probing can skip its device
    let mut pilot = SerialEndpoint::open_configured(&config.serial.port, config.serial.baud_rate)?;

    let mut modem = if config.radio.port.is_empty() {
        let candidates: Vec<&str> = DEFAULT_DEVICE_PATHS
            .iter()
            .copied()
            .filter(|path| *path != pilot.device_path())
            .collect();
        SerialEndpoint::open_with_paths(&candidates, config.radio.baud_rate)?
    } else {
        SerialEndpoint::open_configured(&config.radio.port, config.radio.baud_rate)?
    };

    info!(
        "Relaying control frames (pilot: {}, radio: {})",
        pilot.device_path(),
        modem.device_path()
    );
    info!("Press Ctrl+C to exit");

    let mut decoder = FrameDecoder::new();
    let mut read_buf = BytesMut::with_capacity(READ_BUF_CAPACITY);
    let mut relayed: u64 = 0;
    let mut send_failures: u64 = 0;

    let mut status_interval = interval(Duration::from_secs(STATUS_LOG_INTERVAL_SECS));
    // The first interval tick completes immediately; consume it here.
    status_interval.tick().await;

    // Main relay loop
    loop {
        tokio::select! {
            result = pilot.read_chunk(&mut read_buf) => {
                let n = result?;
                if n == 0 {
                    warn!("Pilot uplink disconnected");
                    break;
                }

                for &byte in read_buf.iter() {
                    if let Some(packet) = decoder.push(byte) {
                        match modem.send_all(&packet.encode_payload()).await {
                            Ok(()) => relayed += 1,
                            Err(e) => {
                                send_failures += 1;
                                debug!("Failed to relay payload: {}", e);
                            }
                        }
                    }
                }
                read_buf.clear();
            }

            _ = status_interval.tick() => {
                info!(
                    "Relayed {} payloads ({} frames rejected, {} send failures)",
                    relayed,
                    decoder.rejected(),
                    send_failures
                );
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    info!(
        "Total: {} frames accepted, {} rejected, {} payloads relayed, {} send failures",
        decoder.accepted(),
        decoder.rejected(),
        relayed,
        send_failures
    );

    Ok(())
}
