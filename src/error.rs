//! # Error Types
//!
//! Custom error types for ESP3 Bridge using `thiserror`.

use thiserror::Error;

/// Main error type for ESP3 Bridge
#[derive(Debug, Error)]
pub enum Esp3BridgeError {
    /// A byte or hex sequence has an illegal width for its field
    #[error("invalid length (got: {got}, max: {max})")]
    InvalidLength { got: usize, max: usize },

    /// A text form is not valid hexadecimal
    #[error("invalid hex string: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Buffer is shorter than the minimum frame size
    #[error("frame too short (got: {got} bytes, min: {min})")]
    TooShort { got: usize, min: usize },

    /// First byte of a frame buffer is not the sync byte
    #[error("sync byte missing (got: 0x{0:02x})")]
    MissingSync(u8),

    /// Header checksum byte does not match the computed CRC8H
    #[error("invalid CRC8H (got: 0x{got:02x}, valid: 0x{expected:02x})")]
    HeaderChecksumMismatch { got: u8, expected: u8 },

    /// Payload checksum byte does not match the computed CRC8D
    #[error("invalid CRC8D (got: 0x{got:02x}, valid: 0x{expected:02x})")]
    PayloadChecksumMismatch { got: u8, expected: u8 },

    /// Byte is not a known ESP3 packet type code
    #[error("unknown packet type code 0x{0:02x}")]
    UnknownPacketType(u8),

    /// Byte is not a known RORG code
    #[error("unknown RORG code 0x{0:02x}")]
    UnknownRorg(u8),

    /// Byte is not a known response return code
    #[error("unknown return code 0x{0:02x}")]
    UnknownReturnCode(u8),

    /// Byte is not a known event code
    #[error("unknown event code 0x{0:02x}")]
    UnknownEventCode(u8),

    /// Frame carries a different packet type than the codec expects
    #[error("wrong packet type (got: {got}, expected: {expected})")]
    WrongPacketType {
        got: &'static str,
        expected: &'static str,
    },

    /// Frame data section is too short for the packet layout
    #[error("data too short (got: {got} bytes, min: {min})")]
    DataTooShort { got: usize, min: usize },

    /// Frame optional data section is too short for the packet layout
    #[error("optional data too short (got: {got} bytes, min: {min})")]
    OptDataTooShort { got: usize, min: usize },

    /// No usable serial device among the candidate paths
    #[error("no serial port found (tried: {0})")]
    SerialPortNotFound(String),

    /// Serial port errors
    #[error("serial error: {0}")]
    Serial(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ESP3 Bridge
pub type Result<T> = std::result::Result<T, Esp3BridgeError>;
