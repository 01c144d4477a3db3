//! # Device Identifier
//!
//! 32-bit big-endian EnOcean device identifier with hex and raw-byte
//! conversions. `0xffffffff` is the broadcast address.

use std::fmt;

use crate::error::{Esp3BridgeError, Result};

/// Serialized width of a device identifier in bytes
pub const DEVICE_ID_SIZE: usize = 4;

/// A 32-bit EnOcean device identifier
///
/// Immutable value type in canonical big-endian byte order. Constructed
/// from an integer, a hex string ([`DeviceId::from_hex`]) or raw bytes
/// ([`DeviceId::from_bytes`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(u32);

impl DeviceId {
    /// The reserved broadcast address (all ones)
    pub const BROADCAST: DeviceId = DeviceId(0xffff_ffff);

    /// Big-endian byte representation
    pub fn to_bytes(self) -> [u8; DEVICE_ID_SIZE] {
        self.0.to_be_bytes()
    }

    /// Raw integer value
    pub fn value(self) -> u32 {
        self.0
    }

    /// Parse a device identifier from hexadecimal text
    ///
    /// Accepts an optional `0x` prefix and up to 8 hex digits; odd-length
    /// input is left-padded with one `0` before decoding.
    ///
    /// # Errors
    ///
    /// Returns [`Esp3BridgeError::InvalidLength`] when more than 8 digits
    /// remain after the prefix, or [`Esp3BridgeError::InvalidHex`] when the
    /// text is not hexadecimal.
    ///
    /// # Examples
    ///
    /// ```
    /// use esp3_bridge::esp3::device_id::DeviceId;
    ///
    /// let id = DeviceId::from_hex("0xffa")?;
    /// assert_eq!(id.value(), 0x0000_0ffa);
    /// # Ok::<(), esp3_bridge::error::Esp3BridgeError>(())
    /// ```
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        const MAX_HEX_DIGITS: usize = DEVICE_ID_SIZE * 2;

        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);

        if hex_str.len() > MAX_HEX_DIGITS {
            return Err(Esp3BridgeError::InvalidLength {
                got: hex_str.len(),
                max: MAX_HEX_DIGITS,
            });
        }

        let padded;
        let hex_str = if hex_str.len() % 2 != 0 {
            padded = format!("0{hex_str}");
            &padded
        } else {
            hex_str
        };

        let bytes = hex::decode(hex_str)?;

        Self::from_bytes(&bytes)
    }

    /// Build a device identifier from up to 4 big-endian bytes
    ///
    /// Shorter slices are left-padded with zero bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Esp3BridgeError::InvalidLength`] for slices longer than 4.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > DEVICE_ID_SIZE {
            return Err(Esp3BridgeError::InvalidLength {
                got: bytes.len(),
                max: DEVICE_ID_SIZE,
            });
        }

        let mut padded = [0u8; DEVICE_ID_SIZE];
        padded[DEVICE_ID_SIZE - bytes.len()..].copy_from_slice(bytes);

        Ok(DeviceId(u32::from_be_bytes(padded)))
    }
}

impl From<u32> for DeviceId {
    fn from(value: u32) -> Self {
        DeviceId(value)
    }
}

impl fmt::Display for DeviceId {
    /// 8 lowercase hex digits, zero-padded, no prefix
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}
