//! # ESP3 Frame Model
//!
//! One ESP3 telegram: packet type, data and optional data, with exact
//! serialize and validate-and-parse rules. Section lengths are always
//! derived from the byte sequences, never stored separately.

use std::fmt;

use super::crc::{crc8, crc8_step};
use super::protocol::*;
use crate::error::{Esp3BridgeError, Result};

/// A single ESP3 telegram
///
/// Immutable once constructed, either from explicit parts (transmit path,
/// [`Frame::from_parts`]) or from a validated byte buffer (receive path,
/// [`Frame::parse`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    packet_type: PacketType,
    data: Vec<u8>,
    opt_data: Vec<u8>,
}

impl Frame {
    /// Build a frame from explicit parts for the transmit path
    ///
    /// # Errors
    ///
    /// Returns [`Esp3BridgeError::InvalidLength`] when `data` exceeds 65535
    /// bytes or `opt_data` exceeds 255 bytes (the header field widths).
    pub fn from_parts(packet_type: PacketType, data: Vec<u8>, opt_data: Vec<u8>) -> Result<Self> {
        if data.len() > MAX_DATA_LEN {
            return Err(Esp3BridgeError::InvalidLength {
                got: data.len(),
                max: MAX_DATA_LEN,
            });
        }

        if opt_data.len() > MAX_OPT_DATA_LEN {
            return Err(Esp3BridgeError::InvalidLength {
                got: opt_data.len(),
                max: MAX_OPT_DATA_LEN,
            });
        }

        Ok(Self {
            packet_type,
            data,
            opt_data,
        })
    }

    pub fn packet_type(&self) -> PacketType {
        self.packet_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn opt_data(&self) -> &[u8] {
        &self.opt_data
    }

    /// Data section length, derived from the data itself
    pub fn data_len(&self) -> u16 {
        self.data.len() as u16
    }

    /// Optional data section length, derived from the data itself
    pub fn opt_data_len(&self) -> u8 {
        self.opt_data.len() as u8
    }

    /// Serialize to the exact wire format
    ///
    /// `SYNC | DATA_LEN_HI | DATA_LEN_LO | OPT_LEN | PACKET_TYPE | CRC8H |
    /// DATA | OPT_DATA | CRC8D`
    pub fn serialize(&self) -> Vec<u8> {
        let data_len = self.data_len();
        let header = [
            (data_len >> 8) as u8,
            data_len as u8,
            self.opt_data_len(),
            self.packet_type.code(),
        ];
        let crc8h = crc8(&header);

        let mut crc8d = 0;
        for &byte in self.data.iter().chain(self.opt_data.iter()) {
            crc8d = crc8_step(byte, crc8d);
        }

        let mut wire = Vec::with_capacity(MIN_FRAME_LEN + self.data.len() + self.opt_data.len());
        wire.push(SYNC_BYTE);
        wire.extend_from_slice(&header);
        wire.push(crc8h);
        wire.extend_from_slice(&self.data);
        wire.extend_from_slice(&self.opt_data);
        wire.push(crc8d);

        wire
    }

    /// Validate and parse a complete serialized telegram
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is shorter than 7 bytes, does not
    /// start with the sync byte, fails either checksum, or carries an
    /// unknown packet type code. No partial frame is ever produced.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < MIN_FRAME_LEN {
            return Err(Esp3BridgeError::TooShort {
                got: bytes.len(),
                min: MIN_FRAME_LEN,
            });
        }

        if bytes[0] != SYNC_BYTE {
            return Err(Esp3BridgeError::MissingSync(bytes[0]));
        }

        let header = &bytes[1..1 + HEADER_LEN];
        let crc8h = bytes[1 + HEADER_LEN];
        let computed = crc8(header);

        if computed != crc8h {
            return Err(Esp3BridgeError::HeaderChecksumMismatch {
                got: crc8h,
                expected: computed,
            });
        }

        let data_len =
            u16::from_be_bytes([header[DATA_LENGTH_OFFSET], header[DATA_LENGTH_OFFSET + 1]])
                as usize;
        let opt_data_len = header[OPT_DATA_LENGTH_OFFSET] as usize;
        let packet_type = PacketType::from_byte(header[PACKET_TYPE_OFFSET])?;

        if bytes.len() < MIN_FRAME_LEN + data_len + opt_data_len {
            return Err(Esp3BridgeError::TooShort {
                got: bytes.len(),
                min: MIN_FRAME_LEN + data_len + opt_data_len,
            });
        }

        let crc8d_index = bytes.len() - 1;
        let crc8d = bytes[crc8d_index];
        let computed = crc8(&bytes[6..crc8d_index]);

        if computed != crc8d {
            return Err(Esp3BridgeError::PayloadChecksumMismatch {
                got: crc8d,
                expected: computed,
            });
        }

        let data = bytes[6..6 + data_len].to_vec();
        let opt_data = bytes[6 + data_len..crc8d_index].to_vec();

        Ok(Self {
            packet_type,
            data,
            opt_data,
        })
    }

    /// Parse a telegram from its hexadecimal text form
    ///
    /// Odd-length input is left-padded with one `0` before decoding.
    ///
    /// # Errors
    ///
    /// Returns [`Esp3BridgeError::InvalidHex`] for non-hex text, otherwise
    /// the same errors as [`Frame::parse`].
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let padded;
        let hex_str = if hex_str.len() % 2 != 0 {
            padded = format!("0{hex_str}");
            &padded
        } else {
            hex_str
        };

        let bytes = hex::decode(hex_str)?;

        Self::parse(&bytes)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PacketType: {}", self.packet_type)?;
        writeln!(f, "DataLen: {}", self.data_len())?;
        writeln!(f, "OptDataLen: {}", self.opt_data_len())?;
        writeln!(f, "Data: {}", hex::encode_upper(&self.data))?;
        write!(f, "OptData: {}", hex::encode_upper(&self.opt_data))
    }
}
