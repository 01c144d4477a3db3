//! # RESPONSE Packet View
//!
//! Structured view over RESPONSE frames: a return code followed by
//! command-specific optional bytes.

use super::frame::Frame;
use super::protocol::{PacketType, ReturnCode};
use crate::error::{Esp3BridgeError, Result};

/// A decoded RESPONSE packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePacket {
    pub return_code: ReturnCode,
    /// Bytes after the return code; meaning depends on the command answered
    pub optional_data: Vec<u8>,
}

impl ResponsePacket {
    /// Decode a RESPONSE frame
    ///
    /// # Errors
    ///
    /// Fails with `WrongPacketType` for other frame kinds, `DataTooShort`
    /// when the return code byte is missing, and `UnknownReturnCode` for
    /// an unmapped code.
    pub fn from_frame(frame: &Frame) -> Result<Self> {
        if frame.packet_type() != PacketType::Response {
            return Err(Esp3BridgeError::WrongPacketType {
                got: PacketType::name(frame.packet_type().code()),
                expected: "RESPONSE",
            });
        }

        let data = frame.data();

        if data.is_empty() {
            return Err(Esp3BridgeError::DataTooShort { got: 0, min: 1 });
        }

        let return_code = ReturnCode::from_byte(data[0])?;

        Ok(Self {
            return_code,
            optional_data: data[1..].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ok_response() {
        let frame = Frame::from_parts(PacketType::Response, vec![0x00], vec![]).unwrap();
        let response = ResponsePacket::from_frame(&frame).unwrap();

        assert_eq!(response.return_code, ReturnCode::Ok);
        assert!(response.optional_data.is_empty());
    }

    #[test]
    fn test_decode_response_with_optional_data() {
        let frame =
            Frame::from_parts(PacketType::Response, vec![0x00, 0xab, 0xcd], vec![]).unwrap();
        let response = ResponsePacket::from_frame(&frame).unwrap();

        assert_eq!(response.return_code, ReturnCode::Ok);
        assert_eq!(response.optional_data, vec![0xab, 0xcd]);
    }

    #[test]
    fn test_decode_wrong_packet_type() {
        let frame = Frame::from_parts(
            PacketType::RadioErp1,
            vec![0xf6, 0xff, 0x82, 0x00, 0x85, 0x20],
            vec![0x01, 0xff, 0xff, 0xff, 0xff, 0x2d, 0x00],
        )
        .unwrap();

        assert!(matches!(
            ResponsePacket::from_frame(&frame),
            Err(Esp3BridgeError::WrongPacketType {
                got: "RADIO_ERP1",
                expected: "RESPONSE",
            })
        ));
    }

    #[test]
    fn test_decode_empty_data() {
        // Zero-length data cannot appear off the wire (the parser treats it
        // as malformed) but from_parts can build it
        let frame = Frame::from_parts(PacketType::Response, vec![], vec![0x00]).unwrap();
        assert!(matches!(
            ResponsePacket::from_frame(&frame),
            Err(Esp3BridgeError::DataTooShort { got: 0, min: 1 })
        ));
    }

    #[test]
    fn test_decode_unknown_return_code() {
        let frame = Frame::from_parts(PacketType::Response, vec![0x42], vec![]).unwrap();
        assert!(matches!(
            ResponsePacket::from_frame(&frame),
            Err(Esp3BridgeError::UnknownReturnCode(0x42))
        ));
    }
}
