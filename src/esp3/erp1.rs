//! # ERP1 Packet Codec
//!
//! Structured view over RADIO_ERP1 frames: device identifiers, profile
//! code, signal quality and status mapped out of the frame's data and
//! optional data sections, and back.

use super::device_id::{DeviceId, DEVICE_ID_SIZE};
use super::frame::Frame;
use super::protocol::*;
use crate::error::{Esp3BridgeError, Result};

/// Minimum data section: 1 RORG + 4 sender id + 1 status
const MIN_DATA_LEN: usize = 6;

/// Minimum optional data: 1 sub-tel-num + 4 destination id + 1 RSSI + 1 security level
const MIN_OPT_DATA_LEN: usize = 7;

/// A decoded RADIO_ERP1 radio packet
///
/// Produced from a received [`Frame`] via [`Erp1Packet::from_frame`], or
/// built directly for transmission and converted with
/// [`Erp1Packet::to_frame`] right before serialization.
///
/// `rssi` and `security_level` are receive-side measurements; encoding
/// always emits fixed transmit placeholders instead of these fields, so a
/// frame round-trip is intentionally lossy for those two bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erp1Packet {
    pub destination_id: DeviceId,
    pub sender_id: DeviceId,
    pub rorg: Rorg,
    pub rssi: u8,
    pub security_level: u8,
    pub status: u8,
    pub sub_tel_num: u8,
    pub user_data: Vec<u8>,
}

impl Erp1Packet {
    /// Decode a RADIO_ERP1 frame into its structured fields
    ///
    /// Data layout: `RORG(1) | USER_DATA(N) | SENDER_ID(4) | STATUS(1)`.
    /// Optional data layout: `SUB_TEL_NUM(1) | DESTINATION_ID(4) | RSSI(1) |
    /// SECURITY_LEVEL(1)`.
    ///
    /// # Errors
    ///
    /// Fails with `WrongPacketType` for non-ERP1 frames, `DataTooShort` /
    /// `OptDataTooShort` when the sections cannot hold the layout, and
    /// `UnknownRorg` for an unmapped profile code.
    pub fn from_frame(frame: &Frame) -> Result<Self> {
        if frame.packet_type() != PacketType::RadioErp1 {
            return Err(Esp3BridgeError::WrongPacketType {
                got: PacketType::name(frame.packet_type().code()),
                expected: "RADIO_ERP1",
            });
        }

        let data = frame.data();
        let opt_data = frame.opt_data();

        if data.len() < MIN_DATA_LEN {
            return Err(Esp3BridgeError::DataTooShort {
                got: data.len(),
                min: MIN_DATA_LEN,
            });
        }

        if opt_data.len() < MIN_OPT_DATA_LEN {
            return Err(Esp3BridgeError::OptDataTooShort {
                got: opt_data.len(),
                min: MIN_OPT_DATA_LEN,
            });
        }

        let status_offset = data.len() - 1;
        let sender_id_offset = status_offset - DEVICE_ID_SIZE;

        let rorg = Rorg::from_byte(data[0])?;
        let user_data = data[1..sender_id_offset].to_vec();
        let sender_id = DeviceId::from_bytes(&data[sender_id_offset..status_offset])?;
        let status = data[status_offset];

        let sub_tel_num = opt_data[0];
        let destination_id = DeviceId::from_bytes(&opt_data[1..1 + DEVICE_ID_SIZE])?;
        let rssi = opt_data[5];
        let security_level = opt_data[6];

        Ok(Self {
            destination_id,
            sender_id,
            rorg,
            rssi,
            security_level,
            status,
            sub_tel_num,
            user_data,
        })
    }

    /// Encode into a RADIO_ERP1 frame for transmission
    ///
    /// The optional data ends with the fixed transmit placeholders
    /// ([`TX_RSSI_PLACEHOLDER`], [`TX_SECURITY_PLACEHOLDER`]) rather than
    /// this packet's `rssi`/`security_level` — those are populated by the
    /// receiving radio and carry no meaning on transmit.
    pub fn to_frame(&self) -> Frame {
        let sender_id = self.sender_id.to_bytes();
        let destination_id = self.destination_id.to_bytes();

        let mut data = Vec::with_capacity(1 + self.user_data.len() + DEVICE_ID_SIZE + 1);
        data.push(self.rorg.code());
        data.extend_from_slice(&self.user_data);
        data.extend_from_slice(&sender_id);
        data.push(self.status);

        let mut opt_data = Vec::with_capacity(3 + DEVICE_ID_SIZE);
        opt_data.push(self.sub_tel_num);
        opt_data.extend_from_slice(&destination_id);
        opt_data.push(TX_RSSI_PLACEHOLDER);
        opt_data.push(TX_SECURITY_PLACEHOLDER);

        Frame::from_parts(PacketType::RadioErp1, data, opt_data)
            .expect("ERP1 user data exceeds the frame data length field")
    }

    /// Serialize straight to the wire format
    pub fn serialize(&self) -> Vec<u8> {
        self.to_frame().serialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vld_frame() -> Frame {
        Frame::from_parts(
            PacketType::RadioErp1,
            vec![
                0xd2, 0x00, 0x00, 0x00, 0x00, 0xff, 0x03, 0xff, 0x82, 0x00, 0x85, 0x80,
            ],
            vec![0x03, 0x12, 0x34, 0x56, 0x78, 0xff, 0x00],
        )
        .unwrap()
    }

    #[test]
    fn test_decode_vld_frame() {
        let packet = Erp1Packet::from_frame(&vld_frame()).unwrap();

        assert_eq!(packet.destination_id, DeviceId::from(0x1234_5678));
        assert_eq!(packet.sender_id, DeviceId::from(0xff82_0085));
        assert_eq!(packet.rorg, Rorg::Vld);
        assert_eq!(packet.rssi, 0xff);
        assert_eq!(packet.security_level, 0x00);
        assert_eq!(packet.status, 0x80);
        assert_eq!(packet.sub_tel_num, 0x03);
        assert_eq!(packet.user_data, vec![0x00, 0x00, 0x00, 0x00, 0xff, 0x03]);
    }

    #[test]
    fn test_decode_minimum_sections_empty_user_data() {
        let frame = Frame::from_parts(
            PacketType::RadioErp1,
            vec![0xf6, 0xff, 0x82, 0x00, 0x85, 0x20],
            vec![0x01, 0xff, 0xff, 0xff, 0xff, 0x2d, 0x00],
        )
        .unwrap();

        let packet = Erp1Packet::from_frame(&frame).unwrap();
        assert_eq!(packet.rorg, Rorg::Rps);
        assert!(packet.user_data.is_empty());
        assert_eq!(packet.destination_id, DeviceId::BROADCAST);
        assert_eq!(packet.rssi, 0x2d);
    }

    #[test]
    fn test_decode_wrong_packet_type() {
        let frame = Frame::from_parts(PacketType::Response, vec![0x00], vec![]).unwrap();
        assert!(matches!(
            Erp1Packet::from_frame(&frame),
            Err(Esp3BridgeError::WrongPacketType {
                got: "RESPONSE",
                expected: "RADIO_ERP1",
            })
        ));
    }

    #[test]
    fn test_decode_data_too_short() {
        let frame = Frame::from_parts(
            PacketType::RadioErp1,
            vec![0xd2, 0x01, 0x02, 0x03, 0x04],
            vec![0x03, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00],
        )
        .unwrap();

        assert!(matches!(
            Erp1Packet::from_frame(&frame),
            Err(Esp3BridgeError::DataTooShort { got: 5, min: 6 })
        ));
    }

    #[test]
    fn test_decode_opt_data_too_short() {
        let frame = Frame::from_parts(
            PacketType::RadioErp1,
            vec![0xd2, 0xff, 0x82, 0x00, 0x85, 0x80],
            vec![0x03, 0xff, 0xff, 0xff, 0xff, 0xff],
        )
        .unwrap();

        assert!(matches!(
            Erp1Packet::from_frame(&frame),
            Err(Esp3BridgeError::OptDataTooShort { got: 6, min: 7 })
        ));
    }

    #[test]
    fn test_decode_unknown_rorg() {
        let frame = Frame::from_parts(
            PacketType::RadioErp1,
            vec![0x42, 0xff, 0x82, 0x00, 0x85, 0x80],
            vec![0x03, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00],
        )
        .unwrap();

        assert!(matches!(
            Erp1Packet::from_frame(&frame),
            Err(Esp3BridgeError::UnknownRorg(0x42))
        ));
    }

    #[test]
    fn test_encode_layout() {
        let packet = Erp1Packet {
            destination_id: DeviceId::from(0x1234_5678),
            sender_id: DeviceId::from(0xff82_0085),
            rorg: Rorg::Vld,
            rssi: 0x4b,
            security_level: 0x01,
            status: 0x80,
            sub_tel_num: 0x03,
            user_data: vec![0x01, 0x02],
        };

        let frame = packet.to_frame();
        assert_eq!(frame.packet_type(), PacketType::RadioErp1);
        assert_eq!(
            frame.data(),
            &[0xd2, 0x01, 0x02, 0xff, 0x82, 0x00, 0x85, 0x80]
        );
        // Trailing bytes are the transmit placeholders, not the packet's
        // own rssi/security_level
        assert_eq!(
            frame.opt_data(),
            &[0x03, 0x12, 0x34, 0x56, 0x78, 0xff, 0x03]
        );
    }

    #[test]
    fn test_round_trip_is_lossy_only_for_rssi_and_security() {
        let original = Erp1Packet::from_frame(&vld_frame()).unwrap();
        let reencoded = Erp1Packet::from_frame(&original.to_frame()).unwrap();

        assert_eq!(reencoded.destination_id, original.destination_id);
        assert_eq!(reencoded.sender_id, original.sender_id);
        assert_eq!(reencoded.rorg, original.rorg);
        assert_eq!(reencoded.status, original.status);
        assert_eq!(reencoded.sub_tel_num, original.sub_tel_num);
        assert_eq!(reencoded.user_data, original.user_data);

        assert_eq!(reencoded.rssi, TX_RSSI_PLACEHOLDER);
        assert_eq!(reencoded.security_level, TX_SECURITY_PLACEHOLDER);
    }

    #[test]
    fn test_serialize_parses_back() {
        let packet = Erp1Packet::from_frame(&vld_frame()).unwrap();
        let wire = packet.serialize();

        let frame = Frame::parse(&wire).unwrap();
        assert_eq!(frame, packet.to_frame());
    }
}
