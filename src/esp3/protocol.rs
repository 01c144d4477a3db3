//! # ESP3 Protocol Constants and Codes
//!
//! Core protocol definitions for EnOcean ESP3 communication.
//!
//! Wire layout of one telegram:
//!
//! ```text
//! SYNC(1) | DATA_LEN_HI(1) | DATA_LEN_LO(1) | OPT_LEN(1) | PACKET_TYPE(1)
//!         | CRC8H(1) | DATA(DATA_LEN) | OPT_DATA(OPT_LEN) | CRC8D(1)
//! ```

use std::fmt;

use crate::error::{Esp3BridgeError, Result};

/// ESP3 telegram sync byte (always 0x55)
pub const SYNC_BYTE: u8 = 0x55;

/// Header size: data length (2) + optional length (1) + packet type (1)
pub const HEADER_LEN: usize = 4;

/// Offset of the 2-byte big-endian data length within the header
pub const DATA_LENGTH_OFFSET: usize = 0;

/// Offset of the optional data length within the header
pub const OPT_DATA_LENGTH_OFFSET: usize = 2;

/// Offset of the packet type code within the header
pub const PACKET_TYPE_OFFSET: usize = 3;

/// Minimum serialized telegram size: sync + header + CRC8H + CRC8D
pub const MIN_FRAME_LEN: usize = 7;

/// Maximum data section length (2-byte header field)
pub const MAX_DATA_LEN: usize = u16::MAX as usize;

/// Maximum optional data section length (1-byte header field)
pub const MAX_OPT_DATA_LEN: usize = u8::MAX as usize;

/// RSSI placeholder emitted when encoding ERP1 for transmission
/// ("no RSSI measured" — the field is only meaningful on receive)
pub const TX_RSSI_PLACEHOLDER: u8 = 0xff;

/// Security level placeholder emitted when encoding ERP1 for transmission
pub const TX_SECURITY_PLACEHOLDER: u8 = 0x03;

/// ESP3 packet type codes
///
/// Closed enumeration: [`PacketType::from_byte`] rejects any byte outside
/// the table below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PacketType {
    RadioErp1 = 0x01,
    Response = 0x02,
    RadioSubTel = 0x03,
    Event = 0x04,
    CommonCommand = 0x05,
    SmartAckCommand = 0x06,
    RemoteManCommand = 0x07,
    RadioMessage = 0x09,
    RadioErp2 = 0x0a,
    ConfigCommand = 0x0b,
    CommandAccepted = 0x0c,
    Radio802_15_4 = 0x10,
    Command2_4 = 0x11,
}

impl PacketType {
    /// Parse a packet type from its wire code
    ///
    /// # Errors
    ///
    /// Returns [`Esp3BridgeError::UnknownPacketType`] for any byte without
    /// a table entry. Unknown codes are never mapped to a default.
    pub fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0x01 => Ok(Self::RadioErp1),
            0x02 => Ok(Self::Response),
            0x03 => Ok(Self::RadioSubTel),
            0x04 => Ok(Self::Event),
            0x05 => Ok(Self::CommonCommand),
            0x06 => Ok(Self::SmartAckCommand),
            0x07 => Ok(Self::RemoteManCommand),
            0x09 => Ok(Self::RadioMessage),
            0x0a => Ok(Self::RadioErp2),
            0x0b => Ok(Self::ConfigCommand),
            0x0c => Ok(Self::CommandAccepted),
            0x10 => Ok(Self::Radio802_15_4),
            0x11 => Ok(Self::Command2_4),
            _ => Err(Esp3BridgeError::UnknownPacketType(byte)),
        }
    }

    /// Wire code of this packet type
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Mnemonic for an arbitrary wire byte, `"UNKNOWN"` when unmapped
    ///
    /// Formatting counterpart of the strict [`PacketType::from_byte`]:
    /// raw bytes straight off the wire can always be displayed, never parsed.
    pub fn name(byte: u8) -> &'static str {
        match Self::from_byte(byte) {
            Ok(packet_type) => packet_type.mnemonic(),
            Err(_) => "UNKNOWN",
        }
    }

    fn mnemonic(self) -> &'static str {
        match self {
            Self::RadioErp1 => "RADIO_ERP1",
            Self::Response => "RESPONSE",
            Self::RadioSubTel => "RADIO_SUB_TEL",
            Self::Event => "EVENT",
            Self::CommonCommand => "COMMON_COMMAND",
            Self::SmartAckCommand => "SMART_ACK_COMMAND",
            Self::RemoteManCommand => "REMOTE_MAN_COMMAND",
            Self::RadioMessage => "RADIO_MESSAGE",
            Self::RadioErp2 => "RADIO_ERP2",
            Self::ConfigCommand => "CONFIG_COMMAND",
            Self::CommandAccepted => "COMMAND_ACCEPTED",
            Self::Radio802_15_4 => "RADIO_802_15_4",
            Self::Command2_4 => "COMMAND_2_4",
        }
    }
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Radio telegram profile codes (RORG)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rorg {
    Rps = 0xf6,
    OneBs = 0xd5,
    FourBs = 0xa5,
    Vld = 0xd2,
    Msc = 0xd1,
    Adt = 0xa6,
    SmLrnReq = 0xc6,
    SmLrnAns = 0xc7,
    SmRec = 0xa7,
    SysEx = 0xc5,
    Sec = 0x30,
    SecEncaps = 0x31,
    SecMan = 0x34,
    Signal = 0xd0,
    Ute = 0xd4,
}

impl Rorg {
    /// Parse a RORG from its wire code
    ///
    /// # Errors
    ///
    /// Returns [`Esp3BridgeError::UnknownRorg`] for unmapped bytes.
    pub fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0xf6 => Ok(Self::Rps),
            0xd5 => Ok(Self::OneBs),
            0xa5 => Ok(Self::FourBs),
            0xd2 => Ok(Self::Vld),
            0xd1 => Ok(Self::Msc),
            0xa6 => Ok(Self::Adt),
            0xc6 => Ok(Self::SmLrnReq),
            0xc7 => Ok(Self::SmLrnAns),
            0xa7 => Ok(Self::SmRec),
            0xc5 => Ok(Self::SysEx),
            0x30 => Ok(Self::Sec),
            0x31 => Ok(Self::SecEncaps),
            0x34 => Ok(Self::SecMan),
            0xd0 => Ok(Self::Signal),
            0xd4 => Ok(Self::Ute),
            _ => Err(Esp3BridgeError::UnknownRorg(byte)),
        }
    }

    /// Wire code of this RORG
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Mnemonic for an arbitrary wire byte, `"UNKNOWN"` when unmapped
    pub fn name(byte: u8) -> &'static str {
        match Self::from_byte(byte) {
            Ok(rorg) => rorg.mnemonic(),
            Err(_) => "UNKNOWN",
        }
    }

    fn mnemonic(self) -> &'static str {
        match self {
            Self::Rps => "RPS",
            Self::OneBs => "1BS",
            Self::FourBs => "4BS",
            Self::Vld => "VLD",
            Self::Msc => "MSC",
            Self::Adt => "ADT",
            Self::SmLrnReq => "SM_LRN_REQ",
            Self::SmLrnAns => "SM_LRN_ANS",
            Self::SmRec => "SM_REC",
            Self::SysEx => "SYS_EX",
            Self::Sec => "SEC",
            Self::SecEncaps => "SEC_ENCAPS",
            Self::SecMan => "SEC_MAN",
            Self::Signal => "SIGNAL",
            Self::Ute => "UTE",
        }
    }
}

impl fmt::Display for Rorg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Return codes carried by RESPONSE packets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ReturnCode {
    Ok = 0x00,
    Error = 0x01,
    NotSupported = 0x02,
    WrongParam = 0x03,
    OperationDenied = 0x04,
    LockSet = 0x05,
    BufferTooSmall = 0x06,
    NoFreeBuffer = 0x07,
}

impl ReturnCode {
    /// Parse a return code from its wire byte
    ///
    /// # Errors
    ///
    /// Returns [`Esp3BridgeError::UnknownReturnCode`] for unmapped bytes.
    pub fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0x00 => Ok(Self::Ok),
            0x01 => Ok(Self::Error),
            0x02 => Ok(Self::NotSupported),
            0x03 => Ok(Self::WrongParam),
            0x04 => Ok(Self::OperationDenied),
            0x05 => Ok(Self::LockSet),
            0x06 => Ok(Self::BufferTooSmall),
            0x07 => Ok(Self::NoFreeBuffer),
            _ => Err(Esp3BridgeError::UnknownReturnCode(byte)),
        }
    }

    /// Mnemonic for an arbitrary wire byte, `"UNKNOWN"` when unmapped
    pub fn name(byte: u8) -> &'static str {
        match Self::from_byte(byte) {
            Ok(code) => code.mnemonic(),
            Err(_) => "UNKNOWN",
        }
    }

    fn mnemonic(self) -> &'static str {
        match self {
            Self::Ok => "RET_OK",
            Self::Error => "RET_ERROR",
            Self::NotSupported => "RET_NOT_SUPPORTED",
            Self::WrongParam => "RET_WRONG_PARAM",
            Self::OperationDenied => "RET_OPERATION_DENIED",
            Self::LockSet => "RET_LOCK_SET",
            Self::BufferTooSmall => "RET_BUFFER_TO_SMALL",
            Self::NoFreeBuffer => "RET_NO_FREE_BUFFER",
        }
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Event codes carried by EVENT packets
///
/// Only the code table is modeled here; structured event payloads are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EventCode {
    SaReclaimNotSuccessful = 0x01,
    SaConfirmLearn = 0x02,
    SaLearnAck = 0x03,
    CoReady = 0x04,
    CoEventSecureDevices = 0x05,
    CoDutyCycleLimit = 0x06,
    CoTransmitFailed = 0x07,
    CoTxDone = 0x08,
    CoLrnModeDisabled = 0x09,
}

impl EventCode {
    /// Parse an event code from its wire byte
    ///
    /// # Errors
    ///
    /// Returns [`Esp3BridgeError::UnknownEventCode`] for unmapped bytes.
    pub fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0x01 => Ok(Self::SaReclaimNotSuccessful),
            0x02 => Ok(Self::SaConfirmLearn),
            0x03 => Ok(Self::SaLearnAck),
            0x04 => Ok(Self::CoReady),
            0x05 => Ok(Self::CoEventSecureDevices),
            0x06 => Ok(Self::CoDutyCycleLimit),
            0x07 => Ok(Self::CoTransmitFailed),
            0x08 => Ok(Self::CoTxDone),
            0x09 => Ok(Self::CoLrnModeDisabled),
            _ => Err(Esp3BridgeError::UnknownEventCode(byte)),
        }
    }

    /// Mnemonic for an arbitrary wire byte, `"UNKNOWN"` when unmapped
    pub fn name(byte: u8) -> &'static str {
        match Self::from_byte(byte) {
            Ok(code) => code.mnemonic(),
            Err(_) => "UNKNOWN",
        }
    }

    fn mnemonic(self) -> &'static str {
        match self {
            Self::SaReclaimNotSuccessful => "SA_RECLAIM_NOT_SUCCESSFUL",
            Self::SaConfirmLearn => "SA_CONFIRM_LEARN",
            Self::SaLearnAck => "SA_LEARN_ACK",
            Self::CoReady => "CO_READY",
            Self::CoEventSecureDevices => "CO_EVENT_SECUREDEVICES",
            Self::CoDutyCycleLimit => "CO_DUTYCYCLE_LIMIT",
            Self::CoTransmitFailed => "CO_TRANSMIT_FAILED",
            Self::CoTxDone => "CO_TX_DONE",
            Self::CoLrnModeDisabled => "CO_LRN_MODE_DISABLED",
        }
    }
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
