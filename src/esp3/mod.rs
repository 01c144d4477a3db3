//! # ESP3 Protocol Module
//!
//! Implementation of the EnOcean Serial Protocol 3 (ESP3) telegram layer.
//!
//! This module handles:
//! - CRC8 checksum calculation (header and payload)
//! - Frame serialization and validate-and-parse
//! - Streaming reassembly with resynchronization after corruption
//! - RADIO_ERP1 and RESPONSE packet decoding/encoding
//! - Device identifier and protocol code tables

pub mod crc;
pub mod device_id;
pub mod erp1;
pub mod frame;
pub mod parser;
pub mod protocol;
pub mod response;
