//! # ESP3 Bridge Library
//!
//! Decode and encode EnOcean ESP3 radio telegrams over a serial byte stream.
//!
//! This library reconstructs discrete, checksum-verified ESP3 frames from an
//! unbounded, possibly noisy byte source, maps RADIO_ERP1 frames into
//! structured radio packets, and encodes packets back into the exact wire
//! format for transmission.

pub mod config;
pub mod error;
pub mod esp3;
pub mod serial;
