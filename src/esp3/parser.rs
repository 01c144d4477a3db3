//! # ESP3 Stream Parser
//!
//! State machine that reassembles ESP3 telegrams from a continuous,
//! possibly noisy serial byte stream. Checksum failures and sync loss
//! trigger resynchronization; no corrupted frame is ever emitted.
//!
//! The parser is a plain owned state object: one logical task feeds it
//! byte groups via [`StreamParser::push_bytes`] and collects completed
//! frames from the return value. It holds no locks and does no I/O.

use std::time::{Duration, Instant};

use tracing::trace;

use super::crc::crc8_step;
use super::frame::Frame;
use super::protocol::*;

/// Reception gap that forces the parser back to sync search
///
/// A sender mid-frame keeps bytes flowing; a pause this long means the
/// buffered partial frame is stale. Checked once per pushed byte group,
/// not once per byte.
pub const INTER_BYTE_TIMEOUT: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    WaitSync,
    WaitHeader,
    WaitHeaderChecksum,
    WaitData,
    WaitDataChecksum,
}

/// Streaming ESP3 telegram parser
///
/// Runs for the lifetime of the byte source; there is no terminal state.
#[derive(Debug)]
pub struct StreamParser {
    state: State,
    buffer: Vec<u8>,
    crc: u8,
    data_len: usize,
    opt_data_len: usize,
    packet_type_code: u8,
    last_byte_at: Option<Instant>,
}

impl StreamParser {
    pub fn new() -> Self {
        Self {
            state: State::WaitSync,
            buffer: Vec::new(),
            crc: 0,
            data_len: 0,
            opt_data_len: 0,
            packet_type_code: 0,
            last_byte_at: None,
        }
    }

    /// Feed one group of received bytes, returning completed frames in order
    ///
    /// Zero or more frames may complete per call; an empty slice is a no-op
    /// (a read that returned nothing is not an error and not a gap).
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Vec<Frame> {
        self.push_bytes_at(bytes, Instant::now())
    }

    /// [`StreamParser::push_bytes`] with an explicit arrival instant
    ///
    /// The instant drives the reception-gap rule; production code passes
    /// `Instant::now()`, tests pass synthetic times.
    pub fn push_bytes_at(&mut self, bytes: &[u8], now: Instant) -> Vec<Frame> {
        if bytes.is_empty() {
            return Vec::new();
        }

        // Gap check runs once per read, before any byte of the group
        if let Some(last) = self.last_byte_at {
            if now.duration_since(last) >= INTER_BYTE_TIMEOUT && self.state != State::WaitSync {
                trace!("reception gap, dropping partial frame");
                self.state = State::WaitSync;
            }
        }

        let mut frames = Vec::new();

        for &byte in bytes {
            self.step(byte, &mut frames);
        }

        self.last_byte_at = Some(now);

        frames
    }

    fn step(&mut self, byte: u8, frames: &mut Vec<Frame>) {
        match self.state {
            State::WaitSync => {
                if byte == SYNC_BYTE {
                    self.restart_header();
                }
                // Anything else is inter-frame noise, discarded
            }

            State::WaitHeader => {
                self.buffer.push(byte);
                self.crc = crc8_step(byte, self.crc);

                if self.buffer.len() == HEADER_LEN {
                    self.state = State::WaitHeaderChecksum;
                }
            }

            State::WaitHeaderChecksum => {
                if byte != self.crc {
                    self.resync_header(byte);
                    return;
                }

                self.data_len = u16::from_be_bytes([
                    self.buffer[DATA_LENGTH_OFFSET],
                    self.buffer[DATA_LENGTH_OFFSET + 1],
                ]) as usize;
                self.opt_data_len = self.buffer[OPT_DATA_LENGTH_OFFSET] as usize;
                self.packet_type_code = self.buffer[PACKET_TYPE_OFFSET];

                // A telegram with no payload at all is malformed
                if self.data_len + self.opt_data_len == 0 {
                    if byte == SYNC_BYTE {
                        // The checksum byte may itself start the next frame
                        self.restart_header();
                    } else {
                        self.state = State::WaitSync;
                    }
                    return;
                }

                self.buffer.clear();
                self.crc = 0;
                self.state = State::WaitData;
            }

            State::WaitData => {
                self.buffer.push(byte);
                self.crc = crc8_step(byte, self.crc);

                if self.buffer.len() == self.data_len + self.opt_data_len {
                    self.state = State::WaitDataChecksum;
                }
            }

            State::WaitDataChecksum => {
                if byte == SYNC_BYTE {
                    // Frame invalid, but this byte opens the next one
                    self.restart_header();
                    return;
                }

                self.state = State::WaitSync;

                if byte == self.crc {
                    self.emit(frames);
                }
            }
        }
    }

    /// CRC8H mismatch: recover alignment from bytes already buffered
    ///
    /// The four header bytes may contain the sync byte of the next valid
    /// frame; keeping the bytes after it avoids losing frame data that has
    /// already been read.
    fn resync_header(&mut self, byte: u8) {
        let sync_idx = self.buffer.iter().position(|&b| b == SYNC_BYTE);

        match sync_idx {
            None if byte != SYNC_BYTE => {
                self.state = State::WaitSync;
            }
            None => {
                // Only the rejected checksum byte is a sync; start fresh
                self.restart_header();
            }
            Some(idx) => {
                let mut kept: Vec<u8> = self.buffer[idx + 1..].to_vec();
                kept.push(byte);

                // Rebuild the running checksum from exactly the kept bytes
                self.crc = 0;
                for &kept_byte in &kept {
                    self.crc = crc8_step(kept_byte, self.crc);
                }

                self.buffer = kept;
                if self.buffer.len() < HEADER_LEN {
                    self.state = State::WaitHeader;
                } else {
                    self.state = State::WaitHeaderChecksum;
                }
            }
        }
    }

    fn restart_header(&mut self) {
        self.buffer.clear();
        self.crc = 0;
        self.state = State::WaitHeader;
    }

    fn emit(&mut self, frames: &mut Vec<Frame>) {
        let packet_type = match PacketType::from_byte(self.packet_type_code) {
            Ok(packet_type) => packet_type,
            Err(_) => {
                // Checksums passed but the type code is not ours to model;
                // the frame is dropped, the stream continues
                trace!(
                    code = self.packet_type_code,
                    "dropping frame with unknown packet type"
                );
                return;
            }
        };

        let data = self.buffer[..self.data_len].to_vec();
        let opt_data = self.buffer[self.data_len..].to_vec();

        // Lengths came from the validated header, so the caps always hold
        if let Ok(frame) = Frame::from_parts(packet_type, data, opt_data) {
            frames.push(frame);
        }
    }
}

impl Default for StreamParser {
    fn default() -> Self {
        Self::new()
    }
}
