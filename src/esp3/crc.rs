//! # CRC8 Implementation
//!
//! CRC8 checksum calculation for the ESP3 protocol.
//!
//! **Polynomial**: 0x07 (x^8 + x^2 + x + 1)
//! **Initial Value**: 0x00
//!
//! ESP3 carries two of these per telegram: CRC8H over the 4-byte header
//! and CRC8D over data + optional data.

/// ESP3 CRC8 polynomial
const CRC8_POLY: u8 = 0x07;

/// Precomputed CRC8 lookup table for fast calculation
pub(crate) const CRC8_TABLE: [u8; 256] = generate_crc8_table();

/// Generate CRC8 lookup table at compile time
const fn generate_crc8_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;

    while i < 256 {
        let mut crc = i as u8;
        let mut j = 0;

        while j < 8 {
            if (crc & 0x80) != 0 {
                crc = (crc << 1) ^ CRC8_POLY;
            } else {
                crc <<= 1;
            }
            j += 1;
        }

        table[i] = crc;
        i += 1;
    }

    table
}

/// Fold one byte into a running CRC8 value
///
/// This is the per-byte primitive used by the stream parser, which keeps a
/// running checksum while bytes trickle in.
#[inline]
pub fn crc8_step(byte: u8, crc: u8) -> u8 {
    CRC8_TABLE[(byte ^ crc) as usize]
}

/// Calculate the CRC8 checksum of a byte slice
///
/// Starts from 0 and folds each byte via [`crc8_step`].
///
/// # Examples
///
/// ```
/// use esp3_bridge::esp3::crc::crc8;
///
/// let header = [0x00, 0x0a, 0x07, 0x01];
/// let crc8h = crc8(&header);
/// ```
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc: u8 = 0;

    for &byte in data {
        crc = crc8_step(byte, crc);
    }

    crc
}

/// Calculate CRC8 using the direct bit-by-bit algorithm (slow, for verification)
///
/// Used only to test the lookup table implementation.
#[allow(dead_code)]
fn crc8_slow(data: &[u8]) -> u8 {
    let mut crc: u8 = 0;

    for &byte in data {
        crc ^= byte;

        for _ in 0..8 {
            if (crc & 0x80) != 0 {
                crc = (crc << 1) ^ CRC8_POLY;
            } else {
                crc <<= 1;
            }
        }
    }

    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc8_empty() {
        let data = [];
        assert_eq!(crc8(&data), 0x00);
    }

    #[test]
    fn test_crc8_table_known_entries() {
        // Spot values from the ESP3 specification's CRC8 table
        assert_eq!(CRC8_TABLE[0x00], 0x00);
        assert_eq!(CRC8_TABLE[0x01], 0x07);
        assert_eq!(CRC8_TABLE[0x0f], 0x2d);
        assert_eq!(CRC8_TABLE[0x10], 0x70);
        assert_eq!(CRC8_TABLE[0x20], 0xe0);
        assert_eq!(CRC8_TABLE[0x55], 0xac);
        assert_eq!(CRC8_TABLE[0x80], 0x89);
        assert_eq!(CRC8_TABLE[0xc0], 0x4e);
        assert_eq!(CRC8_TABLE[0xfe], 0xf4);
        assert_eq!(CRC8_TABLE[0xff], 0xf3);
    }

    #[test]
    fn test_crc8_lookup_table_matches_slow() {
        // The whole table must match the bit-by-bit definition
        for i in 0u16..=255 {
            let byte = [i as u8];
            assert_eq!(
                crc8(&byte),
                crc8_slow(&byte),
                "table mismatch at index 0x{i:02x}"
            );
        }
    }

    #[test]
    fn test_crc8_step_accumulates_like_fold() {
        let data = [0x00, 0x0a, 0x07, 0x01, 0xd2, 0xff];
        let mut crc = 0;
        for &byte in &data {
            crc = crc8_step(byte, crc);
        }
        assert_eq!(crc, crc8(&data));
    }

    #[test]
    fn test_crc8_known_vectors() {
        // ERP1 header: data_len=10, opt_len=7, packet_type=RADIO_ERP1
        let header = [0x00, 0x0a, 0x07, 0x01];
        assert_eq!(crc8(&header), crc8_slow(&header));

        let multi = [0x18, 0x16, 0xe0, 0x03];
        assert_eq!(crc8(&multi), crc8_slow(&multi));
    }

    #[test]
    fn test_crc8_changes_with_data() {
        let data1 = [0x00, 0x0a, 0x07, 0x01];
        let data2 = [0x00, 0x0a, 0x07, 0x02];

        assert_ne!(crc8(&data1), crc8(&data2), "CRC should change when data changes");
    }
}
