//! Sample storage formats of WFDB signal files
//!
//! A signal file holds the samples of every signal assigned to it interleaved
//! frame by frame: `s0[0], s1[0], s0[1], s1[1], ...`. The supported encodings:
//!
//! | code | layout                                                        |
//! |------|---------------------------------------------------------------|
//! | 16   | 16-bit two's complement, little-endian                        |
//! | 212  | two 12-bit two's complement samples packed into three bytes   |
//! | 80   | 8-bit offset binary (stored byte minus 128)                   |

use ecg_core::{Error, Result};
use std::fmt;

/// Sample encoding of a signal file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFormat {
    Format16,
    Format212,
    Format80,
}

impl StorageFormat {
    /// Look up a format by its WFDB code
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            16 => Ok(Self::Format16),
            212 => Ok(Self::Format212),
            80 => Ok(Self::Format80),
            other => Err(Error::MalformedRecord(format!(
                "unsupported storage format {other} (supported: 16, 212, 80)"
            ))),
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            Self::Format16 => 16,
            Self::Format212 => 212,
            Self::Format80 => 80,
        }
    }

    /// Byte range `[first, last)` holding the flat sample indices `[from, to)`
    ///
    /// For format 212 the range is widened to whole three-byte pairs, so
    /// decoding it yields `from` rounded down to an even index.
    pub fn byte_span(&self, from: usize, to: usize) -> (usize, usize) {
        match self {
            Self::Format16 => (from * 2, to * 2),
            Self::Format80 => (from, to),
            Self::Format212 => ((from / 2) * 3, to.div_ceil(2) * 3),
        }
    }

    /// Number of whole samples stored in `bytes` bytes
    pub fn samples_in(&self, bytes: usize) -> usize {
        match self {
            Self::Format16 => bytes / 2,
            Self::Format80 => bytes,
            // A trailing odd sample occupies two bytes
            Self::Format212 => (bytes / 3) * 2 + usize::from(bytes % 3 == 2),
        }
    }

    /// Decode raw bytes into digital sample values
    pub fn decode(&self, bytes: &[u8]) -> Vec<i32> {
        match self {
            Self::Format16 => bytes
                .chunks_exact(2)
                .map(|b| i32::from(i16::from_le_bytes([b[0], b[1]])))
                .collect(),
            Self::Format80 => bytes.iter().map(|&b| i32::from(b) - 128).collect(),
            Self::Format212 => {
                let mut out = Vec::with_capacity(bytes.len() / 3 * 2 + 1);
                for group in bytes.chunks(3) {
                    if group.len() >= 2 {
                        let low = i32::from(group[0]) | (i32::from(group[1] & 0x0F) << 8);
                        out.push(sign_extend_12(low));
                    }
                    if group.len() == 3 {
                        let high = i32::from(group[2]) | (i32::from(group[1] & 0xF0) << 4);
                        out.push(sign_extend_12(high));
                    }
                }
                out
            }
        }
    }
}

fn sign_extend_12(value: i32) -> i32 {
    if value & 0x800 != 0 {
        value - 0x1000
    } else {
        value
    }
}

impl fmt::Display for StorageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format16_little_endian() {
        let bytes = [0x01, 0x00, 0xFF, 0xFF, 0x00, 0x80];
        assert_eq!(StorageFormat::Format16.decode(&bytes), vec![1, -1, -32768]);
    }

    #[test]
    fn test_format212_packing() {
        // byte 1 carries the high nibbles of both samples
        let s0: i32 = 291;
        let s1: i32 = -1;
        let s1_bits = s1 & 0xFFF;
        let bytes = [
            (s0 & 0xFF) as u8,
            (((s1_bits >> 8) << 4) | (s0 >> 8)) as u8,
            (s1_bits & 0xFF) as u8,
        ];
        assert_eq!(StorageFormat::Format212.decode(&bytes), vec![291, -1]);
    }

    #[test]
    fn test_format212_trailing_sample() {
        let bytes = [0x00, 0x08];
        assert_eq!(StorageFormat::Format212.decode(&bytes), vec![-2048]);
        assert_eq!(StorageFormat::Format212.samples_in(5), 3);
    }

    #[test]
    fn test_format80_offset_binary() {
        assert_eq!(StorageFormat::Format80.decode(&[0, 128, 255]), vec![-128, 0, 127]);
    }

    #[test]
    fn test_byte_spans() {
        assert_eq!(StorageFormat::Format16.byte_span(3, 5), (6, 10));
        assert_eq!(StorageFormat::Format80.byte_span(3, 5), (3, 5));
        assert_eq!(StorageFormat::Format212.byte_span(3, 5), (3, 9));
        assert_eq!(StorageFormat::Format212.byte_span(2, 4), (3, 6));
    }

    #[test]
    fn test_unknown_format() {
        assert!(matches!(
            StorageFormat::from_code(311),
            Err(Error::MalformedRecord(_))
        ));
        assert_eq!(StorageFormat::from_code(212).unwrap().to_string(), "212");
    }
}
