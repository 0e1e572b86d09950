//! Bit-level I/O for fixed-width codes.
//!
//! `BitWriter` and `BitReader` work MSB-first: the first bit written is the
//! most significant bit of the first byte. Codes are at most 32 bits wide.
//!
//! # Padding Rules
//! - BitWriter: pads the final partial byte with trailing zeros and reports
//!   how many it added
//! - BitReader: cannot tell padding from data; the caller bounds the read
//!
//! # Example
//! ```
//! use infotheory_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b11, 2).unwrap();
//! let (bytes, padding) = writer.finish();
//! assert_eq!(bytes, vec![0b1011_1000]);
//! assert_eq!(padding, 3);
//!
//! let mut reader = BitReader::new(&bytes);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(2).unwrap(), 0b11);
//! ```

use crate::error::{BitIoError, Result};

/// Widest code accepted per call.
const MAX_WIDTH: u32 = 32;

/// Writes codes MSB-first into a byte buffer.
///
/// # Invariants
/// - `pending` holds fewer than 8 bits, right-aligned in `acc`
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    acc: u64,
    pending: u32,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the low `width` bits of `value`.
    ///
    /// # Errors
    /// `BitIoError::InvalidBitCount` if `width > 32`.
    pub fn write_bits(&mut self, value: u32, width: u32) -> Result<()> {
        if width > MAX_WIDTH {
            return Err(BitIoError::InvalidBitCount(width).into());
        }
        if width == 0 {
            return Ok(());
        }

        let mask = (1u64 << width) - 1;
        self.acc = (self.acc << width) | (value as u64 & mask);
        self.pending += width;

        while self.pending >= 8 {
            self.pending -= 8;
            self.bytes.push((self.acc >> self.pending) as u8);
        }
        self.acc &= (1u64 << self.pending) - 1;

        Ok(())
    }

    /// Total bits written so far.
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.pending as usize
    }

    /// Flush and return `(bytes, padding_bits)`.
    pub fn finish(mut self) -> (Vec<u8>, u8) {
        let padding = if self.pending == 0 { 0 } else { 8 - self.pending };
        if self.pending > 0 {
            self.bytes.push((self.acc << padding) as u8);
        }
        (self.bytes, padding as u8)
    }
}

/// Reads codes MSB-first from a byte buffer.
///
/// # Invariants
/// - `position` never exceeds `data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Read the next `width` bits as an unsigned value.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if `width > 32`
    /// - `BitIoError::UnexpectedEof` if fewer than `width` bits remain
    pub fn read_bits(&mut self, width: u32) -> Result<u32> {
        if width > MAX_WIDTH {
            return Err(BitIoError::InvalidBitCount(width).into());
        }
        if width as usize > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }

        let mut value = 0u32;
        for _ in 0..width {
            let byte = self.data[self.position / 8];
            let bit = (byte >> (7 - self.position % 8)) & 1;
            value = (value << 1) | bit as u32;
            self.position += 1;
        }
        Ok(value)
    }

    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.position
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_byte() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b1011_0011, 8).unwrap();
        let (bytes, padding) = writer.finish();
        assert_eq!(bytes, vec![0b1011_0011]);
        assert_eq!(padding, 0);
    }

    #[test]
    fn test_three_bit_codes_cross_bytes() {
        let mut writer = BitWriter::new();
        for code in 0..8 {
            writer.write_bits(code, 3).unwrap();
        }
        assert_eq!(writer.bit_len(), 24);
        let (bytes, padding) = writer.finish();
        assert_eq!(bytes, vec![0x05, 0x39, 0x77]);
        assert_eq!(padding, 0);

        let mut reader = BitReader::new(&bytes);
        for code in 0..8 {
            assert_eq!(reader.read_bits(3).unwrap(), code);
        }
        assert_eq!(reader.bits_remaining(), 0);
    }

    #[test]
    fn test_padding_reported() {
        let mut writer = BitWriter::new();
        writer.write_bits(1, 1).unwrap();
        let (bytes, padding) = writer.finish();
        assert_eq!(bytes, vec![0b1000_0000]);
        assert_eq!(padding, 7);
    }

    #[test]
    fn test_value_masked_to_width() {
        let mut writer = BitWriter::new();
        writer.write_bits(0xFF, 3).unwrap();
        let (bytes, _) = writer.finish();
        assert_eq!(bytes, vec![0b1110_0000]);
    }

    #[test]
    fn test_width_limits() {
        let mut writer = BitWriter::new();
        assert!(writer.write_bits(0, 33).is_err());
        writer.write_bits(0xDEAD_BEEF, 32).unwrap();
        let (bytes, _) = writer.finish();

        let mut reader = BitReader::new(&bytes);
        assert!(reader.read_bits(33).is_err());
        assert_eq!(reader.read_bits(32).unwrap(), 0xDEAD_BEEF);
    }

    #[test]
    fn test_read_past_end() {
        let data = [0b1010_1010];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bits(6).unwrap(), 0b101010);
        assert_eq!(reader.position(), 6);
        assert!(reader.read_bits(3).is_err());
        assert_eq!(reader.read_bits(2).unwrap(), 0b10);
    }
}
