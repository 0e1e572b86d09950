//! Fixed-alphabet text packing.
//!
//! Text over the eight-letter alphabet `ABCDEFGH` needs only 3 bits per
//! symbol instead of 8. The packed payload is:
//!
//! ```text
//! +---------+------------------------------------------+
//! | padding | 3-bit codes, MSB-first, zero padded      |
//! | 1 byte  | ceil(3n / 8) bytes                       |
//! +---------+------------------------------------------+
//! ```
//!
//! where `padding` (0–7) counts the zero bits appended after the last code.

use crate::bitio::{BitReader, BitWriter};
use crate::error::{PackingError, Result};

/// Symbols in code order: `A = 000`, ..., `H = 111`.
pub const ALPHABET: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// Bits per symbol.
pub const CODE_WIDTH: u32 = 3;

fn code_of(symbol: char) -> Option<u32> {
    ALPHABET.iter().position(|&c| c == symbol).map(|i| i as u32)
}

/// Packed size in bytes for `symbols` symbols, header included.
pub fn packed_len(symbols: usize) -> usize {
    1 + (symbols * CODE_WIDTH as usize).div_ceil(8)
}

/// Pack `text` into the 3-bit wire layout.
///
/// # Errors
/// `PackingError::UnknownSymbol` for the first character outside [`ALPHABET`].
pub fn pack(text: &str) -> Result<Vec<u8>> {
    let mut writer = BitWriter::new();
    for (position, symbol) in text.chars().enumerate() {
        let code = code_of(symbol).ok_or(PackingError::UnknownSymbol { symbol, position })?;
        writer.write_bits(code, CODE_WIDTH)?;
    }

    let (payload, padding) = writer.finish();
    let mut out = Vec::with_capacity(payload.len() + 1);
    out.push(padding);
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Recover the text from a packed payload.
///
/// # Errors
/// - `MissingHeader` for empty input
/// - `InvalidPadding` if the header exceeds 7 or the payload size
/// - `TruncatedCode` if the useful bits are not a multiple of 3
pub fn unpack(bytes: &[u8]) -> Result<String> {
    let (&padding, payload) = bytes.split_first().ok_or(PackingError::MissingHeader)?;
    let payload_bits = payload.len() * 8;

    if padding > 7 || padding as usize > payload_bits {
        return Err(PackingError::InvalidPadding { padding, payload_bits }.into());
    }

    let useful = payload_bits - padding as usize;
    if useful % CODE_WIDTH as usize != 0 {
        return Err(PackingError::TruncatedCode {
            bits: useful,
            code_width: CODE_WIDTH,
        }
        .into());
    }

    let mut reader = BitReader::new(payload);
    let mut text = String::with_capacity(useful / CODE_WIDTH as usize);
    while reader.position() < useful {
        let code = reader.read_bits(CODE_WIDTH)?;
        text.push(ALPHABET[code as usize]);
    }

    tracing::trace!(bytes = bytes.len(), symbols = text.len(), "payload unpacked");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_whole_alphabet() {
        let packed = pack("ABCDEFGH").unwrap();
        assert_eq!(packed, vec![0, 0x05, 0x39, 0x77]);
        assert_eq!(unpack(&packed).unwrap(), "ABCDEFGH");
    }

    #[test]
    fn test_padding_header() {
        // H = 111 -> 1110_0000 with 5 padding bits
        let packed = pack("H").unwrap();
        assert_eq!(packed, vec![5, 0b1110_0000]);
        assert_eq!(unpack(&packed).unwrap(), "H");
    }

    #[test]
    fn test_empty_text() {
        let packed = pack("").unwrap();
        assert_eq!(packed, vec![0]);
        assert_eq!(unpack(&packed).unwrap(), "");
    }

    #[test]
    fn test_packed_len() {
        for text in ["", "A", "ABC", "ABCDEFGH", "HHHHHHHHHHHHHHHHHHHHHHHHHHHHHHHHH"] {
            assert_eq!(pack(text).unwrap().len(), packed_len(text.len()));
        }
        // 3 bits instead of 8: 100 symbols fit in 39 bytes
        assert_eq!(packed_len(100), 39);
    }

    #[test]
    fn test_unknown_symbol() {
        let err = pack("ABXD").unwrap_err();
        assert!(matches!(
            err,
            Error::Packing(PackingError::UnknownSymbol { symbol: 'X', position: 2 })
        ));
        // lowercase is outside the alphabet too
        assert!(pack("a").is_err());
    }

    #[test]
    fn test_malformed_payloads() {
        assert!(matches!(unpack(&[]).unwrap_err(), Error::Packing(PackingError::MissingHeader)));
        assert!(matches!(
            unpack(&[8, 0]).unwrap_err(),
            Error::Packing(PackingError::InvalidPadding { padding: 8, .. })
        ));
        assert!(matches!(
            unpack(&[3]).unwrap_err(),
            Error::Packing(PackingError::InvalidPadding { padding: 3, payload_bits: 0 })
        ));
        // 8 - 0 padding = 8 useful bits, not a multiple of 3
        assert!(matches!(
            unpack(&[0, 0xFF]).unwrap_err(),
            Error::Packing(PackingError::TruncatedCode { bits: 8, .. })
        ));
    }
}
