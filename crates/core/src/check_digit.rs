//! CUIT/CUIL check-digit validation.
//!
//! An Argentine tax id has 11 digits: a two-digit type prefix, an 8-digit
//! document number and a modulo-11 check digit. Separators (`-` and spaces)
//! are accepted and ignored.

use crate::error::{CheckDigitError, Result};
use std::fmt;

/// Weights applied to the first ten digits.
const WEIGHTS: [u32; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];

/// Check digit for a 10-digit prefix, or `None` when the scheme has no
/// valid digit (remainder 1, i.e. 11 − r = 10).
pub fn compute_check_digit(prefix: &[u8; 10]) -> Option<u8> {
    let sum: u32 = prefix
        .iter()
        .zip(WEIGHTS)
        .map(|(&d, w)| d as u32 * w)
        .sum();
    match 11 - sum % 11 {
        11 => Some(0),
        10 => None,
        d => Some(d as u8),
    }
}

/// A CUIT/CUIL whose check digit verifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cuit {
    digits: [u8; 11],
}

impl Cuit {
    /// Parse and verify `input`.
    ///
    /// # Errors
    /// - `NonDigit` for any character other than a digit, `-` or space
    /// - `InvalidLength` unless exactly 11 digits remain
    /// - `UndefinedCheckDigit` if the prefix has no valid check digit
    /// - `Mismatch` if the last digit is wrong
    pub fn parse(input: &str) -> Result<Self> {
        let mut digits = Vec::with_capacity(11);
        for (position, character) in input.chars().enumerate() {
            match character {
                '-' | ' ' => continue,
                c => match c.to_digit(10) {
                    Some(d) => digits.push(d as u8),
                    None => return Err(CheckDigitError::NonDigit { character: c, position }.into()),
                },
            }
        }

        let digits: [u8; 11] = digits
            .as_slice()
            .try_into()
            .map_err(|_| CheckDigitError::InvalidLength(digits.len()))?;

        let mut prefix = [0u8; 10];
        prefix.copy_from_slice(&digits[..10]);
        let expected = compute_check_digit(&prefix).ok_or(CheckDigitError::UndefinedCheckDigit)?;
        let actual = digits[10];
        if expected != actual {
            return Err(CheckDigitError::Mismatch { expected, actual }.into());
        }

        Ok(Self { digits })
    }

    /// Two-digit type prefix (20, 23, 27, 30, ...).
    pub fn kind(&self) -> u8 {
        self.digits[0] * 10 + self.digits[1]
    }

    pub fn check_digit(&self) -> u8 {
        self.digits[10]
    }

    pub fn digits(&self) -> &[u8; 11] {
        &self.digits
    }
}

impl fmt::Display for Cuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.digits;
        write!(f, "{}{}-", d[0], d[1])?;
        for digit in &d[2..10] {
            write!(f, "{digit}")?;
        }
        write!(f, "-{}", d[10])
    }
}

/// `true` if `input` parses as a valid CUIT/CUIL.
pub fn is_valid(input: &str) -> bool {
    Cuit::parse(input).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_valid_with_and_without_separators() {
        assert!(is_valid("20-12345678-6"));
        assert!(is_valid("20123456786"));
        assert!(is_valid("20 12345678 6"));
    }

    #[test]
    fn test_wrong_check_digit() {
        let err = Cuit::parse("20-12345678-5").unwrap_err();
        assert!(matches!(
            err,
            Error::CheckDigit(CheckDigitError::Mismatch { expected: 6, actual: 5 })
        ));
    }

    #[test]
    fn test_remainder_zero_maps_to_zero() {
        let prefix = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(compute_check_digit(&prefix), Some(0));
        let prefix = [2, 0, 0, 0, 0, 0, 0, 0, 0, 6]; // 10 + 12 = 22
        assert_eq!(compute_check_digit(&prefix), Some(0));
    }

    #[test]
    fn test_undefined_check_digit() {
        // 5*2 + 2*0 ... sum = 12 -> 12 % 11 = 1 -> 11 - 1 = 10
        let prefix = [2, 0, 0, 0, 0, 0, 0, 0, 0, 1];
        assert_eq!(compute_check_digit(&prefix), None);

        let err = Cuit::parse("20000000010").unwrap_err();
        assert!(matches!(err, Error::CheckDigit(CheckDigitError::UndefinedCheckDigit)));
    }

    #[test]
    fn test_length_and_characters() {
        let err = Cuit::parse("20-1234567-6").unwrap_err();
        assert!(matches!(err, Error::CheckDigit(CheckDigitError::InvalidLength(10))));

        let err = Cuit::parse("20-1234a678-6").unwrap_err();
        assert!(matches!(
            err,
            Error::CheckDigit(CheckDigitError::NonDigit { character: 'a', position: 7 })
        ));
    }

    #[test]
    fn test_display_and_kind() {
        let cuit = Cuit::parse("20123456786").unwrap();
        assert_eq!(cuit.to_string(), "20-12345678-6");
        assert_eq!(cuit.kind(), 20);
        assert_eq!(cuit.check_digit(), 6);
    }
}
