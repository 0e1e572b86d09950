//! Error types for the infotheory exercises.
//!
//! Every fallible operation returns a structured error instead of panicking,
//! so the CLI can report exactly which precondition failed.

use thiserror::Error;

/// Top-level error type for all operations in the crate.
///
/// Each variant corresponds to one failure domain:
/// - Channel: the conditional-probability matrix failed validation
/// - Entropy: the source could not be analyzed
/// - Check digit: a CUIT/CUIL number is malformed or does not verify
/// - Bit I/O: reading/writing bits from/to byte buffers
/// - Packing: the fixed-alphabet payload could not be packed or unpacked
#[derive(Debug, Error)]
pub enum Error {
    /// Channel matrix rejected before solving
    #[error("invalid channel: {0}")]
    InvalidChannel(#[from] ChannelError),

    /// Source statistics error (e.g., empty input)
    #[error("entropy error: {0}")]
    Entropy(#[from] EntropyError),

    /// CUIT/CUIL validation failed
    #[error("check digit error: {0}")]
    CheckDigit(#[from] CheckDigitError),

    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Alphabet packing codec error
    #[error("packing error: {0}")]
    Packing(#[from] PackingError),
}

/// Reasons a channel matrix is rejected.
///
/// These are local precondition failures; retrying with the same matrix
/// always fails the same way.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChannelError {
    /// Fewer than two input symbols
    #[error("channel needs at least 2 symbols, got {0}")]
    TooFewSymbols(usize),

    /// A row does not have R entries
    #[error("row {row} has {actual} entries, expected {expected}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// An entry is NaN, infinite, or outside [0, 1]
    #[error("entry ({row}, {col}) = {value} is not a probability")]
    InvalidProbability { row: usize, col: usize, value: f64 },

    /// A row does not sum to 1 within tolerance
    #[error("row {row} sums to {sum}, expected 1 within {tolerance:e}")]
    RowSum { row: usize, sum: f64, tolerance: f64 },

    /// An input distribution has a negative entry or does not sum to 1
    #[error("input distribution invalid: {0}")]
    InvalidDistribution(String),

    /// An input distribution does not have one entry per channel symbol
    #[error("input distribution has {actual} entries, channel has {expected} symbols")]
    DistributionLength { expected: usize, actual: usize },

    /// Solver tolerance or epsilon is not a finite positive number
    #[error("solver {field} must be finite and positive, got {value}")]
    InvalidSolverConfig { field: &'static str, value: f64 },
}

/// Source entropy errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntropyError {
    /// No symbols to analyze
    #[error("source is empty: entropy is undefined")]
    EmptySource,
}

/// CUIT/CUIL validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckDigitError {
    /// Wrong number of digits after stripping separators
    #[error("expected 11 digits, got {0}")]
    InvalidLength(usize),

    /// A character other than a digit, '-' or ' '
    #[error("non-digit character {character:?} at position {position}")]
    NonDigit { character: char, position: usize },

    /// The weighted sum leaves a remainder that maps to 10
    #[error("no check digit exists for this prefix")]
    UndefinedCheckDigit,

    /// Final digit disagrees with the computed one
    #[error("check digit mismatch: expected {expected}, got {actual}")]
    Mismatch { expected: u8, actual: u8 },
}

/// Bit-level I/O errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Invalid bit count (more than 32 bits per call)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(u32),
}

/// Fixed-alphabet packing errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PackingError {
    /// Symbol not in the packing alphabet
    #[error("symbol {symbol:?} at position {position} is not in the alphabet")]
    UnknownSymbol { symbol: char, position: usize },

    /// Payload has no padding header byte
    #[error("payload is missing its padding header")]
    MissingHeader,

    /// Header announces more padding than possible
    #[error("padding of {padding} bits is invalid for {payload_bits} payload bits")]
    InvalidPadding { padding: u8, payload_bits: usize },

    /// Useful bits do not split into whole codes
    #[error("{bits} useful bits do not form whole {code_width}-bit codes")]
    TruncatedCode { bits: usize, code_width: u32 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
