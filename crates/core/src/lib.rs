//! infotheory-core: exercises for an information-theory course
//!
//! This library provides the computational side of the exercises:
//! - Channel capacity of a discrete memoryless channel (Blahut–Arimoto)
//! - Zeroth- and first-order entropy and redundancy of a byte source
//! - Edit-distance string similarity
//! - CUIT/CUIL check-digit validation
//! - 3-bit packing of text over a fixed eight-letter alphabet
//!
//! # Architecture
//!
//! Each module is an independent input-to-output transformation:
//! - `channel`: channel matrix validation and the capacity solver
//! - `entropy`: symbol and pair histograms, entropy, redundancy
//! - `similarity`: Levenshtein distance
//! - `check_digit`: modulo-11 tax id verification
//! - `bitio`: MSB-first bit reading/writing
//! - `packing`: fixed-alphabet payload codec built on `bitio`
//!
//! # Design Principles
//!
//! - **No panics**: invalid input is reported through structured errors
//! - **Deterministic**: the solver always starts from the uniform distribution
//! - **Observable**: solver progress and non-convergence are `tracing` events

pub mod bitio;
pub mod channel;
pub mod check_digit;
pub mod entropy;
pub mod error;
pub mod packing;
pub mod similarity;

// Re-export commonly used types
pub use channel::{solve, ChannelMatrix, InputDistribution, Solution, SolverConfig};
pub use error::{Error, Result};
