//! Configuration for the infotheory application.
//!
//! Turns parsed command-line arguments into fully resolved run settings,
//! filling anything left out with seeded defaults.
//!
//! # Philosophy
//!
//! Every command should work with ZERO arguments. Missing inputs (a channel
//! matrix, a source file) are generated from a seed, and the resolved
//! configuration can be printed so the run can be repeated exactly.

use crate::input_gen::{generate_sample_data, random_channel_matrix};
use anyhow::{bail, Context, Result};
use infotheory_core::channel::{ChannelMatrix, SolverConfig};
use std::path::PathBuf;

/// Default number of symbols for a generated channel.
const DEFAULT_SYMBOLS: usize = 2;

/// Default size of a generated entropy sample.
const DEFAULT_SAMPLE_BYTES: usize = 64 * 1024;

/// Pick the explicit seed or derive one from the clock.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    })
}

/// Parse one whitespace- or comma-separated matrix row.
pub fn parse_row(text: &str) -> Result<Vec<f64>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().with_context(|| format!("invalid probability {s:?}")))
        .collect()
}

/// Where the channel matrix came from.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixSource {
    /// Rows given with `--row`
    Rows,
    /// Generated from the seed
    Random { seed: u64 },
}

/// Resolved settings for the `capacity` command.
#[derive(Debug, Clone)]
pub struct CapacityConfig {
    pub matrix: ChannelMatrix,
    pub source: MatrixSource,
    /// Accepted deviation of each row sum from 1
    pub row_tolerance: f64,
    pub solver: SolverConfig,
}

impl CapacityConfig {
    /// Build from raw CLI values.
    ///
    /// With no rows, a random `symbols`×`symbols` channel is generated.
    /// With rows and `symbols`, the row count must equal `symbols`.
    pub fn resolve(
        symbols: Option<usize>,
        rows: &[String],
        row_tolerance: f64,
        solver: SolverConfig,
        seed: Option<u64>,
    ) -> Result<Self> {
        solver.validate().context("invalid solver settings")?;

        let (matrix, source) = if rows.is_empty() {
            let seed = resolve_seed(seed);
            let r = symbols.unwrap_or(DEFAULT_SYMBOLS);
            let matrix = random_channel_matrix(seed, r).context("generating random channel")?;
            (matrix, MatrixSource::Random { seed })
        } else {
            if let Some(r) = symbols {
                if r != rows.len() {
                    bail!("--symbols is {r} but {} rows were given", rows.len());
                }
            }
            let parsed = rows
                .iter()
                .enumerate()
                .map(|(i, row)| parse_row(row).with_context(|| format!("row {}", i + 1)))
                .collect::<Result<Vec<_>>>()?;
            let matrix = ChannelMatrix::with_tolerance(parsed, row_tolerance)?;
            (matrix, MatrixSource::Rows)
        };

        Ok(Self {
            matrix,
            source,
            row_tolerance,
            solver,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.source {
            MatrixSource::Rows => println!("Channel: given rows"),
            MatrixSource::Random { seed } => println!("Channel: random (seed {seed})"),
        }
        println!("Symbols: {}", self.matrix.symbols());
        println!("Row tolerance: {:e}", self.row_tolerance);
        println!("Solver tolerance: {:e}", self.solver.tolerance);
        println!("Max iterations: {}", self.solver.max_iterations);
        println!("Log epsilon: {:e}", self.solver.epsilon);
        println!();
    }
}

/// Where the bytes for the `entropy` command came from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceInput {
    File(PathBuf),
    Generated { seed: u64, size: usize },
}

/// Resolved settings for the `entropy` command.
#[derive(Debug, Clone)]
pub struct EntropyConfig {
    pub input: SourceInput,
}

impl EntropyConfig {
    pub fn resolve(input: Option<PathBuf>, size: Option<usize>, seed: Option<u64>) -> Self {
        let input = match input {
            Some(path) => SourceInput::File(path),
            None => SourceInput::Generated {
                seed: resolve_seed(seed),
                size: size.unwrap_or(DEFAULT_SAMPLE_BYTES),
            },
        };
        Self { input }
    }

    /// Read the file or generate the sample.
    pub fn load(&self) -> Result<Vec<u8>> {
        match &self.input {
            SourceInput::File(path) => {
                std::fs::read(path).with_context(|| format!("reading {}", path.display()))
            }
            SourceInput::Generated { seed, size } => Ok(generate_sample_data(*seed, *size)),
        }
    }

    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.input {
            SourceInput::File(path) => println!("Input file: {}", path.display()),
            SourceInput::Generated { seed, size } => {
                println!("Input: generated sample ({size} bytes, seed {seed})")
            }
        }
        println!();
    }
}
