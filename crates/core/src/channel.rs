//! Discrete memoryless channel capacity.
//!
//! A channel is described by its R×R conditional-probability matrix P(y|x):
//! row `i` is the output distribution observed when input symbol `i` is sent.
//! [`solve`] runs the Blahut–Arimoto fixed point to find the input
//! distribution P(x) that maximizes the mutual information I(X;Y); the
//! maximum is the channel capacity in bits per symbol.
//!
//! # Numerics
//! Every logarithm is base 2 and goes through [`safe_log2`], which adds a
//! small epsilon so that zero probabilities never reach `log2(0)`. Terms are
//! never skipped: a zero entry contributes `0 * log2(eps / ..) = 0`.
//!
//! # Example
//! ```
//! use infotheory_core::channel::{solve, ChannelMatrix, SolverConfig};
//!
//! let bsc = ChannelMatrix::new(vec![vec![0.9, 0.1], vec![0.1, 0.9]]).unwrap();
//! let solution = solve(&bsc, &SolverConfig::default()).unwrap();
//! assert!(solution.converged());
//! assert!((solution.capacity - 0.531).abs() < 1e-3);
//! ```

use crate::entropy::entropy;
use crate::error::{ChannelError, Result};
use serde::Serialize;

/// Default tolerance for row sums and for the convergence test.
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Default additive guard inside logarithms.
pub const DEFAULT_EPSILON: f64 = 1e-12;

/// `log2(p + eps)`.
///
/// With `eps > 0` this is defined for every probability, including zero.
#[inline]
pub fn safe_log2(p: f64, eps: f64) -> f64 {
    (p + eps).log2()
}

/// Row-stochastic conditional-probability matrix P(y|x).
///
/// # Invariants
/// - square, R ≥ 2
/// - every entry is finite and in [0, 1]
/// - every row sums to 1 within the tolerance given at construction
///
/// The matrix is immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelMatrix {
    rows: Vec<Vec<f64>>,
}

impl ChannelMatrix {
    /// Validate `rows` with the default row tolerance (1e-5).
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::with_tolerance(rows, DEFAULT_TOLERANCE)
    }

    /// Validate `rows`, accepting row sums within `tolerance` of 1.
    ///
    /// # Errors
    /// `ChannelError` describing the first violated precondition.
    pub fn with_tolerance(rows: Vec<Vec<f64>>, tolerance: f64) -> Result<Self> {
        let r = rows.len();
        if r < 2 {
            return Err(ChannelError::TooFewSymbols(r).into());
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != r {
                return Err(ChannelError::DimensionMismatch {
                    row: i,
                    expected: r,
                    actual: row.len(),
                }
                .into());
            }

            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                    return Err(ChannelError::InvalidProbability { row: i, col: j, value }.into());
                }
            }

            let sum: f64 = row.iter().sum();
            if (sum - 1.0).abs() > tolerance {
                return Err(ChannelError::RowSum { row: i, sum, tolerance }.into());
            }
        }

        Ok(Self { rows })
    }

    /// The R×R identity channel (noiseless).
    pub fn identity(r: usize) -> Result<Self> {
        let rows = (0..r)
            .map(|i| (0..r).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        Self::new(rows)
    }

    /// Symmetric channel: correct symbol with `1 - error`, every wrong symbol
    /// with `error / (R - 1)`.
    pub fn symmetric(r: usize, error: f64) -> Result<Self> {
        let off = if r > 1 { error / (r - 1) as f64 } else { 0.0 };
        let rows = (0..r)
            .map(|i| (0..r).map(|j| if i == j { 1.0 - error } else { off }).collect())
            .collect();
        Self::new(rows)
    }

    /// Number of symbols R.
    pub fn symbols(&self) -> usize {
        self.rows.len()
    }

    /// P(y = `output` | x = `input`).
    pub fn get(&self, input: usize, output: usize) -> f64 {
        self.rows[input][output]
    }

    /// Row `input`, i.e. P(y | x = `input`).
    pub fn row(&self, input: usize) -> &[f64] {
        &self.rows[input]
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Validate `probabilities` as an input distribution for this channel.
    ///
    /// # Errors
    /// `ChannelError::DistributionLength` unless there are R entries, plus
    /// everything [`InputDistribution::new`] rejects.
    pub fn distribution(
        &self,
        probabilities: Vec<f64>,
        tolerance: f64,
    ) -> Result<InputDistribution> {
        let input = InputDistribution::new(probabilities, tolerance)?;
        self.check_input(&input)?;
        Ok(input)
    }

    fn check_input(&self, input: &InputDistribution) -> Result<()> {
        if input.len() != self.symbols() {
            return Err(ChannelError::DistributionLength {
                expected: self.symbols(),
                actual: input.len(),
            }
            .into());
        }
        Ok(())
    }

    /// P(y) = Σₓ P(x)·P(y|x).
    ///
    /// # Errors
    /// `ChannelError::DistributionLength` if `input` does not have R entries.
    pub fn output_distribution(&self, input: &InputDistribution) -> Result<Vec<f64>> {
        self.check_input(input)?;
        Ok(output_distribution(&self.rows, input.probabilities()))
    }

    /// I(X;Y) in bits at `input`, epsilon-guarded.
    pub fn mutual_information(&self, input: &InputDistribution, eps: f64) -> Result<f64> {
        self.check_input(input)?;
        Ok(mutual_information(&self.rows, input.probabilities(), eps))
    }

    /// I(X;Y) under the uniform input distribution.
    pub fn uniform_mutual_information(&self, eps: f64) -> f64 {
        let uniform = InputDistribution::uniform(self.symbols());
        mutual_information(&self.rows, uniform.probabilities(), eps)
    }

    /// H(Y) at `input`.
    pub fn output_entropy(&self, input: &InputDistribution) -> Result<f64> {
        Ok(entropy(&self.output_distribution(input)?))
    }

    /// H(Y|X) = Σₓ P(x)·H(Y | X = x).
    pub fn conditional_entropy(&self, input: &InputDistribution) -> Result<f64> {
        self.check_input(input)?;
        Ok(self
            .rows
            .iter()
            .zip(input.probabilities())
            .map(|(row, &px)| px * entropy(row))
            .sum())
    }
}

/// Input symbol distribution P(x).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InputDistribution(Vec<f64>);

impl InputDistribution {
    /// Uniform distribution over `r` symbols.
    pub fn uniform(r: usize) -> Self {
        Self(vec![1.0 / r as f64; r])
    }

    /// Validate a caller-supplied distribution.
    ///
    /// # Errors
    /// `ChannelError::InvalidDistribution` if any entry is negative or not
    /// finite, or the entries do not sum to 1 within `tolerance`.
    pub fn new(probabilities: Vec<f64>, tolerance: f64) -> Result<Self> {
        if probabilities.iter().any(|p| !p.is_finite() || *p < 0.0) {
            let reason = "negative or non-finite entry".into();
            return Err(ChannelError::InvalidDistribution(reason).into());
        }
        let sum: f64 = probabilities.iter().sum();
        if (sum - 1.0).abs() > tolerance {
            return Err(ChannelError::InvalidDistribution(format!("entries sum to {sum}")).into());
        }
        Ok(Self(probabilities))
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

/// Solver parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolverConfig {
    /// Stop once ‖P'(x) − P(x)‖₂ falls below this
    pub tolerance: f64,
    /// Iteration cap; reaching it is reported, not fatal
    pub max_iterations: usize,
    /// Additive guard inside every logarithm
    pub epsilon: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl SolverConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Check that `tolerance` and `epsilon` are finite and positive.
    ///
    /// A zero or negative epsilon lets `0 * log2(0)` turn every iterate into
    /// NaN; a NaN tolerance disables the convergence test.
    ///
    /// # Errors
    /// `ChannelError::InvalidSolverConfig` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("tolerance", self.tolerance), ("epsilon", self.epsilon)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChannelError::InvalidSolverConfig { field, value }.into());
            }
        }
        Ok(())
    }
}

/// How the iteration ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Convergence {
    /// Update norm fell below tolerance after `iterations` updates
    Converged { iterations: usize },
    /// Cap reached; `last_delta` is the norm of the final update
    IterationCap { iterations: usize, last_delta: f64 },
}

/// Result of [`solve`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    /// Channel capacity in bits per symbol
    pub capacity: f64,
    /// Capacity-achieving input distribution (best estimate)
    pub distribution: InputDistribution,
    pub convergence: Convergence,
}

impl Solution {
    pub fn converged(&self) -> bool {
        matches!(self.convergence, Convergence::Converged { .. })
    }

    pub fn iterations(&self) -> usize {
        match self.convergence {
            Convergence::Converged { iterations }
            | Convergence::IterationCap { iterations, .. } => iterations,
        }
    }
}

/// Capacity alongside the uniform-input baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityReport {
    pub solution: Solution,
    /// I(X;Y) with every input equally likely
    pub uniform_information: f64,
    /// capacity − uniform_information
    pub gain: f64,
}

/// Run the Blahut–Arimoto iteration on a validated channel.
///
/// Starts from the uniform distribution and applies
/// `P'(x) ∝ P(x)·exp(D(P(y|x) ‖ P(y)))` until the Euclidean norm of the
/// update drops below `config.tolerance` or `config.max_iterations` updates
/// have been made. The capacity is the mutual information at the final
/// distribution, clamped to `[0, log2 R]` to absorb rounding.
///
/// # Errors
/// `ChannelError::InvalidSolverConfig` if `config` fails
/// [`SolverConfig::validate`]; nothing is iterated in that case.
pub fn solve(matrix: &ChannelMatrix, config: &SolverConfig) -> Result<Solution> {
    config.validate()?;

    let rows = matrix.rows();
    let r = matrix.symbols();
    let eps = config.epsilon;

    let mut px = vec![1.0 / r as f64; r];
    let mut convergence = Convergence::IterationCap {
        iterations: config.max_iterations,
        last_delta: f64::INFINITY,
    };

    for iteration in 1..=config.max_iterations {
        let py = output_distribution(rows, &px);

        let mut next: Vec<f64> = rows
            .iter()
            .zip(&px)
            .map(|(row, &p)| p * divergence(row, &py, eps).exp())
            .collect();
        let total: f64 = next.iter().sum();
        for p in &mut next {
            *p /= total;
        }

        let delta = next
            .iter()
            .zip(&px)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt();
        tracing::trace!(iteration, delta, "blahut-arimoto update");

        if delta < config.tolerance {
            // the converged iterate is the pre-update one
            convergence = Convergence::Converged { iterations: iteration };
            break;
        }

        px = next;
        convergence = Convergence::IterationCap {
            iterations: iteration,
            last_delta: delta,
        };
    }

    let capacity = mutual_information(rows, &px, eps).clamp(0.0, (r as f64).log2());

    match convergence {
        Convergence::Converged { iterations } => {
            tracing::debug!(iterations, capacity, "channel capacity converged");
        }
        Convergence::IterationCap { iterations, last_delta } => {
            tracing::warn!(
                iterations,
                last_delta,
                tolerance = config.tolerance,
                "iteration cap reached before convergence; returning last iterate"
            );
        }
    }

    Ok(Solution {
        capacity,
        distribution: InputDistribution(px),
        convergence,
    })
}

/// Solve and compare against the uniform input.
pub fn analyze(matrix: &ChannelMatrix, config: &SolverConfig) -> Result<CapacityReport> {
    let solution = solve(matrix, config)?;
    let uniform_information = matrix.uniform_mutual_information(config.epsilon);
    let gain = solution.capacity - uniform_information;
    Ok(CapacityReport {
        solution,
        uniform_information,
        gain,
    })
}

fn output_distribution(rows: &[Vec<f64>], px: &[f64]) -> Vec<f64> {
    let mut py = vec![0.0; rows.len()];
    for (row, &p) in rows.iter().zip(px) {
        for (out, &q) in py.iter_mut().zip(row) {
            *out += p * q;
        }
    }
    py
}

/// Σ_y P(y|x)·log2((P(y|x)+eps) / (P(y)+eps)) for a single row.
fn divergence(row: &[f64], py: &[f64], eps: f64) -> f64 {
    row.iter()
        .zip(py)
        .map(|(&q, &p)| q * (safe_log2(q, eps) - safe_log2(p, eps)))
        .sum()
}

fn mutual_information(rows: &[Vec<f64>], px: &[f64], eps: f64) -> f64 {
    let py = output_distribution(rows, px);
    rows.iter()
        .zip(px)
        .map(|(row, &p)| p * divergence(row, &py, eps))
        .sum()
}
