//! infotheory - information-theory course exercises on the command line
//!
//! Usage:
//!   infotheory capacity --row "0.8 0.2" --row "0.25 0.75"
//!   infotheory capacity --symbols 3 --seed 42     # random channel
//!   infotheory entropy --in file.zip
//!   infotheory distance "Juan Perez" "Jaun Perez"
//!   infotheory cuit 20-12345678-6
//!   infotheory pack ABCDEFGH --out payload.bin
//!   infotheory unpack payload.bin

mod config;
mod input_gen;
mod logging;
mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::{CapacityConfig, EntropyConfig};
use infotheory_core::channel::{
    self, SolverConfig, DEFAULT_EPSILON, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};
use infotheory_core::check_digit::Cuit;
use infotheory_core::entropy::SourceReport;
use infotheory_core::{packing, similarity};
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "infotheory")]
#[command(about = "Channel capacity, source entropy and small coding exercises")]
#[command(version)]
struct Cli {
    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Print the resolved configuration before running
    #[arg(long, global = true)]
    print_config: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capacity of a discrete memoryless channel and its optimal input
    Capacity {
        /// Number of input/output symbols R
        #[arg(short = 'r', long)]
        symbols: Option<usize>,

        /// One matrix row P(y|x=i), values separated by spaces or commas;
        /// repeat once per input symbol (default: random channel)
        #[arg(long = "row")]
        rows: Vec<String>,

        /// Accepted deviation of each row sum from 1
        #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
        row_tolerance: f64,

        /// Convergence tolerance on the distribution update
        #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f64,

        /// Iteration cap
        #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
        max_iterations: usize,

        /// Additive guard inside logarithms
        #[arg(long, default_value_t = DEFAULT_EPSILON)]
        epsilon: f64,

        /// Seed for the random channel
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Zeroth- and first-order entropy and redundancy of a file
    Entropy {
        /// Input file (default: generated sample)
        #[arg(long = "in")]
        input: Option<PathBuf>,

        /// Size of the generated sample in bytes
        #[arg(long)]
        size: Option<usize>,

        /// Seed for the generated sample
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Edit distance and similarity of two strings
    Distance { first: String, second: String },

    /// Validate a CUIT/CUIL number
    Cuit { number: String },

    /// Pack text over the alphabet ABCDEFGH into 3-bit codes
    Pack {
        text: String,

        /// Write the payload here instead of printing hex
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Unpack a payload produced by `pack`
    Unpack { input: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    match cli.command {
        Commands::Capacity {
            symbols,
            rows,
            row_tolerance,
            tolerance,
            max_iterations,
            epsilon,
            seed,
        } => {
            let solver = SolverConfig::default()
                .with_tolerance(tolerance)
                .with_max_iterations(max_iterations)
                .with_epsilon(epsilon);
            let config = CapacityConfig::resolve(symbols, &rows, row_tolerance, solver, seed)?;
            if cli.print_config {
                config.print();
            }

            let report = channel::analyze(&config.matrix, &config.solver)?;
            if cli.json {
                report::print_json(&json!({ "matrix": config.matrix, "report": report }))?;
            } else {
                report::print_capacity(&config.matrix, &report);
            }
        }

        Commands::Entropy { input, size, seed } => {
            let config = EntropyConfig::resolve(input, size, seed);
            if cli.print_config {
                config.print();
            }

            let data = config.load()?;
            let source = SourceReport::analyze(&data)?;
            if cli.json {
                report::print_json(&source)?;
            } else {
                report::print_source(&source);
            }
        }

        Commands::Distance { first, second } => {
            let comparison = similarity::compare(&first, &second);
            if cli.json {
                report::print_json(&comparison)?;
            } else {
                println!("Levenshtein distance: {}", comparison.distance);
                println!("Similarity: {:.2}%", comparison.similarity * 100.0);
            }
        }

        Commands::Cuit { number } => {
            let result = Cuit::parse(&number);
            if cli.json {
                report::print_json(&json!({
                    "input": number,
                    "valid": result.is_ok(),
                    "error": result.as_ref().err().map(|e| e.to_string()),
                }))?;
            } else {
                match result {
                    Ok(cuit) => println!("{cuit} is VALID"),
                    Err(e) => println!("{number} is INVALID: {e}"),
                }
            }
        }

        Commands::Pack { text, out } => {
            let payload = packing::pack(&text)?;
            tracing::info!(symbols = text.chars().count(), bytes = payload.len(), "packed");
            match out {
                Some(path) => {
                    std::fs::write(&path, &payload)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!(
                        "{} symbols -> {} bytes written to {}",
                        text.chars().count(),
                        payload.len(),
                        path.display()
                    );
                }
                None => {
                    let hex: Vec<String> = payload.iter().map(|b| format!("{b:02X}")).collect();
                    println!("{}", hex.join(" "));
                }
            }
        }

        Commands::Unpack { input } => {
            let payload =
                std::fs::read(&input).with_context(|| format!("reading {}", input.display()))?;
            let text = packing::unpack(&payload)?;
            println!("{text}");
        }
    }

    Ok(())
}
