//! Human-readable and JSON rendering of results.

use anyhow::Result;
use infotheory_core::channel::{CapacityReport, ChannelMatrix, Convergence};
use infotheory_core::entropy::{Compressibility, Order, SourceReport};
use serde::Serialize;

/// Print any serializable result as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_capacity(matrix: &ChannelMatrix, report: &CapacityReport) {
    let r = matrix.symbols();
    println!("=== {r}-ary Channel ===");
    println!("P(Y|X):");
    for (i, row) in matrix.rows().iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|p| format!("{p:.4}")).collect();
        println!("  a{}: [{}]", i + 1, cells.join(", "));
    }
    println!();

    println!("=== Uniform Input ===");
    println!("P(x): {:.4} each", 1.0 / r as f64);
    println!("Mutual information: {:.4} bits/symbol", report.uniform_information);
    println!();

    let solution = &report.solution;
    println!("=== Optimal Input ===");
    for (i, p) in solution.distribution.probabilities().iter().enumerate() {
        println!("  P(a{}) = {p:.4}", i + 1);
    }
    println!("Capacity: {:.4} bits/symbol", solution.capacity);
    println!("Gain over uniform: {:.4} bits/symbol", report.gain);
    match solution.convergence {
        Convergence::Converged { iterations } => {
            println!("Converged after {iterations} iterations")
        }
        Convergence::IterationCap { iterations, last_delta } => println!(
            "Did not converge: stopped at {iterations} iterations (last change {last_delta:e})"
        ),
    }
}

pub fn print_source(report: &SourceReport) {
    println!("=== Source ===");
    println!("Total bytes: {}", report.total_symbols);
    println!("Distinct symbols: {}", report.distinct_symbols);
    println!("Max entropy: {:.4} bits/symbol", report.max_entropy);
    println!();

    let sections = [
        ("Independent symbols (order 0)", Order::Zero),
        ("Dependent symbols (order 1)", Order::One),
    ];
    for (title, order) in sections {
        println!("=== {title} ===");
        println!("Entropy: {:.4} bits/symbol", report.entropy(order));
        println!("Redundancy: {:.4} bits/symbol", report.redundancy(order));
        println!("Efficiency: {:.2}%", report.efficiency(order) * 100.0);
        println!();
    }
    println!("Pair entropy: {:.4} bits/pair", report.pair_entropy);
    println!(
        "Redundancy vs 8-bit bytes: {:.4} ({:.2}%)",
        report.byte_redundancy(),
        report.byte_redundancy() * 100.0
    );

    match report.compressibility() {
        Compressibility::High => println!("High redundancy: very compressible."),
        Compressibility::Moderate => println!("Moderate redundancy."),
        Compressibility::Low => {
            println!("Low redundancy: probably already compressed or encrypted.")
        }
    }
}
