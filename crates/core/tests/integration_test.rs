//! Integration tests for the channel capacity solver.
//!
//! These check the solver's contract over hand-picked channels and over
//! seeded random row-stochastic matrices: distribution validity, capacity
//! bounds, known closed-form capacities and determinism.

use approx::assert_abs_diff_eq;
use infotheory_core::{
    channel::{analyze, ChannelMatrix, Convergence, SolverConfig},
    error::{ChannelError, Error},
    solve,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Random R×R row-stochastic matrix; `sparsity` is the chance an entry is 0.
fn random_channel(rng: &mut ChaCha8Rng, r: usize, sparsity: f64) -> ChannelMatrix {
    let rows = (0..r)
        .map(|_| {
            let mut row: Vec<f64> = (0..r)
                .map(|_| if rng.gen_bool(sparsity) { 0.0 } else { rng.gen::<f64>() + 1e-3 })
                .collect();
            // keep at least one nonzero entry
            let keep = rng.gen_range(0..r);
            row[keep] += 1.0;
            let total: f64 = row.iter().sum();
            row.iter_mut().for_each(|p| *p /= total);
            row
        })
        .collect();
    ChannelMatrix::new(rows).expect("normalized rows are valid")
}

#[test]
fn test_random_channels_respect_bounds() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let config = SolverConfig::default();

    for _ in 0..200 {
        let r = rng.gen_range(2..=6);
        let sparsity = rng.gen_range(0.0..0.6);
        let matrix = random_channel(&mut rng, r, sparsity);

        let solution = solve(&matrix, &config).unwrap();
        let px = solution.distribution.probabilities();

        assert_eq!(px.len(), r);
        assert!(px.iter().all(|&p| p >= 0.0), "negative probability in {px:?}");
        assert_abs_diff_eq!(px.iter().sum::<f64>(), 1.0, epsilon = 1e-6);

        assert!(solution.capacity >= 0.0);
        assert!(solution.capacity <= (r as f64).log2());
    }
}

#[test]
fn test_capacity_not_below_uniform() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let config = SolverConfig::default().with_tolerance(1e-9).with_max_iterations(20_000);

    for _ in 0..50 {
        let r = rng.gen_range(2..=4);
        let matrix = random_channel(&mut rng, r, 0.0);
        let report = analyze(&matrix, &config).unwrap();
        assert!(report.gain >= -1e-6, "gain {} for {:?}", report.gain, matrix.rows());
    }
}

#[test]
fn test_identity_channels() {
    for r in 2..=4 {
        let matrix = ChannelMatrix::identity(r).unwrap();
        let solution = solve(&matrix, &SolverConfig::default()).unwrap();

        assert_abs_diff_eq!(solution.capacity, (r as f64).log2(), epsilon = 1e-6);
        for &p in solution.distribution.probabilities() {
            assert_abs_diff_eq!(p, 1.0 / r as f64, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_identical_rows_carry_nothing() {
    let row = vec![0.2, 0.3, 0.5];
    let matrix = ChannelMatrix::new(vec![row.clone(), row.clone(), row]).unwrap();
    let solution = solve(&matrix, &SolverConfig::default()).unwrap();

    assert!(solution.converged());
    assert_abs_diff_eq!(solution.capacity, 0.0, epsilon = 1e-12);
}

#[test]
fn test_symmetric_quaternary_channel() {
    // C = log2(4) - H(0.7, 0.1, 0.1, 0.1)
    let matrix = ChannelMatrix::symmetric(4, 0.3).unwrap();
    let solution = solve(&matrix, &SolverConfig::default()).unwrap();

    let h = -(0.7f64 * 0.7f64.log2() + 3.0 * 0.1 * 0.1f64.log2());
    assert_abs_diff_eq!(solution.capacity, 2.0 - h, epsilon = 1e-6);
}

#[test]
fn test_binary_asymmetric_channel() {
    let matrix = ChannelMatrix::new(vec![vec![0.8, 0.2], vec![0.25, 0.75]]).unwrap();
    let report = analyze(&matrix, &SolverConfig::default()).unwrap();

    assert!(report.solution.converged());
    assert!(report.solution.capacity > report.uniform_information);
    // the optimum is not the uniform distribution
    let px = report.solution.distribution.probabilities();
    assert!((px[0] - 0.5).abs() > 1e-3);
}

#[test]
fn test_solve_is_deterministic() {
    let matrix = ChannelMatrix::new(vec![
        vec![0.6, 0.3, 0.1],
        vec![0.2, 0.5, 0.3],
        vec![0.4, 0.2, 0.4],
    ])
    .unwrap();
    let config = SolverConfig::default();

    let first = solve(&matrix, &config).unwrap();
    let second = solve(&matrix, &config).unwrap();
    assert!((first.capacity - second.capacity).abs() <= 1e-9);
    assert_eq!(first.distribution, second.distribution);
}

#[test]
fn test_row_tolerance_is_caller_choice() {
    let rows = vec![vec![0.499996, 0.5], vec![0.5, 0.5]];
    assert!(ChannelMatrix::with_tolerance(rows.clone(), 1e-5).is_ok());

    let err = ChannelMatrix::with_tolerance(rows, 1e-9).unwrap_err();
    assert!(matches!(err, Error::InvalidChannel(ChannelError::RowSum { row: 0, .. })));

    let err = ChannelMatrix::new(vec![vec![0.45, 0.45], vec![0.5, 0.5]]).unwrap_err();
    assert!(matches!(err, Error::InvalidChannel(ChannelError::RowSum { .. })));
}

#[test]
fn test_iteration_cap_reports_last_delta() {
    let matrix = ChannelMatrix::new(vec![vec![0.8, 0.2], vec![0.25, 0.75]]).unwrap();
    let config = SolverConfig::default().with_max_iterations(2);
    let solution = solve(&matrix, &config).unwrap();

    match solution.convergence {
        Convergence::IterationCap { iterations, last_delta } => {
            assert_eq!(iterations, 2);
            assert!(last_delta >= config.tolerance);
        }
        other => panic!("expected iteration cap, got {other:?}"),
    }
    assert!(solution.capacity > 0.0);
}

#[test]
fn test_degenerate_solver_settings_are_rejected() {
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let matrix = random_channel(&mut rng, 4, 0.3);

    for config in [
        SolverConfig::default().with_epsilon(0.0),
        SolverConfig::default().with_epsilon(-1.0),
        SolverConfig::default().with_epsilon(f64::NAN),
        SolverConfig::default().with_tolerance(0.0),
    ] {
        let err = solve(&matrix, &config).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidChannel(ChannelError::InvalidSolverConfig { .. })
        ));
    }
}
