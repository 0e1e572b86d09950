//! Seeded input generation.
//!
//! When no input file or channel matrix is given, the app generates one so
//! that every command runs with zero arguments. Everything is driven by a
//! `ChaCha8Rng` seed, which the config prints, so runs are reproducible.

use infotheory_core::ChannelMatrix;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate sample bytes with mixed redundancy.
///
/// Generated data has:
/// - Some highly redundant sections (runs of same byte)
/// - Some text-like sections over a small alphabet
/// - Some structured sections (short repeating patterns)
/// - Some near-random sections
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let section = (size_bytes - data.len()).min(4096);

        match rng.gen_range(0..10u8) {
            0..=2 => {
                let byte: u8 = rng.gen();
                data.extend(std::iter::repeat(byte).take(section));
            }
            3..=5 => {
                let alphabet = b"abcdefghijklmnopqrstuvwxyz .,\n";
                data.extend((0..section).map(|_| alphabet[rng.gen_range(0..alphabet.len())]));
            }
            6..=7 => {
                let pattern: Vec<u8> = (0..rng.gen_range(2..=16)).map(|_| rng.gen()).collect();
                data.extend(pattern.iter().cycle().take(section));
            }
            _ => data.extend((0..section).map(|_| rng.gen::<u8>())),
        }
    }

    data
}

/// Generate a random valid R×R channel matrix.
///
/// Each row favours the matching output symbol so the channel carries some
/// information; entries are normalized per row.
pub fn random_channel_matrix(seed: u64, r: usize) -> infotheory_core::Result<ChannelMatrix> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let rows = (0..r)
        .map(|i| {
            let mut row: Vec<f64> = (0..r).map(|_| rng.gen::<f64>()).collect();
            row[i] += rng.gen_range(0.5..2.0);
            let total: f64 = row.iter().sum();
            row.iter().map(|p| p / total).collect()
        })
        .collect();
    ChannelMatrix::new(rows)
}
