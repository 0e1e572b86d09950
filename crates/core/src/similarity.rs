//! Approximate string comparison by edit distance.
//!
//! Character-by-character equality calls "Juan Perez" and "Jaun Perez"
//! different; the Levenshtein distance counts them two edits apart.

use serde::Serialize;

/// Distance and similarity of one case-folded pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub distance: usize,
    /// `1 − distance / max_len`, in [0, 1]
    pub similarity: f64,
}

/// Minimum number of single-character insertions, deletions and
/// substitutions turning `a` into `b`.
///
/// Works on Unicode scalar values and keeps only two rows of the DP table.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Compare `a` and `b` ignoring case.
///
/// Both strings are lowercased once, and the distance and similarity are
/// taken from the same folded pair. Two empty strings are identical.
pub fn compare(a: &str, b: &str) -> Comparison {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let distance = levenshtein(&a, &b);
    let max_len = a.chars().count().max(b.chars().count());
    let similarity = if max_len == 0 {
        1.0
    } else {
        1.0 - distance as f64 / max_len as f64
    };
    Comparison {
        distance,
        similarity,
    }
}

/// Case-insensitive similarity in [0, 1]: `1 − distance / max_len`.
pub fn similarity(a: &str, b: &str) -> f64 {
    compare(a, b).similarity
}
