//! All-pairs cosine similarity over count vectors.
//!
//! Built once; read-only afterward. Rows are computed in parallel and
//! each unordered pair is evaluated exactly once, then mirrored, so the
//! matrix is symmetric bit for bit.

use rayon::prelude::*;
use tracing::debug;

use crate::vectorizer::CountVector;

/// Cosine similarity between two count vectors.
///
/// Zero if either vector is all-zero. Computed as
/// `dot / sqrt(|a|² · |b|²)` so identical vectors score exactly 1.0.
pub fn cosine_similarity(a: &CountVector, b: &CountVector) -> f32 {
    cosine_with_norms(a, b, a.norm_squared(), b.norm_squared())
}

fn cosine_with_norms(a: &CountVector, b: &CountVector, norm_a: u64, norm_b: u64) -> f32 {
    if norm_a == 0 || norm_b == 0 {
        return 0.0;
    }
    let dot = a.dot(b) as f64;
    let denom = (norm_a as f64 * norm_b as f64).sqrt();
    (dot / denom).clamp(0.0, 1.0) as f32
}

/// Square, symmetric N×N similarity matrix, row-major.
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    n: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Compute every pairwise score. Diagonal is 1.0 for non-zero
    /// vectors, 0.0 for all-zero ones.
    pub fn build(vectors: &[CountVector]) -> Self {
        let n = vectors.len();
        let norms: Vec<u64> = vectors.iter().map(CountVector::norm_squared).collect();

        // Upper triangle, one Vec per row: row i holds (i, i+1..n).
        let upper: Vec<Vec<f32>> = (0..n)
            .into_par_iter()
            .map(|i| {
                ((i + 1)..n)
                    .map(|j| cosine_with_norms(&vectors[i], &vectors[j], norms[i], norms[j]))
                    .collect()
            })
            .collect();

        let mut scores = vec![0.0f32; n * n];
        for (i, row) in upper.into_iter().enumerate() {
            scores[i * n + i] = if norms[i] > 0 { 1.0 } else { 0.0 };
            for (offset, score) in row.into_iter().enumerate() {
                let j = i + 1 + offset;
                scores[i * n + j] = score;
                scores[j * n + i] = score;
            }
        }

        debug!(items = n, "similarity matrix built");
        Self { n, scores }
    }

    /// Number of rows (== columns).
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Score at `(i, j)`. `None` if out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i < self.n && j < self.n {
            Some(self.scores[i * self.n + j])
        } else {
            None
        }
    }

    /// Full row `i`. `None` if out of range.
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i < self.n {
            Some(&self.scores[i * self.n..(i + 1) * self.n])
        } else {
            None
        }
    }
}
