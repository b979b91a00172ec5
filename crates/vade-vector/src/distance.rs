//! Distance functions for vade-vector.
//!
//! The index compares vectors by squared Euclidean (L2) distance: monotonic
//! with true Euclidean distance and cheaper to compute, since the square root
//! never affects ranking.

/// Compute squared Euclidean (L2) distance between two vectors.
///
/// Callers must guarantee `a.len() == b.len()`; the index enforces this
/// before dispatching here.
#[inline]
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    let mut sum = 0.0f32;

    // Manual loop unrolling for better performance
    let chunks = a.len() / 4;
    let remainder = a.len() % 4;

    for i in 0..chunks {
        let base = i * 4;
        let d0 = a[base] - b[base];
        let d1 = a[base + 1] - b[base + 1];
        let d2 = a[base + 2] - b[base + 2];
        let d3 = a[base + 3] - b[base + 3];
        sum += d0 * d0 + d1 * d1 + d2 * d2 + d3 * d3;
    }

    let start = chunks * 4;
    for i in 0..remainder {
        let idx = start + i;
        let d = a[idx] - b[idx];
        sum += d * d;
    }

    sum
}

/// Map a squared L2 distance into a similarity score in (0, 1].
///
/// `1 / (1 + distance)`: a monotonically decreasing transform where identical
/// vectors score 1.0. Presentation-friendly, not a calibrated probability.
#[inline]
pub fn similarity_from_distance(distance: f32) -> f32 {
    1.0 / (1.0 + distance)
}
