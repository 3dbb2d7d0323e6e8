// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Reconstruction loss.

use crate::error::{KernelError, Result};
use crate::types::image::{ImageGrid, Unit};

/// Predictions are clipped to `[EPSILON, 1 - EPSILON]` before taking logs.
pub const EPSILON: f32 = 1e-7;

/// Mean binary cross-entropy between one original and one reconstruction.
///
/// Averages over every pixel of the sample and nothing else: callers
/// compare these per sample, so there is no batch reduction.
pub fn binary_cross_entropy(original: &ImageGrid<Unit>, reconstructed: &ImageGrid<Unit>) -> Result<f32> {
    let (y, p) = (original.as_slice(), reconstructed.as_slice());
    if y.len() != p.len() {
        return Err(KernelError::DimensionMismatch {
            expected: y.len(),
            found: p.len(),
        });
    }
    if y.is_empty() {
        return Err(KernelError::EmptyInput);
    }

    let total: f64 = y
        .iter()
        .zip(p)
        .map(|(&t, &q)| {
            let q = f64::from(q.clamp(EPSILON, 1.0 - EPSILON));
            let t = f64::from(t);
            -(t * q.ln() + (1.0 - t) * (1.0 - q).ln())
        })
        .sum();

    Ok((total / y.len() as f64) as f32)
}

/// Losses for a batch of (original, reconstruction) pairs, one per sample.
pub fn batch_binary_cross_entropy(originals: &[ImageGrid<Unit>], reconstructed: &[ImageGrid<Unit>]) -> Result<Vec<f32>> {
    if originals.len() != reconstructed.len() {
        return Err(KernelError::DimensionMismatch {
            expected: originals.len(),
            found: reconstructed.len(),
        });
    }
    originals
        .iter()
        .zip(reconstructed)
        .map(|(y, p)| binary_cross_entropy(y, p))
        .collect()
}
