// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Classification by reconstruction.
//!
//! Each image is encoded once. Its latent point is then decoded under every
//! candidate label and the label whose reconstruction has the lowest binary
//! cross-entropy against the input wins.

use crate::codec::LatentCodec;
use crate::config::LatentSampling;
use crate::error::{KernelError, Result};
use crate::loss::batch_binary_cross_entropy;
use crate::types::image::{ImageGrid, Unit};
use crate::types::latent::{Label, LatentVector};

/// Outcome for one image: the winner plus the loss under every label.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    pub label: Label,
    pub losses: Vec<f32>,
}

pub struct ReconstructionClassifier<'a> {
    codec: &'a LatentCodec,
}

impl<'a> ReconstructionClassifier<'a> {
    pub fn new(codec: &'a LatentCodec) -> Self {
        Self { codec }
    }

    pub fn classify(&self, images: &[ImageGrid<Unit>], sampling: LatentSampling) -> Result<Vec<Label>> {
        Ok(self
            .classify_detailed(images, sampling)?
            .into_iter()
            .map(|c| c.label)
            .collect())
    }

    pub fn classify_detailed(&self, images: &[ImageGrid<Unit>], sampling: LatentSampling) -> Result<Vec<Classification>> {
        self.codec.ensure_loaded()?;
        let latents = self.codec.encode_latents(images, sampling)?;
        self.classify_latents(images, &latents)
    }

    /// Scores already-encoded latent points against their source images.
    pub fn classify_latents(&self, images: &[ImageGrid<Unit>], latents: &[LatentVector]) -> Result<Vec<Classification>> {
        self.codec.ensure_loaded()?;
        if images.len() != latents.len() {
            return Err(KernelError::BatchMismatch {
                images: images.len(),
                labels: latents.len(),
            });
        }
        let label_count = self.codec.shape().label_count;

        // losses[sample][label]; per-label passes are independent and joined by index.
        let mut losses = vec![Vec::with_capacity(label_count); images.len()];
        for label in (0..label_count).map(Label) {
            let reconstructed = self.codec.decode_with_label(latents, label)?;
            let per_sample = batch_binary_cross_entropy(images, &reconstructed)?;
            for (row, loss) in losses.iter_mut().zip(per_sample) {
                row.push(loss);
            }
        }

        let results = losses
            .into_iter()
            .map(|l| {
                let best = argmin(&l)
                    .ok_or_else(|| KernelError::InvalidDimensions("no labels to score".into()))?;
                Ok(Classification { label: Label(best), losses: l })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            samples = results.len(),
            labels = ?results.iter().map(|c| c.label.index()).collect::<Vec<_>>(),
            "classified batch"
        );
        Ok(results)
    }
}

/// Index of the smallest value; ties go to the lower index and NaN never wins.
/// `None` only for an empty slice. All-NaN input yields index 0.
pub fn argmin(values: &[f32]) -> Option<usize> {
    if values.is_empty() {
        return None;
    }
    let mut best = 0usize;
    let mut best_val = f32::INFINITY;
    for (i, &v) in values.iter().enumerate() {
        if v < best_val {
            best_val = v;
            best = i;
        }
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::argmin;

    #[test]
    fn test_argmin_prefers_lower_index_on_tie() {
        assert_eq!(argmin(&[3.0, 1.0, 1.0, 2.0]), Some(1));
    }

    #[test]
    fn test_argmin_skips_nan() {
        assert_eq!(argmin(&[f32::NAN, 2.0, 0.5]), Some(2));
        assert_eq!(argmin(&[f32::NAN, f32::NAN]), Some(0));
    }

    #[test]
    fn test_argmin_of_nothing() {
        assert_eq!(argmin(&[]), None);
    }
}
