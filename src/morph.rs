// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Morphing explanations: walk a sample's latent point to its class
//! representative and decode every step.

use crate::classify::ReconstructionClassifier;
use crate::codec::LatentCodec;
use crate::config::LatentSampling;
use crate::error::{KernelError, Result};
use crate::representative::RepresentativeStore;
use crate::types::image::{ImageGrid, Unit};
use crate::types::latent::{Label, LatentVector};

/// `steps + 1` decoded frames for one sample, all conditioned on `label`.
#[derive(Clone, Debug, PartialEq)]
pub struct MorphingSequence {
    pub label: Label,
    pub latents: Vec<LatentVector>,
    pub frames: Vec<ImageGrid<Unit>>,
}

impl MorphingSequence {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Evenly spaced points from `start` to `end`, both included.
///
/// Point `k` is `start + k * (end - start) / steps`; the last point is `end`
/// itself rather than the accumulated sum.
pub fn interpolate(start: &LatentVector, end: &LatentVector, steps: usize) -> Result<Vec<LatentVector>> {
    if steps == 0 {
        return Err(KernelError::InvalidSteps);
    }
    if start.dim() != end.dim() {
        return Err(KernelError::DimensionMismatch {
            expected: start.dim(),
            found: end.dim(),
        });
    }
    let delta = start.step_towards(end, steps);
    let mut path: Vec<LatentVector> = (0..steps).map(|k| start.add_scaled(&delta, k as f32)).collect();
    path.push(end.clone());
    Ok(path)
}

pub struct MorphingExplainer<'a> {
    codec: &'a LatentCodec,
    store: &'a RepresentativeStore,
}

impl<'a> MorphingExplainer<'a> {
    pub fn new(codec: &'a LatentCodec, store: &'a RepresentativeStore) -> Self {
        Self { codec, store }
    }

    pub fn explain(
        &self,
        images: &[ImageGrid<Unit>],
        labels: &[Label],
        steps: usize,
        sampling: LatentSampling,
    ) -> Result<Vec<MorphingSequence>> {
        self.codec.ensure_loaded()?;
        let table = self.store.require()?;
        if steps == 0 {
            return Err(KernelError::InvalidSteps);
        }
        if images.len() != labels.len() {
            return Err(KernelError::BatchMismatch {
                images: images.len(),
                labels: labels.len(),
            });
        }
        for &label in labels {
            self.codec.check_label(label)?;
        }

        let latents = self.codec.encode_latents(images, sampling)?;
        self.morph_latents(&latents, labels, steps, |label| table.get(label).cloned())
    }

    /// Explains with the labels the reconstruction classifier predicts.
    pub fn classify_with_explanation(
        &self,
        images: &[ImageGrid<Unit>],
        steps: usize,
        sampling: LatentSampling,
    ) -> Result<(Vec<Label>, Vec<MorphingSequence>)> {
        self.codec.ensure_loaded()?;
        let table = self.store.require()?;
        if steps == 0 {
            return Err(KernelError::InvalidSteps);
        }

        // One encode serves both the classification and the morph start points.
        let latents = self.codec.encode_latents(images, sampling)?;
        let predicted: Vec<Label> = ReconstructionClassifier::new(self.codec)
            .classify_latents(images, &latents)?
            .into_iter()
            .map(|c| c.label)
            .collect();

        let sequences = self.morph_latents(&latents, &predicted, steps, |label| table.get(label).cloned())?;
        Ok((predicted, sequences))
    }

    fn morph_latents(
        &self,
        latents: &[LatentVector],
        labels: &[Label],
        steps: usize,
        representative: impl Fn(Label) -> Option<LatentVector>,
    ) -> Result<Vec<MorphingSequence>> {
        latents
            .iter()
            .zip(labels)
            .map(|(z0, &label)| {
                let target = representative(label).ok_or(KernelError::UnknownLabel {
                    label: label.index(),
                    label_count: self.codec.shape().label_count,
                })?;
                let path = interpolate(z0, &target, steps)?;
                let frames = self.codec.decode_with_label(&path, label)?;
                Ok(MorphingSequence { label, latents: path, frames })
            })
            .collect()
    }
}
