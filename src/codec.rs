// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Latent codec over externally supplied encoder/decoder capabilities.

use crate::config::{LatentSampling, ModelShape};
use crate::error::{KernelError, Result};
use crate::types::image::{ImageGrid, Unit};
use crate::types::latent::{EncoderOutput, Label, LatentVector};
use std::sync::Arc;

/// Image batch to `(z, z_mean, z_log_var)`.
pub trait EncodeCapability: Send + Sync {
    fn encode(&self, images: &[ImageGrid<Unit>]) -> Result<EncoderOutput>;
}

/// Batch of `concat(latent, one_hot(label))` rows to reconstructed images.
pub trait DecodeCapability: Send + Sync {
    fn decode(&self, inputs: &[Vec<f32>]) -> Result<Vec<ImageGrid<Unit>>>;
}

/// Callers check `label` against `label_count` first.
pub(crate) fn one_hot(label: Label, label_count: usize) -> Vec<f32> {
    let mut v = vec![0.0; label_count];
    v[label.index()] = 1.0;
    v
}

/// Decoder input row. Latent first, then the one-hot label.
pub(crate) fn decoder_input(latent: &LatentVector, label: Label, label_count: usize) -> Vec<f32> {
    let mut row = Vec::with_capacity(latent.dim() + label_count);
    row.extend_from_slice(latent.as_slice());
    row.extend(one_hot(label, label_count));
    row
}

pub struct LatentCodec {
    shape: ModelShape,
    encoder: Option<Arc<dyn EncodeCapability>>,
    decoder: Option<Arc<dyn DecodeCapability>>,
}

impl LatentCodec {
    /// A codec with nothing attached; every call fails with `ModelNotLoaded`.
    pub fn new(shape: ModelShape) -> Result<Self> {
        shape.validate()?;
        Ok(Self { shape, encoder: None, decoder: None })
    }

    pub fn attach(&mut self, encoder: Arc<dyn EncodeCapability>, decoder: Arc<dyn DecodeCapability>) {
        self.encoder = Some(encoder);
        self.decoder = Some(decoder);
    }

    /// Attaches one object serving both directions.
    pub fn attach_model<M>(&mut self, model: Arc<M>)
    where
        M: EncodeCapability + DecodeCapability + 'static,
    {
        self.attach(model.clone(), model);
    }

    pub fn is_loaded(&self) -> bool {
        self.encoder.is_some() && self.decoder.is_some()
    }

    pub fn shape(&self) -> &ModelShape {
        &self.shape
    }

    pub fn ensure_loaded(&self) -> Result<()> {
        if self.is_loaded() {
            Ok(())
        } else {
            Err(KernelError::ModelNotLoaded)
        }
    }

    pub fn check_label(&self, label: Label) -> Result<()> {
        if label.index() >= self.shape.label_count {
            return Err(KernelError::UnknownLabel {
                label: label.index(),
                label_count: self.shape.label_count,
            });
        }
        Ok(())
    }

    pub fn check_images(&self, images: &[ImageGrid<Unit>]) -> Result<()> {
        let side = self.shape.image_side;
        for img in images {
            if img.width() != side || img.height() != side {
                return Err(KernelError::DimensionMismatch {
                    expected: side * side,
                    found: img.width() * img.height(),
                });
            }
        }
        Ok(())
    }

    pub fn encode(&self, images: &[ImageGrid<Unit>]) -> Result<EncoderOutput> {
        let encoder = self.encoder.as_ref().ok_or(KernelError::ModelNotLoaded)?;
        self.check_images(images)?;
        if images.is_empty() {
            return Ok(EncoderOutput::default());
        }

        let out = encoder.encode(images)?;
        for batch in [&out.z, &out.z_mean, &out.z_log_var] {
            if batch.len() != images.len() {
                return Err(KernelError::DimensionMismatch {
                    expected: images.len(),
                    found: batch.len(),
                });
            }
            self.check_latents(batch)?;
        }
        Ok(out)
    }

    /// Encodes and keeps only the latent points chosen by `sampling`.
    pub fn encode_latents(&self, images: &[ImageGrid<Unit>], sampling: LatentSampling) -> Result<Vec<LatentVector>> {
        Ok(self.encode(images)?.into_selected(sampling))
    }

    pub fn decode(&self, latents: &[LatentVector], labels: &[Label]) -> Result<Vec<ImageGrid<Unit>>> {
        let decoder = self.decoder.as_ref().ok_or(KernelError::ModelNotLoaded)?;
        if latents.len() != labels.len() {
            return Err(KernelError::BatchMismatch {
                images: latents.len(),
                labels: labels.len(),
            });
        }
        self.check_latents(latents)?;
        for &label in labels {
            self.check_label(label)?;
        }
        if latents.is_empty() {
            return Ok(Vec::new());
        }

        let inputs: Vec<Vec<f32>> = latents
            .iter()
            .zip(labels)
            .map(|(z, &y)| decoder_input(z, y, self.shape.label_count))
            .collect();

        let images = decoder.decode(&inputs)?;
        if images.len() != inputs.len() {
            return Err(KernelError::DimensionMismatch {
                expected: inputs.len(),
                found: images.len(),
            });
        }
        self.check_images(&images)?;
        Ok(images)
    }

    /// Decodes every latent point under the same label.
    pub fn decode_with_label(&self, latents: &[LatentVector], label: Label) -> Result<Vec<ImageGrid<Unit>>> {
        let labels = vec![label; latents.len()];
        self.decode(latents, &labels)
    }

    fn check_latents(&self, latents: &[LatentVector]) -> Result<()> {
        for z in latents {
            if z.dim() != self.shape.latent_dim {
                return Err(KernelError::DimensionMismatch {
                    expected: self.shape.latent_dim,
                    found: z.dim(),
                });
            }
        }
        Ok(())
    }
}
