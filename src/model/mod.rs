// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Reference encoder/decoder built from single dense layers.
//!
//! Stands in for a trained network wherever one is not available: it has
//! the same input/output contract, loads from and saves to JSON, and can be
//! randomly initialized.

pub mod layer;

use crate::codec::{DecodeCapability, EncodeCapability};
use crate::config::ModelShape;
use crate::error::{KernelError, Result};
use crate::types::image::{ImageGrid, Unit};
use crate::types::latent::{EncoderOutput, LatentVector};
use layer::{sigmoid, DenseLayer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Mutex;

/// Standard deviation for random initialization.
pub const INIT_STD: f32 = 0.05;

/// Serialized form of a [`DenseModel`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DenseWeights {
    pub shape: ModelShape,
    /// Seeds the sampling noise for `z`.
    pub seed: u64,
    pub z_mean: DenseLayer,
    pub z_log_var: DenseLayer,
    pub decoder: DenseLayer,
}

impl DenseWeights {
    pub fn validate(&self) -> Result<()> {
        let s = &self.shape;
        s.validate()?;
        self.z_mean.validate(s.pixels(), s.latent_dim)?;
        self.z_log_var.validate(s.pixels(), s.latent_dim)?;
        self.decoder.validate(s.decoder_input_dim(), s.pixels())
    }
}

/// Encoder: `z_mean = W_m x + b_m`, `z_log_var = W_v x + b_v`,
/// `z = z_mean + exp(z_log_var / 2) * eps`. Decoder: `sigmoid(W d + b)`.
#[derive(Debug)]
pub struct DenseModel {
    weights: DenseWeights,
    rng: Mutex<StdRng>,
}

impl DenseModel {
    pub fn new(weights: DenseWeights) -> Result<Self> {
        weights.validate()?;
        let rng = Mutex::new(StdRng::seed_from_u64(weights.seed));
        Ok(Self { weights, rng })
    }

    /// Randomly initialized, untrained model.
    pub fn random(shape: ModelShape, seed: u64) -> Result<Self> {
        shape.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let weights = DenseWeights {
            shape,
            seed,
            z_mean: DenseLayer::random(shape.pixels(), shape.latent_dim, INIT_STD, &mut rng)?,
            z_log_var: DenseLayer::random(shape.pixels(), shape.latent_dim, INIT_STD, &mut rng)?,
            decoder: DenseLayer::random(shape.decoder_input_dim(), shape.pixels(), INIT_STD, &mut rng)?,
        };
        Self::new(weights)
    }

    /// Loads weights from a JSON file at `location`.
    pub fn load(location: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(location.as_ref())?;
        let weights: DenseWeights = serde_json::from_str(&raw)?;
        tracing::info!(
            location = %location.as_ref().display(),
            image_side = weights.shape.image_side,
            latent_dim = weights.shape.latent_dim,
            label_count = weights.shape.label_count,
            "dense model loaded"
        );
        Self::new(weights)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string(&self.weights)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn shape(&self) -> &ModelShape {
        &self.weights.shape
    }

    pub fn weights(&self) -> &DenseWeights {
        &self.weights
    }
}

impl EncodeCapability for DenseModel {
    fn encode(&self, images: &[ImageGrid<Unit>]) -> Result<EncoderOutput> {
        let mut out = EncoderOutput::default();
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| KernelError::Capability("sampling rng poisoned".into()))?;

        for img in images {
            let x = img.as_slice();
            let mean = self.weights.z_mean.forward(x)?;
            let log_var = self.weights.z_log_var.forward(x)?;
            let z = mean
                .iter()
                .zip(&log_var)
                .map(|(m, lv)| {
                    let eps: f32 = StandardNormal.sample(&mut *rng);
                    m + (0.5 * lv).exp() * eps
                })
                .collect();
            out.z.push(LatentVector(z));
            out.z_mean.push(LatentVector(mean));
            out.z_log_var.push(LatentVector(log_var));
        }
        Ok(out)
    }
}

impl DecodeCapability for DenseModel {
    fn decode(&self, inputs: &[Vec<f32>]) -> Result<Vec<ImageGrid<Unit>>> {
        let side = self.weights.shape.image_side;
        inputs
            .iter()
            .map(|row| {
                let cells = self.weights.decoder.forward(row)?.into_iter().map(sigmoid).collect();
                ImageGrid::from_cells(side, side, cells)
            })
            .collect()
    }
}
