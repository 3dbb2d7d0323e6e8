// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants and the kernel configuration.

use crate::error::{KernelError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Side length of the square model input/output image.
pub const IMAGE_SIDE: usize = 28;

/// Width of the latent space.
pub const LATENT_DIM: usize = 16;

/// Number of class labels (digits 0..9).
pub const LABEL_COUNT: usize = 10;

/// Default number of interpolation steps for a morphing explanation.
pub const MORPH_STEPS: usize = 8;

/// Fixed sizes shared with the external encoder/decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelShape {
    pub image_side: usize,
    pub latent_dim: usize,
    pub label_count: usize,
}

impl Default for ModelShape {
    fn default() -> Self {
        Self {
            image_side: IMAGE_SIDE,
            latent_dim: LATENT_DIM,
            label_count: LABEL_COUNT,
        }
    }
}

impl ModelShape {
    pub fn new(image_side: usize, latent_dim: usize, label_count: usize) -> Self {
        Self { image_side, latent_dim, label_count }
    }

    /// Pixels per image.
    pub fn pixels(&self) -> usize {
        self.image_side * self.image_side
    }

    /// Width of the decoder input: latent followed by the one-hot label.
    pub fn decoder_input_dim(&self) -> usize {
        self.latent_dim + self.label_count
    }

    /// Every size must be non-zero.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("image_side", self.image_side),
            ("latent_dim", self.latent_dim),
            ("label_count", self.label_count),
        ] {
            if value == 0 {
                return Err(KernelError::InvalidDimensions(format!("{name} must be non-zero")));
            }
        }
        Ok(())
    }
}

/// Which encoder output feeds everything downstream.
///
/// `Mean` uses `z_mean` and makes a run reproducible; `Random` uses the
/// reparameterized sample `z`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatentSampling {
    #[default]
    Mean,
    Random,
}

impl LatentSampling {
    pub fn from_flag(random: bool) -> Self {
        if random {
            LatentSampling::Random
        } else {
            LatentSampling::Mean
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    pub shape: ModelShape,
    pub sampling: LatentSampling,
    pub morph_steps: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            shape: ModelShape::default(),
            sampling: LatentSampling::Mean,
            morph_steps: MORPH_STEPS,
        }
    }
}

impl KernelConfig {
    pub fn validate(&self) -> Result<()> {
        self.shape.validate()?;
        if self.morph_steps == 0 {
            return Err(KernelError::InvalidSteps);
        }
        Ok(())
    }

    /// Reads a JSON config; missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }
}
