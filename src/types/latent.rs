// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Latent vectors, labels and encoder output.

use crate::config::LatentSampling;
use core::ops::Index;
use serde::{Deserialize, Serialize};

/// Class identifier; valid while below the configured label count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(pub usize);

impl Label {
    pub fn index(self) -> usize {
        self.0
    }
}

impl core::fmt::Display for Label {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point in the model's latent space.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LatentVector(pub Vec<f32>);

impl LatentVector {
    pub fn zeros(dim: usize) -> Self {
        Self(vec![0.0; dim])
    }

    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// `self + other * k`, element-wise.
    pub fn add_scaled(&self, other: &LatentVector, k: f32) -> LatentVector {
        LatentVector(self.0.iter().zip(&other.0).map(|(a, b)| a + b * k).collect())
    }

    /// `(target - self) / n`, element-wise.
    pub fn step_towards(&self, target: &LatentVector, n: usize) -> LatentVector {
        let n = n as f32;
        LatentVector(self.0.iter().zip(&target.0).map(|(a, b)| (b - a) / n).collect())
    }

    pub fn l2_sq(&self, other: &LatentVector) -> f32 {
        self.0.iter().zip(&other.0).map(|(a, b)| (a - b).powi(2)).sum()
    }
}

impl Index<usize> for LatentVector {
    type Output = f32;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a LatentVector {
    type Item = &'a f32;
    type IntoIter = core::slice::Iter<'a, f32>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The three per-sample outputs of one encode call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EncoderOutput {
    pub z: Vec<LatentVector>,
    pub z_mean: Vec<LatentVector>,
    pub z_log_var: Vec<LatentVector>,
}

impl EncoderOutput {
    pub fn len(&self) -> usize {
        self.z_mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z_mean.is_empty()
    }

    /// The latent points downstream code should use.
    pub fn into_selected(self, sampling: LatentSampling) -> Vec<LatentVector> {
        match sampling {
            LatentSampling::Mean => self.z_mean,
            LatentSampling::Random => self.z,
        }
    }
}
