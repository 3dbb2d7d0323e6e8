// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Fully connected layer.

use crate::error::{KernelError, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// `y = W x + b`, weights row-major with one row per output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    pub inputs: usize,
    pub outputs: usize,
    pub weights: Vec<f32>,
    pub bias: Vec<f32>,
}

impl DenseLayer {
    pub fn zeros(inputs: usize, outputs: usize) -> Self {
        Self {
            inputs,
            outputs,
            weights: vec![0.0; inputs * outputs],
            bias: vec![0.0; outputs],
        }
    }

    /// Weights drawn from N(0, std), zero bias.
    pub fn random<R: Rng>(inputs: usize, outputs: usize, std: f32, rng: &mut R) -> Result<Self> {
        let normal = Normal::new(0.0f32, std).map_err(|e| KernelError::Capability(e.to_string()))?;
        Ok(Self {
            inputs,
            outputs,
            weights: (0..inputs * outputs).map(|_| normal.sample(rng)).collect(),
            bias: vec![0.0; outputs],
        })
    }

    pub fn validate(&self, inputs: usize, outputs: usize) -> Result<()> {
        if self.inputs != inputs {
            return Err(KernelError::DimensionMismatch { expected: inputs, found: self.inputs });
        }
        if self.outputs != outputs {
            return Err(KernelError::DimensionMismatch { expected: outputs, found: self.outputs });
        }
        if self.weights.len() != inputs * outputs {
            return Err(KernelError::DimensionMismatch {
                expected: inputs * outputs,
                found: self.weights.len(),
            });
        }
        if self.bias.len() != outputs {
            return Err(KernelError::DimensionMismatch { expected: outputs, found: self.bias.len() });
        }
        Ok(())
    }

    pub fn forward(&self, x: &[f32]) -> Result<Vec<f32>> {
        if self.inputs == 0 {
            return Err(KernelError::InvalidDimensions("dense layer has no inputs".into()));
        }
        if x.len() != self.inputs {
            return Err(KernelError::DimensionMismatch { expected: self.inputs, found: x.len() });
        }
        Ok(self
            .weights
            .chunks_exact(self.inputs)
            .zip(&self.bias)
            .map(|(row, b)| row.iter().zip(x).map(|(w, v)| w * v).sum::<f32>() + b)
            .collect())
    }
}

pub fn sigmoid(v: f32) -> f32 {
    1.0 / (1.0 + (-v).exp())
}
