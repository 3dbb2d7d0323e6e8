// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! idcvae-kernel: classify hand-drawn digits by which label best reconstructs
//! them through a conditional autoencoder, and explain each decision by
//! morphing the input's latent point toward its class representative.

pub mod config;
pub mod error;
pub mod types;
pub mod resample;
pub mod codec;
pub mod loss;
pub mod representative;
pub mod classify;
pub mod morph;
pub mod model;
pub mod engine;

pub use config::{KernelConfig, LatentSampling, ModelShape};
pub use engine::{Engine, Explanation};
pub use error::{KernelError, Result};

#[cfg(test)]
pub mod tests;
