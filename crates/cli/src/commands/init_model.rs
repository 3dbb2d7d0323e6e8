use anyhow::{Context, Result};
use std::path::Path;

use idcvae_kernel::model::DenseModel;

use crate::engine::load_config;

/// Writes a randomly initialized dense model.
pub fn run(out: &Path, seed: u64, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let model = DenseModel::random(config.shape, seed)?;
    model
        .save(out)
        .with_context(|| format!("Failed to write model {}", out.display()))?;

    println!(
        "Model written to {} (side {}, latent {}, labels {}, seed {})",
        out.display(),
        config.shape.image_side,
        config.shape.latent_dim,
        config.shape.label_count,
        seed
    );
    Ok(())
}
