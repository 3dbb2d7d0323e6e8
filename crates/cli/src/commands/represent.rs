use anyhow::{Context, Result};
use std::path::Path;

use idcvae_kernel::LatentSampling;

use crate::engine::Workbench;
use crate::imageio::read_dataset;

/// Computes the representative table from a labeled dataset and saves it as JSON.
pub fn run(
    model: &Path,
    dataset: &Path,
    out: &Path,
    sampling: LatentSampling,
    config: Option<&Path>,
) -> Result<()> {
    let bench = Workbench::open(model, config)?;
    let (images, labels) = read_dataset(dataset)?;

    let table = bench
        .engine
        .update_representatives(&images, &labels, sampling)
        .context("Failed to compute representatives")?;

    let json = serde_json::to_string_pretty(&*table)?;
    std::fs::write(out, json).with_context(|| format!("Failed to write {}", out.display()))?;

    tracing::info!(samples = images.len(), path = %out.display(), "representative table saved");
    println!("Representatives for {} labels from {} samples", table.len(), images.len());
    println!("Fingerprint: {}", hex::encode(table.fingerprint()));
    Ok(())
}
