use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use idcvae_kernel::LatentSampling;

use crate::engine::Workbench;
use crate::imageio::{read_pixels, write_pixels};

/// Predicts `image` and writes its morphing frames as `frame_NNN.png` in `out_dir`.
pub fn run(
    model: &Path,
    table: &Path,
    image: &Path,
    steps: Option<usize>,
    out_dir: &Path,
    sampling: LatentSampling,
    config: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let bench = Workbench::open(model, config)?.with_table(table)?;
    let steps = steps.unwrap_or(bench.engine.config().morph_steps);
    let buffer = read_pixels(image)?;

    let explanation = bench
        .engine
        .explain_prediction_with(&buffer, steps, sampling)
        .context("Failed to explain prediction")?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let mut written = Vec::with_capacity(explanation.frames.len());
    for (i, frame) in explanation.frames.iter().enumerate() {
        let path = out_dir.join(format!("frame_{:03}.png", i));
        write_pixels(&path, frame)?;
        written.push(path);
    }

    println!("Prediction: {}", explanation.label);
    println!("Wrote {} frames to {}", written.len(), out_dir.display());
    Ok(written)
}
