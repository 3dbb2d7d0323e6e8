use anyhow::{bail, Context, Result};
use image::io::Reader as ImageReader;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

use idcvae_kernel::resample::normalize;
use idcvae_kernel::types::{ImageGrid, Label, PixelBuffer, Raw, Unit};

pub fn read_pixels(path: &Path) -> Result<PixelBuffer> {
    let img = ImageReader::open(path)
        .with_context(|| format!("Failed to open image {}", path.display()))?
        .decode()
        .with_context(|| format!("Failed to decode image {}", path.display()))?
        .to_rgba8();
    let (w, h) = (img.width() as usize, img.height() as usize);
    Ok(PixelBuffer::new(w, h, img.into_raw())?)
}

pub fn write_pixels(path: &Path, buffer: &PixelBuffer) -> Result<()> {
    let img = RgbaImage::from_raw(buffer.width() as u32, buffer.height() as u32, buffer.data().to_vec())
        .context("Pixel buffer does not match its dimensions")?;
    img.save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// One labeled reference image with 0..=255 intensities.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Sample {
    pub label: usize,
    pub pixels: Vec<Vec<f32>>,
}

pub fn read_dataset(path: &Path) -> Result<(Vec<ImageGrid<Unit>>, Vec<Label>)> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    let samples: Vec<Sample> = serde_json::from_str(&raw).context("Failed to parse dataset JSON")?;
    if samples.is_empty() {
        bail!("Dataset {} is empty", path.display());
    }

    let mut images = Vec::with_capacity(samples.len());
    let mut labels = Vec::with_capacity(samples.len());
    for (i, s) in samples.into_iter().enumerate() {
        let grid = ImageGrid::<Raw>::from_rows(s.pixels)
            .with_context(|| format!("Sample {} is not rectangular", i))?;
        images.push(normalize(&grid));
        labels.push(Label(s.label));
    }
    Ok((images, labels))
}
