// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Block resampling between display pixel buffers and model-sized grids.
//!
//! `downsample` averages channel 0 over equal rectangular blocks, floors the
//! mean and clamps it to 0..=255. `upsample` replicates every cell into a
//! `repeat_x × repeat_y` block of opaque grey pixels. Both require exact
//! integer block sizes.

use crate::error::{KernelError, Result};
use crate::types::image::{ImageGrid, PixelBuffer, Raw, Unit, CHANNELS};

/// Shrinks `buffer` to a `target_w × target_h` grid of raw intensities.
pub fn downsample(buffer: &PixelBuffer, target_w: usize, target_h: usize) -> Result<ImageGrid<Raw>> {
    let (src_w, src_h) = (buffer.width(), buffer.height());
    if target_w == 0 || target_h == 0 {
        return Err(KernelError::InvalidDimensions(format!(
            "target {}x{} must be non-zero",
            target_w, target_h
        )));
    }
    if target_w > src_w || target_h > src_h {
        return Err(KernelError::InvalidDimensions(format!(
            "target {}x{} exceeds source {}x{}",
            target_w, target_h, src_w, src_h
        )));
    }
    if src_w % target_w != 0 || src_h % target_h != 0 {
        return Err(KernelError::InvalidDimensions(format!(
            "target {}x{} does not divide source {}x{}",
            target_w, target_h, src_w, src_h
        )));
    }

    let (step_x, step_y) = (src_w / target_w, src_h / target_h);
    let mut sums = vec![0u64; target_w * target_h];

    // Channel 0 only; the buffer is grey so red carries the intensity.
    for (i, px) in buffer.data().chunks_exact(CHANNELS).enumerate() {
        let (x, y) = (i % src_w, i / src_w);
        sums[(y / step_y) * target_w + x / step_x] += u64::from(px[0]);
    }

    // Integer division of non-negative sums is the floor of the exact mean.
    let area = (step_x * step_y) as u64;
    let cells = sums
        .into_iter()
        .map(|s| (s / area).min(255) as f32)
        .collect();

    ImageGrid::from_cells(target_w, target_h, cells)
}

/// Expands `grid` to a `target_w × target_h` opaque RGBA buffer.
///
/// Cells are converted to bytes the way a clamped 8-bit canvas array does:
/// rounded to nearest and saturated to 0..=255.
pub fn upsample(grid: &ImageGrid<Raw>, target_w: usize, target_h: usize) -> Result<PixelBuffer> {
    if grid.is_empty() {
        return Err(KernelError::EmptyInput);
    }
    let (src_w, src_h) = (grid.width(), grid.height());
    if target_w < src_w || target_h < src_h {
        return Err(KernelError::InvalidDimensions(format!(
            "target {}x{} is smaller than source {}x{}",
            target_w, target_h, src_w, src_h
        )));
    }
    if target_w % src_w != 0 || target_h % src_h != 0 {
        return Err(KernelError::InvalidDimensions(format!(
            "target {}x{} is not a multiple of source {}x{}",
            target_w, target_h, src_w, src_h
        )));
    }

    let (repeat_x, repeat_y) = (target_w / src_w, target_h / src_h);
    let mut data = Vec::with_capacity(target_w * target_h * CHANNELS);

    for y in 0..src_h {
        let row = grid.row(y);
        for _ in 0..repeat_y {
            for &cell in row {
                let v = to_byte(cell);
                for _ in 0..repeat_x {
                    data.extend_from_slice(&[v, v, v, 255]);
                }
            }
        }
    }

    PixelBuffer::new(target_w, target_h, data)
}

/// Raw 0..=255 grid to the unit interval.
pub fn normalize(grid: &ImageGrid<Raw>) -> ImageGrid<Unit> {
    grid.map_into(|v| v / 255.0)
}

/// Unit-interval grid back to 0..=255, without clamping or flooring.
pub fn amplify(grid: &ImageGrid<Unit>) -> ImageGrid<Raw> {
    grid.map_into(|v| v * 255.0)
}

fn to_byte(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round_ties_even().clamp(0.0, 255.0) as u8
}
