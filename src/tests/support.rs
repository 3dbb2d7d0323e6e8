// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Stub encoder/decoder for tests.
//!
//! Encode: `z_mean[j]` is pixel `j` of the image, `z_log_var` is zero and
//! `z = z_mean + 1`. Decode ignores the latent part and returns an image
//! filled with the prototype intensity of the one-hot label. Every decode
//! input row is recorded.

use crate::codec::{DecodeCapability, EncodeCapability};
use crate::config::ModelShape;
use crate::error::Result;
use crate::types::image::{ImageGrid, Unit};
use crate::types::latent::{EncoderOutput, Label, LatentVector};
use std::sync::Mutex;

/// 2x2 images, 3 latent dims, 4 labels.
pub fn small_shape() -> ModelShape {
    ModelShape::new(2, 3, 4)
}

/// Exactly representable in f32 and distinct after scaling to bytes.
pub const PROTOTYPES: [f32; 4] = [0.125, 0.375, 0.625, 0.875];

pub struct StubModel {
    pub shape: ModelShape,
    pub prototypes: Vec<f32>,
    pub decode_calls: Mutex<Vec<Vec<f32>>>,
}

impl StubModel {
    pub fn new(shape: ModelShape, prototypes: Vec<f32>) -> Self {
        Self {
            shape,
            prototypes,
            decode_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn small() -> Self {
        Self::new(small_shape(), PROTOTYPES.to_vec())
    }

    pub fn recorded(&self) -> Vec<Vec<f32>> {
        self.decode_calls.lock().unwrap().clone()
    }
}

impl EncodeCapability for StubModel {
    fn encode(&self, images: &[ImageGrid<Unit>]) -> Result<EncoderOutput> {
        let mut out = EncoderOutput::default();
        for img in images {
            let px = img.as_slice();
            let mean: Vec<f32> = (0..self.shape.latent_dim).map(|j| px[j % px.len()]).collect();
            out.z.push(LatentVector(mean.iter().map(|v| v + 1.0).collect()));
            out.z_log_var.push(LatentVector::zeros(self.shape.latent_dim));
            out.z_mean.push(LatentVector(mean));
        }
        Ok(out)
    }
}

impl DecodeCapability for StubModel {
    fn decode(&self, inputs: &[Vec<f32>]) -> Result<Vec<ImageGrid<Unit>>> {
        let side = self.shape.image_side;
        let mut calls = self.decode_calls.lock().unwrap();
        Ok(inputs
            .iter()
            .map(|row| {
                calls.push(row.clone());
                let onehot = &row[self.shape.latent_dim..];
                let label = onehot.iter().position(|&v| v == 1.0).unwrap_or(0);
                ImageGrid::filled(side, side, self.prototypes[label])
            })
            .collect())
    }
}

pub fn grid(side: usize, value: f32) -> ImageGrid<Unit> {
    ImageGrid::filled(side, side, value)
}

pub fn grid_from(cells: &[f32]) -> ImageGrid<Unit> {
    let side = (cells.len() as f64).sqrt() as usize;
    ImageGrid::from_cells(side, side, cells.to_vec()).unwrap()
}

/// One image per label, each filled with that label's prototype.
pub fn labeled_batch(shape: &ModelShape) -> (Vec<ImageGrid<Unit>>, Vec<Label>) {
    (0..shape.label_count)
        .map(|l| (grid(shape.image_side, PROTOTYPES[l % PROTOTYPES.len()]), Label(l)))
        .unzip()
}

pub fn assert_close(a: &[f32], b: &[f32], tol: f32) {
    assert_eq!(a.len(), b.len());
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        assert!((x - y).abs() <= tol, "index {}: {} vs {}", i, x, y);
    }
}
