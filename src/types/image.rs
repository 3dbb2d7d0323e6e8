// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Pixel buffers and intensity grids.

use crate::error::{KernelError, Result};
use core::marker::PhantomData;

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// Rectangular RGBA8 image, row-major, top-left origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width * height * CHANNELS;
        if data.len() != expected {
            return Err(KernelError::DimensionMismatch {
                expected,
                found: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    /// Builds an opaque buffer from one luminance byte per pixel.
    pub fn from_luma(width: usize, height: usize, luma: &[u8]) -> Result<Self> {
        if luma.len() != width * height {
            return Err(KernelError::DimensionMismatch {
                expected: width * height,
                found: luma.len(),
            });
        }
        let data = luma.iter().flat_map(|&v| [v, v, v, 255]).collect();
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGBA of the pixel at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }
}

/// Integer intensities in 0..=255.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Raw;

/// Intensities in the unit interval, as the model consumes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unit;

/// 2-D intensity grid. `S` records whether cells are [`Raw`] or [`Unit`];
/// the two only convert through `resample::normalize` / `resample::amplify`.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageGrid<S> {
    width: usize,
    height: usize,
    cells: Vec<f32>,
    _scale: PhantomData<S>,
}

impl<S> ImageGrid<S> {
    pub fn from_cells(width: usize, height: usize, cells: Vec<f32>) -> Result<Self> {
        if cells.len() != width * height {
            return Err(KernelError::DimensionMismatch {
                expected: width * height,
                found: cells.len(),
            });
        }
        Ok(Self { width, height, cells, _scale: PhantomData })
    }

    /// Builds a grid from rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            if row.len() != width {
                return Err(KernelError::DimensionMismatch {
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }
        Ok(Self { width, height, cells, _scale: PhantomData })
    }

    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width * height],
            _scale: PhantomData,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.cells[row * self.width + col]
    }

    pub fn row(&self, row: usize) -> &[f32] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.cells
    }

    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        (0..self.height).map(|r| self.row(r).to_vec()).collect()
    }

    /// Applies `f` to every cell, producing a grid of scale `T`.
    pub(crate) fn map_into<T>(&self, f: impl Fn(f32) -> f32) -> ImageGrid<T> {
        ImageGrid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(|&v| f(v)).collect(),
            _scale: PhantomData,
        }
    }
}
