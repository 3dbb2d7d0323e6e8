// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use crate::config::ModelShape;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KernelError {
    /// A resample target is zero, points the wrong way, or is not an exact divisor/multiple.
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Zero-sized image handed to the resampler.
    #[error("Empty input image")]
    EmptyInput,

    /// Encode/decode invoked before the encoder and decoder were attached.
    #[error("Model not loaded")]
    ModelNotLoaded,

    /// Explanation requested before the representative table was computed.
    #[error("Representative table has not been computed")]
    RepresentativeMissing,

    /// Representative update batch has no sample for this label.
    #[error("No samples for label {0}")]
    EmptyClass(usize),

    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Model shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch { expected: ModelShape, found: ModelShape },

    #[error("Batch mismatch: {images} images, {labels} labels")]
    BatchMismatch { images: usize, labels: usize },

    #[error("Unknown label {label} (label count {label_count})")]
    UnknownLabel { label: usize, label_count: usize },

    #[error("Morphing needs at least one step")]
    InvalidSteps,

    /// The attached encoder/decoder reported a failure.
    #[error("Capability error: {0}")]
    Capability(String),

    #[error("Model format error: {0}")]
    ModelFormat(#[from] serde_json::Error),

    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, KernelError>;
