// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod image;
pub mod latent;

pub use image::{ImageGrid, PixelBuffer, Raw, Unit};
pub use latent::{EncoderOutput, Label, LatentVector};
