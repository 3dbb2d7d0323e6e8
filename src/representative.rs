// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Per-label latent centroids.
//!
//! A [`RepresentativeTable`] is immutable once built. The store only ever
//! swaps in a whole new table, so readers see either the old table or the
//! new one, never a mix.

use crate::codec::LatentCodec;
use crate::config::{LatentSampling, ModelShape};
use crate::error::{KernelError, Result};
use crate::types::image::{ImageGrid, Unit};
use crate::types::latent::{Label, LatentVector};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// One centroid per label, indexed by label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RepresentativeTable {
    centroids: Vec<LatentVector>,
}

impl RepresentativeTable {
    /// Validates that there is exactly one centroid per label, each of the latent width.
    pub fn new(centroids: Vec<LatentVector>, shape: &ModelShape) -> Result<Self> {
        let table = Self { centroids };
        table.validate(shape)?;
        Ok(table)
    }

    pub fn validate(&self, shape: &ModelShape) -> Result<()> {
        if self.centroids.len() != shape.label_count {
            return Err(KernelError::DimensionMismatch {
                expected: shape.label_count,
                found: self.centroids.len(),
            });
        }
        for c in &self.centroids {
            if c.dim() != shape.latent_dim {
                return Err(KernelError::DimensionMismatch {
                    expected: shape.latent_dim,
                    found: c.dim(),
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, label: Label) -> Option<&LatentVector> {
        self.centroids.get(label.index())
    }

    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Label, &LatentVector)> {
        self.centroids.iter().enumerate().map(|(i, c)| (Label(i), c))
    }

    /// BLAKE3 over label count, latent width and every centroid's f32 bits (LE).
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.centroids.len() as u64).to_le_bytes());
        let dim = self.centroids.first().map_or(0, LatentVector::dim);
        hasher.update(&(dim as u64).to_le_bytes());
        for c in &self.centroids {
            for v in c {
                hasher.update(&v.to_bits().to_le_bytes());
            }
        }
        *hasher.finalize().as_bytes()
    }
}

/// Computes the centroid of every label from a labeled batch.
///
/// Every known label must occur at least once; the first label with no
/// samples is reported as `EmptyClass`.
pub fn compute_representatives(
    codec: &LatentCodec,
    images: &[ImageGrid<Unit>],
    labels: &[Label],
    sampling: LatentSampling,
) -> Result<RepresentativeTable> {
    codec.ensure_loaded()?;
    if images.len() != labels.len() {
        return Err(KernelError::BatchMismatch {
            images: images.len(),
            labels: labels.len(),
        });
    }
    let shape = *codec.shape();
    let mut counts = vec![0usize; shape.label_count];
    for &label in labels {
        codec.check_label(label)?;
        counts[label.index()] += 1;
    }
    if let Some(missing) = counts.iter().position(|&n| n == 0) {
        return Err(KernelError::EmptyClass(missing));
    }

    let latents = codec.encode_latents(images, sampling)?;

    let mut sums = vec![vec![0f64; shape.latent_dim]; shape.label_count];
    for (z, label) in latents.iter().zip(labels) {
        for (acc, &v) in sums[label.index()].iter_mut().zip(z) {
            *acc += f64::from(v);
        }
    }

    let centroids = sums
        .into_iter()
        .zip(&counts)
        .map(|(sum, &n)| LatentVector(sum.into_iter().map(|s| (s / n as f64) as f32).collect()))
        .collect();

    RepresentativeTable::new(centroids, &shape)
}

/// Holds the current table, absent until first computed or set.
#[derive(Debug, Default)]
pub struct RepresentativeStore {
    current: RwLock<Option<Arc<RepresentativeTable>>>,
}

impl RepresentativeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current table, or `None` if it was never computed.
    pub fn get(&self) -> Option<Arc<RepresentativeTable>> {
        // A poisoned lock still holds a complete table: writers only swap the Arc.
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        guard.clone()
    }

    /// Like [`get`](Self::get) but fails with `RepresentativeMissing`.
    pub fn require(&self) -> Result<Arc<RepresentativeTable>> {
        self.get().ok_or(KernelError::RepresentativeMissing)
    }

    pub fn set(&self, table: RepresentativeTable) -> Arc<RepresentativeTable> {
        let table = Arc::new(table);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(table.clone());
        table
    }

    pub fn clear(&self) {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }

    /// Recomputes all centroids from `images`/`labels` and swaps them in.
    ///
    /// On error the previous table is left untouched.
    pub fn update(
        &self,
        codec: &LatentCodec,
        images: &[ImageGrid<Unit>],
        labels: &[Label],
        sampling: LatentSampling,
    ) -> Result<Arc<RepresentativeTable>> {
        let table = compute_representatives(codec, images, labels, sampling)?;
        tracing::debug!(
            samples = images.len(),
            labels = table.len(),
            ?sampling,
            "representative table recomputed"
        );
        Ok(self.set(table))
    }
}
