// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! The surface handed to display collaborators: pixel buffers in,
//! labels and display-sized morphing frames out.

use crate::classify::{Classification, ReconstructionClassifier};
use crate::codec::{DecodeCapability, EncodeCapability, LatentCodec};
use crate::config::{KernelConfig, LatentSampling};
use crate::error::{KernelError, Result};
use crate::model::DenseModel;
use crate::morph::{MorphingExplainer, MorphingSequence};
use crate::representative::{RepresentativeStore, RepresentativeTable};
use crate::resample::{amplify, downsample, normalize, upsample};
use crate::types::image::{ImageGrid, PixelBuffer, Unit};
use crate::types::latent::Label;
use std::sync::Arc;

/// A prediction plus its morphing frames at display resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct Explanation {
    pub label: Label,
    pub frames: Vec<PixelBuffer>,
}

pub struct Engine {
    config: KernelConfig,
    codec: LatentCodec,
    representatives: RepresentativeStore,
}

impl Engine {
    pub fn new(config: KernelConfig) -> Result<Self> {
        config.validate()?;
        let codec = LatentCodec::new(config.shape)?;
        Ok(Self {
            config,
            codec,
            representatives: RepresentativeStore::new(),
        })
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    pub fn codec(&self) -> &LatentCodec {
        &self.codec
    }

    pub fn attach(&mut self, encoder: Arc<dyn EncodeCapability>, decoder: Arc<dyn DecodeCapability>) {
        self.codec.attach(encoder, decoder);
        tracing::info!("encoder and decoder attached");
    }

    pub fn attach_model<M>(&mut self, model: Arc<M>)
    where
        M: EncodeCapability + DecodeCapability + 'static,
    {
        self.codec.attach_model(model);
        tracing::info!("model attached");
    }

    /// Loads a [`DenseModel`] from `location`; its shape must match the config.
    pub fn load_model(&mut self, location: &str) -> Result<()> {
        let model = DenseModel::load(location)?;
        if *model.shape() != self.config.shape {
            return Err(KernelError::ShapeMismatch {
                expected: self.config.shape,
                found: *model.shape(),
            });
        }
        self.attach_model(Arc::new(model));
        Ok(())
    }

    /// True once a model is attached.
    pub fn is_ready(&self) -> bool {
        self.codec.is_loaded()
    }

    /// Downsamples a display buffer to model size and normalizes it.
    pub fn prepare(&self, buffer: &PixelBuffer) -> Result<ImageGrid<Unit>> {
        let side = self.config.shape.image_side;
        Ok(normalize(&downsample(buffer, side, side)?))
    }

    pub fn predict(&self, buffer: &PixelBuffer) -> Result<Label> {
        self.predict_with(buffer, self.config.sampling)
    }

    pub fn predict_with(&self, buffer: &PixelBuffer, sampling: LatentSampling) -> Result<Label> {
        Ok(self.predict_detailed(buffer, sampling)?.label)
    }

    pub fn predict_detailed(&self, buffer: &PixelBuffer, sampling: LatentSampling) -> Result<Classification> {
        self.codec.ensure_loaded()?;
        let grid = self.prepare(buffer)?;
        let result = self
            .classifier()
            .classify_detailed(&[grid], sampling)?
            .pop()
            .ok_or(KernelError::EmptyInput)?;
        tracing::debug!(label = result.label.index(), ?sampling, "prediction");
        Ok(result)
    }

    pub fn classify(&self, images: &[ImageGrid<Unit>], sampling: LatentSampling) -> Result<Vec<Label>> {
        self.classifier().classify(images, sampling)
    }

    pub fn classify_with_explanation(
        &self,
        images: &[ImageGrid<Unit>],
        steps: usize,
        sampling: LatentSampling,
    ) -> Result<(Vec<Label>, Vec<MorphingSequence>)> {
        self.explainer().classify_with_explanation(images, steps, sampling)
    }

    pub fn explain(
        &self,
        images: &[ImageGrid<Unit>],
        labels: &[Label],
        steps: usize,
        sampling: LatentSampling,
    ) -> Result<Vec<MorphingSequence>> {
        self.explainer().explain(images, labels, steps, sampling)
    }

    /// Classifies `buffer` and renders its morphing frames at the buffer's own size.
    pub fn explain_prediction(&self, buffer: &PixelBuffer, steps: usize) -> Result<Explanation> {
        self.explain_prediction_with(buffer, steps, self.config.sampling)
    }

    pub fn explain_prediction_with(
        &self,
        buffer: &PixelBuffer,
        steps: usize,
        sampling: LatentSampling,
    ) -> Result<Explanation> {
        self.codec.ensure_loaded()?;
        self.representatives.require()?;
        let grid = self.prepare(buffer)?;
        let (labels, sequences) = self.classify_with_explanation(&[grid], steps, sampling)?;
        let (label, sequence) = labels
            .into_iter()
            .zip(sequences)
            .next()
            .ok_or(KernelError::EmptyInput)?;

        let frames = sequence
            .frames
            .iter()
            .map(|f| upsample(&amplify(f), buffer.width(), buffer.height()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Explanation { label, frames })
    }

    pub fn representatives(&self) -> Option<Arc<RepresentativeTable>> {
        self.representatives.get()
    }

    pub fn set_representatives(&self, table: RepresentativeTable) -> Result<Arc<RepresentativeTable>> {
        table.validate(&self.config.shape)?;
        Ok(self.representatives.set(table))
    }

    pub fn update_representatives(
        &self,
        images: &[ImageGrid<Unit>],
        labels: &[Label],
        sampling: LatentSampling,
    ) -> Result<Arc<RepresentativeTable>> {
        let table = self.representatives.update(&self.codec, images, labels, sampling)?;
        tracing::debug!(fingerprint = %hex::encode(table.fingerprint()), "representatives updated");
        Ok(table)
    }

    fn classifier(&self) -> ReconstructionClassifier<'_> {
        ReconstructionClassifier::new(&self.codec)
    }

    fn explainer(&self) -> MorphingExplainer<'_> {
        MorphingExplainer::new(&self.codec, &self.representatives)
    }
}
