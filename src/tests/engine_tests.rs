use crate::config::{KernelConfig, LatentSampling, ModelShape};
use crate::engine::Engine;
use crate::error::KernelError;
use crate::model::DenseModel;
use crate::representative::RepresentativeTable;
use crate::tests::support::{labeled_batch, small_shape, StubModel, PROTOTYPES};
use crate::types::image::PixelBuffer;
use crate::types::latent::{Label, LatentVector};
use std::sync::Arc;

fn small_engine() -> Engine {
    let config = KernelConfig {
        shape: small_shape(),
        ..KernelConfig::default()
    };
    let mut engine = Engine::new(config).unwrap();
    engine.attach_model(Arc::new(StubModel::small()));
    engine
}

/// 4x4 display buffer, i.e. 2x2 blocks per model pixel.
fn display(value: u8) -> PixelBuffer {
    PixelBuffer::from_luma(4, 4, &[value; 16]).unwrap()
}

#[test]
fn test_engine_not_ready_until_attached() {
    let engine = Engine::new(KernelConfig::default()).unwrap();
    assert!(!engine.is_ready());
    let buf = PixelBuffer::from_luma(280, 280, &vec![0; 280 * 280]).unwrap();
    assert!(matches!(engine.predict(&buf), Err(KernelError::ModelNotLoaded)));
    assert!(matches!(engine.explain_prediction(&buf, 4), Err(KernelError::ModelNotLoaded)));
}

#[test]
fn test_predict_from_pixels() {
    let engine = small_engine();
    assert!(engine.is_ready());
    // 159 / 255 is closest to the 0.625 prototype.
    assert_eq!(engine.predict(&display(159)).unwrap(), Label(2));
    assert_eq!(engine.predict(&display(30)).unwrap(), Label(0));
    assert_eq!(engine.predict(&display(230)).unwrap(), Label(3));
}

#[test]
fn test_predict_detailed_reports_losses() {
    let engine = small_engine();
    let result = engine.predict_detailed(&display(100), LatentSampling::Mean).unwrap();
    assert_eq!(result.label, Label(1));
    assert_eq!(result.losses.len(), 4);
}

#[test]
fn test_predict_rejects_indivisible_buffer() {
    let engine = small_engine();
    let buf = PixelBuffer::from_luma(3, 3, &[0; 9]).unwrap();
    assert!(matches!(engine.predict(&buf), Err(KernelError::InvalidDimensions(_))));
}

#[test]
fn test_explain_prediction_frames_at_display_size() {
    let engine = small_engine();
    let buf = display(159);
    assert!(matches!(engine.explain_prediction(&buf, 3), Err(KernelError::RepresentativeMissing)));

    let (images, labels) = labeled_batch(&small_shape());
    engine.update_representatives(&images, &labels, LatentSampling::Mean).unwrap();

    let explanation = engine.explain_prediction(&buf, 3).unwrap();
    assert_eq!(explanation.label, Label(2));
    assert_eq!(explanation.frames.len(), 4);

    // Stub frames are the 0.625 prototype: 159.375 rounds to 159.
    let expected = (PROTOTYPES[2] * 255.0).round() as u8;
    for frame in &explanation.frames {
        assert_eq!(frame.width(), 4);
        assert_eq!(frame.height(), 4);
        assert!(frame.data().chunks_exact(4).all(|p| p == [expected, expected, expected, 255]));
    }
}

#[test]
fn test_set_representatives_validates_shape() {
    let engine = small_engine();
    assert!(engine.representatives().is_none());

    let wrong = RepresentativeTable::new(vec![LatentVector::zeros(3); 10], &ModelShape::new(2, 3, 10)).unwrap();
    assert!(engine.set_representatives(wrong).is_err());

    let ok = RepresentativeTable::new(vec![LatentVector::zeros(3); 4], &small_shape()).unwrap();
    engine.set_representatives(ok.clone()).unwrap();
    assert_eq!(*engine.representatives().unwrap(), ok);
}

#[test]
fn test_load_model_from_location() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    let shape = ModelShape::new(4, 3, 5);
    DenseModel::random(shape, 9).unwrap().save(&path).unwrap();

    let mut mismatched = Engine::new(KernelConfig::default()).unwrap();
    assert!(matches!(
        mismatched.load_model(path.to_str().unwrap()),
        Err(KernelError::ShapeMismatch { .. })
    ));
    assert!(!mismatched.is_ready());

    let mut engine = Engine::new(KernelConfig { shape, ..KernelConfig::default() }).unwrap();
    engine.load_model(path.to_str().unwrap()).unwrap();
    assert!(engine.is_ready());

    let buf = PixelBuffer::from_luma(8, 8, &[128; 64]).unwrap();
    assert!(engine.predict(&buf).unwrap().index() < 5);
}

#[test]
fn test_engine_rejects_zero_label_count() {
    let config = KernelConfig {
        shape: ModelShape::new(2, 3, 0),
        ..KernelConfig::default()
    };
    assert!(matches!(Engine::new(config), Err(KernelError::InvalidDimensions(_))));
}

#[test]
fn test_engine_rejects_zero_morph_steps() {
    let config = KernelConfig {
        morph_steps: 0,
        ..KernelConfig::default()
    };
    assert!(matches!(Engine::new(config), Err(KernelError::InvalidSteps)));
}

#[test]
fn test_config_file_with_zero_side_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"shape": {"image_side": 0, "latent_dim": 3, "label_count": 4}}"#).unwrap();
    assert!(matches!(KernelConfig::from_path(&path), Err(KernelError::InvalidDimensions(_))));

    std::fs::write(&path, r#"{"morph_steps": 3}"#).unwrap();
    let config = KernelConfig::from_path(&path).unwrap();
    assert_eq!(config.shape, ModelShape::default());
    assert_eq!(config.morph_steps, 3);
}
