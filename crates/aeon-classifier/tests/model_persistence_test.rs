//! Integration test: classifier model persistence.
//!
//! ## Scenarios
//! 1. Missing model file: load trains the initial model and writes the file.
//! 2. Existing model file: load reads it back and predicts identically.
//! 3. Corrupt model file: load fails with a codec error instead of retraining.
//! 4. Model file fitted on a different row width: load rejects it.
//! 5. Save creates missing parent directories.
//! 6. Classifier and rule engine agree on every table row.

use aeon_classifier::{ClassifierError, ClassifierResponder, ModelSource};
use aeon_core::{AeonConfig, Context, ContextResponder, RESPONSE_TABLE};
use aeon_protocols::{ProtocolRegistry, Responder};

#[test]
fn test_missing_file_trains_and_saves() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aeon_model.bin");
    let mut c = ClassifierResponder::new(&path);

    assert_eq!(c.load_model().unwrap(), ModelSource::TrainedFresh);
    assert!(c.is_trained());
    assert!(path.exists());
}

#[test]
fn test_saved_model_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aeon_model.bin");

    let mut first = ClassifierResponder::new(&path);
    first.train_initial_model().unwrap();

    let mut second = ClassifierResponder::new(&path);
    assert_eq!(second.load_model().unwrap(), ModelSource::Loaded);
    assert_eq!(second.model().n_features(), first.model().n_features());
    assert_eq!(second.model().depth(), first.model().depth());

    for ctx in [
        Context::neutral("happy", "create"),
        Context::neutral("sad", "dance"),
        Context::neutral("anxious", "escape"),
    ] {
        assert_eq!(first.predict_response(&ctx), second.predict_response(&ctx));
    }
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aeon_model.bin");
    std::fs::write(&path, [0xFFu8; 3]).unwrap();

    let mut c = ClassifierResponder::new(&path);
    assert!(matches!(c.load_model(), Err(ClassifierError::Codec(_))));
    assert!(!c.is_trained());
}

#[test]
fn test_model_with_wrong_width_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aeon_model.bin");

    let mut writer = ClassifierResponder::new(&path);
    writer
        .train_model(&[vec![0.0, 0.0, 0.0], vec![1.0, 1.0, 1.0]], &[0, 1])
        .unwrap();
    writer.save_model().unwrap();

    let mut reader = ClassifierResponder::new(&path);
    assert!(matches!(
        reader.load_model(),
        Err(ClassifierError::InvalidModel(_))
    ));
    assert!(!reader.is_trained());
}

#[test]
fn test_save_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("models").join("aeon_model.bin");
    let mut c = ClassifierResponder::new(&path);
    c.train_initial_model().unwrap();
    assert!(path.exists());
}

#[test]
fn test_from_config_uses_model_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = AeonConfig {
        model_path: dir.path().join("cfg_model.bin"),
        ..AeonConfig::default()
    };
    let c = ClassifierResponder::from_config(&config).unwrap();
    assert_eq!(c.model_path(), config.model_path.as_path());
    assert_eq!(c.kind(), "classifier");
    assert!(config.model_path.exists());
}

#[test]
fn test_agrees_with_rule_engine_on_every_row() {
    let dir = tempfile::tempdir().unwrap();
    let mut c = ClassifierResponder::new(dir.path().join("m.bin"));
    c.load_model().unwrap();
    let rules = Responder::with_seed(ProtocolRegistry::with_default_protocols(), 1);
    for entry in RESPONSE_TABLE.iter() {
        let ctx = Context::neutral(entry.tone, entry.intent);
        assert_eq!(c.respond_message(&ctx), entry.message);
        assert_eq!(c.respond(&ctx), rules.generate_response(&ctx));
    }
}
