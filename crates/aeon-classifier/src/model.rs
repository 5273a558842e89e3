//! Classifier responder: decision tree prediction plus model persistence.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use aeon_core::{entry_for_label, AeonConfig, Context, ContextResponder, Emotion, ResponsePayload};
use tracing::{info, warn};

use crate::encoding::{encode_features, initial_training_set, FEATURE_COUNT};
use crate::error::ClassifierError;
use crate::tree::DecisionTree;

/// Returned when the model is untrained or predicts a label outside the table.
pub const NO_RESPONSE_MESSAGE: &str = "No response found.";

/// Where the model in memory came from after [`ClassifierResponder::load_model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSource {
    /// Read from the model file.
    Loaded,
    /// File absent: trained on the initial set and saved.
    TrainedFresh,
}

/// Maps a context to one of the six table messages via a decision tree.
#[derive(Debug)]
pub struct ClassifierResponder {
    model: DecisionTree,
    model_path: PathBuf,
}

impl ClassifierResponder {
    /// Untrained responder bound to a model file path.
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model: DecisionTree::new(),
            model_path: model_path.into(),
        }
    }

    /// Bound to `config.model_path`, loading or training the model.
    pub fn from_config(config: &AeonConfig) -> Result<Self, ClassifierError> {
        let mut responder = Self::new(&config.model_path);
        responder.load_model()?;
        Ok(responder)
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn model(&self) -> &DecisionTree {
        &self.model
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_trained()
    }

    pub fn train_model(&mut self, features: &[Vec<f64>], labels: &[usize]) -> Result<(), ClassifierError> {
        self.model.fit(features, labels)
    }

    /// Train on the six table rows and save the model.
    pub fn train_initial_model(&mut self) -> Result<(), ClassifierError> {
        let (features, labels) = initial_training_set();
        self.train_model(&features, &labels)?;
        self.save_model()?;
        info!(path = %self.model_path.display(), "classifier trained on initial set and saved");
        Ok(())
    }

    pub fn predict_label(&self, context: &Context) -> Option<usize> {
        self.model.predict(&encode_features(context))
    }

    /// Table message for the predicted label, or [`NO_RESPONSE_MESSAGE`].
    pub fn predict_response(&self, context: &Context) -> String {
        self.predict_label(context)
            .and_then(entry_for_label)
            .map(|entry| entry.message.to_string())
            .unwrap_or_else(|| NO_RESPONSE_MESSAGE.to_string())
    }

    pub fn save_model(&self) -> Result<(), ClassifierError> {
        if let Some(parent) = self.model_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
            }
        }
        let file = File::create(&self.model_path).map_err(|source| self.io_error(source))?;
        bincode::serialize_into(BufWriter::new(file), &self.model)?;
        Ok(())
    }

    /// Read the model file. When it does not exist, train on the initial set and save.
    /// A file that decodes to an unusable tree is an error and leaves the model as it was.
    pub fn load_model(&mut self) -> Result<ModelSource, ClassifierError> {
        match File::open(&self.model_path) {
            Ok(file) => {
                let model: DecisionTree = bincode::deserialize_from(BufReader::new(file))?;
                if model.is_trained() && model.n_features() != FEATURE_COUNT {
                    return Err(ClassifierError::InvalidModel(format!(
                        "model expects {} features, encoding produces {}",
                        model.n_features(),
                        FEATURE_COUNT
                    )));
                }
                model.validate()?;
                self.model = model;
                info!(path = %self.model_path.display(), "classifier model loaded");
                Ok(ModelSource::Loaded)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %self.model_path.display(), "model not found; training from scratch");
                self.model = DecisionTree::new();
                self.train_initial_model()?;
                Ok(ModelSource::TrainedFresh)
            }
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> ClassifierError {
        ClassifierError::Io {
            path: self.model_path.clone(),
            source,
        }
    }
}

impl ContextResponder for ClassifierResponder {
    fn kind(&self) -> &'static str {
        "classifier"
    }

    /// Emotion comes from the predicted table row; unmapped predictions are neutral.
    fn respond(&self, context: &Context) -> ResponsePayload {
        match self.predict_label(context).and_then(entry_for_label) {
            Some(entry) => entry.payload(),
            None => ResponsePayload::new(NO_RESPONSE_MESSAGE, Emotion::Neutral),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_core::RESPONSE_TABLE;

    #[test]
    fn test_untrained_has_no_response() {
        let c = ClassifierResponder::new("unused.bin");
        assert_eq!(
            c.predict_response(&Context::neutral("happy", "create")),
            NO_RESPONSE_MESSAGE
        );
        assert_eq!(c.respond(&Context::neutral("happy", "create")).emotion, Emotion::Neutral);
    }

    #[test]
    fn test_trained_answers_every_row() {
        let mut c = ClassifierResponder::new("unused.bin");
        let (features, labels) = initial_training_set();
        c.train_model(&features, &labels).unwrap();
        for entry in RESPONSE_TABLE.iter() {
            let ctx = Context::neutral(entry.tone, entry.intent);
            assert_eq!(c.predict_response(&ctx), entry.message);
            assert_eq!(c.respond(&ctx), entry.payload());
        }
    }

    #[test]
    fn test_label_outside_table_has_no_response() {
        let mut c = ClassifierResponder::new("unused.bin");
        c.train_model(&[vec![0.0, 0.0], vec![1.0, 1.0]], &[42, 42]).unwrap();
        assert_eq!(
            c.predict_response(&Context::neutral("happy", "create")),
            NO_RESPONSE_MESSAGE
        );
    }
}
