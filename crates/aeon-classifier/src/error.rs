//! Classifier error type.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("training set is empty")]
    EmptyTrainingSet,
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("decision tree fit failed: {0}")]
    Fit(String),
    #[error("invalid model: {0}")]
    InvalidModel(String),
    #[error("model io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model codec error: {0}")]
    Codec(#[from] bincode::Error),
}
