//! aeon-classifier: decision-tree alternative to the rule engine.
//!
//! Encodes a context as `[tone_index, intent_index]`, predicts one of the six labels of
//! the shared response table with a `linfa-trees` decision tree and returns that row's
//! message. The model persists to a
//! bincode file; when the file is missing a fresh model is trained on the table rows and
//! saved.
//!
//! Substitutable with the rule engine at the [`ContextResponder`](aeon_core::ContextResponder)
//! boundary. It does not learn from feedback.

mod encoding;
mod error;
mod model;
mod tree;

pub use encoding::{
    encode_features, initial_training_set, intent_index, tone_index, FEATURE_COUNT, INTENTS, TONES,
};
pub use error::ClassifierError;
pub use model::{ClassifierResponder, ModelSource, NO_RESPONSE_MESSAGE};
pub use tree::DecisionTree;
