//! Decision tree model: a thin wrapper over `linfa-trees`.
//!
//! Fits a Gini-split tree on small numeric feature rows and predicts one label per row.
//! Labels are opaque class ids; their values are never used as indices.

use linfa::prelude::*;
use linfa_trees::{DecisionTree as LinfaTree, SplitQuality};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::ClassifierError;

/// Multi-class decision tree. Untrained until [`DecisionTree::fit`] succeeds.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DecisionTree {
    tree: Option<LinfaTree<f64, usize>>,
    n_features: usize,
}

impl DecisionTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_trained(&self) -> bool {
        self.tree.is_some()
    }

    /// Row width the model was fitted on (0 when untrained).
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn depth(&self) -> usize {
        self.tree.as_ref().map(LinfaTree::max_depth).unwrap_or(0)
    }

    /// Fit on `features` (one row per sample) and `labels`. Replaces any previous fit.
    pub fn fit(&mut self, features: &[Vec<f64>], labels: &[usize]) -> Result<(), ClassifierError> {
        if features.is_empty() {
            return Err(ClassifierError::EmptyTrainingSet);
        }
        if features.len() != labels.len() {
            return Err(ClassifierError::ShapeMismatch(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }
        let width = features[0].len();
        if width == 0 {
            return Err(ClassifierError::ShapeMismatch("feature rows are empty".to_string()));
        }
        if let Some(row) = features.iter().find(|row| row.len() != width) {
            return Err(ClassifierError::ShapeMismatch(format!(
                "expected rows of width {}, found {}",
                width,
                row.len()
            )));
        }

        let records = Array2::from_shape_vec((features.len(), width), features.concat())
            .map_err(|e| ClassifierError::ShapeMismatch(e.to_string()))?;
        let dataset = Dataset::new(records, Array1::from(labels.to_vec()));
        let tree = LinfaTree::params()
            .split_quality(SplitQuality::Gini)
            .fit(&dataset)
            .map_err(|e| ClassifierError::Fit(e.to_string()))?;

        self.tree = Some(tree);
        self.n_features = width;
        Ok(())
    }

    /// Predicted label, or `None` if untrained or the row has the wrong width.
    pub fn predict(&self, row: &[f64]) -> Option<usize> {
        let tree = self.tree.as_ref()?;
        if row.len() != self.n_features {
            return None;
        }
        let records = Array2::from_shape_vec((1, row.len()), row.to_vec()).ok()?;
        let predicted: Array1<usize> = tree.predict(&records);
        predicted.get(0).copied()
    }

    /// Check that every split reads a feature inside the fitted row width. A tree read
    /// from disk must pass this before it is used.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        let Some(tree) = &self.tree else {
            return Ok(());
        };
        if self.n_features == 0 {
            return Err(ClassifierError::InvalidModel(
                "trained model has zero features".to_string(),
            ));
        }
        if let Some(feature) = tree.features().into_iter().find(|f| *f >= self.n_features) {
            return Err(ClassifierError::InvalidModel(format!(
                "split on feature {} but rows have {} features",
                feature, self.n_features
            )));
        }
        Ok(())
    }
}
