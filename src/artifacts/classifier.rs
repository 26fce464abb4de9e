use serde::Deserialize;
use std::path::Path;

use crate::error::{Result, SentimentError};

/// Model family recorded in the classifier artifact.
///
/// The family decides whether the classifier exposes a probability
/// interface: linear SVMs produce decision scores but no calibrated
/// probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFamily {
    /// Logistic regression; probabilities via sigmoid/softmax.
    LogisticRegression,
    /// Linear support vector machine; decision scores only.
    LinearSvm,
}

/// A fitted linear classifier loaded from a JSON artifact.
///
/// Holds one weight row per class (or a single row for the conventional
/// binary export shape, where a positive score favors the second class)
/// plus intercepts. `predict` is deterministic given the same feature
/// vector; nothing mutates the classifier after load.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearClassifier {
    family: ModelFamily,
    /// Class ids in the order the weight rows (and emitted scores) use.
    classes: Vec<u32>,
    /// Weight rows, `coef[row][feature]`.
    coef: Vec<Vec<f32>>,
    /// One intercept per weight row.
    intercept: Vec<f32>,
}

impl LinearClassifier {
    /// Load a fitted classifier from a JSON artifact file.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::ArtifactLoad`] if the file is missing,
    /// unreadable, fails to deserialize, or has an unsupported shape
    /// (class count other than 2 or 3, mismatched rows, duplicate ids).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading classifier artifact");

        let content = std::fs::read_to_string(path).map_err(|e| {
            SentimentError::ArtifactLoad(format!(
                "failed to read classifier artifact '{}': {e}",
                path.display()
            ))
        })?;
        let classifier: LinearClassifier = serde_json::from_str(&content).map_err(|e| {
            SentimentError::ArtifactLoad(format!(
                "failed to parse classifier artifact '{}': {e}",
                path.display()
            ))
        })?;
        classifier.validate()?;

        tracing::info!(
            path = %path.display(),
            classes = classifier.n_classes(),
            family = ?classifier.family,
            "classifier artifact loaded"
        );
        Ok(classifier)
    }

    /// Model family recorded in the artifact.
    pub fn family(&self) -> ModelFamily {
        self.family
    }

    /// Class ids, in score order.
    pub fn classes(&self) -> &[u32] {
        &self.classes
    }

    /// Number of classes this classifier distinguishes.
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Number of features each weight row expects.
    pub fn n_features(&self) -> usize {
        self.coef.first().map(Vec::len).unwrap_or(0)
    }

    /// Decision score per class for a sparse feature vector.
    ///
    /// For the single-row binary shape the score `s` expands to `[-s, s]`
    /// so the output always has one entry per class. Feature indices at or
    /// beyond [`n_features`](Self::n_features) contribute nothing, so a
    /// vector from a wider vectorizer scores on the known features only.
    pub fn decision_scores(&self, features: &[(usize, f32)]) -> Vec<f32> {
        if self.coef.len() == 1 && self.classes.len() == 2 {
            let s = self.row_score(0, features);
            return vec![-s, s];
        }
        (0..self.coef.len())
            .map(|row| self.row_score(row, features))
            .collect()
    }

    /// Predict the class id with the highest decision score.
    pub fn predict(&self, features: &[(usize, f32)]) -> u32 {
        let scores = self.decision_scores(features);
        self.classes[argmax(&scores)]
    }

    /// Probability distribution over classes, in class order.
    ///
    /// `None` when the model family has no probability interface
    /// ([`ModelFamily::LinearSvm`]). When present, the distribution's
    /// argmax always agrees with [`predict`](Self::predict): sigmoid and
    /// softmax are monotone in the decision scores.
    pub fn predict_probability(&self, features: &[(usize, f32)]) -> Option<Vec<f32>> {
        match self.family {
            ModelFamily::LinearSvm => None,
            ModelFamily::LogisticRegression => {
                if self.coef.len() == 1 && self.classes.len() == 2 {
                    let s = self.row_score(0, features);
                    let p = sigmoid(s);
                    Some(vec![1.0 - p, p])
                } else {
                    let scores = self.decision_scores(features);
                    Some(softmax(&scores))
                }
            }
        }
    }

    fn row_score(&self, row: usize, features: &[(usize, f32)]) -> f32 {
        let weights = &self.coef[row];
        let dot: f32 = features
            .iter()
            .filter(|&&(idx, _)| idx < weights.len())
            .map(|&(idx, w)| weights[idx] * w)
            .sum();
        dot + self.intercept[row]
    }

    fn validate(&self) -> Result<()> {
        let n_classes = self.classes.len();
        if n_classes != 2 && n_classes != 3 {
            return Err(SentimentError::ArtifactLoad(format!(
                "classifier artifact has {n_classes} classes; sentiment models have 2 or 3"
            )));
        }
        let mut seen = self.classes.clone();
        seen.sort_unstable();
        seen.dedup();
        if seen.len() != n_classes {
            return Err(SentimentError::ArtifactLoad(
                "classifier artifact has duplicate class ids".to_string(),
            ));
        }

        let single_row_binary = self.coef.len() == 1 && n_classes == 2;
        if self.coef.len() != n_classes && !single_row_binary {
            return Err(SentimentError::ArtifactLoad(format!(
                "classifier artifact has {} weight rows for {n_classes} classes",
                self.coef.len()
            )));
        }
        if self.intercept.len() != self.coef.len() {
            return Err(SentimentError::ArtifactLoad(format!(
                "classifier artifact has {} intercepts for {} weight rows",
                self.intercept.len(),
                self.coef.len()
            )));
        }

        let width = self.n_features();
        if width == 0 {
            return Err(SentimentError::ArtifactLoad(
                "classifier artifact has empty weight rows".to_string(),
            ));
        }
        if self.coef.iter().any(|row| row.len() != width) {
            return Err(SentimentError::ArtifactLoad(
                "classifier artifact has weight rows of differing widths".to_string(),
            ));
        }
        if self
            .coef
            .iter()
            .flatten()
            .chain(self.intercept.iter())
            .any(|w| !w.is_finite())
        {
            return Err(SentimentError::ArtifactLoad(
                "classifier artifact contains non-finite weights".to_string(),
            ));
        }
        Ok(())
    }
}

// Weights are validated finite at load, so plain comparison is safe.
// First-wins on ties (and on +/-0.0, which total_cmp would distinguish).
// Shared with the model layer so score and probability argmax agree.
pub(crate) fn argmax(scores: &[f32]) -> usize {
    let mut best = 0;
    for (i, s) in scores.iter().enumerate().skip(1) {
        if *s > scores[best] {
            best = i;
        }
    }
    best
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
