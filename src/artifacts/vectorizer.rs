use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::error::{Result, SentimentError};

/// Word pattern matching the convention TF-IDF exporters use: runs of two
/// or more word characters.
static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

fn default_lowercase() -> bool {
    true
}

/// A fitted TF-IDF vectorizer loaded from a JSON artifact.
///
/// The vocabulary and idf weights are fixed when the vectorizer is fitted
/// (outside this crate); [`transform`](Self::transform) is deterministic for
/// the lifetime of the loaded artifact and never mutates it.
#[derive(Debug, Clone, Deserialize)]
pub struct TfidfVectorizer {
    /// Token -> feature index.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency weight per feature index.
    idf: Vec<f32>,
    /// Whether input text is lowercased before tokenization.
    #[serde(default = "default_lowercase")]
    lowercase: bool,
}

impl TfidfVectorizer {
    /// Load a fitted vectorizer from a JSON artifact file.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::ArtifactLoad`] if the file is missing,
    /// unreadable, fails to deserialize, or is internally inconsistent.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading vectorizer artifact");

        let content = std::fs::read_to_string(path).map_err(|e| {
            SentimentError::ArtifactLoad(format!(
                "failed to read vectorizer artifact '{}': {e}",
                path.display()
            ))
        })?;
        let vectorizer: TfidfVectorizer = serde_json::from_str(&content).map_err(|e| {
            SentimentError::ArtifactLoad(format!(
                "failed to parse vectorizer artifact '{}': {e}",
                path.display()
            ))
        })?;
        vectorizer.validate()?;

        tracing::info!(
            path = %path.display(),
            features = vectorizer.n_features(),
            "vectorizer artifact loaded"
        );
        Ok(vectorizer)
    }

    /// Number of features (columns) this vectorizer produces.
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Transform text into a sparse single-row feature vector of
    /// `(feature_index, weight)` pairs, sorted by feature index.
    ///
    /// Tokens are matched with the `\b\w\w+\b` word pattern, counted,
    /// weighted by idf, and L2-normalized. Tokens outside the fitted
    /// vocabulary contribute nothing; text with no known tokens yields an
    /// empty vector.
    pub fn transform(&self, text: &str) -> Vec<(usize, f32)> {
        let lowered;
        let haystack = if self.lowercase {
            lowered = text.to_lowercase();
            &lowered
        } else {
            text
        };

        // BTreeMap keeps the output ordered by feature index, so the same
        // text always produces an identical vector.
        let mut counts: BTreeMap<usize, f32> = BTreeMap::new();
        for token in TOKEN_PATTERN.find_iter(haystack) {
            if let Some(&idx) = self.vocabulary.get(token.as_str()) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut features: Vec<(usize, f32)> = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();

        let norm: f32 = features.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in features.iter_mut() {
                *w /= norm;
            }
        }

        features
    }

    fn validate(&self) -> Result<()> {
        if self.idf.len() != self.vocabulary.len() {
            return Err(SentimentError::ArtifactLoad(format!(
                "vectorizer artifact is inconsistent: {} vocabulary entries but {} idf weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }
        if let Some((token, &idx)) = self
            .vocabulary
            .iter()
            .find(|(_, &idx)| idx >= self.idf.len())
        {
            return Err(SentimentError::ArtifactLoad(format!(
                "vectorizer artifact is inconsistent: token '{token}' maps to index {idx}, \
                 out of range for {} features",
                self.idf.len()
            )));
        }
        if self.idf.iter().any(|w| !w.is_finite()) {
            return Err(SentimentError::ArtifactLoad(
                "vectorizer artifact contains non-finite idf weights".to_string(),
            ));
        }
        Ok(())
    }
}
