use crate::artifacts::TfidfVectorizer;
use crate::error::Result;

use super::label::{LabelScheme, Sentiment};

/// Confidence percentage reported when a model has no probability
/// interface. Has no probabilistic grounding; callers that need calibrated
/// confidence should use a probabilistic model family.
pub const FALLBACK_CONFIDENCE: f32 = 90.0;

/// A sentiment prediction before the pipeline attaches the source text.
#[derive(Debug, Clone)]
pub struct Scored {
    /// Predicted label.
    pub label: Sentiment,
    /// Confidence in the predicted label, as a percentage in `0..=100`.
    pub confidence: f32,
    /// Percentage probability per label, in class-id order. `None` when
    /// the model cannot produce probabilities.
    pub breakdown: Option<Vec<(Sentiment, f32)>>,
}

/// Seam between the sentiment pipeline and a concrete classifier.
///
/// The vectorizer is passed in by the pipeline the same way on every call;
/// implementations must be pure over `(vectorizer, text)`.
pub trait SentimentModel {
    /// Options needed to load this model (artifact locations etc).
    type Options: std::fmt::Debug + Clone;

    /// Load the model from its options.
    fn new(options: Self::Options) -> Result<Self>
    where
        Self: Sized;

    /// The label scheme fixed when the model's artifact was loaded.
    fn scheme(&self) -> LabelScheme;

    /// Predict the sentiment label only.
    fn predict(&self, vectorizer: &TfidfVectorizer, text: &str) -> Result<Sentiment>;

    /// Predict sentiment with a confidence percentage and, when the model
    /// has a probability interface, a per-label breakdown.
    ///
    /// Default implementation falls back to [`predict`](Self::predict)
    /// with the fixed [`FALLBACK_CONFIDENCE`] and no breakdown.
    fn predict_with_confidence(
        &self,
        vectorizer: &TfidfVectorizer,
        text: &str,
    ) -> Result<Scored> {
        let label = self.predict(vectorizer, text)?;
        Ok(Scored {
            label,
            confidence: FALLBACK_CONFIDENCE,
            breakdown: None,
        })
    }

    /// Predict a batch of inputs, returning one result per item.
    fn predict_with_confidence_batch(
        &self,
        vectorizer: &TfidfVectorizer,
        texts: &[&str],
    ) -> Result<Vec<Result<Scored>>> {
        Ok(texts
            .iter()
            .map(|text| self.predict_with_confidence(vectorizer, text))
            .collect())
    }

    /// Load the vectorizer paired with this model.
    fn get_vectorizer(options: Self::Options) -> Result<TfidfVectorizer>;

    /// Verify the model can consume what the vectorizer produces.
    ///
    /// Called once at build time; the default accepts anything.
    fn check_vectorizer(&self, _vectorizer: &TfidfVectorizer) -> Result<()> {
        Ok(())
    }
}
