use crate::artifacts::{argmax, ArtifactPaths, LinearClassifier, TfidfVectorizer};
use crate::error::{Result, SentimentError};
use crate::pipelines::sentiment::label::{LabelScheme, Sentiment};
use crate::pipelines::sentiment::model::{Scored, SentimentModel, FALLBACK_CONFIDENCE};

/// Sentiment model backed by a pre-trained linear classifier artifact.
///
/// The label scheme is inspected and recorded once at load time from the
/// artifact's class count, so binary models can never emit `Neutral`.
#[derive(Debug, Clone)]
pub struct LinearSentimentModel {
    classifier: LinearClassifier,
    scheme: LabelScheme,
}

impl LinearSentimentModel {
    /// Load the classifier artifact and fix the label scheme.
    pub fn new(paths: ArtifactPaths) -> Result<Self> {
        let classifier = LinearClassifier::load(&paths.classifier)?;
        let scheme = LabelScheme::from_class_count(classifier.n_classes())?;
        Ok(Self { classifier, scheme })
    }

    fn label_for_class(&self, class_id: u32) -> Result<Sentiment> {
        Sentiment::from_class_id(class_id, self.scheme)
    }
}

impl SentimentModel for LinearSentimentModel {
    type Options = ArtifactPaths;

    fn new(options: Self::Options) -> Result<Self> {
        LinearSentimentModel::new(options)
    }

    fn scheme(&self) -> LabelScheme {
        self.scheme
    }

    fn predict(&self, vectorizer: &TfidfVectorizer, text: &str) -> Result<Sentiment> {
        let features = vectorizer.transform(text);
        self.label_for_class(self.classifier.predict(&features))
    }

    fn predict_with_confidence(
        &self,
        vectorizer: &TfidfVectorizer,
        text: &str,
    ) -> Result<Scored> {
        let features = vectorizer.transform(text);

        match self.classifier.predict_probability(&features) {
            Some(probs) => {
                // The label comes from the distribution itself, so the
                // reported confidence always belongs to the reported label.
                let best = argmax(&probs);
                let p_max = probs[best];
                let label = self.label_for_class(self.classifier.classes()[best])?;

                let mut breakdown = Vec::with_capacity(probs.len());
                for (&class_id, &p) in self.classifier.classes().iter().zip(probs.iter()) {
                    breakdown.push((self.label_for_class(class_id)?, p * 100.0));
                }

                Ok(Scored {
                    label,
                    confidence: p_max * 100.0,
                    breakdown: Some(breakdown),
                })
            }
            None => {
                let label = self.label_for_class(self.classifier.predict(&features))?;
                Ok(Scored {
                    label,
                    confidence: FALLBACK_CONFIDENCE,
                    breakdown: None,
                })
            }
        }
    }

    fn get_vectorizer(options: Self::Options) -> Result<TfidfVectorizer> {
        TfidfVectorizer::load(&options.vectorizer)
    }

    fn check_vectorizer(&self, vectorizer: &TfidfVectorizer) -> Result<()> {
        if self.classifier.n_features() != vectorizer.n_features() {
            return Err(SentimentError::ArtifactLoad(format!(
                "artifact pair mismatch: classifier expects {} features but the \
                 vectorizer produces {}",
                self.classifier.n_features(),
                vectorizer.n_features()
            )));
        }
        Ok(())
    }
}
