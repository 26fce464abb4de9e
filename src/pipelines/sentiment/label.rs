use serde::Serialize;

use crate::error::{Result, SentimentError};

/// A sentiment label.
///
/// `Neutral` is only reachable when the loaded classifier distinguishes
/// three classes ([`LabelScheme::Ternary`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Negative sentiment (class id 0).
    Negative,
    /// Positive sentiment (class id 1).
    Positive,
    /// Neutral sentiment (class id 2, ternary scheme only).
    Neutral,
}

impl Sentiment {
    /// The label as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Negative => "negative",
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Map a raw class id to a label under the active scheme.
    ///
    /// Anything outside the scheme's label set is an
    /// [`UnknownLabel`](SentimentError::UnknownLabel) error rather than a
    /// silent default, so a mismatched artifact pair surfaces immediately.
    pub(crate) fn from_class_id(class_id: u32, scheme: LabelScheme) -> Result<Self> {
        match (class_id, scheme) {
            (0, _) => Ok(Sentiment::Negative),
            (1, _) => Ok(Sentiment::Positive),
            (2, LabelScheme::Ternary) => Ok(Sentiment::Neutral),
            _ => Err(SentimentError::UnknownLabel {
                class_id,
                supported: scheme
                    .labels()
                    .iter()
                    .map(Sentiment::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the loaded classifier distinguishes two or three classes.
///
/// Recorded once when the classifier artifact is loaded and fixed for the
/// lifetime of the model; never re-inferred per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelScheme {
    /// Negative / positive.
    Binary,
    /// Negative / positive / neutral.
    Ternary,
}

impl LabelScheme {
    /// The labels this scheme can emit, in class-id order.
    pub fn labels(&self) -> &'static [Sentiment] {
        match self {
            LabelScheme::Binary => &[Sentiment::Negative, Sentiment::Positive],
            LabelScheme::Ternary => {
                &[Sentiment::Negative, Sentiment::Positive, Sentiment::Neutral]
            }
        }
    }

    pub(crate) fn from_class_count(n_classes: usize) -> Result<Self> {
        match n_classes {
            2 => Ok(LabelScheme::Binary),
            3 => Ok(LabelScheme::Ternary),
            n => Err(SentimentError::ArtifactLoad(format!(
                "classifier distinguishes {n} classes; expected 2 (binary) or 3 (ternary)"
            ))),
        }
    }
}
