//! Error types for this crate.
//!
//! All fallible operations return [`Result<T>`] which uses [`SentimentError`] as the error type.

use thiserror::Error;

/// A [`Result`](std::result::Result) alias using [`SentimentError`] as the error type.
pub type Result<T> = std::result::Result<T, SentimentError>;

/// The unified error type for all crate errors.
///
/// # Example
///
/// ```rust,no_run
/// use tweetscope::error::SentimentError;
///
/// fn handle_error(e: SentimentError) {
///     match &e {
///         SentimentError::ArtifactLoad(_) => {
///             // Missing or corrupt artifact - fix paths, do not serve requests
///         }
///         SentimentError::EmptyInput => {
///             // Whitespace-only text - ask the caller for real input
///         }
///         SentimentError::UnknownLabel { .. } => {
///             // Mismatched vectorizer/classifier pair - re-export artifacts
///         }
///         SentimentError::Unexpected(_) => {
///             // Internal error - report if seen
///             eprintln!("Internal error: {e}");
///         }
///         _ => {
///             // Future error variants
///         }
///     }
/// }
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SentimentError {
    /// An artifact file is missing, unreadable, or failed to deserialize.
    /// Fatal at startup: no pipeline can be built without both artifacts.
    #[error("{0}")]
    ArtifactLoad(String),

    /// Input text is empty after trimming whitespace. Fix input and retry.
    #[error("input text is empty")]
    EmptyInput,

    /// The classifier produced a class id outside the supported label set.
    /// Indicates a mismatched artifact pair, not a recoverable condition.
    #[error("class id {class_id} is not in the supported label set ({supported})")]
    UnknownLabel {
        /// Class id the classifier emitted.
        class_id: u32,
        /// Human-readable list of labels the active scheme supports.
        supported: String,
    },

    /// Internal error. Report if seen.
    #[error("{0}")]
    Unexpected(String),
}

// File I/O and JSON parsing in this crate happen only while loading artifacts.

impl From<std::io::Error> for SentimentError {
    fn from(value: std::io::Error) -> Self {
        SentimentError::ArtifactLoad(value.to_string())
    }
}

impl From<serde_json::Error> for SentimentError {
    fn from(value: serde_json::Error) -> Self {
        SentimentError::ArtifactLoad(value.to_string())
    }
}
