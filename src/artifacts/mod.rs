//! Pre-trained model artifacts.
//!
//! The crate performs no training: both the feature vectorizer and the
//! classifier are fitted elsewhere and exported as JSON artifact files.
//! Everything in this module is read-only after a successful load.

use std::path::{Path, PathBuf};

mod classifier;
mod vectorizer;

pub(crate) use classifier::argmax;
pub use classifier::{LinearClassifier, ModelFamily};
pub use vectorizer::TfidfVectorizer;

/// Locations of the two artifact files a pipeline needs.
///
/// Doubles as the builder's options type; the path pair is the cache key
/// under which loaded artifacts are memoized for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Path to the classifier artifact.
    pub classifier: PathBuf,
    /// Path to the vectorizer artifact.
    pub vectorizer: PathBuf,
}

impl ArtifactPaths {
    /// Artifact locations for a classifier/vectorizer pair.
    pub fn new(classifier: impl AsRef<Path>, vectorizer: impl AsRef<Path>) -> Self {
        Self {
            classifier: classifier.as_ref().to_path_buf(),
            vectorizer: vectorizer.as_ref().to_path_buf(),
        }
    }
}

impl crate::pipelines::cache::ModelOptions for ArtifactPaths {
    fn cache_key(&self) -> String {
        format!(
            "{}::{}",
            self.classifier.display(),
            self.vectorizer.display()
        )
    }
}
