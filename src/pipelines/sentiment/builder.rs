use crate::artifacts::ArtifactPaths;
use crate::error::Result;
use crate::models::LinearSentimentModel;
use crate::pipelines::cache::{global_cache, ModelOptions};

use super::model::SentimentModel;
use super::pipeline::SentimentPipeline;

/// Builder for creating [`SentimentPipeline`] instances.
///
/// Use [`Self::linear`] as the entry point.
///
/// # Examples
///
/// ```rust,no_run
/// # use tweetscope::artifacts::ArtifactPaths;
/// # use tweetscope::sentiment::SentimentPipelineBuilder;
/// # fn main() -> tweetscope::error::Result<()> {
/// let paths = ArtifactPaths::new("model.json", "tfidf_vectorizer.json");
/// let pipeline = SentimentPipelineBuilder::linear(paths).build()?;
/// # Ok(())
/// # }
/// ```
pub struct SentimentPipelineBuilder<M: SentimentModel> {
    options: M::Options,
}

impl<M: SentimentModel> SentimentPipelineBuilder<M> {
    pub(crate) fn new(options: M::Options) -> Self {
        Self { options }
    }

    /// Builds the pipeline, loading artifacts through the process-global
    /// cache: the first build for a given path pair reads from storage,
    /// every later build reuses the same in-memory artifacts.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactLoad`](crate::error::SentimentError::ArtifactLoad)
    /// if either artifact is missing, corrupt, or the pair is incompatible.
    /// A pipeline is never produced from partial artifacts.
    pub fn build(self) -> Result<SentimentPipeline<M>>
    where
        M: Clone + Send + Sync + 'static,
        M::Options: ModelOptions + Clone,
    {
        let key = self.options.cache_key();

        let model = global_cache().get_or_create(&key, || M::new(self.options.clone()))?;
        let vectorizer =
            global_cache().get_or_create(&key, || M::get_vectorizer(self.options.clone()))?;

        model.check_vectorizer(&vectorizer)?;

        Ok(SentimentPipeline { model, vectorizer })
    }
}

impl SentimentPipelineBuilder<LinearSentimentModel> {
    /// Creates a builder for a pre-trained linear classifier and its
    /// paired TF-IDF vectorizer.
    pub fn linear(paths: ArtifactPaths) -> Self {
        Self::new(paths)
    }
}
