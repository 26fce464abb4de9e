//! Sentiment analysis pipeline.
//!
//! Classify text as [`Sentiment::Positive`], [`Sentiment::Negative`], or
//! (with a ternary classifier) [`Sentiment::Neutral`]. Returns the
//! predicted label, a confidence percentage, and a per-label breakdown
//! when the classifier supports probabilistic output.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tweetscope::artifacts::ArtifactPaths;
//! use tweetscope::sentiment::SentimentPipelineBuilder;
//!
//! # fn main() -> tweetscope::error::Result<()> {
//! let paths = ArtifactPaths::new("trained_model.json", "tfidf_vectorizer.json");
//! let pipeline = SentimentPipelineBuilder::linear(paths).build()?;
//!
//! let output = pipeline.run("I absolutely love this product!")?;
//! println!(
//!     "sentiment: {} (confidence: {:.1}%)",
//!     output.prediction.label, output.prediction.confidence
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Batch Inference
//!
//! Analyze multiple texts at once (returns `BatchOutput`):
//!
//! ```rust,no_run
//! # use tweetscope::artifacts::ArtifactPaths;
//! # use tweetscope::sentiment::SentimentPipelineBuilder;
//! # fn main() -> tweetscope::error::Result<()> {
//! # let paths = ArtifactPaths::new("trained_model.json", "tfidf_vectorizer.json");
//! # let pipeline = SentimentPipelineBuilder::linear(paths).build()?;
//! let reviews = &[
//!     "Best purchase I've ever made!",
//!     "Terrible quality, very disappointed.",
//! ];
//!
//! let output = pipeline.run(reviews)?;
//!
//! for r in output.results {
//!     let p = r.prediction?;
//!     println!("{}: {} ({:.1}%)", r.text, p.label, p.confidence);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Artifacts
//!
//! A pipeline is built from two JSON artifact files fitted outside this
//! crate: a TF-IDF vectorizer and a linear classifier. Both are loaded
//! once per process and shared read-only between pipelines; see
//! [`crate::artifacts`].

// ============ Internal API ============

pub(crate) mod builder;
pub(crate) mod label;
pub(crate) mod model;
pub(crate) mod pipeline;

// ============ Public API ============

pub use crate::models::LinearSentimentModel;
pub use crate::pipelines::stats::PipelineStats;
pub use builder::SentimentPipelineBuilder;
pub use label::{LabelScheme, Sentiment};
pub use model::{Scored, SentimentModel, FALLBACK_CONFIDENCE};
pub use pipeline::{BatchOutput, BatchResult, Output, Prediction, SentimentPipeline};

#[doc(hidden)]
pub use pipeline::SentimentInput;
