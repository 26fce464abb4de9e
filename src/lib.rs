//! Sentiment analysis over pre-trained text-classifier artifacts.
//!
//! Loads a fitted TF-IDF vectorizer and a fitted linear classifier from
//! JSON artifacts on disk (once per process) and classifies free-form text
//! as positive, negative, or neutral with a confidence percentage.

#![deny(missing_docs)]

// ============ Internal API ============

pub(crate) mod models;
pub(crate) mod pipelines;

// ============ Public API ============

pub mod artifacts;
pub mod error;

pub use pipelines::{cache, sentiment};
