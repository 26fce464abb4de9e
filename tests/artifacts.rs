//! Integration tests for artifact loading: startup failures and the
//! load-once guarantee.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use tweetscope::artifacts::ArtifactPaths;
use tweetscope::error::SentimentError;
use tweetscope::sentiment::{Sentiment, SentimentPipelineBuilder};

const VECTORIZER_JSON: &str = r#"{
    "vocabulary": {"love": 0, "worst": 1},
    "idf": [1.0, 1.0]
}"#;

const CLASSIFIER_JSON: &str = r#"{
    "family": "logistic_regression",
    "classes": [0, 1],
    "coef": [[3.0, -3.0]],
    "intercept": [0.0]
}"#;

fn write_artifacts(dir: &Path) -> ArtifactPaths {
    let classifier = dir.join("trained_model.json");
    let vectorizer = dir.join("tfidf_vectorizer.json");
    fs::write(&classifier, CLASSIFIER_JSON).unwrap();
    fs::write(&vectorizer, VECTORIZER_JSON).unwrap();
    ArtifactPaths::new(classifier, vectorizer)
}

#[test]
fn missing_classifier_fails_at_build() {
    let dir = TempDir::new().unwrap();
    let vectorizer = dir.path().join("tfidf_vectorizer.json");
    fs::write(&vectorizer, VECTORIZER_JSON).unwrap();

    let paths = ArtifactPaths::new(dir.path().join("nonexistent.json"), vectorizer);
    let err = SentimentPipelineBuilder::linear(paths).build().unwrap_err();
    assert!(matches!(err, SentimentError::ArtifactLoad(_)));
}

#[test]
fn missing_vectorizer_fails_at_build() {
    let dir = TempDir::new().unwrap();
    let classifier = dir.path().join("trained_model.json");
    fs::write(&classifier, CLASSIFIER_JSON).unwrap();

    let paths = ArtifactPaths::new(classifier, dir.path().join("nonexistent.json"));
    let err = SentimentPipelineBuilder::linear(paths).build().unwrap_err();
    assert!(matches!(err, SentimentError::ArtifactLoad(_)));
}

#[test]
fn corrupt_classifier_fails_at_build() {
    let dir = TempDir::new().unwrap();
    let classifier = dir.path().join("trained_model.json");
    let vectorizer = dir.path().join("tfidf_vectorizer.json");
    fs::write(&classifier, "not json at all").unwrap();
    fs::write(&vectorizer, VECTORIZER_JSON).unwrap();

    let paths = ArtifactPaths::new(classifier, vectorizer);
    let err = SentimentPipelineBuilder::linear(paths).build().unwrap_err();
    assert!(matches!(err, SentimentError::ArtifactLoad(_)));
}

#[test]
fn feature_dimension_mismatch_fails_at_build() {
    let dir = TempDir::new().unwrap();
    let classifier = dir.path().join("trained_model.json");
    let vectorizer = dir.path().join("tfidf_vectorizer.json");
    // Classifier fitted on 3 features, vectorizer produces 2.
    fs::write(
        &classifier,
        r#"{
            "family": "logistic_regression",
            "classes": [0, 1],
            "coef": [[1.0, -1.0, 0.5]],
            "intercept": [0.0]
        }"#,
    )
    .unwrap();
    fs::write(&vectorizer, VECTORIZER_JSON).unwrap();

    let paths = ArtifactPaths::new(classifier, vectorizer);
    let err = SentimentPipelineBuilder::linear(paths).build().unwrap_err();
    assert!(matches!(err, SentimentError::ArtifactLoad(_)));
}

#[test]
fn unsupported_class_count_fails_at_build() {
    let dir = TempDir::new().unwrap();
    let classifier = dir.path().join("trained_model.json");
    let vectorizer = dir.path().join("tfidf_vectorizer.json");
    fs::write(
        &classifier,
        r#"{
            "family": "logistic_regression",
            "classes": [0, 1, 2, 3],
            "coef": [[1.0, -1.0], [0.5, 0.5], [0.0, 1.0], [1.0, 0.0]],
            "intercept": [0.0, 0.0, 0.0, 0.0]
        }"#,
    )
    .unwrap();
    fs::write(&vectorizer, VECTORIZER_JSON).unwrap();

    let paths = ArtifactPaths::new(classifier, vectorizer);
    let err = SentimentPipelineBuilder::linear(paths).build().unwrap_err();
    assert!(matches!(err, SentimentError::ArtifactLoad(_)));
}

#[test]
fn artifacts_load_once_per_process() {
    let dir = TempDir::new().unwrap();
    let paths = write_artifacts(dir.path());

    let pipeline = SentimentPipelineBuilder::linear(paths.clone())
        .build()
        .unwrap();
    let before = pipeline.run("love").unwrap();
    assert_eq!(before.prediction.label, Sentiment::Positive);

    // Corrupt both files on disk. A rebuild from the same paths must keep
    // serving the memoized artifacts without touching storage again.
    fs::write(&paths.classifier, "garbage").unwrap();
    fs::write(&paths.vectorizer, "garbage").unwrap();

    let rebuilt = SentimentPipelineBuilder::linear(paths).build().unwrap();
    let after = rebuilt.run("love").unwrap();
    assert_eq!(after.prediction.label, before.prediction.label);
    assert_eq!(after.prediction.confidence, before.prediction.confidence);
}

#[test]
fn distinct_paths_are_distinct_cache_entries() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    let paths_a = write_artifacts(dir_a.path());

    // Same vectorizer, inverted classifier weights.
    let classifier_b = dir_b.path().join("trained_model.json");
    let vectorizer_b = dir_b.path().join("tfidf_vectorizer.json");
    fs::write(
        &classifier_b,
        r#"{
            "family": "logistic_regression",
            "classes": [0, 1],
            "coef": [[-3.0, 3.0]],
            "intercept": [0.0]
        }"#,
    )
    .unwrap();
    fs::write(&vectorizer_b, VECTORIZER_JSON).unwrap();
    let paths_b = ArtifactPaths::new(classifier_b, vectorizer_b);

    let pipeline_a = SentimentPipelineBuilder::linear(paths_a).build().unwrap();
    let pipeline_b = SentimentPipelineBuilder::linear(paths_b).build().unwrap();

    assert_eq!(
        pipeline_a.run("love").unwrap().prediction.label,
        Sentiment::Positive
    );
    assert_eq!(
        pipeline_b.run("love").unwrap().prediction.label,
        Sentiment::Negative
    );
}

#[test]
fn failed_build_does_not_poison_later_loads() {
    let dir = TempDir::new().unwrap();
    let classifier = dir.path().join("trained_model.json");
    let vectorizer = dir.path().join("tfidf_vectorizer.json");
    fs::write(&vectorizer, VECTORIZER_JSON).unwrap();

    // First attempt: classifier file absent.
    let paths = ArtifactPaths::new(&classifier, &vectorizer);
    assert!(SentimentPipelineBuilder::linear(paths.clone())
        .build()
        .is_err());

    // Once the file exists, the same paths build fine.
    fs::write(&classifier, CLASSIFIER_JSON).unwrap();
    let pipeline = SentimentPipelineBuilder::linear(paths).build().unwrap();
    assert_eq!(
        pipeline.run("love").unwrap().prediction.label,
        Sentiment::Positive
    );
}
