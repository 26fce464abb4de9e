use crate::artifacts::TfidfVectorizer;
use crate::error::{Result, SentimentError};
use crate::pipelines::stats::PipelineStats;

use super::label::{LabelScheme, Sentiment};
use super::model::SentimentModel;

// ============ Output types ============

/// A sentiment prediction for one input text.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// The predicted sentiment.
    pub label: Sentiment,
    /// Confidence in the predicted label, as a percentage in `0..=100`.
    pub confidence: f32,
    /// Percentage probability per label, in class-id order. Sums to ~100.
    /// `None` when the model has no probability interface (the fixed
    /// fallback confidence applies in that case).
    pub breakdown: Option<Vec<(Sentiment, f32)>>,
    /// The exact input text that produced this prediction, unmodified.
    pub text: String,
}

/// Single-text output from `run()`.
#[derive(Debug)]
pub struct Output {
    /// Sentiment prediction.
    pub prediction: Prediction,
    /// Execution statistics.
    pub stats: PipelineStats,
}

/// Single result in batch output.
#[derive(Debug)]
pub struct BatchResult {
    /// Input text.
    pub text: String,
    /// Prediction or error for this input.
    pub prediction: Result<Prediction>,
}

/// Batch output from `run()`.
#[derive(Debug)]
pub struct BatchOutput {
    /// Results for each input.
    pub results: Vec<BatchResult>,
    /// Execution statistics.
    pub stats: PipelineStats,
}

// ============ Input trait for type-based dispatch ============

#[doc(hidden)]
pub trait SentimentInput<'a> {
    /// Output type for `.run()`.
    type Output;

    #[doc(hidden)]
    fn into_texts(self) -> Vec<&'a str>;
    #[doc(hidden)]
    fn convert_output(
        texts: Vec<&'a str>,
        predictions: Vec<Result<Prediction>>,
        stats: PipelineStats,
    ) -> Result<Self::Output>;
}

impl<'a> SentimentInput<'a> for &'a str {
    type Output = Output;

    fn into_texts(self) -> Vec<&'a str> {
        vec![self]
    }

    fn convert_output(
        _texts: Vec<&'a str>,
        mut predictions: Vec<Result<Prediction>>,
        stats: PipelineStats,
    ) -> Result<Self::Output> {
        let prediction = predictions
            .pop()
            .ok_or_else(|| SentimentError::Unexpected("No predictions returned".into()))??;
        Ok(Output { prediction, stats })
    }
}

fn to_batch_output(
    texts: Vec<&str>,
    predictions: Vec<Result<Prediction>>,
    stats: PipelineStats,
) -> Result<BatchOutput> {
    let results = texts
        .into_iter()
        .zip(predictions)
        .map(|(text, prediction)| BatchResult {
            text: text.to_string(),
            prediction,
        })
        .collect();
    Ok(BatchOutput { results, stats })
}

impl<'a> SentimentInput<'a> for &'a [&'a str] {
    type Output = BatchOutput;

    fn into_texts(self) -> Vec<&'a str> {
        self.to_vec()
    }

    fn convert_output(
        texts: Vec<&'a str>,
        predictions: Vec<Result<Prediction>>,
        stats: PipelineStats,
    ) -> Result<Self::Output> {
        to_batch_output(texts, predictions, stats)
    }
}

impl<'a, const N: usize> SentimentInput<'a> for &'a [&'a str; N] {
    type Output = BatchOutput;

    fn into_texts(self) -> Vec<&'a str> {
        self.as_slice().to_vec()
    }

    fn convert_output(
        texts: Vec<&'a str>,
        predictions: Vec<Result<Prediction>>,
        stats: PipelineStats,
    ) -> Result<Self::Output> {
        to_batch_output(texts, predictions, stats)
    }
}

// ============ Pipeline ============

/// Classifies text sentiment against pre-trained artifacts.
///
/// Construct with [`SentimentPipelineBuilder`](super::SentimentPipelineBuilder).
/// Inference is pure, synchronous computation over artifacts already in
/// memory; a pipeline can be shared across threads freely.
///
/// # Examples
///
/// ```rust,no_run
/// # use tweetscope::artifacts::ArtifactPaths;
/// # use tweetscope::sentiment::SentimentPipelineBuilder;
/// # fn main() -> tweetscope::error::Result<()> {
/// let paths = ArtifactPaths::new("model.json", "tfidf_vectorizer.json");
/// let pipeline = SentimentPipelineBuilder::linear(paths).build()?;
///
/// // Single text - direct access
/// let output = pipeline.run("I absolutely love this product!")?;
/// println!("{}: {:.1}%", output.prediction.label, output.prediction.confidence);
///
/// // Batch - results include input text
/// let output = pipeline.run(&["Great!", "Terrible."])?;
/// for r in output.results {
///     println!("{} -> {}", r.text, r.prediction?.label);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SentimentPipeline<M: SentimentModel> {
    pub(crate) model: M,
    pub(crate) vectorizer: TfidfVectorizer,
}

impl<M: SentimentModel> SentimentPipeline<M> {
    /// Analyze text sentiment.
    ///
    /// Single input -> [`Output`], batch -> [`BatchOutput`].
    ///
    /// Whitespace-only input fails with
    /// [`EmptyInput`](SentimentError::EmptyInput); only a trimmed copy is
    /// inspected for the check, the model always sees the original text.
    pub fn run<'a, I: SentimentInput<'a>>(&self, input: I) -> Result<I::Output> {
        let stats_builder = PipelineStats::start();
        let texts = input.into_texts();
        let item_count = texts.len();

        // Pre-validate, then score only the valid items; errors keep
        // their original slots.
        let mut predictions: Vec<Option<Result<Prediction>>> =
            texts.iter().map(|_| None).collect();
        let mut valid_indices = Vec::with_capacity(texts.len());
        let mut valid_texts = Vec::with_capacity(texts.len());

        for (i, text) in texts.iter().enumerate() {
            if text.trim().is_empty() {
                predictions[i] = Some(Err(SentimentError::EmptyInput));
            } else {
                valid_indices.push(i);
                valid_texts.push(*text);
            }
        }

        if !valid_texts.is_empty() {
            let scored = self
                .model
                .predict_with_confidence_batch(&self.vectorizer, &valid_texts)?;
            for ((orig_idx, text), result) in
                valid_indices.into_iter().zip(&valid_texts).zip(scored)
            {
                predictions[orig_idx] = Some(result.map(|s| Prediction {
                    label: s.label,
                    confidence: s.confidence,
                    breakdown: s.breakdown,
                    text: text.to_string(),
                }));
            }
        }

        let predictions: Vec<Result<Prediction>> = predictions
            .into_iter()
            .map(|p| {
                p.unwrap_or_else(|| {
                    Err(SentimentError::Unexpected(
                        "prediction slot left unfilled".to_string(),
                    ))
                })
            })
            .collect();

        I::convert_output(texts, predictions, stats_builder.finish(item_count))
    }

    /// The label scheme of the loaded classifier. Callers can use this to
    /// know whether [`Sentiment::Neutral`] is a possible output.
    pub fn scheme(&self) -> LabelScheme {
        self.model.scheme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_output_echoes_input_texts() {
        let predictions = vec![
            Err(SentimentError::EmptyInput),
            Err(SentimentError::EmptyInput),
        ];
        let out = to_batch_output(
            vec!["  ", "\t"],
            predictions,
            PipelineStats::start().finish(2),
        )
        .unwrap();
        assert_eq!(out.results.len(), 2);
        assert_eq!(out.results[0].text, "  ");
        assert_eq!(out.results[1].text, "\t");
        assert_eq!(out.stats.items_processed, 2);
    }
}
