//! Analyze a tweet from the command line.
//!
//! Expects the two artifact files next to the working directory:
//! `trained_model.json` and `tfidf_vectorizer.json`. With no argument,
//! runs two sample tweets.
//!
//! ```text
//! cargo run --example analyze -- "I absolutely love this product!"
//! ```

use tweetscope::artifacts::ArtifactPaths;
use tweetscope::error::Result;
use tweetscope::sentiment::{LinearSentimentModel, SentimentPipeline, SentimentPipelineBuilder};

const SAMPLES: &[&str] = &[
    "I absolutely love this product! Totally worth it.",
    "This is the worst experience I have ever had.",
];

fn print_analysis(pipeline: &SentimentPipeline<LinearSentimentModel>, text: &str) -> Result<()> {
    let output = pipeline.run(text)?;
    let p = output.prediction;

    println!("tweet:      {}", p.text.trim());
    println!("sentiment:  {}", p.label);
    println!("confidence: {:.1}%", p.confidence);
    if let Some(breakdown) = p.breakdown {
        for (label, pct) in breakdown {
            println!("    {label:<8} {pct:5.1}%");
        }
    }
    println!();
    Ok(())
}

fn main() -> Result<()> {
    let paths = ArtifactPaths::new("trained_model.json", "tfidf_vectorizer.json");
    let pipeline = SentimentPipelineBuilder::linear(paths).build()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        for sample in SAMPLES {
            print_analysis(&pipeline, sample)?;
        }
    } else {
        print_analysis(&pipeline, &args.join(" "))?;
    }

    Ok(())
}
