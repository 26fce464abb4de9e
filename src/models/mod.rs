pub(crate) mod linear;

pub use linear::LinearSentimentModel;
