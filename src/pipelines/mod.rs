pub mod cache;
pub(crate) mod stats;

pub mod sentiment;
