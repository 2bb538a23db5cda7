// Matching engine: per-pair scoring, batch ranking, and the HTTP handlers that expose them.
// Scoring never touches the extractor; it only consumes FeatureSets and full texts.

pub mod handlers;
pub mod ranking;
pub mod scoring;
