//! Candidate/job matching engine.
//!
//! Raw résumé or job-posting text goes through `nlp` to become a `FeatureSet`;
//! `matching` scores (candidate, job) bundles and ranks batches of them. The
//! HTTP host in `routes` is a thin JSON layer over the same calls.

pub mod config;
pub mod errors;
pub mod matching;
pub mod models;
pub mod nlp;
pub mod routes;
pub mod state;

pub use matching::ranking::{rank_candidates, rank_jobs, RankEntry, RankError, Ranked};
pub use matching::scoring::{MatchError, MatchResult, Matcher};
pub use models::document::{AnalyzedDocument, DocumentBundle, FeatureSet, SkillSet};
pub use nlp::extraction::{analyze_document, extract_features};
pub use nlp::keywords::{load_keyword_dictionary, DictionaryError, KeywordDictionary, SkillCategory};
pub use nlp::normalize::normalize;
