use std::sync::Arc;

use crate::config::Config;
use crate::matching::scoring::Matcher;
use crate::nlp::keywords::KeywordDictionary;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup; read-only for the life of the process.
    pub dictionary: Arc<KeywordDictionary>,
    pub matcher: Arc<Matcher>,
    pub config: Config,
}

impl AppState {
    pub fn new(dictionary: KeywordDictionary, config: Config) -> Self {
        let matcher = Matcher::new(&dictionary);
        Self {
            dictionary: Arc::new(dictionary),
            matcher: Arc::new(matcher),
            config,
        }
    }
}
