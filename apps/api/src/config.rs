use anyhow::{Context, Result};

/// Shipped dictionary, resolved against the crate directory so the server
/// starts from any working directory.
pub const DEFAULT_KEYWORDS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/keywords.json");

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON keyword dictionary. Startup fails if it is missing or unparsable.
    pub keywords_path: String,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on documents per ranking request.
    pub max_rank_batch: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            keywords_path: env_or("KEYWORDS_PATH", DEFAULT_KEYWORDS_PATH),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            max_rank_batch: env_or("MAX_RANK_BATCH", "500")
                .parse::<usize>()
                .context("MAX_RANK_BATCH must be a non-negative integer")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
