use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL the local-corpus source fetches `<slug>.json` from.
    pub corpus_base_url: String,
    /// Hard deadline for one corpus lookup.
    pub corpus_timeout_ms: u64,
    /// Artificial latency of the built-in sample source.
    pub sample_delay_ms: u64,
    pub db_path: String,
    pub user_agent: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Config {
            corpus_base_url: "http://localhost:8000/data".to_string(),
            corpus_timeout_ms: 1500,
            sample_delay_ms: 300,
            db_path: "bijia.db".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36".to_string(),
        };

        if let Ok(url) = std::env::var("BIJIA_CORPUS_URL") {
            config.corpus_base_url = url;
        }
        if let Ok(path) = std::env::var("BIJIA_DB") {
            config.db_path = path;
        }

        Ok(config)
    }
}
