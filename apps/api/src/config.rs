use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Scoring weights and band thresholds are not environment-driven; they live
/// in `engine::EngineConfig` so tests can construct variants directly.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Optional fixed seed for the session question draw. Unset in production
    /// (entropy-seeded); set for reproducible runs.
    pub question_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let question_seed = match std::env::var("QUESTION_SEED") {
            Ok(raw) => Some(
                raw.parse::<u64>()
                    .context("QUESTION_SEED must be a valid u64")?,
            ),
            Err(_) => None,
        };

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            question_seed,
        })
    }
}
