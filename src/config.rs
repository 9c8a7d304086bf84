use std::env;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
pub struct Config {
    pub db_path: String,
    /// Fixed seed for NMF initialization. Unset means OS entropy — runs
    /// are then only as reproducible as the factorization itself.
    pub nmf_seed: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let nmf_seed = match env::var("WINNOWER_NMF_SEED") {
            Ok(raw) => Some(raw.parse().map_err(|_| {
                anyhow::anyhow!("WINNOWER_NMF_SEED must be an integer, got {raw:?}")
            })?),
            Err(_) => None,
        };

        Ok(Self {
            db_path: env::var("WINNOWER_DB_PATH").unwrap_or_else(|_| "./winnower.db".to_string()),
            nmf_seed,
        })
    }
}
