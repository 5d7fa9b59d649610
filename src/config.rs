use crate::error::AppError;
use std::env;
use std::path::PathBuf;

/// Ranked Solo/Duo on Summoner's Rift.
pub const RANKED_SOLO_QUEUE_ID: u32 = 420;
pub const DEFAULT_REGION: &str = "euw1";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    /// Platform id such as `euw1` or `na1`.
    pub region: String,
    pub queue_id: u32,
    pub benchmarks_path: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, `from_env` uses the process
    /// environment after loading `.env`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("RIOT_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                AppError::ConfigError("RIOT_API_KEY not found in environment or .env file".to_string())
            })?;

        let region = lookup("RIOT_REGION")
            .map(|r| r.trim().to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let queue_id = match lookup("COACHDIFF_QUEUE_ID") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                AppError::ConfigError(format!("COACHDIFF_QUEUE_ID is not a queue id: {}", raw))
            })?,
            None => RANKED_SOLO_QUEUE_ID,
        };

        Ok(Config {
            api_key,
            region,
            queue_id,
            benchmarks_path: lookup("COACHDIFF_BENCHMARKS").map(PathBuf::from),
            cache_dir: lookup("COACHDIFF_CACHE_DIR").map(PathBuf::from),
        })
    }
}
