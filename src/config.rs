use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

/// Which side of the sync wins the first paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStrategy {
    /// Seed from snapshot/defaults, then block `load()` on the remote fetch.
    RemoteFirst,
    /// Seed from snapshot/defaults and return immediately; refresh from the
    /// remote in the background.
    LocalFirst,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub remote_base_url: String,
    pub request_timeout: Duration,
    pub debounce: Duration,
    pub load_strategy: LoadStrategy,
    pub data_dir: PathBuf,
    pub uploads_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            remote_base_url: "http://localhost:3000".to_string(),
            request_timeout: Duration::from_secs(10),
            debounce: Duration::from_millis(2000),
            load_strategy: LoadStrategy::RemoteFirst,
            data_dir: default_data_dir(),
            uploads_prefix: "/uploads/".to_string(),
        }
    }
}

impl EngineConfig {
    /// Builds the configuration from `INNKEEP_*` environment variables,
    /// falling back to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("INNKEEP_REMOTE_URL") {
            config.remote_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(ms) = env_u64("INNKEEP_DEBOUNCE_MS") {
            config.debounce = Duration::from_millis(ms);
        }
        if let Some(secs) = env_u64("INNKEEP_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Ok(strategy) = std::env::var("INNKEEP_STRATEGY") {
            config.load_strategy = match strategy.to_ascii_lowercase().as_str() {
                "local-first" | "local_first" | "local" => LoadStrategy::LocalFirst,
                "remote-first" | "remote_first" | "remote" => LoadStrategy::RemoteFirst,
                other => {
                    warn!("unknown INNKEEP_STRATEGY {other:?}, using remote-first");
                    LoadStrategy::RemoteFirst
                }
            };
        }
        if let Ok(dir) = std::env::var("INNKEEP_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(prefix) = std::env::var("INNKEEP_UPLOADS_PREFIX") {
            config.uploads_prefix = prefix;
        }
        config
    }
}

fn env_u64(key: &str) -> Option<u64> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("invalid {key} value {raw:?}: {err}");
            None
        }
    }
}

pub fn default_data_dir() -> PathBuf {
    let mut cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    cwd.push(".innkeep");
    cwd
}
