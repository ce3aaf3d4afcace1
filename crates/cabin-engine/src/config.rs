//! Engine configuration: defaults, an optional JSON file, then environment
//! overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Settings for the interpreter, persistence and sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Key for the remote interpreter. No key means offline play.
    pub openai_api_key: Option<String>,
    /// Chat model name.
    pub openai_model: String,
    /// Base URL of an OpenAI-compatible API.
    pub api_base_url: String,
    /// Bound on one remote call.
    pub request_timeout_secs: u64,
    /// Verbose engine logging.
    pub debug_mode: bool,
    /// Where save slots live.
    pub save_directory: PathBuf,
    /// Interpretations kept in the cache.
    pub response_cache_size: usize,
    /// Health a new game starts with.
    pub max_health: i32,
    /// Fear at which the player is overwhelmed.
    pub max_fear: i32,
    /// Seed for wildlife placement. `None` draws from entropy.
    pub seed: Option<u64>,
    /// Idle websocket connections close after this long.
    pub session_idle_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: "gpt-4.1-mini".to_string(),
            api_base_url: "https://api.openai.com/v1".to_string(),
            request_timeout_secs: 8,
            debug_mode: false,
            save_directory: PathBuf::from("saves"),
            response_cache_size: crate::interpreter::cache::DEFAULT_CAPACITY,
            max_health: 100,
            max_fear: 100,
            seed: None,
            session_idle_secs: 600,
        }
    }
}

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl EngineConfig {
    /// Defaults, then `path` if given and present, then the process
    /// environment.
    pub fn load(path: Option<&Path>) -> EngineResult<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Like [`EngineConfig::load`] with an explicit environment lookup.
    pub fn load_with(
        path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> EngineResult<Self> {
        let config = match path {
            Some(path) if path.exists() => Self::from_file(path)?,
            _ => Self::default(),
        };
        config.with_env(env)
    }

    /// Read a JSON config file. Missing keys take defaults.
    pub fn from_file(path: &Path) -> EngineResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Apply environment overrides.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> EngineResult<Self> {
        let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(key) = env("OPENAI_API_KEY") {
            self.openai_api_key = Some(key);
        }
        if let Some(model) = env("OPENAI_MODEL") {
            self.openai_model = model;
        }
        if let Some(url) = env("OPENAI_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(secs) = env("CABIN_TIMEOUT_SECS") {
            self.request_timeout_secs = secs
                .trim()
                .parse()
                .map_err(|_| EngineError::Config(format!("CABIN_TIMEOUT_SECS={secs}")))?;
        }
        if let Some(debug) = env("CABIN_DEBUG") {
            self.debug_mode = truthy(&debug);
        }
        if let Some(dir) = env("CABIN_SAVE_DIR") {
            self.save_directory = PathBuf::from(dir);
        }
        if let Some(seed) = env("CABIN_SEED") {
            self.seed = Some(
                seed.trim()
                    .parse()
                    .map_err(|_| EngineError::Config(format!("CABIN_SEED={seed}")))?,
            );
        }
        Ok(self)
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    /// Drop the API key, forcing offline play.
    pub fn offline(mut self) -> Self {
        self.openai_api_key = None;
        self
    }

    /// Set the world seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the save directory.
    pub fn with_save_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_directory = dir.into();
        self
    }

    /// Remote call bound.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Websocket idle bound.
    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs.max(1))
    }

    /// Whether a remote interpreter can be built.
    pub fn has_remote(&self) -> bool {
        self.openai_api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }
}
