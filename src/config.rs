use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ReverieConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub ai: AiConfig,
    pub prompts: PromptsConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Key/value file standing in for browser-local storage.
    pub fallback_path: String,
    /// Key holding the serialized entry collection.
    pub fallback_key: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AiConfig {
    /// Base URL of an OpenAI-compatible API; `/chat/completions` is appended.
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PromptsConfig {
    pub quote_url: String,
}

impl Default for ReverieConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            ai: AiConfig::default(),
            prompts: PromptsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 4870,
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let fallback_path = default_reverie_dir()
            .join("local-storage.json")
            .to_string_lossy()
            .into_owned();
        Self {
            fallback_path,
            fallback_key: "journalEntries".into(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://models.inference.ai.azure.com".into(),
            model: "Llama-3.3-70B-Instruct".into(),
            api_key: None,
        }
    }
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            quote_url: "https://api.quotable.io/random".into(),
        }
    }
}

/// Returns `~/.reverie/`, or `./.reverie/` when no home directory is known.
pub fn default_reverie_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".reverie")
}

/// Returns the default config file path: `~/.reverie/config.toml`
pub fn default_config_path() -> PathBuf {
    default_reverie_dir().join("config.toml")
}

impl ReverieConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            ReverieConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides.
    ///
    /// `REVERIE_AI_KEY` wins over `GITHUB_TOKEN`; the latter is accepted because
    /// the default endpoint authenticates with a GitHub token.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("REVERIE_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("REVERIE_FALLBACK") {
            self.storage.fallback_path = val;
        }
        if let Ok(val) = std::env::var("REVERIE_AI_ENDPOINT") {
            self.ai.endpoint = val;
        }
        if let Ok(val) = std::env::var("REVERIE_AI_MODEL") {
            self.ai.model = val;
        }
        if let Ok(val) = std::env::var("REVERIE_QUOTE_URL") {
            self.prompts.quote_url = val;
        }
        if let Ok(val) = std::env::var("REVERIE_AI_KEY") {
            self.ai.api_key = Some(val);
        } else if self.ai.api_key.is_none() {
            if let Ok(val) = std::env::var("GITHUB_TOKEN") {
                self.ai.api_key = Some(val);
            }
        }
    }

    /// Resolve the fallback store path, expanding `~` if needed.
    pub fn resolved_fallback_path(&self) -> PathBuf {
        expand_tilde(&self.storage.fallback_path)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
