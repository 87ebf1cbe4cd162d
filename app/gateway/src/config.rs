//! Gateway configuration loaded from TOML.

use anyhow::{Context, Result, bail};
use memory::MIN_WINDOW;
use openai::Model;
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Config directory name under platform config dir.
pub const CONFIG_DIR: &str = "memorybot";
/// Config file name inside the config directory.
pub const CONFIG_FILE: &str = "memorybot.toml";
/// Largest accepted memory window.
pub const MAX_WINDOW: usize = 1000;

/// Config written by `memorybot init` and used when no file exists.
pub const DEFAULT_CONFIG: &str = r#"[server]
host = "127.0.0.1"
port = 8501

[llm]
model = "gpt-3.5-turbo"
api_key = "${OPENAI_API_KEY}"
timeout_secs = 60

[memory]
window = 3
"#;

/// Resolve the global configuration directory (`~/.config/memorybot/` on unix).
pub fn global_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR))
        .context("no platform config directory")
}

/// Top-level configuration.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryBotConfig {
    /// Server bind configuration.
    pub server: ServerConfig,
    /// Completion API configuration.
    pub llm: LlmConfig,
    /// Memory adapter configuration.
    pub memory: MemoryConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8501,
        }
    }
}

/// Completion API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Initially selected model.
    pub model: Model,
    /// API key (supports `${ENV_VAR}` expansion). May be left empty and
    /// entered in the page instead.
    pub api_key: String,
    /// Optional API base override, e.g. `https://api.openai.com/v1`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Upper bound on one chat turn, in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: Model::default(),
            api_key: String::new(),
            base_url: None,
            timeout_secs: 60,
        }
    }
}

impl LlmConfig {
    /// The turn timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Memory adapter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Number of recent turns folded into each prompt (K).
    pub window: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            window: memory::DEFAULT_WINDOW,
        }
    }
}

impl MemoryBotConfig {
    /// Parse a TOML string, expanding environment variables first.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let expanded = crate::utils::expand_env_vars(toml_str);
        let config: Self = toml::from_str(&expanded)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Check value ranges serde cannot express.
    pub fn validate(&self) -> Result<()> {
        validate_window(self.memory.window)?;
        if self.llm.timeout_secs == 0 {
            bail!("llm.timeout_secs must be positive");
        }
        Ok(())
    }

    /// The `host:port` address to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Check a memory window against the accepted range.
pub fn validate_window(window: usize) -> Result<()> {
    if !(MIN_WINDOW..=MAX_WINDOW).contains(&window) {
        bail!("memory window must be between {MIN_WINDOW} and {MAX_WINDOW}, got {window}");
    }
    Ok(())
}

/// Resolve the configuration to run with.
///
/// Uses the explicit path when given, else the global config file when it
/// exists, else [`DEFAULT_CONFIG`].
pub fn resolve_config(explicit: Option<&Path>) -> Result<MemoryBotConfig> {
    if let Some(path) = explicit {
        let config = MemoryBotConfig::load(path)?;
        tracing::info!("loaded configuration from {}", path.display());
        return Ok(config);
    }

    let path = global_config_dir()?.join(CONFIG_FILE);
    if path.exists() {
        let config = MemoryBotConfig::load(&path)?;
        tracing::info!("loaded configuration from {}", path.display());
        return Ok(config);
    }

    tracing::info!("no config file found, using defaults");
    MemoryBotConfig::from_toml(DEFAULT_CONFIG)
}

/// Write the default config file into `config_dir` unless one exists.
///
/// Returns the path of the config file.
pub fn scaffold_config_dir(config_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(config_dir)
        .with_context(|| format!("failed to create {}", config_dir.display()))?;

    let path = config_dir.join(CONFIG_FILE);
    if path.exists() {
        tracing::info!("config already exists at {}", path.display());
        return Ok(path);
    }

    std::fs::write(&path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!("wrote default config to {}", path.display());
    Ok(path)
}
