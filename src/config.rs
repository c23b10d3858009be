use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{MandalaError, Result};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_MS: u64 = 120_000;
const MAX_TIMEOUT_MS: u64 = 600_000;

/// Main configuration structure loaded from mandala_mind.toml and environment variables
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub export: ExportConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Generative model endpoint settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    pub name: String,
    pub api_base: String,
    pub timeout_ms: u64,
    pub temperature: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            temperature: 0.7,
        }
    }
}

/// Where exported files land
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub api_key: Option<String>,
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            log_level: "mandala_mind=info".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Load runtime configuration from environment variables
    pub fn load_from_env() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY")
                .or_else(|_| std::env::var("API_KEY"))
                .ok()
                .filter(|k| !k.trim().is_empty()),
            log_level: std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "mandala_mind=info".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            export: ExportConfig::default(),
            runtime: RuntimeConfig::default(),
        }
    }
}

/// `.env` file to read: `MANDALA_ENV_FILE` when set, otherwise `./.env`
fn env_file_path(override_path: Option<String>) -> PathBuf {
    override_path
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".env"))
}

/// Load the `.env` file into the process environment. Variables that are
/// already set win. Safe to call more than once.
pub fn load_env_file() {
    let path = env_file_path(std::env::var("MANDALA_ENV_FILE").ok());
    let _ = dotenvy::from_path(path);
}

impl Config {
    /// Load configuration from TOML file and environment variables.
    /// Uses MANDALA_MIND_CONFIG or defaults to "mandala_mind.toml".
    pub fn load() -> Result<Self> {
        load_env_file();

        let config_path = std::env::var("MANDALA_MIND_CONFIG")
            .unwrap_or_else(|_| "mandala_mind.toml".to_string());

        let mut config: Config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            Self::from_toml(&content)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides();
        config.runtime = RuntimeConfig::load_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Parse the file portion of the configuration
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            tracing::debug!("GEMINI_MODEL env override applied");
            self.model.name = model;
        }
        if let Ok(base) = std::env::var("GEMINI_API_BASE") {
            tracing::debug!("GEMINI_API_BASE env override applied");
            self.model.api_base = base;
        }
        if let Some(timeout) = std::env::var("GEMINI_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            self.model.timeout_ms = timeout;
        }
        if let Ok(dir) = std::env::var("MANDALA_OUTPUT_DIR") {
            self.export.output_dir = PathBuf::from(dir);
        }
    }

    /// Validate and clamp loaded values
    pub fn validate(&mut self) -> Result<()> {
        if self.model.name.trim().is_empty() {
            return Err(MandalaError::Config {
                message: "model.name must not be empty".to_string(),
            });
        }
        let api_base = &self.model.api_base;
        if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
            return Err(MandalaError::Config {
                message: format!(
                    "model.api_base '{}' must start with http:// or https://",
                    self.model.api_base
                ),
            });
        }
        self.model.api_base = self.model.api_base.trim_end_matches('/').to_string();

        if self.model.timeout_ms == 0 {
            self.model.timeout_ms = DEFAULT_TIMEOUT_MS;
        } else if self.model.timeout_ms > MAX_TIMEOUT_MS {
            tracing::warn!(
                "timeout_ms {} exceeds max {}, clamping",
                self.model.timeout_ms,
                MAX_TIMEOUT_MS
            );
            self.model.timeout_ms = MAX_TIMEOUT_MS;
        }

        if !(0.0..=2.0).contains(&self.model.temperature) {
            tracing::warn!(
                "temperature {} outside 0.0..=2.0, clamping",
                self.model.temperature
            );
            self.model.temperature = self.model.temperature.clamp(0.0, 2.0);
        }
        Ok(())
    }
}
