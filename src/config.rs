use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Workspace directory - computed from home, not serialized
    #[serde(skip)]
    pub workspace_dir: PathBuf,
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// API key for the plan producer backend
    pub api_key: Option<String>,

    #[serde(default)]
    pub producer: ProducerConfig,

    #[serde(default)]
    pub browser: BrowserConfig,
}

// ── Plan producer ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProducerConfig {
    /// Chat-completions compatible endpoint base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model used to draft plans
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature for plan drafting
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}

fn default_model() -> String {
    "gpt-4o".into()
}

fn default_temperature() -> f64 {
    0.2
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
        }
    }
}

// ── Browser tool ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Maximum search results returned per query
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize {
    10
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace_dir: PathBuf::new(),
            config_path: PathBuf::new(),
            api_key: None,
            producer: ProducerConfig::default(),
            browser: BrowserConfig::default(),
        }
    }
}

impl Config {
    /// Load `~/.planline/config.toml`, creating the workspace and a default
    /// config on first run.
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let planline_dir = home.join(".planline");
        let config_path = planline_dir.join("config.toml");

        if !planline_dir.exists() {
            fs::create_dir_all(&planline_dir).context("Failed to create .planline directory")?;
            fs::create_dir_all(planline_dir.join("workspace"))
                .context("Failed to create workspace directory")?;
        }

        let mut config = if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            toml::from_str::<Config>(&contents).context("Failed to parse config file")?
        } else {
            let config = Config::default();
            fs::write(&config_path, toml::to_string_pretty(&config)?)
                .context("Failed to write default config")?;
            config
        };

        // Set computed paths that are skipped during serialization
        config.config_path = config_path;
        config.workspace_dir = planline_dir.join("workspace");
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to config
    pub fn apply_env_overrides(&mut self) {
        // API key: PLANLINE_API_KEY, falling back to OPENAI_API
        if let Ok(key) =
            std::env::var("PLANLINE_API_KEY").or_else(|_| std::env::var("OPENAI_API"))
            && !key.is_empty()
        {
            self.api_key = Some(key);
        }

        if let Ok(model) = std::env::var("PLANLINE_MODEL")
            && !model.is_empty()
        {
            self.producer.model = model;
        }
    }

    /// Directory where the memory tools persist their notes.
    pub fn memory_dir(&self) -> PathBuf {
        self.workspace_dir.join("memory")
    }
}
