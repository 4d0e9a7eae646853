use crate::media::UploadLimits;
use crate::media::loader::{DEFAULT_ACCEPTED_MIME_TYPES, DEFAULT_MAX_IMAGE_BYTES};
use crate::providers::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use anyhow::{Context, Result, bail};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory - computed from home, not serialized
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Overall request timeout in seconds. Unset means requests run to
    /// completion.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

fn default_model() -> String {
    DEFAULT_MODEL.into()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

// ── Catalog (upload limits) ───────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Largest accepted design image, in bytes (default: 2 MiB)
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
    /// Image MIME types accepted for new designs
    #[serde(default = "default_accepted_mime_types")]
    pub accepted_mime_types: Vec<String>,
}

fn default_max_image_bytes() -> u64 {
    DEFAULT_MAX_IMAGE_BYTES
}

fn default_accepted_mime_types() -> Vec<String> {
    DEFAULT_ACCEPTED_MIME_TYPES
        .iter()
        .map(ToString::to_string)
        .collect()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: default_max_image_bytes(),
            accepted_mime_types: default_accepted_mime_types(),
        }
    }
}

impl CatalogConfig {
    pub fn upload_limits(&self) -> UploadLimits {
        UploadLimits {
            max_image_bytes: self.max_image_bytes,
            accepted_mime_types: self.accepted_mime_types.clone(),
        }
    }
}

fn home_data_dir() -> PathBuf {
    let home = UserDirs::new().map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf());
    home.join(".handloom")
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = home_data_dir();

        Self {
            config_path: data_dir.join("config.toml"),
            data_dir,
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: None,
            catalog: CatalogConfig::default(),
        }
    }
}

impl Config {
    /// Directory holding the persisted catalog entries.
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            bail!(
                "temperature must be between 0.0 and 2.0 (got {})",
                self.temperature
            );
        }
        if self.catalog.max_image_bytes == 0 {
            bail!("catalog.max_image_bytes must be greater than zero");
        }
        if self.model.trim().is_empty() {
            bail!("model cannot be empty");
        }
        Ok(())
    }

    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Self::load_or_init_in(&home.join(".handloom"))
    }

    /// Load `config.toml` from `data_dir`, writing defaults on first run.
    pub fn load_or_init_in(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join("config.toml");

        if !data_dir.exists() {
            fs::create_dir_all(data_dir).context("Failed to create .handloom directory")?;
        }

        if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            config.config_path = config_path;
            config.data_dir = data_dir.to_path_buf();
            config.validate()?;
            Ok(config)
        } else {
            let config = Self {
                config_path,
                data_dir: data_dir.to_path_buf(),
                ..Self::default()
            };
            config.validate()?;
            config.save()?;
            Ok(config)
        }
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("HANDLOOM_API_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .or_else(|_| std::env::var("API_KEY"))
        {
            if !key.is_empty() {
                self.api_key = Some(key);
            }
        }

        if let Ok(model) = std::env::var("HANDLOOM_MODEL") {
            if !model.is_empty() {
                self.model = model;
            }
        }

        if let Ok(data_dir) = std::env::var("HANDLOOM_DATA_DIR") {
            if !data_dir.is_empty() {
                self.data_dir = PathBuf::from(data_dir);
            }
        }

        if let Ok(base_url) = std::env::var("HANDLOOM_API_BASE_URL") {
            if !base_url.is_empty() {
                self.api_base_url = base_url;
            }
        }

        if let Ok(temp_str) = std::env::var("HANDLOOM_TEMPERATURE") {
            if let Ok(temp) = temp_str.parse::<f64>() {
                if (0.0..=2.0).contains(&temp) {
                    self.temperature = temp;
                }
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
