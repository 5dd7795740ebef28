use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Origin used when the page is opened from disk or from the IDE preview server.
pub const DEFAULT_API_ORIGIN: &str = "http://localhost:8080";

/// Port of the IDE built-in preview server, which does not serve the API.
pub const DEV_PREVIEW_PORT: u16 = 63342;

/// Environment variable that overrides every other origin setting.
pub const API_URL_ENV: &str = "CALTODO_API_URL";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Local storage mirror settings
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Explicit API origin, e.g. `http://localhost:8080`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// URL the planner page is served from; the API origin is derived from it
    /// when `base_url` is not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite file backing the local storage mirror
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Derive the API origin from the URL the page was opened from.
///
/// Pages opened from `file://` or from the IDE preview port talk to the local
/// backend; anything else is same-origin.
pub fn detect_api_origin(page_url: &str) -> String {
    let url = match Url::parse(page_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Unparseable page url {:?}: {}", page_url, e);
            return DEFAULT_API_ORIGIN.to_string();
        }
    };

    if url.scheme() == "file" || url.port() == Some(DEV_PREVIEW_PORT) {
        return DEFAULT_API_ORIGIN.to_string();
    }

    match url.origin() {
        origin @ url::Origin::Tuple(..) => origin.ascii_serialization(),
        url::Origin::Opaque(_) => DEFAULT_API_ORIGIN.to_string(),
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("caltodo");

        Self {
            config_dir,
            api: ApiConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, writing defaults there if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let mut config = Self::default();
            if let Some(parent) = path.parent() {
                config.config_dir = parent.to_path_buf();
            }
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration from the default location and validate it,
    /// creating the file with defaults if it doesn't exist
    ///
    /// Warnings are logged; errors fail the load.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config_path = Self::config_path()?;
        Self::load_validated_from(&config_path)
    }

    pub fn load_validated_from(path: &Path) -> Result<(Self, ValidationResult)> {
        let config = Self::load_from(path)?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if let Some(base_url) = &self.api.base_url {
            validate_url(base_url, "api.base_url", &mut result);
        }

        if let Some(page_url) = &self.api.page_url {
            if let Err(e) = Url::parse(page_url) {
                result.add_warning(
                    "api.page_url",
                    format!("Invalid URL, falling back to {}: {}", DEFAULT_API_ORIGIN, e),
                );
            }
        }

        if let Some(path) = &self.storage.path {
            if path.is_dir() {
                result.add_error(
                    "storage.path",
                    format!("Path is a directory: {}", path.display()),
                );
            }
        }

        result
    }

    /// Effective API origin, honoring the `CALTODO_API_URL` override
    pub fn api_origin(&self) -> String {
        self.resolve_api_origin(std::env::var(API_URL_ENV).ok())
    }

    /// Effective API origin given an explicit override
    pub fn resolve_api_origin(&self, env_override: Option<String>) -> String {
        let origin = env_override
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api.base_url.clone())
            .or_else(|| self.api.page_url.as_deref().map(detect_api_origin))
            .unwrap_or_else(|| DEFAULT_API_ORIGIN.to_string());

        origin.trim().trim_end_matches('/').to_string()
    }

    /// Path of the SQLite file backing local storage
    pub fn storage_path(&self) -> PathBuf {
        self.storage
            .path
            .clone()
            .unwrap_or_else(|| self.config_dir.join("planner.db"))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("caltodo");

        Ok(config_dir.join("config.toml"))
    }
}

fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }

            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }

            if url.port() == Some(0) {
                result.add_error(field_name, "Port cannot be 0");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}
