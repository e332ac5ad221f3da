/// Client configuration
///
/// Configuration is stored as TOML in the user's config directory.
/// Default location: ~/.config/ocr-transcriptor/config.toml
///
/// ```toml
/// api_url = "https://ocr.example.org"
/// languages = ["es", "en"]
/// request_timeout_secs = 300
///
/// [defaults]
/// profile = "HISTORICOS"
/// language = "es"
/// ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::state::options::ProcessingOptions;

/// Environment variable overriding `api_url`
pub const API_URL_ENV: &str = "OCR_TRANSCRIPTOR_API_URL";

/// Backend address used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the OCR backend (without the `/process` path)
    pub api_url: String,
    /// Options preselected in the profile/language pickers
    pub defaults: ProcessingOptions,
    /// Languages offered in the language picker
    pub languages: Vec<String>,
    /// Upper bound for one request; unset keeps waiting indefinitely
    pub request_timeout_secs: Option<u64>,
    /// Folder proposed by the "download" dialog
    pub download_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            defaults: ProcessingOptions::default(),
            languages: vec!["es".to_string(), "en".to_string()],
            request_timeout_secs: None,
            download_dir: None,
        }
    }
}

impl AppConfig {
    /// Request timeout, if one is configured (0 means none)
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Configured download folder, or the user's Downloads folder
    pub fn download_dir(&self) -> Option<PathBuf> {
        self.download_dir.clone().or_else(dirs::download_dir)
    }

    /// Replace `api_url` when an override is present and non-blank
    pub fn apply_api_url_override(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
            tracing::info!(%url, "api_url overridden from environment");
            self.api_url = url;
        }
    }
}

/// Get the default config file path
///
/// Returns: ~/.config/ocr-transcriptor/config.toml
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("ocr-transcriptor")
        .join("config.toml")
}

/// Parse configuration from TOML text
pub fn parse_config(contents: &str) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str(contents)?)
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&contents)
}

/// Load configuration from a TOML file
///
/// If the file doesn't exist, returns default config.
/// If the file exists but is invalid, logs a warning and returns default config.
pub fn load_config(path: &Path) -> AppConfig {
    if !path.exists() {
        tracing::info!("No config file at {:?}, using defaults", path);
        return AppConfig::default();
    }

    match read_config(path) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?} (api_url: {})", path, config.api_url);
            config
        }
        Err(e) => {
            tracing::warn!("{}, using defaults", e);
            AppConfig::default()
        }
    }
}

/// Load the config file from its default location and apply the
/// environment override
pub fn load() -> AppConfig {
    let mut config = load_config(&default_config_path());
    config.apply_api_url_override(std::env::var(API_URL_ENV).ok());
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.defaults.profile, "HISTORICOS");
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_config(
            r#"
            api_url = "https://ocr.example.org"
            request_timeout_secs = 90

            [defaults]
            language = "en"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_url, "https://ocr.example.org");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(90)));
        assert_eq!(config.defaults.profile, "HISTORICOS");
        assert_eq!(config.defaults.language, "en");
        assert_eq!(config.languages, vec!["es", "en"]);
    }

    #[test]
    fn test_zero_timeout_means_unbounded() {
        let config = parse_config("request_timeout_secs = 0").unwrap();
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = [not toml").unwrap();

        assert_eq!(load_config(&path), AppConfig::default());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_config(&dir.path().join("absent.toml")), AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "download_dir = \"/tmp/transcripts\"").unwrap();

        let config = load_config(&path);
        assert_eq!(config.download_dir(), Some(PathBuf::from("/tmp/transcripts")));
    }

    #[test]
    fn test_api_url_override() {
        let mut config = AppConfig::default();
        config.apply_api_url_override(Some("   ".into()));
        assert_eq!(config.api_url, DEFAULT_API_URL);

        config.apply_api_url_override(Some("http://10.0.0.2:5000".into()));
        assert_eq!(config.api_url, "http://10.0.0.2:5000");
    }
}
