use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_LOG_FILE_NAME, env_vars};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod user_prompts;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::{normalize_api_base_url, validate_config};

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the TheSportsDB v1 JSON API, including the API key segment.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: default_api_base_url(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// Falls back to defaults when no config file exists.
    /// Environment variables can override config file values.
    ///
    /// # Environment Variables
    /// - `LEAGUE_BROWSER_API_BASE_URL` - Override API base URL
    /// - `LEAGUE_BROWSER_LOG_FILE` - Override log file path
    /// - `LEAGUE_BROWSER_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded configuration
    /// * `Err(AppError)` - Unreadable or invalid configuration
    pub async fn load() -> Result<Self, AppError> {
        Self::load_with_overrides(&get_config_path()).await
    }

    /// Loads `path` if it exists (defaults otherwise), applies environment
    /// overrides and validates the result.
    pub async fn load_with_overrides(path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(path).exists() {
            Self::load_from_path(path).await?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(api_base_url) = std::env::var(env_vars::API_BASE_URL) {
            self.api_base_url = api_base_url;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(
            &self.api_base_url,
            &self.log_file_path,
            self.http_timeout_seconds,
        )
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    ///
    /// # Notes
    /// - Shows config file location and current settings
    /// - Handles case when no config file exists
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();

        if Path::new(&config_path).exists() {
            let config = Config::load().await?;
            print!("{}", config.describe(&config_path));
        } else {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
            println!("Using default API base URL:");
            println!("{DEFAULT_API_BASE_URL}");
        }

        Ok(())
    }

    /// Human-readable listing of the settings, as printed by `--list-config`.
    pub fn describe(&self, config_path: &str) -> String {
        const SEPARATOR: &str = "────────────────────────────────────";
        let log_location = match &self.log_file_path {
            Some(custom_path) => custom_path.clone(),
            None => format!(
                "{}/{}\n(Default location)",
                get_log_dir_path(),
                DEFAULT_LOG_FILE_NAME
            ),
        };

        format!(
            "\nCurrent Configuration\n{SEPARATOR}\nConfig Location:\n{config_path}\n{SEPARATOR}\n\
             API Base URL:\n{}\n{SEPARATOR}\nHTTP Timeout:\n{} seconds\n{SEPARATOR}\n\
             Log File Location:\n{log_location}\n",
            self.api_base_url, self.http_timeout_seconds
        )
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist and normalizes the
    /// API base URL (https scheme for remote hosts, no trailing slash).
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(&Config {
            api_base_url: normalize_api_base_url(&self.api_base_url),
            log_file_path: self.log_file_path.clone(),
            http_timeout_seconds: self.http_timeout_seconds,
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn clear_env() {
        // SAFETY: env-touching tests are #[serial]
        unsafe {
            std::env::remove_var(env_vars::API_BASE_URL);
            std::env::remove_var(env_vars::LOG_FILE);
            std::env::remove_var(env_vars::HTTP_TIMEOUT);
        }
    }

    #[tokio::test]
    async fn test_config_load_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config_content = r#"
api_base_url = "https://api.example.com/api/v1/json/123"
log_file_path = "/custom/log/path"
http_timeout_seconds = 10
"#;
        tokio::fs::write(&config_path, config_content).await.unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(config.api_base_url, "https://api.example.com/api/v1/json/123");
        assert_eq!(config.log_file_path, Some("/custom/log/path".to_string()));
        assert_eq!(config.http_timeout_seconds, 10);
    }

    #[tokio::test]
    async fn test_config_missing_fields_use_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "log_file_path = \"/some/path\"\n")
            .await
            .unwrap();

        let config = Config::load_from_path(&config_path.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.http_timeout_seconds, 30);
    }

    #[tokio::test]
    #[serial]
    async fn test_load_with_overrides_without_file_uses_defaults() {
        clear_env();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("missing.toml");

        let config = Config::load_with_overrides(&config_path.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    #[serial]
    async fn test_env_overrides_take_precedence() {
        clear_env();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "api_base_url = \"https://file.example.com\"\n")
            .await
            .unwrap();

        // SAFETY: serialized with the other env-touching tests
        unsafe {
            std::env::set_var(env_vars::API_BASE_URL, "https://env.example.com");
            std::env::set_var(env_vars::HTTP_TIMEOUT, "5");
        }
        let config = Config::load_with_overrides(&config_path.to_string_lossy()).await;
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.api_base_url, "https://env.example.com");
        assert_eq!(config.http_timeout_seconds, 5);
    }

    #[tokio::test]
    #[serial]
    async fn test_invalid_timeout_override_is_ignored() {
        clear_env();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("missing.toml");

        // SAFETY: serialized with the other env-touching tests
        unsafe {
            std::env::set_var(env_vars::HTTP_TIMEOUT, "soon");
        }
        let config = Config::load_with_overrides(&config_path.to_string_lossy()).await;
        clear_env();

        assert_eq!(config.unwrap().http_timeout_seconds, 30);
    }

    #[tokio::test]
    async fn test_config_save_normalizes_base_url() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("league_browser").join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let config = Config {
            api_base_url: "http://api.example.com/api/v1/json/3/".to_string(),
            ..Config::default()
        };

        config.save_to_path(&config_path_str).await.unwrap();
        assert!(config_path.exists());

        let loaded = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(loaded.api_base_url, "https://api.example.com/api/v1/json/3");
    }

    #[tokio::test]
    async fn test_config_save_keeps_localhost_scheme() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let config = Config {
            api_base_url: "http://localhost:8080".to_string(),
            ..Config::default()
        };

        config.save_to_path(&config_path_str).await.unwrap();
        let loaded = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(loaded.api_base_url, "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_config_save_and_load_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let original = Config {
            api_base_url: "https://api.example.com".to_string(),
            log_file_path: Some("/custom/log/path".to_string()),
            http_timeout_seconds: 12,
        };
        original.save_to_path(&config_path_str).await.unwrap();

        let loaded = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_config_without_log_file_path_serialization() {
        let toml_string = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(toml_string.contains(DEFAULT_API_BASE_URL));
        assert!(!toml_string.contains("log_file_path"));
    }

    #[tokio::test]
    async fn test_config_load_from_nonexistent_path() {
        let result = Config::load_from_path("/nonexistent/path/config.toml").await;
        assert!(matches!(result.unwrap_err(), AppError::Io(_)));
    }

    #[tokio::test]
    async fn test_config_malformed_toml_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("malformed_config.toml");
        tokio::fs::write(&config_path, "api_base_url = \"https://a.com\"\n[invalid_section\n")
            .await
            .unwrap();

        let result = Config::load_from_path(&config_path.to_string_lossy()).await;
        assert!(matches!(result.unwrap_err(), AppError::TomlDeserialize(_)));
    }

    #[test]
    fn test_describe_lists_settings() {
        let config = Config {
            log_file_path: Some("/tmp/custom.log".to_string()),
            ..Config::default()
        };
        let listing = config.describe("/home/user/.config/league_browser/config.toml");

        assert!(listing.contains("Current Configuration"));
        assert!(listing.contains(DEFAULT_API_BASE_URL));
        assert!(listing.contains("30 seconds"));
        assert!(listing.contains("/tmp/custom.log"));
        assert!(!listing.contains("Default location"));
    }

    #[test]
    fn test_paths() {
        let config_path = Config::get_config_path();
        assert!(config_path.contains("league_browser"));
        assert!(config_path.ends_with("config.toml"));
        assert!(Config::get_log_dir_path().ends_with("logs"));
    }
}
