//! TOML-based configuration for the tool server
//!
//! All settings live in a single file (`mcp-tools.toml` by default). Every
//! field has a default, so an empty file, or no file at all, yields a
//! working server on `127.0.0.1:3000` with all three tools enabled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure loaded from mcp-tools.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

// ============= Tool Configuration =============

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub web_search: SearchToolConfig,

    #[serde(default)]
    pub get_weather: WeatherToolConfig,

    #[serde(default)]
    pub get_time: TimeToolConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchToolConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Search engine origin; results are fetched from `{base_url}/s`
    #[serde(default = "default_search_base_url")]
    pub base_url: String,

    #[serde(default = "default_max_results")]
    pub max_results: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_tool_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherToolConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Weather API origin; observations are fetched from `{base_url}/data/sk/{code}.html`
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    #[serde(default = "default_city")]
    pub default_city: String,

    #[serde(default = "default_tool_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeToolConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// IANA zone used when the caller does not pass one
    #[serde(default = "default_timezone")]
    pub default_timezone: String,
}

fn default_true() -> bool {
    true
}

fn default_search_base_url() -> String {
    "https://www.baidu.com".to_string()
}

fn default_max_results() -> usize {
    5
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

fn default_tool_timeout() -> u64 {
    10
}

fn default_weather_base_url() -> String {
    "https://www.weather.com.cn".to_string()
}

fn default_city() -> String {
    "北京".to_string()
}

fn default_timezone() -> String {
    "Asia/Shanghai".to_string()
}

impl Default for SearchToolConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_search_base_url(),
            max_results: default_max_results(),
            user_agent: default_user_agent(),
            timeout_secs: default_tool_timeout(),
        }
    }
}

impl Default for WeatherToolConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_weather_base_url(),
            default_city: default_city(),
            timeout_secs: default_tool_timeout(),
        }
    }
}

impl Default for TimeToolConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_timezone: default_timezone(),
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Upper bound for `web_search.max_results`
pub const MAX_SEARCH_RESULTS: usize = 20;

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// Nothing at this path; built-in defaults are in use
    Defaults(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults(path) => write!(f, "{} (not found, defaults)", path.display()),
        }
    }
}

impl From<ConfigError> for crate::types::AppError {
    fn from(e: ConfigError) -> Self {
        crate::types::AppError::Config(e.to_string())
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    ///
    /// Runs before logging is configured, so the caller reports the returned
    /// [`ConfigSource`].
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<(Self, ConfigSource), ConfigError> {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => Ok((config, ConfigSource::File(path.to_path_buf()))),
            Err(ConfigError::FileNotFound(missing)) => {
                Ok((Self::default(), ConfigSource::Defaults(missing)))
            }
            Err(e) => Err(e),
        }
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be greater than 0".to_string(),
            ));
        }

        if !matches!(self.server.log_format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "server.log_format must be 'pretty' or 'json', got '{}'",
                self.server.log_format
            )));
        }

        let search = &self.tools.web_search;
        if search.max_results == 0 || search.max_results > MAX_SEARCH_RESULTS {
            return Err(ConfigError::ValidationError(format!(
                "tools.web_search.max_results must be between 1 and {}, got {}",
                MAX_SEARCH_RESULTS, search.max_results
            )));
        }
        validate_base_url("tools.web_search.base_url", &search.base_url)?;
        validate_base_url("tools.get_weather.base_url", &self.tools.get_weather.base_url)?;

        let timezone = &self.tools.get_time.default_timezone;
        if timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(ConfigError::ValidationError(format!(
                "tools.get_time.default_timezone '{}' is not a known IANA timezone",
                timezone
            )));
        }

        Ok(())
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Names of the tools switched on in this configuration, in catalogue order
    pub fn enabled_tools(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.tools.web_search.enabled {
            names.push("web_search");
        }
        if self.tools.get_weather.enabled {
            names.push("get_weather");
        }
        if self.tools.get_time.enabled {
            names.push("get_time");
        }
        names
    }

    /// Render the configuration back to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn validate_base_url(field: &str, url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(format!(
            "{} must be an http(s) URL, got '{}'",
            field, url
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn create_test_config() -> String {
        r#"
[server]
host = "0.0.0.0"
port = 8080
log_level = "debug"
log_format = "json"

[tools.web_search]
max_results = 3
timeout_secs = 5

[tools.get_weather]
default_city = "长沙"

[tools.get_time]
enabled = false
default_timezone = "Europe/London"
"#
        .to_string()
    }

    #[test]
    fn test_parse_config() {
        let config = AppConfig::from_toml(&create_test_config()).expect("Failed to parse config");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.log_format, "json");
        assert_eq!(config.tools.web_search.max_results, 3);
        assert_eq!(config.tools.web_search.timeout_secs, 5);
        assert_eq!(config.tools.get_weather.default_city, "长沙");
        assert!(!config.tools.get_time.enabled);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_toml("").unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.server.log_format, "pretty");

        assert!(config.tools.web_search.enabled);
        assert_eq!(config.tools.web_search.base_url, "https://www.baidu.com");
        assert_eq!(config.tools.web_search.max_results, 5);
        assert_eq!(config.tools.get_weather.default_city, "北京");
        assert_eq!(config.tools.get_time.default_timezone, "Asia/Shanghai");
    }

    #[test]
    fn test_enabled_tools_order() {
        let config = AppConfig::default();
        assert_eq!(config.enabled_tools(), vec!["web_search", "get_weather", "get_time"]);

        let config = AppConfig::from_toml(&create_test_config()).unwrap();
        assert_eq!(config.enabled_tools(), vec!["web_search", "get_weather"]);
    }

    #[test]
    fn test_validation_max_results_out_of_range() {
        let result = AppConfig::from_toml("[tools.web_search]\nmax_results = 0\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));

        let result = AppConfig::from_toml("[tools.web_search]\nmax_results = 50\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validation_unknown_timezone() {
        let result =
            AppConfig::from_toml("[tools.get_time]\ndefault_timezone = \"Mars/Olympus\"\n");
        match result {
            Err(ConfigError::ValidationError(msg)) => assert!(msg.contains("Mars/Olympus")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_bad_base_url() {
        let result = AppConfig::from_toml("[tools.get_weather]\nbase_url = \"weather.local\"\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validation_bad_log_format() {
        let result = AppConfig::from_toml("[server]\nlog_format = \"xml\"\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_parse_error() {
        let result = AppConfig::from_toml("[server\nport = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = AppConfig::load("/nonexistent/mcp-tools.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));

        let (config, source) = AppConfig::load_or_default("/nonexistent/mcp-tools.toml").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(
            source,
            ConfigSource::Defaults(PathBuf::from("/nonexistent/mcp-tools.toml"))
        );
        assert_eq!(
            source.to_string(),
            "/nonexistent/mcp-tools.toml (not found, defaults)"
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(create_test_config().as_bytes()).unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);

        let (_, source) = AppConfig::load_or_default(file.path()).unwrap();
        assert_eq!(source, ConfigSource::File(file.path().to_path_buf()));
    }

    #[test]
    fn test_load_or_default_propagates_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[server]\nport = 0\n").unwrap();

        let result = AppConfig::load_or_default(file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_to_toml_roundtrips_defaults() {
        let rendered = AppConfig::default().to_toml().unwrap();
        let parsed = AppConfig::from_toml(&rendered).unwrap();
        assert_eq!(parsed.server.port, 3000);
        assert_eq!(parsed.tools.get_weather.default_city, "北京");
    }
}
