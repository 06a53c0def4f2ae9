//! Init command implementation
//!
//! Writes a commented `mcp-tools.toml` holding every default.

use super::output::Output;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the file written by `init`
pub const CONFIG_FILE_NAME: &str = "mcp-tools.toml";

/// Result of the init operation
#[derive(Debug, PartialEq, Eq)]
pub enum InitResult {
    /// Configuration written
    Success,
    /// A configuration file is already present and `--force` was not given
    AlreadyExists,
    /// An error occurred while writing
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: PathBuf,
    /// Overwrite an existing file
    pub force: bool,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    if !config.path.exists() {
        if let Err(e) = fs::create_dir_all(&config.path) {
            output.error(&format!("Failed to create {}: {}", config.path.display(), e));
            return InitResult::Error(e.to_string());
        }
    }

    let config_path = config.path.join(CONFIG_FILE_NAME);
    if config_path.exists() && !config.force {
        output.config_kept(&config_path);
        return InitResult::AlreadyExists;
    }

    if let Err(e) = write_file(&config_path, &generate_config_toml()) {
        output.error(&format!("Failed to create {}: {}", config_path.display(), e));
        return InitResult::Error(e.to_string());
    }
    output.config_written(&config_path);

    InitResult::Success
}

fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    fs::write(path, content)
}

/// Default configuration with comments
pub fn generate_config_toml() -> String {
    r#"# mcp-tools-server configuration
#
# Every key is optional; omitted keys take the values shown here.
# HOST and PORT environment variables (or --host/--port) override [server].

[server]
host = "127.0.0.1"
port = 3000
# Default log filter; RUST_LOG takes precedence
log_level = "info"
# "pretty" or "json"
log_format = "pretty"

[tools.web_search]
enabled = true
base_url = "https://www.baidu.com"
# 1 to 20
max_results = 5
user_agent = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
timeout_secs = 10

[tools.get_weather]
enabled = true
base_url = "https://www.weather.com.cn"
default_city = "北京"
timeout_secs = 10

[tools.get_time]
enabled = true
# IANA zone name
default_timezone = "Asia/Shanghai"
"#
    .to_string()
}
