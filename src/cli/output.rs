//! Terminal rendering for the CLI commands
//!
//! Each command has one printer on [`Output`]. The text itself comes from
//! the plain `*_lines` helpers below so it can be checked without a
//! terminal; colour is layered on afterwards.

use super::extract::ExtractSummary;
use crate::types::ToolDefinition;
use crate::utils::toml_config::{AppConfig, ConfigSource};
use owo_colors::OwoColorize;
use std::path::Path;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self { colored: true }
    }

    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Banner shown once the listener is bound
    pub fn server_started(&self, addr: &str, tools: &[String]) {
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        if self.colored {
            println!(
                "\n   {} {}\n",
                "mcp-tools-server".bright_cyan().bold(),
                version.dimmed()
            );
        } else {
            println!("\n   mcp-tools-server {}\n", version);
        }
        self.field("listening", &format!("http://{}", addr));
        self.field("tools", &tools.join(", "));
        println!();
    }

    /// `tools` command: one block per enabled tool with its arguments
    pub fn tool_catalogue(&self, definitions: &[ToolDefinition]) {
        self.section("Tools");
        if definitions.is_empty() {
            self.warning("All tools are disabled in the configuration");
            return;
        }

        for def in definitions {
            if self.colored {
                println!("\n  {}", def.name.cyan().bold());
            } else {
                println!("\n  --- {} ---", def.name);
            }
            self.field("description", &def.description);
            for arg in argument_lines(def) {
                if self.colored {
                    println!("    {} {}", "•".blue(), arg);
                } else {
                    println!("    - {}", arg);
                }
            }
        }
        println!();
    }

    /// `config` command without `--validate`
    pub fn config_summary(&self, source: &ConfigSource, config: &AppConfig) {
        self.section("Configuration");
        self.field("source", &source.to_string());
        self.field("listen", &config.bind_address());
        self.field("tools", &config.enabled_tools().join(", "));
        println!();
    }

    /// `config --validate` success line
    pub fn config_valid(&self, source: &ConfigSource) {
        let message = format!("Configuration is valid: {}", source);
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// `init` wrote a fresh file
    pub fn config_written(&self, path: &Path) {
        self.section("Initializing configuration");
        let path = path.display().to_string();
        if self.colored {
            println!("  {} {} {}", "✓".green().bold(), "config".dimmed(), path.bright_white());
            println!("\n  {}", "Start the server:".bright_green().bold());
            println!("     {}", format!("$ mcp-tools-server --config {}", path).bright_cyan());
        } else {
            println!("  [CREATED] config {}", path);
            println!("\n  Start the server:");
            println!("     $ mcp-tools-server --config {}", path);
        }
    }

    /// `init` found a file and left it alone
    pub fn config_kept(&self, path: &Path) {
        self.section("Initializing configuration");
        let path = path.display().to_string();
        if self.colored {
            println!("  {} {} {}", "○".yellow(), path.dimmed(), "(already exists)".yellow());
            println!("\n  {}", "Use --force to overwrite the existing file".dimmed().italic());
        } else {
            println!("  [SKIPPED] {} (already exists)", path);
            println!("\n  [TIP] Use --force to overwrite the existing file");
        }
    }

    /// Warnings for an `extract` run, on stderr so stdout stays parseable
    pub fn extract_summary(&self, summary: &ExtractSummary) {
        for line in extract_warnings(summary) {
            self.warning(&line);
        }
    }

    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    fn warning(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            eprintln!("  [WARN] {}", message);
        }
    }

    fn section(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    fn field(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }
}

/// `name (type[, required])` for each property in the tool's input schema
pub fn argument_lines(def: &ToolDefinition) -> Vec<String> {
    let required: Vec<&str> = def.input_schema["required"]
        .as_array()
        .map(|r| r.iter().filter_map(|v| v.as_str()).collect())
        .unwrap_or_default();

    let Some(props) = def.input_schema["properties"].as_object() else {
        return Vec::new();
    };

    props
        .iter()
        .map(|(name, schema)| {
            let ty = schema["type"].as_str().unwrap_or("any");
            if required.contains(&name.as_str()) {
                format!("{} ({}, required)", name, ty)
            } else {
                format!("{} ({})", name, ty)
            }
        })
        .collect()
}

/// Human-readable problems in an extract run; empty when the run was clean
pub fn extract_warnings(summary: &ExtractSummary) -> Vec<String> {
    let mut lines = Vec::new();
    if summary.invalid > 0 {
        lines.push(format!(
            "{} of {} regions are not valid JSON",
            summary.invalid, summary.objects
        ));
    }
    if let Some(bytes) = summary.truncated {
        lines.push(format!(
            "Input ended inside an unterminated object ({} bytes dropped)",
            bytes
        ));
    }
    lines
}
