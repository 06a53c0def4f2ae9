//! CLI module for the tool server
//!
//! Provides command-line parsing for the mcp-tools-server binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod extract;
pub mod init;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// MCP tool server
///
/// Serves web search, weather and time tools over JSON-RPC 2.0, and ships the
/// JSON object extractor used to read tool calls out of model output.
#[derive(Parser, Debug)]
#[command(
    name = "mcp-tools-server",
    version,
    about = "MCP tool server (web search, weather, time) over JSON-RPC",
    long_about = "Serves web_search, get_weather and get_time as MCP tools over JSON-RPC 2.0 on HTTP.\n\n\
                  Run without arguments to start the server, or use 'init' to write a default config.",
    after_help = "EXAMPLES:\n    \
                  mcp-tools-server init                 # Write mcp-tools.toml\n    \
                  mcp-tools-server                      # Start the server\n    \
                  mcp-tools-server --port 8080          # Override the configured port\n    \
                  mcp-tools-server extract reply.txt    # Print JSON objects found in a file\n    \
                  cat reply.txt | mcp-tools-server extract --validate"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "mcp-tools.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Override the bind host
    #[arg(long, env = "HOST", global = true)]
    pub host: Option<String>,

    /// Override the bind port
    #[arg(long, env = "PORT", global = true)]
    pub port: Option<u16>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the JSON-RPC server (default)
    Serve,

    /// Write a commented default configuration file
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// List the enabled tools and their input schemas
    Tools,

    /// Extract balanced JSON objects from a file or stdin
    Extract {
        /// Input file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Decode every region and report the ones that are not valid JSON
        #[arg(long)]
        validate: bool,
    },

    /// Show the effective configuration
    Config {
        /// Validate the configuration and exit
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
