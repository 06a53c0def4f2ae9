//! # mcptools - MCP tool server and streaming JSON extraction
//!
//! A small JSON-RPC 2.0 server speaking the tool subset of the Model Context
//! Protocol over HTTP, bundled with the text utility its clients use to pull
//! JSON objects out of streamed model output.
//!
//! ## Overview
//!
//! The crate can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `mcp-tools-server` binary
//! 2. **As a library** - Embed the router, the registry, or the extractor
//!
//! ### Extracting JSON from model output
//!
//! ```rust
//! use mcptools::utils::json_extract::extract_json_objects;
//!
//! let reply = r#"Calling a tool: {"name": "get_time", "arguments": {}} done"#;
//! assert_eq!(
//!     extract_json_objects(reply),
//!     vec![r#"{"name": "get_time", "arguments": {}}"#]
//! );
//! ```
//!
//! ### Serving the tools
//!
//! ```rust,ignore
//! use mcptools::{AppConfig, AppState, create_app};
//!
//! let state = AppState::from_config(AppConfig::default())?;
//! let app = create_app(state);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! ```
//!
//! ## Modules
//!
//! - [`api`] - HTTP routes and handlers
//! - [`mcp`] - JSON-RPC protocol types and method dispatch
//! - [`tools`] - Tool trait, registry and the built-in tools
//! - [`types`] - Shared types and error handling
//! - [`utils`] - JSON extraction and configuration

#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Command-line interface.
pub mod cli;
/// JSON-RPC protocol and dispatcher.
pub mod mcp;
/// Built-in tools (web search, weather, time).
pub mod tools;
/// Core types (tool definitions, errors).
pub mod types;
/// JSON extraction and TOML configuration.
pub mod utils;

// Re-export commonly used types
pub use mcp::McpServer;
pub use tools::registry::ToolRegistry;
pub use types::{AppError, Result};
pub use utils::json_extract::{JsonObjectStream, extract_json_objects};
pub use utils::toml_config::AppConfig;

use axum::Router;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Effective configuration
    pub config: Arc<AppConfig>,
    /// JSON-RPC dispatcher over the enabled tools
    pub mcp: Arc<McpServer>,
}

impl AppState {
    /// Build the tool registry and dispatcher described by `config`.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let registry = ToolRegistry::with_config(&config.tools)?;
        Ok(Self {
            config: Arc::new(config),
            mcp: Arc::new(McpServer::new(Arc::new(registry))),
        })
    }
}

/// Router with all routes and middleware, ready to serve.
pub fn create_app(state: AppState) -> Router {
    api::routes::create_router().with_state(state)
}
