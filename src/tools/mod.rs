//! Built-in tools
//!
//! Every tool implements [`Tool`](crate::tools::registry::Tool) and is
//! exposed through the [`ToolRegistry`](crate::tools::registry::ToolRegistry),
//! which the JSON-RPC dispatcher consults for `tools/list` and `tools/call`.
//!
//! # Available Tools
//!
//! | Name | Arguments | Backend |
//! |------|-----------|---------|
//! | `web_search` | `query` | HTML results page, scraped |
//! | `get_weather` | `city` | weather.com.cn current observation |
//! | `get_time` | `timezone` (optional) | local clock, IANA zones |
//!
//! ```ignore
//! let registry = ToolRegistry::with_default_tools()?;
//! let output = registry.execute("get_time", json!({"timezone": "Asia/Tokyo"})).await?;
//! println!("{}", output.text);
//! ```

/// Tool registry and the `Tool` trait.
pub mod registry;
/// Web search tool.
pub mod search;
/// Current time tool.
pub mod time;
/// Weather lookup tool.
pub mod weather;

pub use registry::{Tool, ToolRegistry};
