use crate::types::{AppError, Result, ToolDefinition, ToolOutput};
use crate::utils::toml_config::ToolsConfig;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// A named capability that can be listed and invoked over JSON-RPC.
///
/// `execute` returns `Err(AppError::InvalidInput)` for malformed arguments.
/// Failures that happen while doing the work are reported as
/// [`ToolOutput::error`] so the caller still receives readable text.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn input_schema(&self) -> Value;
    async fn execute(&self, args: Value) -> Result<ToolOutput>;
}

/// Ordered collection of tools; `tools/list` reports them in registration order.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Create a registry with the built-in tools using default settings
    pub fn with_default_tools() -> Result<Self> {
        Self::with_config(&ToolsConfig::default())
    }

    /// Create a registry with the built-in tools that are enabled in `config`
    pub fn with_config(config: &ToolsConfig) -> Result<Self> {
        let mut registry = Self::new();

        if config.web_search.enabled {
            registry.register(Arc::new(crate::tools::search::SearchTool::new(
                &config.web_search,
            )?));
        }

        if config.get_weather.enabled {
            registry.register(Arc::new(crate::tools::weather::WeatherTool::new(
                &config.get_weather,
            )?));
        }

        if config.get_time.enabled {
            registry.register(Arc::new(crate::tools::time::TimeTool::new(
                &config.get_time,
            )));
        }

        Ok(registry)
    }

    /// Register a tool, replacing any existing tool with the same name in place
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(index) => self.tools[index] = tool,
            None => self.tools.push(tool),
        }
    }

    pub fn get_tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    pub async fn execute(&self, name: &str, args: Value) -> Result<ToolOutput> {
        match self.get(name) {
            Some(tool) => tool.execute(args).await,
            None => Err(AppError::NotFound(format!("Tool not found: {}", name))),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    /// Get a list of all registered tool names
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name().to_string()).collect()
    }

    /// Check if a tool is registered
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name() == name)
    }
}

/// Read an optional string argument, treating `null` and blank strings as absent.
///
/// Any other non-string value is rejected.
pub(crate) fn optional_str_arg<'a>(args: &'a Value, key: &str) -> Result<Option<&'a str>> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim())),
        Some(_) => Err(AppError::InvalidInput(format!(
            "'{}' must be a string",
            key
        ))),
    }
}
