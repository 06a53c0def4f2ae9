use crate::{AppState, types::ToolDefinition};
use axum::{Json, extract::State};

pub async fn health() -> &'static str {
    "OK"
}

/// Plain JSON view of the registered tools, for humans and probes.
pub async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolDefinition>> {
    Json(state.mcp.tools().get_tool_definitions())
}
