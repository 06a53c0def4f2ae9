use crate::{
    AppState,
    mcp::protocol::{JsonRpcRequest, JsonRpcResponse},
    types::rpc_codes,
};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::debug;

/// Single JSON-RPC endpoint.
///
/// The body is decoded by hand so that malformed input still gets a
/// JSON-RPC error envelope rather than axum's plain-text rejection.
pub async fn handle_rpc(State(state): State<AppState>, body: Bytes) -> Response {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            debug!(error = %e, "Rejected unparseable JSON-RPC body");
            return Json(JsonRpcResponse::error(
                None,
                rpc_codes::PARSE_ERROR,
                format!("Parse error: {}", e),
            ))
            .into_response();
        }
    };

    if !value.is_object() {
        return Json(JsonRpcResponse::error(
            None,
            rpc_codes::INVALID_REQUEST,
            "Invalid request: request must be a JSON object",
        ))
        .into_response();
    }

    let id = value.get("id").cloned();
    let request: JsonRpcRequest = match serde_json::from_value(value) {
        Ok(r) => r,
        Err(e) => {
            return Json(JsonRpcResponse::error(
                id,
                rpc_codes::INVALID_REQUEST,
                format!("Invalid request: {}", e),
            ))
            .into_response();
        }
    };

    match state.mcp.handle_request(request).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
