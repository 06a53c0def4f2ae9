//! HTTP surface
//!
//! An Axum router exposing the JSON-RPC dispatcher plus two small helper
//! endpoints.
//!
//! # Endpoints
//!
//! - `POST /` - JSON-RPC 2.0 (`initialize`, `ping`, `tools/list`, `tools/call`).
//!   Notifications are acknowledged with `202 Accepted` and an empty body.
//! - `GET /health` - Returns `OK`
//! - `GET /tools` - Tool definitions as a bare JSON array
//!
//! Every response carries permissive CORS headers and `OPTIONS` pre-flight
//! requests are answered by the CORS layer.

/// Request handlers for all endpoints.
pub mod handlers;
/// Router configuration and middleware.
pub mod routes;
