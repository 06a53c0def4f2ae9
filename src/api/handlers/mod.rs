//! API request handlers.

/// Liveness and tool catalogue handlers.
pub mod health;
/// JSON-RPC endpoint.
pub mod rpc;
