use crate::AppState;
use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Largest JSON-RPC body accepted
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", post(crate::api::handlers::rpc::handle_rpc))
        .route("/health", get(crate::api::handlers::health::health))
        .route("/tools", get(crate::api::handlers::health::list_tools))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
