use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Order endpoints
        .route("/api/orders/execute", post(handlers::execute_order))
        // System endpoints
        .route("/health", get(handlers::health))
        // Add state and CORS
        .with_state(state)
        .layer(cors)
}
