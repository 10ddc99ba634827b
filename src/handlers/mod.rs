//! HTTP request handlers for the busybeaver API.
//!
//! This module contains all the endpoint handlers for the web server.

pub mod grid;
pub mod heartbeat;
pub mod metadata;
pub mod point;

pub use grid::grid_handler;
pub use heartbeat::{heartbeat_handler, mark_start};
pub use metadata::metadata_handler;
pub use point::point_handler;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::error::BusybeaverError;
use crate::logging::create_http_trace_layer;
use crate::state::AppState;

/// Build the API router over the shared state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/heartbeat", get(heartbeat_handler))
        .route("/metadata", get(metadata_handler))
        .route("/point", get(point_handler))
        .route("/grid", get(grid_handler))
        .layer(create_http_trace_layer())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// HTTP status for an error returned by a handler
pub fn status_for(error: &BusybeaverError) -> StatusCode {
    match error {
        BusybeaverError::EmptyQuadrant { .. }
        | BusybeaverError::DegenerateQuad { .. }
        | BusybeaverError::NoRealSolution { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        BusybeaverError::InvalidParameter { .. } | BusybeaverError::ShapeMismatch { .. } => {
            StatusCode::BAD_REQUEST
        }
        BusybeaverError::DataNotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON error body with the error message and its kind
pub fn error_response(error: &BusybeaverError) -> Response {
    (
        status_for(error),
        Json(serde_json::json!({
            "error": error.to_string(),
            "kind": error.kind(),
        })),
    )
        .into_response()
}
