//! Metadata endpoint handler.
//!
//! Returns JSON describing the loaded item, its time step, the sample extent
//! and the other items available in the dataset.

use axum::{extract::State, Json};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::logging::generate_request_id;
use crate::state::AppState;

/// Handle GET /metadata requests
pub async fn metadata_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/metadata",
        request_id = %request_id,
        "Processing metadata request"
    );

    let response = metadata_json(&state);

    info!(
        endpoint = "/metadata",
        request_id = %request_id,
        duration_us = start_time.elapsed().as_micros() as u64,
        sample_count = state.metadata.sample_count,
        "Metadata request successful"
    );

    Json(response)
}

fn metadata_json(state: &AppState) -> serde_json::Value {
    serde_json::json!({
        "title": state.metadata.title,
        "item": state.metadata.item,
        "unit": state.metadata.unit,
        "time_index": state.metadata.time_index,
        "sample_count": state.metadata.sample_count,
        "extent": state.metadata.extent,
        "items": state.metadata.items,
    })
}
