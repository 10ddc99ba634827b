//! Point query endpoint handler.
//!
//! Returns the interpolated value at a single query point, together with the
//! four quadrant neighbours it was computed from.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::error_response;
use crate::error::Result;
use crate::interpolation::{bilinear, QuadrantNeighbours, Sample};
use crate::logging::{generate_request_id, log_request_error};
use crate::state::AppState;

/// Query parameters for point endpoint
#[derive(Debug, Deserialize)]
pub struct PointQuery {
    /// X coordinate of the query point
    pub x: f64,
    /// Y coordinate of the query point
    pub y: f64,
}

/// Response for point query
#[derive(Debug, Serialize)]
pub struct PointResponse {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub item: String,
    pub neighbours: [Option<Sample>; 4],
}

/// Handle GET /point requests
pub async fn point_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PointQuery>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/point",
        request_id = %request_id,
        x = params.x,
        y = params.y,
        "Processing point query"
    );

    match process_point_query(&state, &params) {
        Ok(response) => {
            info!(
                endpoint = "/point",
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Point query successful"
            );
            Json(response).into_response()
        }
        Err(error) => {
            let query = format!("x={}&y={}", params.x, params.y);
            if error.is_interpolation_failure() {
                warn!(
                    endpoint = "/point",
                    request_id = %request_id,
                    params = %query,
                    kind = error.kind(),
                    "Point could not be interpolated: {}",
                    error
                );
            } else {
                log_request_error(&error, "/point", &request_id, Some(&query));
            }
            error_response(&error)
        }
    }
}

/// Locate the neighbours of the query point and interpolate its value
pub fn process_point_query(state: &AppState, params: &PointQuery) -> Result<PointResponse> {
    let query = [params.x, params.y];
    let neighbours: QuadrantNeighbours = state.samples.locate(query);
    let quad = neighbours.into_quad()?;
    let sample = bilinear::interpolate(query, &quad)?;

    Ok(PointResponse {
        x: sample.x,
        y: sample.y,
        z: sample.z,
        item: state.metadata.item.clone(),
        neighbours: neighbours.neighbours,
    })
}
