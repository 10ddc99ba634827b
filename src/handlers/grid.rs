//! Grid query endpoint handler.
//!
//! Interpolates every point of a regular grid. Points that cannot be
//! interpolated come back as `null` values and are listed with their reason;
//! they never fail the request as a whole.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::error_response;
use crate::error::{BusybeaverError, Result};
use crate::interpolation::{interpolate_samples, interpolate_samples_par, GridSpec, PointFailure};
use crate::logging::{generate_request_id, log_grid_summary, log_request_error};
use crate::state::AppState;

/// Query parameters for grid endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GridQuery {
    pub x0: f64,
    pub y0: f64,
    pub dx: f64,
    pub dy: f64,
    pub nx: usize,
    pub ny: usize,
    /// Override the configured parallel setting
    #[serde(default)]
    pub parallel: Option<bool>,
}

/// Response for grid query
#[derive(Debug, Serialize)]
pub struct GridResponse {
    pub grid: GridSpec,
    pub item: String,
    pub interpolated: usize,
    pub failed: usize,
    /// Row-major values, `null` where the point failed
    pub values: Vec<Option<f64>>,
    pub failures: Vec<PointFailure>,
}

/// Handle GET /grid requests
pub async fn grid_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GridQuery>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/grid",
        request_id = %request_id,
        params = ?params,
        "Processing grid query"
    );

    let query = format!(
        "x0={}&y0={}&dx={}&dy={}&nx={}&ny={}",
        params.x0, params.y0, params.dx, params.dy, params.nx, params.ny
    );

    let task_state = Arc::clone(&state);
    let result = tokio::task::spawn_blocking(move || process_grid_query(&task_state, &params))
        .await
        .map_err(|e| BusybeaverError::Server {
            message: format!("Grid task failed: {}", e),
        })
        .and_then(|r| r);

    match result {
        Ok((response, parallel)) => {
            log_grid_summary(
                &request_id,
                response.values.len(),
                response.failed,
                parallel,
            );
            debug!(
                endpoint = "/grid",
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Grid query finished"
            );
            Json(response).into_response()
        }
        Err(error) => {
            log_request_error(&error, "/grid", &request_id, Some(&query));
            error_response(&error)
        }
    }
}

/// Validate the grid and interpolate every point of it.
///
/// Also returns whether the parallel driver was used.
pub fn process_grid_query(state: &AppState, params: &GridQuery) -> Result<(GridResponse, bool)> {
    let grid = GridSpec::new(params.x0, params.y0, params.dx, params.dy, params.nx, params.ny)?;

    let max_points = state.config.data.max_grid_points;
    let too_large = params
        .nx
        .checked_mul(params.ny)
        .map_or(true, |points| points > max_points);
    if too_large {
        return Err(BusybeaverError::InvalidParameter {
            param: "nx/ny".to_string(),
            message: format!(
                "grid of {}x{} exceeds the limit of {} points",
                params.nx, params.ny, max_points
            ),
        });
    }

    let parallel = params.parallel.unwrap_or(state.config.data.parallel_grid);
    let report = if parallel {
        let points: Vec<[f64; 2]> = grid.points().collect();
        interpolate_samples_par(&points, &state.samples)
    } else {
        interpolate_samples(grid.points(), &state.samples)
    };

    let response = GridResponse {
        grid,
        item: state.metadata.item.clone(),
        interpolated: report.interpolated,
        failed: report.failed,
        values: report.values(),
        failures: report.failures(),
    };

    Ok((response, parallel))
}
