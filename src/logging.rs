//! Logging utilities for the busybeaver server.
//!
//! This module provides structured logging functionality to make logs more
//! searchable, analyzable, and useful for production deployments.

use std::time::Instant;
use tracing::{debug, error, info, warn, Level};

use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use uuid::Uuid;

/// Creates the tracing layer for HTTP request/response logging.
///
/// Request spans are emitted at INFO; per-request start and latency lines at DEBUG.
pub fn create_http_trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    let response_formatter = DefaultOnResponse::new()
        .level(Level::DEBUG)
        .latency_unit(LatencyUnit::Micros);

    TraceLayer::new_for_http()
        .make_span_with(
            DefaultMakeSpan::new()
                .level(Level::INFO)
                .include_headers(false),
        )
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(response_formatter)
}

/// Initialize the tracing subscriber with the given log level.
///
/// `RUST_LOG` wins over `log_level` when set.
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .try_init()
        .ok();
}

/// Log a start message for a significant operation
pub fn log_operation_start(operation: &str, details: Option<&str>) {
    if let Some(details) = details {
        info!(
            operation = operation,
            details = details,
            "Starting operation"
        );
    } else {
        info!(operation = operation, "Starting operation");
    }
}

/// Log the completion of a significant operation
pub fn log_operation_end(operation: &str, start_time: Instant, success: bool) {
    let duration = start_time.elapsed();
    let duration_ms = duration.as_secs_f64() * 1000.0;

    if success {
        info!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed successfully"
        );
    } else {
        warn!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed with warnings"
        );
    }
}

/// Log an operation with timing and result in a single statement
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let request_id = Uuid::new_v4();

    debug!(
        operation = operation,
        request_id = %request_id,
        "Starting operation"
    );

    let result = f();

    let duration = start.elapsed();

    info!(
        operation = operation,
        request_id = %request_id,
        duration_ms = duration.as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log detailed information about the samples loaded
pub fn log_data_load_stats(
    file_path: &str,
    item: &str,
    time_index: usize,
    item_names: &[&str],
    sample_count: usize,
    memory_usage: usize,
) {
    info!(
        operation = "data_load",
        file_path = file_path,
        item = item,
        time_index = time_index,
        items = %item_names.join(", "),
        sample_count = sample_count,
        memory_kb = memory_usage / 1024,
        "Samples loaded successfully"
    );
}

/// Log the outcome of a grid interpolation run
pub fn log_grid_summary(request_id: &str, points: usize, failed: usize, parallel: bool) {
    if failed == 0 {
        info!(
            operation = "grid_interpolation",
            request_id = request_id,
            points = points,
            parallel = parallel,
            "Grid interpolated"
        );
    } else {
        warn!(
            operation = "grid_interpolation",
            request_id = request_id,
            points = points,
            failed = failed,
            parallel = parallel,
            "Grid interpolated with failed points"
        );
    }
}

/// Log an error with context
pub fn log_error(error: &crate::error::BusybeaverError, context: &str) {
    error!(
        error = %error,
        context = context,
        kind = error.kind(),
        "Error occurred"
    );
}

/// Log an error that occurred during request processing
pub fn log_request_error(
    error: &crate::error::BusybeaverError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) {
    error!(
        error = %error,
        endpoint = endpoint,
        request_id = request_id,
        params = params.unwrap_or("none"),
        kind = error.kind(),
        "Request processing error"
    );
}

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}
