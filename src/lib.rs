//! # busybeaver
//!
//! Quadrant bilinear interpolation of unstructured mesh results.
//!
//! Given scattered samples (element centres of a simulation mesh with a
//! scalar value such as maximum water depth), the value at an arbitrary
//! point is estimated from the nearest sample in each of the four quadrants
//! around it, blended bilinearly over the quadrilateral they span.
//!
//! ## Architecture
//!
//! - **Interpolation**: quadrant search, bilinear solve and grid driver
//! - **Data Layer**: loads a mesh dataset and selects one item at one time step
//! - **API Layer**: serves point and grid interpolation over HTTP

pub mod config;
pub mod data_loader;
pub mod error;
pub mod handlers;
pub mod interpolation;
pub mod logging;
pub mod state;

pub use config::Config;
pub use error::{BusybeaverError, Result};
pub use interpolation::{
    interpolate, interpolate_grid, locate, GridReport, GridSpec, Quadrant, Sample, SampleSet,
};
pub use logging::{
    create_http_trace_layer, generate_request_id, init_tracing, log_data_load_stats, log_error,
    log_operation_end, log_operation_start, log_request_error, log_timed_operation,
};
pub use state::{AppState, ItemInfo, MeshDataset, Metadata};
