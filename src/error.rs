//! Error types for busybeaver.
//!
//! The first four variants are the per-query interpolation failures. They are
//! local to a single query point and never abort a grid batch; the remaining
//! variants cover loading, configuration and serving.

use thiserror::Error;

use crate::interpolation::Quadrant;

/// The main error type for busybeaver operations.
#[derive(Error, Debug)]
pub enum BusybeaverError {
    /// One or more quadrants around the query point hold no sample
    #[error(
        "Empty quadrant: no sample in quadrant(s) {} around ({}, {})",
        format_quadrants(.quadrants),
        .x,
        .y
    )]
    EmptyQuadrant {
        x: f64,
        y: f64,
        quadrants: Vec<Quadrant>,
    },

    /// The interpolation quad admits no parametrization
    #[error("Degenerate interpolation quad: {message}")]
    DegenerateQuad { message: String },

    /// The parameter quadratic has a negative discriminant
    #[error("No real solution: discriminant {discriminant} is negative")]
    NoRealSolution { discriminant: f64 },

    /// Coordinate and value sequences differ in length
    #[error("Shape mismatch: {coordinates} coordinates but {values} values")]
    ShapeMismatch { coordinates: usize, values: usize },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Data not found errors
    #[error("Data not found: {message}")]
    DataNotFound { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

fn format_quadrants(quadrants: &[Quadrant]) -> String {
    quadrants
        .iter()
        .map(|q| q.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl BusybeaverError {
    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyQuadrant { .. } => "empty_quadrant",
            Self::DegenerateQuad { .. } => "degenerate_quad",
            Self::NoRealSolution { .. } => "no_real_solution",
            Self::ShapeMismatch { .. } => "shape_mismatch",
            Self::Io(_) => "io",
            Self::Config { .. } => "config",
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::DataNotFound { .. } => "data_not_found",
            Self::Json(_) => "json",
            Self::Server { .. } => "server",
        }
    }

    /// Whether this error is a per-point interpolation failure
    pub fn is_interpolation_failure(&self) -> bool {
        matches!(
            self,
            Self::EmptyQuadrant { .. } | Self::DegenerateQuad { .. } | Self::NoRealSolution { .. }
        )
    }
}

/// Convenience type alias for Results with BusybeaverError
pub type Result<T> = std::result::Result<T, BusybeaverError>;
