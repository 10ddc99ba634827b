//! Interpolation of scattered mesh samples.
//!
//! The value at a query point is estimated from the nearest sample in each of
//! the four quadrants around it, blended bilinearly over the quadrilateral
//! those samples span.
//!
//! - [`quadrant`]: nearest sample per quadrant
//! - [`bilinear`]: inverse bilinear mapping and value blend
//! - [`grid`]: the same two steps over every point of a destination grid

pub mod bilinear;
pub mod common;
pub mod grid;
pub mod quadrant;

pub use bilinear::{interpolate, solve_parameters, QuadParameters};
pub use common::{distance, Quadrant, Sample};
pub use grid::{
    interpolate_grid, interpolate_grid_par, interpolate_point, interpolate_samples,
    interpolate_samples_par, GridReport, GridSpec, PointFailure, PointOutcome,
};
pub use quadrant::{locate, InterpolationQuad, QuadrantNeighbours, SampleSet};
