//! Grid-wide interpolation.
//!
//! Runs the quadrant search and the bilinear solve for every point of a
//! destination grid. Failures are kept per point: a point that cannot be
//! interpolated is reported in the result without affecting its neighbours.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::bilinear;
use super::common::Sample;
use super::quadrant::SampleSet;
use crate::error::{BusybeaverError, Result};

/// A regular destination grid described by origin, cell size and extent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// X coordinate of the first column
    pub x0: f64,
    /// Y coordinate of the first row
    pub y0: f64,
    /// Cell size along x
    pub dx: f64,
    /// Cell size along y
    pub dy: f64,
    /// Number of columns
    pub nx: usize,
    /// Number of rows
    pub ny: usize,
}

impl GridSpec {
    /// Create a grid, validating cell sizes and extent
    pub fn new(x0: f64, y0: f64, dx: f64, dy: f64, nx: usize, ny: usize) -> Result<Self> {
        let spec = Self {
            x0,
            y0,
            dx,
            dy,
            nx,
            ny,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<()> {
        for (param, value) in [("x0", self.x0), ("y0", self.y0)] {
            if !value.is_finite() {
                return Err(BusybeaverError::InvalidParameter {
                    param: param.to_string(),
                    message: format!("grid origin must be finite, got {}", value),
                });
            }
        }
        for (param, value) in [("dx", self.dx), ("dy", self.dy)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(BusybeaverError::InvalidParameter {
                    param: param.to_string(),
                    message: format!("cell size must be positive, got {}", value),
                });
            }
        }
        if self.nx == 0 || self.ny == 0 {
            return Err(BusybeaverError::InvalidParameter {
                param: "nx/ny".to_string(),
                message: format!("grid must have at least one cell, got {}x{}", self.nx, self.ny),
            });
        }
        if self.nx.checked_mul(self.ny).is_none() {
            return Err(BusybeaverError::InvalidParameter {
                param: "nx/ny".to_string(),
                message: format!("grid of {}x{} points overflows", self.nx, self.ny),
            });
        }
        Ok(())
    }

    /// Total number of grid points
    pub fn len(&self) -> usize {
        self.nx.saturating_mul(self.ny)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Grid points in row-major order (rows along y, columns along x)
    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        (0..self.ny).flat_map(move |j| {
            (0..self.nx).map(move |i| {
                [
                    self.x0 + i as f64 * self.dx,
                    self.y0 + j as f64 * self.dy,
                ]
            })
        })
    }
}

/// Interpolation outcome for a single grid point
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PointOutcome {
    Interpolated { x: f64, y: f64, z: f64 },
    Failed { x: f64, y: f64, kind: String, reason: String },
}

impl PointOutcome {
    fn from_result(query: [f64; 2], result: Result<Sample>) -> Self {
        match result {
            Ok(sample) => PointOutcome::Interpolated {
                x: sample.x,
                y: sample.y,
                z: sample.z,
            },
            Err(err) => PointOutcome::Failed {
                x: query[0],
                y: query[1],
                kind: err.kind().to_string(),
                reason: err.to_string(),
            },
        }
    }

    /// Interpolated value, None for a failed point
    pub fn value(&self) -> Option<f64> {
        match self {
            PointOutcome::Interpolated { z, .. } => Some(*z),
            PointOutcome::Failed { .. } => None,
        }
    }

    pub fn position(&self) -> [f64; 2] {
        match self {
            PointOutcome::Interpolated { x, y, .. } | PointOutcome::Failed { x, y, .. } => [*x, *y],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, PointOutcome::Failed { .. })
    }
}

/// A grid point that could not be interpolated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointFailure {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub kind: String,
    pub reason: String,
}

/// Per-point results of a grid run, in grid-point order
#[derive(Debug, Clone, Serialize)]
pub struct GridReport {
    pub outcomes: Vec<PointOutcome>,
    pub interpolated: usize,
    pub failed: usize,
}

impl GridReport {
    fn from_outcomes(outcomes: Vec<PointOutcome>) -> Self {
        let failed = outcomes.iter().filter(|o| o.is_failed()).count();
        Self {
            interpolated: outcomes.len() - failed,
            failed,
            outcomes,
        }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Values in grid-point order, None where the point failed
    pub fn values(&self) -> Vec<Option<f64>> {
        self.outcomes.iter().map(PointOutcome::value).collect()
    }

    /// Which grid points failed and why
    pub fn failures(&self) -> Vec<PointFailure> {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(index, outcome)| match outcome {
                PointOutcome::Failed { x, y, kind, reason } => Some(PointFailure {
                    index,
                    x: *x,
                    y: *y,
                    kind: kind.clone(),
                    reason: reason.clone(),
                }),
                PointOutcome::Interpolated { .. } => None,
            })
            .collect()
    }

    /// Arrange the values as a `ny x nx` raster, NaN for failed points
    pub fn to_array(&self, grid: &GridSpec) -> Result<Array2<f64>> {
        let values: Vec<f64> = self
            .outcomes
            .iter()
            .map(|o| o.value().unwrap_or(f64::NAN))
            .collect();

        Array2::from_shape_vec((grid.ny, grid.nx), values).map_err(|e| {
            BusybeaverError::InvalidParameter {
                param: "grid".to_string(),
                message: format!(
                    "report has {} points but grid is {}x{}: {}",
                    self.outcomes.len(),
                    grid.nx,
                    grid.ny,
                    e
                ),
            }
        })
    }
}

/// Interpolate a single point from the sample set
pub fn interpolate_point(query: [f64; 2], samples: &SampleSet) -> Result<Sample> {
    let quad = samples.locate(query).into_quad()?;
    bilinear::interpolate(query, &quad)
}

/// Interpolate every grid point, one outcome per point in input order.
///
/// A length mismatch between `coordinates` and `values` rejects the whole
/// batch; every other failure is recorded against its grid point.
pub fn interpolate_grid<I>(
    grid_points: I,
    coordinates: &[[f64; 2]],
    values: &[f64],
) -> Result<GridReport>
where
    I: IntoIterator<Item = [f64; 2]>,
{
    let samples = SampleSet::new(coordinates.to_vec(), values.to_vec())?;
    Ok(interpolate_samples(grid_points, &samples))
}

/// Interpolate every grid point against an already validated sample set
pub fn interpolate_samples<I>(grid_points: I, samples: &SampleSet) -> GridReport
where
    I: IntoIterator<Item = [f64; 2]>,
{
    let outcomes = grid_points
        .into_iter()
        .map(|query| PointOutcome::from_result(query, interpolate_point(query, samples)))
        .collect();

    GridReport::from_outcomes(outcomes)
}

/// Parallel version of [`interpolate_samples`]; output order matches the input.
#[cfg(feature = "parallel")]
pub fn interpolate_samples_par(grid_points: &[[f64; 2]], samples: &SampleSet) -> GridReport {
    use rayon::prelude::*;

    let outcomes = grid_points
        .par_iter()
        .map(|&query| PointOutcome::from_result(query, interpolate_point(query, samples)))
        .collect();

    GridReport::from_outcomes(outcomes)
}

/// Sequential fallback when the parallel feature is disabled.
#[cfg(not(feature = "parallel"))]
pub fn interpolate_samples_par(grid_points: &[[f64; 2]], samples: &SampleSet) -> GridReport {
    interpolate_samples(grid_points.iter().copied(), samples)
}

/// Parallel version of [`interpolate_grid`]
pub fn interpolate_grid_par(
    grid_points: &[[f64; 2]],
    coordinates: &[[f64; 2]],
    values: &[f64],
) -> Result<GridReport> {
    let samples = SampleSet::new(coordinates.to_vec(), values.to_vec())?;
    Ok(interpolate_samples_par(grid_points, &samples))
}
