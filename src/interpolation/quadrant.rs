//! Quadrant nearest-neighbour search.
//!
//! For a query point, finds the closest sample in each of the four
//! axis-aligned quadrants around it. The search is a linear scan over the
//! samples with no spatial index.

use serde::Serialize;

use super::common::{distance, Quadrant, Sample};
use crate::error::{BusybeaverError, Result};

/// Scattered samples stored as parallel coordinate and value arrays
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    coordinates: Vec<[f64; 2]>,
    values: Vec<f64>,
}

impl SampleSet {
    /// Create a sample set, rejecting arrays of different lengths
    pub fn new(coordinates: Vec<[f64; 2]>, values: Vec<f64>) -> Result<Self> {
        check_shape(&coordinates, &values)?;
        Ok(Self {
            coordinates,
            values,
        })
    }

    pub fn coordinates(&self) -> &[[f64; 2]] {
        &self.coordinates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample at index `i`
    pub fn get(&self, i: usize) -> Option<Sample> {
        let [x, y] = *self.coordinates.get(i)?;
        let z = *self.values.get(i)?;
        Some(Sample { x, y, z })
    }

    /// Bounding box as `[min_x, min_y, max_x, max_y]`, None when empty
    pub fn extent(&self) -> Option<[f64; 4]> {
        let first = self.coordinates.first()?;
        let init = [first[0], first[1], first[0], first[1]];
        Some(self.coordinates.iter().fold(init, |acc, &[x, y]| {
            [acc[0].min(x), acc[1].min(y), acc[2].max(x), acc[3].max(y)]
        }))
    }

    /// Find the nearest sample in each quadrant around `query`
    pub fn locate(&self, query: [f64; 2]) -> QuadrantNeighbours {
        scan(query, &self.coordinates, &self.values)
    }
}

/// The nearest sample found in each quadrant, indexed by corner order
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuadrantNeighbours {
    pub query: [f64; 2],
    pub neighbours: [Option<Sample>; 4],
}

impl QuadrantNeighbours {
    /// Nearest sample in `quadrant`, if any
    pub fn get(&self, quadrant: Quadrant) -> Option<Sample> {
        self.neighbours[quadrant.index()]
    }

    /// Quadrants that had no sample
    pub fn missing(&self) -> Vec<Quadrant> {
        Quadrant::ALL
            .into_iter()
            .filter(|q| self.get(*q).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.neighbours.iter().all(Option::is_some)
    }

    /// Turn the neighbours into an interpolation quad, failing with
    /// `EmptyQuadrant` if any quadrant is absent
    pub fn into_quad(self) -> Result<InterpolationQuad> {
        match self.neighbours {
            [Some(q0), Some(q1), Some(q2), Some(q3)] => Ok(InterpolationQuad { q0, q1, q2, q3 }),
            _ => Err(BusybeaverError::EmptyQuadrant {
                x: self.query[0],
                y: self.query[1],
                quadrants: self.missing(),
            }),
        }
    }
}

/// Four corner samples, one per quadrant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InterpolationQuad {
    pub q0: Sample,
    pub q1: Sample,
    pub q2: Sample,
    pub q3: Sample,
}

impl InterpolationQuad {
    pub fn corners(&self) -> [Sample; 4] {
        [self.q0, self.q1, self.q2, self.q3]
    }
}

/// Find the nearest sample in each quadrant around `query`.
///
/// `coordinates` and `values` are parallel arrays; a length mismatch is
/// rejected before scanning. Exact distance ties keep the sample seen first.
pub fn locate(
    query: [f64; 2],
    coordinates: &[[f64; 2]],
    values: &[f64],
) -> Result<QuadrantNeighbours> {
    check_shape(coordinates, values)?;
    Ok(scan(query, coordinates, values))
}

fn check_shape(coordinates: &[[f64; 2]], values: &[f64]) -> Result<()> {
    if coordinates.len() != values.len() {
        return Err(BusybeaverError::ShapeMismatch {
            coordinates: coordinates.len(),
            values: values.len(),
        });
    }
    Ok(())
}

fn scan(query: [f64; 2], coordinates: &[[f64; 2]], values: &[f64]) -> QuadrantNeighbours {
    let mut best = [f64::INFINITY; 4];
    let mut winners: [Option<usize>; 4] = [None; 4];

    for (i, &point) in coordinates.iter().enumerate() {
        let d = distance(query, point);
        let q = Quadrant::classify(point, query).index();

        // strict comparison keeps the first of equally distant samples
        if d < best[q] {
            best[q] = d;
            winners[q] = Some(i);
        }
    }

    let neighbours = winners.map(|winner| {
        winner.map(|i| Sample {
            x: coordinates[i][0],
            y: coordinates[i][1],
            z: values[i],
        })
    });

    QuadrantNeighbours { query, neighbours }
}
