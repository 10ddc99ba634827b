//! Common utilities for interpolation algorithms.
//!
//! This module provides the point types and the quadrant partition shared by
//! the locator, the bilinear solver and the grid driver.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar sample at a planar position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The planar position of this sample
    pub fn position(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<(f64, f64, f64)> for Sample {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self { x, y, z }
    }
}

/// One of the four axis-aligned quadrants around a query point.
///
/// Samples on the vertical line through the query belong to the eastern
/// quadrants and samples on the horizontal line to the northern ones, so
/// every sample lands in exactly one quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    /// x >= xi and y >= yi
    NorthEast,
    /// x < xi and y >= yi
    NorthWest,
    /// x < xi and y < yi
    SouthWest,
    /// x >= xi and y < yi
    SouthEast,
}

impl Quadrant {
    /// All quadrants in corner order (q0, q1, q2, q3)
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthEast,
        Quadrant::NorthWest,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    /// Classify `point` relative to `query`
    pub fn classify(point: [f64; 2], query: [f64; 2]) -> Self {
        let [x, y] = point;
        let [xi, yi] = query;

        if x >= xi && y >= yi {
            Quadrant::NorthEast
        } else if x < xi && y >= yi {
            Quadrant::NorthWest
        } else if x < xi && y < yi {
            Quadrant::SouthWest
        } else {
            Quadrant::SouthEast
        }
    }

    /// Corner index (0..4) of this quadrant
    pub fn index(self) -> usize {
        match self {
            Quadrant::NorthEast => 0,
            Quadrant::NorthWest => 1,
            Quadrant::SouthWest => 2,
            Quadrant::SouthEast => 3,
        }
    }

    /// Whether `point` satisfies this quadrant's defining inequality
    pub fn contains(self, point: [f64; 2], query: [f64; 2]) -> bool {
        Self::classify(point, query) == self
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quadrant::NorthEast => "north-east",
            Quadrant::NorthWest => "north-west",
            Quadrant::SouthWest => "south-west",
            Quadrant::SouthEast => "south-east",
        };
        f.pad(name)
    }
}

/// Planar Euclidean distance between two points
pub fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    (dx * dx + dy * dy).sqrt()
}

/// Get the weights for linear interpolation
pub fn linear_weight(fraction: f64) -> (f64, f64) {
    (1.0 - fraction, fraction)
}
