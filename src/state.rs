//! Application state management for busybeaver.
//!
//! This module defines the mesh dataset document and the shared state passed
//! to all handlers: the selected item at one time step, held read-only as a
//! sample set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{BusybeaverError, Result};
use crate::interpolation::SampleSet;

/// A scalar result item of a mesh dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemData {
    /// Unit of the values
    #[serde(default)]
    pub unit: Option<String>,
    /// One value per element, for each time step
    pub values: Vec<Vec<f64>>,
}

/// An unstructured mesh result: element centres and scalar items over time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshDataset {
    /// Dataset title
    #[serde(default)]
    pub title: String,
    /// Element centre coordinates
    pub element_coordinates: Vec<[f64; 2]>,
    /// Scalar items by name
    pub items: BTreeMap<String, ItemData>,
}

impl MeshDataset {
    /// Number of elements in the mesh
    pub fn element_count(&self) -> usize {
        self.element_coordinates.len()
    }

    /// Check that every time step of every item has one value per element
    pub fn validate(&self) -> Result<()> {
        for item in self.items.values() {
            for step in &item.values {
                if step.len() != self.element_coordinates.len() {
                    return Err(BusybeaverError::ShapeMismatch {
                        coordinates: self.element_coordinates.len(),
                        values: step.len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Values of `item` at `time_index`
    pub fn read_item(&self, item: &str, time_index: usize) -> Result<&[f64]> {
        let data = self.items.get(item).ok_or_else(|| BusybeaverError::DataNotFound {
            message: format!("Item not found: {}", item),
        })?;

        data.values
            .get(time_index)
            .map(Vec::as_slice)
            .ok_or_else(|| BusybeaverError::DataNotFound {
                message: format!(
                    "Time index {} out of range for item {} ({} time steps)",
                    time_index,
                    item,
                    data.values.len()
                ),
            })
    }

    /// Build the sample set of `item` at `time_index`
    pub fn samples(&self, item: &str, time_index: usize) -> Result<SampleSet> {
        let values = self.read_item(item, time_index)?;
        SampleSet::new(self.element_coordinates.clone(), values.to_vec())
    }
}

/// Summary of an item in the dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemInfo {
    pub name: String,
    pub unit: Option<String>,
    pub time_steps: usize,
}

/// Metadata describing the loaded samples
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Dataset title
    pub title: String,
    /// Item being interpolated
    pub item: String,
    /// Unit of the item values
    pub unit: Option<String>,
    /// Time step the samples were read from
    pub time_index: usize,
    /// Number of samples
    pub sample_count: usize,
    /// Bounding box `[min_x, min_y, max_x, max_y]`
    pub extent: Option<[f64; 4]>,
    /// All items available in the dataset
    pub items: Vec<ItemInfo>,
}

/// The main application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Path of the loaded dataset
    pub file_path: PathBuf,
    /// Dataset metadata
    pub metadata: Metadata,
    /// Samples of the selected item
    pub samples: SampleSet,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Config, file_path: PathBuf, metadata: Metadata, samples: SampleSet) -> Self {
        Self {
            config,
            file_path,
            metadata,
            samples,
        }
    }

    /// Approximate memory held by the samples, in bytes
    pub fn data_memory_bytes(&self) -> usize {
        self.samples.len() * std::mem::size_of::<[f64; 3]>()
    }

    /// Validate that the application state is consistent and ready for use
    pub fn validate(&self) -> Result<()> {
        if self.samples.is_empty() {
            return Err(BusybeaverError::DataNotFound {
                message: format!("No samples for item {}", self.metadata.item),
            });
        }

        if self.metadata.sample_count != self.samples.len() {
            return Err(BusybeaverError::DataNotFound {
                message: format!(
                    "Metadata reports {} samples but {} are loaded",
                    self.metadata.sample_count,
                    self.samples.len()
                ),
            });
        }

        Ok(())
    }
}
