//! Mesh dataset loading functionality.
//!
//! This module reads a mesh result dataset into memory, selects the configured
//! item at the configured time step, and builds the application state around
//! the resulting sample set.

use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{BusybeaverError, Result};
use crate::logging::{log_data_load_stats, log_timed_operation};
use crate::state::{AppState, ItemInfo, Metadata, MeshDataset};

/// Load a mesh dataset into memory and create the application state
pub fn load_mesh(path: &Path, config: Config) -> Result<AppState> {
    let dataset = log_timed_operation("read_mesh_file", || load_mesh_file(path))?;

    let item = config.data.item.clone();
    let time_index = config.data.time_index;
    let samples = dataset.samples(&item, time_index)?;

    let unit = dataset.items.get(&item).and_then(|i| i.unit.clone());
    let items: Vec<ItemInfo> = dataset
        .items
        .iter()
        .map(|(name, data)| ItemInfo {
            name: name.clone(),
            unit: data.unit.clone(),
            time_steps: data.values.len(),
        })
        .collect();

    let metadata = Metadata {
        title: dataset.title.clone(),
        item,
        unit,
        time_index,
        sample_count: samples.len(),
        extent: samples.extent(),
        items,
    };

    let item_names: Vec<&str> = metadata.items.iter().map(|i| i.name.as_str()).collect();
    let state = AppState::new(config, path.to_path_buf(), metadata.clone(), samples);

    log_data_load_stats(
        &path.display().to_string(),
        &metadata.item,
        metadata.time_index,
        &item_names,
        metadata.sample_count,
        state.data_memory_bytes(),
    );

    Ok(state)
}

/// Read and validate a mesh dataset file
pub fn load_mesh_file(path: &Path) -> Result<MeshDataset> {
    if !path.exists() {
        return Err(BusybeaverError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let dataset: MeshDataset = serde_json::from_str(&content)?;

    info!("Opened mesh dataset: {}", path.display());
    debug!("Dataset has {} elements", dataset.element_count());
    debug!("Dataset has {} items", dataset.items.len());

    if dataset.element_coordinates.is_empty() {
        warn!("Mesh dataset {} has no elements", path.display());
    }

    dataset.validate()?;

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_dataset(dir: &Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("mesh.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    const DATASET: &str = r#"{
        "title": "test_max_results",
        "element_coordinates": [[2.0, 2.0], [0.0, 1.0], [0.0, 0.0], [1.0, 0.0]],
        "items": {
            "Maximum water depth": {"unit": "m", "values": [[4.0, 3.0, 1.0, 2.0]]},
            "Maximum current speed": {"unit": "m/s", "values": [[0.4, 0.3, 0.1, 0.2], [0.5, 0.5, 0.5, 0.5]]}
        }
    }"#;

    #[test]
    fn test_load_mesh() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dataset(dir.path(), DATASET);

        let state = load_mesh(&path, Config::default()).unwrap();

        assert!(state.validate().is_ok());
        assert_eq!(state.metadata.sample_count, 4);
        assert_eq!(state.metadata.unit.as_deref(), Some("m"));
        assert_eq!(state.metadata.extent, Some([0.0, 0.0, 2.0, 2.0]));
        assert_eq!(state.metadata.items.len(), 2);
        assert_eq!(state.samples.values(), &[4.0, 3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_load_mesh_selects_time_step() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dataset(dir.path(), DATASET);

        let mut config = Config::default();
        config.data.item = "Maximum current speed".to_string();
        config.data.time_index = 1;

        let state = load_mesh(&path, config).unwrap();
        assert_eq!(state.samples.values(), &[0.5, 0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_load_mesh_missing_item() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dataset(dir.path(), DATASET);

        let mut config = Config::default();
        config.data.item = "Surface elevation".to_string();

        assert!(matches!(
            load_mesh(&path, config),
            Err(BusybeaverError::DataNotFound { .. })
        ));
    }

    #[test]
    fn test_load_mesh_file_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            load_mesh_file(&missing),
            Err(BusybeaverError::Io(_))
        ));

        let path = write_dataset(dir.path(), "{not json");
        assert!(matches!(
            load_mesh_file(&path),
            Err(BusybeaverError::Json(_))
        ));

        let path = write_dataset(
            dir.path(),
            r#"{"element_coordinates": [[0.0, 0.0]], "items": {"d": {"values": [[1.0, 2.0]]}}}"#,
        );
        assert!(matches!(
            load_mesh_file(&path),
            Err(BusybeaverError::ShapeMismatch { .. })
        ));
    }
}
