//! Test data generation utilities.
//!
//! This module writes mesh result datasets with known sample layouts for
//! testing the busybeaver server.

use serde_json::json;
use std::path::Path;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Element centres around the measured reference point (594238.084, 6645064.994),
/// with the nearest element of every quadrant surrounded by farther ones.
pub const REFERENCE_ELEMENTS: [(f64, f64, f64); 8] = [
    (594240.125, 6645068.500, 0.0190),
    (594238.500, 6645066.167, 0.0221),
    (594235.250, 6645066.900, 0.2811),
    (594236.979, 6645065.667, 0.2365),
    (594236.938, 6645064.167, 0.0235),
    (594235.000, 6645062.000, 0.0402),
    (594238.688, 6645063.833, 0.0226),
    (594241.333, 6645061.250, 0.0117),
];

/// Writes the reference neighbourhood as a dataset with a single
/// "Maximum water depth" item and one time step.
pub fn create_reference_mesh(path: &Path) -> Result<()> {
    let coordinates: Vec<[f64; 2]> = REFERENCE_ELEMENTS.iter().map(|&(x, y, _)| [x, y]).collect();
    let depths: Vec<f64> = REFERENCE_ELEMENTS.iter().map(|&(_, _, z)| z).collect();

    let dataset = json!({
        "title": "test_max_results",
        "element_coordinates": coordinates,
        "items": {
            "Maximum water depth": { "unit": "m", "values": [depths] }
        }
    });

    std::fs::write(path, serde_json::to_string_pretty(&dataset)?)?;
    Ok(())
}

/// Writes a four-element kite-shaped mesh with two items.
///
/// "Maximum water depth" has one time step with values 4, 3, 1, 2;
/// "Current speed" has two time steps, the second constant at 0.5.
pub fn create_kite_mesh(path: &Path) -> Result<()> {
    let dataset = json!({
        "title": "kite",
        "element_coordinates": [[2.0, 2.0], [0.0, 1.0], [0.0, 0.0], [1.0, 0.0]],
        "items": {
            "Maximum water depth": { "unit": "m", "values": [[4.0, 3.0, 1.0, 2.0]] },
            "Current speed": {
                "unit": "m/s",
                "values": [[0.4, 0.3, 0.1, 0.2], [0.5, 0.5, 0.5, 0.5]]
            }
        }
    });

    std::fs::write(path, serde_json::to_string_pretty(&dataset)?)?;
    Ok(())
}

/// Writes an `nx` x `ny` lattice of element centres with a deterministic
/// jitter, so neighbouring quads are never parallelograms. Depth follows a
/// plane, `z = 0.1 * x + 0.2 * y`.
pub fn create_jittered_mesh(path: &Path, nx: usize, ny: usize) -> Result<()> {
    let mut coordinates = Vec::with_capacity(nx * ny);
    let mut depths = Vec::with_capacity(nx * ny);

    for j in 0..ny {
        for i in 0..nx {
            let jitter_x = 0.13 * ((i * 7 + j * 3) % 5) as f64;
            let jitter_y = 0.11 * ((i * 2 + j * 5) % 7) as f64;
            let x = i as f64 * 2.0 + jitter_x;
            let y = j as f64 * 2.0 + jitter_y;
            coordinates.push([x, y]);
            depths.push(0.1 * x + 0.2 * y);
        }
    }

    let dataset = json!({
        "title": "jittered",
        "element_coordinates": coordinates,
        "items": {
            "Maximum water depth": { "unit": "m", "values": [depths] }
        }
    });

    std::fs::write(path, serde_json::to_string(&dataset)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_kite_mesh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kite.json");
        create_kite_mesh(&path).unwrap();

        let dataset = busybeaver::data_loader::load_mesh_file(&path).unwrap();
        assert_eq!(dataset.element_count(), 4);
        assert_eq!(dataset.items.len(), 2);
    }

    #[test]
    fn test_create_jittered_mesh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jittered.json");
        create_jittered_mesh(&path, 6, 4).unwrap();

        let dataset = busybeaver::data_loader::load_mesh_file(&path).unwrap();
        assert_eq!(dataset.element_count(), 24);
    }
}
