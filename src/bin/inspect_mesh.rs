use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use busybeaver::data_loader::load_mesh_file;
use busybeaver::Quadrant;

/// Print a summary of a mesh dataset, optionally with the quadrant
/// neighbours and interpolated value at one point
#[derive(Parser, Debug)]
#[command(name = "inspect_mesh")]
struct Args {
    /// Path to the mesh result dataset (JSON)
    mesh_file: PathBuf,

    /// Item to inspect
    #[arg(short, long, default_value = "Maximum water depth")]
    item: String,

    /// Time step of the item
    #[arg(short, long, default_value = "0")]
    time_index: usize,

    /// Query point as `x,y`
    #[arg(short, long, value_delimiter = ',', num_args = 2)]
    point: Option<Vec<f64>>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let dataset = load_mesh_file(&args.mesh_file)
        .with_context(|| format!("reading {}", args.mesh_file.display()))?;

    println!("Inspecting mesh dataset: {}", args.mesh_file.display());
    println!("\n=== DATASET ===");
    println!("  title: {}", dataset.title);
    println!("  elements: {}", dataset.element_count());

    println!("\nItems:");
    for (name, data) in &dataset.items {
        println!(
            "  {} [{}] - {} time step(s)",
            name,
            data.unit.as_deref().unwrap_or("-"),
            data.values.len()
        );
    }

    let samples = dataset
        .samples(&args.item, args.time_index)
        .with_context(|| format!("selecting item {:?}", args.item))?;

    if let Some([min_x, min_y, max_x, max_y]) = samples.extent() {
        println!("\nExtent: x {} .. {}, y {} .. {}", min_x, max_x, min_y, max_y);
    }

    if let Some(point) = args.point {
        let query = [point[0], point[1]];
        let neighbours = samples.locate(query);

        println!("\nNeighbours of ({}, {}):", query[0], query[1]);
        for quadrant in Quadrant::ALL {
            match neighbours.get(quadrant) {
                Some(s) => println!("  {:<10} ({:.3}, {:.3}) = {:.4}", quadrant, s.x, s.y, s.z),
                None => println!("  {:<10} none", quadrant),
            }
        }

        match busybeaver::interpolation::interpolate_point(query, &samples) {
            Ok(sample) => println!("\nInterpolated value: {:.6}", sample.z),
            Err(e) => println!("\nNo value: {}", e),
        }
    }

    Ok(())
}
