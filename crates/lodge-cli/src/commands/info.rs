//! Height field information command

use anyhow::{Context, Result};
use lodge_terrain::{grid, HeightField};
use std::path::Path;

pub fn run(field_path: &str) -> Result<()> {
    let field = HeightField::load(Path::new(field_path))
        .with_context(|| format!("Failed to load height field {}", field_path))?;

    println!("Height field: {}", field_path);
    println!("Grid: {}x{}", field.size_x, field.size_z);
    println!("Vertices: {}", field.len());

    match grid::ensure_cells(field.size_x, field.size_z) {
        Ok(()) => println!(
            "Triangles: {}",
            grid::index_count(field.size_x, field.size_z) / 3
        ),
        Err(e) => println!("Triangles: none ({})", e),
    }

    match field.height_range() {
        Some((lo, hi)) => println!("Height range: {:.3} .. {:.3}", lo, hi),
        None => println!("Height range: no height data"),
    }

    Ok(())
}
