//! Single-vertex edit command

use anyhow::{Context, Result};
use lodge_core::Vec3;
use lodge_terrain::{HeightField, MeshSink, NullSink, TerrainBuilder, TerrainConfig};
use std::path::Path;

use crate::obj::ObjSink;

pub fn run(field_path: &str, index: usize, position: [f32; 3], obj: Option<&str>) -> Result<()> {
    let path = Path::new(field_path);
    let field = HeightField::load(path)
        .with_context(|| format!("Failed to load height field {}", field_path))?;

    let mut builder = TerrainBuilder::new(TerrainConfig::default(), Box::new(NullSink), Box::new(NullSink));
    builder
        .set_height_field(field)
        .context("Failed to build terrain mesh")?;

    let old = builder.field().vertices.get(index).copied();
    builder
        .update_vertex(index, Vec3::from_array(position))
        .with_context(|| format!("Failed to move vertex {}", index))?;

    builder
        .field()
        .save(path)
        .with_context(|| format!("Failed to write {}", field_path))?;

    if let Some(obj_path) = obj {
        let mut sink = ObjSink::new(obj_path);
        if let Some(mesh) = builder.mesh() {
            sink.submit_mesh(mesh)?;
        }
    }

    if let Some(old) = old {
        println!(
            "Vertex {}: ({}, {}, {}) -> ({}, {}, {})",
            index, old.x, old.y, old.z, position[0], position[1], position[2]
        );
    }
    println!("Saved {}", field_path);

    Ok(())
}
