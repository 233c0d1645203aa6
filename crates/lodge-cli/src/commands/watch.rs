//! Rebuild terrain whenever the heightmap image changes

use anyhow::{Context, Result};
use lodge_physics::{PhysicsWorld, TerrainCollider};
use lodge_terrain::{HeightmapSource, MeshSink, NullSink, TerrainBuilder};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::sync::mpsc;
use std::time::Duration;

use super::load_config;
use crate::obj::ObjSink;

pub fn run(image: &str, config_path: &str, obj: Option<&str>) -> Result<()> {
    let (config, _) = load_config(config_path);
    let image_path = Path::new(image);

    let source = Rc::new(
        HeightmapSource::open(image_path)
            .with_context(|| format!("Failed to open heightmap {}", image))?,
    );

    let physics = Rc::new(RefCell::new(PhysicsWorld::new()));
    let mesh_sink: Box<dyn MeshSink> = match obj {
        Some(path) => Box::new(ObjSink::new(path)),
        None => Box::new(NullSink),
    };
    let mut builder = TerrainBuilder::new(
        config,
        mesh_sink,
        Box::new(TerrainCollider::new(physics.clone())),
    );
    builder.set_heightmap_source(Some(source.clone()));
    builder
        .regenerate_from_heightmap()
        .context("Failed to build initial terrain")?;

    let (tx, rx) = mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)
        .context("Failed to create file watcher")?;
    debouncer
        .watcher()
        .watch(image_path, RecursiveMode::NonRecursive)
        .context("Failed to watch heightmap")?;

    println!("Watching {} for changes... (Ctrl+C to stop)", image);

    for result in rx {
        match result {
            Ok(_events) => {
                if let Err(e) = source.reload() {
                    eprintln!("Reload failed, keeping previous terrain: {}", e);
                    continue;
                }
                match builder.process_changes() {
                    Ok(true) => {
                        if let Some(mesh) = builder.mesh() {
                            println!(
                                "Rebuilt: {} vertices, {} triangles",
                                mesh.vertex_count(),
                                mesh.triangle_count()
                            );
                        }
                    }
                    Ok(false) => {}
                    Err(e) => eprintln!("Rebuild failed: {}", e),
                }
            }
            Err(e) => {
                eprintln!("Watch error: {:?}", e);
            }
        }
    }

    Ok(())
}
