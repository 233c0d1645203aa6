//! Heightmap import command

use anyhow::{Context, Result};
use lodge_terrain::{HeightmapSource, NullSink, TerrainBuilder};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::load_config;

pub struct ImportArgs {
    pub image: Option<String>,
    pub output: String,
    pub config: String,
    pub height_scale: Option<f32>,
    pub raw: bool,
}

pub fn run(args: ImportArgs) -> Result<()> {
    let (mut config, base) = load_config(&args.config);
    if let Some(scale) = args.height_scale {
        config.height_scale = scale;
    }
    if args.raw {
        config.normalize_heights = false;
    }

    let image = args
        .image
        .map(PathBuf::from)
        .or_else(|| config.heightmap(&base));

    let source = match &image {
        Some(path) => HeightmapSource::open(path)
            .with_context(|| format!("Failed to open heightmap {}", path.display()))?,
        None => HeightmapSource::empty(),
    };

    let mut builder = TerrainBuilder::new(config, Box::new(NullSink), Box::new(NullSink));
    builder.set_heightmap_source(Some(Rc::new(source)));
    builder
        .regenerate_from_heightmap()
        .context("Failed to generate terrain data")?;

    let field = builder.field();
    field
        .save(Path::new(&args.output))
        .with_context(|| format!("Failed to write {}", args.output))?;

    match &image {
        Some(path) => println!("Imported {} -> {}", path.display(), args.output),
        None => println!("No heightmap given, wrote flat terrain -> {}", args.output),
    }
    println!(
        "Grid: {}x{} ({} vertices)",
        field.size_x,
        field.size_z,
        field.len()
    );
    if let Some((lo, hi)) = field.height_range() {
        println!("Height range: {:.3} .. {:.3}", lo, hi);
    }

    Ok(())
}
