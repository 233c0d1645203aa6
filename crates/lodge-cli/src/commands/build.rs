//! Mesh build command

use anyhow::{Context, Result};
use lodge_physics::{PhysicsWorld, TerrainCollider};
use lodge_terrain::{HeightField, MeshSink, NullSink, TerrainBuilder};
use serde::Serialize;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use super::load_config;
use crate::obj::ObjSink;

pub struct BuildArgs {
    pub field: String,
    pub config: String,
    pub obj: Option<String>,
    pub probe: Option<[f32; 2]>,
    pub format: String,
}

#[derive(Debug, Serialize)]
struct BuildReport {
    size_x: u32,
    size_z: u32,
    vertices: usize,
    triangles: usize,
    aabb_min: [f32; 3],
    aabb_max: [f32; 3],
    colliders: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    probe: Option<ProbeReport>,
}

#[derive(Debug, Serialize)]
struct ProbeReport {
    x: f32,
    z: f32,
    height: Option<f32>,
}

pub fn run(args: BuildArgs) -> Result<()> {
    let (config, _) = load_config(&args.config);
    let field = HeightField::load(Path::new(&args.field))
        .with_context(|| format!("Failed to load height field {}", args.field))?;

    let physics = Rc::new(RefCell::new(PhysicsWorld::new()));
    let mesh_sink: Box<dyn MeshSink> = match &args.obj {
        Some(path) => Box::new(ObjSink::new(path)),
        None => Box::new(NullSink),
    };
    let mut builder = TerrainBuilder::new(
        config,
        mesh_sink,
        Box::new(TerrainCollider::new(physics.clone())),
    );
    builder
        .set_height_field(field)
        .context("Failed to build terrain mesh")?;

    let mesh = builder
        .mesh()
        .context("Terrain builder produced no mesh")?;
    let world = physics.borrow();
    let report = BuildReport {
        size_x: builder.field().size_x,
        size_z: builder.field().size_z,
        vertices: mesh.vertex_count(),
        triangles: mesh.triangle_count(),
        aabb_min: mesh.aabb_min,
        aabb_max: mesh.aabb_max,
        colliders: world.collider_count(),
        probe: args.probe.map(|[x, z]| ProbeReport {
            x,
            z,
            height: world.height_at(x, z),
        }),
    };

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_report(&report),
    }

    Ok(())
}

fn print_report(report: &BuildReport) {
    println!("Grid: {}x{}", report.size_x, report.size_z);
    println!("Vertices: {}", report.vertices);
    println!("Triangles: {}", report.triangles);
    println!(
        "Bounds: ({:.2}, {:.2}, {:.2}) .. ({:.2}, {:.2}, {:.2})",
        report.aabb_min[0],
        report.aabb_min[1],
        report.aabb_min[2],
        report.aabb_max[0],
        report.aabb_max[1],
        report.aabb_max[2],
    );
    println!("Colliders: {}", report.colliders);
    if let Some(probe) = &report.probe {
        match probe.height {
            Some(h) => println!("Height at ({}, {}): {:.3}", probe.x, probe.z, h),
            None => println!("Height at ({}, {}): off terrain", probe.x, probe.z),
        }
    }
}
