//! Wavefront OBJ export for inspecting generated terrain in other tools

use std::fmt::{self, Write as _};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lodge_core::{LodgeError, Result};
use lodge_terrain::{GeneratedMesh, MeshSink};

/// Render a mesh as OBJ text with positions, UVs and normals.
///
/// OBJ treats counter-clockwise faces as front-facing, so every triangle is
/// written with its last two corners swapped.
pub fn to_obj(mesh: &GeneratedMesh) -> std::result::Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "# lodge terrain: {} vertices", mesh.vertex_count())?;
    writeln!(out, "o {}", mesh.material.name)?;

    for p in &mesh.positions {
        writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for uv in &mesh.uvs {
        writeln!(out, "vt {} {}", uv[0], 1.0 - uv[1])?;
    }
    for n in &mesh.normals {
        writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for tri in mesh.indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        writeln!(out, "f {a}/{a}/{a} {c}/{c}/{c} {b}/{b}/{b}")?;
    }
    Ok(out)
}

pub fn write_obj(mesh: &GeneratedMesh, path: &Path) -> Result<()> {
    let text = to_obj(mesh).map_err(|e| LodgeError::IoError(io::Error::other(e)))?;
    fs::write(path, text).map_err(LodgeError::from)
}

/// Mesh sink that rewrites an OBJ file on every submission
pub struct ObjSink {
    path: PathBuf,
}

impl ObjSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MeshSink for ObjSink {
    fn submit_mesh(&mut self, mesh: &GeneratedMesh) -> Result<()> {
        write_obj(mesh, &self.path)?;
        log::info!("Wrote {}", self.path.display());
        Ok(())
    }
}
