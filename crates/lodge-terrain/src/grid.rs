//! Grid triangulation and UV layout
//!
//! Every grid cell `(x, z)` is split into two triangles over its corners
//! `v0` (top-left), `v1` (top-right), `v2` (bottom-left) and `v3`
//! (bottom-right): `(v0, v1, v2)` then `(v1, v3, v2)`. Seen from above with
//! x along +X and z along +Z this winding is clockwise, which is the
//! front-face convention the terrain is rendered with.

use lodge_core::{LodgeError, Result};

/// Check that a grid has at least one cell.
pub fn ensure_cells(size_x: u32, size_z: u32) -> Result<()> {
    if size_x <= 1 || size_z <= 1 {
        return Err(LodgeError::NoGeometry { size_x, size_z });
    }
    Ok(())
}

/// Number of indices [`triangulate`] emits for a grid.
pub fn index_count(size_x: u32, size_z: u32) -> usize {
    if size_x <= 1 || size_z <= 1 {
        return 0;
    }
    6 * (size_x as usize - 1) * (size_z as usize - 1)
}

/// Build the triangle-list index buffer for a `size_x` x `size_z` grid.
///
/// Cells are emitted column by column: x outer, z inner.
pub fn triangulate(size_x: u32, size_z: u32) -> Result<Vec<u32>> {
    ensure_cells(size_x, size_z)?;

    let mut indices = Vec::with_capacity(index_count(size_x, size_z));

    for x in 0..size_x - 1 {
        for z in 0..size_z - 1 {
            let v0 = z * size_x + x;
            let v1 = v0 + 1;
            let v2 = (z + 1) * size_x + x;
            let v3 = v2 + 1;

            indices.extend_from_slice(&[v0, v1, v2]);
            indices.extend_from_slice(&[v1, v3, v2]);
        }
    }

    Ok(indices)
}

/// UV for vertex `index`: column over `size_x - 1`, row over `size_z - 1`.
pub fn uv_for_index(index: usize, size_x: u32, size_z: u32) -> [f32; 2] {
    let cols = size_x as usize;
    let u = (index % cols) as f32 / (size_x - 1) as f32;
    let v = (index / cols) as f32 / (size_z - 1) as f32;
    [u, v]
}

/// Per-vertex UVs for the whole grid, spanning `[0, 1]` on both axes.
pub fn grid_uvs(size_x: u32, size_z: u32) -> Result<Vec<[f32; 2]>> {
    ensure_cells(size_x, size_z)?;
    let count = (size_x as usize) * (size_z as usize);
    Ok((0..count)
        .map(|i| uv_for_index(i, size_x, size_z))
        .collect())
}
