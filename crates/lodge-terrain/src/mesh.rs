//! Render mesh generation from a height field

use lodge_core::{LodgeError, Result, Vec3};

use crate::grid;
use crate::height_field::HeightField;
use crate::material::TerrainMaterial;
use crate::normals::smooth_normals;

/// Render-ready terrain geometry for one surface
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedMesh {
    /// Vertex positions, same order as the height field
    pub positions: Vec<Vec3>,
    /// UV coordinates in [0..1] over the whole terrain
    pub uvs: Vec<[f32; 2]>,
    /// Smooth vertex normals
    pub normals: Vec<Vec3>,
    /// Triangle indices (clockwise front faces)
    pub indices: Vec<u32>,
    /// Material for the single surface slot
    pub material: TerrainMaterial,
    /// AABB minimum corner
    pub aabb_min: [f32; 3],
    /// AABB maximum corner
    pub aabb_max: [f32; 3],
}

impl GeneratedMesh {
    /// Triangulate a height field and generate its UVs and normals.
    pub fn build(field: &HeightField, material: TerrainMaterial) -> Result<Self> {
        if !field.has_data() {
            return Err(LodgeError::NoHeightData);
        }
        field.validate()?;

        let indices = grid::triangulate(field.size_x, field.size_z)?;
        let uvs = grid::grid_uvs(field.size_x, field.size_z)?;
        let positions = field.vertices.clone();
        let normals = smooth_normals(&positions, &indices);
        let (aabb_min, aabb_max) = bounds(&positions);

        Ok(Self {
            positions,
            uvs,
            normals,
            indices,
            material,
            aabb_min,
            aabb_max,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Move one vertex in place. UVs and normals are left as they are, so
    /// shading around the vertex is stale until [`Self::recompute_normals`].
    pub fn patch_position(&mut self, index: usize, position: Vec3) -> Result<()> {
        let len = self.positions.len();
        let slot = self
            .positions
            .get_mut(index)
            .ok_or(LodgeError::VertexOutOfRange { index, len })?;
        *slot = position;

        for i in 0..3 {
            let c = position.to_array()[i];
            self.aabb_min[i] = self.aabb_min[i].min(c);
            self.aabb_max[i] = self.aabb_max[i].max(c);
        }
        Ok(())
    }

    /// Regenerate normals (and a tight AABB) from the current positions.
    pub fn recompute_normals(&mut self) {
        self.normals = smooth_normals(&self.positions, &self.indices);
        let (aabb_min, aabb_max) = bounds(&self.positions);
        self.aabb_min = aabb_min;
        self.aabb_max = aabb_max;
    }
}

fn bounds(positions: &[Vec3]) -> ([f32; 3], [f32; 3]) {
    let mut aabb_min = [f32::MAX; 3];
    let mut aabb_max = [f32::MIN; 3];
    for p in positions {
        let pos = p.to_array();
        for i in 0..3 {
            aabb_min[i] = aabb_min[i].min(pos[i]);
            aabb_max[i] = aabb_max[i].max(pos[i]);
        }
    }
    (aabb_min, aabb_max)
}
