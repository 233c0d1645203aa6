//! Trimesh collision data derived from the render mesh

use crate::mesh::GeneratedMesh;

/// Triangle-mesh collision shape, identical to the render triangles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionApproximation {
    pub vertices: Vec<[f32; 3]>,
    pub triangles: Vec<[u32; 3]>,
}

impl CollisionApproximation {
    /// Derive collision data 1:1 from a mesh's positions and indices.
    pub fn from_mesh(mesh: &GeneratedMesh) -> Self {
        let vertices = mesh.positions.iter().map(|p| p.to_array()).collect();
        let triangles = mesh
            .indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
            .collect();
        Self {
            vertices,
            triangles,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::height_field::HeightField;
    use crate::material::TerrainMaterial;

    #[test]
    fn trimesh_matches_render_triangles() {
        let field = HeightField::flat(3, 3, 1.0);
        let mesh = GeneratedMesh::build(&field, TerrainMaterial::default()).unwrap();
        let collision = CollisionApproximation::from_mesh(&mesh);

        assert_eq!(collision.vertices.len(), 9);
        assert_eq!(collision.triangle_count(), 8);
        assert_eq!(collision.triangles[0], [0, 1, 3]);
        assert_eq!(collision.triangles[1], [1, 4, 3]);

        for tri in &collision.triangles {
            for &i in tri {
                assert!((i as usize) < collision.vertices.len());
            }
        }
    }
}
