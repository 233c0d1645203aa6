//! Row-major grid of terrain vertex positions

use std::fs;
use std::path::Path;

use lodge_core::{LodgeError, Result, Vec3};
use serde::{Deserialize, Serialize};

/// A grid of 3D positions indexed row-major by `(x, z)`.
///
/// `vertices[z * size_x + x]` is the vertex at column `x`, row `z`. This is
/// the authored terrain resource: it is stored as TOML and only changes
/// through [`HeightField::set_vertex`] or wholesale replacement.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HeightField {
    pub size_x: u32,
    pub size_z: u32,
    #[serde(default)]
    pub vertices: Vec<Vec3>,
}

impl HeightField {
    /// Create a height field, checking that the vertex count matches the grid.
    pub fn new(size_x: u32, size_z: u32, vertices: Vec<Vec3>) -> Result<Self> {
        let field = Self {
            size_x,
            size_z,
            vertices,
        };
        field.validate()?;
        Ok(field)
    }

    /// A zero-height plane with vertices `spacing` apart.
    pub fn flat(size_x: u32, size_z: u32, spacing: f32) -> Self {
        let mut vertices = Vec::with_capacity((size_x as usize) * (size_z as usize));
        for z in 0..size_z {
            for x in 0..size_x {
                vertices.push(Vec3::new(x as f32 * spacing, 0.0, z as f32 * spacing));
            }
        }
        Self {
            size_x,
            size_z,
            vertices,
        }
    }

    /// Check the size invariants. An empty vertex list is allowed and means
    /// "no height data".
    pub fn validate(&self) -> Result<()> {
        if self.size_x == 0 || self.size_z == 0 {
            return Err(LodgeError::InvalidHeightField(format!(
                "grid must be at least 1x1, got {}x{}",
                self.size_x, self.size_z
            )));
        }
        let expected = self.expected_len();
        if !self.vertices.is_empty() && self.vertices.len() != expected {
            return Err(LodgeError::InvalidHeightField(format!(
                "{}x{} grid needs {} vertices, got {}",
                self.size_x,
                self.size_z,
                expected,
                self.vertices.len()
            )));
        }
        Ok(())
    }

    pub fn has_data(&self) -> bool {
        !self.vertices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Row-major index of `(x, z)`
    pub fn index(&self, x: u32, z: u32) -> usize {
        (z as usize) * (self.size_x as usize) + x as usize
    }

    pub fn get(&self, x: u32, z: u32) -> Option<Vec3> {
        if x >= self.size_x || z >= self.size_z {
            return None;
        }
        self.vertices.get(self.index(x, z)).copied()
    }

    /// Replace one vertex. Fails without mutating on an out-of-range index.
    pub fn set_vertex(&mut self, index: usize, position: Vec3) -> Result<()> {
        let len = self.vertices.len();
        match self.vertices.get_mut(index) {
            Some(v) => {
                *v = position;
                Ok(())
            }
            None => Err(LodgeError::VertexOutOfRange { index, len }),
        }
    }

    /// Lowest and highest Y over all vertices, `None` when empty.
    pub fn height_range(&self) -> Option<(f32, f32)> {
        self.vertices.iter().fold(None, |acc, v| match acc {
            None => Some((v.y, v.y)),
            Some((lo, hi)) => Some((lo.min(v.y), hi.max(v.y))),
        })
    }

    /// Load a height field resource from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let field: Self = toml::from_str(&content)?;
        field.validate()?;
        Ok(field)
    }

    /// Save as a TOML resource, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, toml::to_string(self)?)?;
        Ok(())
    }

    fn expected_len(&self) -> usize {
        (self.size_x as usize) * (self.size_z as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "lodge_height_field_test_{}",
            uuid::Uuid::new_v4()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn flat_field_is_row_major() {
        let field = HeightField::flat(3, 2, 2.0);
        assert_eq!(field.len(), 6);
        // index = z * size_x + x
        assert_eq!(field.vertices[4], Vec3::new(2.0, 0.0, 2.0));
        assert_eq!(field.get(1, 1), Some(Vec3::new(2.0, 0.0, 2.0)));
        assert_eq!(field.get(3, 0), None);
    }

    #[test]
    fn mismatched_vertex_count_is_rejected() {
        let err = HeightField::new(3, 3, vec![Vec3::ZERO; 8]).unwrap_err();
        assert!(matches!(err, LodgeError::InvalidHeightField(_)));

        let err = HeightField::new(0, 3, Vec::new()).unwrap_err();
        assert!(matches!(err, LodgeError::InvalidHeightField(_)));

        // Empty data is valid and simply means "no height data"
        let empty = HeightField::new(4, 4, Vec::new()).unwrap();
        assert!(!empty.has_data());
    }

    #[test]
    fn set_vertex_is_bounds_checked() {
        let mut field = HeightField::flat(2, 2, 1.0);
        let before = field.clone();

        let err = field.set_vertex(4, Vec3::UP).unwrap_err();
        assert!(matches!(
            err,
            LodgeError::VertexOutOfRange { index: 4, len: 4 }
        ));
        assert_eq!(field, before);

        field.set_vertex(3, Vec3::new(1.0, 5.0, 1.0)).unwrap();
        assert_eq!(field.vertices[3].y, 5.0);
    }

    #[test]
    fn height_range_spans_all_vertices() {
        let mut field = HeightField::flat(2, 2, 1.0);
        assert_eq!(field.height_range(), Some((0.0, 0.0)));
        field.vertices[1].y = -2.0;
        field.vertices[2].y = 3.5;
        assert_eq!(field.height_range(), Some((-2.0, 3.5)));
        assert_eq!(HeightField::default().height_range(), None);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = temp_dir();
        let path = dir.join("fields").join("valley.toml");

        let mut field = HeightField::flat(3, 3, 1.0);
        field.vertices[4].y = 7.25;
        field.save(&path).unwrap();

        let loaded = HeightField::load(&path).unwrap();
        assert_eq!(loaded, field);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn load_rejects_inconsistent_resource() {
        let dir = temp_dir();
        let path = dir.join("broken.toml");
        std::fs::write(
            &path,
            "size_x = 2\nsize_z = 2\n\n[[vertices]]\nx = 0.0\ny = 0.0\nz = 0.0\n",
        )
        .unwrap();

        let err = HeightField::load(&path).unwrap_err();
        assert!(matches!(err, LodgeError::InvalidHeightField(_)));

        std::fs::remove_dir_all(&dir).ok();
    }
}
