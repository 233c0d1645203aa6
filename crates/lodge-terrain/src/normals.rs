//! Smooth per-vertex normal generation

use lodge_core::Vec3;

/// Face normal for a clockwise (front-facing) triangle, not normalized.
///
/// The length is twice the triangle's area, so summing these weights each
/// face by its size.
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (c - a).cross(&(b - a))
}

/// Compute smooth vertex normals for an indexed triangle list.
///
/// Each vertex gets the area-weighted average of the face normals of every
/// triangle that uses it. Vertices referenced by no triangle, or whose
/// triangles are all degenerate, fall back to straight up.
pub fn smooth_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut acc = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let n = face_normal(positions[i0], positions[i1], positions[i2]);
        acc[i0] += n;
        acc[i1] += n;
        acc[i2] += n;
    }

    acc.into_iter()
        .map(|n| {
            if n.length() > f32::EPSILON {
                n.normalized()
            } else {
                Vec3::UP
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::triangulate;
    use crate::height_field::HeightField;

    #[test]
    fn flat_grid_normals_point_up() {
        let field = HeightField::flat(4, 3, 1.5);
        let indices = triangulate(4, 3).unwrap();
        let normals = smooth_normals(&field.vertices, &indices);

        assert_eq!(normals.len(), 12);
        for n in &normals {
            assert!((n.x).abs() < 0.01);
            assert!((n.y - 1.0).abs() < 0.01);
            assert!((n.z).abs() < 0.01);
        }
    }

    #[test]
    fn slope_rising_along_x_tilts_normals_back() {
        // y = x: the surface normal is (-1, 1, 0) / sqrt(2)
        let mut field = HeightField::flat(3, 3, 1.0);
        for v in field.vertices.iter_mut() {
            v.y = v.x;
        }
        let indices = triangulate(3, 3).unwrap();
        let normals = smooth_normals(&field.vertices, &indices);

        let expected = std::f32::consts::FRAC_1_SQRT_2;
        for n in &normals {
            assert!((n.x + expected).abs() < 0.01);
            assert!((n.y - expected).abs() < 0.01);
            assert!(n.z.abs() < 0.01);
        }
    }

    #[test]
    fn unreferenced_vertex_defaults_up() {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(9.0, 9.0, 9.0),
        ];
        let normals = smooth_normals(&positions, &[0, 1, 2]);
        assert_eq!(normals[3], Vec3::UP);
        assert!((normals[0].y - 1.0).abs() < 0.01);
    }
}
