//! Heightmap loading and sampling

use std::path::Path;

use image::DynamicImage;
use lodge_core::{LodgeError, Result, Vec3};

use crate::height_field::HeightField;

/// How heightmap pixels map onto the output vertex grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SampleGrid {
    /// One vertex per pixel; the field is `width x depth`
    #[default]
    PerPixel,
    /// A fixed vertex grid. Vertex `(x, z)` reads pixel `(x, z)` clamped to
    /// the image bounds.
    Fixed { size_x: u32, size_z: u32 },
}

/// A grayscale heightmap read from the red channel of an image
#[derive(Clone, Debug, PartialEq)]
pub struct Heightmap {
    /// Row-major red values normalized to [0..1]
    values: Vec<f32>,
    /// Width in pixels
    pub width: u32,
    /// Depth (image height) in pixels
    pub depth: u32,
}

impl Heightmap {
    /// Load a heightmap from an image file. Only the red channel is used.
    pub fn from_image(path: &Path) -> Result<Self> {
        let img = image::open(path).map_err(|e| {
            LodgeError::ImageError(format!(
                "Failed to load heightmap '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_dynamic(&img)
    }

    /// Build a heightmap from an already decoded image.
    pub fn from_dynamic(img: &DynamicImage) -> Result<Self> {
        let rgba = img.to_rgba8();
        let width = rgba.width();
        let depth = rgba.height();
        if width == 0 || depth == 0 {
            return Err(LodgeError::ImageError("heightmap image is empty".into()));
        }

        let values = rgba.pixels().map(|p| p.0[0] as f32 / 255.0).collect();

        Ok(Self {
            values,
            width,
            depth,
        })
    }

    /// Create a heightmap from raw red values in [0..1]
    pub fn from_raw(values: Vec<f32>, width: u32, depth: u32) -> Result<Self> {
        if width == 0 || depth == 0 || values.len() != (width as usize) * (depth as usize) {
            return Err(LodgeError::ImageError(format!(
                "{}x{} heightmap needs {} values, got {}",
                width,
                depth,
                (width as usize) * (depth as usize),
                values.len()
            )));
        }
        Ok(Self {
            values,
            width,
            depth,
        })
    }

    /// Red value at pixel `(x, z)` with coordinates clamped to the image.
    pub fn red(&self, x: u32, z: u32) -> f32 {
        let x = x.min(self.width - 1);
        let z = z.min(self.depth - 1);
        self.values[(z * self.width + x) as usize]
    }

    /// Smallest red value over the whole image
    pub fn min_value(&self) -> f32 {
        self.values.iter().copied().fold(f32::MAX, f32::min)
    }

    /// Bilinear sample at normalized coordinates (0..1, 0..1).
    pub fn sample(&self, u: f32, v: f32) -> f32 {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let fx = u * (self.width - 1) as f32;
        let fz = v * (self.depth - 1) as f32;

        let x0 = fx.floor() as u32;
        let z0 = fz.floor() as u32;
        let tx = fx - x0 as f32;
        let tz = fz - z0 as f32;

        let h00 = self.red(x0, z0);
        let h10 = self.red(x0 + 1, z0);
        let h01 = self.red(x0, z0 + 1);
        let h11 = self.red(x0 + 1, z0 + 1);

        let h0 = h00 * (1.0 - tx) + h10 * tx;
        let h1 = h01 * (1.0 - tx) + h11 * tx;

        h0 * (1.0 - tz) + h1 * tz
    }

    /// Sample into a height field.
    ///
    /// Vertex `(x, z)` sits at `(x * spacing, y, z * spacing)` where
    /// `y = red * height_scale`, or `(red - min_red) * height_scale` when
    /// `normalize` is set so the lowest point of the image lands on zero.
    pub fn to_height_field(
        &self,
        grid: SampleGrid,
        height_scale: f32,
        normalize: bool,
        spacing: f32,
    ) -> Result<HeightField> {
        let (size_x, size_z) = match grid {
            SampleGrid::PerPixel => (self.width, self.depth),
            SampleGrid::Fixed { size_x, size_z } => (size_x, size_z),
        };

        let base = if normalize { self.min_value() } else { 0.0 };

        let mut vertices = Vec::with_capacity((size_x as usize) * (size_z as usize));
        for z in 0..size_z {
            for x in 0..size_x {
                let y = (self.red(x, z) - base) * height_scale;
                vertices.push(Vec3::new(x as f32 * spacing, y, z as f32 * spacing));
            }
        }

        HeightField::new(size_x, size_z, vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn constant_image(width: u32, height: u32, red: u8) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([red, 17, 250, 255]),
        ))
    }

    #[test]
    fn constant_image_gives_constant_height() {
        let hm = Heightmap::from_dynamic(&constant_image(5, 4, 51)).unwrap();
        let c = 51.0 / 255.0;

        let field = hm.to_height_field(SampleGrid::PerPixel, 10.0, false, 1.0).unwrap();
        assert_eq!((field.size_x, field.size_z), (5, 4));
        for v in &field.vertices {
            assert!((v.y - c * 10.0).abs() < 0.0001);
        }

        // Normalized: min == c, so everything collapses to zero
        let field = hm.to_height_field(SampleGrid::PerPixel, 10.0, true, 1.0).unwrap();
        assert!(field.vertices.iter().all(|v| v.y.abs() < 0.0001));
    }

    #[test]
    fn only_red_channel_is_used() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([0, 255, 255, 255]));
        img.put_pixel(1, 0, Rgba([255, 0, 0, 255]));
        let hm = Heightmap::from_dynamic(&DynamicImage::ImageRgba8(img)).unwrap();
        assert_eq!(hm.red(0, 0), 0.0);
        assert_eq!(hm.red(1, 0), 1.0);
    }

    #[test]
    fn normalize_subtracts_image_minimum() {
        let hm = Heightmap::from_raw(vec![0.2, 0.4, 0.6, 0.8], 2, 2).unwrap();
        let field = hm.to_height_field(SampleGrid::PerPixel, 10.0, true, 1.0).unwrap();
        let ys: Vec<f32> = field.vertices.iter().map(|v| v.y).collect();
        for (got, want) in ys.iter().zip([0.0, 2.0, 4.0, 6.0]) {
            assert!((got - want).abs() < 0.001);
        }
    }

    #[test]
    fn positions_follow_grid_and_spacing() {
        let hm = Heightmap::from_raw(vec![0.0; 6], 3, 2).unwrap();
        let field = hm.to_height_field(SampleGrid::PerPixel, 1.0, false, 2.5).unwrap();
        assert_eq!(field.vertices[5], Vec3::new(5.0, 0.0, 2.5));
    }

    #[test]
    fn fixed_grid_clamps_to_image_bounds() {
        // 2x2 image, 4x3 output grid: columns 2..3 and row 2 reuse the edge pixels
        let hm = Heightmap::from_raw(vec![0.0, 0.5, 0.25, 1.0], 2, 2).unwrap();
        let grid = SampleGrid::Fixed { size_x: 4, size_z: 3 };
        let field = hm.to_height_field(grid, 4.0, false, 1.0).unwrap();

        assert_eq!(field.len(), 12);
        assert_eq!(field.get(3, 0).unwrap().y, 2.0);
        assert_eq!(field.get(0, 2).unwrap().y, 1.0);
        assert_eq!(field.get(3, 2).unwrap().y, 4.0);
        assert_eq!(field.get(3, 2).unwrap().x, 3.0);
    }

    #[test]
    fn fixed_grid_coarser_than_image() {
        let hm = Heightmap::from_raw((0..16).map(|i| i as f32 / 15.0).collect(), 4, 4).unwrap();
        let grid = SampleGrid::Fixed { size_x: 2, size_z: 2 };
        let field = hm.to_height_field(grid, 15.0, false, 1.0).unwrap();
        let ys: Vec<f32> = field.vertices.iter().map(|v| v.y).collect();
        for (got, want) in ys.iter().zip([0.0, 1.0, 4.0, 5.0]) {
            assert!((got - want).abs() < 0.001);
        }
    }

    #[test]
    fn bilinear_sampling() {
        let heights = vec![
            0.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            0.0, 0.0, 0.0,
        ];
        let hm = Heightmap::from_raw(heights, 3, 3).unwrap();
        assert!((hm.sample(0.5, 0.5) - 1.0).abs() < 0.01);
        assert!((hm.sample(0.0, 0.0)).abs() < 0.01);
        assert!((hm.sample(0.25, 0.5) - 0.5).abs() < 0.01);
        // Out-of-range coordinates clamp
        assert!((hm.sample(2.0, -1.0)).abs() < 0.01);
    }

    #[test]
    fn single_pixel_image_samples_safely() {
        let hm = Heightmap::from_raw(vec![0.75], 1, 1).unwrap();
        assert!((hm.sample(0.3, 0.9) - 0.75).abs() < 0.001);
    }

    #[test]
    fn raw_size_mismatch_is_rejected() {
        assert!(Heightmap::from_raw(vec![0.0; 3], 2, 2).is_err());
        assert!(Heightmap::from_raw(Vec::new(), 0, 0).is_err());
    }

    #[test]
    fn missing_file_is_an_image_error() {
        let err = Heightmap::from_image(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, LodgeError::ImageError(_)));
    }
}
