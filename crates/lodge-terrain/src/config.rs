//! Terrain configuration, loaded from `terrain.toml`

use std::fs;
use std::path::{Path, PathBuf};

use lodge_core::Result;
use serde::{Deserialize, Serialize};

use crate::heightmap::SampleGrid;
use crate::material::TerrainMaterial;

/// Vertex grid used when sampling a heightmap
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridMode {
    /// One vertex per heightmap pixel
    #[default]
    PerPixel,
    /// `size_x` x `size_z` vertices regardless of image size
    Fixed,
}

/// Configuration for terrain generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Path to the heightmap image (empty means none)
    #[serde(default)]
    pub heightmap_path: String,
    /// Heightmap red value 1.0 maps to this many units of Y
    #[serde(default = "default_height_scale")]
    pub height_scale: f32,
    /// Subtract the image's lowest red value before scaling
    #[serde(default = "default_true")]
    pub normalize_heights: bool,
    #[serde(default)]
    pub grid: GridMode,
    /// Grid columns for `fixed` mode and for the flat fallback
    #[serde(default = "default_grid_size")]
    pub size_x: u32,
    /// Grid rows for `fixed` mode and for the flat fallback
    #[serde(default = "default_grid_size")]
    pub size_z: u32,
    /// World distance between neighbouring vertices
    #[serde(default = "default_spacing")]
    pub spacing: f32,
    #[serde(default)]
    pub material: TerrainMaterial,
}

fn default_height_scale() -> f32 {
    25.0
}
fn default_true() -> bool {
    true
}
fn default_grid_size() -> u32 {
    64
}
fn default_spacing() -> f32 {
    1.0
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            heightmap_path: String::new(),
            height_scale: default_height_scale(),
            normalize_heights: default_true(),
            grid: GridMode::default(),
            size_x: default_grid_size(),
            size_z: default_grid_size(),
            spacing: default_spacing(),
            material: TerrainMaterial::default(),
        }
    }
}

impl TerrainConfig {
    /// Load a config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load a config file, falling back to defaults if it is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid terrain config at {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// The heightmap path, if one is configured.
    ///
    /// Relative paths are resolved against `base` (normally the directory
    /// holding the config file).
    pub fn heightmap(&self, base: &Path) -> Option<PathBuf> {
        if self.heightmap_path.trim().is_empty() {
            return None;
        }
        let path = Path::new(&self.heightmap_path);
        if path.is_absolute() {
            Some(path.to_path_buf())
        } else {
            Some(base.join(path))
        }
    }

    pub fn sample_grid(&self) -> SampleGrid {
        match self.grid {
            GridMode::PerPixel => SampleGrid::PerPixel,
            GridMode::Fixed => SampleGrid::Fixed {
                size_x: self.size_x,
                size_z: self.size_z,
            },
        }
    }
}
