//! Surface material for the terrain's single mesh slot

use lodge_core::Color;
use serde::{Deserialize, Serialize};

/// PBR material descriptor handed to the mesh sink alongside the geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainMaterial {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_albedo")]
    pub albedo: Color,
    /// Optional albedo texture, sampled with the mesh UVs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub albedo_texture: Option<String>,
    #[serde(default = "default_roughness")]
    pub roughness: f32,
    #[serde(default)]
    pub metallic: f32,
}

fn default_name() -> String {
    "terrain".to_string()
}

fn default_albedo() -> Color {
    Color::rgb(0.2, 0.2, 0.2)
}

fn default_roughness() -> f32 {
    0.85
}

impl Default for TerrainMaterial {
    fn default() -> Self {
        Self {
            name: default_name(),
            albedo: default_albedo(),
            albedo_texture: None,
            roughness: default_roughness(),
            metallic: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_material_is_dark_grey() {
        let m = TerrainMaterial::default();
        assert_eq!(m.albedo, Color::rgb(0.2, 0.2, 0.2));
        assert!(m.albedo_texture.is_none());
    }

    #[test]
    fn partial_table_fills_defaults() {
        let m: TerrainMaterial = toml::from_str("albedo_texture = \"grass.png\"").unwrap();
        assert_eq!(m.albedo_texture.as_deref(), Some("grass.png"));
        assert_eq!(m.name, "terrain");
        assert!((m.roughness - 0.85).abs() < 0.001);
    }
}
