//! Lodge Terrain - Heightmap-based terrain mesh building
//!
//! Turns a height field (explicit vertices or a sampled heightmap image) into a
//! triangulated surface with UVs, smooth normals and one material slot, plus a
//! matching trimesh collision approximation. Output is raw vertex data handed
//! to a [`MeshSink`] and a [`CollisionSink`]; this crate never renders or
//! simulates anything itself.

pub mod builder;
pub mod collision;
pub mod config;
pub mod grid;
pub mod height_field;
pub mod heightmap;
pub mod material;
pub mod mesh;
pub mod normals;
pub mod signal;
pub mod sink;
pub mod source;

pub use builder::{BuildState, TerrainBuilder};
pub use collision::CollisionApproximation;
pub use config::TerrainConfig;
pub use height_field::HeightField;
pub use heightmap::{Heightmap, SampleGrid};
pub use material::TerrainMaterial;
pub use mesh::GeneratedMesh;
pub use signal::{ChangeSignal, SubscriptionId};
pub use sink::{CollisionSink, MeshSink, NullSink};
pub use source::HeightmapSource;
