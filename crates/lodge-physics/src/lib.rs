//! Lodge Physics - Rapier 3D integration
//!
//! - `PhysicsWorld` - wraps Rapier's body and collider sets
//! - `TerrainCollider` - a `CollisionSink` that keeps one static trimesh
//!   collider in sync with the terrain's collision approximation

pub mod terrain_collider;
pub mod world;

pub use terrain_collider::TerrainCollider;
pub use world::PhysicsWorld;
