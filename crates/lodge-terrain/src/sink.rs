//! Destinations for generated geometry
//!
//! The builder never owns the scene objects that display or collide with the
//! terrain. It pushes finished data into whatever sinks it was given.

use lodge_core::Result;

use crate::collision::CollisionApproximation;
use crate::mesh::GeneratedMesh;

/// Receives the render mesh after every build or patch
pub trait MeshSink {
    fn submit_mesh(&mut self, mesh: &GeneratedMesh) -> Result<()>;
}

/// Receives the collision approximation after every build or patch
pub trait CollisionSink {
    fn submit_collision(&mut self, collision: &CollisionApproximation) -> Result<()>;
}

/// Discards everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl MeshSink for NullSink {
    fn submit_mesh(&mut self, _mesh: &GeneratedMesh) -> Result<()> {
        Ok(())
    }
}

impl CollisionSink for NullSink {
    fn submit_collision(&mut self, _collision: &CollisionApproximation) -> Result<()> {
        Ok(())
    }
}
