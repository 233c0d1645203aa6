//! Static trimesh collider fed by the terrain builder

use std::cell::RefCell;
use std::rc::Rc;

use lodge_core::{LodgeError, Result};
use lodge_terrain::{CollisionApproximation, CollisionSink};
use rapier3d::prelude::*;

use crate::world::PhysicsWorld;

/// Keeps exactly one trimesh collider in a shared [`PhysicsWorld`] matching
/// the latest collision approximation it was given.
pub struct TerrainCollider {
    world: Rc<RefCell<PhysicsWorld>>,
    handle: Option<ColliderHandle>,
    friction: f32,
}

impl TerrainCollider {
    pub fn new(world: Rc<RefCell<PhysicsWorld>>) -> Self {
        Self {
            world,
            handle: None,
            friction: 0.7,
        }
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn handle(&self) -> Option<ColliderHandle> {
        self.handle
    }

    /// Terrain surface height under `(x, z)`, if the ray hits the collider.
    pub fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        let handle = self.handle?;
        self.world.borrow().probe_height(handle, x, z)
    }

    /// Vertices of the registered trimesh, as Rapier sees them
    pub fn collider_vertices(&self) -> Option<Vec<[f32; 3]>> {
        let handle = self.handle?;
        let world = self.world.borrow();
        let trimesh = world.get_collider(handle)?.shape().as_trimesh()?;
        Some(trimesh.vertices().iter().map(|p| [p.x, p.y, p.z]).collect())
    }
}

impl CollisionSink for TerrainCollider {
    fn submit_collision(&mut self, collision: &CollisionApproximation) -> Result<()> {
        if collision.is_empty() {
            return Err(LodgeError::PhysicsError(
                "cannot build a trimesh collider without triangles".into(),
            ));
        }

        let vertices: Vec<Point<Real>> = collision
            .vertices
            .iter()
            .map(|v| point![v[0], v[1], v[2]])
            .collect();
        let collider = ColliderBuilder::trimesh(vertices, collision.triangles.clone())
            .friction(self.friction)
            .build();

        let mut world = self.world.borrow_mut();
        if let Some(old) = self.handle.take() {
            world.remove_collider(old);
        }
        self.handle = Some(world.insert_static_collider(collider));

        log::debug!(
            "Terrain collider updated: {} triangles",
            collision.triangle_count()
        );
        Ok(())
    }
}

impl Drop for TerrainCollider {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Ok(mut world) = self.world.try_borrow_mut() {
                world.remove_collider(handle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodge_core::Vec3;
    use lodge_terrain::{HeightField, NullSink, TerrainBuilder, TerrainConfig};

    fn flat_collision() -> CollisionApproximation {
        let field = HeightField::flat(3, 3, 1.0);
        let mesh = lodge_terrain::GeneratedMesh::build(&field, Default::default()).unwrap();
        CollisionApproximation::from_mesh(&mesh)
    }

    #[test]
    fn submit_registers_single_collider() {
        let world = Rc::new(RefCell::new(PhysicsWorld::new()));
        let mut sink = TerrainCollider::new(world.clone());

        sink.submit_collision(&flat_collision()).unwrap();
        sink.submit_collision(&flat_collision()).unwrap();
        assert_eq!(world.borrow().collider_count(), 1);

        let h = sink.height_at(0.4, 1.3).unwrap();
        assert!(h.abs() < 0.01);
        assert!(sink.height_at(5.0, 5.0).is_none());

        drop(sink);
        assert_eq!(world.borrow().collider_count(), 0);
    }

    #[test]
    fn empty_collision_is_rejected() {
        let world = Rc::new(RefCell::new(PhysicsWorld::new()));
        let mut sink = TerrainCollider::new(world.clone());
        let err = sink
            .submit_collision(&CollisionApproximation::default())
            .unwrap_err();
        assert!(matches!(err, LodgeError::PhysicsError(_)));
        assert_eq!(world.borrow().collider_count(), 0);
    }

    #[test]
    fn vertex_patch_reaches_the_collider() {
        let world = Rc::new(RefCell::new(PhysicsWorld::new()));
        let collider = TerrainCollider::new(world.clone());

        let mut builder = TerrainBuilder::new(
            TerrainConfig::default(),
            Box::new(NullSink),
            Box::new(collider),
        );
        builder.set_height_field(HeightField::flat(3, 3, 1.0)).unwrap();
        builder.update_vertex(4, Vec3::new(1.0, 2.0, 1.0)).unwrap();

        let world = world.borrow();
        assert_eq!(world.collider_count(), 1);
        let (handle, _) = world.collider_set.iter().next().unwrap();

        let trimesh = world
            .get_collider(handle)
            .unwrap()
            .shape()
            .as_trimesh()
            .unwrap();
        let center = trimesh.vertices()[4];
        assert!((center.y - 2.0).abs() < 0.001);

        // Inside triangle (1, 4, 3) the surface is y = 2x + 2z - 2
        let h = world.probe_height(handle, 0.9, 0.9).unwrap();
        assert!((h - 1.6).abs() < 0.01);
    }

    #[test]
    fn collider_vertices_mirror_submission() {
        let world = Rc::new(RefCell::new(PhysicsWorld::new()));
        let mut sink = TerrainCollider::new(world).with_friction(0.2);
        let collision = flat_collision();
        sink.submit_collision(&collision).unwrap();
        assert_eq!(sink.collider_vertices().unwrap(), collision.vertices);
    }
}
