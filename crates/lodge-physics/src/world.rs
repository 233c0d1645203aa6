//! Physics world wrapping Rapier 3D

use rapier3d::parry::query::Ray;
use rapier3d::prelude::*;

/// Wraps Rapier's body/collider sets for static world geometry
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub island_manager: IslandManager,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            island_manager: IslandManager::new(),
        }
    }

    /// Insert a collider with no parent body (fixed in world space)
    pub fn insert_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Remove a collider by its handle
    pub fn remove_collider(&mut self, handle: ColliderHandle) -> bool {
        self.collider_set
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.rigid_body_set,
                true,
            )
            .is_some()
    }

    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    pub fn collider_count(&self) -> usize {
        self.collider_set.len()
    }

    /// Cast a ray straight down onto one collider and return the hit height.
    pub fn probe_height(&self, handle: ColliderHandle, x: f32, z: f32) -> Option<f32> {
        let collider = self.collider_set.get(handle)?;
        let top = collider.compute_aabb().maxs.y + 1.0;
        let ray = Ray::new(point![x, top, z], vector![0.0, -1.0, 0.0]);
        let max_toi = top - collider.compute_aabb().mins.y + 1.0;

        collider
            .shape()
            .cast_ray(collider.position(), &ray, max_toi, true)
            .map(|toi| top - toi)
    }

    /// Highest surface under `(x, z)` across all colliders.
    pub fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        self.collider_set
            .iter()
            .filter_map(|(handle, _)| self.probe_height(handle, x, z))
            .reduce(f32::max)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
