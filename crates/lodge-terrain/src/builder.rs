//! Terrain builder: owns the height field and its generated mesh
//!
//! The builder is the command surface an editor or CLI drives:
//! - [`TerrainBuilder::set_height_field`] - replace the data and rebuild
//! - [`TerrainBuilder::regenerate_from_heightmap`] - sample the heightmap source and rebuild
//! - [`TerrainBuilder::update_vertex`] - patch one vertex of the live mesh
//! - [`TerrainBuilder::set_heightmap_source`] - follow a heightmap that may change
//!
//! Every failed command is logged and returned; the previous field, mesh and
//! collision state are left exactly as they were. A mesh sink that accepted
//! part of a failed update is handed the previous mesh again.

use std::cell::Cell;
use std::rc::Rc;

use lodge_core::{LodgeError, Result, Vec3};

use crate::collision::CollisionApproximation;
use crate::config::TerrainConfig;
use crate::height_field::HeightField;
use crate::mesh::GeneratedMesh;
use crate::signal::SubscriptionId;
use crate::sink::{CollisionSink, MeshSink};
use crate::source::HeightmapSource;

/// Where the builder is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildState {
    /// No mesh has been built yet
    Unbuilt,
    /// The mesh matches the height field exactly
    Built,
    /// One or more vertices were patched since the last full build;
    /// normals may be stale
    Patched,
}

struct SourceBinding {
    source: Rc<HeightmapSource>,
    subscription: SubscriptionId,
}

/// Builds and maintains one terrain's mesh and collision data
pub struct TerrainBuilder {
    config: TerrainConfig,
    field: HeightField,
    mesh: Option<GeneratedMesh>,
    collision: Option<CollisionApproximation>,
    state: BuildState,
    mesh_sink: Box<dyn MeshSink>,
    collision_sink: Box<dyn CollisionSink>,
    source: Option<SourceBinding>,
    source_dirty: Rc<Cell<bool>>,
}

impl TerrainBuilder {
    pub fn new(
        config: TerrainConfig,
        mesh_sink: Box<dyn MeshSink>,
        collision_sink: Box<dyn CollisionSink>,
    ) -> Self {
        Self {
            config,
            field: HeightField::default(),
            mesh: None,
            collision: None,
            state: BuildState::Unbuilt,
            mesh_sink,
            collision_sink,
            source: None,
            source_dirty: Rc::new(Cell::new(false)),
        }
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn field(&self) -> &HeightField {
        &self.field
    }

    pub fn mesh(&self) -> Option<&GeneratedMesh> {
        self.mesh.as_ref()
    }

    pub fn collision(&self) -> Option<&CollisionApproximation> {
        self.collision.as_ref()
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    /// Replace the height field and rebuild everything from it.
    pub fn set_height_field(&mut self, field: HeightField) -> Result<()> {
        let result = self.build_and_commit(field);
        report("set height field", result)
    }

    /// Rebuild the mesh from the current height field.
    pub fn rebuild(&mut self) -> Result<()> {
        let field = self.field.clone();
        let result = self.build_and_commit(field);
        report("rebuild", result)
    }

    /// Sample the current heightmap source into a new height field and
    /// rebuild. With no source, or a source without an image, the terrain
    /// becomes a flat plane of the configured size.
    pub fn regenerate_from_heightmap(&mut self) -> Result<()> {
        let result = self
            .sample_source()
            .and_then(|field| self.build_and_commit(field));
        report("regenerate from heightmap", result)
    }

    /// Move a single vertex of the live terrain.
    ///
    /// Only the position buffer and the collision approximation are updated;
    /// UVs and normals keep their values from the last full build.
    pub fn update_vertex(&mut self, index: usize, position: Vec3) -> Result<()> {
        let result = self.patch_vertex(index, position);
        report("update vertex", result)
    }

    /// Regenerate normals after vertex edits and resubmit the mesh.
    pub fn recompute_normals(&mut self) -> Result<()> {
        let result = match self.mesh.as_mut() {
            None => Err(LodgeError::NotInitialized),
            Some(mesh) => {
                let previous = (mesh.normals.clone(), mesh.aabb_min, mesh.aabb_max);
                mesh.recompute_normals();
                match self.mesh_sink.submit_mesh(mesh) {
                    Ok(()) => {
                        self.state = BuildState::Built;
                        Ok(())
                    }
                    Err(e) => {
                        (mesh.normals, mesh.aabb_min, mesh.aabb_max) = previous;
                        Err(e)
                    }
                }
            }
        };
        report("recompute normals", result)
    }

    /// Swap the configuration. A built terrain is rebuilt so material and
    /// other surface settings take effect.
    pub fn apply_config(&mut self, config: TerrainConfig) -> Result<()> {
        let previous = std::mem::replace(&mut self.config, config);
        if self.mesh.is_none() {
            return Ok(());
        }
        let field = self.field.clone();
        let result = self.build_and_commit(field);
        if result.is_err() {
            self.config = previous;
        }
        report("apply config", result)
    }

    /// Follow a heightmap source, or stop following one with `None`.
    ///
    /// The previous source is always unsubscribed before the new one is
    /// subscribed. When the source reports a change the builder is marked
    /// dirty; [`process_changes`](Self::process_changes) does the rebuild.
    pub fn set_heightmap_source(&mut self, source: Option<Rc<HeightmapSource>>) {
        if let (Some(bound), Some(new)) = (&self.source, &source) {
            if Rc::ptr_eq(&bound.source, new) {
                return;
            }
        }

        if let Some(old) = self.source.take() {
            old.source.changed().unsubscribe(old.subscription);
        }

        self.source_dirty.set(false);
        self.source = source.map(|source| {
            let dirty = self.source_dirty.clone();
            let subscription = source.changed().subscribe(move || dirty.set(true));
            SourceBinding {
                source,
                subscription,
            }
        });
    }

    pub fn heightmap_source(&self) -> Option<&Rc<HeightmapSource>> {
        self.source.as_ref().map(|b| &b.source)
    }

    /// True when the followed heightmap changed since the last regeneration.
    pub fn has_pending_changes(&self) -> bool {
        self.source_dirty.get()
    }

    /// Regenerate if the heightmap source changed. Returns whether a
    /// regeneration ran.
    pub fn process_changes(&mut self) -> Result<bool> {
        if !self.source_dirty.replace(false) {
            return Ok(false);
        }
        self.regenerate_from_heightmap()?;
        Ok(true)
    }

    fn sample_source(&self) -> Result<HeightField> {
        let config = &self.config;
        let source = self.source.as_ref().map(|b| &b.source);
        let image = source.map(|s| s.heightmap());

        match image.as_deref() {
            Some(Some(heightmap)) => {
                log::info!(
                    "Generating terrain data from {}x{} heightmap...",
                    heightmap.width,
                    heightmap.depth
                );
                heightmap.to_height_field(
                    config.sample_grid(),
                    config.height_scale,
                    config.normalize_heights,
                    config.spacing,
                )
            }
            _ => {
                log::warn!(
                    "No heightmap image assigned, using a flat {}x{} terrain",
                    config.size_x,
                    config.size_z
                );
                Ok(HeightField::flat(config.size_x, config.size_z, config.spacing))
            }
        }
    }

    fn build_and_commit(&mut self, field: HeightField) -> Result<()> {
        log::info!(
            "Building terrain mesh ({}x{})...",
            field.size_x,
            field.size_z
        );

        let mesh = GeneratedMesh::build(&field, self.config.material.clone())?;
        let collision = CollisionApproximation::from_mesh(&mesh);

        self.mesh_sink.submit_mesh(&mesh)?;
        if let Err(e) = self.collision_sink.submit_collision(&collision) {
            if let Some(previous) = &self.mesh {
                resubmit_mesh(self.mesh_sink.as_mut(), previous);
            }
            return Err(e);
        }

        log::info!(
            "Terrain mesh built: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        self.field = field;
        self.mesh = Some(mesh);
        self.collision = Some(collision);
        self.state = BuildState::Built;
        Ok(())
    }

    fn patch_vertex(&mut self, index: usize, position: Vec3) -> Result<()> {
        let mesh = self.mesh.as_mut().ok_or(LodgeError::NotInitialized)?;
        // A committed mesh always matches the field; these guard against the
        // two drifting apart
        if !self.field.has_data() {
            return Err(LodgeError::NoHeightData);
        }
        if mesh.vertex_count() != self.field.len() {
            return Err(LodgeError::MeshMismatch {
                mesh: mesh.vertex_count(),
                field: self.field.len(),
            });
        }
        let len = self.field.len();
        if index >= len {
            return Err(LodgeError::VertexOutOfRange { index, len });
        }

        let previous_mesh_bounds = (mesh.aabb_min, mesh.aabb_max);
        let previous = self.field.vertices[index];

        self.field.set_vertex(index, position)?;
        mesh.patch_position(index, position)?;
        let collision = CollisionApproximation::from_mesh(mesh);

        let submitted = match self.mesh_sink.submit_mesh(mesh) {
            Ok(()) => self.collision_sink.submit_collision(&collision).map_err(|e| (e, true)),
            Err(e) => Err((e, false)),
        };

        if let Err((e, mesh_accepted)) = submitted {
            self.field.vertices[index] = previous;
            mesh.positions[index] = previous;
            (mesh.aabb_min, mesh.aabb_max) = previous_mesh_bounds;
            if mesh_accepted {
                resubmit_mesh(self.mesh_sink.as_mut(), mesh);
            }
            return Err(e);
        }

        self.collision = Some(collision);
        self.state = BuildState::Patched;
        Ok(())
    }
}

impl Drop for TerrainBuilder {
    fn drop(&mut self) {
        if let Some(bound) = self.source.take() {
            bound.source.changed().unsubscribe(bound.subscription);
        }
    }
}

/// Hand the last committed mesh back to a sink that accepted a mesh the
/// builder then discarded.
fn resubmit_mesh(sink: &mut dyn MeshSink, mesh: &GeneratedMesh) {
    if let Err(e) = sink.submit_mesh(mesh) {
        log::warn!("Failed to restore terrain mesh after rollback: {}", e);
    }
}

fn report<T>(operation: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        log::error!("Terrain {} failed: {}", operation, e);
    }
    result
}
