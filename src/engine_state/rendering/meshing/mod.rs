//! Mesh generation and management for voxel rendering.
//!
//! This module decides which chunks get (re)meshed each tick and hands the
//! results to the render sink.
//!
//! # Architecture
//! - `MeshManager`: Rebuilds dirty visible chunks and tracks chunk visibility
//! - `mesh/`: Contains the greedy mesher and mesh buffers
//!
//! # Mesh Lifetime
//! A chunk's mesh is owned by the chunk. When a rebuild replaces it, the old
//! mesh is disposed through the sink before the new one is submitted; when the
//! chunk is evicted, its mesh is disposed through [`MeshManager::release`].
//! Meshes move into [`RenderSink::dispose`], so none can be released twice.

use log::trace;
use web_time::Instant;

/// Core mesh generation algorithms and data structures.
mod mesh;

pub use mesh::*;

use crate::engine_state::{
    camera_state::ViewSource,
    voxels::{chunk::Chunk, world::World},
};

use super::RenderSink;

/// What a call to [`MeshManager::update`] did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MeshUpdate {
    /// Chunks whose mesh was rebuilt
    pub rebuilt: usize,
    /// Quads in the rebuilt meshes
    pub quads: usize,
    /// Chunks whose visibility changed without a rebuild
    pub visibility_changes: usize,
}

/// Keeps chunk meshes in step with the world and the view.
///
/// Chunks are only meshed while visible; a dirty chunk outside the frustum
/// keeps its stale mesh (hidden) until it comes back into view.
#[derive(Debug, Default)]
pub struct MeshManager {
    total_rebuilt: usize,
}

impl MeshManager {
    /// Creates a new mesh manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of meshes built since creation.
    pub fn total_rebuilt(&self) -> usize {
        self.total_rebuilt
    }

    /// Rebuilds every dirty chunk that is visible, then syncs visibility of the rest.
    ///
    /// # Arguments
    /// * `world` - The chunks to mesh
    /// * `view` - Decides visibility from each chunk's world-space bounds
    /// * `sink` - Receives new meshes, disposals and visibility changes
    pub fn update(
        &mut self,
        world: &mut World,
        view: &dyn ViewSource,
        sink: &mut dyn RenderSink,
    ) -> MeshUpdate {
        let start = Instant::now();
        let mut update = MeshUpdate::default();

        for chunk in world.chunks_mut() {
            let (min, max) = chunk.position.world_bounds();
            let visible = view.is_box_visible(min, max);

            if visible && chunk.needs_remesh() {
                update.quads += Self::rebuild(chunk, sink);
                update.rebuilt += 1;
            } else if visible != chunk.is_visible() && chunk.mesh().is_some() {
                sink.set_visible(chunk.position, visible);
                update.visibility_changes += 1;
            }
            chunk.set_visible(visible);
        }

        self.total_rebuilt += update.rebuilt;
        if update.rebuilt > 0 {
            trace!(
                "Rebuilt {} chunk meshes ({} quads) in {:?}",
                update.rebuilt,
                update.quads,
                start.elapsed()
            );
        }

        update
    }

    /// Replaces the chunk's mesh, disposing the old one first.
    ///
    /// # Returns
    /// Quads in the new mesh.
    fn rebuild(chunk: &mut Chunk, sink: &mut dyn RenderSink) -> usize {
        let mesh = ChunkMesh::build(chunk);
        if let Some(old) = chunk.replace_mesh(mesh) {
            sink.dispose(chunk.position, old);
        }

        match chunk.mesh() {
            Some(mesh) => {
                sink.submit(chunk.position, mesh, true);
                mesh.quad_count()
            }
            None => 0,
        }
    }

    /// Disposes the mesh of an evicted chunk.
    pub fn release(&mut self, mut chunk: Chunk, sink: &mut dyn RenderSink) {
        if let Some(mesh) = chunk.take_mesh() {
            sink.dispose(chunk.position, mesh);
        }
    }

    /// Total quads across all chunk meshes currently built.
    pub fn quad_count(world: &World) -> usize {
        world
            .chunks()
            .filter_map(Chunk::mesh)
            .map(ChunkMesh::quad_count)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::{
        rendering::RecordingSink,
        voxels::{block::block_type::BlockType, coords::ChunkCoord},
    };
    use cgmath::{Point3, Vector3};

    /// Sees everything with `x < limit`.
    struct HalfSpace {
        limit: f32,
    }

    impl ViewSource for HalfSpace {
        fn forward(&self) -> Vector3<f32> {
            Vector3::unit_x()
        }

        fn right(&self) -> Vector3<f32> {
            Vector3::unit_z()
        }

        fn is_box_visible(&self, min: Point3<f32>, _max: Point3<f32>) -> bool {
            min.x < self.limit
        }
    }

    #[test]
    fn only_visible_dirty_chunks_are_meshed() {
        let mut world = World::with_seed(5);
        world.add_chunk_at(ChunkCoord::new(0, 0));
        world.add_chunk_at(ChunkCoord::new(4, 0));
        let mut sink = RecordingSink::new();
        let mut manager = MeshManager::new();

        let update = manager.update(&mut world, &HalfSpace { limit: 32.0 }, &mut sink);
        assert_eq!(update.rebuilt, 1);
        assert!(update.quads > 0);
        assert!(sink.has_mesh(ChunkCoord::new(0, 0)));
        assert!(!sink.has_mesh(ChunkCoord::new(4, 0)));
        assert_eq!(world.dirty_count(), 1);
        assert_eq!(MeshManager::quad_count(&world), update.quads);
    }

    #[test]
    fn rebuild_disposes_before_submitting() {
        let mut world = World::with_seed(5);
        let mut sink = RecordingSink::new();
        let mut manager = MeshManager::new();
        let view = HalfSpace { limit: f32::MAX };

        world.set_block(1, 60, 1, BlockType::GLASS);
        manager.update(&mut world, &view, &mut sink);
        world.set_block(1, 61, 1, BlockType::GLASS);
        sink.clear_events();
        manager.update(&mut world, &view, &mut sink);

        let position = ChunkCoord::new(0, 0);
        assert_eq!(
            sink.events()[0],
            crate::engine_state::rendering::SinkEvent::Disposed { position }
        );
        assert_eq!(sink.submitted(), 1);
        assert_eq!(sink.violations(), 0);
    }

    #[test]
    fn hiding_a_meshed_chunk_notifies_the_sink() {
        let mut world = World::with_seed(5);
        world.add_chunk_at(ChunkCoord::new(0, 0));
        let mut sink = RecordingSink::new();
        let mut manager = MeshManager::new();

        manager.update(&mut world, &HalfSpace { limit: 32.0 }, &mut sink);
        let update = manager.update(&mut world, &HalfSpace { limit: -32.0 }, &mut sink);
        assert_eq!(update.visibility_changes, 1);
        assert!(!sink.is_shown(ChunkCoord::new(0, 0)));
    }

    #[test]
    fn release_disposes_exactly_once() {
        let mut world = World::with_seed(5);
        world.add_chunk_at(ChunkCoord::new(0, 0));
        let mut sink = RecordingSink::new();
        let mut manager = MeshManager::new();
        manager.update(&mut world, &HalfSpace { limit: f32::MAX }, &mut sink);

        let chunk = world.evict(ChunkCoord::new(0, 0)).unwrap();
        manager.release(chunk, &mut sink);
        assert_eq!(sink.disposed(), 1);
        assert_eq!(sink.live_meshes(), 0);
        assert_eq!(sink.violations(), 0);
    }
}
