//! The boundary between the engine and whatever draws chunk meshes.

use std::collections::HashMap;

use log::warn;

use crate::engine_state::voxels::coords::ChunkCoord;

use super::meshing::ChunkMesh;

/// Receives chunk meshes from the engine.
///
/// For a given chunk the engine always disposes the previous mesh before
/// submitting a replacement, and every submitted mesh is disposed exactly once:
/// either when it is replaced or when its chunk is evicted.
pub trait RenderSink {
    /// Uploads a new mesh for `position`, initially shown or hidden.
    fn submit(&mut self, position: ChunkCoord, mesh: &ChunkMesh, visible: bool);

    /// Shows or hides the mesh currently uploaded for `position`.
    fn set_visible(&mut self, position: ChunkCoord, visible: bool);

    /// Releases the mesh previously submitted for `position`.
    fn dispose(&mut self, position: ChunkCoord, mesh: ChunkMesh);
}

/// A sink that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn submit(&mut self, _position: ChunkCoord, _mesh: &ChunkMesh, _visible: bool) {}

    fn set_visible(&mut self, _position: ChunkCoord, _visible: bool) {}

    fn dispose(&mut self, _position: ChunkCoord, _mesh: ChunkMesh) {}
}

/// One call received by a [`RecordingSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkEvent {
    /// A mesh with `quads` quads was submitted.
    Submitted {
        /// The chunk
        position: ChunkCoord,
        /// Quads in the mesh
        quads: usize,
        /// Initial visibility
        visible: bool,
    },
    /// Visibility changed.
    Visibility {
        /// The chunk
        position: ChunkCoord,
        /// New visibility
        visible: bool,
    },
    /// A mesh was released.
    Disposed {
        /// The chunk
        position: ChunkCoord,
    },
}

/// A sink that records every call and tracks which chunks hold a live mesh.
///
/// Protocol violations (a second submission without a disposal in between, a
/// disposal or visibility change for a chunk with no live mesh) are counted and
/// logged instead of panicking, so the headless demo can report them too.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<SinkEvent>,
    live: HashMap<ChunkCoord, bool>,
    violations: usize,
}

impl RecordingSink {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call in the order received.
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Forgets recorded events, keeping the live mesh set.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Number of submissions recorded.
    pub fn submitted(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SinkEvent::Submitted { .. }))
            .count()
    }

    /// Number of disposals recorded.
    pub fn disposed(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SinkEvent::Disposed { .. }))
            .count()
    }

    /// Chunks that currently have a mesh uploaded.
    pub fn live_meshes(&self) -> usize {
        self.live.len()
    }

    /// Whether `position` has a mesh uploaded.
    pub fn has_mesh(&self, position: ChunkCoord) -> bool {
        self.live.contains_key(&position)
    }

    /// Whether the mesh for `position` is uploaded and shown.
    pub fn is_shown(&self, position: ChunkCoord) -> bool {
        self.live.get(&position).copied().unwrap_or(false)
    }

    /// Number of protocol violations seen.
    pub fn violations(&self) -> usize {
        self.violations
    }
}

impl RenderSink for RecordingSink {
    fn submit(&mut self, position: ChunkCoord, mesh: &ChunkMesh, visible: bool) {
        if self.live.insert(position, visible).is_some() {
            warn!("Mesh for chunk ({}, {}) submitted twice", position.x, position.z);
            self.violations += 1;
        }
        self.events.push(SinkEvent::Submitted {
            position,
            quads: mesh.quad_count(),
            visible,
        });
    }

    fn set_visible(&mut self, position: ChunkCoord, visible: bool) {
        match self.live.get_mut(&position) {
            Some(shown) => *shown = visible,
            None => {
                warn!("Visibility set for chunk ({}, {}) without a mesh", position.x, position.z);
                self.violations += 1;
            }
        }
        self.events.push(SinkEvent::Visibility { position, visible });
    }

    fn dispose(&mut self, position: ChunkCoord, _mesh: ChunkMesh) {
        if self.live.remove(&position).is_none() {
            warn!("Disposed a mesh for chunk ({}, {}) that was never submitted", position.x, position.z);
            self.violations += 1;
        }
        self.events.push(SinkEvent::Disposed { position });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::{block::block_type::BlockType, chunk::Chunk};

    fn mesh() -> ChunkMesh {
        let mut chunk = Chunk::empty(ChunkCoord::new(0, 0));
        chunk.set_block_at(0, 0, 0, BlockType::STONE);
        ChunkMesh::build(&chunk).unwrap()
    }

    #[test]
    fn tracks_live_meshes() {
        let mut sink = RecordingSink::new();
        let position = ChunkCoord::new(0, 0);
        sink.submit(position, &mesh(), true);
        assert!(sink.is_shown(position));
        sink.set_visible(position, false);
        assert!(!sink.is_shown(position));
        sink.dispose(position, mesh());
        assert!(!sink.has_mesh(position));
        assert_eq!((sink.submitted(), sink.disposed(), sink.violations()), (1, 1, 0));
    }

    #[test]
    fn counts_protocol_violations() {
        let mut sink = RecordingSink::new();
        let position = ChunkCoord::new(1, 1);
        sink.dispose(position, mesh());
        sink.submit(position, &mesh(), true);
        sink.submit(position, &mesh(), true);
        sink.set_visible(ChunkCoord::new(9, 9), true);
        assert_eq!(sink.violations(), 3);
    }
}
