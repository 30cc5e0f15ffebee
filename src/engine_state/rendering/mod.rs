//! Rendering system for the voxel engine.
//!
//! This module contains everything between the block grid and the external
//! renderer: greedy meshing, the interleaved vertex format and the sink the
//! meshes are handed to. Drawing itself happens outside the engine.

pub mod meshing;
mod sink;
mod vertex;

// Re-export commonly used types
pub use meshing::{ChunkMesh, MeshManager, MeshUpdate};
pub use sink::{NullSink, RecordingSink, RenderSink, SinkEvent};
pub use vertex::Vertex;
