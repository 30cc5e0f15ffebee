//! Mesh generation for voxel rendering.
//!
//! This module converts a chunk's block grid into compact surface geometry. It
//! implements greedy meshing to reduce the number of quads by combining coplanar
//! faces with the same block type.
//!
//! # Architecture
//! - [`Face`]: A single quad in chunk-local coordinates with its side and block type
//! - [`build_faces`]: The greedy mesher, a pure function of the chunk's blocks
//! - [`ChunkMesh`]: World-space positions, colours and indices for one chunk
//!
//! # Usage
//! ```
//! use voxel_world::engine_state::{
//!     rendering::meshing::{build_faces, ChunkMesh},
//!     voxels::{block::block_type::BlockType, chunk::Chunk, coords::ChunkCoord},
//! };
//!
//! let chunk = Chunk::solid(ChunkCoord::new(0, 0), BlockType::STONE);
//! assert_eq!(build_faces(&chunk).len(), 6);
//! assert_eq!(ChunkMesh::build(&chunk).unwrap().quad_count(), 6);
//! ```

mod face;
mod greedy;
mod mesh;

pub use face::Face;
pub use greedy::build_faces;
pub use mesh::*;
