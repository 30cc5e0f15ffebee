//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a dense column of
//! `CHUNK_SIZE x WORLD_HEIGHT x CHUNK_SIZE` blocks plus the bookkeeping the
//! renderer needs (cached mesh, dirty flag, last known visibility).
//!
//! ## Storage Layout
//!
//! Blocks are stored row-major with `index = x + z * CHUNK_SIZE + y * CHUNK_SIZE²`,
//! so a horizontal slice of the chunk is contiguous. Alongside the block array a
//! bit vector (`solid_array`) mirrors which cells are solid:
//! - **Solidity Check**: O(1), a single bit lookup
//! - **Block Lookup**: O(1), a direct index into `blocks`
//! - **Memory Usage**: 1 byte + 1 bit per block

use bitvec::prelude::BitVec;

use super::block::block_type::BlockType;
use super::coords::ChunkCoord;
use crate::engine_state::rendering::meshing::ChunkMesh;

pub use chunk_creation::ChunkCreationIterator;

mod chunk_creation;

/// The width and depth of a chunk in blocks.
pub const CHUNK_SIZE: i32 = 16;
/// The height of the world (and of every chunk) in blocks.
pub const WORLD_HEIGHT: i32 = 64;
/// The number of blocks in a single horizontal slice of a chunk (CHUNK_SIZE²).
pub const CHUNK_PLANE_SIZE: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;
/// The total number of blocks in a chunk.
pub const CHUNK_VOLUME: usize = CHUNK_PLANE_SIZE * WORLD_HEIGHT as usize;

/// A fixed-size column of the voxel world, the unit of generation, meshing and eviction.
///
/// A chunk's mesh, when present and `needs_remesh` is false, reflects the
/// current block grid exactly. Every block write through [`Chunk::set_block_at`]
/// raises the dirty flag; installing a freshly built mesh clears it.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: ChunkCoord,

    /// Block data in storage order, always `CHUNK_VOLUME` long.
    blocks: Vec<BlockType>,

    /// One bit per block, set when the block is solid.
    solid_array: BitVec,

    /// Number of set bits in `solid_array`.
    solid_count: usize,

    /// The last mesh built for this chunk. `None` both before the first build
    /// and when the chunk has no visible surface.
    mesh: Option<ChunkMesh>,

    needs_remesh: bool,

    /// Visibility last reported to the render sink.
    visible: bool,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all blocks are air).
    pub fn empty(position: ChunkCoord) -> Self {
        ChunkCreationIterator::new(position).return_chunk()
    }

    /// Creates a new chunk completely filled with `block_type`.
    pub fn solid(position: ChunkCoord, block_type: BlockType) -> Self {
        let mut cci = ChunkCreationIterator::new(position);

        for _ in 0..CHUNK_VOLUME {
            cci.push_block_type(block_type);
        }

        cci.return_chunk()
    }

    /// Creates a new chunk with a 3D checkerboard of `block_type` and air.
    pub fn checkerboard(position: ChunkCoord, block_type: BlockType) -> Self {
        let mut cci = ChunkCreationIterator::new(position);

        for y in 0..WORLD_HEIGHT as usize {
            for z in 0..CHUNK_SIZE as usize {
                for x in 0..CHUNK_SIZE as usize {
                    if (x + y + z) % 2 == 0 {
                        cci.push_block_type(block_type);
                    } else {
                        cci.push_block_type(BlockType::AIR);
                    }
                }
            }
        }

        cci.return_chunk()
    }

    /// Storage index of the chunk-relative coordinate (`x`, `y`, `z`).
    #[inline]
    pub fn index(x: usize, y: usize, z: usize) -> usize {
        x + z * CHUNK_SIZE as usize + y * CHUNK_PLANE_SIZE
    }

    /// Whether a signed chunk-relative coordinate lies inside the chunk.
    pub fn contains_local(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_SIZE).contains(&x) && (0..WORLD_HEIGHT).contains(&y) && (0..CHUNK_SIZE).contains(&z)
    }

    /// Gets the block at the specified chunk-relative coordinates.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn get_block_at(&self, x: usize, y: usize, z: usize) -> BlockType {
        self.blocks[Self::index(x, y, z)]
    }

    /// Checks if the block at the specified chunk-relative coordinates is solid.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn is_block_solid(&self, x: usize, y: usize, z: usize) -> bool {
        self.solid_array[Self::index(x, y, z)]
    }

    /// Writes a block and marks the chunk for remeshing.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn set_block_at(&mut self, x: usize, y: usize, z: usize, block_type: BlockType) {
        let index = Self::index(x, y, z);
        let was_solid = self.solid_array[index];
        let is_solid = block_type.is_solid();

        self.blocks[index] = block_type;
        self.solid_array.set(index, is_solid);
        match (was_solid, is_solid) {
            (false, true) => self.solid_count += 1,
            (true, false) => self.solid_count -= 1,
            _ => {}
        }
        self.needs_remesh = true;
    }

    /// Number of solid blocks in the chunk.
    pub fn solid_count(&self) -> usize {
        self.solid_count
    }

    /// Whether the chunk holds nothing but air.
    pub fn is_empty(&self) -> bool {
        self.solid_count == 0
    }

    /// Whether the cached mesh is stale (or was never built).
    pub fn needs_remesh(&self) -> bool {
        self.needs_remesh
    }

    /// Flags the chunk for remeshing without touching its blocks.
    pub fn mark_dirty(&mut self) {
        self.needs_remesh = true;
    }

    /// The current cached mesh, if any.
    pub fn mesh(&self) -> Option<&ChunkMesh> {
        self.mesh.as_ref()
    }

    /// Installs a freshly built mesh and clears the dirty flag.
    ///
    /// # Returns
    /// The previous mesh, which the caller must hand back to the render sink.
    pub fn replace_mesh(&mut self, mesh: Option<ChunkMesh>) -> Option<ChunkMesh> {
        self.needs_remesh = false;
        std::mem::replace(&mut self.mesh, mesh)
    }

    /// Removes the cached mesh, leaving the chunk dirty.
    pub fn take_mesh(&mut self) -> Option<ChunkMesh> {
        self.needs_remesh = true;
        self.mesh.take()
    }

    /// Visibility last reported to the render sink.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Records the visibility last reported to the render sink.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_x_then_z_then_y() {
        assert_eq!(Chunk::index(0, 0, 0), 0);
        assert_eq!(Chunk::index(1, 0, 0), 1);
        assert_eq!(Chunk::index(0, 0, 1), CHUNK_SIZE as usize);
        assert_eq!(Chunk::index(0, 1, 0), CHUNK_PLANE_SIZE);
        assert_eq!(Chunk::index(15, 63, 15), CHUNK_VOLUME - 1);
    }

    #[test]
    fn set_block_updates_solidity_and_count() {
        let mut chunk = Chunk::empty(ChunkCoord::new(0, 0));
        assert!(chunk.is_empty());

        chunk.set_block_at(3, 10, 7, BlockType::BRICKS);
        assert_eq!(chunk.get_block_at(3, 10, 7), BlockType::BRICKS);
        assert!(chunk.is_block_solid(3, 10, 7));
        assert_eq!(chunk.solid_count(), 1);

        chunk.set_block_at(3, 10, 7, BlockType::STONE);
        assert_eq!(chunk.solid_count(), 1);

        chunk.set_block_at(3, 10, 7, BlockType::AIR);
        assert!(!chunk.is_block_solid(3, 10, 7));
        assert!(chunk.is_empty());
    }

    #[test]
    fn replacing_the_mesh_clears_the_dirty_flag() {
        let mut chunk = Chunk::solid(ChunkCoord::new(0, 0), BlockType::DIRT);
        assert!(chunk.needs_remesh());
        assert_eq!(chunk.solid_count(), CHUNK_VOLUME);

        assert!(chunk.replace_mesh(None).is_none());
        assert!(!chunk.needs_remesh());

        chunk.set_block_at(0, 0, 0, BlockType::AIR);
        assert!(chunk.needs_remesh());
    }

    #[test]
    fn checkerboard_fills_half_the_chunk() {
        let chunk = Chunk::checkerboard(ChunkCoord::new(0, 0), BlockType::STONE);
        assert_eq!(chunk.solid_count(), CHUNK_VOLUME / 2);
        assert!(chunk.is_block_solid(0, 0, 0));
        assert!(!chunk.is_block_solid(1, 0, 0));
        assert!(!chunk.is_block_solid(0, 1, 0));
        assert!(chunk.is_block_solid(1, 1, 0));
    }

    #[test]
    fn contains_local_checks_every_axis() {
        assert!(Chunk::contains_local(0, 0, 0));
        assert!(Chunk::contains_local(15, 63, 15));
        assert!(!Chunk::contains_local(16, 0, 0));
        assert!(!Chunk::contains_local(0, 64, 0));
        assert!(!Chunk::contains_local(0, 0, -1));
    }
}
