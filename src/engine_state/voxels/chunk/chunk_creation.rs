//! # Chunk Creation Module
//!
//! This module provides a builder that populates a chunk block by block in
//! storage order (X fastest, then Z, then Y), keeping the block array and the
//! solidity bit vector in step as it goes.

use bitvec::vec::BitVec;

use crate::engine_state::voxels::{block::block_type::BlockType, coords::ChunkCoord};

use super::{Chunk, CHUNK_VOLUME};

/// A builder for creating and populating chunks in storage order.
///
/// Blocks pushed past `CHUNK_VOLUME` are ignored; cells never pushed are air.
pub struct ChunkCreationIterator {
    /// The position of the chunk being created
    position: ChunkCoord,
    /// Blocks pushed so far
    blocks: Vec<BlockType>,
    /// One bit per pushed block, set when the block is solid
    solid_array: BitVec,
    /// Number of solid blocks pushed so far
    solid_count: usize,
}

impl ChunkCreationIterator {
    /// Creates a new `ChunkCreationIterator` for building a chunk at the given position.
    pub fn new(position: ChunkCoord) -> Self {
        ChunkCreationIterator {
            position,
            blocks: Vec::with_capacity(CHUNK_VOLUME),
            solid_array: BitVec::with_capacity(CHUNK_VOLUME),
            solid_count: 0,
        }
    }

    /// Number of blocks pushed so far.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether no block has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Adds a block at the current position and advances the position.
    pub fn push_block_type(&mut self, block_type: BlockType) {
        if self.blocks.len() == CHUNK_VOLUME {
            return;
        }

        let is_solid = block_type.is_solid();
        self.blocks.push(block_type);
        self.solid_array.push(is_solid);
        if is_solid {
            self.solid_count += 1;
        }
    }

    /// Finalizes the chunk creation and returns the constructed `Chunk`.
    ///
    /// The chunk starts without a mesh and flagged for remeshing.
    pub fn return_chunk(mut self) -> Chunk {
        // Pad unfilled cells with air
        self.blocks.resize(CHUNK_VOLUME, BlockType::AIR);
        self.solid_array.resize(CHUNK_VOLUME, false);

        Chunk {
            position: self.position,
            blocks: self.blocks,
            solid_array: self.solid_array,
            solid_count: self.solid_count,
            mesh: None,
            needs_remesh: true,
            visible: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_fill_is_padded_with_air() {
        let mut cci = ChunkCreationIterator::new(ChunkCoord::new(2, -1));
        cci.push_block_type(BlockType::STONE);
        cci.push_block_type(BlockType::AIR);
        cci.push_block_type(BlockType::GRASS);
        assert_eq!(cci.len(), 3);

        let chunk = cci.return_chunk();
        assert_eq!(chunk.position, ChunkCoord::new(2, -1));
        assert_eq!(chunk.get_block_at(0, 0, 0), BlockType::STONE);
        assert_eq!(chunk.get_block_at(1, 0, 0), BlockType::AIR);
        assert_eq!(chunk.get_block_at(2, 0, 0), BlockType::GRASS);
        assert_eq!(chunk.get_block_at(15, 63, 15), BlockType::AIR);
        assert_eq!(chunk.solid_count(), 2);
    }

    #[test]
    fn pushes_past_the_end_are_ignored() {
        let mut cci = ChunkCreationIterator::new(ChunkCoord::new(0, 0));
        for _ in 0..CHUNK_VOLUME + 10 {
            cci.push_block_type(BlockType::DIRT);
        }
        assert_eq!(cci.len(), CHUNK_VOLUME);
        assert_eq!(cci.return_chunk().solid_count(), CHUNK_VOLUME);
    }
}
