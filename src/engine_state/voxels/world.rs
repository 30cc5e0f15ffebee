//! # World Module
//!
//! This module provides the `World` struct which owns every loaded chunk and
//! answers block queries in world coordinates.
//!
//! ## Architecture
//!
//! The world uses a sparse storage approach: a hash map from chunk coordinate
//! to chunk, holding at most one chunk per coordinate. Reads from unloaded
//! chunks see air; writes into unloaded chunks generate them first.
//!
//! ## Chunk Lifetime
//!
//! Chunks within the render distance of the player are generated by
//! [`World::update_active_region`]; chunks that drift further than the render
//! distance plus a hysteresis margin are reported for eviction. Generation only
//! targets missing in-range coordinates and eviction only targets present
//! out-of-range ones, so the two never touch the same chunk in one update.

use std::collections::HashMap;

use cgmath::Point3;
use log::debug;

use super::{
    block::block_type::BlockType,
    chunk::{Chunk, CHUNK_SIZE, WORLD_HEIGHT},
    coords::{local_coordinate, ChunkCoord},
    terrain::TerrainGenerator,
};

/// Represents a voxel world composed of multiple chunks.
///
/// # Examples
///
/// ```
/// use voxel_world::engine_state::voxels::{block::block_type::BlockType, world::World};
///
/// let mut world = World::with_seed(42);
/// world.set_block(3, 40, -7, BlockType::BRICKS);
/// assert_eq!(world.get_block(3, 40, -7), BlockType::BRICKS);
/// assert_eq!(world.get_block(3, 64, -7), BlockType::AIR);
/// ```
pub struct World {
    /// A mapping from chunk coordinates to chunk data.
    chunks: HashMap<ChunkCoord, Chunk>,
    generator: TerrainGenerator,
}

impl World {
    /// Creates a new, empty world that generates chunks with `generator`.
    pub fn new(generator: TerrainGenerator) -> Self {
        World {
            chunks: HashMap::new(),
            generator,
        }
    }

    /// Creates a new, empty world with the standard terrain for `seed`.
    pub fn with_seed(seed: u32) -> Self {
        Self::new(TerrainGenerator::new(seed))
    }

    /// The generator used for new chunks.
    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    /// Number of loaded chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether no chunk is loaded.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Whether a chunk exists at `position`.
    pub fn contains_chunk(&self, position: ChunkCoord) -> bool {
        self.chunks.contains_key(&position)
    }

    /// Retrieves the chunk at the specified chunk coordinates.
    pub fn get_chunk(&self, position: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    /// Retrieves the chunk at the specified chunk coordinates for writing.
    pub fn get_chunk_mut(&mut self, position: ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(&position)
    }

    /// Iterates over all loaded chunks.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Iterates mutably over all loaded chunks.
    pub fn chunks_mut(&mut self) -> impl Iterator<Item = &mut Chunk> {
        self.chunks.values_mut()
    }

    /// Number of loaded chunks waiting for a remesh.
    pub fn dirty_count(&self) -> usize {
        self.chunks.values().filter(|chunk| chunk.needs_remesh()).count()
    }

    /// Adds a new chunk at the specified position if one doesn't already exist.
    ///
    /// # Returns
    /// The chunk now stored at `position`.
    pub fn add_chunk_at(&mut self, position: ChunkCoord) -> &mut Chunk {
        let generator = &self.generator;
        self.chunks
            .entry(position)
            .or_insert_with(|| generator.generate(position))
    }

    /// Gets the block at world coordinates.
    ///
    /// Returns air above and below the world and inside chunks that are not loaded.
    pub fn get_block(&self, world_x: i32, world_y: i32, world_z: i32) -> BlockType {
        if !(0..WORLD_HEIGHT).contains(&world_y) {
            return BlockType::AIR;
        }

        match self.chunks.get(&ChunkCoord::containing(world_x, world_z)) {
            Some(chunk) => chunk.get_block_at(
                local_coordinate(world_x),
                world_y as usize,
                local_coordinate(world_z),
            ),
            None => BlockType::AIR,
        }
    }

    /// Whether the block at world coordinates is solid.
    pub fn is_solid(&self, world_x: i32, world_y: i32, world_z: i32) -> bool {
        self.get_block(world_x, world_y, world_z).is_solid()
    }

    /// Gets the block at an integer world position.
    pub fn get_block_at(&self, position: Point3<i32>) -> BlockType {
        self.get_block(position.x, position.y, position.z)
    }

    /// Writes a block at world coordinates.
    ///
    /// Does nothing outside the world height. Generates the owning chunk if it
    /// is not loaded. Marks the owning chunk dirty, along with each loaded
    /// neighbour that shares the face the written cell lies on.
    pub fn set_block(&mut self, world_x: i32, world_y: i32, world_z: i32, block_type: BlockType) {
        if !(0..WORLD_HEIGHT).contains(&world_y) {
            return;
        }

        let position = ChunkCoord::containing(world_x, world_z);
        let local_x = local_coordinate(world_x);
        let local_z = local_coordinate(world_z);

        self.add_chunk_at(position)
            .set_block_at(local_x, world_y as usize, local_z, block_type);

        let last = (CHUNK_SIZE - 1) as usize;
        let mut neighbours = Vec::with_capacity(2);
        if local_x == 0 {
            neighbours.push(position.offset(-1, 0));
        } else if local_x == last {
            neighbours.push(position.offset(1, 0));
        }
        if local_z == 0 {
            neighbours.push(position.offset(0, -1));
        } else if local_z == last {
            neighbours.push(position.offset(0, 1));
        }

        for neighbour in neighbours {
            if let Some(chunk) = self.chunks.get_mut(&neighbour) {
                chunk.mark_dirty();
            }
        }
    }

    /// Writes a block at an integer world position.
    pub fn set_block_at(&mut self, position: Point3<i32>, block_type: BlockType) {
        self.set_block(position.x, position.y, position.z, block_type);
    }

    /// Y of the highest solid block in a world column, if the column is loaded and not empty.
    pub fn surface_height(&self, world_x: i32, world_z: i32) -> Option<i32> {
        (0..WORLD_HEIGHT)
            .rev()
            .find(|&y| self.is_solid(world_x, y, world_z))
    }

    /// Generates every missing chunk within `render_distance` (Chebyshev) of `center`.
    ///
    /// # Returns
    /// The loaded chunks further than `render_distance + eviction_margin`,
    /// which the caller should pass to [`World::evict`].
    pub fn update_active_region(
        &mut self,
        center: ChunkCoord,
        render_distance: i32,
        eviction_margin: i32,
    ) -> Vec<ChunkCoord> {
        let mut generated = 0;
        for dz in -render_distance..=render_distance {
            for dx in -render_distance..=render_distance {
                let position = center.offset(dx, dz);
                if !self.chunks.contains_key(&position) {
                    self.add_chunk_at(position);
                    generated += 1;
                }
            }
        }

        let keep_distance = render_distance + eviction_margin;
        let mut to_evict: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .filter(|position| position.chebyshev_distance(&center) > keep_distance)
            .copied()
            .collect();
        to_evict.sort();

        if generated > 0 || !to_evict.is_empty() {
            debug!(
                "Active region around ({}, {}): generated {}, {} to evict",
                center.x,
                center.z,
                generated,
                to_evict.len()
            );
        }

        to_evict
    }

    /// Removes a chunk from the world.
    ///
    /// # Returns
    /// The evicted chunk, so its mesh can be released to the renderer.
    pub fn evict(&mut self, position: ChunkCoord) -> Option<Chunk> {
        let chunk = self.chunks.remove(&position);
        if chunk.is_some() {
            debug!("Evicted chunk ({}, {})", position.x, position.z);
        }
        chunk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_from_unloaded_chunks_are_air() {
        let world = World::with_seed(1);
        assert_eq!(world.get_block(0, 0, 0), BlockType::AIR);
        assert!(world.is_empty());
    }

    #[test]
    fn set_block_generates_the_owning_chunk() {
        let mut world = World::with_seed(1);
        world.set_block(-1, 50, -1, BlockType::GLASS);
        assert!(world.contains_chunk(ChunkCoord::new(-1, -1)));
        assert_eq!(world.len(), 1);
        assert_eq!(world.get_block(-1, 50, -1), BlockType::GLASS);
    }

    #[test]
    fn set_block_out_of_height_is_ignored() {
        let mut world = World::with_seed(1);
        world.set_block(0, -1, 0, BlockType::STONE);
        world.set_block(0, WORLD_HEIGHT, 0, BlockType::STONE);
        assert!(world.is_empty());
    }

    #[test]
    fn add_chunk_at_never_recreates() {
        let mut world = World::with_seed(1);
        world.set_block(0, 63, 0, BlockType::BRICKS);
        world.add_chunk_at(ChunkCoord::new(0, 0));
        assert_eq!(world.get_block(0, 63, 0), BlockType::BRICKS);
    }

    #[test]
    fn surface_height_finds_the_top_block() {
        let mut world = World::with_seed(1);
        world.add_chunk_at(ChunkCoord::new(0, 0));
        let top = world.surface_height(4, 4).unwrap();
        assert!(world.is_solid(4, top, 4));
        assert!((top + 1..WORLD_HEIGHT).all(|y| !world.is_solid(4, y, 4)));
    }
}
