//! # Terrain Generation
//!
//! Fills a chunk's block grid from layered noise height fields and scatters
//! trees over flat grassland.
//!
//! ## Height Model
//!
//! Each column blends three samples of the same [`NoiseField`]:
//! - a very low frequency *mountain factor* that is zero on plains,
//! - gentle *base hills* of a few blocks,
//! - high frequency *mountain detail* that only matters where the factor is non-zero.
//!
//! ## Determinism
//!
//! Generation is a pure function of (seed, chunk coordinate): random choices
//! (rock variety, tree placement and shape) come from a `fastrand::Rng` seeded
//! from both, so regenerating a chunk yields a bit-identical grid.

use log::debug;

use super::{
    block::block_type::BlockType,
    chunk::{Chunk, ChunkCreationIterator, CHUNK_SIZE, WORLD_HEIGHT},
    coords::ChunkCoord,
    noise_field::NoiseField,
};

mod trees;

pub use trees::TreeKind;

/// Base terrain height before hills and mountains are added.
pub const GROUND_LEVEL: f64 = 32.0;
/// Depth of the dirt layer below the surface block.
pub const DIRT_DEPTH: i32 = 4;
/// Chance that a flat grass column grows a tree.
pub const TREE_CHANCE: f64 = 0.008;
/// Mountain height from which the surface turns to rock.
pub const ROCKY_SURFACE_HEIGHT: f64 = 5.0;
/// Chance that a rocky surface block is stone rather than cobblestone.
pub const STONE_SURFACE_CHANCE: f64 = 0.7;

const MOUNTAIN_SCALE: f64 = 0.003;
const HILLS_SCALE: f64 = 0.015;
const DETAIL_SCALE: f64 = 0.03;

/// The shape of a single terrain column, computed before the chunk is filled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnProfile {
    /// Y of the topmost terrain block. May lie outside the world height.
    pub surface_y: i32,
    /// Extra height contributed by mountains. Exactly zero on plains.
    pub mountain_height: f64,
    /// The block placed at `surface_y`.
    pub surface_block: BlockType,
}

impl ColumnProfile {
    /// The terrain block at height `y` in this column.
    pub fn block_at(&self, y: i32) -> BlockType {
        if y == self.surface_y {
            self.surface_block
        } else if y > self.surface_y {
            BlockType::AIR
        } else if y > self.surface_y - DIRT_DEPTH {
            BlockType::DIRT
        } else {
            BlockType::STONE
        }
    }

    /// Whether a tree may grow on top of this column.
    pub fn is_flat_grass(&self) -> bool {
        self.surface_block == BlockType::GRASS && self.mountain_height == 0.0
    }
}

/// Generates chunks from a seed.
///
/// The generator holds no per-chunk state; the world decides when a chunk
/// needs generating and guarantees it happens once per coordinate.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    noise: NoiseField,
}

impl TerrainGenerator {
    /// Creates a generator whose output depends only on `seed`.
    pub fn new(seed: u32) -> Self {
        TerrainGenerator {
            noise: NoiseField::new(seed),
        }
    }

    /// The world seed.
    pub fn seed(&self) -> u32 {
        self.noise.seed()
    }

    /// Terrain height components at a world column, before any random choice.
    ///
    /// # Returns
    /// `(surface_y, mountain_height)`.
    pub fn column_height(&self, world_x: i32, world_z: i32) -> (i32, f64) {
        let (x, z) = (world_x as f64, world_z as f64);

        let mountain_factor =
            ((self.noise.sample(x * MOUNTAIN_SCALE, z * MOUNTAIN_SCALE) - 0.1) * 1.5).max(0.0);
        let base_hills = self.noise.sample(x * HILLS_SCALE, z * HILLS_SCALE) * 6.0;
        let mountain_detail = self.noise.sample(x * DETAIL_SCALE, z * DETAIL_SCALE) * 20.0;
        let mountain_height = mountain_factor * mountain_factor * (25.0 + mountain_detail);

        let total_height = GROUND_LEVEL + base_hills + mountain_height;
        (total_height.floor() as i32, mountain_height)
    }

    /// Generates the chunk at `position`.
    pub fn generate(&self, position: ChunkCoord) -> Chunk {
        let mut rng = fastrand::Rng::with_seed(self.chunk_seed(position));
        let origin = position.world_origin();

        let mut profiles = Vec::with_capacity((CHUNK_SIZE * CHUNK_SIZE) as usize);
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let (surface_y, mountain_height) = self.column_height(origin.x + x, origin.z + z);
                let surface_block = if mountain_height < ROCKY_SURFACE_HEIGHT {
                    BlockType::GRASS
                } else if rng.f64() < STONE_SURFACE_CHANCE {
                    BlockType::STONE
                } else {
                    BlockType::COBBLESTONE
                };
                profiles.push(ColumnProfile {
                    surface_y,
                    mountain_height,
                    surface_block,
                });
            }
        }

        let mut cci = ChunkCreationIterator::new(position);
        for y in 0..WORLD_HEIGHT {
            for profile in profiles.iter() {
                cci.push_block_type(profile.block_at(y));
            }
        }
        let mut chunk = cci.return_chunk();

        let mut trees = 0;
        for (column, profile) in profiles.iter().enumerate() {
            if !profile.is_flat_grass() || !(0..WORLD_HEIGHT).contains(&profile.surface_y) {
                continue;
            }
            if rng.f64() >= TREE_CHANCE {
                continue;
            }
            let x = column as i32 % CHUNK_SIZE;
            let z = column as i32 / CHUNK_SIZE;
            let kind = TreeKind::choose(&mut rng);
            trees::grow(&mut chunk, &mut rng, kind, x, profile.surface_y + 1, z);
            trees += 1;
        }

        debug!(
            "Generated chunk ({}, {}) with {} solid blocks and {} trees",
            position.x,
            position.z,
            chunk.solid_count(),
            trees
        );

        chunk
    }

    /// Mixes the world seed with a chunk coordinate into an RNG seed.
    fn chunk_seed(&self, position: ChunkCoord) -> u64 {
        let x = position.x as u32 as u64;
        let z = position.z as u32 as u64;
        ((self.seed() as u64) << 32)
            ^ x.wrapping_mul(0x9E37_79B9_7F4A_7C15)
            ^ z.wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_profile_layers() {
        let profile = ColumnProfile {
            surface_y: 30,
            mountain_height: 0.0,
            surface_block: BlockType::GRASS,
        };
        assert_eq!(profile.block_at(31), BlockType::AIR);
        assert_eq!(profile.block_at(30), BlockType::GRASS);
        assert_eq!(profile.block_at(29), BlockType::DIRT);
        assert_eq!(profile.block_at(27), BlockType::DIRT);
        assert_eq!(profile.block_at(26), BlockType::STONE);
        assert_eq!(profile.block_at(0), BlockType::STONE);
        assert!(profile.is_flat_grass());
    }

    #[test]
    fn rocky_columns_never_grow_trees() {
        let profile = ColumnProfile {
            surface_y: 50,
            mountain_height: 12.0,
            surface_block: BlockType::STONE,
        };
        assert!(!profile.is_flat_grass());
    }

    #[test]
    fn chunk_seed_differs_between_neighbours() {
        let generator = TerrainGenerator::new(3);
        let a = generator.chunk_seed(ChunkCoord::new(0, 1));
        let b = generator.chunk_seed(ChunkCoord::new(1, 0));
        let c = generator.chunk_seed(ChunkCoord::new(-1, 0));
        assert_ne!(a, b);
        assert_ne!(b, c);
    }

    #[test]
    fn column_height_stays_near_ground_level_on_plains() {
        let generator = TerrainGenerator::new(11);
        for i in 0..64 {
            let (surface_y, mountain_height) = generator.column_height(i * 7, -i * 3);
            if mountain_height == 0.0 {
                assert!((GROUND_LEVEL as i32 - 6..=GROUND_LEVEL as i32 + 6).contains(&surface_y));
            }
            assert!(mountain_height >= 0.0);
        }
    }
}
