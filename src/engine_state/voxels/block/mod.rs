//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes block type definitions, block faces and the colour table.

use block_type::{BlockType, BLOCK_TYPE_COUNT};

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Base display colour of each block type, indexed by `BlockType as usize`.
///
/// Built from the exhaustive [`BlockType::color`] match, so a new variant
/// cannot be added without giving it a colour.
pub static BLOCK_COLORS: [[f32; 3]; BLOCK_TYPE_COUNT] = [
    BlockType::AIR.color(),
    BlockType::STONE.color(),
    BlockType::COBBLESTONE.color(),
    BlockType::DIRT.color(),
    BlockType::GRASS.color(),
    BlockType::LOGS.color(),
    BlockType::LEAVES.color(),
    BlockType::PLANKS.color(),
    BlockType::GLASS.color(),
    BlockType::BRICKS.color(),
];

/// Looks up the base colour of a block type.
pub fn color_of(block_type: BlockType) -> [f32; 3] {
    BLOCK_COLORS[block_type as usize]
}
