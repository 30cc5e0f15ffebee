//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides block type identification, conversion from the compact storage
//! representation, and the per-type display colour used by the mesher.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// `AIR` is the unique empty value; every other variant is solid for
/// collision, picking and meshing purposes. The discriminants are stable and
/// double as indices into [`super::BLOCK_COLORS`].
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// Empty space. Never collides, never meshed.
    #[default]
    AIR = 0,

    /// Bare rock, the bulk of every column below the dirt layer.
    STONE,

    /// Broken rock, found on rough mountain surfaces.
    COBBLESTONE,

    /// The few layers just under the surface.
    DIRT,

    /// The surface of flat and hilly ground.
    GRASS,

    /// Tree trunks.
    LOGS,

    /// Tree crowns.
    LEAVES,

    /// Player-placed wood.
    PLANKS,

    /// Player-placed glass. Solid for collision, drawn like any other block.
    GLASS,

    /// Player-placed bricks.
    BRICKS,
}

/// Number of variants in [`BlockType`].
pub const BLOCK_TYPE_COUNT: usize = 10;

impl BlockType {
    /// Every block type a player can place, in hotbar slot order.
    pub const PLACEABLE: [BlockType; 9] = [
        BlockType::STONE,
        BlockType::COBBLESTONE,
        BlockType::DIRT,
        BlockType::GRASS,
        BlockType::LOGS,
        BlockType::LEAVES,
        BlockType::PLANKS,
        BlockType::GLASS,
        BlockType::BRICKS,
    ];

    /// Converts a compact `BlockTypeSize` back into a `BlockType`.
    ///
    /// # Returns
    /// `None` if the value does not name a block type.
    pub fn from_index(btype: BlockTypeSize) -> Option<Self> {
        FromPrimitive::from_u8(btype)
    }

    /// Returns the compact storage value of this block type.
    pub const fn index(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// Whether this block is empty space.
    pub const fn is_air(self) -> bool {
        matches!(self, BlockType::AIR)
    }

    /// Whether this block blocks movement, stops rays and produces faces.
    pub const fn is_solid(self) -> bool {
        !self.is_air()
    }

    /// The base RGB display colour of this block type, before directional shading.
    pub const fn color(self) -> [f32; 3] {
        match self {
            BlockType::AIR => [0.0, 0.0, 0.0],
            BlockType::STONE => [0.533, 0.533, 0.533],
            BlockType::COBBLESTONE => [0.4, 0.4, 0.4],
            BlockType::DIRT => [0.545, 0.271, 0.075],
            BlockType::GRASS => [0.298, 0.686, 0.314],
            BlockType::LOGS => [0.42, 0.259, 0.149],
            BlockType::LEAVES => [0.133, 0.545, 0.133],
            BlockType::PLANKS => [0.871, 0.722, 0.529],
            BlockType::GLASS => [0.678, 0.847, 0.902],
            BlockType::BRICKS => [0.698, 0.133, 0.133],
        }
    }

    /// A human readable name, used in log output.
    pub const fn name(self) -> &'static str {
        match self {
            BlockType::AIR => "air",
            BlockType::STONE => "stone",
            BlockType::COBBLESTONE => "cobblestone",
            BlockType::DIRT => "dirt",
            BlockType::GRASS => "grass",
            BlockType::LOGS => "logs",
            BlockType::LEAVES => "leaves",
            BlockType::PLANKS => "planks",
            BlockType::GLASS => "glass",
            BlockType::BRICKS => "bricks",
        }
    }
}
