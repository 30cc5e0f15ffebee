//! Procedural trees.
//!
//! Trees are grown inside a single chunk. Any trunk or leaf cell that falls
//! outside the chunk (horizontally or above the world height) is skipped, so
//! crowns near a chunk border are cut off rather than spilling over.

use crate::engine_state::voxels::{block::block_type::BlockType, chunk::Chunk};

/// The three tree shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeKind {
    /// Trunk 4-6, rounded crown of radius 2.
    Oak,
    /// Trunk 8-11, narrow 3x3 crown over the top four layers.
    Tall,
    /// 2x2 trunk 6-8, wide roughly spherical crown.
    Large,
}

impl TreeKind {
    /// Picks a tree kind: 70% oak, 20% tall, 10% large.
    pub fn choose(rng: &mut fastrand::Rng) -> Self {
        let roll = rng.f64();
        if roll < 0.7 {
            TreeKind::Oak
        } else if roll < 0.9 {
            TreeKind::Tall
        } else {
            TreeKind::Large
        }
    }
}

/// Grows a tree whose trunk starts at chunk-local (`x`, `base_y`, `z`).
pub fn grow(chunk: &mut Chunk, rng: &mut fastrand::Rng, kind: TreeKind, x: i32, base_y: i32, z: i32) {
    match kind {
        TreeKind::Oak => grow_oak(chunk, rng, x, base_y, z),
        TreeKind::Tall => grow_tall(chunk, rng, x, base_y, z),
        TreeKind::Large => grow_large(chunk, rng, x, base_y, z),
    }
}

fn grow_oak(chunk: &mut Chunk, rng: &mut fastrand::Rng, x: i32, base_y: i32, z: i32) {
    let height = rng.i32(4..=6);
    for dy in 0..height {
        place_log(chunk, x, base_y + dy, z);
    }

    let top = base_y + height;
    for dy in -2..=2_i32 {
        for dz in -2..=2_i32 {
            for dx in -2..=2_i32 {
                if dx.abs() + dy.abs() + dz.abs() > 3 {
                    continue;
                }
                if rng.f64() < 0.8 {
                    place_leaves(chunk, x + dx, top + dy, z + dz);
                }
            }
        }
    }
}

fn grow_tall(chunk: &mut Chunk, rng: &mut fastrand::Rng, x: i32, base_y: i32, z: i32) {
    let height = rng.i32(8..=11);
    for dy in 0..height {
        place_log(chunk, x, base_y + dy, z);
    }

    let top = base_y + height;
    for y in top - 3..=top {
        for dz in -1..=1 {
            for dx in -1..=1 {
                if rng.f64() < 0.9 {
                    place_leaves(chunk, x + dx, y, z + dz);
                }
            }
        }
    }
}

fn grow_large(chunk: &mut Chunk, rng: &mut fastrand::Rng, x: i32, base_y: i32, z: i32) {
    let height = rng.i32(6..=8);
    for dy in 0..height {
        for (tx, tz) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            place_log(chunk, x + tx, base_y + dy, z + tz);
        }
    }

    // The crown is centred between the four trunk columns
    let top = base_y + height;
    let radius = 4.0_f32;
    for dy in -2..=3 {
        for dz in -3..=4 {
            for dx in -3..=4 {
                let fx = dx as f32 - 0.5;
                let fz = dz as f32 - 0.5;
                let fy = dy as f32 * 1.5;
                if (fx * fx + fy * fy + fz * fz).sqrt() > radius {
                    continue;
                }
                if rng.f64() < 0.7 {
                    place_leaves(chunk, x + dx, top + dy, z + dz);
                }
            }
        }
    }
}

/// Trunks overwrite whatever is there.
fn place_log(chunk: &mut Chunk, x: i32, y: i32, z: i32) {
    if Chunk::contains_local(x, y, z) {
        chunk.set_block_at(x as usize, y as usize, z as usize, BlockType::LOGS);
    }
}

/// Leaves only fill air.
fn place_leaves(chunk: &mut Chunk, x: i32, y: i32, z: i32) {
    if Chunk::contains_local(x, y, z) && chunk.get_block_at(x as usize, y as usize, z as usize).is_air() {
        chunk.set_block_at(x as usize, y as usize, z as usize, BlockType::LEAVES);
    }
}
