//! Greedy meshing implementation for voxel rendering.
//!
//! This module implements the greedy meshing algorithm which combines adjacent coplanar
//! faces with the same block type into larger quads, significantly reducing the number of
//! vertices needed to render a chunk.
//!
//! For each axis a plane is swept through the chunk, one position per cell boundary
//! including the two outer boundaries. At every position a 2D mask records, per cell,
//! the block type on the solid side of the boundary (positive when the near side is
//! solid, negated when only the far side is). Maximal rectangles of equal mask value are
//! then grown, first along the width and then row by row, emitted as one quad each and
//! cleared from the mask.
//!
//! The mesher never looks into neighbouring chunks: everything outside the chunk counts
//! as air, so both chunks at a shared border draw a face there. Two different solid
//! blocks touching each other produce no face either, only solid/air boundaries do.

use crate::engine_state::voxels::{
    block::block_type::BlockType,
    chunk::{Chunk, CHUNK_SIZE, WORLD_HEIGHT},
};

use super::face::Face;

/// Chunk extent along X, Y and Z.
const DIMS: [usize; 3] = [CHUNK_SIZE as usize, WORLD_HEIGHT as usize, CHUNK_SIZE as usize];

/// The block at a signed chunk position, air outside the chunk.
fn block_at(chunk: &Chunk, position: [i32; 3]) -> BlockType {
    if Chunk::contains_local(position[0], position[1], position[2]) {
        chunk.get_block_at(
            position[0] as usize,
            position[1] as usize,
            position[2] as usize,
        )
    } else {
        BlockType::AIR
    }
}

/// Mask value for the boundary between `near` and the next cell `far` along the sweep axis.
fn mask_value(near: BlockType, far: BlockType) -> i16 {
    match (near.is_solid(), far.is_solid()) {
        (true, false) => near.index() as i16,
        (false, true) => -(far.index() as i16),
        _ => 0,
    }
}

/// Builds the minimal set of quads covering every solid/air boundary of `chunk`.
///
/// # Arguments
/// * `chunk` - The chunk to mesh
///
/// # Returns
/// The faces in chunk-local coordinates. An all-air chunk yields no faces.
pub fn build_faces(chunk: &Chunk) -> Vec<Face> {
    let mut faces = Vec::new();
    if chunk.is_empty() {
        return faces;
    }

    for axis in 0..3 {
        let u = (axis + 1) % 3;
        let v = (axis + 2) % 3;
        let (width, height) = (DIMS[u], DIMS[v]);
        let mut mask = vec![0_i16; width * height];

        let mut step = [0_i32; 3];
        step[axis] = 1;

        // `plane` is the index of the cell just past the boundary being examined
        for plane in 0..=DIMS[axis] {
            let mut position = [0_i32; 3];
            position[axis] = plane as i32 - 1;

            let mut n = 0;
            for j in 0..height {
                position[v] = j as i32;
                for i in 0..width {
                    position[u] = i as i32;
                    let near = block_at(chunk, position);
                    let far = block_at(
                        chunk,
                        [
                            position[0] + step[0],
                            position[1] + step[1],
                            position[2] + step[2],
                        ],
                    );
                    mask[n] = mask_value(near, far);
                    n += 1;
                }
            }

            emit_rectangles(&mut mask, width, height, axis, plane, &mut faces);
        }
    }

    faces
}

/// Greedily consumes `mask`, pushing one face per maximal rectangle.
fn emit_rectangles(
    mask: &mut [i16],
    width: usize,
    height: usize,
    axis: usize,
    plane: usize,
    faces: &mut Vec<Face>,
) {
    let u = (axis + 1) % 3;
    let v = (axis + 2) % 3;

    for j in 0..height {
        let mut i = 0;
        while i < width {
            let n = i + j * width;
            let value = mask[n];
            if value == 0 {
                i += 1;
                continue;
            }

            let mut w = 1;
            while i + w < width && mask[n + w] == value {
                w += 1;
            }

            let mut h = 1;
            'rows: while j + h < height {
                for k in 0..w {
                    if mask[n + k + h * width] != value {
                        break 'rows;
                    }
                }
                h += 1;
            }

            let mut base = [0_usize; 3];
            base[axis] = plane;
            base[u] = i;
            base[v] = j;

            // A non-zero mask always holds a valid solid ordinal
            if let Some(block_type) = BlockType::from_index(value.unsigned_abs() as u8) {
                faces.push(Face::from_rectangle(base, axis, w, h, value > 0, block_type));
            }

            for l in 0..h {
                for k in 0..w {
                    mask[n + k + l * width] = 0;
                }
            }

            i += w;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::{block::block_side::BlockSide, coords::ChunkCoord};

    #[test]
    fn empty_chunk_has_no_faces() {
        assert!(build_faces(&Chunk::empty(ChunkCoord::new(0, 0))).is_empty());
    }

    #[test]
    fn single_block_has_six_unit_faces() {
        let mut chunk = Chunk::empty(ChunkCoord::new(0, 0));
        chunk.set_block_at(4, 10, 9, BlockType::BRICKS);
        let faces = build_faces(&chunk);
        assert_eq!(faces.len(), 6);
        for side in BlockSide::all() {
            assert_eq!(faces.iter().filter(|f| f.block_side == side).count(), 1);
        }
        assert!(faces.iter().all(|f| f.area() == 1 && f.block_type == BlockType::BRICKS));
    }

    #[test]
    fn solid_chunk_collapses_to_six_faces() {
        let chunk = Chunk::solid(ChunkCoord::new(0, 0), BlockType::STONE);
        let faces = build_faces(&chunk);
        assert_eq!(faces.len(), 6);

        let plane = (CHUNK_SIZE * CHUNK_SIZE) as usize;
        let wall = (CHUNK_SIZE * WORLD_HEIGHT) as usize;
        for face in &faces {
            let expected = match face.block_side {
                BlockSide::TOP | BlockSide::BOTTOM => plane,
                _ => wall,
            };
            assert_eq!(face.area(), expected);
        }
    }

    #[test]
    fn differing_solids_share_no_face() {
        let mut chunk = Chunk::empty(ChunkCoord::new(0, 0));
        chunk.set_block_at(5, 5, 5, BlockType::STONE);
        chunk.set_block_at(6, 5, 5, BlockType::DIRT);
        let faces = build_faces(&chunk);

        let covered: usize = faces.iter().map(Face::area).sum();
        assert_eq!(covered, 10);
        assert!(faces
            .iter()
            .filter(|f| f.block_side == BlockSide::RIGHT)
            .all(|f| f.ll.x == 7));
    }

    #[test]
    fn same_type_row_merges() {
        let mut chunk = Chunk::empty(ChunkCoord::new(0, 0));
        for x in 0..4 {
            chunk.set_block_at(x, 0, 0, BlockType::PLANKS);
        }
        let faces = build_faces(&chunk);
        assert_eq!(faces.len(), 6);
        let top = faces.iter().find(|f| f.block_side == BlockSide::TOP).unwrap();
        assert_eq!(top.area(), 4);
    }
}
