//! Chunk coordinates on the XZ plane and conversions from world block coordinates.

use cgmath::Point3;

use super::chunk::{CHUNK_SIZE, WORLD_HEIGHT};

/// Chunk indices on the XZ plane.
///
/// Chunks span the full world height, so a chunk is identified by two integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    /// Chunk index along X.
    pub x: i32,
    /// Chunk index along Z.
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a chunk coordinate.
    pub const fn new(x: i32, z: i32) -> Self {
        ChunkCoord { x, z }
    }

    /// The chunk owning the world column (`world_x`, `world_z`).
    pub fn containing(world_x: i32, world_z: i32) -> Self {
        ChunkCoord {
            x: world_x.div_euclid(CHUNK_SIZE),
            z: world_z.div_euclid(CHUNK_SIZE),
        }
    }

    /// The chunk owning a continuous world position.
    pub fn containing_point(point: Point3<f32>) -> Self {
        Self::containing(point.x.floor() as i32, point.z.floor() as i32)
    }

    /// World block coordinate of this chunk's (0, 0, 0) corner.
    pub fn world_origin(&self) -> Point3<i32> {
        Point3::new(self.x * CHUNK_SIZE, 0, self.z * CHUNK_SIZE)
    }

    /// World-space bounding box of the chunk as (min, max) corners.
    pub fn world_bounds(&self) -> (Point3<f32>, Point3<f32>) {
        let origin = self.world_origin();
        let origin = Point3::new(origin.x as f32, 0.0, origin.z as f32);
        let size = CHUNK_SIZE as f32;
        (
            origin,
            Point3::new(origin.x + size, WORLD_HEIGHT as f32, origin.z + size),
        )
    }

    /// Chebyshev (chessboard) distance between two chunks.
    pub fn chebyshev_distance(&self, other: &ChunkCoord) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }

    /// Chunk offset by (`dx`, `dz`).
    pub fn offset(&self, dx: i32, dz: i32) -> Self {
        ChunkCoord::new(self.x + dx, self.z + dz)
    }
}

/// Position of a world X or Z block coordinate inside its chunk, always in `0..CHUNK_SIZE`.
pub fn local_coordinate(world: i32) -> usize {
    world.rem_euclid(CHUNK_SIZE) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, 0, 0, 0)]
    #[test_case(15, 15, 0, 0)]
    #[test_case(16, -1, 1, -1)]
    #[test_case(-16, -17, -1, -2)]
    fn containing_uses_floor_division(wx: i32, wz: i32, cx: i32, cz: i32) {
        assert_eq!(ChunkCoord::containing(wx, wz), ChunkCoord::new(cx, cz));
    }

    #[test_case(0, 0)]
    #[test_case(17, 1)]
    #[test_case(-1, 15)]
    #[test_case(-16, 0)]
    #[test_case(-17, 15)]
    fn local_coordinate_is_never_negative(world: i32, local: usize) {
        assert_eq!(local_coordinate(world), local);
    }

    #[test]
    fn chebyshev_distance_takes_the_larger_axis() {
        let a = ChunkCoord::new(2, -3);
        assert_eq!(a.chebyshev_distance(&ChunkCoord::new(-1, -2)), 3);
        assert_eq!(a.chebyshev_distance(&a), 0);
    }

    #[test]
    fn containing_point_floors_negative_positions() {
        let coord = ChunkCoord::containing_point(Point3::new(-0.5, 10.0, 16.2));
        assert_eq!(coord, ChunkCoord::new(-1, 1));
    }
}
