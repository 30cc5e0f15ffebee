use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::block::{block_side::BlockSide, block_type::BlockType};

/// Represents a single quad emitted by the greedy mesher.
///
/// A face is defined by four corner points (lower-left, lower-right, upper-right, upper-left)
/// in chunk-local coordinates, wound counter-clockwise when seen from outside the block,
/// and carries the block type and which side of the block it represents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Lower-left corner of the face in chunk coordinates
    pub ll: Point3<usize>,
    /// Lower-right corner of the face in chunk coordinates
    pub lr: Point3<usize>,
    /// Upper-right corner of the face in chunk coordinates
    pub ur: Point3<usize>,
    /// Upper-left corner of the face in chunk coordinates
    pub ul: Point3<usize>,
    /// The solid block this face belongs to, used for colour lookup
    pub block_type: BlockType,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates a face from the rectangle spanning `width` cells along axis `u` and
    /// `height` cells along axis `v`, lying on the plane `base[axis]`.
    ///
    /// # Arguments
    /// * `base` - The corner of the rectangle with the smallest coordinates
    /// * `axis` - The axis the face is perpendicular to (0 = X, 1 = Y, 2 = Z)
    /// * `width`, `height` - Rectangle extent along `(axis + 1) % 3` and `(axis + 2) % 3`
    /// * `positive` - Whether the face looks towards increasing `axis`
    ///
    /// # Returns
    /// A face whose corners are ordered so that `ll, lr, ur` and `ll, ur, ul` are
    /// counter-clockwise seen from the side the normal points to.
    pub fn from_rectangle(
        base: [usize; 3],
        axis: usize,
        width: usize,
        height: usize,
        positive: bool,
        block_type: BlockType,
    ) -> Self {
        let u = (axis + 1) % 3;
        let v = (axis + 2) % 3;

        let mut along_u = base;
        along_u[u] += width;
        let mut along_v = base;
        along_v[v] += height;
        let mut far = base;
        far[u] += width;
        far[v] += height;

        let ll = Point3::from(base);
        let ur = Point3::from(far);
        let (lr, ul) = if positive {
            (Point3::from(along_u), Point3::from(along_v))
        } else {
            (Point3::from(along_v), Point3::from(along_u))
        };

        Face {
            ll,
            lr,
            ur,
            ul,
            block_type,
            block_side: BlockSide::from_axis(axis, positive),
        }
    }

    /// The unit outward normal.
    pub fn normal(&self) -> Vector3<i32> {
        self.block_side.normal()
    }

    /// Corners in winding order.
    pub fn corners(&self) -> [Point3<usize>; 4] {
        [self.ll, self.lr, self.ur, self.ul]
    }

    /// Number of unit voxel faces this quad covers.
    pub fn area(&self) -> usize {
        (0..3)
            .map(|axis| self.ur[axis] - self.ll[axis])
            .filter(|&extent| extent > 0)
            .product()
    }
}
