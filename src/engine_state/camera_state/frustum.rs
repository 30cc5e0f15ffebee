//! View-frustum culling of axis-aligned boxes.

use cgmath::{Matrix4, Point3, Vector4};

/// The six clipping planes of a view-projection matrix.
///
/// Each plane is stored as `(nx, ny, nz, d)` where `n · p + d >= 0` means the
/// point `p` is on the inner side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    planes: [Vector4<f32>; 6],
}

impl Frustum {
    /// Extracts the planes from an OpenGL-convention view-projection matrix
    /// (clip depth in [-1, 1]).
    pub fn from_matrix(view_proj: Matrix4<f32>) -> Self {
        let m: [[f32; 4]; 4] = view_proj.into();
        // cgmath is column major, so m[column][row]
        let row = |r: usize| Vector4::new(m[0][r], m[1][r], m[2][r], m[3][r]);
        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));

        Frustum {
            planes: [
                r3 + r0, // left
                r3 - r0, // right
                r3 + r1, // bottom
                r3 - r1, // top
                r3 + r2, // near
                r3 - r2, // far
            ],
        }
    }

    /// Whether the box `[min, max]` is at least partly inside the frustum.
    ///
    /// Conservative: a box near a frustum corner may be reported visible even
    /// though it lies just outside.
    pub fn intersects_aabb(&self, min: Point3<f32>, max: Point3<f32>) -> bool {
        self.planes.iter().all(|plane| {
            let x = if plane.x >= 0.0 { max.x } else { min.x };
            let y = if plane.y >= 0.0 { max.y } else { min.y };
            let z = if plane.z >= 0.0 { max.z } else { min.z };
            plane.x * x + plane.y * y + plane.z * z + plane.w >= 0.0
        })
    }
}
