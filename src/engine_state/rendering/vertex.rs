//! Vertex data structures for voxel rendering.
//!
//! This module defines the interleaved vertex format chunk meshes are uploaded in.

/// A vertex in the voxel rendering pipeline.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Color: [f32; 3] (12 bytes)
///
/// Total size: 24 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in world space
    pub position: [f32; 3],
    /// Linear RGB colour, already shaded
    pub color: [f32; 3],
}

impl Vertex {
    /// Byte offset of `color` within a vertex.
    pub const COLOR_OFFSET: usize = std::mem::size_of::<[f32; 3]>();

    /// Creates a new vertex.
    pub fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Vertex { position, color }
    }
}
