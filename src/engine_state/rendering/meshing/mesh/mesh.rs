//! Mesh data structures and operations for voxel rendering.
//!
//! This module turns the faces produced by the greedy mesher into the flat
//! buffers handed to the render sink: world-space positions, shaded colours and
//! triangle indices.

use crate::engine_state::{
    rendering::Vertex,
    voxels::{block::color_of, chunk::Chunk, coords::ChunkCoord},
};

use super::{face::Face, greedy};

/// Vertices emitted per face.
pub const VERTICES_PER_FACE: usize = 4;
/// Indices emitted per face (two triangles).
pub const INDICES_PER_FACE: usize = 6;

/// The renderable surface of one chunk.
///
/// Positions are in world space. Every quad contributes four vertices and the
/// indices `0, 1, 2, 0, 2, 3` offset by its first vertex, so both triangles keep
/// the counter-clockwise winding of the face.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkMesh {
    /// The chunk this mesh was built from
    pub position: ChunkCoord,
    /// World-space vertex positions
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex colours, block colour times face brightness
    pub colors: Vec<[f32; 3]>,
    /// Triangle indices into `positions`
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    /// Meshes `chunk` with the greedy mesher.
    ///
    /// # Returns
    /// `None` when the chunk has no visible surface.
    pub fn build(chunk: &Chunk) -> Option<Self> {
        let faces = greedy::build_faces(chunk);
        Self::from_faces(chunk.position, &faces)
    }

    /// Flattens faces given in chunk-local coordinates into world-space buffers.
    ///
    /// # Arguments
    /// * `position` - The chunk the faces belong to
    /// * `faces` - Faces in chunk-local coordinates
    ///
    /// # Returns
    /// `None` if `faces` is empty.
    pub fn from_faces(position: ChunkCoord, faces: &[Face]) -> Option<Self> {
        if faces.is_empty() {
            return None;
        }

        let origin = position.world_origin();
        let mut mesh = ChunkMesh {
            position,
            positions: Vec::with_capacity(faces.len() * VERTICES_PER_FACE),
            colors: Vec::with_capacity(faces.len() * VERTICES_PER_FACE),
            indices: Vec::with_capacity(faces.len() * INDICES_PER_FACE),
        };

        for face in faces {
            let brightness = face.block_side.brightness();
            let color = color_of(face.block_type).map(|channel| channel * brightness);

            let first = mesh.positions.len() as u32;
            for corner in face.corners() {
                mesh.positions.push([
                    (origin.x + corner.x as i32) as f32,
                    corner.y as f32,
                    (origin.z + corner.z as i32) as f32,
                ]);
                mesh.colors.push(color);
            }
            mesh.indices.extend(Self::generate_face_indices(first));
        }

        Some(mesh)
    }

    /// Indices for the quad whose first vertex is `first`.
    pub fn generate_face_indices(first: u32) -> [u32; INDICES_PER_FACE] {
        [first, first + 1, first + 2, first, first + 2, first + 3]
    }

    /// Number of quads in the mesh.
    pub fn quad_count(&self) -> usize {
        self.positions.len() / VERTICES_PER_FACE
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves positions and colours into GPU vertices.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(&self.colors)
            .map(|(position, color)| Vertex::new(*position, *color))
            .collect()
    }

    /// The interleaved vertex buffer as raw bytes.
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.vertices()).to_vec()
    }

    /// The index buffer as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
