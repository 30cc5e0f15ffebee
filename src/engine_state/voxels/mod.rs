//! # Voxel World
//!
//! Block storage, terrain generation and the chunk store.
//!
//! ## Architecture
//!
//! * **Block**: block types and the six face directions
//! * **Chunk**: fixed-size columns of blocks with a solidity bitset and a cached mesh
//! * **Coords**: chunk coordinates and world to chunk-local conversion
//! * **Noise Field / Terrain**: seeded height fields, rock and tree placement
//! * **World**: the sparse chunk store answering block reads and writes
//! * **Loader**: row-by-row generation of the initial region
//!
//! ## Data Flow
//!
//! 1. The world receives a block read or write in world coordinates
//! 2. It delegates to the owning chunk, generating it on writes if necessary
//! 3. Writes mark the owning chunk (and bordering neighbours) for remeshing
//! 4. The mesh manager rebuilds dirty visible chunks and hands them to the renderer

pub mod block;
pub mod chunk;
pub mod coords;
pub mod loader;
pub mod noise_field;
pub mod terrain;
pub mod world;
