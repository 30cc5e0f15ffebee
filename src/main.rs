//! # Voxel World Entry Point
//!
//! Runs the headless world simulation natively. Settings are read from
//! `voxel_world.json` in the working directory when present.
//!
//! For web builds, see the `run_web()` function in the library.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

fn main() {
    #[cfg(not(target_family = "wasm"))]
    voxel_world::run();
}
