//! Seeded 2D gradient noise used to shape the terrain height field.

use noise::{NoiseFn, Perlin};

/// A seeded, stateless 2D gradient-noise function.
///
/// Backed by improved Perlin noise: a 256 entry permutation table derived from
/// the seed, quintic fade of the fractional coordinates and interpolation of
/// the four surrounding corner gradients. Samples are a pure function of
/// (seed, x, z) and are clamped to `[-1, 1]`.
#[derive(Clone, Copy, Debug)]
pub struct NoiseField {
    perlin: Perlin,
    seed: u32,
}

impl NoiseField {
    /// Builds the permutation table for `seed`.
    pub fn new(seed: u32) -> Self {
        NoiseField {
            perlin: Perlin::new(seed),
            seed,
        }
    }

    /// The seed this field was built from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Samples the noise at (`x`, `z`). The result is in `[-1, 1]`.
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        self.perlin.get([x, z]).clamp(-1.0, 1.0)
    }
}
