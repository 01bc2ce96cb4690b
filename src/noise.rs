//! Continuous noise fields used to modulate point sizes.
//!
//! Fields are pure functions of `(x, y, t)` returning values in `[0, 1]`, so a
//! fixed implementation can be swapped in for tests.

use ::noise::{NoiseFn, Perlin};

/// Deterministic scalar field over 2D space and time
pub trait NoiseField {
    /// Sample the field; result lies in [0, 1]
    fn sample(&self, x: f32, y: f32, t: f32) -> f32;
}

/// Seeded 3D Perlin noise remapped from [-1, 1] to [0, 1]
pub struct PerlinField {
    perlin: Perlin,
}

impl PerlinField {
    /// Create new noise field with seed
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }
}

impl NoiseField for PerlinField {
    fn sample(&self, x: f32, y: f32, t: f32) -> f32 {
        let v = self.perlin.get([x as f64, y as f64, t as f64]) as f32;
        (v * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}

/// Field returning the same value everywhere
#[derive(Debug, Clone, Copy)]
pub struct ConstantField(pub f32);

impl NoiseField for ConstantField {
    fn sample(&self, _x: f32, _y: f32, _t: f32) -> f32 {
        self.0.clamp(0.0, 1.0)
    }
}
