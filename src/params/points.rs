//! Flag point-cloud extraction thresholds and render-time appearance.

use crate::error::{EngineError, EngineResult};

/// Predicate for base (blue) pixels: `b > r + over_red && b > g + over_green && b > min_blue`
#[derive(Debug, Clone)]
pub struct BaseRule {
    pub over_red: i16,
    pub over_green: i16,
    pub min_blue: u8,

    /// Alpha given to the sampled colour (0-255)
    pub alpha: u8,
}

/// Predicate for accent (red) pixels: `r > min_red && r > g + over_green && r > b + over_blue`
#[derive(Debug, Clone)]
pub struct AccentRule {
    pub min_red: u8,
    pub over_green: i16,
    pub over_blue: i16,

    /// Highlight colour used instead of the sampled one (RGBA)
    pub color: [u8; 4],
}

/// One-time extraction parameters
#[derive(Debug, Clone)]
pub struct PointCloudConfig {
    /// Sampling stride in both axes (pixels)
    pub grid_density: u32,

    /// Multiplier from centred pixel offsets to layout units
    pub layout_scale: f32,

    pub base: BaseRule,
    pub accent: AccentRule,
}

impl Default for PointCloudConfig {
    fn default() -> Self {
        Self {
            grid_density: 12,
            layout_scale: 1.5,
            base: BaseRule {
                over_red: 20,
                over_green: -30,
                min_blue: 80,
                alpha: 200,
            },
            accent: AccentRule {
                min_red: 150,
                over_green: 40,
                over_blue: 40,
                color: [255, 0, 0, 255],
            },
        }
    }
}

impl PointCloudConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if self.grid_density == 0 {
            return Err(EngineError::config("grid density must be > 0"));
        }
        if !(self.layout_scale.is_finite() && self.layout_scale > 0.0) {
            return Err(EngineError::config(format!(
                "layout scale must be positive, got {}",
                self.layout_scale
            )));
        }
        Ok(())
    }
}

/// Per-frame point sizing and layer placement
#[derive(Debug, Clone)]
pub struct FlagAppearance {
    /// Spatial frequency of the size noise (per layout unit)
    pub noise_scale: f32,

    /// Noise time advanced per frame
    pub time_step: f32,

    /// Noise value mapped to `min_size`
    pub noise_low: f32,

    /// Noise value mapped to the audio-driven magnitude
    pub noise_high: f32,

    /// Point size at `noise_low`
    pub min_size: f32,

    /// Global scale of the flag layer
    pub layer_scale: f32,

    /// Vertical offsets of the mirrored copies (world units)
    pub copy_offsets_y: [f32; 2],

    /// Perlin noise seed
    pub noise_seed: u32,
}

impl Default for FlagAppearance {
    fn default() -> Self {
        Self {
            noise_scale: 0.08,
            time_step: 0.05,
            noise_low: 0.2,
            noise_high: 0.8,
            min_size: 0.5,
            layer_scale: 0.4,
            copy_offsets_y: [-350.0, 350.0],
            noise_seed: 0,
        }
    }
}

impl FlagAppearance {
    pub fn validate(&self) -> EngineResult<()> {
        if self.noise_low >= self.noise_high {
            return Err(EngineError::config("noise_low must be below noise_high"));
        }
        Ok(())
    }
}
