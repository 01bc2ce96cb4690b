//! Flag point cloud: one-time extraction from an image and per-frame sizing.

use glam::Vec2;
use image::RgbaImage;

use crate::noise::NoiseField;
use crate::params::{FlagAppearance, PointCloudConfig};

/// One retained sample, relative to the image centre (layout units)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlagPoint {
    pub position: Vec2,
    pub color: [u8; 4],
    pub is_accent: bool,
}

/// Outcome of the channel-threshold predicates for one pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelClass {
    Base,
    Accent,
    Discard,
}

/// Classify an RGB triple; the base predicate wins when both match
pub fn classify(config: &PointCloudConfig, r: u8, g: u8, b: u8) -> PixelClass {
    let (r, g, b) = (r as i16, g as i16, b as i16);

    let base = &config.base;
    if b > r + base.over_red && b > g + base.over_green && b > base.min_blue as i16 {
        return PixelClass::Base;
    }

    let accent = &config.accent;
    if r > accent.min_red as i16 && r > g + accent.over_green && r > b + accent.over_blue {
        return PixelClass::Accent;
    }

    PixelClass::Discard
}

/// Samples an image on a fixed grid into a list of [`FlagPoint`]s
pub struct PointCloudExtractor {
    config: PointCloudConfig,
}

impl PointCloudExtractor {
    pub fn new(config: PointCloudConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PointCloudConfig {
        &self.config
    }

    /// Row-major scan at `grid_density` stride; an empty image yields no points
    pub fn extract(&self, image: &RgbaImage) -> Vec<FlagPoint> {
        let (width, height) = image.dimensions();
        let step = self.config.grid_density.max(1) as usize;
        let half = Vec2::new(width as f32 / 2.0, height as f32 / 2.0);

        let mut points = Vec::new();
        for y in (0..height).step_by(step) {
            for x in (0..width).step_by(step) {
                let [r, g, b, _] = image.get_pixel(x, y).0;
                let (color, is_accent) = match classify(&self.config, r, g, b) {
                    PixelClass::Base => ([r, g, b, self.config.base.alpha], false),
                    PixelClass::Accent => (self.config.accent.color, true),
                    PixelClass::Discard => continue,
                };
                let position = (Vec2::new(x as f32, y as f32) - half) * self.config.layout_scale;
                points.push(FlagPoint {
                    position,
                    color,
                    is_accent,
                });
            }
        }

        log::debug!(
            "extracted {} flag points from {}x{} image ({} accent)",
            points.len(),
            width,
            height,
            points.iter().filter(|p| p.is_accent).count()
        );
        points
    }
}

/// Display size per point for one frame
///
/// Noise in `[noise_low, noise_high]` maps linearly onto `[min_size, magnitude]`
/// (extrapolated outside that range), then clamps at zero.
pub fn point_sizes(
    points: &[FlagPoint],
    field: &dyn NoiseField,
    time: f32,
    magnitude: f32,
    appearance: &FlagAppearance,
) -> Vec<f32> {
    let span = appearance.noise_high - appearance.noise_low;
    points
        .iter()
        .map(|p| {
            let n = field.sample(
                p.position.x * appearance.noise_scale,
                p.position.y * appearance.noise_scale,
                time,
            );
            let t = if span == 0.0 {
                0.0
            } else {
                (n - appearance.noise_low) / span
            };
            let size = appearance.min_size + (magnitude - appearance.min_size) * t;
            if size.is_finite() {
                size.max(0.0)
            } else {
                0.0
            }
        })
        .collect()
}
