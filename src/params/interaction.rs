//! Pointer interaction zones around the visual column.

use glam::Vec2;

use crate::error::{EngineError, EngineResult};
use crate::layers::LayerId;

/// Ring `[min_dist_px, max_dist_px)` around the reference origin bound to a layer
#[derive(Debug, Clone)]
pub struct ZoneConfig {
    pub min_dist_px: f32,
    pub max_dist_px: f32,
    pub layer: LayerId,
}

/// Pointer routing configuration
#[derive(Debug, Clone)]
pub struct InteractionConfig {
    /// Screen-space centre the zones are measured from (pixels)
    pub origin_px: Vec2,

    /// Drag-to-rotation factor (radians per pixel)
    pub drag_sensitivity: f32,

    /// Zones ordered innermost first
    pub zones: Vec<ZoneConfig>,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self::for_viewport(1280.0, 720.0)
    }
}

impl InteractionConfig {
    /// Zones centred on the visual column (three quarters across, half down)
    pub fn for_viewport(width_px: f32, height_px: f32) -> Self {
        Self {
            origin_px: Vec2::new(width_px * 0.75, height_px * 0.5),
            drag_sensitivity: 0.01,
            zones: vec![
                ZoneConfig {
                    min_dist_px: 0.0,
                    max_dist_px: 100.0,
                    layer: LayerId::Goggles,
                },
                ZoneConfig {
                    min_dist_px: 100.0,
                    max_dist_px: 280.0,
                    layer: LayerId::Skeleton,
                },
                ZoneConfig {
                    min_dist_px: 280.0,
                    max_dist_px: 450.0,
                    layer: LayerId::StarCircle,
                },
            ],
        }
    }

    /// Zones must be non-empty rings, innermost first, and must not overlap
    pub fn validate(&self) -> EngineResult<()> {
        let mut previous_max = 0.0_f32;
        for zone in &self.zones {
            if zone.min_dist_px < 0.0 || zone.min_dist_px >= zone.max_dist_px {
                return Err(EngineError::config(format!(
                    "zone for {:?} has invalid bounds [{}, {})",
                    zone.layer, zone.min_dist_px, zone.max_dist_px
                )));
            }
            if zone.min_dist_px < previous_max {
                return Err(EngineError::config(format!(
                    "zone for {:?} overlaps the zone inside it",
                    zone.layer
                )));
            }
            previous_max = zone.max_dist_px;
        }
        if !(self.drag_sensitivity.is_finite() && self.drag_sensitivity > 0.0) {
            return Err(EngineError::config("drag sensitivity must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_zones_valid() {
        let config = InteractionConfig::default();
        config.validate().unwrap();
        assert_eq!(config.origin_px, Vec2::new(960.0, 360.0));
    }

    #[test]
    fn test_overlapping_zones_rejected() {
        let mut config = InteractionConfig::default();
        config.zones[1].min_dist_px = 50.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zones_out_of_order_rejected() {
        let mut config = InteractionConfig::default();
        config.zones.swap(0, 2);
        assert!(config.validate().is_err());
    }
}
