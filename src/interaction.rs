//! Pointer routing between manual layer control and the free camera.

use glam::Vec2;

use crate::layers::{LayerId, LayerSet};
use crate::params::InteractionConfig;

/// Who receives pointer drags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Drags orbit the shared camera (owned by the renderer)
    #[default]
    Camera,

    /// Drags rotate the held layer; its free motion is suspended
    Manual(LayerId),
}

/// Distance ring `[min_dist, max_dist)` bound to a layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionZone {
    pub min_dist: f32,
    pub max_dist: f32,
    pub layer: LayerId,
}

impl InteractionZone {
    /// Inclusive lower bound, exclusive upper bound
    pub fn contains(&self, distance: f32) -> bool {
        distance >= self.min_dist && distance < self.max_dist
    }
}

/// Pointer state machine
pub struct InteractionZoneRouter {
    origin: Vec2,
    sensitivity: f32,
    zones: Vec<InteractionZone>,
    mode: InteractionMode,
    last_pointer: Option<Vec2>,
}

impl InteractionZoneRouter {
    pub fn new(config: &InteractionConfig) -> Self {
        let zones = config
            .zones
            .iter()
            .map(|z| InteractionZone {
                min_dist: z.min_dist_px,
                max_dist: z.max_dist_px,
                layer: z.layer,
            })
            .collect();
        Self {
            origin: config.origin_px,
            sensitivity: config.drag_sensitivity,
            zones,
            mode: InteractionMode::Camera,
            last_pointer: None,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn zones(&self) -> &[InteractionZone] {
        &self.zones
    }

    /// Layer whose zone holds `pos`, if that layer can currently be grabbed
    pub fn hit_test(&self, pos: Vec2, layers: &LayerSet) -> Option<LayerId> {
        let distance = pos.distance(self.origin);
        self.zones
            .iter()
            .find(|zone| {
                zone.contains(distance)
                    && layers.is_enabled(zone.layer)
                    && layers.get(zone.layer).is_interactive()
            })
            .map(|zone| zone.layer)
    }

    pub fn pointer_down(&mut self, pos: Vec2, layers: &mut LayerSet) {
        self.last_pointer = Some(pos);
        let mode = match self.hit_test(pos, layers) {
            Some(id) => {
                layers.get_mut(id).grab();
                InteractionMode::Manual(id)
            }
            None => InteractionMode::Camera,
        };
        self.set_mode(mode);
    }

    /// Route a drag; returns the camera orbit delta (pixels) in camera mode
    pub fn pointer_drag(&mut self, pos: Vec2, layers: &mut LayerSet) -> Option<Vec2> {
        let delta = pos - self.last_pointer.unwrap_or(pos);
        self.last_pointer = Some(pos);

        match self.mode {
            InteractionMode::Manual(id) => {
                layers.get_mut(id).drag(delta * self.sensitivity);
                None
            }
            InteractionMode::Camera => Some(delta),
        }
    }

    /// Release always returns to camera mode
    pub fn pointer_up(&mut self) {
        self.last_pointer = None;
        self.set_mode(InteractionMode::Camera);
    }

    fn set_mode(&mut self, mode: InteractionMode) {
        if mode != self.mode {
            log::debug!("interaction: {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }
}
