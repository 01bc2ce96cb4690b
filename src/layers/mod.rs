//! Unlockable visual layers and their rotation state.

mod rotator;

use glam::Vec2;

use crate::params::{LayerPhysics, SpinAxes};

/// Independently unlockable visual element group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerId {
    /// Face-instanced stars on the goggles mesh
    Goggles,

    /// Spectrum-driven ring of stars
    StarCircle,

    /// Skeleton on a translucent glass base
    Skeleton,

    /// Noise-sized point cloud sampled from the flag image
    Flag,
}

impl LayerId {
    pub const COUNT: usize = 4;

    pub const ALL: [LayerId; Self::COUNT] = [
        LayerId::Goggles,
        LayerId::StarCircle,
        LayerId::Skeleton,
        LayerId::Flag,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            LayerId::Goggles => "goggles",
            LayerId::StarCircle => "star-circle",
            LayerId::Skeleton => "skeleton",
            LayerId::Flag => "flag",
        }
    }
}

/// Rotation state of one layer
///
/// `rotation.x` is pitch and `rotation.y` is yaw (radians, unbounded).
/// `velocity` uses the same axes in radians per tick.
#[derive(Debug, Clone)]
pub struct LayerState {
    id: LayerId,
    enabled: bool,
    rotation: Vec2,
    velocity: Vec2,
    /// Drag applied since the current tick began
    tick_spin: Vec2,
    physics: LayerPhysics,
}

impl LayerState {
    pub fn new(id: LayerId, physics: LayerPhysics) -> Self {
        Self {
            id,
            enabled: false,
            rotation: Vec2::ZERO,
            velocity: Vec2::ZERO,
            tick_spin: Vec2::ZERO,
            physics,
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Unlock the layer; there is no way back
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn physics(&self) -> &LayerPhysics {
        &self.physics
    }

    /// Whether pointer zones can grab this layer
    pub fn is_interactive(&self) -> bool {
        self.physics.axes != SpinAxes::Static
    }
}

/// Enum-indexed set holding every layer
#[derive(Debug, Clone)]
pub struct LayerSet {
    layers: [LayerState; LayerId::COUNT],
}

impl LayerSet {
    pub fn new(physics: &[LayerPhysics; LayerId::COUNT]) -> Self {
        Self {
            layers: LayerId::ALL.map(|id| LayerState::new(id, physics[id.index()].clone())),
        }
    }

    pub fn get(&self, id: LayerId) -> &LayerState {
        &self.layers[id.index()]
    }

    pub fn get_mut(&mut self, id: LayerId) -> &mut LayerState {
        &mut self.layers[id.index()]
    }

    pub fn is_enabled(&self, id: LayerId) -> bool {
        self.get(id).enabled
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayerState> {
        self.layers.iter()
    }

    pub fn enabled_count(&self) -> usize {
        self.layers.iter().filter(|l| l.enabled).count()
    }
}

impl Default for LayerSet {
    fn default() -> Self {
        Self::new(&LayerId::ALL.map(LayerPhysics::for_layer))
    }
}
