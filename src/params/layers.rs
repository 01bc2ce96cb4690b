//! Per-layer rotation physics and the words that unlock each layer.

use crate::error::{EngineError, EngineResult};
use crate::layers::LayerId;

/// Rotation axes a layer responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinAxes {
    /// Yaw and pitch (auto-spin on yaw, drag on both)
    Free,

    /// Yaw only; vertical drag is ignored
    YawOnly,

    /// Never rotates
    Static,
}

/// Inertial rotation parameters for one layer
#[derive(Debug, Clone)]
pub struct LayerPhysics {
    /// Constant yaw added every tick while enabled and not grabbed (radians per tick)
    pub auto_speed_rad: f32,

    /// Velocity multiplier applied every free tick (dimensionless)
    /// 0.9 = fast stop, 0.99 = slow glide
    pub friction: f32,

    /// Axes driven by auto-spin and drag
    pub axes: SpinAxes,
}

impl LayerPhysics {
    /// Default physics for a given layer
    pub fn for_layer(id: LayerId) -> Self {
        let (auto_speed_rad, axes) = match id {
            LayerId::Goggles => (-0.005, SpinAxes::Free),
            LayerId::StarCircle => (0.003, SpinAxes::Free),
            LayerId::Skeleton => (-0.004, SpinAxes::YawOnly),
            LayerId::Flag => (0.0, SpinAxes::Static),
        };
        Self {
            auto_speed_rad,
            friction: 0.92,
            axes,
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        if !(0.9..=0.99).contains(&self.friction) {
            return Err(EngineError::config(format!(
                "friction must lie in [0.9, 0.99], got {}",
                self.friction
            )));
        }
        if !self.auto_speed_rad.is_finite() {
            return Err(EngineError::config("auto speed must be finite"));
        }
        Ok(())
    }
}

/// What happens to a keystroke that breaks a partially typed word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestartPolicy {
    /// Clear progress and consume the keystroke
    #[default]
    DropKeystroke,

    /// Clear progress, then test the same keystroke against the first character
    Retest,
}

/// Typing targets and their bound layers
#[derive(Debug, Clone)]
pub struct WordConfig {
    /// (word, layer) pairs in display order
    pub words: Vec<(String, LayerId)>,

    pub restart_policy: RestartPolicy,
}

impl Default for WordConfig {
    fn default() -> Self {
        Self {
            words: vec![
                ("LOVE SOSA".to_string(), LayerId::Goggles),
                ("O BLOCK".to_string(), LayerId::Skeleton),
                ("NEVER SOBER".to_string(), LayerId::StarCircle),
                ("CHIRAQ".to_string(), LayerId::Flag),
            ],
            restart_policy: RestartPolicy::default(),
        }
    }
}

impl WordConfig {
    pub fn validate(&self) -> EngineResult<()> {
        for (text, _) in &self.words {
            if text.is_empty() {
                return Err(EngineError::config("target words must not be empty"));
            }
            if text.chars().any(char::is_control) {
                return Err(EngineError::config(format!(
                    "target word {:?} contains a control character",
                    text
                )));
            }
        }
        Ok(())
    }
}

/// Face-instanced stars on the goggles mesh
#[derive(Debug, Clone)]
pub struct GogglesAppearance {
    /// Multiplier on each face's area (dimensionless)
    pub area_multiplier: f32,

    /// Manual star size factor (dimensionless)
    pub star_size: f32,
}

impl Default for GogglesAppearance {
    fn default() -> Self {
        Self {
            area_multiplier: 1.0,
            star_size: 0.4,
        }
    }
}

/// Translucent glass base under the skeleton
#[derive(Debug, Clone)]
pub struct SkeletonAppearance {
    /// Glass tint (RGB, 0-255); alpha comes from bass energy
    pub glass_rgb: [u8; 3],
}

impl Default for SkeletonAppearance {
    fn default() -> Self {
        Self {
            glass_rgb: [210, 0, 0],
        }
    }
}
