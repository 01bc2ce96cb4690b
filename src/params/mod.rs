//! Parameter definitions with units and documented semantics.
//!
//! All tuning constants live here:
//! - Units (radians per tick, pixels, 0-255 intensities)
//! - Documented ranges and meanings
//! - A `validate()` per group, checked once when the engine is built

mod audio;
mod interaction;
mod layers;
mod points;

use crate::error::EngineResult;
use crate::layers::LayerId;

// Re-export all types
pub use audio::{AnalyzerConfig, AudioReactiveMapping, RingMapping, SmoothedMapping};
pub use interaction::{InteractionConfig, ZoneConfig};
pub use layers::{
    GogglesAppearance, LayerPhysics, RestartPolicy, SkeletonAppearance, SpinAxes, WordConfig,
};
pub use points::{AccentRule, BaseRule, FlagAppearance, PointCloudConfig};

/// Complete engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Physics per layer, indexed by `LayerId::index`
    pub layers: [LayerPhysics; LayerId::COUNT],
    pub words: WordConfig,
    pub audio: AudioReactiveMapping,
    pub points: PointCloudConfig,
    pub flag: FlagAppearance,
    pub interaction: InteractionConfig,
    pub goggles: GogglesAppearance,
    pub skeleton: SkeletonAppearance,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layers: LayerId::ALL.map(LayerPhysics::for_layer),
            words: WordConfig::default(),
            audio: AudioReactiveMapping::default(),
            points: PointCloudConfig::default(),
            flag: FlagAppearance::default(),
            interaction: InteractionConfig::default(),
            goggles: GogglesAppearance::default(),
            skeleton: SkeletonAppearance::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> EngineResult<()> {
        for physics in &self.layers {
            physics.validate()?;
        }
        self.words.validate()?;
        self.audio.validate()?;
        self.points.validate()?;
        self.flag.validate()?;
        self.interaction.validate()?;
        Ok(())
    }
}
