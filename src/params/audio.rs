//! Audio analysis configuration and spectrum-to-visual mappings.

use crate::error::{EngineError, EngineResult};

/// FFT analysis configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Audio sample rate (Hz)
    pub sample_rate_hz: usize,

    /// Number of spectrum bins reported per frame (FFT size is twice this)
    pub bins: usize,

    /// Per-bin smoothing between analyses (0 = none, close to 1 = sluggish)
    pub smoothing: f32,

    /// Magnitude mapped to byte 0 (decibels)
    pub min_db: f32,

    /// Magnitude mapped to byte 255 (decibels)
    pub max_db: f32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 44100,
            bins: 1024,
            smoothing: 0.8,
            min_db: -100.0,
            max_db: -30.0,
        }
    }
}

impl AnalyzerConfig {
    /// FFT window size (samples)
    pub fn fft_size(&self) -> usize {
        self.bins * 2
    }

    /// Nearest spectrum bin for a frequency (Hz), clamped to the last bin
    pub fn hz_to_bin(&self, hz: f32) -> usize {
        let nyquist = self.sample_rate_hz as f32 / 2.0;
        let bin = (hz / nyquist * self.bins as f32).round().max(0.0) as usize;
        bin.min(self.bins.saturating_sub(1))
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> EngineResult<()> {
        if !self.fft_size().is_power_of_two() {
            return Err(EngineError::config(format!(
                "FFT size must be power of 2, got {}",
                self.fft_size()
            )));
        }
        if self.sample_rate_hz == 0 {
            return Err(EngineError::config("sample rate must be > 0"));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(EngineError::config(format!(
                "analyzer smoothing must lie in [0, 1), got {}",
                self.smoothing
            )));
        }
        if self.min_db >= self.max_db {
            return Err(EngineError::config("min_db must be below max_db"));
        }
        Ok(())
    }
}

/// Star ring driven element-wise by the spectrum
#[derive(Debug, Clone)]
pub struct RingMapping {
    /// Number of stars (= spectrum samples per frame)
    pub star_count: usize,

    /// Fraction of the spectrum sampled; the top end is usually empty
    pub usable_fraction: f32,

    /// Gain applied to raw intensity before mapping (dimensionless)
    pub sensitivity: f32,

    /// Star depth scale at silence
    pub min_scale: f32,

    /// Star depth scale at full intensity
    pub max_scale: f32,

    /// Ring radius (world units)
    pub radius: f32,

    /// Uniform scale applied to every star
    pub base_scale: f32,
}

impl Default for RingMapping {
    fn default() -> Self {
        Self {
            star_count: 16,
            usable_fraction: 0.8,
            sensitivity: 0.75,
            min_scale: 0.8,
            max_scale: 3.3,
            radius: 300.0,
            base_scale: 0.5,
        }
    }
}

/// Band energy → smoothed scalar
#[derive(Debug, Clone)]
pub struct SmoothedMapping {
    /// Output at zero energy
    pub out_min: f32,

    /// Output at full energy (255)
    pub out_max: f32,

    /// Fraction of the remaining gap closed per tick, in [0.1, 0.2]
    pub smoothing: f32,

    /// Value before the first tick
    pub initial: f32,
}

/// Mapping from audio frequency bands to visual parameters
#[derive(Debug, Clone)]
pub struct AudioReactiveMapping {
    pub ring: RingMapping,

    /// Treble → global pulse multiplier
    pub pulse: SmoothedMapping,

    /// Bass → glass base alpha (0-255)
    pub base_alpha: SmoothedMapping,

    /// Point size at zero treble (upper bound of the noise mapping)
    pub flag_size_min: f32,

    /// Point size at full treble
    pub flag_size_max: f32,
}

impl Default for AudioReactiveMapping {
    fn default() -> Self {
        Self {
            ring: RingMapping::default(),
            pulse: SmoothedMapping {
                out_min: 1.0,
                out_max: 1.8,
                smoothing: 0.1,
                initial: 1.0,
            },
            base_alpha: SmoothedMapping {
                out_min: 0.0,
                out_max: 150.0,
                smoothing: 0.15,
                initial: 150.0,
            },
            flag_size_min: 2.0,
            flag_size_max: 18.0,
        }
    }
}

impl AudioReactiveMapping {
    pub fn validate(&self) -> EngineResult<()> {
        let ring = &self.ring;
        if !(ring.usable_fraction > 0.0 && ring.usable_fraction <= 1.0) {
            return Err(EngineError::config(format!(
                "usable fraction must lie in (0, 1], got {}",
                ring.usable_fraction
            )));
        }
        if ring.sensitivity < 0.0 {
            return Err(EngineError::config("ring sensitivity must be >= 0"));
        }
        if ring.min_scale > ring.max_scale {
            return Err(EngineError::config("ring min_scale exceeds max_scale"));
        }
        for (name, mapping) in [("pulse", &self.pulse), ("base alpha", &self.base_alpha)] {
            if !(0.1..=0.2).contains(&mapping.smoothing) {
                return Err(EngineError::config(format!(
                    "{} smoothing must lie in [0.1, 0.2], got {}",
                    name, mapping.smoothing
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyzer_hz_to_bin() {
        let config = AnalyzerConfig::default();

        // 1024 bins over 22050 Hz ≈ 21.5 Hz per bin
        assert_eq!(config.hz_to_bin(0.0), 0);
        assert_eq!(config.hz_to_bin(140.0), 7);
        assert_eq!(config.hz_to_bin(30_000.0), config.bins - 1);
    }

    #[test]
    fn test_analyzer_validation() {
        assert!(AnalyzerConfig::default().validate().is_ok());

        let config = AnalyzerConfig {
            bins: 1000,
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_smoothing_bounds_enforced() {
        assert!(AudioReactiveMapping::default().validate().is_ok());

        let mut mapping = AudioReactiveMapping::default();
        mapping.pulse.smoothing = 1.0;
        assert!(mapping.validate().is_err());

        // Inside (0, 1) but outside the jitter-free band
        let mut mapping = AudioReactiveMapping::default();
        mapping.base_alpha.smoothing = 0.5;
        assert!(mapping.validate().is_err());
        mapping.base_alpha.smoothing = 0.05;
        assert!(mapping.validate().is_err());

        mapping.base_alpha.smoothing = 0.2;
        mapping.pulse.smoothing = 0.1;
        assert!(mapping.validate().is_ok());
    }
}
