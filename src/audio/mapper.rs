//! Spectrum and band energies → bounded, smoothed animation parameters.

use super::smoothing::SmoothedParam;
use super::{AudioSnapshot, SpectrumFrame};
use crate::params::AudioReactiveMapping;

/// Full-scale intensity of a spectrum bin or band reading
const FULL_SCALE: f32 = 255.0;

/// Linear map from `[in_lo, in_hi]` to `[out_lo, out_hi]`, clamped to the output bounds
pub fn remap_clamped(value: f32, in_lo: f32, in_hi: f32, out_lo: f32, out_hi: f32) -> f32 {
    if in_hi == in_lo || !value.is_finite() {
        return out_lo;
    }
    let t = ((value - in_lo) / (in_hi - in_lo)).clamp(0.0, 1.0);
    out_lo + (out_hi - out_lo) * t
}

/// Raw intensities for `count` elements spread over the usable part of the spectrum
///
/// Element `i` reads bin `i * floor(N * usable_fraction / count)`, no interpolation.
pub fn sample_elements(spectrum: &SpectrumFrame, count: usize, usable_fraction: f32) -> Vec<u8> {
    if count == 0 {
        return Vec::new();
    }
    let stride = (spectrum.len() as f32 * usable_fraction / count as f32).floor() as usize;
    (0..count).map(|i| spectrum.get(i * stride)).collect()
}

/// Parameters produced for one tick
#[derive(Debug, Clone, Default)]
pub struct AudioParams {
    /// Depth scale per ring star
    pub ring_scales: Vec<f32>,

    /// Smoothed global pulse multiplier
    pub pulse: f32,

    /// Smoothed glass base alpha (0-255)
    pub base_alpha: f32,

    /// Upper bound for noise-modulated point sizes
    pub flag_magnitude: f32,
}

/// Converts audio snapshots into animation parameters
pub struct SpectrumMapper {
    mapping: AudioReactiveMapping,
    pulse: SmoothedParam,
    base_alpha: SmoothedParam,
}

impl SpectrumMapper {
    pub fn new(mapping: AudioReactiveMapping) -> Self {
        let pulse = SmoothedParam::new(mapping.pulse.initial, mapping.pulse.smoothing);
        let base_alpha =
            SmoothedParam::new(mapping.base_alpha.initial, mapping.base_alpha.smoothing);
        Self {
            mapping,
            pulse,
            base_alpha,
        }
    }

    pub fn mapping(&self) -> &AudioReactiveMapping {
        &self.mapping
    }

    /// Per-star depth scales, monotonic in raw intensity
    pub fn ring_scales(&self, spectrum: &SpectrumFrame) -> Vec<f32> {
        let ring = &self.mapping.ring;
        sample_elements(spectrum, ring.star_count, ring.usable_fraction)
            .into_iter()
            .map(|raw| {
                remap_clamped(
                    raw as f32 * ring.sensitivity,
                    0.0,
                    FULL_SCALE,
                    ring.min_scale,
                    ring.max_scale,
                )
            })
            .collect()
    }

    /// Advance smoothing by one tick and map the snapshot
    pub fn update(&mut self, snapshot: &AudioSnapshot) -> AudioParams {
        let pulse = &self.mapping.pulse;
        self.pulse.set_target(remap_clamped(
            snapshot.treble,
            0.0,
            FULL_SCALE,
            pulse.out_min,
            pulse.out_max,
        ));

        let alpha = &self.mapping.base_alpha;
        self.base_alpha.set_target(remap_clamped(
            snapshot.bass,
            0.0,
            FULL_SCALE,
            alpha.out_min,
            alpha.out_max,
        ));

        AudioParams {
            ring_scales: self.ring_scales(&snapshot.spectrum),
            pulse: self.pulse.update(),
            base_alpha: self.base_alpha.update(),
            flag_magnitude: remap_clamped(
                snapshot.treble,
                0.0,
                FULL_SCALE,
                self.mapping.flag_size_min,
                self.mapping.flag_size_max,
            ),
        }
    }

    pub fn pulse(&self) -> f32 {
        self.pulse.current()
    }

    pub fn base_alpha(&self) -> f32 {
        self.base_alpha.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(bins: Vec<u8>, bass: f32, treble: f32) -> AudioSnapshot {
        AudioSnapshot {
            spectrum: SpectrumFrame::new(bins),
            bass,
            treble,
        }
    }

    #[test]
    fn test_remap_clamps_to_bounds() {
        assert_eq!(remap_clamped(-10.0, 0.0, 255.0, 0.8, 3.3), 0.8);
        assert_eq!(remap_clamped(400.0, 0.0, 255.0, 0.8, 3.3), 3.3);
        assert!((remap_clamped(127.5, 0.0, 255.0, 1.0, 1.8) - 1.4).abs() < 1e-6);
    }

    #[test]
    fn test_stride_uses_usable_fraction() {
        // N = 1024, f = 0.8, M = 16 → stride 51
        let bins: Vec<u8> = (0..1024).map(|i| (i % 256) as u8).collect();
        let frame = SpectrumFrame::new(bins.clone());
        let raw = sample_elements(&frame, 16, 0.8);

        assert_eq!(raw.len(), 16);
        for (i, value) in raw.iter().enumerate() {
            assert_eq!(*value, bins[i * 51]);
        }
    }

    #[test]
    fn test_empty_spectrum_maps_to_minimum() {
        let mapper = SpectrumMapper::new(AudioReactiveMapping::default());
        let scales = mapper.ring_scales(&SpectrumFrame::default());
        let min = mapper.mapping().ring.min_scale;

        assert_eq!(scales.len(), mapper.mapping().ring.star_count);
        assert!(scales.iter().all(|s| *s == min));
    }

    #[test]
    fn test_ring_scale_monotonic_in_intensity() {
        let mapper = SpectrumMapper::new(AudioReactiveMapping::default());
        let mut previous = f32::MIN;
        for raw in 0..=255u8 {
            let scales = mapper.ring_scales(&SpectrumFrame::new(vec![raw; 1024]));
            assert!(scales[0] >= previous);
            previous = scales[0];
        }
    }

    #[test]
    fn test_pulse_and_alpha_smooth_toward_targets() {
        let mut mapper = SpectrumMapper::new(AudioReactiveMapping::default());
        let loud = snapshot(vec![255; 1024], 0.0, 255.0);

        let first = mapper.update(&loud);
        // One step of 0.1 toward 1.8 from 1.0
        assert!((first.pulse - 1.08).abs() < 1e-5);
        // One step of 0.15 toward 0 from 150
        assert!((first.base_alpha - 127.5).abs() < 1e-4);
        assert_eq!(first.flag_magnitude, 18.0);

        for _ in 0..200 {
            mapper.update(&loud);
        }
        assert!((mapper.pulse() - 1.8).abs() < 1e-3);
        assert!(mapper.base_alpha() < 1e-3);
    }

    #[test]
    fn test_stale_snapshot_is_stable() {
        let mut mapper = SpectrumMapper::new(AudioReactiveMapping::default());
        let quiet = snapshot(vec![40; 1024], 60.0, 10.0);
        let a = mapper.update(&quiet);
        let b = mapper.update(&quiet);
        assert_eq!(a.ring_scales, b.ring_scales);
        assert_eq!(a.flag_magnitude, b.flag_magnitude);
    }
}
