//! FFT analysis producing byte spectra and band energies.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

use super::{AudioAnalyzer, Band, SpectrumFrame};
use crate::error::EngineResult;
use crate::params::AnalyzerConfig;

/// Windowed FFT analyzer with per-bin temporal smoothing
///
/// Each analysis takes the most recent `fft_size` samples, converts bin
/// magnitudes to decibels and maps `[min_db, max_db]` onto `[0, 255]`.
pub struct FftAnalyzer {
    config: AnalyzerConfig,
    fft: Arc<dyn Fft<f32>>,
    buffer: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    frame: SpectrumFrame,
}

impl FftAnalyzer {
    pub fn new(config: AnalyzerConfig) -> EngineResult<Self> {
        config.validate()?;

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(config.fft_size());
        let buffer = vec![Complex::new(0.0, 0.0); config.fft_size()];
        let smoothed = vec![0.0; config.bins];
        let frame = SpectrumFrame::silent(config.bins);

        Ok(Self {
            config,
            fft,
            buffer,
            smoothed,
            frame,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze the tail of `samples`; shorter input is zero-padded at the front
    pub fn analyze(&mut self, samples: &[f32]) {
        let size = self.config.fft_size();
        let tail = &samples[samples.len().saturating_sub(size)..];
        let pad = size - tail.len();

        // Apply Hann window
        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = if i < pad { 0.0 } else { tail[i - pad] };
            *slot = Complex::new(sample * hann_window(i, size), 0.0);
        }

        self.fft.process(&mut self.buffer);

        let tau = self.config.smoothing;
        let range_db = self.config.max_db - self.config.min_db;
        let mut bins = Vec::with_capacity(self.config.bins);
        for (bin, smoothed) in self.smoothed.iter_mut().enumerate() {
            let magnitude = self.buffer[bin].norm() / size as f32;
            *smoothed = tau * *smoothed + (1.0 - tau) * magnitude;

            let db = 20.0 * smoothed.log10();
            let scaled = 255.0 * (db - self.config.min_db) / range_db;
            // log10(0) is -inf, which the clamp turns into 0
            bins.push(if scaled.is_nan() { 0 } else { scaled.clamp(0.0, 255.0) as u8 });
        }
        self.frame = SpectrumFrame::new(bins);
    }
}

impl AudioAnalyzer for FftAnalyzer {
    fn spectrum(&self) -> &SpectrumFrame {
        &self.frame
    }

    /// Mean intensity across the bins covering the band
    fn band_energy(&self, band: Band) -> f32 {
        if self.frame.is_empty() {
            return 0.0;
        }
        let (low_hz, high_hz) = band.range_hz();
        let low = self.config.hz_to_bin(low_hz);
        let high = self.config.hz_to_bin(high_hz).max(low);

        let bins = &self.frame.bins()[low..=high];
        bins.iter().map(|&b| b as f32).sum::<f32>() / bins.len() as f32
    }
}

/// Hann window function for FFT analysis
pub fn hann_window(index: usize, size: usize) -> f32 {
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}
