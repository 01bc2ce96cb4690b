//! Decoded audio clip with a play cursor feeding the FFT analyzer.

use std::path::Path;

use super::fft::FftAnalyzer;
use super::{AudioAnalyzer, Band, SpectrumFrame};
use crate::error::{EngineError, EngineResult};
use crate::params::AnalyzerConfig;

/// Mono clip analysed at its play position
///
/// The clip loops. While paused the cursor does not move and the last
/// snapshot is returned unchanged (frozen, not zeroed).
pub struct ClipAnalyzer {
    samples: Vec<f32>,
    sample_rate_hz: usize,
    cursor: usize,
    /// Fractional samples carried between ticks
    remainder: f64,
    playing: bool,
    /// Analysis window, rebuilt on every advance
    window: Vec<f32>,
    analyzer: FftAnalyzer,
}

impl ClipAnalyzer {
    /// Build from mono samples; the analyzer runs at the clip's sample rate
    pub fn from_samples(
        samples: Vec<f32>,
        sample_rate_hz: usize,
        config: AnalyzerConfig,
    ) -> EngineResult<Self> {
        let config = AnalyzerConfig {
            sample_rate_hz,
            ..config
        };
        let analyzer = FftAnalyzer::new(config)?;
        Ok(Self {
            samples,
            sample_rate_hz,
            cursor: 0,
            remainder: 0.0,
            playing: false,
            window: Vec::new(),
            analyzer,
        })
    }

    /// Decode a WAV file, downmixing all channels to mono
    pub fn from_wav(path: impl AsRef<Path>, config: AnalyzerConfig) -> EngineResult<Self> {
        let path = path.as_ref();
        let reader = hound::WavReader::open(path)
            .map_err(|e| EngineError::audio(format!("{}: {}", path.display(), e)))?;
        let format = reader.spec();
        let channels = format.channels.max(1) as usize;

        let interleaved: Vec<f32> = match format.sample_format {
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(|e| EngineError::audio(format!("{}: {}", path.display(), e)))?,
            hound::SampleFormat::Int => {
                let full_scale = (1_i64 << (format.bits_per_sample.saturating_sub(1))) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / full_scale))
                    .collect::<Result<_, _>>()
                    .map_err(|e| EngineError::audio(format!("{}: {}", path.display(), e)))?
            }
        };

        let mono = interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect::<Vec<_>>();

        log::info!(
            "audio: {} ({} Hz, {} ch, {:.1}s)",
            path.display(),
            format.sample_rate,
            format.channels,
            mono.len() as f32 / format.sample_rate.max(1) as f32
        );

        Self::from_samples(mono, format.sample_rate as usize, config)
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Play position (seconds)
    pub fn position_secs(&self) -> f32 {
        self.cursor as f32 / self.sample_rate_hz as f32
    }

    /// Move the cursor by `dt_secs` of playback and re-analyse
    pub fn advance(&mut self, dt_secs: f32) {
        if !self.playing || self.samples.is_empty() {
            return;
        }
        let exact = dt_secs.max(0.0) as f64 * self.sample_rate_hz as f64 + self.remainder;
        let step = exact.floor();
        self.remainder = exact - step;
        self.cursor = (self.cursor + step as usize) % self.samples.len();

        self.fill_window();
        self.analyzer.analyze(&self.window);
    }

    /// The `fft_size` samples ending at the cursor, wrapping to the clip's tail
    fn fill_window(&mut self) {
        let size = self.analyzer.config().fft_size();
        let len = self.samples.len();
        self.window.clear();

        if self.cursor >= size {
            self.window
                .extend_from_slice(&self.samples[self.cursor - size..self.cursor]);
        } else {
            let from_tail = (size - self.cursor).min(len - self.cursor);
            self.window.extend_from_slice(&self.samples[len - from_tail..]);
            self.window.extend_from_slice(&self.samples[..self.cursor]);
        }
    }
}

impl AudioAnalyzer for ClipAnalyzer {
    fn spectrum(&self) -> &SpectrumFrame {
        self.analyzer.spectrum()
    }

    fn band_energy(&self, band: Band) -> f32 {
        self.analyzer.band_energy(band)
    }
}
