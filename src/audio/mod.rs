//! Audio spectrum sources and the spectrum-to-parameter mapping.
//!
//! The engine pulls one snapshot per tick from an [`AudioAnalyzer`]; a stale
//! snapshot (nothing new played since the last tick) is not an error.

mod clip;
mod fft;
mod mapper;
mod smoothing;

// Re-export public types
pub use clip::ClipAnalyzer;
pub use fft::{hann_window, FftAnalyzer};
pub use mapper::{remap_clamped, sample_elements, AudioParams, SpectrumMapper};
pub use smoothing::SmoothedParam;

/// One spectrum snapshot: N intensities in [0, 255], low frequencies first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpectrumFrame {
    bins: Vec<u8>,
}

impl SpectrumFrame {
    pub fn new(bins: Vec<u8>) -> Self {
        Self { bins }
    }

    /// All-zero frame with `len` bins
    pub fn silent(len: usize) -> Self {
        Self { bins: vec![0; len] }
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Intensity at `index`; out-of-range reads as silence
    pub fn get(&self, index: usize) -> u8 {
        self.bins.get(index).copied().unwrap_or(0)
    }

    pub fn bins(&self) -> &[u8] {
        &self.bins
    }
}

/// Named frequency ranges for band-energy readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Bass,
    LowMid,
    Mid,
    HighMid,
    Treble,
}

impl Band {
    /// Frequency range (Hz)
    pub fn range_hz(self) -> (f32, f32) {
        match self {
            Band::Bass => (20.0, 140.0),
            Band::LowMid => (140.0, 400.0),
            Band::Mid => (400.0, 2600.0),
            Band::HighMid => (2600.0, 5200.0),
            Band::Treble => (5200.0, 14000.0),
        }
    }
}

/// Synchronous spectrum source, pulled once per tick
pub trait AudioAnalyzer {
    /// Latest spectrum snapshot
    fn spectrum(&self) -> &SpectrumFrame;

    /// Aggregate intensity over a band, in [0, 255]
    fn band_energy(&self, band: Band) -> f32;
}

/// Everything the mapper needs from one tick of audio
#[derive(Debug, Clone, Default)]
pub struct AudioSnapshot {
    pub spectrum: SpectrumFrame,
    pub bass: f32,
    pub treble: f32,
}

impl AudioSnapshot {
    /// Pull the current readings from an analyzer
    pub fn pull(analyzer: &dyn AudioAnalyzer) -> Self {
        Self {
            spectrum: analyzer.spectrum().clone(),
            bass: analyzer.band_energy(Band::Bass).clamp(0.0, 255.0),
            treble: analyzer.band_energy(Band::Treble).clamp(0.0, 255.0),
        }
    }
}

/// Fixed snapshot; silent by default
#[derive(Debug, Clone, Default)]
pub struct StaticAnalyzer {
    spectrum: SpectrumFrame,
    bass: f32,
    treble: f32,
}

impl StaticAnalyzer {
    pub fn new(spectrum: SpectrumFrame, bass: f32, treble: f32) -> Self {
        Self {
            spectrum,
            bass,
            treble,
        }
    }

    pub fn silent(bins: usize) -> Self {
        Self::new(SpectrumFrame::silent(bins), 0.0, 0.0)
    }
}

impl AudioAnalyzer for StaticAnalyzer {
    fn spectrum(&self) -> &SpectrumFrame {
        &self.spectrum
    }

    fn band_energy(&self, band: Band) -> f32 {
        match band {
            Band::Bass => self.bass,
            Band::Treble => self.treble,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spectrum_out_of_range_reads_silent() {
        let frame = SpectrumFrame::new(vec![10, 20, 30]);
        assert_eq!(frame.get(2), 30);
        assert_eq!(frame.get(3), 0);
        assert!(SpectrumFrame::default().is_empty());
    }

    #[test]
    fn test_band_ranges_ascending() {
        let bands = [Band::Bass, Band::LowMid, Band::Mid, Band::HighMid, Band::Treble];
        for pair in bands.windows(2) {
            assert_eq!(pair[0].range_hz().1, pair[1].range_hz().0);
        }
    }

    #[test]
    fn test_snapshot_clamps_band_energy() {
        let analyzer = StaticAnalyzer::new(SpectrumFrame::silent(4), 300.0, -5.0);
        let snapshot = AudioSnapshot::pull(&analyzer);
        assert_eq!(snapshot.bass, 255.0);
        assert_eq!(snapshot.treble, 0.0);
        assert_eq!(snapshot.spectrum.len(), 4);
    }
}
