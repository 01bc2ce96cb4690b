//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::params::{EngineConfig, InteractionConfig, RestartPolicy};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "lovesosa")]
#[command(about = "Headless audio-reactive visual state engine", long_about = None)]
pub struct Args {
    /// WAV file driving the spectrum (silence if omitted)
    #[arg(long, value_name = "WAV")]
    pub audio: Option<PathBuf>,

    /// Image sampled into the flag point cloud
    #[arg(long, value_name = "IMAGE")]
    pub flag: Option<PathBuf>,

    /// OBJ mesh carrying the goggle stars
    #[arg(long, value_name = "OBJ")]
    pub goggles: Option<PathBuf>,

    /// Text typed one character per tick from the first frame
    #[arg(long = "type", value_name = "TEXT", default_value = "")]
    pub typed: String,

    /// Number of ticks to run
    #[arg(long, default_value_t = 600)]
    pub ticks: u64,

    /// Ticks per second of simulated time
    #[arg(long, default_value_t = 60.0)]
    pub fps: f32,

    /// Viewport width used to place interaction zones (pixels)
    #[arg(long, default_value_t = 1280.0)]
    pub width: f32,

    /// Viewport height used to place interaction zones (pixels)
    #[arg(long, default_value_t = 720.0)]
    pub height: f32,

    /// Mismatched keystroke handling: drop (default), retest
    #[arg(long, value_name = "POLICY", default_value = "drop")]
    pub restart_policy: String,
}

impl Args {
    /// Parse restart policy from command-line arguments
    pub fn parse_restart_policy(&self) -> RestartPolicy {
        match self.restart_policy.to_lowercase().as_str() {
            "drop" => RestartPolicy::DropKeystroke,
            "retest" => RestartPolicy::Retest,
            other => {
                log::warn!("unknown restart policy '{}', using drop", other);
                RestartPolicy::DropKeystroke
            }
        }
    }

    /// Default engine configuration with command-line overrides applied
    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default();
        config.words.restart_policy = self.parse_restart_policy();
        config.interaction = InteractionConfig::for_viewport(self.width, self.height);
        config
    }
}
