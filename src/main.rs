//! Lovesosa - headless driver for the audio-reactive visual engine
//!
//! Feeds scripted keystrokes and an optional WAV clip through the engine at a
//! fixed tick rate and logs what a renderer would receive.

use anyhow::{Context, Result};
use clap::Parser;

use lovesosa::assets::SceneAssets;
use lovesosa::audio::{AudioAnalyzer, ClipAnalyzer, StaticAnalyzer};
use lovesosa::cli::Args;
use lovesosa::compositor::{FrameState, InputEvent, VisualCompositor};
use lovesosa::params::AnalyzerConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = run() {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    anyhow::ensure!(args.fps > 0.0, "--fps must be positive, got {}", args.fps);

    let assets = SceneAssets::load(args.flag.as_deref(), args.goggles.as_deref());
    let mut compositor =
        VisualCompositor::new(args.engine_config(), assets).context("building engine")?;

    let mut clip = match &args.audio {
        Some(path) => {
            let clip = ClipAnalyzer::from_wav(path, AnalyzerConfig::default())
                .with_context(|| format!("loading {}", path.display()))?;
            Some(clip)
        }
        None => None,
    };
    let silence = StaticAnalyzer::silent(AnalyzerConfig::default().bins);

    let dt = 1.0 / args.fps;
    let summary_every = (args.fps.round() as u64).max(1);
    let mut keystrokes = args.typed.chars();

    log::info!("running {} ticks at {} fps", args.ticks, args.fps);

    for _ in 0..args.ticks {
        if let Some(ch) = keystrokes.next() {
            compositor.push_event(InputEvent::Char(ch));
        }

        let audio: &dyn AudioAnalyzer = match clip.as_mut() {
            Some(clip) => {
                clip.advance(dt);
                &*clip
            }
            None => &silence,
        };

        let frame = compositor.tick(audio);

        // The song starts with the first keystroke or pointer press
        if frame.first_input {
            if let Some(clip) = clip.as_mut() {
                clip.play();
                log::info!("audio started on frame {}", frame.frame);
            }
        }
        if frame.frame % summary_every == 0 {
            log_summary(&frame);
        }
    }

    let unlocked: Vec<&str> = compositor
        .layers()
        .iter()
        .filter(|l| l.is_enabled())
        .map(|l| l.id().name())
        .collect();
    log::info!("done: unlocked [{}]", unlocked.join(", "));
    Ok(())
}

fn log_summary(frame: &FrameState) {
    let layers: Vec<String> = frame
        .layers
        .iter()
        .filter(|l| l.enabled)
        .map(|l| {
            format!(
                "{}(pitch {:.2}, yaw {:.2})",
                l.id.name(),
                l.rotation.x,
                l.rotation.y
            )
        })
        .collect();

    log::info!(
        "frame {}: pulse {:.3}, alpha {:.1}, stars {}+{}, points {}, layers [{}]",
        frame.frame,
        frame.pulse,
        frame.base_alpha,
        frame.goggle_stars.len(),
        frame.ring_stars.len(),
        frame.flag_points.len(),
        layers.join(", ")
    );
}
