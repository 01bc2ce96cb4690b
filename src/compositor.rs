//! Per-tick orchestration: input → physics → audio → frame state.
//!
//! The compositor owns every piece of mutable engine state and performs no
//! rendering. Each [`VisualCompositor::tick`] applies queued input, advances
//! layer physics, maps one audio snapshot and returns a [`FrameState`] for an
//! external renderer.

use std::collections::VecDeque;
use std::f32::consts::{FRAC_PI_2, TAU};

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use crate::assets::SceneAssets;
use crate::audio::{AudioAnalyzer, AudioSnapshot, SpectrumMapper};
use crate::error::EngineResult;
use crate::interaction::{InteractionMode, InteractionZoneRouter};
use crate::layers::{LayerId, LayerSet};
use crate::mesh::FaceInstance;
use crate::noise::{NoiseField, PerlinField};
use crate::params::EngineConfig;
use crate::points::{point_sizes, FlagPoint, PointCloudExtractor};
use crate::words::WordProgressTracker;

/// Input delivered between ticks (screen pixels for pointer events)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Char(char),
    PointerDown(Vec2),
    PointerDrag(Vec2),
    PointerUp(Vec2),
}

/// Audio-driven scaling for one layer
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleParams {
    Goggles { pulse: f32 },
    StarCircle { star_scales: Vec<f32> },
    Skeleton { base_alpha: f32, glass_rgb: [u8; 3] },
    Flag {
        magnitude: f32,
        /// Global scale the renderer applies to the whole layer
        layer_scale: f32,
        /// Vertical offsets of the two drawn copies (world units)
        copy_offsets_y: [f32; 2],
    },
}

/// Draw descriptor for one layer
#[derive(Debug, Clone, PartialEq)]
pub struct LayerDraw {
    pub id: LayerId,
    pub enabled: bool,

    /// Pitch (x) and yaw (y), radians
    pub rotation: Vec2,
    pub scale: ScaleParams,
}

/// Star placed on a goggles face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarInstance {
    pub position: Vec3,
    pub scale: f32,
}

/// Star on the spectrum ring (ring lies in the XZ plane)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingStar {
    /// Angle around the ring (radians)
    pub theta: f32,
    pub position: Vec3,

    /// Yaw that turns the star to face outward (radians)
    pub facing_yaw: f32,
    pub scale: f32,
}

/// Flag point ready for upload as a vertex/instance buffer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    pub position: [f32; 2],
    pub size: f32,
    /// RGBA in [0, 1]
    pub color: [f32; 4],
}

impl PointInstance {
    fn new(point: &FlagPoint, size: f32) -> Self {
        Self {
            position: point.position.to_array(),
            size,
            color: point.color.map(|c| c as f32 / 255.0),
        }
    }
}

/// Typing progress of one target word, for the on-screen word list
#[derive(Debug, Clone, PartialEq)]
pub struct WordProgress {
    pub text: String,
    pub typed_len: usize,
    pub completed: bool,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone)]
pub struct FrameState {
    /// Tick counter, starting at 1
    pub frame: u64,

    /// Noise time for this frame
    pub time: f32,
    pub mode: InteractionMode,

    /// True only on the tick that applied the first keystroke or pointer press
    pub first_input: bool,

    /// Accumulated camera drag this tick (pixels), if any
    pub camera_orbit: Option<Vec2>,
    pub layers: [LayerDraw; LayerId::COUNT],
    pub goggle_stars: Vec<StarInstance>,
    pub ring_stars: Vec<RingStar>,
    pub flag_points: Vec<PointInstance>,
    pub words: Vec<WordProgress>,
    pub pulse: f32,
    pub base_alpha: f32,
}

impl FrameState {
    pub fn layer(&self, id: LayerId) -> &LayerDraw {
        &self.layers[id.index()]
    }
}

/// Owns the engine state and assembles frames
pub struct VisualCompositor {
    config: EngineConfig,
    layers: LayerSet,
    words: WordProgressTracker,
    router: InteractionZoneRouter,
    mapper: SpectrumMapper,
    noise: Box<dyn NoiseField>,
    goggle_faces: Option<Vec<FaceInstance>>,
    flag_points: Vec<FlagPoint>,
    pending: VecDeque<InputEvent>,
    interacted: bool,
    frame: u64,
}

impl VisualCompositor {
    /// Validate the config and run the one-time point extraction
    pub fn new(config: EngineConfig, assets: SceneAssets) -> EngineResult<Self> {
        config.validate()?;

        let flag_points = match &assets.flag {
            Some(image) => PointCloudExtractor::new(config.points.clone()).extract(image),
            None => Vec::new(),
        };
        let goggle_faces = assets.goggles.as_ref().map(|mesh| mesh.face_instances());

        log::info!(
            "compositor ready: {} flag points, {} goggle faces",
            flag_points.len(),
            goggle_faces.as_ref().map_or(0, Vec::len)
        );

        Ok(Self {
            layers: LayerSet::new(&config.layers),
            words: WordProgressTracker::new(&config.words),
            router: InteractionZoneRouter::new(&config.interaction),
            mapper: SpectrumMapper::new(config.audio.clone()),
            noise: Box::new(PerlinField::new(config.flag.noise_seed)),
            goggle_faces,
            flag_points,
            pending: VecDeque::new(),
            interacted: false,
            frame: 0,
            config,
        })
    }

    /// Replace the noise field driving flag point sizes
    pub fn with_noise(mut self, noise: Box<dyn NoiseField>) -> Self {
        self.noise = noise;
        self
    }

    /// Queue an event for the next tick
    pub fn push_event(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    pub fn layers(&self) -> &LayerSet {
        &self.layers
    }

    pub fn words(&self) -> &WordProgressTracker {
        &self.words
    }

    pub fn mode(&self) -> InteractionMode {
        self.router.mode()
    }

    /// Extracted points; immutable after construction
    pub fn flag_points(&self) -> &[FlagPoint] {
        &self.flag_points
    }

    /// Whether any keystroke or pointer press has been applied yet
    pub fn interacted(&self) -> bool {
        self.interacted
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one frame
    pub fn tick(&mut self, audio: &dyn AudioAnalyzer) -> FrameState {
        self.frame += 1;
        let was_interacted = self.interacted;
        let camera_orbit = self.apply_events();
        let first_input = self.interacted && !was_interacted;
        if first_input {
            log::info!("first input on frame {}", self.frame);
        }

        let mode = self.router.mode();
        self.layers.advance_all(mode);

        let snapshot = AudioSnapshot::pull(audio);
        let params = self.mapper.update(&snapshot);
        let time = self.frame as f32 * self.config.flag.time_step;

        let goggle_stars = self.goggle_stars(params.pulse);
        let ring_stars = self.ring_stars(&params.ring_scales);
        let flag_points = self.point_instances(time, params.flag_magnitude);

        let layers = LayerId::ALL.map(|id| {
            let state = self.layers.get(id);
            let scale = match id {
                LayerId::Goggles => ScaleParams::Goggles {
                    pulse: params.pulse,
                },
                LayerId::StarCircle => ScaleParams::StarCircle {
                    star_scales: params.ring_scales.clone(),
                },
                LayerId::Skeleton => ScaleParams::Skeleton {
                    base_alpha: params.base_alpha,
                    glass_rgb: self.config.skeleton.glass_rgb,
                },
                LayerId::Flag => ScaleParams::Flag {
                    magnitude: params.flag_magnitude,
                    layer_scale: self.config.flag.layer_scale,
                    copy_offsets_y: self.config.flag.copy_offsets_y,
                },
            };
            LayerDraw {
                id,
                enabled: state.is_enabled(),
                rotation: state.rotation(),
                scale,
            }
        });

        FrameState {
            frame: self.frame,
            time,
            mode,
            first_input,
            camera_orbit,
            layers,
            goggle_stars,
            ring_stars,
            flag_points,
            words: self.word_progress(),
            pulse: params.pulse,
            base_alpha: params.base_alpha,
        }
    }

    /// Drain queued input; returns the summed camera drag
    fn apply_events(&mut self) -> Option<Vec2> {
        let mut orbit: Option<Vec2> = None;
        self.layers.begin_tick();
        while let Some(event) = self.pending.pop_front() {
            if matches!(event, InputEvent::Char(_) | InputEvent::PointerDown(_)) {
                self.interacted = true;
            }
            match event {
                InputEvent::Char(ch) => {
                    for id in self.words.on_character(ch) {
                        self.layers.get_mut(id).enable();
                    }
                }
                InputEvent::PointerDown(pos) => self.router.pointer_down(pos, &mut self.layers),
                InputEvent::PointerDrag(pos) => {
                    if let Some(delta) = self.router.pointer_drag(pos, &mut self.layers) {
                        *orbit.get_or_insert(Vec2::ZERO) += delta;
                    }
                }
                InputEvent::PointerUp(_) => self.router.pointer_up(),
            }
        }
        orbit
    }

    fn word_progress(&self) -> Vec<WordProgress> {
        self.words
            .words()
            .iter()
            .map(|w| WordProgress {
                text: w.text().to_string(),
                typed_len: w.typed_len(),
                completed: w.is_completed(),
            })
            .collect()
    }

    fn goggle_stars(&self, pulse: f32) -> Vec<StarInstance> {
        let Some(faces) = self.goggle_faces.as_ref() else {
            return Vec::new();
        };
        if !self.layers.is_enabled(LayerId::Goggles) {
            return Vec::new();
        }
        let look = &self.config.goggles;
        faces
            .iter()
            .map(|face| StarInstance {
                position: face.centroid,
                scale: (face.area * look.area_multiplier * look.star_size * pulse).max(0.0),
            })
            .collect()
    }

    fn ring_stars(&self, scales: &[f32]) -> Vec<RingStar> {
        if !self.layers.is_enabled(LayerId::StarCircle) {
            return Vec::new();
        }
        let ring = &self.config.audio.ring;
        let count = scales.len().max(1) as f32;
        scales
            .iter()
            .enumerate()
            .map(|(i, &scale)| {
                let theta = i as f32 / count * TAU;
                RingStar {
                    theta,
                    position: Vec3::new(ring.radius * theta.cos(), 0.0, ring.radius * theta.sin()),
                    facing_yaw: -theta - FRAC_PI_2,
                    scale: ring.base_scale * scale,
                }
            })
            .collect()
    }

    fn point_instances(&self, time: f32, magnitude: f32) -> Vec<PointInstance> {
        if !self.layers.is_enabled(LayerId::Flag) {
            return Vec::new();
        }
        let sizes = point_sizes(
            &self.flag_points,
            self.noise.as_ref(),
            time,
            magnitude,
            &self.config.flag,
        );
        self.flag_points
            .iter()
            .zip(sizes)
            .map(|(point, size)| PointInstance::new(point, size))
            .collect()
    }
}
