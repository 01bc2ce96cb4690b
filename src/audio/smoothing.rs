//! Exponential approach smoothing for audio-driven scalars.

/// Scalar that chases a target by a fixed fraction of the gap each tick
///
/// `current += (target - current) * factor`
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    current: f32,
    target: f32,
    factor: f32,
}

impl SmoothedParam {
    /// `factor` must lie in (0, 1); it is clamped there
    pub fn new(initial: f32, factor: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            factor: factor.clamp(f32::EPSILON, 1.0 - f32::EPSILON),
        }
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Advance one tick and return the new value
    pub fn update(&mut self) -> f32 {
        self.current += (self.target - self.current) * self.factor;
        self.current
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }
}
