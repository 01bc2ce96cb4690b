//! Inertial rotation: auto-spin, drag-injected velocity, friction decay.
//!
//! Axis convention: horizontal drag feeds yaw (`rotation.y`), vertical drag
//! feeds pitch (`rotation.x`). A fling is the drag delta of the last tick
//! that saw pointer movement, left in `velocity` when the pointer is released.

use glam::Vec2;

use super::{LayerSet, LayerState};
use crate::interaction::InteractionMode;
use crate::params::SpinAxes;

impl LayerState {
    /// Advance one tick of free motion
    ///
    /// Skipped while the layer is disabled or held by the pointer. Otherwise
    /// auto-spin plus velocity is added to the rotation and velocity decays
    /// by the layer's friction.
    pub fn advance(&mut self, mode: InteractionMode) {
        if !self.enabled || mode == InteractionMode::Manual(self.id) {
            return;
        }
        match self.physics.axes {
            SpinAxes::Static => {}
            SpinAxes::Free | SpinAxes::YawOnly => {
                self.rotation.y += self.physics.auto_speed_rad + self.velocity.y;
                self.rotation.x += self.velocity.x;
                self.velocity *= self.physics.friction;
            }
        }
    }

    /// Pointer grabbed this layer: kill any residual fling
    pub fn grab(&mut self) {
        self.velocity = Vec2::ZERO;
        self.tick_spin = Vec2::ZERO;
    }

    /// Start collecting drag for a new tick
    pub fn begin_tick(&mut self) {
        self.tick_spin = Vec2::ZERO;
    }

    /// Apply one drag event while held
    ///
    /// `screen_delta` is the pointer movement already scaled to radians
    /// (x = horizontal, y = vertical). Velocity becomes the total drag since
    /// [`LayerState::begin_tick`], so it matches the per-tick pointer motion
    /// however many events the tick carried.
    pub fn drag(&mut self, screen_delta: Vec2) {
        let spin = match self.physics.axes {
            SpinAxes::Static => return,
            SpinAxes::Free => Vec2::new(screen_delta.y, screen_delta.x),
            SpinAxes::YawOnly => Vec2::new(0.0, screen_delta.x),
        };
        self.rotation += spin;
        self.tick_spin += spin;
        self.velocity = self.tick_spin;
    }
}

impl LayerSet {
    /// Reset per-tick drag accumulation on every layer
    pub fn begin_tick(&mut self) {
        for layer in &mut self.layers {
            layer.begin_tick();
        }
    }

    /// Advance every layer by one tick under the current interaction mode
    pub fn advance_all(&mut self, mode: InteractionMode) {
        for layer in &mut self.layers {
            layer.advance(mode);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::LayerId;
    use crate::params::LayerPhysics;

    fn enabled(id: LayerId) -> LayerState {
        let mut layer = LayerState::new(id, LayerPhysics::for_layer(id));
        layer.enable();
        layer
    }

    #[test]
    fn test_disabled_layer_does_not_move() {
        let mut layer = LayerState::new(LayerId::Goggles, LayerPhysics::for_layer(LayerId::Goggles));
        layer.drag(Vec2::new(0.1, 0.1));
        let before = layer.rotation();
        layer.advance(InteractionMode::Camera);
        assert_eq!(layer.rotation(), before);
    }

    #[test]
    fn test_auto_spin_only_on_yaw() {
        let mut layer = enabled(LayerId::StarCircle);
        for _ in 0..10 {
            layer.advance(InteractionMode::Camera);
        }
        assert!((layer.rotation().y - 0.03).abs() < 1e-6);
        assert_eq!(layer.rotation().x, 0.0);
    }

    #[test]
    fn test_velocity_decays_geometrically() {
        let mut layer = enabled(LayerId::Goggles);
        layer.drag(Vec2::new(0.2, -0.1));
        let v0 = layer.velocity().length();
        let friction = layer.physics().friction;

        let mut previous = v0;
        for t in 1..=50 {
            layer.advance(InteractionMode::Camera);
            let v = layer.velocity().length();
            let expected = v0 * friction.powi(t);
            assert!((v - expected).abs() < 1e-5, "tick {}: {} vs {}", t, v, expected);
            assert!(v < previous);
            previous = v;
        }
        assert!(previous < 0.02 * v0);
    }

    #[test]
    fn test_held_layer_skips_physics() {
        let mut layer = enabled(LayerId::Goggles);
        layer.drag(Vec2::new(0.05, 0.0));
        let rotation = layer.rotation();
        let velocity = layer.velocity();

        layer.advance(InteractionMode::Manual(LayerId::Goggles));
        assert_eq!(layer.rotation(), rotation);
        assert_eq!(layer.velocity(), velocity);

        // Holding another layer does not freeze this one
        layer.advance(InteractionMode::Manual(LayerId::StarCircle));
        assert_ne!(layer.rotation(), rotation);
    }

    #[test]
    fn test_drag_maps_axes() {
        let mut layer = enabled(LayerId::Goggles);
        layer.drag(Vec2::new(0.3, 0.0));
        layer.begin_tick();
        layer.drag(Vec2::new(0.1, 0.2));

        // New tick: yaw from horizontal, pitch from vertical
        assert_eq!(layer.velocity(), Vec2::new(0.2, 0.1));
        assert!((layer.rotation().y - 0.4).abs() < 1e-6);
        assert!((layer.rotation().x - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_velocity_is_total_drag_of_the_tick() {
        let mut layer = enabled(LayerId::Goggles);
        layer.begin_tick();
        layer.drag(Vec2::new(0.1, 0.0));
        layer.drag(Vec2::new(0.1, 0.0));
        assert!((layer.velocity().y - 0.2).abs() < 1e-6);

        // A later tick replaces, not extends, the fling
        layer.begin_tick();
        layer.drag(Vec2::new(0.05, 0.0));
        assert!((layer.velocity().y - 0.05).abs() < 1e-6);
        assert!((layer.rotation().y - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_yaw_only_layer_ignores_pitch() {
        let mut layer = enabled(LayerId::Skeleton);
        layer.drag(Vec2::new(0.1, 0.5));
        assert_eq!(layer.rotation().x, 0.0);
        assert_eq!(layer.velocity(), Vec2::new(0.0, 0.1));

        layer.advance(InteractionMode::Camera);
        assert_eq!(layer.rotation().x, 0.0);
    }

    #[test]
    fn test_grab_zeroes_fling() {
        let mut layer = enabled(LayerId::Goggles);
        layer.drag(Vec2::new(0.3, 0.3));
        layer.grab();
        assert_eq!(layer.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_static_layer_never_rotates() {
        let mut layer = enabled(LayerId::Flag);
        layer.drag(Vec2::new(1.0, 1.0));
        layer.advance(InteractionMode::Camera);
        assert_eq!(layer.rotation(), Vec2::ZERO);
    }

    #[test]
    fn test_advance_all_respects_enabled_flags() {
        let mut layers = LayerSet::default();
        layers.get_mut(LayerId::Skeleton).enable();
        layers.advance_all(InteractionMode::Camera);

        assert!(layers.get(LayerId::Skeleton).rotation().y < 0.0);
        assert_eq!(layers.get(LayerId::Goggles).rotation(), Vec2::ZERO);
    }
}
