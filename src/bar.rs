use glam::Vec2;

use crate::math::{clamp_span, Rotation};
use crate::types::{BarMode, BarView, Intent, IntentSet, SimConfig};

/// Player-driven rectangle. Moves only from intents, never from forces.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ControlledBar {
    /// Center, world space.
    pub position: Vec2,
    /// Degrees, clockwise-positive.
    pub angle: f32,
    /// Degrees per second, set from intents every update.
    pub angular_velocity: f32,
    /// Horizontal speed in slide mode (px/s).
    pub velocity_x: f32,
    pub width: f32,
    pub height: f32,
    mode: BarMode,
    angular_speed: f32,
    slide_speed: f32,
}

impl ControlledBar {
    pub fn new(position: Vec2, cfg: &SimConfig) -> Self {
        Self {
            position,
            angle: 0.0,
            angular_velocity: 0.0,
            velocity_x: 0.0,
            width: cfg.bar_width,
            height: cfg.bar_height,
            mode: cfg.bar_mode,
            angular_speed: cfg.bar_angular_speed,
            slide_speed: cfg.bar_slide_speed,
        }
    }

    pub fn mode(&self) -> BarMode {
        self.mode
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }

    pub fn rotation(&self) -> Rotation {
        Rotation::from_degrees_cw(self.angle)
    }

    /// Apply one step of input. Tilt mode rotates in place; slide mode moves
    /// along x and keeps the whole bar inside `[0, world_width]`.
    pub fn update(&mut self, dt: f32, intents: IntentSet, world_width: f32) {
        if dt <= 0.0 || !dt.is_finite() {
            return;
        }
        match self.mode {
            BarMode::Tilt => {
                let dir = intents.axis(Intent::ClockwiseTilt, Intent::CounterClockwiseTilt);
                self.angular_velocity = dir * self.angular_speed;
                self.angle += self.angular_velocity * dt;
            }
            BarMode::Slide => {
                let dir = intents.axis(Intent::MoveRight, Intent::MoveLeft);
                self.velocity_x = dir * self.slide_speed;
                let half_w = 0.5 * self.width;
                self.position.x = clamp_span(
                    self.position.x + self.velocity_x * dt,
                    half_w,
                    world_width - half_w,
                );
            }
        }
    }

    pub fn view(&self) -> BarView {
        BarView {
            position: self.position,
            angle: self.angle,
            width: self.width,
            height: self.height,
        }
    }
}
