use glam::Vec2;

use crate::math::{approach_zero, clamp_span, rolling_spin};
use crate::types::{BodyView, SimConfig};

/// Circular body moved by gravity and bounded by the playfield.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KinematicBody {
    /// Center, world space.
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    /// Degrees, clockwise-positive. Cosmetic.
    pub angle: f32,
    /// Degrees per second.
    pub angular_velocity: f32,
    pub radius: f32,
    /// Copied from config at construction.
    restitution: f32,
    friction: f32,
}

impl KinematicBody {
    pub fn new(position: Vec2, velocity: Vec2, cfg: &SimConfig) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec2::new(0.0, cfg.gravity),
            angle: 0.0,
            angular_velocity: 0.0,
            radius: cfg.ball_radius,
            restitution: cfg.restitution,
            friction: cfg.friction_coefficient,
        }
    }

    /// Advance one step under constant acceleration, then apply floor and wall
    /// policies (floor first) and clamp the center into the playfield.
    pub fn integrate(&mut self, dt: f32, world_width: f32, world_height: f32) {
        if dt <= 0.0 || !dt.is_finite() {
            return;
        }
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;

        let r = self.radius;
        // Tangential speed lost per step in contact, from |g|.
        let drag = self.friction * self.acceleration.y.abs() * dt;

        if self.position.y <= r {
            self.velocity.y = -self.restitution * self.velocity.y;
            self.position.y = r;
            self.velocity.x = approach_zero(self.velocity.x, drag);
            self.angular_velocity = rolling_spin(self.velocity.x, r);
        }

        let left = self.position.x <= r;
        let right = self.position.x >= world_width - r;
        if left || right {
            self.velocity.x = -self.velocity.x;
            self.velocity.y = approach_zero(self.velocity.y, drag);
            // Rolling up a right-hand wall turns the ball counter-clockwise.
            let spin = rolling_spin(self.velocity.y, r);
            self.angular_velocity = if left { spin } else { -spin };
        }

        self.clamp_to_bounds(world_width, world_height);
        self.spin(dt);
    }

    /// Advance orientation only.
    pub fn spin(&mut self, dt: f32) {
        if dt > 0.0 {
            self.angle += self.angular_velocity * dt;
        }
    }

    pub fn clamp_to_bounds(&mut self, world_width: f32, world_height: f32) {
        let r = self.radius;
        self.position.x = clamp_span(self.position.x, r, world_width - r);
        self.position.y = clamp_span(self.position.y, r, world_height - r);
    }

    pub fn view(&self) -> BodyView {
        BodyView {
            position: self.position,
            angle: self.angle,
            radius: self.radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f32 = 960.0;
    const H: f32 = 540.0;

    fn body(pos: Vec2, vel: Vec2) -> KinematicBody {
        KinematicBody::new(pos, vel, &SimConfig::default())
    }

    #[test]
    fn test_free_fall_step() {
        let mut b = body(Vec2::new(480.0, 300.0), Vec2::new(0.0, -200.0));
        b.integrate(0.1, W, H);
        assert!((b.velocity.y - (-298.0)).abs() < 1e-3);
        assert!((b.position.y - 270.2).abs() < 1e-3);
        assert!((b.position.x - 480.0).abs() < 1e-6);
        assert_eq!(b.angular_velocity, 0.0);
    }

    #[test]
    fn test_floor_bounce_keeps_half_speed() {
        // Zero gravity isolates the restitution term.
        let cfg = SimConfig { gravity: 0.0, ..SimConfig::default() };
        let mut b = KinematicBody::new(Vec2::new(480.0, 20.0), Vec2::new(0.0, -100.0), &cfg);
        b.integrate(0.1, W, H);
        assert!((b.velocity.y - 50.0).abs() < 1e-4);
        assert_eq!(b.position.y, b.radius);
    }

    #[test]
    fn test_floor_friction_monotone_no_flip() {
        for vx in [-300.0, -5.0, -0.5, 0.0, 0.5, 5.0, 300.0] {
            let mut b = body(Vec2::new(480.0, 16.0), Vec2::new(vx, -10.0));
            b.integrate(1.0 / 60.0, W, H);
            assert!(b.velocity.x.abs() <= vx.abs());
            assert!(b.velocity.x * vx >= 0.0, "friction flipped {vx} -> {}", b.velocity.x);
        }
    }

    #[test]
    fn test_floor_contact_derives_rolling_spin() {
        let mut b = body(Vec2::new(480.0, 16.0), Vec2::new(100.0, -10.0));
        b.integrate(1.0 / 60.0, W, H);
        let expected = b.velocity.x * 360.0 / (core::f32::consts::PI * b.radius);
        assert!((b.angular_velocity - expected).abs() < 1e-3);
        assert!(b.angular_velocity > 0.0);
    }

    #[test]
    fn test_wall_bounce_flips_vx_and_spins() {
        let mut b = body(Vec2::new(W - 17.0, 300.0), Vec2::new(200.0, 100.0));
        b.integrate(0.05, W, H);
        assert!(b.velocity.x < 0.0);
        assert_eq!(b.position.x, W - b.radius);
        // Moving up along a right wall spins counter-clockwise.
        assert!(b.angular_velocity < 0.0);

        let mut b = body(Vec2::new(17.0, 300.0), Vec2::new(-200.0, 100.0));
        b.integrate(0.05, W, H);
        assert!(b.velocity.x > 0.0);
        assert_eq!(b.position.x, b.radius);
        assert!(b.angular_velocity > 0.0);
    }

    #[test]
    fn test_wall_friction_reduces_vy() {
        let cfg = SimConfig::default();
        let dt = 0.05;
        let drag = cfg.friction_coefficient * cfg.gravity.abs() * dt;
        let mut b = body(Vec2::new(W - 17.0, 300.0), Vec2::new(200.0, 100.0));
        b.integrate(dt, W, H);
        // 100 - 49 from gravity, then 4.9 from wall friction.
        assert!((drag - 4.9).abs() < 1e-4);
        assert!((b.velocity.y - 46.1).abs() < 1e-3);
    }

    #[test]
    fn test_wall_friction_monotone_no_flip() {
        let dt = 0.05;
        // Values straddle the gravity step so |vy| ends up on either side of the drag.
        for vy in [60.0, 51.0, 47.0, 49.0, 40.0, -20.0] {
            let pre = vy + SimConfig::default().gravity * dt;
            let mut b = body(Vec2::new(17.0, 300.0), Vec2::new(-200.0, vy));
            b.integrate(dt, W, H);
            assert!(b.velocity.y.abs() <= pre.abs());
            assert!(b.velocity.y * pre >= 0.0, "friction flipped {pre} -> {}", b.velocity.y);
            if pre.abs() < 4.9 {
                assert_eq!(b.velocity.y, 0.0);
            }
        }
    }

    #[test]
    fn test_corner_applies_floor_then_wall() {
        let cfg = SimConfig { gravity: 0.0, ..SimConfig::default() };
        let mut b = KinematicBody::new(Vec2::new(20.0, 20.0), Vec2::new(-100.0, -100.0), &cfg);
        b.integrate(0.1, W, H);
        assert_eq!(b.position, Vec2::splat(b.radius));
        assert!(b.velocity.x > 0.0);
        assert!(b.velocity.y > 0.0);
    }

    #[test]
    fn test_stays_in_bounds() {
        let mut b = body(Vec2::new(480.0, 500.0), Vec2::new(2500.0, 1800.0));
        for i in 0..2000 {
            let dt = [1.0 / 120.0, 1.0 / 30.0, 0.2][i % 3];
            b.integrate(dt, W, H);
            let r = b.radius;
            assert!(b.position.x >= r && b.position.x <= W - r);
            assert!(b.position.y >= r && b.position.y <= H - r);
        }
    }

    #[test]
    fn test_non_positive_dt_is_noop() {
        let mut b = body(Vec2::new(100.0, 100.0), Vec2::new(10.0, 10.0));
        let before = b;
        b.integrate(0.0, W, H);
        b.integrate(-1.0, W, H);
        b.integrate(f32::NAN, W, H);
        assert_eq!(b, before);
    }

    #[test]
    fn test_orientation_advances_with_spin() {
        let mut b = body(Vec2::new(480.0, 300.0), Vec2::ZERO);
        b.angular_velocity = 90.0;
        b.integrate(0.5, W, H);
        assert!((b.angle - 45.0).abs() < 1e-4);
    }
}
