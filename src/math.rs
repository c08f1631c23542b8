use glam::{Mat2, Vec2};

/// Rotation between a body's local frame and the world frame.
///
/// Angles are degrees, clockwise-positive, in a y-up world. A body with angle
/// `θ` has its local +x axis pointing along world `(cos θ, -sin θ)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rotation {
    local_to_world: Mat2,
}

impl Rotation {
    pub const IDENTITY: Rotation = Rotation {
        local_to_world: Mat2::IDENTITY,
    };

    pub fn from_degrees_cw(deg: f32) -> Self {
        // Clockwise in a y-up frame is a negative mathematical angle.
        Self {
            local_to_world: Mat2::from_angle(-deg.to_radians()),
        }
    }

    /// World-space offset -> local frame (applies the inverse rotation).
    pub fn to_local(&self, v: Vec2) -> Vec2 {
        self.local_to_world.transpose() * v
    }

    /// Local-frame vector -> world space.
    pub fn to_world(&self, v: Vec2) -> Vec2 {
        self.local_to_world * v
    }

    /// World-space half extents of the AABB enclosing a rotated box.
    pub fn enclosing_half_extents(&self, half: Vec2) -> Vec2 {
        let m = self.local_to_world;
        Vec2::new(
            m.x_axis.x.abs() * half.x + m.y_axis.x.abs() * half.y,
            m.x_axis.y.abs() * half.x + m.y_axis.y.abs() * half.y,
        )
    }
}

/// Shrink `v` toward zero by `amount` (≥ 0) without crossing it.
pub fn approach_zero(v: f32, amount: f32) -> f32 {
    if v > 0.0 {
        (v - amount).max(0.0)
    } else if v < 0.0 {
        (v + amount).min(0.0)
    } else {
        0.0
    }
}

/// Spin (deg/s) of a ball of `radius` rolling at `speed` along a surface.
pub fn rolling_spin(speed: f32, radius: f32) -> f32 {
    speed * 360.0 / (core::f32::consts::PI * radius)
}

/// Clamp into `[lo, hi]`; collapses to the midpoint when the span is inverted.
pub fn clamp_span(v: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        0.5 * (lo + hi)
    } else {
        v.max(lo).min(hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_rotation_clockwise_convention() {
        let r = Rotation::from_degrees_cw(90.0);
        // Local +x points down the screen after a quarter turn clockwise.
        assert!(close(r.to_world(Vec2::X), Vec2::new(0.0, -1.0)));
        assert!(close(r.to_local(Vec2::new(0.0, -1.0)), Vec2::X));
    }

    #[test]
    fn test_rotation_inverse() {
        for deg in [-135.0, -30.0, 0.0, 17.0, 45.0, 200.0] {
            let r = Rotation::from_degrees_cw(deg);
            let v = Vec2::new(3.5, -2.25);
            assert!(close(r.to_world(r.to_local(v)), v));
            assert!((r.to_local(v).length() - v.length()).abs() < 1e-4);
        }
    }

    #[test]
    fn test_enclosing_half_extents() {
        let half = Vec2::new(10.0, 2.0);
        assert!(close(Rotation::IDENTITY.enclosing_half_extents(half), half));
        let quarter = Rotation::from_degrees_cw(90.0).enclosing_half_extents(half);
        assert!(close(quarter, Vec2::new(2.0, 10.0)));
    }

    #[test]
    fn test_approach_zero_never_flips() {
        assert_eq!(approach_zero(5.0, 2.0), 3.0);
        assert_eq!(approach_zero(1.0, 2.0), 0.0);
        assert_eq!(approach_zero(-1.0, 2.0), 0.0);
        assert_eq!(approach_zero(-5.0, 2.0), -3.0);
        assert_eq!(approach_zero(0.0, 2.0), 0.0);
    }

    #[test]
    fn test_clamp_span() {
        assert_eq!(clamp_span(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp_span(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp_span(11.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp_span(3.0, 6.0, 4.0), 5.0);
    }
}
