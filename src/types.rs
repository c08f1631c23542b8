use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// How the bar reacts to intents.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarMode {
    /// Bar pivots about its center; responds to tilt intents.
    #[default]
    Tilt,
    /// Bar slides along x; responds to move intents.
    Slide,
}

/// Discrete directional input held by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    ClockwiseTilt,
    CounterClockwiseTilt,
    MoveLeft,
    MoveRight,
}

impl Intent {
    const fn bit(self) -> u8 {
        match self {
            Intent::ClockwiseTilt => 1 << 0,
            Intent::CounterClockwiseTilt => 1 << 1,
            Intent::MoveLeft => 1 << 2,
            Intent::MoveRight => 1 << 3,
        }
    }
}

/// Bitmask of currently held intents.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IntentSet {
    bits: u8,
}

impl IntentSet {
    pub const EMPTY: IntentSet = IntentSet { bits: 0 };

    /// Convenience constructor from a list of intents.
    pub fn from_slice(intents: &[Intent]) -> Self {
        let mut set = Self::EMPTY;
        for &i in intents {
            set.insert(i);
        }
        set
    }

    pub fn insert(&mut self, intent: Intent) {
        self.bits |= intent.bit();
    }

    pub fn remove(&mut self, intent: Intent) {
        self.bits &= !intent.bit();
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    pub fn contains(self, intent: Intent) -> bool {
        (self.bits & intent.bit()) != 0
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Signed axis value: +1 if only `pos` is held, -1 if only `neg`, else 0.
    pub fn axis(self, pos: Intent, neg: Intent) -> f32 {
        (self.contains(pos) as i8 - self.contains(neg) as i8) as f32
    }
}

/// Immutable tuning constants handed to the simulation at construction.
///
/// Units are pixels, seconds and degrees. Angles are clockwise-positive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Vertical acceleration applied to the ball (negative pulls toward the floor).
    pub gravity: f32,
    /// Fraction of normal speed kept after a bounce.
    pub restitution: f32,
    /// Coulomb-like coefficient used for floor/wall tangential damping.
    pub friction_coefficient: f32,

    pub ball_radius: f32,
    /// Velocity given to the ball at spawn/reset.
    pub spawn_velocity: Vec2,

    pub bar_width: f32,
    pub bar_height: f32,
    /// Absolute y of the bar center; not scaled on resize.
    pub bar_y: f32,
    /// Tilt rate while a tilt intent is held (deg/s).
    pub bar_angular_speed: f32,
    /// Horizontal speed while a move intent is held (px/s).
    pub bar_slide_speed: f32,
    pub bar_mode: BarMode,

    /// Upper bound for a single step; larger `dt` is clamped, not sub-stepped.
    pub max_dt: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: -980.0,
            restitution: 0.5,
            friction_coefficient: 0.1,
            ball_radius: 16.0,
            spawn_velocity: Vec2::new(100.0, 0.0),
            bar_width: 700.0,
            bar_height: 16.0,
            bar_y: 200.0,
            bar_angular_speed: 400.0,
            bar_slide_speed: 300.0,
            bar_mode: BarMode::Tilt,
            max_dt: 0.25,
        }
    }
}

impl SimConfig {
    /// Default playfield size used by hosts that do not pick their own.
    pub const DEFAULT_WIDTH: i32 = 960;
    pub const DEFAULT_HEIGHT: i32 = 540;

    /// Parse a JSON document; absent fields keep their default values.
    pub fn from_json_str(s: &str) -> Result<Self, SimError> {
        let cfg: SimConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let finite = [
            ("gravity", self.gravity),
            ("restitution", self.restitution),
            ("friction_coefficient", self.friction_coefficient),
            ("ball_radius", self.ball_radius),
            ("spawn_velocity", self.spawn_velocity.x),
            ("spawn_velocity", self.spawn_velocity.y),
            ("bar_width", self.bar_width),
            ("bar_height", self.bar_height),
            ("bar_y", self.bar_y),
            ("bar_angular_speed", self.bar_angular_speed),
            ("bar_slide_speed", self.bar_slide_speed),
            ("max_dt", self.max_dt),
        ];
        for (field, v) in finite {
            if !v.is_finite() {
                return Err(SimError::InvalidConfig { field, reason: "must be finite" });
            }
        }

        let positive = [
            ("ball_radius", self.ball_radius),
            ("bar_width", self.bar_width),
            ("bar_height", self.bar_height),
            ("max_dt", self.max_dt),
        ];
        for (field, v) in positive {
            if v <= 0.0 {
                return Err(SimError::InvalidConfig { field, reason: "must be > 0" });
            }
        }

        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(SimError::InvalidConfig {
                field: "restitution",
                reason: "must be within [0, 1]",
            });
        }
        if self.friction_coefficient < 0.0 {
            return Err(SimError::InvalidConfig {
                field: "friction_coefficient",
                reason: "must be >= 0",
            });
        }
        let non_negative = [
            ("bar_angular_speed", self.bar_angular_speed),
            ("bar_slide_speed", self.bar_slide_speed),
        ];
        for (field, v) in non_negative {
            if v < 0.0 {
                return Err(SimError::InvalidConfig { field, reason: "must be >= 0" });
            }
        }
        Ok(())
    }
}

/// Circle-vs-bar overlap found by the narrow phase.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Overlap {
    /// World-space unit normal pointing from the bar into the ball.
    pub normal: Vec2,
    /// Same normal expressed in the bar's local frame.
    pub local_normal: Vec2,
    /// Penetration depth (> 0).
    pub depth: f32,
    /// Closest point on the bar surface, world space.
    pub contact: Vec2,
}

/// Result of a resolved ball-vs-bar contact.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Contact {
    pub normal: Vec2,
    /// Overlap removed by positional correction.
    pub depth: f32,
    pub point: Vec2,
    /// True if the ball was approaching and its velocity got reflected.
    pub reflected: bool,
    /// True if restitution scaling was applied (first tick of a contact only).
    pub restitution_applied: bool,
}

/// Running counters since construction (not cleared by `reset`).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Updates that actually advanced state (dt > 0).
    pub ticks: u64,
    /// Ticks spent in contact with the bar.
    pub contact_ticks: u64,
    /// Contacts where restitution scaling was applied.
    pub restitution_applied: u64,
    /// Ticks whose dt exceeded `max_dt`.
    pub clamped_dt: u64,
}

/// Render-facing copy of the ball.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyView {
    pub position: Vec2,
    pub angle: f32,
    pub radius: f32,
}

/// Render-facing copy of the bar.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarView {
    pub position: Vec2,
    pub angle: f32,
    pub width: f32,
    pub height: f32,
}

/// Everything a host renderer needs for one frame.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub body: BodyView,
    pub bar: BarView,
    pub in_contact: bool,
}
