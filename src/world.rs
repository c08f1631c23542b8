use glam::Vec2;

use crate::api::{ResolverApi, SimulationApi};
use crate::bar::ControlledBar;
use crate::body::KinematicBody;
use crate::error::SimError;
use crate::math::clamp_span;
use crate::narrowphase::CollisionResolver;
use crate::types::*;

/// One ball, one bar, one playfield. Driven once per frame by the host.
pub struct Simulation {
    cfg: SimConfig,
    width: f32,
    height: f32,

    body: KinematicBody,
    bar: ControlledBar,
    resolver: CollisionResolver,

    // Intents written by host key handlers between frames.
    held: IntentSet,

    // Set while the ball overlapped the bar on the previous tick.
    in_contact: bool,
    last_contact: Option<Contact>,

    stats: SimStats,
}

impl SimulationApi for Simulation {
    fn new(cfg: SimConfig, width: i32, height: i32) -> Result<Self, SimError> {
        cfg.validate()?;
        let (w, h) = Self::checked_bounds(&cfg, width, height)?;
        let body = Self::spawn_body(&cfg, w, h);
        let bar = Self::spawn_bar(&cfg, w);
        tracing::info!(width, height, mode = ?cfg.bar_mode, "simulation created");
        Ok(Self {
            resolver: CollisionResolver::new(&cfg),
            cfg,
            width: w,
            height: h,
            body,
            bar,
            held: IntentSet::EMPTY,
            in_contact: false,
            last_contact: None,
            stats: SimStats::default(),
        })
    }

    fn update(&mut self, dt: f32, intents: IntentSet) {
        if dt <= 0.0 || !dt.is_finite() {
            return;
        }
        let dt = if dt > self.cfg.max_dt {
            tracing::warn!(dt, max_dt = self.cfg.max_dt, "frame dt clamped");
            self.stats.clamped_dt += 1;
            self.cfg.max_dt
        } else {
            dt
        };
        self.stats.ticks += 1;

        match self
            .resolver
            .detect_and_resolve(&mut self.body, &self.bar, self.in_contact)
        {
            Some(contact) => {
                self.in_contact = true;
                self.stats.contact_ticks += 1;
                if contact.restitution_applied {
                    self.stats.restitution_applied += 1;
                }
                self.last_contact = Some(contact);
                // Resolution replaces integration for this tick; spin still advances.
                self.body.spin(dt);
                self.body.clamp_to_bounds(self.width, self.height);
            }
            None => {
                self.in_contact = false;
                self.body.integrate(dt, self.width, self.height);
            }
        }

        self.bar.update(dt, intents, self.width);
    }

    fn tick(&mut self, dt: f32) {
        self.update(dt, self.held);
    }

    fn reset(&mut self) {
        self.body = Self::spawn_body(&self.cfg, self.width, self.height);
        self.bar = Self::spawn_bar(&self.cfg, self.width);
        self.held.clear();
        self.in_contact = false;
        self.last_contact = None;
        tracing::info!("simulation reset");
    }

    fn resize(&mut self, width: i32, height: i32) -> Result<(), SimError> {
        let (w, h) = match Self::checked_bounds(&self.cfg, width, height) {
            Ok(bounds) => bounds,
            Err(e) => {
                tracing::warn!(width, height, "resize rejected");
                return Err(e);
            }
        };
        self.width = w;
        self.height = h;

        // The bar is anchored to the horizontal center; its y is absolute.
        match self.bar.mode() {
            BarMode::Tilt => self.bar.position.x = 0.5 * w,
            BarMode::Slide => {
                let half_w = 0.5 * self.bar.width;
                self.bar.position.x = clamp_span(self.bar.position.x, half_w, w - half_w);
            }
        }
        self.bar.position.y = self.cfg.bar_y;
        tracing::info!(width, height, "world resized");
        Ok(())
    }

    fn set_intent(&mut self, intent: Intent) {
        self.held.insert(intent);
    }

    fn clear_intent(&mut self, intent: Intent) {
        self.held.remove(intent);
    }

    fn clear_intents(&mut self) {
        self.held.clear();
    }

    fn body(&self) -> &KinematicBody {
        &self.body
    }

    fn bar(&self) -> &ControlledBar {
        &self.bar
    }

    fn held_intents(&self) -> IntentSet {
        self.held
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            body: self.body.view(),
            bar: self.bar.view(),
            in_contact: self.in_contact,
        }
    }
}

impl Simulation {
    /// Playfield size as floats after validation.
    /// The playfield must fit the ball and keep the absolutely placed bar inside.
    fn checked_bounds(cfg: &SimConfig, width: i32, height: i32) -> Result<(f32, f32), SimError> {
        let min = 2.0 * cfg.ball_radius;
        let min_h = min.max(cfg.bar_y + 0.5 * cfg.bar_height);
        let (w, h) = (width as f32, height as f32);
        if width <= 0 || height <= 0 || w < min || h < min_h {
            return Err(SimError::InvalidDimensions { width, height });
        }
        Ok((w, h))
    }

    /// Ball spawns centered horizontally, resting against the ceiling.
    fn spawn_body(cfg: &SimConfig, width: f32, height: f32) -> KinematicBody {
        let pos = Vec2::new(0.5 * width, height - cfg.ball_radius);
        KinematicBody::new(pos, cfg.spawn_velocity, cfg)
    }

    fn spawn_bar(cfg: &SimConfig, width: f32) -> ControlledBar {
        ControlledBar::new(Vec2::new(0.5 * width, cfg.bar_y), cfg)
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// True if the ball overlapped the bar during the last tick.
    pub fn in_contact(&self) -> bool {
        self.in_contact
    }

    /// Most recent resolved contact, kept until the next one or a reset.
    pub fn contact(&self) -> Option<Contact> {
        self.last_contact
    }

    /// Counters since construction.
    pub fn stats(&self) -> SimStats {
        self.stats
    }

    /// Teleport the ball, e.g. for a host-driven drag or custom respawn.
    /// The position is clamped into the playfield and spin is left as is.
    pub fn place_body(&mut self, position: Vec2, velocity: Vec2) {
        self.body.position = position;
        self.body.velocity = velocity;
        self.body.clamp_to_bounds(self.width, self.height);
    }
}
