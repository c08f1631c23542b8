use glam::Vec2;

use crate::bar::ControlledBar;
use crate::body::KinematicBody;
use crate::error::SimError;
use crate::math::Rotation;
use crate::types::*;

/// Host-facing contract of the sandbox. One instance owns one ball and one bar.
pub trait SimulationApi {
    /// Construct a simulation for a `width` x `height` playfield.
    fn new(cfg: SimConfig, width: i32, height: i32) -> Result<Self, SimError>
    where
        Self: Sized;

    // --- Per-frame ---------------------------------------------------------

    /// Advance one frame with an explicit intent set. `dt <= 0` is a no-op.
    fn update(&mut self, dt: f32, intents: IntentSet);

    /// Advance one frame with the intents currently held via `set_intent`.
    fn tick(&mut self, dt: f32);

    // --- Host events -------------------------------------------------------

    /// Respawn the ball, re-anchor the bar and drop all held intents.
    fn reset(&mut self);

    /// Change the playfield bounds. Rejected sizes leave the world unchanged.
    fn resize(&mut self, width: i32, height: i32) -> Result<(), SimError>;

    /// Mark `intent` as held (key down). Consumed by `tick`.
    fn set_intent(&mut self, intent: Intent);
    /// Release a held intent (key up).
    fn clear_intent(&mut self, intent: Intent);
    /// Release every held intent, e.g. on focus loss.
    fn clear_intents(&mut self);

    // --- Read accessors ----------------------------------------------------

    /// The ball as of the last completed tick.
    fn body(&self) -> &KinematicBody;
    /// The bar as of the last completed tick.
    fn bar(&self) -> &ControlledBar;
    /// Intents currently held via `set_intent`.
    fn held_intents(&self) -> IntentSet;
    /// Render-facing copy of the ball, the bar and the contact flag.
    fn snapshot(&self) -> Snapshot;
}

/// Circle vs oriented rectangle primitives plus the contact response.
pub trait ResolverApi {
    /// Cheap rejection: circle AABB vs the AABB enclosing the rotated box.
    fn broad_overlap(center: Vec2, r: f32, box_c: Vec2, box_h: Vec2, rot: Rotation) -> bool;

    /// Authoritative overlap test in the box's local frame.
    fn overlap_circle_obb(
        center: Vec2,
        r: f32,
        box_c: Vec2,
        box_h: Vec2,
        rot: Rotation,
    ) -> Option<Overlap>;

    /// Detect and, if overlapping, resolve `body` against `bar`.
    ///
    /// `in_contact` says the pair was already touching last tick; restitution
    /// scaling is skipped in that case. Returns `None` if nothing overlapped.
    fn detect_and_resolve(
        &self,
        body: &mut KinematicBody,
        bar: &ControlledBar,
        in_contact: bool,
    ) -> Option<Contact>;
}
