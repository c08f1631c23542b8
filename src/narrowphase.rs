use glam::Vec2;

use crate::api::ResolverApi;
use crate::bar::ControlledBar;
use crate::body::KinematicBody;
use crate::math::{rolling_spin, Rotation};
use crate::types::*;

/// Penetration below this is treated as resting contact, not overlap.
pub const CONTACT_EPSILON: f32 = 1e-3;

/// Ball-vs-bar collision detection and velocity-level response.
#[derive(Copy, Clone, Debug)]
pub struct CollisionResolver {
    pub restitution: f32,
}

impl CollisionResolver {
    pub fn new(cfg: &SimConfig) -> Self {
        Self {
            restitution: cfg.restitution,
        }
    }
}

fn unit_sign(v: f32) -> f32 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

impl ResolverApi for CollisionResolver {
    fn broad_overlap(center: Vec2, r: f32, box_c: Vec2, box_h: Vec2, rot: Rotation) -> bool {
        let d = center - box_c;
        let h = rot.enclosing_half_extents(box_h) + Vec2::splat(r);
        d.x.abs() <= h.x && d.y.abs() <= h.y
    }

    fn overlap_circle_obb(
        center: Vec2,
        r: f32,
        box_c: Vec2,
        box_h: Vec2,
        rot: Rotation,
    ) -> Option<Overlap> {
        let local = rot.to_local(center - box_c);
        let closest = local.clamp(-box_h, box_h);
        let delta = local - closest;
        let len = delta.length();

        let (local_normal, depth) = if len > 0.0 {
            (delta / len, r - len)
        } else {
            // Center inside the box: leave through the face it is relatively nearest.
            let rx = local.x.abs() / box_h.x;
            let ry = local.y.abs() / box_h.y;
            if rx > ry {
                (Vec2::new(unit_sign(local.x), 0.0), r + box_h.x - local.x.abs())
            } else {
                (Vec2::new(0.0, unit_sign(local.y)), r + box_h.y - local.y.abs())
            }
        };
        if depth <= CONTACT_EPSILON {
            return None;
        }

        let surface = local - local_normal * (r - depth);
        Some(Overlap {
            normal: rot.to_world(local_normal),
            local_normal,
            depth,
            contact: box_c + rot.to_world(surface),
        })
    }

    fn detect_and_resolve(
        &self,
        body: &mut KinematicBody,
        bar: &ControlledBar,
        in_contact: bool,
    ) -> Option<Contact> {
        let rot = bar.rotation();
        let half = bar.half_extents();
        if !Self::broad_overlap(body.position, body.radius, bar.position, half, rot) {
            return None;
        }
        let ov = Self::overlap_circle_obb(body.position, body.radius, bar.position, half, rot)?;

        let n = ov.normal;
        let v = body.velocity;
        let vn = v.dot(n);
        let reflected = vn < 0.0;
        let restitution_applied = reflected && !in_contact;

        if reflected {
            let mut out = v - 2.0 * vn * n;
            if restitution_applied {
                // Keep only `restitution` of the reflected normal speed.
                out += (1.0 - self.restitution) * vn * n;
            }
            body.velocity = out;
            body.angular_velocity = rolling_spin(v.perp_dot(ov.local_normal), body.radius);
        }

        body.position += n * ov.depth;

        tracing::debug!(
            normal = ?n,
            depth = ov.depth,
            reflected,
            restitution_applied,
            "ball/bar contact resolved"
        );

        Some(Contact {
            normal: n,
            depth: ov.depth,
            point: ov.contact,
            reflected,
            restitution_applied,
        })
    }
}
