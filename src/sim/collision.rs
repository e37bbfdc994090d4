//! Border and pairwise collision resolution
//!
//! Borders reflect: an entity past an edge is put back just inside and the
//! matching velocity component is flipped. Pairwise contacts are a plain
//! distance test against a fixed radius, answered with a cheap positional
//! nudge and a randomized, damped bounce. Neither step destroys anything;
//! what a contact *means* (lost life, kill) is decided by the tick.

use glam::Vec2;
use rand::Rng;

use super::entity::{Body, Facing};
use super::vector::sign_or_zero;
use crate::tuning::{BorderRule, CollisionTuning, FieldTuning};

/// Distances that differ by less than this count as unchanged
const SEPARATION_EPSILON: f32 = 1e-3;

/// Keep a body inside the field. Returns true if any edge was touched.
pub fn resolve_border(body: &mut Body, field: &FieldTuning, rule: &BorderRule) -> bool {
    let mut touched = false;

    if body.pos.x > field.max_x {
        body.pos.x = field.max_x_clamp;
        body.vel.x = -body.vel.x;
        body.touches += 1;
        body.facing = Facing::Left;
        touched = true;
    } else if body.pos.x < field.min_x {
        body.pos.x = field.min_x_clamp;
        body.vel.x = -body.vel.x;
        body.touches += 1;
        body.facing = Facing::Right;
        touched = true;
    }

    if body.pos.y > rule.max_y {
        body.pos.y = rule.max_y_clamp;
        body.vel.y = -body.vel.y;
        body.touches += 1;
        touched = true;
    } else if body.pos.y < rule.min_y {
        // Off-screen allowance above the field: no touch is counted
        body.pos.y = rule.min_y_clamp;
        body.vel.y = -body.vel.y;
        touched = true;
    }

    touched
}

/// Whether a position is on or past an edge (the top edge is `top_y`)
pub fn is_touching_border(pos: Vec2, field: &FieldTuning, rule: &BorderRule, top_y: f32) -> bool {
    pos.x > field.max_x || pos.x < field.min_x || pos.y > rule.max_y || pos.y < top_y
}

/// Whether two bodies are within the contact radius
#[inline]
pub fn overlaps(a: &Body, b: &Body, radius: f32) -> bool {
    a.distance(b) < radius
}

/// Outcome of a resolved contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub distance_before: f32,
    pub distance_after: f32,
}

/// Detect and answer a contact between two bodies.
///
/// Each body steps back against its own direction of travel by the separation
/// offset. If that leaves the pair exactly as far apart as before (both at
/// rest, or moving in lockstep) they are split vertically instead. Velocities
/// are then bounced: `a` flips x and damps y, `b` damps x and flips y.
pub fn resolve_collision(
    a: &mut Body,
    b: &mut Body,
    tuning: &CollisionTuning,
    rng: &mut impl Rng,
) -> Option<Contact> {
    let before = a.distance(b);
    if before >= tuning.radius {
        return None;
    }

    let sep = tuning.separation;
    a.pos -= sign_or_zero(a.vel) * sep;
    b.pos -= sign_or_zero(b.vel) * sep;

    if (a.distance(b) - before).abs() < SEPARATION_EPSILON {
        let side = if a.pos.y >= b.pos.y { 1.0 } else { -1.0 };
        a.pos.y += side * sep;
        b.pos.y -= side * sep;
    }

    let damp_a = tuning.damping_tenths.sample(rng) * 0.1;
    let damp_b = tuning.damping_tenths.sample(rng) * 0.1;
    a.vel *= Vec2::new(-1.0, -damp_a);
    b.vel *= Vec2::new(-damp_b, -1.0);

    a.touches += 1;
    b.touches += 1;

    Some(Contact {
        distance_before: before,
        distance_after: a.distance(b),
    })
}
