use glam::Vec2;

use crate::body::Body;
use crate::types::*;

/// A contact waiting to be resolved during the current step.
///
/// `normal` points from the second body toward the first, so pushing body 0 along it
/// (and body 1 against it) separates them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Collision {
    pub normal: Vec2,
    pub depth: f32,
    pub bodies: (BodyHandle, BodyHandle),
}

/// Borrow two distinct bodies mutably.
pub(crate) fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> Option<(&mut Body, &mut Body)> {
    if i == j || i.max(j) >= bodies.len() {
        return None;
    }
    if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        Some((&mut lo[i], &mut hi[0]))
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        Some((&mut hi[0], &mut lo[j]))
    }
}

impl Collision {
    pub fn new(manifold: Manifold, a: BodyHandle, b: BodyHandle) -> Self {
        Self {
            normal: manifold.normal,
            depth: manifold.depth,
            bodies: (a, b),
        }
    }

    /// Apply positional correction, the bounce impulse and friction.
    ///
    /// Returns false when nothing was applied: the bodies are already separating, neither
    /// can move, a handle is invalid, or the impulse came out non-finite.
    pub fn solve(&self, bodies: &mut [Body], cfg: &EngineConfig) -> bool {
        let (i, j) = (self.bodies.0.index(), self.bodies.1.index());
        let Some((b0, b1)) = pair_mut(bodies, i, j) else {
            log::warn!("dropping collision with invalid bodies {:?}", self.bodies);
            return false;
        };

        let rel = b0.vel() - b1.vel();
        let dir = self.normal.dot(rel);
        if dir > 0.0 {
            return false;
        }

        let inv_sum = b0.inv_mass() + b1.inv_mass();
        if inv_sum == 0.0 {
            return false;
        }

        let restitution = b0.restitution().min(b1.restitution());
        let p = -(dir * (1.0 + restitution)) / inv_sum;
        debug_assert!(p.is_finite(), "non-finite impulse {p} for {self:?}");
        if !p.is_finite() {
            log::warn!("skipping collision {:?}: non-finite impulse {p}", self.bodies);
            return false;
        }

        self.correct_positions(b0, b1, cfg.move_constant);

        b0.push(self.normal * p);
        b1.push(self.normal * -p);

        let mu = b0.friction().min(b1.friction());
        let tangent = Vec2::new(self.normal.y, -self.normal.x);
        let vt = tangent.dot(rel);
        if mu == 0.0 || vt == 0.0 {
            return true;
        }

        let mut friction = -vt.signum() * mu * p * 0.5;
        if cfg.clamp_friction {
            // Enough to stop tangential sliding, never enough to reverse it.
            let limit = vt.abs() / inv_sum;
            friction = friction.clamp(-limit, limit);
        }
        if !friction.is_finite() {
            log::warn!("skipping friction for {:?}: non-finite impulse", self.bodies);
            return true;
        }

        b0.push(tangent * friction);
        b1.push(tangent * -friction);
        true
    }

    /// Translate the movable bodies apart by a fraction of the penetration depth.
    ///
    /// The fraction is doubled when only one of the two bodies can move.
    pub fn correct_positions(&self, b0: &mut Body, b1: &mut Body, move_constant: f32) {
        let mut k = move_constant;
        if b0.is_static() != b1.is_static() {
            k *= 2.0;
        }
        let offset = self.normal * self.depth * k;
        if !b0.is_static() {
            b0.translate(offset);
        }
        if !b1.is_static() {
            b1.translate(-offset);
        }
    }
}
