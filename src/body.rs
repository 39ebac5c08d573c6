use glam::Vec2;

use std::collections::HashSet;
use std::sync::Arc;

use crate::api::NarrowphaseApi;
use crate::collider::{BOX, Collider, ColliderRegistry};
use crate::error::PhysicsError;
use crate::narrowphase::Narrowphase;
use crate::types::*;

/// A physical actor: a convex shape with a size, a velocity and material parameters.
///
/// Bodies are built by game code and handed to a [`PhysicsEngine`](crate::PhysicsEngine),
/// which owns them from then on.
#[derive(Clone, Debug)]
pub struct Body {
    pub transform: Transform,
    collider: Arc<Collider>,
    /// Scale applied to the collider's unit-offset points.
    dim: Vec2,
    vel: Vec2,
    mass: Mass,
    /// Restitution, 0 (no bounce) to 1 (elastic).
    restitution: f32,
    /// Friction coefficient (≥ 0).
    friction: f32,
    /// Triggers report contacts but are never pushed apart.
    trigger: bool,
    tags: HashSet<String>,
}

fn check_dim(dim: Vec2) -> Result<Vec2, PhysicsError> {
    if dim.is_finite() && dim.x > 0.0 && dim.y > 0.0 {
        Ok(dim)
    } else {
        Err(PhysicsError::InvalidDimensions(dim))
    }
}

impl Body {
    /// Constructs a movable body of unit mass, with the collider scaled to `w` × `h`.
    pub fn new(
        transform: Transform,
        collider: Arc<Collider>,
        w: f32,
        h: f32,
    ) -> Result<Self, PhysicsError> {
        if !transform.pos.is_finite() {
            return Err(PhysicsError::NonFinite("body position"));
        }
        let dim = check_dim(Vec2::new(w, h))?;
        Ok(Self {
            transform,
            collider,
            dim,
            vel: Vec2::ZERO,
            mass: Mass::default(),
            restitution: 0.0,
            friction: 0.0,
            trigger: false,
            tags: HashSet::from([BODY_TAG.to_owned()]),
        })
    }

    /// Constructs a body using the shape registered under `name`.
    pub fn from_registry(
        registry: &mut ColliderRegistry,
        name: &str,
        transform: Transform,
        w: f32,
        h: f32,
    ) -> Result<Self, PhysicsError> {
        let collider = registry.require(name)?;
        Self::new(transform, collider, w, h)
    }

    /// Constructs a box centered at (`x`, `y`).
    pub fn new_box(
        registry: &mut ColliderRegistry,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    ) -> Result<Self, PhysicsError> {
        Self::from_registry(registry, BOX, Transform::new(x, y), w, h)
    }

    // --- Builders ----------------------------------------------------------

    pub fn with_mass(mut self, mass: f32) -> Result<Self, PhysicsError> {
        self.set_mass(mass)?;
        Ok(self)
    }

    /// Make the body immovable.
    pub fn with_static(mut self) -> Self {
        self.make_static();
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Result<Self, PhysicsError> {
        self.set_restitution(restitution)?;
        Ok(self)
    }

    pub fn with_friction(mut self, friction: f32) -> Result<Self, PhysicsError> {
        self.set_friction(friction)?;
        Ok(self)
    }

    pub fn with_trigger(mut self, trigger: bool) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Result<Self, PhysicsError> {
        self.set_vel(vel)?;
        Ok(self)
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.add_tag(tag);
        self
    }

    // --- Geometry ----------------------------------------------------------

    pub fn pos(&self) -> Vec2 {
        self.transform.pos
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.transform.pos = pos;
    }

    /// Move the body directly, bypassing velocity.
    pub fn translate(&mut self, delta: Vec2) {
        self.transform.pos += delta;
    }

    pub fn collider(&self) -> &Arc<Collider> {
        &self.collider
    }

    pub fn set_collider(&mut self, collider: Arc<Collider>) {
        self.collider = collider;
    }

    pub fn dim(&self) -> Vec2 {
        self.dim
    }

    pub fn set_dim(&mut self, dim: Vec2) -> Result<(), PhysicsError> {
        self.dim = check_dim(dim)?;
        Ok(())
    }

    /// Collider points scaled by this body's dimensions, relative to its position.
    pub fn outline(&self) -> Vec<Vec2> {
        self.collider.points().iter().map(|p| *p * self.dim).collect()
    }

    /// Is `point` strictly inside this body's axis-aligned `dim` box?
    pub fn contains(&self, point: Vec2) -> bool {
        Narrowphase::overlap_point_box(point, self.pos(), self.dim)
    }

    // --- Motion ------------------------------------------------------------

    /// Current velocity; always zero for an immovable body.
    pub fn vel(&self) -> Vec2 {
        if self.is_static() { Vec2::ZERO } else { self.vel }
    }

    /// Ignored while the body is immovable.
    pub fn set_vel(&mut self, vel: Vec2) -> Result<(), PhysicsError> {
        if !vel.is_finite() {
            return Err(PhysicsError::NonFinite("body velocity"));
        }
        if !self.is_static() {
            self.vel = vel;
        }
        Ok(())
    }

    pub fn add_velocity(&mut self, delta: Vec2) -> Result<(), PhysicsError> {
        self.set_vel(self.vel + delta)
    }

    pub fn freeze_velocity(&mut self) {
        self.vel = Vec2::ZERO;
    }

    /// Apply an impulse, scaled by this body's inverse mass.
    pub fn push(&mut self, impulse: Vec2) {
        match self.mass {
            Mass::Finite { inv_mass } => self.vel += impulse * inv_mass,
            Mass::Infinite => self.vel = Vec2::ZERO,
        }
    }

    pub(crate) fn apply_gravity(&mut self, gravity: Vec2, dt: f32) {
        if !self.is_static() {
            self.vel += gravity * dt;
        }
    }

    /// Advance position by `vel * dt`; immovable bodies just lose any stray velocity.
    pub fn integrate(&mut self, dt: f32) {
        if self.is_static() {
            self.freeze_velocity();
            return;
        }
        self.transform.pos += self.vel * dt;
    }

    // --- Mass and material -------------------------------------------------

    pub fn mass(&self) -> Mass {
        self.mass
    }

    pub fn inv_mass(&self) -> f32 {
        self.mass.inv_mass()
    }

    /// Set a finite mass, making the body movable. A formerly static body starts at rest.
    pub fn set_mass(&mut self, mass: f32) -> Result<(), PhysicsError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(PhysicsError::InvalidMass(mass));
        }
        if self.is_static() {
            self.vel = Vec2::ZERO;
        }
        self.mass = Mass::Finite {
            inv_mass: 1.0 / mass,
        };
        Ok(())
    }

    pub fn make_static(&mut self) {
        self.mass = Mass::Infinite;
        self.vel = Vec2::ZERO;
    }

    pub fn is_static(&self) -> bool {
        self.mass.is_infinite()
    }

    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    /// Clamped to `0..=1`.
    pub fn set_restitution(&mut self, restitution: f32) -> Result<(), PhysicsError> {
        if !restitution.is_finite() {
            return Err(PhysicsError::NonFinite("restitution"));
        }
        self.restitution = restitution.clamp(0.0, 1.0);
        Ok(())
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// Negative values are treated as zero.
    pub fn set_friction(&mut self, friction: f32) -> Result<(), PhysicsError> {
        if !friction.is_finite() {
            return Err(PhysicsError::NonFinite("friction"));
        }
        self.friction = friction.max(0.0);
        Ok(())
    }

    pub fn is_trigger(&self) -> bool {
        self.trigger
    }

    pub fn set_trigger(&mut self, trigger: bool) {
        self.trigger = trigger;
    }

    // --- Tags --------------------------------------------------------------

    /// Identity tags this body advertises to whatever it touches. Always contains `"body"`.
    pub fn tags(&self) -> &HashSet<String> {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.tags.insert(tag.into());
    }

    // --- Collision ---------------------------------------------------------

    /// Separating-axis test against `other`.
    ///
    /// The returned manifold's normal points from `other` toward `self`.
    pub fn check_collision(&self, other: &Body) -> Option<Manifold> {
        Narrowphase::overlap_bodies(self, other)
    }
}
