use glam::Vec2;

use crate::body::Body;
use crate::collision::Collision;
use crate::error::PhysicsError;
use crate::types::*;

/// Public API contract for the rigid-body engine.
pub trait PhysicsEngineApi {
    /// Construct a new engine with the given configuration.
    fn new(cfg: EngineConfig) -> Self
    where
        Self: Sized;

    // --- Bodies ------------------------------------------------------------

    /// Take ownership of a body and return its handle.
    fn add_body(&mut self, body: Body) -> BodyHandle;

    fn body(&self, handle: BodyHandle) -> Option<&Body>;

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body>;

    // --- Global parameters -------------------------------------------------

    fn set_gravity(&mut self, x: f32, y: f32);

    fn gravity(&self) -> Vec2;

    /// Positional correction bias used by [`Collision::correct_positions`].
    fn move_constant(&self) -> f32;

    // --- Stepping ----------------------------------------------------------

    /// Queue a collision for resolution during the current step.
    fn add_collision(&mut self, collision: Collision);

    /// Advance the simulation by `dt` seconds.
    fn update(&mut self, dt: f32) -> Result<(), PhysicsError>;

    // --- Queries -----------------------------------------------------------

    /// Contacts recorded for `handle` during the last completed step.
    fn contacts(&self, handle: BodyHandle) -> Option<&ContactReport>;

    /// Did `handle` touch a body advertising `tag` during the last step?
    fn is_colliding_with(&self, handle: BodyHandle, tag: &str) -> bool;

    /// Hand every body's outline to a renderer.
    fn debug_draw(&self, draw: &mut dyn DebugDraw);
}

/// Separating-axis primitives.
pub trait NarrowphaseApi {
    /// Test `axes` as candidate separating axes for the pair.
    ///
    /// Returns `None` as soon as one axis separates the shapes, otherwise the axis of
    /// least penetration, oriented from `other` toward `this`.
    fn cast_normals(this: &Body, other: &Body, axes: &[Vec2]) -> Option<Manifold>;

    /// Full pair test over both bodies' normals. The manifold is oriented from `b` toward `a`.
    fn overlap_bodies(a: &Body, b: &Body) -> Option<Manifold>;

    /// Strict containment of `p` in the axis-aligned box `center ± dim / 2`.
    fn overlap_point_box(p: Vec2, center: Vec2, dim: Vec2) -> bool;
}

/// Outline sink for debug rendering.
pub trait DebugDraw {
    /// `points` are the collider's vertices scaled by the body's dimensions, relative to `center`.
    fn outline(&mut self, center: Vec2, points: &[Vec2]);
}
