use glam::Vec2;

use crate::types::BodyHandle;

/// Errors reported while building shapes and bodies or stepping the engine.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum PhysicsError {
    /// Lookup of a collider name that was never registered (and is not `"box"`).
    #[error("unknown collider {0:?}")]
    UnknownCollider(String),

    /// A polygon needs at least three vertices.
    #[error("collider needs at least 3 points, got {0}")]
    TooFewPoints(usize),

    /// Edge starting at this vertex index has zero length.
    #[error("collider has a zero-length edge at index {0}")]
    DegenerateEdge(usize),

    #[error("non-finite value in {0}")]
    NonFinite(&'static str),

    /// Body sizes must be finite and strictly positive on both axes.
    #[error("body dimensions must be positive and finite, got {0}")]
    InvalidDimensions(Vec2),

    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f32),

    /// Time steps must be finite and non-negative.
    #[error("time step must be finite and non-negative, got {0}")]
    InvalidDelta(f32),

    #[error("no body with handle {0:?}")]
    InvalidHandle(BodyHandle),
}
