//! satbox: 2D convex-polygon rigid bodies with separating-axis detection and impulse resolution

pub mod types;
pub mod error;
pub mod api;
pub mod collider;
pub mod body;
pub mod narrowphase;
pub mod collision;
pub mod engine;

pub use crate::types::*;
pub use crate::api::*;
pub use crate::error::PhysicsError;
pub use crate::collider::{Collider, ColliderRegistry};
pub use crate::body::Body;
pub use crate::collision::Collision;
pub use crate::engine::PhysicsEngine;
