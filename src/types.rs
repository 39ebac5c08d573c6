use glam::Vec2;

use std::collections::HashSet;

/// Tag every body advertises, in addition to any user tags.
pub const BODY_TAG: &str = "body";

/// Index of a body inside the engine that owns it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyHandle(pub u32);

impl BodyHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Placement of a body. Owned by exactly one [`Body`](crate::Body).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Transform {
    pub pos: Vec2,
    /// Orientation placeholder; bodies do not rotate, so this is never read.
    pub angle: f32,
}

impl Transform {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            angle: 0.0,
        }
    }
}

/// How a body responds to impulses.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Mass {
    /// Movable body with the given inverse mass (`1 / mass`).
    Finite { inv_mass: f32 },
    /// Immovable ("static") body. Impulses and gravity never change it.
    Infinite,
}

impl Mass {
    /// Inverse mass; zero for [`Mass::Infinite`].
    #[inline]
    pub fn inv_mass(self) -> f32 {
        match self {
            Mass::Finite { inv_mass } => inv_mass,
            Mass::Infinite => 0.0,
        }
    }

    #[inline]
    pub fn is_infinite(self) -> bool {
        matches!(self, Mass::Infinite)
    }
}

impl Default for Mass {
    fn default() -> Self {
        Mass::Finite { inv_mass: 1.0 }
    }
}

/// Result of casting one body's edge normals against a pair.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Manifold {
    /// Unit axis pointing from the other body toward this one.
    pub normal: Vec2,
    /// Penetration depth along `normal` (≥ 0).
    pub depth: f32,
}

/// What one body touched during the last completed step.
///
/// The engine builds a fresh report for every body on every step, so nothing here
/// outlives the step that produced it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactReport {
    tags: HashSet<String>,
    normals: Vec<Vec2>,
}

impl ContactReport {
    /// Did this body touch anything advertising `tag`?
    pub fn is_colliding_with(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Tags of every body touched this step.
    pub fn tags(&self) -> &HashSet<String> {
        &self.tags
    }

    /// Contact normals, each pointing away from the body that was touched.
    ///
    /// Both bodies of a pair get the same axis with opposite signs, so the second body's
    /// normal is the negated first one rather than a normal pointing into the contact.
    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.normals.is_empty()
    }

    pub(crate) fn record(&mut self, other_tags: &HashSet<String>, normal: Vec2) {
        self.tags.extend(other_tags.iter().cloned());
        if !self.normals.contains(&normal) {
            self.normals.push(normal);
        }
    }
}

/// Engine-level configuration.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Acceleration applied to every movable body, in units per second squared.
    pub gravity: Vec2,
    /// Fraction of the penetration depth removed per collision by direct translation.
    /// Doubled when only one of the two bodies can move.
    pub move_constant: f32,
    /// Cap friction impulses so they can stop, but never reverse, tangential sliding.
    pub clamp_friction: bool,
    /// Enable internal timing instrumentation (adds small overhead when true).
    pub enable_timing: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::ZERO,
            move_constant: 0.5,
            clamp_friction: true,
            enable_timing: false,
        }
    }
}

/// Counters for the last completed step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub bodies: usize,
    /// Unordered pairs handed to the narrow phase (n*(n-1)/2).
    pub pairs_tested: usize,
    /// Pairs found overlapping, triggers included.
    pub contacts: usize,
    pub collisions_queued: usize,
    /// Queued collisions that actually applied a correction.
    pub collisions_solved: usize,
}

/// Timing breakdown for the last completed step.
#[derive(Copy, Clone, Debug, Default)]
pub struct EngineTiming {
    pub step_ms: f64,
    pub detect_ms: f64,
    pub solve_ms: f64,
    pub integrate_ms: f64,
}
