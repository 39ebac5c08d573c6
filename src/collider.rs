use glam::Vec2;

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::PhysicsError;

/// Name under which the canonical unit box is synthesized on demand.
pub const BOX: &str = "box";

/// Convex polygon shape, shared between bodies and never mutated after construction.
///
/// Points are fractional offsets from the shape's center; a body scales them by its
/// dimensions. The canonical box spans ±0.5 on each axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Collider {
    points: Vec<Vec2>,
    normals: Vec<Vec2>,
}

impl Collider {
    /// Build a collider from its vertices, in either winding order.
    ///
    /// One unit outward normal is computed per edge `(points[i], points[(i + 1) % n])`.
    pub fn new(points: Vec<Vec2>) -> Result<Self, PhysicsError> {
        let n = points.len();
        if n < 3 {
            return Err(PhysicsError::TooFewPoints(n));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(PhysicsError::NonFinite("collider points"));
        }

        let centroid = points.iter().copied().sum::<Vec2>() / n as f32;
        let mut normals = Vec::with_capacity(n);
        for i in 0..n {
            let a = points[i];
            let b = points[(i + 1) % n];
            let edge = b - a;
            if edge.length_squared() <= f32::EPSILON * f32::EPSILON {
                return Err(PhysicsError::DegenerateEdge(i));
            }
            let mut normal = Vec2::new(edge.y, -edge.x).normalize();
            // Flip toward the outside; the centroid of a convex polygon is interior.
            let side = normal.dot((a + b) * 0.5 - centroid);
            if side.abs() <= f32::EPSILON {
                return Err(PhysicsError::DegenerateEdge(i));
            }
            if side < 0.0 {
                normal = -normal;
            }
            normals.push(normal);
        }

        Ok(Self { points, normals })
    }

    /// The canonical unit box: corners at (±0.5, ±0.5).
    pub fn unit_box() -> Self {
        let points = vec![
            Vec2::new(-0.5, -0.5),
            Vec2::new(-0.5, 0.5),
            Vec2::new(0.5, 0.5),
            Vec2::new(0.5, -0.5),
        ];
        let normals = vec![
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, -1.0),
        ];
        Self { points, normals }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Unit outward edge normals; `normals().len() == points().len()`.
    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    /// Project every vertex, scaled by `dim`, onto `axis` and return `(min, max)`.
    ///
    /// Both bounds start at zero, so the interval always brackets the shape's center.
    pub fn project(&self, axis: Vec2, dim: Vec2) -> (f32, f32) {
        let mut min = 0.0f32;
        let mut max = 0.0f32;
        for p in &self.points {
            let d = (*p * dim).dot(axis);
            if d > max {
                max = d;
            }
            if d < min {
                min = d;
            }
        }
        (min, max)
    }
}

/// Name → shape lookup, owned by whoever constructs bodies.
#[derive(Clone, Debug, Default)]
pub struct ColliderRegistry {
    colliders: HashMap<String, Arc<Collider>>,
}

impl ColliderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a shape by name.
    ///
    /// `"box"` is synthesized and registered the first time it is asked for; any other
    /// unregistered name yields `None`.
    pub fn get(&mut self, name: &str) -> Option<Arc<Collider>> {
        if name == BOX && !self.has_collider(BOX) {
            log::debug!("synthesizing default {BOX:?} collider");
            self.insert(BOX, Collider::unit_box());
        }
        self.colliders.get(name).cloned()
    }

    /// Like [`get`](Self::get), but an unknown name is an error.
    pub fn require(&mut self, name: &str) -> Result<Arc<Collider>, PhysicsError> {
        self.get(name)
            .ok_or_else(|| PhysicsError::UnknownCollider(name.to_owned()))
    }

    pub fn has_collider(&self, name: &str) -> bool {
        self.colliders.contains_key(name)
    }

    /// Build a collider from `points` and store it under `name`, replacing any previous shape.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        points: Vec<Vec2>,
    ) -> Result<Arc<Collider>, PhysicsError> {
        let collider = Collider::new(points)?;
        Ok(self.insert(name, collider))
    }

    /// Store an already built collider under `name`.
    pub fn insert(&mut self, name: impl Into<String>, collider: Collider) -> Arc<Collider> {
        let shared = Arc::new(collider);
        self.colliders.insert(name.into(), Arc::clone(&shared));
        shared
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_box_is_identity_stable() {
        let mut reg = ColliderRegistry::new();
        assert!(!reg.has_collider("box"));
        let a = reg.get("box").unwrap();
        let b = reg.get("box").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(reg.has_collider("box"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_box_normals_unit_and_distinct() {
        let mut reg = ColliderRegistry::new();
        let b = reg.get("box").unwrap();
        assert_eq!(b.normals().len(), 4);
        for (i, n) in b.normals().iter().enumerate() {
            assert!((n.length() - 1.0).abs() < 1e-6);
            for m in &b.normals()[i + 1..] {
                assert!(!approx(*n, *m));
            }
        }
    }

    #[test]
    fn test_computed_box_matches_canonical() {
        let built = Collider::new(Collider::unit_box().points().to_vec()).unwrap();
        let canonical = Collider::unit_box();
        for (n, m) in built.normals().iter().zip(canonical.normals()) {
            assert!(approx(*n, *m), "{n} != {m}");
        }
    }

    #[test]
    fn test_unknown_name_is_absent() {
        let mut reg = ColliderRegistry::new();
        assert!(reg.get("triangle").is_none());
        assert_eq!(
            reg.require("triangle"),
            Err(PhysicsError::UnknownCollider("triangle".into()))
        );
        assert!(reg.is_empty());
    }

    #[test]
    fn test_register_then_get_round_trip() {
        let mut reg = ColliderRegistry::new();
        let points = vec![
            Vec2::new(0.0, 0.5),
            Vec2::new(0.5, -0.5),
            Vec2::new(-0.5, -0.5),
        ];
        let made = reg.register("wedge", points.clone()).unwrap();
        let got = reg.get("wedge").unwrap();
        assert_eq!(got.points(), points.as_slice());
        assert_eq!(got.normals(), made.normals());
    }

    #[test]
    fn test_triangle_normals_point_outward() {
        let tri = Collider::new(vec![
            Vec2::new(0.0, 0.5),
            Vec2::new(0.5, -0.5),
            Vec2::new(-0.5, -0.5),
        ])
        .unwrap();
        // Bottom edge faces straight down regardless of winding.
        assert!(approx(tri.normals()[1], Vec2::new(0.0, -1.0)));
        for (i, n) in tri.normals().iter().enumerate() {
            let mid = (tri.points()[i] + tri.points()[(i + 1) % 3]) * 0.5;
            assert!(n.dot(mid) > 0.0);
        }
    }

    #[test]
    fn test_invalid_polygons_rejected() {
        assert_eq!(
            Collider::new(vec![Vec2::ZERO, Vec2::X]),
            Err(PhysicsError::TooFewPoints(2))
        );
        assert_eq!(
            Collider::new(vec![Vec2::ZERO, Vec2::ZERO, Vec2::X]),
            Err(PhysicsError::DegenerateEdge(0))
        );
        assert_eq!(
            Collider::new(vec![Vec2::ZERO, Vec2::X, Vec2::new(f32::NAN, 1.0)]),
            Err(PhysicsError::NonFinite("collider points"))
        );
    }

    #[test]
    fn test_project_scales_and_brackets_zero() {
        let b = Collider::unit_box();
        let (min, max) = b.project(Vec2::X, Vec2::new(4.0, 2.0));
        assert_eq!((min, max), (-2.0, 2.0));
        let (min, max) = b.project(Vec2::Y, Vec2::new(4.0, 2.0));
        assert_eq!((min, max), (-1.0, 1.0));

        // Shape entirely on one side of its origin still brackets zero.
        let offset = Collider::new(vec![
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(2.0, 2.0),
        ])
        .unwrap();
        let (min, max) = offset.project(Vec2::X, Vec2::ONE);
        assert_eq!(min, 0.0);
        assert_eq!(max, 2.0);
    }
}
