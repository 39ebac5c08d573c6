use glam::Vec2;

use crate::api::NarrowphaseApi;
use crate::body::Body;
use crate::types::*;

/// Separating-axis tests for convex bodies.
pub struct Narrowphase;

impl NarrowphaseApi for Narrowphase {
    fn cast_normals(this: &Body, other: &Body, axes: &[Vec2]) -> Option<Manifold> {
        let distance = other.pos() - this.pos();
        let mut best: Option<Manifold> = None;

        for &n in axes {
            let projection = distance.dot(n);
            let (a_min, a_max) = this.collider().project(n, this.dim());
            let (b_min, b_max) = other.collider().project(n, other.dim());

            // Reach of each shape toward the other along n. Both intervals bracket 0,
            // so the side `other` lies on picks which bound of each interval faces it.
            let (reach, side): (f32, f32) = if projection < 0.0 {
                (a_min.abs() + b_max.abs(), -1.0)
            } else {
                (b_min.abs() + a_max.abs(), 1.0)
            };

            let projection = projection.abs();
            if projection >= reach {
                return None;
            }

            let depth = (reach - projection).abs();
            if best.is_none_or(|m| depth < m.depth) {
                best = Some(Manifold {
                    normal: n * -side,
                    depth,
                });
            }
        }
        best
    }

    fn overlap_bodies(a: &Body, b: &Body) -> Option<Manifold> {
        let from_b = Self::cast_normals(a, b, b.collider().normals())?;
        let from_a = Self::cast_normals(a, b, a.collider().normals())?;
        Some(if from_a.depth < from_b.depth {
            from_a
        } else {
            from_b
        })
    }

    fn overlap_point_box(p: Vec2, center: Vec2, dim: Vec2) -> bool {
        let half = dim * 0.5;
        let min = center - half;
        let max = center + half;
        p.x > min.x && p.x < max.x && p.y > min.y && p.y < max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::{Collider, ColliderRegistry};
    use std::sync::Arc;

    fn boxed(x: f32, y: f32, w: f32, h: f32) -> Body {
        Body::new(Transform::new(x, y), Arc::new(Collider::unit_box()), w, h).unwrap()
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_overlap_boxes_basic() {
        let a = boxed(0.0, 0.0, 1.0, 1.0);
        let b = boxed(0.8, 0.0, 1.0, 1.0);
        let m = Narrowphase::overlap_bodies(&a, &b).unwrap();
        assert!((m.depth - 0.2).abs() < 1e-5);
        // Points from b into a.
        assert!(close(m.normal, Vec2::new(-1.0, 0.0)));
    }

    #[test]
    fn test_overlap_is_antisymmetric() {
        let a = boxed(0.0, 0.0, 2.0, 1.0);
        let b = boxed(0.3, 0.9, 1.0, 1.0);
        let ab = Narrowphase::overlap_bodies(&a, &b).unwrap();
        let ba = Narrowphase::overlap_bodies(&b, &a).unwrap();
        assert!((ab.depth - ba.depth).abs() < 1e-6);
        assert!(close(ab.normal, -ba.normal));
        // Shallowest along y: 0.9 apart with reach 1.0.
        assert!(close(ab.normal, Vec2::new(0.0, -1.0)));
        assert!((ab.depth - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_touching_is_separated() {
        let a = boxed(0.0, 0.0, 1.0, 1.0);
        let b = boxed(1.0, 0.0, 1.0, 1.0);
        assert!(Narrowphase::overlap_bodies(&a, &b).is_none());
    }

    #[test]
    fn test_diagonal_separation() {
        let a = boxed(0.0, 0.0, 1.0, 1.0);
        let b = boxed(1.2, 1.2, 1.0, 1.0);
        assert!(Narrowphase::overlap_bodies(&a, &b).is_none());
    }

    #[test]
    fn test_cast_short_circuits_on_one_axis() {
        let a = boxed(0.0, 0.0, 1.0, 1.0);
        let b = boxed(0.0, 3.0, 1.0, 1.0);
        // x overlaps fully, y separates.
        assert!(Narrowphase::cast_normals(&a, &b, &[Vec2::X]).is_some());
        assert!(Narrowphase::cast_normals(&a, &b, &[Vec2::X, Vec2::Y]).is_none());
    }

    #[test]
    fn test_triangle_resting_on_box() {
        let mut reg = ColliderRegistry::new();
        let tri = reg
            .register(
                "wedge",
                vec![
                    Vec2::new(0.0, 0.5),
                    Vec2::new(0.5, -0.5),
                    Vec2::new(-0.5, -0.5),
                ],
            )
            .unwrap();
        let ground = boxed(0.0, 0.0, 2.0, 2.0);
        let wedge = Body::new(Transform::new(0.0, 1.8), tri, 2.0, 2.0).unwrap();
        let m = Narrowphase::overlap_bodies(&ground, &wedge).unwrap();
        assert!((m.depth - 0.2).abs() < 1e-5);
        assert!(close(m.normal, Vec2::new(0.0, -1.0)));
    }

    #[test]
    fn test_both_axis_sets_needed() {
        let mut reg = ColliderRegistry::new();
        let wedge = reg
            .register(
                "corner",
                vec![
                    Vec2::new(0.5, 0.5),
                    Vec2::new(-0.5, 0.5),
                    Vec2::new(0.5, -0.5),
                ],
            )
            .unwrap();
        let square = boxed(0.0, 0.0, 1.0, 1.0);
        let wedge = Body::new(Transform::new(0.9, 0.9), wedge, 1.0, 1.0).unwrap();

        // The box's own axes all overlap; only the wedge's hypotenuse separates them.
        let m = Narrowphase::cast_normals(&square, &wedge, square.collider().normals()).unwrap();
        assert!(close(m.normal, Vec2::new(-1.0, 0.0)));
        assert!((m.depth - 0.1).abs() < 1e-5);
        assert!(Narrowphase::overlap_bodies(&square, &wedge).is_none());
        assert!(Narrowphase::overlap_bodies(&wedge, &square).is_none());
    }

    #[test]
    fn test_equal_depth_prefers_other_bodys_axes() {
        let mut reg = ColliderRegistry::new();
        // Same square as the canonical box, but its first edge is the bottom one.
        let shifted = reg
            .register(
                "shifted_box",
                vec![
                    Vec2::new(0.5, -0.5),
                    Vec2::new(-0.5, -0.5),
                    Vec2::new(-0.5, 0.5),
                    Vec2::new(0.5, 0.5),
                ],
            )
            .unwrap();
        assert_eq!(shifted.normals()[0], Vec2::new(0.0, -1.0));

        let a = boxed(0.0, 0.0, 1.0, 1.0);
        let b = Body::new(Transform::new(0.5, 0.5), shifted, 1.0, 1.0).unwrap();

        let from_b = Narrowphase::cast_normals(&a, &b, b.collider().normals()).unwrap();
        let from_a = Narrowphase::cast_normals(&a, &b, a.collider().normals()).unwrap();
        assert_eq!(from_a.depth, from_b.depth);
        assert!(close(from_a.normal, Vec2::new(-1.0, 0.0)));
        assert!(close(from_b.normal, Vec2::new(0.0, -1.0)));

        let m = Narrowphase::overlap_bodies(&a, &b).unwrap();
        assert_eq!(m, from_b);
        assert!((m.depth - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_point_box() {
        let c = Vec2::new(1.0, 1.0);
        let d = Vec2::new(2.0, 4.0);
        assert!(Narrowphase::overlap_point_box(Vec2::new(1.5, 2.5), c, d));
        assert!(!Narrowphase::overlap_point_box(Vec2::new(2.0, 1.0), c, d));
        assert!(!Narrowphase::overlap_point_box(Vec2::new(1.0, -1.5), c, d));
    }
}
