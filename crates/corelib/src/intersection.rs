//! Overlap and containment predicates between pairs of bounding shapes.
//!
//! Overlap is strict: shapes that only touch do not intersect. Box containment
//! and point containment are inclusive, while a circle or sphere must strictly
//! enclose another circle or sphere (`a.radius > distance + b.radius`).

use crate::bounds::{Aabb, Circle, Line2D, Ray3D, Rectangle, Sphere};
use crate::math::scalar::FLOAT_EPSILON;
use crate::math::{Vector2f, Vector3f};

pub trait Intersects<Rhs = Self> {
    fn intersects(&self, other: &Rhs) -> bool;
}

pub trait Contains<Rhs = Self> {
    /// `true` when `other` lies entirely inside `self`.
    fn contains(&self, other: &Rhs) -> bool;
}

#[inline]
pub fn intersects<A: Intersects<B>, B>(a: &A, b: &B) -> bool {
    a.intersects(b)
}

#[inline]
pub fn contains<A: Contains<B>, B>(a: &A, b: &B) -> bool {
    a.contains(b)
}

impl Intersects for Rectangle {
    fn intersects(&self, o: &Rectangle) -> bool {
        self.min.x < o.max.x && self.max.x > o.min.x && self.min.y < o.max.y && self.max.y > o.min.y
    }
}

impl Contains for Rectangle {
    fn contains(&self, o: &Rectangle) -> bool {
        !self.is_empty()
            && o.min.x >= self.min.x
            && o.max.x <= self.max.x
            && o.min.y >= self.min.y
            && o.max.y <= self.max.y
    }
}

impl Intersects<Circle> for Rectangle {
    fn intersects(&self, c: &Circle) -> bool {
        if self.is_empty() || c.is_empty() {
            return false;
        }
        let closest = c.center.clamp(self.min, self.max);
        (closest - c.center).length_squared() < c.radius * c.radius
    }
}

impl Intersects<Rectangle> for Circle {
    fn intersects(&self, r: &Rectangle) -> bool {
        r.intersects(self)
    }
}

impl Contains<Circle> for Rectangle {
    fn contains(&self, c: &Circle) -> bool {
        let extent = Vector2f::splat(c.radius);
        !c.is_empty()
            && self.contains_point(c.center - extent)
            && self.contains_point(c.center + extent)
    }
}

impl Contains<Rectangle> for Circle {
    fn contains(&self, r: &Rectangle) -> bool {
        !r.is_empty() && r.corners().iter().all(|p| self.contains_point(*p))
    }
}

impl Intersects for Circle {
    fn intersects(&self, o: &Circle) -> bool {
        if self.is_empty() || o.is_empty() {
            return false;
        }
        let reach = self.radius + o.radius;
        (self.center - o.center).length_squared() < reach * reach
    }
}

impl Contains for Circle {
    fn contains(&self, o: &Circle) -> bool {
        !self.is_empty() && !o.is_empty() && self.radius > self.center.distance(o.center) + o.radius
    }
}

impl Intersects for Aabb {
    fn intersects(&self, o: &Aabb) -> bool {
        self.min.x < o.max.x
            && self.max.x > o.min.x
            && self.min.y < o.max.y
            && self.max.y > o.min.y
            && self.min.z < o.max.z
            && self.max.z > o.min.z
    }
}

impl Contains for Aabb {
    fn contains(&self, o: &Aabb) -> bool {
        !self.is_empty()
            && o.min.x >= self.min.x
            && o.max.x <= self.max.x
            && o.min.y >= self.min.y
            && o.max.y <= self.max.y
            && o.min.z >= self.min.z
            && o.max.z <= self.max.z
    }
}

impl Intersects<Sphere> for Aabb {
    fn intersects(&self, s: &Sphere) -> bool {
        if self.is_empty() || s.is_empty() {
            return false;
        }
        let closest = s.center.clamp(self.min, self.max);
        (closest - s.center).length_squared() < s.radius * s.radius
    }
}

impl Intersects<Aabb> for Sphere {
    fn intersects(&self, b: &Aabb) -> bool {
        b.intersects(self)
    }
}

impl Contains<Sphere> for Aabb {
    fn contains(&self, s: &Sphere) -> bool {
        let extent = Vector3f::splat(s.radius);
        !s.is_empty()
            && self.contains_point(s.center - extent)
            && self.contains_point(s.center + extent)
    }
}

impl Contains<Aabb> for Sphere {
    fn contains(&self, b: &Aabb) -> bool {
        !b.is_empty() && b.corners().iter().all(|p| self.contains_point(*p))
    }
}

impl Intersects for Sphere {
    fn intersects(&self, o: &Sphere) -> bool {
        if self.is_empty() || o.is_empty() {
            return false;
        }
        let reach = self.radius + o.radius;
        (self.center - o.center).length_squared() < reach * reach
    }
}

impl Contains for Sphere {
    fn contains(&self, o: &Sphere) -> bool {
        !self.is_empty() && !o.is_empty() && self.radius > self.center.distance(o.center) + o.radius
    }
}

/// Crossing point of two segments. Both segment parameters must lie in the
/// open interval `(0, 1)`; parallel segments never cross.
pub fn line_intersection(a: &Line2D, b: &Line2D) -> Option<Vector2f> {
    let r = a.direction();
    let s = b.direction();
    let denom = r.perp_dot(s);
    if denom == 0.0 {
        return None;
    }

    let qp = b.start - a.start;
    let t = qp.perp_dot(s) / denom;
    let u = qp.perp_dot(r) / denom;
    if t > 0.0 && t < 1.0 && u > 0.0 && u < 1.0 {
        Some(a.start + r * t)
    } else {
        None
    }
}

/// Meeting point of two 3D segments, using the closest points of their lines.
/// Skew lines (closest distance above tolerance) do not meet.
pub fn ray_intersection(a: &Ray3D, b: &Ray3D) -> Option<Vector3f> {
    let d1 = a.direction();
    let d2 = b.direction();
    let r = a.start - b.start;

    let aa = d1.dot(d1);
    let ee = d2.dot(d2);
    let bb = d1.dot(d2);
    let c = d1.dot(r);
    let f = d2.dot(r);

    let denom = aa * ee - bb * bb;
    if denom <= FLOAT_EPSILON * aa * ee {
        return None;
    }

    let s = (bb * f - c * ee) / denom;
    let t = (aa * f - bb * c) / denom;
    if !(s > 0.0 && s < 1.0 && t > 0.0 && t < 1.0) {
        return None;
    }

    let p = a.point_at(s);
    let q = b.point_at(t);
    let tolerance = 1e-4 * aa.max(ee).max(1.0).sqrt();
    if p.distance(q) > tolerance {
        return None;
    }
    Some((p + q) * 0.5)
}

impl Intersects for Line2D {
    fn intersects(&self, o: &Line2D) -> bool {
        line_intersection(self, o).is_some()
    }
}

impl Contains for Line2D {
    fn contains(&self, o: &Line2D) -> bool {
        point_on_segment_2d(self, o.start) && point_on_segment_2d(self, o.end)
    }
}

impl Intersects for Ray3D {
    fn intersects(&self, o: &Ray3D) -> bool {
        ray_intersection(self, o).is_some()
    }
}

impl Contains for Ray3D {
    fn contains(&self, o: &Ray3D) -> bool {
        point_on_segment_3d(self, o.start) && point_on_segment_3d(self, o.end)
    }
}

fn point_on_segment_2d(line: &Line2D, p: Vector2f) -> bool {
    let r = line.direction();
    let len_sq = r.length_squared();
    let rel = p - line.start;
    if len_sq == 0.0 {
        return rel.length_squared() == 0.0;
    }
    if r.perp_dot(rel).abs() > FLOAT_EPSILON * len_sq.max(1.0) {
        return false;
    }
    let t = rel.dot(r) / len_sq;
    (0.0..=1.0).contains(&t)
}

fn point_on_segment_3d(ray: &Ray3D, p: Vector3f) -> bool {
    let d = ray.direction();
    let len_sq = d.length_squared();
    let rel = p - ray.start;
    if len_sq == 0.0 {
        return rel.length_squared() == 0.0;
    }
    if d.cross(rel).length() > FLOAT_EPSILON * len_sq.max(1.0) {
        return false;
    }
    let t = rel.dot(d) / len_sq;
    (0.0..=1.0).contains(&t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Rectangle {
        Rectangle::new(Vector2f::new(x0, y0), Vector2f::new(x1, y1))
    }

    fn aabb(min: f32, max: f32) -> Aabb {
        Aabb::new(Vector3f::splat(min), Vector3f::splat(max))
    }

    #[test]
    fn containment_strictness_asymmetry() {
        let c = Circle::new(Vector2f::ZERO, 5.0);
        assert!(!contains(&c, &c));
        let r = rect(0.0, 0.0, 5.0, 5.0);
        assert!(contains(&r, &r));

        let s = Sphere::new(Vector3f::ZERO, 5.0);
        assert!(!contains(&s, &s));
        let b = aabb(0.0, 5.0);
        assert!(contains(&b, &b));
    }

    #[test]
    fn circle_contains_smaller_circle() {
        let big = Circle::new(Vector2f::ZERO, 5.0);
        assert!(contains(&big, &Circle::new(Vector2f::new(1.0, 0.0), 3.9)));
        assert!(!contains(&big, &Circle::new(Vector2f::new(1.0, 0.0), 4.0)));
        assert!(contains(&Circle::MAXIMIZED, &big));
        assert!(!contains(&Circle::EMPTY, &big));
    }

    #[test]
    fn touching_boxes_do_not_intersect() {
        let a = rect(0.0, 0.0, 1.0, 1.0);
        assert!(!intersects(&a, &rect(1.0, 0.0, 2.0, 1.0)));
        assert!(intersects(&a, &rect(0.5, 0.5, 2.0, 2.0)));
        assert!(!intersects(&a, &Rectangle::EMPTY));
        assert!(intersects(&a, &Rectangle::MAXIMIZED));

        assert!(!intersects(&aabb(0.0, 1.0), &aabb(1.0, 2.0)));
        assert!(intersects(&aabb(0.0, 1.0), &aabb(0.9, 2.0)));
    }

    #[test]
    fn circles_and_spheres_overlap() {
        let a = Circle::new(Vector2f::ZERO, 1.0);
        assert!(intersects(&a, &Circle::new(Vector2f::new(1.5, 0.0), 1.0)));
        assert!(!intersects(&a, &Circle::new(Vector2f::new(2.0, 0.0), 1.0)));
        assert!(!intersects(&a, &Circle::EMPTY));

        let s = Sphere::new(Vector3f::ZERO, 1.0);
        assert!(intersects(&s, &Sphere::new(Vector3f::new(0.0, 1.9, 0.0), 1.0)));
        assert!(!intersects(&s, &Sphere::new(Vector3f::new(0.0, 2.0, 0.0), 1.0)));
    }

    #[test]
    fn mixed_box_and_round_shapes() {
        let r = rect(0.0, 0.0, 4.0, 4.0);
        let inside = Circle::new(Vector2f::new(2.0, 2.0), 2.0);
        let corner = Circle::new(Vector2f::new(5.0, 5.0), 1.0);
        assert!(intersects(&r, &inside));
        assert!(intersects(&inside, &r));
        assert!(!intersects(&r, &corner));
        assert!(contains(&r, &inside));
        assert!(!contains(&r, &Circle::new(Vector2f::new(2.0, 2.0), 2.1)));
        assert!(contains(&Circle::new(Vector2f::new(2.0, 2.0), 3.0), &r));
        assert!(!contains(&inside, &r));

        let b = aabb(-1.0, 1.0);
        let s = Sphere::new(Vector3f::ZERO, 1.0);
        assert!(contains(&b, &s));
        assert!(intersects(&s, &b));
        assert!(!contains(&s, &b));
        assert!(contains(&Sphere::new(Vector3f::ZERO, 2.0), &b));
        assert!(!intersects(&b, &Sphere::new(Vector3f::new(3.0, 0.0, 0.0), 1.0)));
    }

    #[test]
    fn crossing_lines() {
        let a = Line2D::new(Vector2f::new(0.0, 0.0), Vector2f::new(2.0, 2.0));
        let b = Line2D::new(Vector2f::new(0.0, 2.0), Vector2f::new(2.0, 0.0));
        assert!(intersects(&a, &b));
        assert!(a.intersection(&b).compare(Vector2f::new(1.0, 1.0), 1e-6));
    }

    #[test]
    fn non_crossing_lines_return_sentinel() {
        let a = Line2D::new(Vector2f::ZERO, Vector2f::new(1.0, 0.0));
        let parallel = Line2D::new(Vector2f::new(0.0, 1.0), Vector2f::new(1.0, 1.0));
        let short = Line2D::new(Vector2f::new(2.0, -1.0), Vector2f::new(2.0, 1.0));
        // endpoint touch is outside the open parameter range
        let touching = Line2D::new(Vector2f::new(1.0, 0.0), Vector2f::new(1.0, 1.0));
        for other in [parallel, short, touching] {
            assert!(!intersects(&a, &other));
            assert_eq!(a.intersection(&other), Vector2f::INFINITY);
        }
    }

    #[test]
    fn line_contains_sub_segment() {
        let a = Line2D::new(Vector2f::ZERO, Vector2f::new(4.0, 4.0));
        assert!(contains(&a, &Line2D::new(Vector2f::new(1.0, 1.0), Vector2f::new(3.0, 3.0))));
        assert!(contains(&a, &a));
        assert!(!contains(&a, &Line2D::new(Vector2f::new(1.0, 1.0), Vector2f::new(5.0, 5.0))));
        assert!(!contains(&a, &Line2D::new(Vector2f::new(1.0, 1.0), Vector2f::new(2.0, 3.0))));
    }

    #[test]
    fn rays_meet_or_not() {
        let a = Ray3D::new(Vector3f::new(-1.0, 0.0, 0.0), Vector3f::new(1.0, 0.0, 0.0));
        let b = Ray3D::new(Vector3f::new(0.0, -1.0, 0.0), Vector3f::new(0.0, 1.0, 0.0));
        assert!(intersects(&a, &b));
        assert!(a.intersection(&b).compare(Vector3f::ZERO, 1e-6));

        let skew = Ray3D::new(Vector3f::new(0.0, -1.0, 1.0), Vector3f::new(0.0, 1.0, 1.0));
        assert!(!intersects(&a, &skew));
        assert_eq!(a.intersection(&skew), Vector3f::INFINITY);

        let parallel = Ray3D::new(Vector3f::new(-1.0, 1.0, 0.0), Vector3f::new(1.0, 1.0, 0.0));
        assert_eq!(a.intersection(&parallel), Vector3f::INFINITY);

        let inner = Ray3D::new(Vector3f::new(-0.5, 0.0, 0.0), Vector3f::new(0.5, 0.0, 0.0));
        assert!(contains(&a, &inner));
        assert!(!contains(&inner, &a));
    }
}
