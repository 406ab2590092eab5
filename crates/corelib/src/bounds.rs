//! Bounding volumes and segments.
//!
//! An empty shape uses `+inf` for its minimum and `-inf` for its maximum (or a
//! `-inf` radius), so it contains and intersects nothing. A maximized shape is
//! the opposite and contains everything.

use crate::intersection;
use crate::math::scalar::INFTY;
use crate::math::{Vector2f, Vector3f};

/// Axis-aligned 2D rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub min: Vector2f,
    pub max: Vector2f,
}

impl Default for Rectangle {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Rectangle {
    pub const EMPTY: Self = Self::new(Vector2f::splat(INFTY), Vector2f::splat(-INFTY));
    pub const MAXIMIZED: Self = Self::new(Vector2f::splat(-INFTY), Vector2f::splat(INFTY));

    #[inline]
    pub const fn new(min: Vector2f, max: Vector2f) -> Self {
        Self { min, max }
    }

    pub fn from_center_extents(center: Vector2f, half_extents: Vector2f) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }

    pub fn maximize(&mut self) {
        *self = Self::MAXIMIZED;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vector2f {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vector2f {
        self.max - self.min
    }

    pub fn expand_to_point(&mut self, p: Vector2f) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    #[inline]
    pub fn contains_point(&self, p: Vector2f) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn corners(&self) -> [Vector2f; 4] {
        [
            self.min,
            Vector2f::new(self.max.x, self.min.y),
            self.max,
            Vector2f::new(self.min.x, self.max.y),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vector2f,
    pub radius: f32,
}

impl Default for Circle {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Circle {
    pub const EMPTY: Self = Self::new(Vector2f::ZERO, -INFTY);
    pub const MAXIMIZED: Self = Self::new(Vector2f::ZERO, INFTY);

    #[inline]
    pub const fn new(center: Vector2f, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }

    pub fn maximize(&mut self) {
        *self = Self::MAXIMIZED;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.radius < 0.0
    }

    /// Grow the radius until `p` is inside. The center does not move.
    pub fn expand_to_point(&mut self, p: Vector2f) {
        self.radius = self.radius.max(self.center.distance(p));
    }

    #[inline]
    pub fn contains_point(&self, p: Vector2f) -> bool {
        !self.is_empty() && (p - self.center).length_squared() <= self.radius * self.radius
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector3f,
    pub max: Vector3f,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    pub const EMPTY: Self = Self::new(Vector3f::splat(INFTY), Vector3f::splat(-INFTY));
    pub const MAXIMIZED: Self = Self::new(Vector3f::splat(-INFTY), Vector3f::splat(INFTY));

    #[inline]
    pub const fn new(min: Vector3f, max: Vector3f) -> Self {
        Self { min, max }
    }

    pub fn from_center_extents(center: Vector3f, half_extents: Vector3f) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    pub fn from_points(points: impl IntoIterator<Item = Vector3f>) -> Self {
        let mut aabb = Self::EMPTY;
        for p in points {
            aabb.expand_to_point(p);
        }
        aabb
    }

    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }

    pub fn maximize(&mut self) {
        *self = Self::MAXIMIZED;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    #[inline]
    pub fn center(&self) -> Vector3f {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vector3f {
        self.max - self.min
    }

    pub fn expand_to_point(&mut self, p: Vector3f) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    #[inline]
    pub fn contains_point(&self, p: Vector3f) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    pub fn corners(&self) -> [Vector3f; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vector3f::new(a.x, a.y, a.z),
            Vector3f::new(b.x, a.y, a.z),
            Vector3f::new(a.x, b.y, a.z),
            Vector3f::new(b.x, b.y, a.z),
            Vector3f::new(a.x, a.y, b.z),
            Vector3f::new(b.x, a.y, b.z),
            Vector3f::new(a.x, b.y, b.z),
            Vector3f::new(b.x, b.y, b.z),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vector3f,
    pub radius: f32,
}

impl Default for Sphere {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Sphere {
    pub const EMPTY: Self = Self::new(Vector3f::ZERO, -INFTY);
    pub const MAXIMIZED: Self = Self::new(Vector3f::ZERO, INFTY);

    #[inline]
    pub const fn new(center: Vector3f, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }

    pub fn maximize(&mut self) {
        *self = Self::MAXIMIZED;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.radius < 0.0
    }

    pub fn expand_to_point(&mut self, p: Vector3f) {
        self.radius = self.radius.max(self.center.distance(p));
    }

    #[inline]
    pub fn contains_point(&self, p: Vector3f) -> bool {
        !self.is_empty() && (p - self.center).length_squared() <= self.radius * self.radius
    }
}

/// 2D segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Line2D {
    pub start: Vector2f,
    pub end: Vector2f,
}

impl Line2D {
    #[inline]
    pub const fn new(start: Vector2f, end: Vector2f) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn direction(&self) -> Vector2f {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.direction().length()
    }

    /// Crossing point with `other`, or [`Vector2f::INFINITY`] when the segments
    /// are parallel or do not cross inside both.
    pub fn intersection(&self, other: &Line2D) -> Vector2f {
        intersection::line_intersection(self, other).unwrap_or(Vector2f::INFINITY)
    }
}

/// 3D segment from `start` towards `end`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ray3D {
    pub start: Vector3f,
    pub end: Vector3f,
}

impl Ray3D {
    #[inline]
    pub const fn new(start: Vector3f, end: Vector3f) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn direction(&self) -> Vector3f {
        self.end - self.start
    }

    #[inline]
    pub fn point_at(&self, t: f32) -> Vector3f {
        self.start + self.direction() * t
    }

    /// Meeting point with `other`, or [`Vector3f::INFINITY`] when the rays are
    /// parallel, skew, or meet outside both segments.
    pub fn intersection(&self, other: &Ray3D) -> Vector3f {
        intersection::ray_intersection(self, other).unwrap_or(Vector3f::INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_shapes_contain_nothing() {
        assert!(Rectangle::EMPTY.is_empty());
        assert!(!Rectangle::EMPTY.contains_point(Vector2f::ZERO));
        assert!(!Circle::EMPTY.contains_point(Vector2f::ZERO));
        assert!(!Aabb::EMPTY.contains_point(Vector3f::ZERO));
        assert!(!Sphere::EMPTY.contains_point(Vector3f::ZERO));
    }

    #[test]
    fn maximized_shapes_contain_everything() {
        let far = Vector3f::new(1e30, -1e30, 5.0);
        assert!(Aabb::MAXIMIZED.contains_point(far));
        assert!(Sphere::MAXIMIZED.contains_point(far));
        assert!(Rectangle::MAXIMIZED.contains_point(far.xy()));
        assert!(Circle::MAXIMIZED.contains_point(far.xz()));
    }

    #[test]
    fn clear_and_expand() {
        let mut r = Rectangle::MAXIMIZED;
        r.clear();
        assert_eq!(r, Rectangle::EMPTY);
        r.expand_to_point(Vector2f::new(1.0, 2.0));
        r.expand_to_point(Vector2f::new(-1.0, 0.0));
        assert_eq!(r, Rectangle::new(Vector2f::new(-1.0, 0.0), Vector2f::new(1.0, 2.0)));
        assert_eq!(r.center(), Vector2f::new(0.0, 1.0));

        let aabb = Aabb::from_points([Vector3f::ONE, -Vector3f::ONE, Vector3f::ZERO]);
        assert_eq!(aabb.size(), Vector3f::splat(2.0));
        assert_eq!(aabb.corners().len(), 8);

        let mut s = Sphere::new(Vector3f::ZERO, 0.0);
        s.expand_to_point(Vector3f::new(0.0, 3.0, 4.0));
        assert_eq!(s.radius, 5.0);
    }

    #[test]
    fn point_containment_is_inclusive() {
        let r = Rectangle::new(Vector2f::ZERO, Vector2f::splat(5.0));
        assert!(r.contains_point(Vector2f::new(5.0, 0.0)));
        let c = Circle::new(Vector2f::ZERO, 5.0);
        assert!(c.contains_point(Vector2f::new(3.0, 4.0)));
        assert!(!c.contains_point(Vector2f::new(3.0, 4.1)));
    }
}
