//! 2D vector.

use std::ops::{Index, IndexMut};

use bytemuck::{Pod, Zeroable};

use super::impl_vector_ops;
use super::scalar::{self, INFTY};
use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Vector2f {
    pub x: f32,
    pub y: f32,
}

impl_vector_ops!(Vector2f { x, y });

impl Vector2f {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0);
    pub const UNIT_X: Self = Self::new(1.0, 0.0);
    pub const UNIT_Y: Self = Self::new(0.0, 1.0);
    pub const INFINITY: Self = Self::new(INFTY, INFTY);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    #[inline]
    pub const fn from_array(a: [f32; 2]) -> Self {
        Self { x: a[0], y: a[1] }
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }

    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn distance(&self, other: Self) -> f32 {
        (*self - other).length()
    }

    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Scalar 2D cross product (`x1*y2 - y1*x2`).
    #[inline]
    pub fn perp_dot(&self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Unit-length copy. A zero vector is returned unchanged.
    #[inline]
    pub fn normalize(&self) -> Self {
        let mut v = *self;
        v.normalize_self();
        v
    }

    pub fn normalize_self(&mut self) {
        let len = self.length();
        if len > 0.0 {
            *self /= len;
        }
    }

    /// Copy scaled down to `max` length if it is longer.
    #[inline]
    pub fn clamp_length(&self, max: f32) -> Self {
        let mut v = *self;
        v.clamp_length_self(max);
        v
    }

    pub fn clamp_length_self(&mut self, max: f32) {
        let len_sq = self.length_squared();
        if len_sq > max * max {
            *self *= max / len_sq.sqrt();
        }
    }

    #[inline]
    pub fn clamp(&self, min: Self, max: Self) -> Self {
        let mut v = *self;
        v.clamp_self(min, max);
        v
    }

    pub fn clamp_self(&mut self, min: Self, max: Self) {
        self.x = scalar::clamp(self.x, min.x, max.x);
        self.y = scalar::clamp(self.y, min.y, max.y);
    }

    #[inline]
    pub fn min(&self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    #[inline]
    pub fn max(&self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    #[inline]
    pub fn lerp(&self, other: Self, t: f32) -> Self {
        *self + (other - *self) * t
    }

    /// Componentwise equality within `threshold`.
    pub fn compare(&self, other: Self, threshold: f32) -> bool {
        scalar::approx_eq(self.x, other.x, threshold)
            && scalar::approx_eq(self.y, other.y, threshold)
    }
}

impl Index<usize> for Vector2f {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Vector2f index out of range: {index}"),
        }
    }
}

impl IndexMut<usize> for Vector2f {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Vector2f index out of range: {index}"),
        }
    }
}

impl TryFrom<&[f32]> for Vector2f {
    type Error = CoreError;

    fn try_from(values: &[f32]) -> Result<Self, CoreError> {
        match values {
            [x, y] => Ok(Self::new(*x, *y)),
            _ => Err(CoreError::InvalidArity {
                type_name: "Vector2f",
                expected: 2,
                found: values.len(),
            }),
        }
    }
}

impl From<Vector2f> for glam::Vec2 {
    fn from(v: Vector2f) -> Self {
        glam::Vec2::new(v.x, v.y)
    }
}

impl From<glam::Vec2> for Vector2f {
    fn from(v: glam::Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}
