//! 3D vector.

use std::ops::{Index, IndexMut};

use bytemuck::{Pod, Zeroable};

use super::impl_vector_ops;
use super::scalar::{self, INFTY};
use super::{Quaternion, Vector2f};
use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Vector3f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl_vector_ops!(Vector3f { x, y, z });

impl Vector3f {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);
    pub const INFINITY: Self = Self::new(INFTY, INFTY, INFTY);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    #[inline]
    pub const fn from_array(a: [f32; 3]) -> Self {
        Self { x: a[0], y: a[1], z: a[2] }
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub const fn xy(&self) -> Vector2f {
        Vector2f::new(self.x, self.y)
    }

    #[inline]
    pub const fn xz(&self) -> Vector2f {
        Vector2f::new(self.x, self.z)
    }

    #[inline]
    pub const fn yz(&self) -> Vector2f {
        Vector2f::new(self.y, self.z)
    }

    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
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
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
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
        self.z = scalar::clamp(self.z, min.z, max.z);
    }

    #[inline]
    pub fn min(&self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    #[inline]
    pub fn max(&self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    #[inline]
    pub fn lerp(&self, other: Self, t: f32) -> Self {
        *self + (other - *self) * t
    }

    /// Rotate around a unit `axis` by `angle` radians.
    #[inline]
    pub fn rotate(&self, axis: Self, angle: f32) -> Self {
        Quaternion::from_axis_angle(axis, angle).rotate(*self)
    }

    pub fn rotate_self(&mut self, axis: Self, angle: f32) {
        *self = self.rotate(axis, angle);
    }

    pub fn compare(&self, other: Self, threshold: f32) -> bool {
        scalar::approx_eq(self.x, other.x, threshold)
            && scalar::approx_eq(self.y, other.y, threshold)
            && scalar::approx_eq(self.z, other.z, threshold)
    }
}

impl Index<usize> for Vector3f {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector3f index out of range: {index}"),
        }
    }
}

impl IndexMut<usize> for Vector3f {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vector3f index out of range: {index}"),
        }
    }
}

impl TryFrom<&[f32]> for Vector3f {
    type Error = CoreError;

    fn try_from(values: &[f32]) -> Result<Self, CoreError> {
        match values {
            [x, y, z] => Ok(Self::new(*x, *y, *z)),
            _ => Err(CoreError::InvalidArity {
                type_name: "Vector3f",
                expected: 3,
                found: values.len(),
            }),
        }
    }
}

impl From<Vector3f> for glam::Vec3 {
    fn from(v: Vector3f) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

impl From<glam::Vec3> for Vector3f {
    fn from(v: glam::Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}
