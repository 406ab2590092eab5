//! 4D vector (homogeneous coordinates, matrix columns, normalized colors).

use std::ops::{Index, IndexMut};

use bytemuck::{Pod, Zeroable};

use super::impl_vector_ops;
use super::scalar::{self, INFTY};
use super::Vector3f;
use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Vector4f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl_vector_ops!(Vector4f { x, y, z, w });

impl Vector4f {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0, 0.0);
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0, 0.0);
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0, 0.0);
    pub const UNIT_W: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const INFINITY: Self = Self::new(INFTY, INFTY, INFTY, INFTY);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v, w: v }
    }

    #[inline]
    pub const fn from_vec3(v: Vector3f, w: f32) -> Self {
        Self { x: v.x, y: v.y, z: v.z, w }
    }

    #[inline]
    pub const fn from_array(a: [f32; 4]) -> Self {
        Self { x: a[0], y: a[1], z: a[2], w: a[3] }
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    #[inline]
    pub const fn xyz(&self) -> Vector3f {
        Vector3f::new(self.x, self.y, self.z)
    }

    #[inline]
    pub const fn xyw(&self) -> Vector3f {
        Vector3f::new(self.x, self.y, self.w)
    }

    #[inline]
    pub const fn xzw(&self) -> Vector3f {
        Vector3f::new(self.x, self.z, self.w)
    }

    #[inline]
    pub const fn yzw(&self) -> Vector3f {
        Vector3f::new(self.y, self.z, self.w)
    }

    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.dot(*self)
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

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
        self.w = scalar::clamp(self.w, min.w, max.w);
    }

    #[inline]
    pub fn lerp(&self, other: Self, t: f32) -> Self {
        *self + (other - *self) * t
    }

    pub fn compare(&self, other: Self, threshold: f32) -> bool {
        scalar::approx_eq(self.x, other.x, threshold)
            && scalar::approx_eq(self.y, other.y, threshold)
            && scalar::approx_eq(self.z, other.z, threshold)
            && scalar::approx_eq(self.w, other.w, threshold)
    }
}

impl Index<usize> for Vector4f {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Vector4f index out of range: {index}"),
        }
    }
}

impl IndexMut<usize> for Vector4f {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("Vector4f index out of range: {index}"),
        }
    }
}

impl TryFrom<&[f32]> for Vector4f {
    type Error = CoreError;

    fn try_from(values: &[f32]) -> Result<Self, CoreError> {
        match values {
            [x, y, z, w] => Ok(Self::new(*x, *y, *z, *w)),
            _ => Err(CoreError::InvalidArity {
                type_name: "Vector4f",
                expected: 4,
                found: values.len(),
            }),
        }
    }
}

impl From<Vector4f> for glam::Vec4 {
    fn from(v: Vector4f) -> Self {
        glam::Vec4::new(v.x, v.y, v.z, v.w)
    }
}

impl From<glam::Vec4> for Vector4f {
    fn from(v: glam::Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}
