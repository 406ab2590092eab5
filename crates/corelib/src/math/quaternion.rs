//! Unit quaternion rotations. `w` is the real part.

use std::ops::{Mul, MulAssign};

use bytemuck::{Pod, Zeroable};

use super::Vector3f;
use super::scalar;

#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Quaternion {
    pub i: f32,
    pub j: f32,
    pub k: f32,
    pub w: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(i: f32, j: f32, k: f32, w: f32) -> Self {
        Self { i, j, k, w }
    }

    /// Rotation of `angle` radians around `axis`. The axis is expected to be unit length.
    pub fn from_axis_angle(axis: Vector3f, angle: f32) -> Self {
        let (s, c) = scalar::sin_cos(angle * 0.5);
        Self::new(axis.x * s, axis.y * s, axis.z * s, c)
    }

    /// Orientation as written in scene files: `X(rx) * Z(rz) * Y(ry)`, normalized.
    pub fn from_euler_xzy(angles: Vector3f) -> Self {
        let q = Self::from_axis_angle(Vector3f::UNIT_X, angles.x)
            * Self::from_axis_angle(Vector3f::UNIT_Z, angles.z)
            * Self::from_axis_angle(Vector3f::UNIT_Y, angles.y);
        q.normalize()
    }

    #[inline]
    pub const fn imaginary(&self) -> Vector3f {
        Vector3f::new(self.i, self.j, self.k)
    }

    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.i, -self.j, -self.k, self.w)
    }

    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.i * other.i + self.j * other.j + self.k * other.k + self.w * other.w
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.dot(*self).sqrt()
    }

    #[inline]
    pub fn normalize(&self) -> Self {
        let mut q = *self;
        q.normalize_self();
        q
    }

    pub fn normalize_self(&mut self) {
        let len = self.length();
        if len > 0.0 {
            let inv = 1.0 / len;
            self.i *= inv;
            self.j *= inv;
            self.k *= inv;
            self.w *= inv;
        }
    }

    /// Rotate `v` as `q * v * conjugate(q)`.
    pub fn rotate(&self, v: Vector3f) -> Vector3f {
        let p = Self::new(v.x, v.y, v.z, 0.0);
        (*self * p * self.conjugate()).imaginary()
    }

    pub fn compare(&self, other: Self, threshold: f32) -> bool {
        scalar::approx_eq(self.i, other.i, threshold)
            && scalar::approx_eq(self.j, other.j, threshold)
            && scalar::approx_eq(self.k, other.k, threshold)
            && scalar::approx_eq(self.w, other.w, threshold)
    }
}

/// Hamilton product.
impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, r: Self) -> Self {
        Self {
            i: self.w * r.i + self.i * r.w + self.j * r.k - self.k * r.j,
            j: self.w * r.j - self.i * r.k + self.j * r.w + self.k * r.i,
            k: self.w * r.k + self.i * r.j - self.j * r.i + self.k * r.w,
            w: self.w * r.w - self.i * r.i - self.j * r.j - self.k * r.k,
        }
    }
}

impl MulAssign for Quaternion {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl From<Quaternion> for glam::Quat {
    fn from(q: Quaternion) -> Self {
        glam::Quat::from_xyzw(q.i, q.j, q.k, q.w)
    }
}

impl From<glam::Quat> for Quaternion {
    fn from(q: glam::Quat) -> Self {
        Self::new(q.x, q.y, q.z, q.w)
    }
}
