//! 2x2 column-major matrix.

use std::ops::{Index, IndexMut, Mul};

use bytemuck::{Pod, Zeroable};

use super::Vector2f;

#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Matrix2f {
    pub cols: [Vector2f; 2],
}

impl Default for Matrix2f {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix2f {
    pub const IDENTITY: Self = Self::from_cols(Vector2f::UNIT_X, Vector2f::UNIT_Y);
    pub const ZERO: Self = Self::from_cols(Vector2f::ZERO, Vector2f::ZERO);
    pub const ONE: Self = Self::from_cols(Vector2f::ONE, Vector2f::ONE);

    /// Components in column-major order.
    #[inline]
    pub const fn new(c0x: f32, c0y: f32, c1x: f32, c1y: f32) -> Self {
        Self::from_cols(Vector2f::new(c0x, c0y), Vector2f::new(c1x, c1y))
    }

    #[inline]
    pub const fn from_cols(c0: Vector2f, c1: Vector2f) -> Self {
        Self { cols: [c0, c1] }
    }

    #[inline]
    pub fn determinant(&self) -> f32 {
        let [a, b] = self.cols;
        a.x * b.y - b.x * a.y
    }

    #[inline]
    pub fn has_inverse(&self) -> bool {
        self.determinant() != 0.0
    }

    /// Unchecked inverse; a singular matrix yields non-finite components.
    pub fn inverse(&self) -> Self {
        let [a, b] = self.cols;
        let inv_det = 1.0 / self.determinant();
        Self::new(b.y * inv_det, -a.y * inv_det, -b.x * inv_det, a.x * inv_det)
    }

    /// Inverts in place. Returns `false` and leaves `self` untouched when singular.
    pub fn inverse_self(&mut self) -> bool {
        if !self.has_inverse() {
            return false;
        }
        *self = self.inverse();
        true
    }

    pub fn transpose(&self) -> Self {
        let [a, b] = self.cols;
        Self::new(a.x, b.x, a.y, b.y)
    }

    pub fn transpose_self(&mut self) {
        *self = self.transpose();
    }

    pub fn compare(&self, other: &Self, threshold: f32) -> bool {
        self.cols
            .iter()
            .zip(other.cols.iter())
            .all(|(a, b)| a.compare(*b, threshold))
    }
}

impl Index<usize> for Matrix2f {
    type Output = Vector2f;

    fn index(&self, col: usize) -> &Vector2f {
        &self.cols[col]
    }
}

impl IndexMut<usize> for Matrix2f {
    fn index_mut(&mut self, col: usize) -> &mut Vector2f {
        &mut self.cols[col]
    }
}

impl Mul<Vector2f> for Matrix2f {
    type Output = Vector2f;

    fn mul(self, v: Vector2f) -> Vector2f {
        self.cols[0] * v.x + self.cols[1] * v.y
    }
}

/// Row vector times matrix.
impl Mul<Matrix2f> for Vector2f {
    type Output = Vector2f;

    fn mul(self, m: Matrix2f) -> Vector2f {
        Vector2f::new(self.dot(m.cols[0]), self.dot(m.cols[1]))
    }
}

impl Mul for Matrix2f {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_cols(self * rhs.cols[0], self * rhs.cols[1])
    }
}

impl Mul<f32> for Matrix2f {
    type Output = Self;

    fn mul(self, s: f32) -> Self {
        Self::from_cols(self.cols[0] * s, self.cols[1] * s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_of_rotation_is_transpose() {
        let (s, c) = 0.3f32.sin_cos();
        let m = Matrix2f::new(c, s, -s, c);
        assert!(m.inverse().compare(&m.transpose(), 1e-6));
        assert!((m * m.inverse()).compare(&Matrix2f::IDENTITY, 1e-6));
    }

    #[test]
    fn singular_matrix() {
        let mut m = Matrix2f::ONE;
        assert!(!m.has_inverse());
        assert!(!m.inverse_self());
        assert_eq!(m, Matrix2f::ONE);
        assert!(!m.inverse().cols[0].x.is_finite());
    }

    #[test]
    fn column_and_row_products() {
        let m = Matrix2f::new(1.0, 2.0, 3.0, 4.0);
        let v = Vector2f::new(1.0, 1.0);
        assert_eq!(m * v, Vector2f::new(4.0, 6.0));
        assert_eq!(v * m, Vector2f::new(3.0, 7.0));
        assert_eq!(m.determinant(), -2.0);
    }
}
