//! 3x3 column-major matrix.

use std::ops::{Index, IndexMut, Mul};

use bytemuck::{Pod, Zeroable};

use super::Vector3f;

#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Matrix3f {
    pub cols: [Vector3f; 3],
}

impl Default for Matrix3f {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix3f {
    pub const IDENTITY: Self =
        Self::from_cols(Vector3f::UNIT_X, Vector3f::UNIT_Y, Vector3f::UNIT_Z);
    pub const ZERO: Self = Self::from_cols(Vector3f::ZERO, Vector3f::ZERO, Vector3f::ZERO);
    pub const ONE: Self = Self::from_cols(Vector3f::ONE, Vector3f::ONE, Vector3f::ONE);

    /// Components in column-major order.
    #[inline]
    #[allow(clippy::too_many_arguments)]
    #[rustfmt::skip]
    pub const fn new(
        c0x: f32, c0y: f32, c0z: f32,
        c1x: f32, c1y: f32, c1z: f32,
        c2x: f32, c2y: f32, c2z: f32,
    ) -> Self {
        Self::from_cols(
            Vector3f::new(c0x, c0y, c0z),
            Vector3f::new(c1x, c1y, c1z),
            Vector3f::new(c2x, c2y, c2z),
        )
    }

    #[inline]
    pub const fn from_cols(c0: Vector3f, c1: Vector3f, c2: Vector3f) -> Self {
        Self { cols: [c0, c1, c2] }
    }

    /// Scalar triple product of the columns.
    #[inline]
    pub fn determinant(&self) -> f32 {
        let [a, b, c] = self.cols;
        a.dot(b.cross(c))
    }

    #[inline]
    pub fn has_inverse(&self) -> bool {
        self.determinant() != 0.0
    }

    /// Unchecked inverse; a singular matrix yields non-finite components.
    pub fn inverse(&self) -> Self {
        let [a, b, c] = self.cols;
        let inv_det = 1.0 / self.determinant();
        // rows of the inverse are the pairwise cross products
        Self::from_cols(b.cross(c) * inv_det, c.cross(a) * inv_det, a.cross(b) * inv_det)
            .transpose()
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
        let [a, b, c] = self.cols;
        Self::new(a.x, b.x, c.x, a.y, b.y, c.y, a.z, b.z, c.z)
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

impl Index<usize> for Matrix3f {
    type Output = Vector3f;

    fn index(&self, col: usize) -> &Vector3f {
        &self.cols[col]
    }
}

impl IndexMut<usize> for Matrix3f {
    fn index_mut(&mut self, col: usize) -> &mut Vector3f {
        &mut self.cols[col]
    }
}

impl Mul<Vector3f> for Matrix3f {
    type Output = Vector3f;

    fn mul(self, v: Vector3f) -> Vector3f {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z
    }
}

/// Row vector times matrix.
impl Mul<Matrix3f> for Vector3f {
    type Output = Vector3f;

    fn mul(self, m: Matrix3f) -> Vector3f {
        Vector3f::new(self.dot(m.cols[0]), self.dot(m.cols[1]), self.dot(m.cols[2]))
    }
}

impl Mul for Matrix3f {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_cols(self * rhs.cols[0], self * rhs.cols[1], self * rhs.cols[2])
    }
}

impl Mul<f32> for Matrix3f {
    type Output = Self;

    fn mul(self, s: f32) -> Self {
        Self::from_cols(self.cols[0] * s, self.cols[1] * s, self.cols[2] * s)
    }
}

impl From<Matrix3f> for glam::Mat3 {
    fn from(m: Matrix3f) -> Self {
        glam::Mat3::from_cols(m.cols[0].into(), m.cols[1].into(), m.cols[2].into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_matches_glam() {
        let m = Matrix3f::new(2.0, 0.0, 1.0, 1.0, 3.0, 0.0, 0.0, 1.0, 4.0);
        assert!(m.has_inverse());
        let ours: glam::Mat3 = m.inverse().into();
        let theirs = glam::Mat3::from(m).inverse();
        assert!(ours.abs_diff_eq(theirs, 1e-6));
        assert!((m * m.inverse()).compare(&Matrix3f::IDENTITY, 1e-6));
        assert!((m.determinant() - glam::Mat3::from(m).determinant()).abs() < 1e-5);
    }

    #[test]
    fn inverse_self_reports_singularity() {
        let mut m = Matrix3f::new(1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 1.0, 0.0);
        assert!(!m.inverse_self());
        assert_eq!(m.cols[1], Vector3f::new(2.0, 4.0, 6.0));

        let mut id = Matrix3f::IDENTITY * 2.0;
        assert!(id.inverse_self());
        assert!(id.compare(&(Matrix3f::IDENTITY * 0.5), 1e-7));
    }

    #[test]
    fn row_vector_uses_transpose() {
        let m = Matrix3f::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        let v = Vector3f::new(1.0, 0.0, -1.0);
        assert_eq!(v * m, m.transpose() * v);
    }
}
