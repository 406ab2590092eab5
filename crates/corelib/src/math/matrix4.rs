//! 4x4 column-major matrix used for model, view and projection transforms.

use std::ops::{Index, IndexMut, Mul};

use bytemuck::{Pod, Zeroable};

use super::{Matrix3f, Vector3f, Vector4f};

#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Matrix4f {
    pub cols: [Vector4f; 4],
}

impl Default for Matrix4f {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4f {
    pub const IDENTITY: Self = Self::from_cols(
        Vector4f::UNIT_X,
        Vector4f::UNIT_Y,
        Vector4f::UNIT_Z,
        Vector4f::UNIT_W,
    );
    pub const ZERO: Self =
        Self::from_cols(Vector4f::ZERO, Vector4f::ZERO, Vector4f::ZERO, Vector4f::ZERO);
    pub const ONE: Self =
        Self::from_cols(Vector4f::ONE, Vector4f::ONE, Vector4f::ONE, Vector4f::ONE);

    /// Components in column-major order: the first four values are column 0.
    #[inline]
    #[rustfmt::skip]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        c0x: f32, c0y: f32, c0z: f32, c0w: f32,
        c1x: f32, c1y: f32, c1z: f32, c1w: f32,
        c2x: f32, c2y: f32, c2z: f32, c2w: f32,
        c3x: f32, c3y: f32, c3z: f32, c3w: f32,
    ) -> Self {
        Self::from_cols(
            Vector4f::new(c0x, c0y, c0z, c0w),
            Vector4f::new(c1x, c1y, c1z, c1w),
            Vector4f::new(c2x, c2y, c2z, c2w),
            Vector4f::new(c3x, c3y, c3z, c3w),
        )
    }

    #[inline]
    pub const fn from_cols(c0: Vector4f, c1: Vector4f, c2: Vector4f, c3: Vector4f) -> Self {
        Self { cols: [c0, c1, c2, c3] }
    }

    pub fn from_cols_array(m: [f32; 16]) -> Self {
        Self::from_cols(
            Vector4f::new(m[0], m[1], m[2], m[3]),
            Vector4f::new(m[4], m[5], m[6], m[7]),
            Vector4f::new(m[8], m[9], m[10], m[11]),
            Vector4f::new(m[12], m[13], m[14], m[15]),
        )
    }

    pub fn to_cols_array(&self) -> [f32; 16] {
        let [a, b, c, d] = self.cols;
        [
            a.x, a.y, a.z, a.w, b.x, b.y, b.z, b.w, c.x, c.y, c.z, c.w, d.x, d.y, d.z, d.w,
        ]
    }

    pub fn translation(v: Vector3f) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3] = Vector4f::from_vec3(v, 1.0);
        m
    }

    #[rustfmt::skip]
    pub fn scale(v: Vector3f) -> Self {
        Self::new(
            v.x, 0.0, 0.0, 0.0,
            0.0, v.y, 0.0, 0.0,
            0.0, 0.0, v.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation whose columns are the given basis vectors.
    pub fn from_basis(right: Vector3f, up: Vector3f, forward: Vector3f) -> Self {
        Self::from_cols(
            Vector4f::from_vec3(right, 0.0),
            Vector4f::from_vec3(up, 0.0),
            Vector4f::from_vec3(forward, 0.0),
            Vector4f::UNIT_W,
        )
    }

    /// Perspective projection looking down `+Z`, clip depth in `[-1, 1]`.
    #[rustfmt::skip]
    pub fn perspective(fov_y_rad: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
        let f = 1.0 / (fov_y_rad * 0.5).tan();
        let range = z_far - z_near;
        Self::new(
            f / aspect, 0.0, 0.0, 0.0,
            0.0, f, 0.0, 0.0,
            0.0, 0.0, (z_far + z_near) / range, 1.0,
            0.0, 0.0, -2.0 * z_far * z_near / range, 0.0,
        )
    }

    /// Upper-left 3x3 block.
    pub fn to_matrix3(&self) -> Matrix3f {
        Matrix3f::from_cols(self.cols[0].xyz(), self.cols[1].xyz(), self.cols[2].xyz())
    }

    /// Transform a point (`w = 1`) and drop the resulting `w`.
    #[inline]
    pub fn transform_point(&self, p: Vector3f) -> Vector3f {
        (*self * Vector4f::from_vec3(p, 1.0)).xyz()
    }

    /// Transform a direction (`w = 0`).
    #[inline]
    pub fn transform_vector(&self, v: Vector3f) -> Vector3f {
        (*self * Vector4f::from_vec3(v, 0.0)).xyz()
    }

    /// Classical adjugate (transposed cofactors) in column-major order, plus the determinant.
    #[rustfmt::skip]
    fn adjugate(&self) -> ([f32; 16], f32) {
        let m = self.to_cols_array();
        let mut inv = [0.0f32; 16];

        inv[0] = m[5] * m[10] * m[15] - m[5] * m[11] * m[14] - m[9] * m[6] * m[15]
            + m[9] * m[7] * m[14] + m[13] * m[6] * m[11] - m[13] * m[7] * m[10];
        inv[4] = -m[4] * m[10] * m[15] + m[4] * m[11] * m[14] + m[8] * m[6] * m[15]
            - m[8] * m[7] * m[14] - m[12] * m[6] * m[11] + m[12] * m[7] * m[10];
        inv[8] = m[4] * m[9] * m[15] - m[4] * m[11] * m[13] - m[8] * m[5] * m[15]
            + m[8] * m[7] * m[13] + m[12] * m[5] * m[11] - m[12] * m[7] * m[9];
        inv[12] = -m[4] * m[9] * m[14] + m[4] * m[10] * m[13] + m[8] * m[5] * m[14]
            - m[8] * m[6] * m[13] - m[12] * m[5] * m[10] + m[12] * m[6] * m[9];
        inv[1] = -m[1] * m[10] * m[15] + m[1] * m[11] * m[14] + m[9] * m[2] * m[15]
            - m[9] * m[3] * m[14] - m[13] * m[2] * m[11] + m[13] * m[3] * m[10];
        inv[5] = m[0] * m[10] * m[15] - m[0] * m[11] * m[14] - m[8] * m[2] * m[15]
            + m[8] * m[3] * m[14] + m[12] * m[2] * m[11] - m[12] * m[3] * m[10];
        inv[9] = -m[0] * m[9] * m[15] + m[0] * m[11] * m[13] + m[8] * m[1] * m[15]
            - m[8] * m[3] * m[13] - m[12] * m[1] * m[11] + m[12] * m[3] * m[9];
        inv[13] = m[0] * m[9] * m[14] - m[0] * m[10] * m[13] - m[8] * m[1] * m[14]
            + m[8] * m[2] * m[13] + m[12] * m[1] * m[10] - m[12] * m[2] * m[9];
        inv[2] = m[1] * m[6] * m[15] - m[1] * m[7] * m[14] - m[5] * m[2] * m[15]
            + m[5] * m[3] * m[14] + m[13] * m[2] * m[7] - m[13] * m[3] * m[6];
        inv[6] = -m[0] * m[6] * m[15] + m[0] * m[7] * m[14] + m[4] * m[2] * m[15]
            - m[4] * m[3] * m[14] - m[12] * m[2] * m[7] + m[12] * m[3] * m[6];
        inv[10] = m[0] * m[5] * m[15] - m[0] * m[7] * m[13] - m[4] * m[1] * m[15]
            + m[4] * m[3] * m[13] + m[12] * m[1] * m[7] - m[12] * m[3] * m[5];
        inv[14] = -m[0] * m[5] * m[14] + m[0] * m[6] * m[13] + m[4] * m[1] * m[14]
            - m[4] * m[2] * m[13] - m[12] * m[1] * m[6] + m[12] * m[2] * m[5];
        inv[3] = -m[1] * m[6] * m[11] + m[1] * m[7] * m[10] + m[5] * m[2] * m[11]
            - m[5] * m[3] * m[10] - m[9] * m[2] * m[7] + m[9] * m[3] * m[6];
        inv[7] = m[0] * m[6] * m[11] - m[0] * m[7] * m[10] - m[4] * m[2] * m[11]
            + m[4] * m[3] * m[10] + m[8] * m[2] * m[7] - m[8] * m[3] * m[6];
        inv[11] = -m[0] * m[5] * m[11] + m[0] * m[7] * m[9] + m[4] * m[1] * m[11]
            - m[4] * m[3] * m[9] - m[8] * m[1] * m[7] + m[8] * m[3] * m[5];
        inv[15] = m[0] * m[5] * m[10] - m[0] * m[6] * m[9] - m[4] * m[1] * m[10]
            + m[4] * m[2] * m[9] + m[8] * m[1] * m[6] - m[8] * m[2] * m[5];

        let det = m[0] * inv[0] + m[1] * inv[4] + m[2] * inv[8] + m[3] * inv[12];
        (inv, det)
    }

    pub fn determinant(&self) -> f32 {
        self.adjugate().1
    }

    #[inline]
    pub fn has_inverse(&self) -> bool {
        self.determinant() != 0.0
    }

    /// Unchecked inverse; a singular matrix yields non-finite components.
    pub fn inverse(&self) -> Self {
        let (adj, det) = self.adjugate();
        let inv_det = 1.0 / det;
        Self::from_cols_array(adj.map(|v| v * inv_det))
    }

    /// Inverts in place. Returns `false` and leaves `self` untouched when singular.
    pub fn inverse_self(&mut self) -> bool {
        let (adj, det) = self.adjugate();
        if det == 0.0 {
            return false;
        }
        let inv_det = 1.0 / det;
        *self = Self::from_cols_array(adj.map(|v| v * inv_det));
        true
    }

    #[rustfmt::skip]
    pub fn transpose(&self) -> Self {
        let [a, b, c, d] = self.cols;
        Self::new(
            a.x, b.x, c.x, d.x,
            a.y, b.y, c.y, d.y,
            a.z, b.z, c.z, d.z,
            a.w, b.w, c.w, d.w,
        )
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

impl Index<usize> for Matrix4f {
    type Output = Vector4f;

    fn index(&self, col: usize) -> &Vector4f {
        &self.cols[col]
    }
}

impl IndexMut<usize> for Matrix4f {
    fn index_mut(&mut self, col: usize) -> &mut Vector4f {
        &mut self.cols[col]
    }
}

impl Mul<Vector4f> for Matrix4f {
    type Output = Vector4f;

    fn mul(self, v: Vector4f) -> Vector4f {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z + self.cols[3] * v.w
    }
}

/// Row vector times matrix.
impl Mul<Matrix4f> for Vector4f {
    type Output = Vector4f;

    fn mul(self, m: Matrix4f) -> Vector4f {
        Vector4f::new(
            self.dot(m.cols[0]),
            self.dot(m.cols[1]),
            self.dot(m.cols[2]),
            self.dot(m.cols[3]),
        )
    }
}

impl Mul for Matrix4f {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_cols(
            self * rhs.cols[0],
            self * rhs.cols[1],
            self * rhs.cols[2],
            self * rhs.cols[3],
        )
    }
}

impl Mul<f32> for Matrix4f {
    type Output = Self;

    fn mul(self, s: f32) -> Self {
        Self::from_cols(
            self.cols[0] * s,
            self.cols[1] * s,
            self.cols[2] * s,
            self.cols[3] * s,
        )
    }
}

impl From<Matrix4f> for glam::Mat4 {
    fn from(m: Matrix4f) -> Self {
        glam::Mat4::from_cols_array(&m.to_cols_array())
    }
}

impl From<glam::Mat4> for Matrix4f {
    fn from(m: glam::Mat4) -> Self {
        Self::from_cols_array(m.to_cols_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[rustfmt::skip]
    fn inverse_fixture() {
        let m = Matrix4f::new(
            2.0, 2.0, 4.0, 0.0,
            4.0, 2.0, 6.0, 0.0,
            4.0, 2.0, 2.0, 0.0,
            2.0, 4.0, 2.0, 1.0,
        );
        let expected = Matrix4f::new(
            -0.5, 0.25, 0.25, 0.0,
            1.0, -0.75, 0.25, 0.0,
            0.0, 0.25, -0.25, 0.0,
            -3.0, 2.0, -1.0, 1.0,
        );
        assert!(m.has_inverse());
        assert_eq!(m.determinant(), 16.0);
        assert!(m.inverse().compare(&expected, 1e-6));

        let mut in_place = m;
        assert!(in_place.inverse_self());
        assert!(in_place.compare(&expected, 1e-6));
    }

    #[test]
    fn singular_inverse_is_unchecked() {
        let mut m = Matrix4f::ONE;
        assert!(!m.has_inverse());
        assert!(!m.inverse_self());
        assert_eq!(m, Matrix4f::ONE);
        assert!(m.inverse().to_cols_array().iter().any(|v| !v.is_finite()));
    }

    #[test]
    fn products_match_glam() {
        let a = Matrix4f::translation(Vector3f::new(1.0, 2.0, 3.0))
            * Matrix4f::scale(Vector3f::new(2.0, 0.5, 1.0));
        let b = Matrix4f::perspective(1.0, 1.5, 0.1, 50.0);
        let ours: glam::Mat4 = (a * b).into();
        let theirs = glam::Mat4::from(a) * glam::Mat4::from(b);
        assert!(ours.abs_diff_eq(theirs, 1e-5));

        let v = Vector4f::new(1.0, -2.0, 0.5, 1.0);
        let mv: Vector4f = (glam::Mat4::from(a) * glam::Vec4::from(v)).into();
        assert!((a * v).compare(mv, 1e-6));
        assert!((v * a).compare(a.transpose() * v, 1e-6));
    }

    #[test]
    fn transform_point_vs_vector() {
        let t = Matrix4f::translation(Vector3f::new(5.0, 0.0, 0.0));
        assert_eq!(t.transform_point(Vector3f::ZERO), Vector3f::new(5.0, 0.0, 0.0));
        assert_eq!(t.transform_vector(Vector3f::UNIT_Y), Vector3f::UNIT_Y);
    }

    #[test]
    fn perspective_maps_near_and_far() {
        let p = Matrix4f::perspective(1.2, 1.0, 0.5, 20.0);
        let near = p * Vector4f::new(0.0, 0.0, 0.5, 1.0);
        let far = p * Vector4f::new(0.0, 0.0, 20.0, 1.0);
        assert!((near.z / near.w + 1.0).abs() < 1e-5);
        assert!((far.z / far.w - 1.0).abs() < 1e-5);
    }

    #[test]
    fn transpose_round_trip() {
        let m = Matrix4f::from_cols_array(std::array::from_fn(|i| i as f32));
        let mut t = m.transpose();
        assert_eq!(t.cols[0], Vector4f::new(0.0, 4.0, 8.0, 12.0));
        t.transpose_self();
        assert_eq!(t, m);
        assert_eq!(m.to_matrix3().cols[2], Vector3f::new(8.0, 9.0, 10.0));
    }
}
