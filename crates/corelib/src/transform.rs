use crate::{Matrix4f, Quaternion, Vector3f};

/// Position, orientation and non-uniform scale of a scene object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vector3f,
    pub orientation: Quaternion,
    pub scale: Vector3f,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            position: Vector3f::ZERO,
            orientation: Quaternion::IDENTITY,
            scale: Vector3f::ONE,
        }
    }

    #[inline]
    pub fn from_trs(position: Vector3f, orientation: Quaternion, scale: Vector3f) -> Self {
        Self {
            position,
            orientation,
            scale,
        }
    }

    #[inline]
    pub fn right(&self) -> Vector3f {
        self.orientation.rotate(Vector3f::UNIT_X)
    }

    #[inline]
    pub fn up(&self) -> Vector3f {
        self.orientation.rotate(Vector3f::UNIT_Y)
    }

    #[inline]
    pub fn forward(&self) -> Vector3f {
        self.orientation.rotate(Vector3f::UNIT_Z)
    }

    #[inline]
    pub fn translate(&mut self, delta: Vector3f) {
        self.position += delta;
    }

    /// Rotate about `axis` expressed in the object's current frame.
    pub fn rotate_local(&mut self, axis: Vector3f, angle: f32) {
        self.orientation *= Quaternion::from_axis_angle(axis, angle);
        self.orientation.normalize_self();
    }

    /// Rotate about `axis` expressed in world space.
    pub fn rotate_world(&mut self, axis: Vector3f, angle: f32) {
        self.orientation = Quaternion::from_axis_angle(axis, angle) * self.orientation;
        self.orientation.normalize_self();
    }

    #[inline]
    pub fn translation_matrix(&self) -> Matrix4f {
        Matrix4f::translation(self.position)
    }

    /// Rotation built from the rotated basis. Assumes a normalized orientation.
    #[inline]
    pub fn orientation_matrix(&self) -> Matrix4f {
        Matrix4f::from_basis(self.right(), self.up(), self.forward())
    }

    #[inline]
    pub fn scale_matrix(&self) -> Matrix4f {
        Matrix4f::scale(self.scale)
    }

    /// Model matrix = T * R * S.
    pub fn transformation_matrix(&self) -> Matrix4f {
        self.translation_matrix() * self.orientation_matrix() * self.scale_matrix()
    }

    /// Inverse of the model matrix, for cameras.
    pub fn view_transformation_matrix(&self) -> Matrix4f {
        self.transformation_matrix().inverse()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
