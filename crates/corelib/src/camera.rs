use crate::{Matrix4f, Transform, Vector3f};

/// First-person perspective camera. Looks along its transform's `forward()`.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub transform: Transform,
    pub fov_y_rad: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub aspect: f32,
}

impl Camera {
    pub fn new_perspective(
        transform: Transform,
        fov_y_rad: f32,
        z_near: f32,
        z_far: f32,
        aspect: f32,
    ) -> Self {
        Self {
            transform,
            fov_y_rad,
            z_near,
            z_far,
            aspect,
        }
    }

    #[inline]
    pub fn view(&self) -> Matrix4f {
        self.transform.view_transformation_matrix()
    }

    /// Projection with clip depth in `[-1, 1]`.
    #[inline]
    pub fn proj(&self) -> Matrix4f {
        Matrix4f::perspective(self.fov_y_rad, self.aspect.max(1e-6), self.z_near, self.z_far)
    }

    #[inline]
    pub fn proj_view(&self) -> Matrix4f {
        self.proj() * self.view()
    }

    #[inline]
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Move by `delta` given in camera space (x = right, y = up, z = forward).
    pub fn move_local(&mut self, delta: Vector3f) {
        let world = self.transform.right() * delta.x
            + self.transform.up() * delta.y
            + self.transform.forward() * delta.z;
        self.transform.translate(world);
    }

    /// Mouse-look: yaw about world up, pitch about the camera's own right axis.
    pub fn look(&mut self, yaw: f32, pitch: f32) {
        self.transform.rotate_world(Vector3f::UNIT_Y, yaw);
        self.transform.rotate_local(Vector3f::UNIT_X, pitch);
    }
}
