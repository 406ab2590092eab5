//! Core types: vector/matrix/quaternion math, Color, Transform, Camera,
//! bounding volumes, intersection predicates and noise.
//!
//! Everything here is pure value math: no I/O, no logging, no allocation
//! outside of explicit constructors.

pub mod bounds;
pub mod camera;
pub mod color;
pub mod error;
pub mod intersection;
pub mod math;
pub mod noise;
pub mod transform;

pub use bounds::{Aabb, Circle, Line2D, Ray3D, Rectangle, Sphere};
pub use camera::Camera;
pub use color::Color;
pub use error::{CoreError, CoreResult};
pub use intersection::{Contains, Intersects, contains, intersects};
pub use math::{Matrix2f, Matrix3f, Matrix4f, Quaternion, Vector2f, Vector3f, Vector4f};
pub use transform::Transform;
