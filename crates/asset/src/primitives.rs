//! Procedural primitives. Each generator is a pure function of its center and
//! half extents; faces wind counter-clockwise seen from outside.

use corelib::{Color, Vector2f, Vector3f};

use crate::mesh::{Mesh, Vertex};

pub trait ToMesh {
    fn to_mesh(&self) -> Mesh;
}

/// Corner UVs in quad order.
const QUAD_UV: [Vector2f; 4] = [
    Vector2f::new(0.0, 0.0),
    Vector2f::new(1.0, 0.0),
    Vector2f::new(1.0, 1.0),
    Vector2f::new(0.0, 1.0),
];

/// One quad spanned by tangent `u` and bitangent `v` (with `u x v` = `normal`),
/// offset along `normal` by `depth`.
fn quad(
    mesh: &mut Mesh,
    center: Vector3f,
    size: Vector3f,
    normal: Vector3f,
    u: Vector3f,
    v: Vector3f,
    depth: f32,
) {
    let base = center + normal * size * depth;
    let corner = |su: f32, sv: f32, uv: Vector2f| {
        Vertex::new(base + (u * su + v * sv) * size, normal, uv, Color::WHITE)
    };
    mesh.auto_quad_face(
        corner(-1.0, -1.0, QUAD_UV[0]),
        corner(1.0, -1.0, QUAD_UV[1]),
        corner(1.0, 1.0, QUAD_UV[2]),
        corner(-1.0, 1.0, QUAD_UV[3]),
    );
}

/// Single quad on the XZ plane facing `+Y`. `size.y` is ignored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub center: Vector3f,
    pub size: Vector3f,
}

impl Plane {
    pub fn new(center: Vector3f, size: Vector3f) -> Self {
        Self { center, size }
    }
}

impl ToMesh for Plane {
    fn to_mesh(&self) -> Mesh {
        let mut mesh = Mesh::default();
        quad(
            &mut mesh,
            self.center,
            self.size,
            Vector3f::UNIT_Y,
            Vector3f::UNIT_X,
            -Vector3f::UNIT_Z,
            0.0,
        );
        mesh
    }
}

/// Box with 24 unshared vertices and per-face normals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cube {
    pub center: Vector3f,
    pub size: Vector3f,
}

impl Cube {
    pub fn new(center: Vector3f, size: Vector3f) -> Self {
        Self { center, size }
    }
}

impl ToMesh for Cube {
    fn to_mesh(&self) -> Mesh {
        let (x, y, z) = (Vector3f::UNIT_X, Vector3f::UNIT_Y, Vector3f::UNIT_Z);
        // (normal, u, v)
        let faces = [
            (x, -z, y),
            (-x, z, y),
            (y, x, -z),
            (-y, x, z),
            (z, x, y),
            (-z, -x, y),
        ];

        let mut mesh = Mesh::default();
        for (normal, u, v) in faces {
            quad(&mut mesh, self.center, self.size, normal, u, v, 1.0);
        }
        mesh
    }
}

/// Base 20-face icosahedron. There is no subdivision level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IcoSphere {
    pub center: Vector3f,
    pub size: Vector3f,
}

impl IcoSphere {
    pub fn new(center: Vector3f, size: Vector3f) -> Self {
        Self { center, size }
    }
}

#[rustfmt::skip]
const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

impl ToMesh for IcoSphere {
    fn to_mesh(&self) -> Mesh {
        let t = (1.0 + 5f32.sqrt()) * 0.5;
        let directions = [
            Vector3f::new(-1.0, t, 0.0),
            Vector3f::new(1.0, t, 0.0),
            Vector3f::new(-1.0, -t, 0.0),
            Vector3f::new(1.0, -t, 0.0),
            Vector3f::new(0.0, -1.0, t),
            Vector3f::new(0.0, 1.0, t),
            Vector3f::new(0.0, -1.0, -t),
            Vector3f::new(0.0, 1.0, -t),
            Vector3f::new(t, 0.0, -1.0),
            Vector3f::new(t, 0.0, 1.0),
            Vector3f::new(-t, 0.0, -1.0),
            Vector3f::new(-t, 0.0, 1.0),
        ];

        let mut mesh = Mesh::default();
        for dir in directions {
            let normal = dir.normalize();
            // planar projection onto XY, not a spherical unwrap
            let uv = Vector2f::new(0.5 + normal.x * 0.5, 0.5 - normal.y * 0.5);
            mesh.add_vertex(Vertex::new(
                self.center + normal * self.size,
                normal,
                uv,
                Color::WHITE,
            ));
        }
        for [a, b, c] in ICOSAHEDRON_FACES {
            mesh.add_face(a, b, c);
        }
        mesh
    }
}
