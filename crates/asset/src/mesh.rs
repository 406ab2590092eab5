//! CPU-side mesh representation used by loaders and primitive generators.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use corelib::{Aabb, Color, Matrix4f, Vector2f, Vector3f};

/// Vertex with position/normal/uv/color, laid out for direct buffer upload.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: Vector3f,
    pub normal: Vector3f,
    pub tex_coord: Vector2f,
    pub color: Color,
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new(Vector3f::ZERO, Vector3f::ZERO, Vector2f::ZERO, Color::WHITE)
    }
}

impl Vertex {
    pub fn new(position: Vector3f, normal: Vector3f, tex_coord: Vector2f, color: Color) -> Self {
        Self {
            position,
            normal,
            tex_coord,
            color,
        }
    }

    /// Vertex with only a position; other attributes take their defaults.
    pub fn at(position: Vector3f) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// Indexed triangle list. Append-only while building; vertices are never
/// shared or welded unless [`Mesh::simplify`] is called.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Returns `true` if both buffers are non-empty and indices form whole triangles.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty() && self.indices.len() % 3 == 0
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Append a vertex and return its index.
    pub fn add_vertex(&mut self, vertex: Vertex) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        index
    }

    pub fn add_face(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Append three fresh vertices and the triangle between them.
    pub fn auto_tri_face(&mut self, v1: Vertex, v2: Vertex, v3: Vertex) {
        let a = self.add_vertex(v1);
        let b = self.add_vertex(v2);
        let c = self.add_vertex(v3);
        self.add_face(a, b, c);
    }

    /// Append four fresh vertices and two triangles sharing the `v1`-`v3` diagonal.
    /// Counter-clockwise input gives counter-clockwise triangles.
    pub fn auto_quad_face(&mut self, v1: Vertex, v2: Vertex, v3: Vertex, v4: Vertex) {
        let a = self.add_vertex(v1);
        let b = self.add_vertex(v2);
        let c = self.add_vertex(v3);
        let d = self.add_vertex(v4);
        self.add_face(a, c, d);
        self.add_face(a, b, c);
    }

    /// Append another mesh, offsetting its indices past the current vertices.
    pub fn append(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + offset));
    }

    /// Bounds of all vertex positions; empty for an empty mesh.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| v.position))
    }

    /// Transform positions by `m` and normals by its inverse transpose.
    pub fn transform(&mut self, m: &Matrix4f) {
        let normal_matrix = m.to_matrix3().inverse().transpose();
        for v in &mut self.vertices {
            v.position = m.transform_point(v.position);
            v.normal = (normal_matrix * v.normal).normalize();
        }
    }

    /// Merge bit-identical vertices and remap indices. Returns how many vertices were removed.
    /// Indices that point past the vertex list are left as they are.
    pub fn simplify(&mut self) -> usize {
        let mut seen: HashMap<[u32; 9], u32> = HashMap::with_capacity(self.vertices.len());
        let mut remap = Vec::with_capacity(self.vertices.len());
        let mut unique = Vec::new();

        for v in &self.vertices {
            let key: [u32; 9] = bytemuck::cast(*v);
            let index = *seen.entry(key).or_insert_with(|| {
                unique.push(*v);
                (unique.len() - 1) as u32
            });
            remap.push(index);
        }

        let removed = self.vertices.len() - unique.len();
        self.vertices = unique;
        for i in &mut self.indices {
            if let Some(&mapped) = remap.get(*i as usize) {
                *i = mapped;
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> [Vertex; 4] {
        [
            Vertex::at(Vector3f::new(0.0, 0.0, 0.0)),
            Vertex::at(Vector3f::new(1.0, 0.0, 0.0)),
            Vertex::at(Vector3f::new(1.0, 1.0, 0.0)),
            Vertex::at(Vector3f::new(0.0, 1.0, 0.0)),
        ]
    }

    fn face_normal(mesh: &Mesh, tri: usize) -> Vector3f {
        let p = |k: usize| mesh.vertices[mesh.indices[tri * 3 + k] as usize].position;
        (p(1) - p(0)).cross(p(2) - p(0))
    }

    #[test]
    fn mesh_data_validity() {
        let data = Mesh::new(vec![Vertex::default()], vec![0, 0, 0]);
        assert!(data.is_valid());
        assert!(!Mesh::default().is_valid());
        assert!(!Mesh::new(vec![Vertex::default()], vec![0]).is_valid());
    }

    #[test]
    fn vertex_layout_is_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 36);
        assert_eq!(Vertex::default().color, Color::WHITE);
    }

    #[test]
    fn quad_winding() {
        let [a, b, c, d] = square();
        let mut mesh = Mesh::default();
        mesh.auto_quad_face(a, b, c, d);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 2, 3, 0, 1, 2]);
        for tri in 0..2 {
            assert!(face_normal(&mesh, tri).z > 0.0);
        }
    }

    #[test]
    fn auto_faces_keep_triangle_invariant() {
        let [a, b, c, d] = square();
        let mut mesh = Mesh::default();
        mesh.auto_tri_face(a, b, c);
        mesh.auto_quad_face(a, b, c, d);
        mesh.auto_tri_face(c, d, a);
        assert_eq!(mesh.indices.len() % 3, 0);
        assert_eq!(mesh.triangle_count(), 4);
        // no sharing: every triangle references fresh vertices
        assert_eq!(mesh.vertices.len(), 10);
        assert_eq!(&mesh.indices[..3], &[0, 1, 2]);
        assert_eq!(&mesh.indices[3..9], &[3, 5, 6, 3, 4, 5]);
    }

    #[test]
    fn simplify_welds_duplicates() {
        let [a, b, c, d] = square();
        let mut mesh = Mesh::default();
        mesh.auto_quad_face(a, b, c, d);
        mesh.auto_tri_face(a, b, c);
        assert_eq!(mesh.simplify(), 3);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 2, 3, 0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn simplify_keeps_dangling_indices() {
        let [a, b, c, _] = square();
        let mut mesh = Mesh::new(vec![a, b, a, c], vec![2, 1, 3, 0, 1, 9]);
        assert_eq!(mesh.simplify(), 1);
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 1, 9]);
    }

    #[test]
    fn append_offsets_indices() {
        let [a, b, c, _] = square();
        let mut first = Mesh::default();
        first.auto_tri_face(a, b, c);
        let second = first.clone();
        first.append(&second);
        assert_eq!(first.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(first.bounds(), Aabb::new(Vector3f::ZERO, Vector3f::new(1.0, 1.0, 0.0)));
        assert!(Mesh::default().bounds().is_empty());
    }

    #[test]
    fn transform_moves_positions_and_keeps_unit_normals() {
        let mut mesh = Mesh::default();
        mesh.add_vertex(Vertex::new(
            Vector3f::ONE,
            Vector3f::UNIT_Y,
            Vector2f::ZERO,
            Color::WHITE,
        ));
        let m = Matrix4f::translation(Vector3f::new(0.0, 0.0, 5.0))
            * Matrix4f::scale(Vector3f::new(2.0, 4.0, 1.0));
        mesh.transform(&m);
        assert_eq!(mesh.vertices[0].position, Vector3f::new(2.0, 4.0, 6.0));
        assert!(mesh.vertices[0].normal.compare(Vector3f::UNIT_Y, 1e-6));
    }
}
