//! Wavefront OBJ importer.
//!
//! Parsing is line oriented and forgiving: a malformed line is logged and the
//! importer moves on. Vertex attribute lines that fail to parse still append a
//! zero value so later 1-based references keep pointing at the right element.
//! Faces are fan-triangulated from their first vertex while parsing, so each
//! [`ObjGroup`] holds flat index triples.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    num::{ParseFloatError, ParseIntError},
    path::Path,
};

use anyhow::{Context, Result};
use corelib::{Vector2f, Vector3f};
use thiserror::Error;

use crate::mesh::{Mesh, Vertex};

/// Group used for faces that appear before any `g` statement.
pub const DEFAULT_GROUP: &str = "default";
/// Name given to a `g` statement without a name.
pub const UNNAMED_GROUP: &str = "unnamed";

/// Why a single OBJ line was rejected or only partially understood.
#[derive(Debug, Error)]
pub enum ObjLineError {
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("invalid number '{token}': {source}")]
    Number {
        token: String,
        #[source]
        source: ParseFloatError,
    },
    #[error("invalid index '{token}': {source}")]
    Index {
        token: String,
        #[source]
        source: ParseIntError,
    },
    #[error("index 0 is not a valid 1-based reference")]
    ZeroIndex,
    #[error("index {0} does not fit in 32 bits")]
    IndexTooLarge(i64),
    #[error("relative index {index} reaches before the first of {len} elements")]
    RelativeOutOfRange { index: i64, len: usize },
    #[error("face needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
}

/// Named run of triangles. The three index lists are parallel and 0-based;
/// every three consecutive entries form one triangle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjGroup {
    pub name: String,
    pub material: Option<String>,
    pub position_index: Vec<u32>,
    pub texture_index: Vec<u32>,
    pub normal_index: Vec<u32>,
}

impl ObjGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.position_index.len() / 3
    }

    fn push_corner(&mut self, corner: FaceVertex) {
        self.position_index.push(corner.position);
        self.texture_index.push(corner.texture);
        self.normal_index.push(corner.normal);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FaceVertex {
    position: u32,
    texture: u32,
    normal: u32,
}

/// Parsed contents of one OBJ file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjDocument {
    pub name: String,
    pub groups: Vec<ObjGroup>,
    pub positions: Vec<Vector3f>,
    pub normals: Vec<Vector3f>,
    pub tex_coords: Vec<Vector2f>,
    pub material_libraries: Vec<String>,
    pub has_normals: bool,
    pub has_texture: bool,
    /// `false` when the source could not be read at all.
    pub is_valid: bool,
}

impl ObjDocument {
    /// Read an OBJ file. An unreadable file is logged and gives an invalid document.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file = match File::open(path)
            .with_context(|| format!("Failed to open OBJ file: {}", path.display()))
        {
            Ok(file) => file,
            Err(e) => {
                log::error!("{e:#}");
                return Self::default();
            }
        };
        let doc = Self::from_reader(BufReader::new(file));
        log::debug!(
            "Loaded OBJ {}: {} positions, {} groups",
            path.display(),
            doc.positions.len(),
            doc.groups.len()
        );
        doc
    }

    /// Parse from any [`BufRead`]. A read failure is logged and gives an invalid document.
    pub fn from_reader<R: BufRead>(reader: R) -> Self {
        match Self::try_from_reader(reader) {
            Ok(doc) => doc,
            Err(e) => {
                log::error!("{e:#}");
                Self::default()
            }
        }
    }

    /// Parse OBJ text held in memory.
    pub fn parse(contents: &str) -> Self {
        Self::from_reader(io::Cursor::new(contents))
    }

    fn try_from_reader<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut doc = Self::default();
        let mut buf = Vec::new();
        let mut line_no = 0usize;
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .with_context(|| format!("Failed to read line {}", line_no + 1))?;
            if read == 0 {
                break;
            }
            line_no += 1;

            // invalid UTF-8 becomes U+FFFD instead of failing the read
            let line = String::from_utf8_lossy(&buf);
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if let Err(e) = doc.parse_line(trimmed) {
                log::warn!("OBJ line {}: {} ('{}')", line_no, e, trimmed);
            }
        }
        doc.is_valid = true;
        Ok(doc)
    }

    fn parse_line(&mut self, line: &str) -> Result<(), ObjLineError> {
        let mut parts = line.split_whitespace();
        let Some(tag) = parts.next() else {
            return Ok(());
        };

        match tag {
            "v" => push_or_default(&mut self.positions, parse_vector3(parts)),
            "vn" => {
                self.has_normals = true;
                push_or_default(&mut self.normals, parse_vector3(parts))
            }
            "vt" => {
                self.has_texture = true;
                push_or_default(&mut self.tex_coords, parse_vector2(parts))
            }
            "f" => self.parse_face(parts),
            "o" => {
                let name = join_name(parts);
                if name.is_empty() {
                    return Err(ObjLineError::Missing("object name"));
                }
                self.name = name;
                Ok(())
            }
            "g" => {
                let name = join_name(parts);
                if name.is_empty() {
                    self.groups.push(ObjGroup::new(UNNAMED_GROUP));
                    return Err(ObjLineError::Missing("group name"));
                }
                self.groups.push(ObjGroup::new(name));
                Ok(())
            }
            "usemtl" => {
                let name = join_name(parts);
                if name.is_empty() {
                    return Err(ObjLineError::Missing("material name"));
                }
                self.current_group().material = Some(name);
                Ok(())
            }
            "mtllib" => {
                self.material_libraries.extend(parts.map(str::to_owned));
                Ok(())
            }
            other => {
                log::debug!("Ignoring OBJ statement '{}'", other);
                Ok(())
            }
        }
    }

    fn parse_face<'a>(&mut self, parts: impl Iterator<Item = &'a str>) -> Result<(), ObjLineError> {
        let corners = parts
            .map(|token| self.parse_face_vertex(token))
            .collect::<Result<Vec<_>, _>>()?;
        if corners.len() < 3 {
            return Err(ObjLineError::TooFewVertices(corners.len()));
        }

        // fan around the first listed vertex
        let group = self.current_group();
        for k in 2..corners.len() {
            group.push_corner(corners[0]);
            group.push_corner(corners[k - 1]);
            group.push_corner(corners[k]);
        }
        Ok(())
    }

    /// `position[/texture][/normal]`. An empty texture or normal slot becomes index 0.
    fn parse_face_vertex(&self, token: &str) -> Result<FaceVertex, ObjLineError> {
        let mut split = token.split('/');
        let position = match split.next() {
            Some(value) if !value.is_empty() => resolve_index(value, self.positions.len())?,
            _ => return Err(ObjLineError::Missing("position index")),
        };
        let texture = match split.next() {
            Some(value) if !value.is_empty() => resolve_index(value, self.tex_coords.len())?,
            _ => 0,
        };
        let normal = match split.next() {
            Some(value) if !value.is_empty() => resolve_index(value, self.normals.len())?,
            _ => 0,
        };
        Ok(FaceVertex {
            position,
            texture,
            normal,
        })
    }

    /// Last group, creating the default one on first use.
    fn current_group(&mut self) -> &mut ObjGroup {
        if self.groups.is_empty() {
            self.groups.push(ObjGroup::new(DEFAULT_GROUP));
        }
        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }

    pub fn triangle_count(&self) -> usize {
        self.groups.iter().map(ObjGroup::triangle_count).sum()
    }

    /// Vertex for the `i`-th corner of `group`, or `None` if its position is out of range.
    fn corner(&self, group: &ObjGroup, i: usize) -> Option<Vertex> {
        let position = *self.positions.get(group.position_index[i] as usize)?;
        let mut vertex = Vertex::at(position);
        if self.has_normals {
            vertex.normal = self
                .normals
                .get(group.normal_index[i] as usize)
                .copied()
                .unwrap_or_default();
        }
        if self.has_texture {
            vertex.tex_coord = self
                .tex_coords
                .get(group.texture_index[i] as usize)
                .copied()
                .unwrap_or_default();
        }
        Some(vertex)
    }
}

fn push_or_default<T: Default>(
    target: &mut Vec<T>,
    parsed: Result<T, ObjLineError>,
) -> Result<(), ObjLineError> {
    match parsed {
        Ok(value) => {
            target.push(value);
            Ok(())
        }
        Err(e) => {
            target.push(T::default());
            Err(e)
        }
    }
}

fn join_name<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join(" ")
}

fn parse_f32(value: Option<&str>, what: &'static str) -> Result<f32, ObjLineError> {
    let token = value.ok_or(ObjLineError::Missing(what))?;
    token.parse::<f32>().map_err(|source| ObjLineError::Number {
        token: token.to_owned(),
        source,
    })
}

fn parse_vector3<'a>(mut parts: impl Iterator<Item = &'a str>) -> Result<Vector3f, ObjLineError> {
    let x = parse_f32(parts.next(), "x coordinate")?;
    let y = parse_f32(parts.next(), "y coordinate")?;
    let z = parse_f32(parts.next(), "z coordinate")?;
    Ok(Vector3f::new(x, y, z))
}

fn parse_vector2<'a>(mut parts: impl Iterator<Item = &'a str>) -> Result<Vector2f, ObjLineError> {
    let u = parse_f32(parts.next(), "u coordinate")?;
    let v = parse_f32(parts.next(), "v coordinate")?;
    Ok(Vector2f::new(u, v))
}

/// 1-based (or negative, relative to `len`) reference to a 0-based index.
fn resolve_index(token: &str, len: usize) -> Result<u32, ObjLineError> {
    let raw = token.parse::<i64>().map_err(|source| ObjLineError::Index {
        token: token.to_owned(),
        source,
    })?;
    match raw {
        0 => Err(ObjLineError::ZeroIndex),
        r if r > 0 => u32::try_from(r - 1).map_err(|_| ObjLineError::IndexTooLarge(r)),
        r => {
            let idx = len as i64 + r;
            if idx < 0 {
                Err(ObjLineError::RelativeOutOfRange { index: r, len })
            } else {
                u32::try_from(idx).map_err(|_| ObjLineError::IndexTooLarge(idx))
            }
        }
    }
}

/// Build a triangle mesh from a parsed document. Invalid or empty documents are
/// logged and give an empty mesh; triangles with out-of-range positions are skipped.
pub fn mesh_from_obj_document(doc: &ObjDocument) -> Mesh {
    if !doc.is_valid {
        log::error!("Cannot build mesh from unreadable OBJ document '{}'", doc.name);
        return Mesh::default();
    }
    if doc.positions.is_empty() || doc.triangle_count() == 0 {
        log::error!("OBJ document '{}' contains no triangles", doc.name);
        return Mesh::default();
    }

    let mut mesh = Mesh::default();
    let mut skipped = 0usize;
    for group in &doc.groups {
        for tri in 0..group.triangle_count() {
            let corners = (0..3)
                .map(|k| doc.corner(group, tri * 3 + k))
                .collect::<Option<Vec<_>>>();
            match corners.as_deref() {
                Some(&[a, b, c]) => mesh.auto_tri_face(a, b, c),
                _ => skipped += 1,
            }
        }
    }
    if skipped > 0 {
        log::warn!(
            "OBJ document '{}': skipped {} triangles with out-of-range positions",
            doc.name,
            skipped
        );
    }
    mesh
}

/// Load an OBJ file into a mesh. Any failure is logged and gives an empty mesh.
pub fn mesh_from_obj_path(path: impl AsRef<Path>) -> Mesh {
    mesh_from_obj_document(&ObjDocument::from_path(path))
}

/// Load an OBJ mesh from a file path, failing if it is unreadable or has no triangles.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> Result<Mesh> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open OBJ file: {}", path.as_ref().display()))?;
    load_obj_from_reader(BufReader::new(file))
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> Result<Mesh> {
    let doc = ObjDocument::try_from_reader(reader)?;
    let mesh = mesh_from_obj_document(&doc);
    if mesh.is_empty() {
        anyhow::bail!("OBJ contained no triangles");
    }
    Ok(mesh)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> Result<Mesh> {
    load_obj_from_reader(io::Cursor::new(contents))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_triangle_end_to_end() {
        let doc = ObjDocument::parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        assert!(doc.is_valid);
        assert!(!doc.has_normals && !doc.has_texture);

        let mesh = mesh_from_obj_document(&doc);
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.vertices[1].position, Vector3f::new(1.0, 0.0, 0.0));
        for v in &mesh.vertices {
            assert_eq!(v.normal, Vector3f::ZERO);
            assert_eq!(v.tex_coord, Vector2f::ZERO);
            assert_eq!(v.color, corelib::Color::WHITE);
        }
    }

    #[test]
    fn pentagon_fans_from_first_vertex() {
        let doc = ObjDocument::parse(
            "v 0 0 0\nv 1 0 0\nv 2 1 0\nv 1 2 0\nv 0 1 0\nf 1 2 3 4 5\n",
        );
        assert_eq!(doc.groups.len(), 1);
        assert_eq!(doc.groups[0].name, DEFAULT_GROUP);
        assert_eq!(doc.groups[0].position_index, vec![0, 1, 2, 0, 2, 3, 0, 3, 4]);
    }

    #[test]
    fn quad_diagonal_starts_at_first_listed_vertex() {
        let doc = ObjDocument::parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 3 4 1 2\n");
        assert_eq!(doc.groups[0].position_index, vec![2, 3, 0, 2, 0, 1]);
    }

    #[test]
    fn full_references_pick_normals_and_uvs() {
        let src = r#"
            o tri
            v 0.0 0.0 0.0
            v 1.0 0.0 0.0
            v 0.0 1.0 0.0
            vn 0.0 0.0 1.0
            vt 0.0 0.0
            vt 1.0 0.0
            vt 0.0 1.0
            f 1/1/1 2/2/1 3/3/1
        "#;
        let doc = ObjDocument::parse(src);
        assert_eq!(doc.name, "tri");
        assert!(doc.has_normals && doc.has_texture);

        let mesh = mesh_from_obj_document(&doc);
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.vertices[1].tex_coord, Vector2f::new(1.0, 0.0));
        assert!(mesh.vertices.iter().all(|v| v.normal == Vector3f::UNIT_Z));
    }

    #[test]
    fn empty_sub_index_aliases_first_element() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.5 0.5\nvt 1 1\nvn 0 1 0\nvn 0 0 1\nf 1//2 2//2 3//2\nf 1/2 2/2 3/2\n";
        let doc = ObjDocument::parse(src);
        let group = &doc.groups[0];
        assert_eq!(&group.texture_index[..3], &[0, 0, 0]);
        assert_eq!(&group.normal_index[..3], &[1, 1, 1]);
        assert_eq!(&group.texture_index[3..], &[1, 1, 1]);
        assert_eq!(&group.normal_index[3..], &[0, 0, 0]);

        let mesh = mesh_from_obj_document(&doc);
        assert_eq!(mesh.vertices[0].tex_coord, Vector2f::new(0.5, 0.5));
        assert_eq!(mesh.vertices[3].normal, Vector3f::UNIT_Y);
    }

    #[test]
    fn malformed_attributes_append_zero() {
        let src = "v 1 1 1\nv 2 oops 2\nv 3 3 3\nvn nope\nvt 0.5\nf 1 2 3\n";
        let doc = ObjDocument::parse(src);
        assert_eq!(
            doc.positions,
            vec![Vector3f::ONE, Vector3f::ZERO, Vector3f::splat(3.0)]
        );
        assert_eq!(doc.normals, vec![Vector3f::ZERO]);
        assert_eq!(doc.tex_coords, vec![Vector2f::ZERO]);
        assert!(doc.has_normals);
        assert!(doc.has_texture);
        assert_eq!(doc.groups[0].position_index, vec![0, 1, 2]);
    }

    #[test]
    fn bad_faces_are_rejected_whole() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2\nf 1 2 x 4\nf 1 0 3\nf 2 4 3\n";
        let doc = ObjDocument::parse(src);
        assert_eq!(doc.triangle_count(), 1);
        assert_eq!(doc.groups[0].position_index, vec![1, 3, 2]);
    }

    #[test]
    fn groups_and_materials() {
        let src = "mtllib scene.mtl extra.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\ng\nusemtl stone\nf 1 2 3\ng wall left\nf 3 2 1\n";
        let doc = ObjDocument::parse(src);
        let names: Vec<_> = doc.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec![DEFAULT_GROUP, UNNAMED_GROUP, "wall left"]);
        assert_eq!(doc.groups[1].material.as_deref(), Some("stone"));
        assert_eq!(doc.groups[2].material, None);
        assert_eq!(doc.material_libraries, vec!["scene.mtl", "extra.mtl"]);

        let mesh = mesh_from_obj_document(&doc);
        assert_eq!(mesh.triangle_count(), 3);
        assert_eq!(mesh.vertices.len(), 9);
    }

    #[test]
    fn negative_indices_are_relative() {
        let doc = ObjDocument::parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\nf -4 -2 -1\n");
        assert_eq!(doc.groups[0].position_index, vec![0, 1, 2]);
    }

    #[test]
    fn non_utf8_lines_do_not_abort_the_file() {
        let bytes: &[u8] = b"# caf\xE9\nv 0 0 0\nv 1 0 0\nv 0 1 0\ng r\xE9gion\nf 1 2 3\n";
        let doc = ObjDocument::from_reader(io::Cursor::new(bytes));
        assert!(doc.is_valid);
        assert_eq!(doc.positions.len(), 3);
        assert_eq!(doc.triangle_count(), 1);
        assert_eq!(doc.groups[0].name, "r\u{FFFD}gion");
    }

    #[test]
    fn oversized_indices_reject_the_face() {
        let doc = ObjDocument::parse(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 4294967297 2 3\nf 4294967296 2 3\nf 1 2 3\n",
        );
        // the first face is rejected; the second parses but points past the positions
        assert_eq!(doc.triangle_count(), 2);
        assert_eq!(doc.groups[0].position_index, vec![u32::MAX, 1, 2, 0, 1, 2]);
        assert_eq!(mesh_from_obj_document(&doc).triangle_count(), 1);
        assert!(matches!(
            resolve_index("4294967297", 3),
            Err(ObjLineError::IndexTooLarge(4294967297))
        ));
        assert_eq!(resolve_index("4294967296", 0).unwrap(), u32::MAX);
    }

    #[test]
    fn comments_blank_lines_and_crlf() {
        let doc = ObjDocument::parse("# header\r\n\r\nv 0 0 0\r\nv 1 0 0\r\nv 0 1 0\r\ns off\r\nf 1 2 3\r\n");
        assert_eq!(doc.positions.len(), 3);
        assert_eq!(doc.triangle_count(), 1);
    }

    #[test]
    fn out_of_range_positions_are_skipped() {
        let doc = ObjDocument::parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9\nf 1 2 3\n");
        assert_eq!(doc.triangle_count(), 2);
        let mesh = mesh_from_obj_document(&doc);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn unusable_documents_give_empty_mesh() {
        assert!(mesh_from_obj_document(&ObjDocument::default()).is_empty());
        assert!(mesh_from_obj_document(&ObjDocument::parse("v 0 0 0\n")).is_empty());
        assert!(mesh_from_obj_document(&ObjDocument::parse("f 1 2 3\n")).is_empty());
    }

    #[test]
    fn missing_file_is_invalid() {
        let path = std::env::temp_dir().join("sgengine-missing-file-for-tests.obj");
        let doc = ObjDocument::from_path(&path);
        assert!(!doc.is_valid);
        let mesh = mesh_from_obj_path(&path);
        assert!(mesh.vertices.is_empty() && mesh.indices.is_empty());
        assert!(load_obj_from_path(&path).is_err());
    }

    #[test]
    fn reads_from_disk() {
        let path =
            std::env::temp_dir().join(format!("sgengine-obj-test-{}.obj", std::process::id()));
        std::fs::write(&path, "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();
        let mesh = mesh_from_obj_path(&path);
        let strict = load_obj_from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh, strict);
    }

    #[test]
    fn strict_loader_requires_triangles() {
        assert!(load_obj_from_str("v 0 0 0\nv 1 0 0\n").is_err());
        let mesh = load_obj_from_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert!(mesh.is_valid());
    }
}
