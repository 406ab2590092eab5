//! CPU-side assets: mesh data, procedural primitives, the OBJ importer and
//! scene object assembly.

pub mod mesh;
pub mod obj;
pub mod primitives;
pub mod scene;

pub use mesh::{Mesh, Vertex};
pub use obj::{ObjDocument, ObjGroup, load_obj_from_path, load_obj_from_str};
pub use primitives::{Cube, IcoSphere, Plane, ToMesh};
pub use scene::{MeshSource, SceneObject, SceneObjectDesc};
