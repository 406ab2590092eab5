//! Scene object assembly from already-parsed numeric arrays.
//!
//! The scene file reader lives outside this crate; it hands over raw `f32`
//! arrays per entity and this module turns them into a [`Transform`] and a mesh.

use std::path::PathBuf;

use anyhow::{Context, Result};
use corelib::{Quaternion, Transform, Vector3f};

use crate::{
    mesh::Mesh,
    obj::mesh_from_obj_path,
    primitives::{Cube, IcoSphere, Plane, ToMesh},
};

/// Where an object's geometry comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum MeshSource {
    Obj(PathBuf),
    Plane,
    Cube,
    IcoSphere,
}

impl MeshSource {
    /// Primitives are generated around the origin with unit half extents;
    /// placement and size come from the object's transform. An OBJ that
    /// cannot be loaded is logged and gives an empty mesh.
    pub fn load(&self) -> Mesh {
        match self {
            MeshSource::Obj(path) => mesh_from_obj_path(path),
            MeshSource::Plane => Plane::new(Vector3f::ZERO, Vector3f::ONE).to_mesh(),
            MeshSource::Cube => Cube::new(Vector3f::ZERO, Vector3f::ONE).to_mesh(),
            MeshSource::IcoSphere => IcoSphere::new(Vector3f::ZERO, Vector3f::ONE).to_mesh(),
        }
    }
}

/// One scene entity as handed over by the scene reader.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObjectDesc {
    pub name: String,
    pub location: Vec<f32>,
    /// Euler-like angles in radians, composed X, then Z, then Y.
    pub orientation: Vec<f32>,
    pub size: Vec<f32>,
    pub mesh: MeshSource,
}

#[derive(Clone, Debug)]
pub struct SceneObject {
    pub name: String,
    pub transform: Transform,
    pub mesh: Mesh,
}

impl SceneObjectDesc {
    pub fn build(&self) -> Result<SceneObject> {
        let location = Vector3f::try_from(self.location.as_slice())
            .with_context(|| format!("Object '{}': bad location", self.name))?;
        let angles = Vector3f::try_from(self.orientation.as_slice())
            .with_context(|| format!("Object '{}': bad orientation", self.name))?;
        let size = Vector3f::try_from(self.size.as_slice())
            .with_context(|| format!("Object '{}': bad size", self.name))?;

        let transform = Transform::from_trs(location, Quaternion::from_euler_xzy(angles), size);
        let mesh = self.mesh.load();
        if mesh.is_empty() {
            log::warn!("Object '{}' has no geometry", self.name);
        }

        log::debug!(
            "Built object '{}': {} vertices, {} triangles",
            self.name,
            mesh.vertices.len(),
            mesh.triangle_count()
        );
        Ok(SceneObject {
            name: self.name.clone(),
            transform,
            mesh,
        })
    }
}
