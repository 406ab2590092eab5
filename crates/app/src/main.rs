//! Headless demo for the SGEngine core.
//! Builds one scene object (OBJ file or primitive), then steps a camera and
//! the object's transform for a few frames, logging matrices and bounds.

use std::path::PathBuf;

use anyhow::Result;
use asset::{MeshSource, SceneObjectDesc};
use corelib::{Camera, Transform, Vector3f, math::scalar::to_radians};

#[derive(Clone, Debug, PartialEq)]
struct Options {
    mesh: MeshSource,
    frames: u32,
    simplify: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mesh: MeshSource::Cube,
            frames: 3,
            simplify: false,
        }
    }
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Options {
    // Accept: --obj=PATH --primitive=plane|cube|icosphere --frames=N --simplify
    let mut opts = Options::default();
    for arg in args {
        if let Some(val) = arg.strip_prefix("--obj=") {
            opts.mesh = MeshSource::Obj(PathBuf::from(val));
        } else if let Some(val) = arg.strip_prefix("--primitive=") {
            opts.mesh = match val.to_ascii_lowercase().as_str() {
                "plane" => MeshSource::Plane,
                "cube" | "box" => MeshSource::Cube,
                "icosphere" | "sphere" => MeshSource::IcoSphere,
                other => {
                    log::warn!("Unknown primitive '{}', falling back to cube.", other);
                    MeshSource::Cube
                }
            };
        } else if let Some(val) = arg.strip_prefix("--frames=") {
            match val.parse::<u32>() {
                Ok(n) => opts.frames = n,
                Err(_) => log::warn!("Invalid frame count '{}', keeping {}.", val, opts.frames),
            }
        } else if arg == "--simplify" {
            opts.simplify = true;
        }
    }
    opts
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = parse_args(std::env::args().skip(1));
    log::info!(
        "Starting SGEngine demo. Mesh: {:?}, frames={}, simplify={}",
        opts.mesh,
        opts.frames,
        opts.simplify
    );

    let desc = SceneObjectDesc {
        name: "demo".into(),
        location: vec![0.0, 0.0, 0.0],
        orientation: vec![0.0, 0.0, 0.0],
        size: vec![1.0, 1.0, 1.0],
        mesh: opts.mesh.clone(),
    };
    let mut object = desc.build()?;
    if opts.simplify {
        let removed = object.mesh.simplify();
        log::info!("Simplify removed {} duplicate vertices", removed);
    }
    log::info!(
        "Object '{}': {} vertices, {} triangles, valid={}",
        object.name,
        object.mesh.vertices.len(),
        object.mesh.triangle_count(),
        object.mesh.is_valid()
    );

    let mut camera_transform = Transform::identity();
    camera_transform.position = Vector3f::new(0.0, 1.0, -5.0);
    let mut camera =
        Camera::new_perspective(camera_transform, to_radians(60.0), 0.1, 100.0, 16.0 / 9.0);

    for frame in 0..opts.frames {
        object.transform.rotate_world(Vector3f::UNIT_Y, to_radians(15.0));
        camera.look(0.0, to_radians(-2.0));
        camera.move_local(Vector3f::new(0.0, 0.0, 0.25));

        let model = object.transform.transformation_matrix();
        let mvp = camera.proj_view() * model;

        let mut world = object.mesh.clone();
        world.transform(&model);
        let bounds = world.bounds();

        log::info!(
            "Frame {}: world bounds min={:?} max={:?}",
            frame,
            bounds.min,
            bounds.max
        );
        log::debug!("Frame {}: model={:?}", frame, model.to_cols_array());
        log::debug!("Frame {}: mvp={:?}", frame, mvp.to_cols_array());
    }

    log::info!("Done.");
    Ok(())
}
