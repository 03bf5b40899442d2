//! Scene input: OBJ meshes and JSON render configuration.

use glint_math::Vec3;
use glint_renderer::{Color, Material, Mesh, RenderConfig, Triangle};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading scene input.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to load OBJ {path}: {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No triangles found in {0}")]
    NoTriangles(PathBuf),
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Color of loaded meshes.
pub const MESH_COLOR: Color = Color::splat(0.9);

/// Load every model in an OBJ file as one unplaced mesh.
pub fn load_obj<P: AsRef<Path>>(path: P, material: Material) -> LoadResult<Mesh> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        },
    )
    .map_err(|source| LoadError::Obj {
        path: path.to_path_buf(),
        source,
    })?;

    let triangles: Vec<Triangle> = models
        .iter()
        .flat_map(|model| triangles_from_indexed(&model.mesh.positions, &model.mesh.indices, material))
        .collect();

    if triangles.is_empty() {
        return Err(LoadError::NoTriangles(path.to_path_buf()));
    }

    log::info!(
        "Loaded {} triangles from {} models in {}",
        triangles.len(),
        models.len(),
        path.display()
    );
    Ok(Mesh::new(triangles))
}

/// Build triangles from flat positions and triangle indices.
///
/// Faces referencing a vertex past the end of `positions` are skipped.
pub fn triangles_from_indexed(positions: &[f32], indices: &[u32], material: Material) -> Vec<Triangle> {
    let vertex = |i: u32| {
        let i = i as usize * 3;
        positions.get(i..i + 3).map(Vec3::from_slice)
    };

    let mut skipped = 0;
    let triangles: Vec<Triangle> = indices
        .chunks_exact(3)
        .filter_map(|face| {
            let tri = match (vertex(face[0]), vertex(face[1]), vertex(face[2])) {
                (Some(v0), Some(v1), Some(v2)) => Some(Triangle::new(v0, v1, v2, material)),
                _ => None,
            };
            if tri.is_none() {
                skipped += 1;
            }
            tri
        })
        .collect();

    if skipped > 0 {
        log::warn!("Skipped {} faces with out-of-range indices", skipped);
    }
    triangles
}

/// Read a JSON render configuration. Missing fields take their defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> LoadResult<RenderConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("glint_{}_{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_indexed_triangles() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0];
        let indices = [0, 1, 2, 1, 3, 2];
        let tris = triangles_from_indexed(&positions, &indices, Material::diffuse(MESH_COLOR));
        assert_eq!(tris.len(), 2);
        assert_eq!(tris[1].vertices()[1], Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_out_of_range_faces_skipped() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let indices = [0, 1, 2, 0, 1, 7];
        let tris = triangles_from_indexed(&positions, &indices, Material::default());
        assert_eq!(tris.len(), 1);
    }

    #[test]
    fn test_load_obj_quad() {
        let path = temp_file(
            "quad.obj",
            "v -1 0 -1\nv 1 0 -1\nv 1 0 1\nv -1 0 1\nf 1 2 3 4\n",
        );
        let mesh = load_obj(&path, Material::diffuse(MESH_COLOR)).unwrap();
        assert_eq!(mesh.triangles().len(), 2);
        assert!(!mesh.has_bvh());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_obj_without_faces() {
        let path = temp_file("points.obj", "v 0 0 0\nv 1 0 0\n");
        let err = load_obj(&path, Material::default()).unwrap_err();
        assert!(matches!(err, LoadError::NoTriangles(_)));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_obj() {
        let err = load_obj("/nonexistent/glint.obj", Material::default()).unwrap_err();
        assert!(matches!(err, LoadError::Obj { .. }));
    }

    #[test]
    fn test_partial_config() {
        let path = temp_file("config.json", r#"{ "max_depth": 3 }"#);
        let config = load_config(&path).unwrap();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.sky_color, RenderConfig::default().sky_color);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_bad_config() {
        let path = temp_file("bad.json", "{ max_depth: }");
        assert!(matches!(load_config(&path), Err(LoadError::ConfigParse { .. })));
        std::fs::remove_file(path).ok();

        assert!(matches!(
            load_config("/nonexistent/glint.json"),
            Err(LoadError::ConfigRead { .. })
        ));
    }
}
