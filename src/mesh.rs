//! Triangle mesh used by the goggles layer and its per-face star instances.

use std::collections::HashMap;
use std::path::Path;

use glam::Vec3;

use crate::error::{EngineError, EngineResult};

/// Centroid and area of one triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceInstance {
    pub centroid: Vec3,
    pub area: f32,
}

/// Indexed triangle mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[u32; 3]>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec3>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Parse Wavefront OBJ text; polygons are triangulated and all models merged
    pub fn from_obj_str(obj_content: &str) -> EngineResult<Self> {
        let mut cursor = std::io::Cursor::new(obj_content.as_bytes());

        let load_options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };

        let (models, _materials) =
            tobj::load_obj_buf(&mut cursor, &load_options, |_| Ok((vec![], HashMap::new())))
                .map_err(|e| EngineError::asset(format!("failed to parse OBJ: {}", e)))?;

        let mut vertices = Vec::new();
        let mut faces = Vec::new();

        for model in &models {
            let mesh = &model.mesh;
            let offset = vertices.len() as u32;

            vertices.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );
            faces.extend(
                mesh.indices
                    .chunks_exact(3)
                    .map(|tri| [offset + tri[0], offset + tri[1], offset + tri[2]]),
            );
        }

        if vertices.is_empty() {
            return Err(EngineError::asset("OBJ contains no vertices"));
        }

        Ok(Self { vertices, faces })
    }

    pub fn load_obj(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::asset(format!("{}: {}", path.display(), e)))?;
        let mesh = Self::from_obj_str(&content)?;
        log::info!(
            "mesh: {} ({} vertices, {} faces)",
            path.display(),
            mesh.vertices.len(),
            mesh.faces.len()
        );
        Ok(mesh)
    }

    fn corners(&self, face: &[u32; 3]) -> Option<[Vec3; 3]> {
        Some([
            *self.vertices.get(face[0] as usize)?,
            *self.vertices.get(face[1] as usize)?,
            *self.vertices.get(face[2] as usize)?,
        ])
    }

    /// Mean of the face's three vertices; `None` if an index is out of range
    pub fn face_centroid(&self, face: usize) -> Option<Vec3> {
        let [a, b, c] = self.corners(self.faces.get(face)?)?;
        Some((a + b + c) / 3.0)
    }

    /// Half the magnitude of the edge cross product
    pub fn face_area(&self, face: usize) -> Option<f32> {
        let [a, b, c] = self.corners(self.faces.get(face)?)?;
        Some((b - a).cross(c - a).length() * 0.5)
    }

    /// One instance per well-formed face
    pub fn face_instances(&self) -> Vec<FaceInstance> {
        self.faces
            .iter()
            .filter_map(|face| {
                let [a, b, c] = self.corners(face)?;
                Some(FaceInstance {
                    centroid: (a + b + c) / 3.0,
                    area: (b - a).cross(c - a).length() * 0.5,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD_OBJ: &str = "\
v 0 0 0
v 2 0 0
v 2 2 0
v 0 2 0
f 1 2 3 4
";

    #[test]
    fn test_face_centroid_and_area() {
        let mesh = Mesh::new(
            vec![Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), Vec3::new(0.0, 3.0, 0.0)],
            vec![[0, 1, 2]],
        );
        assert_eq!(mesh.face_centroid(0), Some(Vec3::new(1.0, 1.0, 0.0)));
        assert!((mesh.face_area(0).unwrap() - 4.5).abs() < 1e-6);
        assert_eq!(mesh.face_area(1), None);
    }

    #[test]
    fn test_bad_indices_are_skipped() {
        let mesh = Mesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![[0, 1, 2], [0, 1, 9]],
        );
        let instances = mesh.face_instances();
        assert_eq!(instances.len(), 1);
        assert!((instances[0].area - 0.5).abs() < 1e-6);
        assert_eq!(mesh.face_centroid(1), None);
    }

    #[test]
    fn test_obj_quad_is_triangulated() {
        let mesh = Mesh::from_obj_str(QUAD_OBJ).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.faces.len(), 2);

        let total: f32 = mesh.face_instances().iter().map(|f| f.area).sum();
        assert!((total - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_empty_obj_is_asset_error() {
        let err = Mesh::from_obj_str("# nothing here\n").unwrap_err();
        assert!(matches!(err, EngineError::Asset(_)));
    }

    #[test]
    fn test_missing_file_is_asset_error() {
        let err = Mesh::load_obj("/nonexistent/goggles.obj").unwrap_err();
        assert!(matches!(err, EngineError::Asset(_)));
    }
}
