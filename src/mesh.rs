use std::path::Path;

use glam::Vec3;
use log::{debug, info};

use crate::{
    error::ConfigError,
    intersection::{nearest, Intersection, Surface},
    ray::Ray,
    triangle::Triangle,
    vertex::Vertex,
};

/// A triangle soup tested by linear scan.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new(name: impl Into<String>, triangles: Vec<Triangle>) -> Mesh {
        Mesh {
            name: name.into(),
            triangles,
        }
    }

    /// Loads every model in an OBJ file into a single mesh.
    pub fn load_obj(path: &Path, double_sided: bool) -> Result<Mesh, ConfigError> {
        info!("loading mesh {} ...", path.display());
        let tobj_load_opts = tobj::LoadOptions {
            triangulate: true,
            ignore_lines: true,
            ignore_points: true,
            single_index: true,
        };
        let (models, _materials) = tobj::load_obj(path, &tobj_load_opts).map_err(|source| ConfigError::Mesh {
            path: path.to_path_buf(),
            source,
        })?;

        let mut triangles = Vec::new();
        for m in &models {
            debug!("  model.name = \"{}\", face_count = {}", m.name, m.mesh.indices.len() / 3);

            let has_normals = !m.mesh.normals.is_empty();
            let mut vertices: Vec<Vertex> = Vec::with_capacity(m.mesh.indices.len());
            for &i in &m.mesh.indices {
                let offset = (i * 3) as usize;
                let pos = Vec3::new(m.mesh.positions[offset], m.mesh.positions[offset + 1], m.mesh.positions[offset + 2]);
                let nrm = if has_normals {
                    Vec3::new(m.mesh.normals[offset], m.mesh.normals[offset + 1], m.mesh.normals[offset + 2])
                } else {
                    Vec3::ZERO
                };
                vertices.push(Vertex::new(pos, nrm));
            }

            for v in vertices.chunks_exact(3) {
                triangles.push(Triangle::new([v[0], v[1], v[2]], double_sided));
            }
        }

        if triangles.is_empty() {
            return Err(ConfigError::EmptyMesh(path.to_path_buf()));
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("mesh {} loaded, triangle_count: {}", name, triangles.len());
        return Ok(Mesh::new(name, triangles));
    }
}

impl Surface for Mesh {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let mut hit_isect: Option<Intersection> = None;
        for tri in &self.triangles {
            hit_isect = nearest(hit_isect, tri.intersect(ray));
        }
        return hit_isect;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn quad() -> Mesh {
        // unit square in the XY plane facing +Z
        let a = Vec3::new(-1.0, -1.0, 0.0);
        let b = Vec3::new(1.0, -1.0, 0.0);
        let c = Vec3::new(1.0, 1.0, 0.0);
        let d = Vec3::new(-1.0, 1.0, 0.0);
        Mesh::new(
            "quad",
            vec![
                Triangle::from_positions(a, b, c, false),
                Triangle::from_positions(a, c, d, false),
            ],
        )
    }

    #[test]
    fn test_mesh_nearest_triangle() {
        let mut mesh = quad();
        // a second layer further along the ray must not win
        mesh.triangles.push(Triangle::from_positions(
            Vec3::new(-1.0, -1.0, -2.0),
            Vec3::new(1.0, -1.0, -2.0),
            Vec3::new(1.0, 1.0, -2.0),
            false,
        ));
        let ray = Ray::new(Vec3::new(0.5, -0.25, 4.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = mesh.intersect(&ray).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_mesh_miss() {
        let ray = Ray::new(Vec3::new(3.0, 0.0, 4.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(quad().intersect(&ray).is_none());
    }

    #[test]
    fn test_load_obj() {
        let path = std::env::temp_dir().join(format!("raybounce-quad-{}.obj", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "v -1 -1 0\nv 1 -1 0\nv 1 1 0\nv -1 1 0\nf 1 2 3 4").unwrap();
        drop(file);

        let mesh = Mesh::load_obj(&path, false).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(mesh.triangles.len(), 2);
        let ray = Ray::new(Vec3::new(0.2, 0.3, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = mesh.intersect(&ray).unwrap();
        assert!(hit.nrm.normalize().abs_diff_eq(Vec3::Z, 1e-5));
    }

    #[test]
    fn test_load_obj_missing_file() {
        let err = Mesh::load_obj(Path::new("/nonexistent/raybounce.obj"), false).unwrap_err();
        assert!(matches!(err, ConfigError::Mesh { .. }));
    }
}
