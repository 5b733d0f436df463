use crate::intersection::{Intersection, Surface};
use crate::ray::Ray;
use crate::utils::EPSILON;
use crate::vertex::Vertex;
use glam::Vec3;

#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub vrt: [Vertex; 3],
    /// When false, hits from behind the counter-clockwise face are culled.
    pub double_sided: bool,
}

impl Triangle {
    pub fn new(vrt: [Vertex; 3], double_sided: bool) -> Triangle {
        Triangle {
            vrt,
            double_sided,
        }
    }

    /// Flat-shaded triangle; every vertex carries the face normal.
    pub fn from_positions(a: Vec3, b: Vec3, c: Vec3, double_sided: bool) -> Triangle {
        let nrm = (b - a).cross(c - a).normalize_or_zero();
        Triangle {
            vrt: [Vertex::new(a, nrm), Vertex::new(b, nrm), Vertex::new(c, nrm)],
            double_sided,
        }
    }

    pub fn face_normal(&self) -> Vec3 {
        return (self.vrt[1].pos - self.vrt[0].pos).cross(self.vrt[2].pos - self.vrt[0].pos);
    }

    /**
     * Interpolates vertex normals at barycentric coordinates (u, v),
     * falling back to the face normal when they cancel out.
     */
    pub fn normal_at(&self, u: f32, v: f32) -> Vec3 {
        let nrm = self.vrt[0].nrm * (1.0 - u - v) + self.vrt[1].nrm * u + self.vrt[2].nrm * v;
        if nrm.length_squared() < EPSILON * EPSILON {
            return self.face_normal();
        }
        return nrm;
    }
}

impl Surface for Triangle {
    /**
     * Uses the Möller-Trumbore intersection algorithm
     * Reference: http://www.graphics.cornell.edu/pubs/1997/MT97.html
     */
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        // calculate triangle edge vectors
        let edge_a = self.vrt[1].pos - self.vrt[0].pos;
        let edge_b = self.vrt[2].pos - self.vrt[0].pos;

        // solve the equation for t (distance)
        let p = ray.direction.cross(edge_b);
        let d = edge_a.dot(p);

        if self.double_sided {
            if d.abs() < EPSILON {
                return None;
            }
        } else if d < EPSILON {
            return None;
        }

        let inv_d = 1.0 / d;
        let s = ray.origin - self.vrt[0].pos;
        let u = s.dot(p) * inv_d;

        if u < 0.0 || u > 1.0 {
            return None;
        }

        let q = s.cross(edge_a);
        let v = ray.direction.dot(q) * inv_d;

        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge_b.dot(q) * inv_d;

        if t < EPSILON {
            return None;
        }

        return Some(Intersection {
            t,
            pos: ray.at(t),
            nrm: self.normal_at(u, v),
        });
    }
}
