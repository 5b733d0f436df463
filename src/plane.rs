use glam::Vec3;

use crate::{
    error::GeometryError,
    intersection::{Intersection, Surface},
    ray::Ray,
    utils::EPSILON,
    vector::{dot, normalize},
};

/// A plane through `center`, optionally bounded to a square of side
/// `2 * half_size` centered there. Hit from either side.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub center: Vec3,
    pub nrm: Vec3,
    pub half_size: Option<f32>,
    axes: (Vec3, Vec3),
}

impl Plane {
    pub fn new(center: Vec3, normal: Vec3, half_size: Option<f32>) -> Result<Plane, GeometryError> {
        let nrm = normalize(normal)?;
        Ok(Plane {
            center,
            nrm,
            half_size: half_size.map(|h| h.max(0.0)),
            axes: tangent_axes(nrm),
        })
    }

    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        return dot(point - self.center, self.nrm);
    }

    fn contains(&self, pos: Vec3) -> bool {
        match self.half_size {
            Some(h) => {
                let local = pos - self.center;
                dot(local, self.axes.0).abs() <= h && dot(local, self.axes.1).abs() <= h
            },
            None => true,
        }
    }
}

impl Surface for Plane {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let denom = dot(ray.direction, self.nrm);

        // parallel to the plane
        if denom.abs() < EPSILON {
            return None;
        }

        let t = dot(self.center - ray.origin, self.nrm) / denom;
        if t < EPSILON {
            return None;
        }

        let pos = ray.at(t);
        if !self.contains(pos) {
            return None;
        }

        return Some(Intersection {
            t,
            pos,
            nrm: self.nrm,
        });
    }
}

/// Two unit vectors spanning the plane orthogonal to `n` (unit).
fn tangent_axes(n: Vec3) -> (Vec3, Vec3) {
    let helper = if n.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    let u = n.cross(helper).normalize();
    let v = n.cross(u);
    return (u, v);
}
