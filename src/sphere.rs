use glam::Vec3;

use crate::{
    intersection::{Intersection, Surface},
    ray::Ray,
    utils::EPSILON,
    vector::dot,
};

#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    /// Negative radii are clamped to zero; a zero-radius sphere is never hit.
    pub fn new(center: Vec3, radius: f32) -> Sphere {
        Sphere {
            center,
            radius: radius.max(0.0),
        }
    }
}

impl Surface for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        if self.radius <= 0.0 {
            return None;
        }

        let oc = self.center - ray.origin;
        let a = dot(ray.direction, ray.direction);
        if a < EPSILON * EPSILON {
            return None;
        }
        let h = dot(ray.direction, oc);
        let c = dot(oc, oc) - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        // nearest root in front of the origin; the far one when starting inside
        let sqrtd = discriminant.sqrt();
        let mut t = (h - sqrtd) / a;
        if t < EPSILON {
            t = (h + sqrtd) / a;
            if t < EPSILON {
                return None;
            }
        }

        let pos = ray.at(t);
        return Some(Intersection {
            t,
            pos,
            nrm: (pos - self.center) / self.radius,
        });
    }
}
