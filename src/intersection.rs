use glam::Vec3;
use serde::Serialize;

use crate::ray::Ray;

/// Nearest hit of a ray against a surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Intersection {
    /// Distance along the ray, in multiples of the ray direction's length.
    pub t: f32,
    pub pos: Vec3,
    /// Surface normal at `pos`. Not guaranteed to be unit length.
    pub nrm: Vec3,
}

/// Anything a ray can be tested against.
pub trait Surface: std::fmt::Debug {
    /// Returns the nearest hit with `t > EPSILON`, if any.
    fn intersect(&self, ray: &Ray) -> Option<Intersection>;
}

/// Keeps whichever of the two hits is closer.
pub fn nearest(current: Option<Intersection>, candidate: Option<Intersection>) -> Option<Intersection> {
    match (current, candidate) {
        (Some(a), Some(b)) => {
            if b.t < a.t {
                Some(b)
            } else {
                Some(a)
            }
        },
        (a, None) => a,
        (None, b) => b,
    }
}
