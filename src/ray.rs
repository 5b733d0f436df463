use glam::Vec3;
use serde::Serialize;

/// Half-line `origin + t * direction`, `t >= 0`.
///
/// The direction is normalized by convention for reflection math, but
/// intersection queries accept any non-zero direction and report `t` in
/// multiples of its length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Ray {
        Ray { origin, direction }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        return self.origin + self.direction * t;
    }
}
