use glam::{Vec2, Vec3};

use crate::{ray::Ray, transform::Transform};

/// Perspective camera that turns pointer positions into world rays.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub trf: Transform,
    /// Vertical field of view in degrees.
    pub vfov: f32,
    pub viewport_w: f32,
    pub viewport_h: f32,
    pub viewport_a: f32,
}

impl Camera {
    pub fn new(trf: Transform, vfov: f32, viewport_w: f32, viewport_h: f32) -> Camera {
        let mut camera = Camera {
            trf,
            vfov,
            viewport_w: 1.0,
            viewport_h: 1.0,
            viewport_a: 1.0,
        };
        camera.set_viewport(viewport_w, viewport_h);
        return camera;
    }

    pub fn from_lookat(pos: Vec3, obj: Vec3, vfov: f32, viewport_w: f32, viewport_h: f32) -> Camera {
        return Camera::new(Transform::from_lookat(pos, obj), vfov, viewport_w, viewport_h);
    }

    /// Resizes the viewport; degenerate sizes are clamped to one pixel.
    pub fn set_viewport(&mut self, viewport_w: f32, viewport_h: f32) {
        self.viewport_w = viewport_w.max(1.0);
        self.viewport_h = viewport_h.max(1.0);
        self.viewport_a = self.viewport_w / self.viewport_h;
    }

    /// Pixel coordinates (origin top-left) to normalized device coordinates.
    pub fn pointer_to_ndc(&self, x: f32, y: f32) -> Vec2 {
        return Vec2::new(x / self.viewport_w * 2.0 - 1.0, -(y / self.viewport_h * 2.0) + 1.0);
    }

    pub fn ndc_ray(&self, ndc: Vec2) -> Ray {
        // calculate ray direction vector in camera space, looking down -Z
        let tan_half = (self.vfov.to_radians() * 0.5).tan();
        let v_cam = Vec3::new(ndc.x * tan_half * self.viewport_a, ndc.y * tan_half, -1.0);
        let dir = (self.trf.ori * v_cam).normalize();

        return Ray::new(self.trf.pos, dir);
    }

    pub fn pointer_ray(&self, x: f32, y: f32) -> Ray {
        return self.ndc_ray(self.pointer_to_ndc(x, y));
    }
}
