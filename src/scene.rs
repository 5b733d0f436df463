use log::debug;

use crate::{
    intersection::{Intersection, Surface},
    ray::Ray,
};

/// Handle returned by [`Scene::add`], valid until the surface is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u32);

/// Registry of ray-testable surfaces.
#[derive(Debug, Default)]
pub struct Scene {
    shapes: Vec<(SurfaceId, Box<dyn Surface>)>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Scene {
        Scene::default()
    }

    pub fn add(&mut self, surface: Box<dyn Surface>) -> SurfaceId {
        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        debug!("registering surface {:?}: {:?}", id, surface);
        self.shapes.push((id, surface));
        return id;
    }

    pub fn remove(&mut self, id: SurfaceId) -> Option<Box<dyn Surface>> {
        let idx = self.shapes.iter().position(|(sid, _)| *sid == id)?;
        debug!("removing surface {:?}", id);
        let (_, surface) = self.shapes.remove(idx);
        return Some(surface);
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Nearest hit over every registered surface.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        return self.intersect_with_id(ray).map(|(_, hit)| hit);
    }

    /// Like [`Scene::intersect`], also naming the surface that was hit.
    pub fn intersect_with_id(&self, ray: &Ray) -> Option<(SurfaceId, Intersection)> {
        let mut hit_dist = f32::MAX;
        let mut result: Option<(SurfaceId, Intersection)> = None;
        for (id, shape) in &self.shapes {
            match shape.intersect(ray) {
                Some(hit) => {
                    if hit.t < hit_dist {
                        hit_dist = hit.t;
                        result = Some((*id, hit));
                    }
                },
                None => (),
            }
        }
        return result;
    }
}
