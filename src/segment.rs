use glam::Vec3;
use serde::Serialize;

/// A drawable line between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
}

impl Segment {
    pub fn new(start: Vec3, end: Vec3) -> Segment {
        Segment { start, end }
    }

    pub fn length(&self) -> f32 {
        return (self.end - self.start).length();
    }
}
