use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Vec3,
    pub nrm: Vec3,
}

impl Vertex {
    pub fn new(pos: Vec3, nrm: Vec3) -> Vertex {
        Vertex {
            pos,
            nrm,
        }
    }
}
