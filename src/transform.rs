use glam::{Mat3, Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub pos: Vec3,
    pub ori: Quat,
}

impl Transform {
    pub fn new(pos: Vec3, ori: Quat) -> Transform {
        Transform {
            pos,
            ori,
        }
    }

    pub fn from_axis_angle(pos: Vec3, axis: Vec3, angle: f32) -> Transform {
        Transform {
            pos,
            ori: Quat::from_axis_angle(axis, angle),
        }
    }

    /**
     * Orientation whose local -Z axis points from `pos` toward `obj`, with
     * local +Y as close to world +Y as possible.
     */
    pub fn from_lookat(pos: Vec3, obj: Vec3) -> Transform {
        let back = (pos - obj).normalize_or_zero();
        if back == Vec3::ZERO {
            return Transform::new(pos, Quat::IDENTITY);
        }

        // looking straight up or down, borrow world Z as the up hint
        let mut right = Vec3::Y.cross(back);
        if right.length_squared() < 1e-12 {
            right = Vec3::Z.cross(back);
        }
        let right = right.normalize();
        let up = back.cross(right);

        Transform {
            pos,
            ori: Quat::from_mat3(&Mat3::from_cols(right, up, back)).normalize(),
        }
    }

    pub fn forward(&self) -> Vec3 {
        return self.ori * Vec3::NEG_Z;
    }
}
