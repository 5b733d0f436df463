//! Range check used to recolor the indicator sphere.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{utils::clamp_non_negative, vector::distance};

/// Indicator color picked from the proximity state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorDirective {
    #[default]
    Default,
    Alert,
}

/// True when the surface of an object of radius `epsilon` centered at
/// `point_b` lies strictly closer than `radius` to `point_a`.
pub fn in_range(point_a: Vec3, point_b: Vec3, radius: f32, epsilon: f32) -> bool {
    return distance(point_a, point_b) - epsilon < radius;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeCheck {
    pub center: Vec3,
    pub object_pos: Vec3,
    pub object_radius: f32,
    pub threshold: f32,
}

impl Default for RangeCheck {
    fn default() -> RangeCheck {
        RangeCheck {
            center: Vec3::ZERO,
            object_pos: Vec3::ZERO,
            object_radius: 0.5,
            threshold: 3.0,
        }
    }
}

impl RangeCheck {
    /// Clamps negative radii to zero.
    pub fn sanitized(mut self) -> RangeCheck {
        self.set_threshold(self.threshold);
        self.set_object_radius(self.object_radius);
        return self;
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = clamp_non_negative("range threshold", threshold);
    }

    pub fn set_object_radius(&mut self, radius: f32) {
        self.object_radius = clamp_non_negative("object radius", radius);
    }

    pub fn set_object_pos(&mut self, pos: Vec3) {
        self.object_pos = pos;
    }

    pub fn is_in_range(&self) -> bool {
        return in_range(self.center, self.object_pos, self.threshold, self.object_radius);
    }

    pub fn evaluate(&self) -> ColorDirective {
        if self.is_in_range() {
            ColorDirective::Alert
        } else {
            ColorDirective::Default
        }
    }
}
