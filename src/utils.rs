use glam::Vec3;
use log::warn;

/// Minimum ray distance accepted as a hit, and the tolerance for parallel tests.
pub const EPSILON: f32 = 1e-5;

/// Lengths at or below this are treated as zero by `vector::normalize`.
pub const NORMALIZE_EPSILON: f32 = 1e-8;

/// Tolerance used when checking that a direction is unit length.
pub const UNIT_TOLERANCE: f32 = 1e-3;

pub fn approx_eq(a: Vec3, b: Vec3, tolerance: f32) -> bool {
    return (a - b).abs().max_element() <= tolerance;
}

pub fn is_unit(v: Vec3) -> bool {
    return (v.length() - 1.0).abs() <= UNIT_TOLERANCE;
}

/// Clamps a configured radius or length to zero, warning when it had to.
/// NaN counts as negative.
pub fn clamp_non_negative(name: &str, value: f32) -> f32 {
    if value < 0.0 || value.is_nan() {
        warn!("{} {} is negative, clamping to 0", name, value);
        return 0.0;
    }
    return value;
}
