use glam::Vec3;
use log::debug;

use crate::{
    error::GeometryError,
    utils::is_unit,
    vector::{dot, normalize, scale, subtract},
};

/**
 * Mirror reflection of `incoming` about `normal`: `d - 2 (d . n) n`.
 *
 * Both inputs are expected to be unit length; nothing is normalized here.
 * The sign of `normal` does not matter, flipping it yields the same result.
 */
pub fn reflect(incoming: Vec3, normal: Vec3) -> Vec3 {
    if cfg!(debug_assertions) && !(is_unit(incoming) && is_unit(normal)) {
        debug!("reflect called with non-unit input: d={} n={}", incoming, normal);
    }

    let d = dot(incoming, normal);
    return subtract(incoming, scale(normal, 2.0 * d));
}

/// Normalizes both inputs, then reflects.
pub fn bounce_direction(incoming: Vec3, normal: Vec3) -> Result<Vec3, GeometryError> {
    let d = normalize(incoming)?;
    let n = normalize(normal)?;
    return Ok(reflect(d, n));
}
