//! Free-standing vector algebra on `glam::Vec3`.
//!
//! Every function is pure and returns a fresh value. The fallible ones
//! (`normalize` and everything built on it) report degenerate input as a
//! [`GeometryError`] instead of producing NaN.

use glam::Vec3;
use serde::Serialize;

use crate::{error::GeometryError, segment::Segment, utils::NORMALIZE_EPSILON};

pub fn dot(u: Vec3, v: Vec3) -> f32 {
    return u.dot(v);
}

/// Length without intermediate overflow: finite vectors always have a
/// finite-or-`inf` length, never NaN, and huge ones still normalize.
pub fn length(v: Vec3) -> f32 {
    let (max, unit_box) = rescaled(v);
    if max == 0.0 {
        return 0.0;
    }
    return max * unit_box.length();
}

/**
 * Scales `v` to unit length.
 *
 * Fails with `ZeroLength` when the length is at or below `NORMALIZE_EPSILON`
 * and with `NonFinite` for NaN or infinite components. The same input always
 * yields the same error.
 */
pub fn normalize(v: Vec3) -> Result<Vec3, GeometryError> {
    if !v.is_finite() {
        return Err(GeometryError::NonFinite);
    }

    let (max, unit_box) = rescaled(v);
    if max == 0.0 {
        return Err(GeometryError::ZeroLength { length: 0.0 });
    }

    // components of `unit_box` lie in [-1, 1], so this length cannot overflow
    let box_len = unit_box.length();
    let len = max * box_len;
    if len <= NORMALIZE_EPSILON {
        return Err(GeometryError::ZeroLength { length: len });
    }

    return Ok(scale(unit_box, 1.0 / box_len));
}

pub fn scale(v: Vec3, s: f32) -> Vec3 {
    return v * s;
}

pub fn add(u: Vec3, v: Vec3) -> Vec3 {
    return u + v;
}

pub fn subtract(u: Vec3, v: Vec3) -> Vec3 {
    return u - v;
}

/// Largest absolute component and `v` divided by it.
fn rescaled(v: Vec3) -> (f32, Vec3) {
    let max = v.abs().max_element();
    if max == 0.0 || !max.is_finite() {
        return (max, v);
    }
    return (max, v / max);
}

pub fn distance(u: Vec3, v: Vec3) -> f32 {
    return length(subtract(u, v));
}

/// Signed length of `v` projected onto the direction of `u`.
pub fn scalar_projection_length(u: Vec3, v: Vec3) -> Result<f32, GeometryError> {
    let u_hat = normalize(u)?;
    return Ok(dot(u_hat, v));
}

/// Vector projection of `v` onto the direction of `u`.
pub fn project_onto(u: Vec3, v: Vec3) -> Result<Vec3, GeometryError> {
    let u_hat = normalize(u)?;
    return Ok(scale(u_hat, dot(u_hat, v)));
}

/// Angle in radians between `u` and `v`, in `[0, PI]`.
pub fn angle_between(u: Vec3, v: Vec3) -> Result<f32, GeometryError> {
    let cos = dot(normalize(u)?, normalize(v)?);
    return Ok(cos.clamp(-1.0, 1.0).acos());
}

/// The dot-product walkthrough for a pair of vectors, as drawable segments
/// from the world origin plus the scalars behind them.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionDiagram {
    pub a: Vec3,
    pub b: Vec3,
    pub dot: f32,
    pub a_length: f32,
    pub a_normalized: Vec3,
    pub scalar_projection: f32,
    pub projected: Vec3,
    pub angle: f32,
}

impl ProjectionDiagram {
    pub fn new(a: Vec3, b: Vec3) -> Result<ProjectionDiagram, GeometryError> {
        let a_normalized = normalize(a)?;
        let scalar_projection = scalar_projection_length(a, b)?;

        Ok(ProjectionDiagram {
            a,
            b,
            dot: dot(a, b),
            a_length: length(a),
            a_normalized,
            scalar_projection,
            projected: scale(a_normalized, scalar_projection),
            angle: angle_between(a, b)?,
        })
    }

    /// Segments in draw order: a, â, b, b projected on a, projection to b.
    pub fn segments(&self) -> [Segment; 5] {
        [
            Segment::new(Vec3::ZERO, self.a),
            Segment::new(Vec3::ZERO, self.a_normalized),
            Segment::new(Vec3::ZERO, self.b),
            Segment::new(Vec3::ZERO, self.projected),
            Segment::new(self.projected, self.b),
        ]
    }

    /// Component of `b` perpendicular to `a`.
    pub fn rejection(&self) -> Vec3 {
        return subtract(self.b, self.projected);
    }
}
