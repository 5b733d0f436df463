//! raybounce
//!
//! Vector algebra and specular reflection driven by a pointer ray: each frame
//! the ray is cast into the scene, and the nearest hit is turned into an
//! incident line and a mirrored bounce line for a renderer to draw.

pub mod camera;
pub mod config;
pub mod error;
pub mod frame;
pub mod intersection;
pub mod mesh;
pub mod plane;
pub mod proximity;
pub mod ray;
pub mod reflection;
pub mod renderer;
pub mod scene;
pub mod segment;
pub mod sphere;
pub mod transform;
pub mod triangle;
pub mod utils;
pub mod vector;
pub mod vertex;
