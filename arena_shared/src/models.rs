//! Built-in wireframes.
//!
//! Each model is one polyline in local space: +z forward, +y up. The ground
//! plane sits at `y = GROUND_Y` relative to the eye height of the camera.

use crate::math::Vector;
use crate::vertex::VertexTable;

pub const GROUND_Y: f64 = -10.0;

/// Hull, turret and barrel, about 30 units long.
pub fn tank() -> VertexTable {
    VertexTable::from_points(&[
        // hull floor
        [-10.0, -10.0, -15.0],
        [10.0, -10.0, -15.0],
        [10.0, -10.0, 15.0],
        [-10.0, -10.0, 15.0],
        [-10.0, -10.0, -15.0],
        // hull walls and deck
        [-10.0, -4.0, -15.0],
        [10.0, -4.0, -15.0],
        [10.0, -10.0, -15.0],
        [10.0, -4.0, -15.0],
        [10.0, -4.0, 15.0],
        [10.0, -10.0, 15.0],
        [10.0, -4.0, 15.0],
        [-10.0, -4.0, 15.0],
        [-10.0, -10.0, 15.0],
        [-10.0, -4.0, 15.0],
        [-10.0, -4.0, -15.0],
        // turret
        [-5.0, -4.0, -6.0],
        [-5.0, 1.0, -6.0],
        [5.0, 1.0, -6.0],
        [5.0, -4.0, -6.0],
        [5.0, 1.0, -6.0],
        [5.0, 1.0, 6.0],
        [5.0, -4.0, 6.0],
        [5.0, 1.0, 6.0],
        [-5.0, 1.0, 6.0],
        [-5.0, -4.0, 6.0],
        [-5.0, 1.0, 6.0],
        [-5.0, 1.0, -6.0],
        // barrel
        [0.0, -1.5, 6.0],
        [0.0, -1.5, 24.0],
    ])
}

/// Trunk and a crossed triangular crown.
pub fn tree() -> VertexTable {
    VertexTable::from_points(&[
        [0.0, 0.0, 0.0],
        [0.0, 10.0, 0.0],
        [-6.0, 10.0, 0.0],
        [0.0, 30.0, 0.0],
        [6.0, 10.0, 0.0],
        [0.0, 10.0, 0.0],
        [0.0, 10.0, -6.0],
        [0.0, 30.0, 0.0],
        [0.0, 10.0, 6.0],
        [0.0, 10.0, 0.0],
    ])
}

/// Small octahedron outline.
pub fn bullet() -> VertexTable {
    VertexTable::from_points(&[
        [0.0, 0.0, -2.0],
        [2.0, 0.0, 0.0],
        [0.0, 0.0, 2.0],
        [-2.0, 0.0, 0.0],
        [0.0, 0.0, -2.0],
        [0.0, 2.0, 0.0],
        [0.0, 0.0, 2.0],
        [0.0, -2.0, 0.0],
        [0.0, 0.0, -2.0],
    ])
}

/// Closed ground ring around the viewer.
pub fn horizon(radius: f64, segments: usize) -> VertexTable {
    (0..=segments)
        .map(|i| {
            let t = std::f64::consts::TAU * (i % segments.max(1)) as f64 / segments.max(1) as f64;
            Vector::new(radius * t.cos(), GROUND_Y, radius * t.sin())
        })
        .collect()
}
