//! Collision.
//!
//! The arena only needs sphere-sphere overlap. Each entity carries one
//! bounding sphere in its local space; the test translates both spheres by
//! their owners' world positions.

use serde::{Deserialize, Serialize};

use crate::math::Vector;

/// Bounding sphere in the owner's local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub origin: Vector,
    pub radius: f64,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            origin: Vector::ORIGIN,
            radius: 0.0,
        }
    }
}

impl Sphere {
    pub const fn new(radius: f64) -> Self {
        Self {
            origin: Vector::ORIGIN,
            radius,
        }
    }

    /// Sphere center once its owner sits at `position`.
    pub fn world_center(&self, position: &Vector) -> Vector {
        Vector::new(
            position.x + self.origin.x,
            position.y + self.origin.y,
            position.z + self.origin.z,
        )
    }
}

/// True when the two placed spheres touch or overlap.
///
/// The boundary counts as a hit.
pub fn spheres_overlap(a_pos: &Vector, a: &Sphere, b_pos: &Vector, b: &Sphere) -> bool {
    let delta = a.world_center(a_pos) - b.world_center(b_pos);
    delta.distance() <= a.radius + b.radius
}
