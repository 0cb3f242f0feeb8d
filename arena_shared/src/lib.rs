//! `arena_shared`
//!
//! Core of the wireframe tank arena: everything that does not depend on a
//! particular frontend.
//!
//! Design goals:
//! - Deterministic: all randomness comes through an injected `RandomSource`.
//! - Allocation-light per frame: vertex buffers and segment lists are reused.
//! - Rendering stays behind `RenderBackend`; shapes only produce segments.
//! - No `unsafe`.

pub mod bullet;
pub mod config;
pub mod coord;
pub mod math;
pub mod models;
pub mod physics;
pub mod radar;
pub mod random;
pub mod render;
pub mod shape;
pub mod tank;
pub mod vertex;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::bullet::{Bullet, ShotOutcome, Target};
    pub use crate::config::*;
    pub use crate::coord::{Camera, Coord3D};
    pub use crate::math::*;
    pub use crate::random::*;
    pub use crate::render::*;
    pub use crate::shape::Shape;
    pub use crate::tank::{AiProfile, Pattern, SteerOutcome, Tank};
    pub use crate::vertex::VertexTable;
}
