//! `arena_client`
//!
//! Frontend-side systems:
//! - The arena frame driver
//! - Input mapping and a scripted autopilot
//! - Terminal and JSON-lines renderers

pub mod arena;
pub mod ascii;
pub mod dump;
pub mod input;

pub use arena::{Arena, ArenaStats, FrameReport};
