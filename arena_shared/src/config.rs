//! Configuration system.
//!
//! Loads arena configuration from JSON strings (file IO left to the app).
//! Every field has a default, so a partial document is enough.

use anyhow::{bail, ensure};
use serde::{Deserialize, Serialize};

use crate::math::Matrix;
use crate::radar::RadarConfig;
use crate::tank::AiProfile;

/// Root configuration for one arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Output surface size in pixels.
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Full vertical field of view, degrees.
    pub fov_deg: f64,
    pub near: f64,
    pub far: f64,
    /// Simulation ticks per second.
    pub tick_hz: u32,
    /// Seed for the arena's random source.
    pub seed: u64,
    pub enemy_count: usize,
    pub tree_count: usize,
    /// Side of the square trees are scattered over.
    pub tree_spread: f64,
    pub horizon_radius: f64,
    pub horizon_segments: usize,
    pub camera_radius: f64,
    pub tank_radius: f64,
    /// Camera travel per frame of forward/back input.
    pub move_step: f64,
    /// Camera turn per frame of turn input, degrees.
    pub turn_step_deg: f64,
    /// Profiles a respawning tank picks from.
    pub ai_profiles: Vec<AiProfile>,
    pub radar: RadarConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            viewport_width: 320.0,
            viewport_height: 320.0,
            fov_deg: 90.0,
            near: 1.0,
            far: 10.0,
            tick_hz: 30,
            seed: 0x5eed,
            enemy_count: 2,
            tree_count: 60,
            tree_spread: 700.0,
            horizon_radius: 500.0,
            horizon_segments: 32,
            camera_radius: 15.0,
            tank_radius: 15.0,
            move_step: 3.0,
            turn_step_deg: 3.0,
            ai_profiles: AiProfile::standard_table(),
            radar: RadarConfig::default(),
        }
    }
}

impl ArenaConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Rejects values the projection or the AI cannot work with.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.viewport_width > 0.0 && self.viewport_height > 0.0,
            "viewport must be non-empty, got {}x{}",
            self.viewport_width,
            self.viewport_height
        );
        ensure!(
            self.fov_deg > 0.0 && self.fov_deg < 180.0,
            "fov_deg must be in (0, 180), got {}",
            self.fov_deg
        );
        ensure!(
            self.near > 0.0 && self.far > self.near,
            "need 0 < near < far, got near={} far={}",
            self.near,
            self.far
        );
        ensure!(self.tick_hz > 0, "tick_hz must be positive");
        ensure!(self.horizon_segments >= 3, "horizon needs at least 3 segments");
        if self.enemy_count > 0 && self.ai_profiles.is_empty() {
            bail!("ai_profiles is empty but {} enemies are configured", self.enemy_count);
        }
        Ok(())
    }

    pub fn projection(&self) -> Matrix {
        Matrix::perspective(self.fov_deg, self.near, self.far)
    }

    pub fn screen(&self) -> Matrix {
        Matrix::viewport(self.viewport_width, self.viewport_height)
    }

    /// Screen matrix composed with the projection, ready for `Shape::draw`.
    pub fn screen_projection(&self) -> Matrix {
        self.screen().composition(&self.projection())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = ArenaConfig::from_json_str(r#"{ "enemy_count": 4, "seed": 9 }"#).unwrap();
        assert_eq!(cfg.enemy_count, 4);
        assert_eq!(cfg.seed, 9);
        assert_eq!(cfg.tree_count, 60);
        assert_eq!(cfg.ai_profiles.len(), 5);
        cfg.validate().unwrap();
    }

    #[test]
    fn default_projection_matches_reference_constants() {
        let p = ArenaConfig::default().projection();
        assert!((p.m[0][0] - 1.0).abs() < 1e-12);
        assert!((p.m[2][2] - 10.0 / 9.0).abs() < 1e-12);
        assert!((p.m[3][2] + 10.0 / 9.0).abs() < 1e-12);
        assert_eq!(p.m[2][3], 1.0);

        let s = ArenaConfig::default().screen();
        assert_eq!(s.m[0], [160.0, 0.0, 0.0, 160.0]);
        assert_eq!(s.m[1], [0.0, -160.0, 0.0, 160.0]);
    }

    #[test]
    fn bad_clip_planes_are_rejected() {
        let cfg = ArenaConfig {
            near: 5.0,
            far: 5.0,
            ..ArenaConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn enemies_need_profiles() {
        let cfg = ArenaConfig {
            ai_profiles: Vec::new(),
            ..ArenaConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
