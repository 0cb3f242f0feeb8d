//! The arena: one camera, a horizon ring, scattered trees, a few enemy tanks
//! and the player's bullet.
//!
//! Ordering within a tick matters and is fixed:
//! 1. controls move the camera (and may fire the player's bullet)
//! 2. radar samples positions
//! 3. the camera rebuilds its view matrix
//! 4. background geometry is drawn
//! 5. each enemy is hit-tested against the camera, steered and drawn, or
//!    respawned if inactive; its bullet flies and is drawn
//! 6. the player's bullet flies and is drawn
//!
//! Nothing here awaits or locks; a tick runs to completion.

use std::time::Duration;

use anyhow::Context;
use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, info, trace};

use arena_shared::{
    bullet::{Bullet, ShotOutcome},
    config::ArenaConfig,
    coord::{Camera, Coord3D},
    math::{Matrix, Vector},
    models,
    physics::Sphere,
    radar::{Radar, RadarFrame},
    random::{RandomSource, SeededRandom},
    render::{Color, RenderBackend, Segment},
    shape::Shape,
    tank::Tank,
};

use crate::input::{steer, InputState};

/// Running totals since the arena was built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ArenaStats {
    pub shots_fired: u32,
    /// Enemies destroyed by the player's bullet.
    pub kills: u32,
    /// Enemies destroyed by running into the camera.
    pub rams: u32,
    pub enemy_shots: u32,
    /// Enemy bullets that reached the camera.
    pub player_hits: u32,
    pub spawns: u32,
}

/// Summary of one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    pub segments: usize,
    pub active_enemies: usize,
    pub player_bullet_in_flight: bool,
    pub stats: ArenaStats,
}

pub struct Arena {
    cfg: ArenaConfig,
    rng: Box<dyn RandomSource>,
    pub camera: Camera,
    pub horizon: Shape,
    pub trees: Vec<Shape>,
    pub enemies: Vec<Tank>,
    pub bullet: Bullet,
    radar: Radar,
    screen_proj: Matrix,
    turn_step_rad: f64,
    frame: u64,
    stats: ArenaStats,
}

impl Arena {
    /// Builds an arena that draws from `rng`.
    pub fn new(cfg: ArenaConfig, mut rng: Box<dyn RandomSource>) -> anyhow::Result<Self> {
        cfg.validate().context("invalid arena config")?;

        let mut camera = Camera::new(Vector::ORIGIN);
        camera.coord.sphere = Sphere::new(cfg.camera_radius);

        let horizon = Shape::new(
            Coord3D::default(),
            &models::horizon(cfg.horizon_radius, cfg.horizon_segments),
            Color::DARK_GOLDENROD,
        );

        let tree_vt = models::tree();
        let half = cfg.tree_spread / 2.0;
        let trees = (0..cfg.tree_count)
            .map(|_| {
                let x = rng.next_unit() * cfg.tree_spread - half;
                let z = rng.next_unit() * cfg.tree_spread - half;
                let color = Color::random_foliage(rng.as_mut());
                Shape::new(Coord3D::at(x, models::GROUND_Y, z), &tree_vt, color)
            })
            .collect();

        let tank_vt = models::tank();
        let bullet_vt = models::bullet();
        let enemies = (0..cfg.enemy_count)
            .map(|_| {
                let mut t = Tank::new(&tank_vt, &bullet_vt, Coord3D::default());
                t.shape.coord.sphere = Sphere::new(cfg.tank_radius);
                t.spawn(&camera, rng.as_mut());
                t
            })
            .collect();

        info!(
            trees = cfg.tree_count,
            enemies = cfg.enemy_count,
            profiles = cfg.ai_profiles.len(),
            "arena built"
        );

        Ok(Self {
            screen_proj: cfg.screen_projection(),
            turn_step_rad: cfg.turn_step_deg.to_radians(),
            bullet: Bullet::new(&bullet_vt, Color::RED),
            radar: Radar::new(cfg.radar),
            cfg,
            rng,
            camera,
            horizon,
            trees,
            enemies,
            frame: 0,
            stats: ArenaStats::default(),
        })
    }

    /// Builds an arena seeded from `cfg.seed`.
    pub fn seeded(cfg: ArenaConfig) -> anyhow::Result<Self> {
        let rng = Box::new(SeededRandom::new(cfg.seed));
        Self::new(cfg, rng)
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.cfg
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn stats(&self) -> ArenaStats {
        self.stats
    }

    pub fn radar_frame(&self) -> &RadarFrame {
        self.radar.frame()
    }

    /// Runs one frame and hands every visible segment to `renderer`.
    pub fn tick(&mut self, input: InputState, renderer: &mut dyn RenderBackend) -> FrameReport {
        renderer.begin_frame();
        let mut segments = 0;

        steer(
            input,
            self.cfg.move_step,
            self.turn_step_rad,
            &mut [&mut self.camera.coord, &mut self.horizon.coord],
        );
        if input.fire && !self.bullet.appear {
            self.bullet.on_shot_start(&self.camera.coord);
            self.stats.shots_fired += 1;
            debug!(frame = self.frame, "player fired");
        }

        let radar = self
            .radar
            .sample(&self.camera, self.enemies.iter().map(|t| &t.shape.coord.d_vec));
        renderer.draw_radar(radar);

        self.camera.update_mat();
        let view = *self.camera.view_matrix();
        let sp = self.screen_proj;

        segments += emit(renderer, self.horizon.draw(&view, &sp));
        for tree in &mut self.trees {
            segments += emit(renderer, tree.draw(&view, &sp));
        }

        for (i, tank) in self.enemies.iter_mut().enumerate() {
            if tank.appear {
                if tank.shape.coord.sphere_hit(&self.camera.coord) {
                    tank.on_hit();
                    self.stats.rams += 1;
                    debug!(enemy = i, "enemy rammed the camera");
                }
                let out = tank.on_frame(&self.camera, self.rng.as_mut());
                if out.fired {
                    self.stats.enemy_shots += 1;
                }
                segments += emit(renderer, tank.draw(&view, &sp));
            } else {
                let profile = self.cfg.ai_profiles[self.rng.pick_index(self.cfg.ai_profiles.len())];
                tank.set_ai_profile(profile);
                tank.spawn(&self.camera, self.rng.as_mut());
                self.stats.spawns += 1;
            }

            if tank.bullet.appear {
                let hit = tank
                    .bullet
                    .on_shot_frame(std::slice::from_mut(&mut self.camera));
                if let ShotOutcome::Hit(_) = hit {
                    self.stats.player_hits += 1;
                    info!(enemy = i, hits = self.stats.player_hits, "camera hit");
                }
                if tank.bullet.appear {
                    segments += emit(renderer, tank.bullet.shape.draw(&view, &sp));
                }
            }
        }

        match self.bullet.on_shot_frame(&mut self.enemies) {
            ShotOutcome::Hit(i) => {
                self.stats.kills += 1;
                info!(enemy = i, kills = self.stats.kills, "enemy destroyed");
            }
            ShotOutcome::Expired => debug!("player bullet expired"),
            ShotOutcome::Idle | ShotOutcome::InFlight => {}
        }
        if self.bullet.appear {
            segments += emit(renderer, self.bullet.shape.draw(&view, &sp));
        }

        renderer.end_frame();

        let report = FrameReport {
            frame: self.frame,
            segments,
            active_enemies: self.enemies.iter().filter(|t| t.appear).count(),
            player_bullet_in_flight: self.bullet.appear,
            stats: self.stats,
        };
        trace!(?report, "frame");
        self.frame += 1;
        report
    }

    /// Runs `frames` ticks at `tick_hz`, asking `input` for each frame's
    /// controls. Returns the report of the last tick run.
    pub async fn run_for_frames(
        &mut self,
        frames: u64,
        renderer: &mut dyn RenderBackend,
        mut input: impl FnMut(u64) -> InputState,
    ) -> Option<FrameReport> {
        let dt = Duration::from_secs_f64(1.0 / f64::from(self.cfg.tick_hz));
        let mut next = Instant::now();
        let mut last = None;

        for _ in 0..frames {
            next += dt;
            let controls = input(self.frame);
            last = Some(self.tick(controls, renderer));
            tokio::time::sleep_until(next).await;
        }
        last
    }
}

fn emit(renderer: &mut dyn RenderBackend, segments: &[Segment]) -> usize {
    renderer.draw_segments(segments);
    segments.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_shared::random::ScriptedRandom;
    use arena_shared::render::{NullRenderer, RecordingRenderer};

    fn small_config() -> ArenaConfig {
        ArenaConfig {
            tree_count: 4,
            enemy_count: 2,
            ..ArenaConfig::default()
        }
    }

    #[test]
    fn construction_spawns_every_enemy() {
        let arena = Arena::seeded(small_config()).unwrap();
        assert_eq!(arena.enemies.len(), 2);
        assert_eq!(arena.trees.len(), 4);
        for t in &arena.enemies {
            assert!(t.appear);
            let d = t.shape.coord.d_vec;
            assert!(d.x.abs() >= 50.0 && d.z.abs() >= 50.0);
            assert_eq!(d.y, 0.0);
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = ArenaConfig {
            far: 0.5,
            ..small_config()
        };
        assert!(Arena::seeded(cfg).is_err());
    }

    #[test]
    fn radar_is_drawn_every_frame() {
        let mut arena = Arena::seeded(small_config()).unwrap();
        let mut rec = RecordingRenderer::default();
        arena.tick(InputState::IDLE, &mut rec);
        assert_eq!(rec.radar.as_ref().map(|r| r.plots.len()), Some(2));
        assert_eq!(rec.frames, 1);
    }

    #[test]
    fn fire_starts_one_bullet_at_a_time() {
        let mut arena = Arena::new(small_config(), Box::new(ScriptedRandom::new([0.1, 0.9, 0.3]))).unwrap();
        let fire = InputState {
            fire: true,
            ..InputState::IDLE
        };
        arena.tick(fire, &mut NullRenderer);
        arena.tick(fire, &mut NullRenderer);
        assert_eq!(arena.stats().shots_fired, 1);
        assert!(arena.bullet.appear);
    }

    #[test]
    fn frame_counter_advances() {
        let mut arena = Arena::seeded(small_config()).unwrap();
        let r0 = arena.tick(InputState::IDLE, &mut NullRenderer);
        let r1 = arena.tick(InputState::IDLE, &mut NullRenderer);
        assert_eq!((r0.frame, r1.frame), (0, 1));
        assert_eq!(arena.frame(), 2);
    }
}
