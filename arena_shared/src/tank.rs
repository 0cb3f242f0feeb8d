//! Enemy tanks and their pursuit/evasion AI.
//!
//! A tank is either free or engaged in one [`Pattern`]. When free it draws a
//! new pattern from a table keyed by its distance to the camera and commits
//! to it for an episode of up to `max_frame` frames. The attack pattern ends
//! its episode as soon as it fires.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bullet::{Bullet, Target};
use crate::coord::{Camera, Coord3D};
use crate::math::{Matrix, Vector};
use crate::random::RandomSource;
use crate::render::{Color, Segment};
use crate::shape::Shape;
use crate::vertex::VertexTable;

/// Side of the square spawn area around the camera.
pub const SPAWN_RANGE: f64 = 600.0;
/// Extra push away from the world axes at spawn.
pub const SPAWN_MARGIN: f64 = 50.0;

/// Steering behavior for one episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pattern {
    Seek = 0,
    Circle = 1,
    Evade = 2,
    Attack = 3,
}

use Pattern::{Attack, Circle, Evade, Seek};

const CLOSE_TABLE: [Pattern; 6] = [Circle, Circle, Evade, Attack, Attack, Attack];
const MID_TABLE: [Pattern; 5] = [Seek, Seek, Circle, Circle, Evade];
const FAR_TABLE: [Pattern; 2] = [Seek, Circle];

/// AI tuning for one tank. Angles are radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiProfile {
    pub speed: f64,
    pub turn_rad: f64,
    pub max_frame: u32,
    pub escape_dist: f64,
    pub shot_dist: f64,
    pub shot_rad: f64,
}

impl Default for AiProfile {
    fn default() -> Self {
        Self::from_degrees(2.0, 2.0, 100, 300.0, 200.0, 15.0)
    }
}

impl AiProfile {
    pub fn from_degrees(
        speed: f64,
        turn_deg: f64,
        max_frame: u32,
        escape_dist: f64,
        shot_dist: f64,
        shot_deg: f64,
    ) -> Self {
        Self {
            speed,
            turn_rad: turn_deg.to_radians(),
            max_frame,
            escape_dist,
            shot_dist,
            shot_rad: shot_deg.to_radians(),
        }
    }

    /// The five built-in personalities, picked at random on every respawn.
    pub fn standard_table() -> Vec<AiProfile> {
        vec![
            Self::from_degrees(2.0, 2.0, 100, 300.0, 200.0, 16.0),
            Self::from_degrees(2.0, 3.0, 80, 400.0, 300.0, 20.0),
            Self::from_degrees(3.0, 2.0, 100, 400.0, 200.0, 18.0),
            Self::from_degrees(1.0, 1.0, 140, 500.0, 400.0, 16.0),
            Self::from_degrees(4.0, 3.0, 60, 350.0, 300.0, 18.0),
        ]
    }
}

/// Candidate patterns for a tank `distance` away from the camera.
pub fn pattern_table(distance: f64, profile: &AiProfile) -> &'static [Pattern] {
    if distance < profile.shot_dist {
        &CLOSE_TABLE
    } else if distance <= profile.escape_dist {
        &MID_TABLE
    } else {
        &FAR_TABLE
    }
}

/// Sign used to push a spawn coordinate away from zero. Zero goes positive.
pub fn offset_sign(v: f64) -> f64 {
    if v < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// What one AI step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteerOutcome {
    pub pattern: Pattern,
    pub fired: bool,
    pub episode_ended: bool,
}

#[derive(Debug, Clone)]
pub struct Tank {
    pub shape: Shape,
    pub bullet: Bullet,
    /// Distance to the camera as of the last AI step.
    pub distance: f64,
    pub appear: bool,
    pub free: bool,
    pub frame: u32,
    pub pattern: Pattern,
    pub profile: AiProfile,
}

impl Tank {
    pub fn new(vt: &VertexTable, bullet_vt: &VertexTable, coord: Coord3D) -> Self {
        Self {
            shape: Shape::new(coord, vt, Color::RED),
            bullet: Bullet::new(bullet_vt, Color::BLUE),
            distance: 0.0,
            appear: false,
            free: true,
            frame: 0,
            pattern: Seek,
            profile: AiProfile::default(),
        }
    }

    pub fn set_ai_profile(&mut self, profile: AiProfile) {
        self.profile = profile;
    }

    /// Places the tank somewhere around the camera and activates it.
    pub fn spawn(&mut self, camera: &Camera, rng: &mut dyn RandomSource) {
        self.free = true;
        self.frame = 0;

        let cam = camera.coord.d_vec;
        let mut x = rng.next_unit() * SPAWN_RANGE - SPAWN_RANGE / 2.0 + cam.x;
        x += offset_sign(x) * SPAWN_MARGIN;
        let mut z = rng.next_unit() * SPAWN_RANGE - SPAWN_RANGE / 2.0 + cam.z;
        z += offset_sign(z) * SPAWN_MARGIN;
        self.shape.coord.set_position(&Vector::new(x, 0.0, z));

        self.appear = true;
        self.shape.coord.rotate_y(rng.next_unit() * TAU);
        self.shape.color = Color::random(rng);
        debug!(x, z, color = %self.shape.color, "tank spawned");
    }

    /// One AI step against the camera.
    pub fn on_frame(&mut self, camera: &Camera, rng: &mut dyn RandomSource) -> SteerOutcome {
        let mut c = camera.coord.d_vec;
        c -= self.shape.coord.d_vec;
        self.distance = c.distance();

        if self.free {
            let table = pattern_table(self.distance, &self.profile);
            self.pattern = table[rng.pick_index(table.len())];
            self.free = false;
            debug!(pattern = ?self.pattern, distance = self.distance, "pattern chosen");
        }

        let p = self.profile;
        let f = self.shape.coord.f;
        let rad = (f.dot_product(&c) / (1.0 + self.distance))
            .clamp(-1.0, 1.0)
            .acos();
        let cross = f.x * c.z - f.z * c.x;
        let toward = if cross > 0.0 { -p.turn_rad } else { p.turn_rad };

        let mut fired = false;
        match self.pattern {
            Seek => {
                if rad >= p.shot_rad {
                    self.shape.coord.rotate_y(toward);
                } else {
                    self.shape.coord.move_f(p.speed);
                }
            }
            Circle => {
                if rad <= FRAC_PI_2 {
                    self.shape.coord.rotate_y(-toward);
                } else {
                    self.shape.coord.rotate_y(toward);
                }
                self.shape.coord.move_f(p.speed);
            }
            Evade => {
                if rad <= PI - p.shot_rad {
                    self.shape.coord.rotate_y(-toward);
                }
                self.shape.coord.move_f(p.speed);
            }
            Attack => {
                if rad >= p.shot_rad {
                    self.shape.coord.rotate_y(toward);
                } else {
                    fired = self.attack();
                    self.frame = p.max_frame;
                }
            }
        }

        self.frame += 1;
        let episode_ended = self.frame > p.max_frame;
        if episode_ended {
            self.free = true;
            self.frame = 0;
        }

        SteerOutcome {
            pattern: self.pattern,
            fired,
            episode_ended,
        }
    }

    /// Fires the owned bullet unless it is already in flight.
    fn attack(&mut self) -> bool {
        if self.bullet.appear {
            return false;
        }
        self.bullet.on_shot_start(&self.shape.coord);
        debug!(distance = self.distance, "tank fired");
        true
    }

    pub fn on_hit(&mut self) {
        self.appear = false;
    }

    pub fn draw(&mut self, view: &Matrix, screen_proj: &Matrix) -> &[Segment] {
        self.shape.draw(view, screen_proj)
    }
}

impl Target for Tank {
    fn coord(&self) -> &Coord3D {
        &self.shape.coord
    }

    fn is_active(&self) -> bool {
        self.appear
    }

    fn on_hit(&mut self) {
        Tank::on_hit(self);
    }
}
