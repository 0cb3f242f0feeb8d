//! Projectiles.
//!
//! A bullet copies its shooter's pose, flies straight along its forward axis
//! and ends its flight on the first hit or after `frame_limit` frames. While
//! `appear` is false it receives no per-frame updates.

use tracing::debug;

use crate::coord::{Camera, Coord3D};
use crate::render::Color;
use crate::shape::Shape;
use crate::vertex::VertexTable;

pub const DEFAULT_SPEED: f64 = 15.0;
pub const DEFAULT_FRAME_LIMIT: u32 = 30;

/// Something a bullet can hit.
pub trait Target {
    fn coord(&self) -> &Coord3D;

    /// Inactive targets are ignored by the hit test.
    fn is_active(&self) -> bool {
        true
    }

    fn on_hit(&mut self);
}

impl Target for Camera {
    fn coord(&self) -> &Coord3D {
        &self.coord
    }

    /// The arena keeps score; the camera itself is unaffected.
    fn on_hit(&mut self) {}
}

/// Result of one flight frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// Not in flight; nothing happened.
    Idle,
    InFlight,
    /// Hit the target at this index; the flight is over.
    Hit(usize),
    /// Ran out of frames.
    Expired,
}

#[derive(Debug, Clone)]
pub struct Bullet {
    pub shape: Shape,
    pub speed: f64,
    pub frame: u32,
    pub frame_limit: u32,
    pub appear: bool,
}

impl Bullet {
    pub fn new(vt: &VertexTable, color: Color) -> Self {
        Self {
            shape: Shape::new(Coord3D::default(), vt, color),
            speed: DEFAULT_SPEED,
            frame: 0,
            frame_limit: DEFAULT_FRAME_LIMIT,
            appear: false,
        }
    }

    /// Starts a flight from `origin`'s position and orientation.
    pub fn on_shot_start(&mut self, origin: &Coord3D) {
        let c = &mut self.shape.coord;
        c.set_position(&origin.d_vec);
        c.set_attitude(&origin.r, &origin.u, &origin.f);
        self.frame = 0;
        self.appear = true;
    }

    /// Advances one frame and tests the active targets in order.
    pub fn on_shot_frame<T: Target>(&mut self, targets: &mut [T]) -> ShotOutcome {
        if !self.appear {
            return ShotOutcome::Idle;
        }
        self.shape.coord.move_f(self.speed);
        self.frame += 1;

        let hit = targets
            .iter()
            .position(|t| t.is_active() && self.shape.coord.sphere_hit(t.coord()));
        if let Some(i) = hit {
            targets[i].on_hit();
            debug!(target_index = i, frame = self.frame, "bullet hit");
            self.on_shot_end();
            return ShotOutcome::Hit(i);
        }

        if self.frame > self.frame_limit {
            self.on_shot_end();
            return ShotOutcome::Expired;
        }
        ShotOutcome::InFlight
    }

    pub fn on_shot_end(&mut self) {
        self.frame = 0;
        self.appear = false;
        self.shape.clear_segments();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Sphere;

    struct Dummy {
        coord: Coord3D,
        alive: bool,
    }

    impl Target for Dummy {
        fn coord(&self) -> &Coord3D {
            &self.coord
        }
        fn is_active(&self) -> bool {
            self.alive
        }
        fn on_hit(&mut self) {
            self.alive = false;
        }
    }

    fn dummy_at(z: f64) -> Dummy {
        let mut coord = Coord3D::at(0.0, 0.0, z);
        coord.sphere = Sphere::new(15.0);
        Dummy { coord, alive: true }
    }

    fn bullet() -> Bullet {
        Bullet::new(&VertexTable::from_points(&[[0.0, 0.0, 0.0], [0.0, 0.0, 1.0]]), Color::RED)
    }

    #[test]
    fn idle_bullet_does_nothing() {
        let mut b = bullet();
        let mut targets = [dummy_at(0.0)];
        assert_eq!(b.on_shot_frame(&mut targets), ShotOutcome::Idle);
        assert!(targets[0].alive);
    }

    #[test]
    fn flight_expires_after_frame_limit() {
        let mut b = bullet();
        b.on_shot_start(&Coord3D::default());
        let mut none: [Dummy; 0] = [];
        for _ in 0..DEFAULT_FRAME_LIMIT {
            assert_eq!(b.on_shot_frame(&mut none), ShotOutcome::InFlight);
        }
        assert_eq!(b.on_shot_frame(&mut none), ShotOutcome::Expired);
        assert!(!b.appear);
        assert_eq!(b.frame, 0);
    }

    #[test]
    fn first_active_target_in_range_is_hit() {
        let mut b = bullet();
        b.on_shot_start(&Coord3D::default());

        let mut dead = dummy_at(60.0);
        dead.alive = false;
        let mut targets = [dead, dummy_at(60.0), dummy_at(60.0)];
        let mut outcome = ShotOutcome::InFlight;
        for _ in 0..5 {
            outcome = b.on_shot_frame(&mut targets);
            if outcome != ShotOutcome::InFlight {
                break;
            }
        }
        assert_eq!(outcome, ShotOutcome::Hit(1));
        assert!(!targets[1].alive);
        assert!(targets[2].alive);
        assert!(!b.appear);
    }

    #[test]
    fn shot_copies_shooter_pose() {
        let mut b = bullet();
        let mut shooter = Coord3D::at(3.0, 0.0, 4.0);
        shooter.rotate_y(std::f64::consts::FRAC_PI_2);
        b.on_shot_start(&shooter);
        b.on_shot_frame::<Dummy>(&mut []);
        let p = b.shape.coord.d_vec;
        assert!((p.x - 18.0).abs() < 1e-9);
        assert!((p.z - 4.0).abs() < 1e-9);
        assert_eq!(p.y, 0.0);
    }
}
