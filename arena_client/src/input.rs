//! Input handling.
//!
//! Device polling lives outside this crate. A frontend samples its device
//! into an [`InputState`] once per tick; this module turns that into camera
//! motion. The horizon ring follows the camera so it never runs out.

use arena_shared::coord::Coord3D;

/// Sampled controls for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// `1` forward, `-1` back, `0` none.
    pub forward: i8,
    /// `1` right, `-1` left, `0` none.
    pub turn: i8,
    pub fire: bool,
}

impl InputState {
    pub const IDLE: Self = Self {
        forward: 0,
        turn: 0,
        fire: false,
    };

    /// Travel and turn for this tick, or `None` when idle.
    pub fn wish(self, move_step: f64, turn_step_rad: f64) -> Option<(f64, f64)> {
        let travel = f64::from(self.forward.signum()) * move_step;
        let turn = f64::from(self.turn.signum()) * turn_step_rad;
        (travel != 0.0 || turn != 0.0).then_some((travel, turn))
    }
}

/// Moves the camera and anything that rides along with it.
///
/// Forward while turning right moves first and then turns; every other
/// combination turns first and then moves.
pub fn steer(input: InputState, move_step: f64, turn_step_rad: f64, riders: &mut [&mut Coord3D]) {
    let Some((travel, turn)) = input.wish(move_step, turn_step_rad) else {
        return;
    };
    let move_first = travel > 0.0 && turn > 0.0;
    for c in riders.iter_mut() {
        if move_first {
            c.move_f(travel);
            c.rotate_y(turn);
        } else {
            c.rotate_y(turn);
            c.move_f(travel);
        }
    }
}

/// Scripted demo driver: cruises forward, weaves, and fires periodically.
pub fn autopilot(frame: u64) -> InputState {
    let turn = match (frame / 60) % 4 {
        0 => 0,
        1 => 1,
        2 => 0,
        _ => -1,
    };
    InputState {
        forward: 1,
        turn,
        fire: frame % 45 == 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_input_has_no_wish() {
        assert_eq!(InputState::IDLE.wish(3.0, 0.05), None);
    }

    #[test]
    fn camera_and_horizon_move_together() {
        let mut cam = Coord3D::default();
        let mut horizon = Coord3D::default();
        let input = InputState {
            forward: 1,
            turn: 1,
            fire: false,
        };
        for _ in 0..10 {
            steer(input, 3.0, 3f64.to_radians(), &mut [&mut cam, &mut horizon]);
        }
        assert_eq!(cam.d_vec, horizon.d_vec);
        assert_eq!(cam.f, horizon.f);
        assert!(cam.d_vec.distance() > 25.0);
    }

    #[test]
    fn straight_travel_is_along_forward() {
        let mut cam = Coord3D::default();
        steer(
            InputState {
                forward: -1,
                turn: 0,
                fire: false,
            },
            3.0,
            0.1,
            &mut [&mut cam],
        );
        assert!((cam.d_vec.z + 3.0).abs() < 1e-12);
        assert_eq!(cam.d_vec.x, 0.0);
    }

    fn one_step(forward: i8, turn: i8) -> Coord3D {
        let mut c = Coord3D::default();
        steer(
            InputState {
                forward,
                turn,
                fire: false,
            },
            3.0,
            0.5,
            &mut [&mut c],
        );
        c
    }

    #[test]
    fn forward_right_moves_before_turning() {
        let c = one_step(1, 1);
        assert!(c.d_vec.x.abs() < 1e-12);
        assert!((c.d_vec.z - 3.0).abs() < 1e-12);
    }

    #[test]
    fn forward_left_turns_before_moving() {
        let c = one_step(1, -1);
        let mut expected = Coord3D::default();
        expected.rotate_y(-0.5);
        assert!((c.d_vec.x - 3.0 * expected.f.x).abs() < 1e-12);
        assert!((c.d_vec.z - 3.0 * expected.f.z).abs() < 1e-12);
        assert!(c.d_vec.x.abs() > 1.0);
    }

    #[test]
    fn reverse_turns_before_moving() {
        for turn in [-1, 1] {
            let c = one_step(-1, turn);
            let mut expected = Coord3D::default();
            expected.rotate_y(f64::from(turn) * 0.5);
            assert!((c.d_vec.x + 3.0 * expected.f.x).abs() < 1e-12);
            assert!((c.d_vec.z + 3.0 * expected.f.z).abs() < 1e-12);
        }
    }

    #[test]
    fn autopilot_fires_on_schedule() {
        assert!(autopilot(0).fire);
        assert!(!autopilot(1).fire);
        assert_eq!(autopilot(61).turn, 1);
        assert_eq!(autopilot(200).turn, -1);
    }
}
