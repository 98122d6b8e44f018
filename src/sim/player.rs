//! Player state: lane, forward travel and the jump state machine

use glam::Vec3;

use super::collision::Aabb;
use super::lane::{LaneIndex, Lanes};
use crate::consts::PLAYER_SIZE;

/// Vertical state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpPhase {
    Grounded,
    Jumping,
}

/// The runner
#[derive(Debug, Clone)]
pub struct Player {
    /// Center position; z decreases as the player runs forward
    pub pos: Vec3,
    pub lane: LaneIndex,
    /// Vertical velocity (only meaningful while jumping)
    pub vel_y: f32,
    pub phase: JumpPhase,
    resting_height: f32,
}

impl Player {
    pub fn new(lanes: &Lanes, start_lane: usize, resting_height: f32) -> Self {
        let lane = LaneIndex::new(start_lane, lanes);
        Self {
            pos: Vec3::new(lanes.x(lane.get()), resting_height, 0.0),
            lane,
            vel_y: 0.0,
            phase: JumpPhase::Grounded,
            resting_height,
        }
    }

    #[inline]
    pub fn is_jumping(&self) -> bool {
        self.phase == JumpPhase::Jumping
    }

    pub fn move_left(&mut self, lanes: &Lanes) -> bool {
        let moved = self.lane.shift_left();
        self.pos.x = lanes.x(self.lane.get());
        moved
    }

    pub fn move_right(&mut self, lanes: &Lanes) -> bool {
        let moved = self.lane.shift_right(lanes);
        self.pos.x = lanes.x(self.lane.get());
        moved
    }

    /// Start a jump; ignored while already airborne
    pub fn jump(&mut self, impulse: f32) -> bool {
        if self.is_jumping() {
            return false;
        }
        self.phase = JumpPhase::Jumping;
        self.vel_y = impulse;
        true
    }

    /// Semi-implicit Euler step. Returns true on the tick the player lands.
    pub fn integrate_jump(&mut self, gravity: f32) -> bool {
        if !self.is_jumping() {
            return false;
        }
        self.vel_y += gravity;
        self.pos.y += self.vel_y;
        if self.pos.y <= self.resting_height {
            self.pos.y = self.resting_height;
            self.vel_y = 0.0;
            self.phase = JumpPhase::Grounded;
            return true;
        }
        false
    }

    /// Run forward by `speed`
    pub fn advance(&mut self, speed: f32) {
        self.pos.z -= speed;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec3::splat(PLAYER_SIZE / 2.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    fn player() -> (Player, Lanes) {
        let lanes = Lanes::new(LANES.to_vec());
        (Player::new(&lanes, START_LANE, RESTING_HEIGHT), lanes)
    }

    #[test]
    fn test_lane_moves_snap_x() {
        let (mut p, lanes) = player();
        assert_eq!(p.pos.x, 0.0);
        assert!(p.move_left(&lanes));
        assert_eq!(p.pos.x, -2.0);
        assert!(!p.move_left(&lanes));
        assert_eq!(p.pos.x, -2.0);
        assert!(p.move_right(&lanes));
        assert!(p.move_right(&lanes));
        assert!(!p.move_right(&lanes));
        assert_eq!(p.pos.x, 2.0);
        assert_eq!(p.lane.get(), 2);
    }

    #[test]
    fn test_no_double_jump() {
        let (mut p, _) = player();
        assert!(p.jump(JUMP_IMPULSE));
        p.integrate_jump(GRAVITY);
        let vel = p.vel_y;
        assert!(!p.jump(JUMP_IMPULSE));
        assert_eq!(p.vel_y, vel);
    }

    #[test]
    fn test_jump_arc_rises_then_lands() {
        let (mut p, _) = player();
        p.jump(JUMP_IMPULSE);

        let mut heights = vec![p.pos.y];
        let mut landed_at = None;
        for t in 1..=200 {
            if p.integrate_jump(GRAVITY) {
                landed_at = Some(t);
                break;
            }
            heights.push(p.pos.y);
        }
        let landed_at = landed_at.expect("jump never landed");
        assert!(landed_at <= 45);
        assert_eq!(p.pos.y, RESTING_HEIGHT);
        assert_eq!(p.phase, JumpPhase::Grounded);
        assert_eq!(p.vel_y, 0.0);

        // Strictly up, then strictly down
        let max = heights.iter().copied().fold(f32::MIN, f32::max);
        let peak = heights.iter().position(|&h| h == max).unwrap();
        assert!(heights[..=peak].windows(2).all(|w| w[1] > w[0]));
        assert!(heights[peak..].windows(2).all(|w| w[1] <= w[0]));
        // High enough to clear an obstacle
        assert!(heights[peak] - RESTING_HEIGHT > OBSTACLE_SIZE);
    }

    #[test]
    fn test_grounded_integrate_is_noop() {
        let (mut p, _) = player();
        assert!(!p.integrate_jump(GRAVITY));
        assert_eq!(p.pos.y, RESTING_HEIGHT);
    }

    proptest! {
        #[test]
        fn height_never_below_rest(impulse in 0.01f32..1.0, gravity in -0.1f32..-0.001, ticks in 1usize..500) {
            let (mut p, _) = player();
            p.jump(impulse);
            for _ in 0..ticks {
                p.integrate_jump(gravity);
                prop_assert!(p.pos.y >= RESTING_HEIGHT);
            }
        }
    }
}
