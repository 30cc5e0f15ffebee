//! # Player
//!
//! The player's body: position, velocity and the axis-aligned box used for
//! collision. Movement physics live in [`movement`], block picking in [`raycast`].
//!
//! The box is centred horizontally on `position` and extends upward from
//! `position.y`, so `position` is the point between the player's feet.

use cgmath::{Point3, Vector3, Zero};

use crate::{config::MovementConfig, engine_state::voxels::coords::ChunkCoord};

pub mod movement;
pub mod raycast;

/// Which physics regime applies this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementState {
    /// Standing on a block: friction and ground acceleration.
    Grounded,
    /// Falling or jumping: air acceleration only.
    Airborne,
    /// Fly mode: no gravity and no collision.
    Flying,
}

/// The player-controlled body.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Feet position in world space
    pub position: Point3<f32>,
    /// Blocks per tick
    pub velocity: Vector3<f32>,
    /// Set by the last vertical collision pass
    pub on_ground: bool,
    /// Fly mode
    pub flying: bool,
    /// Half the box width along X and Z
    pub half_width: f32,
    /// Box height
    pub height: f32,
    /// Eye height above the feet
    pub eye_height: f32,
}

impl Player {
    /// Creates a resting player with its feet at `position`.
    pub fn new(position: Point3<f32>, config: &MovementConfig) -> Self {
        Player {
            position,
            velocity: Vector3::zero(),
            on_ground: false,
            flying: false,
            half_width: config.player_width / 2.0,
            height: config.player_height,
            eye_height: config.eye_height,
        }
    }

    /// The current physics regime.
    pub fn state(&self) -> MovementState {
        if self.flying {
            MovementState::Flying
        } else if self.on_ground {
            MovementState::Grounded
        } else {
            MovementState::Airborne
        }
    }

    /// Where the camera sits.
    pub fn eye_position(&self) -> Point3<f32> {
        Point3::new(self.position.x, self.position.y + self.eye_height, self.position.z)
    }

    /// The collision box as (min, max) corners.
    pub fn aabb(&self) -> (Point3<f32>, Point3<f32>) {
        (
            Point3::new(
                self.position.x - self.half_width,
                self.position.y,
                self.position.z - self.half_width,
            ),
            Point3::new(
                self.position.x + self.half_width,
                self.position.y + self.height,
                self.position.z + self.half_width,
            ),
        )
    }

    /// The chunk the player is standing in.
    pub fn chunk(&self) -> ChunkCoord {
        ChunkCoord::containing_point(self.position)
    }

    /// Whether the unit cell at `block` overlaps the player's box.
    ///
    /// Boxes that only touch do not overlap.
    pub fn intersects_block(&self, block: Point3<i32>) -> bool {
        let (min, max) = self.aabb();
        let block_min = Point3::new(block.x as f32, block.y as f32, block.z as f32);
        (0..3).all(|axis| min[axis] < block_min[axis] + 1.0 && max[axis] > block_min[axis])
    }

    /// Switches fly mode, clearing any velocity carried over.
    pub fn toggle_flying(&mut self) {
        self.flying = !self.flying;
        self.velocity = Vector3::zero();
        self.on_ground = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    fn player_at(x: f32, y: f32, z: f32) -> Player {
        Player::new(Point3::new(x, y, z), &MovementConfig::default())
    }

    #[test]
    fn box_extends_up_from_the_feet() {
        let player = player_at(0.5, 10.0, 0.5);
        let (min, max) = player.aabb();
        assert_relative_eq!(min.x, 0.2, epsilon = 1e-6);
        assert_relative_eq!(min.y, 10.0);
        assert_relative_eq!(max.z, 0.8, epsilon = 1e-6);
        assert_relative_eq!(max.y, 11.8, epsilon = 1e-5);
        assert_relative_eq!(player.eye_position().y, 11.6, epsilon = 1e-5);
    }

    #[test_case(0, 10, 0, true ; "feet cell")]
    #[test_case(0, 11, 0, true ; "head cell")]
    #[test_case(0, 9, 0, false ; "floor below")]
    #[test_case(1, 10, 0, false ; "beside")]
    #[test_case(0, 12, 0, false ; "above head")]
    fn block_overlap(x: i32, y: i32, z: i32, expected: bool) {
        let player = player_at(0.5, 10.0, 0.5);
        assert_eq!(player.intersects_block(Point3::new(x, y, z)), expected);
    }

    #[test]
    fn state_follows_flags() {
        let mut player = player_at(0.0, 0.0, 0.0);
        assert_eq!(player.state(), MovementState::Airborne);
        player.on_ground = true;
        assert_eq!(player.state(), MovementState::Grounded);
        player.toggle_flying();
        assert_eq!(player.state(), MovementState::Flying);
    }
}
