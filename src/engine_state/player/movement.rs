//! # Movement Controller
//!
//! Quake/Source style player physics, one fixed step per tick.
//!
//! ## Per-tick Order
//!
//! 1. Build the horizontal wish direction from the held keys and the view.
//! 2. Grounded: friction, ground acceleration, optional jump.
//!    Airborne: air acceleration only.
//! 3. Gravity, applied even when grounded.
//! 4. Collision, one axis at a time in the order Y, X, Z. Each axis moves the
//!    player before the next axis is checked.
//!
//! Air acceleration uses a tiny target speed with a large factor. Because
//! [`accelerate`] only caps the gain along the wish direction, turning while
//! airborne can still add speed (strafe jumping).
//!
//! ## Collision Probes
//!
//! The vertical pass probes every column under the box at the new feet height.
//! The horizontal passes probe a single column at the leading edge, taken at the
//! current coordinate on the other horizontal axis, so moving diagonally into a
//! block corner can slip past it.

use cgmath::{InnerSpace, Vector3, Zero};

use crate::{
    config::MovementConfig,
    engine_state::{player::Player, voxels::world::World},
};

/// Below this speed grounded friction stops the player outright.
const STOP_SPEED: f32 = 0.001;

/// Movement keys held this tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MovementKeys {
    /// Move along the view direction
    pub forward: bool,
    /// Move against the view direction
    pub back: bool,
    /// Strafe left
    pub left: bool,
    /// Strafe right
    pub right: bool,
    /// Jump, or rise while flying
    pub jump: bool,
    /// Sink while flying
    pub down: bool,
}

/// Normalized horizontal direction the held keys ask for.
///
/// # Arguments
/// * `keys` - Held movement keys
/// * `forward`, `right` - View basis; any vertical component is discarded
///
/// # Returns
/// A unit vector with `y == 0`, or zero when the keys cancel out or none are held.
pub fn wish_direction(keys: &MovementKeys, forward: Vector3<f32>, right: Vector3<f32>) -> Vector3<f32> {
    let flatten = |v: Vector3<f32>| {
        let flat = Vector3::new(v.x, 0.0, v.z);
        if flat.magnitude2() > f32::EPSILON {
            flat.normalize()
        } else {
            Vector3::zero()
        }
    };
    let (forward, right) = (flatten(forward), flatten(right));

    let mut wish = Vector3::zero();
    if keys.forward {
        wish += forward;
    }
    if keys.back {
        wish -= forward;
    }
    if keys.right {
        wish += right;
    }
    if keys.left {
        wish -= right;
    }

    if wish.magnitude2() > f32::EPSILON {
        wish.normalize()
    } else {
        Vector3::zero()
    }
}

/// Accelerates `velocity` towards `wish_dir`.
///
/// Only the speed already travelled along `wish_dir` is compared with
/// `wish_speed`; the gain per call is capped at `accel * wish_speed`.
pub fn accelerate(velocity: &mut Vector3<f32>, wish_dir: Vector3<f32>, wish_speed: f32, accel: f32) {
    let current_speed = velocity.dot(wish_dir);
    let add_speed = wish_speed - current_speed;
    if add_speed <= 0.0 {
        return;
    }
    let accel_speed = (accel * wish_speed).min(add_speed);
    *velocity += wish_dir * accel_speed;
}

/// Advances a [`Player`] by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementController {
    /// Physics constants
    pub config: MovementConfig,
}

impl MovementController {
    /// Creates a controller with the given constants.
    pub fn new(config: MovementConfig) -> Self {
        MovementController { config }
    }

    /// Runs one physics step.
    ///
    /// # Arguments
    /// * `player` - The body to move
    /// * `world` - Block queries for collision
    /// * `keys` - Held movement keys
    /// * `forward`, `right` - The current view basis
    pub fn tick(
        &self,
        player: &mut Player,
        world: &World,
        keys: &MovementKeys,
        forward: Vector3<f32>,
        right: Vector3<f32>,
    ) {
        let wish_dir = wish_direction(keys, forward, right);

        if player.flying {
            self.fly(player, keys, wish_dir);
            return;
        }

        if player.on_ground {
            self.apply_friction(player);
            accelerate(
                &mut player.velocity,
                wish_dir,
                self.config.ground_max_speed,
                self.config.ground_accelerate,
            );
            if keys.jump {
                player.velocity.y = self.config.jump_velocity;
                player.on_ground = false;
            }
        } else {
            accelerate(
                &mut player.velocity,
                wish_dir,
                self.config.air_max_speed,
                self.config.air_accelerate,
            );
        }

        player.velocity.y -= self.config.gravity;

        self.resolve_y(player, world);
        self.resolve_x(player, world);
        self.resolve_z(player, world);
    }

    /// Ground friction on the horizontal velocity.
    pub fn apply_friction(&self, player: &mut Player) {
        let velocity = &mut player.velocity;
        let speed = velocity.magnitude();
        if speed < STOP_SPEED {
            velocity.x = 0.0;
            velocity.z = 0.0;
            return;
        }

        let friction = self.config.friction;
        let control = speed.max(friction);
        let drop = control * friction;
        let new_speed = (speed - drop).max(0.0);
        let scale = new_speed / speed;
        velocity.x *= scale;
        velocity.z *= scale;
    }

    fn fly(&self, player: &mut Player, keys: &MovementKeys, wish_dir: Vector3<f32>) {
        let speed = self.config.fly_speed;
        let vertical = match (keys.jump, keys.down) {
            (true, false) => speed,
            (false, true) => -speed,
            _ => 0.0,
        };
        player.velocity = wish_dir * speed + Vector3::new(0.0, vertical, 0.0);
        player.position += player.velocity;
        player.on_ground = false;
    }

    /// Vertical pass: lands on the floor cell under any column the box spans.
    fn resolve_y(&self, player: &mut Player, world: &World) {
        let velocity_y = player.velocity.y;
        if velocity_y > 0.0 {
            player.position.y += velocity_y;
            player.on_ground = false;
            return;
        }

        let new_y = player.position.y + velocity_y;
        let floor_y = new_y.floor() as i32;
        let (min, max) = player.aabb();
        let (min_x, max_x) = (min.x.floor() as i32, max.x.floor() as i32);
        let (min_z, max_z) = (min.z.floor() as i32, max.z.floor() as i32);

        let landed = (min_x..=max_x).any(|x| (min_z..=max_z).any(|z| world.is_solid(x, floor_y, z)));
        if landed {
            player.velocity.y = 0.0;
            player.position.y = floor_y as f32 + 1.0;
            player.on_ground = true;
        } else {
            player.position.y = new_y;
            player.on_ground = false;
        }
    }

    /// Rows of blocks the box overlaps vertically.
    ///
    /// A box top lying exactly on a block boundary does not reach the row above.
    fn spanned_rows(player: &Player) -> std::ops::RangeInclusive<i32> {
        player.position.y.floor() as i32..=(player.position.y + player.height).ceil() as i32 - 1
    }

    fn resolve_x(&self, player: &mut Player, world: &World) {
        let velocity_x = player.velocity.x;
        if velocity_x == 0.0 {
            return;
        }

        let new_x = player.position.x + velocity_x;
        let edge = if velocity_x > 0.0 {
            new_x + player.half_width
        } else {
            new_x - player.half_width
        };
        let block_x = edge.floor() as i32;
        let block_z = player.position.z.floor() as i32;

        if Self::spanned_rows(player).any(|y| world.is_solid(block_x, y, block_z)) {
            player.velocity.x = 0.0;
        } else {
            player.position.x = new_x;
        }
    }

    fn resolve_z(&self, player: &mut Player, world: &World) {
        let velocity_z = player.velocity.z;
        if velocity_z == 0.0 {
            return;
        }

        let new_z = player.position.z + velocity_z;
        let edge = if velocity_z > 0.0 {
            new_z + player.half_width
        } else {
            new_z - player.half_width
        };
        let block_z = edge.floor() as i32;
        let block_x = player.position.x.floor() as i32;

        if Self::spanned_rows(player).any(|y| world.is_solid(block_x, y, block_z)) {
            player.velocity.z = 0.0;
        } else {
            player.position.z = new_z;
        }
    }
}
