//! Block picking by marching along the view ray.
//!
//! The ray is sampled at fixed steps rather than walked cell by cell, so a ray
//! grazing a block corner can miss it. The hit face is guessed from the last
//! step taken.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::{config::PickConfig, engine_state::voxels::world::World};

/// The first solid block along a ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickResult {
    /// World position of the hit block
    pub block: Point3<i32>,
    /// Outward normal of the face the ray entered through
    pub normal: Vector3<i32>,
}

impl PickResult {
    /// The cell a block placed against the hit face would occupy.
    pub fn placement(&self) -> Point3<i32> {
        self.block + self.normal
    }
}

/// Finds the first solid block within `config.max_distance` of `origin`.
///
/// # Arguments
/// * `world` - Block queries
/// * `origin` - Ray start, usually the eye position
/// * `direction` - Ray direction; need not be normalized
/// * `config` - Step size and reach
///
/// # Returns
/// `None` if nothing solid is in reach, or the direction is zero.
pub fn pick(world: &World, origin: Point3<f32>, direction: Vector3<f32>, config: &PickConfig) -> Option<PickResult> {
    if direction.magnitude2() <= f32::EPSILON || config.step <= 0.0 {
        return None;
    }
    let direction = direction.normalize();
    let steps = (config.max_distance / config.step).ceil() as usize;

    let mut previous = origin;
    for i in 0..=steps {
        let distance = (i as f32 * config.step).min(config.max_distance);
        let point = origin + direction * distance;
        let block = Point3::new(point.x.floor() as i32, point.y.floor() as i32, point.z.floor() as i32);

        if world.is_solid(block.x, block.y, block.z) {
            return Some(PickResult {
                block,
                normal: face_normal((point - previous) / config.step),
            });
        }
        previous = point;
    }

    None
}

/// Outward normal opposing the dominant axis of the last step.
///
/// Ties go to x, then y.
fn face_normal(step: Vector3<f32>) -> Vector3<i32> {
    let (ax, ay, az) = (step.x.abs(), step.y.abs(), step.z.abs());
    let sign = |component: f32| if component > 0.0 { -1 } else { 1 };

    if ax >= ay && ax >= az {
        Vector3::new(sign(step.x), 0, 0)
    } else if ay >= az {
        Vector3::new(0, sign(step.y), 0)
    } else {
        Vector3::new(0, 0, sign(step.z))
    }
}
