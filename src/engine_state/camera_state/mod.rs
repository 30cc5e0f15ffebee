//! # Camera State Management
//!
//! This module handles all camera-related functionality including:
//! - Camera position and orientation tracking
//! - View and projection matrix calculations
//! - Chunk visibility determination via frustum culling
//!
//! ## Core Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `Projection`: Manages the camera's projection matrix
//! - `Frustum`: Clipping planes used to cull chunk bounding boxes
//! - `ViewSource`: What the engine tick needs from a view, so tests can substitute one

use cgmath::{Deg, Matrix4, Point3, Vector3};

pub mod camera;
pub mod frustum;

use camera::{Camera, Projection};
use frustum::Frustum;

/// Orientation and visibility queries the engine needs each tick.
pub trait ViewSource {
    /// Normalized view direction.
    fn forward(&self) -> Vector3<f32>;

    /// Normalized horizontal right vector.
    fn right(&self) -> Vector3<f32>;

    /// Whether the world-space box `[min, max]` may be on screen.
    fn is_box_visible(&self, min: Point3<f32>, max: Point3<f32>) -> bool;
}

/// Manages the camera, its projection and the derived frustum.
///
/// # Fields
/// - `camera`: The current camera state (position, orientation)
/// - `projection`: Perspective settings
/// - `frustum`: Planes for the last call to [`CameraState::update`]
#[derive(Debug, Clone)]
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: Camera,
    /// Perspective projection settings
    pub projection: Projection,
    frustum: Frustum,
}

impl CameraState {
    /// Vertical field of view in degrees.
    pub const FOVY_DEGREES: f32 = 75.0;
    /// Near clipping plane distance
    pub const ZNEAR: f32 = 0.1;
    /// Far clipping plane distance
    pub const ZFAR: f32 = 1000.0;

    /// Creates a camera at `position` looking along +X with a viewport of `width` x `height`.
    pub fn new(position: Point3<f32>, width: u32, height: u32) -> Self {
        let camera = Camera::new(position, Deg(0.0), Deg(0.0));
        let projection = Projection::new(width, height, Deg(Self::FOVY_DEGREES), Self::ZNEAR, Self::ZFAR);
        let mut state = CameraState {
            camera,
            projection,
            frustum: Frustum::from_matrix(projection.calc_matrix() * camera.calc_matrix()),
        };
        state.update(position);
        state
    }

    /// Moves the camera to `eye` and recomputes the frustum.
    ///
    /// Call once per tick after the player has moved.
    pub fn update(&mut self, eye: Point3<f32>) {
        self.camera.position = eye;
        self.frustum = Frustum::from_matrix(self.view_projection());
    }

    /// Updates the aspect ratio after the viewport changed.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
        self.update(self.camera.position);
    }

    /// The current frustum.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Combined projection and view matrix for the host renderer.
    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection.calc_matrix() * self.camera.calc_matrix()
    }
}

impl ViewSource for CameraState {
    fn forward(&self) -> Vector3<f32> {
        self.camera.forward()
    }

    fn right(&self) -> Vector3<f32> {
        self.camera.right()
    }

    fn is_box_visible(&self, min: Point3<f32>, max: Point3<f32>) -> bool {
        self.frustum.intersects_aabb(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frustum_follows_the_camera() {
        let mut state = CameraState::new(Point3::new(0.0, 40.0, 0.0), 800, 600);
        let ahead = (Point3::new(30.0, 30.0, -5.0), Point3::new(40.0, 50.0, 5.0));
        assert!(state.is_box_visible(ahead.0, ahead.1));

        state.camera.yaw = cgmath::Rad(std::f32::consts::PI);
        state.update(Point3::new(0.0, 40.0, 0.0));
        assert!(!state.is_box_visible(ahead.0, ahead.1));
    }
}
