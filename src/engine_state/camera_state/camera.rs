//! # Camera Implementation
//!
//! A yaw/pitch first-person camera and its perspective projection.
//!
//! Matrices follow the OpenGL/WebGL conventions (right-handed view space,
//! clip depth in [-1, 1]), which is what the browser renderer consumes.

use cgmath::{perspective, InnerSpace, Matrix4, Point3, Rad, Vector3};
use std::f32::consts::FRAC_PI_2;

/// Pitch limit, just short of straight up or down
pub const SAFE_FRAC_PI_2: f32 = FRAC_PI_2 - 0.0001;

/// Represents a first-person camera in 3D space.
///
/// Yaw is measured from +X towards +Z, pitch upwards from the horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians
    pub yaw: Rad<f32>,
    /// Vertical rotation (around X axis) in radians
    pub pitch: Rad<f32>,
}

impl Camera {
    /// Creates a camera at `position`. Pitch is clamped to [`SAFE_FRAC_PI_2`].
    ///
    /// ```rust
    /// use cgmath::{Deg, Point3};
    /// use voxel_world::engine_state::camera_state::camera::Camera;
    ///
    /// let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
    /// assert!((camera.forward().x - 1.0).abs() < 1e-6);
    /// ```
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        let mut camera = Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
        };
        camera.clamp_pitch();
        camera
    }

    /// The normalized direction the camera is looking in.
    pub fn forward(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize()
    }

    /// The horizontal unit vector pointing to the camera's right.
    pub fn right(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        Vector3::new(-yaw_sin, 0.0, yaw_cos)
    }

    /// Turns the camera by a mouse delta in pixels.
    ///
    /// # Arguments
    /// * `delta_x`, `delta_y` - Mouse movement since the last tick; positive y looks down
    /// * `sensitivity` - Radians per pixel
    pub fn apply_look(&mut self, delta_x: f32, delta_y: f32, sensitivity: f32) {
        self.yaw += Rad(delta_x * sensitivity);
        self.pitch -= Rad(delta_y * sensitivity);
        self.clamp_pitch();
    }

    fn clamp_pitch(&mut self) {
        if self.pitch < -Rad(SAFE_FRAC_PI_2) {
            self.pitch = -Rad(SAFE_FRAC_PI_2);
        } else if self.pitch > Rad(SAFE_FRAC_PI_2) {
            self.pitch = Rad(SAFE_FRAC_PI_2);
        }
    }

    /// World to view space.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.forward(), Vector3::unit_y())
    }
}

/// Perspective settings for the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    /// Creates a projection for a `width` x `height` viewport with vertical field of view `fovy`.
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        let mut projection = Self {
            aspect: 1.0,
            fovy: fovy.into(),
            znear,
            zfar,
        };
        projection.resize(width, height);
        projection
    }

    /// Updates the aspect ratio after the viewport changed size.
    ///
    /// A zero height leaves the aspect ratio unchanged.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Aspect ratio (width / height).
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// View to clip space.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::Deg;

    #[test]
    fn basis_is_orthonormal() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(37.0), Deg(-20.0));
        assert_relative_eq!(camera.forward().magnitude(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(camera.right().magnitude(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(camera.right().dot(camera.forward()), 0.0, epsilon = 1e-6);
        assert_relative_eq!(camera.right().y, 0.0);
    }

    #[test]
    fn right_is_forward_cross_up() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
        let expected = camera.forward().cross(Vector3::unit_y());
        let right = camera.right();
        for axis in 0..3 {
            assert_relative_eq!(right[axis], expected[axis], epsilon = 1e-6);
        }
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
        camera.apply_look(0.0, -10_000.0, 0.002);
        assert_relative_eq!(camera.pitch.0, SAFE_FRAC_PI_2);
        camera.apply_look(0.0, 20_000.0, 0.002);
        assert_relative_eq!(camera.pitch.0, -SAFE_FRAC_PI_2);
    }

    #[test]
    fn positive_delta_x_turns_right() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
        let right = camera.right();
        camera.apply_look(100.0, 0.0, 0.002);
        assert!(camera.forward().dot(right) > 0.0);
    }
}
