//! # Camera Implementation
//!
//! This module contains the first-person camera and its projection.
//!
//! ## Key Components
//! - `Camera`: Eye position and orientation, producing the view matrix
//! - `Projection`: Perspective settings, producing the projection matrix
//!
//! Matrices follow the GL clip convention (depth in `[-1, 1]` before the
//! viewport transform, `[0, 1]` after it), which is what the depth-buffer
//! targeting unprojects against.

use cgmath::*;

/// Represents a first-person camera in 3D space.
///
/// The camera does not orient itself: the player's view orientation pushes
/// its forward and up vectors each tick.
///
/// # Fields
/// - `position`: The eye position in world space
/// - `direction`: Unit vector the camera looks along
/// - `up`: Unit vector pointing to the top of the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// The eye position in world space
    pub position: Point3<f64>,
    /// Unit vector the camera looks along
    pub direction: Vector3<f32>,
    /// Unit vector pointing to the top of the screen
    pub up: Vector3<f32>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::new(0.0, 0.0, 0.0), Vector3::unit_x(), Vector3::unit_z())
    }
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Example
    /// ```
    /// use cgmath::{Point3, Vector3};
    /// use voxel_player::engine_state::camera_state::camera::Camera;
    ///
    /// let camera = Camera::new(
    ///     Point3::new(0.0, 0.0, 1.625), // Eye height above the origin
    ///     Vector3::unit_x(),            // Looking along positive X
    ///     Vector3::unit_z(),            // Z up
    /// );
    /// assert_eq!(camera.point_targeted(), Point3::new(1.0, 0.0, 1.625));
    /// ```
    pub fn new(position: Point3<f64>, direction: Vector3<f32>, up: Vector3<f32>) -> Self {
        Self {
            position,
            direction,
            up,
        }
    }

    /// Moves the eye.
    pub fn set_position(&mut self, position: Point3<f64>) {
        self.position = position;
    }

    /// Replaces the forward and up vectors.
    pub fn set_orientation(&mut self, direction: Vector3<f32>, up: Vector3<f32>) {
        self.direction = direction;
        self.up = up;
    }

    /// Gets the camera's forward direction vector.
    pub fn look_direction(&self) -> Vector3<f32> {
        self.direction
    }

    /// The point one unit ahead of the eye.
    pub fn point_targeted(&self) -> Point3<f64> {
        Point3::new(
            self.position.x + self.direction.x as f64,
            self.position.y + self.direction.y as f64,
            self.position.z + self.direction.z as f64,
        )
    }

    /// Calculates the view matrix for this camera.
    ///
    /// The view matrix transforms world coordinates to view (camera) space.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::new(
            self.position.x as f32,
            self.position.y as f32,
            self.position.z as f32,
        );
        Matrix4::look_to_rh(eye, self.direction, self.up)
    }
}

/// Represents a camera's projection matrix and related parameters.
///
/// This handles the perspective projection used to render the 3D scene.
/// It manages the viewport size, field of view, and near/far clipping planes.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Viewport width in pixels
    width: u32,
    /// Viewport height in pixels
    height: u32,
    /// Aspect ratio (width / height)
    aspect: f32,
    /// Vertical field of view in radians
    fovy: Rad<f32>,
    /// Near clipping plane distance
    znear: f32,
    /// Far clipping plane distance
    zfar: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `width` - Viewport width in pixels
    /// * `height` - Viewport height in pixels
    /// * `fovy` - Vertical field of view (can be any type convertible to `Rad<f32>`)
    /// * `znear` - Near clipping plane distance
    /// * `zfar` - Far clipping plane distance
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            aspect: width as f32 / height as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    /// Updates the projection's aspect ratio for viewport resizing.
    ///
    /// Zero sizes, as reported for a minimized window, are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("Ignoring resize to {}x{}", width, height);
            return;
        }
        self.width = width;
        self.height = height;
        self.aspect = width as f32 / height as f32;
    }

    /// Viewport width and height in pixels.
    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Calculates the projection matrix.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}
