//! # Camera State Management
//!
//! This module keeps the camera in step with the player.
//!
//! ## Core Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `Projection`: Manages the camera's projection matrix
//! - `CameraState`: Owns both and derives them from the player each tick

use cgmath::{Deg, Matrix4};

use super::player::Player;

pub mod camera;

use camera::{Camera, Projection};

/// Default viewport before the renderer reports its size.
pub const DEFAULT_VIEWPORT: (u32, u32) = (1280, 720);
/// Vertical field of view in degrees.
pub const FIELD_OF_VIEW: f32 = 70.0;
/// Near clipping plane distance.
pub const Z_NEAR: f32 = 0.1;
/// Far clipping plane distance.
pub const Z_FAR: f32 = 1000.0;

/// The camera and its projection.
#[derive(Debug, Clone, Copy)]
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: Camera,
    /// Perspective settings
    pub projection: Projection,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            projection: Projection::new(
                DEFAULT_VIEWPORT.0,
                DEFAULT_VIEWPORT.1,
                Deg(FIELD_OF_VIEW),
                Z_NEAR,
                Z_FAR,
            ),
        }
    }
}

impl CameraState {
    /// Moves the camera to the player's eye and copies the view orientation.
    pub fn sync_to_player(&mut self, player: &Player) {
        self.camera.set_position(player.eye_position());
        self.camera
            .set_orientation(player.view.forward(), player.view.up());
    }

    /// The view matrix.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.camera.calc_matrix()
    }

    /// The projection matrix.
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection.calc_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MovementConfig;
    use cgmath::{InnerSpace, Point3};

    #[test]
    fn camera_follows_the_player_eye() {
        let mut player = Player::new(Point3::new(3.5, 4.5, 2.0), &MovementConfig::default());
        player.view.turn_horizontal(90.0);

        let mut state = CameraState::default();
        state.sync_to_player(&player);

        assert_eq!(state.camera.position, player.eye_position());
        assert!((state.camera.look_direction() - player.view.forward()).magnitude() < 1e-6);
        assert!((state.camera.point_targeted().y - 5.5).abs() < 1e-5);
    }
}
