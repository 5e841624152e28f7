//! # Player
//!
//! State of the locally controlled player and the systems that move it.
//!
//! ## Architecture
//!
//! * **Hitbox**: The box used for collision, and the points sampled on its surface
//! * **Collision**: Per-axis velocity resolution against the voxel world
//! * **Motion**: The fixed-tick controller turning intents into movement
//! * **View**: Look angles and the directions derived from them

pub mod collision;
pub mod hitbox;
pub mod motion;
pub mod view;

use cgmath::{Point3, Vector2, Vector3};

use crate::config::MovementConfig;
use crate::engine_state::voxels::block::BlockState;
use crate::engine_state::PlayerAction;

use hitbox::Hitbox;
use view::ViewOrientation;

/// Horizontal speed class of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedMode {
    /// Normal movement.
    #[default]
    Walk,
    /// Faster movement.
    Sprint,
    /// Slower movement.
    Sneak,
}

impl SpeedMode {
    /// Picks the speed mode for a tick's intents. Sneaking wins over sprinting.
    pub fn from_intents(action: &PlayerAction) -> Self {
        if action.sneak {
            SpeedMode::Sneak
        } else if action.sprint {
            SpeedMode::Sprint
        } else {
            SpeedMode::Walk
        }
    }

    /// Max horizontal speed of this mode.
    pub fn max_speed(self, config: &MovementConfig) -> f64 {
        match self {
            SpeedMode::Walk => config.walk_speed,
            SpeedMode::Sprint => config.sprint_speed,
            SpeedMode::Sneak => config.sneak_speed,
        }
    }
}

/// Full-screen tint applied while the camera is inside a block.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScreenEffect {
    /// No tint.
    #[default]
    Clear,
    /// Fog of the given visibility depth and RGBA color.
    Fog {
        /// Visibility distance in blocks.
        depth: f32,
        /// RGBA fog color.
        color: [f32; 4],
    },
}

impl ScreenEffect {
    /// The effect for a camera inside `block`. Absent voxels are clear.
    pub fn from_block(block: Option<BlockState>) -> Self {
        match block {
            Some(state) if state.fog_depth() > 0.0 => ScreenEffect::Fog {
                depth: state.fog_depth(),
                color: state.fog_color(),
            },
            _ => ScreenEffect::Clear,
        }
    }
}

/// The locally controlled player.
#[derive(Debug, Clone)]
pub struct Player {
    /// Feet position in world space.
    pub position: Point3<f64>,
    /// Per-tick displacement. Horizontal components are rebuilt from the
    /// inertia buffer each tick.
    pub velocity: Vector3<f32>,
    /// Horizontal momentum carried between ticks.
    pub inertia: Vector2<f64>,
    /// Current speed class.
    pub speed_mode: SpeedMode,
    /// Collision box.
    pub hitbox: Hitbox,
    /// Cleared by the collision resolver when a fall is stopped.
    pub airborne: bool,
    /// Look angles.
    pub view: ViewOrientation,
    /// Camera position relative to `position`.
    pub eye_offset: Vector3<f32>,
}

impl Player {
    /// Spawns a player at `position`, standing still and airborne.
    pub fn new(position: Point3<f64>, config: &MovementConfig) -> Self {
        Self {
            position,
            velocity: Vector3::new(0.0, 0.0, 0.0),
            inertia: Vector2::new(0.0, 0.0),
            speed_mode: SpeedMode::Walk,
            hitbox: Hitbox::from_arrays(config.hitbox_offset, config.hitbox_size),
            airborne: true,
            view: ViewOrientation::default(),
            eye_offset: config.eye_offset.into(),
        }
    }

    /// Camera position in world space.
    pub fn eye_position(&self) -> Point3<f64> {
        Point3::new(
            self.position.x + self.eye_offset.x as f64,
            self.position.y + self.eye_offset.y as f64,
            self.position.z + self.eye_offset.z as f64,
        )
    }

    /// The voxel containing the camera.
    pub fn eye_voxel(&self) -> Point3<i32> {
        let eye = self.eye_position();
        Point3::new(
            eye.x.floor() as i32,
            eye.y.floor() as i32,
            eye.z.floor() as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    #[test]
    fn sneak_wins_over_sprint() {
        let action = PlayerAction {
            sprint: true,
            sneak: true,
            ..Default::default()
        };
        assert_eq!(SpeedMode::from_intents(&action), SpeedMode::Sneak);
        let config = MovementConfig::default();
        assert_eq!(SpeedMode::Sneak.max_speed(&config), 0.01);
    }

    #[test]
    fn eye_sits_above_the_feet() {
        let player = Player::new(Point3::new(1.5, -2.5, 0.0), &MovementConfig::default());
        let eye = player.eye_position();
        assert!((eye.z - 1.625).abs() < 1e-9);
        assert_eq!(player.eye_voxel(), Point3::new(1, -3, 1));
    }

    #[test]
    fn water_tints_the_screen() {
        let effect = ScreenEffect::from_block(Some(BlockState::of(BlockType::WATER)));
        assert!(matches!(effect, ScreenEffect::Fog { depth, .. } if depth == 20.0));
        assert_eq!(
            ScreenEffect::from_block(Some(BlockState::of(BlockType::AIR))),
            ScreenEffect::Clear
        );
        assert_eq!(ScreenEffect::from_block(None), ScreenEffect::Clear);
    }
}
