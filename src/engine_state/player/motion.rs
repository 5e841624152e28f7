//! Player motion controller.
//!
//! Runs once per fixed tick. Input first updates the horizontal inertia
//! buffer, then [`MotionController::update_position`] applies gravity,
//! resolves collisions and commits the new position.

use cgmath::{Deg, InnerSpace, Rad, Vector2, Vector3};

use crate::config::{GameConfig, MovementConfig, UnloadedChunkPolicy};
use crate::engine_state::voxels::world::WorldQuery;
use crate::engine_state::PlayerAction;

use super::collision::resolve_collisions;
use super::{Player, ScreenEffect, SpeedMode};

/// Direction offsets from the view's horizontal angle, in degrees.
const FORWARD: f64 = 0.0;
const BACKWARD: f64 = 180.0;
const LEFT: f64 = 90.0;
const RIGHT: f64 = -90.0;

/// Fixed-tick player movement.
///
/// # Example
///
/// ```ignore
/// let controller = MotionController::from_config(&config);
/// let mut player = Player::new(spawn, &config.movement);
///
/// // Each tick:
/// let effect = controller.tick(&mut player, &action, &world);
/// ```
#[derive(Debug, Clone)]
pub struct MotionController {
    /// Movement tuning.
    pub movement: MovementConfig,
    /// Disables gravity.
    pub fly_mode_enabled: bool,
    /// Disables collisions and the unloaded chunk lock.
    pub no_clip_enabled: bool,
    /// Treatment of unloaded voxels by the collision resolver.
    pub unloaded_chunk_policy: UnloadedChunkPolicy,
}

impl Default for MotionController {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl MotionController {
    /// Builds a controller from the movement tuning and mode flags of `config`.
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            movement: config.movement.clone(),
            fly_mode_enabled: config.fly_mode_enabled,
            no_clip_enabled: config.no_clip_enabled,
            unloaded_chunk_policy: config.unloaded_chunk_policy,
        }
    }

    /// Runs a full tick: input, then physics. Returns the screen effect at the eye.
    pub fn tick(
        &self,
        player: &mut Player,
        action: &PlayerAction,
        world: &dyn WorldQuery,
    ) -> ScreenEffect {
        self.process_inputs(player, action);
        self.update_position(player, world)
    }

    /// Applies a tick's intents to the jump state, speed mode and inertia
    /// buffer, then copies the inertia into the horizontal velocity.
    pub fn process_inputs(&self, player: &mut Player, action: &PlayerAction) {
        if action.jump && !player.airborne {
            player.velocity.z = self.movement.jump_speed;
            player.airborne = true;
        }

        let speed_mode = SpeedMode::from_intents(action);
        if speed_mode != player.speed_mode {
            log::debug!("Speed mode {:?} -> {:?}", player.speed_mode, speed_mode);
            player.speed_mode = speed_mode;
        }
        let max_speed = speed_mode.max_speed(&self.movement);

        let directions = [
            (action.move_forward, FORWARD),
            (action.move_backward, BACKWARD),
            (action.move_left, LEFT),
            (action.move_right, RIGHT),
        ];

        let mut pressed = false;
        for (held, offset) in directions {
            if held {
                self.accelerate(player, offset, max_speed);
                pressed = true;
            }
        }

        if !pressed {
            player.inertia /= self.movement.ground_drag;
        }

        player.velocity.x = player.inertia.x as f32;
        player.velocity.y = player.inertia.y as f32;
    }

    /// Pushes the inertia buffer toward `offset` degrees from the view
    /// direction, pulling it back when it overshoots `max_speed`.
    fn accelerate(&self, player: &mut Player, offset: f64, max_speed: f64) {
        let angle = Rad::from(Deg(player.view.horizontal() as f64 + offset));
        let (sin, cos) = angle.0.sin_cos();
        player.inertia += Vector2::new(cos, sin) * self.movement.acceleration;

        let magnitude = player.inertia.magnitude();
        if magnitude > max_speed {
            let correction = (max_speed + magnitude) / self.movement.speed_smoothing_divisor;
            player.inertia -= player.inertia.normalize() * correction;
        }
    }

    /// Applies gravity or the unloaded chunk lock, resolves collisions and
    /// commits the position. Returns the screen effect at the eye.
    pub fn update_position(&self, player: &mut Player, world: &dyn WorldQuery) -> ScreenEffect {
        let was_airborne = player.airborne;
        let (x, y, z) = (
            player.position.x.floor() as i32,
            player.position.y.floor() as i32,
            player.position.z.floor() as i32,
        );

        if world.chunk_ready(x, y, z) {
            if !self.fly_mode_enabled {
                player.velocity.z -= world.gravity() * self.movement.gravity_scale;
                player.airborne = true;
                player.velocity.z = player.velocity.z.max(-self.movement.jump_speed);
            }
        } else if !self.no_clip_enabled {
            log::debug!("Holding player at {:?} until its chunk loads", player.position);
            player.velocity = Vector3::new(0.0, 0.0, 0.0);
        }

        if !self.no_clip_enabled {
            let outcome = resolve_collisions(
                world,
                &player.hitbox,
                player.position,
                player.velocity,
                player.airborne,
                self.unloaded_chunk_policy,
            );
            player.velocity = outcome.velocity;
            if outcome.landed {
                player.airborne = false;
                if was_airborne {
                    log::trace!("Landed at {:?}", player.position);
                }
            }
        }

        if !self.fly_mode_enabled && player.velocity.z != 0.0 {
            player.velocity.x *= self.movement.airborne_damping;
            player.velocity.y *= self.movement.airborne_damping;
        }

        player.position.x += player.velocity.x as f64;
        player.position.y += player.velocity.y as f64;
        player.position.z += player.velocity.z as f64;

        player.velocity.x = 0.0;
        player.velocity.y = 0.0;
        if self.fly_mode_enabled {
            player.velocity.z = 0.0;
        }

        let eye = player.eye_voxel();
        ScreenEffect::from_block(world.block_at(eye.x, eye.y, eye.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerrainKind;
    use crate::engine_state::voxels::block::block_type::BlockType;
    use crate::engine_state::voxels::world::World;
    use cgmath::Point3;

    fn flat_world() -> World {
        let mut world = World::new(TerrainKind::Flat);
        world.generate_around(Point3::new(0, 0, 0), 1);
        world
    }

    fn player_at(x: f64, y: f64, z: f64) -> Player {
        Player::new(Point3::new(x, y, z), &MovementConfig::default())
    }

    fn forward() -> PlayerAction {
        PlayerAction {
            move_forward: true,
            ..Default::default()
        }
    }

    #[test]
    fn inertia_converges_below_the_cap() {
        let controller = MotionController::default();
        let mut player = player_at(0.0, 0.0, 0.0);

        for _ in 0..300 {
            controller.process_inputs(&mut player, &forward());
            assert!(player.inertia.magnitude() <= controller.movement.walk_speed + 1e-12);
        }
        assert!(player.inertia.magnitude() > controller.movement.walk_speed * 0.8);
        assert!(player.inertia.y.abs() < 1e-12);
        assert!(player.velocity.x > 0.0);
    }

    #[test]
    fn forward_follows_the_view_angle() {
        let controller = MotionController::default();
        let mut player = player_at(0.0, 0.0, 0.0);
        player.view.turn_horizontal(90.0);

        controller.process_inputs(&mut player, &forward());
        assert!(player.inertia.x.abs() < 1e-12);
        assert!((player.inertia.y - controller.movement.acceleration).abs() < 1e-12);
    }

    #[test]
    fn released_keys_decay_inertia() {
        let controller = MotionController::default();
        let mut player = player_at(0.0, 0.0, 0.0);
        player.inertia = Vector2::new(0.02, -0.01);

        for _ in 0..10 {
            controller.process_inputs(&mut player, &PlayerAction::default());
        }
        let factor = 1.05f64.powi(10);
        assert!((player.inertia.x - 0.02 / factor).abs() < 1e-12);
        assert!((player.inertia.y + 0.01 / factor).abs() < 1e-12);
    }

    #[test]
    fn sprint_and_sneak_caps_at_sneak_speed() {
        let controller = MotionController::default();
        let mut player = player_at(0.0, 0.0, 0.0);
        let action = PlayerAction {
            move_forward: true,
            sprint: true,
            sneak: true,
            ..Default::default()
        };

        for _ in 0..200 {
            controller.process_inputs(&mut player, &action);
        }
        assert_eq!(player.speed_mode, SpeedMode::Sneak);
        assert!(player.inertia.magnitude() <= 0.01 + 1e-12);
    }

    #[test]
    fn jump_only_from_the_ground() {
        let controller = MotionController::default();
        let mut player = player_at(0.0, 0.0, 0.0);
        player.airborne = false;
        let jump = PlayerAction {
            jump: true,
            ..Default::default()
        };

        controller.process_inputs(&mut player, &jump);
        assert_eq!(player.velocity.z, 0.05);
        assert!(player.airborne);

        player.velocity.z = 0.01;
        controller.process_inputs(&mut player, &jump);
        assert_eq!(player.velocity.z, 0.01);
    }

    #[test]
    fn standing_player_stays_grounded() {
        let controller = MotionController::default();
        let world = flat_world();
        let mut player = player_at(0.5, 0.5, 0.0);

        for _ in 0..20 {
            controller.tick(&mut player, &PlayerAction::default(), &world);
        }
        assert_eq!(player.position.z, 0.0);
        assert!(!player.airborne);
        assert_eq!(player.velocity.z, 0.0);
    }

    #[test]
    fn falling_player_lands_on_the_floor() {
        let controller = MotionController::default();
        let world = flat_world();
        let mut player = player_at(0.5, 0.5, 2.0);

        let mut min_velocity = 0.0f32;
        for _ in 0..300 {
            controller.tick(&mut player, &PlayerAction::default(), &world);
            min_velocity = min_velocity.min(player.velocity.z);
        }
        assert!(!player.airborne);
        assert!(player.position.z >= 0.0 && player.position.z < 0.05);
        assert!(min_velocity >= -0.05);
    }

    #[test]
    fn jump_and_land_again() {
        let controller = MotionController::default();
        let world = flat_world();
        let mut player = player_at(0.5, 0.5, 0.0);
        controller.tick(&mut player, &PlayerAction::default(), &world);
        assert!(!player.airborne);

        let jump = PlayerAction {
            jump: true,
            ..Default::default()
        };
        controller.tick(&mut player, &jump, &world);
        assert!(player.airborne);
        assert!(player.position.z > 0.0);

        for _ in 0..200 {
            controller.tick(&mut player, &PlayerAction::default(), &world);
        }
        assert!(!player.airborne);
        assert!(player.position.z < 0.05);
    }

    #[test]
    fn fly_mode_ignores_gravity() {
        let controller = MotionController {
            fly_mode_enabled: true,
            ..Default::default()
        };
        let world = flat_world();
        let mut player = player_at(0.5, 0.5, 5.0);
        player.airborne = false;

        for _ in 0..10 {
            controller.tick(&mut player, &PlayerAction::default(), &world);
        }
        assert_eq!(player.position.z, 5.0);

        let jump = PlayerAction {
            jump: true,
            ..Default::default()
        };
        controller.tick(&mut player, &jump, &world);
        let lifted = player.position.z;
        assert!((lifted - 5.05).abs() < 1e-6);
        assert_eq!(player.velocity.z, 0.0);

        controller.tick(&mut player, &PlayerAction::default(), &world);
        assert_eq!(player.position.z, lifted);
    }

    #[test]
    fn unloaded_chunk_holds_the_player() {
        let controller = MotionController::default();
        let world = World::new(TerrainKind::Flat);
        let mut player = player_at(0.5, 0.5, 3.0);
        player.velocity.z = -0.03;

        for _ in 0..10 {
            controller.tick(&mut player, &forward(), &world);
        }
        assert_eq!(player.position, Point3::new(0.5, 0.5, 3.0));
    }

    #[test]
    fn no_clip_moves_through_unloaded_chunks() {
        let controller = MotionController {
            no_clip_enabled: true,
            ..Default::default()
        };
        let world = World::new(TerrainKind::Flat);
        let mut player = player_at(0.5, 0.5, 3.0);

        for _ in 0..10 {
            controller.tick(&mut player, &forward(), &world);
        }
        assert!(player.position.x > 0.5);
        assert_eq!(player.position.z, 3.0);
    }

    #[test]
    fn no_clip_moves_through_walls() {
        let controller = MotionController {
            no_clip_enabled: true,
            fly_mode_enabled: true,
            ..Default::default()
        };
        let mut world = flat_world();
        for z in 0..3 {
            world.set_block(1, 0, z, BlockType::STONE).unwrap();
        }
        let mut player = player_at(0.5, 0.5, 0.0);

        for _ in 0..200 {
            controller.tick(&mut player, &forward(), &world);
        }
        assert!(player.position.x > 2.0);
    }

    #[test]
    fn vertical_motion_damps_horizontal_velocity() {
        let controller = MotionController::default();
        let world = flat_world();
        let mut player = player_at(0.5, 0.5, 5.0);
        player.inertia = Vector2::new(0.02, 0.0);

        controller.tick(&mut player, &PlayerAction::default(), &world);
        let expected = (0.02 / 1.05) as f32 * 0.75;
        assert!((player.position.x - 0.5 - expected as f64).abs() < 1e-6);
    }

    #[test]
    fn camera_in_water_reports_fog() {
        let controller = MotionController::default();
        let mut world = flat_world();
        world.set_block(0, 0, 1, BlockType::WATER).unwrap();
        let mut player = player_at(0.5, 0.5, 0.0);

        let effect = controller.tick(&mut player, &PlayerAction::default(), &world);
        assert!(matches!(effect, ScreenEffect::Fog { .. }));
    }
}
