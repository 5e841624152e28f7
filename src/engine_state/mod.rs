//! # Engine State Module
//!
//! The simulation core: the player, the world it moves through, and the
//! block it is looking at.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container, advanced one fixed tick at a time
//! * `camera_state` - The first-person camera and its projection
//! * `player` - Player state, motion controller and collision resolution
//! * `targeting` - Selection of the block under the crosshair, and break/place requests
//! * `voxels` - Handles voxel data, chunks, and world generation
//!
//! ## Tick Order
//!
//! 1. Mouse look from the tick's intents
//! 2. Player input and physics
//! 3. Chunk generation around the player's chunk, when it changed
//! 4. Camera sync to the player's eye
//! 5. Targeting update
//!
//! Nothing in a tick blocks or fails. World edits requested through
//! [`EngineState::break_block`] and [`EngineState::place_block`] return
//! their errors to the caller.

use camera_state::CameraState;
use cgmath::Point3;
use player::motion::MotionController;
use player::{Player, ScreenEffect};
use targeting::{BlockInteraction, DepthSample, SelectedBlock, TargetSelector, TargetingInput};
use voxels::block::block_type::BlockType;
use voxels::world::{World, WorldError};

use crate::config::GameConfig;

pub mod camera_state;
pub mod player;
pub mod targeting;
pub mod voxels;

/// Represents player intents for one tick
///
/// Movement flags are true while the key is held. The engine does not read
/// devices itself: a frontend fills this in each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerAction {
    /// Movement intents
    pub move_forward: bool,
    /// Move away from the view direction
    pub move_backward: bool,
    /// Strafe left
    pub move_left: bool,
    /// Strafe right
    pub move_right: bool,
    /// Jump if grounded
    pub jump: bool,
    /// Raise the speed cap
    pub sprint: bool,
    /// Lower the speed cap. Wins over sprint
    pub sneak: bool,

    /// View rotation in degrees, horizontal then vertical
    pub rotate_view: Option<(f32, f32)>,
}

/// The main state container for the player simulation
///
/// # Examples
///
/// ```
/// use voxel_player::config::GameConfig;
/// use voxel_player::engine_state::{EngineState, PlayerAction};
///
/// let mut engine_state = EngineState::new(GameConfig::default());
///
/// // Main loop, one call per fixed tick
/// for _ in 0..10 {
///     engine_state.tick(&PlayerAction::default(), None);
/// }
/// assert!(!engine_state.player.airborne);
/// ```
pub struct EngineState {
    /// Configuration the engine was built with
    pub config: GameConfig,
    /// The voxel world containing all chunk data
    pub world: World,
    /// The locally controlled player
    pub player: Player,
    /// Camera following the player's eye
    pub camera_state: CameraState,
    /// Moves the player each tick
    pub motion_controller: MotionController,
    /// Tracks the block under the crosshair
    pub target_selector: TargetSelector,
    /// Tint for the camera's current surroundings
    pub screen_effect: ScreenEffect,
    /// Ticks run so far
    tick_count: u64,
    /// Current chunk position of the player
    current_player_chunk_position: Point3<i32>,
}

impl EngineState {
    /// Creates the engine with a freshly generated world.
    ///
    /// Chunks within `render_distance` of the origin chunk are generated and
    /// the player is spawned on the surface of the origin column.
    pub fn new(config: GameConfig) -> Self {
        let mut world = World::new(config.terrain);
        world.generate_around(Point3::new(0, 0, 0), config.render_distance);

        let ground = world.surface_height(0, 0).map_or(0, |height| height + 1);
        let spawn = Point3::new(0.5, 0.5, ground as f64);

        Self::with_world(config, world, spawn)
    }

    /// Creates the engine around an existing world, with the player at `spawn`.
    pub fn with_world(config: GameConfig, world: World, spawn: Point3<f64>) -> Self {
        let player = Player::new(spawn, &config.movement);
        let motion_controller = MotionController::from_config(&config);
        let target_selector = TargetSelector::from_kind(config.targeting);

        let mut camera_state = CameraState::default();
        camera_state.sync_to_player(&player);

        log::info!("Player spawned at {:?}", spawn);

        Self {
            current_player_chunk_position: Self::chunk_of(&player),
            config,
            world,
            player,
            camera_state,
            motion_controller,
            target_selector,
            screen_effect: ScreenEffect::Clear,
            tick_count: 0,
        }
    }

    fn chunk_of(player: &Player) -> Point3<i32> {
        World::chunk_position_of(
            player.position.x.floor() as i32,
            player.position.y.floor() as i32,
            player.position.z.floor() as i32,
        )
    }

    /// Runs one simulation tick and returns the new selection.
    ///
    /// `depth` is the screen-center depth read back by the renderer, if any.
    /// Its viewport size is adopted by the projection before targeting.
    pub fn tick(
        &mut self,
        action: &PlayerAction,
        depth: Option<DepthSample>,
    ) -> Option<SelectedBlock> {
        if let Some((horizontal, vertical)) = action.rotate_view {
            self.turn(horizontal, vertical);
        }

        self.screen_effect = self
            .motion_controller
            .tick(&mut self.player, action, &self.world);

        let new_chunk_position = Self::chunk_of(&self.player);
        if self.current_player_chunk_position != new_chunk_position {
            log::debug!(
                "Player moved from chunk {:?} to {:?}",
                self.current_player_chunk_position,
                new_chunk_position
            );
            self.world
                .generate_around(new_chunk_position, self.config.render_distance);
            self.current_player_chunk_position = new_chunk_position;
        }

        self.camera_state.sync_to_player(&self.player);
        if let Some(sample) = depth {
            if sample.viewport != self.camera_state.projection.viewport() {
                self.resize(sample.viewport.0, sample.viewport.1);
            }
        }

        let input = self.targeting_input(depth);
        let selected = self.target_selector.update(&input, &self.world);

        self.tick_count += 1;
        selected
    }

    /// Turns the view by the given angles in degrees.
    pub fn turn(&mut self, horizontal: f32, vertical: f32) {
        self.player.view.turn_horizontal(horizontal);
        self.player.view.turn_vertical(vertical);
        self.camera_state.sync_to_player(&self.player);
    }

    /// Resizes the viewport used for the projection.
    pub fn resize(&mut self, width: u32, height: u32) {
        log::debug!("Resizing viewport to {}x{}", width, height);
        self.camera_state.projection.resize(width, height);
    }

    /// Everything the targeting methods need from the current camera.
    pub fn targeting_input(&self, depth: Option<DepthSample>) -> TargetingInput {
        TargetingInput {
            camera_position: self.camera_state.camera.position,
            look: self.camera_state.camera.look_direction(),
            view: self.camera_state.view_matrix(),
            projection: self.camera_state.projection_matrix(),
            depth,
        }
    }

    /// Breaks the selected block.
    ///
    /// Returns the applied request, or `None` when nothing is selected.
    pub fn break_block(&mut self) -> Result<Option<BlockInteraction>, WorldError> {
        let request = self.target_selector.break_request();
        self.dispatch(request)
    }

    /// Places `block_type` against the selected face.
    ///
    /// Returns the applied request, or `None` when nothing is selected or the
    /// selected face is unknown.
    pub fn place_block(
        &mut self,
        block_type: BlockType,
    ) -> Result<Option<BlockInteraction>, WorldError> {
        let request = self.target_selector.place_request(block_type);
        self.dispatch(request)
    }

    fn dispatch(
        &mut self,
        request: Option<BlockInteraction>,
    ) -> Result<Option<BlockInteraction>, WorldError> {
        let Some(request) = request else {
            log::debug!("No block selected, ignoring interaction");
            return Ok(None);
        };

        request.apply(&mut self.world).map_err(|error| {
            log::warn!("{:?} failed: {}", request, error);
            error
        })?;
        Ok(Some(request))
    }

    /// Ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerrainKind;
    use crate::engine_state::voxels::world::WorldQuery;

    fn flat_engine() -> EngineState {
        EngineState::new(GameConfig {
            terrain: TerrainKind::Flat,
            render_distance: 1,
            ..Default::default()
        })
    }

    #[test]
    fn spawns_on_the_surface() {
        let engine = flat_engine();
        assert_eq!(engine.player.position, Point3::new(0.5, 0.5, 0.0));
        assert_eq!(engine.tick_count(), 0);
    }

    #[test]
    fn looking_down_selects_the_ground_under_the_player() {
        let mut engine = flat_engine();
        engine.turn(0.0, -90.0);
        let selected = engine.tick(&PlayerAction::default(), None).unwrap();

        assert_eq!(selected.position, Point3::new(0, 0, -1));
        assert_eq!(selected.face, Some(voxels::block::block_face::BlockFace::TOP));
    }

    #[test]
    fn break_then_place_restores_a_block() {
        let mut engine = flat_engine();
        engine.turn(0.0, -90.0);
        engine.tick(&PlayerAction::default(), None);

        let broken = engine.break_block().unwrap();
        assert_eq!(
            broken,
            Some(BlockInteraction::Break {
                position: Point3::new(0, 0, -1)
            })
        );
        assert!(engine.world.block_at(0, 0, -1).unwrap().is_air());

        // The player drops into the hole, then looks at its floor.
        for _ in 0..120 {
            engine.tick(&PlayerAction::default(), None);
        }
        assert!(engine.player.position.z < 0.0);

        let placed = engine.place_block(BlockType::WOOD).unwrap().unwrap();
        assert_eq!(
            engine.world.block_at(placed.position().x, placed.position().y, placed.position().z)
                .unwrap()
                .block_type,
            BlockType::WOOD
        );
    }

    #[test]
    fn depth_sample_viewport_resizes_the_projection() {
        let mut engine = flat_engine();
        engine.turn(0.0, -90.0);
        engine.tick(
            &PlayerAction::default(),
            Some(DepthSample {
                depth: 1.0,
                viewport: (640, 480),
            }),
        );
        assert_eq!(engine.camera_state.projection.viewport(), (640, 480));

        // A minimized window reports zero; the last size stays.
        engine.tick(
            &PlayerAction::default(),
            Some(DepthSample {
                depth: 1.0,
                viewport: (0, 0),
            }),
        );
        assert_eq!(engine.camera_state.projection.viewport(), (640, 480));
    }

    #[test]
    fn rotate_view_turns_before_moving() {
        let mut engine = flat_engine();
        let action = PlayerAction {
            move_forward: true,
            rotate_view: Some((90.0, 0.0)),
            ..Default::default()
        };
        engine.tick(&action, None);

        assert!((engine.player.view.horizontal() - 90.0).abs() < 1e-4);
        assert!(engine.player.position.y > 0.5);
        assert!((engine.player.position.x - 0.5).abs() < 1e-6);
    }
}
