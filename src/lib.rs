#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Player
//!
//! Player movement, collision and block targeting for a chunked voxel world.
//!
//! The crate advances a first-person player one fixed tick at a time: input
//! intents build up horizontal inertia, gravity and jumps act along Z, and the
//! hitbox is swept against the voxel grid one axis at a time. After moving, the
//! block under the crosshair is found either from a depth buffer sample or by
//! marching a ray through the world.
//!
//! ## Key Modules
//!
//! * `config` - JSON configuration of modes and movement tuning
//! * `core` - Shared resource handles used throughout the engine
//! * `engine_state` - The player, the world, the camera and block targeting
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     voxel_player::run();
//! }
//! ```
//!
//! Embedding the simulation in another loop:
//!
//! ```
//! use voxel_player::config::GameConfig;
//! use voxel_player::engine_state::{EngineState, PlayerAction};
//!
//! let mut engine_state = EngineState::new(GameConfig::default());
//! let walk = PlayerAction { move_forward: true, ..Default::default() };
//! for _ in 0..60 {
//!     engine_state.tick(&walk, None);
//! }
//! assert!(engine_state.player.position.x > 0.5);
//! ```

use engine_state::{EngineState, PlayerAction};
use log::info;
use web_time::{Duration, Instant};

use config::GameConfig;
use engine_state::voxels::block::block_type::BlockType;

pub mod config;
pub mod core;
pub mod engine_state;

/// Name of the stopwatch measuring world generation and spawn.
pub const APPLICATION_INITIALIZATION_STOPWATCH: &str = "Application Initialization";

/// Simulation ticks per second.
pub const TICK_RATE: u32 = 60;

/// Length of the scripted session run by [`run`].
pub const DEMO_TICKS: u64 = 600;

/// Runs a scripted headless session and logs what the player does.
///
/// The first command line argument, if any, is the path of a JSON config file.
/// Logging is controlled with `RUST_LOG`.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load_or_default(path),
        None => {
            info!("No config file given, using defaults");
            GameConfig::default()
        }
    };

    let stopwatch = Instant::now();
    let mut engine_state = EngineState::new(config);
    info!(
        "{} took {:?}",
        APPLICATION_INITIALIZATION_STOPWATCH,
        stopwatch.elapsed()
    );

    let tick_duration = Duration::from_secs(1) / TICK_RATE;
    let session = Instant::now();

    for tick in 0..DEMO_TICKS {
        let tick_start = Instant::now();

        let selected = engine_state.tick(&scripted_action(tick), None);

        match tick {
            300 => match engine_state.break_block() {
                Ok(Some(request)) => info!("Broke block at {:?}", request.position()),
                Ok(None) => info!("Nothing to break"),
                Err(error) => log::warn!("Could not break block: {}", error),
            },
            400 => match engine_state.place_block(BlockType::WOOD) {
                Ok(Some(request)) => info!("Placed wood at {:?}", request.position()),
                Ok(None) => info!("Nowhere to place"),
                Err(error) => log::warn!("Could not place block: {}", error),
            },
            _ => {}
        }

        if tick % TICK_RATE as u64 == 0 {
            let player = &engine_state.player;
            info!(
                "Tick {}: position ({:.2}, {:.2}, {:.2}), airborne {}, target {:?}, effect {:?}",
                tick,
                player.position.x,
                player.position.y,
                player.position.z,
                player.airborne,
                selected,
                engine_state.screen_effect
            );
        }

        let elapsed = tick_start.elapsed();
        if elapsed < tick_duration {
            std::thread::sleep(tick_duration - elapsed);
        }
    }

    info!(
        "Ran {} ticks in {:?}",
        engine_state.tick_count(),
        session.elapsed()
    );
}

/// Intents for one tick of the scripted session.
fn scripted_action(tick: u64) -> PlayerAction {
    match tick {
        0..=119 => PlayerAction {
            move_forward: true,
            ..Default::default()
        },
        120..=179 => PlayerAction {
            move_forward: true,
            sprint: true,
            jump: tick == 150,
            ..Default::default()
        },
        180..=239 => PlayerAction {
            move_left: true,
            rotate_view: Some((1.5, 0.0)),
            ..Default::default()
        },
        240..=299 => PlayerAction {
            rotate_view: Some((0.0, -1.0)),
            ..Default::default()
        },
        300..=399 => PlayerAction {
            move_backward: true,
            sneak: true,
            ..Default::default()
        },
        _ => PlayerAction::default(),
    }
}
