//! # Game Configuration
//!
//! Runtime switches and movement tuning, loaded from a JSON file.
//!
//! Every field has a default, so a config file only needs to name the values
//! it overrides:
//!
//! ```json
//! { "fly_mode_enabled": true, "movement": { "jump_speed": 0.08 } }
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that was being read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid config JSON.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path that was being parsed
        path: String,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },
}

/// Which method the target selector uses to find the block under the crosshair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetingKind {
    /// Unproject the depth buffer sample at the screen center. Falls back to
    /// ray marching on frames without a depth sample.
    DepthBuffer,
    /// March along the view direction in fixed steps.
    #[default]
    RayMarch,
}

/// How the collision resolver treats voxels whose chunk is not loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnloadedChunkPolicy {
    /// Unloaded voxels are impassable.
    #[default]
    Block,
    /// Unloaded voxels are passable.
    Pass,
}

/// Terrain generated for newly added chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainKind {
    /// Flat ground with its surface at z = 0
    #[default]
    Flat,
    /// Rolling Perlin noise hills with water in the valleys
    Perlin,
    /// Nothing but air
    Empty,
}

/// Movement tuning for the player motion controller.
///
/// Speeds are in blocks per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Added to the inertia buffer per pressed direction per tick.
    pub acceleration: f64,
    /// Max horizontal speed while walking.
    pub walk_speed: f64,
    /// Max horizontal speed while sprinting.
    pub sprint_speed: f64,
    /// Max horizontal speed while sneaking. Wins over sprinting.
    pub sneak_speed: f64,
    /// The inertia buffer is divided by this on ticks without directional input.
    pub ground_drag: f64,
    /// Horizontal velocity multiplier while moving vertically outside fly mode.
    pub airborne_damping: f32,
    /// Initial vertical speed of a jump. Also the maximum fall speed.
    pub jump_speed: f32,
    /// Multiplied with the world gravity to get the per-tick vertical deceleration.
    pub gravity_scale: f32,
    /// Divisor of the overshoot correction applied when the inertia buffer
    /// exceeds the max speed. Empirical; tune with care.
    pub speed_smoothing_divisor: f64,
    /// Hitbox corner relative to the player position.
    pub hitbox_offset: [f64; 3],
    /// Hitbox extents.
    pub hitbox_size: [f64; 3],
    /// Camera position relative to the player position.
    pub eye_offset: [f32; 3],
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            acceleration: 0.001,
            walk_speed: 0.03,
            sprint_speed: 0.05,
            sneak_speed: 0.01,
            ground_drag: 1.05,
            airborne_damping: 0.75,
            jump_speed: 0.05,
            gravity_scale: 0.001,
            speed_smoothing_divisor: 20.0,
            hitbox_offset: [-0.3, -0.3, 0.0],
            hitbox_size: [0.6, 0.6, 1.74],
            eye_offset: [0.0, 0.0, 1.625],
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Disables gravity. Collisions still apply.
    pub fly_mode_enabled: bool,
    /// Disables every collision check, including the unloaded chunk lock.
    pub no_clip_enabled: bool,
    /// Targeting method used by the target selector.
    pub targeting: TargetingKind,
    /// Treatment of unloaded voxels during collision resolution.
    pub unloaded_chunk_policy: UnloadedChunkPolicy,
    /// Terrain generated for new chunks.
    pub terrain: TerrainKind,
    /// Radius, in chunks, of the area generated around the spawn.
    pub render_distance: i32,
    /// Movement tuning.
    pub movement: MovementConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fly_mode_enabled: false,
            no_clip_enabled: false,
            targeting: TargetingKind::default(),
            unloaded_chunk_policy: UnloadedChunkPolicy::default(),
            terrain: TerrainKind::default(),
            render_distance: 2,
            movement: MovementConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parses a config from a JSON string.
    pub fn from_json(source: &str, origin: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(source).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    /// Reads and parses the config file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let config = Self::from_json(&source, &display)?;
        log::info!("Loaded config from {}", display);
        Ok(config)
    }

    /// Like [`GameConfig::load`], but logs the error and returns the defaults on failure.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_else(|error| {
            log::warn!("{}; using default config", error);
            Self::default()
        })
    }
}
