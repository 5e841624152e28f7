//! # World Module
//!
//! This module provides the [`WorldQuery`] interface consumed by the player
//! physics and block targeting, and the `World` struct which implements it
//! over a sparse collection of chunks.
//!
//! ## Architecture
//!
//! The world uses a sparse storage approach where only chunks that have been
//! generated are kept in memory. A voxel whose chunk is missing is reported
//! as absent, which callers treat as "not loaded yet" rather than as air.

use crate::config::TerrainKind;
use crate::core::MtResource;
use crate::engine_state::voxels::block::{block_type::BlockType, Block, BlockState};
use crate::engine_state::voxels::chunk::{Chunk, CHUNK_DIMENSION};
use cgmath::Point3;
use std::collections::HashMap;
use thiserror::Error;

/// Default gravity of a world, in units of the movement config's gravity scale.
pub const DEFAULT_GRAVITY: f32 = 1.0;

/// Errors raised by world mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// The target voxel's chunk is not resident.
    #[error("chunk containing block {x}, {y}, {z} is not loaded")]
    ChunkNotLoaded {
        /// Block x coordinate
        x: i32,
        /// Block y coordinate
        y: i32,
        /// Block z coordinate
        z: i32,
    },
}

/// Read and write access to voxel data, as seen by the player simulation.
///
/// Lookups never block. A voxel in a chunk that is not resident yet is
/// reported as `None`, distinct from a loaded air block.
pub trait WorldQuery {
    /// The block at the given block coordinates, or `None` if its chunk is not loaded.
    fn block_at(&self, x: i32, y: i32, z: i32) -> Option<BlockState>;

    /// Whether the chunk containing the given block coordinates is loaded.
    fn chunk_ready(&self, x: i32, y: i32, z: i32) -> bool;

    /// Gravity constant of the world.
    fn gravity(&self) -> f32;

    /// Replaces the block at the given block coordinates.
    fn set_block(&mut self, x: i32, y: i32, z: i32, block_type: BlockType)
        -> Result<(), WorldError>;
}

/// Represents a voxel world composed of multiple chunks.
///
/// The world is stored as a sparse 3D grid of chunks, where each chunk is a 16x16x16
/// collection of blocks. The world is Z-up.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_player::config::TerrainKind;
/// use voxel_player::engine_state::voxels::world::{World, WorldQuery};
///
/// let mut world = World::new(TerrainKind::Flat);
/// world.add_chunk_at(Point3::new(0, 0, -1));
///
/// assert!(world.chunk_ready(3, 3, -1));
/// assert!(world.block_at(3, 3, -1).unwrap().is_collidable());
/// assert!(world.block_at(3, 3, 20).is_none());
/// ```
pub struct World {
    /// A mapping from chunk coordinates to chunk data.
    /// Chunks are generated synchronously on the simulation thread. Each one
    /// sits behind an `MtResource` handle, so it can be read from another
    /// thread without copying the voxel data.
    pub chunks: HashMap<Point3<i32>, MtResource<Chunk>>,
    /// Generator used by `add_chunk_at`.
    terrain: TerrainKind,
    /// Gravity constant reported to the player simulation.
    gravity: f32,
}

impl World {
    /// Creates a new world with no chunks loaded.
    pub fn new(terrain: TerrainKind) -> Self {
        World {
            chunks: HashMap::new(),
            terrain,
            gravity: DEFAULT_GRAVITY,
        }
    }

    /// Overrides the gravity constant.
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// The chunk coordinates containing the given block coordinates.
    pub fn chunk_position_of(x: i32, y: i32, z: i32) -> Point3<i32> {
        Point3::new(
            x.div_euclid(CHUNK_DIMENSION),
            y.div_euclid(CHUNK_DIMENSION),
            z.div_euclid(CHUNK_DIMENSION),
        )
    }

    /// Block coordinates relative to their chunk.
    fn local_position_of(x: i32, y: i32, z: i32) -> (usize, usize, usize) {
        (
            x.rem_euclid(CHUNK_DIMENSION) as usize,
            y.rem_euclid(CHUNK_DIMENSION) as usize,
            z.rem_euclid(CHUNK_DIMENSION) as usize,
        )
    }

    /// Adds a new chunk at the specified chunk coordinates if one doesn't already exist.
    ///
    /// The chunk is generated using the world's terrain generator.
    pub fn add_chunk_at(&mut self, position: Point3<i32>) {
        if self.chunks.contains_key(&position) {
            return;
        }

        let chunk = match self.terrain {
            TerrainKind::Flat => Chunk::flat(&position),
            TerrainKind::Perlin => Chunk::perlin(&position),
            TerrainKind::Empty => Chunk::empty(&position),
        };

        log::trace!(
            "Generated {:?} chunk at {:?} with {} solid blocks",
            self.terrain,
            position,
            chunk.solid_count()
        );
        self.insert_chunk(chunk);
    }

    /// Publishes an already built chunk, replacing any chunk at its position.
    pub fn insert_chunk(&mut self, chunk: Chunk) {
        self.chunks.insert(chunk.position, MtResource::new(chunk));
    }

    /// Generates every chunk within `radius` chunks of `center` on each axis.
    pub fn generate_around(&mut self, center: Point3<i32>, radius: i32) {
        for x in -radius..=radius {
            for y in -radius..=radius {
                for z in -radius..=radius {
                    self.add_chunk_at(Point3::new(center.x + x, center.y + y, center.z + z));
                }
            }
        }
        log::info!(
            "World has {} chunks after generating around {:?}",
            self.chunks.len(),
            center
        );
    }

    /// The highest non-air, collidable block in the loaded part of a column.
    pub fn surface_height(&self, x: i32, y: i32) -> Option<i32> {
        let column = Self::chunk_position_of(x, y, 0);
        let top_chunk = self
            .chunks
            .keys()
            .filter(|position| position.x == column.x && position.y == column.y)
            .map(|position| position.z)
            .max()?;

        let top = (top_chunk + 1) * CHUNK_DIMENSION - 1;
        (top - CHUNK_DIMENSION * 64..=top)
            .rev()
            .find(|&z| matches!(self.block_at(x, y, z), Some(state) if state.is_collidable()))
    }
}

impl WorldQuery for World {
    fn block_at(&self, x: i32, y: i32, z: i32) -> Option<BlockState> {
        let chunk = self.chunks.get(&Self::chunk_position_of(x, y, z))?;
        let (cx, cy, cz) = Self::local_position_of(x, y, z);
        let chunk = chunk.get();
        if !chunk.is_block_solid(cx, cy, cz) {
            return Some(BlockState::of(BlockType::AIR));
        }
        chunk.get_block_at(cx, cy, cz).state()
    }

    fn chunk_ready(&self, x: i32, y: i32, z: i32) -> bool {
        self.chunks.contains_key(&Self::chunk_position_of(x, y, z))
    }

    fn gravity(&self) -> f32 {
        self.gravity
    }

    fn set_block(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        block_type: BlockType,
    ) -> Result<(), WorldError> {
        let chunk = self
            .chunks
            .get(&Self::chunk_position_of(x, y, z))
            .ok_or(WorldError::ChunkNotLoaded { x, y, z })?;
        let (cx, cy, cz) = Self::local_position_of(x, y, z);
        chunk.get_mut().set_block_at(cx, cy, cz, Block::new(block_type));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_positions_floor_towards_negative_infinity() {
        assert_eq!(World::chunk_position_of(0, 15, 16), Point3::new(0, 0, 1));
        assert_eq!(World::chunk_position_of(-1, -16, -17), Point3::new(-1, -1, -2));
    }

    #[test]
    fn missing_chunks_are_absent_not_air() {
        let mut world = World::new(TerrainKind::Empty);
        assert!(world.block_at(0, 0, 0).is_none());
        assert!(!world.chunk_ready(0, 0, 0));

        world.add_chunk_at(Point3::new(0, 0, 0));
        assert!(world.chunk_ready(15, 15, 15));
        assert!(world.block_at(0, 0, 0).unwrap().is_air());
        assert!(world.block_at(16, 0, 0).is_none());
    }

    #[test]
    fn set_block_in_negative_chunk() {
        let mut world = World::new(TerrainKind::Empty);
        world.add_chunk_at(Point3::new(-1, -1, -1));

        world.set_block(-1, -5, -16, BlockType::WOOD).unwrap();
        assert_eq!(world.block_at(-1, -5, -16).unwrap().block_type, BlockType::WOOD);
        assert!(world.block_at(-2, -5, -16).unwrap().is_air());
    }

    #[test]
    fn cleared_blocks_read_as_air() {
        let mut world = World::new(TerrainKind::Flat);
        world.add_chunk_at(Point3::new(0, 0, -1));
        assert_eq!(world.block_at(2, 2, -1).unwrap().block_type, BlockType::GRASS);

        world.set_block(2, 2, -1, BlockType::AIR).unwrap();
        let cleared = world.block_at(2, 2, -1).unwrap();
        assert!(cleared.is_air());
        assert!(!cleared.is_collidable());
        assert!(!world.chunks[&Point3::new(0, 0, -1)].get().is_block_solid(2, 2, 15));
    }

    #[test]
    fn set_block_in_unloaded_chunk_fails() {
        let mut world = World::new(TerrainKind::Empty);
        assert_eq!(
            world.set_block(40, 0, 0, BlockType::DIRT),
            Err(WorldError::ChunkNotLoaded { x: 40, y: 0, z: 0 })
        );
    }

    #[test]
    fn surface_height_of_flat_terrain() {
        let mut world = World::new(TerrainKind::Flat);
        world.generate_around(Point3::new(0, 0, 0), 1);
        assert_eq!(world.surface_height(5, -7), Some(-1));
        assert_eq!(world.surface_height(500, 0), None);
    }

    #[test]
    fn generate_around_is_idempotent() {
        let mut world = World::new(TerrainKind::Flat);
        world.generate_around(Point3::new(0, 0, 0), 1);
        world.generate_around(Point3::new(0, 0, 0), 1);
        assert_eq!(world.chunks.len(), 27);
    }

    #[test]
    fn gravity_can_be_overridden() {
        let world = World::new(TerrainKind::Empty).with_gravity(2.5);
        assert_eq!(world.gravity(), 2.5);
    }
}
