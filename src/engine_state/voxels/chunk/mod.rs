//! # Chunk Module
//!
//! This module provides the `Chunk` struct and related functionality for managing
//! 16x16x16 blocks of voxel data. It includes chunk generation algorithms and
//! utilities for working with chunk data.
//!
//! ## Storage
//!
//! - `solid_array`: A bit vector (1 bit per block) indicating which blocks are non-air
//! - `blocks`: Dense block storage, indexed the same way as `solid_array`
//!
//! Both are indexed by `x + 16 * y + 256 * z` with chunk-local coordinates.
//! World queries test the bit first and only read `blocks` for non-air cells.

use bitvec::prelude::BitVec;
use cgmath::Point3;
use chunk_creation::ChunkCreationIterator;
use noise::NoiseFn;
use noise::Perlin;

use super::block::block_type::BlockType;
use super::block::Block;

pub mod chunk_creation;

/// The dimension (width, depth, height) of a chunk in blocks.
pub const CHUNK_DIMENSION: i32 = 16;
/// The number of blocks in a single horizontal plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: i32 = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of blocks in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_SIZE: i32 = CHUNK_PLANE_SIZE * CHUNK_DIMENSION;

/// Blocks strictly below this height are ground in flat terrain.
pub const FLAT_GROUND_LEVEL: i32 = 0;
/// Empty cells at or below this height are flooded in Perlin terrain.
pub const WATER_LEVEL: i32 = -3;
/// Depth of the dirt layer between the surface and stone.
const DIRT_DEPTH: i32 = 3;

/// Scaling factor applied to world coordinates when sampling Perlin noise.
pub const PERLIN_SCALE_FACTOR: f64 = 0.02;
/// Height amplitude of Perlin terrain, in blocks.
pub const PERLIN_AMPLITUDE: f64 = 8.0;
/// Seed shared by every Perlin chunk so neighbouring chunks line up.
const PERLIN_SEED: u32 = 0;

/// Represents a 16x16x16 collection of voxel blocks in the world.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: Point3<i32>,

    /// A bit vector where each bit represents whether the corresponding block is non-air.
    pub solid_array: BitVec,

    /// The block data for this chunk, one entry per voxel.
    pub blocks: Vec<Block>,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all blocks are air).
    pub fn empty(position: &Point3<i32>) -> Self {
        let mut cci = ChunkCreationIterator::new(*position);

        for _ in 0..CHUNK_SIZE {
            cci.push_block_type(BlockType::AIR);
        }

        cci.return_chunk()
    }

    /// Generates a chunk of flat terrain whose surface is at `FLAT_GROUND_LEVEL`.
    ///
    /// The top layer is grass, followed by dirt and then stone.
    pub fn flat(position: &Point3<i32>) -> Self {
        let mut cci = ChunkCreationIterator::new(*position);

        while !cci.is_complete() {
            let bposition = cci.next_world_position();
            cci.push_block_type(Self::layered_block(bposition.z, FLAT_GROUND_LEVEL - 1));
        }

        cci.return_chunk()
    }

    /// Generates a chunk using 2D Perlin noise as a height map.
    ///
    /// Columns are layered like flat terrain. Air below `WATER_LEVEL` is
    /// replaced by water, and some surface cells get a flower.
    pub fn perlin(position: &Point3<i32>) -> Self {
        let perlin = Perlin::new(PERLIN_SEED);
        let mut cci = ChunkCreationIterator::new(*position);

        while !cci.is_complete() {
            let bposition = cci.next_world_position();
            let perlin_sample =
                perlin.get(Self::to_perlin_pos(bposition, PERLIN_SCALE_FACTOR));
            let surface = (perlin_sample * PERLIN_AMPLITUDE).floor() as i32;

            let block_type = match Self::layered_block(bposition.z, surface) {
                BlockType::AIR if bposition.z <= WATER_LEVEL => BlockType::WATER,
                BlockType::AIR if bposition.z == surface + 1 && fastrand::u8(0..32) == 0 => {
                    BlockType::FLOWER
                }
                block_type => block_type,
            };
            cci.push_block_type(block_type);
        }

        cci.return_chunk()
    }

    /// Picks the block of a terrain column whose topmost ground block is at `surface`.
    fn layered_block(z: i32, surface: i32) -> BlockType {
        if z > surface {
            BlockType::AIR
        } else if z == surface {
            BlockType::GRASS
        } else if z > surface - DIRT_DEPTH {
            BlockType::DIRT
        } else {
            BlockType::STONE
        }
    }

    /// Converts world block coordinates to a horizontal Perlin sample position.
    fn to_perlin_pos(pos: Point3<i32>, scale_factor: f64) -> [f64; 2] {
        [pos.x as f64 * scale_factor, pos.y as f64 * scale_factor]
    }

    /// Storage index of chunk-relative coordinates, or `None` when out of bounds.
    fn index_of(cx: usize, cy: usize, cz: usize) -> Option<usize> {
        let dimension = CHUNK_DIMENSION as usize;
        if cx >= dimension || cy >= dimension || cz >= dimension {
            return None;
        }
        Some(cx + dimension * cy + dimension * dimension * cz)
    }

    /// Gets the block at the specified chunk-relative coordinates.
    ///
    /// Out-of-bounds coordinates return air.
    pub fn get_block_at(&self, cx: usize, cy: usize, cz: usize) -> Block {
        Self::index_of(cx, cy, cz)
            .and_then(|index| self.blocks.get(index).copied())
            .unwrap_or(Block::AIR)
    }

    /// Replaces the block at the specified chunk-relative coordinates.
    ///
    /// Keeps `solid_array` consistent with the new block. Out-of-bounds
    /// coordinates are ignored.
    pub fn set_block_at(&mut self, cx: usize, cy: usize, cz: usize, block: Block) {
        if let Some(index) = Self::index_of(cx, cy, cz) {
            self.blocks[index] = block;
            self.solid_array.set(index, !block.is_air());
        }
    }

    /// Checks if the block at the specified chunk-relative coordinates is non-air.
    ///
    /// Out-of-bounds coordinates are reported as air.
    pub fn is_block_solid(&self, cx: usize, cy: usize, cz: usize) -> bool {
        Self::index_of(cx, cy, cz)
            .map(|index| self.solid_array[index])
            .unwrap_or(false)
    }

    /// Number of non-air blocks in the chunk.
    pub fn solid_count(&self) -> usize {
        self.solid_array.count_ones()
    }
}
