//! # Chunk Creation Module
//!
//! This module provides a builder that fills a chunk block by block, keeping
//! the solidity bit vector and the block storage in step with each other.
//!
//! Blocks are pushed in storage order: X varies fastest, then Y, then Z.

use bitvec::vec::BitVec;
use cgmath::Point3;

use crate::engine_state::voxels::block::{block_type::BlockType, Block};

use super::{Chunk, CHUNK_DIMENSION, CHUNK_SIZE};

/// A builder for creating and populating chunks in storage order.
pub struct ChunkCreationIterator {
    /// The position of the chunk being created, in chunk coordinates
    position: Point3<i32>,
    /// One bit per block, set when the block is collidable or otherwise non-air
    solid_array: BitVec,
    /// Block storage, densely indexed
    blocks: Vec<Block>,
    /// Number of blocks pushed so far
    cursor: usize,
}

impl ChunkCreationIterator {
    /// Creates a new `ChunkCreationIterator` for building a chunk at the given position.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the chunk to create
    pub fn new(position: Point3<i32>) -> Self {
        ChunkCreationIterator {
            position,
            solid_array: BitVec::with_capacity(CHUNK_SIZE as usize),
            blocks: Vec::with_capacity(CHUNK_SIZE as usize),
            cursor: 0,
        }
    }

    /// World-space block coordinates of the slot the next pushed block will fill.
    pub fn next_world_position(&self) -> Point3<i32> {
        let dimension = CHUNK_DIMENSION as usize;
        let i = (self.cursor % dimension) as i32;
        let j = ((self.cursor / dimension) % dimension) as i32;
        let k = (self.cursor / (dimension * dimension)) as i32;
        Point3::new(
            i + CHUNK_DIMENSION * self.position.x,
            j + CHUNK_DIMENSION * self.position.y,
            k + CHUNK_DIMENSION * self.position.z,
        )
    }

    /// Whether every slot of the chunk has been filled.
    pub fn is_complete(&self) -> bool {
        self.cursor >= CHUNK_SIZE as usize
    }

    /// Adds a block at the current slot and advances to the next one.
    ///
    /// Pushes past the end of the chunk are ignored.
    pub fn push_block_type(&mut self, block_type: BlockType) {
        if self.is_complete() {
            log::warn!(
                "Ignoring block pushed past the end of chunk {:?}",
                self.position
            );
            return;
        }

        self.solid_array.push(block_type != BlockType::AIR);
        self.blocks.push(Block::new(block_type));
        self.cursor += 1;
    }

    /// Finalizes the chunk creation and returns the constructed `Chunk`.
    ///
    /// Slots that were never pushed are filled with air.
    pub fn return_chunk(mut self) -> Chunk {
        while !self.is_complete() {
            self.push_block_type(BlockType::AIR);
        }

        Chunk {
            position: self.position,
            solid_array: self.solid_array,
            blocks: self.blocks,
        }
    }
}
