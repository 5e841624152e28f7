//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes block type definitions, block faces, the block property registry
//! and the `BlockState` returned by world queries.

use block_type::BlockType;
use phf::phf_map;

pub mod block_face;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
/// This is used for efficient storage and serialization of block data.
pub type BlockTypeSize = u8;

/// Gameplay properties shared by every block of a given type.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct BlockProperties {
    /// Whether the player hitbox collides with this block.
    pub collidable: bool,
    /// Fog distance applied when the camera is inside the block. Zero disables fog.
    pub fog_depth: f32,
    /// RGBA fog color applied when the camera is inside the block.
    pub fog_color: [f32; 4],
}

const NO_FOG: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

/// Maps each block id to its gameplay properties.
///
/// Keys are `BlockType` discriminants.
pub static BLOCK_REGISTRY: phf::Map<BlockTypeSize, BlockProperties> = phf_map! {
    0u8 => BlockProperties { collidable: false, fog_depth: 0.0, fog_color: NO_FOG },
    1u8 => BlockProperties { collidable: true, fog_depth: 0.0, fog_color: NO_FOG },
    2u8 => BlockProperties { collidable: true, fog_depth: 0.0, fog_color: NO_FOG },
    3u8 => BlockProperties { collidable: true, fog_depth: 0.0, fog_color: NO_FOG },
    4u8 => BlockProperties { collidable: true, fog_depth: 0.0, fog_color: NO_FOG },
    5u8 => BlockProperties { collidable: false, fog_depth: 20.0, fog_color: [0.1, 0.25, 0.6, 1.0] },
    6u8 => BlockProperties { collidable: true, fog_depth: 0.0, fog_color: NO_FOG },
    7u8 => BlockProperties { collidable: false, fog_depth: 0.0, fog_color: NO_FOG },
};

/// Represents a single voxel block in the world.
///
/// This is a lightweight structure that stores only the essential block data.
/// The actual block properties are looked up from the block registry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// The type of this block, encoded as a `BlockTypeSize` for compact storage.
    pub block_type: BlockTypeSize,
}

impl Block {
    /// The empty block.
    pub const AIR: Block = Block { block_type: 0 };

    /// Creates a new block of the specified type.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            block_type: block_type.id(),
        }
    }

    /// Whether this is the empty block (id 0).
    pub fn is_air(&self) -> bool {
        self.block_type == 0
    }

    /// Resolves the registry entry for this block into a `BlockState`.
    ///
    /// Unregistered ids resolve to `None`.
    pub fn state(&self) -> Option<BlockState> {
        BlockState::from_id(self.block_type)
    }
}

/// The result of querying a loaded voxel: the block type and its properties.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlockState {
    /// Type of the block in the voxel.
    pub block_type: BlockType,
    /// Registry properties of that type.
    pub properties: BlockProperties,
}

impl BlockState {
    /// Looks up the state of the given block type.
    pub fn of(block_type: BlockType) -> Self {
        BlockState {
            block_type,
            properties: BLOCK_REGISTRY
                .get(&block_type.id())
                .copied()
                .unwrap_or_default(),
        }
    }

    /// Looks up the state of a raw block id.
    pub fn from_id(id: BlockTypeSize) -> Option<Self> {
        BlockType::from_id(id).map(Self::of)
    }

    /// The raw block id.
    pub fn id(&self) -> BlockTypeSize {
        self.block_type.id()
    }

    /// Whether this is the air block.
    pub fn is_air(&self) -> bool {
        self.block_type == BlockType::AIR
    }

    /// Whether the player collides with this block.
    pub fn is_collidable(&self) -> bool {
        self.properties.collidable
    }

    /// Fog distance while the camera is inside this block.
    pub fn fog_depth(&self) -> f32 {
        self.properties.fog_depth
    }

    /// Fog color while the camera is inside this block.
    pub fn fog_color(&self) -> [f32; 4] {
        self.properties.fog_color
    }
}
