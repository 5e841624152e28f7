//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides functionality for block type identification and conversion.

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// The discriminant of each variant is the block id stored in chunks and
/// used as the key of the block registry. The `FromPrimitive` derive allows
/// conversion back from those ids.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// An air block, which is non-solid and transparent.
    AIR = 0,

    /// A basic dirt block, found under the grass layer.
    DIRT = 1,

    /// A grass block covering the surface of generated terrain.
    GRASS = 2,

    /// A wooden block.
    WOOD = 3,

    /// Stone, the bulk of the ground below the dirt layer.
    STONE = 4,

    /// Water. Not collidable, and tints the view with fog when the camera is inside it.
    WATER = 5,

    /// Glass. Collidable, transparent for rendering purposes.
    GLASS = 6,

    /// A decorative plant. Occupies a voxel but can be walked through.
    FLOWER = 7,
}

impl BlockType {
    /// Converts a `BlockTypeSize` id to a `BlockType`.
    ///
    /// # Returns
    /// The corresponding `BlockType`, or `None` if the id is not registered.
    pub fn from_id(btype: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(btype)
    }

    /// The id stored in chunk data for this type.
    pub fn id(self) -> BlockTypeSize {
        self as BlockTypeSize
    }
}
