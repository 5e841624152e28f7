//! # Block Face Module
//!
//! This module defines the six faces of a voxel block and the neighbor
//! offsets used when placing a block against one of them.

use cgmath::{Point3, Vector3};

/// Represents the six possible faces of a voxel block.
///
/// The world is Z-up. Each variant's value is the face index exchanged with
/// the renderer and interaction handling: the three faces pointing along
/// positive axes come first (x, y, z), then the three pointing along negative
/// axes in the same axis order. `index % 3` is therefore the face's axis.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockFace {
    /// The face pointing towards positive X
    EAST = 0,

    /// The face pointing towards positive Y
    NORTH = 1,

    /// The face pointing towards positive Z
    TOP = 2,

    /// The face pointing towards negative X
    WEST = 3,

    /// The face pointing towards negative Y
    SOUTH = 4,

    /// The face pointing towards negative Z
    BOTTOM = 5,
}

impl BlockFace {
    /// Returns all six block faces in index order.
    pub fn all() -> [BlockFace; 6] {
        [
            BlockFace::EAST,
            BlockFace::NORTH,
            BlockFace::TOP,
            BlockFace::WEST,
            BlockFace::SOUTH,
            BlockFace::BOTTOM,
        ]
    }

    /// Converts a face index in `0..6` back into a face.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    /// Returns the face on `axis` (0 = x, 1 = y, 2 = z).
    ///
    /// `far` selects the face pointing along the negative axis, i.e. the one
    /// seen by a viewer looking along the positive axis.
    pub fn from_axis(axis: usize, far: bool) -> Option<Self> {
        if axis > 2 {
            return None;
        }
        Self::from_index(if far { axis + 3 } else { axis })
    }

    /// The face index exchanged with the renderer.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The axis this face is perpendicular to (0 = x, 1 = y, 2 = z).
    pub fn axis(self) -> usize {
        self.index() % 3
    }

    /// Whether the face normal points along the positive axis.
    pub fn is_positive(self) -> bool {
        self.index() < 3
    }

    /// The integer offset from a block to the neighbor touching this face.
    pub fn normal(self) -> Vector3<i32> {
        let sign = if self.is_positive() { 1 } else { -1 };
        let mut offset = Vector3::new(0, 0, 0);
        offset[self.axis()] = sign;
        offset
    }

    /// The cell adjacent to `position` across this face.
    pub fn neighbor_of(self, position: Point3<i32>) -> Point3<i32> {
        position + self.normal()
    }
}
