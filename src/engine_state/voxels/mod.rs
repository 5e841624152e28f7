//! # Voxel World
//!
//! This module contains the voxel data the player simulation runs against.
//!
//! ## Architecture
//!
//! * **Block**: Block types, block faces, and the registry of block properties
//! * **Chunk**: Fixed-size 16³ arrays of blocks, with terrain generators
//! * **World**: The sparse chunk map and the [`world::WorldQuery`] interface the
//!   physics and targeting code is written against
//!
//! ## Loading
//!
//! A voxel whose chunk has not been generated yet is *absent*. Queries report
//! that as `None` instead of air, so collision code can choose to stop the
//! player at the edge of the loaded area.

pub mod block;
pub mod chunk;
pub mod world;
