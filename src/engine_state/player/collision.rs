//! # Collision Resolution
//!
//! Constrains a player's velocity so its hitbox does not move into a
//! collidable voxel.
//!
//! Every surface point of the hitbox is tested on each axis separately: the
//! point is shifted by that axis's velocity component alone and the voxel it
//! lands in is looked up. If any point would end up inside a blocking voxel,
//! the velocity component of that axis is zeroed for the whole hitbox. This is
//! a separating-axis sweep, so sliding along a wall keeps the parallel
//! components intact.
//!
//! Points are tested in order and each test sees the velocity as left by the
//! previous ones.

use cgmath::{Point3, Vector3};

use crate::config::UnloadedChunkPolicy;
use crate::engine_state::voxels::world::WorldQuery;

use super::hitbox::Hitbox;

/// Velocity left after collision resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionOutcome {
    /// The constrained velocity.
    pub velocity: Vector3<f32>,
    /// Whether a downward move was blocked while airborne.
    pub landed: bool,
}

/// Whether a point in world space can be occupied by the player.
///
/// A point is passable when its voxel holds air or a non-collidable block.
/// Voxels in unloaded chunks are passable only under [`UnloadedChunkPolicy::Pass`].
pub fn passable(world: &dyn WorldQuery, x: f64, y: f64, z: f64, policy: UnloadedChunkPolicy) -> bool {
    match world.block_at(x.floor() as i32, y.floor() as i32, z.floor() as i32) {
        Some(state) => state.is_air() || !state.is_collidable(),
        None => policy == UnloadedChunkPolicy::Pass,
    }
}

/// Resolves `velocity` for a hitbox anchored at `position`.
///
/// `airborne` is the player's state before the test. When a downward move is
/// blocked while airborne, the outcome reports a landing.
pub fn resolve_collisions(
    world: &dyn WorldQuery,
    hitbox: &Hitbox,
    position: Point3<f64>,
    velocity: Vector3<f32>,
    airborne: bool,
    policy: UnloadedChunkPolicy,
) -> CollisionOutcome {
    let mut velocity = velocity;
    let mut airborne = airborne;
    let mut landed = false;

    for point in hitbox.surface_points(position) {
        if !passable(world, point.x + velocity.x as f64, point.y, point.z, policy) {
            velocity.x = 0.0;
        }
        if !passable(world, point.x, point.y + velocity.y as f64, point.z, policy) {
            velocity.y = 0.0;
        }
        if !passable(world, point.x, point.y, point.z + velocity.z as f64, policy) {
            if velocity.z < 0.0 && airborne {
                airborne = false;
                landed = true;
            }
            velocity.z = 0.0;
        }
    }

    CollisionOutcome { velocity, landed }
}
