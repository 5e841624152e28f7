//! Fixed-step ray march from the camera.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::engine_state::voxels::block::block_face::BlockFace;
use crate::engine_state::voxels::world::WorldQuery;

use super::{SelectedBlock, TargetingInput, TargetingMethod};

/// Distance advanced per step, in blocks.
pub const RAY_STEP: f64 = 0.1;
/// Steps taken before giving up.
pub const MAX_RAY_STEPS: usize = 100;

/// Walks along the look direction in fixed steps and stops at the first
/// loaded non-air voxel.
#[derive(Debug, Clone, Copy)]
pub struct RayMarchTargeting {
    /// Distance advanced per step.
    pub step: f64,
    /// Steps taken before giving up.
    pub max_steps: usize,
}

impl Default for RayMarchTargeting {
    fn default() -> Self {
        Self {
            step: RAY_STEP,
            max_steps: MAX_RAY_STEPS,
        }
    }
}

fn voxel_of(point: Point3<f64>) -> Point3<i32> {
    Point3::new(
        point.x.floor() as i32,
        point.y.floor() as i32,
        point.z.floor() as i32,
    )
}

/// The face of `hit` that was crossed coming from `previous`.
///
/// Axes are checked x, then y, then z. Returns `None` when both are the same
/// voxel.
pub fn entry_face(previous: Point3<i32>, hit: Point3<i32>) -> Option<BlockFace> {
    if previous.x > hit.x {
        Some(BlockFace::EAST)
    } else if previous.x < hit.x {
        Some(BlockFace::WEST)
    } else if previous.y > hit.y {
        Some(BlockFace::NORTH)
    } else if previous.y < hit.y {
        Some(BlockFace::SOUTH)
    } else if previous.z > hit.z {
        Some(BlockFace::TOP)
    } else if previous.z < hit.z {
        Some(BlockFace::BOTTOM)
    } else {
        None
    }
}

impl TargetingMethod for RayMarchTargeting {
    fn find_selected_block(
        &self,
        input: &TargetingInput,
        world: &dyn WorldQuery,
    ) -> Option<SelectedBlock> {
        let look = Vector3::new(input.look.x as f64, input.look.y as f64, input.look.z as f64);
        let step = look.normalize() * self.step;

        let mut sample = input.camera_position;
        for _ in 0..self.max_steps {
            let previous = sample;
            sample += step;

            let hit = voxel_of(sample);
            if let Some(state) = world.block_at(hit.x, hit.y, hit.z) {
                if !state.is_air() {
                    return Some(SelectedBlock {
                        position: hit,
                        face: entry_face(voxel_of(previous), hit),
                    });
                }
            }
        }

        None
    }

    fn name(&self) -> &'static str {
        "ray march"
    }
}
