//! Targeting from the depth buffer sample at the screen center.
//!
//! The renderer reads the depth under the crosshair. Unprojecting that pixel
//! through the inverse view-projection gives the world point the player sees,
//! which sits on the surface of the targeted voxel.

use cgmath::{Matrix4, Point3, SquareMatrix, Vector3, Vector4};

use crate::engine_state::voxels::block::block_face::BlockFace;
use crate::engine_state::voxels::world::WorldQuery;

use super::ray_march::RayMarchTargeting;
use super::{DepthSample, SelectedBlock, TargetingInput, TargetingMethod};

/// Targets the voxel under the screen-center depth sample.
///
/// Falls back to ray marching on ticks without a depth sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthBufferTargeting {
    fallback: RayMarchTargeting,
}

impl DepthBufferTargeting {
    /// Creates the method with the given ray march fallback.
    pub fn new(fallback: RayMarchTargeting) -> Self {
        Self { fallback }
    }
}

/// Maps a window position with depth in `[0, 1]` back to world space.
///
/// Window coordinates follow the GL convention: the origin is the viewport's
/// lower left corner and depth 0 is the near plane. Returns `None` if the
/// view-projection is singular or the point maps to infinity.
pub fn unproject(
    window: Vector3<f32>,
    view: Matrix4<f32>,
    projection: Matrix4<f32>,
    viewport: (u32, u32),
) -> Option<Point3<f32>> {
    let inverse = (projection * view).invert()?;
    let ndc = Vector4::new(
        window.x / viewport.0 as f32 * 2.0 - 1.0,
        window.y / viewport.1 as f32 * 2.0 - 1.0,
        window.z * 2.0 - 1.0,
        1.0,
    );

    let world = inverse * ndc;
    if world.w == 0.0 || !world.w.is_finite() {
        return None;
    }
    Some(Point3::new(world.x / world.w, world.y / world.w, world.z / world.w))
}

/// The voxel holding a coordinate, truncating and then stepping one cell down
/// for negative values.
///
/// This differs from flooring for negative integers: `-2.0` maps to `-3`.
fn voxel_coordinate(value: f32) -> i32 {
    let truncated = value as i32;
    if value < 0.0 {
        truncated - 1
    } else {
        truncated
    }
}

/// Distance to the nearest integer.
fn distance_to_grid(value: f32) -> f32 {
    let fraction = value - value.floor();
    if fraction > 0.5 {
        1.0 - fraction
    } else {
        fraction
    }
}

/// Picks the face whose plane the surface point lies closest to.
///
/// Compares x with y first, then the winner with z, so ties resolve to z over
/// x and to z over y, and x never wins a tie with y. The face is flipped to the
/// far side of its axis when the player looks along the positive axis.
pub fn face_from_surface_point(point: Point3<f32>, look: Vector3<f32>) -> Option<BlockFace> {
    let (fx, fy, fz) = (
        distance_to_grid(point.x),
        distance_to_grid(point.y),
        distance_to_grid(point.z),
    );

    let axis = if fx < fy {
        if fx < fz {
            0
        } else {
            2
        }
    } else if fy < fz {
        1
    } else {
        2
    };

    BlockFace::from_axis(axis, look[axis] > 0.0)
}

impl DepthBufferTargeting {
    fn select_from_depth(
        &self,
        input: &TargetingInput,
        sample: DepthSample,
    ) -> Option<SelectedBlock> {
        if !(0.0..1.0).contains(&sample.depth) {
            return None;
        }

        let (width, height) = sample.viewport;
        if width == 0 || height == 0 {
            return None;
        }
        let window = Vector3::new((width / 2) as f32, (height / 2) as f32, sample.depth);
        let point = unproject(window, input.view, input.projection, sample.viewport)?;

        Some(SelectedBlock {
            position: Point3::new(
                voxel_coordinate(point.x),
                voxel_coordinate(point.y),
                voxel_coordinate(point.z),
            ),
            face: face_from_surface_point(point, input.look),
        })
    }
}

impl TargetingMethod for DepthBufferTargeting {
    fn find_selected_block(
        &self,
        input: &TargetingInput,
        world: &dyn WorldQuery,
    ) -> Option<SelectedBlock> {
        match input.depth {
            Some(sample) => self.select_from_depth(input, sample),
            None => {
                log::trace!("No depth sample this tick, ray marching instead");
                self.fallback.find_selected_block(input, world)
            }
        }
    }

    fn name(&self) -> &'static str {
        "depth buffer"
    }
}
