//! # Block Targeting
//!
//! Finds the voxel under the crosshair and the face the player is looking at,
//! and turns that selection into break and place requests.
//!
//! Two methods are available behind [`TargetingMethod`]:
//!
//! * **Depth buffer**: unprojects the depth sample at the screen center
//! * **Ray march**: walks along the look direction in fixed steps
//!
//! The selection is kept by [`TargetSelector`] between ticks.

pub mod depth_buffer;
pub mod ray_march;

use cgmath::{InnerSpace, Matrix4, Point3, Vector3};

use crate::config::TargetingKind;
use crate::engine_state::voxels::block::block_face::BlockFace;
use crate::engine_state::voxels::block::block_type::BlockType;
use crate::engine_state::voxels::world::{WorldError, WorldQuery};

use depth_buffer::DepthBufferTargeting;
use ray_march::RayMarchTargeting;

/// Look vectors shorter than this are treated as degenerate.
const MIN_LOOK_LENGTH: f32 = 1e-6;

/// The targeted voxel and the face the player is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedBlock {
    /// Block coordinates of the voxel.
    pub position: Point3<i32>,
    /// Face facing the player, if it could be determined.
    pub face: Option<BlockFace>,
}

impl SelectedBlock {
    /// The cell a block would be placed into, across the selected face.
    pub fn neighbor(&self) -> Option<Point3<i32>> {
        self.face.map(|face| face.neighbor_of(self.position))
    }

    /// Line-list vertices of the 12 edges of the selected voxel.
    ///
    /// Edges along x come first, then along y, then along z.
    pub fn outline_vertices(&self) -> [[f32; 3]; 24] {
        let (x, y, z) = (
            self.position.x as f32,
            self.position.y as f32,
            self.position.z as f32,
        );
        let corner = |dx: f32, dy: f32, dz: f32| [x + dx, y + dy, z + dz];

        [
            corner(0.0, 0.0, 0.0),
            corner(1.0, 0.0, 0.0),
            corner(0.0, 1.0, 0.0),
            corner(1.0, 1.0, 0.0),
            corner(0.0, 0.0, 1.0),
            corner(1.0, 0.0, 1.0),
            corner(0.0, 1.0, 1.0),
            corner(1.0, 1.0, 1.0),
            corner(0.0, 0.0, 0.0),
            corner(0.0, 1.0, 0.0),
            corner(1.0, 0.0, 0.0),
            corner(1.0, 1.0, 0.0),
            corner(0.0, 0.0, 1.0),
            corner(0.0, 1.0, 1.0),
            corner(1.0, 0.0, 1.0),
            corner(1.0, 1.0, 1.0),
            corner(0.0, 0.0, 0.0),
            corner(0.0, 0.0, 1.0),
            corner(1.0, 0.0, 0.0),
            corner(1.0, 0.0, 1.0),
            corner(0.0, 1.0, 0.0),
            corner(0.0, 1.0, 1.0),
            corner(1.0, 1.0, 0.0),
            corner(1.0, 1.0, 1.0),
        ]
    }
}

/// Depth read back by the renderer at the center of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthSample {
    /// Window depth in `[0, 1]`. `1.0` means nothing was drawn there.
    pub depth: f32,
    /// Viewport width and height in pixels.
    pub viewport: (u32, u32),
}

/// Everything a targeting method may look at in a tick.
#[derive(Debug, Clone, Copy)]
pub struct TargetingInput {
    /// Camera position in world space.
    pub camera_position: Point3<f64>,
    /// Look direction. Need not be normalized.
    pub look: Vector3<f32>,
    /// View matrix of the camera.
    pub view: Matrix4<f32>,
    /// Projection matrix of the camera.
    pub projection: Matrix4<f32>,
    /// Screen-center depth, when the renderer provided one.
    pub depth: Option<DepthSample>,
}

/// A way of finding the targeted voxel.
pub trait TargetingMethod {
    /// The voxel under the crosshair, or `None` when nothing is targeted.
    fn find_selected_block(
        &self,
        input: &TargetingInput,
        world: &dyn WorldQuery,
    ) -> Option<SelectedBlock>;

    /// Human-readable name for logs.
    fn name(&self) -> &'static str;
}

/// A request to change the world at the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockInteraction {
    /// Replace the voxel with air.
    Break {
        /// Voxel to clear.
        position: Point3<i32>,
    },
    /// Fill the voxel with a block.
    Place {
        /// Voxel to fill.
        position: Point3<i32>,
        /// Block to put there.
        block_type: BlockType,
    },
}

impl BlockInteraction {
    /// Voxel affected by the request.
    pub fn position(&self) -> Point3<i32> {
        match *self {
            BlockInteraction::Break { position } => position,
            BlockInteraction::Place { position, .. } => position,
        }
    }

    /// Performs the request on `world`.
    pub fn apply(&self, world: &mut dyn WorldQuery) -> Result<(), WorldError> {
        let (position, block_type) = match *self {
            BlockInteraction::Break { position } => (position, BlockType::AIR),
            BlockInteraction::Place {
                position,
                block_type,
            } => (position, block_type),
        };
        world.set_block(position.x, position.y, position.z, block_type)?;
        log::debug!("Applied {:?}", self);
        Ok(())
    }
}

/// Keeps the current selection and refreshes it each tick.
pub struct TargetSelector {
    method: Box<dyn TargetingMethod>,
    selected: Option<SelectedBlock>,
}

impl TargetSelector {
    /// Creates a selector using `method`, with nothing selected.
    pub fn new(method: Box<dyn TargetingMethod>) -> Self {
        Self {
            method,
            selected: None,
        }
    }

    /// Creates a selector for the configured targeting method.
    ///
    /// The depth buffer method falls back to a default ray march.
    pub fn from_kind(kind: TargetingKind) -> Self {
        let ray_march = RayMarchTargeting::default();
        let method: Box<dyn TargetingMethod> = match kind {
            TargetingKind::DepthBuffer => Box::new(DepthBufferTargeting::new(ray_march)),
            TargetingKind::RayMarch => Box::new(ray_march),
        };
        log::info!("Targeting blocks by {}", method.name());
        Self::new(method)
    }

    /// Recomputes the selection.
    ///
    /// A zero-length or non-finite look vector, or a non-finite camera
    /// position, skips the search and clears the selection, so nothing is
    /// targeted for that tick.
    pub fn update(&mut self, input: &TargetingInput, world: &dyn WorldQuery) -> Option<SelectedBlock> {
        let look_valid = input.look.x.is_finite()
            && input.look.y.is_finite()
            && input.look.z.is_finite()
            && input.look.magnitude() > MIN_LOOK_LENGTH;
        let position_valid = input.camera_position.x.is_finite()
            && input.camera_position.y.is_finite()
            && input.camera_position.z.is_finite();

        if !look_valid || !position_valid {
            log::debug!(
                "Skipping targeting update for look {:?} from {:?}",
                input.look,
                input.camera_position
            );
            self.selected = None;
            return None;
        }

        self.selected = self.method.find_selected_block(input, world);
        self.selected
    }

    /// The current selection.
    pub fn selected(&self) -> Option<SelectedBlock> {
        self.selected
    }

    /// A request to break the selected voxel.
    pub fn break_request(&self) -> Option<BlockInteraction> {
        self.selected
            .map(|selected| BlockInteraction::Break {
                position: selected.position,
            })
    }

    /// A request to place `block_type` against the selected face.
    ///
    /// `None` when nothing is selected or the face is unknown.
    pub fn place_request(&self, block_type: BlockType) -> Option<BlockInteraction> {
        let position = self.selected?.neighbor()?;
        Some(BlockInteraction::Place {
            position,
            block_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerrainKind;
    use crate::engine_state::voxels::world::World;
    use cgmath::SquareMatrix;

    fn world_with_block_at(x: i32, y: i32, z: i32) -> World {
        let mut world = World::new(TerrainKind::Empty);
        world.generate_around(Point3::new(0, 0, 0), 1);
        world.set_block(x, y, z, BlockType::STONE).unwrap();
        world
    }

    fn input(look: Vector3<f32>) -> TargetingInput {
        TargetingInput {
            camera_position: Point3::new(0.5, 0.5, 0.5),
            look,
            view: Matrix4::identity(),
            projection: Matrix4::identity(),
            depth: None,
        }
    }

    #[test]
    fn outline_covers_the_unit_box() {
        let selected = SelectedBlock {
            position: Point3::new(2, -1, 3),
            face: None,
        };
        let vertices = selected.outline_vertices();
        assert_eq!(vertices.len(), 24);
        for vertex in &vertices {
            assert!(vertex[0] == 2.0 || vertex[0] == 3.0);
            assert!(vertex[1] == -1.0 || vertex[1] == 0.0);
            assert!(vertex[2] == 3.0 || vertex[2] == 4.0);
        }

        // Each pair is one edge, differing along exactly one axis.
        for edge in vertices.chunks(2) {
            let differing = (0..3).filter(|&axis| edge[0][axis] != edge[1][axis]).count();
            assert_eq!(differing, 1);
        }
    }

    #[test]
    fn place_goes_against_the_selected_face() {
        let world = world_with_block_at(5, 0, 0);
        let mut selector = TargetSelector::from_kind(TargetingKind::RayMarch);
        selector.update(&input(Vector3::unit_x()), &world);

        assert_eq!(
            selector.place_request(BlockType::DIRT),
            Some(BlockInteraction::Place {
                position: Point3::new(4, 0, 0),
                block_type: BlockType::DIRT,
            })
        );
        assert_eq!(
            selector.break_request(),
            Some(BlockInteraction::Break {
                position: Point3::new(5, 0, 0)
            })
        );
    }

    #[test]
    fn no_selection_means_no_requests() {
        let world = world_with_block_at(15, 15, 15);
        let mut selector = TargetSelector::from_kind(TargetingKind::RayMarch);
        assert_eq!(selector.update(&input(-Vector3::unit_x()), &world), None);
        assert_eq!(selector.break_request(), None);
        assert_eq!(selector.place_request(BlockType::DIRT), None);
    }

    #[test]
    fn unknown_face_cannot_be_placed_against() {
        let selected = SelectedBlock {
            position: Point3::new(0, 0, 0),
            face: None,
        };
        assert_eq!(selected.neighbor(), None);
    }

    #[test]
    fn degenerate_look_clears_the_selection() {
        let mut world = world_with_block_at(5, 0, 0);
        let mut selector = TargetSelector::from_kind(TargetingKind::RayMarch);
        assert!(selector.update(&input(Vector3::unit_x()), &world).is_some());

        // The old target is gone; a skipped tick must not leave it selected.
        world.set_block(5, 0, 0, BlockType::AIR).unwrap();
        assert_eq!(selector.update(&input(Vector3::new(0.0, 0.0, 0.0)), &world), None);
        assert_eq!(selector.selected(), None);
        assert_eq!(selector.break_request(), None);
        assert_eq!(selector.place_request(BlockType::DIRT), None);
    }

    #[test]
    fn non_finite_input_clears_the_selection() {
        let world = world_with_block_at(5, 0, 0);
        let mut selector = TargetSelector::from_kind(TargetingKind::RayMarch);
        assert!(selector.update(&input(Vector3::unit_x()), &world).is_some());
        assert_eq!(
            selector.update(&input(Vector3::new(f32::NAN, 1.0, 0.0)), &world),
            None
        );

        assert!(selector.update(&input(Vector3::unit_x()), &world).is_some());
        let mut lost = input(Vector3::unit_x());
        lost.camera_position.x = f64::INFINITY;
        assert_eq!(selector.update(&lost, &world), None);
        assert_eq!(selector.selected(), None);
    }

    #[test]
    fn interactions_edit_the_world() {
        let mut world = world_with_block_at(5, 0, 0);

        BlockInteraction::Break {
            position: Point3::new(5, 0, 0),
        }
        .apply(&mut world)
        .unwrap();
        assert!(world.block_at(5, 0, 0).unwrap().is_air());

        BlockInteraction::Place {
            position: Point3::new(4, 0, 0),
            block_type: BlockType::WOOD,
        }
        .apply(&mut world)
        .unwrap();
        assert_eq!(world.block_at(4, 0, 0).unwrap().block_type, BlockType::WOOD);
    }

    #[test]
    fn interactions_in_unloaded_chunks_fail() {
        let mut world = World::new(TerrainKind::Empty);
        let result = BlockInteraction::Break {
            position: Point3::new(1, 2, 3),
        }
        .apply(&mut world);
        assert_eq!(result, Err(WorldError::ChunkNotLoaded { x: 1, y: 2, z: 3 }));
    }
}
