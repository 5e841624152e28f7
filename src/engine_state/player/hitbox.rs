//! Player hitbox and the points sampled on its surface for collision tests.

use cgmath::{Point3, Vector3};

/// Points per hitbox edge, corners included.
const POINTS_PER_EDGE: usize = 3;

/// Axis-aligned box relative to the player position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    /// Minimum corner relative to the player position.
    pub offset: Vector3<f64>,
    /// Extents along each axis.
    pub size: Vector3<f64>,
}

impl Hitbox {
    /// Creates a hitbox from its corner offset and extents.
    pub fn new(offset: Vector3<f64>, size: Vector3<f64>) -> Self {
        Self { offset, size }
    }

    /// Builds a hitbox from config arrays.
    pub fn from_arrays(offset: [f64; 3], size: [f64; 3]) -> Self {
        Self::new(offset.into(), size.into())
    }

    /// Minimum corner of the hitbox when the player stands at `position`.
    pub fn corner(&self, position: Point3<f64>) -> Point3<f64> {
        position + self.offset
    }

    /// Points on the surface of the hitbox at `position`.
    ///
    /// Divides the box into a 3×3×3 lattice and keeps every lattice point on
    /// the boundary: 8 corners, 12 edge midpoints and 6 face centers. The
    /// single interior point is skipped. Points are ordered x fastest, then y,
    /// then z.
    pub fn surface_points(&self, position: Point3<f64>) -> Vec<Point3<f64>> {
        let corner = self.corner(position);
        let last = POINTS_PER_EDGE - 1;
        let mut points = Vec::with_capacity(POINTS_PER_EDGE.pow(3) - 1);

        for z in 0..POINTS_PER_EDGE {
            for y in 0..POINTS_PER_EDGE {
                for x in 0..POINTS_PER_EDGE {
                    let on_boundary =
                        x == 0 || x == last || y == 0 || y == last || z == 0 || z == last;
                    if !on_boundary {
                        continue;
                    }
                    points.push(Point3::new(
                        corner.x + self.size.x * (x as f64 / last as f64),
                        corner.y + self.size.y * (y as f64 / last as f64),
                        corner.z + self.size.z * (z as f64 / last as f64),
                    ));
                }
            }
        }

        points
    }
}
