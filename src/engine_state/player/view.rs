//! View orientation of the player.
//!
//! Angles are kept in degrees. Whenever one of them changes, the forward and
//! up vectors are recomputed together, so they always describe the current
//! angles.

use cgmath::{Deg, Rad, Vector3};

/// Horizontal, vertical and roll angles plus the directions derived from them.
///
/// The world is Z-up: a horizontal angle of 0° looks along +X and 90° along +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOrientation {
    horizontal: f32,
    vertical: f32,
    roll: f32,
    forward: Vector3<f32>,
    up: Vector3<f32>,
}

impl Default for ViewOrientation {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl ViewOrientation {
    /// Creates an orientation from angles in degrees.
    ///
    /// The horizontal angle is wrapped and the vertical angle clamped the same
    /// way turning does.
    pub fn new(horizontal: f32, vertical: f32, roll: f32) -> Self {
        let mut view = Self {
            horizontal: 0.0,
            vertical: 0.0,
            roll,
            forward: Vector3::unit_x(),
            up: Vector3::unit_z(),
        };
        view.horizontal = Self::wrap_horizontal(horizontal);
        view.vertical = Self::clamp_vertical(vertical);
        view.update_directions();
        view
    }

    /// Horizontal angle in degrees, in `[-180, 180)`.
    pub fn horizontal(&self) -> f32 {
        self.horizontal
    }

    /// Vertical angle in degrees, in `[-90, 90]`.
    pub fn vertical(&self) -> f32 {
        self.vertical
    }

    /// Roll angle in degrees.
    pub fn roll(&self) -> f32 {
        self.roll
    }

    /// Unit vector the player is looking along.
    pub fn forward(&self) -> Vector3<f32> {
        self.forward
    }

    /// Unit up vector of the camera, tilted by the vertical and roll angles.
    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    /// Turns horizontally by `angle` degrees.
    pub fn turn_horizontal(&mut self, angle: f32) {
        if !angle.is_finite() {
            log::debug!("Ignoring non-finite horizontal turn {}", angle);
            return;
        }
        self.horizontal = Self::wrap_horizontal(self.horizontal + angle);
        self.update_directions();
    }

    /// Turns vertically by `angle` degrees, stopping at straight up or down.
    pub fn turn_vertical(&mut self, angle: f32) {
        if !angle.is_finite() {
            log::debug!("Ignoring non-finite vertical turn {}", angle);
            return;
        }
        self.vertical = Self::clamp_vertical(self.vertical + angle);
        self.update_directions();
    }

    /// Sets the roll angle in degrees.
    pub fn set_roll(&mut self, angle: f32) {
        if !angle.is_finite() {
            log::debug!("Ignoring non-finite roll {}", angle);
            return;
        }
        self.roll = angle;
        self.update_directions();
    }

    fn wrap_horizontal(angle: f32) -> f32 {
        if !angle.is_finite() {
            return 0.0;
        }
        let mut wrapped = angle % 360.0;
        if wrapped >= 180.0 {
            wrapped -= 360.0;
        }
        if wrapped < -180.0 {
            wrapped += 360.0;
        }
        wrapped
    }

    fn clamp_vertical(angle: f32) -> f32 {
        if angle.is_nan() {
            return 0.0;
        }
        angle.clamp(-90.0, 90.0)
    }

    fn update_directions(&mut self) {
        let (sh, ch) = Rad::from(Deg(self.horizontal)).0.sin_cos();
        let (sv, cv) = Rad::from(Deg(self.vertical)).0.sin_cos();
        let (sr, cr) = Rad::from(Deg(self.roll)).0.sin_cos();

        self.forward = Vector3::new(ch * cv, sh * cv, sv);
        self.up = Vector3::new(
            sh * sr - ch * sv * cr,
            -ch * sr - sh * sv * cr,
            cv * cr,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn horizontal_angle_stays_wrapped() {
        let mut view = ViewOrientation::default();
        for step in [170.0, 25.0, 720.5, -1000.0, 359.9, -180.0, 180.0, 0.01] {
            view.turn_horizontal(step);
            assert!(
                (-180.0..180.0).contains(&view.horizontal()),
                "{} out of range",
                view.horizontal()
            );
        }
    }

    #[test]
    fn turning_to_exactly_180_wraps_to_minus_180() {
        let mut view = ViewOrientation::default();
        view.turn_horizontal(180.0);
        assert_eq!(view.horizontal(), -180.0);
    }

    #[test]
    fn vertical_angle_is_clamped() {
        let mut view = ViewOrientation::default();
        view.turn_vertical(75.0);
        view.turn_vertical(75.0);
        assert_eq!(view.vertical(), 90.0);
        view.turn_vertical(-400.0);
        assert_eq!(view.vertical(), -90.0);
    }

    #[test]
    fn directions_are_unit_and_orthogonal() {
        let mut view = ViewOrientation::new(30.0, -20.0, 10.0);
        view.turn_horizontal(77.0);
        view.turn_vertical(12.0);
        view.set_roll(-35.0);

        assert!((view.forward().magnitude() - 1.0).abs() < EPSILON);
        assert!((view.up().magnitude() - 1.0).abs() < EPSILON);
        assert!(view.forward().dot(view.up()).abs() < EPSILON);
    }

    #[test]
    fn default_looks_along_x_with_z_up() {
        let view = ViewOrientation::default();
        assert!((view.forward() - Vector3::unit_x()).magnitude() < EPSILON);
        assert!((view.up() - Vector3::unit_z()).magnitude() < EPSILON);
    }

    #[test]
    fn non_finite_turns_are_ignored() {
        let mut view = ViewOrientation::new(45.0, 10.0, 0.0);
        view.turn_horizontal(f32::NAN);
        view.turn_vertical(f32::INFINITY);
        assert_eq!(view.horizontal(), 45.0);
        assert_eq!(view.vertical(), 10.0);
    }
}
