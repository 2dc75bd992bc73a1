//! View state for the cube viewer.
//!
//! # Invariants
//! - Input handlers are the only writers; the render loop only reads.
//! - Rotation, zoom, and translation are unbounded (free camera).
//! - Translation composes before rotation, so the cube spins about its own
//!   center while zoom moves it along camera Z.

use glam::{Mat4, Vec3};

/// Vertical field of view, radians.
const FOV_Y: f32 = 45.0 * std::f32::consts::PI / 180.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;

/// Mutable view parameters driven by pointer, wheel, and keyboard input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Rotation about the X axis, radians.
    pub rotation_x: f32,
    /// Rotation about the Y axis, radians.
    pub rotation_y: f32,
    /// Camera-space Z offset. Negative places the cube in front of the
    /// camera; wheel input moves it toward or past the near plane.
    pub zoom: f32,
    pub translation_x: f32,
    pub translation_y: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            zoom: -6.0,
            translation_x: 0.0,
            translation_y: 0.0,
        }
    }
}

impl ViewState {
    /// Model-view matrix: translate by (tx, ty, zoom), then rotate about X,
    /// then about Y. Order matters.
    pub fn model_view(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(
            self.translation_x,
            self.translation_y,
            self.zoom,
        )) * Mat4::from_rotation_x(self.rotation_x)
            * Mat4::from_rotation_y(self.rotation_y)
    }

    /// Perspective projection for the current surface aspect ratio.
    ///
    /// Aspect is recomputed by the caller every frame so it tracks window
    /// resizing.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(FOV_Y, aspect, Z_NEAR, Z_FAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_places_cube_in_front_of_camera() {
        let view = ViewState::default();
        assert_eq!(view.zoom, -6.0);
        assert_eq!(view.rotation_x, 0.0);
        assert_eq!(view.rotation_y, 0.0);
        assert_eq!(view.translation_x, 0.0);
        assert_eq!(view.translation_y, 0.0);
    }

    #[test]
    fn identity_rotation_is_pure_translation() {
        let view = ViewState {
            translation_x: 0.5,
            translation_y: -0.25,
            zoom: -6.0,
            ..ViewState::default()
        };
        let p = view.model_view().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(0.5, -0.25, -6.0)).length() < 1e-6);
    }

    #[test]
    fn rotation_happens_about_the_object_center() {
        // With translation before rotation, the cube center never moves
        // under rotation.
        let view = ViewState {
            rotation_x: 1.3,
            rotation_y: -0.7,
            translation_x: 1.0,
            translation_y: 2.0,
            zoom: -6.0,
        };
        let center = view.model_view().transform_point3(Vec3::ZERO);
        assert!((center - Vec3::new(1.0, 2.0, -6.0)).length() < 1e-6);
    }

    #[test]
    fn x_rotation_applies_before_y_in_the_accumulated_matrix() {
        let view = ViewState {
            rotation_x: std::f32::consts::FRAC_PI_2,
            rotation_y: std::f32::consts::FRAC_PI_2,
            zoom: 0.0,
            ..ViewState::default()
        };
        // M = Rx * Ry, so (1, 0, 0) -> Ry -> (0, 0, -1) -> Rx -> (0, 1, 0).
        let p = view.model_view().transform_point3(Vec3::X);
        assert!((p - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn projection_is_finite_for_normal_aspects() {
        let view = ViewState::default();
        for aspect in [0.5, 1.0, 16.0 / 9.0] {
            let m = view.projection(aspect);
            assert!(m.to_cols_array().iter().all(|v| v.is_finite()));
        }
    }
}
